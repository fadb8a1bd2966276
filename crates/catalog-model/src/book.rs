//! Book records and the in-memory catalog table.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::BookId;

/// Column names the migration reads or writes by name.
pub mod columns {
    pub const ID: &str = "id";
    pub const AREA: &str = "area";
    pub const SUBAREA: &str = "subarea";
    pub const LANGUAGE: &str = "language";
    pub const IS_RESERVED: &str = "is_reserved";
    pub const STATUS: &str = "status";
    pub const EDITION: &str = "edition";
    pub const VOLUME: &str = "volume";

    pub const BOOK_ID: &str = "book_id";
    pub const RETURNED_AT: &str = "returned_at";

    /// Identifier-like columns that keep their source formatting.
    pub const PROTECTED: &[&str] = &[ID, EDITION, VOLUME];
}

/// A dictionary-coded column on its way from integer code to label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Coded {
    /// Raw value as read from the export, not yet recoded.
    Code(String),
    /// Dictionary hit.
    Label(&'static str),
    /// Dictionary miss. Keeps the raw value so diagnostics can show it.
    Unmapped(String),
}

impl Coded {
    pub fn label(&self) -> Option<&'static str> {
        match self {
            Coded::Label(label) => Some(label),
            Coded::Code(_) | Coded::Unmapped(_) => None,
        }
    }

    pub fn is_unmapped(&self) -> bool {
        matches!(self, Coded::Unmapped(_))
    }

    pub fn as_str(&self) -> &str {
        match self {
            Coded::Code(raw) | Coded::Unmapped(raw) => raw,
            Coded::Label(label) => label,
        }
    }
}

impl fmt::Display for Coded {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Loan status derived from open loans.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LoanStatus {
    Loaned,
    Available,
}

impl LoanStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            LoanStatus::Loaned => "emprestado",
            LoanStatus::Available => "disponível",
        }
    }
}

impl fmt::Display for LoanStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row of the catalog.
///
/// The typed fields cover the columns the migration rewrites; every other
/// column lives in `fields`, keyed by its header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookRecord {
    pub id: BookId,
    pub area: String,
    pub subarea: Coded,
    pub language: Coded,
    /// Legacy `is_reserved` cell, verbatim. Never interpreted; present until
    /// status derivation drops it.
    pub is_reserved: Option<String>,
    /// Absent until status derivation adds it.
    pub status: Option<LoanStatus>,
    pub fields: BTreeMap<String, String>,
}

impl BookRecord {
    /// Render the value stored under `column`.
    ///
    /// Unknown columns and absent optional values render as empty strings.
    pub fn value(&self, column: &str) -> Cow<'_, str> {
        match column {
            columns::ID => Cow::Owned(self.id.to_string()),
            columns::AREA => Cow::Borrowed(self.area.as_str()),
            columns::SUBAREA => Cow::Borrowed(self.subarea.as_str()),
            columns::LANGUAGE => Cow::Borrowed(self.language.as_str()),
            columns::IS_RESERVED => Cow::Borrowed(self.is_reserved.as_deref().unwrap_or("")),
            columns::STATUS => Cow::Borrowed(self.status.map(LoanStatus::as_str).unwrap_or("")),
            other => Cow::Borrowed(self.fields.get(other).map(String::as_str).unwrap_or("")),
        }
    }
}

/// The catalog held in memory for one run: ordered column names plus rows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookTable {
    columns: Vec<String>,
    pub books: Vec<BookRecord>,
}

impl BookTable {
    pub fn new(columns: Vec<String>, books: Vec<BookRecord>) -> Self {
        Self { columns, books }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|column| column == name)
    }

    /// Remove a column from the inventory. Returns whether it was present.
    pub fn drop_column(&mut self, name: &str) -> bool {
        let before = self.columns.len();
        self.columns.retain(|column| column != name);
        self.columns.len() != before
    }

    /// Append a column to the inventory unless it is already listed.
    pub fn push_column(&mut self, name: &str) {
        if !self.has_column(name) {
            self.columns.push(name.to_string());
        }
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    /// Render one book in column order.
    pub fn render_row<'a>(&self, book: &'a BookRecord) -> Vec<Cow<'a, str>> {
        self.columns
            .iter()
            .map(|column| book.value(column))
            .collect()
    }
}
