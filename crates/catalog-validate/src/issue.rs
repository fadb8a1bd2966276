//! Validation issue types.
//!
//! Each variant carries only the data its diagnostic needs.

use std::fmt;

use serde::{Deserialize, Serialize};

use catalog_model::BookId;

/// The independent post-condition checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Check {
    /// Every `language` is a canonical language label.
    Language,
    /// Every `subarea` is a dictionary hit for the book's area.
    Subarea,
    /// Loaned books match the open loans exactly.
    Status,
}

impl Check {
    pub const ALL: [Check; 3] = [Check::Language, Check::Subarea, Check::Status];

    pub fn as_str(self) -> &'static str {
        match self {
            Check::Language => "language",
            Check::Subarea => "subarea",
            Check::Status => "status",
        }
    }

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            Check::Language => "Language recoding",
            Check::Subarea => "Subarea recoding",
            Check::Status => "Loan status",
        }
    }
}

impl fmt::Display for Check {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Issue {
    /// `language` is not a canonical label after recoding.
    UnmappedLanguage { book_id: BookId, value: String },
    /// `subarea` has no dictionary entry for the book's area.
    UnmappedSubarea {
        book_id: BookId,
        area: String,
        value: String,
    },
    /// Loaned books and open loans disagree.
    StatusMismatch {
        loaned_count: usize,
        open_loan_count: usize,
        /// Open-loan ids whose book is not marked loaned.
        not_marked: Vec<BookId>,
        /// Books marked loaned without an open loan.
        unexpected: Vec<BookId>,
    },
}

impl Issue {
    pub fn check(&self) -> Check {
        match self {
            Issue::UnmappedLanguage { .. } => Check::Language,
            Issue::UnmappedSubarea { .. } => Check::Subarea,
            Issue::StatusMismatch { .. } => Check::Status,
        }
    }

    /// Offending row, for row-level issues.
    pub fn book_id(&self) -> Option<BookId> {
        match self {
            Issue::UnmappedLanguage { book_id, .. } | Issue::UnmappedSubarea { book_id, .. } => {
                Some(*book_id)
            }
            Issue::StatusMismatch { .. } => None,
        }
    }

    pub fn message(&self) -> String {
        match self {
            Issue::UnmappedLanguage { value, .. } => {
                format!("language '{value}' is not a canonical language")
            }
            Issue::UnmappedSubarea { area, value, .. } => {
                format!("subarea '{value}' has no entry for area '{area}'")
            }
            Issue::StatusMismatch {
                loaned_count,
                open_loan_count,
                not_marked,
                unexpected,
            } => {
                let mut message = format!(
                    "{loaned_count} books marked emprestado, {open_loan_count} distinct books with open loans"
                );
                if !not_marked.is_empty() {
                    message.push_str(&format!(
                        "; open loans not marked emprestado: {}",
                        join_ids(not_marked)
                    ));
                }
                if !unexpected.is_empty() {
                    message.push_str(&format!(
                        "; marked emprestado without an open loan: {}",
                        join_ids(unexpected)
                    ));
                }
                message
            }
        }
    }
}

fn join_ids(ids: &[BookId]) -> String {
    ids.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.book_id() {
            Some(id) => write!(f, "[{}] book {id}: {}", self.check(), self.message()),
            None => write!(f, "[{}] {}", self.check(), self.message()),
        }
    }
}
