//! Header-addressed CSV reading shared by the book and loan readers.

use std::io::Read;
use std::path::{Path, PathBuf};

use csv::ReaderBuilder;

use crate::error::{IngestError, Result};

fn normalize_header(raw: &str) -> String {
    raw.trim().trim_matches('\u{feff}').trim().to_string()
}

/// A CSV file held as text cells, addressed by header name.
#[derive(Debug, Clone)]
pub(crate) struct RawTable {
    pub path: PathBuf,
    pub headers: Vec<String>,
    pub rows: Vec<RawRow>,
}

#[derive(Debug, Clone)]
pub(crate) struct RawRow {
    /// 1-based line of the record in the source file.
    pub line: u64,
    pub cells: Vec<String>,
}

impl RawRow {
    pub fn get(&self, index: usize) -> &str {
        self.cells.get(index).map(String::as_str).unwrap_or("")
    }
}

impl RawTable {
    pub fn index_of(&self, column: &str) -> Option<usize> {
        self.headers.iter().position(|header| header == column)
    }

    /// Index of a column the caller cannot proceed without.
    pub fn require(&self, column: &str) -> Result<usize> {
        self.index_of(column)
            .ok_or_else(|| IngestError::MissingColumn {
                column: column.to_string(),
                path: self.path.clone(),
            })
    }

    pub fn invalid_value(&self, field: &str, value: &str, line: u64) -> IngestError {
        IngestError::InvalidValue {
            field: field.to_string(),
            value: value.to_string(),
            line,
            path: self.path.clone(),
        }
    }
}

/// Read a headed CSV. Cells are kept verbatim; only headers are trimmed.
pub(crate) fn read_raw_table<R: Read>(reader: R, path: &Path) -> Result<RawTable> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);
    let csv_error = |source| IngestError::CsvParse {
        path: path.to_path_buf(),
        source,
    };
    let headers: Vec<String> = reader
        .headers()
        .map_err(csv_error)?
        .iter()
        .map(normalize_header)
        .collect();
    if headers.iter().all(String::is_empty) {
        return Err(IngestError::EmptyCsv {
            path: path.to_path_buf(),
        });
    }
    for (index, header) in headers.iter().enumerate() {
        if headers[..index].contains(header) {
            return Err(IngestError::DuplicateColumn {
                column: header.clone(),
                path: path.to_path_buf(),
            });
        }
    }

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(csv_error)?;
        if record.iter().all(|value| value.trim().is_empty()) {
            continue;
        }
        let line = record.position().map(csv::Position::line).unwrap_or(0);
        rows.push(RawRow {
            line,
            cells: record.iter().map(str::to_string).collect(),
        });
    }
    Ok(RawTable {
        path: path.to_path_buf(),
        headers,
        rows,
    })
}

pub(crate) fn open_raw_table(path: &Path) -> Result<RawTable> {
    let file = std::fs::File::open(path).map_err(|source| IngestError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    read_raw_table(file, path)
}
