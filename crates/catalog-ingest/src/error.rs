//! Error types for catalog ingestion.

use std::path::PathBuf;
use thiserror::Error;

/// Structural problems that stop a run before any transformation starts.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// Failed to open or read the file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // === CSV Parsing Errors ===
    /// The CSV reader rejected the input.
    #[error("failed to parse CSV {path}: {source}")]
    CsvParse {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// The file has no header row.
    #[error("CSV file is empty: {path}")]
    EmptyCsv { path: PathBuf },

    // === Schema Errors ===
    /// A column every downstream stage relies on is absent.
    #[error("required column '{column}' not found in {path}")]
    MissingColumn { column: String, path: PathBuf },

    /// The same header appears twice, so values cannot be addressed by name.
    #[error("duplicate column '{column}' in {path}")]
    DuplicateColumn { column: String, path: PathBuf },

    // === Value Errors ===
    /// A typed column holds a value that cannot be parsed.
    #[error("invalid {field} value '{value}' at line {line} in {path}")]
    InvalidValue {
        field: String,
        value: String,
        line: u64,
        path: PathBuf,
    },
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = IngestError::MissingColumn {
            column: "is_reserved".to_string(),
            path: PathBuf::from("/data/books.csv"),
        };
        assert_eq!(
            err.to_string(),
            "required column 'is_reserved' not found in /data/books.csv"
        );
    }

    #[test]
    fn test_invalid_value_display() {
        let err = IngestError::InvalidValue {
            field: "id".to_string(),
            value: "x".to_string(),
            line: 3,
            path: PathBuf::from("books.csv"),
        };
        assert_eq!(err.to_string(), "invalid id value 'x' at line 3 in books.csv");
    }
}
