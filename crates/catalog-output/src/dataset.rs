//! Migrated catalog dataset output.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};
use tracing::{info, warn};

use catalog_model::BookTable;

use crate::error::{OutputError, Result};

/// Summary of a committed dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenDataset {
    /// Destination, when the sink writes to a file.
    pub path: Option<PathBuf>,
    pub rows: usize,
    /// Lowercase hex SHA-256 of the bytes written.
    pub sha256: String,
}

/// Destination for a committed catalog.
///
/// The pipeline calls [`BookSink::commit`] at most once per run, and only
/// when validation passed. A rejected run calls [`BookSink::discard`]
/// instead, so a dataset left by an earlier run is never mistaken for the
/// output of this one.
pub trait BookSink {
    fn commit(&mut self, table: &BookTable) -> Result<WrittenDataset>;

    /// Remove any previously committed dataset. Returns whether one existed.
    fn discard(&mut self) -> Result<bool>;
}

/// Encode the table as CSV: header row in column order, then one row per book.
pub fn write_books_csv<W: Write>(writer: W, table: &BookTable) -> Result<()> {
    let mut writer = csv::Writer::from_writer(writer);
    writer.write_record(table.columns())?;
    for book in &table.books {
        let row = table.render_row(book);
        writer.write_record(row.iter().map(|value| value.as_ref()))?;
    }
    writer.flush().map_err(|source| OutputError::Io {
        path: PathBuf::from("<csv writer>"),
        source,
    })?;
    Ok(())
}

/// Encode the table as CSV into memory.
pub fn render_books_csv(table: &BookTable) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    write_books_csv(&mut buffer, table)?;
    Ok(buffer)
}

pub fn sha256_hex(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}

/// Writes the catalog to a CSV file.
///
/// The bytes go to a sibling temporary file that is renamed into place, so
/// the destination either holds the complete dataset or does not exist.
#[derive(Debug, Clone)]
pub struct CsvFileSink {
    path: PathBuf,
}

impl CsvFileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn staging_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|name| name.to_os_string())
            .unwrap_or_default();
        name.push(".partial");
        self.path.with_file_name(name)
    }
}

impl BookSink for CsvFileSink {
    fn commit(&mut self, table: &BookTable) -> Result<WrittenDataset> {
        let bytes = render_books_csv(table)?;
        let io_error = |path: &Path| {
            let path = path.to_path_buf();
            move |source| OutputError::Io { path, source }
        };
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_error(parent))?;
        }
        let staging = self.staging_path();
        fs::write(&staging, &bytes).map_err(io_error(&staging))?;
        if let Err(source) = fs::rename(&staging, &self.path) {
            let _ = fs::remove_file(&staging);
            return Err(OutputError::Io {
                path: self.path.clone(),
                source,
            });
        }
        let written = WrittenDataset {
            path: Some(self.path.clone()),
            rows: table.len(),
            sha256: sha256_hex(&bytes),
        };
        info!(
            path = %self.path.display(),
            rows = written.rows,
            sha256 = %written.sha256,
            "wrote migrated catalog"
        );
        Ok(written)
    }

    fn discard(&mut self) -> Result<bool> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                warn!(path = %self.path.display(), "removed stale migrated catalog");
                Ok(true)
            }
            Err(source) if source.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(source) => Err(OutputError::Io {
                path: self.path.clone(),
                source,
            }),
        }
    }
}

/// Keeps the committed bytes in memory.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    pub committed: Option<Vec<u8>>,
}

impl BookSink for MemorySink {
    fn commit(&mut self, table: &BookTable) -> Result<WrittenDataset> {
        let bytes = render_books_csv(table)?;
        let written = WrittenDataset {
            path: None,
            rows: table.len(),
            sha256: sha256_hex(&bytes),
        };
        self.committed = Some(bytes);
        Ok(written)
    }

    fn discard(&mut self) -> Result<bool> {
        Ok(self.committed.take().is_some())
    }
}
