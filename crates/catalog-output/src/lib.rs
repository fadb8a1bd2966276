//! Output generation for the catalog migration.
//!
//! - [`dataset`]: the migrated catalog as CSV, behind the [`BookSink`] seam
//! - [`report`]: the machine-readable validation report

pub mod dataset;
mod error;
pub mod report;

pub use dataset::{
    BookSink, CsvFileSink, MemorySink, WrittenDataset, render_books_csv, sha256_hex,
    write_books_csv,
};
pub use error::{OutputError, Result};
pub use report::{ReportContext, write_validation_report_json};
