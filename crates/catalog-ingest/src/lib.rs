//! Catalog data ingestion.
//!
//! Reads the two exports the migration consumes into the in-memory model:
//!
//! - **books**: the denormalized catalog, every column kept in source order
//! - **loans**: only `book_id` and `returned_at`
//!
//! Structural problems (missing columns, unparsable keys or timestamps) fail
//! fast with an [`IngestError`] naming the file, column, and line. Dictionary
//! codes are not interpreted here; a bad code is a validation finding, not an
//! ingest error.
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use catalog_ingest::{read_books, read_loans};
//!
//! let books = read_books(Path::new("books.csv"))?;
//! let loans = read_loans(Path::new("loans.csv"))?;
//! ```

mod books;
mod error;
mod loans;
mod table;
mod timestamp;

// === Error Types ===
pub use error::{IngestError, Result};

// === Readers ===
pub use books::{read_books, read_books_from_reader};
pub use loans::{read_loans, read_loans_from_reader};

// === Cell Parsing ===
pub use timestamp::{UnrecognizedTimestamp, is_null_token, parse_nullable_timestamp};
