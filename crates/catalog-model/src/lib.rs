//! Book catalog data model.
//!
//! - **dictionary**: static language and area/subarea code tables
//! - **book**: book records, coded columns, and the in-memory catalog table
//! - **loan**: loan records and the open-loan id set
//! - **options**: run configuration

pub mod book;
pub mod dictionary;
pub mod error;
pub mod ids;
pub mod loan;
pub mod options;

pub use book::{BookRecord, BookTable, Coded, LoanStatus, columns};
pub use dictionary::{Area, Language, language_for_code, parse_code, subarea_for_code};
pub use error::{ModelError, Result};
pub use ids::BookId;
pub use loan::{LoanRecord, OpenLoans};
pub use options::MigrationOptions;
