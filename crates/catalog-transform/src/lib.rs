//! Book catalog transformations.
//!
//! This crate provides the row-level stages of the migration:
//!
//! - **normalization::recode**: dictionary recoding of `language` and `subarea`
//! - **normalization::text**: whitespace canonicalization of free-text columns
//! - **status**: `status` derivation from open loans, replacing `is_reserved`
//!
//! Every row function is pure and takes its lookup data as a parameter; the
//! table functions apply them in place and return counts for logging.

pub mod normalization;
pub mod status;

pub use normalization::{
    RecodeStats, normalize_table, normalize_whitespace, recode_language, recode_languages,
    recode_subarea, recode_subareas,
};
pub use status::{StatusStats, apply_status, derive_status};
