//! Value normalization: dictionary recoding and text cleanup.

pub mod recode;
pub mod text;

pub use recode::{RecodeStats, recode_language, recode_languages, recode_subarea, recode_subareas};
pub use text::{normalize_table, normalize_whitespace};
