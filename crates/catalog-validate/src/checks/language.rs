//! Canonical language check.

use catalog_model::{BookTable, Language};

use crate::issue::Issue;

/// Every `language` must be one of the canonical labels.
pub fn check(table: &BookTable) -> Vec<Issue> {
    table
        .books
        .iter()
        .filter(|book| {
            book.language
                .label()
                .and_then(Language::from_label)
                .is_none()
        })
        .map(|book| Issue::UnmappedLanguage {
            book_id: book.id,
            value: book.language.to_string(),
        })
        .collect()
}
