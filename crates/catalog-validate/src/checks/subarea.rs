//! Subarea resolution check.
//!
//! A subarea passes only when it is a label from the dictionary of the
//! book's own area. Dictionary misses and values that never went through
//! recoding both fail.

use catalog_model::{Area, BookRecord, BookTable};

use crate::issue::Issue;

fn is_resolved(book: &BookRecord) -> bool {
    match (book.subarea.label(), Area::parse(&book.area)) {
        (Some(label), Some(area)) => area.has_subarea(label),
        _ => false,
    }
}

pub fn check(table: &BookTable) -> Vec<Issue> {
    table
        .books
        .iter()
        .filter(|book| !is_resolved(book))
        .map(|book| Issue::UnmappedSubarea {
            book_id: book.id,
            area: book.area.clone(),
            value: book.subarea.to_string(),
        })
        .collect()
}
