//! Whitespace canonicalization for free-text columns.

use std::collections::BTreeMap;

use tracing::debug;

use catalog_model::{BookTable, MigrationOptions, columns};

/// Collapse every run of whitespace into one space and trim both ends.
///
/// Empty and whitespace-only input yields an empty string. Idempotent.
pub fn normalize_whitespace(value: &str) -> String {
    let mut parts = value.split_whitespace();
    let mut normalized = String::with_capacity(value.len());
    if let Some(first) = parts.next() {
        normalized.push_str(first);
        for part in parts {
            normalized.push(' ');
            normalized.push_str(part);
        }
    }
    normalized
}

fn normalize_in_place(value: &mut String) -> bool {
    let normalized = normalize_whitespace(value);
    if normalized == *value {
        return false;
    }
    *value = normalized;
    true
}

/// Normalize every free-text cell of the table in place.
///
/// Protected columns (see [`MigrationOptions::protected_columns`]) are left
/// untouched, as are the recoded and derived columns, whose values come from
/// static dictionaries. Returns the number of changed cells per column.
pub fn normalize_table(
    table: &mut BookTable,
    options: &MigrationOptions,
) -> BTreeMap<String, usize> {
    let mut changed: BTreeMap<String, usize> = BTreeMap::new();
    let normalize_area = !options.is_protected(columns::AREA);
    for book in &mut table.books {
        if normalize_area && normalize_in_place(&mut book.area) {
            *changed.entry(columns::AREA.to_string()).or_default() += 1;
        }
        for (column, value) in &mut book.fields {
            if options.is_protected(column) {
                continue;
            }
            if normalize_in_place(value) {
                *changed.entry(column.clone()).or_default() += 1;
            }
        }
    }
    debug!(
        changed_cells = changed.values().sum::<usize>(),
        columns = changed.len(),
        "normalized text"
    );
    changed
}
