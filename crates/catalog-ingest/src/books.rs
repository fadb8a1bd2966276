//! Book catalog reader.

use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use tracing::debug;

use catalog_model::{BookId, BookRecord, BookTable, Coded, columns};

use crate::error::Result;
use crate::table::{RawTable, open_raw_table, read_raw_table};

/// Read the book export at `path`.
pub fn read_books(path: &Path) -> Result<BookTable> {
    let raw = open_raw_table(path)?;
    books_from_raw(raw)
}

/// Read a book export from any reader; `path` is used for diagnostics only.
pub fn read_books_from_reader<R: Read>(reader: R, path: &Path) -> Result<BookTable> {
    let raw = read_raw_table(reader, path)?;
    books_from_raw(raw)
}

fn books_from_raw(raw: RawTable) -> Result<BookTable> {
    let id_idx = raw.require(columns::ID)?;
    let area_idx = raw.require(columns::AREA)?;
    let subarea_idx = raw.require(columns::SUBAREA)?;
    let language_idx = raw.require(columns::LANGUAGE)?;
    let reserved_idx = raw.require(columns::IS_RESERVED)?;
    let typed = [id_idx, area_idx, subarea_idx, language_idx, reserved_idx];

    let mut books = Vec::with_capacity(raw.rows.len());
    for row in &raw.rows {
        let id_raw = row.get(id_idx);
        let id: BookId = id_raw
            .parse()
            .map_err(|_| raw.invalid_value(columns::ID, id_raw, row.line))?;

        let fields: BTreeMap<String, String> = raw
            .headers
            .iter()
            .enumerate()
            .filter(|(index, _)| !typed.contains(index))
            .map(|(index, header)| (header.clone(), row.get(index).to_string()))
            .collect();

        books.push(BookRecord {
            id,
            area: row.get(area_idx).to_string(),
            subarea: Coded::Code(row.get(subarea_idx).trim().to_string()),
            language: Coded::Code(row.get(language_idx).trim().to_string()),
            is_reserved: Some(row.get(reserved_idx).to_string()),
            status: None,
            fields,
        });
    }
    debug!(
        path = %raw.path.display(),
        rows = books.len(),
        columns = raw.headers.len(),
        "loaded books"
    );
    Ok(BookTable::new(raw.headers, books))
}
