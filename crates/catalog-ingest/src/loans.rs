//! Loan table reader.

use std::io::Read;
use std::path::Path;

use tracing::debug;

use catalog_model::{BookId, LoanRecord, columns};

use crate::error::Result;
use crate::table::{RawTable, open_raw_table, read_raw_table};
use crate::timestamp::parse_nullable_timestamp;

/// Read the loan export at `path`.
pub fn read_loans(path: &Path) -> Result<Vec<LoanRecord>> {
    let raw = open_raw_table(path)?;
    loans_from_raw(&raw)
}

/// Read a loan export from any reader; `path` is used for diagnostics only.
pub fn read_loans_from_reader<R: Read>(reader: R, path: &Path) -> Result<Vec<LoanRecord>> {
    let raw = read_raw_table(reader, path)?;
    loans_from_raw(&raw)
}

fn loans_from_raw(raw: &RawTable) -> Result<Vec<LoanRecord>> {
    let book_idx = raw.require(columns::BOOK_ID)?;
    let returned_idx = raw.require(columns::RETURNED_AT)?;

    let mut loans = Vec::with_capacity(raw.rows.len());
    for row in &raw.rows {
        let book_raw = row.get(book_idx);
        let book_id: BookId = book_raw
            .parse()
            .map_err(|_| raw.invalid_value(columns::BOOK_ID, book_raw, row.line))?;
        let returned_raw = row.get(returned_idx);
        let returned_at = parse_nullable_timestamp(returned_raw)
            .map_err(|_| raw.invalid_value(columns::RETURNED_AT, returned_raw, row.line))?;
        loans.push(LoanRecord {
            book_id,
            returned_at,
        });
    }
    debug!(
        path = %raw.path.display(),
        rows = loans.len(),
        open = loans.iter().filter(|loan| loan.is_open()).count(),
        "loaded loans"
    );
    Ok(loans)
}
