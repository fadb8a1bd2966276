//! Loan status derivation.
//!
//! `status` replaces the legacy `is_reserved` flag. The flag is dropped
//! without being compared against the loans: it is treated as obsolete.

use tracing::debug;

use catalog_model::{BookId, BookTable, LoanStatus, OpenLoans, columns};

/// Counts produced by one status pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusStats {
    pub loaned: usize,
    pub available: usize,
}

/// Status of one book given the run's open-loan ids.
pub fn derive_status(id: BookId, open_loans: &OpenLoans) -> LoanStatus {
    if open_loans.contains(id) {
        LoanStatus::Loaned
    } else {
        LoanStatus::Available
    }
}

/// Set `status` on every book, drop `is_reserved`, and update the column
/// inventory (`is_reserved` removed, `status` appended).
pub fn apply_status(table: &mut BookTable, open_loans: &OpenLoans) -> StatusStats {
    let mut stats = StatusStats::default();
    for book in &mut table.books {
        let status = derive_status(book.id, open_loans);
        match status {
            LoanStatus::Loaned => stats.loaned += 1,
            LoanStatus::Available => stats.available += 1,
        }
        book.status = Some(status);
        book.is_reserved = None;
    }
    table.drop_column(columns::IS_RESERVED);
    table.push_column(columns::STATUS);
    debug!(
        loaned = stats.loaned,
        available = stats.available,
        open_loans = open_loans.len(),
        "derived status"
    );
    stats
}
