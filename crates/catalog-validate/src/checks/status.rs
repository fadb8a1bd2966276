//! Loan status cross-reference check.

use std::collections::BTreeSet;

use catalog_model::{BookId, BookTable, LoanStatus, OpenLoans};

use crate::issue::Issue;

/// The number of loaned books must equal the number of distinct open-loan
/// ids, and the two id sets must be identical.
pub fn check(table: &BookTable, open_loans: &OpenLoans) -> Vec<Issue> {
    let loaned: Vec<BookId> = table
        .books
        .iter()
        .filter(|book| book.status == Some(LoanStatus::Loaned))
        .map(|book| book.id)
        .collect();
    let marked: BTreeSet<BookId> = loaned.iter().copied().collect();
    let open = open_loans.ids();

    let not_marked: Vec<BookId> = open.difference(&marked).copied().collect();
    let unexpected: Vec<BookId> = marked.difference(open).copied().collect();

    if loaned.len() == open.len() && not_marked.is_empty() && unexpected.is_empty() {
        return Vec::new();
    }
    vec![Issue::StatusMismatch {
        loaned_count: loaned.len(),
        open_loan_count: open.len(),
        not_marked,
        unexpected,
    }]
}
