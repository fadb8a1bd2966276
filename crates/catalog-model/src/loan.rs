use std::collections::BTreeSet;

use chrono::NaiveDateTime;

use crate::BookId;

/// A loan row. Only the columns the migration reads are kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoanRecord {
    pub book_id: BookId,
    pub returned_at: Option<NaiveDateTime>,
}

impl LoanRecord {
    /// A loan with no return timestamp is still open.
    pub fn is_open(&self) -> bool {
        self.returned_at.is_none()
    }
}

/// Distinct ids of books that have at least one open loan.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OpenLoans {
    ids: BTreeSet<BookId>,
}

impl OpenLoans {
    pub fn from_loans(loans: &[LoanRecord]) -> Self {
        Self {
            ids: loans
                .iter()
                .filter(|loan| loan.is_open())
                .map(|loan| loan.book_id)
                .collect(),
        }
    }

    pub fn contains(&self, id: BookId) -> bool {
        self.ids.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn ids(&self) -> &BTreeSet<BookId> {
        &self.ids
    }
}

impl FromIterator<BookId> for OpenLoans {
    fn from_iter<I: IntoIterator<Item = BookId>>(iter: I) -> Self {
        Self {
            ids: iter.into_iter().collect(),
        }
    }
}
