//! Consistency validation for the catalog migration.
//!
//! Three independent checks run over the transformed table:
//!
//! 1. **language**: every value is a canonical language label
//! 2. **subarea**: every value resolved in its area's dictionary
//! 3. **status**: loaned books and open loans agree, count and ids
//!
//! All checks always run and every finding is kept; the [`Verdict`] is the
//! logical AND of the three, computed only once the report is complete.

mod checks;
pub mod issue;
pub mod report;

use tracing::{info, warn};

use catalog_model::{BookTable, OpenLoans};

pub use issue::{Check, Issue};
pub use report::{CheckResult, ValidationReport, Verdict};

/// Validate a transformed table against the run's open loans.
pub fn validate(table: &BookTable, open_loans: &OpenLoans) -> ValidationReport {
    let report = checks::run_all(table, open_loans);
    for result in &report.results {
        if result.passed() {
            info!(check = %result.check, "check passed");
        } else {
            warn!(
                check = %result.check,
                issue_count = result.issues.len(),
                "check failed"
            );
        }
    }
    report
}
