//! Validation check modules.
//!
//! Each module performs one independent post-condition check.

mod language;
mod status;
mod subarea;

use catalog_model::{BookTable, OpenLoans};

use crate::issue::Check;
use crate::report::{CheckResult, ValidationReport};

/// Run every check. None of them stops the others.
pub fn run_all(table: &BookTable, open_loans: &OpenLoans) -> ValidationReport {
    let mut report = ValidationReport::new();

    // 1. Language labels are canonical
    report.add(CheckResult::new(Check::Language, language::check(table)));

    // 2. Subareas resolved within their area
    report.add(CheckResult::new(Check::Subarea, subarea::check(table)));

    // 3. Loan status matches open loans
    report.add(CheckResult::new(
        Check::Status,
        status::check(table, open_loans),
    ));

    report
}
