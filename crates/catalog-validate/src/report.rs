//! Aggregated validation results.

use serde::{Deserialize, Serialize};

use crate::issue::{Check, Issue};

/// Pass/fail decision gating the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Pass,
    Fail,
}

impl Verdict {
    pub fn is_pass(self) -> bool {
        self == Verdict::Pass
    }
}

/// Outcome of one check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckResult {
    pub check: Check,
    pub issues: Vec<Issue>,
}

impl CheckResult {
    pub fn new(check: Check, issues: Vec<Issue>) -> Self {
        Self { check, issues }
    }

    pub fn passed(&self) -> bool {
        self.issues.is_empty()
    }
}

/// Results of every check for one run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub results: Vec<CheckResult>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, result: CheckResult) {
        self.results.push(result);
    }

    /// Logical AND over all checks. A report with no checks fails.
    pub fn verdict(&self) -> Verdict {
        if !self.results.is_empty() && self.results.iter().all(CheckResult::passed) {
            Verdict::Pass
        } else {
            Verdict::Fail
        }
    }

    pub fn result(&self, check: Check) -> Option<&CheckResult> {
        self.results.iter().find(|result| result.check == check)
    }

    pub fn failed_checks(&self) -> impl Iterator<Item = &CheckResult> {
        self.results.iter().filter(|result| !result.passed())
    }

    pub fn issues(&self) -> impl Iterator<Item = &Issue> {
        self.results.iter().flat_map(|result| result.issues.iter())
    }

    pub fn issue_count(&self) -> usize {
        self.results.iter().map(|result| result.issues.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use catalog_model::BookId;

    use super::*;

    fn language_issue(id: i64) -> Issue {
        Issue::UnmappedLanguage {
            book_id: BookId::new(id),
            value: "9".to_string(),
        }
    }

    #[test]
    fn verdict_is_and_of_checks() {
        let mut report = ValidationReport::new();
        report.add(CheckResult::new(Check::Language, vec![]));
        report.add(CheckResult::new(Check::Subarea, vec![]));
        report.add(CheckResult::new(Check::Status, vec![]));
        assert_eq!(report.verdict(), Verdict::Pass);

        report.results[0].issues.push(language_issue(1));
        assert_eq!(report.verdict(), Verdict::Fail);
        assert_eq!(report.failed_checks().count(), 1);
        assert_eq!(report.issue_count(), 1);
    }

    #[test]
    fn empty_report_fails() {
        assert_eq!(ValidationReport::new().verdict(), Verdict::Fail);
    }
}
