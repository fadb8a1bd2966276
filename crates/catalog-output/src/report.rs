//! JSON validation report.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use serde::Serialize;

use catalog_validate::{Issue, ValidationReport, Verdict};

use crate::error::{OutputError, Result};

const REPORT_SCHEMA: &str = "catalog-migrate.validation-report";
const REPORT_SCHEMA_VERSION: u32 = 1;

/// Inputs of the run the report describes.
#[derive(Debug, Clone, Serialize)]
pub struct ReportContext {
    pub books_path: PathBuf,
    pub loans_path: PathBuf,
    pub book_count: usize,
    pub open_loan_count: usize,
}

#[derive(Debug, Serialize)]
struct ValidationReportPayload<'a> {
    schema: &'static str,
    schema_version: u32,
    generated_at: String,
    #[serde(flatten)]
    context: &'a ReportContext,
    verdict: Verdict,
    issue_count: usize,
    checks: Vec<CheckSummary<'a>>,
}

#[derive(Debug, Serialize)]
struct CheckSummary<'a> {
    check: &'static str,
    label: &'static str,
    passed: bool,
    issues: &'a [Issue],
}

/// Write `report` as pretty-printed JSON. Returns the path written.
pub fn write_validation_report_json(
    path: &Path,
    context: &ReportContext,
    report: &ValidationReport,
) -> Result<PathBuf> {
    let payload = ValidationReportPayload {
        schema: REPORT_SCHEMA,
        schema_version: REPORT_SCHEMA_VERSION,
        generated_at: Utc::now().to_rfc3339(),
        context,
        verdict: report.verdict(),
        issue_count: report.issue_count(),
        checks: report
            .results
            .iter()
            .map(|result| CheckSummary {
                check: result.check.as_str(),
                label: result.check.label(),
                passed: result.passed(),
                issues: &result.issues,
            })
            .collect(),
    };
    let json = serde_json::to_string_pretty(&payload)?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| OutputError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    fs::write(path, format!("{json}\n")).map_err(|source| OutputError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(path.to_path_buf())
}
