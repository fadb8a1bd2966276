//! Migration pipeline with explicit stages.
//!
//! The pipeline moves through these states strictly in order:
//! 1. **Loaded**: books and loans read into memory
//! 2. **LanguageRecoded**: language codes replaced by labels
//! 3. **SubareaRecoded**: subarea codes resolved within each area
//! 4. **StatusDerived**: `is_reserved` replaced by `status` from open loans
//! 5. **TextNormalized**: whitespace collapsed in free-text columns
//! 6. **Validated**: the three checks run over the final table
//! 7. **Committed** or **Rejected**: the dataset is written only on a pass
//!
//! Open loans are computed once and shared by status derivation and
//! validation, so both see the same set.

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::{info, info_span, trace, warn};

use catalog_ingest::{read_books, read_loans};
use catalog_model::{BookTable, LoanRecord, MigrationOptions, OpenLoans};
use catalog_output::{BookSink, WrittenDataset};
use catalog_transform::{
    RecodeStats, StatusStats, apply_status, normalize_table, recode_languages, recode_subareas,
};
use catalog_validate::{Issue, ValidationReport, Verdict, validate};

use crate::logging::redact_value;

/// Pipeline states, in the order a run visits them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Stage {
    Loaded,
    LanguageRecoded,
    SubareaRecoded,
    StatusDerived,
    TextNormalized,
    Validated,
    Committed,
    Rejected,
}

impl Stage {
    pub fn as_str(self) -> &'static str {
        match self {
            Stage::Loaded => "loaded",
            Stage::LanguageRecoded => "language_recoded",
            Stage::SubareaRecoded => "subarea_recoded",
            Stage::StatusDerived => "status_derived",
            Stage::TextNormalized => "text_normalized",
            Stage::Validated => "validated",
            Stage::Committed => "committed",
            Stage::Rejected => "rejected",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Stage 1: Load
// ============================================================================

/// Source exports for one run.
#[derive(Debug, Clone)]
pub struct MigrationInputs {
    pub books_path: PathBuf,
    pub loans_path: PathBuf,
}

impl MigrationInputs {
    pub fn new(books_path: impl Into<PathBuf>, loans_path: impl Into<PathBuf>) -> Self {
        Self {
            books_path: books_path.into(),
            loans_path: loans_path.into(),
        }
    }
}

/// Both exports, read and typed.
#[derive(Debug, Clone)]
pub struct LoadedCatalog {
    pub table: BookTable,
    pub loans: Vec<LoanRecord>,
}

/// Read both exports. Structural problems abort here, before any stage runs.
pub fn load(inputs: &MigrationInputs) -> Result<LoadedCatalog> {
    let table = read_books(&inputs.books_path)
        .with_context(|| format!("load books from {}", inputs.books_path.display()))?;
    let loans = read_loans(&inputs.loans_path)
        .with_context(|| format!("load loans from {}", inputs.loans_path.display()))?;
    Ok(LoadedCatalog { table, loans })
}

// ============================================================================
// Stages 2-7: Transform, validate, commit
// ============================================================================

/// Everything a run produced, for the summary and the exit code.
#[derive(Debug, Clone)]
pub struct MigrationRun {
    /// States visited, in order.
    pub stages: Vec<Stage>,
    pub columns_before: Vec<String>,
    pub columns_after: Vec<String>,
    pub book_count: usize,
    pub loan_count: usize,
    pub open_loan_count: usize,
    pub language: RecodeStats,
    pub subarea: RecodeStats,
    pub status: StatusStats,
    /// Changed cells per column during normalization.
    pub normalized: BTreeMap<String, usize>,
    pub report: ValidationReport,
    /// Set only when the dataset was committed.
    pub written: Option<WrittenDataset>,
    /// A rejected run removed a dataset left by an earlier run.
    pub discarded_stale: bool,
    pub dry_run: bool,
    /// The transformed table, committed or not.
    pub table: BookTable,
}

impl MigrationRun {
    pub fn final_stage(&self) -> Stage {
        self.stages.last().copied().unwrap_or(Stage::Loaded)
    }

    pub fn verdict(&self) -> Verdict {
        self.report.verdict()
    }

    pub fn committed(&self) -> bool {
        self.written.is_some()
    }

    /// A committed run, or a dry run whose checks all passed.
    pub fn succeeded(&self) -> bool {
        self.committed() || (self.dry_run && self.verdict().is_pass())
    }
}

/// Run every stage over a loaded catalog and commit through `sink` on a pass.
///
/// The sink commits at most once, and never on a failed verdict or a dry
/// run. A rejected run that is not a dry run discards whatever the sink held
/// from an earlier run. A sink error propagates; the run is then neither
/// committed nor reported as such.
pub fn migrate(
    loaded: LoadedCatalog,
    options: &MigrationOptions,
    sink: &mut dyn BookSink,
) -> Result<MigrationRun> {
    let span = info_span!("migration", dry_run = options.dry_run);
    let _guard = span.enter();

    let LoadedCatalog { mut table, loans } = loaded;
    let mut stages = Vec::with_capacity(7);
    let columns_before = table.columns().to_vec();
    let open_loans = OpenLoans::from_loans(&loans);
    info!(
        books = table.len(),
        loans = loans.len(),
        open_loans = open_loans.len(),
        columns = %columns_before.join(","),
        "catalog loaded"
    );
    advance(&mut stages, Stage::Loaded);

    let language = recode_languages(&mut table);
    advance(&mut stages, Stage::LanguageRecoded);

    let subarea = recode_subareas(&mut table);
    advance(&mut stages, Stage::SubareaRecoded);

    let status = apply_status(&mut table, &open_loans);
    advance(&mut stages, Stage::StatusDerived);

    let normalized = normalize_table(&mut table, options);
    advance(&mut stages, Stage::TextNormalized);

    let report = validate(&table, &open_loans);
    info!(columns = %table.columns().join(","), "column inventory after migration");
    advance(&mut stages, Stage::Validated);

    let verdict = report.verdict();
    let mut discarded_stale = false;
    let written = match verdict {
        Verdict::Pass if options.dry_run => {
            info!("dry run: checks passed, dataset not written");
            None
        }
        Verdict::Pass => {
            let written = sink.commit(&table).context("commit migrated catalog")?;
            advance(&mut stages, Stage::Committed);
            Some(written)
        }
        Verdict::Fail => {
            log_rejection(&report);
            if !options.dry_run {
                discarded_stale = sink.discard().context("discard stale migrated catalog")?;
            }
            advance(&mut stages, Stage::Rejected);
            None
        }
    };

    Ok(MigrationRun {
        stages,
        columns_after: table.columns().to_vec(),
        columns_before,
        book_count: table.len(),
        loan_count: loans.len(),
        open_loan_count: open_loans.len(),
        language,
        subarea,
        status,
        normalized,
        report,
        written,
        discarded_stale,
        dry_run: options.dry_run,
        table,
    })
}

fn advance(stages: &mut Vec<Stage>, stage: Stage) {
    info!(stage = %stage, "stage complete");
    stages.push(stage);
}

fn log_rejection(report: &ValidationReport) {
    let failed: Vec<&str> = report
        .failed_checks()
        .map(|result| result.check.as_str())
        .collect();
    warn!(
        failed_checks = %failed.join(","),
        issues = report.issue_count(),
        "validation failed, dataset not written"
    );
    for issue in report.issues() {
        match issue {
            Issue::UnmappedLanguage { book_id, value } => {
                trace!(%book_id, value = redact_value(value), "unmapped language");
            }
            Issue::UnmappedSubarea {
                book_id,
                area,
                value,
            } => {
                trace!(
                    %book_id,
                    area = %area,
                    value = redact_value(value),
                    "unmapped subarea"
                );
            }
            Issue::StatusMismatch { .. } => {}
        }
    }
}
