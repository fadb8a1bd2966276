use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use comfy_table::Table;
use tracing::info;

use catalog_cli::pipeline::{MigrationInputs, load, migrate};
use catalog_model::{Area, Language, MigrationOptions};
use catalog_output::{CsvFileSink, ReportContext, write_validation_report_json};

use crate::cli::RunArgs;
use crate::summary::{apply_table_style, header_cell};
use crate::types::RunResult;

const DEFAULT_OUTPUT_NAME: &str = "books_migrated.csv";

pub fn run_dictionaries() -> Result<()> {
    let mut languages = Table::new();
    languages.set_header(vec![header_cell("Code"), header_cell("Language")]);
    apply_table_style(&mut languages);
    for language in Language::ALL {
        languages.add_row(vec![language.code().to_string(), language.label().to_string()]);
    }
    println!("{languages}");

    let mut subareas = Table::new();
    subareas.set_header(vec![
        header_cell("Area"),
        header_cell("Code"),
        header_cell("Subarea"),
    ]);
    apply_table_style(&mut subareas);
    for area in Area::ALL {
        for (code, name) in area.subareas() {
            subareas.add_row(vec![
                area.as_str().to_string(),
                code.to_string(),
                (*name).to_string(),
            ]);
        }
    }
    println!("{subareas}");
    Ok(())
}

pub fn run_migration(args: &RunArgs) -> Result<RunResult> {
    let inputs = MigrationInputs::new(&args.books, &args.loans);
    let output_path = args
        .output
        .clone()
        .unwrap_or_else(|| default_output_path(&args.books));
    let options = MigrationOptions::new().with_dry_run(args.dry_run);

    let loaded = load(&inputs)?;
    let mut sink = CsvFileSink::new(&output_path);
    let run = migrate(loaded, &options, &mut sink)?;

    let report_path = match &args.report {
        Some(path) => {
            let context = ReportContext {
                books_path: inputs.books_path.clone(),
                loans_path: inputs.loans_path.clone(),
                book_count: run.book_count,
                open_loan_count: run.open_loan_count,
            };
            let written = write_validation_report_json(path, &context, &run.report)
                .with_context(|| format!("write validation report to {}", path.display()))?;
            info!(path = %written.display(), "wrote validation report");
            Some(written)
        }
        None => None,
    };

    Ok(RunResult {
        books_path: inputs.books_path,
        loans_path: inputs.loans_path,
        output_path,
        report_path,
        run,
    })
}

fn default_output_path(books: &Path) -> PathBuf {
    books.with_file_name(DEFAULT_OUTPUT_NAME)
}
