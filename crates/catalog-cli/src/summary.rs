use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use catalog_cli::pipeline::{MigrationRun, Stage};
use catalog_validate::{Check, Issue};

use crate::types::RunResult;

pub fn print_summary(result: &RunResult) {
    let run = &result.run;
    println!("Books: {}", result.books_path.display());
    println!("Loans: {}", result.loans_path.display());
    if let Some(path) = &result.report_path {
        println!("Validation report: {}", path.display());
    }
    print_column_table(run);
    print_stage_table(run);
    print_check_table(run);
    print_issue_table(run);
    print_outcome(result);
}

fn print_column_table(run: &MigrationRun) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Column"),
        header_cell("Before"),
        header_cell("After"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Center);
    align_column(&mut table, 2, CellAlignment::Center);
    let mut names: Vec<&String> = run.columns_before.iter().collect();
    for column in &run.columns_after {
        if !run.columns_before.contains(column) {
            names.push(column);
        }
    }
    for name in names {
        table.add_row(vec![
            Cell::new(name),
            presence_cell(run.columns_before.contains(name)),
            presence_cell(run.columns_after.contains(name)),
        ]);
    }
    println!();
    println!("Columns:");
    println!("{table}");
}

fn print_stage_table(run: &MigrationRun) {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Stage"), header_cell("Detail")]);
    apply_summary_table_style(&mut table);
    let changed: usize = run.normalized.values().sum();
    for &stage in &run.stages {
        let detail = match stage {
            Stage::Loaded => format!(
                "{} books, {} loans ({} distinct books on loan)",
                run.book_count, run.loan_count, run.open_loan_count
            ),
            Stage::LanguageRecoded => format!(
                "{} mapped, {} unmapped",
                run.language.mapped, run.language.unmapped
            ),
            Stage::SubareaRecoded => format!(
                "{} mapped, {} unmapped",
                run.subarea.mapped, run.subarea.unmapped
            ),
            Stage::StatusDerived => format!(
                "{} emprestado, {} disponível",
                run.status.loaned, run.status.available
            ),
            Stage::TextNormalized => format!(
                "{changed} cells changed in {} columns",
                run.normalized.len()
            ),
            Stage::Validated => {
                let total = run.report.results.len();
                let failed = run.report.failed_checks().count();
                format!("{} of {total} checks passed", total - failed)
            }
            Stage::Committed => match &run.written {
                Some(written) => format!("{} rows, sha256 {}", written.rows, written.sha256),
                None => "-".to_string(),
            },
            Stage::Rejected if run.discarded_stale => {
                "dataset not written, earlier output removed".to_string()
            }
            Stage::Rejected => "dataset not written".to_string(),
        };
        table.add_row(vec![stage_cell(stage), Cell::new(detail)]);
    }
    println!();
    println!("Stages:");
    println!("{table}");
}

fn print_check_table(run: &MigrationRun) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Check"),
        header_cell("Result"),
        header_cell("Issues"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Center);
    align_column(&mut table, 2, CellAlignment::Right);
    for check in Check::ALL {
        let Some(result) = run.report.result(check) else {
            continue;
        };
        let verdict = if result.passed() {
            Cell::new("PASS")
                .fg(Color::Green)
                .add_attribute(Attribute::Bold)
        } else {
            Cell::new("FAIL")
                .fg(Color::Red)
                .add_attribute(Attribute::Bold)
        };
        table.add_row(vec![
            Cell::new(check.label()),
            verdict,
            count_cell(result.issues.len(), Color::Red),
        ]);
    }
    println!();
    println!("Checks:");
    println!("{table}");
}

fn print_issue_table(run: &MigrationRun) {
    if run.report.issue_count() == 0 {
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Check"),
        header_cell("Book"),
        header_cell("Area"),
        header_cell("Value"),
        header_cell("Message"),
    ]);
    apply_issue_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    for issue in run.report.issues() {
        let (area, value) = match issue {
            Issue::UnmappedLanguage { value, .. } => (None, Some(value.as_str())),
            Issue::UnmappedSubarea { area, value, .. } => {
                (Some(area.as_str()), Some(value.as_str()))
            }
            Issue::StatusMismatch { .. } => (None, None),
        };
        table.add_row(vec![
            Cell::new(issue.check().as_str()).fg(Color::Red),
            optional_cell(issue.book_id()),
            optional_cell(area),
            optional_cell(value),
            Cell::new(issue.message()),
        ]);
    }
    println!();
    println!("Issues:");
    println!("{table}");
}

fn print_outcome(result: &RunResult) {
    let run = &result.run;
    println!();
    match &run.written {
        Some(written) => println!(
            "Migration committed: {} rows written to {}",
            written.rows,
            result.output_path.display()
        ),
        None if run.succeeded() => println!(
            "Dry run passed: {} would be written",
            result.output_path.display()
        ),
        None => {
            let failed: Vec<&str> = run
                .report
                .failed_checks()
                .map(|check| check.check.as_str())
                .collect();
            eprintln!(
                "Migration rejected: {} failed; {} not written",
                failed.join(", "),
                result.output_path.display()
            );
        }
    }
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_issue_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(160);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

pub fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn stage_cell(stage: Stage) -> Cell {
    match stage {
        Stage::Committed => Cell::new(stage)
            .fg(Color::Green)
            .add_attribute(Attribute::Bold),
        Stage::Rejected => Cell::new(stage)
            .fg(Color::Red)
            .add_attribute(Attribute::Bold),
        _ => Cell::new(stage).fg(Color::Blue),
    }
}

fn presence_cell(present: bool) -> Cell {
    if present {
        Cell::new("✓")
            .fg(Color::Green)
            .add_attribute(Attribute::Bold)
    } else {
        dim_cell("-")
    }
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn optional_cell<T: ToString>(value: Option<T>) -> Cell {
    match value {
        Some(value) => Cell::new(value.to_string()),
        None => dim_cell("-"),
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
