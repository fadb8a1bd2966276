//! End-to-end runs of the migration pipeline over CSV fixtures.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use catalog_cli::pipeline::{LoadedCatalog, MigrationInputs, Stage, load, migrate};
use catalog_model::{BookId, MigrationOptions};
use catalog_output::{BookSink, CsvFileSink, MemorySink, OutputError};
use catalog_validate::{Check, Issue, Verdict};

const BOOK_HEADER: &str = "id,area,subarea,title,authors,language,edition,volume,is_reserved";
const LOAN_HEADER: &str = "id,book_id,user_id,borrowed_at,returned_at";

fn write_fixture(dir: &Path, name: &str, header: &str, rows: &[&str]) -> PathBuf {
    let path = dir.join(name);
    let mut text = String::from(header);
    text.push('\n');
    for row in rows {
        text.push_str(row);
        text.push('\n');
    }
    fs::write(&path, text).unwrap();
    path
}

fn load_fixture(dir: &Path, books: &[&str], loans: &[&str]) -> LoadedCatalog {
    let books = write_fixture(dir, "books.csv", BOOK_HEADER, books);
    let loans = write_fixture(dir, "loans.csv", LOAN_HEADER, loans);
    load(&MigrationInputs::new(books, loans)).unwrap()
}

#[test]
fn loaned_physics_book_is_migrated() {
    let dir = tempfile::tempdir().unwrap();
    let loaded = load_fixture(
        dir.path(),
        &[r#"7,Física,3,"  Intro   ao   Cálculo  ",Ana  Souza,1,2,,1"#],
        &["1,7,10,2024-03-01 09:00:00,"],
    );
    let mut sink = MemorySink::default();

    let run = migrate(loaded, &MigrationOptions::default(), &mut sink).unwrap();

    assert_eq!(run.verdict(), Verdict::Pass);
    assert_eq!(run.final_stage(), Stage::Committed);
    let book = &run.table.books[0];
    assert_eq!(book.value("subarea"), "Termodinâmica");
    assert_eq!(book.value("language"), "Português");
    assert_eq!(book.value("status"), "emprestado");
    assert_eq!(book.value("title"), "Intro ao Cálculo");
    assert_eq!(book.value("authors"), "Ana Souza");

    let written = String::from_utf8(sink.committed.unwrap()).unwrap();
    let mut lines = written.lines();
    assert_eq!(
        lines.next(),
        Some("id,area,subarea,title,authors,language,edition,volume,status")
    );
    assert_eq!(
        lines.next(),
        Some("7,Física,Termodinâmica,Intro ao Cálculo,Ana Souza,Português,2,,emprestado")
    );
}

#[test]
fn stages_run_in_order() {
    let dir = tempfile::tempdir().unwrap();
    let loaded = load_fixture(dir.path(), &["1,Química,4,Orgânica,X,2,1,,0"], &[]);
    let run = migrate(loaded, &MigrationOptions::default(), &mut MemorySink::default()).unwrap();

    assert_eq!(
        run.stages,
        vec![
            Stage::Loaded,
            Stage::LanguageRecoded,
            Stage::SubareaRecoded,
            Stage::StatusDerived,
            Stage::TextNormalized,
            Stage::Validated,
            Stage::Committed,
        ]
    );
    assert!(run.columns_before.iter().any(|c| c == "is_reserved"));
    assert!(!run.columns_after.iter().any(|c| c == "is_reserved"));
    assert_eq!(run.columns_after.last().map(String::as_str), Some("status"));
}

#[test]
fn unknown_subarea_blocks_output() {
    let dir = tempfile::tempdir().unwrap();
    let loaded = load_fixture(
        dir.path(),
        &["8,Física,2,Mecânica,X,1,1,,0", "9,Computação,99,Livro,Y,2,1,,0"],
        &[],
    );
    let output = dir.path().join("books_migrated.csv");
    let mut sink = CsvFileSink::new(&output);

    let run = migrate(loaded, &MigrationOptions::default(), &mut sink).unwrap();

    assert_eq!(run.verdict(), Verdict::Fail);
    assert_eq!(run.final_stage(), Stage::Rejected);
    assert!(!run.committed());
    assert!(!run.succeeded());
    assert!(!output.exists());

    let subarea = run.report.result(Check::Subarea).unwrap();
    assert_eq!(subarea.issues.len(), 1);
    assert_eq!(subarea.issues[0].book_id(), Some(BookId::new(9)));
    assert!(run.report.result(Check::Language).unwrap().passed());
    assert!(run.report.result(Check::Status).unwrap().passed());
}

#[test]
fn every_check_reports_on_multiple_failures() {
    let dir = tempfile::tempdir().unwrap();
    let loaded = load_fixture(
        dir.path(),
        &["1,Biologia,12,A,X,7,1,,0", "2,Variados,1,B,Y,1,1,,1"],
        &["1,2,1,2024-01-01,", "2,3,1,2024-01-01,"],
    );

    let run = migrate(loaded, &MigrationOptions::default(), &mut MemorySink::default()).unwrap();

    assert_eq!(run.report.failed_checks().count(), 3);
    let mismatch = run.report.result(Check::Status).unwrap();
    match &mismatch.issues[0] {
        Issue::StatusMismatch {
            loaned_count,
            open_loan_count,
            not_marked,
            unexpected,
        } => {
            assert_eq!(*loaned_count, 1);
            assert_eq!(*open_loan_count, 2);
            assert_eq!(not_marked, &vec![BookId::new(3)]);
            assert!(unexpected.is_empty());
        }
        other => panic!("unexpected issue {other:?}"),
    }
}

#[test]
fn returned_loans_leave_books_available() {
    let dir = tempfile::tempdir().unwrap();
    let loaded = load_fixture(
        dir.path(),
        &["4,Matemática,1,Cálculo,X,1,1,1,1"],
        &["1,4,1,2024-01-01,2024-01-15 12:00:00", "2,4,2,2024-02-01,NULL"],
    );

    let run = migrate(loaded, &MigrationOptions::default(), &mut MemorySink::default()).unwrap();

    assert_eq!(run.open_loan_count, 1);
    assert_eq!(run.table.books[0].value("status"), "emprestado");
    assert_eq!(run.verdict(), Verdict::Pass);
}

#[test]
fn dry_run_never_commits() {
    struct RefusingSink;

    impl BookSink for RefusingSink {
        fn commit(
            &mut self,
            _table: &catalog_model::BookTable,
        ) -> catalog_output::Result<catalog_output::WrittenDataset> {
            panic!("dry run must not commit");
        }

        fn discard(&mut self) -> catalog_output::Result<bool> {
            panic!("dry run must not touch earlier output");
        }
    }

    let dir = tempfile::tempdir().unwrap();
    let loaded = load_fixture(dir.path(), &["1,Física,1,Geral,X,1,1,,0"], &[]);
    let options = MigrationOptions::default().with_dry_run(true);

    let run = migrate(loaded, &options, &mut RefusingSink).unwrap();

    assert_eq!(run.final_stage(), Stage::Validated);
    assert!(run.succeeded());
    assert!(!run.committed());
}

#[test]
fn missing_column_aborts_before_any_stage() {
    let dir = tempfile::tempdir().unwrap();
    let books = write_fixture(dir.path(), "books.csv", "id,area,language,is_reserved", &[]);
    let loans = write_fixture(dir.path(), "loans.csv", LOAN_HEADER, &[]);

    let error = load(&MigrationInputs::new(books, loans)).unwrap_err();

    let message = format!("{error:#}");
    assert!(message.contains("load books"));
    assert!(message.contains("subarea"));
}

#[test]
fn reservation_flag_is_dropped_without_interpretation() {
    let dir = tempfile::tempdir().unwrap();
    let loaded = load_fixture(
        dir.path(),
        &["1,Física,1,Geral,X,1,1,,2", "2,Física,2,Mecânica,Y,1,1,,sim"],
        &[],
    );

    let run = migrate(loaded, &MigrationOptions::default(), &mut MemorySink::default()).unwrap();

    assert_eq!(run.final_stage(), Stage::Committed);
    assert!(!run.columns_after.iter().any(|c| c == "is_reserved"));
    assert!(run.table.books.iter().all(|book| book.value("status") == "disponível"));
}

#[test]
fn rejected_run_removes_earlier_output() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("books_migrated.csv");

    let passing = load_fixture(dir.path(), &["8,Física,2,Mecânica,X,1,1,,0"], &[]);
    let first = migrate(passing, &MigrationOptions::default(), &mut CsvFileSink::new(&output))
        .unwrap();
    assert!(first.committed());
    assert!(output.exists());

    let failing = load_fixture(dir.path(), &["9,Computação,99,Livro,Y,2,1,,0"], &[]);
    let second = migrate(failing, &MigrationOptions::default(), &mut CsvFileSink::new(&output))
        .unwrap();

    assert_eq!(second.final_stage(), Stage::Rejected);
    assert!(second.discarded_stale);
    assert!(!output.exists());
}

#[test]
fn rejected_dry_run_keeps_earlier_output() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("books_migrated.csv");
    fs::write(&output, "id\n").unwrap();

    let failing = load_fixture(dir.path(), &["9,Computação,99,Livro,Y,2,1,,0"], &[]);
    let options = MigrationOptions::default().with_dry_run(true);
    let run = migrate(failing, &options, &mut CsvFileSink::new(&output)).unwrap();

    assert_eq!(run.final_stage(), Stage::Rejected);
    assert!(!run.discarded_stale);
    assert!(output.exists());
}

#[derive(Clone, Default)]
struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn column_inventory_is_logged_even_when_commit_fails() {
    struct FailingSink;

    impl BookSink for FailingSink {
        fn commit(
            &mut self,
            _table: &catalog_model::BookTable,
        ) -> catalog_output::Result<catalog_output::WrittenDataset> {
            Err(OutputError::Io {
                path: PathBuf::from("books_migrated.csv"),
                source: io::Error::other("disk full"),
            })
        }

        fn discard(&mut self) -> catalog_output::Result<bool> {
            Ok(false)
        }
    }

    let dir = tempfile::tempdir().unwrap();
    let loaded = load_fixture(dir.path(), &["1,Física,1,Geral,X,1,1,,0"], &[]);
    let logs = CapturedLogs::default();
    let writer = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::INFO)
        .finish();

    let result = tracing::subscriber::with_default(subscriber, || {
        migrate(loaded, &MigrationOptions::default(), &mut FailingSink)
    });

    assert!(result.is_err());
    let logs = logs.contents();
    assert!(logs.contains("columns=id,area,subarea,title,authors,language,edition,volume,is_reserved"));
}

#[test]
fn stage_counts_are_logged_once() {
    let dir = tempfile::tempdir().unwrap();
    let loaded = load_fixture(dir.path(), &["1,Física,1,Geral,X,1,1,,0"], &[]);
    let logs = CapturedLogs::default();
    let writer = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::DEBUG)
        .finish();

    tracing::subscriber::with_default(subscriber, || {
        migrate(loaded, &MigrationOptions::default(), &mut MemorySink::default())
    })
    .unwrap();

    let logs = logs.contents();
    for message in ["recoded language", "recoded subarea", "derived status", "normalized text"] {
        assert_eq!(logs.matches(message).count(), 1, "{message}");
    }
}
