//! Tests for table-level transformations.

use std::collections::BTreeMap;

use catalog_model::{
    BookId, BookRecord, BookTable, Coded, LoanStatus, MigrationOptions, OpenLoans, columns,
};
use catalog_transform::{
    apply_status, derive_status, normalize_table, recode_languages, recode_subareas,
};

fn book(id: i64, area: &str, subarea: &str, language: &str) -> BookRecord {
    let mut fields = BTreeMap::new();
    fields.insert("title".to_string(), "  Intro   ao   Cálculo  ".to_string());
    fields.insert("authors".to_string(), "Guidorizzi".to_string());
    fields.insert("edition".to_string(), " 2 ".to_string());
    fields.insert("volume".to_string(), "1  ".to_string());
    BookRecord {
        id: BookId::new(id),
        area: area.to_string(),
        subarea: Coded::Code(subarea.to_string()),
        language: Coded::Code(language.to_string()),
        is_reserved: Some("0".to_string()),
        status: None,
        fields,
    }
}

fn table(books: Vec<BookRecord>) -> BookTable {
    let columns = [
        "id",
        "area",
        "subarea",
        "authors",
        "edition",
        "language",
        "volume",
        "title",
        "is_reserved",
    ];
    BookTable::new(columns.iter().map(|c| c.to_string()).collect(), books)
}

#[test]
fn recodes_language_and_subarea_in_place() {
    let mut books = table(vec![
        book(7, "Física", "3", "1"),
        book(9, "Computação", "99", "5"),
    ]);

    let languages = recode_languages(&mut books);
    assert_eq!(languages.mapped, 1);
    assert_eq!(languages.unmapped, 1);
    let subareas = recode_subareas(&mut books);
    assert_eq!(subareas.mapped, 1);
    assert_eq!(subareas.unmapped, 1);

    assert_eq!(books.books[0].language, Coded::Label("Português"));
    assert_eq!(books.books[0].subarea, Coded::Label("Termodinâmica"));
    assert_eq!(books.books[1].language, Coded::Unmapped("5".to_string()));
    assert_eq!(books.books[1].subarea, Coded::Unmapped("99".to_string()));
}

#[test]
fn status_replaces_reservation_flag() {
    let mut books = table(vec![book(7, "Física", "3", "1"), book(8, "Física", "1", "2")]);
    let open: OpenLoans = [BookId::new(7)].into_iter().collect();

    let stats = apply_status(&mut books, &open);
    assert_eq!(stats.loaned, 1);
    assert_eq!(stats.available, 1);
    assert_eq!(books.books[0].status, Some(LoanStatus::Loaned));
    assert_eq!(books.books[1].status, Some(LoanStatus::Available));
    assert!(books.books.iter().all(|b| b.is_reserved.is_none()));
    assert!(!books.has_column(columns::IS_RESERVED));
    assert_eq!(books.columns().last().map(String::as_str), Some("status"));
}

#[test]
fn status_ignores_the_old_flag() {
    let mut reserved = book(3, "Física", "1", "1");
    reserved.is_reserved = Some("1".to_string());
    let open = OpenLoans::default();
    assert_eq!(derive_status(reserved.id, &open), LoanStatus::Available);
}

#[test]
fn open_loans_for_unknown_books_do_not_mark_anything() {
    let mut books = table(vec![book(1, "Física", "1", "1")]);
    let open: OpenLoans = [BookId::new(42)].into_iter().collect();
    let stats = apply_status(&mut books, &open);
    assert_eq!(stats.loaned, 0);
}

#[test]
fn normalizes_free_text_but_not_protected_columns() {
    let mut books = table(vec![book(1, "  Física ", "1", "1")]);
    let changed = normalize_table(&mut books, &MigrationOptions::default());

    let record = &books.books[0];
    assert_eq!(record.area, "Física");
    assert_eq!(record.fields["title"], "Intro ao Cálculo");
    assert_eq!(record.fields["authors"], "Guidorizzi");
    assert_eq!(record.fields["edition"], " 2 ");
    assert_eq!(record.fields["volume"], "1  ");

    assert_eq!(changed.get("area"), Some(&1));
    assert_eq!(changed.get("title"), Some(&1));
    assert_eq!(changed.get("authors"), None);
}

#[test]
fn extra_protected_columns_are_respected() {
    let mut books = table(vec![book(1, "Física", "1", "1")]);
    let options = MigrationOptions::default().with_protected_column("title");
    normalize_table(&mut books, &options);
    assert_eq!(books.books[0].fields["title"], "  Intro   ao   Cálculo  ");
}
