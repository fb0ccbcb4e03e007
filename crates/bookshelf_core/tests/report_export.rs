use bookshelf_core::{
    open_db_in_memory, LibraryService, SeedData, SqliteLibraryRepository, REPORT_HEADER,
};
use std::fs;

#[test]
fn report_with_one_active_loan_has_header_and_single_line() {
    let dir = tempfile::tempdir().unwrap();
    let destination = dir.path().join("report.txt");

    let mut conn = open_db_in_memory(&SeedData::default()).unwrap();
    let repo = SqliteLibraryRepository::try_new(&mut conn).unwrap();
    let mut service = LibraryService::new(repo);

    assert!(service.register("alice", "pw").unwrap());
    assert!(service.borrow("Clean Code", "alice").unwrap());

    let written = service.export_report(Some(&destination)).unwrap();
    assert_eq!(written, destination);

    let content = fs::read_to_string(&written).unwrap();
    assert_eq!(
        content,
        format!("{REPORT_HEADER}\n\nalice is borrowing 'Clean Code'\n")
    );
}

#[test]
fn report_without_loans_is_header_only() {
    let dir = tempfile::tempdir().unwrap();
    let destination = dir.path().join("empty-report.txt");

    let mut conn = open_db_in_memory(&SeedData::default()).unwrap();
    let repo = SqliteLibraryRepository::try_new(&mut conn).unwrap();
    let service = LibraryService::new(repo);

    let written = service.export_report(Some(&destination)).unwrap();
    let content = fs::read_to_string(&written).unwrap();
    assert_eq!(content, format!("{REPORT_HEADER}\n\n"));
}

#[test]
fn report_lists_loans_across_users_in_loan_order() {
    let dir = tempfile::tempdir().unwrap();
    let destination = dir.path().join("report.txt");

    let mut conn = open_db_in_memory(&SeedData::default()).unwrap();
    let repo = SqliteLibraryRepository::try_new(&mut conn).unwrap();
    let mut service = LibraryService::new(repo);

    assert!(service.register("alice", "pw").unwrap());
    assert!(service.register("bob", "pw").unwrap());
    assert!(service.borrow("Clean Code", "alice").unwrap());
    assert!(service.borrow("Networking Essentials", "bob").unwrap());

    let written = service.export_report(Some(&destination)).unwrap();
    let content = fs::read_to_string(&written).unwrap();
    assert_eq!(
        content,
        format!(
            "{REPORT_HEADER}\n\nalice is borrowing 'Clean Code'\nbob is borrowing 'Networking Essentials'\n"
        )
    );
}

#[test]
fn returned_loans_do_not_appear_in_the_report() {
    let mut conn = open_db_in_memory(&SeedData::default()).unwrap();
    let repo = SqliteLibraryRepository::try_new(&mut conn).unwrap();
    let mut service = LibraryService::new(repo);

    assert!(service.register("alice", "pw").unwrap());
    assert!(service.borrow("Clean Code", "alice").unwrap());
    assert!(service.return_book("Clean Code", "alice").unwrap());

    assert_eq!(service.active_loans().unwrap(), vec![]);
}
