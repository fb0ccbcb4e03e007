use bookshelf_core::db::migrations::latest_version;
use bookshelf_core::{open_db, open_db_in_memory, DbError, SeedData};
use rusqlite::Connection;
use std::collections::HashSet;

#[test]
fn open_in_memory_applies_schema_and_seed() {
    let conn = open_db_in_memory(&SeedData::default()).unwrap();

    assert_eq!(schema_version(&conn), latest_version());
    assert_table_exists(&conn, "users");
    assert_table_exists(&conn, "books");
    assert_table_exists(&conn, "borrowed");
    assert_table_exists(&conn, "history");

    let (password, role): (String, String) = conn
        .query_row(
            "SELECT password, role FROM users WHERE username = 'admin';",
            [],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )
        .unwrap();
    assert_eq!(password, "admin123");
    assert_eq!(role, "admin");

    let seeded: HashSet<String> = book_titles(&conn).into_iter().collect();
    let expected: HashSet<String> = SeedData::default().catalog.into_iter().collect();
    assert_eq!(seeded, expected);
    assert_eq!(seeded.len(), 15);
}

#[test]
fn opening_same_database_twice_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("library.db");
    let seed = SeedData::default();

    let conn_first = open_db(&path, &seed).unwrap();
    drop(conn_first);

    let conn_second = open_db(&path, &seed).unwrap();
    let admin_rows: i64 = conn_second
        .query_row(
            "SELECT COUNT(*) FROM users WHERE username = 'admin';",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(admin_rows, 1);
    assert_eq!(book_titles(&conn_second).len(), 15);
}

#[test]
fn seed_skips_catalog_when_books_already_exist() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("library.db");
    let seed = SeedData::default();

    let conn = open_db(&path, &seed).unwrap();
    conn.execute("INSERT INTO books (title) VALUES ('Extra Title');", [])
        .unwrap();
    drop(conn);

    let conn = open_db(&path, &seed).unwrap();
    assert_eq!(book_titles(&conn).len(), 16);
}

#[test]
fn custom_seed_is_honored() {
    let seed = SeedData {
        admin_username: "root".to_string(),
        admin_password: "secret".to_string(),
        catalog: vec!["Only Book".to_string()],
    };
    let conn = open_db_in_memory(&seed).unwrap();

    let role: String = conn
        .query_row(
            "SELECT role FROM users WHERE username = 'root';",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(role, "admin");
    assert_eq!(book_titles(&conn), vec!["Only Book".to_string()]);
}

#[test]
fn opening_database_with_newer_schema_version_returns_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.db");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    let err = open_db(&path, &SeedData::default()).unwrap_err();
    match err {
        DbError::UnsupportedSchemaVersion {
            db_version,
            latest_supported,
        } => {
            assert_eq!(db_version, 999);
            assert_eq!(latest_supported, latest_version());
        }
        other => panic!("unexpected error: {other}"),
    }
}

fn schema_version(conn: &Connection) -> u32 {
    conn.query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap()
}

fn book_titles(conn: &Connection) -> Vec<String> {
    let mut stmt = conn.prepare("SELECT title FROM books ORDER BY id;").unwrap();
    let titles = stmt
        .query_map([], |row| row.get(0))
        .unwrap()
        .collect::<Result<Vec<String>, _>>()
        .unwrap();
    titles
}

fn assert_table_exists(conn: &Connection, table_name: &str) {
    let exists: i64 = conn
        .query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = 'table' AND name = ?1
            );",
            [table_name],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(exists, 1, "table {table_name} does not exist");
}
