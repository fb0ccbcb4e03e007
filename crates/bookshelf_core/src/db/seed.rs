//! Default seed data applied to an empty store.
//!
//! # Responsibility
//! - Carry the fixed admin account and default book catalog as explicit
//!   configuration, injected when the store is opened.
//!
//! # Invariants
//! - Seeding is idempotent: the admin row is inserted only when no user
//!   with that username exists; the catalog only into an empty books table.
//! - Seeded rows are never updated by later runs.

use crate::db::DbResult;
use crate::model::records::Role;
use log::info;
use rusqlite::{params, Connection};

const DEFAULT_ADMIN_USERNAME: &str = "admin";
const DEFAULT_ADMIN_PASSWORD: &str = "admin123";

const DEFAULT_CATALOG: [&str; 15] = [
    "Python Programming",
    "Learn C in One Day",
    "Mastering JavaScript",
    "Data Structures and Algorithms",
    "Introduction to AI",
    "Database Design Fundamentals",
    "Clean Code",
    "Design Patterns in Python",
    "Networking Essentials",
    "Linux Basics for Hackers",
    "Operating Systems Concepts",
    "Computer Architecture",
    "Web Development with Flask",
    "HTML & CSS for Beginners",
    "Machine Learning with Python",
];

/// Rows inserted into a fresh store: one admin account plus the starting
/// book catalog.
///
/// The admin password is stored and compared as a plain string; that is the
/// published login contract of this system, not an oversight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedData {
    /// Username of the bootstrap admin account.
    pub admin_username: String,
    /// Plain credential string for the bootstrap admin account.
    pub admin_password: String,
    /// Titles inserted when the books table is empty.
    pub catalog: Vec<String>,
}

impl Default for SeedData {
    fn default() -> Self {
        Self {
            admin_username: DEFAULT_ADMIN_USERNAME.to_string(),
            admin_password: DEFAULT_ADMIN_PASSWORD.to_string(),
            catalog: DEFAULT_CATALOG.iter().map(|title| title.to_string()).collect(),
        }
    }
}

/// Inserts the seed rows that are still missing, in one transaction.
pub(crate) fn apply_seed(conn: &mut Connection, seed: &SeedData) -> DbResult<()> {
    let tx = conn.transaction()?;

    let admin_exists: i64 = tx.query_row(
        "SELECT EXISTS(SELECT 1 FROM users WHERE username = ?1);",
        [seed.admin_username.as_str()],
        |row| row.get(0),
    )?;
    let admin_created = admin_exists == 0;
    if admin_created {
        tx.execute(
            "INSERT INTO users (username, password, role) VALUES (?1, ?2, ?3);",
            params![
                seed.admin_username.as_str(),
                seed.admin_password.as_str(),
                Role::Admin.as_str(),
            ],
        )?;
    }

    let book_count: i64 = tx.query_row("SELECT COUNT(*) FROM books;", [], |row| row.get(0))?;
    let mut titles_seeded = 0usize;
    if book_count == 0 {
        for title in &seed.catalog {
            tx.execute("INSERT INTO books (title) VALUES (?1);", [title.as_str()])?;
            titles_seeded += 1;
        }
    }

    tx.commit()?;

    info!(
        "event=db_seed module=db status=ok admin_created={} titles_seeded={}",
        admin_created, titles_seeded
    );

    Ok(())
}
