//! Library repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide the registration, login, catalog, loan, and history APIs over
//!   canonical storage.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Each write is one transaction: a borrow creates the loan row and the
//!   history row together or not at all, a return deletes and records
//!   together or not at all.
//! - Duplicate usernames/titles and unmatched borrow/return pairs are
//!   business outcomes (`Ok(false)`), not errors.
//! - Credentials are compared verbatim; no hashing. Known weakness, kept
//!   because callers depend on the exact login contract.

use crate::db::{migrations, DbError};
use crate::model::records::{
    borrowed_action, normalize_title, normalize_username, returned_action, ActiveLoan, BookId,
    Role, UserId,
};
use rusqlite::{params, Connection, ErrorCode, TransactionBehavior};
use std::error::Error;
use std::fmt::{Display, Formatter};

const REQUIRED_TABLES: [&str; 4] = ["users", "books", "borrowed", "history"];

pub type RepoResult<T> = Result<T, RepoError>;

/// Error type for library persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection is not migrated: schema version {actual_version}, expected {expected_version}"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "required table `{table}` is missing")
            }
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::UninitializedConnection { .. } => None,
            Self::MissingRequiredTable(_) => None,
            Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface for all library operations.
pub trait LibraryRepository {
    /// Creates an account with role `user`. Returns `false` when the
    /// username is blank or already taken.
    fn register_user(&self, username: &str, password: &str) -> RepoResult<bool>;
    /// Looks up an exact (username, password) match and returns its role.
    fn login_user(&self, username: &str, password: &str) -> RepoResult<Option<Role>>;
    /// Resolves a username to its storage identity.
    fn find_user_id(&self, username: &str) -> RepoResult<Option<UserId>>;
    /// Adds a catalog title. Returns `false` when the title is blank or
    /// already present.
    fn add_book(&self, title: &str) -> RepoResult<bool>;
    /// Titles of books with no active loan, in storage order.
    fn list_available_books(&self) -> RepoResult<Vec<String>>;
    /// Lends a book to a user and records history, atomically. Returns
    /// `false` for an unknown book or user, or a book already on loan.
    fn borrow_book(&mut self, title: &str, username: &str) -> RepoResult<bool>;
    /// Returns a book lent to exactly this user and records history,
    /// atomically. Returns `false` when no matching loan exists.
    fn return_book(&mut self, title: &str, username: &str) -> RepoResult<bool>;
    /// All history action strings for a username, in append order.
    fn history_for_user(&self, username: &str) -> RepoResult<Vec<String>>;
    /// Every active loan joined with its borrower and title.
    fn active_loans(&self) -> RepoResult<Vec<ActiveLoan>>;
}

/// SQLite-backed library repository.
pub struct SqliteLibraryRepository<'conn> {
    conn: &'conn mut Connection,
}

impl<'conn> SqliteLibraryRepository<'conn> {
    /// Constructs a repository from a migrated, seeded connection.
    ///
    /// Rejects connections whose schema version or table set does not match
    /// what this binary was built against.
    pub fn try_new(conn: &'conn mut Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl LibraryRepository for SqliteLibraryRepository<'_> {
    fn register_user(&self, username: &str, password: &str) -> RepoResult<bool> {
        let username = match normalize_username(username) {
            Some(value) => value,
            None => return Ok(false),
        };

        let insert = self.conn.execute(
            "INSERT INTO users (username, password, role) VALUES (?1, ?2, ?3);",
            params![username, password, Role::User.as_str()],
        );
        match insert {
            Ok(_) => Ok(true),
            Err(err) if is_unique_violation(&err) => Ok(false),
            Err(err) => Err(err.into()),
        }
    }

    fn login_user(&self, username: &str, password: &str) -> RepoResult<Option<Role>> {
        let mut stmt = self.conn.prepare(
            "SELECT role FROM users WHERE username = ?1 AND password = ?2;",
        )?;

        let mut rows = stmt.query(params![username, password])?;
        if let Some(row) = rows.next()? {
            let role_text: String = row.get(0)?;
            let role = Role::parse(&role_text).ok_or_else(|| {
                RepoError::InvalidData(format!("invalid role value `{role_text}` in users.role"))
            })?;
            return Ok(Some(role));
        }

        Ok(None)
    }

    fn find_user_id(&self, username: &str) -> RepoResult<Option<UserId>> {
        find_user_id(self.conn, username)
    }

    fn add_book(&self, title: &str) -> RepoResult<bool> {
        let title = match normalize_title(title) {
            Some(value) => value,
            None => return Ok(false),
        };

        let insert = self
            .conn
            .execute("INSERT INTO books (title) VALUES (?1);", [title]);
        match insert {
            Ok(_) => Ok(true),
            Err(err) if is_unique_violation(&err) => Ok(false),
            Err(err) => Err(err.into()),
        }
    }

    fn list_available_books(&self) -> RepoResult<Vec<String>> {
        let mut stmt = self.conn.prepare(
            "SELECT title FROM books
             WHERE id NOT IN (SELECT book_id FROM borrowed);",
        )?;

        let mut rows = stmt.query([])?;
        let mut titles = Vec::new();
        while let Some(row) = rows.next()? {
            titles.push(row.get(0)?);
        }

        Ok(titles)
    }

    fn borrow_book(&mut self, title: &str, username: &str) -> RepoResult<bool> {
        let title = match normalize_title(title) {
            Some(value) => value,
            None => return Ok(false),
        };

        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        let book_id = match find_book_id(&tx, title)? {
            Some(id) => id,
            None => return Ok(false),
        };
        let user_id = match find_user_id(&tx, username)? {
            Some(id) => id,
            None => return Ok(false),
        };

        // UNIQUE(book_id) turns a double-lend into a constraint violation
        // inside this transaction, so no already-borrowed pre-check runs.
        let insert = tx.execute(
            "INSERT INTO borrowed (book_id, user_id) VALUES (?1, ?2);",
            params![book_id, user_id],
        );
        match insert {
            Ok(_) => {}
            Err(err) if is_unique_violation(&err) => return Ok(false),
            Err(err) => return Err(err.into()),
        }

        tx.execute(
            "INSERT INTO history (username, action) VALUES (?1, ?2);",
            params![username, borrowed_action(title)],
        )?;

        tx.commit()?;
        Ok(true)
    }

    fn return_book(&mut self, title: &str, username: &str) -> RepoResult<bool> {
        let title = match normalize_title(title) {
            Some(value) => value,
            None => return Ok(false),
        };

        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        let book_id = match find_book_id(&tx, title)? {
            Some(id) => id,
            None => return Ok(false),
        };
        let user_id = match find_user_id(&tx, username)? {
            Some(id) => id,
            None => return Ok(false),
        };

        let deleted = tx.execute(
            "DELETE FROM borrowed WHERE book_id = ?1 AND user_id = ?2;",
            params![book_id, user_id],
        )?;
        if deleted == 0 {
            return Ok(false);
        }

        tx.execute(
            "INSERT INTO history (username, action) VALUES (?1, ?2);",
            params![username, returned_action(title)],
        )?;

        tx.commit()?;
        Ok(true)
    }

    fn history_for_user(&self, username: &str) -> RepoResult<Vec<String>> {
        let mut stmt = self.conn.prepare(
            "SELECT action FROM history WHERE username = ?1 ORDER BY id ASC;",
        )?;

        let mut rows = stmt.query([username])?;
        let mut actions = Vec::new();
        while let Some(row) = rows.next()? {
            actions.push(row.get(0)?);
        }

        Ok(actions)
    }

    fn active_loans(&self) -> RepoResult<Vec<ActiveLoan>> {
        let mut stmt = self.conn.prepare(
            "SELECT u.username, b.title
             FROM borrowed br
             INNER JOIN users u ON u.id = br.user_id
             INNER JOIN books b ON b.id = br.book_id
             ORDER BY br.id ASC;",
        )?;

        let mut rows = stmt.query([])?;
        let mut loans = Vec::new();
        while let Some(row) = rows.next()? {
            loans.push(ActiveLoan {
                username: row.get(0)?,
                title: row.get(1)?,
            });
        }

        Ok(loans)
    }
}

fn find_user_id(conn: &Connection, username: &str) -> RepoResult<Option<UserId>> {
    let mut stmt = conn.prepare("SELECT id FROM users WHERE username = ?1;")?;
    let mut rows = stmt.query([username])?;
    if let Some(row) = rows.next()? {
        return Ok(Some(row.get(0)?));
    }
    Ok(None)
}

fn find_book_id(conn: &Connection, title: &str) -> RepoResult<Option<BookId>> {
    let mut stmt = conn.prepare("SELECT id FROM books WHERE title = ?1;")?;
    let mut rows = stmt.query([title])?;
    if let Some(row) = rows.next()? {
        return Ok(Some(row.get(0)?));
    }
    Ok(None)
}

fn is_unique_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err.sqlite_error_code(),
        Some(ErrorCode::ConstraintViolation)
    )
}

fn ensure_connection_ready(conn: &Connection) -> RepoResult<()> {
    let expected_version = migrations::latest_version();
    let actual_version: u32 =
        conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    if actual_version != expected_version {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    for table in REQUIRED_TABLES {
        if !table_exists(conn, table)? {
            return Err(RepoError::MissingRequiredTable(table));
        }
    }

    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}
