//! Record types shared by the repository and service layers.
//!
//! # Responsibility
//! - Mirror the rows of the `users`, `books`, `borrowed`, and `history`
//!   tables plus the joined read model used by the report.
//!
//! # Invariants
//! - `username` and `title` are non-empty after normalization.
//! - Book titles are immutable once inserted.
//! - History rows keep the exact action wording produced here.

use serde::{Deserialize, Serialize};

/// Stable identifier of a user row.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type UserId = i64;

/// Stable identifier of a book row.
pub type BookId = i64;

/// Access level attached to an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Seeded operator account; may extend the catalog.
    Admin,
    /// Self-registered borrower.
    User,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::User => "user",
        }
    }

    pub fn parse(value: &str) -> Option<Role> {
        match value {
            "admin" => Some(Role::Admin),
            "user" => Some(Role::User),
            _ => None,
        }
    }
}

/// One row of the `users` table.
///
/// The password field holds the plain credential string; login compares it
/// verbatim. That is the published contract of this system, and a known
/// weakness of it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserAccount {
    pub id: UserId,
    pub username: String,
    pub password: String,
    pub role: Role,
}

/// One row of the `books` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub id: BookId,
    pub title: String,
}

/// One active loan row linking exactly one book to one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Loan {
    pub id: i64,
    pub book_id: BookId,
    pub user_id: UserId,
}

/// Joined read model for the borrowed-books report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveLoan {
    pub username: String,
    pub title: String,
}

/// One append-only audit row. `username` is free text, not a foreign key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: i64,
    pub username: String,
    pub action: String,
}

/// Action string written to history when a borrow succeeds.
pub fn borrowed_action(title: &str) -> String {
    format!("Borrowed '{title}'")
}

/// Action string written to history when a return succeeds.
pub fn returned_action(title: &str) -> String {
    format!("Returned '{title}'")
}

/// Trims a username; blank input is rejected rather than stored.
pub fn normalize_username(value: &str) -> Option<&str> {
    non_blank(value)
}

/// Trims a book title; blank input is rejected rather than stored.
pub fn normalize_title(value: &str) -> Option<&str> {
    non_blank(value)
}

fn non_blank(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}
