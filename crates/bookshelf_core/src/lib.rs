//! Core domain logic for Bookshelf, a small library inventory system.
//! This crate is the single source of truth for business invariants; the
//! graphical shell is an external caller that renders what these APIs return.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod report;
pub mod service;
pub mod session;

pub use db::seed::SeedData;
pub use db::{open_db, open_db_in_memory, DbError, DbResult, DEFAULT_DB_FILE};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::records::{
    ActiveLoan, Book, BookId, HistoryEntry, Loan, Role, UserAccount, UserId,
};
pub use repo::library_repo::{
    LibraryRepository, RepoError, RepoResult, SqliteLibraryRepository,
};
pub use report::{DEFAULT_REPORT_FILE, REPORT_HEADER};
pub use service::library_service::{LibraryService, ServiceError};
pub use session::{Operation, Session, SessionError};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
