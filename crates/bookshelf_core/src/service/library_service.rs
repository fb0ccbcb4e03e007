//! Library use-case service.
//!
//! # Responsibility
//! - Provide the stable operation set for callers: register, login, add
//!   book, list, borrow, return, history, report export.
//! - Delegate persistence to repository implementations.
//!
//! # Invariants
//! - Service APIs never bypass repository transaction contracts.
//! - Every operation is one self-contained unit of work; there is no
//!   service-held state between calls.

use crate::model::records::{ActiveLoan, Role, UserId};
use crate::repo::library_repo::{LibraryRepository, RepoError, RepoResult};
use crate::report::{write_report, DEFAULT_REPORT_FILE};
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

/// Error type for service operations that touch more than storage.
#[derive(Debug)]
pub enum ServiceError {
    Repo(RepoError),
    Report(std::io::Error),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Repo(err) => write!(f, "{err}"),
            Self::Report(err) => write!(f, "failed to write report: {err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            Self::Report(err) => Some(err),
        }
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Use-case service wrapper around a library repository.
pub struct LibraryService<R: LibraryRepository> {
    repo: R,
}

impl<R: LibraryRepository> LibraryService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Registers a new borrower account.
    ///
    /// # Contract
    /// - Role is fixed to `user`; no service path creates another admin.
    /// - Returns `false` when the username is blank or already taken.
    pub fn register(&self, username: &str, password: &str) -> RepoResult<bool> {
        self.repo.register_user(username, password)
    }

    /// Checks credentials and returns the account role on a match.
    pub fn login(&self, username: &str, password: &str) -> RepoResult<Option<Role>> {
        self.repo.login_user(username, password)
    }

    /// Resolves a username to its storage identity.
    pub fn lookup_user_id(&self, username: &str) -> RepoResult<Option<UserId>> {
        self.repo.find_user_id(username)
    }

    /// Adds a title to the catalog. Returns `false` on duplicates.
    pub fn add_book(&self, title: &str) -> RepoResult<bool> {
        self.repo.add_book(title)
    }

    /// Titles currently not on loan, in storage order.
    pub fn list_available_books(&self) -> RepoResult<Vec<String>> {
        self.repo.list_available_books()
    }

    /// Lends a book to a user. Returns `false` when the book is unknown or
    /// already on loan, or the user is unknown.
    pub fn borrow(&mut self, title: &str, username: &str) -> RepoResult<bool> {
        self.repo.borrow_book(title, username)
    }

    /// Returns a book lent to exactly this user. Returns `false` when no
    /// matching loan exists; no history is written in that case.
    pub fn return_book(&mut self, title: &str, username: &str) -> RepoResult<bool> {
        self.repo.return_book(title, username)
    }

    /// All history action strings for a username, oldest first.
    pub fn get_history(&self, username: &str) -> RepoResult<Vec<String>> {
        self.repo.history_for_user(username)
    }

    /// Every active loan joined with borrower and title.
    pub fn active_loans(&self) -> RepoResult<Vec<ActiveLoan>> {
        self.repo.active_loans()
    }

    /// Writes the borrowed-books report and returns the path written.
    ///
    /// `None` selects the well-known default file name in the working
    /// directory.
    pub fn export_report(&self, destination: Option<&Path>) -> Result<PathBuf, ServiceError> {
        let loans = self.repo.active_loans()?;
        let destination = destination
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_REPORT_FILE));
        let path = write_report(&destination, &loans).map_err(ServiceError::Report)?;

        info!(
            "event=report_export module=service status=ok loans={} path={}",
            loans.len(),
            path.display()
        );
        Ok(path)
    }
}
