//! Session state machine for the presentation boundary.
//!
//! # Responsibility
//! - Model the three screens of the shell as explicit states.
//! - Gate which service operations each state may invoke.
//!
//! # Invariants
//! - The only state carrying data is `LoggedIn`; the boundary owns no
//!   business data beyond the current username and role.
//! - Transitions outside the fixed edge set are rejected, never coerced.

use crate::model::records::Role;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Operations the presentation boundary can request from the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Register,
    Login,
    AddBook,
    ListAvailableBooks,
    Borrow,
    Return,
    History,
    ExportReport,
}

/// Rejected session transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionError {
    pub from: &'static str,
    pub action: &'static str,
}

impl Display for SessionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "cannot {} while {}", self.action, self.from)
    }
}

impl Error for SessionError {}

/// Screen-level state of one user session.
///
/// Edges: `LoggedOut -> Registering -> LoggedOut`,
/// `LoggedOut -> LoggedIn -> LoggedOut`. Nothing else.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Session {
    LoggedOut,
    Registering,
    LoggedIn { username: String, role: Role },
}

impl Default for Session {
    fn default() -> Self {
        Session::LoggedOut
    }
}

impl Session {
    /// Moves from the login screen to the registration screen.
    pub fn begin_registration(&mut self) -> Result<(), SessionError> {
        match self {
            Session::LoggedOut => {
                *self = Session::Registering;
                Ok(())
            }
            _ => Err(self.rejected("begin registration")),
        }
    }

    /// Leaves the registration screen, whether the attempt succeeded or the
    /// user backed out. Either way the shell lands on the login screen.
    pub fn finish_registration(&mut self) -> Result<(), SessionError> {
        match self {
            Session::Registering => {
                *self = Session::LoggedOut;
                Ok(())
            }
            _ => Err(self.rejected("finish registration")),
        }
    }

    /// Records a successful login.
    pub fn log_in(&mut self, username: impl Into<String>, role: Role) -> Result<(), SessionError> {
        match self {
            Session::LoggedOut => {
                *self = Session::LoggedIn {
                    username: username.into(),
                    role,
                };
                Ok(())
            }
            _ => Err(self.rejected("log in")),
        }
    }

    /// Ends the logged-in session and returns to the login screen.
    pub fn log_out(&mut self) -> Result<(), SessionError> {
        match self {
            Session::LoggedIn { .. } => {
                *self = Session::LoggedOut;
                Ok(())
            }
            _ => Err(self.rejected("log out")),
        }
    }

    /// Whether this state may invoke the given service operation.
    ///
    /// `AddBook` additionally requires the admin role.
    pub fn permits(&self, op: Operation) -> bool {
        match (self, op) {
            (Session::LoggedOut, Operation::Login) => true,
            (Session::Registering, Operation::Register) => true,
            (Session::LoggedIn { role, .. }, Operation::AddBook) => *role == Role::Admin,
            (
                Session::LoggedIn { .. },
                Operation::ListAvailableBooks
                | Operation::Borrow
                | Operation::Return
                | Operation::History
                | Operation::ExportReport,
            ) => true,
            _ => false,
        }
    }

    /// Username of the logged-in account, if any.
    pub fn current_username(&self) -> Option<&str> {
        match self {
            Session::LoggedIn { username, .. } => Some(username),
            _ => None,
        }
    }

    fn state_name(&self) -> &'static str {
        match self {
            Session::LoggedOut => "logged out",
            Session::Registering => "registering",
            Session::LoggedIn { .. } => "logged in",
        }
    }

    fn rejected(&self, action: &'static str) -> SessionError {
        SessionError {
            from: self.state_name(),
            action,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Operation, Session};
    use crate::model::records::Role;

    #[test]
    fn registration_round_trip_lands_on_login_screen() {
        let mut session = Session::default();
        session.begin_registration().unwrap();
        assert_eq!(session, Session::Registering);
        session.finish_registration().unwrap();
        assert_eq!(session, Session::LoggedOut);
    }

    #[test]
    fn login_and_logout_round_trip() {
        let mut session = Session::default();
        session.log_in("alice", Role::User).unwrap();
        assert_eq!(session.current_username(), Some("alice"));
        session.log_out().unwrap();
        assert_eq!(session, Session::LoggedOut);
    }

    #[test]
    fn illegal_transitions_are_rejected() {
        let mut session = Session::default();
        assert!(session.log_out().is_err());
        assert!(session.finish_registration().is_err());

        session.log_in("alice", Role::User).unwrap();
        assert!(session.begin_registration().is_err());
        assert!(session.log_in("bob", Role::User).is_err());
    }

    #[test]
    fn permissions_follow_state_and_role() {
        let logged_out = Session::LoggedOut;
        assert!(logged_out.permits(Operation::Login));
        assert!(!logged_out.permits(Operation::Borrow));
        assert!(!logged_out.permits(Operation::Register));

        let registering = Session::Registering;
        assert!(registering.permits(Operation::Register));
        assert!(!registering.permits(Operation::Login));

        let borrower = Session::LoggedIn {
            username: "alice".to_string(),
            role: Role::User,
        };
        assert!(borrower.permits(Operation::Borrow));
        assert!(borrower.permits(Operation::ExportReport));
        assert!(!borrower.permits(Operation::AddBook));

        let admin = Session::LoggedIn {
            username: "admin".to_string(),
            role: Role::Admin,
        };
        assert!(admin.permits(Operation::AddBook));
    }
}
