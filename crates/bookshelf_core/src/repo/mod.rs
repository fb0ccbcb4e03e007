//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts for the library.
//! - Isolate SQLite query details from service/business orchestration.
//!
//! # Invariants
//! - Uniqueness violations and not-found conditions surface as boolean
//!   results, never as raised errors.
//! - Repository APIs return semantic errors only for storage faults and
//!   invalid persisted state.

pub mod library_repo;
