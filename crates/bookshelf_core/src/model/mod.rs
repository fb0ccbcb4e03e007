//! Domain model for the library inventory core.
//!
//! # Responsibility
//! - Define the canonical record shapes mirrored by the SQLite schema.
//! - Own the wording of audit-history action strings.
//!
//! # Invariants
//! - Every persisted record is identified by a storage-generated integer id.
//! - History is append-only; records are never mutated after insert.

pub mod records;
