//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into the operation set the presentation
//!   boundary consumes.
//! - Keep the embedding shell decoupled from storage details.

pub mod library_service;
