//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the narrow storage port the contact store is written against.
//! - Isolate SQLite query details from use-case orchestration.
//!
//! # Invariants
//! - Write paths normalize and validate drafts before any SQL mutation.
//! - No-match update/delete is reported as success-with-no-effect, never as
//!   an error.

pub mod contact_repo;
