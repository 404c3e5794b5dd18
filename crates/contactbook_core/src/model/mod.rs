//! Domain model for the contact book.
//!
//! # Responsibility
//! - Define the canonical `Contact` record and its caller-facing input shape.
//! - Keep trim/validate rules out of the SQL layer.
//!
//! # Invariants
//! - Every stored contact is identified by a stable positive `ContactId`.
//! - Deletion is immediate and irreversible; there are no tombstones.

pub mod contact;
