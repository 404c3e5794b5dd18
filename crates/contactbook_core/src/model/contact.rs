//! Contact domain model.
//!
//! # Responsibility
//! - Define the single persisted entity and its caller-facing input shape.
//! - Own trim/normalize rules so callers never have to pre-clean input.
//!
//! # Invariants
//! - `id` is store-assigned, monotonically increasing and never reused.
//! - `first_name` and `last_name` are never blank once normalized.
//! - Absent optional fields normalize to `""`, never to a null marker.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Stable identifier for a stored contact.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
/// Valid issued ids are always positive (SQLite rowid domain).
pub type ContactId = i64;

/// The single persisted entity: one person's name, phone and avatar URI.
///
/// Field names serialize in camelCase to match the persisted column names
/// and the consuming UI's JSON shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    /// Store-assigned primary key. Immutable once issued.
    pub id: ContactId,
    pub first_name: String,
    pub last_name: String,
    /// Always present in storage; `""` when the caller supplied none.
    pub phone: String,
    /// Avatar URI. Always present in storage; `""` when the caller supplied none.
    pub avatar: String,
}

impl Contact {
    /// Returns "First Last" for display contexts.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Caller-facing input for insert/update. Carries no id; the store assigns
/// (insert) or receives (update) the identifier separately.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactDraft {
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub avatar: Option<String>,
}

impl ContactDraft {
    /// Creates a draft with required names only.
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            phone: None,
            avatar: None,
        }
    }

    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    pub fn with_avatar(mut self, avatar: impl Into<String>) -> Self {
        self.avatar = Some(avatar.into());
        self
    }

    /// Produces the trimmed, defaulted field set that is allowed to reach
    /// storage.
    ///
    /// # Contract
    /// - All four fields are whitespace-trimmed.
    /// - Absent `phone`/`avatar` become `""`.
    /// - A required name that is blank after trimming is rejected.
    pub fn normalized(&self) -> Result<NormalizedContact, ContactValidationError> {
        let first_name = self.first_name.trim();
        if first_name.is_empty() {
            return Err(ContactValidationError::BlankFirstName);
        }

        let last_name = self.last_name.trim();
        if last_name.is_empty() {
            return Err(ContactValidationError::BlankLastName);
        }

        Ok(NormalizedContact {
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            phone: self.phone.as_deref().unwrap_or("").trim().to_string(),
            avatar: self.avatar.as_deref().unwrap_or("").trim().to_string(),
        })
    }
}

/// Validated, trimmed field set ready for persistence. Only obtainable
/// through [`ContactDraft::normalized`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedContact {
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub avatar: String,
}

impl NormalizedContact {
    /// Attaches a store-assigned id, yielding the persisted entity shape.
    pub fn into_contact(self, id: ContactId) -> Contact {
        Contact {
            id,
            first_name: self.first_name,
            last_name: self.last_name,
            phone: self.phone,
            avatar: self.avatar,
        }
    }
}

/// Rejection reasons for input that must never reach storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactValidationError {
    BlankFirstName,
    BlankLastName,
    /// Update/delete was asked for an id outside the issued range.
    InvalidId(ContactId),
}

impl Display for ContactValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankFirstName => write!(f, "first name must not be blank"),
            Self::BlankLastName => write!(f, "last name must not be blank"),
            Self::InvalidId(id) => write!(f, "invalid contact id: {id}"),
        }
    }
}

impl Error for ContactValidationError {}
