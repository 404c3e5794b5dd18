//! Contact store use-case facade.
//!
//! # Responsibility
//! - Provide the stable entry points UI consumers call.
//! - Delegate persistence to an injected repository implementation.
//!
//! # Invariants
//! - The store never bypasses repository normalization/persistence
//!   contracts.
//! - The store layer remains storage-agnostic.

use crate::model::contact::{Contact, ContactDraft, ContactId};
use crate::repo::contact_repo::{ContactRepository, RepoResult};

/// Facade over the contact repository; the single access path consumers use.
///
/// Constructed once per session around the repository that borrows the
/// process-owned connection, then shared with every screen that needs data.
pub struct ContactStore<R: ContactRepository> {
    repo: R,
}

impl<R: ContactRepository> ContactStore<R> {
    /// Creates a store using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Persists a new contact and returns its assigned id.
    ///
    /// # Contract
    /// - The draft is trimmed and validated by the store side, not the
    ///   caller.
    /// - A blank required name is a reported rejection; no row is written.
    pub fn insert(&self, draft: &ContactDraft) -> RepoResult<ContactId> {
        self.repo.insert_contact(draft)
    }

    /// Returns every stored contact in primary-key order.
    ///
    /// An empty table yields an empty vector. On a storage failure callers
    /// must treat their view as unknown, not empty.
    pub fn list_all(&self) -> RepoResult<Vec<Contact>> {
        self.repo.list_contacts()
    }

    /// Keyed lookup for the detail flow; `Ok(None)` when the id is unknown.
    pub fn get(&self, id: ContactId) -> RepoResult<Option<Contact>> {
        self.repo.get_contact(id)
    }

    /// Replaces all non-id fields of the contact matching `id`.
    ///
    /// Returns `Ok(false)` when no row matched; the id itself never changes.
    pub fn update(&self, id: ContactId, draft: &ContactDraft) -> RepoResult<bool> {
        self.repo.update_contact(id, draft)
    }

    /// Removes the contact matching `id`. Idempotent: a second call for the
    /// same id completes as `Ok(false)`.
    pub fn delete(&self, id: ContactId) -> RepoResult<bool> {
        self.repo.delete_contact(id)
    }
}
