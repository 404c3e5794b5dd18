//! Contact repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide the stable CRUD API over the canonical `contacts` table.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Write paths normalize drafts through `ContactDraft::normalized()`
//!   before any SQL mutation; invalid input never reaches storage.
//! - Update/delete against a missing id completes as `Ok(false)`, not as an
//!   error.
//! - The construction-time schema guard means CRUD code never runs on a
//!   connection that skipped `db::open_db` bootstrap.

use crate::db::migrations::latest_version;
use crate::db::DbError;
use crate::model::contact::{Contact, ContactDraft, ContactId, ContactValidationError};
use log::{debug, warn};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const CONTACT_TABLE: &str = "contacts";

const CONTACT_SELECT_SQL: &str = "SELECT
    id,
    firstName,
    lastName,
    phone,
    avatar
FROM contacts";

const REQUIRED_COLUMNS: &[&str] = &["id", "firstName", "lastName", "phone", "avatar"];

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for contact persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(ContactValidationError),
    Db(DbError),
    /// The connection's recorded schema version does not match this binary.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection not initialized: schema version {actual_version}, expected {expected_version}"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "required table `{table}` does not exist")
            }
            Self::MissingRequiredColumn { table, column } => {
                write!(f, "required column `{table}.{column}` does not exist")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ContactValidationError> for RepoError {
    fn from(value: ContactValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Narrow storage port for contact CRUD. The concrete engine is swappable
/// behind this trait without touching callers.
pub trait ContactRepository {
    /// Persists a new contact and returns its freshly assigned id.
    fn insert_contact(&self, draft: &ContactDraft) -> RepoResult<ContactId>;
    /// Keyed lookup; `Ok(None)` when no row matches.
    fn get_contact(&self, id: ContactId) -> RepoResult<Option<Contact>>;
    /// Returns every stored contact in primary-key order.
    fn list_contacts(&self) -> RepoResult<Vec<Contact>>;
    /// Replaces all non-id fields of the matching row. `Ok(false)` when no
    /// row matches.
    fn update_contact(&self, id: ContactId, draft: &ContactDraft) -> RepoResult<bool>;
    /// Removes the matching row. `Ok(false)` when no row matches.
    fn delete_contact(&self, id: ContactId) -> RepoResult<bool>;
}

/// SQLite-backed contact repository borrowing a bootstrapped connection.
pub struct SqliteContactRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteContactRepository<'conn> {
    /// Wraps a connection after verifying it went through schema bootstrap.
    ///
    /// # Errors
    /// - `UninitializedConnection` when `PRAGMA user_version` does not match
    ///   the latest migration known to this binary.
    /// - `MissingRequiredTable` / `MissingRequiredColumn` when the contacts
    ///   table shape does not match expectations.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        let expected_version = latest_version();
        let actual_version: u32 =
            conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
        if actual_version != expected_version {
            return Err(RepoError::UninitializedConnection {
                expected_version,
                actual_version,
            });
        }

        if !table_exists(conn, CONTACT_TABLE)? {
            return Err(RepoError::MissingRequiredTable(CONTACT_TABLE));
        }

        let columns = table_columns(conn, CONTACT_TABLE)?;
        for required in REQUIRED_COLUMNS {
            if !columns.iter().any(|column| column == required) {
                return Err(RepoError::MissingRequiredColumn {
                    table: CONTACT_TABLE,
                    column: required,
                });
            }
        }

        Ok(Self { conn })
    }
}

impl ContactRepository for SqliteContactRepository<'_> {
    fn insert_contact(&self, draft: &ContactDraft) -> RepoResult<ContactId> {
        let normalized = match draft.normalized() {
            Ok(normalized) => normalized,
            Err(err) => {
                warn!("event=contact_insert module=repo status=rejected reason={err}");
                return Err(err.into());
            }
        };

        self.conn.execute(
            "INSERT INTO contacts (firstName, lastName, phone, avatar)
             VALUES (?1, ?2, ?3, ?4);",
            params![
                normalized.first_name,
                normalized.last_name,
                normalized.phone,
                normalized.avatar,
            ],
        )?;

        let id = self.conn.last_insert_rowid();
        debug!("event=contact_insert module=repo status=ok id={id}");
        Ok(id)
    }

    fn get_contact(&self, id: ContactId) -> RepoResult<Option<Contact>> {
        let contact = self
            .conn
            .query_row(
                &format!("{CONTACT_SELECT_SQL} WHERE id = ?1;"),
                [id],
                parse_contact_row,
            )
            .optional()?;

        Ok(contact)
    }

    fn list_contacts(&self) -> RepoResult<Vec<Contact>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{CONTACT_SELECT_SQL} ORDER BY id ASC;"))?;

        let mut rows = stmt.query([])?;
        let mut contacts = Vec::new();
        while let Some(row) = rows.next()? {
            contacts.push(parse_contact_row(row)?);
        }

        Ok(contacts)
    }

    fn update_contact(&self, id: ContactId, draft: &ContactDraft) -> RepoResult<bool> {
        require_issued_id(id)?;
        let normalized = match draft.normalized() {
            Ok(normalized) => normalized,
            Err(err) => {
                warn!("event=contact_update module=repo status=rejected id={id} reason={err}");
                return Err(err.into());
            }
        };

        let changed = self.conn.execute(
            "UPDATE contacts
             SET firstName = ?1, lastName = ?2, phone = ?3, avatar = ?4
             WHERE id = ?5;",
            params![
                normalized.first_name,
                normalized.last_name,
                normalized.phone,
                normalized.avatar,
                id,
            ],
        )?;

        debug!("event=contact_update module=repo status=ok id={id} changed={changed}");
        Ok(changed > 0)
    }

    fn delete_contact(&self, id: ContactId) -> RepoResult<bool> {
        require_issued_id(id)?;

        let changed = self
            .conn
            .execute("DELETE FROM contacts WHERE id = ?1;", [id])?;

        debug!("event=contact_delete module=repo status=ok id={id} changed={changed}");
        Ok(changed > 0)
    }
}

// AUTOINCREMENT ids start at 1, so a non-positive id was never issued;
// treating it as "no match" would hide caller bugs.
fn require_issued_id(id: ContactId) -> Result<(), ContactValidationError> {
    if id <= 0 {
        return Err(ContactValidationError::InvalidId(id));
    }
    Ok(())
}

fn parse_contact_row(row: &Row<'_>) -> Result<Contact, rusqlite::Error> {
    Ok(Contact {
        id: row.get("id")?,
        first_name: row.get("firstName")?,
        last_name: row.get("lastName")?,
        // Nullable in the schema; the core always writes ''. Coalesce here
        // so rows written by other tools cannot leak NULL into the model.
        phone: row.get::<_, Option<String>>("phone")?.unwrap_or_default(),
        avatar: row.get::<_, Option<String>>("avatar")?.unwrap_or_default(),
    })
}

fn table_exists(conn: &Connection, table: &str) -> Result<bool, rusqlite::Error> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn table_columns(conn: &Connection, table: &str) -> Result<Vec<String>, rusqlite::Error> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let mut rows = stmt.query([])?;
    let mut columns = Vec::new();
    while let Some(row) = rows.next()? {
        columns.push(row.get::<_, String>("name")?);
    }
    Ok(columns)
}
