//! Connection bootstrap utilities for SQLite.
//!
//! # Responsibility
//! - Open file or in-memory SQLite connections.
//! - Configure connection pragmas required by core behavior.
//! - Trigger schema migrations before returning a usable connection.
//!
//! # Invariants
//! - Returned connections have `foreign_keys=ON` and a busy timeout set.
//! - File-backed connections run in WAL journal mode so readers are not
//!   blocked during a write.
//! - Returned connections have migrations fully applied.

use super::migrations::apply_migrations;
use super::DbResult;
use log::{error, info};
use rusqlite::Connection;
use std::path::Path;
use std::time::{Duration, Instant};

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Clone, Copy)]
enum OpenMode {
    File,
    Memory,
}

impl OpenMode {
    fn as_str(self) -> &'static str {
        match self {
            Self::File => "file",
            Self::Memory => "memory",
        }
    }
}

/// Opens the contact database file and applies all pending migrations.
///
/// Idempotent across process starts: an already-migrated database passes
/// through unchanged.
///
/// # Side effects
/// - Creates the file when absent, creates or upgrades the schema.
/// - Emits `db_open` logging events with duration and status.
pub fn open_db(path: impl AsRef<Path>) -> DbResult<Connection> {
    let started_at = Instant::now();
    info!("event=db_open module=db status=start mode=file");

    match Connection::open(path) {
        Ok(conn) => bootstrap(conn, OpenMode::File, started_at),
        Err(err) => {
            log_open_error(OpenMode::File, "db_open_failed", started_at, &err);
            Err(err.into())
        }
    }
}

/// Opens an in-memory database and applies all pending migrations.
///
/// Used by tests and throwaway sessions; contents vanish with the
/// connection.
pub fn open_db_in_memory() -> DbResult<Connection> {
    let started_at = Instant::now();
    info!("event=db_open module=db status=start mode=memory");

    match Connection::open_in_memory() {
        Ok(conn) => bootstrap(conn, OpenMode::Memory, started_at),
        Err(err) => {
            log_open_error(OpenMode::Memory, "db_open_failed", started_at, &err);
            Err(err.into())
        }
    }
}

fn bootstrap(mut conn: Connection, mode: OpenMode, started_at: Instant) -> DbResult<Connection> {
    match configure_and_migrate(&mut conn, mode) {
        Ok(()) => {
            info!(
                "event=db_open module=db status=ok mode={} duration_ms={}",
                mode.as_str(),
                started_at.elapsed().as_millis()
            );
            Ok(conn)
        }
        Err(err) => {
            error!(
                "event=db_open module=db status=error mode={} duration_ms={} error_code=db_bootstrap_failed error={}",
                mode.as_str(),
                started_at.elapsed().as_millis(),
                err
            );
            Err(err)
        }
    }
}

fn configure_and_migrate(conn: &mut Connection, mode: OpenMode) -> DbResult<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.busy_timeout(BUSY_TIMEOUT)?;
    if let OpenMode::File = mode {
        // WAL only applies to file-backed databases; memory databases
        // report journal_mode=memory and would reject the switch. The
        // pragma answers with the resulting mode, so consume that row.
        conn.pragma_update_and_check(None, "journal_mode", "wal", |_row| Ok(()))?;
    }
    apply_migrations(conn)?;
    Ok(())
}

fn log_open_error(mode: OpenMode, code: &str, started_at: Instant, err: &rusqlite::Error) {
    error!(
        "event=db_open module=db status=error mode={} duration_ms={} error_code={} error={}",
        mode.as_str(),
        started_at.elapsed().as_millis(),
        code,
        err
    );
}
