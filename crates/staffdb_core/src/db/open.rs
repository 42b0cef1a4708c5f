//! Connection bootstrap utilities for SQLite.
//!
//! # Responsibility
//! - Open file or in-memory SQLite connections.
//! - Configure connection pragmas from [`StoreOptions`].
//! - Apply schema migrations before returning a usable connection.
//!
//! # Invariants
//! - Returned connections have migrations fully applied.
//! - `foreign_keys` matches `StoreOptions::enforce_foreign_keys`.

use super::migrations::apply_migrations;
use super::{DbResult, StoreOptions};
use log::{error, info};
use rusqlite::Connection;
use std::path::Path;
use std::time::Instant;

/// Opens (creating if absent) a SQLite database file and ensures the schema.
///
/// # Errors
/// - `DbError::Sqlite` when the location is inaccessible or is not a database.
/// - `DbError::UnsupportedSchemaVersion` when the file was written by a newer build.
pub fn open_db(path: impl AsRef<Path>, options: &StoreOptions) -> DbResult<Connection> {
    open_with("file", options, || Connection::open(path))
}

/// Opens a private in-memory database with the schema applied.
pub fn open_db_in_memory(options: &StoreOptions) -> DbResult<Connection> {
    open_with("memory", options, Connection::open_in_memory)
}

fn open_with(
    mode: &str,
    options: &StoreOptions,
    connect: impl FnOnce() -> rusqlite::Result<Connection>,
) -> DbResult<Connection> {
    let started_at = Instant::now();
    info!("event=db_open module=db status=start mode={mode}");

    let mut conn = match connect() {
        Ok(conn) => conn,
        Err(err) => {
            error!(
                "event=db_open module=db status=error mode={mode} duration_ms={} error_code=db_open_failed error={}",
                started_at.elapsed().as_millis(),
                err
            );
            return Err(err.into());
        }
    };

    match bootstrap_connection(&mut conn, options) {
        Ok(()) => {
            info!(
                "event=db_open module=db status=ok mode={mode} foreign_keys={} duration_ms={}",
                options.enforce_foreign_keys,
                started_at.elapsed().as_millis()
            );
            Ok(conn)
        }
        Err(err) => {
            error!(
                "event=db_open module=db status=error mode={mode} duration_ms={} error_code=db_bootstrap_failed error={}",
                started_at.elapsed().as_millis(),
                err
            );
            Err(err)
        }
    }
}

fn bootstrap_connection(conn: &mut Connection, options: &StoreOptions) -> DbResult<()> {
    let pragma = if options.enforce_foreign_keys {
        "PRAGMA foreign_keys = ON;"
    } else {
        "PRAGMA foreign_keys = OFF;"
    };
    conn.execute_batch(pragma)?;
    conn.busy_timeout(options.busy_timeout)?;
    apply_migrations(conn)?;
    Ok(())
}
