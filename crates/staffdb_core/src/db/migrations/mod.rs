//! SQLite migration registry and executor.
//!
//! # Responsibility
//! - Register schema migrations in strictly increasing order.
//! - Apply pending migrations atomically.
//!
//! # Invariants
//! - `version` values must remain monotonic.
//! - Applied migration version is mirrored to `PRAGMA user_version`.
//! - Files that already carry `Departments`/`Employees` without a version
//!   stamp keep their rows; tables lacking `AUTOINCREMENT` are rebuilt so
//!   ids are never handed out twice.
//! - Migrations run with `foreign_keys` off; the previous setting is
//!   restored afterwards, whether or not the migration succeeded.

mod legacy;

use crate::db::{DbError, DbResult};
use log::info;
use rusqlite::{Connection, Transaction};

#[derive(Clone, Copy)]
struct Migration {
    version: u32,
    apply: fn(&Transaction<'_>) -> DbResult<()>,
}

const MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    apply: init_schema,
}];

const INIT_SQL: &str = include_str!("0001_init.sql");

/// Returns the latest migration version known by this binary.
pub fn latest_version() -> u32 {
    MIGRATIONS.last().map_or(0, |migration| migration.version)
}

/// Applies all pending migrations on the provided connection.
pub fn apply_migrations(conn: &mut Connection) -> DbResult<()> {
    let current_version = current_user_version(conn)?;
    let latest = latest_version();

    if current_version > latest {
        return Err(DbError::UnsupportedSchemaVersion {
            db_version: current_version,
            latest_supported: latest,
        });
    }

    if current_version == latest {
        return Ok(());
    }

    // `foreign_keys` is a no-op inside a transaction, so toggle it around one.
    let foreign_keys: bool = conn.query_row("PRAGMA foreign_keys;", [], |row| row.get(0))?;
    if foreign_keys {
        conn.execute_batch("PRAGMA foreign_keys = OFF;")?;
    }
    let outcome = run_pending(conn, current_version);
    if foreign_keys {
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    }
    outcome?;

    info!(
        "event=db_migrate module=db status=ok from_version={current_version} to_version={latest}"
    );
    Ok(())
}

fn run_pending(conn: &mut Connection, current_version: u32) -> DbResult<()> {
    let tx = conn.transaction()?;
    for migration in MIGRATIONS {
        if migration.version <= current_version {
            continue;
        }

        (migration.apply)(&tx)?;
        tx.execute_batch(&format!("PRAGMA user_version = {};", migration.version))?;
    }
    tx.commit()?;
    Ok(())
}

fn init_schema(tx: &Transaction<'_>) -> DbResult<()> {
    let stashed = legacy::stash_tables_without_autoincrement(tx)?;
    tx.execute_batch(INIT_SQL)?;
    legacy::restore_rows(tx, &stashed)
}

fn current_user_version(conn: &Connection) -> DbResult<u32> {
    let version = conn.query_row("PRAGMA user_version;", [], |row| row.get::<_, u32>(0))?;
    Ok(version)
}
