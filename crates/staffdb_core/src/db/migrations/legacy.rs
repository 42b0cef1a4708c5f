//! Adoption of `Departments`/`Employees` tables created without a version stamp.
//!
//! Older files declare `INTEGER PRIMARY KEY` without `AUTOINCREMENT`, which
//! lets SQLite reuse the id of a deleted last row. Such tables are renamed
//! aside, recreated from the current DDL, refilled with their original ids,
//! and dropped. `sqlite_sequence` picks up the highest copied id.

use crate::db::DbResult;
use log::info;
use rusqlite::{params, OptionalExtension, Transaction};

struct TableCopy {
    name: &'static str,
    columns: &'static str,
}

/// Child before parent: renaming and dropping walk this order, refilling
/// walks it backwards.
static TABLES: [TableCopy; 2] = [
    TableCopy {
        name: "Employees",
        columns: "emp_id, emp_name, emp_salary, dept_id",
    },
    TableCopy {
        name: "Departments",
        columns: "dept_id, dept_name",
    },
];

/// A table renamed to `<name>_legacy`, waiting for its rows to be copied back.
pub(super) struct Stashed {
    table: &'static TableCopy,
}

impl Stashed {
    fn legacy_name(&self) -> String {
        format!("{}_legacy", self.table.name)
    }
}

/// Renames existing tables out of the way when any of them lacks
/// `AUTOINCREMENT`. Returns nothing to restore for fresh or current files.
pub(super) fn stash_tables_without_autoincrement(
    tx: &Transaction<'_>,
) -> DbResult<Vec<Stashed>> {
    let mut existing = Vec::new();
    let mut needs_rebuild = false;
    for table in &TABLES {
        if let Some(ddl) = table_ddl(tx, table.name)? {
            needs_rebuild |= !ddl.to_ascii_uppercase().contains("AUTOINCREMENT");
            existing.push(Stashed { table });
        }
    }

    if !needs_rebuild {
        return Ok(Vec::new());
    }

    for stashed in &existing {
        tx.execute_batch(&format!(
            "ALTER TABLE {} RENAME TO {};",
            stashed.table.name,
            stashed.legacy_name()
        ))?;
    }
    Ok(existing)
}

/// Copies stashed rows into the freshly created tables and drops the stash.
pub(super) fn restore_rows(tx: &Transaction<'_>, stashed: &[Stashed]) -> DbResult<()> {
    for entry in stashed.iter().rev() {
        let copied = tx.execute(
            &format!(
                "INSERT INTO {name} ({columns}) SELECT {columns} FROM {legacy};",
                name = entry.table.name,
                columns = entry.table.columns,
                legacy = entry.legacy_name()
            ),
            [],
        )?;
        info!(
            "event=db_migrate module=db status=adopted table={} rows={copied}",
            entry.table.name
        );
    }

    for entry in stashed {
        tx.execute_batch(&format!("DROP TABLE {};", entry.legacy_name()))?;
    }
    Ok(())
}

fn table_ddl(tx: &Transaction<'_>, name: &str) -> DbResult<Option<String>> {
    let ddl = tx
        .query_row(
            "SELECT sql FROM sqlite_master WHERE type = 'table' AND name = ?1;",
            params![name],
            |row| row.get::<_, String>(0),
        )
        .optional()?;
    Ok(ddl)
}
