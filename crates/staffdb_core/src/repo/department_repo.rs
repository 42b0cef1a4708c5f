//! Department repository contract and SQLite implementation.
//!
//! # Invariants
//! - `create_department` validates the name before inserting.
//! - Listing order is ascending `dept_id`.

use crate::model::department::{Department, DepartmentId};
use crate::model::validate_name;
use crate::repo::{RepoError, RepoResult};
use log::debug;
use rusqlite::{params, Connection, OptionalExtension, Row};

const DEPARTMENT_SELECT_SQL: &str = "SELECT dept_id, dept_name FROM Departments";

/// Repository interface for department operations.
pub trait DepartmentRepository {
    fn create_department(&self, name: &str) -> RepoResult<DepartmentId>;
    fn get_department(&self, id: DepartmentId) -> RepoResult<Option<Department>>;
    fn list_departments(&self) -> RepoResult<Vec<Department>>;
    fn department_exists(&self, id: DepartmentId) -> RepoResult<bool>;
}

/// SQLite-backed department repository.
pub struct SqliteDepartmentRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteDepartmentRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl DepartmentRepository for SqliteDepartmentRepository<'_> {
    fn create_department(&self, name: &str) -> RepoResult<DepartmentId> {
        validate_name("dept_name", name)?;

        self.conn.execute(
            "INSERT INTO Departments (dept_name) VALUES (?1);",
            params![name],
        )?;
        let id = self.conn.last_insert_rowid();

        debug!("event=department_add module=repo status=ok dept_id={id}");
        Ok(id)
    }

    fn get_department(&self, id: DepartmentId) -> RepoResult<Option<Department>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{DEPARTMENT_SELECT_SQL} WHERE dept_id = ?1;"))?;

        let row = stmt
            .query_row(params![id], |row| Ok(read_department(row)))
            .optional()?;
        row.transpose()
    }

    fn list_departments(&self) -> RepoResult<Vec<Department>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{DEPARTMENT_SELECT_SQL} ORDER BY dept_id ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut departments = Vec::new();

        while let Some(row) = rows.next()? {
            departments.push(read_department(row)?);
        }

        Ok(departments)
    }

    fn department_exists(&self, id: DepartmentId) -> RepoResult<bool> {
        let exists: i64 = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM Departments WHERE dept_id = ?1);",
            params![id],
            |row| row.get(0),
        )?;
        Ok(exists == 1)
    }
}

fn read_department(row: &Row<'_>) -> RepoResult<Department> {
    let department = Department {
        id: row.get("dept_id")?,
        name: row.get("dept_name")?,
    };
    department.validate().map_err(|err| {
        RepoError::InvalidData(format!(
            "department {} in Departments: {err}",
            department.id
        ))
    })?;
    Ok(department)
}
