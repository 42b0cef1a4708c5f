//! Store handle owning the single connection to the staff database.
//!
//! # Responsibility
//! - Open the database and ensure the schema on construction.
//! - Expose the department/employee operations, each committing immediately.
//! - Release the connection exactly once, on `close()` or on drop.
//!
//! # Invariants
//! - The connection is private to one handle and never shared.
//! - After `close()` every operation fails with `DbError::Closed`.

use crate::db::{open_db, open_db_in_memory, DbError, StoreOptions};
use crate::model::department::{Department, DepartmentId};
use crate::model::employee::{Employee, EmployeeId, NewEmployee};
use crate::repo::department_repo::{DepartmentRepository, SqliteDepartmentRepository};
use crate::repo::employee_repo::{EmployeeRepository, SqliteEmployeeRepository};
use crate::repo::{RepoError, RepoResult};
use log::{error, info};
use rusqlite::Connection;
use std::path::Path;

/// Handle over one open staff database.
pub struct EmployeeStore {
    conn: Option<Connection>,
}

impl EmployeeStore {
    /// Opens `path` with default [`StoreOptions`], creating the file if absent.
    pub fn open(path: impl AsRef<Path>) -> RepoResult<Self> {
        Self::open_with(path, &StoreOptions::default())
    }

    /// Opens `path` with explicit connection settings.
    pub fn open_with(path: impl AsRef<Path>, options: &StoreOptions) -> RepoResult<Self> {
        let conn = open_db(path, options)?;
        Ok(Self { conn: Some(conn) })
    }

    /// Opens a private in-memory database; its contents vanish on close.
    pub fn open_in_memory() -> RepoResult<Self> {
        Self::open_in_memory_with(&StoreOptions::default())
    }

    pub fn open_in_memory_with(options: &StoreOptions) -> RepoResult<Self> {
        let conn = open_db_in_memory(options)?;
        Ok(Self { conn: Some(conn) })
    }

    /// Opens a store, hands it to `f`, and closes it on every exit path.
    ///
    /// An error from `f` takes precedence over an error from closing.
    pub fn scoped<T>(
        path: impl AsRef<Path>,
        options: &StoreOptions,
        f: impl FnOnce(&mut EmployeeStore) -> RepoResult<T>,
    ) -> RepoResult<T> {
        let mut store = Self::open_with(path, options)?;
        let outcome = f(&mut store);
        let closed = store.close();
        let value = outcome?;
        closed?;
        Ok(value)
    }

    pub fn is_closed(&self) -> bool {
        self.conn.is_none()
    }

    fn conn(&self) -> RepoResult<&Connection> {
        self.conn.as_ref().ok_or(RepoError::Db(DbError::Closed))
    }

    fn departments(&self) -> RepoResult<SqliteDepartmentRepository<'_>> {
        Ok(SqliteDepartmentRepository::new(self.conn()?))
    }

    fn employees(&self) -> RepoResult<SqliteEmployeeRepository<'_>> {
        Ok(SqliteEmployeeRepository::new(self.conn()?))
    }

    pub fn add_department(&self, name: &str) -> RepoResult<DepartmentId> {
        self.departments()?.create_department(name)
    }

    pub fn get_department(&self, id: DepartmentId) -> RepoResult<Option<Department>> {
        self.departments()?.get_department(id)
    }

    pub fn list_departments(&self) -> RepoResult<Vec<Department>> {
        self.departments()?.list_departments()
    }

    /// Inserts an employee; the department must already exist.
    pub fn add_employee(
        &self,
        name: &str,
        salary: f64,
        department_id: DepartmentId,
    ) -> RepoResult<EmployeeId> {
        self.employees()?
            .create_employee(&NewEmployee::new(name, salary, department_id))
    }

    pub fn get_employee(&self, id: EmployeeId) -> RepoResult<Option<Employee>> {
        self.employees()?.get_employee(id)
    }

    pub fn get_employees_by_department(
        &self,
        department_id: DepartmentId,
    ) -> RepoResult<Vec<Employee>> {
        self.employees()?.list_by_department(department_id)
    }

    pub fn list_employees(&self) -> RepoResult<Vec<Employee>> {
        self.employees()?.list_employees()
    }

    pub fn get_average_salary(&self) -> RepoResult<Option<f64>> {
        self.employees()?.average_salary()
    }

    /// Returns `false` when no employee has `id`.
    pub fn update_salary(&self, id: EmployeeId, new_salary: f64) -> RepoResult<bool> {
        self.employees()?.update_salary(id, new_salary)
    }

    /// Returns `false` when no employee has `id`.
    pub fn delete_employee(&self, id: EmployeeId) -> RepoResult<bool> {
        self.employees()?.delete_employee(id)
    }

    /// Releases the connection. A second call is a no-op.
    ///
    /// If SQLite refuses to close, the connection stays owned by the handle
    /// and the error is returned.
    pub fn close(&mut self) -> RepoResult<()> {
        let Some(conn) = self.conn.take() else {
            return Ok(());
        };

        match conn.close() {
            Ok(()) => {
                info!("event=store_close module=store status=ok");
                Ok(())
            }
            Err((conn, err)) => {
                error!("event=store_close module=store status=error error={err}");
                self.conn = Some(conn);
                Err(err.into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::EmployeeStore;
    use crate::db::{DbError, StoreOptions};
    use crate::repo::{ErrorKind, RepoError};

    #[test]
    fn close_is_idempotent() {
        let mut store = EmployeeStore::open_in_memory().unwrap();
        assert!(!store.is_closed());

        store.close().unwrap();
        store.close().unwrap();
        assert!(store.is_closed());
    }

    #[test]
    fn operations_after_close_fail_with_storage_error() {
        let mut store = EmployeeStore::open_in_memory().unwrap();
        store.close().unwrap();

        let err = store.add_department("Sales").unwrap_err();
        assert!(matches!(err, RepoError::Db(DbError::Closed)));
        assert_eq!(err.kind(), ErrorKind::Storage);

        assert!(store.get_employee(1).is_err());
        assert!(store.get_average_salary().is_err());
        assert!(store.delete_employee(1).is_err());
    }

    #[test]
    fn in_memory_store_honours_options() {
        let options = StoreOptions::default().with_foreign_keys(false);
        let store = EmployeeStore::open_in_memory_with(&options).unwrap();

        let foreign_keys: i64 = store
            .conn()
            .unwrap()
            .query_row("PRAGMA foreign_keys;", [], |row| row.get(0))
            .unwrap();
        assert_eq!(foreign_keys, 0);

        let err = store.add_employee("Ghost", 1.0, 4).unwrap_err();
        assert!(matches!(err, RepoError::UnknownDepartment(4)));
    }
}
