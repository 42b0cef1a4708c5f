//! Data-access layer for a small departments/employees SQLite database.
//! [`EmployeeStore`] is the entry point; the other modules are its parts.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod store;

pub use db::{DbError, DbResult, StoreOptions};
pub use logging::{init_logging, logging_status, LogLevel};
pub use model::department::{Department, DepartmentId};
pub use model::employee::{Employee, EmployeeId, NewEmployee};
pub use model::ValidationError;
pub use repo::department_repo::{DepartmentRepository, SqliteDepartmentRepository};
pub use repo::employee_repo::{EmployeeRepository, SqliteEmployeeRepository};
pub use repo::{ErrorKind, RepoError, RepoResult};
pub use store::EmployeeStore;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
