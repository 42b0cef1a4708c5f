//! Repository layer contracts and SQLite implementations.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts per entity.
//! - Keep SQL text and row mapping out of the store handle.
//!
//! # Invariants
//! - Write paths validate the model before any SQL mutation.
//! - SQLite constraint violations surface as [`RepoError::Constraint`],
//!   everything else from the driver as [`RepoError::Db`].

pub mod department_repo;
pub mod employee_repo;

use crate::db::DbError;
use crate::model::department::DepartmentId;
use crate::model::ValidationError;
use rusqlite::ErrorCode;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Coarse classification callers can branch on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Connection, I/O, schema or lifecycle failure.
    Storage,
    /// Input rejected by validation or by a schema constraint.
    Constraint,
}

/// Error for department/employee persistence and queries.
#[derive(Debug)]
pub enum RepoError {
    Validation(ValidationError),
    Db(DbError),
    UnknownDepartment(DepartmentId),
    Constraint(String),
    InvalidData(String),
}

impl RepoError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) | Self::UnknownDepartment(_) | Self::Constraint(_) => {
                ErrorKind::Constraint
            }
            Self::Db(_) | Self::InvalidData(_) => ErrorKind::Storage,
        }
    }
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::UnknownDepartment(id) => write!(f, "department not found: {id}"),
            Self::Constraint(message) => write!(f, "constraint violation: {message}"),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::UnknownDepartment(_) | Self::Constraint(_) | Self::InvalidData(_) => None,
        }
    }
}

impl From<ValidationError> for RepoError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        match value {
            DbError::Sqlite(err) => Self::from(err),
            other => Self::Db(other),
        }
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        if value.sqlite_error_code() == Some(ErrorCode::ConstraintViolation) {
            return Self::Constraint(value.to_string());
        }
        Self::Db(DbError::Sqlite(value))
    }
}
