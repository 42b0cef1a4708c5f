//! Domain model for departments and the employees assigned to them.
//!
//! # Responsibility
//! - Define the records read from and written to the store.
//! - Own field-level validation shared by every write path.
//!
//! # Invariants
//! - Ids are assigned by storage and never reused within one database file.
//! - Names are non-empty text (whitespace counts as text); salaries are
//!   finite and `>= 0`.

pub mod department;
pub mod employee;

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Field-level validation failure raised before any SQL runs.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// `field` was the empty string.
    EmptyName { field: &'static str },
    NegativeSalary(f64),
    NonFiniteSalary,
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName { field } => write!(f, "{field} must not be empty"),
            Self::NegativeSalary(value) => {
                write!(f, "salary must not be negative, got {value}")
            }
            Self::NonFiniteSalary => write!(f, "salary must be a finite number"),
        }
    }
}

impl Error for ValidationError {}

pub(crate) fn validate_name(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(ValidationError::EmptyName { field });
    }
    Ok(())
}

pub(crate) fn validate_salary(value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::NonFiniteSalary);
    }
    if value < 0.0 {
        return Err(ValidationError::NegativeSalary(value));
    }
    Ok(())
}
