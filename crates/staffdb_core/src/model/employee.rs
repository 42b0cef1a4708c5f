//! Employee records.
//!
//! # Invariants
//! - `department_id` names a department that existed when the row was inserted.
//! - `salary` is finite and non-negative.

use super::department::DepartmentId;
use super::{validate_name, validate_salary, ValidationError};
use serde::{Deserialize, Serialize};

/// Storage-assigned employee identifier (`Employees.emp_id`).
pub type EmployeeId = i64;

/// A persisted employee row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    pub id: EmployeeId,
    pub name: String,
    pub salary: f64,
    pub department_id: DepartmentId,
}

impl Employee {
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_name("emp_name", &self.name)?;
        validate_salary(self.salary)
    }
}

/// Insert request for an employee whose id is not yet assigned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewEmployee {
    pub name: String,
    pub salary: f64,
    pub department_id: DepartmentId,
}

impl NewEmployee {
    pub fn new(name: impl Into<String>, salary: f64, department_id: DepartmentId) -> Self {
        Self {
            name: name.into(),
            salary,
            department_id,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_name("emp_name", &self.name)?;
        validate_salary(self.salary)
    }
}
