//! Department record.

use super::{validate_name, ValidationError};
use serde::{Deserialize, Serialize};

/// Storage-assigned department identifier (`Departments.dept_id`).
pub type DepartmentId = i64;

/// An organizational unit employees are assigned to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Department {
    pub id: DepartmentId,
    pub name: String,
}

impl Department {
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_name("dept_name", &self.name)
    }
}
