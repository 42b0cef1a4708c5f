//! Employee repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide the parameterized CRUD statements over `Employees`.
//! - Check department existence before insert, independent of
//!   `PRAGMA foreign_keys`.
//!
//! # Invariants
//! - Salary writes are validated before SQL runs.
//! - Updates and deletes of unknown ids are no-ops reported as `false`.
//! - Read paths reject invalid persisted rows instead of masking them.

use crate::model::department::DepartmentId;
use crate::model::employee::{Employee, EmployeeId, NewEmployee};
use crate::model::validate_salary;
use crate::repo::department_repo::{DepartmentRepository, SqliteDepartmentRepository};
use crate::repo::{RepoError, RepoResult};
use log::debug;
use rusqlite::{params, Connection, Params, Row};

const EMPLOYEE_SELECT_SQL: &str = "SELECT
    emp_id,
    emp_name,
    emp_salary,
    dept_id
FROM Employees";

/// Repository interface for employee operations.
pub trait EmployeeRepository {
    fn create_employee(&self, employee: &NewEmployee) -> RepoResult<EmployeeId>;
    fn get_employee(&self, id: EmployeeId) -> RepoResult<Option<Employee>>;
    fn list_by_department(&self, department_id: DepartmentId) -> RepoResult<Vec<Employee>>;
    fn list_employees(&self) -> RepoResult<Vec<Employee>>;
    /// Mean of all salaries, `None` when there are no employees.
    fn average_salary(&self) -> RepoResult<Option<f64>>;
    fn update_salary(&self, id: EmployeeId, new_salary: f64) -> RepoResult<bool>;
    fn delete_employee(&self, id: EmployeeId) -> RepoResult<bool>;
}

/// SQLite-backed employee repository.
pub struct SqliteEmployeeRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteEmployeeRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    fn query_employees<P: Params>(&self, sql: &str, params: P) -> RepoResult<Vec<Employee>> {
        let mut stmt = self.conn.prepare(sql)?;
        let mut rows = stmt.query(params)?;
        let mut employees = Vec::new();

        while let Some(row) = rows.next()? {
            employees.push(read_employee(row)?);
        }

        Ok(employees)
    }
}

impl EmployeeRepository for SqliteEmployeeRepository<'_> {
    fn create_employee(&self, employee: &NewEmployee) -> RepoResult<EmployeeId> {
        employee.validate()?;

        let departments = SqliteDepartmentRepository::new(self.conn);
        if !departments.department_exists(employee.department_id)? {
            return Err(RepoError::UnknownDepartment(employee.department_id));
        }

        self.conn.execute(
            "INSERT INTO Employees (emp_name, emp_salary, dept_id) VALUES (?1, ?2, ?3);",
            params![
                employee.name.as_str(),
                employee.salary,
                employee.department_id
            ],
        )?;
        let id = self.conn.last_insert_rowid();

        debug!(
            "event=employee_add module=repo status=ok emp_id={id} dept_id={}",
            employee.department_id
        );
        Ok(id)
    }

    fn get_employee(&self, id: EmployeeId) -> RepoResult<Option<Employee>> {
        let mut found = self.query_employees(
            &format!("{EMPLOYEE_SELECT_SQL} WHERE emp_id = ?1;"),
            params![id],
        )?;
        Ok(found.pop())
    }

    fn list_by_department(&self, department_id: DepartmentId) -> RepoResult<Vec<Employee>> {
        self.query_employees(
            &format!("{EMPLOYEE_SELECT_SQL} WHERE dept_id = ?1 ORDER BY emp_id ASC;"),
            params![department_id],
        )
    }

    fn list_employees(&self) -> RepoResult<Vec<Employee>> {
        self.query_employees(&format!("{EMPLOYEE_SELECT_SQL} ORDER BY emp_id ASC;"), [])
    }

    fn average_salary(&self) -> RepoResult<Option<f64>> {
        let average = self.conn.query_row(
            "SELECT AVG(emp_salary) FROM Employees;",
            [],
            |row| row.get::<_, Option<f64>>(0),
        )?;
        Ok(average)
    }

    fn update_salary(&self, id: EmployeeId, new_salary: f64) -> RepoResult<bool> {
        validate_salary(new_salary)?;

        let changed = self.conn.execute(
            "UPDATE Employees SET emp_salary = ?1 WHERE emp_id = ?2;",
            params![new_salary, id],
        )?;

        debug!("event=employee_update_salary module=repo status=ok emp_id={id} changed={changed}");
        Ok(changed > 0)
    }

    fn delete_employee(&self, id: EmployeeId) -> RepoResult<bool> {
        let changed = self
            .conn
            .execute("DELETE FROM Employees WHERE emp_id = ?1;", params![id])?;

        debug!("event=employee_delete module=repo status=ok emp_id={id} changed={changed}");
        Ok(changed > 0)
    }
}

fn read_employee(row: &Row<'_>) -> RepoResult<Employee> {
    let employee = Employee {
        id: row.get("emp_id")?,
        name: row.get("emp_name")?,
        salary: row.get("emp_salary")?,
        department_id: row.get("dept_id")?,
    };
    employee.validate().map_err(|err| {
        RepoError::InvalidData(format!("employee {} in Employees: {err}", employee.id))
    })?;
    Ok(employee)
}
