//! Command-line surface for `staffdb`.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "staffdb",
    version = env!("CARGO_PKG_VERSION"),
    about = "Manage departments and employees in a SQLite file",
    long_about = None
)]
pub struct Cli {
    /// Database file, created if absent
    #[arg(global = true, long = "db", default_value = "employee.db")]
    pub db: PathBuf,

    /// Log verbosity (trace|debug|info|warn|error); needs --log-dir
    #[arg(global = true, long = "log-level", requires = "log_dir")]
    pub log_level: Option<String>,

    /// Absolute directory for rolling log files; logging is off when unset
    #[arg(global = true, long = "log-dir")]
    pub log_dir: Option<PathBuf>,

    /// Leave SQLite foreign key enforcement off (the department check still runs)
    #[arg(global = true, long = "no-foreign-keys")]
    pub no_foreign_keys: bool,

    /// Print records as JSON instead of plain text
    #[arg(global = true, long = "json")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Seed three departments and four employees, then query and modify them
    Demo,

    /// Create a department
    AddDepartment { name: String },

    /// Create an employee in an existing department
    AddEmployee {
        name: String,
        salary: f64,
        department_id: i64,
    },

    /// Show one employee
    Get { id: i64 },

    /// List employees of one department
    ByDepartment { department_id: i64 },

    /// List all departments
    Departments,

    /// List all employees
    Employees,

    /// Print the average salary
    Average,

    /// Change an employee's salary
    UpdateSalary { id: i64, salary: f64 },

    /// Remove an employee
    Delete { id: i64 },
}
