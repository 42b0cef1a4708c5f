//! Subcommand handlers. Each one borrows the already-open store.

use crate::cli::{Cli, Commands};
use anyhow::{Context, Result};
use serde::Serialize;
use staffdb_core::{Department, Employee, EmployeeStore};

pub fn dispatch(store: &EmployeeStore, cli: &Cli) -> Result<()> {
    let json = cli.json;
    match &cli.command {
        Commands::Demo => demo(store, json),
        Commands::AddDepartment { name } => {
            let id = store
                .add_department(name)
                .with_context(|| format!("failed to add department `{name}`"))?;
            println!("Department {id} created.");
            Ok(())
        }
        Commands::AddEmployee {
            name,
            salary,
            department_id,
        } => {
            let id = store
                .add_employee(name, *salary, *department_id)
                .with_context(|| format!("failed to add employee `{name}`"))?;
            println!("Employee {id} created.");
            Ok(())
        }
        Commands::Get { id } => match store.get_employee(*id)? {
            Some(employee) => print_employees(&[employee], json),
            None => {
                println!("No employee with id {id}.");
                Ok(())
            }
        },
        Commands::ByDepartment { department_id } => {
            print_employees(&store.get_employees_by_department(*department_id)?, json)
        }
        Commands::Departments => print_departments(&store.list_departments()?, json),
        Commands::Employees => print_employees(&store.list_employees()?, json),
        Commands::Average => {
            print_average(store.get_average_salary()?);
            Ok(())
        }
        Commands::UpdateSalary { id, salary } => {
            if store.update_salary(*id, *salary)? {
                println!("Salary of employee {id} set to {salary:.2}.");
            } else {
                println!("No employee with id {id}; nothing updated.");
            }
            Ok(())
        }
        Commands::Delete { id } => {
            if store.delete_employee(*id)? {
                println!("Employee {id} deleted.");
            } else {
                println!("No employee with id {id}; nothing deleted.");
            }
            Ok(())
        }
    }
}

fn demo(store: &EmployeeStore, json: bool) -> Result<()> {
    let mut departments = Vec::new();
    for name in ["Sales", "Marketing", "Engineering"] {
        departments.push(store.add_department(name)?);
    }
    let (sales, marketing, engineering) = (departments[0], departments[1], departments[2]);

    store.add_employee("John Doe", 50_000.0, sales)?;
    let jane = store.add_employee("Jane Smith", 60_000.0, marketing)?;
    let bob = store.add_employee("Bob Johnson", 70_000.0, engineering)?;
    let alice = store.add_employee("Alice Lee", 55_000.0, sales)?;

    if let Some(employee) = store.get_employee(jane)? {
        print_employees(&[employee], json)?;
    }
    print_employees(&store.get_employees_by_department(sales)?, json)?;
    print_average(store.get_average_salary()?);

    store.update_salary(alice, 60_000.0)?;
    store.delete_employee(bob)?;

    print_employees(&store.get_employees_by_department(sales)?, json)
}

fn print_average(average: Option<f64>) {
    match average {
        Some(value) => println!("Average salary: ${value:.2}"),
        None => println!("Average salary: n/a (no employees)"),
    }
}

fn print_departments(departments: &[Department], json: bool) -> Result<()> {
    if json {
        return print_json(departments);
    }
    for department in departments {
        println!("{:>4}  {}", department.id, department.name);
    }
    Ok(())
}

fn print_employees(employees: &[Employee], json: bool) -> Result<()> {
    if json {
        return print_json(employees);
    }
    for employee in employees {
        println!(
            "{:>4}  {:<20} {:>12.2}  dept {}",
            employee.id, employee.name, employee.salary, employee.department_id
        );
    }
    Ok(())
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let rendered = serde_json::to_string(value).context("failed to render JSON")?;
    println!("{rendered}");
    Ok(())
}
