use rusqlite::Connection;
use staffdb_core::db::open_db_in_memory;
use staffdb_core::{
    EmployeeRepository, EmployeeStore, ErrorKind, NewEmployee, RepoError,
    SqliteEmployeeRepository, StoreOptions, ValidationError,
};

fn store_with_departments(names: &[&str]) -> EmployeeStore {
    let store = EmployeeStore::open_in_memory().unwrap();
    for name in names {
        store.add_department(name).unwrap();
    }
    store
}

#[test]
fn add_then_get_roundtrip() {
    let store = store_with_departments(&["Sales"]);

    let id = store.add_employee("John Doe", 50_000.0, 1).unwrap();
    let loaded = store.get_employee(id).unwrap().unwrap();

    assert_eq!(loaded.id, id);
    assert_eq!(loaded.name, "John Doe");
    assert_eq!(loaded.salary, 50_000.0);
    assert_eq!(loaded.department_id, 1);
}

#[test]
fn zero_salary_is_accepted() {
    let store = store_with_departments(&["Interns"]);
    let id = store.add_employee("Volunteer", 0.0, 1).unwrap();
    assert_eq!(store.get_employee(id).unwrap().unwrap().salary, 0.0);
}

#[test]
fn get_missing_employee_is_none() {
    let store = store_with_departments(&["Sales"]);
    assert!(store.get_employee(99).unwrap().is_none());
}

#[test]
fn unknown_department_is_rejected() {
    let store = store_with_departments(&["Sales"]);

    let err = store.add_employee("Ghost", 10.0, 7).unwrap_err();
    assert!(matches!(err, RepoError::UnknownDepartment(7)));
    assert_eq!(err.kind(), ErrorKind::Constraint);
    assert!(store.list_employees().unwrap().is_empty());
}

#[test]
fn unknown_department_is_rejected_without_foreign_key_pragma() {
    let conn = open_db_in_memory(&StoreOptions::default().with_foreign_keys(false)).unwrap();
    let repo = SqliteEmployeeRepository::new(&conn);

    let err = repo
        .create_employee(&NewEmployee::new("Ghost", 10.0, 3))
        .unwrap_err();
    assert!(matches!(err, RepoError::UnknownDepartment(3)));
}

#[test]
fn invalid_fields_are_rejected_before_sql() {
    let store = store_with_departments(&["Sales"]);

    let err = store.add_employee("", 10.0, 1).unwrap_err();
    assert!(matches!(
        err,
        RepoError::Validation(ValidationError::EmptyName { field: "emp_name" })
    ));

    let err = store.add_employee("Negative", -1.0, 1).unwrap_err();
    assert!(matches!(
        err,
        RepoError::Validation(ValidationError::NegativeSalary(_))
    ));

    let err = store.add_employee("Infinite", f64::INFINITY, 1).unwrap_err();
    assert!(matches!(
        err,
        RepoError::Validation(ValidationError::NonFiniteSalary)
    ));
}

#[test]
fn by_department_returns_exactly_matching_rows() {
    let store = store_with_departments(&["Sales", "Marketing", "Engineering"]);
    store.add_employee("A", 1.0, 1).unwrap();
    store.add_employee("B", 2.0, 2).unwrap();
    store.add_employee("C", 3.0, 1).unwrap();
    store.add_employee("D", 4.0, 2).unwrap();

    for department_id in 1..=3 {
        let found = store.get_employees_by_department(department_id).unwrap();
        assert!(found.iter().all(|e| e.department_id == department_id));

        let expected = store
            .list_employees()
            .unwrap()
            .into_iter()
            .filter(|e| e.department_id == department_id)
            .count();
        assert_eq!(found.len(), expected);
    }

    assert!(store.get_employees_by_department(3).unwrap().is_empty());
    assert!(store.get_employees_by_department(404).unwrap().is_empty());
}

#[test]
fn average_salary_is_none_when_empty_and_mean_otherwise() {
    let store = store_with_departments(&["Sales"]);
    assert_eq!(store.get_average_salary().unwrap(), None);

    store.add_employee("A", 10.0, 1).unwrap();
    store.add_employee("B", 20.0, 1).unwrap();
    store.add_employee("C", 60.0, 1).unwrap();
    assert_eq!(store.get_average_salary().unwrap(), Some(30.0));
}

#[test]
fn update_salary_is_visible_and_missing_id_is_noop() {
    let store = store_with_departments(&["Sales"]);
    let id = store.add_employee("A", 10.0, 1).unwrap();

    assert!(store.update_salary(id, 12.5).unwrap());
    assert_eq!(store.get_employee(id).unwrap().unwrap().salary, 12.5);

    assert!(!store.update_salary(id + 100, 99.0).unwrap());
    assert_eq!(store.list_employees().unwrap().len(), 1);
}

#[test]
fn update_salary_rejects_negative_values() {
    let store = store_with_departments(&["Sales"]);
    let id = store.add_employee("A", 10.0, 1).unwrap();

    let err = store.update_salary(id, -5.0).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Constraint);
    assert_eq!(store.get_employee(id).unwrap().unwrap().salary, 10.0);
}

#[test]
fn delete_removes_row_and_missing_id_is_noop() {
    let store = store_with_departments(&["Sales"]);
    let id = store.add_employee("A", 10.0, 1).unwrap();

    assert!(store.delete_employee(id).unwrap());
    assert!(store.get_employee(id).unwrap().is_none());
    assert!(!store.delete_employee(id).unwrap());
}

#[test]
fn deleted_ids_are_not_reused() {
    let store = store_with_departments(&["Sales"]);
    store.add_employee("A", 1.0, 1).unwrap();
    let last = store.add_employee("B", 2.0, 1).unwrap();

    store.delete_employee(last).unwrap();
    let next = store.add_employee("C", 3.0, 1).unwrap();
    assert!(next > last);
}

#[test]
fn invalid_persisted_salary_is_reported() {
    let conn: Connection = open_db_in_memory(&StoreOptions::default()).unwrap();
    conn.execute_batch(
        "INSERT INTO Departments (dept_name) VALUES ('Sales');
         INSERT INTO Employees (emp_name, emp_salary, dept_id) VALUES ('Broken', -3.0, 1);",
    )
    .unwrap();

    let repo = SqliteEmployeeRepository::new(&conn);
    let err = repo.get_employee(1).unwrap_err();
    assert!(matches!(err, RepoError::InvalidData(_)));
    assert_eq!(err.kind(), ErrorKind::Storage);
}

#[test]
fn storage_foreign_key_violation_maps_to_constraint() {
    let conn = open_db_in_memory(&StoreOptions::default()).unwrap();
    let err = conn
        .execute(
            "INSERT INTO Employees (emp_name, emp_salary, dept_id) VALUES ('Raw', 1.0, 9);",
            [],
        )
        .unwrap_err();

    let err = RepoError::from(err);
    assert!(matches!(err, RepoError::Constraint(_)));
    assert_eq!(err.kind(), ErrorKind::Constraint);
}
