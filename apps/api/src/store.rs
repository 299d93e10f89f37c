//! In-memory mock dataset standing in for a database.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::info;

use crate::models::department::Department;
use crate::models::employee::Employee;

pub type SharedStore = Arc<RwLock<MockStore>>;

#[derive(Debug, Clone, Default)]
pub struct MockStore {
    pub departments: Vec<Department>,
    pub employees: Vec<Employee>,
}

impl MockStore {
    /// The fixed dataset the application starts with.
    pub fn seeded() -> Self {
        let departments = [
            ("dept-1", "開発部"),
            ("dept-2", "営業部"),
            ("dept-3", "人事部"),
        ]
        .into_iter()
        .map(|(id, name)| Department {
            id: id.to_string(),
            name: name.to_string(),
        })
        .collect();

        let employees = [
            ("emp-1", "佐藤 太郎", "dept-1"),
            ("emp-2", "鈴木 次郎", "dept-1"),
            ("emp-3", "田中 三郎", "dept-2"),
            ("emp-4", "高橋 花子", "dept-2"),
            ("emp-5", "伊藤 四郎", "dept-3"),
        ]
        .into_iter()
        .map(|(id, name, department_id)| Employee {
            id: id.to_string(),
            name: name.to_string(),
            department_id: department_id.to_string(),
        })
        .collect();

        MockStore {
            departments,
            employees,
        }
    }

    pub fn into_shared(self) -> SharedStore {
        Arc::new(RwLock::new(self))
    }

    pub fn department(&self, id: &str) -> Option<&Department> {
        self.departments.iter().find(|d| d.id == id)
    }

    pub fn employee(&self, id: &str) -> Option<&Employee> {
        self.employees.iter().find(|e| e.id == id)
    }

    /// Appends a department with the next sequential id (`dept-{n+1}`).
    pub fn add_department(&mut self, name: &str) -> Department {
        let department = Department {
            id: format!("dept-{}", self.departments.len() + 1),
            name: name.to_string(),
        };
        self.departments.push(department.clone());
        info!("Added department {} ({})", department.id, department.name);
        department
    }

    /// Moves an employee into a department. Returns `None` if either id is unknown.
    pub fn assign(&mut self, employee_id: &str, department_id: &str) -> Option<Employee> {
        self.department(department_id)?;
        let employee = self.employees.iter_mut().find(|e| e.id == employee_id)?;
        employee.department_id = department_id.to_string();
        Some(employee.clone())
    }
}
