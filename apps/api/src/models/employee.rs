use serde::{Deserialize, Serialize};

use crate::models::department::Department;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: String,
    pub name: String,
    pub department_id: String,
}

/// An employee joined with its department, as shown on the user list.
/// `department` is `None` when the employee points at an unknown department.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeWithDepartment {
    pub id: String,
    pub name: String,
    pub department_id: String,
    pub department: Option<Department>,
}

/// One row of the exported PDF. Built per request, never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayRecord {
    pub id: String,
    pub name: String,
    pub department_name: Option<String>,
}

impl From<&EmployeeWithDepartment> for DisplayRecord {
    fn from(row: &EmployeeWithDepartment) -> Self {
        DisplayRecord {
            id: row.id.clone(),
            name: row.name.clone(),
            department_name: row.department.as_ref().map(|d| d.name.clone()),
        }
    }
}
