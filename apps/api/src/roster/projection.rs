//! Record projection: joins employees with their departments and applies the
//! optional list filters. Shared by the JSON user list and the PDF export so
//! both always show the same rows.

use serde::{Deserialize, Serialize};

use crate::models::employee::{DisplayRecord, EmployeeWithDepartment};
use crate::models::forms::SelectOption;
use crate::store::MockStore;

/// Optional equality filters from the query string.
///
/// Empty strings are treated the same as an absent parameter.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserFilter {
    #[serde(default, deserialize_with = "empty_as_none")]
    pub department_id: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub employee_id: Option<String>,
}

fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|v| !v.is_empty()))
}

/// Employees matching `filter`, in store order, each joined with its department.
///
/// The department filter is applied first, then the employee filter.
pub fn project_users(store: &MockStore, filter: &UserFilter) -> Vec<EmployeeWithDepartment> {
    store
        .employees
        .iter()
        .filter(|e| {
            filter
                .department_id
                .as_deref()
                .map_or(true, |id| e.department_id == id)
        })
        .filter(|e| filter.employee_id.as_deref().map_or(true, |id| e.id == id))
        .map(|e| EmployeeWithDepartment {
            id: e.id.clone(),
            name: e.name.clone(),
            department_id: e.department_id.clone(),
            department: store.department(&e.department_id).cloned(),
        })
        .collect()
}

/// The rows handed to the PDF layout.
pub fn display_records(store: &MockStore, filter: &UserFilter) -> Vec<DisplayRecord> {
    project_users(store, filter)
        .iter()
        .map(DisplayRecord::from)
        .collect()
}

pub fn department_options(store: &MockStore) -> Vec<SelectOption> {
    store
        .departments
        .iter()
        .map(|d| SelectOption {
            label: d.name.clone(),
            value: d.id.clone(),
        })
        .collect()
}

/// Employee choices, narrowed to one department when `department_id` is given.
pub fn employee_options(store: &MockStore, department_id: Option<&str>) -> Vec<SelectOption> {
    store
        .employees
        .iter()
        .filter(|e| department_id.map_or(true, |id| e.department_id == id))
        .map(|e| SelectOption {
            label: e.name.clone(),
            value: e.id.clone(),
        })
        .collect()
}
