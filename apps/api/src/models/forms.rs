use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

pub type FieldErrors = BTreeMap<String, Vec<String>>;

/// Submission of the assignment-registration form.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AssignmentForm {
    pub department_id: String,
    pub employee_id: String,
}

/// Submission of the "add department" modal.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DepartmentCreateForm {
    pub name: String,
}

/// A `{label, value}` pair for selects and comboboxes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectOption {
    pub label: String,
    pub value: String,
}

impl AssignmentForm {
    /// Both fields are required. Returns every failing field at once.
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        require(
            &mut errors,
            "departmentId",
            &self.department_id,
            "所属を選択してください",
        );
        require(
            &mut errors,
            "employeeId",
            &self.employee_id,
            "氏名を選択してください",
        );
        finish(errors)
    }
}

impl DepartmentCreateForm {
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        require(&mut errors, "name", &self.name, "部署名を入力してください");
        finish(errors)
    }
}

fn require(errors: &mut FieldErrors, field: &str, value: &str, message: &str) {
    if value.is_empty() {
        errors
            .entry(field.to_string())
            .or_default()
            .push(message.to_string());
    }
}

fn finish(errors: FieldErrors) -> Result<(), FieldErrors> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
