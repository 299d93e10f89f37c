use axum::{
    extract::{Query, State},
    response::Redirect,
    Json,
};
use serde::Serialize;
use tracing::info;

use crate::errors::AppError;
use crate::models::department::Department;
use crate::models::employee::EmployeeWithDepartment;
use crate::models::forms::{AssignmentForm, DepartmentCreateForm, SelectOption};
use crate::roster::projection::{department_options, employee_options, project_users, UserFilter};
use crate::state::AppState;

const REGISTRATION_NOT_FOUND: &str = "登録情報が見つかりませんでした。";

#[derive(Debug, Serialize)]
pub struct MenuEntry {
    pub label: &'static str,
    pub path: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignFormResponse {
    pub department_options: Vec<SelectOption>,
    pub employee_options: Vec<SelectOption>,
}

#[derive(Debug, Serialize)]
pub struct RegistrationResponse {
    pub department: Department,
    pub employee: RegisteredEmployee,
}

#[derive(Debug, Serialize)]
pub struct RegisteredEmployee {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct DepartmentCreated {
    pub success: bool,
    pub department: Department,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserListResponse {
    pub users: Vec<EmployeeWithDepartment>,
    pub department_options: Vec<SelectOption>,
    pub employee_options: Vec<SelectOption>,
    pub department_id: Option<String>,
    pub employee_id: Option<String>,
}

/// GET /api/v1/home
pub async fn handle_home() -> Json<Vec<MenuEntry>> {
    Json(vec![
        MenuEntry {
            label: "所属登録",
            path: "/api/v1/assign",
        },
        MenuEntry {
            label: "ユーザー一覧",
            path: "/api/v1/users",
        },
    ])
}

/// GET /api/v1/assign
pub async fn handle_assign_form(State(state): State<AppState>) -> Json<AssignFormResponse> {
    let store = state.store.read().await;
    Json(AssignFormResponse {
        department_options: department_options(&store),
        employee_options: employee_options(&store, None),
    })
}

/// POST /api/v1/assign
/// Applies the assignment and redirects (303) to the completion page.
pub async fn handle_assign(
    State(state): State<AppState>,
    Json(form): Json<AssignmentForm>,
) -> Result<Redirect, AppError> {
    form.validate().map_err(AppError::InvalidForm)?;

    let mut store = state.store.write().await;
    if store.department(&form.department_id).is_none() {
        return Err(AppError::NotFound(format!(
            "Department {} not found",
            form.department_id
        )));
    }
    let employee = store
        .assign(&form.employee_id, &form.department_id)
        .ok_or_else(|| AppError::NotFound(format!("Employee {} not found", form.employee_id)))?;
    info!("Assigned {} to {}", employee.id, employee.department_id);

    Ok(Redirect::to(&format!(
        "/api/v1/register-complete?departmentId={}&employeeId={}",
        employee.department_id, employee.id
    )))
}

/// GET /api/v1/register-complete
pub async fn handle_register_complete(
    State(state): State<AppState>,
    Query(params): Query<UserFilter>,
) -> Result<Json<RegistrationResponse>, AppError> {
    let store = state.store.read().await;
    let department = params
        .department_id
        .as_deref()
        .and_then(|id| store.department(id));
    let employee = params
        .employee_id
        .as_deref()
        .and_then(|id| store.employee(id));

    match (department, employee) {
        (Some(department), Some(employee)) => Ok(Json(RegistrationResponse {
            department: department.clone(),
            employee: RegisteredEmployee {
                id: employee.id.clone(),
                name: employee.name.clone(),
            },
        })),
        _ => Err(AppError::NotFound(REGISTRATION_NOT_FOUND.to_string())),
    }
}

/// POST /api/v1/departments
pub async fn handle_create_department(
    State(state): State<AppState>,
    Json(form): Json<DepartmentCreateForm>,
) -> Result<Json<DepartmentCreated>, AppError> {
    form.validate().map_err(AppError::InvalidForm)?;
    let department = state.store.write().await.add_department(&form.name);
    Ok(Json(DepartmentCreated {
        success: true,
        department,
    }))
}

/// GET /api/v1/users
pub async fn handle_list_users(
    State(state): State<AppState>,
    Query(filter): Query<UserFilter>,
) -> Json<UserListResponse> {
    let store = state.store.read().await;
    let users = project_users(&store, &filter);
    Json(UserListResponse {
        users,
        department_options: department_options(&store),
        employee_options: employee_options(&store, filter.department_id.as_deref()),
        department_id: filter.department_id,
        employee_id: filter.employee_id,
    })
}
