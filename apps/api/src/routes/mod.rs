pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::export::handlers as export;
use crate::roster::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Assignment screens
        .route("/api/v1/home", get(handlers::handle_home))
        .route(
            "/api/v1/assign",
            get(handlers::handle_assign_form).post(handlers::handle_assign),
        )
        .route(
            "/api/v1/register-complete",
            get(handlers::handle_register_complete),
        )
        .route(
            "/api/v1/departments",
            post(handlers::handle_create_department),
        )
        .route("/api/v1/users", get(handlers::handle_list_users))
        // PDF export
        .route("/resources/user-list-pdf", get(export::handle_user_list_pdf))
        .with_state(state)
}
