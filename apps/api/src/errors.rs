use std::collections::BTreeMap;
use std::path::PathBuf;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Failures of the PDF export pipeline (font cache, subsetter, layout engine).
///
/// None of these are retried; any of them aborts the export request and no
/// partial document is returned.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to read font file '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("font error: {0}")]
    Font(String),

    #[error("render error: {0}")]
    Render(String),
}

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    /// Per-field form validation messages, keyed by wire field name.
    #[error("Invalid form submission")]
    InvalidForm(BTreeMap<String, Vec<String>>),

    #[error("PDF export error: {0}")]
    Export(#[from] ExportError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message, details) = match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg, None),
            AppError::InvalidForm(fields) => (
                StatusCode::BAD_REQUEST,
                "VALIDATION_ERROR",
                "One or more fields are invalid".to_string(),
                Some(json!(fields)),
            ),
            AppError::Export(e) => {
                tracing::error!("PDF export error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "PDF_EXPORT_ERROR",
                    "The PDF could not be generated".to_string(),
                    None,
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                    None,
                )
            }
        };

        let mut error = json!({
            "code": code,
            "message": message
        });
        if let Some(details) = details {
            error["fields"] = details;
        }

        (status, Json(json!({ "error": error }))).into_response()
    }
}
