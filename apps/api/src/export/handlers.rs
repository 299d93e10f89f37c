use axum::{
    extract::{Query, State},
    http::header,
    response::{IntoResponse, Response},
};
use tracing::info;

use crate::errors::AppError;
use crate::export::build_user_list_pdf;
use crate::roster::projection::{display_records, UserFilter};
use crate::state::AppState;

const PDF_FILENAME: &str = "user-list.pdf";

/// GET /resources/user-list-pdf
/// Streams the filtered user list as a PDF attachment.
pub async fn handle_user_list_pdf(
    State(state): State<AppState>,
    Query(filter): Query<UserFilter>,
) -> Result<Response, AppError> {
    let records = {
        let store = state.store.read().await;
        display_records(&store, &filter)
    };
    info!(
        "PDF export requested: {} records (department={:?}, employee={:?})",
        records.len(),
        filter.department_id,
        filter.employee_id
    );

    let base_font = state.font_cache.base_font().await?;
    let layout = state.layout.clone();

    // Subsetting and rendering are CPU-bound; keep them off the async executor.
    let pdf = tokio::task::spawn_blocking(move || {
        build_user_list_pdf(&records, &base_font, &layout)
    })
    .await
    .map_err(|e| {
        AppError::Internal(anyhow::anyhow!("spawn_blocking failed in PDF export: {e}"))
    })??;

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{PDF_FILENAME}\""),
            ),
        ],
        pdf,
    )
        .into_response())
}
