use axum::extract::State;
use axum::http::header;
use axum::response::IntoResponse;
use axum::{routing::post, Json, Router};
use tracing::info;

use crate::analysis::{self, AnalysisOutcome};
use crate::models::{AnalysisRequest, AppState};
use crate::types::{AppError, AppResult};

pub const EXPORT_FILE_NAME: &str = "dados_filtrados.csv";

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/export", post(export_csv))
        .with_state(state)
}

/// Serialize the filtered set as a downloadable CSV, re-running the same
/// pipeline the analysis view runs.
async fn export_csv(
    State(state): State<AppState>,
    Json(request): Json<AnalysisRequest>,
) -> AppResult<impl IntoResponse> {
    info!(dataset_id = %request.dataset_id, "Export request received");

    let table = super::analysis::load_table(&state, &request.dataset_id).await?;

    let report = match analysis::run_analysis(&table, &request.filters)? {
        AnalysisOutcome::Report(report) => report,
        AnalysisOutcome::Halted { .. } => return Err(AppError::EmptyRoleSelection),
    };

    let bytes = report.table.to_csv()?;
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{EXPORT_FILE_NAME}\""),
            ),
        ],
        bytes,
    ))
}
