use std::path::Path;

use axum::extract::State;
use axum::{routing::post, Json, Router};
use tokio::fs;
use tracing::info;

use crate::analysis::{self, charts, AnalysisOutcome, AnalysisReport};
use crate::extract::{self, Extracted, SupportedFormat};
use crate::models::{AnalysisRequest, AnalysisResponse, AppState, ChartArtifact};
use crate::table::RecordTable;
use crate::types::{AppError, AppResult};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/analysis", post(run_analysis_handler))
        .with_state(state)
}

async fn run_analysis_handler(
    State(state): State<AppState>,
    Json(request): Json<AnalysisRequest>,
) -> AppResult<Json<AnalysisResponse>> {
    info!(dataset_id = %request.dataset_id, "Analysis request received");

    let table = load_table(&state, &request.dataset_id).await?;

    match analysis::run_analysis(&table, &request.filters)? {
        AnalysisOutcome::Halted { options, warning } => Ok(Json(AnalysisResponse {
            status: "halted".to_string(),
            warning: Some(warning),
            options,
            show_table: request.show_table,
            columns: None,
            rows: None,
            total: None,
            charts: Vec::new(),
        })),
        AnalysisOutcome::Report(report) => {
            let charts = render_charts(&state, &request.dataset_id, &report).await?;
            Ok(Json(AnalysisResponse {
                status: "ok".to_string(),
                warning: None,
                options: report.options,
                show_table: request.show_table,
                columns: Some(report.table.columns),
                rows: Some(report.table.rows),
                total: Some(report.total),
                charts,
            }))
        }
    }
}

/// Look up the stored upload and re-extract it. Every render pass starts
/// from the originally uploaded bytes; extraction results are never
/// cached across interactions.
pub(crate) async fn load_table(state: &AppState, dataset_id: &str) -> AppResult<RecordTable> {
    let record = state
        .uploads
        .get(dataset_id)
        .await
        .ok_or_else(|| AppError::DatasetNotFound(dataset_id.to_string()))?;

    let format = SupportedFormat::from_mime(&record.content_type)
        .ok_or_else(|| AppError::NotTabular(record.filename.clone()))?;

    match extract::extract(&record.bytes, format)? {
        Extracted::Table(table) => Ok(table),
        Extracted::Text(_) => Err(AppError::NotTabular(record.filename)),
    }
}

async fn render_charts(
    state: &AppState,
    dataset_id: &str,
    report: &AnalysisReport,
) -> AppResult<Vec<ChartArtifact>> {
    let dir = Path::new(&state.config.dashboard.artifacts_dir)
        .join("charts")
        .join(dataset_id);
    fs::create_dir_all(&dir).await?;
    let base = format!("/artifacts/charts/{dataset_id}");

    let mut artifacts = Vec::new();

    if !report.role_counts.is_empty() {
        let path = dir.join("cargo_dist.png");
        charts::write_bar_chart(&path, "Distribuição de Cargos", "Cargo", &report.role_counts)
            .map_err(|e| AppError::Chart(e.to_string()))?;
        artifacts.push(ChartArtifact {
            id: "cargo_dist".to_string(),
            title: "Distribuição de Cargos".to_string(),
            url: format!("{base}/cargo_dist.png"),
        });
    }

    if !report.status_counts.is_empty() {
        let path = dir.join("status_dist.png");
        charts::write_bar_chart(
            &path,
            "Status dos Funcionários",
            "Status",
            &report.status_counts,
        )
        .map_err(|e| AppError::Chart(e.to_string()))?;
        artifacts.push(ChartArtifact {
            id: "status_dist".to_string(),
            title: "Status dos Funcionários".to_string(),
            url: format!("{base}/status_dist.png"),
        });
    }

    // Hiring first, termination second.
    if let Some(buckets) = report.hiring_trend.as_deref() {
        if !buckets.is_empty() {
            let path = dir.join("contratacao_trend.png");
            charts::write_trend_chart(
                &path,
                "Tendência de Contratação ao Longo do Tempo",
                "Data de Contratação",
                "Número de Contratações",
                buckets,
            )
            .map_err(|e| AppError::Chart(e.to_string()))?;
            artifacts.push(ChartArtifact {
                id: "contratacao_trend".to_string(),
                title: "Tendência de Contratação ao Longo do Tempo".to_string(),
                url: format!("{base}/contratacao_trend.png"),
            });
        }
    }
    if let Some(buckets) = report.termination_trend.as_deref() {
        if !buckets.is_empty() {
            let path = dir.join("demissao_trend.png");
            charts::write_trend_chart(
                &path,
                "Tendência de Demissão ao Longo do Tempo",
                "Data de Demissão",
                "Número de Demissões",
                buckets,
            )
            .map_err(|e| AppError::Chart(e.to_string()))?;
            artifacts.push(ChartArtifact {
                id: "demissao_trend".to_string(),
                title: "Tendência de Demissão ao Longo do Tempo".to_string(),
                url: format!("{base}/demissao_trend.png"),
            });
        }
    }

    Ok(artifacts)
}
