use serde::{Deserialize, Serialize};

use crate::analysis::{FilterSelection, SidebarOptions};
use crate::config::Config;
use crate::upload_registry::UploadRegistry;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub uploads: UploadRegistry,
}

// API request/response types

#[derive(Debug, Serialize)]
pub struct DatasetInfo {
    pub id: String,
    pub filename: String,
    pub content_type: String,
    pub size: usize,
}

/// What the shell does with an upload: route tabular files into the
/// analysis view, show text files as-is, ignore everything else.
#[derive(Debug, Serialize)]
pub struct UploadResponse {
    /// "table", "text", or "unsupported".
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dataset: Option<DatasetInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub columns: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AnalysisRequest {
    pub dataset_id: String,
    #[serde(default)]
    pub filters: FilterSelection,
    #[serde(default = "default_show_table")]
    pub show_table: bool,
}

fn default_show_table() -> bool {
    true
}

#[derive(Debug, Serialize)]
pub struct AnalysisResponse {
    /// "ok", or "halted" when the role multi-select was emptied.
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
    pub options: SidebarOptions,
    /// Gate for the "Dados Carregados" view; the filtered view below it is
    /// always rendered.
    pub show_table: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub columns: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rows: Option<Vec<Vec<String>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<usize>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub charts: Vec<ChartArtifact>,
}

#[derive(Debug, Serialize)]
pub struct ChartArtifact {
    pub id: String,
    pub title: String,
    pub url: String,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
}
