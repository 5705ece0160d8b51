// Shared error taxonomy and result alias

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};

use crate::extract::ExtractError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Extraction failed: {0}")]
    Extract(#[from] ExtractError),

    #[error("Column not found: {0}")]
    MissingColumn(String),

    #[error("Unparseable date in column '{column}': {value}")]
    DateParse { column: String, value: String },

    #[error("Dataset not found: {0}")]
    DatasetNotFound(String),

    #[error("Dataset is not tabular: {0}")]
    NotTabular(String),

    #[error("No role selected")]
    EmptyRoleSelection,

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Chart rendering failed: {0}")]
    Chart(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            AppError::Extract(_)
            | AppError::MissingColumn(_)
            | AppError::DateParse { .. }
            | AppError::NotTabular(_)
            | AppError::EmptyRoleSelection => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::DatasetNotFound(_) => StatusCode::NOT_FOUND,
            AppError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Chart(_) | AppError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

// Every failure ends the current render pass with a JSON error body.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = Json(serde_json::json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}

pub type AppResult<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_column_is_unprocessable() {
        let err = AppError::MissingColumn("Status".to_string());
        assert_eq!(err.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn unknown_dataset_is_not_found() {
        let err = AppError::DatasetNotFound("abc".to_string());
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
    }
}
