use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use ecgrate_lib::AnalysisError;
use log::{error, warn};
use serde_json::json;
use thiserror::Error;

/// Failures of the delineation endpoint, rendered as `{"error": "..."}`.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("No file provided. Please upload a CSV file.")]
    MissingFile,
    #[error("The file is empty. Please upload a valid CSV file.")]
    EmptyFilename,
    #[error("Invalid file format. Only CSV files are supported.")]
    NotCsv,
    #[error("Invalid upload: {0}")]
    InvalidUpload(String),
    #[error("Data issue: {0}")]
    DataIssue(String),
    #[error("The ECG file could not be found or read. Please check the file format.")]
    Unreadable,
    #[error("An unexpected error occurred: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MissingFile
            | ApiError::EmptyFilename
            | ApiError::NotCsv
            | ApiError::InvalidUpload(_)
            | ApiError::DataIssue(_) => StatusCode::BAD_REQUEST,
            ApiError::Unreadable | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<AnalysisError> for ApiError {
    fn from(err: AnalysisError) -> Self {
        match err {
            AnalysisError::InsufficientData(reason) => ApiError::DataIssue(reason.to_string()),
            AnalysisError::Io(_) => ApiError::Unreadable,
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!("delineation failed: {}", self);
        } else {
            warn!("delineation rejected: {}", self);
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
