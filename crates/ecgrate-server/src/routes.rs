use crate::error::ApiError;
use axum::{
    body::Bytes,
    extract::{multipart::MultipartRejection, Multipart, State},
    routing::{get, post},
    Json, Router,
};
use ecgrate_lib::{analyze_record, AnalysisError, HeartRateSummary};
use log::info;
use serde_json::{json, Value};
use std::sync::Arc;

/// Multipart field carrying the annotation CSV.
pub const RECORD_FIELD: &str = "record";

/// Turns an uploaded annotation file into heart-rate statistics.
pub trait RecordAnalyzer: Send + Sync {
    fn analyze(&self, record: &[u8]) -> Result<HeartRateSummary, AnalysisError>;
}

/// Runs the QRS → R-R → outlier filter → BPM pipeline.
#[derive(Debug, Default, Clone, Copy)]
pub struct AnnotationAnalyzer;

impl RecordAnalyzer for AnnotationAnalyzer {
    fn analyze(&self, record: &[u8]) -> Result<HeartRateSummary, AnalysisError> {
        analyze_record(record)
    }
}

#[derive(Clone)]
pub struct AppState {
    pub analyzer: Arc<dyn RecordAnalyzer>,
}

impl AppState {
    pub fn new(analyzer: Arc<dyn RecordAnalyzer>) -> Self {
        Self { analyzer }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Arc::new(AnnotationAnalyzer))
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/delineation", post(delineation))
        .route("/health", get(health))
        .with_state(state)
}

async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

async fn delineation(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<HeartRateSummary>, ApiError> {
    let multipart = multipart.map_err(|_| ApiError::MissingFile)?;
    let (file_name, record) = read_record_field(multipart).await?;
    info!("analyzing {} ({} bytes)", file_name, record.len());

    let analyzer = state.analyzer.clone();
    let summary = tokio::task::spawn_blocking(move || analyzer.analyze(&record))
        .await
        .map_err(|err| ApiError::Internal(err.to_string()))??;
    Ok(Json(summary))
}

/// Find the `record` file part and check its name before reading the body.
async fn read_record_field(mut multipart: Multipart) -> Result<(String, Bytes), ApiError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|err| ApiError::InvalidUpload(err.body_text()))?
    {
        if field.name() != Some(RECORD_FIELD) {
            continue;
        }
        // A part without `filename=` is a plain form value, not an upload.
        let Some(file_name) = field.file_name().map(str::to_string) else {
            continue;
        };
        if file_name.is_empty() {
            return Err(ApiError::EmptyFilename);
        }
        if !file_name.ends_with(".csv") {
            return Err(ApiError::NotCsv);
        }
        let data = field
            .bytes()
            .await
            .map_err(|err| ApiError::InvalidUpload(err.body_text()))?;
        return Ok((file_name, data));
    }
    Err(ApiError::MissingFile)
}
