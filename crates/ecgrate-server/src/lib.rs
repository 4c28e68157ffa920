pub mod config;
pub mod cors;
pub mod error;
pub mod routes;

use axum::{extract::DefaultBodyLimit, Router};
use std::time::Duration;
use tower_http::timeout::TimeoutLayer;

pub use config::ServerConfig;
pub use error::ApiError;
pub use routes::{AnnotationAnalyzer, AppState, RecordAnalyzer};

/// Full application: routes plus upload limit, timeout and CORS layers.
pub fn app(config: &ServerConfig, state: AppState) -> Router {
    routes::router(state)
        .layer(DefaultBodyLimit::max(config.max_upload_bytes))
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.request_timeout_secs,
        )))
        .layer(cors::setup_cors(config))
}
