pub mod detectors;
pub mod error;
pub mod io;
pub mod metrics;
pub mod pipeline;
pub mod signal;

pub use error::{AnalysisError, InsufficientData};
pub use metrics::HeartRateSummary;
pub use pipeline::{analyze_record, analyze_record_detailed, RecordAnalysis};
pub use signal::*;
