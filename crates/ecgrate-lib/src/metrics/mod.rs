pub mod heart_rate;
pub mod zscore;

pub use heart_rate::{estimate_heart_rate, rate_samples, HeartRateSummary, RateEstimate};
pub use zscore::{z_scores, ZScoreBounds};
