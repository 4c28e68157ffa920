pub mod qrs;

pub use qrs::{beat_intervals, select_qrs_beats};
