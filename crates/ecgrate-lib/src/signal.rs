use serde::{Deserialize, Serialize};

/// Wave category label that marks a heartbeat.
pub const WAVE_TYPE_QRS: &str = "QRS";

/// One delineated wave from an annotation record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotationRow {
    /// Category label such as `QRS`, `P` or `T`.
    pub wave_type: String,
    /// Wave start (ms).
    pub onset: i64,
    /// Wave end (ms). Usually `>= onset` but not enforced.
    pub offset: i64,
    /// Free-text tags; empty when the column is missing or blank.
    #[serde(default)]
    pub tags: String,
}

impl AnnotationRow {
    pub fn is_qrs(&self) -> bool {
        self.wave_type == WAVE_TYPE_QRS
    }
}

/// A QRS complex with its estimated R-wave time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QrsBeat {
    pub onset: i64,
    pub offset: i64,
    /// Midpoint of onset and offset, used as the R-peak position.
    pub r_timestamp: f64,
}

impl QrsBeat {
    pub fn from_row(row: &AnnotationRow) -> Self {
        let onset = row.onset as f64;
        let offset = row.offset as f64;
        Self {
            onset: row.onset,
            offset: row.offset,
            r_timestamp: onset + (offset - onset) / 2.0,
        }
    }
}

/// R-R interval ending at a beat, keyed by that beat's onset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BeatInterval {
    pub onset: i64,
    pub r_r_interval: f64,
}

/// An interval that survived outlier rejection, with its instantaneous rate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RateSample {
    pub onset: i64,
    pub r_r_interval: f64,
    pub z_score: f64,
    pub bpm: f64,
}
