use crate::{
    detectors::qrs::{beat_intervals, select_qrs_beats},
    error::{InsufficientData, Result},
    io::annotations::{parse_annotations, ParsedAnnotations},
    metrics::{
        heart_rate::{estimate_heart_rate, HeartRateSummary, RateEstimate},
        zscore::ZScoreBounds,
    },
    signal::{BeatInterval, RateSample},
};
use log::debug;
use serde::{Deserialize, Serialize};
use std::io::Read;

/// Every intermediate stage of one record's analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordAnalysis {
    pub annotations: ParsedAnnotations,
    pub beat_count: usize,
    pub intervals: Vec<BeatInterval>,
    pub samples: Vec<RateSample>,
    pub summary: HeartRateSummary,
}

/// Parse an annotation record and compute its heart-rate summary.
pub fn analyze_record<R: Read>(reader: R) -> Result<HeartRateSummary> {
    analyze_record_detailed(reader).map(|analysis| analysis.summary)
}

/// Like [`analyze_record`], keeping the parsed rows, intervals and rate samples.
pub fn analyze_record_detailed<R: Read>(reader: R) -> Result<RecordAnalysis> {
    let annotations = parse_annotations(reader)?;
    let beats = select_qrs_beats(&annotations.rows);
    if beats.len() < 2 {
        return Err(InsufficientData::TooFewBeats { found: beats.len() }.into());
    }
    let intervals = beat_intervals(&beats);
    debug!(
        "{} rows -> {} QRS beats -> {} intervals",
        annotations.rows.len(),
        beats.len(),
        intervals.len()
    );

    let RateEstimate { samples, summary } =
        estimate_heart_rate(&intervals, &ZScoreBounds::default())?;
    Ok(RecordAnalysis {
        annotations,
        beat_count: beats.len(),
        intervals,
        samples,
        summary,
    })
}
