use crate::error::{AnalysisError, InsufficientData, Result};
use crate::metrics::zscore::{z_scores, ZScoreBounds};
use crate::signal::{BeatInterval, RateSample};
use log::debug;
use serde::{Deserialize, Serialize};

/// Milliseconds per minute; R-R intervals are assumed to be in ms.
pub const MS_PER_MINUTE: f64 = 60_000.0;
/// Decimal places kept in reported BPM values.
pub const BPM_DECIMALS: i32 = 2;

/// Heart-rate statistics for one annotation record.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeartRateSummary {
    pub mean_heart_rate: f64,
    pub min_heart_rate: f64,
    /// Onset (not R-peak) of the beat with the lowest rate.
    pub min_heart_rate_timestamp: i64,
    pub max_heart_rate: f64,
    /// Onset (not R-peak) of the beat with the highest rate.
    pub max_heart_rate_timestamp: i64,
}

pub fn bpm_from_interval(r_r_interval_ms: f64) -> f64 {
    MS_PER_MINUTE / r_r_interval_ms
}

pub fn round_bpm(bpm: f64) -> f64 {
    let scale = 10f64.powi(BPM_DECIMALS);
    (bpm * scale).round_ties_even() / scale
}

/// Drop outlying intervals and convert the rest to instantaneous heart rate.
///
/// Z-scores are taken over the whole interval set. Survivors with a
/// non-positive interval are rejected since they cannot describe a rate.
pub fn rate_samples(intervals: &[BeatInterval], bounds: &ZScoreBounds) -> Vec<RateSample> {
    let values: Vec<f64> = intervals.iter().map(|i| i.r_r_interval).collect();
    let scores = z_scores(&values);

    let mut samples = Vec::with_capacity(intervals.len());
    for (interval, z_score) in intervals.iter().zip(scores) {
        if !bounds.contains(z_score) {
            debug!(
                "rejecting interval {} ms at onset {} (z = {:.3})",
                interval.r_r_interval, interval.onset, z_score
            );
            continue;
        }
        if interval.r_r_interval <= 0.0 {
            debug!(
                "rejecting non-positive interval {} ms at onset {}",
                interval.r_r_interval, interval.onset
            );
            continue;
        }
        samples.push(RateSample {
            onset: interval.onset,
            r_r_interval: interval.r_r_interval,
            z_score,
            bpm: bpm_from_interval(interval.r_r_interval),
        });
    }
    samples
}

/// Rate samples that survived filtering, with their summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateEstimate {
    pub samples: Vec<RateSample>,
    pub summary: HeartRateSummary,
}

/// Outlier filtering followed by aggregation.
pub fn estimate_heart_rate(
    intervals: &[BeatInterval],
    bounds: &ZScoreBounds,
) -> Result<RateEstimate> {
    let samples = rate_samples(intervals, bounds);
    debug!(
        "{} of {} intervals survived outlier filtering",
        samples.len(),
        intervals.len()
    );
    let Some((first, rest)) = samples.split_first() else {
        return Err(InsufficientData::NoSurvivingIntervals {
            candidates: intervals.len(),
        }
        .into());
    };
    let summary = summarize(first, rest)?;
    Ok(RateEstimate { samples, summary })
}

/// Mean, minimum and maximum rate. Ties on an extreme go to the earliest beat.
fn summarize(first: &RateSample, rest: &[RateSample]) -> Result<HeartRateSummary> {
    let mut min = first;
    let mut max = first;
    for sample in rest {
        if sample.bpm < min.bpm {
            min = sample;
        }
        if sample.bpm > max.bpm {
            max = sample;
        }
    }
    let total = rest.iter().fold(first.bpm, |acc, s| acc + s.bpm);
    let mean = total / (rest.len() + 1) as f64;
    if !mean.is_finite() || !min.bpm.is_finite() || !max.bpm.is_finite() {
        return Err(AnalysisError::NonFinite {
            what: "heart rate",
        });
    }

    Ok(HeartRateSummary {
        mean_heart_rate: round_bpm(mean),
        min_heart_rate: round_bpm(min.bpm),
        min_heart_rate_timestamp: min.onset,
        max_heart_rate: round_bpm(max.bpm),
        max_heart_rate_timestamp: max.onset,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn interval(onset: i64, r_r_interval: f64) -> BeatInterval {
        BeatInterval {
            onset,
            r_r_interval,
        }
    }

    fn fixture_intervals() -> Vec<BeatInterval> {
        vec![
            interval(1900, 1150.0),
            interval(3200, 1225.0),
            interval(4000, 785.0),
            interval(8000, 4040.0),
        ]
    }

    #[test]
    fn fixture_summary() {
        let estimate = estimate_heart_rate(&fixture_intervals(), &ZScoreBounds::default()).unwrap();
        assert_eq!(estimate.samples.len(), 4);
        assert_eq!(
            estimate.summary,
            HeartRateSummary {
                mean_heart_rate: 48.11,
                min_heart_rate: 14.85,
                min_heart_rate_timestamp: 8000,
                max_heart_rate: 76.43,
                max_heart_rate_timestamp: 4000,
            }
        );
    }

    #[test]
    fn long_pause_is_rejected_as_outlier() {
        let mut intervals: Vec<BeatInterval> =
            (0..10).map(|i| interval(1000 * i, 800.0)).collect();
        intervals.push(interval(20_000, 5000.0));
        let samples = rate_samples(&intervals, &ZScoreBounds::default());
        assert_eq!(samples.len(), 10);
        assert!(samples.iter().all(|s| s.onset != 20_000));
        assert!(samples.iter().all(|s| (s.bpm - 75.0).abs() < 1e-12));
    }

    #[test]
    fn short_interval_rejected_where_long_one_is_kept() {
        // A single deviant among four equal intervals scores exactly +/-2.
        let mut short: Vec<BeatInterval> = (0..4).map(|i| interval(1000 * i, 1000.0)).collect();
        short.push(interval(4500, 500.0));
        let samples = rate_samples(&short, &ZScoreBounds::default());
        assert_eq!(samples.len(), 4);
        assert!(samples.iter().all(|s| s.onset != 4500));

        let mut long: Vec<BeatInterval> = (0..4).map(|i| interval(1000 * i, 1000.0)).collect();
        long.push(interval(5500, 1500.0));
        let samples = rate_samples(&long, &ZScoreBounds::default());
        assert_eq!(samples.len(), 5);
    }

    #[test]
    fn non_positive_intervals_never_become_rates() {
        let intervals = vec![
            interval(100, 800.0),
            interval(200, 0.0),
            interval(300, -50.0),
            interval(400, 820.0),
        ];
        let samples = rate_samples(&intervals, &ZScoreBounds::default());
        assert!(samples.iter().all(|s| s.bpm > 0.0 && s.bpm.is_finite()));
        assert!(samples.iter().all(|s| s.r_r_interval > 0.0));
    }

    #[test]
    fn single_interval_scores_zero_and_survives() {
        let summary = estimate_heart_rate(&[interval(900, 1000.0)], &ZScoreBounds::default())
            .unwrap()
            .summary;
        assert_eq!(summary.mean_heart_rate, 60.0);
        assert_eq!(summary.min_heart_rate_timestamp, 900);
        assert_eq!(summary.max_heart_rate_timestamp, 900);
    }

    #[test]
    fn all_rejected_is_insufficient_data() {
        let err = estimate_heart_rate(&[interval(5, -10.0)], &ZScoreBounds::default())
            .unwrap_err();
        assert!(err.is_insufficient_data());
        assert!(matches!(
            err,
            AnalysisError::InsufficientData(InsufficientData::NoSurvivingIntervals {
                candidates: 1
            })
        ));
    }

    #[test]
    fn empty_intervals_are_insufficient_data() {
        let err = estimate_heart_rate(&[], &ZScoreBounds::default()).unwrap_err();
        assert!(err.is_insufficient_data());
    }

    #[test]
    fn ties_resolve_to_first_occurrence() {
        let intervals = vec![
            interval(100, 1000.0),
            interval(200, 800.0),
            interval(300, 1000.0),
            interval(400, 800.0),
        ];
        let summary = estimate_heart_rate(&intervals, &ZScoreBounds::default())
            .unwrap()
            .summary;
        assert_eq!(summary.min_heart_rate_timestamp, 100);
        assert_eq!(summary.max_heart_rate_timestamp, 200);
    }

    #[test]
    fn rounds_to_two_decimals() {
        assert_eq!(round_bpm(bpm_from_interval(785.0)), 76.43);
        assert_eq!(round_bpm(bpm_from_interval(4040.0)), 14.85);
        assert_eq!(round_bpm(60.0), 60.0);
    }

    #[test]
    fn exact_halves_round_to_even() {
        // 60000 / 768 = 78.125 and 60000 / 1280 = 46.875, both exact in binary.
        assert_eq!(round_bpm(bpm_from_interval(768.0)), 78.12);
        assert_eq!(round_bpm(bpm_from_interval(1280.0)), 46.88);
    }
}
