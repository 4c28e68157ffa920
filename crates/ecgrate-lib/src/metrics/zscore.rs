use serde::{Deserialize, Serialize};

/// Largest z-score an R-R interval may have and still be kept.
pub const Z_UPPER: f64 = 2.5;
/// Smallest z-score an R-R interval may have and still be kept.
pub const Z_LOWER: f64 = -1.85;

/// Inclusive acceptance window for interval z-scores.
///
/// Long intervals (dropped beats, pauses) are tolerated further from the mean
/// than short ones.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZScoreBounds {
    pub upper: f64,
    pub lower: f64,
}

impl Default for ZScoreBounds {
    fn default() -> Self {
        Self {
            upper: Z_UPPER,
            lower: Z_LOWER,
        }
    }
}

impl ZScoreBounds {
    pub fn contains(&self, z: f64) -> bool {
        z <= self.upper && z >= self.lower
    }
}

/// Mean and population standard deviation of a sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PopulationStats {
    pub n: usize,
    pub mean: f64,
    pub std_dev: f64,
}

pub fn population_stats(values: &[f64]) -> PopulationStats {
    let n = values.len();
    let mean = if n > 0 {
        values.iter().sum::<f64>() / n as f64
    } else {
        0.0
    };
    let std_dev = if n > 1 {
        (values.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n as f64).sqrt()
    } else {
        0.0
    };
    PopulationStats { n, mean, std_dev }
}

/// Population z-score of every value.
///
/// When the spread is zero or cannot be computed (fewer than two values,
/// identical values, overflow) every score is 0.
pub fn z_scores(values: &[f64]) -> Vec<f64> {
    let stats = population_stats(values);
    if stats.std_dev == 0.0 || !stats.std_dev.is_finite() || !stats.mean.is_finite() {
        return vec![0.0; values.len()];
    }
    values
        .iter()
        .map(|x| {
            let z = (x - stats.mean) / stats.std_dev;
            if z.is_finite() {
                z
            } else {
                0.0
            }
        })
        .collect()
}
