//! Statistics Calculator Module
//! Descriptive statistics over per-set count samples.

use serde::Serialize;

/// Statistics for one sample of per-set counts.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CountStats {
    pub count: usize,
    pub mean: f64,
    pub min: f64,
    pub max: f64,
    pub std: f64,
}

impl Default for CountStats {
    fn default() -> Self {
        Self {
            count: 0,
            mean: f64::NAN,
            min: f64::NAN,
            max: f64::NAN,
            std: f64::NAN,
        }
    }
}

/// Compute descriptive statistics for an array of values.
///
/// An empty sample yields NaN fields; a single-value sample has std 0.
pub fn describe_counts(values: &[f64]) -> CountStats {
    let n = values.len();
    if n == 0 {
        return CountStats::default();
    }

    let mean = values.iter().sum::<f64>() / n as f64;
    let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);

    let variance = if n > 1 {
        values.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1) as f64
    } else {
        0.0
    };

    CountStats {
        count: n,
        mean,
        min,
        max,
        std: variance.sqrt(),
    }
}

/// A ratio with an explicit zero-denominator policy: NaN, never a panic or
/// ±Inf.
pub fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        f64::NAN
    } else {
        numerator as f64 / denominator as f64
    }
}
