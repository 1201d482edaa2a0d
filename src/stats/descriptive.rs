//! Descriptive statistics
//!
//! Sample statistics with the n-1 variance denominator and the R-7
//! linear-interpolation quantile, matching pandas/NumPy defaults.

use serde::{Deserialize, Serialize};

use crate::{CourtsideError, Result};

pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

pub fn median(values: &[f64]) -> Option<f64> {
    quantile(values, 0.5)
}

/// Sample variance (n-1 denominator)
pub fn variance(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let m = mean(values)?;
    let sum_sq: f64 = values.iter().map(|v| (v - m) * (v - m)).sum();
    Some(sum_sq / (values.len() - 1) as f64)
}

/// Sample standard deviation (n-1 denominator)
pub fn std_dev(values: &[f64]) -> Option<f64> {
    variance(values).map(f64::sqrt)
}

/// The p-th quantile using R-7 linear interpolation
///
/// For sorted data of length n, the index is `p * (n - 1)`; fractional
/// indices interpolate between neighbors.
pub fn quantile(values: &[f64], p: f64) -> Option<f64> {
    if values.is_empty() || !(0.0..=1.0).contains(&p) {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    quantile_sorted(&sorted, p)
}

/// R-7 quantile on pre-sorted data
pub fn quantile_sorted(sorted: &[f64], p: f64) -> Option<f64> {
    if sorted.is_empty() || !(0.0..=1.0).contains(&p) {
        return None;
    }
    let position = p * (sorted.len() - 1) as f64;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    if lower == upper {
        return Some(sorted[lower]);
    }
    let weight = position - lower as f64;
    Some(sorted[lower] * (1.0 - weight) + sorted[upper] * weight)
}

/// Descriptive summary of one numeric column
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Summary {
    pub count: usize,
    pub mean: f64,
    pub median: f64,
    pub variance: f64,
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
}

impl Summary {
    pub fn from_slice(values: &[f64]) -> Result<Self> {
        if values.len() < 2 {
            return Err(CourtsideError::Stats(format!(
                "Need at least 2 observations for a summary, got {}",
                values.len()
            )));
        }
        let mean = mean(values).ok_or_else(|| CourtsideError::Stats("No mean".into()))?;
        let median = median(values).ok_or_else(|| CourtsideError::Stats("No median".into()))?;
        let variance =
            variance(values).ok_or_else(|| CourtsideError::Stats("No variance".into()))?;
        let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
        let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        Ok(Summary {
            count: values.len(),
            mean,
            median,
            variance,
            std_dev: variance.sqrt(),
            min,
            max,
        })
    }

    /// Standard error of the mean
    pub fn standard_error(&self) -> f64 {
        self.std_dev / (self.count as f64).sqrt()
    }
}
