//! Normal-approximation inference for the skill-rating metric
//!
//! Confidence intervals for a sample mean via the standard error, and
//! upper/lower tail probabilities against a fitted normal.

use serde::{Deserialize, Serialize};

use crate::stats::descriptive::Summary;
use crate::stats::distributions::Normal;
use crate::Result;

/// A central confidence interval for a sample mean
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ConfidenceInterval {
    pub level: f64,
    pub lower: f64,
    pub upper: f64,
}

impl ConfidenceInterval {
    pub fn midpoint(&self) -> f64 {
        (self.lower + self.upper) / 2.0
    }

    pub fn half_width(&self) -> f64 {
        (self.upper - self.lower) / 2.0
    }
}

/// Confidence interval for the mean of `values`, assuming normal sampling
///
/// The sampling distribution is N(mean, stderr^2) with
/// stderr = s / sqrt(n).
pub fn mean_confidence_interval(values: &[f64], level: f64) -> Result<ConfidenceInterval> {
    let summary = Summary::from_slice(values)?;
    interval_from_summary(&summary, level)
}

/// Same interval computed from a prebuilt summary
pub fn interval_from_summary(summary: &Summary, level: f64) -> Result<ConfidenceInterval> {
    let sampling = Normal::new(summary.mean, summary.standard_error())?;
    let (lower, upper) = sampling.interval(level)?;
    Ok(ConfidenceInterval { level, lower, upper })
}

/// Tail probabilities of `x` against N(pool_mean, pool_std^2)
///
/// Returns (survival function, CDF): the probability of a draw above `x`
/// and the probability of a draw below it.
pub fn tail_probabilities(pool_mean: f64, pool_std: f64, x: f64) -> Result<(f64, f64)> {
    let dist = Normal::new(pool_mean, pool_std)?;
    Ok((dist.sf(x), dist.cdf(x)))
}
