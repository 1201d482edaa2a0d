//! Normal distribution
//!
//! Closed-form approximations: Abramowitz-Stegun for the error function and
//! Beasley-Springer-Moro for the quantile function. Accurate to well below
//! the two decimal places the reports round to.

use std::f64::consts::PI;

use crate::{CourtsideError, Result};

/// Standard normal distribution N(0, 1)
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardNormal;

impl StandardNormal {
    pub fn new() -> Self {
        StandardNormal
    }

    /// Error function approximation (Abramowitz and Stegun 7.1.26)
    fn erf(x: f64) -> f64 {
        let a1 = 0.254829592;
        let a2 = -0.284496736;
        let a3 = 1.421413741;
        let a4 = -1.453152027;
        let a5 = 1.061405429;
        let p = 0.3275911;

        let sign = if x.is_sign_negative() { -1.0 } else { 1.0 };
        let x = x.abs();

        let t = 1.0 / (1.0 + p * x);
        let y = 1.0 - (((((a5 * t + a4) * t) + a3) * t + a2) * t + a1) * t * (-x * x).exp();

        sign * y
    }

    pub fn pdf(&self, x: f64) -> f64 {
        (1.0 / (2.0 * PI).sqrt()) * (-0.5 * x * x).exp()
    }

    pub fn cdf(&self, x: f64) -> f64 {
        0.5 * (1.0 + Self::erf(x / 2.0_f64.sqrt()))
    }

    /// Survival function, the upper-tail complement of the CDF
    pub fn sf(&self, x: f64) -> f64 {
        // Evaluate through the erf of -x so sf(x) + cdf(x) == 1 exactly
        0.5 * (1.0 + Self::erf(-x / 2.0_f64.sqrt()))
    }

    /// Quantile function (Beasley-Springer-Moro approximation)
    pub fn inverse_cdf(&self, p: f64) -> f64 {
        if p <= 0.0 || p >= 1.0 {
            return f64::NAN;
        }

        let a0 = -3.969683028665376e+01;
        let a1 = 2.209460984245205e+02;
        let a2 = -2.759285104469687e+02;
        let a3 = 1.383577518672690e+02;
        let a4 = -3.066479806614716e+01;
        let a5 = 2.506628277459239e+00;

        let b1 = -5.447609879822406e+01;
        let b2 = 1.615858368580409e+02;
        let b3 = -1.556989798598866e+02;
        let b4 = 6.680131188771972e+01;
        let b5 = -1.328068155288572e+01;

        let c0 = -7.784894002430293e-03;
        let c1 = -3.223964580411365e-01;
        let c2 = -2.400758277161838e+00;
        let c3 = -2.549732539343734e+00;
        let c4 = 4.374664141464968e+00;
        let c5 = 2.938163982698783e+00;

        let d1 = 7.784695709041462e-03;
        let d2 = 3.224671290700398e-01;
        let d3 = 2.445134137142996e+00;
        let d4 = 3.754408661907416e+00;

        let p_low = 0.02425;
        let p_high = 1.0 - p_low;

        if p < p_low {
            let q = (-2.0 * p.ln()).sqrt();
            (((((c0 * q + c1) * q + c2) * q + c3) * q + c4) * q + c5)
                / ((((d1 * q + d2) * q + d3) * q + d4) * q + 1.0)
        } else if p <= p_high {
            let q = p - 0.5;
            let r = q * q;
            (((((a0 * r + a1) * r + a2) * r + a3) * r + a4) * r + a5) * q
                / (((((b1 * r + b2) * r + b3) * r + b4) * r + b5) * r + 1.0)
        } else {
            let q = (-2.0 * (1.0 - p).ln()).sqrt();
            -(((((c0 * q + c1) * q + c2) * q + c3) * q + c4) * q + c5)
                / ((((d1 * q + d2) * q + d3) * q + d4) * q + 1.0)
        }
    }
}

/// Normal distribution N(mean, std_dev^2)
#[derive(Debug, Clone, Copy)]
pub struct Normal {
    pub mean: f64,
    pub std_dev: f64,
    standard: StandardNormal,
}

impl Normal {
    pub fn new(mean: f64, std_dev: f64) -> Result<Self> {
        if !std_dev.is_finite() || std_dev <= 0.0 {
            return Err(CourtsideError::Stats(format!(
                "Standard deviation must be positive and finite, got {}",
                std_dev
            )));
        }
        Ok(Normal {
            mean,
            std_dev,
            standard: StandardNormal::new(),
        })
    }

    fn z(&self, x: f64) -> f64 {
        (x - self.mean) / self.std_dev
    }

    pub fn pdf(&self, x: f64) -> f64 {
        self.standard.pdf(self.z(x)) / self.std_dev
    }

    pub fn cdf(&self, x: f64) -> f64 {
        self.standard.cdf(self.z(x))
    }

    pub fn sf(&self, x: f64) -> f64 {
        self.standard.sf(self.z(x))
    }

    pub fn inverse_cdf(&self, p: f64) -> f64 {
        self.mean + self.std_dev * self.standard.inverse_cdf(p)
    }

    /// Central interval containing `level` of the probability mass
    pub fn interval(&self, level: f64) -> Result<(f64, f64)> {
        if !(0.0 < level && level < 1.0) {
            return Err(CourtsideError::Stats(format!(
                "Interval level must be in (0, 1), got {}",
                level
            )));
        }
        let alpha = (1.0 - level) / 2.0;
        Ok((self.inverse_cdf(alpha), self.inverse_cdf(1.0 - alpha)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_normal_reference_points() {
        let dist = StandardNormal::new();
        assert!((dist.pdf(0.0) - 0.3989422804014327).abs() < 1e-10);
        assert!((dist.cdf(0.0) - 0.5).abs() < 1e-6);
        assert!((dist.inverse_cdf(0.5)).abs() < 1e-9);
        // z for 97.5th percentile
        assert!((dist.inverse_cdf(0.975) - 1.959964).abs() < 1e-3);
    }

    #[test]
    fn test_sf_and_cdf_sum_to_one() {
        let dist = Normal::new(1500.0, 100.0).unwrap();
        for x in [1200.0, 1450.0, 1500.0, 1580.0, 1900.0] {
            assert!((dist.sf(x) + dist.cdf(x) - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_normal_cdf_at_mean() {
        let dist = Normal::new(102.5, 11.3).unwrap();
        assert!((dist.cdf(102.5) - 0.5).abs() < 1e-6);
        assert!((dist.sf(102.5) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_interval_symmetric_about_mean() {
        let dist = Normal::new(1500.0, 4.0).unwrap();
        let (lower, upper) = dist.interval(0.95).unwrap();
        assert!((((lower + upper) / 2.0) - 1500.0).abs() < 1e-6);
        // Half-width should be ~1.96 standard deviations
        assert!(((upper - lower) / 2.0 - 1.96 * 4.0).abs() < 0.05);
    }

    #[test]
    fn test_invalid_parameters() {
        assert!(Normal::new(0.0, 0.0).is_err());
        assert!(Normal::new(0.0, -1.0).is_err());
        let dist = Normal::new(0.0, 1.0).unwrap();
        assert!(dist.interval(1.0).is_err());
        assert!(dist.interval(0.0).is_err());
        assert!(StandardNormal::new().inverse_cdf(0.0).is_nan());
    }
}
