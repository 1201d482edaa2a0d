//! Simple ordinary least squares
//!
//! Closed-form slope/intercept for the season-vs-points trend line drawn on
//! the scatterplot.

use crate::{CourtsideError, Result};

/// A fitted line y = intercept + slope * x
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearFit {
    pub slope: f64,
    pub intercept: f64,
}

impl LinearFit {
    /// Fit by least squares; x must have some spread
    pub fn fit(x: &[f64], y: &[f64]) -> Result<Self> {
        if x.len() != y.len() {
            return Err(CourtsideError::Stats(format!(
                "Mismatched fit inputs: {} x values, {} y values",
                x.len(),
                y.len()
            )));
        }
        if x.len() < 2 {
            return Err(CourtsideError::Stats(
                "Need at least 2 points to fit a line".into(),
            ));
        }

        let n = x.len() as f64;
        let x_mean = x.iter().sum::<f64>() / n;
        let y_mean = y.iter().sum::<f64>() / n;

        let mut ss_xy = 0.0;
        let mut ss_xx = 0.0;
        for (&xi, &yi) in x.iter().zip(y.iter()) {
            ss_xy += (xi - x_mean) * (yi - y_mean);
            ss_xx += (xi - x_mean) * (xi - x_mean);
        }

        if ss_xx == 0.0 {
            return Err(CourtsideError::Stats(
                "Cannot fit a trend line: x values are constant".into(),
            ));
        }

        let slope = ss_xy / ss_xx;
        Ok(LinearFit {
            slope,
            intercept: y_mean - slope * x_mean,
        })
    }

    pub fn predict(&self, x: f64) -> f64 {
        self.intercept + self.slope * x
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit_exact_line() {
        let x = [1.0, 2.0, 3.0, 4.0];
        let y = [3.0, 5.0, 7.0, 9.0]; // y = 1 + 2x
        let fit = LinearFit::fit(&x, &y).unwrap();
        assert!((fit.slope - 2.0).abs() < 1e-9);
        assert!((fit.intercept - 1.0).abs() < 1e-9);
        assert!((fit.predict(10.0) - 21.0).abs() < 1e-9);
    }

    #[test]
    fn test_fit_passes_through_means() {
        let x = [2013.0, 2013.0, 2014.0, 2015.0, 2015.0];
        let y = [98.0, 105.0, 101.0, 96.0, 110.0];
        let fit = LinearFit::fit(&x, &y).unwrap();
        let x_mean = x.iter().sum::<f64>() / x.len() as f64;
        let y_mean = y.iter().sum::<f64>() / y.len() as f64;
        assert!((fit.predict(x_mean) - y_mean).abs() < 1e-9);
    }

    #[test]
    fn test_fit_rejects_degenerate_inputs() {
        assert!(LinearFit::fit(&[1.0], &[2.0]).is_err());
        assert!(LinearFit::fit(&[1.0, 2.0], &[1.0]).is_err());
        assert!(LinearFit::fit(&[3.0, 3.0, 3.0], &[1.0, 2.0, 3.0]).is_err());
    }
}
