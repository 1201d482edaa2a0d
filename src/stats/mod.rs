//! Statistical primitives
//!
//! Descriptive summaries, the normal distribution, confidence intervals, and
//! the least-squares trend line.

pub mod descriptive;
pub mod distributions;
pub mod inference;
pub mod regression;

pub use descriptive::Summary;
pub use distributions::{Normal, StandardNormal};
pub use inference::{mean_confidence_interval, tail_probabilities, ConfidenceInterval};
pub use regression::LinearFit;
