//! Dataset ingestion and cohort selection
//!
//! CSV loading for the nbaallelo schema and franchise/season-window subsetting.

pub mod cohort;
pub mod loader;

pub use cohort::{Cohort, CohortSpec};
pub use loader::{load_games, LoadStats};
