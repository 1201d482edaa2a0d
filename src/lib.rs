//! Descriptive analytics for historical NBA game records
//!
//! Loads the FiveThirtyEight Elo dataset, selects team cohorts by franchise
//! and season window, and computes distribution charts, descriptive
//! statistics, and normal-approximation skill-rating inference.

pub mod data;
pub mod report;
pub mod stats;
pub mod vis;

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Where a game was played, from the team's perspective
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameLocation {
    Home,
    Away,
    Neutral,
}

impl GameLocation {
    /// Single-letter code used by the dataset
    pub fn code(&self) -> &'static str {
        match self {
            GameLocation::Home => "H",
            GameLocation::Away => "A",
            GameLocation::Neutral => "N",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_uppercase().as_str() {
            "H" => Some(GameLocation::Home),
            "A" => Some(GameLocation::Away),
            "N" => Some(GameLocation::Neutral),
            _ => None,
        }
    }
}

impl fmt::Display for GameLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameLocation::Home => write!(f, "Home"),
            GameLocation::Away => write!(f, "Away"),
            GameLocation::Neutral => write!(f, "Neutral"),
        }
    }
}

/// Outcome of a game for the recorded team
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    Win,
    Loss,
}

impl GameResult {
    pub fn code(&self) -> &'static str {
        match self {
            GameResult::Win => "W",
            GameResult::Loss => "L",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_uppercase().as_str() {
            "W" => Some(GameResult::Win),
            "L" => Some(GameResult::Loss),
            _ => None,
        }
    }
}

impl fmt::Display for GameResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameResult::Win => write!(f, "W"),
            GameResult::Loss => write!(f, "L"),
        }
    }
}

/// A single regular-season game from one team's perspective
///
/// Records are immutable once loaded; cohort selection copies rather than
/// mutates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameRecord {
    /// Dataset game identifier (e.g. "199611010CHI")
    pub game_id: String,
    /// Season year the game counts toward
    pub year: u16,
    /// Franchise identifier (e.g. "Bulls", "Hawks")
    pub fran_id: String,
    /// Points scored by this franchise
    pub pts: u32,
    /// Points scored by the opponent
    pub opp_pts: u32,
    /// Post-game Elo rating for this franchise
    pub elo_n: f64,
    /// Post-game Elo rating for the opponent
    pub opp_elo_n: f64,
    /// Game location from this franchise's perspective
    pub location: GameLocation,
    /// Final result for this franchise
    pub result: GameResult,
}

impl GameRecord {
    /// Score margin (positive = this franchise won on points)
    pub fn margin(&self) -> i32 {
        self.pts as i32 - self.opp_pts as i32
    }

    pub fn is_home(&self) -> bool {
        self.location == GameLocation::Home
    }

    pub fn won(&self) -> bool {
        self.result == GameResult::Win
    }

    /// Post-game rating edge over the opponent
    pub fn elo_edge(&self) -> f64 {
        self.elo_n - self.opp_elo_n
    }
}

/// Application-wide errors
#[derive(Debug, Error)]
pub enum CourtsideError {
    #[error("CSV decode error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Record parse error: {0}")]
    Parse(String),

    #[error("Empty cohort: {0}")]
    EmptyCohort(String),

    #[error("Invalid statistics input: {0}")]
    Stats(String),

    #[error("Chart rendering failed: {0}")]
    Plot(String),
}

impl<E: std::error::Error + Send + Sync> From<plotters::drawing::DrawingAreaErrorKind<E>>
    for CourtsideError
{
    fn from(err: plotters::drawing::DrawingAreaErrorKind<E>) -> Self {
        CourtsideError::Plot(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, CourtsideError>;

/// Application configuration loaded from config.toml
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub data: DataConfig,
    pub cohorts: CohortsConfig,
    pub report: ReportConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    /// Path to the nbaallelo-format CSV file
    pub csv_path: String,
    /// Directory chart PNGs are written to
    pub chart_dir: String,
}

/// The two cohorts the report compares
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CohortsConfig {
    pub assigned: CohortConfig,
    pub yours: CohortConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CohortConfig {
    pub label: String,
    pub fran_id: String,
    pub start_year: u16,
    pub end_year: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Histogram bin count
    pub bins: usize,
    /// Confidence level for the skill-rating interval
    pub confidence_level: f64,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            data: DataConfig {
                csv_path: "data/nbaallelo.csv".to_string(),
                chart_dir: "charts".to_string(),
            },
            cohorts: CohortsConfig {
                assigned: CohortConfig {
                    label: "Assigned Team".to_string(),
                    fran_id: "Bulls".to_string(),
                    start_year: 1996,
                    end_year: 1998,
                },
                yours: CohortConfig {
                    label: "Your Team".to_string(),
                    fran_id: "Hawks".to_string(),
                    start_year: 2013,
                    end_year: 2015,
                },
            },
            report: ReportConfig {
                bins: 20,
                confidence_level: 0.95,
            },
        }
    }
}

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            CourtsideError::Config(format!("Failed to read config file {}: {}", path, e))
        })?;
        toml::from_str(&content)
            .map_err(|e| CourtsideError::Config(format!("Failed to parse config: {}", e)))
    }

    pub fn save(&self, path: &str) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| CourtsideError::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        for cohort in [&self.cohorts.assigned, &self.cohorts.yours] {
            if cohort.start_year > cohort.end_year {
                return Err(CourtsideError::Config(format!(
                    "Cohort '{}' has start year {} after end year {}",
                    cohort.label, cohort.start_year, cohort.end_year
                )));
            }
        }
        if self.report.bins == 0 {
            return Err(CourtsideError::Config("Histogram bin count must be positive".into()));
        }
        if !(0.0 < self.report.confidence_level && self.report.confidence_level < 1.0) {
            return Err(CourtsideError::Config(format!(
                "Confidence level must be in (0, 1), got {}",
                self.report.confidence_level
            )));
        }
        Ok(())
    }
}
