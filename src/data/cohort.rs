//! Cohort selection by franchise and season window
//!
//! All selection is by non-destructive copy; applying the same predicate to
//! its own output yields the same rows.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{CohortConfig, CourtsideError, GameLocation, GameRecord, Result};

/// A cohort definition: one franchise over an inclusive season window
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CohortSpec {
    pub label: String,
    pub fran_id: String,
    pub start_year: u16,
    pub end_year: u16,
}

impl CohortSpec {
    pub fn new(label: &str, fran_id: &str, start_year: u16, end_year: u16) -> Self {
        CohortSpec {
            label: label.to_string(),
            fran_id: fran_id.to_string(),
            start_year,
            end_year,
        }
    }

    pub fn matches(&self, record: &GameRecord) -> bool {
        record.fran_id == self.fran_id
            && record.year >= self.start_year
            && record.year <= self.end_year
    }
}

impl From<&CohortConfig> for CohortSpec {
    fn from(config: &CohortConfig) -> Self {
        CohortSpec::new(
            &config.label,
            &config.fran_id,
            config.start_year,
            config.end_year,
        )
    }
}

impl fmt::Display for CohortSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}, {} to {})",
            self.label, self.fran_id, self.start_year, self.end_year
        )
    }
}

/// All games within an inclusive season window, any franchise
///
/// This is the league pool the skill-rating interval is computed over.
pub fn season_window(records: &[GameRecord], start_year: u16, end_year: u16) -> Vec<GameRecord> {
    records
        .iter()
        .filter(|r| r.year >= start_year && r.year <= end_year)
        .cloned()
        .collect()
}

/// A selected cohort with its defining spec
#[derive(Debug, Clone)]
pub struct Cohort {
    pub spec: CohortSpec,
    pub games: Vec<GameRecord>,
}

impl Cohort {
    /// Select a cohort from loaded records; empty cohorts are an error
    pub fn select(records: &[GameRecord], spec: CohortSpec) -> Result<Self> {
        let games: Vec<GameRecord> = records.iter().filter(|r| spec.matches(r)).cloned().collect();
        if games.is_empty() {
            return Err(CourtsideError::EmptyCohort(spec.to_string()));
        }
        Ok(Cohort { spec, games })
    }

    pub fn len(&self) -> usize {
        self.games.len()
    }

    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }

    /// Points scored, one entry per game
    pub fn points(&self) -> Vec<f64> {
        self.games.iter().map(|g| g.pts as f64).collect()
    }

    /// Season years, aligned with `points` for the trend scatterplot
    pub fn seasons(&self) -> Vec<f64> {
        self.games.iter().map(|g| g.year as f64).collect()
    }

    /// Post-game Elo ratings, one entry per game
    pub fn skill_ratings(&self) -> Vec<f64> {
        self.games.iter().map(|g| g.elo_n).collect()
    }

    /// Games at a given location
    pub fn at_location(&self, location: GameLocation) -> Vec<&GameRecord> {
        self.games.iter().filter(|g| g.location == location).collect()
    }

    /// Points scored at a given location
    pub fn points_at(&self, location: GameLocation) -> Vec<f64> {
        self.games
            .iter()
            .filter(|g| g.location == location)
            .map(|g| g.pts as f64)
            .collect()
    }

    pub fn wins(&self) -> usize {
        self.games.iter().filter(|g| g.won()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GameResult;

    fn make_game(fran: &str, year: u16, pts: u32, location: GameLocation) -> GameRecord {
        GameRecord {
            game_id: format!("{}{}", year, fran),
            year,
            fran_id: fran.to_string(),
            pts,
            opp_pts: 90,
            elo_n: 1500.0 + pts as f64,
            opp_elo_n: 1500.0,
            location,
            result: if pts > 90 { GameResult::Win } else { GameResult::Loss },
        }
    }

    fn sample_records() -> Vec<GameRecord> {
        vec![
            make_game("Hawks", 2013, 100, GameLocation::Home),
            make_game("Hawks", 2014, 95, GameLocation::Away),
            make_game("Hawks", 2016, 88, GameLocation::Home),
            make_game("Bulls", 2014, 103, GameLocation::Home),
            make_game("Bulls", 1997, 107, GameLocation::Away),
        ]
    }

    #[test]
    fn test_select_by_franchise_and_window() {
        let records = sample_records();
        let spec = CohortSpec::new("Your Team", "Hawks", 2013, 2015);
        let cohort = Cohort::select(&records, spec).unwrap();
        assert_eq!(cohort.len(), 2);
        assert!(cohort.games.iter().all(|g| g.fran_id == "Hawks"));
        assert!(cohort.games.iter().all(|g| (2013..=2015).contains(&g.year)));
    }

    #[test]
    fn test_selection_is_idempotent() {
        let records = sample_records();
        let spec = CohortSpec::new("Your Team", "Hawks", 2013, 2015);
        let once = Cohort::select(&records, spec.clone()).unwrap();
        let twice = Cohort::select(&once.games, spec).unwrap();
        assert_eq!(once.len(), twice.len());
        assert_eq!(once.games, twice.games);
    }

    #[test]
    fn test_empty_cohort_is_an_error() {
        let records = sample_records();
        let spec = CohortSpec::new("Nobody", "Sonics", 2013, 2015);
        let err = Cohort::select(&records, spec).unwrap_err();
        assert!(matches!(err, CourtsideError::EmptyCohort(_)));
    }

    #[test]
    fn test_season_window_pools_all_franchises() {
        let records = sample_records();
        let window = season_window(&records, 2013, 2015);
        assert_eq!(window.len(), 3);
        assert!(window.iter().any(|g| g.fran_id == "Bulls"));

        // Re-applying the window changes nothing
        let again = season_window(&window, 2013, 2015);
        assert_eq!(window, again);
    }

    #[test]
    fn test_location_split() {
        let records = sample_records();
        let spec = CohortSpec::new("Your Team", "Hawks", 2013, 2015);
        let cohort = Cohort::select(&records, spec).unwrap();
        assert_eq!(cohort.points_at(GameLocation::Home), vec![100.0]);
        assert_eq!(cohort.points_at(GameLocation::Away), vec![95.0]);
        assert!(cohort.at_location(GameLocation::Neutral).is_empty());
    }

    #[test]
    fn test_column_projections_align() {
        let records = sample_records();
        let spec = CohortSpec::new("Your Team", "Hawks", 2013, 2015);
        let cohort = Cohort::select(&records, spec).unwrap();
        assert_eq!(cohort.points().len(), cohort.seasons().len());
        assert_eq!(cohort.points().len(), cohort.skill_ratings().len());
        assert_eq!(cohort.points(), vec![100.0, 95.0]);
        assert_eq!(cohort.seasons(), vec![2013.0, 2014.0]);
    }
}
