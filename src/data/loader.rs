//! CSV loading for the nbaallelo dataset
//!
//! The source file carries one row per team per game with league, playoff,
//! score, and Elo columns. Only regular-season NBA rows are kept.

use std::io::Read;
use std::path::Path;

use log::{debug, info};
use serde::Deserialize;

use crate::{CourtsideError, GameLocation, GameRecord, GameResult, Result};

/// Raw CSV row, keyed by the dataset's column headers
///
/// The file has more columns than this (gameorder, date_game, forecast, ...);
/// serde ignores the ones not named here.
#[derive(Debug, Deserialize)]
struct RawRow {
    lg_id: String,
    is_playoffs: u8,
    game_id: String,
    year_id: u16,
    fran_id: String,
    pts: u32,
    opp_pts: u32,
    elo_n: f64,
    opp_elo_n: f64,
    game_location: String,
    game_result: String,
}

/// Row counts from a load, for the `status` command
#[derive(Debug, Clone, Copy, Default)]
pub struct LoadStats {
    /// Rows read from the file
    pub total_rows: usize,
    /// Rows dropped because they were not NBA games
    pub non_nba: usize,
    /// Rows dropped because they were playoff games
    pub playoffs: usize,
    /// Rows kept
    pub kept: usize,
}

/// Load regular-season NBA game records from a CSV file
pub fn load_games<P: AsRef<Path>>(path: P) -> Result<(Vec<GameRecord>, LoadStats)> {
    let path = path.as_ref();
    info!("Loading game records from {}", path.display());
    let file = std::fs::File::open(path)?;
    let result = load_from_reader(file);
    if let Ok((records, stats)) = &result {
        debug!(
            "Loaded {} of {} rows ({} non-NBA, {} playoff rows dropped)",
            records.len(),
            stats.total_rows,
            stats.non_nba,
            stats.playoffs
        );
    }
    result
}

/// Load from any reader; `load_games` wraps this with a file
pub fn load_from_reader<R: Read>(reader: R) -> Result<(Vec<GameRecord>, LoadStats)> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut records = Vec::new();
    let mut stats = LoadStats::default();

    for row in csv_reader.deserialize::<RawRow>() {
        let row = row?;
        stats.total_rows += 1;

        if row.lg_id != "NBA" {
            stats.non_nba += 1;
            continue;
        }
        if row.is_playoffs != 0 {
            stats.playoffs += 1;
            continue;
        }

        records.push(convert_row(row)?);
        stats.kept += 1;
    }

    Ok((records, stats))
}

fn convert_row(row: RawRow) -> Result<GameRecord> {
    let location = GameLocation::from_code(&row.game_location).ok_or_else(|| {
        CourtsideError::Parse(format!(
            "Unknown game location '{}' in game {}",
            row.game_location, row.game_id
        ))
    })?;
    let result = GameResult::from_code(&row.game_result).ok_or_else(|| {
        CourtsideError::Parse(format!(
            "Unknown game result '{}' in game {}",
            row.game_result, row.game_id
        ))
    })?;

    Ok(GameRecord {
        game_id: row.game_id,
        year: row.year_id,
        fran_id: row.fran_id,
        pts: row.pts,
        opp_pts: row.opp_pts,
        elo_n: row.elo_n,
        opp_elo_n: row.opp_elo_n,
        location,
        result,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "gameorder,game_id,lg_id,year_id,is_playoffs,fran_id,pts,opp_pts,elo_n,opp_elo_n,game_location,game_result";

    fn load(csv_text: &str) -> Result<(Vec<GameRecord>, LoadStats)> {
        load_from_reader(csv_text.as_bytes())
    }

    #[test]
    fn test_load_keeps_regular_season_nba() {
        let text = format!(
            "{}\n\
             1,199611010CHI,NBA,1997,0,Bulls,107,80,1700.5,1500.2,H,W\n\
             2,199611010CHI,NBA,1997,1,Bulls,90,95,1690.0,1510.0,H,L\n\
             3,197611010DNR,ABA,1976,0,Nuggets,110,100,1600.0,1550.0,A,W\n",
            HEADER
        );
        let (records, stats) = load(&text).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(stats.total_rows, 3);
        assert_eq!(stats.playoffs, 1);
        assert_eq!(stats.non_nba, 1);
        assert_eq!(stats.kept, 1);

        let record = &records[0];
        assert_eq!(record.fran_id, "Bulls");
        assert_eq!(record.year, 1997);
        assert_eq!(record.pts, 107);
        assert_eq!(record.location, GameLocation::Home);
        assert_eq!(record.result, GameResult::Win);
    }

    #[test]
    fn test_load_rejects_bad_location() {
        let text = format!(
            "{}\n1,199611010CHI,NBA,1997,0,Bulls,107,80,1700.5,1500.2,Q,W\n",
            HEADER
        );
        let err = load(&text).unwrap_err();
        assert!(matches!(err, CourtsideError::Parse(_)));
    }

    #[test]
    fn test_load_is_deterministic() {
        let text = format!(
            "{}\n\
             1,201311010ATL,NBA,2014,0,Hawks,102,95,1550.0,1500.0,H,W\n\
             2,201311020ATL,NBA,2014,0,Hawks,88,101,1540.0,1520.0,A,L\n",
            HEADER
        );
        let (first, _) = load(&text).unwrap();
        let (second, _) = load(&text).unwrap();
        assert_eq!(first, second);
    }
}
