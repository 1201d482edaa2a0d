//! The full analysis report
//!
//! Reproduces the analyst workflow end to end: cohort previews, distribution
//! charts, home/away descriptive statistics, and skill-rating inference for
//! each season window. Statistics always print; chart rendering is optional.

use std::path::{Path, PathBuf};

use log::info;

use crate::data::cohort::{season_window, Cohort, CohortSpec};
use crate::stats::descriptive::Summary;
use crate::stats::inference::{interval_from_summary, tail_probabilities, ConfidenceInterval};
use crate::stats::regression::LinearFit;
use crate::vis::{self, PlotSettings};
use crate::{Config, GameLocation, GameRecord, Result};

/// Skill-rating inference for one cohort against its league pool
#[derive(Debug, Clone)]
pub struct SkillInference {
    /// Summary of post-game Elo across every game in the season window
    pub pool: Summary,
    /// Confidence interval for the pool mean
    pub interval: ConfidenceInterval,
    /// Mean post-game Elo of the cohort itself
    pub cohort_mean: f64,
    /// Probability a pool draw lands above the cohort mean
    pub prob_above: f64,
    /// Probability a pool draw lands below the cohort mean
    pub prob_below: f64,
}

/// Compute skill-rating inference for a cohort within its window
///
/// The pool is every game in the window regardless of franchise; the tail
/// probabilities evaluate the cohort's mean rating against the pool
/// distribution.
pub fn skill_inference(
    window: &[GameRecord],
    cohort: &Cohort,
    level: f64,
) -> Result<SkillInference> {
    let pool_ratings: Vec<f64> = window.iter().map(|g| g.elo_n).collect();
    let pool = Summary::from_slice(&pool_ratings)?;
    let interval = interval_from_summary(&pool, level)?;

    let cohort_ratings = cohort.skill_ratings();
    let cohort_mean = cohort_ratings.iter().sum::<f64>() / cohort_ratings.len() as f64;
    let (prob_above, prob_below) = tail_probabilities(pool.mean, pool.std_dev, cohort_mean)?;

    Ok(SkillInference {
        pool,
        interval,
        cohort_mean,
        prob_above,
        prob_below,
    })
}

/// Descriptive summary of a cohort's points at one location
pub fn location_summary(cohort: &Cohort, location: GameLocation) -> Result<Summary> {
    Summary::from_slice(&cohort.points_at(location))
}

fn print_rule(width: usize) {
    println!("{}", "-".repeat(width));
}

/// First five observations plus the row count, as the data preparation steps
/// show
fn print_cohort_preview(cohort: &Cohort) {
    println!("{}", cohort.spec);
    print_rule(72);
    println!(
        "{:<14} {:>5} {:<10} {:>4} {:>8} {:>9} {:>11} {:>4} {:>3}",
        "game_id", "year", "fran_id", "pts", "opp_pts", "elo_n", "opp_elo_n", "loc", "res"
    );
    for game in cohort.games.iter().take(5) {
        println!(
            "{:<14} {:>5} {:<10} {:>4} {:>8} {:>9.2} {:>11.2} {:>4} {:>3}",
            game.game_id,
            game.year,
            game.fran_id,
            game.pts,
            game.opp_pts,
            game.elo_n,
            game.opp_elo_n,
            game.location.code(),
            game.result.code()
        );
    }
    println!("printed only the first five observations...");
    println!("Number of rows in the data set = {}", cohort.len());
    println!();
}

/// Labeled mean/median/variance/standard deviation block
pub fn print_summary_block(heading: &str, summary: &Summary) {
    println!("{}", heading);
    print_rule(heading.len());
    println!("Mean = {:.2}", summary.mean);
    println!("Median = {:.2}", summary.median);
    println!("Variance = {:.2}", summary.variance);
    println!("Standard Deviation = {:.2}", summary.std_dev);
    println!();
}

/// Interval and tail-probability block for one window
pub fn print_skill_block(spec: &CohortSpec, inference: &SkillInference, level: f64) {
    let pct = level * 100.0;
    let heading = format!(
        "Confidence Interval for Average Relative Skill in the years {} to {}",
        spec.start_year, spec.end_year
    );
    println!("{}", heading);
    print_rule(heading.len());
    println!(
        "{:.0}% confidence interval (unrounded) for Average Relative Skill (ELO) = ({}, {})",
        pct, inference.interval.lower, inference.interval.upper
    );
    println!(
        "{:.0}% confidence interval (rounded) for Average Relative Skill (ELO) = ({:.2}, {:.2})",
        pct, inference.interval.lower, inference.interval.upper
    );
    println!();

    let heading = format!(
        "Probability a team has Average Relative Skill LESS than {} ({} to {})",
        spec.fran_id, spec.start_year, spec.end_year
    );
    println!("{}", heading);
    print_rule(heading.len());
    println!("Which of the two choices is correct?");
    println!("Choice 1 = {:.4}", inference.prob_above);
    println!("Choice 2 = {:.4}", inference.prob_below);
    println!();
}

fn chart_path(dir: &Path, name: &str) -> PathBuf {
    dir.join(format!("{}.png", name))
}

fn render_cohort_charts(cohort: &Cohort, bins: usize, dir: &Path) -> Result<()> {
    let slug = cohort.spec.fran_id.to_lowercase();
    let window = format!("{} to {}", cohort.spec.start_year, cohort.spec.end_year);

    let settings = PlotSettings::titled(
        &format!("Points scored by the {} in {}", cohort.spec.fran_id, window),
        "Points",
        "Frequency",
    );
    let path = chart_path(dir, &format!("{}_points_hist", slug));
    vis::histogram_png(&cohort.points(), bins, &path, &settings)?;
    info!("Wrote {}", path.display());

    let fit = LinearFit::fit(&cohort.seasons(), &cohort.points())?;
    let settings = PlotSettings::titled(
        &format!("Points per season for the {} in {}", cohort.spec.fran_id, window),
        "Season",
        "Points",
    );
    let path = chart_path(dir, &format!("{}_points_trend", slug));
    vis::scatter_with_trend_png(&cohort.seasons(), &cohort.points(), &fit, &path, &settings)?;
    info!("Wrote {}", path.display());

    Ok(())
}

fn render_comparison_charts(
    assigned: &Cohort,
    yours: &Cohort,
    bins: usize,
    dir: &Path,
) -> Result<()> {
    let groups = vec![
        (assigned.spec.fran_id.clone(), assigned.points()),
        (yours.spec.fran_id.clone(), yours.points()),
    ];

    let settings = PlotSettings::titled("Boxplot to compare points distribution", "", "Points");
    let path = chart_path(dir, "points_boxplot");
    vis::boxplot_png(&groups, &path, &settings)?;
    info!("Wrote {}", path.display());

    let series = vec![
        (assigned.spec.label.clone(), assigned.points()),
        (yours.spec.label.clone(), yours.points()),
    ];
    let settings =
        PlotSettings::titled("Histogram to compare points distribution", "Points", "Frequency");
    let path = chart_path(dir, "points_hist_compare");
    vis::overlay_histograms_png(&series, bins, &path, &settings)?;
    info!("Wrote {}", path.display());

    Ok(())
}

/// Run the full report over loaded records
pub fn run(config: &Config, records: &[GameRecord], charts: bool) -> Result<()> {
    config.validate()?;
    let level = config.report.confidence_level;
    let bins = config.report.bins;

    let assigned_spec = CohortSpec::from(&config.cohorts.assigned);
    let yours_spec = CohortSpec::from(&config.cohorts.yours);

    let assigned_window =
        season_window(records, assigned_spec.start_year, assigned_spec.end_year);
    let yours_window = season_window(records, yours_spec.start_year, yours_spec.end_year);

    let assigned = Cohort::select(&assigned_window, assigned_spec)?;
    let yours = Cohort::select(&yours_window, yours_spec)?;

    // Data preparation previews
    print_cohort_preview(&assigned);
    print_cohort_preview(&yours);

    // Distribution charts
    if charts {
        let dir = Path::new(&config.data.chart_dir);
        std::fs::create_dir_all(dir)?;
        render_cohort_charts(&yours, bins, dir)?;
        render_cohort_charts(&assigned, bins, dir)?;
        render_comparison_charts(&assigned, &yours, bins, dir)?;
    } else {
        info!("Chart rendering skipped");
    }

    // Home/away descriptive statistics for your team
    let window_label = format!("({} to {})", yours.spec.start_year, yours.spec.end_year);
    let home = location_summary(&yours, GameLocation::Home)?;
    print_summary_block(
        &format!("Points Scored by {} in Home Games {}", yours.spec.label, window_label),
        &home,
    );
    let away = location_summary(&yours, GameLocation::Away)?;
    print_summary_block(
        &format!("Points Scored by {} in Away Games {}", yours.spec.label, window_label),
        &away,
    );

    // Skill-rating inference per window
    let yours_inference = skill_inference(&yours_window, &yours, level)?;
    print_skill_block(&yours.spec, &yours_inference, level);

    let assigned_inference = skill_inference(&assigned_window, &assigned, level)?;
    print_skill_block(&assigned.spec, &assigned_inference, level);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GameResult;

    fn make_game(fran: &str, year: u16, pts: u32, elo: f64, location: GameLocation) -> GameRecord {
        GameRecord {
            game_id: format!("{}{}{}", year, fran, pts),
            year,
            fran_id: fran.to_string(),
            pts,
            opp_pts: 95,
            elo_n: elo,
            opp_elo_n: 1500.0,
            location,
            result: if pts > 95 { GameResult::Win } else { GameResult::Loss },
        }
    }

    fn window_records() -> Vec<GameRecord> {
        let mut records = Vec::new();
        for (i, pts) in [98u32, 104, 91, 110, 102, 96].iter().enumerate() {
            let location = if i % 2 == 0 { GameLocation::Home } else { GameLocation::Away };
            records.push(make_game("Hawks", 2013 + (i % 3) as u16, *pts, 1520.0 + i as f64, location));
        }
        for i in 0..6 {
            records.push(make_game(
                "Bulls",
                2013 + (i % 3) as u16,
                100 + i as u32,
                1480.0 + i as f64,
                GameLocation::Home,
            ));
        }
        records
    }

    #[test]
    fn test_skill_inference_tails_sum_to_one() {
        let records = window_records();
        let window = season_window(&records, 2013, 2015);
        let cohort =
            Cohort::select(&window, CohortSpec::new("Your Team", "Hawks", 2013, 2015)).unwrap();
        let inference = skill_inference(&window, &cohort, 0.95).unwrap();
        assert!((inference.prob_above + inference.prob_below - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_skill_inference_interval_centered_on_pool_mean() {
        let records = window_records();
        let window = season_window(&records, 2013, 2015);
        let cohort =
            Cohort::select(&window, CohortSpec::new("Your Team", "Hawks", 2013, 2015)).unwrap();
        let inference = skill_inference(&window, &cohort, 0.95).unwrap();
        assert!((inference.interval.midpoint() - inference.pool.mean).abs() < 1e-6);
        assert!(inference.interval.lower < inference.pool.mean);
        assert!(inference.pool.mean < inference.interval.upper);
    }

    #[test]
    fn test_cohort_above_pool_mean_has_larger_below_probability() {
        let records = window_records();
        let window = season_window(&records, 2013, 2015);
        let cohort =
            Cohort::select(&window, CohortSpec::new("Your Team", "Hawks", 2013, 2015)).unwrap();
        let inference = skill_inference(&window, &cohort, 0.95).unwrap();
        // Hawks ratings sit above the pooled mean in this fixture
        assert!(inference.cohort_mean > inference.pool.mean);
        assert!(inference.prob_below > inference.prob_above);
    }

    #[test]
    fn test_location_summary_splits_home_and_away() {
        let records = window_records();
        let window = season_window(&records, 2013, 2015);
        let cohort =
            Cohort::select(&window, CohortSpec::new("Your Team", "Hawks", 2013, 2015)).unwrap();
        let home = location_summary(&cohort, GameLocation::Home).unwrap();
        let away = location_summary(&cohort, GameLocation::Away).unwrap();
        assert_eq!(home.count, 3);
        assert_eq!(away.count, 3);
        // Home points fixture: 98, 91, 102
        assert!((home.mean - 97.0).abs() < 1e-9);
        // Away points fixture: 104, 110, 96
        assert!((away.mean - (310.0 / 3.0)).abs() < 1e-9);
    }

    #[test]
    fn test_full_report_runs_without_charts() {
        let mut config = Config::default();
        config.cohorts.assigned.start_year = 2013;
        config.cohorts.assigned.end_year = 2015;
        let records = window_records();
        run(&config, &records, false).unwrap();
    }
}
