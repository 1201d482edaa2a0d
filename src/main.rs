//! Courtside CLI
//!
//! Descriptive statistics and skill-rating analysis over the historical NBA
//! Elo dataset.

use clap::{Parser, Subcommand};
use courtside::{Config, GameLocation, Result};

#[derive(Parser)]
#[command(name = "courtside")]
#[command(about = "Descriptive analytics for historical NBA game records", long_about = None)]
struct Cli {
    /// Config file path
    #[arg(short, long, default_value = "config.toml")]
    config: String,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a default config file and the chart directory
    Init,
    /// Show dataset row counts before and after filtering
    Status,
    /// Run the full analysis report for the configured cohorts
    Report {
        /// Skip chart rendering, print statistics only
        #[arg(long)]
        no_charts: bool,
    },
    /// Descriptive statistics for an ad-hoc cohort
    Summary {
        /// Franchise id (e.g. Hawks)
        #[arg(long)]
        team: String,
        /// First season year, inclusive
        #[arg(long)]
        from: u16,
        /// Last season year, inclusive
        #[arg(long)]
        to: u16,
        /// Restrict to home or away games
        #[arg(long)]
        location: Option<LocationArg>,
    },
    /// Skill-rating confidence interval for a season window
    Interval {
        /// First season year, inclusive
        #[arg(long)]
        from: u16,
        /// Last season year, inclusive
        #[arg(long)]
        to: u16,
        /// Also report tail probabilities for this franchise's mean rating
        #[arg(long)]
        team: Option<String>,
    },
}

#[derive(Clone, Debug)]
enum LocationArg {
    Home,
    Away,
}

impl From<&LocationArg> for GameLocation {
    fn from(arg: &LocationArg) -> Self {
        match arg {
            LocationArg::Home => GameLocation::Home,
            LocationArg::Away => GameLocation::Away,
        }
    }
}

impl std::str::FromStr for LocationArg {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "home" | "h" => Ok(LocationArg::Home),
            "away" | "a" => Ok(LocationArg::Away),
            _ => Err(format!("Unknown location: {}. Use home or away.", s)),
        }
    }
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
        .format_timestamp(None)
        .init();

    // Load or create config
    let config = if std::path::Path::new(&cli.config).exists() {
        match Config::load(&cli.config) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Error loading config: {}", e);
                std::process::exit(1);
            }
        }
    } else {
        Config::default()
    };

    let result = match cli.command {
        Commands::Init => commands::init(&cli.config),
        Commands::Status => commands::status(&config),
        Commands::Report { no_charts } => commands::report(&config, !no_charts),
        Commands::Summary {
            team,
            from,
            to,
            location,
        } => commands::summary(&config, &team, from, to, location.as_ref()),
        Commands::Interval { from, to, team } => {
            commands::interval(&config, from, to, team.as_deref())
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

mod commands {
    use super::*;
    use courtside::data::cohort::{season_window, Cohort, CohortSpec};
    use courtside::data::loader::load_games;
    use courtside::report;
    use courtside::stats::descriptive::Summary;

    pub fn init(config_path: &str) -> Result<()> {
        let config = Config::default();
        config.save(config_path)?;
        println!("Created default config at {}", config_path);

        std::fs::create_dir_all(&config.data.chart_dir)?;
        println!("Created {}/ directory", config.data.chart_dir);

        println!("\nNext steps:");
        println!("  1. Edit {} to point at your nbaallelo.csv copy", config_path);
        println!("  2. Run 'courtside status' to check the dataset");
        println!("  3. Run 'courtside report' for the full analysis");
        Ok(())
    }

    pub fn status(config: &Config) -> Result<()> {
        let (records, stats) = load_games(&config.data.csv_path)?;

        println!("Dataset: {}", config.data.csv_path);
        println!("  Rows read:            {}", stats.total_rows);
        println!("  Non-NBA rows dropped: {}", stats.non_nba);
        println!("  Playoff rows dropped: {}", stats.playoffs);
        println!("  Regular-season kept:  {}", stats.kept);
        println!();

        for cohort_config in [&config.cohorts.assigned, &config.cohorts.yours] {
            let spec = CohortSpec::from(cohort_config);
            match Cohort::select(&records, spec.clone()) {
                Ok(cohort) => println!(
                    "  {}: {} games, {} wins",
                    spec,
                    cohort.len(),
                    cohort.wins()
                ),
                Err(_) => println!("  {}: no games found", spec),
            }
        }
        Ok(())
    }

    pub fn report(config: &Config, charts: bool) -> Result<()> {
        let (records, _) = load_games(&config.data.csv_path)?;
        report::run(config, &records, charts)
    }

    pub fn summary(
        config: &Config,
        team: &str,
        from: u16,
        to: u16,
        location: Option<&LocationArg>,
    ) -> Result<()> {
        let (records, _) = load_games(&config.data.csv_path)?;
        let spec = CohortSpec::new(team, team, from, to);
        let cohort = Cohort::select(&records, spec)?;

        let (points, scope) = match location {
            Some(arg) => {
                let loc = GameLocation::from(arg);
                (cohort.points_at(loc), format!("{} Games", loc))
            }
            None => (cohort.points(), "All Games".to_string()),
        };

        let summary = Summary::from_slice(&points)?;
        report::print_summary_block(
            &format!("Points Scored by {} in {} ({} to {})", team, scope, from, to),
            &summary,
        );
        println!("Observations = {}", summary.count);
        Ok(())
    }

    pub fn interval(config: &Config, from: u16, to: u16, team: Option<&str>) -> Result<()> {
        let (records, _) = load_games(&config.data.csv_path)?;
        let window = season_window(&records, from, to);
        let level = config.report.confidence_level;

        match team {
            Some(team) => {
                let spec = CohortSpec::new(team, team, from, to);
                let cohort = Cohort::select(&window, spec)?;
                let inference = report::skill_inference(&window, &cohort, level)?;
                report::print_skill_block(&cohort.spec, &inference, level);
            }
            None => {
                let ratings: Vec<f64> = window.iter().map(|g| g.elo_n).collect();
                let summary = Summary::from_slice(&ratings)?;
                let ci = courtside::stats::inference::interval_from_summary(&summary, level)?;
                println!(
                    "Average Relative Skill (ELO) in the years {} to {}",
                    from, to
                );
                println!("Mean = {:.2} over {} games", summary.mean, summary.count);
                println!(
                    "{:.0}% confidence interval = ({:.2}, {:.2})",
                    level * 100.0,
                    ci.lower,
                    ci.upper
                );
            }
        }
        Ok(())
    }
}
