use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use roommate_algo::config::{LoggingSettings, Settings};
use roommate_algo::core::{
    build_preferences, run, score_matching, IrvingSolver, ParticipantRegistry,
};
use roommate_algo::models::RunSummary;
use roommate_algo::services::{read_matching, write_matching, SurveyReader};
use std::path::PathBuf;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

/// Stable roommate assignment from partial survey wishes
#[derive(Parser, Debug)]
#[command(name = "roommate-algo")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Configuration file (defaults to config/default + config/local + env)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Drop survey rows with repeated wishes instead of aborting
    #[arg(long, global = true)]
    lenient: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Complete preferences, solve, score and write the matching
    Run {
        /// Survey CSV export
        #[arg(long)]
        survey: Option<PathBuf>,

        /// Where to write the matching
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Print the completed preference lists as JSON
    Preferences {
        #[arg(long)]
        survey: Option<PathBuf>,
    },

    /// Score a previously written matching against the survey wishes
    Score {
        #[arg(long)]
        matching: Option<PathBuf>,

        #[arg(long)]
        survey: Option<PathBuf>,
    },
}

fn init_logging(logging: &LoggingSettings) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&logging.level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    if logging.format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.compact().init();
    }
}

fn load_registry(
    settings: &Settings,
    survey: Option<PathBuf>,
    lenient: bool,
) -> Result<ParticipantRegistry> {
    let path = survey.unwrap_or_else(|| PathBuf::from(&settings.survey.path));
    let rows = SurveyReader::new(settings.survey.clone())
        .read_path(&path)
        .with_context(|| format!("Failed to read survey {}", path.display()))?;

    if !lenient {
        return ParticipantRegistry::from_rows(rows).context("Invalid survey answers");
    }

    let (registry, rejected) =
        ParticipantRegistry::from_rows_lenient(rows).context("Invalid survey answers")?;
    if !rejected.is_empty() {
        warn!("Dropped {} survey rows with repeated wishes", rejected.len());
    }
    Ok(registry)
}

fn main() -> Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    let cli = Cli::parse();

    let settings = match &cli.config {
        Some(path) => Settings::load_from(path),
        None => Settings::load(),
    }
    .context("Failed to load configuration")?;

    init_logging(&settings.logging);

    match cli.command {
        Command::Run { survey, output } => {
            let registry = load_registry(&settings, survey, cli.lenient)?;
            let report = match run(&registry, &IrvingSolver) {
                Ok(report) => report,
                Err(e) => {
                    error!("Matching failed: {}", e);
                    return Err(e.into());
                }
            };

            let output =
                output.unwrap_or_else(|| PathBuf::from(&settings.matching.output_path));
            write_matching(&output, &report.matching)?;

            let summary = RunSummary {
                participants: registry.len(),
                opted_in: report.opted_in,
                pairs: report.matching.len(),
                satisfied: report.score,
                output: output.display().to_string(),
            };
            info!("Run complete: {:?}", summary);
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }

        Command::Preferences { survey } => {
            let registry = load_registry(&settings, survey, cli.lenient)?;
            let preferences = build_preferences(&registry);
            println!("{}", serde_json::to_string_pretty(&preferences.complete)?);
        }

        Command::Score { matching, survey } => {
            let registry = load_registry(&settings, survey, cli.lenient)?;
            let path =
                matching.unwrap_or_else(|| PathBuf::from(&settings.matching.output_path));
            let matching = read_matching(&path)
                .with_context(|| format!("Failed to read matching {}", path.display()))?;

            let preferences = build_preferences(&registry);
            let score = score_matching(&preferences.initial, &matching);
            println!("{} / {}", score, preferences.initial.len());
        }
    }

    Ok(())
}
