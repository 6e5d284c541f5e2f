mod commands;

use chrono::NaiveDateTime;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use wellness_core::{AppConfig, ConfigError};

#[derive(Debug, Parser)]
#[command(name = "wellness-cli")]
#[command(about = "Kiambu County healthcare facility directory")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List facilities, nearest first.
    List {
        /// Match against name, address, or services (case-insensitive).
        #[arg(long)]
        search: Option<String>,
        /// Facility type, or "All".
        #[arg(long, default_value = "All")]
        category: String,
        /// Only emergency-capable facilities.
        #[arg(long)]
        emergency: bool,
        #[command(flatten)]
        location: LocationArgs,
    },
    /// Show the facilities closest to a point.
    Nearest {
        #[command(flatten)]
        location: LocationArgs,
        /// Defaults to `WELLNESS_NEAREST_LIMIT`.
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Show one facility in detail.
    Show {
        id: String,
        #[command(flatten)]
        location: LocationArgs,
    },
    /// Open/closed status for a facility.
    Hours {
        id: String,
        /// Local time to evaluate, `YYYY-MM-DDTHH:MM[:SS]`. Defaults to now.
        #[arg(long, value_parser = parse_instant)]
        at: Option<NaiveDateTime>,
    },
    /// Facility counts by type.
    Categories,
}

/// Viewer position. When omitted, the configured fallback point is used.
#[derive(Debug, Clone, Copy, Default, Args)]
struct LocationArgs {
    #[arg(long, allow_negative_numbers = true, requires = "lng")]
    lat: Option<f64>,
    #[arg(long, allow_negative_numbers = true, requires = "lat")]
    lng: Option<f64>,
}

fn parse_instant(raw: &str) -> Result<NaiveDateTime, String> {
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M"))
        .map_err(|e| format!("expected YYYY-MM-DDTHH:MM: {e}"))
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    run(cli, wellness_core::load_app_config)
}

fn init_tracing(log_level: &str) -> anyhow::Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(log_level))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

/// Configuration is loaded only once a command is known, so a bad
/// environment never blocks `--help` or the bare invocation.
fn run(
    cli: Cli,
    load_config: impl FnOnce() -> Result<AppConfig, ConfigError>,
) -> anyhow::Result<()> {
    let Some(command) = cli.command else {
        println!("wellness-cli: no command given (try --help)");
        return Ok(());
    };

    let config = load_config()?;
    init_tracing(&config.log_level)?;

    let directory = wellness_core::load_facilities(&config.facilities_path)?;
    tracing::debug!(
        count = directory.len(),
        path = %config.facilities_path.display(),
        "loaded facilities"
    );

    match command {
        Commands::List {
            search,
            category,
            emergency,
            location,
        } => commands::run_list(
            &directory,
            &config,
            search,
            &category,
            emergency,
            location,
        )?,
        Commands::Nearest { location, limit } => {
            commands::run_nearest(&directory, &config, location, limit)?;
        }
        Commands::Show { id, location } => commands::run_show(&directory, &config, &id, location)?,
        Commands::Hours { id, at } => commands::run_hours(&directory, &id, at)?,
        Commands::Categories => commands::run_categories(&directory),
    }

    Ok(())
}
