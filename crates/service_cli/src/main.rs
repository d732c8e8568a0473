//! Synth CLI - synthetic shocked price datasets from the command line.
//!
//! # Commands
//!
//! - `synth generate [--seed N] [--output FILE] [--no-dates]` - Write a dataset as CSV
//! - `synth check` - Validate the configuration and print the asset table
//!
//! Logs go to stderr so that CSV written to stdout stays clean.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use service_cli::commands::{self, generate::GenerateOptions};
use service_cli::config::ScenarioConfig;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Synthetic multi-asset price generator
#[derive(Parser)]
#[command(name = "synth")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path (defaults are used if it does not exist)
    #[arg(short, long, global = true, default_value = "synth.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Simulate the configured scenario and write it as CSV
    Generate {
        /// Seed for reproducible output
        #[arg(short, long)]
        seed: Option<u64>,

        /// Output file; stdout when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Omit the date column
        #[arg(long)]
        no_dates: bool,

        /// First date of the date column (YYYY-MM-DD)
        #[arg(long, conflicts_with = "no_dates")]
        start_date: Option<String>,
    },

    /// Validate the configuration and print the asset table
    Check,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = ScenarioConfig::load_or_default(&cli.config)?;

    let directive = if cli.verbose {
        "debug".to_string()
    } else {
        std::env::var("SYNTH_LOG_LEVEL")
            .unwrap_or_else(|_| config.log_level.clone())
            .to_lowercase()
    };

    // Initialise tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(directive.as_str())),
        )
        .init();

    // Must follow subscriber init: overrides warn on unparsable values.
    let config = config.with_env_override();

    if cli.verbose {
        info!("Verbose mode enabled");
    }
    info!("Configuration: {}", cli.config.display());

    match cli.command {
        Commands::Generate {
            seed,
            output,
            no_dates,
            start_date,
        } => commands::generate::run(
            &config,
            &GenerateOptions {
                seed,
                output,
                no_dates,
                start_date,
            },
        )?,
        Commands::Check => commands::check::run(&config)?,
    }

    Ok(())
}
