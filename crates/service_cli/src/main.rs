//! maxspan CLI - Exchange Risk File Operations
//!
//! This is the operational entry point for the maxspan workspace.
//!
//! # Commands
//!
//! - `maxspan contracts --span <file> --bhav <file>` - Joined contract table
//! - `maxspan portfolio --span <file> --bhav <file> --positions <file>` - Portfolio scenario risk
//! - `maxspan merge --earlier <file> --later <file>` - Snapshot merge by scenario maximum
//! - `maxspan check` - Validate and print the effective configuration
//!
//! # Architecture
//!
//! This crate is the service layer: it reads input files, hands their text
//! to `risk_engine`, and writes reports and documents back out.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;
mod config;
mod error;

pub use error::{CliError, Result};

use config::LogLevel;

/// Exchange risk-file (SPAN) and settlement (Bhav) toolkit
#[derive(Parser)]
#[command(name = "maxspan")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true, default_value = "maxspan.toml")]
    config: PathBuf,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Directory for generated files
    #[arg(long, global = true)]
    output_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load, join and list or export contracts
    Contracts {
        /// Risk-scenario (SPAN) XML file
        #[arg(long)]
        span: PathBuf,

        /// Settlement (Bhav) HTML report
        #[arg(long)]
        bhav: PathBuf,

        /// Month filter (e.g. JAN-2025, UNK)
        #[arg(short, long)]
        month: Option<String>,

        /// Instrument type filter (FUT, OPT)
        #[arg(short = 't', long = "type")]
        instrument: Option<String>,

        /// Case-insensitive search text
        #[arg(short, long)]
        search: Option<String>,

        /// CSV output file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Aggregate scenario risk for a position file
    Portfolio {
        /// Risk-scenario (SPAN) XML file
        #[arg(long)]
        span: PathBuf,

        /// Settlement (Bhav) HTML report
        #[arg(long)]
        bhav: PathBuf,

        /// Positions CSV (symbol,month,type,strike,lots[,right])
        #[arg(short, long)]
        positions: PathBuf,

        /// Number of top contributors to list
        #[arg(long)]
        top: Option<usize>,

        /// Number of scenarios to list
        #[arg(long)]
        scenarios: Option<usize>,

        /// Group positions into spreads
        #[arg(long)]
        spreads: bool,

        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Merge an earlier and a later risk file
    Merge {
        /// Merge mode (earlier-only, later-only, merge-max)
        #[arg(short, long)]
        mode: Option<String>,

        /// Earlier (beginning-of-day) risk file
        #[arg(long)]
        earlier: Option<PathBuf>,

        /// Later (intraday) risk file
        #[arg(long)]
        later: Option<PathBuf>,

        /// Output XML file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Check configuration
    Check,
}

fn init_tracing(level: LogLevel) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.as_filter_str()));
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = config::build_config(
        &cli.config,
        cli.log_level.as_deref(),
        cli.output_dir.as_deref(),
    )?;

    init_tracing(if cli.verbose {
        LogLevel::Debug
    } else {
        config.log_level
    });
    debug!(config = ?config, "Effective configuration");

    match cli.command {
        Commands::Contracts {
            span,
            bhav,
            month,
            instrument,
            search,
            output,
        } => commands::contracts::run(
            &commands::contracts::ContractsArgs {
                span: &span,
                bhav: &bhav,
                month: month.as_deref(),
                instrument: instrument.as_deref(),
                search: search.as_deref(),
                output: output.as_deref(),
            },
            &config,
        )?,
        Commands::Portfolio {
            span,
            bhav,
            positions,
            top,
            scenarios,
            spreads,
            format,
        } => commands::portfolio::run(
            &commands::portfolio::PortfolioArgs {
                span: &span,
                bhav: &bhav,
                positions: &positions,
                top,
                scenarios,
                spreads,
                format: &format,
            },
            &config,
        )?,
        Commands::Merge {
            mode,
            earlier,
            later,
            output,
        } => {
            commands::merge::run(
                &commands::merge::MergeArgs {
                    mode: mode.as_deref(),
                    earlier: earlier.as_deref(),
                    later: later.as_deref(),
                    output: output.as_deref(),
                },
                &config,
            )?;
        }
        Commands::Check => commands::check::run(&config)?,
    }
    Ok(())
}
