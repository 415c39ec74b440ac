//! Lien Survival CLI
//!
//! Command-line interface for chain-of-title and lien survival analysis

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use lien_survival::equity::{calculate_maximum_bid, BidParameters, DEFAULT_DESIRED_MARGIN};
use lien_survival::records::{load_instruments, parse_date};
use lien_survival::runner::load_property;
use lien_survival::{AnalysisConfig, ChainOfTitleBuilder, PropertyAnalyzer};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "lien-survival", version, about = "Title chain and lien survival analysis")]
struct Cli {
    /// Evaluate statutes and MRTA as of this date (YYYY-MM-DD); defaults to today
    #[arg(long, global = true)]
    as_of: Option<String>,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pretty: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Build a chain of title from a JSON or CSV instrument export
    Chain { file: PathBuf },

    /// Run the full survival analysis on a JSON property record
    Analyze {
        file: PathBuf,

        /// Monthly HOA assessment for the safe-harbor estimate
        #[arg(long)]
        hoa_dues: Option<f64>,

        #[arg(long, default_value_t = 0.0)]
        auction_costs: f64,

        #[arg(long, default_value_t = DEFAULT_DESIRED_MARGIN)]
        margin: f64,
    },

    /// Compute a recommended maximum bid
    Bid {
        #[arg(long)]
        assessed_value: f64,

        #[arg(long, default_value_t = 0.0)]
        surviving: f64,

        #[arg(long, default_value_t = 0.0)]
        auction_costs: f64,

        #[arg(long, default_value_t = DEFAULT_DESIRED_MARGIN)]
        margin: f64,
    },
}

fn analysis_config(as_of: Option<&str>) -> Result<AnalysisConfig> {
    match as_of {
        Some(raw) => {
            let date = parse_date(raw).ok_or_else(|| anyhow!("unrecognized --as-of date: {}", raw))?;
            Ok(AnalysisConfig::as_of(date))
        }
        None => Ok(AnalysisConfig::default()),
    }
}

fn emit<T: Serialize>(value: &T, pretty: bool) -> Result<()> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{}", json);
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let config = analysis_config(cli.as_of.as_deref())?;

    match cli.command {
        Command::Chain { file } => {
            let instruments = load_instruments(&file)
                .with_context(|| format!("Failed to load instruments from {}", file.display()))?;
            let chain = ChainOfTitleBuilder::new(config.as_of).build(&instruments);
            emit(&chain, cli.pretty)
        }
        Command::Analyze {
            file,
            hoa_dues,
            auction_costs,
            margin,
        } => {
            let record = load_property(&file)
                .with_context(|| format!("Failed to load property record from {}", file.display()))?;
            let config = AnalysisConfig {
                hoa_monthly_dues: hoa_dues,
                ..config
            };
            let analyzer = PropertyAnalyzer::new(config).with_bid_parameters(BidParameters {
                auction_costs,
                desired_margin: margin,
            });
            emit(&analyzer.analyze(&record), cli.pretty)
        }
        Command::Bid {
            assessed_value,
            surviving,
            auction_costs,
            margin,
        } => emit(
            &calculate_maximum_bid(assessed_value, surviving, auction_costs, margin),
            cli.pretty,
        ),
    }
}
