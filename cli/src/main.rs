//! CLI entry point for the share calculator.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

use sharecalc::RawInput;
use sharecalc_cli::config::{Config, ProviderKind};
use sharecalc_cli::provider;
use sharecalc_cli::session::{self, OutputFormat};

#[derive(Parser)]
#[command(name = "sharecalc")]
#[command(about = "How many stock shares should you buy or sell to rebalance?")]
#[command(version)]
struct Cli {
    /// Path to config.toml (defaults apply when omitted)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Price provider, overriding the config file
    #[arg(long, value_enum)]
    provider: Option<ProviderKind>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Compute target and net shares for one portfolio
    Calc {
        /// Starting equity
        #[arg(long, default_value = "10000")]
        equity: String,

        /// Comma-separated symbols, e.g. "SPY, QQQ, AMD"
        #[arg(long)]
        symbols: String,

        /// Comma-separated decimal weights, e.g. "0.4, 0.3, 0.3"
        #[arg(long)]
        weights: String,

        /// Comma-separated shares already owned (zeros when omitted)
        #[arg(long, default_value = "")]
        shares: String,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Prompt for inputs and show the table, repeatedly
    Interactive,

    /// Show the latest price for each symbol
    Price {
        #[arg(required = true)]
        symbols: Vec<String>,
    },
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_secs()
        .init();

    let cli = Cli::parse();

    let config = match Config::load_or_default(cli.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error loading config: {e}");
            process::exit(1);
        }
    };

    let kind = cli.provider.unwrap_or(config.provider.kind);
    let provider = match provider::connect_provider(&config, kind) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Error setting up {kind} provider: {e}");
            process::exit(1);
        }
    };

    let result = match cli.command {
        Command::Calc {
            equity,
            symbols,
            weights,
            shares,
            json,
        } => {
            let raw = RawInput {
                equity,
                symbols,
                weights,
                shares,
            };
            let format = if json {
                OutputFormat::Json
            } else {
                OutputFormat::Text
            };
            session::run_calc(&config, provider.as_ref(), &raw, format)
        }
        Command::Interactive => session::run_interactive(&config, provider.as_ref()),
        Command::Price { symbols } => session::show_prices(provider.as_ref(), &symbols),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        process::exit(if e.is_input_error() { 2 } else { 1 });
    }
}
