//! CLI argument definitions for stockpulse.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `history` | Daily closes, volume and percent change for one stock |
//! | `normalize` | Show the qualified symbol a code resolves to |
//!
//! # Global Options
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `--format` | `table` | Output format (table, json) |
//! | `--pretty` | `false` | Pretty-print JSON output |
//! | `--timeout-ms` | `STOCKPULSE_TIMEOUT_MS` or `10000` | Provider request timeout |
//! | `--base-url` | `STOCKPULSE_BASE_URL` or Yahoo | Chart API host |
//! | `-v` | warn | Repeat to raise log verbosity |
//!
//! # Examples
//!
//! ```bash
//! stockpulse history 005930
//! stockpulse history 035720 --market kq --days 180
//! stockpulse history 005930.KS --format json --pretty
//! stockpulse normalize 005930
//! ```

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use stockpulse_core::{Market, PriceQuery};

/// Korean stock price history in the terminal.
#[derive(Debug, Parser)]
#[command(
    name = "stockpulse",
    author,
    version,
    about = "Daily price history and percent change for KOSPI/KOSDAQ stocks"
)]
pub struct Cli {
    /// Output format for results.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Pretty-print JSON output with indentation.
    #[arg(long, global = true, default_value_t = false)]
    pub pretty: bool,

    /// Provider request timeout in milliseconds.
    #[arg(long, global = true)]
    pub timeout_ms: Option<u64>,

    /// Chart API base URL.
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Increase log verbosity (-v info, -vv debug). `RUST_LOG` takes precedence.
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Metrics, line chart and record table for terminals.
    Table,
    /// Single JSON envelope.
    Json,
}

/// Market assumed for codes typed without a suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum MarketArg {
    /// KOSPI (`.KS`).
    Ks,
    /// KOSDAQ (`.KQ`).
    Kq,
}

impl From<MarketArg> for Market {
    fn from(value: MarketArg) -> Self {
        match value {
            MarketArg::Ks => Market::Kospi,
            MarketArg::Kq => Market::Kosdaq,
        }
    }
}

/// Available CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch daily closes and derive day-over-day percent change.
    ///
    /// # Examples
    ///
    ///   stockpulse history 005930
    ///   stockpulse history 035720.KQ --days 365
    History(HistoryArgs),

    /// Print the qualified symbol for a stock code.
    Normalize(NormalizeArgs),
}

#[derive(Debug, Args)]
pub struct HistoryArgs {
    /// Stock code, e.g. 005930 or 035720.KQ.
    pub code: String,

    /// Lookback window in calendar days.
    #[arg(
        short,
        long,
        default_value_t = PriceQuery::DEFAULT_LOOKBACK_DAYS,
        value_parser = clap::value_parser!(u32).range(30..=365)
    )]
    pub days: u32,

    /// Market for codes without a suffix.
    #[arg(long, value_enum, default_value_t = MarketArg::Ks)]
    pub market: MarketArg,

    /// Maximum chart width in columns.
    #[arg(long, default_value_t = 60)]
    pub chart_width: usize,
}

#[derive(Debug, Args)]
pub struct NormalizeArgs {
    /// Stock code, e.g. 005930.
    pub code: String,

    /// Market for codes without a suffix.
    #[arg(long, value_enum, default_value_t = MarketArg::Ks)]
    pub market: MarketArg,
}
