mod cli;
mod commands;
mod error;
mod metadata;
mod output;

use clap::Parser;
use std::process::ExitCode;

use crate::cli::Cli;
use crate::error::CliError;

/// Exit status when the command ran but the provider produced no series.
const FETCH_FAILED_EXIT: u8 = 3;

#[tokio::main]
async fn main() -> ExitCode {
    // A missing .env file is the normal case.
    dotenv::dotenv().ok();

    match run().await {
        Ok(code) => code,
        Err(error) => {
            log::debug!("command failed: {error:?}");
            eprintln!("error: {error}");
            ExitCode::from(error.exit_code())
        }
    }
}

async fn run() -> Result<ExitCode, CliError> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let report = commands::run(&cli).await?;
    output::render(&report, cli.format, cli.pretty)?;

    if report.failure().is_some() {
        return Ok(ExitCode::from(FETCH_FAILED_EXIT));
    }

    Ok(ExitCode::SUCCESS)
}

/// `RUST_LOG` wins; otherwise `-v` raises the default `warn` level.
fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp_millis()
        .init();
}
