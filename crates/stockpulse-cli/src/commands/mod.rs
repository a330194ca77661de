mod history;
mod normalize;

use std::sync::Arc;

use serde::Serialize;
use stockpulse_core::{
    FetchFailure, FetchOutcome, Market, PriceQuery, PriceService, ProviderConfig, QualifiedSymbol,
    SystemClock, YahooChartAdapter,
};

use crate::cli::{Cli, Command};
use crate::error::CliError;
use crate::metadata::Metadata;

/// Command output ready for rendering.
#[derive(Debug)]
pub struct Report {
    pub meta: Metadata,
    pub body: ReportBody,
}

#[derive(Debug)]
pub enum ReportBody {
    History(HistoryReport),
    Normalize(NormalizeReport),
}

impl Report {
    /// Fetch failure carried by the report, if any.
    pub fn failure(&self) -> Option<&FetchFailure> {
        match &self.body {
            ReportBody::History(history) => history.outcome.failure(),
            ReportBody::Normalize(_) => None,
        }
    }
}

#[derive(Debug)]
pub struct HistoryReport {
    pub query: PriceQuery,
    pub outcome: FetchOutcome,
    pub chart_width: usize,
}

#[derive(Debug, Serialize)]
pub struct NormalizeReport {
    pub input: String,
    pub symbol: QualifiedSymbol,
    pub market: Market,
}

pub async fn run(cli: &Cli) -> Result<Report, CliError> {
    match &cli.command {
        Command::History(args) => {
            let config = provider_config(cli)?;
            let adapter = YahooChartAdapter::from_config(&config)?;
            let service = PriceService::new(Arc::new(adapter), Arc::new(SystemClock));
            history::run(args, &service).await
        }
        Command::Normalize(args) => normalize::run(args),
    }
}

/// Environment (and `.env`) first, then command-line overrides.
fn provider_config(cli: &Cli) -> Result<ProviderConfig, CliError> {
    let mut config = ProviderConfig::from_env()?;
    if let Some(base_url) = &cli.base_url {
        config = config.with_base_url(base_url.as_str())?;
    }
    if let Some(timeout_ms) = cli.timeout_ms {
        config = config.with_timeout_ms(timeout_ms)?;
    }
    log::debug!(
        "provider config: base_url={} timeout_ms={}",
        config.base_url,
        config.timeout_ms
    );
    Ok(config)
}
