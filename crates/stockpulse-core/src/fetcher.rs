//! Fetch-and-derive pipeline.
//!
//! [`fetch_and_derive`] is the single point of external I/O: one provider
//! call, no retries, no caching. Every provider failure is caught here and
//! turned into a [`FetchOutcome::Failed`] carrying a user-facing message, so
//! callers pattern-match on the outcome instead of handling errors.

use std::fmt::{Display, Formatter};
use std::sync::Arc;

use serde::Serialize;

use crate::clock::Clock;
use crate::data_source::{PriceHistorySource, SourceError, SourceErrorKind};
use crate::{format_date, CleanedPriceSeries, DateRange, Market, QualifiedSymbol, ValidationError};

/// Refinement of a provider failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FetchCause {
    Network,
    NotFound,
    RateLimited,
    InvalidResponse,
    Internal,
}

impl FetchCause {
    const fn describe(self) -> &'static str {
        match self {
            Self::Network => "the market data service could not be reached",
            Self::NotFound => "the market data service rejected the code",
            Self::RateLimited => "the market data service is throttling requests",
            Self::InvalidResponse => "the market data service sent an unexpected response",
            Self::Internal => "the request could not be prepared",
        }
    }
}

impl From<SourceErrorKind> for FetchCause {
    fn from(kind: SourceErrorKind) -> Self {
        match kind {
            SourceErrorKind::Network => Self::Network,
            SourceErrorKind::NotFound => Self::NotFound,
            SourceErrorKind::RateLimited => Self::RateLimited,
            SourceErrorKind::InvalidResponse => Self::InvalidResponse,
            SourceErrorKind::Internal => Self::Internal,
        }
    }
}

/// Why a query produced no series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "cause", rename_all = "snake_case")]
pub enum FailureKind {
    /// The provider answered but had no rows for the symbol and range.
    DataUnavailable,
    /// The provider call itself failed.
    FetchFailed(FetchCause),
}

impl FailureKind {
    pub const fn code(self) -> &'static str {
        match self {
            Self::DataUnavailable => "fetch.data_unavailable",
            Self::FetchFailed(_) => "fetch.failed",
        }
    }
}

/// Failure half of a [`FetchOutcome`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FetchFailure {
    pub kind: FailureKind,
    pub symbol: QualifiedSymbol,
    pub range: DateRange,
    pub message: String,
    /// Provider diagnostic, kept out of the user-facing message.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl FetchFailure {
    pub fn data_unavailable(symbol: &QualifiedSymbol, range: DateRange) -> Self {
        Self {
            kind: FailureKind::DataUnavailable,
            symbol: symbol.clone(),
            range,
            message: format!(
                "no price data for {symbol} from {} up to {} (exclusive); the code may be invalid",
                format_date(range.start()),
                format_date(range.end()),
            ),
            detail: None,
        }
    }

    pub fn fetch_failed(symbol: &QualifiedSymbol, range: DateRange, error: &SourceError) -> Self {
        let cause = FetchCause::from(error.kind());
        Self {
            kind: FailureKind::FetchFailed(cause),
            symbol: symbol.clone(),
            range,
            message: format!(
                "could not fetch data for {symbol}; check the stock code ({})",
                cause.describe()
            ),
            detail: Some(error.to_string()),
        }
    }
}

impl Display for FetchFailure {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

/// Result of one fetch-and-derive call.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    /// Non-empty derived series.
    Ready(CleanedPriceSeries),
    Failed(FetchFailure),
}

impl FetchOutcome {
    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }

    pub fn series(&self) -> Option<&CleanedPriceSeries> {
        match self {
            Self::Ready(series) => Some(series),
            Self::Failed(_) => None,
        }
    }

    pub fn failure(&self) -> Option<&FetchFailure> {
        match self {
            Self::Ready(_) => None,
            Self::Failed(failure) => Some(failure),
        }
    }

    /// Two-output form: `(series, "")` on success, `(empty series, message)` on failure.
    pub fn into_parts(self) -> (CleanedPriceSeries, String) {
        match self {
            Self::Ready(series) => (series, String::new()),
            Self::Failed(failure) => (
                CleanedPriceSeries::empty(failure.symbol, failure.range),
                failure.message,
            ),
        }
    }
}

/// Call the provider once for `symbol` and `range` and derive the cleaned series.
pub async fn fetch_and_derive(
    source: &dyn PriceHistorySource,
    symbol: &QualifiedSymbol,
    range: DateRange,
) -> FetchOutcome {
    let raw = match source.history(symbol, range).await {
        Ok(raw) => raw,
        Err(error) => {
            log::warn!("{} history for {symbol} failed: {error}", source.id());
            return FetchOutcome::Failed(FetchFailure::fetch_failed(symbol, range, &error));
        }
    };

    if raw.is_empty() {
        log::warn!("{} returned no rows for {symbol} in {range}", source.id());
        return FetchOutcome::Failed(FetchFailure::data_unavailable(symbol, range));
    }

    FetchOutcome::Ready(raw.derive(range))
}

/// Explicit request: raw code as typed plus a lookback in calendar days.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceQuery {
    raw_code: String,
    lookback_days: u32,
    default_market: Market,
}

impl PriceQuery {
    pub const DEFAULT_LOOKBACK_DAYS: u32 = 90;

    /// Trim `raw_code` and reject it when nothing is left.
    pub fn new(raw_code: impl AsRef<str>, lookback_days: u32) -> Result<Self, ValidationError> {
        let trimmed = raw_code.as_ref().trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptyCode);
        }
        Ok(Self {
            raw_code: trimmed.to_owned(),
            lookback_days,
            default_market: Market::default(),
        })
    }

    /// Market whose suffix is appended to unqualified codes.
    pub fn with_default_market(mut self, market: Market) -> Self {
        self.default_market = market;
        self
    }

    pub fn raw_code(&self) -> &str {
        &self.raw_code
    }

    pub const fn lookback_days(&self) -> u32 {
        self.lookback_days
    }

    pub fn symbol(&self) -> QualifiedSymbol {
        QualifiedSymbol::normalize_with_default(&self.raw_code, self.default_market)
    }
}

/// Provider and clock bundled for request-level calls.
#[derive(Clone)]
pub struct PriceService {
    source: Arc<dyn PriceHistorySource>,
    clock: Arc<dyn Clock>,
}

impl PriceService {
    pub fn new(source: Arc<dyn PriceHistorySource>, clock: Arc<dyn Clock>) -> Self {
        Self { source, clock }
    }

    pub fn source_id(&self) -> &'static str {
        self.source.id()
    }

    /// Range ending today (per the clock) covering the query's lookback.
    pub fn range_for(&self, query: &PriceQuery) -> Result<DateRange, ValidationError> {
        DateRange::lookback(self.clock.today(), query.lookback_days())
    }

    /// Normalize, build the range, then fetch and derive.
    ///
    /// # Errors
    ///
    /// Only a lookback reaching outside the calendar fails; provider failures
    /// are reported through [`FetchOutcome::Failed`].
    pub async fn run(&self, query: &PriceQuery) -> Result<FetchOutcome, ValidationError> {
        let symbol = query.symbol();
        let range = self.range_for(query)?;
        log::info!(
            "fetching {symbol} from {} over {range} ({} days)",
            self.source.id(),
            query.lookback_days()
        );

        let outcome = fetch_and_derive(self.source.as_ref(), &symbol, range).await;
        if let FetchOutcome::Ready(series) = &outcome {
            log::info!("derived {} rows for {symbol}", series.len());
        }
        Ok(outcome)
    }
}
