use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use serde::Deserialize;
use time::macros::offset;
use time::{Date, OffsetDateTime, PrimitiveDateTime, Time, UtcOffset};

use crate::config::ProviderConfig;
use crate::data_source::{PriceHistorySource, SourceError};
use crate::http_client::{HttpClient, HttpErrorKind, HttpRequest, ReqwestHttpClient};
use crate::{DateRange, QualifiedSymbol, RawPriceRecord, RawPriceSeries};

/// Both supported markets trade in Korea Standard Time, which has no DST.
const EXCHANGE_OFFSET: UtcOffset = offset!(+9);

const NOT_FOUND_CODE: &str = "Not Found";
const BAD_REQUEST_CODE: &str = "Bad Request";

/// Daily history from the Yahoo Finance v8 chart endpoint.
///
/// The range end is an exclusive bound: `period2` is midnight of the end date
/// in exchange time, so the session in progress on the end date is not
/// returned.
#[derive(Clone)]
pub struct YahooChartAdapter {
    http_client: Arc<dyn HttpClient>,
    base_url: String,
    timeout_ms: u64,
}

impl YahooChartAdapter {
    pub fn new(http_client: Arc<dyn HttpClient>, config: &ProviderConfig) -> Self {
        Self {
            http_client,
            base_url: config.base_url.clone(),
            timeout_ms: config.timeout_ms,
        }
    }

    /// Adapter over a reqwest transport built from `config`.
    pub fn from_config(config: &ProviderConfig) -> Result<Self, SourceError> {
        let client = ReqwestHttpClient::from_config(config)
            .map_err(|e| SourceError::internal(e.message().to_owned()))?;
        Ok(Self::new(Arc::new(client), config))
    }

    pub fn chart_url(&self, symbol: &QualifiedSymbol, range: DateRange) -> String {
        format!(
            "{}/v8/finance/chart/{}?period1={}&period2={}&interval=1d&events=history&includePrePost=false",
            self.base_url,
            urlencoding::encode(symbol.as_str()),
            exchange_midnight(range.start()),
            exchange_midnight(range.end()),
        )
    }

    async fn fetch_history(
        &self,
        symbol: &QualifiedSymbol,
        range: DateRange,
    ) -> Result<RawPriceSeries, SourceError> {
        if range.is_empty() {
            log::debug!("empty window {range} for {symbol}, skipping yahoo call");
            return Ok(RawPriceSeries::empty(symbol.clone()));
        }

        let url = self.chart_url(symbol, range);
        log::debug!("requesting yahoo chart: {url}");

        let request = HttpRequest::get(url)
            .with_header("referer", "https://finance.yahoo.com/")
            .with_header("accept", "application/json")
            .with_timeout_ms(self.timeout_ms);

        let response = self.http_client.execute(request).await.map_err(|e| match e.kind() {
            HttpErrorKind::Client => {
                SourceError::internal(format!("yahoo transport error: {}", e.message()))
            }
            _ => SourceError::network(format!("yahoo transport error: {}", e.message())),
        })?;

        if response.status == 429 {
            return Err(SourceError::rate_limited(
                "yahoo returned status 429 (too many requests)",
            ));
        }
        if response.status >= 500 {
            return Err(SourceError::network(format!(
                "yahoo returned status {}",
                response.status
            )));
        }

        // Unknown symbols come back as a 404 carrying a chart error body.
        let chart: YahooChartResponse = match serde_json::from_str(&response.body) {
            Ok(chart) => chart,
            Err(e) if response.is_success() => {
                return Err(SourceError::invalid_response(format!(
                    "failed to parse yahoo chart: {e}"
                )))
            }
            Err(_) => {
                return Err(SourceError::invalid_response(format!(
                    "yahoo returned status {}",
                    response.status
                )))
            }
        };

        if let Some(error) = chart.chart.error {
            return match error.code.as_str() {
                NOT_FOUND_CODE => {
                    log::debug!("yahoo has no chart for {symbol}: {}", error.describe());
                    Ok(RawPriceSeries::empty(symbol.clone()))
                }
                BAD_REQUEST_CODE => Err(SourceError::not_found(format!(
                    "yahoo rejected {symbol}: {}",
                    error.describe()
                ))),
                _ => Err(SourceError::invalid_response(format!(
                    "yahoo chart API error: {}",
                    error.describe()
                ))),
            };
        }

        if !response.is_success() {
            return Err(SourceError::invalid_response(format!(
                "yahoo returned status {}",
                response.status
            )));
        }

        let result = chart
            .chart
            .result
            .and_then(|results| results.into_iter().next())
            .ok_or_else(|| SourceError::invalid_response("no chart data in response"))?;

        let series = normalize_chart(symbol, range, result)?;
        log::debug!("yahoo returned {} daily rows for {symbol}", series.len());
        Ok(series)
    }
}

impl PriceHistorySource for YahooChartAdapter {
    fn id(&self) -> &'static str {
        "yahoo"
    }

    fn history<'a>(
        &'a self,
        symbol: &'a QualifiedSymbol,
        range: DateRange,
    ) -> Pin<Box<dyn Future<Output = Result<RawPriceSeries, SourceError>> + Send + 'a>> {
        Box::pin(self.fetch_history(symbol, range))
    }
}

/// Zip the column arrays into rows inside `[start, end)`.
///
/// The adjusted close replaces the raw close when Yahoo sends one, and
/// open/high/low are scaled by the same factor.
fn normalize_chart(
    symbol: &QualifiedSymbol,
    range: DateRange,
    result: YahooChartResult,
) -> Result<RawPriceSeries, SourceError> {
    let Some(timestamps) = result.timestamp else {
        return Ok(RawPriceSeries::empty(symbol.clone()));
    };
    let quote = result.indicators.quote.into_iter().next().unwrap_or_default();
    let adjclose = result
        .indicators
        .adjclose
        .into_iter()
        .next()
        .map(|adjusted| adjusted.adjclose)
        .unwrap_or_default();

    let offset = result
        .meta
        .and_then(|meta| meta.gmtoffset)
        .and_then(|seconds| UtcOffset::from_whole_seconds(seconds).ok())
        .unwrap_or(EXCHANGE_OFFSET);

    let mut records = Vec::with_capacity(timestamps.len());
    for (i, &ts) in timestamps.iter().enumerate() {
        let date = OffsetDateTime::from_unix_timestamp(ts)
            .map_err(|e| SourceError::invalid_response(format!("invalid timestamp {ts}: {e}")))?
            .to_offset(offset)
            .date();
        if date < range.start() || date >= range.end() {
            continue;
        }

        let raw_close = column(&quote.close, i);
        let Some(close) = column(&adjclose, i).or(raw_close) else {
            continue;
        };
        let adjust = |value: Option<f64>| match raw_close {
            Some(raw) if raw > 0.0 && raw != close => value.map(|v| v * close / raw),
            _ => value,
        };
        let volume = quote
            .volume
            .get(i)
            .copied()
            .flatten()
            .and_then(|v| u64::try_from(v).ok())
            .unwrap_or(0);

        match RawPriceRecord::new(
            date,
            adjust(column(&quote.open, i)),
            adjust(column(&quote.high, i)),
            adjust(column(&quote.low, i)),
            close,
            volume,
        ) {
            Ok(record) => records.push(record),
            Err(e) => log::warn!("skipping yahoo row {i} for {symbol}: {e}"),
        }
    }

    records.sort_by_key(|record| record.date);
    records.dedup_by_key(|record| record.date);

    Ok(RawPriceSeries::new(symbol.clone(), records))
}

fn column(values: &[Option<f64>], index: usize) -> Option<f64> {
    values.get(index).copied().flatten()
}

fn exchange_midnight(date: Date) -> i64 {
    PrimitiveDateTime::new(date, Time::MIDNIGHT)
        .assume_offset(EXCHANGE_OFFSET)
        .unix_timestamp()
}

#[derive(Debug, Deserialize)]
struct YahooChartResponse {
    chart: YahooChartData,
}

#[derive(Debug, Deserialize)]
struct YahooChartData {
    #[serde(default)]
    result: Option<Vec<YahooChartResult>>,
    #[serde(default)]
    error: Option<YahooChartError>,
}

#[derive(Debug, Deserialize)]
struct YahooChartError {
    code: String,
    #[serde(default)]
    description: Option<String>,
}

impl YahooChartError {
    fn describe(&self) -> &str {
        self.description.as_deref().unwrap_or(self.code.as_str())
    }
}

#[derive(Debug, Deserialize)]
struct YahooChartResult {
    #[serde(default)]
    meta: Option<YahooChartMeta>,
    #[serde(default)]
    timestamp: Option<Vec<i64>>,
    indicators: YahooChartIndicators,
}

#[derive(Debug, Deserialize)]
struct YahooChartMeta {
    #[serde(default)]
    gmtoffset: Option<i32>,
}

#[derive(Debug, Deserialize)]
struct YahooChartIndicators {
    #[serde(default)]
    quote: Vec<YahooChartQuote>,
    #[serde(default)]
    adjclose: Vec<YahooAdjClose>,
}

#[derive(Debug, Default, Deserialize)]
struct YahooAdjClose {
    #[serde(default)]
    adjclose: Vec<Option<f64>>,
}

#[derive(Debug, Default, Deserialize)]
struct YahooChartQuote {
    #[serde(default)]
    open: Vec<Option<f64>>,
    #[serde(default)]
    high: Vec<Option<f64>>,
    #[serde(default)]
    low: Vec<Option<f64>>,
    #[serde(default)]
    close: Vec<Option<f64>>,
    #[serde(default)]
    volume: Vec<Option<i64>>,
}
