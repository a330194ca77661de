//! # Stockpulse Core
//!
//! Daily price history for Korean exchange tickers, framework-independent.
//!
//! ## Overview
//!
//! A query runs through two strictly sequential steps:
//!
//! 1. **Symbol normalization**: a raw code such as `005930` becomes a
//!    qualified symbol (`005930.KS`).
//! 2. **Fetch and derive**: one call to a [`PriceHistorySource`] yields a raw
//!    daily series, which is projected to close/volume and extended with the
//!    day-over-day percent change.
//!
//! Presentation layers reduce the derived series with [`SeriesSummary`].
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`adapters`] | Provider adapters (Yahoo Finance chart API) |
//! | [`clock`] | Injected "today" for range construction |
//! | [`config`] | Provider connection settings |
//! | [`data_source`] | Provider trait and error classification |
//! | [`domain`] | Symbols, ranges, series and summaries |
//! | [`error`] | Validation errors |
//! | [`fetcher`] | Fetch-and-derive pipeline and request service |
//! | [`http_client`] | HTTP transport abstraction |
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use stockpulse_core::{
//!     FetchOutcome, PriceQuery, PriceService, ProviderConfig, SystemClock, YahooChartAdapter,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let adapter = YahooChartAdapter::from_config(&ProviderConfig::from_env()?)?;
//!     let service = PriceService::new(Arc::new(adapter), Arc::new(SystemClock));
//!
//!     match service.run(&PriceQuery::new("005930", 90)?).await? {
//!         FetchOutcome::Ready(series) => println!("{} sessions", series.len()),
//!         FetchOutcome::Failed(failure) => eprintln!("{failure}"),
//!     }
//!     Ok(())
//! }
//! ```

pub mod adapters;
pub mod clock;
pub mod config;
pub mod data_source;
pub mod domain;
pub mod error;
pub mod fetcher;
pub mod http_client;

pub use adapters::YahooChartAdapter;

pub use clock::{Clock, FixedClock, SystemClock};

pub use config::ProviderConfig;

pub use data_source::{PriceHistorySource, SourceError, SourceErrorKind};

pub use domain::{
    format_date, iso_date, percent_change, CleanedPriceRecord, CleanedPriceSeries, DateRange,
    Market, QualifiedSymbol, RawPriceRecord, RawPriceSeries, SeriesSummary, ISO_DATE,
};

pub use error::ValidationError;

pub use fetcher::{
    fetch_and_derive, FailureKind, FetchCause, FetchFailure, FetchOutcome, PriceQuery,
    PriceService,
};

pub use http_client::{
    HttpClient, HttpError, HttpErrorKind, HttpRequest, HttpResponse, ReqwestHttpClient,
};
