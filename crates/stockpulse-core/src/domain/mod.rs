//! # Domain Models
//!
//! Value types for a single price-history query.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Market`] | Exchange identified by ticker suffix (`.KS`, `.KQ`) |
//! | [`QualifiedSymbol`] | Ticker carrying exactly one market suffix |
//! | [`DateRange`] | Calendar window ending at the query date |
//! | [`RawPriceSeries`] | Provider rows for a symbol, ascending by date |
//! | [`CleanedPriceSeries`] | Close/volume projection with derived percent change |
//! | [`SeriesSummary`] | Latest close/change and period extremes |
//!
//! All series are built per query and never mutated afterwards:
//!
//! ```rust
//! use stockpulse_core::{DateRange, QualifiedSymbol, RawPriceRecord, RawPriceSeries};
//! use time::macros::date;
//!
//! let symbol = QualifiedSymbol::normalize("005930");
//! let range = DateRange::lookback(date!(2024 - 01 - 05), 4).unwrap();
//! let raw = RawPriceSeries::new(
//!     symbol,
//!     vec![
//!         RawPriceRecord::close_only(date!(2024 - 01 - 02), 70_000.0, 10).unwrap(),
//!         RawPriceRecord::close_only(date!(2024 - 01 - 03), 71_400.0, 12).unwrap(),
//!     ],
//! );
//! let cleaned = raw.derive(range);
//! assert_eq!(cleaned.records()[1].change_pct, Some(2.0));
//! ```

mod date_range;
mod series;
mod summary;
mod symbol;

pub use date_range::{format_date, iso_date, DateRange, ISO_DATE};
pub use series::{
    percent_change, CleanedPriceRecord, CleanedPriceSeries, RawPriceRecord, RawPriceSeries,
};
pub use summary::SeriesSummary;
pub use symbol::{Market, QualifiedSymbol};
