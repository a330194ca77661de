use serde::Serialize;
use time::Date;

use super::date_range::iso_date;
use crate::CleanedPriceSeries;

/// Scalar metrics shown next to a price series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SeriesSummary {
    #[serde(with = "iso_date")]
    pub latest_date: Date,
    pub latest_close: f64,
    pub latest_change_pct: Option<f64>,
    pub max_close: f64,
    pub min_close: f64,
}

impl SeriesSummary {
    /// Reduce a series to its summary; `None` for an empty series.
    pub fn from_series(series: &CleanedPriceSeries) -> Option<Self> {
        let latest = series.last()?;
        let (min_close, max_close) = series
            .closes()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), close| {
                (min.min(close), max.max(close))
            });

        Some(Self {
            latest_date: latest.date,
            latest_close: latest.close,
            latest_change_pct: latest.change_pct,
            max_close,
            min_close,
        })
    }
}
