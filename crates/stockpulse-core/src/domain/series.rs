use serde::Serialize;
use time::Date;

use super::date_range::iso_date;
use crate::{DateRange, QualifiedSymbol, ValidationError};

/// One trading day as delivered by a price history provider.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RawPriceRecord {
    #[serde(with = "iso_date")]
    pub date: Date,
    pub open: Option<f64>,
    pub high: Option<f64>,
    pub low: Option<f64>,
    pub close: f64,
    pub volume: u64,
}

impl RawPriceRecord {
    pub fn new(
        date: Date,
        open: Option<f64>,
        high: Option<f64>,
        low: Option<f64>,
        close: f64,
        volume: u64,
    ) -> Result<Self, ValidationError> {
        validate_optional_price("open", open)?;
        validate_optional_price("high", high)?;
        validate_optional_price("low", low)?;
        validate_price("close", close)?;

        Ok(Self {
            date,
            open,
            high,
            low,
            close,
            volume,
        })
    }

    /// Record carrying only the two columns the derived series keeps.
    pub fn close_only(date: Date, close: f64, volume: u64) -> Result<Self, ValidationError> {
        Self::new(date, None, None, None, close, volume)
    }
}

/// Provider output for one symbol, ascending by date; may be empty.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RawPriceSeries {
    pub symbol: QualifiedSymbol,
    pub records: Vec<RawPriceRecord>,
}

impl RawPriceSeries {
    pub fn new(symbol: QualifiedSymbol, records: Vec<RawPriceRecord>) -> Self {
        Self { symbol, records }
    }

    pub fn empty(symbol: QualifiedSymbol) -> Self {
        Self::new(symbol, Vec::new())
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Project to close/volume and append the day-over-day change column.
    pub fn derive(&self, range: DateRange) -> CleanedPriceSeries {
        let mut previous_close: Option<f64> = None;
        let records = self
            .records
            .iter()
            .map(|record| {
                let change_pct = previous_close.and_then(|prev| percent_change(prev, record.close));
                previous_close = Some(record.close);
                CleanedPriceRecord {
                    date: record.date,
                    close: record.close,
                    volume: record.volume,
                    change_pct,
                }
            })
            .collect();

        CleanedPriceSeries {
            symbol: self.symbol.clone(),
            range,
            records,
        }
    }
}

/// Row of the analysis-ready series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CleanedPriceRecord {
    #[serde(with = "iso_date")]
    pub date: Date,
    pub close: f64,
    pub volume: u64,
    /// Percent change from the previous record, two decimals; `None` on the first row.
    pub change_pct: Option<f64>,
}

/// Closing price and volume with derived percent change, same order as the raw series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CleanedPriceSeries {
    symbol: QualifiedSymbol,
    range: DateRange,
    records: Vec<CleanedPriceRecord>,
}

impl CleanedPriceSeries {
    pub fn empty(symbol: QualifiedSymbol, range: DateRange) -> Self {
        Self {
            symbol,
            range,
            records: Vec::new(),
        }
    }

    pub fn symbol(&self) -> &QualifiedSymbol {
        &self.symbol
    }

    pub const fn range(&self) -> DateRange {
        self.range
    }

    pub fn records(&self) -> &[CleanedPriceRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn last(&self) -> Option<&CleanedPriceRecord> {
        self.records.last()
    }

    pub fn closes(&self) -> impl Iterator<Item = f64> + '_ {
        self.records.iter().map(|record| record.close)
    }
}

/// `(current / previous - 1) * 100`, rounded to two decimals with ties to even.
///
/// Undefined when the previous close is zero.
pub fn percent_change(previous: f64, current: f64) -> Option<f64> {
    if previous == 0.0 {
        return None;
    }
    Some(round_to_cents((current / previous - 1.0) * 100.0))
}

fn round_to_cents(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}

fn validate_price(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::NonFiniteValue { field });
    }
    if value < 0.0 {
        return Err(ValidationError::NegativeValue { field });
    }
    Ok(())
}

fn validate_optional_price(field: &'static str, value: Option<f64>) -> Result<(), ValidationError> {
    if let Some(value) = value {
        validate_price(field, value)?;
    }
    Ok(())
}
