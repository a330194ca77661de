use std::fmt::{Display, Formatter};

use serde::Serialize;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{Date, Duration};

use crate::ValidationError;

/// `YYYY-MM-DD`, the calendar date form used on the provider boundary.
pub const ISO_DATE: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

time::serde::format_description!(pub iso_date, Date, "[year]-[month]-[day]");

/// Format a calendar date as `YYYY-MM-DD`.
pub fn format_date(date: Date) -> String {
    date.format(ISO_DATE)
        .unwrap_or_else(|_| String::from("<unformattable>"))
}

/// Half-open query window `[start, end)` of calendar dates.
///
/// `start <= end` always holds. The end date itself is excluded, so a window
/// with `start == end` holds no day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct DateRange {
    #[serde(with = "iso_date")]
    start: Date,
    #[serde(with = "iso_date")]
    end: Date,
}

impl DateRange {
    pub fn new(start: Date, end: Date) -> Result<Self, ValidationError> {
        if start > end {
            return Err(ValidationError::InvertedRange {
                start: format_date(start),
                end: format_date(end),
            });
        }
        Ok(Self { start, end })
    }

    /// Window ending at `end` and reaching back `days` calendar days.
    pub fn lookback(end: Date, days: u32) -> Result<Self, ValidationError> {
        let start = end
            .checked_sub(Duration::days(i64::from(days)))
            .ok_or(ValidationError::LookbackOutOfRange { days })?;
        Self::new(start, end)
    }

    pub const fn start(&self) -> Date {
        self.start
    }

    pub const fn end(&self) -> Date {
        self.end
    }

    /// True when the window holds no day, i.e. `start == end`.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

impl Display for DateRange {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}..{}", format_date(self.start), format_date(self.end))
    }
}
