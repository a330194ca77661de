//! Source of "today" for building query ranges.

use time::{Date, OffsetDateTime};

/// Calendar clock capability injected into [`PriceService`](crate::PriceService).
pub trait Clock: Send + Sync {
    fn today(&self) -> Date;
}

/// Wall clock in the machine's local offset, falling back to UTC when the
/// offset cannot be determined.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> Date {
        OffsetDateTime::now_local()
            .unwrap_or_else(|_| OffsetDateTime::now_utc())
            .date()
    }
}

/// Clock pinned to a single date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub Date);

impl Clock for FixedClock {
    fn today(&self) -> Date {
        self.0
    }
}
