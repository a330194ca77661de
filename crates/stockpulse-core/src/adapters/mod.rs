//! Price history provider adapters.

pub mod yahoo;

pub use yahoo::YahooChartAdapter;
