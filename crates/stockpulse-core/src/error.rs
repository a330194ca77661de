use thiserror::Error;

/// Validation and contract errors exposed by `stockpulse-core`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("stock code cannot be empty")]
    EmptyCode,

    #[error("date range start {start} is after end {end}")]
    InvertedRange { start: String, end: String },
    #[error("lookback of {days} days reaches before the supported calendar")]
    LookbackOutOfRange { days: u32 },

    #[error("field '{field}' must be finite")]
    NonFiniteValue { field: &'static str },
    #[error("field '{field}' must be non-negative")]
    NegativeValue { field: &'static str },

    #[error("config value '{name}' is invalid: '{value}'")]
    InvalidConfig { name: &'static str, value: String },
}
