//! Provider contract for daily price history.
//!
//! A [`PriceHistorySource`] answers one question: the daily rows for a
//! qualified symbol inside a date range. An empty series is a valid answer for
//! unknown or data-less symbols; only failures to obtain an answer at all are
//! reported as [`SourceError`].

use std::fmt::{Display, Formatter};
use std::future::Future;
use std::pin::Pin;

use crate::{DateRange, QualifiedSymbol, RawPriceSeries};

/// Adapter-level error classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceErrorKind {
    /// Transport failure: connect, timeout, body read, upstream 5xx.
    Network,
    /// The provider rejected the symbol outright.
    NotFound,
    RateLimited,
    /// The provider answered with something that is not a price history.
    InvalidResponse,
    Internal,
}

/// Structured provider error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceError {
    kind: SourceErrorKind,
    message: String,
}

impl SourceError {
    pub fn network(message: impl Into<String>) -> Self {
        Self::new(SourceErrorKind::Network, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(SourceErrorKind::NotFound, message)
    }

    pub fn rate_limited(message: impl Into<String>) -> Self {
        Self::new(SourceErrorKind::RateLimited, message)
    }

    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self::new(SourceErrorKind::InvalidResponse, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(SourceErrorKind::Internal, message)
    }

    fn new(kind: SourceErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub const fn kind(&self) -> SourceErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub const fn code(&self) -> &'static str {
        match self.kind {
            SourceErrorKind::Network => "source.network",
            SourceErrorKind::NotFound => "source.not_found",
            SourceErrorKind::RateLimited => "source.rate_limited",
            SourceErrorKind::InvalidResponse => "source.invalid_response",
            SourceErrorKind::Internal => "source.internal",
        }
    }
}

impl Display for SourceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.message, self.code())
    }
}

impl std::error::Error for SourceError {}

/// Daily price history provider.
///
/// Implementations must be `Send + Sync`; the returned series is ascending by
/// date and carries the requested symbol.
pub trait PriceHistorySource: Send + Sync {
    /// Short provider name used in logs and output metadata.
    fn id(&self) -> &'static str;

    /// Fetch daily rows for `symbol` within `range`.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] when the provider cannot be reached, throttles
    /// the call, or answers with a malformed payload.
    fn history<'a>(
        &'a self,
        symbol: &'a QualifiedSymbol,
        range: DateRange,
    ) -> Pin<Box<dyn Future<Output = Result<RawPriceSeries, SourceError>> + Send + 'a>>;
}
