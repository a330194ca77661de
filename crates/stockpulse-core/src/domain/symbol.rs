use std::fmt::{Display, Formatter};

use serde::Serialize;

/// Exchange a qualified symbol is listed on, identified by its ticker suffix.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Market {
    /// Primary exchange (`.KS`).
    #[default]
    Kospi,
    /// Secondary exchange (`.KQ`).
    Kosdaq,
}

impl Market {
    pub const ALL: [Market; 2] = [Market::Kospi, Market::Kosdaq];

    pub const fn suffix(self) -> &'static str {
        match self {
            Self::Kospi => ".KS",
            Self::Kosdaq => ".KQ",
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Kospi => "ks",
            Self::Kosdaq => "kq",
        }
    }
}

impl Display for Market {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ticker carrying exactly one recognized market suffix.
///
/// Codes are not checked for existence or format; a malformed code is passed
/// through and left for the provider to reject.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "String")]
pub struct QualifiedSymbol(String);

impl QualifiedSymbol {
    /// Qualify a raw code, defaulting unqualified codes to the primary exchange.
    pub fn normalize(raw: &str) -> Self {
        Self::normalize_with_default(raw, Market::Kospi)
    }

    /// Qualify a raw code, appending `default`'s suffix when neither suffix is present.
    ///
    /// The suffix match is case-sensitive.
    pub fn normalize_with_default(raw: &str, default: Market) -> Self {
        if Market::ALL.iter().any(|market| raw.ends_with(market.suffix())) {
            return Self(raw.to_owned());
        }
        Self(format!("{raw}{}", default.suffix()))
    }

    pub fn market(&self) -> Market {
        if self.0.ends_with(Market::Kosdaq.suffix()) {
            Market::Kosdaq
        } else {
            Market::Kospi
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for QualifiedSymbol {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<QualifiedSymbol> for String {
    fn from(value: QualifiedSymbol) -> Self {
        value.0
    }
}
