//! Provider connection settings.
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `STOCKPULSE_BASE_URL` | `https://query1.finance.yahoo.com` | Chart API host |
//! | `STOCKPULSE_TIMEOUT_MS` | `10000` | Per-request timeout |
//! | `STOCKPULSE_USER_AGENT` | `stockpulse/<version>` | `User-Agent` header |

use std::env;

use crate::ValidationError;

pub const DEFAULT_BASE_URL: &str = "https://query1.finance.yahoo.com";
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;

const BASE_URL_VAR: &str = "STOCKPULSE_BASE_URL";
const TIMEOUT_VAR: &str = "STOCKPULSE_TIMEOUT_MS";
const USER_AGENT_VAR: &str = "STOCKPULSE_USER_AGENT";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderConfig {
    pub base_url: String,
    pub timeout_ms: u64,
    pub user_agent: String,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: String::from(DEFAULT_BASE_URL),
            timeout_ms: DEFAULT_TIMEOUT_MS,
            user_agent: format!("stockpulse/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl ProviderConfig {
    /// Defaults overridden by any `STOCKPULSE_*` variables that are set.
    pub fn from_env() -> Result<Self, ValidationError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, ValidationError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(base_url) = lookup(BASE_URL_VAR) {
            config = config.with_base_url(base_url)?;
        }
        if let Some(raw) = lookup(TIMEOUT_VAR) {
            let timeout_ms = raw
                .trim()
                .parse::<u64>()
                .map_err(|_| ValidationError::InvalidConfig {
                    name: TIMEOUT_VAR,
                    value: raw.clone(),
                })?;
            config = config.with_timeout_ms(timeout_ms)?;
        }
        if let Some(user_agent) = lookup(USER_AGENT_VAR) {
            if !user_agent.trim().is_empty() {
                config.user_agent = user_agent;
            }
        }
        Ok(config)
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Result<Self, ValidationError> {
        let base_url = base_url.into();
        let trimmed = base_url.trim().trim_end_matches('/');
        if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
            return Err(ValidationError::InvalidConfig {
                name: BASE_URL_VAR,
                value: base_url,
            });
        }
        self.base_url = trimmed.to_owned();
        Ok(self)
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Result<Self, ValidationError> {
        if timeout_ms == 0 {
            return Err(ValidationError::InvalidConfig {
                name: TIMEOUT_VAR,
                value: timeout_ms.to_string(),
            });
        }
        self.timeout_ms = timeout_ms;
        Ok(self)
    }
}
