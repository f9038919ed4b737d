//! # Configuration State
//!
//! Stores application configuration loaded at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`LOOP_*`)
//! 2. Defaults (this file)
//!
//! ## Thread Safety
//! Configuration is read-only after initialization, so no mutex needed.

use std::path::PathBuf;

use loop_core::money::CURRENCY_CODE;
use loop_core::{ConversionRate, Money, ValidationError};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

/// Commerce API used when `LOOP_SERVER` is not set.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";

/// Environment variable names.
pub const ENV_SERVER: &str = "LOOP_SERVER";
pub const ENV_CONVERSION_RATE: &str = "LOOP_REWARD_CONVERSION_RATE";
pub const ENV_CURRENCY_CODE: &str = "LOOP_CURRENCY_CODE";
pub const ENV_DATA_DIR: &str = "LOOP_DATA_DIR";

/// A configuration value that could not be used.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{var} must be a whole number, got '{value}'")]
    NotANumber { var: &'static str, value: String },

    #[error("{var}: {source}")]
    Invalid {
        var: &'static str,
        #[source]
        source: ValidationError,
    },

    #[error("{var} must not be empty")]
    Empty { var: &'static str },

    #[error("{var} is not a usable http(s) URL: '{value}'")]
    InvalidUrl { var: &'static str, value: String },
}

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigState {
    /// Base URL of the commerce API (no trailing slash)
    pub api_base_url: String,

    /// Rupees one reward point is worth
    pub conversion_rate: ConversionRate,

    /// Currency code shown next to amounts
    pub currency_code: String,

    /// Overrides the platform data directory for session files
    pub data_dir: Option<PathBuf>,
}

impl Default for ConfigState {
    /// ## Default Values
    /// - API: `http://localhost:8000`
    /// - Rewards: 1 point = PKR 100
    /// - Currency: PKR
    fn default() -> Self {
        ConfigState {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            conversion_rate: ConversionRate::default(),
            currency_code: CURRENCY_CODE.to_string(),
            data_dir: None,
        }
    }
}

impl ConfigState {
    /// Creates a new ConfigState from environment variables and defaults.
    ///
    /// ## Environment Variables
    /// - `LOOP_SERVER`: Commerce API base URL
    /// - `LOOP_REWARD_CONVERSION_RATE`: Rupees per reward point (e.g. "100")
    /// - `LOOP_CURRENCY_CODE`: Display currency
    /// - `LOOP_DATA_DIR`: Where the cart and session files live
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from any variable lookup.
    pub fn from_vars<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = ConfigState::default();

        if let Some(server) = lookup(ENV_SERVER) {
            let server = server.trim().trim_end_matches('/');
            if server.is_empty() {
                return Err(ConfigError::Empty { var: ENV_SERVER });
            }
            let usable = Url::parse(server)
                .map(|url| matches!(url.scheme(), "http" | "https") && url.has_host())
                .unwrap_or(false);
            if !usable {
                return Err(ConfigError::InvalidUrl {
                    var: ENV_SERVER,
                    value: server.to_string(),
                });
            }
            config.api_base_url = server.to_string();
        }

        if let Some(rate) = lookup(ENV_CONVERSION_RATE) {
            let rupees = rate
                .trim()
                .parse::<i64>()
                .map_err(|_| ConfigError::NotANumber {
                    var: ENV_CONVERSION_RATE,
                    value: rate.clone(),
                })?;
            config.conversion_rate =
                ConversionRate::new(rupees).map_err(|source| ConfigError::Invalid {
                    var: ENV_CONVERSION_RATE,
                    source,
                })?;
        }

        if let Some(code) = lookup(ENV_CURRENCY_CODE) {
            let code = code.trim();
            if code.is_empty() {
                return Err(ConfigError::Empty {
                    var: ENV_CURRENCY_CODE,
                });
            }
            config.currency_code = code.to_uppercase();
        }

        if let Some(dir) = lookup(ENV_DATA_DIR).filter(|d| !d.trim().is_empty()) {
            config.data_dir = Some(PathBuf::from(dir));
        }

        Ok(config)
    }

    /// Joins an API path onto the base URL.
    ///
    /// ## Example
    /// ```rust
    /// use loop_storefront::state::ConfigState;
    ///
    /// let config = ConfigState::default();
    /// assert_eq!(config.endpoint("/order/create"), "http://localhost:8000/order/create");
    /// ```
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.api_base_url, path.trim_start_matches('/'))
    }

    /// Formats an amount the way the storefront shows prices.
    ///
    /// ## Example
    /// ```rust
    /// use loop_core::Money;
    /// use loop_storefront::state::ConfigState;
    ///
    /// let config = ConfigState::default();
    /// assert_eq!(config.format_currency(Money::from_rupees(1500)), "PKR 1,500");
    /// ```
    pub fn format_currency(&self, amount: Money) -> String {
        format!("{} {}", self.currency_code, amount.grouped())
    }
}
