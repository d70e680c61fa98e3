use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::errors::CoreError;
use super::coin::Coin;

/// Pipeline configuration, read from `tracker.toml`. Every field has a default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Directory holding every flat file of the pipeline.
    pub data_dir: PathBuf,

    /// Coins included in fetches, valuation and reports.
    pub tracked_coins: Vec<Coin>,

    /// Number of forecast days aggregated into the portfolio forecast.
    pub horizon_days: u32,

    /// Quote currency for price history (CoinGecko `vs_currency`).
    pub vs_currency: String,

    /// Days of price history fetched per coin.
    pub history_days: u32,

    pub api_base_url: String,

    /// Pause between two history requests, in milliseconds.
    pub request_delay_ms: u64,

    /// Wallets created by `generate-wallets`.
    pub wallet_count: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            tracked_coins: Coin::DEFAULT_TRACKED.to_vec(),
            horizon_days: 7,
            vs_currency: "usd".to_string(),
            history_days: 180,
            api_base_url: "https://api.coingecko.com/api/v3".to_string(),
            request_delay_ms: 2000,
            wallet_count: 5,
        }
    }
}

impl Settings {
    /// Parse settings from TOML text and validate them.
    pub fn from_toml_str(content: &str) -> Result<Self, CoreError> {
        let settings: Settings = toml::from_str(content)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a TOML file. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, CoreError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
            .map_err(|e| CoreError::Config(format!("{}: {e}", path.display())))
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        if self.horizon_days == 0 {
            return Err(CoreError::Config("horizon_days must be at least 1".into()));
        }
        if self.tracked_coins.is_empty() {
            return Err(CoreError::Config("tracked_coins must not be empty".into()));
        }
        if self.vs_currency.trim().is_empty() {
            return Err(CoreError::Config("vs_currency must not be empty".into()));
        }
        Ok(())
    }

    /// Tracked coins, deduplicated, in canonical order.
    pub fn coins(&self) -> Vec<Coin> {
        let mut coins = self.tracked_coins.clone();
        coins.sort();
        coins.dedup();
        coins
    }
}
