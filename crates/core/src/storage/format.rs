use std::path::{Path, PathBuf};

use crate::models::coin::Coin;

/// Wallet holdings: `{ "<address>": { "btc": 1.0, ... } }`.
pub const WALLETS_FILE: &str = "wallet_balances.json";

/// Aggregated portfolio forecast: columns `day,total_value`.
pub const PORTFOLIO_FORECAST_FILE: &str = "portfolio_forecast.csv";

/// `{SYMBOL}_history.csv`, columns `date,price`.
pub fn history_file(coin: Coin) -> String {
    format!("{}_history.csv", coin.symbol())
}

/// `{SYMBOL}_forecast.csv`, columns `day,predicted_price`.
pub fn forecast_file(coin: Coin) -> String {
    format!("{}_forecast.csv", coin.symbol())
}

/// File locations of the pipeline inside one data directory.
#[derive(Debug, Clone)]
pub struct DataLayout {
    root: PathBuf,
}

impl DataLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn wallets(&self) -> PathBuf {
        self.root.join(WALLETS_FILE)
    }

    pub fn history(&self, coin: Coin) -> PathBuf {
        self.root.join(history_file(coin))
    }

    pub fn forecast(&self, coin: Coin) -> PathBuf {
        self.root.join(forecast_file(coin))
    }

    pub fn portfolio_forecast(&self) -> PathBuf {
        self.root.join(PORTFOLIO_FORECAST_FILE)
    }
}
