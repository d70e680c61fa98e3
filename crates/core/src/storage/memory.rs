use std::collections::HashMap;

use crate::errors::CoreError;
use crate::models::coin::Coin;
use crate::models::forecast::ForecastSeries;
use crate::models::holdings::{HoldingsRecord, WalletBook};

use super::traits::{ForecastSource, HoldingsSource, PriceSource};

/// In-memory store for callers that already hold the data (and for tests).
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    wallets: WalletBook,
    forecasts: HashMap<Coin, ForecastSeries>,
    prices: HashMap<Coin, f64>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_wallet(mut self, wallet_id: impl Into<String>, holdings: HoldingsRecord) -> Self {
        self.wallets.insert(wallet_id, holdings);
        self
    }

    pub fn with_forecast(mut self, series: ForecastSeries) -> Self {
        self.forecasts.insert(series.coin(), series);
        self
    }

    pub fn with_price(mut self, coin: Coin, price: f64) -> Self {
        self.prices.insert(coin, price);
        self
    }
}

impl HoldingsSource for MemoryStore {
    fn wallet_ids(&self) -> Result<Vec<String>, CoreError> {
        Ok(self.wallets.wallet_ids())
    }

    fn load_holdings(&self, wallet_id: &str) -> Result<HoldingsRecord, CoreError> {
        self.wallets.get(wallet_id).cloned()
    }
}

impl ForecastSource for MemoryStore {
    fn load_forecast(&self, coin: Coin) -> Result<ForecastSeries, CoreError> {
        self.forecasts
            .get(&coin)
            .cloned()
            .ok_or(CoreError::ForecastUnavailable(coin))
    }
}

impl PriceSource for MemoryStore {
    fn latest_price(&self, coin: Coin) -> Result<f64, CoreError> {
        self.prices
            .get(&coin)
            .copied()
            .ok_or(CoreError::PriceUnavailable(coin))
    }
}
