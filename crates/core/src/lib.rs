pub mod errors;
pub mod models;
pub mod providers;
pub mod services;
pub mod storage;

use models::{
    coin::Coin,
    forecast::ForecastSeries,
    holdings::HoldingsRecord,
    settings::Settings,
    valuation::{ForecastChange, HoldingsValuation, PortfolioForecast},
};
use services::{portfolio_service::PortfolioService, valuation_service::ValuationService};
use std::collections::{BTreeSet, HashMap};
use std::path::PathBuf;
use storage::manager::FileStore;
use storage::traits::{ForecastSource, HoldingsSource, PriceSource};
use tracing::{debug, info};

use errors::CoreError;

/// Main entry point for the Crypto Portfolio Tracker core library.
///
/// Wraps a store (anything implementing the loader traits) with the tracked
/// coin set and forecast horizon. Every call reads fresh data from the store.
#[must_use]
pub struct PortfolioTracker<S> {
    store: S,
    coins: BTreeSet<Coin>,
    horizon_days: u32,
    valuation_service: ValuationService,
    portfolio_service: PortfolioService,
}

impl<S> std::fmt::Debug for PortfolioTracker<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PortfolioTracker")
            .field("coins", &self.coins)
            .field("horizon_days", &self.horizon_days)
            .finish()
    }
}

impl<S> PortfolioTracker<S> {
    /// Create a tracker over `store` for the given coins and horizon.
    pub fn new(store: S, coins: &[Coin], horizon_days: u32) -> Result<Self, CoreError> {
        if coins.is_empty() {
            return Err(CoreError::ValidationError("At least one coin must be tracked".into()));
        }
        if horizon_days == 0 {
            return Err(CoreError::ValidationError("Forecast horizon must be at least 1 day".into()));
        }
        Ok(Self {
            store,
            coins: coins.iter().copied().collect(),
            horizon_days,
            valuation_service: ValuationService::new(),
            portfolio_service: PortfolioService::new(),
        })
    }

    pub fn from_settings(store: S, settings: &Settings) -> Result<Self, CoreError> {
        settings.validate()?;
        Self::new(store, &settings.tracked_coins, settings.horizon_days)
    }

    /// Tracked coins in canonical order.
    #[must_use]
    pub fn coins(&self) -> Vec<Coin> {
        self.coins.iter().copied().collect()
    }

    #[must_use]
    pub fn horizon_days(&self) -> u32 {
        self.horizon_days
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }
}

// ── Holdings & Forecasts ────────────────────────────────────────────

impl<S: HoldingsSource + ForecastSource> PortfolioTracker<S> {
    pub fn wallet_ids(&self) -> Result<Vec<String>, CoreError> {
        self.store.wallet_ids()
    }

    /// The wallet used when none is chosen: the first one in the holdings file.
    pub fn default_wallet(&self) -> Result<String, CoreError> {
        self.store
            .wallet_ids()?
            .into_iter()
            .next()
            .ok_or_else(|| CoreError::ValidationError("No wallets available".into()))
    }

    pub fn holdings(&self, wallet_id: &str) -> Result<HoldingsRecord, CoreError> {
        self.store.load_holdings(wallet_id)
    }

    /// Load the forecast of every tracked coin. Fails on the first coin
    /// without forecast data.
    pub fn load_forecasts(&self) -> Result<HashMap<Coin, ForecastSeries>, CoreError> {
        self.coins
            .iter()
            .map(|&coin| self.store.load_forecast(coin).map(|s| (coin, s)))
            .collect()
    }

    /// Portfolio value forecast of one wallet.
    ///
    /// A zero day-1 value is not an error here: it comes back as
    /// `ForecastChange::NotApplicable` for the display to show "N/A".
    pub fn forecast_for_wallet(&self, wallet_id: &str) -> Result<PortfolioForecast, CoreError> {
        let holdings = self.store.load_holdings(wallet_id)?;
        let forecasts = self.load_forecasts()?;

        let series = self.valuation_service.compute_valuation(
            &holdings,
            &forecasts,
            &self.coins,
            self.horizon_days,
        )?;

        let change = match self.valuation_service.compute_summary(&series) {
            Ok(summary) => ForecastChange::Percent(summary),
            Err(CoreError::DivisionByZero) => ForecastChange::NotApplicable,
            Err(e) => return Err(e),
        };
        debug!(wallet = wallet_id, days = series.len(), "computed portfolio forecast");

        Ok(PortfolioForecast {
            wallet_id: wallet_id.to_string(),
            series,
            change,
        })
    }
}

// ── Current Value ───────────────────────────────────────────────────

impl<S: HoldingsSource + PriceSource> PortfolioTracker<S> {
    /// Latest known price of every tracked coin that has one.
    pub fn latest_prices(&self) -> Result<HashMap<Coin, f64>, CoreError> {
        let mut prices = HashMap::new();
        for &coin in &self.coins {
            match self.store.latest_price(coin) {
                Ok(price) => {
                    prices.insert(coin, price);
                }
                Err(CoreError::PriceUnavailable(_)) => {
                    debug!(%coin, "no price history");
                }
                Err(e) => return Err(e),
            }
        }
        Ok(prices)
    }

    /// Value a wallet's holdings at the latest known prices.
    pub fn value_holdings(&self, wallet_id: &str) -> Result<HoldingsValuation, CoreError> {
        let holdings = self.store.load_holdings(wallet_id)?;
        let prices = self.latest_prices()?;
        Ok(self
            .portfolio_service
            .value_holdings(&holdings, &prices, &self.coins))
    }
}

// ── File Pipeline ───────────────────────────────────────────────────

impl PortfolioTracker<FileStore> {
    /// Compute the portfolio forecast of `wallet_id` (the first wallet when
    /// `None`) and write it to `portfolio_forecast.csv`.
    pub fn run_portfolio_forecast(
        &self,
        wallet_id: Option<&str>,
    ) -> Result<(PortfolioForecast, PathBuf), CoreError> {
        let wallet_id = match wallet_id {
            Some(id) => id.to_string(),
            None => self.default_wallet()?,
        };
        let forecast = self.forecast_for_wallet(&wallet_id)?;
        let path = self.store.save_valuation(&forecast.series)?;
        info!(
            wallet = wallet_id.as_str(),
            days = forecast.series.len(),
            path = %path.display(),
            "portfolio forecast written"
        );
        Ok((forecast, path))
    }
}
