use crate::errors::CoreError;
use crate::models::coin::Coin;
use crate::models::forecast::ForecastSeries;
use crate::models::holdings::HoldingsRecord;

/// Where wallet holdings come from (flat file, memory, ...).
///
/// Implementations return fresh data on every call; nothing is cached
/// between calls, so a refresh always sees the latest file on disk.
pub trait HoldingsSource {
    /// All known wallet identifiers, in a stable order.
    fn wallet_ids(&self) -> Result<Vec<String>, CoreError>;

    /// Holdings of one wallet. Fails with `WalletNotFound` for an unknown id.
    fn load_holdings(&self, wallet_id: &str) -> Result<HoldingsRecord, CoreError>;
}

/// Where per-coin price forecasts come from.
pub trait ForecastSource {
    /// Forecast series of `coin`. Fails with `ForecastUnavailable` when the
    /// forecast model has produced nothing for it yet.
    fn load_forecast(&self, coin: Coin) -> Result<ForecastSeries, CoreError>;
}

/// Where the latest known market price of a coin comes from.
pub trait PriceSource {
    /// Fails with `PriceUnavailable` when no history has been fetched.
    fn latest_price(&self, coin: Coin) -> Result<f64, CoreError>;
}
