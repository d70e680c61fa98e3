use async_trait::async_trait;

use crate::errors::CoreError;
use crate::models::coin::Coin;
use crate::models::price::PricePoint;

/// Source of historical market prices.
///
/// `HistoryService` only talks to this trait, so the HTTP provider can be
/// swapped (or mocked in tests) without touching the fetch pipeline.
#[async_trait]
pub trait PriceHistoryProvider: Send + Sync {
    /// Human-readable name of this provider (for logs/errors).
    fn name(&self) -> &str;

    /// Price samples of `coin` over the last `days` days, oldest first,
    /// quoted in `vs_currency`.
    async fn fetch_history(
        &self,
        coin: Coin,
        vs_currency: &str,
        days: u32,
    ) -> Result<Vec<PricePoint>, CoreError>;
}
