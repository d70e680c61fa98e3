use std::time::Duration;
use tracing::{info, warn};

use crate::models::coin::Coin;
use crate::providers::traits::PriceHistoryProvider;
use crate::storage::manager::FileStore;

/// Result of fetching one coin's history.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    /// Number of price rows written to `{SYMBOL}_history.csv`.
    Saved(usize),
    /// Fetch or write failed, with the error message.
    Failed(String),
}

/// Per-coin results of one fetch run, in request order.
#[derive(Debug, Clone, Default)]
pub struct FetchReport {
    pub outcomes: Vec<(Coin, FetchOutcome)>,
}

impl FetchReport {
    pub fn saved_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|(_, o)| matches!(o, FetchOutcome::Saved(_)))
            .count()
    }

    pub fn failed(&self) -> Vec<Coin> {
        self.outcomes
            .iter()
            .filter(|(_, o)| matches!(o, FetchOutcome::Failed(_)))
            .map(|(c, _)| *c)
            .collect()
    }
}

/// Downloads price history for the tracked coins and writes it to the store.
///
/// Coins are fetched one at a time with a pause in between, to stay under the
/// provider's rate limit. A failing coin is logged and the run moves on.
pub struct HistoryService {
    provider: Box<dyn PriceHistoryProvider>,
    request_delay: Duration,
}

impl HistoryService {
    pub fn new(provider: Box<dyn PriceHistoryProvider>, request_delay: Duration) -> Self {
        Self {
            provider,
            request_delay,
        }
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    pub async fn fetch_all(
        &self,
        store: &FileStore,
        coins: &[Coin],
        vs_currency: &str,
        days: u32,
    ) -> FetchReport {
        let mut report = FetchReport::default();

        for (idx, &coin) in coins.iter().enumerate() {
            if idx > 0 && !self.request_delay.is_zero() {
                tokio::time::sleep(self.request_delay).await;
            }

            info!(%coin, provider = self.provider.name(), "fetching price history");
            let outcome = match self.provider.fetch_history(coin, vs_currency, days).await {
                Ok(points) => match store.save_history(coin, &points) {
                    Ok(rows) => {
                        info!(%coin, rows, "saved price history");
                        FetchOutcome::Saved(rows)
                    }
                    Err(e) => {
                        warn!(%coin, error = %e, "failed to write price history");
                        FetchOutcome::Failed(e.to_string())
                    }
                },
                Err(e) => {
                    warn!(%coin, error = %e, "failed to fetch price history");
                    FetchOutcome::Failed(e.to_string())
                }
            };
            report.outcomes.push((coin, outcome));
        }

        report
    }
}
