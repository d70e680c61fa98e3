use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use crate::errors::CoreError;
use crate::models::coin::Coin;
use crate::models::price::PricePoint;
use super::traits::PriceHistoryProvider;

pub const DEFAULT_BASE_URL: &str = "https://api.coingecko.com/api/v3";

const PROVIDER: &str = "CoinGecko";

/// CoinGecko API provider for historical cryptocurrency prices.
///
/// - **Free**: No API key required; the public tier is rate limited, so
///   callers should pace requests (see `Settings::request_delay_ms`).
/// - **Endpoint**: `/coins/{id}/market_chart?vs_currency={cur}&days={n}`
///
/// CoinGecko uses lowercase ids like "bitcoin"; `Coin::coingecko_id` maps them.
pub struct CoinGeckoProvider {
    client: Client,
    base_url: String,
}

impl CoinGeckoProvider {
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_else(|_| Client::new());
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn market_chart_url(&self, coin: Coin, vs_currency: &str, days: u32) -> String {
        format!(
            "{}/coins/{}/market_chart?vs_currency={}&days={days}",
            self.base_url,
            coin.coingecko_id(),
            vs_currency.to_lowercase(),
        )
    }

    /// Parse a `market_chart` response body into price points.
    ///
    /// Each entry of `prices` is `[timestamp_ms, price]`. Entries with an
    /// out-of-range timestamp are dropped.
    pub fn parse_market_chart(body: &str) -> Result<Vec<PricePoint>, CoreError> {
        let chart: MarketChartResponse = serde_json::from_str(body).map_err(|e| CoreError::Api {
            provider: PROVIDER.into(),
            message: format!("Failed to parse market chart: {e}"),
        })?;

        Ok(chart
            .prices
            .iter()
            .filter_map(|&(ts_ms, price)| {
                let dt = chrono::DateTime::from_timestamp_millis(ts_ms as i64)?;
                Some(PricePoint {
                    timestamp: dt.naive_utc(),
                    price,
                })
            })
            .collect())
    }
}

impl Default for CoinGeckoProvider {
    fn default() -> Self {
        Self::new()
    }
}

// ── CoinGecko API response types ────────────────────────────────────

#[derive(Deserialize)]
struct MarketChartResponse {
    #[serde(default)]
    prices: Vec<(f64, f64)>,
}

#[async_trait]
impl PriceHistoryProvider for CoinGeckoProvider {
    fn name(&self) -> &str {
        PROVIDER
    }

    async fn fetch_history(
        &self,
        coin: Coin,
        vs_currency: &str,
        days: u32,
    ) -> Result<Vec<PricePoint>, CoreError> {
        let url = self.market_chart_url(coin, vs_currency, days);
        let resp = self.client.get(&url).send().await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(CoreError::Api {
                provider: PROVIDER.into(),
                message: format!("HTTP {status} for {coin}"),
            });
        }

        let body = resp.text().await?;
        Self::parse_market_chart(&body)
    }
}
