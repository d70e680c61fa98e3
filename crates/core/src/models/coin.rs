use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::errors::CoreError;

/// A tradable asset tracked by the system.
///
/// The set is closed: every external spelling (holdings JSON key, file name,
/// API id) goes through the explicit mappings below, so a typo surfaces as
/// `CoreError::InvalidCoin` instead of silently reading zero.
///
/// Variant order is the canonical iteration order used by valuation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Coin {
    Btc,
    Eth,
    Sol,
    Xrp,
    Ada,
    Doge,
}

impl Coin {
    /// Every known coin, in canonical order.
    pub const ALL: [Coin; 6] = [
        Coin::Btc,
        Coin::Eth,
        Coin::Sol,
        Coin::Xrp,
        Coin::Ada,
        Coin::Doge,
    ];

    /// Coins tracked when no configuration says otherwise.
    pub const DEFAULT_TRACKED: [Coin; 4] = [Coin::Btc, Coin::Eth, Coin::Sol, Coin::Xrp];

    /// Uppercase ticker, also used in data file names (`BTC_forecast.csv`).
    pub fn symbol(self) -> &'static str {
        match self {
            Coin::Btc => "BTC",
            Coin::Eth => "ETH",
            Coin::Sol => "SOL",
            Coin::Xrp => "XRP",
            Coin::Ada => "ADA",
            Coin::Doge => "DOGE",
        }
    }

    /// Lowercase key used in `wallet_balances.json`.
    pub fn holdings_key(self) -> &'static str {
        match self {
            Coin::Btc => "btc",
            Coin::Eth => "eth",
            Coin::Sol => "sol",
            Coin::Xrp => "xrp",
            Coin::Ada => "ada",
            Coin::Doge => "doge",
        }
    }

    /// CoinGecko asset id (`/coins/{id}/market_chart`).
    pub fn coingecko_id(self) -> &'static str {
        match self {
            Coin::Btc => "bitcoin",
            Coin::Eth => "ethereum",
            Coin::Sol => "solana",
            Coin::Xrp => "ripple",
            Coin::Ada => "cardano",
            Coin::Doge => "dogecoin",
        }
    }

    /// Human-readable name.
    pub fn name(self) -> &'static str {
        match self {
            Coin::Btc => "Bitcoin",
            Coin::Eth => "Ethereum",
            Coin::Sol => "Solana",
            Coin::Xrp => "XRP",
            Coin::Ada => "Cardano",
            Coin::Doge => "Dogecoin",
        }
    }
}

impl std::fmt::Display for Coin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Accepts the ticker in any case (`BTC`, `btc`, ` Btc `).
impl FromStr for Coin {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_uppercase();
        Coin::ALL
            .iter()
            .copied()
            .find(|c| c.symbol() == upper)
            .ok_or_else(|| CoreError::InvalidCoin(s.to_string()))
    }
}
