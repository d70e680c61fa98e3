use std::collections::{BTreeSet, HashMap};

use crate::models::coin::Coin;
use crate::models::holdings::HoldingsRecord;
use crate::models::valuation::{CoinValuation, HoldingsValuation};

/// Values a wallet's current holdings at the latest known prices.
///
/// No I/O: prices come in from the caller.
pub struct PortfolioService;

impl PortfolioService {
    pub fn new() -> Self {
        Self
    }

    /// Value each tracked coin as `amount × latest price` and sum the total.
    ///
    /// A coin without a known price contributes zero and is flagged with
    /// `price_missing`, so the display can tell "no price" from "worth nothing".
    pub fn value_holdings(
        &self,
        holdings: &HoldingsRecord,
        prices: &HashMap<Coin, f64>,
        coins: &BTreeSet<Coin>,
    ) -> HoldingsValuation {
        let mut total_value = 0.0;
        let coins: Vec<CoinValuation> = coins
            .iter()
            .map(|&coin| {
                let amount = holdings.get(coin);
                let (price, price_missing) = match prices.get(&coin) {
                    Some(&p) => (p, false),
                    None => (0.0, true),
                };
                let value = amount * price;
                total_value += value;
                CoinValuation {
                    coin,
                    amount,
                    price,
                    value,
                    price_missing,
                }
            })
            .collect();

        HoldingsValuation { coins, total_value }
    }

    /// Share of each coin in the wallet's total value, in percent.
    /// Empty when the wallet is worth nothing.
    pub fn allocation(&self, valuation: &HoldingsValuation) -> Vec<(Coin, f64)> {
        if valuation.total_value <= 0.0 {
            return Vec::new();
        }
        valuation
            .coins
            .iter()
            .map(|c| (c.coin, c.value / valuation.total_value * 100.0))
            .collect()
    }
}

impl Default for PortfolioService {
    fn default() -> Self {
        Self::new()
    }
}
