use indexmap::IndexMap;
use std::collections::BTreeMap;
use std::str::FromStr;
use tracing::warn;

use crate::errors::CoreError;
use super::coin::Coin;

/// Holdings JSON as it appears on disk: wallet → { "btc": 1.25, ... }.
/// Wallets keep their file order.
pub type RawWalletBook = IndexMap<String, BTreeMap<String, f64>>;

/// Per-coin quantities held by one wallet.
///
/// A coin that was never set reads as `0.0`. Quantities are always finite
/// and non-negative; the constructors enforce it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HoldingsRecord {
    amounts: BTreeMap<Coin, f64>,
}

impl HoldingsRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a record from `(coin, amount)` pairs. Later pairs overwrite earlier ones.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (Coin, f64)>) -> Result<Self, CoreError> {
        let mut record = Self::new();
        for (coin, amount) in pairs {
            record.set(coin, amount)?;
        }
        Ok(record)
    }

    /// Set the quantity held of `coin`.
    pub fn set(&mut self, coin: Coin, amount: f64) -> Result<(), CoreError> {
        if !amount.is_finite() || amount < 0.0 {
            return Err(CoreError::ValidationError(format!(
                "Holding of {coin} must be a non-negative number, got {amount}"
            )));
        }
        self.amounts.insert(coin, amount);
        Ok(())
    }

    /// Quantity held of `coin`, `0.0` when the wallet holds none.
    pub fn get(&self, coin: Coin) -> f64 {
        self.amounts.get(&coin).copied().unwrap_or(0.0)
    }

    /// Coins with an explicit entry, in canonical order.
    pub fn coins(&self) -> impl Iterator<Item = Coin> + '_ {
        self.amounts.keys().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.amounts.is_empty()
    }

    /// Parse the lowercase-keyed JSON object of one wallet.
    ///
    /// Keys that name no known coin cannot contribute to any valuation and are
    /// skipped with a warning. Invalid quantities fail the whole record.
    pub fn from_raw(wallet: &str, raw: &BTreeMap<String, f64>) -> Result<Self, CoreError> {
        let mut record = Self::new();
        for (key, amount) in raw {
            match Coin::from_str(key) {
                Ok(coin) => record.set(coin, *amount).map_err(|e| {
                    CoreError::ValidationError(format!("Wallet {wallet}: {e}"))
                })?,
                Err(_) => warn!(wallet, key = key.as_str(), "skipping unknown coin in holdings"),
            }
        }
        Ok(record)
    }

    /// Inverse of [`HoldingsRecord::from_raw`].
    pub fn to_raw(&self) -> BTreeMap<String, f64> {
        self.amounts
            .iter()
            .map(|(coin, amount)| (coin.holdings_key().to_string(), *amount))
            .collect()
    }
}

/// All wallets known to the holdings store, in the order they were added
/// (file order when loaded from disk).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WalletBook {
    wallets: IndexMap<String, HoldingsRecord>,
}

impl WalletBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a wallet. A replaced wallet keeps its position.
    pub fn insert(&mut self, wallet_id: impl Into<String>, holdings: HoldingsRecord) {
        self.wallets.insert(wallet_id.into(), holdings);
    }

    /// Look up one wallet. Fails with `WalletNotFound` for an unknown identifier.
    pub fn get(&self, wallet_id: &str) -> Result<&HoldingsRecord, CoreError> {
        self.wallets
            .get(wallet_id)
            .ok_or_else(|| CoreError::WalletNotFound(wallet_id.to_string()))
    }

    pub fn wallet_ids(&self) -> Vec<String> {
        self.wallets.keys().cloned().collect()
    }

    /// The first wallet in file order, if any.
    pub fn first(&self) -> Option<(&str, &HoldingsRecord)> {
        self.wallets.iter().next().map(|(id, h)| (id.as_str(), h))
    }

    pub fn len(&self) -> usize {
        self.wallets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.wallets.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &HoldingsRecord)> {
        self.wallets.iter().map(|(id, h)| (id.as_str(), h))
    }

    pub fn from_raw(raw: &RawWalletBook) -> Result<Self, CoreError> {
        let mut book = Self::new();
        for (wallet_id, holdings) in raw {
            book.insert(wallet_id.clone(), HoldingsRecord::from_raw(wallet_id, holdings)?);
        }
        Ok(book)
    }

    pub fn to_raw(&self) -> RawWalletBook {
        self.wallets
            .iter()
            .map(|(id, h)| (id.clone(), h.to_raw()))
            .collect()
    }
}
