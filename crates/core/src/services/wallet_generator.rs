use rand::Rng;

use crate::errors::CoreError;
use crate::models::coin::Coin;
use crate::models::holdings::{HoldingsRecord, WalletBook};

const HEX_CHARS: &[u8] = b"0123456789abcdef";

/// Creates mock wallets with random addresses and holdings.
///
/// Generic over the RNG so tests can pass a seeded `StdRng` and get the same
/// wallets every run.
pub struct WalletGenerator<R: Rng> {
    rng: R,
}

impl<R: Rng> WalletGenerator<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// `0x` followed by 40 lowercase hex characters.
    pub fn address(&mut self) -> String {
        let mut addr = String::with_capacity(42);
        addr.push_str("0x");
        for _ in 0..40 {
            let idx = self.rng.gen_range(0..HEX_CHARS.len());
            addr.push(HEX_CHARS[idx] as char);
        }
        addr
    }

    /// Random holdings for each of `coins`, rounded to 4 decimals.
    pub fn holdings(&mut self, coins: &[Coin]) -> Result<HoldingsRecord, CoreError> {
        let mut record = HoldingsRecord::new();
        for &coin in coins {
            let (low, high) = holding_range(coin);
            let amount = self.rng.gen_range(low..=high);
            record.set(coin, round4(amount))?;
        }
        Ok(record)
    }

    /// `count` distinct wallets, each holding every coin in `coins`.
    pub fn generate(&mut self, count: usize, coins: &[Coin]) -> Result<WalletBook, CoreError> {
        let mut book = WalletBook::new();
        while book.len() < count {
            let address = self.address();
            let holdings = self.holdings(coins)?;
            book.insert(address, holdings);
        }
        Ok(book)
    }
}

/// Inclusive range a mock balance of `coin` is drawn from.
pub fn holding_range(coin: Coin) -> (f64, f64) {
    match coin {
        Coin::Btc => (0.1, 5.0),
        Coin::Eth => (1.0, 50.0),
        Coin::Sol => (10.0, 500.0),
        Coin::Xrp => (1_000.0, 50_000.0),
        Coin::Ada => (100.0, 20_000.0),
        Coin::Doge => (1_000.0, 100_000.0),
    }
}

fn round4(x: f64) -> f64 {
    (x * 10_000.0).round() / 10_000.0
}
