use thiserror::Error;

use crate::models::coin::Coin;

/// Unified error type for the entire crypto-portfolio-core library.
/// Every public function returns `Result<T, CoreError>`.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Valuation ───────────────────────────────────────────────────
    /// A tracked coin, or one day of its forecast, is absent from the input.
    #[error("Missing forecast data for {coin}{}", day_suffix(.day))]
    MissingData { coin: Coin, day: Option<u32> },

    #[error("Percent change is undefined: day 1 portfolio value is zero")]
    DivisionByZero,

    // ── Loaders ─────────────────────────────────────────────────────
    #[error("Wallet not found: {0}")]
    WalletNotFound(String),

    #[error("Forecast not available for {0} (has the forecast model run?)")]
    ForecastUnavailable(Coin),

    #[error("Price history not available for {0}")]
    PriceUnavailable(Coin),

    #[error("Unknown coin: {0}")]
    InvalidCoin(String),

    // ── File I/O / Formats ──────────────────────────────────────────
    #[error("File I/O error: {0}")]
    FileIO(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    #[error("CSV error: {0}")]
    Csv(String),

    #[error("Configuration error: {0}")]
    Config(String),

    // ── API / Network ───────────────────────────────────────────────
    #[error("API error ({provider}): {message}")]
    Api {
        provider: String,
        message: String,
    },

    #[error("Network error: {0}")]
    Network(String),

    // ── Business Logic ──────────────────────────────────────────────
    #[error("Validation failed: {0}")]
    ValidationError(String),
}

impl CoreError {
    /// `true` for conditions a caller should show to the user as a message
    /// (unknown wallet, forecast not produced yet, undefined percent change)
    /// instead of aborting.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            CoreError::WalletNotFound(_)
                | CoreError::ForecastUnavailable(_)
                | CoreError::PriceUnavailable(_)
                | CoreError::DivisionByZero
        )
    }
}

fn day_suffix(day: &Option<u32>) -> String {
    day.map(|d| format!(" on day {d}")).unwrap_or_default()
}

// ── Conversion helpers (From impls) ─────────────────────────────────

impl From<std::io::Error> for CoreError {
    fn from(e: std::io::Error) -> Self {
        CoreError::FileIO(e.to_string())
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(e: serde_json::Error) -> Self {
        CoreError::Deserialization(e.to_string())
    }
}

impl From<csv::Error> for CoreError {
    fn from(e: csv::Error) -> Self {
        CoreError::Csv(e.to_string())
    }
}

impl From<toml::de::Error> for CoreError {
    fn from(e: toml::de::Error) -> Self {
        CoreError::Config(e.to_string())
    }
}

impl From<reqwest::Error> for CoreError {
    fn from(e: reqwest::Error) -> Self {
        // reqwest errors carry the full URL; keep the query string out of messages.
        let msg = e.to_string();
        let sanitized = if let Some(idx) = msg.find('?') {
            format!("{}?<query redacted>", &msg[..idx])
        } else {
            msg
        };
        CoreError::Network(sanitized)
    }
}
