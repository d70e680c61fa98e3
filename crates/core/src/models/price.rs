use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Timestamp format of the `date` column in `{SYMBOL}_history.csv`.
pub const HISTORY_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A single historical price sample.
#[derive(Debug, Clone, PartialEq)]
pub struct PricePoint {
    pub timestamp: NaiveDateTime,
    pub price: f64,
}

/// On-disk row of a history file.
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct HistoryRow {
    pub date: String,
    pub price: f64,
}

impl From<&PricePoint> for HistoryRow {
    fn from(p: &PricePoint) -> Self {
        Self {
            date: p.timestamp.format(HISTORY_DATE_FORMAT).to_string(),
            price: p.price,
        }
    }
}
