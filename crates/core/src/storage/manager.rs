use chrono::NaiveDateTime;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::errors::CoreError;
use crate::models::coin::Coin;
use crate::models::forecast::{ForecastPoint, ForecastSeries};
use crate::models::holdings::{HoldingsRecord, RawWalletBook, WalletBook};
use crate::models::price::{HistoryRow, PricePoint, HISTORY_DATE_FORMAT};
use crate::models::valuation::{PortfolioValuationSeries, ValuationPoint};

use super::format::DataLayout;
use super::traits::{ForecastSource, HoldingsSource, PriceSource};

/// Flat-file store: every pipeline artifact lives as JSON/CSV in one directory.
///
/// Each read goes to disk, so results always reflect the latest files.
#[derive(Debug, Clone)]
pub struct FileStore {
    layout: DataLayout,
}

impl FileStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            layout: DataLayout::new(data_dir),
        }
    }

    pub fn layout(&self) -> &DataLayout {
        &self.layout
    }

    // ── Wallets ─────────────────────────────────────────────────────

    /// Read `wallet_balances.json`.
    pub fn load_wallets(&self) -> Result<WalletBook, CoreError> {
        let path = self.layout.wallets();
        let content = fs::read_to_string(&path)
            .map_err(|e| CoreError::FileIO(format!("{}: {e}", path.display())))?;
        let raw: RawWalletBook = serde_json::from_str(&content)
            .map_err(|e| CoreError::Deserialization(format!("{}: {e}", path.display())))?;
        let book = WalletBook::from_raw(&raw)?;
        debug!(wallets = book.len(), path = %path.display(), "loaded wallets");
        Ok(book)
    }

    /// Write `wallet_balances.json` (pretty-printed), creating the data directory.
    pub fn save_wallets(&self, book: &WalletBook) -> Result<PathBuf, CoreError> {
        let path = self.layout.wallets();
        let json = serde_json::to_string_pretty(&book.to_raw())
            .map_err(|e| CoreError::Serialization(format!("Failed to serialize wallets: {e}")))?;
        self.ensure_dir()?;
        fs::write(&path, json)?;
        Ok(path)
    }

    // ── Price history ───────────────────────────────────────────────

    /// Write `{SYMBOL}_history.csv`, replacing any previous file.
    /// Returns the number of rows written.
    pub fn save_history(&self, coin: Coin, points: &[PricePoint]) -> Result<usize, CoreError> {
        self.ensure_dir()?;
        let mut writer = csv::Writer::from_path(self.layout.history(coin))?;
        for point in points {
            writer.serialize(HistoryRow::from(point))?;
        }
        writer.flush()?;
        Ok(points.len())
    }

    /// Read `{SYMBOL}_history.csv` in file order.
    pub fn load_history(&self, coin: Coin) -> Result<Vec<PricePoint>, CoreError> {
        let path = self.layout.history(coin);
        if !path.exists() {
            return Err(CoreError::PriceUnavailable(coin));
        }
        let mut reader = csv::Reader::from_path(&path)?;
        let mut points = Vec::new();
        for row in reader.deserialize::<HistoryRow>() {
            let row = row?;
            let timestamp = NaiveDateTime::parse_from_str(&row.date, HISTORY_DATE_FORMAT)
                .map_err(|e| CoreError::Csv(format!("{}: bad date '{}': {e}", path.display(), row.date)))?;
            points.push(PricePoint {
                timestamp,
                price: row.price,
            });
        }
        Ok(points)
    }

    // ── Forecasts ───────────────────────────────────────────────────

    /// Write `{SYMBOL}_forecast.csv`. Normally the external model does this.
    pub fn save_forecast(&self, series: &ForecastSeries) -> Result<(), CoreError> {
        self.ensure_dir()?;
        write_rows(&self.layout.forecast(series.coin()), &series.points())
    }

    // ── Portfolio forecast ──────────────────────────────────────────

    /// Write `portfolio_forecast.csv`.
    pub fn save_valuation(&self, series: &PortfolioValuationSeries) -> Result<PathBuf, CoreError> {
        self.ensure_dir()?;
        let path = self.layout.portfolio_forecast();
        write_rows(&path, series.points())?;
        Ok(path)
    }

    /// Read `portfolio_forecast.csv` back.
    pub fn load_valuation(&self) -> Result<PortfolioValuationSeries, CoreError> {
        let path = self.layout.portfolio_forecast();
        if !path.exists() {
            return Err(CoreError::FileIO(format!("{}: file not found", path.display())));
        }
        let mut reader = csv::Reader::from_path(&path)?;
        let points = reader
            .deserialize::<ValuationPoint>()
            .collect::<Result<Vec<_>, _>>()?;
        PortfolioValuationSeries::new(points)
            .map_err(|e| CoreError::ValidationError(format!("{}: {e}", path.display())))
    }

    fn ensure_dir(&self) -> Result<(), CoreError> {
        fs::create_dir_all(self.layout.root())?;
        Ok(())
    }
}

fn write_rows<T: serde::Serialize>(path: &Path, rows: &[T]) -> Result<(), CoreError> {
    let mut writer = csv::Writer::from_path(path)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

impl HoldingsSource for FileStore {
    fn wallet_ids(&self) -> Result<Vec<String>, CoreError> {
        Ok(self.load_wallets()?.wallet_ids())
    }

    fn load_holdings(&self, wallet_id: &str) -> Result<HoldingsRecord, CoreError> {
        self.load_wallets()?.get(wallet_id).cloned()
    }
}

impl ForecastSource for FileStore {
    fn load_forecast(&self, coin: Coin) -> Result<ForecastSeries, CoreError> {
        let path = self.layout.forecast(coin);
        if !path.exists() {
            return Err(CoreError::ForecastUnavailable(coin));
        }
        let mut reader = csv::Reader::from_path(&path)?;
        let points = reader
            .deserialize::<ForecastPoint>()
            .collect::<Result<Vec<_>, _>>()?;
        if points.is_empty() {
            return Err(CoreError::ForecastUnavailable(coin));
        }
        let series = ForecastSeries::new(coin, points)?;
        debug!(%coin, days = series.len(), "loaded forecast");
        Ok(series)
    }
}

impl PriceSource for FileStore {
    fn latest_price(&self, coin: Coin) -> Result<f64, CoreError> {
        self.load_history(coin)?
            .last()
            .map(|p| p.price)
            .ok_or(CoreError::PriceUnavailable(coin))
    }
}
