use std::collections::{BTreeSet, HashMap};

use crate::errors::CoreError;
use crate::models::coin::Coin;
use crate::models::forecast::ForecastSeries;
use crate::models::holdings::HoldingsRecord;
use crate::models::valuation::{PortfolioValuationSeries, ValuationPoint, ValuationSummary};

/// Joins wallet holdings with per-coin forecasts into a portfolio value forecast.
///
/// Pure business logic: no I/O, no state. Identical inputs always give
/// identical output.
pub struct ValuationService;

impl ValuationService {
    pub fn new() -> Self {
        Self
    }

    /// Forecast total portfolio value for each day `1..=horizon_days`.
    ///
    /// `total(d) = Σ holdings[c] × forecasts[c][d]` over every coin in `coins`.
    /// Coins held but not listed in `coins` are ignored; listed coins the wallet
    /// doesn't hold count as zero. Every listed coin must have a forecast for
    /// every day, otherwise `MissingData` is returned and nothing is produced.
    pub fn compute_valuation(
        &self,
        holdings: &HoldingsRecord,
        forecasts: &HashMap<Coin, ForecastSeries>,
        coins: &BTreeSet<Coin>,
        horizon_days: u32,
    ) -> Result<PortfolioValuationSeries, CoreError> {
        if horizon_days == 0 {
            return Err(CoreError::ValidationError("Forecast horizon must be at least 1 day".into()));
        }
        if coins.is_empty() {
            return Err(CoreError::ValidationError("No coins to value".into()));
        }

        // Resolve every series up front so a missing coin is reported before any day.
        let mut series = Vec::with_capacity(coins.len());
        for &coin in coins {
            let forecast = forecasts
                .get(&coin)
                .ok_or(CoreError::MissingData { coin, day: None })?;
            series.push((holdings.get(coin), forecast));
        }

        // A series can't cover more days than it has points.
        let capacity = series
            .iter()
            .map(|(_, forecast)| forecast.len())
            .min()
            .unwrap_or(0)
            .min(horizon_days as usize);
        let mut points = Vec::with_capacity(capacity);
        for day in 1..=horizon_days {
            let mut total_value = 0.0;
            for (amount, forecast) in &series {
                let price = forecast.price_on(day).ok_or(CoreError::MissingData {
                    coin: forecast.coin(),
                    day: Some(day),
                })?;
                total_value += amount * price;
            }
            points.push(ValuationPoint { day, total_value });
        }

        PortfolioValuationSeries::new(points)
    }

    /// Percent change between the first and last day of `series`.
    ///
    /// Returns `DivisionByZero` when the first day is worth nothing; the caller
    /// should show "N/A" rather than a number.
    pub fn compute_summary(
        &self,
        series: &PortfolioValuationSeries,
    ) -> Result<ValuationSummary, CoreError> {
        let (first, last) = match (series.first(), series.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => {
                return Err(CoreError::ValidationError(
                    "Cannot summarize an empty valuation series".into(),
                ))
            }
        };

        if first.total_value == 0.0 {
            return Err(CoreError::DivisionByZero);
        }

        Ok(ValuationSummary {
            first_day: first.day,
            last_day: last.day,
            first_value: first.total_value,
            last_value: last.total_value,
            percent_change: (last.total_value - first.total_value) / first.total_value * 100.0,
        })
    }
}

impl Default for ValuationService {
    fn default() -> Self {
        Self::new()
    }
}
