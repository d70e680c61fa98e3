use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::errors::CoreError;
use super::coin::Coin;

/// One row of a `{SYMBOL}_forecast.csv` file.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForecastPoint {
    pub day: u32,
    pub predicted_price: f64,
}

/// Predicted price of one coin for each future day (day 1 = tomorrow).
///
/// Days are unique and start at 1. Prices are finite and non-negative. Whether
/// the days cover a given horizon without gaps is checked by the consumer,
/// since only it knows the horizon.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastSeries {
    coin: Coin,
    prices: BTreeMap<u32, f64>,
}

impl ForecastSeries {
    pub fn new(coin: Coin, points: impl IntoIterator<Item = ForecastPoint>) -> Result<Self, CoreError> {
        let mut prices = BTreeMap::new();
        for point in points {
            if point.day == 0 {
                return Err(CoreError::ValidationError(format!(
                    "{coin} forecast: day indices start at 1"
                )));
            }
            if !point.predicted_price.is_finite() || point.predicted_price < 0.0 {
                return Err(CoreError::ValidationError(format!(
                    "{coin} forecast: invalid price {} on day {}",
                    point.predicted_price, point.day
                )));
            }
            if prices.insert(point.day, point.predicted_price).is_some() {
                return Err(CoreError::ValidationError(format!(
                    "{coin} forecast: day {} appears more than once",
                    point.day
                )));
            }
        }
        Ok(Self { coin, prices })
    }

    /// Shorthand for `(day, price)` tuples.
    pub fn from_prices(coin: Coin, prices: &[(u32, f64)]) -> Result<Self, CoreError> {
        Self::new(
            coin,
            prices.iter().map(|&(day, predicted_price)| ForecastPoint { day, predicted_price }),
        )
    }

    pub fn coin(&self) -> Coin {
        self.coin
    }

    pub fn price_on(&self, day: u32) -> Option<f64> {
        self.prices.get(&day).copied()
    }

    /// Number of days with a prediction.
    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }

    /// Points in ascending day order.
    pub fn points(&self) -> Vec<ForecastPoint> {
        self.prices
            .iter()
            .map(|(&day, &predicted_price)| ForecastPoint { day, predicted_price })
            .collect()
    }
}
