use serde::{Deserialize, Serialize};

use crate::errors::CoreError;
use super::coin::Coin;

/// Total forecast portfolio value on one day. One row of `portfolio_forecast.csv`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValuationPoint {
    pub day: u32,
    pub total_value: f64,
}

/// Day-by-day forecast portfolio value, ascending by day from day 1 with no gaps.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<ValuationPoint>", into = "Vec<ValuationPoint>")]
pub struct PortfolioValuationSeries {
    points: Vec<ValuationPoint>,
}

impl PortfolioValuationSeries {
    /// Fails with `ValidationError` unless the days run `1, 2, 3, ...`.
    pub fn new(points: Vec<ValuationPoint>) -> Result<Self, CoreError> {
        for (expected, point) in (1u32..).zip(&points) {
            if point.day != expected {
                return Err(CoreError::ValidationError(format!(
                    "Portfolio forecast day {} found where day {expected} was expected",
                    point.day
                )));
            }
        }
        Ok(Self { points })
    }

    pub fn points(&self) -> &[ValuationPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first(&self) -> Option<&ValuationPoint> {
        self.points.first()
    }

    pub fn last(&self) -> Option<&ValuationPoint> {
        self.points.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ValuationPoint> {
        self.points.iter()
    }
}

impl TryFrom<Vec<ValuationPoint>> for PortfolioValuationSeries {
    type Error = CoreError;

    fn try_from(points: Vec<ValuationPoint>) -> Result<Self, Self::Error> {
        Self::new(points)
    }
}

impl From<PortfolioValuationSeries> for Vec<ValuationPoint> {
    fn from(series: PortfolioValuationSeries) -> Self {
        series.points
    }
}

/// Change in forecast value between the first and the last day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValuationSummary {
    pub first_day: u32,
    pub last_day: u32,
    pub first_value: f64,
    pub last_value: f64,
    /// (last − first) / first × 100
    pub percent_change: f64,
}

impl ValuationSummary {
    /// Number of days covered, counting both ends.
    pub fn horizon_days(&self) -> u32 {
        self.last_day.saturating_sub(self.first_day) + 1
    }
}

/// Current value of one coin in a wallet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoinValuation {
    pub coin: Coin,
    pub amount: f64,
    /// Latest known price (`0.0` when none is known)
    pub price: f64,
    pub value: f64,
    /// No price history was available, `price` and `value` are zero placeholders
    pub price_missing: bool,
}

/// Current value of a wallet at the latest known prices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HoldingsValuation {
    pub coins: Vec<CoinValuation>,
    pub total_value: f64,
}

/// Outcome of summarizing a forecast for display.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ForecastChange {
    Percent(ValuationSummary),
    /// Day 1 is worth nothing, so a percent change has no meaning.
    NotApplicable,
}

/// A wallet's portfolio forecast, ready for a display layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioForecast {
    pub wallet_id: String,
    pub series: PortfolioValuationSeries,
    pub change: ForecastChange,
}
