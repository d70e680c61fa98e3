use crate::models::coin::Coin;
use crate::models::forecast::ForecastSeries;
use crate::models::valuation::{ForecastChange, HoldingsValuation, PortfolioForecast};

/// Renders holdings and forecasts as plain text for a terminal.
pub struct ReportService;

impl ReportService {
    pub fn new() -> Self {
        Self
    }

    /// Holdings, latest prices and values per coin, followed by the total.
    pub fn render_holdings(&self, wallet_id: &str, valuation: &HoldingsValuation) -> String {
        let mut lines = vec![
            format!("Wallet {wallet_id}"),
            format!("{:<6} {:>16} {:>16} {:>18}", "Coin", "Holdings", "Price", "Value"),
        ];
        for c in &valuation.coins {
            let price = if c.price_missing {
                "n/a".to_string()
            } else {
                format_money(c.price)
            };
            lines.push(format!(
                "{:<6} {:>16} {:>16} {:>18}",
                c.coin.symbol(),
                format_quantity(c.amount),
                price,
                format_money(c.value),
            ));
        }
        lines.push(format!("Total: {}", format_money(valuation.total_value)));
        join_lines(lines)
    }

    /// `BTC   62.50%` lines, largest share first. Empty input renders nothing.
    pub fn render_allocation(&self, allocation: &[(Coin, f64)]) -> String {
        if allocation.is_empty() {
            return String::new();
        }
        let mut sorted = allocation.to_vec();
        sorted.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

        let mut lines = vec!["Allocation".to_string()];
        lines.extend(
            sorted
                .into_iter()
                .map(|(coin, pct)| format!("{:<6} {:>6.2}%", coin.symbol(), pct)),
        );
        join_lines(lines)
    }

    /// `Day N: $price` lines of a single coin's forecast.
    pub fn render_coin_forecast(&self, series: &ForecastSeries) -> String {
        let mut lines = vec![format!("{} price forecast", series.coin())];
        lines.extend(
            series
                .points()
                .iter()
                .map(|p| format!("Day {}: {}", p.day, format_money(p.predicted_price))),
        );
        join_lines(lines)
    }

    /// Day-by-day portfolio value forecast plus the change line.
    pub fn render_forecast(&self, forecast: &PortfolioForecast) -> String {
        let mut lines = vec![format!(
            "Portfolio value forecast (next {} days)",
            forecast.series.len()
        )];
        lines.extend(
            forecast
                .series
                .iter()
                .map(|p| format!("Day {}: {}", p.day, format_money(p.total_value))),
        );
        lines.push(String::new());
        lines.push(change_line(&forecast.change));
        join_lines(lines)
    }
}

impl Default for ReportService {
    fn default() -> Self {
        Self::new()
    }
}

/// `Change: +1.23% over 7 days`, or an N/A line when day 1 is zero.
pub fn change_line(change: &ForecastChange) -> String {
    match change {
        ForecastChange::Percent(summary) => format!(
            "Change: {:+.2}% over {} days",
            summary.percent_change,
            summary.horizon_days()
        ),
        ForecastChange::NotApplicable => "Change: N/A (day 1 value is zero)".to_string(),
    }
}

/// `$1,234.56` with thousands separators; negatives as `-$1,234.56`.
pub fn format_money(value: f64) -> String {
    let cents = (value.abs() * 100.0).round() as u64;
    let whole = cents / 100;
    let frac = cents % 100;

    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if value < 0.0 && cents > 0 { "-" } else { "" };
    format!("{sign}${grouped}.{frac:02}")
}

/// Coin quantity with four decimals.
pub fn format_quantity(amount: f64) -> String {
    format!("{amount:.4}")
}

/// One line per entry, each terminated by a newline.
fn join_lines(lines: Vec<String>) -> String {
    lines.into_iter().map(|line| line + "\n").collect()
}
