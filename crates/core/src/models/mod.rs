pub mod coin;
pub mod forecast;
pub mod holdings;
pub mod price;
pub mod settings;
pub mod valuation;
