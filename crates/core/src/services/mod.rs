pub mod history_service;
pub mod portfolio_service;
pub mod report_service;
pub mod valuation_service;
pub mod wallet_generator;
