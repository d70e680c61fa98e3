//! Crypto portfolio tracker CLI.
//!
//! # Usage
//!
//! ```bash
//! # Create 5 mock wallets in data/wallet_balances.json
//! portfolio-tracker generate-wallets
//!
//! # Download 180 days of price history per tracked coin
//! portfolio-tracker fetch
//!
//! # After the forecast model wrote data/{COIN}_forecast.csv:
//! portfolio-tracker forecast
//! portfolio-tracker show --wallet 0xabc...
//! ```

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crypto_portfolio_core::errors::CoreError;
use crypto_portfolio_core::models::settings::Settings;
use crypto_portfolio_core::providers::coingecko::CoinGeckoProvider;
use crypto_portfolio_core::services::history_service::{FetchOutcome, HistoryService};
use crypto_portfolio_core::services::portfolio_service::PortfolioService;
use crypto_portfolio_core::services::report_service::ReportService;
use crypto_portfolio_core::services::wallet_generator::WalletGenerator;
use crypto_portfolio_core::storage::manager::FileStore;
use crypto_portfolio_core::storage::traits::ForecastSource;
use crypto_portfolio_core::PortfolioTracker;

#[derive(Parser)]
#[command(name = "portfolio-tracker")]
#[command(about = "Mock crypto portfolio tracker: prices, wallets and value forecasts", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file (TOML). Defaults apply when it doesn't exist.
    #[arg(short, long, default_value = "tracker.toml", global = true)]
    config: PathBuf,

    /// Data directory, overrides `data_dir` from the config file
    #[arg(short, long, global = true)]
    data_dir: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error); RUST_LOG takes precedence
    #[arg(long, default_value = "info", global = true)]
    log_level: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Download price history for every tracked coin
    Fetch,

    /// Create mock wallets with random holdings
    GenerateWallets {
        /// Number of wallets (default from config)
        #[arg(short = 'n', long)]
        count: Option<usize>,

        /// RNG seed for reproducible wallets
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Aggregate coin forecasts into portfolio_forecast.csv
    Forecast {
        /// Wallet address (defaults to the first wallet)
        #[arg(short, long)]
        wallet: Option<String>,
    },

    /// Print holdings, current value and forecasts of a wallet
    Show {
        /// Wallet address (defaults to the first wallet)
        #[arg(short, long)]
        wallet: Option<String>,
    },

    /// List wallet addresses
    Wallets,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&cli.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let mut settings = Settings::load(&cli.config)
        .with_context(|| format!("Failed to load config {}", cli.config.display()))?;
    if let Some(dir) = cli.data_dir {
        settings.data_dir = dir;
    }
    let store = FileStore::new(&settings.data_dir);

    match cli.command {
        Commands::Fetch => fetch(&settings, store).await,
        Commands::GenerateWallets { count, seed } => generate_wallets(&settings, &store, count, seed),
        Commands::Forecast { wallet } => forecast(&settings, store, wallet),
        Commands::Show { wallet } => show(&settings, store, wallet),
        Commands::Wallets => {
            let tracker = PortfolioTracker::from_settings(store, &settings)?;
            for id in tracker.wallet_ids()? {
                println!("{id}");
            }
            Ok(())
        }
    }
}

async fn fetch(settings: &Settings, store: FileStore) -> Result<()> {
    let provider = CoinGeckoProvider::with_base_url(&settings.api_base_url);
    let service = HistoryService::new(
        Box::new(provider),
        Duration::from_millis(settings.request_delay_ms),
    );

    let coins = settings.coins();
    let report = service
        .fetch_all(&store, &coins, &settings.vs_currency, settings.history_days)
        .await;

    for (coin, outcome) in &report.outcomes {
        match outcome {
            FetchOutcome::Saved(rows) => println!("[OK] {coin}: saved {rows} records"),
            FetchOutcome::Failed(msg) => println!("[ERROR] {coin}: {msg}"),
        }
    }
    info!(saved = report.saved_count(), total = coins.len(), "fetch finished");

    if report.saved_count() == 0 && !coins.is_empty() {
        anyhow::bail!("No price history could be fetched");
    }
    Ok(())
}

fn generate_wallets(
    settings: &Settings,
    store: &FileStore,
    count: Option<usize>,
    seed: Option<u64>,
) -> Result<()> {
    let count = count.unwrap_or(settings.wallet_count);
    let rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let book = WalletGenerator::new(rng).generate(count, &settings.coins())?;
    let path = store.save_wallets(&book)?;
    println!("[OK] Created {count} mock wallets in {}", path.display());
    Ok(())
}

fn forecast(settings: &Settings, store: FileStore, wallet: Option<String>) -> Result<()> {
    let tracker = PortfolioTracker::from_settings(store, settings)?;
    let (forecast, path) = tracker
        .run_portfolio_forecast(wallet.as_deref())
        .context("Portfolio forecast failed")?;
    println!(
        "[OK] Portfolio forecast calculated for {} days ({})",
        forecast.series.len(),
        path.display()
    );
    Ok(())
}

fn show(settings: &Settings, store: FileStore, wallet: Option<String>) -> Result<()> {
    let tracker = PortfolioTracker::from_settings(store, settings)?;
    let report = ReportService::new();

    let wallet_id = match wallet {
        Some(id) => id,
        None => tracker.default_wallet()?,
    };

    let valuation = tracker.value_holdings(&wallet_id)?;
    println!("{}", report.render_holdings(&wallet_id, &valuation));
    let allocation = PortfolioService::new().allocation(&valuation);
    if !allocation.is_empty() {
        println!("{}", report.render_allocation(&allocation));
    }

    for coin in tracker.coins() {
        match tracker.store().load_forecast(coin) {
            Ok(series) => println!("{}", report.render_coin_forecast(&series)),
            Err(e) if e.is_recoverable() => println!("{coin} forecast not available: {e}\n"),
            Err(e) => return Err(e.into()),
        }
    }

    match tracker.forecast_for_wallet(&wallet_id) {
        Ok(forecast) => println!("{}", report.render_forecast(&forecast)),
        Err(e @ (CoreError::ForecastUnavailable(_) | CoreError::MissingData { .. })) => {
            warn!(error = %e, "portfolio forecast unavailable");
            println!("Portfolio forecast not available: {e}");
        }
        Err(e) => return Err(e.into()),
    }
    Ok(())
}
