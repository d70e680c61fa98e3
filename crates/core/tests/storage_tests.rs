// ═══════════════════════════════════════════════════════════════════
// Storage Tests — file layout, FileStore, MemoryStore
// ═══════════════════════════════════════════════════════════════════

use chrono::NaiveDate;
use std::fs;

use crypto_portfolio_core::errors::CoreError;
use crypto_portfolio_core::models::coin::Coin;
use crypto_portfolio_core::models::forecast::ForecastSeries;
use crypto_portfolio_core::models::holdings::{HoldingsRecord, WalletBook};
use crypto_portfolio_core::models::price::PricePoint;
use crypto_portfolio_core::models::valuation::{PortfolioValuationSeries, ValuationPoint};
use crypto_portfolio_core::storage::format::{self, DataLayout, PORTFOLIO_FORECAST_FILE, WALLETS_FILE};
use crypto_portfolio_core::storage::manager::FileStore;
use crypto_portfolio_core::storage::memory::MemoryStore;
use crypto_portfolio_core::storage::traits::{ForecastSource, HoldingsSource, PriceSource};

fn ts(day: u32, hour: u32) -> chrono::NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 1, day)
        .unwrap()
        .and_hms_opt(hour, 0, 0)
        .unwrap()
}

// ═══════════════════════════════════════════════════════════════════
// File Layout
// ═══════════════════════════════════════════════════════════════════

mod layout {
    use super::*;

    #[test]
    fn file_names() {
        assert_eq!(WALLETS_FILE, "wallet_balances.json");
        assert_eq!(PORTFOLIO_FORECAST_FILE, "portfolio_forecast.csv");
        assert_eq!(format::history_file(Coin::Btc), "BTC_history.csv");
        assert_eq!(format::forecast_file(Coin::Doge), "DOGE_forecast.csv");
    }

    #[test]
    fn paths_are_under_root() {
        let layout = DataLayout::new("/srv/data");
        assert_eq!(layout.wallets(), std::path::PathBuf::from("/srv/data/wallet_balances.json"));
        assert_eq!(layout.forecast(Coin::Eth), std::path::PathBuf::from("/srv/data/ETH_forecast.csv"));
        assert_eq!(layout.history(Coin::Sol), std::path::PathBuf::from("/srv/data/SOL_history.csv"));
    }
}

// ═══════════════════════════════════════════════════════════════════
// FileStore — Wallets
// ═══════════════════════════════════════════════════════════════════

mod file_wallets {
    use super::*;

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("nested"));

        let mut book = WalletBook::new();
        book.insert("0x01", HoldingsRecord::from_pairs([(Coin::Btc, 1.25), (Coin::Xrp, 5000.0)]).unwrap());
        book.insert("0x02", HoldingsRecord::from_pairs([(Coin::Eth, 3.0)]).unwrap());

        let path = store.save_wallets(&book).unwrap();
        assert!(path.ends_with(WALLETS_FILE));

        let loaded = store.load_wallets().unwrap();
        assert_eq!(loaded, book);
    }

    #[test]
    fn wallets_keep_file_order() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(WALLETS_FILE),
            r#"{
                "0xff00000000000000000000000000000000000000": {"btc": 1.0},
                "0x0000000000000000000000000000000000000001": {"eth": 2.0}
            }"#,
        )
        .unwrap();
        let store = FileStore::new(dir.path());

        assert_eq!(
            store.wallet_ids().unwrap(),
            vec![
                "0xff00000000000000000000000000000000000000".to_string(),
                "0x0000000000000000000000000000000000000001".to_string(),
            ]
        );
        let book = store.load_wallets().unwrap();
        assert_eq!(book.first().unwrap().0, "0xff00000000000000000000000000000000000000");
    }

    #[test]
    fn save_keeps_insertion_order() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());
        let mut book = WalletBook::new();
        book.insert("0xzz", HoldingsRecord::from_pairs([(Coin::Btc, 1.0)]).unwrap());
        book.insert("0xaa", HoldingsRecord::from_pairs([(Coin::Eth, 1.0)]).unwrap());
        store.save_wallets(&book).unwrap();

        assert_eq!(store.wallet_ids().unwrap(), vec!["0xzz".to_string(), "0xaa".to_string()]);
    }

    #[test]
    fn reads_lowercase_json() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(WALLETS_FILE),
            r#"{"0xabc": {"btc": 2.5, "eth": 1.0, "sol": 0.0, "xrp": 100.0, "pepe": 9.0}}"#,
        )
        .unwrap();
        let store = FileStore::new(dir.path());

        assert_eq!(store.wallet_ids().unwrap(), vec!["0xabc".to_string()]);
        let h = store.load_holdings("0xabc").unwrap();
        assert_eq!(h.get(Coin::Btc), 2.5);
        assert_eq!(h.get(Coin::Xrp), 100.0);
        assert_eq!(h.coins().count(), 4);
    }

    #[test]
    fn unknown_wallet() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(WALLETS_FILE), r#"{"0xabc": {"btc": 1.0}}"#).unwrap();
        let store = FileStore::new(dir.path());
        assert!(matches!(
            store.load_holdings("0xdef"),
            Err(CoreError::WalletNotFound(_))
        ));
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());
        assert!(matches!(store.load_wallets(), Err(CoreError::FileIO(_))));
    }

    #[test]
    fn malformed_json() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(WALLETS_FILE), "{ not json").unwrap();
        let store = FileStore::new(dir.path());
        assert!(matches!(store.load_wallets(), Err(CoreError::Deserialization(_))));
    }

    #[test]
    fn negative_balance_fails_load() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(WALLETS_FILE), r#"{"0x1": {"btc": -3}}"#).unwrap();
        let store = FileStore::new(dir.path());
        assert!(matches!(store.load_wallets(), Err(CoreError::ValidationError(_))));
    }

    #[test]
    fn reads_fresh_data_each_call() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());
        fs::write(dir.path().join(WALLETS_FILE), r#"{"0x1": {"btc": 1.0}}"#).unwrap();
        assert_eq!(store.load_holdings("0x1").unwrap().get(Coin::Btc), 1.0);

        fs::write(dir.path().join(WALLETS_FILE), r#"{"0x1": {"btc": 7.0}}"#).unwrap();
        assert_eq!(store.load_holdings("0x1").unwrap().get(Coin::Btc), 7.0);
    }
}

// ═══════════════════════════════════════════════════════════════════
// FileStore — Forecasts
// ═══════════════════════════════════════════════════════════════════

mod file_forecasts {
    use super::*;

    #[test]
    fn reads_model_output() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("BTC_forecast.csv"),
            "day,predicted_price\n1,61000.5\n2,61500\n3,62000.25\n",
        )
        .unwrap();
        let store = FileStore::new(dir.path());

        let series = store.load_forecast(Coin::Btc).unwrap();
        assert_eq!(series.len(), 3);
        assert_eq!(series.price_on(1), Some(61000.5));
        assert_eq!(series.price_on(3), Some(62000.25));
    }

    #[test]
    fn missing_file_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());
        assert!(matches!(
            store.load_forecast(Coin::Eth),
            Err(CoreError::ForecastUnavailable(Coin::Eth))
        ));
    }

    #[test]
    fn header_only_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("SOL_forecast.csv"), "day,predicted_price\n").unwrap();
        let store = FileStore::new(dir.path());
        assert!(matches!(
            store.load_forecast(Coin::Sol),
            Err(CoreError::ForecastUnavailable(Coin::Sol))
        ));
    }

    #[test]
    fn unparseable_row_is_csv_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("XRP_forecast.csv"), "day,predicted_price\none,0.5\n").unwrap();
        let store = FileStore::new(dir.path());
        assert!(matches!(store.load_forecast(Coin::Xrp), Err(CoreError::Csv(_))));
    }

    #[test]
    fn duplicate_day_is_validation_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("XRP_forecast.csv"), "day,predicted_price\n1,0.5\n1,0.6\n").unwrap();
        let store = FileStore::new(dir.path());
        assert!(matches!(store.load_forecast(Coin::Xrp), Err(CoreError::ValidationError(_))));
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());
        let series = ForecastSeries::from_prices(Coin::Eth, &[(1, 3000.0), (2, 3010.5)]).unwrap();
        store.save_forecast(&series).unwrap();

        let text = fs::read_to_string(dir.path().join("ETH_forecast.csv")).unwrap();
        assert!(text.starts_with("day,predicted_price\n"));
        assert_eq!(store.load_forecast(Coin::Eth).unwrap(), series);
    }
}

// ═══════════════════════════════════════════════════════════════════
// FileStore — Price History
// ═══════════════════════════════════════════════════════════════════

mod file_history {
    use super::*;

    #[test]
    fn save_writes_date_price_columns() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());
        let points = vec![
            PricePoint { timestamp: ts(1, 0), price: 42000.0 },
            PricePoint { timestamp: ts(2, 12), price: 43000.5 },
        ];
        assert_eq!(store.save_history(Coin::Btc, &points).unwrap(), 2);

        let text = fs::read_to_string(dir.path().join("BTC_history.csv")).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "date,price");
        assert_eq!(lines[1], "2025-01-01 00:00:00,42000.0");
        assert_eq!(lines[2], "2025-01-02 12:00:00,43000.5");

        assert_eq!(store.load_history(Coin::Btc).unwrap(), points);
    }

    #[test]
    fn latest_price_is_last_row() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("ETH_history.csv"),
            "date,price\n2025-01-01 00:00:00,3000\n2025-01-02 00:00:00,3100\n",
        )
        .unwrap();
        let store = FileStore::new(dir.path());
        assert_eq!(store.latest_price(Coin::Eth).unwrap(), 3100.0);
    }

    #[test]
    fn missing_or_empty_history_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());
        assert!(matches!(store.latest_price(Coin::Sol), Err(CoreError::PriceUnavailable(Coin::Sol))));

        fs::write(dir.path().join("SOL_history.csv"), "date,price\n").unwrap();
        assert!(matches!(store.latest_price(Coin::Sol), Err(CoreError::PriceUnavailable(Coin::Sol))));
    }

    #[test]
    fn bad_date_is_csv_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("BTC_history.csv"), "date,price\nyesterday,1\n").unwrap();
        let store = FileStore::new(dir.path());
        assert!(matches!(store.load_history(Coin::Btc), Err(CoreError::Csv(_))));
    }
}

// ═══════════════════════════════════════════════════════════════════
// FileStore — Portfolio Forecast
// ═══════════════════════════════════════════════════════════════════

mod file_valuation {
    use super::*;

    #[test]
    fn writes_day_total_value_columns() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());
        let series = PortfolioValuationSeries::new(vec![
            ValuationPoint { day: 1, total_value: 300.0 },
            ValuationPoint { day: 2, total_value: 312.5 },
        ])
        .unwrap();
        let path = store.save_valuation(&series).unwrap();
        assert!(path.ends_with(PORTFOLIO_FORECAST_FILE));

        let text = fs::read_to_string(&path).unwrap();
        assert_eq!(text, "day,total_value\n1,300.0\n2,312.5\n");
        assert_eq!(store.load_valuation().unwrap(), series);
    }

    #[test]
    fn overwrites_previous_run() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());
        let long = PortfolioValuationSeries::new(
            (1..=7).map(|day| ValuationPoint { day, total_value: 1.0 }).collect(),
        )
        .unwrap();
        let short =
            PortfolioValuationSeries::new(vec![ValuationPoint { day: 1, total_value: 2.0 }]).unwrap();
        store.save_valuation(&long).unwrap();
        store.save_valuation(&short).unwrap();
        assert_eq!(store.load_valuation().unwrap(), short);
    }

    #[test]
    fn out_of_order_days_rejected_on_load() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(PORTFOLIO_FORECAST_FILE), "day,total_value\n2,100\n1,50\n").unwrap();
        let store = FileStore::new(dir.path());
        let err = store.load_valuation().unwrap_err();
        assert!(matches!(err, CoreError::ValidationError(msg) if msg.contains(PORTFOLIO_FORECAST_FILE)));
    }

    #[test]
    fn gap_in_days_rejected_on_load() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(PORTFOLIO_FORECAST_FILE), "day,total_value\n1,100\n3,50\n").unwrap();
        let store = FileStore::new(dir.path());
        assert!(matches!(store.load_valuation(), Err(CoreError::ValidationError(_))));
    }

    #[test]
    fn missing_file_is_file_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());
        let err = store.load_valuation().unwrap_err();
        assert!(matches!(err, CoreError::FileIO(msg) if msg.contains(PORTFOLIO_FORECAST_FILE)));
    }
}

// ═══════════════════════════════════════════════════════════════════
// MemoryStore
// ═══════════════════════════════════════════════════════════════════

mod memory_store {
    use super::*;

    #[test]
    fn serves_what_it_was_given() {
        let store = MemoryStore::new()
            .with_wallet("w1", HoldingsRecord::from_pairs([(Coin::Btc, 1.0)]).unwrap())
            .with_forecast(ForecastSeries::from_prices(Coin::Btc, &[(1, 10.0)]).unwrap())
            .with_price(Coin::Btc, 9.5);

        assert_eq!(store.wallet_ids().unwrap(), vec!["w1".to_string()]);
        assert_eq!(store.load_holdings("w1").unwrap().get(Coin::Btc), 1.0);
        assert_eq!(store.load_forecast(Coin::Btc).unwrap().price_on(1), Some(10.0));
        assert_eq!(store.latest_price(Coin::Btc).unwrap(), 9.5);
    }

    #[test]
    fn missing_entries_map_to_loader_errors() {
        let store = MemoryStore::new();
        assert!(matches!(store.load_holdings("nope"), Err(CoreError::WalletNotFound(_))));
        assert!(matches!(store.load_forecast(Coin::Eth), Err(CoreError::ForecastUnavailable(Coin::Eth))));
        assert!(matches!(store.latest_price(Coin::Eth), Err(CoreError::PriceUnavailable(Coin::Eth))));
    }
}
