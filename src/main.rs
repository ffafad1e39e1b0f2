//! Transaction Engine CLI
//!
//! Command-line interface for creating transactions from CSV request files.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- --assets assets.csv requests.csv > results.csv
//! cargo run -- --assets assets.csv --strategy sync requests.csv > results.csv
//! cargo run -- --assets assets.csv --strategy async --batch-size 2000 --max-concurrent 8 requests.csv
//! cargo run -- --assets assets.csv --history checking --search groceries requests.csv
//! ```
//!
//! The program loads the asset ledger, runs every request through the engine
//! using the selected processing strategy, and writes one result row per
//! request to stdout. With `--history`, the requested page of that asset's
//! history is written instead.
//!
//! # Logging
//!
//! Logs go to stderr. `RUST_LOG` takes precedence over `--log-level`.
//!
//! # Exit Codes
//!
//! - 0: Success
//! - 1: Error (missing arguments, file not found, unreadable asset ledger, etc.)

use std::io;
use std::process;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use transaction_engine::cli::{self, CliArgs};
use transaction_engine::core::InMemoryEngine;
use transaction_engine::io::{load_assets, write_history_csv};
use transaction_engine::strategy;

fn main() {
    let args = cli::parse_args();
    init_tracing(&args.log_level);

    if let Err(e) = run(&args) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run(args: &CliArgs) -> Result<(), String> {
    let assets = load_assets(&args.assets_file).map_err(|e| e.to_string())?;
    let engine = Arc::new(InMemoryEngine::in_memory(assets, args.to_engine_config()));

    let strategy = {
        let config = if matches!(args.strategy, cli::StrategyType::Async) {
            Some(args.to_batch_config())
        } else {
            None
        };
        strategy::create_strategy(args.strategy.clone(), config)
    };

    let mut stdout = io::stdout();
    match &args.history {
        None => strategy.process(&engine, &args.input_file, &mut stdout),
        Some(asset_id) => {
            // Results are discarded; only the history page is printed
            strategy.process(&engine, &args.input_file, &mut io::sink())?;

            let page = engine
                .search_transactions(asset_id, args.search.as_deref(), args.page_request())
                .map_err(|e| e.to_string())?;
            write_history_csv(&page, &mut stdout)
        }
    }
}
