//! Stock Watch — a CLI that keeps a watchlist of symbols fresh against a
//! stock-data REST backend and logs the cached state as it updates. It reads
//! a list of symbols from a text file, starts the provider's auto-refresh,
//! and keeps running until interrupted.
//!
//! Usage example (CLI):
//! ```bash
//! stock_watch --api-url http://127.0.0.1:5000 --symbols ./symbols.txt --interval-secs 30
//! ```
//!
//! The symbols file may separate symbols by commas, spaces, or new lines.
//! See `stock_common::symbol` for details.
#![warn(missing_docs)]
mod args;

use crate::args::Args;
use clap::Parser;
use log::{error, info};
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};
use std::thread;
use std::time::Duration;
use stock_common::config::ApiConfig;
use stock_common::symbol::SymbolParser;
use stock_common::{Result, StoreError, Symbol};
use stock_provider::RealTimeStore;

fn main() -> Result<(), StoreError> {
    init_logger();
    let args = Args::parse();
    let shutdown = Arc::new(AtomicBool::new(false));
    {
        let shutdown = shutdown.clone();
        ctrlc::set_handler(move || {
            info!("Ctrl+C received. Shutting down watcher...");
            shutdown.store(true, Ordering::SeqCst);
        })
        .expect("Error setting Ctrl+C handler");
    }

    let mut config = ApiConfig::from_env()?;
    if let Some(api_url) = &args.api_url {
        config.base_url = api_url.trim_end_matches('/').to_string();
    }

    let file_path = normalize_path(&args.symbols);
    if !is_file_exist(&file_path) {
        error!("Symbols file not found: {}", file_path.display());
        return Err(StoreError::ParseSymbolsFile(format!(
            "no such file: {}",
            file_path.display()
        )));
    }

    let file = File::open(file_path)?;
    let symbols = Symbol::parse_from_file(BufReader::new(file))?;
    if symbols.is_empty() {
        return Err(StoreError::ParseSymbolsFile(
            "symbols file contains no symbols".to_string(),
        ));
    }
    info!("Watching symbols: {:?}", symbols);
    info!("Backend: {}", config.base_url);

    let interval = Duration::from_secs(args.interval_secs);
    let store = RealTimeStore::with_http(config)?;
    store.start_auto_refresh(symbols, interval)?;

    info!("Watcher is running. Press Ctrl+C to exit.");
    while !shutdown.load(Ordering::Relaxed) {
        thread::sleep(Duration::from_secs(1));
        log_snapshot(&store)?;
    }

    store.stop_auto_refresh()?;
    info!("Watcher stopped.");
    Ok(())
}

/// Logs a one-line summary of the current store contents.
fn log_snapshot(store: &RealTimeStore) -> Result<(), StoreError> {
    let snapshot = store.snapshot()?;
    let updated = snapshot
        .last_updated
        .map(|t| t.format("%H:%M:%S%.3f").to_string())
        .unwrap_or_else(|| "never".to_string());

    match &snapshot.error {
        Some(message) => info!(
            "{} quote(s) cached, last updated {}, error: {}",
            snapshot.quotes.len(),
            updated,
            message
        ),
        None => info!(
            "{} quote(s) cached, last updated {}",
            snapshot.quotes.len(),
            updated
        ),
    }
    Ok(())
}

fn init_logger() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();
}

/// Normalize a CLI-provided path string by trimming whitespace and matching quotes.
///
/// This allows passing Windows paths in quotes without breaking parsing.
fn normalize_path(raw: &str) -> PathBuf {
    let trimmed = raw.trim();
    let no_quotes = trimmed
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(trimmed);
    PathBuf::from(no_quotes)
}

/// Returns `true` if the provided path exists and is a regular file.
fn is_file_exist(path: &PathBuf) -> bool {
    path.exists() && path.is_file()
}
