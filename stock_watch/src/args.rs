//! Command-line arguments for the stock watcher.
//!
//! This module defines the CLI interface using `clap`. See `main` for end-to-end usage.
use clap::Parser;

/// Parsed command-line arguments.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Base URL of the stock API backend. Overrides STOCK_API_URL when set.
    #[clap(long)]
    pub api_url: Option<String>,

    /// Path to a text file with symbols to watch.
    /// Symbols may be separated by commas, spaces, or new lines.
    #[clap(long)]
    pub symbols: String,

    /// Auto-refresh interval in seconds.
    #[clap(long, default_value_t = 60)]
    pub interval_secs: u64,
}
