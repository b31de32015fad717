//! Error types shared across the workspace.
//!
//! The `StoreError` enum unifies common failure cases for I/O, HTTP,
//! serialization, channel communication, and internal logic, allowing crates
//! to propagate a single error type.
use std::io;
use std::sync::PoisonError;

use thiserror::Error;

/// Unified error type shared by the provider library and the CLI.
#[derive(Error, Debug)]
pub enum StoreError {
    /// I/O error originating from the standard library or files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// HTTP transport error from the upstream request (connect, timeout, body).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Upstream responded with a non-2xx status for a symbol request.
    #[error("Upstream returned status {status} for symbol {symbol}")]
    UpstreamStatus {
        /// Numeric HTTP status code.
        status: u16,
        /// Lower-cased symbol whose request failed.
        symbol: String,
    },

    /// Failure while encoding/decoding JSON via serde_json.
    #[error("JSON serialization/deserialization error: {0}")]
    SerdeJson(#[from] serde_json::Error),

    /// A symbol string failed validation (empty or contains whitespace).
    #[error("Invalid symbol: {0:?}")]
    InvalidSymbol(String),

    /// Error while parsing the symbols file into `Symbol` values.
    #[error("Parse symbols file error: {0}")]
    ParseSymbolsFile(String),

    /// Crossbeam/channel receive failed (e.g., sender closed); contains a short context string.
    #[error("Channel receive failed: {0}")]
    ChannelRecv(String),

    /// Error indicating a poisoned mutex/lock was encountered.
    #[error("Mutex Lock Poisoned: {0}")]
    MutexLock(String),

    /// Configuration value could not be parsed or is out of range.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl<T> From<PoisonError<T>> for StoreError {
    fn from(err: PoisonError<T>) -> Self {
        StoreError::MutexLock(err.to_string())
    }
}
