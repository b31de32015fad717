//!
//! Common types and utilities shared by the stock data provider and its CLI.
//!
//! This crate aggregates:
//! - `error` — unified error type `StoreError` used across the workspace.
//! - `result` — handy `Result<T, StoreError>` alias.
//! - `symbol` — normalized ticker symbols and file-parsing helpers.
//! - `quote` — opaque quote payload and the upstream response envelope.
//! - `watchlist` — ordered unique symbol set.
//! - `config` — environment-driven upstream API settings.
#![warn(missing_docs)]
pub mod config;
pub mod error;
pub mod quote;
pub mod result;
pub mod symbol;
pub mod watchlist;

pub use error::StoreError;
pub use quote::Quote;
pub use result::Result;
pub use symbol::Symbol;
pub use watchlist::Watchlist;
