//! Real-time stock data provider.
//!
//! This crate polls an upstream REST API for per-symbol quotes, caches the
//! latest payloads in memory, and exposes a watchlist abstraction plus a
//! read-only snapshot view to consumers. Internally it wires together three
//! building blocks:
//!
//! - `QuoteFetcher` — seam for issuing one upstream request per symbol; the
//!   production implementation is a blocking HTTP client, tests substitute an
//!   in-memory fake.
//! - `RealTimeStore` — the shared state: symbol→quote map, watchlist,
//!   loading/error flags, and a last-updated timestamp. Batch fetches run one
//!   worker thread per symbol and merge all settled results under a single
//!   lock so a batch lands atomically.
//! - `RefreshHandle` — the live binding between the recurring timer thread
//!   and the symbol set it refreshes. At most one exists per store; starting
//!   a new refresh or mutating the watchlist cancels and replaces it.
//!
//! Concurrency and shutdown:
//! - Crossbeam `select!` multiplexes the refresh tick against the stop
//!   channel; dropping the handle is enough to stop the loop.
//! - Per-request failures are caught per worker, logged, and folded into a
//!   store-wide error flag; the failing symbol keeps its stale entry. No
//!   failure ever propagates to the consumer as a panic or rejection.
//! - Stopping the refresh does not cancel a batch already in flight; the
//!   batch completes and applies normally.
#![warn(missing_docs)]
pub mod fetcher;
pub mod refresh;
pub mod store;

pub use fetcher::{HttpQuoteFetcher, QuoteFetcher};
pub use refresh::RefreshHandle;
pub use store::{RealTimeStore, StoreSnapshot};
