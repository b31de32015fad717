//! Real-time quote store and watchlist operations.
//!
//! `RealTimeStore` caches the latest quote per symbol, tracks loading/error
//! flags and a last-updated timestamp, and owns the single recurring refresh
//! timer. One store instance is meant to serve one consumer tree; it is
//! passed around explicitly rather than living in a process-wide global, so
//! every test can spin up its own instance against a fake fetcher.
//!
//! Batch semantics: `fetch_many` launches one worker thread per symbol,
//! waits for every request to settle, and only then merges all successes
//! under a single lock. Within a batch, partial failures never discard
//! sibling successes; across overlapping batches, the last writer wins.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use chrono::{DateTime, Utc};
use crossbeam_channel::unbounded;
use log::{info, warn};
use stock_common::config::{ApiConfig, DEFAULT_REFRESH_INTERVAL};
use stock_common::watchlist::Watchlist;
use stock_common::{Quote, Result, Symbol};

use crate::fetcher::{HttpQuoteFetcher, QuoteFetcher};
use crate::refresh::RefreshHandle;

/// Generic message recorded when any request in a batch (or a single fetch)
/// fails. Errors are store-wide, never attributed to a specific symbol.
const FETCH_ERROR_MESSAGE: &str = "Failed to fetch stock data";

/// Mutable store state guarded by one lock.
pub(crate) struct StoreState {
    quotes: HashMap<Symbol, Quote>,
    watchlist: Watchlist,
    loading: bool,
    error: Option<String>,
    last_updated: Option<DateTime<Utc>>,
}

impl StoreState {
    fn new() -> Self {
        StoreState {
            quotes: HashMap::new(),
            watchlist: Watchlist::new(),
            loading: false,
            error: None,
            last_updated: None,
        }
    }
}

/// Read-only view of the store handed to consumers.
#[derive(Debug, Clone)]
pub struct StoreSnapshot {
    /// Latest quote per symbol.
    pub quotes: HashMap<Symbol, Quote>,
    /// Watched symbols in insertion order.
    pub watchlist: Vec<Symbol>,
    /// Wall-clock time of the last completed batch, if any.
    pub last_updated: Option<DateTime<Utc>>,
    /// `true` while a batch fetch is in progress.
    pub loading: bool,
    /// Generic error message from the most recent failed fetch, if any.
    pub error: Option<String>,
}

/// Caches quotes for a set of symbols and keeps them fresh on a timer.
pub struct RealTimeStore {
    state: Arc<Mutex<StoreState>>,
    fetcher: Arc<dyn QuoteFetcher>,
    refresh: Mutex<Option<RefreshHandle>>,
}

impl RealTimeStore {
    /// Creates a store backed by the given fetcher.
    pub fn new(fetcher: Arc<dyn QuoteFetcher>) -> Self {
        RealTimeStore {
            state: Arc::new(Mutex::new(StoreState::new())),
            fetcher,
            refresh: Mutex::new(None),
        }
    }

    /// Creates a store backed by the blocking HTTP fetcher for `config`.
    pub fn with_http(config: ApiConfig) -> Result<Self> {
        let fetcher = HttpQuoteFetcher::new(config)?;
        Ok(RealTimeStore::new(Arc::new(fetcher)))
    }

    /// Fetches every symbol in `symbols` concurrently and merges the results.
    ///
    /// Sets the loading flag and clears the error flag up front. Each request
    /// runs on its own thread; failures are caught per request and never
    /// abort siblings. Once all requests settle, successes overwrite their
    /// store entries in one atomic step, failed symbols keep their stale
    /// entries, the error flag is set if anything failed, and the timestamp
    /// and loading flag are updated.
    pub fn fetch_many(&self, symbols: &[Symbol]) -> Result<()> {
        run_batch(&self.state, &self.fetcher, symbols)
    }

    /// Fetches a single symbol and merges it into the store.
    ///
    /// Returns the quote on success. On failure the error flag is set and
    /// `None` is returned; the symbol's previous entry, the loading flag, and
    /// the timestamp are left untouched.
    pub fn fetch_one(&self, symbol: &Symbol) -> Result<Option<Quote>> {
        match self.fetcher.fetch_quote(symbol) {
            Ok(quote) => {
                let mut state = self.state.lock()?;
                state.quotes.insert(symbol.clone(), quote.clone());
                Ok(Some(quote))
            }
            Err(e) => {
                warn!("Quote fetch failed for {}: {}", symbol, e);
                let mut state = self.state.lock()?;
                state.error = Some(FETCH_ERROR_MESSAGE.to_string());
                Ok(None)
            }
        }
    }

    /// Replaces the watchlist with `symbols` and starts auto-refreshing them.
    ///
    /// Any previously running timer is cancelled first, so at most one timer
    /// exists per store. The new timer fetches the whole set immediately and
    /// then once per `interval`.
    pub fn start_auto_refresh(&self, symbols: Vec<Symbol>, interval: Duration) -> Result<()> {
        self.stop_auto_refresh()?;

        let watchlist = Watchlist::from_symbols(symbols);
        {
            let mut state = self.state.lock()?;
            state.watchlist = watchlist.clone();
        }

        let handle = RefreshHandle::spawn(
            Arc::clone(&self.state),
            Arc::clone(&self.fetcher),
            watchlist.to_vec(),
            interval,
        );
        info!(
            "Auto-refresh started: {} symbol(s) every {:?}",
            watchlist.len(),
            interval
        );
        *self.refresh.lock()? = Some(handle);
        Ok(())
    }

    /// Starts auto-refresh with the default 60 second interval.
    pub fn start_auto_refresh_default(&self, symbols: Vec<Symbol>) -> Result<()> {
        self.start_auto_refresh(symbols, DEFAULT_REFRESH_INTERVAL)
    }

    /// Cancels the active timer if there is one. Idempotent: calling this
    /// with no timer running is a no-op. A batch already in flight completes.
    pub fn stop_auto_refresh(&self) -> Result<()> {
        if let Some(handle) = self.refresh.lock()?.take() {
            handle.stop();
            info!("Auto-refresh stopped");
        }
        Ok(())
    }

    /// Appends `symbol` to the watchlist (no-op if already present). When a
    /// refresh is active, it is restarted against the updated watchlist.
    /// A single immediate fetch for `symbol` is issued either way, so the
    /// consumer sees data for the new entry without waiting for a tick.
    pub fn add_to_watchlist(&self, symbol: Symbol) -> Result<()> {
        let inserted = self.state.lock()?.watchlist.add(symbol.clone());
        if inserted {
            self.restart_refresh_if_active()?;
        }
        let _ = self.fetch_one(&symbol)?;
        Ok(())
    }

    /// Removes `symbol` from the watchlist if present. When a refresh is
    /// active it is restarted against the remaining symbols, or stopped
    /// entirely once the watchlist becomes empty.
    pub fn remove_from_watchlist(&self, symbol: &Symbol) -> Result<()> {
        let removed = self.state.lock()?.watchlist.remove(symbol);
        if removed {
            self.restart_refresh_if_active()?;
        }
        Ok(())
    }

    /// Cancel-and-reschedule against the current watchlist, keeping the
    /// running interval. Stops outright when the watchlist is empty.
    fn restart_refresh_if_active(&self) -> Result<()> {
        let interval = self.refresh.lock()?.as_ref().map(RefreshHandle::interval);
        let Some(interval) = interval else {
            return Ok(());
        };

        let symbols = self.state.lock()?.watchlist.to_vec();
        if symbols.is_empty() {
            self.stop_auto_refresh()
        } else {
            self.start_auto_refresh(symbols, interval)
        }
    }

    /// Returns `true` while a refresh timer is bound to this store.
    pub fn refresh_active(&self) -> Result<bool> {
        Ok(self.refresh.lock()?.is_some())
    }

    /// The symbol set and interval of the active refresh, if any.
    pub fn refresh_binding(&self) -> Result<Option<(Vec<Symbol>, Duration)>> {
        let refresh = self.refresh.lock()?;
        Ok(refresh
            .as_ref()
            .map(|h| (h.symbols().to_vec(), h.interval())))
    }

    /// Latest cached quote for `symbol`, if any.
    pub fn quote(&self, symbol: &Symbol) -> Result<Option<Quote>> {
        Ok(self.state.lock()?.quotes.get(symbol).cloned())
    }

    /// Read-only snapshot of quotes, watchlist, and flags.
    pub fn snapshot(&self) -> Result<StoreSnapshot> {
        let state = self.state.lock()?;
        Ok(StoreSnapshot {
            quotes: state.quotes.clone(),
            watchlist: state.watchlist.to_vec(),
            last_updated: state.last_updated,
            loading: state.loading,
            error: state.error.clone(),
        })
    }
}

impl Drop for RealTimeStore {
    fn drop(&mut self) {
        // Teardown must not leak ticks against a destroyed store.
        let _ = self.stop_auto_refresh();
    }
}

/// Runs one batch fetch: one worker thread per symbol, all results joined
/// over a channel, then merged under a single lock.
pub(crate) fn run_batch(
    state: &Arc<Mutex<StoreState>>,
    fetcher: &Arc<dyn QuoteFetcher>,
    symbols: &[Symbol],
) -> Result<()> {
    {
        let mut state = state.lock()?;
        state.loading = true;
        state.error = None;
    }

    let (result_tx, result_rx) = unbounded::<(Symbol, Result<Quote>)>();
    for symbol in symbols.iter().cloned() {
        let fetcher = Arc::clone(fetcher);
        let result_tx = result_tx.clone();
        thread::spawn(move || {
            let outcome = fetcher.fetch_quote(&symbol);
            let _ = result_tx.send((symbol, outcome));
        });
    }
    drop(result_tx);

    // Wait for every request to settle before touching the store; the
    // channel disconnects once the last worker is done.
    let mut settled = Vec::with_capacity(symbols.len());
    while let Ok(outcome) = result_rx.recv() {
        settled.push(outcome);
    }

    let mut state = state.lock()?;
    let mut failures = 0usize;
    for (symbol, outcome) in settled {
        match outcome {
            Ok(quote) => {
                state.quotes.insert(symbol, quote);
            }
            Err(e) => {
                warn!("Quote fetch failed for {}: {}", symbol, e);
                failures += 1;
            }
        }
    }
    if failures > 0 {
        state.error = Some(FETCH_ERROR_MESSAGE.to_string());
    }
    state.last_updated = Some(Utc::now());
    state.loading = false;
    Ok(())
}
