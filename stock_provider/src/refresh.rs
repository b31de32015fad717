//! Recurring refresh timer and its handle.
//!
//! A `RefreshHandle` is the live binding between a running timer thread and
//! the symbol set it refreshes. The store owns at most one handle at a time;
//! replacing or dropping it stops the loop. The timer thread runs one batch
//! immediately, then re-runs it on every tick until the stop channel fires
//! or the handle is dropped.

use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use crossbeam_channel::{RecvTimeoutError, Sender, bounded};
use log::{debug, error};
use stock_common::Symbol;

use crate::fetcher::QuoteFetcher;
use crate::store::{StoreState, run_batch};

/// Live binding between a running timer and the symbols it refreshes.
pub struct RefreshHandle {
    stop_tx: Sender<()>,
    symbols: Vec<Symbol>,
    interval: Duration,
}

impl RefreshHandle {
    /// Spawns the timer thread and returns its handle.
    ///
    /// The thread performs an immediate batch fetch, then one per `interval`.
    /// It exits as soon as the stop channel fires or is disconnected, so
    /// dropping the handle is sufficient to stop it. A batch already in
    /// flight is never interrupted.
    pub(crate) fn spawn(
        state: Arc<Mutex<StoreState>>,
        fetcher: Arc<dyn QuoteFetcher>,
        symbols: Vec<Symbol>,
        interval: Duration,
    ) -> Self {
        let (stop_tx, stop_rx) = bounded::<()>(1);
        let loop_symbols = symbols.clone();

        thread::spawn(move || {
            if let Err(e) = run_batch(&state, &fetcher, &loop_symbols) {
                error!("Initial refresh batch failed: {}", e);
            }
            loop {
                match stop_rx.recv_timeout(interval) {
                    // Stop signal or handle dropped: either way, we are done.
                    Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                    Err(RecvTimeoutError::Timeout) => {
                        if let Err(e) = run_batch(&state, &fetcher, &loop_symbols) {
                            error!("Scheduled refresh batch failed: {}", e);
                        }
                    }
                }
            }
            debug!("Refresh loop stopped for {} symbol(s)", loop_symbols.len());
        });

        RefreshHandle {
            stop_tx,
            symbols,
            interval,
        }
    }

    /// Signals the timer thread to stop. Best-effort: if the thread already
    /// exited, there is nothing left to do.
    pub(crate) fn stop(self) {
        let _ = self.stop_tx.try_send(());
    }

    /// Symbols this refresh is bound to, in watchlist order.
    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    /// Interval between scheduled batches.
    pub fn interval(&self) -> Duration {
        self.interval
    }
}
