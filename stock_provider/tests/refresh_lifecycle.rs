//! End-to-end exercise of the refresh lifecycle: Idle → Active → Active
//! (watchlist mutation) → Idle, against an in-memory fetcher.

use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use serde_json::json;
use stock_common::{Quote, Result, Symbol};
use stock_provider::{QuoteFetcher, RealTimeStore};

/// Records every request and serves a canned payload for anything asked.
struct RecordingFetcher {
    requests: Mutex<Vec<String>>,
}

impl RecordingFetcher {
    fn new() -> Arc<Self> {
        Arc::new(RecordingFetcher {
            requests: Mutex::new(Vec::new()),
        })
    }

    fn count(&self, symbol: &str) -> usize {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter(|s| s.as_str() == symbol)
            .count()
    }
}

impl QuoteFetcher for RecordingFetcher {
    fn fetch_quote(&self, symbol: &Symbol) -> Result<Quote> {
        self.requests.lock().unwrap().push(symbol.to_string());
        Ok(Quote::new(json!({ "symbol": symbol.as_str() })))
    }
}

fn sym(s: &str) -> Symbol {
    Symbol::new(s).unwrap()
}

#[test]
fn watchlist_mutations_drive_the_refresh_lifecycle() {
    let fetcher = RecordingFetcher::new();
    let store = RealTimeStore::new(Arc::clone(&fetcher) as Arc<dyn QuoteFetcher>);
    let interval = Duration::from_millis(25);

    // Idle → Active over ["msft"].
    store.start_auto_refresh(vec![sym("msft")], interval).unwrap();
    assert!(store.refresh_active().unwrap());

    // Let the immediate batch land.
    thread::sleep(Duration::from_millis(15));
    assert!(store.quote(&sym("msft")).unwrap().is_some());

    // Active → Active: adding a symbol rebinds the timer to both and
    // fetches the newcomer right away.
    store.add_to_watchlist(sym("AAPL")).unwrap();
    let (bound, bound_interval) = store.refresh_binding().unwrap().unwrap();
    assert_eq!(bound, vec![sym("msft"), sym("aapl")]);
    assert_eq!(bound_interval, interval);
    assert!(store.quote(&sym("aapl")).unwrap().is_some());

    // Ticks now cover both symbols.
    let aapl_before = fetcher.count("aapl");
    thread::sleep(Duration::from_millis(70));
    assert!(fetcher.count("aapl") > aapl_before);
    assert!(fetcher.count("msft") > 0);

    // Active → Active: removing one of two keeps the timer running.
    store.remove_from_watchlist(&sym("msft")).unwrap();
    let (bound, _) = store.refresh_binding().unwrap().unwrap();
    assert_eq!(bound, vec![sym("aapl")]);
    assert!(store.refresh_active().unwrap());

    // Active → Idle: emptying the watchlist stops the refresh.
    store.remove_from_watchlist(&sym("aapl")).unwrap();
    assert!(!store.refresh_active().unwrap());
    assert!(store.snapshot().unwrap().watchlist.is_empty());

    // The cache keeps the last known quotes after the refresh stops.
    assert!(store.quote(&sym("msft")).unwrap().is_some());
    assert!(store.quote(&sym("aapl")).unwrap().is_some());
}

#[test]
fn snapshot_reflects_batch_completion() {
    let fetcher = RecordingFetcher::new();
    let store = RealTimeStore::new(Arc::clone(&fetcher) as Arc<dyn QuoteFetcher>);

    let before = store.snapshot().unwrap();
    assert!(before.last_updated.is_none());
    assert!(!before.loading);

    store.fetch_many(&[sym("msft"), sym("aapl")]).unwrap();

    let after = store.snapshot().unwrap();
    assert_eq!(after.quotes.len(), 2);
    assert!(after.last_updated.is_some());
    assert!(!after.loading);
    assert!(after.error.is_none());
}
