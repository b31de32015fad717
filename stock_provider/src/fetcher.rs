//! Upstream quote fetching.
//!
//! The `QuoteFetcher` trait is the seam between the store and the network:
//! the store only ever asks for "the latest quote for this symbol" and never
//! sees HTTP details. `HttpQuoteFetcher` is the production implementation,
//! a blocking client for `GET {base_url}/api/stocks/{symbol}`.

use reqwest::blocking::Client;
use stock_common::config::ApiConfig;
use stock_common::quote::QuoteEnvelope;
use stock_common::{Quote, Result, StoreError, Symbol};

/// Source of per-symbol quote payloads.
///
/// Implementations must be shareable across the per-symbol worker threads,
/// hence the `Send + Sync` bound.
pub trait QuoteFetcher: Send + Sync {
    /// Fetches the latest quote for `symbol`.
    ///
    /// A non-2xx upstream status or an undecodable body is an error; callers
    /// decide how to degrade (the store records a flag and keeps stale data).
    fn fetch_quote(&self, symbol: &Symbol) -> Result<Quote>;
}

/// Blocking HTTP implementation of [`QuoteFetcher`].
pub struct HttpQuoteFetcher {
    client: Client,
    config: ApiConfig,
}

impl HttpQuoteFetcher {
    /// Builds the HTTP client with the timeout from `config`.
    pub fn new(config: ApiConfig) -> Result<Self> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(HttpQuoteFetcher { client, config })
    }

    /// Full request URL for a symbol. The symbol is already normalized to
    /// lowercase, which is what the upstream path expects.
    fn quote_url(&self, symbol: &Symbol) -> String {
        format!("{}/api/stocks/{}", self.config.base_url, symbol)
    }
}

impl QuoteFetcher for HttpQuoteFetcher {
    fn fetch_quote(&self, symbol: &Symbol) -> Result<Quote> {
        let mut request = self.client.get(self.quote_url(symbol));
        if let Some(key) = &self.config.api_key {
            request = request.header("X-API-Key", key);
        }

        let response = request.send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(StoreError::UpstreamStatus {
                status: status.as_u16(),
                symbol: symbol.to_string(),
            });
        }

        let envelope: QuoteEnvelope = response.json()?;
        Ok(envelope.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quote_url_uses_lowercased_symbol_path() {
        let fetcher = HttpQuoteFetcher::new(ApiConfig::new("http://localhost:5000/")).unwrap();
        let symbol = Symbol::new("AAPL").unwrap();
        assert_eq!(
            fetcher.quote_url(&symbol),
            "http://localhost:5000/api/stocks/aapl"
        );
    }
}
