//! Quote payload and the upstream response envelope.
//!
//! A `Quote` is whatever JSON the upstream API reports for a symbol. This
//! layer never inspects the payload; it is cached and handed to consumers
//! untouched. The upstream wraps the payload in a `{ "data": ... }` envelope.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::StoreError;

/// Opaque market-data payload for a single symbol.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct Quote(Value);

impl Quote {
    /// Wraps a raw JSON value as a quote payload.
    pub fn new(payload: Value) -> Self {
        Quote(payload)
    }

    /// Returns the raw JSON payload.
    pub fn payload(&self) -> &Value {
        &self.0
    }
}

/// Response body shape returned by `GET /api/stocks/{symbol}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuoteEnvelope {
    /// The quote payload carried by the response.
    pub data: Quote,
}

impl QuoteEnvelope {
    /// Decodes an envelope from raw JSON bytes.
    pub fn from_json_bytes(bytes: &[u8]) -> Result<Self, StoreError> {
        let envelope = serde_json::from_slice(bytes)?;
        Ok(envelope)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn envelope_decodes_opaque_payload() {
        let body = br#"{"data":{"symbol":"AAPL","price":243.56,"analyst":{"buy":3}}}"#;
        let envelope = QuoteEnvelope::from_json_bytes(body).unwrap();
        assert_eq!(
            envelope.data.payload()["price"],
            json!(243.56),
        );
    }

    #[test]
    fn envelope_rejects_missing_data_field() {
        assert!(QuoteEnvelope::from_json_bytes(br#"{"quote":{}}"#).is_err());
    }
}
