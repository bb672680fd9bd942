//! Market data types shared by the proxy server and the dashboard client

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// A single coin as exposed to clients. Every numeric field is either a
/// finite number or `None` — never a string and never NaN, regardless of
/// what the upstream feed sends.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedCoin {
    pub name: String,
    /// Raw pair label from upstream, e.g. "BTC/USD". Parsing into a ticker
    /// symbol is deferred to presentation.
    pub label: String,
    pub price: Option<f64>,
    pub change24h: Option<f64>,
    pub market_cap: Option<f64>,
    pub volume24h: Option<f64>,
    pub image_url: Option<String>,
}

/// Market-wide totals. Both fields default to `None` when the upstream
/// global object is absent or malformed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalSummary {
    pub total_market_cap: Option<f64>,
    pub total_24h_volume: Option<f64>,
}

/// The stable contract between server and client. Coin ordering is the
/// upstream ordering, assumed rank-sorted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MarketEnvelope {
    pub coins: Vec<NormalizedCoin>,
    pub global: GlobalSummary,
}

/// A successful upstream round trip: the normalized envelope plus the
/// untouched payload for the gated debug passthrough.
#[derive(Debug, Clone)]
pub struct MarketFetch {
    pub envelope: MarketEnvelope,
    pub raw: Value,
}

#[derive(Debug, Error)]
pub enum UpstreamError {
    /// Upstream answered with a non-success status. `details` is the raw
    /// body text, forwarded as diagnostic context.
    #[error("upstream responded {status}: {details}")]
    UpstreamStatus { status: u16, details: String },

    /// Transport-level failure reaching upstream (network down, timeout,
    /// undecodable payload). Surfaced to clients as a 500.
    #[error("upstream unreachable: {message}")]
    Unreachable { message: String },
}

#[async_trait]
pub trait MarketProvider: Send + Sync {
    async fn fetch_market(&self, fiat: &str) -> Result<MarketFetch, UpstreamError>;
}
