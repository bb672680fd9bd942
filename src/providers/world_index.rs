use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, instrument, warn};

use crate::core::market::{MarketEnvelope, MarketFetch, MarketProvider, UpstreamError};
use crate::core::normalize;

/// WorldIndexProvider implementation for MarketProvider. Stateless beyond
/// the credential: every call re-queries upstream, no caching, no retry.
pub struct WorldIndexProvider {
    base_url: String,
    api_key: String,
    client: reqwest::Client,
}

impl WorldIndexProvider {
    pub fn new(base_url: &str, api_key: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent("coindeck/0.1")
            .build()?;
        Ok(WorldIndexProvider {
            base_url: base_url.to_string(),
            api_key: api_key.to_string(),
            client,
        })
    }

    fn markets_url(&self, fiat: &str) -> String {
        format!(
            "{}/apiservice/v2getmarkets?key={}&fiat={}",
            self.base_url, self.api_key, fiat
        )
    }
}

#[async_trait]
impl MarketProvider for WorldIndexProvider {
    #[instrument(name = "WorldIndexFetch", skip(self), fields(fiat = %fiat))]
    async fn fetch_market(&self, fiat: &str) -> Result<MarketFetch, UpstreamError> {
        debug!(
            "Requesting markets from {}/apiservice/v2getmarkets?key=***&fiat={}",
            self.base_url, fiat
        );

        let response = self
            .client
            .get(self.markets_url(fiat))
            .send()
            .await
            .map_err(|e| UpstreamError::Unreachable {
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            let details = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), "Upstream rejected market request");
            return Err(UpstreamError::UpstreamStatus {
                status: status.as_u16(),
                details,
            });
        }

        let raw: Value = response
            .json()
            .await
            .map_err(|e| UpstreamError::Unreachable {
                message: format!("undecodable upstream payload: {e}"),
            })?;

        // An empty or absent Markets array is a valid, non-error result.
        let coins = match raw.get("Markets").and_then(Value::as_array) {
            Some(markets) => markets.iter().map(normalize::normalize_entry).collect(),
            None => Vec::new(),
        };
        let global = normalize::normalize_global(raw.get("GlobalData"));

        Ok(MarketFetch {
            envelope: MarketEnvelope { coins, global },
            raw,
        })
    }
}
