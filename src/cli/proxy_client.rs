use anyhow::Result;
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::core::market::MarketEnvelope;

/// Fixed user-facing message for failures where no better diagnostic is
/// available (proxy unreachable, undecodable envelope).
pub const TRANSPORT_FAILURE_MESSAGE: &str =
    "Failed to load cryptocurrency data. Please ensure the server is running and the API key is valid.";

/// A failed envelope fetch, reduced to the most specific user-facing
/// message available.
#[derive(Debug, Error, PartialEq)]
#[error("{message}")]
pub struct FetchError {
    pub message: String,
}

/// Client side of the proxy contract: fetches the normalized envelope and
/// folds every failure mode into a renderable message. Never panics, never
/// leaks a raw transport error to the caller.
pub struct ProxyClient {
    base_url: String,
    client: reqwest::Client,
}

impl ProxyClient {
    pub fn new(base_url: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent("coindeck/0.1")
            .build()?;
        Ok(ProxyClient {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub async fn fetch_market(&self, currency: &str) -> Result<MarketEnvelope, FetchError> {
        let url = format!("{}/api/proxy/coins?currency={}", self.base_url, currency);
        debug!("Fetching envelope from {}", url);

        let response = match self.client.get(&url).send().await {
            Ok(response) => response,
            Err(e) => {
                debug!(error = %e, "Proxy request failed");
                return Err(FetchError {
                    message: TRANSPORT_FAILURE_MESSAGE.to_string(),
                });
            }
        };

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FetchError {
                message: error_message(status.as_u16(), &body),
            });
        }

        response
            .json::<MarketEnvelope>()
            .await
            .map_err(|e| {
                debug!(error = %e, "Undecodable envelope");
                FetchError {
                    message: TRANSPORT_FAILURE_MESSAGE.to_string(),
                }
            })
    }
}

/// Most specific message first: the structured error body's `error` or
/// `details` field, then the raw body text, then a generic status line.
fn error_message(status: u16, body: &str) -> String {
    if let Ok(parsed) = serde_json::from_str::<Value>(body) {
        if let Some(message) = parsed.get("error").and_then(Value::as_str) {
            return message.to_string();
        }
        if let Some(message) = parsed.get("details").and_then(Value::as_str) {
            return message.to_string();
        }
    }
    if !body.trim().is_empty() {
        return body.trim().to_string();
    }
    format!("HTTP error {status}")
}
