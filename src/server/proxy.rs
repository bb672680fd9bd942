use std::sync::Arc;

use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use serde_json::json;
use tracing::warn;

use super::AppState;
use crate::core::market::UpstreamError;

/// Error string clients key their generic failure message on.
pub const PROXY_ERROR: &str = "Failed to fetch cryptocurrency data via proxy";

#[derive(Deserialize)]
pub struct CoinsQuery {
    currency: Option<String>,
}

/// `GET /api/proxy/coins?currency=<code>` — fetches and normalizes the
/// upstream feed for one fiat currency. Upstream failures come back as
/// structured JSON with the upstream status mirrored; transport failures
/// as 500. The client never sees an unstructured error.
pub async fn get_coins(
    State(state): State<Arc<AppState>>,
    Query(query): Query<CoinsQuery>,
) -> Response {
    let currency = query.currency.as_deref().unwrap_or("usd");

    match state.provider.fetch_market(currency).await {
        Ok(fetch) => {
            let mut body = json!({
                "coins": fetch.envelope.coins,
                "global": fetch.envelope.global,
            });
            if state.debug_passthrough {
                body["raw_api_response"] = fetch.raw;
            }
            Json(body).into_response()
        }
        Err(UpstreamError::UpstreamStatus { status, details }) => {
            let code = StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY);
            (
                code,
                Json(json!({ "error": PROXY_ERROR, "details": details })),
            )
                .into_response()
        }
        Err(UpstreamError::Unreachable { message }) => {
            warn!(%message, "Upstream unreachable");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": PROXY_ERROR, "details": message })),
            )
                .into_response()
        }
    }
}
