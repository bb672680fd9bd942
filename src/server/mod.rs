//! HTTP boundary of the aggregation proxy. Each inbound request is handled
//! independently and statelessly; the only shared state is the immutable
//! provider handle.

pub mod proxy;

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{Router, routing::get};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

use crate::core::config::{self, AppConfig};
use crate::core::market::MarketProvider;
use crate::providers::world_index::WorldIndexProvider;

pub struct AppState {
    pub provider: Arc<dyn MarketProvider>,
    pub debug_passthrough: bool,
}

pub fn app_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/proxy/coins", get(proxy::get_coins))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run(config: &AppConfig) -> Result<()> {
    let api_key = config::upstream_api_key()?;
    let provider = WorldIndexProvider::new(&config.server.upstream_base_url, &api_key)?;
    let state = Arc::new(AppState {
        provider: Arc::new(provider),
        debug_passthrough: config.server.debug_passthrough,
    });

    // PORT overrides the configured port, keeping the host/interface part.
    let listen_addr = match std::env::var("PORT") {
        Ok(port) => {
            let host = config
                .server
                .listen_addr
                .rsplit_once(':')
                .map_or("127.0.0.1", |(host, _)| host);
            format!("{host}:{port}")
        }
        Err(_) => config.server.listen_addr.clone(),
    };

    let listener = tokio::net::TcpListener::bind(&listen_addr)
        .await
        .with_context(|| format!("Failed to bind {listen_addr}"))?;
    info!("Market proxy listening on http://{listen_addr}");
    axum::serve(listener, app_router(state)).await?;
    Ok(())
}
