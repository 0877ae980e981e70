//! HTTP Server - JSON API over the discovery service
//!
//! Routes:
//! - `GET /health`
//! - `GET /discoveries`
//! - `GET /token/:address`
//! - `GET /token-info?address=` (same response shape as the path variant)
//!
//! Handlers only read service state; all scanning happens in the periodic
//! worker task.

pub mod routes;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::routing::get;
use axum::Router;
use chrono::{DateTime, Utc};
use tower_http::cors::CorsLayer;

use crate::application::DiscoveryService;

/// Shared handler context.
pub struct AppState {
    pub service: DiscoveryService,
    pub started_at: DateTime<Utc>,
}

impl AppState {
    pub fn new(service: DiscoveryService) -> Self {
        Self {
            service,
            started_at: Utc::now(),
        }
    }
}

/// Build the API router. The front end is served separately, so CORS stays
/// permissive.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(routes::health))
        .route("/discoveries", get(routes::discoveries))
        .route("/token/:address", get(routes::token_by_path))
        .route("/token-info", get(routes::token_by_query))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Bind and serve until the task is cancelled.
pub async fn serve(addr: SocketAddr, state: Arc<AppState>) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "HTTP server listening");
    axum::serve(listener, router(state)).await
}
