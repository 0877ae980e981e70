//! HTTP handlers and API error mapping.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::AppState;
use crate::application::{DiscoveryListing, ServiceError};
use crate::domain::TokenInfo;

/// Errors rendered as JSON `{error, ...}` bodies.
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    Internal(String),
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::InvalidAddress => ApiError::BadRequest(err.to_string()),
            ServiceError::Upstream(message) => ApiError::Internal(message),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::BadRequest(message) => {
                (StatusCode::BAD_REQUEST, json!({ "error": message }))
            }
            ApiError::Internal(message) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "error": "internal server error", "message": message }),
            ),
        };
        (status, Json(body)).into_response()
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: &'static str,
    pub started_at: DateTime<Utc>,
    pub last_block: u64,
}

#[derive(Debug, Deserialize)]
pub struct TokenInfoQuery {
    pub address: Option<String>,
}

pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let listing = state.service.recent_discoveries().await;
    Json(HealthResponse {
        status: "ok",
        started_at: state.started_at,
        last_block: listing.last_block,
    })
}

pub async fn discoveries(State(state): State<Arc<AppState>>) -> Json<DiscoveryListing> {
    Json(state.service.recent_discoveries().await)
}

pub async fn token_by_path(
    State(state): State<Arc<AppState>>,
    Path(address): Path<String>,
) -> Result<Json<TokenInfo>, ApiError> {
    let info = state.service.token_info(&address).await?;
    Ok(Json(info))
}

pub async fn token_by_query(
    State(state): State<Arc<AppState>>,
    Query(query): Query<TokenInfoQuery>,
) -> Result<Json<TokenInfo>, ApiError> {
    let address = query
        .address
        .ok_or_else(|| ApiError::BadRequest("token address required".to_string()))?;
    let info = state.service.token_info(&address).await?;
    Ok(Json(info))
}
