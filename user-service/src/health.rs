//! Health check handler

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};

use crate::repository::UserRepository;
use crate::state::AppState;

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status
    pub status: String,

    /// Service name
    pub service: String,

    /// Version
    pub version: String,
}

/// Liveness check
///
/// Always returns 200 OK while the process is serving. It does not touch
/// the database.
pub async fn health<R>(State(state): State<AppState<R>>) -> impl IntoResponse
where
    R: UserRepository,
{
    let response = HealthResponse {
        status: "healthy".to_string(),
        service: state.service_name().to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    };

    (StatusCode::OK, Json(response))
}
