//! `GET /health` endpoint handler.
//!
//! Returns a [`HealthResponse`] JSON payload with the server version,
//! uptime, and the shape of the loaded configuration. Secrets are
//! reported only as booleans.

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::server::AppState;

#[derive(Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
    pub upstream: UpstreamHealth,
}

#[derive(Serialize, Deserialize)]
pub struct UpstreamHealth {
    pub origin: String,
    pub mount_prefix: String,
    pub gate_enabled: bool,
    pub default_credential_configured: bool,
}

pub async fn health_handler(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let config = state.handler.config();

    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
        upstream: UpstreamHealth {
            origin: config.upstream.clone(),
            mount_prefix: config.mount_prefix.clone(),
            gate_enabled: config.gate_enabled(),
            default_credential_configured: config.has_default_credential(),
        },
    })
}
