//! Health Routes
//!
//! Health check endpoints for monitoring and Kubernetes probes.
//!
//! - GET /health/live - Liveness probe (process is alive)
//! - GET /health/ready - Readiness probe (backend reachable)
//! - GET /health - Full health status

use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;

use crate::api::dto::HealthResponse;
use crate::api::state::AppState;
use crate::deployment::check_deployment_status;

/// GET /health/live
///
/// Returns 200 if the process is alive, no dependency checks.
pub async fn liveness() -> StatusCode {
    StatusCode::OK
}

/// GET /health/ready
///
/// Returns 200 once the hosted backend answers.
pub async fn readiness(State(state): State<Arc<AppState>>) -> StatusCode {
    let status = check_deployment_status(Arc::clone(&state.store)).await;
    if status.is_connected {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    }
}

/// GET /health
pub async fn full_health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let status = check_deployment_status(Arc::clone(&state.store)).await;

    let overall_status = if status.is_healthy() {
        "healthy"
    } else if status.is_connected {
        "degraded"
    } else {
        "unhealthy"
    };

    Json(HealthResponse {
        status: overall_status.to_string(),
        backend: if status.is_connected { "connected" } else { "disconnected" }.to_string(),
        has_roles: status.has_roles,
        has_user_profiles: status.has_user_profiles,
        error: status.error,
        uptime_seconds: state.uptime_seconds(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
