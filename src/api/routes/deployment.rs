//! Deployment Routes
//!
//! - GET /api/v1/deployment/status - Probe the backend
//! - POST /api/v1/deployment/roles - Insert missing seed roles
//! - POST /api/v1/deployment/profiles - Repair a missing user profile

use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;

use crate::api::dto::FixProfileRequest;
use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use crate::deployment::{
    check_deployment_status, create_roles, fix_missing_user_profile, DeploymentStatus,
    OperationReport,
};
use crate::utils::validate_email;

/// GET /api/v1/deployment/status
pub async fn get_status(State(state): State<Arc<AppState>>) -> Json<DeploymentStatus> {
    Json(check_deployment_status(Arc::clone(&state.store)).await)
}

/// POST /api/v1/deployment/roles
pub async fn post_roles(
    State(state): State<Arc<AppState>>,
) -> (StatusCode, Json<OperationReport>) {
    let report = create_roles(state.store.as_ref()).await;
    report_response(report)
}

/// POST /api/v1/deployment/profiles
pub async fn post_profile(
    State(state): State<Arc<AppState>>,
    Json(request): Json<FixProfileRequest>,
) -> ApiResult<(StatusCode, Json<OperationReport>)> {
    let user_id = request.user_id.trim();
    if user_id.is_empty() {
        return Err(ApiError::Validation("user_id is required".to_string()));
    }
    validate_email(&request.email)?;

    let report = fix_missing_user_profile(state.store.as_ref(), user_id, request.email.trim()).await;
    Ok(report_response(report))
}

/// Failed reports keep their body so callers see the message
fn report_response(report: OperationReport) -> (StatusCode, Json<OperationReport>) {
    let status = if report.success {
        StatusCode::OK
    } else {
        StatusCode::UNPROCESSABLE_ENTITY
    };
    (status, Json(report))
}
