//! Image Routes
//!
//! - GET /api/v1/patients/:id/images?type=... - Patient images of one type

use axum::{
    extract::{Path, Query, State},
    Json,
};
use std::sync::Arc;

use crate::api::dto::{ImageListParams, ImageListResponse};
use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use crate::backend::ImageType;

/// GET /api/v1/patients/:id/images
pub async fn list_images(
    State(state): State<Arc<AppState>>,
    Path(patient_id): Path<String>,
    Query(params): Query<ImageListParams>,
) -> ApiResult<Json<ImageListResponse>> {
    let image_type: ImageType = params
        .image_type
        .as_deref()
        .ok_or_else(|| ApiError::Validation("type is required".to_string()))?
        .parse()
        .map_err(ApiError::Validation)?;

    let images = state
        .images
        .list_patient_images(&patient_id, image_type)
        .await?;

    tracing::debug!(
        patient_id = %patient_id,
        image_type = %image_type,
        count = images.len(),
        "Listed patient images"
    );

    Ok(Json(ImageListResponse {
        patient_id,
        image_type: image_type.to_string(),
        count: images.len(),
        images,
    }))
}
