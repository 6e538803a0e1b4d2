//! Countdown Routes
//!
//! - GET /api/v1/countdown?target=... - Time left until the surgery date

use axum::{extract::Query, Json};
use chrono::Utc;

use crate::api::dto::{CountdownParams, CountdownResponse};
use crate::countdown::{parse_target, time_remaining};

/// GET /api/v1/countdown
///
/// A missing or unparseable target is not an error; it counts down from zero.
pub async fn get_countdown(Query(params): Query<CountdownParams>) -> Json<CountdownResponse> {
    let target = params.target.as_deref().and_then(parse_target);
    let remaining = time_remaining(target, Utc::now());

    Json(CountdownResponse {
        target,
        remaining,
        total_seconds: remaining.total_seconds(),
        display: remaining.to_string(),
    })
}
