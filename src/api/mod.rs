//! CarePrep REST API
//!
//! Administrative HTTP API, built with Axum.
//!
//! # Endpoints
//!
//! ## Deployment
//! - `GET /api/v1/deployment/status` - Probe the backend
//! - `POST /api/v1/deployment/roles` - Create missing seed roles
//! - `POST /api/v1/deployment/profiles` - Repair a missing user profile
//!
//! ## Countdown
//! - `GET /api/v1/countdown?target=...` - Time left until a surgery date
//!
//! ## Localization
//! - `GET /api/v1/languages` - Supported languages
//! - `POST /api/v1/translate` - Translate a catalog key
//!
//! ## Images
//! - `GET /api/v1/patients/:id/images?type=...` - Patient images of one type
//!
//! ## Health
//! - `GET /health/live` - Liveness probe
//! - `GET /health/ready` - Readiness probe
//! - `GET /health` - Full health status
//!
//! # Example
//!
//! ```rust,ignore
//! use careprep::api::{serve, ApiConfig, AppState};
//! use careprep::backend::{BackendConfig, RestStore};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = Arc::new(RestStore::new(BackendConfig::default())?);
//!     let config = ApiConfig::default();
//!
//!     let state = AppState::new(store.clone(), store, config.clone());
//!     serve(state, &config).await?;
//!
//!     Ok(())
//! }
//! ```

pub mod dto;
pub mod error;
pub mod routes;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use state::{ApiConfig, AppState};

use axum::{
    http::HeaderValue,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

/// Build the API router with all routes and middleware
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        // Deployment routes
        .route("/deployment/status", get(routes::deployment::get_status))
        .route("/deployment/roles", post(routes::deployment::post_roles))
        .route("/deployment/profiles", post(routes::deployment::post_profile))
        // Countdown routes
        .route("/countdown", get(routes::countdown::get_countdown))
        // Locale routes
        .route("/languages", get(routes::locale::list_languages))
        .route("/translate", post(routes::locale::post_translate))
        // Image routes
        .route("/patients/:id/images", get(routes::images::list_images));

    let health_routes = Router::new()
        .route("/live", get(routes::health::liveness))
        .route("/ready", get(routes::health::readiness))
        .route("/", get(routes::health::full_health));

    let cors = cors_layer(&state.config.cors_origins);
    let timeout = Duration::from_millis(state.config.request_timeout_ms);

    // Create shared state
    let shared_state = Arc::new(state);

    Router::new()
        .nest("/api/v1", api_routes)
        .nest("/health", health_routes)
        .layer(TimeoutLayer::new(timeout))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(shared_state)
}

/// Permissive unless specific origins are configured
fn cors_layer(origins: &[String]) -> CorsLayer {
    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    if allowed.is_empty() {
        return CorsLayer::permissive();
    }

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed))
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Start the API server
pub async fn serve(state: AppState, config: &ApiConfig) -> Result<(), ApiError> {
    let router = build_router(state);

    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("CarePrep API listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ApiError::Internal(format!("Server error: {}", e)))?;

    tracing::info!("CarePrep API shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install signal handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{DataStore, ImageType, InMemoryStore, PatientImage, Table};
    use crate::deployment::seed_roles;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
        response::Response,
    };
    use serde_json::Value;
    use tower::util::ServiceExt;

    fn create_test_app() -> (Router, Arc<InMemoryStore>) {
        let store = Arc::new(InMemoryStore::new());
        let state = AppState::new(store.clone(), store.clone(), ApiConfig::default());
        (build_router(state), store)
    }

    async fn get(app: Router, uri: &str) -> Response {
        app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    async fn post_json(app: Router, uri: &str, body: &str) -> Response {
        app.oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("Content-Type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap()
    }

    async fn json_body(response: Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health_live() {
        let (app, _store) = create_test_app();
        let response = get(app, "/health/live").await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_health_ready_follows_backend() {
        let (app, store) = create_test_app();
        let response = get(app.clone(), "/health/ready").await;
        assert_eq!(response.status(), StatusCode::OK);

        store.set_unreachable(true);
        let response = get(app, "/health/ready").await;
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_health_full_degraded_without_roles() {
        let (app, _store) = create_test_app();
        let response = get(app, "/health").await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        assert_eq!(body["status"], "degraded");
        assert_eq!(body["backend"], "connected");
        assert_eq!(body["has_roles"], false);
    }

    #[tokio::test]
    async fn test_deployment_status_disconnected() {
        let (app, store) = create_test_app();
        store.set_unreachable(true);

        let response = get(app, "/api/v1/deployment/status").await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        assert_eq!(body["is_connected"], false);
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn test_create_roles_then_fix_profile() {
        let (app, store) = create_test_app();

        let response = post_json(app.clone(), "/api/v1/deployment/roles", "{}").await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["success"], true);
        assert_eq!(store.roles().await.len(), 5);

        let response = post_json(
            app,
            "/api/v1/deployment/profiles",
            r#"{"user_id": "u-1", "email": "somchai@example.com"}"#,
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        assert_eq!(body["details"]["profile"]["username"], "somchai_at_example_com");
        assert_eq!(store.count_rows(Table::UserProfiles).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_fix_profile_without_roles_is_unprocessable() {
        let (app, _store) = create_test_app();
        let response = post_json(
            app,
            "/api/v1/deployment/profiles",
            r#"{"user_id": "u-1", "email": "a@example.com"}"#,
        )
        .await;

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(json_body(response).await["success"], false);
    }

    #[tokio::test]
    async fn test_fix_profile_rejects_bad_email() {
        let (app, _store) = create_test_app();
        let response = post_json(
            app,
            "/api/v1/deployment/profiles",
            r#"{"user_id": "u-1", "email": "not-an-email"}"#,
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_countdown_without_target_is_zero() {
        let (app, _store) = create_test_app();
        let response = get(app, "/api/v1/countdown").await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        assert_eq!(body["total_seconds"], 0);
        assert_eq!(body["display"], "0d 00h 00m 00s");
        assert!(body["target"].is_null());
    }

    #[tokio::test]
    async fn test_countdown_future_target() {
        let (app, _store) = create_test_app();
        let response = get(app, "/api/v1/countdown?target=2999-01-01").await;
        let body = json_body(response).await;
        assert!(body["days"].as_i64().unwrap() > 0);
    }

    #[tokio::test]
    async fn test_languages_and_translate() {
        let (app, _store) = create_test_app();
        let response = get(app.clone(), "/api/v1/languages").await;
        let body = json_body(response).await;
        assert_eq!(body.as_array().unwrap().len(), 2);
        assert_eq!(body[1]["font_class"], "font-sarabun");

        let response = post_json(
            app.clone(),
            "/api/v1/translate",
            r#"{"language": "th", "key": "missing.key"}"#,
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["text"], "missing.key");

        let response =
            post_json(app, "/api/v1/translate", r#"{"language": "fr", "key": "app.name"}"#).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_list_images() {
        let (app, store) = create_test_app();
        store
            .add_image(PatientImage {
                id: "img-1".to_string(),
                patient_id: "p-1".to_string(),
                image_type: ImageType::Quotation,
                url: "https://cdn.example.com/q1.jpg".to_string(),
                file_name: "q1.jpg".to_string(),
                created_at: None,
            })
            .await;

        let response = get(app.clone(), "/api/v1/patients/p-1/images?type=quotation").await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["count"], 1);

        let response = get(app.clone(), "/api/v1/patients/p-1/images?type=xray").await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = get(app, "/api/v1/patients/p-1/images").await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_seeded_store_reports_healthy_roles() {
        let (app, store) = create_test_app();
        store.insert_roles(seed_roles()).await.unwrap();

        let body = json_body(get(app, "/api/v1/deployment/status").await).await;
        assert_eq!(body["has_roles"], true);
        assert_eq!(body["details"]["role_count"], 5);
    }
}
