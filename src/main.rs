//! CarePrep API Server
//!
//! Run with: cargo run --bin careprep
//!
//! Configuration is read from the first config file found (see
//! [`Config::load_default`]) with `CAREPREP_*` environment overrides.
//! `RUST_LOG` overrides the configured log level.

use careprep::api::{serve, AppState};
use careprep::backend::RestStore;
use careprep::config::Config;
use careprep::deployment::{check_deployment_status, create_roles};
use careprep::logging::init_tracing;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let (config, source) = Config::load_default()?;
    init_tracing(&config.logging)?;

    tracing::info!("Starting CarePrep API server v{}", env!("CARGO_PKG_VERSION"));
    match &source {
        Some(path) => tracing::info!("Loaded config from {:?}", path),
        None => tracing::info!("No config file found, using defaults with environment overrides"),
    }
    tracing::info!("Backend: {}", config.backend.url);

    if config.backend.api_key.is_empty() {
        tracing::warn!("No backend API key configured (set CAREPREP_BACKEND_KEY)");
    }

    let store = Arc::new(RestStore::new(config.backend_client_config())?);

    // Startup probe; the server still starts when the backend is down so
    // the readiness endpoint can report it
    let status = check_deployment_status(store.clone()).await;
    if !status.is_connected {
        tracing::warn!(
            "Backend not reachable: {}",
            status.error.as_deref().unwrap_or("unknown error")
        );
    } else if !status.has_roles && config.backend.auto_seed_roles {
        tracing::info!("Roles table is empty, seeding roles");
        let report = create_roles(store.as_ref()).await;
        if report.success {
            tracing::info!("{}", report.message);
        } else {
            tracing::warn!("{}", report.message);
        }
    } else if !status.has_roles {
        tracing::warn!("No roles found; run `careprep-cli seed-roles` or enable auto_seed_roles");
    }

    let api_config = config.server_config();
    let state = AppState::new(store.clone(), store, api_config.clone());
    serve(state, &api_config).await?;

    Ok(())
}
