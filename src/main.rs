//! checkin-gateway server entry point.
//!
//! Starts the Axum HTTP server for the check-in portal.

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use sqlx::postgres::PgPoolOptions;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use checkin_gateway::api;
use checkin_gateway::app_state::AppState;
use checkin_gateway::auth::TokenStore;
use checkin_gateway::config::PortalConfig;
use checkin_gateway::domain::{ScanTypeRegistry, UserDirectory};
use checkin_gateway::persistence::PortalPersistence;
use checkin_gateway::service::CheckinService;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load configuration
    let config = PortalConfig::from_env()?;
    tracing::info!(addr = %config.listen_addr, "starting checkin-gateway");

    let token_store = Arc::new(TokenStore::from_spec(&config.auth_tokens)?);
    if token_store.is_empty() {
        tracing::warn!("AUTH_TOKENS is empty; every request will be rejected");
    }

    // Connect persistence and replay stored state, if enabled. The service
    // runs from memory either way.
    let mut persistence = None;
    let mut scan_types = Vec::new();
    let mut users = Vec::new();
    if config.persistence_enabled {
        match PgPoolOptions::new()
            .max_connections(config.database_max_connections)
            .min_connections(config.database_min_connections)
            .acquire_timeout(Duration::from_secs(config.database_connect_timeout_secs))
            .connect(&config.database_url)
            .await
        {
            Ok(pool) => {
                let store = PortalPersistence::new(pool);
                store.ensure_schema().await?;
                scan_types = store.load_scan_types().await?;
                users = store.load_users().await?;
                tracing::info!(
                    scan_types = scan_types.len(),
                    users = users.len(),
                    "loaded persisted state"
                );
                persistence = Some(store);
            }
            Err(err) => {
                tracing::warn!(%err, "database unavailable; continuing in-memory only");
            }
        }
    }

    // Build domain layer
    let registry = Arc::new(ScanTypeRegistry::with_scan_types(scan_types));
    let directory = Arc::new(UserDirectory::new());
    for user in users {
        if let Err(err) = directory.insert(user).await {
            tracing::warn!(%err, "skipping persisted user");
        }
    }

    // Build service layer
    let service = Arc::new(CheckinService::new(registry, directory, persistence));

    // Build application state
    let app_state = AppState {
        service,
        token_store,
    };

    // Build router
    let app = Router::new()
        .merge(api::build_router())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(app_state);

    // Start server
    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    tracing::info!(addr = %config.listen_addr, "server listening");

    axum::serve(listener, app).await?;

    Ok(())
}
