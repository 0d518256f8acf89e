/// HubSpot connector: OAuth2 authorization-code flow plus CRM item listing
///
/// Flow:
/// - /integrations/hubspot/authorize issues the authorization URL and
///   parks the CSRF state in the cache
/// - /integrations/hubspot/oauth2callback validates state, exchanges the
///   code, and parks the token blob
/// - /integrations/hubspot/credentials hands the blob over exactly once
/// - /integrations/hubspot/load lists companies as normalized items
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use hubspot_connector::config::Settings;
use hubspot_connector::services::{HubSpotClient, IntegrationCache};
use hubspot_connector::utils::logging::*;
use hubspot_connector::utils::AppError;
use hubspot_connector::AppState;

mod handlers;

use handlers::{
    authorize_hubspot, get_hubspot_credentials, health_check, load_hubspot_items,
    oauth2callback_hubspot,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // In deployed environments there is no .env file; variables come from
    // the environment itself
    if dotenvy::dotenv().is_ok() {
        tracing::debug!(".env file loaded");
    }

    tracing_subscriber::fmt::init();

    let settings = Settings::new()
        .map_err(|e| AppError::ConfigError(format!("Failed to load settings: {}", e)))?;

    log_config_loaded(&std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string()));

    let hubspot = HubSpotClient::new(settings.hubspot.clone())
        .map_err(|e| AppError::ConfigError(format!("Failed to create HubSpot client: {}", e)))?;

    let cache = IntegrationCache::new();

    let app_state = Arc::new(AppState {
        settings: settings.clone(),
        cache,
        hubspot,
    });

    let app = Router::new()
        .route("/health", get(health_check))
        .route("/integrations/hubspot/authorize", post(authorize_hubspot))
        .route(
            "/integrations/hubspot/oauth2callback",
            get(oauth2callback_hubspot),
        )
        .route(
            "/integrations/hubspot/credentials",
            post(get_hubspot_credentials),
        )
        .route("/integrations/hubspot/load", post(load_hubspot_items))
        .layer(TraceLayer::new_for_http())
        // The browser frontend runs on a different origin
        .layer(CorsLayer::permissive())
        .with_state(app_state);

    // Deployed environments inject the port through PORT
    let port = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse::<u16>().ok())
        .unwrap_or(settings.server.port);
    let listener = TcpListener::bind(format!("{}:{}", settings.server.host, port)).await?;

    log_server_startup(port);
    log_server_ready(port);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    log_info("🛑 Server shut down gracefully");
    Ok(())
}

/// Signal handler for graceful shutdown
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            log_info("🛑 Received Ctrl+C, shutting down gracefully...");
        },
        _ = terminate => {
            log_info("🛑 Received SIGTERM, shutting down gracefully...");
        }
    }
}
