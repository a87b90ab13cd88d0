//! # HTTP Print Service
//!
//! JSON API for point-of-sale frontends: print receipts, pick the printer
//! and edit the store settings.
//!
//! ## Usage
//!
//! ```bash
//! struk serve --listen 127.0.0.1:3000 --settings printer-settings.json
//! ```
//!
//! ## Routes
//!
//! | Method | Path | |
//! |--------|------|-|
//! | POST | `/print` | Compose and print a receipt |
//! | GET | `/printer/status` | Platform, configured printer, discovered printers |
//! | POST | `/printer/set` | Select a printer |
//! | GET | `/printer/current` | Configured printer |
//! | POST | `/printer/test` | Print the test page |
//! | GET, PUT | `/settings/store` | Store profile |
//! | GET | `/settings/backup` | Download all settings |
//! | POST | `/settings/restore` | Upload a backup |
//! | GET | `/health` | Liveness and configuration summary |
//!
//! CORS is permissive so browser frontends on any origin can reach the API.

mod handlers;
mod state;

pub use state::{AppState, DEFAULT_LISTEN_ADDR, ServerConfig};

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};

use crate::error::StrukError;

/// Build the router over shared state.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/print", post(handlers::print::print))
        // Printer API
        .route("/printer/status", get(handlers::printer::status))
        .route("/printer/set", post(handlers::printer::set))
        .route("/printer/current", get(handlers::printer::current))
        .route("/printer/test", post(handlers::printer::test))
        // Settings API
        .route(
            "/settings/store",
            get(handlers::settings::store).put(handlers::settings::update_store),
        )
        .route("/settings/backup", get(handlers::settings::backup))
        .route("/settings/restore", post(handlers::settings::restore))
        .route("/health", get(handlers::health::health))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the HTTP server.
///
/// ## Example
///
/// ```no_run
/// use struk::server::{serve, ServerConfig};
///
/// # async fn example() -> Result<(), struk::error::StrukError> {
/// serve(ServerConfig::default()).await?;
/// # Ok(())
/// # }
/// ```
pub async fn serve(config: ServerConfig) -> Result<(), StrukError> {
    let state = Arc::new(AppState::new(config.clone()));

    report_printers(&state).await;

    let app = router(state);

    let listener = tokio::net::TcpListener::bind(&config.listen_addr)
        .await
        .map_err(|e| {
            StrukError::Server(format!("Failed to bind to {}: {}", config.listen_addr, e))
        })?;

    info!(
        addr = %config.listen_addr,
        settings = %config.settings_path.display(),
        "struk HTTP server listening"
    );

    axum::serve(listener, app)
        .await
        .map_err(|e| StrukError::Server(format!("Server error: {}", e)))?;

    Ok(())
}

/// Log what the system offers at startup and whether the configured printer is there.
async fn report_printers(state: &AppState) {
    let settings = state.settings.read().await.settings();
    let printers = state.discovery().list().await;

    info!(
        count = printers.len(),
        platform = state.discovery().platform(),
        paper = %settings.paper_size,
        "Printers found: {}",
        printers.join(", ")
    );

    match settings.printer() {
        Some(name) if printers.iter().any(|p| p == name) => {
            info!(printer = name, "Configured printer ready")
        }
        Some(name) => warn!(
            printer = name,
            available = %printers.join(", "),
            "Configured printer not found"
        ),
        None => warn!("No printer configured; select one with POST /printer/set"),
    }
}
