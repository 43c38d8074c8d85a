//! JSON HTTP API over the ledger reports
//!
//! Routes are organized into modules:
//! - routes::accounts: Account list and detail with balances
//! - routes::ledger: Transaction, check and category listings
//! - routes::dashboard: Dashboard stats and chart data

pub mod error;
pub mod routes;

use axum::{routing::get, Json, Router};
use daftar_config::Config;
use daftar_core::{Clock, ReportEngine};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;

pub use error::ApiError;

/// Application state
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<ReportEngine>,
    pub clock: Arc<dyn Clock>,
    pub config: Config,
}

/// Create the application router
pub fn create_router(state: AppState) -> Router {
    use routes::accounts::{api_account_detail, api_accounts};
    use routes::dashboard::{api_chart_data, api_dashboard_stats};
    use routes::ledger::{api_categories, api_checks, api_transactions};

    Router::new()
        .route("/api/health", get(health_check))
        .route("/api/accounts", get(api_accounts))
        .route("/api/accounts/:id", get(api_account_detail))
        .route("/api/transactions", get(api_transactions))
        .route("/api/checks", get(api_checks))
        .route("/api/categories", get(api_categories))
        .route("/api/dashboard/stats", get(api_dashboard_stats))
        .route("/api/dashboard/chart-data", get(api_chart_data))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Health check endpoint
async fn health_check(axum::extract::State(state): axum::extract::State<AppState>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": state.clock.now().to_rfc3339(),
    }))
}

/// Start the HTTP server and serve until Ctrl-C
pub async fn start_server(state: AppState) -> std::io::Result<()> {
    let addr = format!("{}:{}", state.config.server.host, state.config.server.port);
    let router = create_router(state);

    let listener = TcpListener::bind(&addr).await?;
    log::info!("Starting daftar server on http://{}", addr);
    log::info!("Available routes:");
    log::info!("  - /api/accounts, /api/accounts/:id");
    log::info!("  - /api/transactions, /api/checks, /api/categories");
    log::info!("  - /api/dashboard/stats, /api/dashboard/chart-data");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    log::info!("Server stopped gracefully");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("Failed to listen for shutdown signal: {}", e);
    }
}
