//! API Routes
//!
//! - `/api/research/process` - Run an operation on submitted text
//! - `/api/research/upload` - Extract text from a document, then run an operation
//! - `/api/health` - Health checks

pub mod health;
pub mod research;

use axum::Router;
use tower_http::trace::TraceLayer;
use crate::middleware::cors_layer;
use crate::models::AppState;
use tracing::info;

/// Create the main application router
pub fn create_router(state: AppState) -> Router {
    info!("Creating application router");

    let cors = cors_layer(&state.config.server.cors_allowed_origins);

    Router::new()
        .merge(research::router(state))
        .merge(health::router())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
