//! API Routes
//!
//! This module organizes all HTTP endpoints for the application:
//! - `/api/files` - File upload handling (multipart)
//! - `/api/analysis` - Filter/aggregate pipeline over an uploaded table
//! - `/api/export` - Filtered set as downloadable CSV
//! - `/api/health` - Health checks
//! - `/artifacts` - Rendered chart PNGs
//! - `/` - The dashboard page

pub mod analysis;
pub mod export;
pub mod files;
pub mod health;
pub mod ui;

use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::models::AppState;

/// Create the main application router
pub fn create_router(state: AppState) -> Router {
    info!("Creating application router");

    let artifacts_dir = state.config.dashboard.artifacts_dir.clone();

    let api_router = Router::new()
        .merge(files::router(state.clone()))
        .merge(analysis::router(state.clone()))
        .merge(export::router(state))
        .merge(health::router());

    Router::new()
        .merge(api_router)
        .merge(ui::router())
        .nest_service("/artifacts", ServeDir::new(artifacts_dir))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}
