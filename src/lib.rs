// RH Analytics - browser dashboard for HR file analysis

pub mod analysis;
pub mod config;
pub mod extract;
pub mod models;
pub mod routes;
pub mod table;
pub mod types;
pub mod upload_registry;

// Re-exports for convenience
pub use config::Config;
pub use models::AppState;
pub use table::RecordTable;

pub fn create_router(state: AppState) -> axum::Router {
    routes::create_router(state)
}
