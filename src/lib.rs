// Research Assistant - document text extraction and Gemini-backed research tasks

pub mod config;
pub mod models;
pub mod types;
pub mod llm;
pub mod research;
pub mod documents;
pub mod routes;
pub mod middleware;
pub mod utils;

// Re-exports for convenience
pub use config::Config;
pub use models::AppState;

pub fn create_router(state: AppState) -> axum::Router {
    routes::create_router(state)
}
