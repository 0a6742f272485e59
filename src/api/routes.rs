//! API route definitions

use axum::routing::get;
use axum::routing::post;
use axum::Router;

use super::handlers::AppState;
use super::handlers::{
    self,
};

/// Create RESTful API router, mounted under `/api/v1`
pub fn api_routes(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(handlers::health))
        // Profile endpoints
        .route("/profile", get(handlers::get_profile))
        .route("/projects", get(handlers::list_projects))
        .route("/experiences", get(handlers::list_experiences))
        .route("/skills", get(handlers::list_skills))
        .route("/education", get(handlers::list_education))
        .route("/certificates", get(handlers::list_certificates))
        // RAG endpoints
        .route("/query-resume", post(handlers::query_resume))
        .route("/sync-vector-db", post(handlers::sync_vector_db))
        .with_state(state)
}

/// Full application router without transport layers
pub fn app_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .nest("/api/v1", api_routes(state))
}
