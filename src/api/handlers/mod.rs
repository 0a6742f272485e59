//! API request handlers
use std::sync::Arc;

use axum::Json;

use crate::api::types::HealthResponse;
use crate::api::types::RootResponse;
use crate::database::ProfileStore;
use crate::rag::RagService;

pub mod profile;
pub mod rag;

pub use profile::*;
pub use rag::*;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ProfileStore>,
    pub rag: Arc<RagService>,
}

impl AppState {
    pub fn new(rag: RagService) -> Self {
        Self {
            store: rag.store().clone(),
            rag: Arc::new(rag),
        }
    }
}

/// Service banner (GET /)
pub async fn root() -> Json<RootResponse> {
    Json(RootResponse {
        message: "Resume API. Ask questions at POST /api/v1/query-resume".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        endpoints: [
            "GET /api/v1/health",
            "GET /api/v1/profile",
            "GET /api/v1/projects",
            "GET /api/v1/experiences",
            "GET /api/v1/skills",
            "GET /api/v1/education",
            "GET /api/v1/certificates",
            "POST /api/v1/query-resume",
            "POST /api/v1/sync-vector-db",
        ]
        .iter()
        .map(ToString::to_string)
        .collect(),
    })
}

/// Health check handler (GET /api/v1/health)
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        message: "Resume API is running".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
