//! Question answering and vector sync handlers
use axum::extract::State;
use axum::Json;
use tracing::info;

use super::AppState;
use crate::api::error::ApiError;
use crate::api::types::QueryRequest;
use crate::api::types::QueryResponse;
use crate::api::types::SyncResponse;
use crate::rag::SyncReport;

/// POST /api/v1/query-resume
pub async fn query_resume(
    State(state): State<AppState>,
    Json(req): Json<QueryRequest>,
) -> Result<Json<QueryResponse>, ApiError> {
    info!("POST /api/v1/query-resume: {}", req.query);

    let response = state.rag.answer_query(&req.query).await?;
    Ok(Json(QueryResponse {
        answer: response.answer,
        sources: response.sources,
    }))
}

/// POST /api/v1/sync-vector-db
pub async fn sync_vector_db(State(state): State<AppState>) -> Result<Json<SyncResponse>, ApiError> {
    info!("POST /api/v1/sync-vector-db");

    let details = state.rag.sync_vector_db().await?;
    let message = match &details {
        SyncReport::Success { .. } => "Vector database synced".to_string(),
        SyncReport::Skipped { .. } => "Vector database sync skipped".to_string(),
    };
    Ok(Json(SyncResponse { message, details }))
}
