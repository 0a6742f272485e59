//! Mapping from crate errors to HTTP responses

use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use tracing::error;
use tracing::warn;

use crate::api::types::ApiResponse;
use crate::errors::ResumeRagError;

/// Error returned by handlers
#[derive(Debug)]
pub struct ApiError(pub ResumeRagError);

impl From<ResumeRagError> for ApiError {
    fn from(err: ResumeRagError) -> Self {
        Self(err)
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            ResumeRagError::Validation(_) => StatusCode::BAD_REQUEST,
            e if e.is_upstream() => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Client-facing message. Store and internal details stay in the logs.
    fn message(&self) -> String {
        match &self.0 {
            ResumeRagError::Validation(msg) => msg.clone(),
            e if e.is_upstream() => format!("Upstream service error: {e}"),
            ResumeRagError::Database(_) => "Failed to read resume data".to_string(),
            _ => "Internal server error".to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!("Request failed ({}): {}", status, self.0);
        } else {
            warn!("Rejected request: {}", self.0);
        }
        (status, Json(ApiResponse::<()>::error(self.message()))).into_response()
    }
}
