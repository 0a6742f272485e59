//! Profile read handlers
use axum::extract::State;
use axum::Json;
use tracing::info;

use super::AppState;
use crate::api::error::ApiError;
use crate::models::Certificate;
use crate::models::Education;
use crate::models::Experience;
use crate::models::Profile;
use crate::models::Project;
use crate::models::Skill;

/// GET /api/v1/profile
pub async fn get_profile(State(state): State<AppState>) -> Result<Json<Profile>, ApiError> {
    info!("GET /api/v1/profile");
    Ok(Json(state.store.load_profile().await?))
}

/// GET /api/v1/projects
pub async fn list_projects(State(state): State<AppState>) -> Result<Json<Vec<Project>>, ApiError> {
    info!("GET /api/v1/projects");
    Ok(Json(state.store.projects().await?))
}

/// GET /api/v1/experiences
pub async fn list_experiences(
    State(state): State<AppState>,
) -> Result<Json<Vec<Experience>>, ApiError> {
    info!("GET /api/v1/experiences");
    Ok(Json(state.store.experiences().await?))
}

/// GET /api/v1/skills
pub async fn list_skills(State(state): State<AppState>) -> Result<Json<Vec<Skill>>, ApiError> {
    info!("GET /api/v1/skills");
    Ok(Json(state.store.skills().await?))
}

/// GET /api/v1/education
pub async fn list_education(
    State(state): State<AppState>,
) -> Result<Json<Vec<Education>>, ApiError> {
    info!("GET /api/v1/education");
    Ok(Json(state.store.education().await?))
}

/// GET /api/v1/certificates
pub async fn list_certificates(
    State(state): State<AppState>,
) -> Result<Json<Vec<Certificate>>, ApiError> {
    info!("GET /api/v1/certificates");
    Ok(Json(state.store.certificates().await?))
}
