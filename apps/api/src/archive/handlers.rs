use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::archive::{recent_resumes, ArchiveError, SavedResume};
use crate::auth::AuthenticatedUser;
use crate::compose::handlers::build_pdf;
use crate::errors::AppError;
use crate::state::AppState;

pub const EMPTY_MESSAGE: &str = "No resumes found.";
pub const EMPTY_DISABLED_MESSAGE: &str = "No resumes found. (Cloud storage disabled)";

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardResponse {
    pub resumes: Vec<SavedResume>,
    pub storage_enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// GET /api/v1/resumes
pub async fn handle_dashboard(
    State(state): State<AppState>,
    AuthenticatedUser(identity): AuthenticatedUser,
) -> Json<DashboardResponse> {
    let storage_enabled = state.archive.is_enabled();
    let resumes = recent_resumes(state.archive.as_ref(), &identity.email).await;
    let message = match (resumes.is_empty(), storage_enabled) {
        (false, _) => None,
        (true, true) => Some(EMPTY_MESSAGE.to_string()),
        (true, false) => Some(EMPTY_DISABLED_MESSAGE.to_string()),
    };
    Json(DashboardResponse {
        resumes,
        storage_enabled,
        message,
    })
}

/// POST /api/v1/sessions/:id/save
pub async fn handle_save(
    State(state): State<AppState>,
    AuthenticatedUser(identity): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<(StatusCode, Json<SavedResume>), AppError> {
    // Unknown or foreign sessions fail before the archive check.
    state.sessions.view(id, &identity).await?;
    if !state.archive.is_enabled() {
        return Err(ArchiveError::Disabled.into());
    }

    let (file_name, pdf) = build_pdf(&state, &identity, id).await?;
    let saved = state.archive.save(&identity.email, &file_name, pdf).await?;
    info!(session_id = %id, url = %saved.document_url, "Saved resume to archive");
    Ok((StatusCode::CREATED, Json(saved)))
}
