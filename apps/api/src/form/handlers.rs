use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use uuid::Uuid;

use crate::auth::AuthenticatedUser;
use crate::errors::AppError;
use crate::form::session::SessionView;
use crate::form::state::{CommandOutcome, FormCommand};
use crate::state::AppState;

#[derive(Serialize)]
pub struct CommandResponse {
    pub outcome: CommandOutcome,
    pub session: SessionView,
}

/// POST /api/v1/sessions
pub async fn handle_create_session(
    State(state): State<AppState>,
    AuthenticatedUser(identity): AuthenticatedUser,
) -> Result<(StatusCode, Json<SessionView>), AppError> {
    let view = state.sessions.create(&identity).await?;
    Ok((StatusCode::CREATED, Json(view)))
}

/// GET /api/v1/sessions/:id
pub async fn handle_get_session(
    State(state): State<AppState>,
    AuthenticatedUser(identity): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionView>, AppError> {
    Ok(Json(state.sessions.view(id, &identity).await?))
}

/// DELETE /api/v1/sessions/:id
pub async fn handle_delete_session(
    State(state): State<AppState>,
    AuthenticatedUser(identity): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.sessions.remove(id, &identity).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/sessions/:id/commands
pub async fn handle_apply_command(
    State(state): State<AppState>,
    AuthenticatedUser(identity): AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(command): Json<FormCommand>,
) -> Result<Json<CommandResponse>, AppError> {
    let (outcome, session) = state.sessions.apply(id, &identity, command).await?;
    Ok(Json(CommandResponse { outcome, session }))
}
