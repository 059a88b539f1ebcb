use axum::{
    extract::{Path, State},
    http::header,
    response::IntoResponse,
    Json,
};
use bytes::Bytes;
use chrono::Utc;
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::auth::AuthenticatedUser;
use crate::compose::export::{attachment_disposition, export_file_name};
use crate::compose::{compose_snapshot, DocumentTree};
use crate::errors::AppError;
use crate::layout::{analyze_fill, PageFillAnalysis};
use crate::models::user::Identity;
use crate::render::{render_latex, render_text};
use crate::state::AppState;

#[derive(Serialize)]
pub struct PreviewResponse {
    pub tree: DocumentTree,
    pub fill: PageFillAnalysis,
}

async fn composed(state: &AppState, identity: &Identity, id: Uuid) -> Result<DocumentTree, AppError> {
    let doc = state.sessions.snapshot(id, identity).await?;
    compose_snapshot(doc).await
}

/// Composes, typesets and names the PDF for a session.
pub(crate) async fn build_pdf(
    state: &AppState,
    identity: &Identity,
    id: Uuid,
) -> Result<(String, Bytes), AppError> {
    let doc = state.sessions.snapshot(id, identity).await?;
    let file_name = export_file_name(&doc.personal.full_name, Utc::now().date_naive());
    let tree = compose_snapshot(doc).await?;
    let pdf = state.compiler.compile(&render_latex(&tree)).await?;
    info!(session_id = %id, bytes = pdf.len(), pages = tree.page_count(), "Exported resume PDF");
    Ok((file_name, pdf))
}

/// GET /api/v1/sessions/:id/preview
pub async fn handle_preview(
    State(state): State<AppState>,
    AuthenticatedUser(identity): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<Json<PreviewResponse>, AppError> {
    let tree = composed(&state, &identity, id).await?;
    let fill = analyze_fill(&tree);
    Ok(Json(PreviewResponse { tree, fill }))
}

/// GET /api/v1/sessions/:id/preview/text
pub async fn handle_preview_text(
    State(state): State<AppState>,
    AuthenticatedUser(identity): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<String, AppError> {
    let tree = composed(&state, &identity, id).await?;
    Ok(render_text(&tree))
}

/// GET /api/v1/sessions/:id/export/latex
pub async fn handle_export_latex(
    State(state): State<AppState>,
    AuthenticatedUser(identity): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let tree = composed(&state, &identity, id).await?;
    Ok((
        [(header::CONTENT_TYPE, "application/x-tex; charset=utf-8")],
        render_latex(&tree),
    ))
}

/// GET /api/v1/sessions/:id/export
pub async fn handle_export_pdf(
    State(state): State<AppState>,
    AuthenticatedUser(identity): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let (file_name, pdf) = build_pdf(&state, &identity, id).await?;
    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (header::CONTENT_DISPOSITION, attachment_disposition(&file_name)),
        ],
        pdf,
    ))
}
