// Document Composer: a pure ResumeDocument -> DocumentTree transform in the fixed
// institutional template, plus the async wrappers the HTTP layer uses.
// Composition is CPU-bound and runs inside tokio::task::spawn_blocking on a snapshot.

pub mod composer;
pub mod export;
pub mod handlers;
pub mod tree;

use anyhow::anyhow;

pub use composer::compose;
pub use tree::DocumentTree;

use crate::errors::AppError;
use crate::models::resume::ResumeDocument;

/// Composes an owned snapshot off the async executor.
pub async fn compose_snapshot(doc: ResumeDocument) -> Result<DocumentTree, AppError> {
    tokio::task::spawn_blocking(move || compose(&doc))
        .await
        .map_err(|e| AppError::Internal(anyhow!("composition task panicked: {e}")))
}
