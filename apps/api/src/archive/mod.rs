//! Saved-resume archive.
//!
//! Cloud storage is switched off: the shipped [`DisabledArchive`] lists nothing and
//! refuses every save. The trait stays so a real backend can be slotted in through
//! `AppState` without touching the handlers.

pub mod handlers;

use async_trait::async_trait;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedResume {
    pub document_url: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("Saving to cloud is disabled. Download your PDF instead.")]
    Disabled,

    #[error("archive backend failed: {0}")]
    Backend(#[source] anyhow::Error),
}

#[async_trait]
pub trait ResumeArchive: Send + Sync {
    fn is_enabled(&self) -> bool;

    async fn list(&self, owner_email: &str) -> Result<Vec<SavedResume>, ArchiveError>;

    async fn save(
        &self,
        owner_email: &str,
        file_name: &str,
        pdf: Bytes,
    ) -> Result<SavedResume, ArchiveError>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledArchive;

#[async_trait]
impl ResumeArchive for DisabledArchive {
    fn is_enabled(&self) -> bool {
        false
    }

    async fn list(&self, _owner_email: &str) -> Result<Vec<SavedResume>, ArchiveError> {
        Ok(Vec::new())
    }

    async fn save(
        &self,
        _owner_email: &str,
        _file_name: &str,
        _pdf: Bytes,
    ) -> Result<SavedResume, ArchiveError> {
        Err(ArchiveError::Disabled)
    }
}

/// The owner's saved resumes, newest first. Archive failures degrade to an empty list.
pub async fn recent_resumes(archive: &dyn ResumeArchive, owner_email: &str) -> Vec<SavedResume> {
    match archive.list(owner_email).await {
        Ok(mut resumes) => {
            resumes.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            resumes
        }
        Err(e) => {
            warn!(error = %e, "Listing saved resumes failed, showing none");
            Vec::new()
        }
    }
}
