//! In-memory editing sessions, one `FormState` per session.
//!
//! Every access to a session (command, view, preview or export snapshot) goes through
//! the write lock briefly and refreshes its idle clock. Snapshots are clones, so
//! composition and export run without holding the lock.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::{info, warn};
use uuid::Uuid;

use crate::form::completion::CompletionFlags;
use crate::form::sections::SectionId;
use crate::form::state::{CommandOutcome, FormCommand, FormError, FormState};
use crate::models::resume::ResumeDocument;
use crate::models::user::Identity;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Session {0} not found")]
    NotFound(Uuid),

    #[error("Session {0} belongs to another user")]
    NotOwner(Uuid),

    #[error("Maximum concurrent sessions reached")]
    Capacity,

    #[error(transparent)]
    Form(#[from] FormError),
}

struct FormSession {
    owner_email: String,
    state: FormState,
    created_at: DateTime<Utc>,
    last_touched: Instant,
}

impl FormSession {
    fn owned_by(&self, identity: &Identity) -> bool {
        self.owner_email.eq_ignore_ascii_case(&identity.email)
    }

    fn is_idle(&self, timeout: Duration) -> bool {
        self.last_touched.elapsed() > timeout
    }

    fn view(&self, session_id: Uuid) -> SessionView {
        let completion = self.state.completion_flags();
        SessionView {
            session_id,
            created_at: self.created_at,
            document: self.state.document().clone(),
            open_sections: self.state.open_sections().iter().copied().collect(),
            completed_sections: completion.completed_count(),
            total_sections: SectionId::ALL.len(),
            completion,
        }
    }
}

/// Everything the editor needs to redraw after a change.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionView {
    pub session_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub document: ResumeDocument,
    pub open_sections: Vec<SectionId>,
    pub completion: CompletionFlags,
    pub completed_sections: usize,
    pub total_sections: usize,
}

#[derive(Debug, Clone, Copy)]
pub struct SessionLimits {
    pub max_sessions: usize,
    pub idle_timeout: Duration,
}

impl Default for SessionLimits {
    fn default() -> Self {
        SessionLimits {
            max_sessions: 1000,
            idle_timeout: Duration::from_secs(60 * 60),
        }
    }
}

#[derive(Clone)]
pub struct SessionStore {
    limits: SessionLimits,
    sessions: Arc<RwLock<HashMap<Uuid, FormSession>>>,
}

impl SessionStore {
    pub fn new(limits: SessionLimits) -> Self {
        SessionStore {
            limits,
            sessions: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Starts a session for `owner`, pre-filled from their identity.
    pub async fn create(&self, owner: &Identity) -> Result<SessionView, SessionError> {
        let mut sessions = self.sessions.write().await;
        if sessions.len() >= self.limits.max_sessions {
            return Err(SessionError::Capacity);
        }

        let session_id = Uuid::new_v4();
        let session = FormSession {
            owner_email: owner.email.clone(),
            state: FormState::for_identity(owner),
            created_at: Utc::now(),
            last_touched: Instant::now(),
        };
        let view = session.view(session_id);
        sessions.insert(session_id, session);

        info!(session_id = %session_id, "Started editing session");
        Ok(view)
    }

    pub async fn view(&self, id: Uuid, owner: &Identity) -> Result<SessionView, SessionError> {
        let mut sessions = self.sessions.write().await;
        let session = touched(&mut sessions, id, owner)?;
        Ok(session.view(id))
    }

    /// Applies one command under the write lock and returns the updated view.
    pub async fn apply(
        &self,
        id: Uuid,
        owner: &Identity,
        command: FormCommand,
    ) -> Result<(CommandOutcome, SessionView), SessionError> {
        let mut sessions = self.sessions.write().await;
        let session = touched(&mut sessions, id, owner)?;
        let outcome = session.state.apply(command)?;
        Ok((outcome, session.view(id)))
    }

    /// A copy of the document as of now. Later edits do not affect it.
    pub async fn snapshot(
        &self,
        id: Uuid,
        owner: &Identity,
    ) -> Result<ResumeDocument, SessionError> {
        let mut sessions = self.sessions.write().await;
        let session = touched(&mut sessions, id, owner)?;
        Ok(session.state.document().clone())
    }

    pub async fn remove(&self, id: Uuid, owner: &Identity) -> Result<(), SessionError> {
        let mut sessions = self.sessions.write().await;
        owned(&sessions, id, owner)?;
        sessions.remove(&id);
        info!(session_id = %id, "Discarded editing session");
        Ok(())
    }

    /// Drops sessions untouched for longer than the idle timeout.
    pub async fn cleanup_idle(&self) -> usize {
        let mut sessions = self.sessions.write().await;
        let idle: Vec<Uuid> = sessions
            .iter()
            .filter(|(_, s)| s.is_idle(self.limits.idle_timeout))
            .map(|(id, _)| *id)
            .collect();

        for id in &idle {
            warn!(session_id = %id, "Removing idle editing session");
            sessions.remove(id);
        }
        idle.len()
    }

    pub async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }
}

fn owned<'a>(
    sessions: &'a HashMap<Uuid, FormSession>,
    id: Uuid,
    owner: &Identity,
) -> Result<&'a FormSession, SessionError> {
    let session = sessions.get(&id).ok_or(SessionError::NotFound(id))?;
    if !session.owned_by(owner) {
        return Err(SessionError::NotOwner(id));
    }
    Ok(session)
}

/// Looks up an owned session and marks it active. Views, snapshots and commands all count.
fn touched<'a>(
    sessions: &'a mut HashMap<Uuid, FormSession>,
    id: Uuid,
    owner: &Identity,
) -> Result<&'a mut FormSession, SessionError> {
    let session = sessions.get_mut(&id).ok_or(SessionError::NotFound(id))?;
    if !session.owned_by(owner) {
        return Err(SessionError::NotOwner(id));
    }
    session.last_touched = Instant::now();
    Ok(session)
}

/// Periodically evicts idle sessions.
pub fn spawn_session_cleanup_task(
    store: SessionStore,
    interval: Duration,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut timer = tokio::time::interval(interval);
        loop {
            timer.tick().await;
            let removed = store.cleanup_idle().await;
            if removed > 0 {
                info!(removed, "Cleaned up idle editing sessions");
            }
        }
    })
}
