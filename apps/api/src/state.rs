use std::sync::Arc;

use crate::archive::ResumeArchive;
use crate::config::Config;
use crate::form::SessionStore;
use crate::render::PdfCompiler;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub sessions: SessionStore,
    pub config: Config,
    /// Saved-resume storage. `DisabledArchive` unless a backend is configured.
    pub archive: Arc<dyn ResumeArchive>,
    pub compiler: Arc<dyn PdfCompiler>,
}
