mod archive;
mod auth;
mod compose;
mod config;
mod errors;
mod form;
mod layout;
mod models;
mod render;
mod routes;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::archive::DisabledArchive;
use crate::config::Config;
use crate::form::session::{spawn_session_cleanup_task, SessionLimits, SessionStore};
use crate::render::LatexCompiler;
use crate::routes::build_router;
use crate::state::AppState;

/// How often idle editing sessions are swept.
const SESSION_SWEEP_INTERVAL: Duration = Duration::from_secs(60);

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Resume Buddy API v{}", env!("CARGO_PKG_VERSION"));

    let sessions = SessionStore::new(SessionLimits {
        max_sessions: config.session_max,
        idle_timeout: config.session_idle_timeout,
    });
    spawn_session_cleanup_task(sessions.clone(), SESSION_SWEEP_INTERVAL);
    info!(
        "Session store ready (max {}, idle timeout {:?})",
        config.session_max, config.session_idle_timeout
    );

    let compiler = LatexCompiler::new(config.latex_engine.clone(), config.render_timeout);
    info!(
        "PDF export via '{}' (timeout {:?})",
        config.latex_engine, config.render_timeout
    );

    let state = AppState {
        sessions,
        config: config.clone(),
        archive: Arc::new(DisabledArchive),
        compiler: Arc::new(compiler),
    };
    info!("Cloud storage disabled; saves will be refused");

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins once the editor's host is fixed

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
