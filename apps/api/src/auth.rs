//! Identity from the authenticating reverse proxy.
//!
//! The proxy in front of the service owns sign-in and injects the user's email and
//! display name as request headers. A request without an email never reaches a handler.

use async_trait::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::HeaderMap;

use crate::errors::AppError;
use crate::models::user::Identity;
use crate::state::AppState;

/// Extractor yielding the caller's identity; rejects with 401 when it is missing.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub Identity);

#[async_trait]
impl FromRequestParts<AppState> for AuthenticatedUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        identity_from_headers(
            &parts.headers,
            &state.config.auth_email_header,
            &state.config.auth_name_header,
        )
        .map(AuthenticatedUser)
        .ok_or(AppError::Unauthorized)
    }
}

fn header_text(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

pub fn identity_from_headers(
    headers: &HeaderMap,
    email_header: &str,
    name_header: &str,
) -> Option<Identity> {
    let email = header_text(headers, email_header)?;
    Some(Identity {
        display_name: header_text(headers, name_header).unwrap_or_default(),
        email,
    })
}
