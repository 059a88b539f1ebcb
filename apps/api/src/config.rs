use std::time::Duration;

use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Every variable has a default; malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// TeX engine used for PDF export: `tectonic` or a `*latex` binary.
    pub latex_engine: String,
    pub render_timeout: Duration,
    /// Header carrying the authenticated user's email, set by the auth proxy.
    pub auth_email_header: String,
    pub auth_name_header: String,
    pub session_max: usize,
    pub session_idle_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            port: parse_env("PORT", 8080)?,
            rust_log: env_or("RUST_LOG", "info"),
            latex_engine: env_or("LATEX_ENGINE", "tectonic"),
            render_timeout: Duration::from_secs(parse_env("RENDER_TIMEOUT_SECS", 30)?),
            auth_email_header: env_or("AUTH_EMAIL_HEADER", "x-auth-request-email")
                .to_ascii_lowercase(),
            auth_name_header: env_or("AUTH_NAME_HEADER", "x-auth-request-user")
                .to_ascii_lowercase(),
            session_max: parse_env("SESSION_MAX", 1000)?,
            session_idle_timeout: Duration::from_secs(parse_env("SESSION_IDLE_SECS", 3600)?),
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            port: 8080,
            rust_log: "info".to_string(),
            latex_engine: "tectonic".to_string(),
            render_timeout: Duration::from_secs(30),
            auth_email_header: "x-auth-request-email".to_string(),
            auth_name_header: "x-auth-request-user".to_string(),
            session_max: 1000,
            session_idle_timeout: Duration::from_secs(3600),
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("Environment variable '{key}' has an invalid value '{raw}'")),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_env_uses_default_when_unset() {
        let value: u64 = parse_env("RESUMEBUDDY_TEST_UNSET_VAR", 42).unwrap();
        assert_eq!(value, 42);
    }

    #[test]
    fn test_parse_env_rejects_garbage() {
        std::env::set_var("RESUMEBUDDY_TEST_BAD_PORT", "eighty");
        let err = parse_env::<u16>("RESUMEBUDDY_TEST_BAD_PORT", 8080).unwrap_err();
        assert!(err.to_string().contains("RESUMEBUDDY_TEST_BAD_PORT"));
    }
}
