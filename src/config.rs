use std::{env, path::PathBuf};

use chrono::Duration;

pub const DEFAULT_REMOTE_HOST_URL: &str = "http://localhost:3001";
pub const DEFAULT_TOKEN_TTL_HOURS: i64 = 24;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub cors_origin: Option<String>,
    pub auth: AuthConfig,
}

/// Signing material for bearer tokens.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub token_ttl: Duration,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = env::var("DATABASE_URL")?;
        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .ok()
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(3001);
        let cors_origin = env::var("CORS_ORIGIN").ok().filter(|o| !o.is_empty());
        Ok(Self {
            port,
            database_url,
            host,
            cors_origin,
            auth: AuthConfig::from_env()?,
        })
    }
}

impl AuthConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let jwt_secret = env::var("JWT_SECRET")
            .map_err(|_| anyhow::anyhow!("JWT_SECRET is not set"))?;
        let ttl_hours = env::var("TOKEN_TTL_HOURS")
            .ok()
            .and_then(|h| h.parse::<i64>().ok())
            .unwrap_or(DEFAULT_TOKEN_TTL_HOURS);
        Ok(Self {
            jwt_secret,
            token_ttl: token_ttl_from_hours(ttl_hours),
        })
    }
}

/// Token lifetime for `hours`, falling back to the default when the value is
/// not positive or too large to represent.
pub fn token_ttl_from_hours(hours: i64) -> Duration {
    Duration::try_hours(hours)
        .filter(|_| hours > 0)
        .unwrap_or_else(|| {
            tracing::warn!(hours, "invalid TOKEN_TTL_HOURS, using default");
            Duration::hours(DEFAULT_TOKEN_TTL_HOURS)
        })
}

/// Settings for the outbound API client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub token_file: Option<PathBuf>,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token_file: None,
        }
    }

    pub fn from_env() -> Self {
        let base_url = env::var("REMOTE_HOST_URL")
            .ok()
            .filter(|u| !u.is_empty())
            .unwrap_or_else(|| DEFAULT_REMOTE_HOST_URL.to_string());
        let token_file = env::var("STUDENT_STORE_TOKEN_FILE").ok().map(PathBuf::from);
        Self {
            base_url,
            token_file,
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_REMOTE_HOST_URL)
    }
}
