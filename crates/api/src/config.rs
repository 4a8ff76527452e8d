use std::fmt::Display;
use std::str::FromStr;

use axum::http::HeaderValue;

use crate::auth::jwt::JwtConfig;

/// Startup configuration problem, naming the offending variable.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} must be set")]
    Missing { var: &'static str },

    #[error("{var} has invalid value {value:?}: {reason}")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

/// Server configuration loaded from environment variables.
///
/// All fields except the JWT secret have defaults suitable for local
/// development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// JWT token configuration (secret, expiry).
    pub jwt: JwtConfig,
    /// Metadata for the generated API document.
    pub openapi: OpenApiConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    ///
    /// See [`JwtConfig::from_env`] and [`OpenApiConfig::from_env`] for the
    /// remaining variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());
        let port = parse_env("PORT", 3000u16)?;

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        for origin in &cors_origins {
            origin
                .parse::<HeaderValue>()
                .map_err(|e| ConfigError::Invalid {
                    var: "CORS_ORIGINS",
                    value: origin.clone(),
                    reason: e.to_string(),
                })?;
        }

        let request_timeout_secs = parse_env("REQUEST_TIMEOUT_SECS", 30u64)?;

        Ok(Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            jwt: JwtConfig::from_env()?,
            openapi: OpenApiConfig::from_env()?,
        })
    }
}

/// Default document title.
pub const DEFAULT_OPENAPI_TITLE: &str = "Generic asset API";
/// Default document description.
pub const DEFAULT_OPENAPI_DESCRIPTION: &str = "This is just a showcase for a generic asset API";
/// Default server URL advertised in the document.
pub const DEFAULT_OPENAPI_SERVER_URL: &str = "http://localhost:3000/api";

#[derive(Debug, Clone)]
pub struct OpenApiConfig {
    pub title: String,
    pub description: String,
    /// Base URL that documented paths are relative to.
    pub server_url: String,
}

impl Default for OpenApiConfig {
    fn default() -> Self {
        Self {
            title: DEFAULT_OPENAPI_TITLE.to_string(),
            description: DEFAULT_OPENAPI_DESCRIPTION.to_string(),
            server_url: DEFAULT_OPENAPI_SERVER_URL.to_string(),
        }
    }
}

impl OpenApiConfig {
    /// | Env Var              | Default                      |
    /// |----------------------|------------------------------|
    /// | `OPENAPI_SERVER_URL` | `http://localhost:3000/api`  |
    pub fn from_env() -> Result<Self, ConfigError> {
        let server_url = std::env::var("OPENAPI_SERVER_URL")
            .unwrap_or_else(|_| DEFAULT_OPENAPI_SERVER_URL.to_string());
        if server_url.trim().is_empty() {
            return Err(ConfigError::Invalid {
                var: "OPENAPI_SERVER_URL",
                value: server_url,
                reason: "must not be empty".into(),
            });
        }
        Ok(Self {
            server_url,
            ..Self::default()
        })
    }
}

/// Read `var`, falling back to `default` when unset.
pub(crate) fn parse_env<T>(var: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: Display,
{
    match std::env::var(var) {
        Ok(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            var,
            value: raw.clone(),
            reason: e.to_string(),
        }),
        Err(_) => Ok(default),
    }
}
