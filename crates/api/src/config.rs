use url::Url;

use crate::auth::jwt::JwtConfig;

/// Errors raised while reading configuration at start-up.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{name} is invalid: {reason}")]
    Invalid { name: &'static str, reason: String },
}

/// Where the clinic REST backend lives.
#[derive(Debug, Clone)]
pub struct BackendConfig {
    /// Base URL every endpoint path is joined onto.
    pub api_host: Url,
}

/// Server configuration loaded from environment variables.
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
    /// Whether the session cookie carries the `Secure` attribute.
    pub cookie_secure: bool,
    pub jwt: JwtConfig,
    pub backend: BackendConfig,
}

impl ServerConfig {
    /// Load configuration from the process environment.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    /// | `COOKIE_SECURE`        | `true`                     |
    /// | `PUBLIC_API_HOST`      | required                   |
    /// | `JWT_ACCESS_KEY`       | required                   |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |name: &str, default: &str| lookup(name).unwrap_or_else(|| default.to_string());

        let host = var("HOST", "0.0.0.0");

        let port = var("PORT", "3000")
            .parse::<u16>()
            .map_err(|e| invalid("PORT", e))?;

        let cors_origins: Vec<String> = var("CORS_ORIGINS", "http://localhost:5173")
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs = var("REQUEST_TIMEOUT_SECS", "30")
            .parse::<u64>()
            .map_err(|e| invalid("REQUEST_TIMEOUT_SECS", e))?;

        let cookie_secure = var("COOKIE_SECURE", "true")
            .parse::<bool>()
            .map_err(|e| invalid("COOKIE_SECURE", e))?;

        let api_host = lookup("PUBLIC_API_HOST")
            .filter(|s| !s.trim().is_empty())
            .ok_or(ConfigError::Missing("PUBLIC_API_HOST"))?;
        let api_host = Url::parse(api_host.trim()).map_err(|e| invalid("PUBLIC_API_HOST", e))?;

        let access_key = lookup("JWT_ACCESS_KEY")
            .filter(|s| !s.is_empty())
            .ok_or(ConfigError::Missing("JWT_ACCESS_KEY"))?;

        Ok(Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            cookie_secure,
            jwt: JwtConfig { access_key },
            backend: BackendConfig { api_host },
        })
    }
}

fn invalid(name: &'static str, reason: impl std::fmt::Display) -> ConfigError {
    ConfigError::Invalid {
        name,
        reason: reason.to_string(),
    }
}
