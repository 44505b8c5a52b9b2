use std::fmt::Display;
use std::str::FromStr;

use folio_storage::StorageConfig;

use crate::auth::jwt::JwtConfig;

/// Default request body cap (covers a multipart project save with one image).
const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Server configuration loaded from environment variables.
///
/// Everything except `DATABASE_URL` and the JWT secret has a local
/// development default.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub database_url: String,
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Origins allowed to call the API (the public site and the admin UI).
    pub cors_origins: Vec<String>,
    pub request_timeout_secs: u64,
    /// Largest accepted request body; bounds image uploads.
    pub max_upload_bytes: usize,
    pub jwt: JwtConfig,
    /// Where project images are stored and served from.
    pub storage: StorageConfig,
}

impl ServerConfig {
    /// Load configuration from the environment.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `DATABASE_URL`         | required                   |
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    /// | `MAX_UPLOAD_BYTES`     | `10485760`                 |
    ///
    /// See [`JwtConfig::from_env`] and [`StorageConfig::from_env`] for the rest.
    ///
    /// # Panics
    ///
    /// Panics on a missing `DATABASE_URL` or any malformed value.
    pub fn from_env() -> Self {
        let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

        let cors_origins = env_or("CORS_ORIGINS", "http://localhost:5173".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let storage = StorageConfig::from_env()
            .unwrap_or_else(|e| panic!("Invalid storage configuration: {e}"));

        Self {
            database_url,
            host: env_or("HOST", "0.0.0.0".to_string()),
            port: env_or("PORT", 3000),
            cors_origins,
            request_timeout_secs: env_or("REQUEST_TIMEOUT_SECS", 30),
            max_upload_bytes: env_or("MAX_UPLOAD_BYTES", DEFAULT_MAX_UPLOAD_BYTES),
            jwt: JwtConfig::from_env(),
            storage,
        }
    }
}

/// Read and parse `key`, falling back to `default` when it is unset.
///
/// # Panics
///
/// Panics when the variable is set but does not parse as `T`.
pub(crate) fn env_or<T>(key: &str, default: T) -> T
where
    T: FromStr,
    T::Err: Display,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .unwrap_or_else(|e| panic!("{key} has an invalid value {raw:?}: {e}")),
        Err(_) => default,
    }
}
