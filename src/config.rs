//! Server settings read from the environment.

use std::env;

use actix_web::cookie::Key;
use thiserror::Error;

const DEFAULT_DATABASE_URL: &str = "app.db";
const DEFAULT_ADDRESS: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8080;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("PORT must be a number between 0 and 65535, got `{0}`")]
    InvalidPort(String),
    #[error("SECRET_KEY must be at least 64 bytes long")]
    SecretTooShort,
}

#[derive(Clone)]
pub struct ServerConfig {
    pub database_url: String,
    pub address: String,
    pub port: u16,
    /// Signing key of the session cookie.
    pub secret_key: Key,
    /// Cookie domain; the cookie is host-only when unset.
    pub domain: Option<String>,
}

impl ServerConfig {
    /// Read settings from the process environment. A `.env` file, if
    /// present, should be loaded beforehand.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = match lookup("PORT") {
            Some(value) => value
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidPort(value))?,
            None => DEFAULT_PORT,
        };

        let secret_key = match lookup("SECRET_KEY") {
            Some(secret) => {
                Key::try_from(secret.as_bytes()).map_err(|_| ConfigError::SecretTooShort)?
            }
            None => {
                log::warn!("SECRET_KEY is not set; sessions will not survive a restart");
                Key::generate()
            }
        };

        Ok(Self {
            database_url: lookup("DATABASE_URL")
                .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string()),
            address: lookup("ADDRESS").unwrap_or_else(|| DEFAULT_ADDRESS.to_string()),
            port,
            secret_key,
            domain: lookup("DOMAIN").filter(|domain| !domain.trim().is_empty()),
        })
    }
}
