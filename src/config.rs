use std::env;
use std::fmt;

use crate::services::auth_service::parse_expires_in;

/// Runtime settings read from the process environment (and `.env`).
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub mongodb_uri: String,
    pub mongodb_database: String,
    pub jwt_secret: String,
    pub token_ttl: chrono::Duration,
}

#[derive(Debug, PartialEq)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid(&'static str, String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "{} must be set", key),
            ConfigError::Invalid(key, reason) => write!(f, "{} is invalid: {}", key, reason),
        }
    }
}

impl std::error::Error for ConfigError {}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup; `from_env` passes `std::env::var`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &'static str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .ok_or(ConfigError::Missing(key))
        };

        let port = match lookup("PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|e| ConfigError::Invalid("PORT", e.to_string()))?,
            None => 5000,
        };

        let expires_in = lookup("EXPIRES_IN").unwrap_or_else(|| "1d".to_string());
        let token_ttl = parse_expires_in(&expires_in).map_err(|e| ConfigError::Invalid("EXPIRES_IN", e))?;

        Ok(Config {
            host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port,
            mongodb_uri: required("MONGODB_URI")?,
            mongodb_database: lookup("MONGODB_DATABASE").unwrap_or_else(|| "assignment".to_string()),
            jwt_secret: required("JWT_SECRET")?,
            token_ttl,
        })
    }
}
