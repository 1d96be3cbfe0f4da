//! Server configuration loaded from environment variables.
//!
//! Every variable has a default suitable for local development. A
//! variable that is set but cannot be parsed is an error.

use std::{env, fmt::Display, str::FromStr};

use axum::http::HeaderValue;
use campusspot_db::DbConfig;
use thiserror::Error;
use tracing::info;

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_ALLOWED_ORIGINS: &str = "http://localhost:3000";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: {message}")]
    Invalid { key: &'static str, message: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    /// Front-end origins allowed to make cross-origin requests.
    pub allowed_origins: Vec<HeaderValue>,
    pub db: DbConfig,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = DbConfig::default();

        let db = DbConfig {
            url: load(&lookup, "SURREAL_URL", defaults.url)?,
            namespace: load(&lookup, "SURREAL_NS", defaults.namespace)?,
            database: load(&lookup, "SURREAL_DB", defaults.database)?,
            username: load(&lookup, "SURREAL_USER", defaults.username)?,
            password: load_secret(&lookup, "SURREAL_PASS", defaults.password),
        };

        let origins: String = load(
            &lookup,
            "ALLOWED_ORIGINS",
            DEFAULT_ALLOWED_ORIGINS.to_string(),
        )?;

        Ok(Self {
            port: load(&lookup, "SERVER_PORT", DEFAULT_PORT)?,
            allowed_origins: parse_origins(&origins)?,
            db,
        })
    }

    pub fn address(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }
}

fn load<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: T,
) -> Result<T, ConfigError>
where
    T: FromStr + Display,
    T::Err: Display,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            key,
            message: e.to_string(),
        }),
        None => {
            info!("{key} not set, using default: {default}");
            Ok(default)
        }
    }
}

/// Like [`load`] but never logs the value.
fn load_secret(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: String,
) -> String {
    lookup(key).map(|s| s.trim().to_string()).unwrap_or_else(|| {
        info!("{key} not set, using default");
        default
    })
}

fn parse_origins(raw: &str) -> Result<Vec<HeaderValue>, ConfigError> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(|origin| {
            HeaderValue::from_str(origin).map_err(|e| ConfigError::Invalid {
                key: "ALLOWED_ORIGINS",
                message: format!("{origin}: {e}"),
            })
        })
        .collect()
}
