//! Runtime configuration from environment variables (and `.env` when present).

use crate::error::ConfigError;
use std::str::FromStr;

pub const DEFAULT_PORT: u16 = 4000;
pub const DEFAULT_BODY_LIMIT: usize = 100 * 1024;

/// Which `DocumentStore` implementation the server runs on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StoreBackend {
    Postgres,
    Memory,
}

impl FromStr for StoreBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(StoreBackend::Postgres),
            "memory" => Ok(StoreBackend::Memory),
            _ => Err(ConfigError::Invalid {
                key: "STORE_BACKEND",
                value: s.to_string(),
            }),
        }
    }
}

/// How update bodies are applied to a stored document.
///
/// `Replace` overwrites every named update field, storing null for fields the caller left
/// out. `Merge` skips fields that are missing or null in the body.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum UpdateMode {
    #[default]
    Replace,
    Merge,
}

impl FromStr for UpdateMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "replace" => Ok(UpdateMode::Replace),
            "merge" => Ok(UpdateMode::Merge),
            _ => Err(ConfigError::Invalid {
                key: "UPDATE_MODE",
                value: s.to_string(),
            }),
        }
    }
}

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub store: StoreBackend,
    pub database_url: String,
    /// Schema holding the documents table. Must be a valid PostgreSQL identifier.
    pub document_schema: String,
    pub max_connections: u32,
    pub update_mode: UpdateMode,
    pub body_limit: usize,
}

impl AppConfig {
    /// Load `.env` if present, then read the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build config from an arbitrary key lookup. Unset or empty keys take their default.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let port = match get("PORT") {
            Some(v) => parse_number("PORT", &v)?,
            None => DEFAULT_PORT,
        };
        let max_connections = match get("DATABASE_MAX_CONNECTIONS") {
            Some(v) => parse_number("DATABASE_MAX_CONNECTIONS", &v)?,
            None => 5,
        };
        let body_limit = match get("BODY_LIMIT_BYTES") {
            Some(v) => parse_number("BODY_LIMIT_BYTES", &v)?,
            None => DEFAULT_BODY_LIMIT,
        };
        let store = get("STORE_BACKEND")
            .map(|v| v.parse::<StoreBackend>())
            .transpose()?
            .unwrap_or(StoreBackend::Postgres);
        let update_mode = get("UPDATE_MODE").map(|v| v.parse::<UpdateMode>()).transpose()?.unwrap_or_default();

        let document_schema = get("DOCUMENT_SCHEMA").unwrap_or_else(|| "employees".into());
        if !is_identifier(&document_schema) {
            return Err(ConfigError::Invalid {
                key: "DOCUMENT_SCHEMA",
                value: document_schema,
            });
        }

        Ok(AppConfig {
            host: get("HOST").unwrap_or_else(|| "0.0.0.0".into()),
            port,
            store,
            database_url: get("DATABASE_URL").unwrap_or_else(|| "postgres://localhost/employees".into()),
            document_schema,
            max_connections,
            update_mode,
            body_limit,
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_number<T: FromStr>(key: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::Invalid {
        key,
        value: value.to_string(),
    })
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
