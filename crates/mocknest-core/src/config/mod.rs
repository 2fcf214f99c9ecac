//! Service configuration.
//!
//! Settings come from environment variables (names inherited from the
//! deployment scripts: `DB_*` for the relational collaborator, `MONGO_*` for
//! the document collaborator), or from a YAML/JSON file named by
//! `MOCKNEST_CONFIG`, which takes precedence when set. The core itself never
//! opens connections; these values are handed to whichever store
//! implementations the process bootstrap wires in.

pub mod error;
pub mod fixtures;
pub mod parser;

pub use error::ConfigError;

use crate::engine::EngineConfig;
use serde::Deserialize;
use std::time::Duration;

/// Relational collaborator settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RelationalConfig {
    pub host: String,
    pub port: u16,
    pub name: String,
    pub user: String,
    pub password: Option<String>,
}

impl Default for RelationalConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_owned(),
            port: 5432,
            name: "mocknest".to_owned(),
            user: "mocknest".to_owned(),
            password: None,
        }
    }
}

/// Document collaborator settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DocumentConfig {
    pub host: String,
    pub port: u16,
    pub base: String,
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_owned(),
            port: 27017,
            base: "mock_test".to_owned(),
        }
    }
}

/// Top-level service configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    pub relational: RelationalConfig,
    pub document: DocumentConfig,
    /// Directory of fixture files applied at startup, if any.
    pub fixtures_dir: Option<String>,
    /// Upper bound for one store round trip.
    pub op_timeout_ms: u64,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            relational: RelationalConfig::default(),
            document: DocumentConfig::default(),
            fixtures_dir: None,
            op_timeout_ms: 5_000,
        }
    }
}

fn env_string(name: &str, target: &mut String) {
    if let Ok(value) = std::env::var(name) {
        *target = value;
    }
}

fn env_port(name: &str, target: &mut u16) -> Result<(), ConfigError> {
    if let Ok(value) = std::env::var(name) {
        *target = value.parse().map_err(|_| ConfigError::InvalidEnv {
            name: name.to_owned(),
            value,
        })?;
    }
    Ok(())
}

impl ServiceConfig {
    /// Read configuration from the environment, falling back to defaults for
    /// anything unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();
        env_string("DB_HOST", &mut config.relational.host);
        env_port("DB_PORT", &mut config.relational.port)?;
        env_string("DB_NAME", &mut config.relational.name);
        env_string("DB_USER", &mut config.relational.user);
        if let Ok(password) = std::env::var("DB_PASS") {
            config.relational.password = Some(password);
        }
        env_string("MONGO_HOST", &mut config.document.host);
        env_port("MONGO_PORT", &mut config.document.port)?;
        env_string("MONGO_BASE", &mut config.document.base);
        if let Ok(dir) = std::env::var("MOCKNEST_FIXTURES") {
            config.fixtures_dir = Some(dir);
        }
        if let Ok(value) = std::env::var("MOCKNEST_OP_TIMEOUT_MS") {
            config.op_timeout_ms = value.parse().map_err(|_| ConfigError::InvalidEnv {
                name: "MOCKNEST_OP_TIMEOUT_MS".to_owned(),
                value,
            })?;
        }
        Ok(config)
    }

    /// Like [`ServiceConfig::from_env`], but when `MOCKNEST_CONFIG` names a
    /// file, that file is parsed instead and wins wholesale.
    pub fn from_env_or_file() -> Result<Self, ConfigError> {
        match std::env::var("MOCKNEST_CONFIG") {
            Ok(path) => parser::read_config_file(&path),
            Err(_) => Self::from_env(),
        }
    }

    /// Engine knobs derived from this configuration.
    pub fn engine(&self) -> EngineConfig {
        EngineConfig {
            op_timeout: Duration::from_millis(self.op_timeout_ms),
        }
    }
}
