//! Error types for configuration and fixture loading.

use thiserror::Error;

/// Configuration loading error.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),
    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    /// Unknown file type
    #[error("unknown config file type: {0}")]
    UnknownFileType(String),
    /// File could not be read
    #[error("failed to read {path}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// Environment variable holds an unparseable value
    #[error("invalid value for {name}: {value:?}")]
    InvalidEnv { name: String, value: String },
    /// Malformed fixture glob pattern
    #[error("bad fixture pattern: {0}")]
    Pattern(#[from] glob::PatternError),
    /// Unreadable fixture directory entry
    #[error("unreadable fixture entry: {0}")]
    Glob(#[from] glob::GlobError),
}
