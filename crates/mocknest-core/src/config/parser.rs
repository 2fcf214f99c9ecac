//! Configuration file parsing (YAML/JSON).

use crate::config::error::ConfigError;
use serde::de::DeserializeOwned;
use std::path::Path;

/// Config file type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFileType {
    Yaml,
    Json,
    Unknown,
}

/// Get config file type from path extension
pub fn get_file_type(path: &str) -> ConfigFileType {
    let ext = Path::new(path)
        .extension()
        .and_then(|e| e.to_str())
        .map(|s| s.to_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "yaml" | "yml" => ConfigFileType::Yaml,
        "json" => ConfigFileType::Json,
        _ => ConfigFileType::Unknown,
    }
}

/// Parse JSON content
pub fn parse_json<T: DeserializeOwned>(content: &str) -> Result<T, ConfigError> {
    serde_json::from_str(content).map_err(ConfigError::from)
}

/// Parse YAML content
pub fn parse_yaml<T: DeserializeOwned>(content: &str) -> Result<T, ConfigError> {
    serde_yaml::from_str(content).map_err(ConfigError::from)
}

/// Parse config content based on file type
pub fn parse_config<T: DeserializeOwned>(content: &str, path: &str) -> Result<T, ConfigError> {
    match get_file_type(path) {
        ConfigFileType::Yaml => parse_yaml(content),
        ConfigFileType::Json => parse_json(content),
        ConfigFileType::Unknown => Err(ConfigError::UnknownFileType(path.to_owned())),
    }
}

/// Read and parse a config file from disk
pub fn read_config_file<T: DeserializeOwned>(path: &str) -> Result<T, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_owned(),
        source,
    })?;
    parse_config(&content, path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("service.yaml", ConfigFileType::Yaml)]
    #[case("service.YML", ConfigFileType::Yaml)]
    #[case("service.json", ConfigFileType::Json)]
    #[case("service.JSON", ConfigFileType::Json)]
    #[case("service.toml", ConfigFileType::Unknown)]
    #[case("service", ConfigFileType::Unknown)]
    #[case("", ConfigFileType::Unknown)]
    fn file_type_follows_the_extension(#[case] path: &str, #[case] expected: ConfigFileType) {
        assert_eq!(get_file_type(path), expected);
    }

    #[rstest]
    fn json_and_yaml_agree_on_the_same_document() {
        let from_json: serde_json::Value =
            parse_config(r#"{"host": "db", "port": 5432}"#, "c.json").unwrap();
        let from_yaml: serde_json::Value = parse_config("host: db\nport: 5432\n", "c.yaml").unwrap();
        assert_eq!(from_json, from_yaml);
    }

    #[rstest]
    fn malformed_content_reports_the_format() {
        let err = parse_config::<serde_json::Value>("{oops", "c.json").unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));

        let err = parse_config::<serde_json::Value>("bad: yaml: [", "c.yaml").unwrap_err();
        assert!(matches!(err, ConfigError::Yaml(_)));
    }

    #[rstest]
    #[case("service.toml")]
    #[case("service")]
    fn unknown_extensions_are_rejected(#[case] path: &str) {
        let err = parse_config::<serde_json::Value>("{}", path).unwrap_err();
        assert!(matches!(err, ConfigError::UnknownFileType(_)));
    }

    #[rstest]
    fn missing_files_surface_as_io_errors() {
        let err = read_config_file::<serde_json::Value>("/nonexistent/service.yaml").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
