use std::path::{Path, PathBuf};

use clap::ValueEnum;
use seedling_core::ParseOptions;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Settings file looked up in the working directory when `--config` is absent.
pub const DEFAULT_SETTINGS_FILE: &str = "seedling.toml";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("toml decode error in {}: {source}", .path.display())]
    TomlDecode {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    pub format: LogFormat,
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    pub level: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            format: LogFormat::Text,
            level: "warn".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliSettings {
    pub validation: ParseOptions,
    pub logging: LoggingSettings,
}

/// Load settings from `path`, or from `seedling.toml` when present.
///
/// An explicit path must exist; the implicit file falls back to defaults.
pub fn load_settings(path: Option<&Path>) -> Result<CliSettings, SettingsError> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => {
            let path = PathBuf::from(DEFAULT_SETTINGS_FILE);
            if !path.exists() {
                return Ok(CliSettings::default());
            }
            path
        }
    };

    let content = std::fs::read_to_string(&path).map_err(|source| SettingsError::Io {
        path: path.clone(),
        source,
    })?;
    parse_settings(&content).map_err(|source| SettingsError::TomlDecode { path, source })
}

fn parse_settings(content: &str) -> Result<CliSettings, toml::de::Error> {
    toml::from_str(content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use seedling_core::OrderCheck;

    #[test]
    fn empty_settings_use_defaults() {
        let settings = parse_settings("").expect("parse settings");
        assert_eq!(settings, CliSettings::default());
        assert_eq!(settings.validation.order_check, OrderCheck::Membership);
    }

    #[test]
    fn parses_validation_and_logging_sections() {
        let settings = parse_settings(
            r#"
[validation]
order_check = "dependencies"

[logging]
format = "json"
"#,
        )
        .expect("parse settings");

        assert_eq!(settings.validation.order_check, OrderCheck::Dependencies);
        assert_eq!(settings.logging.format, LogFormat::Json);
        assert_eq!(settings.logging.level, "warn");
    }

    #[test]
    fn rejects_unknown_order_check() {
        assert!(parse_settings("[validation]\norder_check = \"topological\"\n").is_err());
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let err = load_settings(Some(Path::new("no/such/seedling.toml"))).unwrap_err();
        assert!(matches!(err, SettingsError::Io { .. }));
    }
}
