//! Config file model.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tl_common::FORMAT_VERSION;

use crate::ConfigError;

/// Top-level logger configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    /// Config format version (for forward-compatible schema evolution).
    pub format_version: String,

    /// Suppress warning notifications for the logger and every output.
    pub disable_warnings: bool,

    /// Outputs attached to the logger, in dispatch order.
    pub outputs: Vec<OutputConfig>,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            format_version: FORMAT_VERSION.to_string(),
            disable_warnings: false,
            outputs: Vec::new(),
        }
    }
}

/// A single output attached to the logger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OutputConfig {
    /// Tabular records written as CSV.
    Csv {
        path: PathBuf,
        #[serde(default)]
        disable_warnings: bool,
    },
    /// Text lines appended to a log file.
    Text {
        path: PathBuf,
        #[serde(default = "default_with_timestamp")]
        with_timestamp: bool,
    },
}

fn default_with_timestamp() -> bool {
    true
}

impl OutputConfig {
    /// Path of the file this output writes.
    pub fn path(&self) -> &Path {
        match self {
            OutputConfig::Csv { path, .. } | OutputConfig::Text { path, .. } => path,
        }
    }
}

impl LoggerConfig {
    /// Parse a config from a JSON string without validating it.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Load and validate a config file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Outputs with the logger-wide warning switch folded in.
    pub fn effective_outputs(&self) -> Vec<OutputConfig> {
        self.outputs
            .iter()
            .cloned()
            .map(|output| match output {
                OutputConfig::Csv {
                    path,
                    disable_warnings,
                } => OutputConfig::Csv {
                    path,
                    disable_warnings: disable_warnings || self.disable_warnings,
                },
                other => other,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_empty_object() {
        let config = LoggerConfig::from_json("{}").unwrap();
        assert_eq!(config, LoggerConfig::default());
        assert_eq!(config.format_version, FORMAT_VERSION);
    }

    #[test]
    fn test_parse_outputs() {
        let config = LoggerConfig::from_json(
            r#"{
                "outputs": [
                    {"type": "csv", "path": "progress.csv"},
                    {"type": "text", "path": "debug.log", "with_timestamp": false}
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(config.outputs.len(), 2);
        assert_eq!(
            config.outputs[0],
            OutputConfig::Csv {
                path: PathBuf::from("progress.csv"),
                disable_warnings: false,
            }
        );
        assert_eq!(config.outputs[1].path(), Path::new("debug.log"));
    }

    #[test]
    fn test_text_timestamp_defaults_on() {
        let config =
            LoggerConfig::from_json(r#"{"outputs": [{"type": "text", "path": "a.log"}]}"#).unwrap();
        assert!(matches!(
            config.outputs[0],
            OutputConfig::Text {
                with_timestamp: true,
                ..
            }
        ));
    }

    #[test]
    fn test_global_disable_warnings_propagates() {
        let config = LoggerConfig {
            disable_warnings: true,
            outputs: vec![OutputConfig::Csv {
                path: PathBuf::from("a.csv"),
                disable_warnings: false,
            }],
            ..LoggerConfig::default()
        };
        let outputs = config.effective_outputs();
        assert!(matches!(
            outputs[0],
            OutputConfig::Csv {
                disable_warnings: true,
                ..
            }
        ));
    }

    #[test]
    fn test_unknown_output_type_rejected() {
        let err = LoggerConfig::from_json(r#"{"outputs": [{"type": "parquet", "path": "x"}]}"#);
        assert!(err.is_err());
    }
}
