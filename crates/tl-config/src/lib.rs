//! tabulog configuration loading and validation.
//!
//! This crate provides:
//! - Typed Rust structs for the logger config file (`config.json`)
//! - Config resolution (CLI → env → XDG → defaults)
//! - Semantic validation

pub mod model;
pub mod resolve;
pub mod validate;

pub use model::{LoggerConfig, OutputConfig};
pub use resolve::{resolve_config, ConfigSource, ResolvedConfig};
pub use validate::{ValidationError, ValidationResult};

use std::path::PathBuf;
use thiserror::Error;

/// Environment variable naming an explicit config file.
pub const ENV_CONFIG_PATH: &str = "TABULOG_CONFIG";

/// Errors from loading a config file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid config: {0}")]
    Invalid(#[from] ValidationError),
}

impl From<ConfigError> for tl_common::Error {
    fn from(err: ConfigError) -> Self {
        tl_common::Error::Config(err.to_string())
    }
}
