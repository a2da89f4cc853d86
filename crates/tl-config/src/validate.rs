//! Semantic validation for logger configs.

use std::collections::HashSet;
use thiserror::Error;
use tl_common::schema::is_compatible;
use tl_common::FORMAT_VERSION;

use crate::model::LoggerConfig;

/// A semantic problem found in an otherwise well-formed config.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("unsupported format version: {found} (supported: {supported})")]
    UnsupportedVersion { found: String, supported: String },

    #[error("output #{index} has an empty path")]
    EmptyPath { index: usize },

    #[error("output path {path} is used by more than one output")]
    DuplicatePath { path: String },
}

/// Result of validating a config.
pub type ValidationResult = Result<(), ValidationError>;

impl LoggerConfig {
    /// Check the config for problems serde cannot catch.
    pub fn validate(&self) -> ValidationResult {
        if !is_compatible(&self.format_version) {
            return Err(ValidationError::UnsupportedVersion {
                found: self.format_version.clone(),
                supported: FORMAT_VERSION.to_string(),
            });
        }

        let mut seen = HashSet::new();
        for (index, output) in self.outputs.iter().enumerate() {
            let path = output.path();
            if path.as_os_str().is_empty() {
                return Err(ValidationError::EmptyPath { index });
            }
            if !seen.insert(path.to_path_buf()) {
                return Err(ValidationError::DuplicatePath {
                    path: path.display().to_string(),
                });
            }
        }
        Ok(())
    }
}
