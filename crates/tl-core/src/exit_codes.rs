//! Exit codes for the tabulog CLI.
//!
//! Exit codes communicate operation outcome without requiring output parsing.

use tl_common::Error;

/// Exit codes for tabulog operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// All input recorded
    Clean = 0,

    /// Configuration error (bad file, no outputs)
    ConfigError = 10,

    /// I/O error writing or reading an output file
    IoError = 13,

    /// Malformed input line
    InputError = 14,

    /// Internal/unknown error
    InternalError = 99,
}

impl ExitCode {
    /// Convert to i32 for process exit.
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    pub fn is_success(self) -> bool {
        matches!(self, ExitCode::Clean)
    }

    /// Map a failure to the code reported by the CLI.
    pub fn for_error(err: &Error) -> Self {
        match err {
            Error::Config(_) | Error::NoOutputs => ExitCode::ConfigError,
            Error::Io(_) | Error::Csv(_) => ExitCode::IoError,
            Error::InvalidInput(_) | Error::Json(_) => ExitCode::InputError,
            Error::UnacceptableType { .. } => ExitCode::InternalError,
        }
    }
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> Self {
        code as i32
    }
}
