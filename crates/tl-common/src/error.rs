//! Error types for tabulog.

use crate::kind::InputKind;
use thiserror::Error;

/// Result type alias for tabulog operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type for tabulog.
#[derive(Error, Debug)]
pub enum Error {
    // Dispatch errors (10-19)
    #[error("unacceptable type: {kind} data is not accepted by this output")]
    UnacceptableType { kind: InputKind },

    #[error("no outputs have been added to the logger")]
    NoOutputs,

    #[error("invalid input: {0}")]
    InvalidInput(String),

    // Configuration errors (20-29)
    #[error("configuration error: {0}")]
    Config(String),

    // I/O errors (60-69)
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(csv::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Returns the error code for this error type.
    pub fn code(&self) -> u32 {
        match self {
            Error::UnacceptableType { .. } => 10,
            Error::NoOutputs => 11,
            Error::InvalidInput(_) => 12,
            Error::Config(_) => 20,
            Error::Io(_) => 60,
            Error::Csv(_) => 61,
            Error::Json(_) => 62,
        }
    }

    /// Whether this error came from the underlying file resource.
    pub fn is_io(&self) -> bool {
        matches!(self, Error::Io(_))
    }
}

impl From<csv::Error> for Error {
    /// I/O failures surfaced through the CSV layer keep their original
    /// `std::io::Error`; everything else stays a CSV error.
    fn from(err: csv::Error) -> Self {
        if err.is_io_error() {
            if let csv::ErrorKind::Io(io) = err.into_kind() {
                return Error::Io(io);
            }
            unreachable!("is_io_error implies ErrorKind::Io");
        }
        Error::Csv(err)
    }
}
