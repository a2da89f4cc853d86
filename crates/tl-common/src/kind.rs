//! Kinds of data a logger can route to its outputs.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The closed set of loggable data kinds.
///
/// Outputs advertise the kinds they accept; the logger only forwards data
/// to outputs whose accepted set contains the data's kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputKind {
    /// Key/value scalar records.
    Tabular,
    /// Free-form text lines.
    Text,
}

impl fmt::Display for InputKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tabular => write!(f, "tabular"),
            Self::Text => write!(f, "text"),
        }
    }
}
