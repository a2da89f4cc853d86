//! tabulog common types and errors.
//!
//! This crate provides foundational types shared across the tabulog crates:
//! - The unified error type and `Result` alias
//! - `Primitive`, the flat cell value written to tabular outputs
//! - `InputKind`, the closed set of loggable data kinds
//! - Output format versioning

pub mod error;
pub mod kind;
pub mod schema;
pub mod value;

pub use error::{Error, Result};
pub use kind::InputKind;
pub use schema::FORMAT_VERSION;
pub use value::Primitive;
