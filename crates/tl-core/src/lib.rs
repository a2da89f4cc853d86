//! tabulog core: tabular input, logger dispatch, and file outputs.
//!
//! A [`TabularInput`] collects key/value scalars for one logging step. The
//! [`Logger`] routes it to every attached [`LogOutput`] that accepts tabular
//! data; [`CsvOutput`] persists each step as one CSV row and keeps the
//! header consistent as the key set grows or shrinks between steps.

pub mod exit_codes;
pub mod logger;
pub mod notify;
pub mod output;
pub mod tabular;

pub use exit_codes::ExitCode;
pub use logger::Logger;
pub use notify::{Notifier, RecordingNotifier, TracingNotifier, WarningChannel};
pub use output::{CsvOutput, FileMode, FileOutput, LogData, LogOutput, TextOutput};
pub use tabular::{Placement, TabularInput, TabularRecord, TabularValue};

pub use tl_common::{Error, InputKind, Primitive, Result};
