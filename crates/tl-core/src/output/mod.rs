//! Log outputs and the data they accept.

mod csv_output;
mod file;
mod text_output;

pub use self::csv_output::CsvOutput;
pub use self::file::{FileMode, FileOutput};
pub use self::text_output::TextOutput;

use std::fmt;
use tl_common::{InputKind, Result};

use crate::tabular::TabularRecord;

/// One piece of loggable data.
pub enum LogData<'a> {
    /// Key/value scalars; outputs mark the keys they persist.
    Tabular(&'a mut dyn TabularRecord),
    /// A single text line.
    Text(&'a str),
}

impl<'a> LogData<'a> {
    pub fn kind(&self) -> InputKind {
        match self {
            LogData::Tabular(_) => InputKind::Tabular,
            LogData::Text(_) => InputKind::Text,
        }
    }

    /// Borrow this data again for another output.
    pub fn reborrow(&mut self) -> LogData<'_> {
        match self {
            LogData::Tabular(record) => LogData::Tabular(&mut **record),
            LogData::Text(text) => LogData::Text(*text),
        }
    }
}

impl fmt::Debug for LogData<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogData::Tabular(_) => f.write_str("LogData::Tabular(..)"),
            LogData::Text(text) => f.debug_tuple("LogData::Text").field(text).finish(),
        }
    }
}

/// A destination for logged data.
pub trait LogOutput: fmt::Debug {
    /// Kinds of data this output can record.
    fn types_accepted(&self) -> &'static [InputKind];

    fn accepts(&self, kind: InputKind) -> bool {
        self.types_accepted().contains(&kind)
    }

    /// Record one piece of data.
    ///
    /// Fails with `Error::UnacceptableType` when `data` is of a kind not
    /// listed in [`types_accepted`](LogOutput::types_accepted).
    fn record(&mut self, data: LogData<'_>, prefix: &str) -> Result<()>;

    /// Flush buffered output. `step` is informational.
    fn dump(&mut self, _step: Option<u64>) -> Result<()> {
        Ok(())
    }

    /// Flush and release the underlying resource.
    fn close(&mut self) -> Result<()> {
        Ok(())
    }

    /// Suppress warnings from this output.
    fn disable_warnings(&mut self) {}
}
