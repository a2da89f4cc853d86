//! Text file output: one line per logged message.

use chrono::Local;
use std::io::Write;
use std::path::Path;
use tl_common::{Error, InputKind, Result};

use super::file::{FileMode, FileOutput};
use super::{LogData, LogOutput};

const ACCEPTED: &[InputKind] = &[InputKind::Text];
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Appends text lines to a file, optionally timestamped.
#[derive(Debug)]
pub struct TextOutput {
    file: FileOutput,
    with_timestamp: bool,
}

impl TextOutput {
    /// Open `path` for appending.
    pub fn new(path: impl AsRef<Path>, with_timestamp: bool) -> Result<Self> {
        let file = FileOutput::open(path, FileMode::Append)?;
        Ok(Self {
            file,
            with_timestamp,
        })
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }
}

impl LogOutput for TextOutput {
    fn types_accepted(&self) -> &'static [InputKind] {
        ACCEPTED
    }

    fn record(&mut self, data: LogData<'_>, prefix: &str) -> Result<()> {
        let kind = data.kind();
        let LogData::Text(text) = data else {
            return Err(Error::UnacceptableType { kind });
        };

        let line = if self.with_timestamp {
            format!("{} | {}{}", Local::now().format(TIMESTAMP_FORMAT), prefix, text)
        } else {
            format!("{prefix}{text}")
        };
        writeln!(self.file.handle()?, "{line}")?;
        Ok(())
    }

    fn dump(&mut self, _step: Option<u64>) -> Result<()> {
        self.file.flush()?;
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        self.file.close()?;
        Ok(())
    }
}
