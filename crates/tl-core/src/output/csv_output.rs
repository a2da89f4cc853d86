//! CSV output for tabular data.
//!
//! Each recorded step becomes one row. The header is the union of every key
//! seen so far and only ever grows:
//!
//! - The first non-empty record fixes the initial header in insertion order.
//! - A record carrying unseen keys expands the header; from then on columns
//!   are in sorted order, and every prior row is re-read and rewritten under
//!   the new header with empty cells for the new columns.
//! - A record missing known keys writes empty cells for them. No rewrite.
//!
//! Expansion rewrites the whole file, so its cost grows with the number of
//! rows already written.

use csv::{ReaderBuilder, StringRecord, WriterBuilder};
use indexmap::IndexMap;
use std::collections::HashSet;
use std::fs::File;
use std::path::Path;
use tl_common::{Error, InputKind, Primitive, Result};

use super::file::{FileMode, FileOutput};
use super::{LogData, LogOutput};
use crate::notify::WarningChannel;
use crate::tabular::TabularRecord;

const ACCEPTED: &[InputKind] = &[InputKind::Tabular];

/// Column names governing row layout.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Header {
    order: Vec<String>,
    known: HashSet<String>,
}

impl Header {
    fn new(order: Vec<String>) -> Self {
        let known = order.iter().cloned().collect();
        Self { order, known }
    }

    /// Keys not yet in the header, in snapshot order.
    fn missing<'a>(&self, keys: impl Iterator<Item = &'a String>) -> Vec<String> {
        keys.filter(|k| !self.known.contains(*k)).cloned().collect()
    }

    /// Add `added` and switch to sorted order. Returns the previous order.
    fn expand(&mut self, added: &[String]) -> Vec<String> {
        self.known.extend(added.iter().cloned());
        let mut sorted: Vec<String> = self.known.iter().cloned().collect();
        sorted.sort();
        std::mem::replace(&mut self.order, sorted)
    }
}

/// CSV file output for [`TabularRecord`] data.
#[derive(Debug)]
pub struct CsvOutput {
    file: FileOutput,
    header: Option<Header>,
    rows_written: usize,
    warnings: WarningChannel,
}

impl CsvOutput {
    /// Open `path` for writing, truncating it.
    pub fn new(path: impl AsRef<Path>) -> Result<Self> {
        Self::with_warnings(path, WarningChannel::tracing())
    }

    /// Open `path` with a custom warning channel.
    pub fn with_warnings(path: impl AsRef<Path>, warnings: WarningChannel) -> Result<Self> {
        let file = FileOutput::open(path, FileMode::Truncate)?;
        Ok(Self {
            file,
            header: None,
            rows_written: 0,
            warnings,
        })
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Current column order, or `None` before the first non-empty record.
    pub fn fieldnames(&self) -> Option<&[String]> {
        self.header.as_ref().map(|h| h.order.as_slice())
    }

    /// Data rows in the file, excluding the header line.
    pub fn rows_written(&self) -> usize {
        self.rows_written
    }

    pub fn warnings(&self) -> &WarningChannel {
        &self.warnings
    }

    fn record_tabular(&mut self, data: &mut dyn TabularRecord) -> Result<()> {
        let snapshot = data.primitive_snapshot();
        if snapshot.is_empty() && self.header.is_none() {
            return Ok(());
        }

        let header = match self.header.take() {
            Some(header) => header,
            None => {
                let header = Header::new(snapshot.keys().cloned().collect());
                write_row(self.file.handle()?, &header.order)?;
                header
            }
        };
        let header = self.header.insert(header);

        let added = header.missing(snapshot.keys());
        if !added.is_empty() {
            let old_order = header.expand(&added);
            self.rewrite(&old_order, &added)?;
        }

        let order = self.fieldnames().unwrap_or_default();
        let row = cells(order, &snapshot);
        write_row(self.file.handle()?, &row)?;
        self.rows_written += 1;

        for key in snapshot.keys() {
            data.mark(key);
        }
        Ok(())
    }

    /// Rewrite the header and every prior row under the expanded order.
    fn rewrite(&mut self, old_order: &[String], added: &[String]) -> Result<()> {
        let content = self.file.read_all()?;
        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(content.as_slice());

        // First record is the header written under `old_order`.
        let prior: Vec<StringRecord> = reader
            .records()
            .skip(1)
            .collect::<std::result::Result<_, _>>()?;

        let new_order = self.fieldnames().unwrap_or_default().to_vec();
        let positions: Vec<Option<usize>> = new_order
            .iter()
            .map(|col| old_order.iter().position(|old| old == col))
            .collect();

        self.file.truncate_and_rewind()?;
        {
            let handle = self.file.handle()?;
            let mut writer = WriterBuilder::new().has_headers(false).from_writer(handle);
            writer.write_record(&new_order)?;
            for record in &prior {
                writer.write_record(
                    positions
                        .iter()
                        .map(|pos| pos.and_then(|i| record.get(i)).unwrap_or("")),
                )?;
            }
            writer.flush()?;
        }

        tracing::debug!(
            target: "tabulog.csv",
            path = %self.file.path().display(),
            added = ?added,
            columns = new_order.len(),
            rows = prior.len(),
            "Expanded CSV header and rewrote prior rows"
        );
        self.warnings.warn(format!(
            "Inconsistent tabular keys: columns [{}] first appeared after {} was started; \
             earlier rows were backfilled with empty cells",
            added.join(", "),
            self.file.path().display()
        ));
        Ok(())
    }
}

/// Cells for `snapshot` under `order`; absent columns are empty and keys
/// outside `order` are dropped.
fn cells(order: &[String], snapshot: &IndexMap<String, Primitive>) -> Vec<String> {
    order
        .iter()
        .map(|col| snapshot.get(col).map(Primitive::to_cell).unwrap_or_default())
        .collect()
}

fn write_row(handle: &mut File, row: &[String]) -> Result<()> {
    let mut writer = WriterBuilder::new().has_headers(false).from_writer(handle);
    writer.write_record(row)?;
    writer.flush()?;
    Ok(())
}

impl LogOutput for CsvOutput {
    fn types_accepted(&self) -> &'static [InputKind] {
        ACCEPTED
    }

    fn record(&mut self, data: LogData<'_>, _prefix: &str) -> Result<()> {
        match data {
            LogData::Tabular(record) => self.record_tabular(record),
            other => Err(Error::UnacceptableType { kind: other.kind() }),
        }
    }

    fn dump(&mut self, _step: Option<u64>) -> Result<()> {
        self.file.flush()?;
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        self.file.close()?;
        Ok(())
    }

    fn disable_warnings(&mut self) {
        self.warnings.disable();
    }
}
