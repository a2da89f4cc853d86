//! Logger: routes data to every output that accepts its kind.

use tl_common::{Error, InputKind, Result};
use tl_config::{LoggerConfig, OutputConfig};

use crate::notify::WarningChannel;
use crate::output::{CsvOutput, LogData, LogOutput, TextOutput};

/// Dispatches logged data to a set of outputs.
#[derive(Debug, Default)]
pub struct Logger {
    outputs: Vec<Box<dyn LogOutput>>,
    prefixes: Vec<String>,
    prefix_str: String,
    warnings: WarningChannel,
}

impl Logger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Logger with a custom warning channel.
    pub fn with_warnings(warnings: WarningChannel) -> Self {
        Self {
            warnings,
            ..Self::default()
        }
    }

    /// Build a logger and its outputs from a validated config.
    pub fn from_config(config: &LoggerConfig) -> Result<Self> {
        let mut logger = Self::new();
        for output in config.effective_outputs() {
            let boxed: Box<dyn LogOutput> = match output {
                OutputConfig::Csv {
                    path,
                    disable_warnings,
                } => {
                    let mut csv = CsvOutput::new(&path)?;
                    if disable_warnings {
                        csv.disable_warnings();
                    }
                    Box::new(csv)
                }
                OutputConfig::Text {
                    path,
                    with_timestamp,
                } => Box::new(TextOutput::new(&path, with_timestamp)?),
            };
            logger.add_output(boxed);
        }
        if config.disable_warnings {
            logger.warnings.disable();
        }
        Ok(logger)
    }

    pub fn add_output(&mut self, output: Box<dyn LogOutput>) {
        tracing::debug!(target: "tabulog.logger", output = ?output, "Added output");
        self.outputs.push(output);
    }

    /// Close and drop every output.
    pub fn remove_all(&mut self) -> Result<()> {
        for mut output in self.outputs.drain(..) {
            output.close()?;
        }
        Ok(())
    }

    pub fn output_count(&self) -> usize {
        self.outputs.len()
    }

    /// Whether any output accepts `kind`.
    pub fn accepts(&self, kind: InputKind) -> bool {
        self.outputs.iter().any(|o| o.accepts(kind))
    }

    /// Record `data` in every output that accepts its kind.
    ///
    /// Data no output accepts is dropped with a one-time warning.
    pub fn log(&mut self, mut data: LogData<'_>) -> Result<()> {
        if self.outputs.is_empty() {
            return Err(Error::NoOutputs);
        }

        let kind = data.kind();
        let mut accepted = false;
        for output in &mut self.outputs {
            if output.accepts(kind) {
                output.record(data.reborrow(), &self.prefix_str)?;
                accepted = true;
            }
        }

        if !accepted {
            self.warnings.warn(format!(
                "Log data of kind {kind} was not accepted by any output"
            ));
        }
        Ok(())
    }

    /// Flush every output.
    pub fn dump_all(&mut self, step: Option<u64>) -> Result<()> {
        for output in &mut self.outputs {
            output.dump(step)?;
        }
        Ok(())
    }

    pub fn push_prefix(&mut self, prefix: &str) {
        self.prefixes.push(prefix.to_string());
        self.prefix_str = self.prefixes.concat();
    }

    pub fn pop_prefix(&mut self) {
        self.prefixes.pop();
        self.prefix_str = self.prefixes.concat();
    }

    /// Suppress warnings from the logger and every output.
    pub fn disable_warnings(&mut self) {
        self.warnings.disable();
        for output in &mut self.outputs {
            output.disable_warnings();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::RecordingNotifier;
    use crate::tabular::{TabularInput, TabularRecord};
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_log_without_outputs() {
        let mut logger = Logger::new();
        let err = logger.log(LogData::Text("x")).unwrap_err();
        assert!(matches!(err, Error::NoOutputs));
    }

    #[test]
    fn test_routes_by_kind() {
        let tmp = TempDir::new().unwrap();
        let csv_path = tmp.path().join("progress.csv");
        let text_path = tmp.path().join("debug.log");

        let mut logger = Logger::new();
        logger.add_output(Box::new(CsvOutput::new(&csv_path).unwrap()));
        logger.add_output(Box::new(TextOutput::new(&text_path, false).unwrap()));

        let mut tabular = TabularInput::new();
        tabular.record("loss", 0.5);
        logger.log(LogData::Tabular(&mut tabular)).unwrap();
        logger.push_prefix("[itr 0] ");
        logger.log(LogData::Text("done")).unwrap();
        logger.pop_prefix();
        logger.dump_all(Some(0)).unwrap();

        assert_eq!(fs::read_to_string(&csv_path).unwrap(), "loss\n0.5\n");
        assert_eq!(fs::read_to_string(&text_path).unwrap(), "[itr 0] done\n");
        assert!(tabular.unmarked_keys().is_empty());
    }

    #[test]
    fn test_unaccepted_kind_warns_once() {
        let tmp = TempDir::new().unwrap();
        let notifier = RecordingNotifier::new();
        let mut logger = Logger::with_warnings(WarningChannel::new(Box::new(notifier.clone())));
        logger.add_output(Box::new(
            TextOutput::new(tmp.path().join("a.log"), false).unwrap(),
        ));

        let mut tabular = TabularInput::new();
        tabular.record("x", 1);
        logger.log(LogData::Tabular(&mut tabular)).unwrap();
        logger.log(LogData::Tabular(&mut tabular)).unwrap();

        assert_eq!(notifier.messages().len(), 1);
        assert_eq!(tabular.primitive_snapshot().len(), 1);
        assert_eq!(tabular.unmarked_keys(), vec!["x"]);
    }

    #[test]
    fn test_from_config() {
        let tmp = TempDir::new().unwrap();
        let config = LoggerConfig {
            outputs: vec![
                OutputConfig::Csv {
                    path: tmp.path().join("out/progress.csv"),
                    disable_warnings: false,
                },
                OutputConfig::Text {
                    path: tmp.path().join("out/debug.log"),
                    with_timestamp: true,
                },
            ],
            ..LoggerConfig::default()
        };
        let mut logger = Logger::from_config(&config).unwrap();
        assert_eq!(logger.output_count(), 2);
        assert!(logger.accepts(InputKind::Tabular));
        assert!(logger.accepts(InputKind::Text));

        logger.remove_all().unwrap();
        assert_eq!(logger.output_count(), 0);
        assert!(tmp.path().join("out/progress.csv").exists());
    }
}
