//! tabulog CLI: record JSON-lines metrics into a CSV table.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process;
use tl_common::{Error, InputKind, Result};
use tl_config::{resolve_config, OutputConfig};
use tl_core::{ExitCode, LogData, Logger, TabularInput};
use tracing_subscriber::EnvFilter;

/// Environment variable holding the diagnostics filter.
const ENV_LOG_FILTER: &str = "TABULOG_LOG";

#[derive(Parser, Debug)]
#[command(name = "tabulog", version, about = "Record JSON-lines metrics into a CSV table")]
struct Cli {
    /// Format of diagnostics written to stderr.
    #[arg(long, value_enum, default_value_t = LogFormat::Text, global = true)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Read JSON objects from stdin, one per line, and record each as a row.
    Record(RecordArgs),
    /// Print the header columns of a CSV file, one per line.
    Header {
        /// CSV file to inspect.
        path: PathBuf,
    },
}

#[derive(Args, Debug)]
struct RecordArgs {
    /// Write rows to this CSV file (truncated on start).
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Also append a key/value table per row to this text file.
    #[arg(long)]
    text: Option<PathBuf>,

    /// Logger config file (overrides TABULOG_CONFIG and the user config dir).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Suppress warnings about schema changes and unrecorded keys.
    #[arg(long)]
    no_warnings: bool,

    /// Omit timestamps from the text output.
    #[arg(long)]
    no_timestamp: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.log_format);

    let result = match &cli.command {
        Command::Record(args) => run_record(args),
        Command::Header { path } => run_header(path),
    };

    let code = match result {
        Ok(()) => ExitCode::Clean,
        Err(err) => {
            tracing::debug!(target: "tabulog.cli", code = err.code(), "Command failed");
            eprintln!("tabulog: {err}");
            ExitCode::for_error(&err)
        }
    };
    process::exit(code.as_i32());
}

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_env(ENV_LOG_FILTER).unwrap_or_else(|_| EnvFilter::new("warn"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(true);
    match format {
        LogFormat::Text => builder.init(),
        LogFormat::Json => builder.json().init(),
    }
}

fn run_record(args: &RecordArgs) -> Result<()> {
    let resolved = resolve_config(args.config.as_deref())?;
    tracing::debug!(target: "tabulog.cli", source = ?resolved.source, "Resolved config");

    let mut config = resolved.config;
    if let Some(path) = &args.csv {
        config.outputs.push(OutputConfig::Csv {
            path: path.clone(),
            disable_warnings: false,
        });
    }
    if let Some(path) = &args.text {
        config.outputs.push(OutputConfig::Text {
            path: path.clone(),
            with_timestamp: !args.no_timestamp,
        });
    }
    if args.no_warnings {
        config.disable_warnings = true;
    }
    config
        .validate()
        .map_err(|e| Error::Config(e.to_string()))?;
    if config.outputs.is_empty() {
        return Err(Error::NoOutputs);
    }

    let mut logger = Logger::from_config(&config)?;
    let mut tabular = TabularInput::new();
    if config.disable_warnings {
        tabular.disable_warnings();
    }

    let mut rows: u64 = 0;
    for (index, line) in io::stdin().lock().lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let serde_json::Value::Object(fields) = serde_json::from_str::<serde_json::Value>(&line)? else {
            return Err(Error::InvalidInput(format!(
                "line {}: expected a JSON object",
                index + 1
            )));
        };

        flatten_into(&mut tabular, "", fields);
        logger.log(LogData::Tabular(&mut tabular))?;
        if logger.accepts(InputKind::Text) {
            let table = tabular.to_string();
            logger.log(LogData::Text(&table))?;
        }
        logger.dump_all(Some(rows))?;
        tabular.clear();
        rows += 1;
    }

    logger.remove_all()?;
    tracing::info!(target: "tabulog.cli", rows, "Recorded input");
    Ok(())
}

/// Record every field of `fields`; nested objects become `parent/child` keys.
fn flatten_into(
    tabular: &mut TabularInput,
    prefix: &str,
    fields: serde_json::Map<String, serde_json::Value>,
) {
    for (key, value) in fields {
        let full_key = format!("{prefix}{key}");
        match value {
            serde_json::Value::Object(inner) => {
                flatten_into(tabular, &format!("{full_key}/"), inner);
            }
            other => tabular.record(&full_key, other),
        }
    }
}

fn run_header(path: &Path) -> Result<()> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut out = io::stdout().lock();
    for column in reader.headers()?.iter() {
        writeln!(out, "{column}")?;
    }
    Ok(())
}
