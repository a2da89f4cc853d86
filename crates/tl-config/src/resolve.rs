//! Config resolution: CLI flag → env → XDG → defaults.

use std::path::{Path, PathBuf};

use crate::model::LoggerConfig;
use crate::{ConfigError, ENV_CONFIG_PATH};

const DIR_NAME: &str = "tabulog";
const CONFIG_FILE: &str = "config.json";

/// Where a resolved config came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Path passed on the command line.
    Cli(PathBuf),
    /// Path named by `TABULOG_CONFIG`.
    Env(PathBuf),
    /// `config.json` found in the user config directory.
    UserDir(PathBuf),
    /// No file found; built-in defaults.
    Defaults,
}

/// A loaded config plus its origin.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub config: LoggerConfig,
    pub source: ConfigSource,
}

/// Resolve the logger config using the process environment.
pub fn resolve_config(cli_path: Option<&Path>) -> Result<ResolvedConfig, ConfigError> {
    resolve_with(cli_path, |key| std::env::var(key).ok(), dirs::config_dir())
}

/// Resolution with injectable environment lookup and platform config dir.
///
/// An explicit path (CLI or env) must exist; the user-dir file is optional.
pub fn resolve_with<F>(
    cli_path: Option<&Path>,
    env: F,
    platform_config_dir: Option<PathBuf>,
) -> Result<ResolvedConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    // 1) Explicit CLI flag
    if let Some(path) = cli_path {
        let config = LoggerConfig::from_file(path)?;
        return Ok(ResolvedConfig {
            config,
            source: ConfigSource::Cli(path.to_path_buf()),
        });
    }

    // 2) Environment override
    if let Some(raw) = env(ENV_CONFIG_PATH).filter(|v| !v.is_empty()) {
        let path = PathBuf::from(raw);
        let config = LoggerConfig::from_file(&path)?;
        return Ok(ResolvedConfig {
            config,
            source: ConfigSource::Env(path),
        });
    }

    // 3) XDG_CONFIG_HOME, then platform default
    let user_dir = env("XDG_CONFIG_HOME")
        .map(|xdg| PathBuf::from(xdg).join(DIR_NAME))
        .or_else(|| platform_config_dir.map(|base| base.join(DIR_NAME)));
    if let Some(dir) = user_dir {
        let path = dir.join(CONFIG_FILE);
        if path.is_file() {
            let config = LoggerConfig::from_file(&path)?;
            return Ok(ResolvedConfig {
                config,
                source: ConfigSource::UserDir(path),
            });
        }
    }

    // 4) Defaults
    Ok(ResolvedConfig {
        config: LoggerConfig::default(),
        source: ConfigSource::Defaults,
    })
}
