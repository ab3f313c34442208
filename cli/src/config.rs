use crate::output::OutputFormat;
use anyhow::{Context, Result};
use std::env;
use std::path::{Path, PathBuf};

pub const FORMAT_VAR: &str = "PERMREF_FORMAT";
pub const LOG_DIR_VAR: &str = "PERMREF_LOG_DIR";

/// Environment-based CLI configuration
#[derive(Debug, Clone)]
pub struct CliConfig {
    /// Output format used when `--format` is not given
    pub format: OutputFormat,

    /// Directory for the rolling log file, if file logging is enabled
    pub log_dir: Option<PathBuf>,
}

impl CliConfig {
    /// Load configuration from the environment, reading `.env` from the
    /// current directory first if there is one
    pub fn load() -> Result<Self> {
        Self::load_with_base(None)
    }

    /// Load configuration with an optional base directory for relative
    /// paths. This is primarily for testing purposes
    pub fn load_with_base(base_dir: Option<PathBuf>) -> Result<Self> {
        let base = if let Some(base) = base_dir {
            base
        } else {
            let current = env::current_dir().context("Failed to get current directory")?;
            let env_file = current.join(".env");
            if env_file.exists() {
                dotenv::from_path(&env_file).ok();
            }
            current
        };

        let format = env::var(FORMAT_VAR)
            .map(|name| OutputFormat::parse(&name))
            .unwrap_or_default();

        Ok(Self {
            format,
            log_dir: Self::get_path_from_env(LOG_DIR_VAR, &base),
        })
    }

    /// Get a path from an environment variable; unset or empty means none
    fn get_path_from_env(var_name: &str, base_dir: &Path) -> Option<PathBuf> {
        let path_str = env::var(var_name).ok().filter(|value| !value.is_empty())?;
        let path = PathBuf::from(path_str);

        // If the path is relative, make it relative to the base directory
        if path.is_relative() {
            Some(base_dir.join(path))
        } else {
            Some(path)
        }
    }

    /// The format to use for a command, `--format` taking precedence
    pub fn output_format(&self, flag: Option<&str>) -> OutputFormat {
        flag.map(OutputFormat::parse).unwrap_or(self.format)
    }
}
