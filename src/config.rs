// Configuration file support

use eyre::{Context, Result, eyre};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::Level;

pub const DEFAULT_DATA_FILE: &str = "tasks.json";
const CONFIG_FILE_NAME: &str = "tasktracker.yml";

/// Settings read from `tasktracker.yml`
///
/// Every key is optional:
///
/// ```yaml
/// data-file: ~/notes/tasks.json
/// log-level: info
/// color: false
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct Config {
    pub data_file: PathBuf,
    pub log_level: String,
    pub color: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
            log_level: "warn".to_string(),
            color: true,
        }
    }
}

impl Config {
    /// `<config_dir>/tasktracker/tasktracker.yml`, when the platform has one
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("tasktracker").join(CONFIG_FILE_NAME))
    }

    /// Load configuration
    ///
    /// An explicit path must exist. Without one, the default location is
    /// tried and silently skipped when absent.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::from_file(path),
            None => match Self::default_path() {
                Some(path) if path.exists() => Self::from_file(&path),
                _ => Ok(Self::default()),
            },
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).with_context(|| format!("Failed to read config file {}", path.display()))?;
        let mut config: Config =
            serde_yaml::from_str(&content).with_context(|| format!("Invalid config file {}", path.display()))?;
        config.data_file = expand_home(&config.data_file);
        config.log_level()?;
        Ok(config)
    }

    pub fn log_level(&self) -> Result<Level> {
        self.log_level
            .parse()
            .map_err(|_| eyre!("Invalid log-level '{}' (expected error, warn, info, debug or trace)", self.log_level))
    }
}

fn expand_home(path: &Path) -> PathBuf {
    match (path.strip_prefix("~"), dirs::home_dir()) {
        (Ok(rest), Some(home)) => home.join(rest),
        _ => path.to_path_buf(),
    }
}
