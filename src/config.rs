use anyhow::Context;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Default log directive when RUST_LOG is not set
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// File name of the versions list inside the data directory
pub const VERSIONS_FILE_NAME: &str = "versions.list";

/// File name of the log file inside the data directory
pub const LOG_FILE_NAME: &str = "compact-index.log";

/// Configuration loaded from an optional JSON file
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct Config {
    /// Location of the versions list
    pub versions_path: Option<PathBuf>,
    pub log: LogConfig,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct LogConfig {
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {:?}", path))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse config file {:?}", path))
    }

    /// Explicit path first, then `versionsPath`, then the data directory
    pub fn resolve_versions_path(&self, explicit: Option<PathBuf>) -> PathBuf {
        self.resolve_versions_path_in(explicit, data_dir)
    }

    fn resolve_versions_path_in(
        &self,
        explicit: Option<PathBuf>,
        data_dir: impl FnOnce() -> PathBuf,
    ) -> PathBuf {
        explicit
            .or_else(|| self.versions_path.clone())
            .unwrap_or_else(|| data_dir().join(VERSIONS_FILE_NAME))
    }
}

/// Returns the path to the data directory for compact-index.
/// Uses $XDG_DATA_HOME/compact-index if XDG_DATA_HOME is set,
/// otherwise falls back to ~/.local/share/compact-index,
/// or ./compact-index if neither is available.
pub fn data_dir() -> PathBuf {
    data_dir_with_env(std::env::var("XDG_DATA_HOME").ok(), dirs::home_dir())
}

/// Returns the path to the log file.
pub fn log_path() -> PathBuf {
    data_dir().join(LOG_FILE_NAME)
}

fn data_dir_with_env(xdg_data_home: Option<String>, home_dir: Option<PathBuf>) -> PathBuf {
    let data_dir = xdg_data_home
        .map(PathBuf::from)
        .or_else(|| home_dir.map(|home| home.join(".local/share")))
        .unwrap_or_else(|| PathBuf::from("."));

    data_dir.join("compact-index")
}
