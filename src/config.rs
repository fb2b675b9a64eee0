use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

// =============================================================================
// Service constants
// =============================================================================

/// Default base URL for the compatibility service
pub const DEFAULT_SERVICE_URL: &str = "https://www.npmpeer.dev";

/// Path of the lookup endpoint below the base URL
pub const DEFAULT_SERVICE_PATH: &str = "/find";

/// Timeout for a single lookup in milliseconds (30 seconds)
pub const LOOKUP_TIMEOUT_MS: u64 = 30_000;

/// User agent sent with every lookup
pub const DEFAULT_USER_AGENT: &str = "peer-compat";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Top-level configuration structure
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct Config {
    pub service: ServiceConfig,
    pub resolver: ResolverConfig,
}

/// Remote compatibility service configuration
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct ServiceConfig {
    pub base_url: String,
    pub path: String,
    /// Per-request timeout in milliseconds
    pub timeout_ms: u64,
    pub user_agent: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_SERVICE_URL.to_string(),
            path: DEFAULT_SERVICE_PATH.to_string(),
            timeout_ms: LOOKUP_TIMEOUT_MS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

/// Batch resolution configuration
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct ResolverConfig {
    /// Upper bound on targets resolved at once; unbounded when absent
    pub max_concurrent_targets: Option<usize>,
}

impl Config {
    /// Load configuration from a JSON file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Returns the path to the data directory for peer-compat.
/// Uses $XDG_DATA_HOME/peer-compat if XDG_DATA_HOME is set,
/// otherwise falls back to ~/.local/share/peer-compat,
/// or ./peer-compat if neither is available.
pub fn data_dir() -> PathBuf {
    data_dir_with_env(std::env::var("XDG_DATA_HOME").ok(), dirs::home_dir())
}

/// Returns the path to the log file.
pub fn log_path() -> PathBuf {
    data_dir().join("peer-compat.log")
}

fn data_dir_with_env(xdg_data_home: Option<String>, home_dir: Option<PathBuf>) -> PathBuf {
    let data_dir = xdg_data_home
        .map(PathBuf::from)
        .or_else(|| home_dir.map(|home| home.join(".local/share")))
        .unwrap_or_else(|| PathBuf::from("."));

    data_dir.join("peer-compat")
}
