//! CLI configuration with TOML file support.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use protocoin_ledger::GenesisConfig;
use protocoin_utils::DEFAULT_LOG_LEVEL;
use serde::{Deserialize, Serialize};

/// Configuration for the `protocoin` binary.
///
/// Loaded from a TOML file via [`CliConfig::from_toml_file`]; every field is
/// optional in the file. Command-line flags and environment variables
/// override file values.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CliConfig {
    /// Where the ledger snapshot is persisted.
    #[serde(default = "default_state_path")]
    pub state_path: PathBuf,

    /// Log format: "human" or "json".
    #[serde(default = "default_log_format")]
    pub log_format: String,

    /// Log level filter: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Genesis parameters used by `init`.
    #[serde(default)]
    pub genesis: Option<GenesisConfig>,
}

fn default_state_path() -> PathBuf {
    PathBuf::from("./protocoin.state")
}

fn default_log_format() -> String {
    "human".to_string()
}

fn default_log_level() -> String {
    DEFAULT_LOG_LEVEL.to_string()
}

impl CliConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("couldn't read config file {}", path.display()))?;
        Self::from_toml_str(&content)
            .with_context(|| format!("couldn't parse config file {}", path.display()))
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }

    /// Serialize the configuration to a TOML string.
    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            state_path: default_state_path(),
            log_format: default_log_format(),
            log_level: default_log_level(),
            genesis: None,
        }
    }
}
