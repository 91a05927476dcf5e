use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::version::error::ConfigError;
use crate::version::types::RegistryType;

// =============================================================================
// Fetch-related constants
// =============================================================================

/// Timeout for a single HTTP request in milliseconds (30 seconds)
pub const FETCH_TIMEOUT_MS: i64 = 30_000;

/// Delay between starting each package fetch to avoid rate limiting (10ms)
pub const FETCH_STAGGER_DELAY_MS: u64 = 10;

/// User agent sent to registries; crates.io rejects requests without one
pub const DEFAULT_USER_AGENT: &str = concat!("releaser/", env!("CARGO_PKG_VERSION"));

/// Top-level configuration structure
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct ReleaserConfig {
    pub fetch: FetchConfig,
    pub registries: RegistriesConfig,
}

/// HTTP fetch configuration
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct FetchConfig {
    /// Per-request timeout in milliseconds
    pub timeout_ms: i64,
    /// Delay between starting each package fetch in milliseconds
    pub stagger_delay_ms: u64,
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_ms: FETCH_TIMEOUT_MS,
            stagger_delay_ms: FETCH_STAGGER_DELAY_MS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

/// Registry-specific configuration
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct RegistriesConfig {
    #[serde(rename = "cratesIo")]
    pub crates_io: RegistryConfig,
    pub maven: RegistryConfig,
    pub npm: RegistryConfig,
    pub nuget: RegistryConfig,
    pub pypi: RegistryConfig,
    pub rubygems: RegistryConfig,
}

impl RegistriesConfig {
    pub fn get(&self, registry_type: RegistryType) -> &RegistryConfig {
        match registry_type {
            RegistryType::CratesIo => &self.crates_io,
            RegistryType::Maven => &self.maven,
            RegistryType::Npm => &self.npm,
            RegistryType::NuGet => &self.nuget,
            RegistryType::PyPI => &self.pypi,
            RegistryType::RubyGems => &self.rubygems,
        }
    }
}

/// Individual registry configuration
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct RegistryConfig {
    pub enabled: bool,
    /// Overrides the public registry URL (mirrors, proxies)
    pub base_url: Option<String>,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            base_url: None,
        }
    }
}

impl ReleaserConfig {
    /// Load configuration from a JSON file. A missing file yields defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            debug!("No config file at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        debug!("Loading config from {:?}", path);
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }
}

/// Returns the path to the data directory for releaser.
/// Uses $XDG_DATA_HOME/releaser if XDG_DATA_HOME is set,
/// otherwise falls back to ~/.local/share/releaser,
/// or ./releaser if neither is available.
pub fn data_dir() -> PathBuf {
    data_dir_with_env(std::env::var("XDG_DATA_HOME").ok(), dirs::home_dir())
}

/// Returns the path to the default config file.
pub fn config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("releaser")
        .join("config.json")
}

/// Returns the path to the log file.
pub fn log_path() -> PathBuf {
    data_dir().join("releaser.log")
}

fn data_dir_with_env(xdg_data_home: Option<String>, home_dir: Option<PathBuf>) -> PathBuf {
    let data_dir = xdg_data_home
        .map(PathBuf::from)
        .or_else(|| home_dir.map(|home| home.join(".local/share")))
        .unwrap_or_else(|| PathBuf::from("."));

    data_dir.join("releaser")
}
