use thiserror::Error;

use crate::version::types::RegistryType;

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Rate limited: retry after {retry_after_secs:?} seconds")]
    RateLimited { retry_after_secs: Option<u64> },

    #[error("Package not found: {0}")]
    NotFound(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Invalid package name: {0}")]
    InvalidPackageName(String),

    #[error("Registry {0} is disabled in the configuration")]
    Disabled(RegistryType),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RecordError {
    #[error("Release version must not be empty")]
    EmptyVersion,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid HTTP settings in config (check fetch.userAgent): {0}")]
    HttpClient(#[from] reqwest::Error),
}
