//! Registry implementations for fetching package releases

pub mod crates_io;
pub mod maven;
pub mod npm;
pub mod nuget;
pub mod pypi;
pub mod rubygems;

pub use crates_io::CratesIoRegistry;
pub use maven::MavenRegistry;
pub use npm::NpmRegistry;
pub use nuget::NugetRegistry;
pub use pypi::PypiRegistry;
pub use rubygems::RubyGemsRegistry;

use std::time::Duration;

use chrono::{DateTime, Utc};
use reqwest::{Response, StatusCode};
use tracing::{debug, warn};

use crate::config::{DEFAULT_USER_AGENT, FETCH_TIMEOUT_MS};
use crate::version::error::RegistryError;
use crate::version::types::{RegistryType, ReleaseRecord};

/// Builds the HTTP client shared by all registry implementations
///
/// Fails if `user_agent` is not a valid header value.
pub(crate) fn http_client(
    user_agent: &str,
    timeout: Duration,
) -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder()
        .user_agent(user_agent)
        .timeout(timeout)
        .build()
}

pub(crate) fn default_http_client() -> reqwest::Client {
    http_client(
        DEFAULT_USER_AGENT,
        Duration::from_millis(FETCH_TIMEOUT_MS as u64),
    )
    .expect("Failed to create HTTP client")
}

/// GET `url` and map error statuses the same way for every registry
///
/// 404 and 410 mean the package does not exist, 429 carries the
/// `Retry-After` hint, anything else that is not 2xx is an invalid response.
pub(crate) async fn get_checked(
    client: &reqwest::Client,
    registry_type: RegistryType,
    url: &str,
    package_name: &str,
) -> Result<Response, RegistryError> {
    debug!("{} fetching info for `{}` from: {}", registry_type, package_name, url);

    let response = client.get(url).send().await?;
    let status = response.status();
    debug!("{} status: {}", registry_type, status);

    if status == StatusCode::NOT_FOUND || status == StatusCode::GONE {
        return Err(RegistryError::NotFound(package_name.to_string()));
    }

    if status == StatusCode::TOO_MANY_REQUESTS {
        let retry_after = response
            .headers()
            .get("retry-after")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse().ok());
        return Err(RegistryError::RateLimited {
            retry_after_secs: retry_after,
        });
    }

    if !status.is_success() {
        warn!("{} registry returned status {}: {}", registry_type, status, url);
        return Err(RegistryError::InvalidResponse(format!(
            "Unexpected status: {}",
            status
        )));
    }

    Ok(response)
}

/// Build a record, skipping (with a warning) entries with an empty version
pub(crate) fn make_record(
    registry_type: RegistryType,
    version: String,
    released_at: Option<DateTime<Utc>>,
    commit: Option<String>,
) -> Option<ReleaseRecord> {
    ReleaseRecord::new(version, released_at, commit)
        .inspect_err(|e| warn!("Skipping {} release entry: {}", registry_type, e))
        .ok()
}
