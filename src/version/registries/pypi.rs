//! PyPI registry client for fetching Python package releases

use async_trait::async_trait;
use indexmap::IndexMap;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::version::error::RegistryError;
use crate::version::registries::{default_http_client, get_checked, make_record};
use crate::version::registry::Registry;
use crate::version::timestamp::parse_timestamp;
use crate::version::types::{RegistryType, ReleaseRecord};

pub const DEFAULT_BASE_URL: &str = "https://pypi.org";

/// PyPI registry client
pub struct PypiRegistry {
    client: Client,
    base_url: String,
}

impl Default for PypiRegistry {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl PypiRegistry {
    pub fn new(base_url: &str) -> Self {
        Self::with_client(default_http_client(), base_url)
    }

    pub fn with_client(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

/// PyPI JSON API response structure
#[derive(Debug, Deserialize)]
struct PypiResponse {
    releases: IndexMap<String, Vec<PypiFile>>,
}

/// One uploaded artifact (sdist or wheel) of a release
#[derive(Debug, Deserialize)]
struct PypiFile {
    upload_time_iso_8601: Option<String>,
    /// Naive UTC timestamp, present on older payloads
    upload_time: Option<String>,
}

impl PypiFile {
    fn uploaded_at(&self) -> Option<chrono::DateTime<chrono::Utc>> {
        self.upload_time_iso_8601
            .as_deref()
            .or(self.upload_time.as_deref())
            .and_then(parse_timestamp)
    }
}

#[async_trait]
impl Registry for PypiRegistry {
    fn registry_type(&self) -> RegistryType {
        RegistryType::PyPI
    }

    async fn fetch_releases(
        &self,
        package_name: &str,
    ) -> Result<Vec<ReleaseRecord>, RegistryError> {
        let url = format!("{}/pypi/{}/json", self.base_url, package_name);

        let response =
            get_checked(&self.client, self.registry_type(), &url, package_name).await?;

        let pypi_response: PypiResponse = response
            .json()
            .await
            .map_err(|e| RegistryError::InvalidResponse(e.to_string()))?;

        // A release without files was registered but never uploaded
        let releases: Vec<ReleaseRecord> = pypi_response
            .releases
            .into_iter()
            .filter(|(_, files)| !files.is_empty())
            .filter_map(|(version, files)| {
                let released_at = files.iter().filter_map(PypiFile::uploaded_at).min();
                make_record(RegistryType::PyPI, version, released_at, None)
            })
            .collect();

        debug!(
            "Found {} releases for package {}",
            releases.len(),
            package_name
        );

        Ok(releases)
    }
}
