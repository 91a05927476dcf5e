//! crates.io API registry implementation

use serde::Deserialize;
use tracing::{debug, warn};

use crate::version::error::RegistryError;
use crate::version::registries::{default_http_client, get_checked, make_record};
use crate::version::registry::Registry;
use crate::version::timestamp::parse_timestamp;
use crate::version::types::{RegistryType, ReleaseRecord};

/// Default base URL for crates.io
pub const DEFAULT_BASE_URL: &str = "https://crates.io";

/// Response from `/api/v1/crates/{name}/versions`
#[derive(Debug, Deserialize)]
struct CratesIoVersionsResponse {
    versions: Vec<CratesIoVersion>,
}

#[derive(Debug, Deserialize)]
struct CratesIoVersion {
    num: String,
    created_at: Option<String>,
}

/// Registry implementation for crates.io API
pub struct CratesIoRegistry {
    client: reqwest::Client,
    base_url: String,
}

impl CratesIoRegistry {
    /// Creates a new CratesIoRegistry with a custom base URL
    pub fn new(base_url: &str) -> Self {
        Self::with_client(default_http_client(), base_url)
    }

    pub fn with_client(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

impl Default for CratesIoRegistry {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

#[async_trait::async_trait]
impl Registry for CratesIoRegistry {
    fn registry_type(&self) -> RegistryType {
        RegistryType::CratesIo
    }

    async fn fetch_releases(
        &self,
        package_name: &str,
    ) -> Result<Vec<ReleaseRecord>, RegistryError> {
        let url = format!("{}/api/v1/crates/{}/versions", self.base_url, package_name);

        let response =
            get_checked(&self.client, self.registry_type(), &url, package_name).await?;

        let data: CratesIoVersionsResponse = response.json().await.map_err(|e| {
            warn!("Failed to parse crates.io response: {}", e);
            RegistryError::InvalidResponse(e.to_string())
        })?;

        let releases: Vec<ReleaseRecord> = data
            .versions
            .into_iter()
            .filter_map(|v| {
                let released_at = v.created_at.as_deref().and_then(parse_timestamp);
                make_record(self.registry_type(), v.num, released_at, None)
            })
            .collect();

        debug!("Found {} releases for crate {}", releases.len(), package_name);

        Ok(releases)
    }
}
