//! RubyGems API registry implementation

use serde::Deserialize;
use tracing::{debug, warn};

use crate::version::error::RegistryError;
use crate::version::registries::{default_http_client, get_checked, make_record};
use crate::version::registry::Registry;
use crate::version::timestamp::parse_timestamp;
use crate::version::types::{RegistryType, ReleaseRecord};

/// Default base URL for RubyGems
pub const DEFAULT_BASE_URL: &str = "https://rubygems.org";

/// Entry of `/api/v1/versions/{name}.json`
#[derive(Debug, Deserialize)]
struct GemVersion {
    number: String,
    created_at: Option<String>,
}

/// Registry implementation for RubyGems API
pub struct RubyGemsRegistry {
    client: reqwest::Client,
    base_url: String,
}

impl RubyGemsRegistry {
    /// Creates a new RubyGemsRegistry with a custom base URL
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

impl Default for RubyGemsRegistry {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

#[async_trait::async_trait]
impl Registry for RubyGemsRegistry {
    fn registry_type(&self) -> RegistryType {
        RegistryType::RubyGems
    }

    async fn fetch_releases(
        &self,
        package_name: &str,
    ) -> Result<Vec<ReleaseRecord>, RegistryError> {
        let url = format!("{}/api/v1/versions/{}.json", self.base_url, package_name);

        let response =
            get_checked(&self.client, self.registry_type(), &url, package_name).await?;

        let gems: Vec<GemVersion> = response.json().await.map_err(|e| {
            warn!("Failed to parse RubyGems response: {}", e);
            RegistryError::InvalidResponse(e.to_string())
        })?;

        let releases: Vec<ReleaseRecord> = gems
            .into_iter()
            .filter_map(|gem| {
                let released_at = gem.created_at.as_deref().and_then(parse_timestamp);
                make_record(RegistryType::RubyGems, gem.number, released_at, None)
            })
            .collect();

        debug!("Found {} releases for gem {}", releases.len(), package_name);

        Ok(releases)
    }
}
