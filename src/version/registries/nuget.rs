//! NuGet registration API implementation

use chrono::{DateTime, Datelike, Utc};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::version::error::RegistryError;
use crate::version::registries::{default_http_client, get_checked, make_record};
use crate::version::registry::Registry;
use crate::version::timestamp::parse_timestamp;
use crate::version::types::{RegistryType, ReleaseRecord};

/// Default base URL for the NuGet v3 API
pub const DEFAULT_BASE_URL: &str = "https://api.nuget.org";

/// Unlisted packages report this year as their publish date
const UNLISTED_PUBLISH_YEAR: i32 = 1900;

/// Registration index: a list of pages, each optionally inlining its leaves
#[derive(Debug, Deserialize)]
struct RegistrationIndex {
    #[serde(default)]
    items: Vec<RegistrationPage>,
}

#[derive(Debug, Deserialize)]
struct RegistrationPage {
    #[serde(rename = "@id")]
    id: Option<String>,
    /// Absent when the page has to be fetched separately
    items: Option<Vec<RegistrationLeaf>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RegistrationLeaf {
    catalog_entry: CatalogEntry,
    commit_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CatalogEntry {
    version: String,
    published: Option<String>,
}

/// Registry implementation for NuGet
pub struct NugetRegistry {
    client: reqwest::Client,
    base_url: String,
}

impl NugetRegistry {
    /// Creates a new NugetRegistry with a custom base URL
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

impl Default for NugetRegistry {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

fn published_at(raw: Option<&str>) -> Option<DateTime<Utc>> {
    raw.and_then(parse_timestamp)
        .filter(|dt| dt.year() != UNLISTED_PUBLISH_YEAR)
}

#[async_trait::async_trait]
impl Registry for NugetRegistry {
    fn registry_type(&self) -> RegistryType {
        RegistryType::NuGet
    }

    async fn fetch_releases(
        &self,
        package_name: &str,
    ) -> Result<Vec<ReleaseRecord>, RegistryError> {
        // Package ids are case-insensitive but the API only serves lowercase paths
        let url = format!(
            "{}/v3/registration5-semver1/{}/index.json",
            self.base_url,
            package_name.to_lowercase()
        );

        let response =
            get_checked(&self.client, self.registry_type(), &url, package_name).await?;

        let index: RegistrationIndex = response.json().await.map_err(|e| {
            warn!("Failed to parse NuGet registration index: {}", e);
            RegistryError::InvalidResponse(e.to_string())
        })?;

        let mut releases = Vec::new();
        for page in index.items {
            let Some(leaves) = page.items else {
                debug!(
                    "Skipping non-inlined NuGet page {}",
                    page.id.as_deref().unwrap_or("<unknown>")
                );
                continue;
            };

            releases.extend(leaves.into_iter().filter_map(|leaf| {
                let released_at = published_at(leaf.catalog_entry.published.as_deref());
                make_record(
                    RegistryType::NuGet,
                    leaf.catalog_entry.version,
                    released_at,
                    leaf.commit_id,
                )
            }));
        }

        debug!("Found {} releases for package {}", releases.len(), package_name);

        Ok(releases)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use mockito::Server;

    #[tokio::test]
    async fn fetch_releases_reads_inlined_pages_and_commit_ids() {
        let mut server = Server::new_async().await;

        let mock = server
            .mock("GET", "/v3/registration5-semver1/newtonsoft.json/index.json")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{
                    "count": 2,
                    "items": [
                        {
                            "@id": "page/0",
                            "items": [
                                {
                                    "catalogEntry": {"version": "12.0.3", "published": "2019-11-09T01:27:30.723+00:00"},
                                    "commitId": "c1"
                                },
                                {
                                    "catalogEntry": {"version": "13.0.1-beta1", "published": "1900-01-01T00:00:00+00:00"},
                                    "commitId": "c2"
                                }
                            ]
                        },
                        {"@id": "page/1", "lower": "13.0.1", "upper": "13.0.3"}
                    ]
                }"#,
            )
            .create_async()
            .await;

        let registry = NugetRegistry::new(&server.url());
        let result = registry.fetch_releases("Newtonsoft.Json").await.unwrap();

        mock.assert_async().await;
        let versions: Vec<&str> = result.iter().map(ReleaseRecord::version).collect();
        assert_eq!(versions, vec!["12.0.3", "13.0.1-beta1"]);
        assert_eq!(result[0].commit(), Some("c1"));
        assert_eq!(
            result[0].released_at(),
            Some(
                Utc.with_ymd_and_hms(2019, 11, 9, 1, 27, 30).unwrap()
                    + chrono::TimeDelta::milliseconds(723)
            )
        );
        // Unlisted placeholder date
        assert_eq!(result[1].released_at(), None);
    }

    #[tokio::test]
    async fn fetch_releases_returns_not_found_for_nonexistent_package() {
        let mut server = Server::new_async().await;

        let mock = server
            .mock("GET", "/v3/registration5-semver1/nonexistent/index.json")
            .with_status(404)
            .create_async()
            .await;

        let registry = NugetRegistry::new(&server.url());
        let result = registry.fetch_releases("NonExistent").await;

        mock.assert_async().await;
        assert!(matches!(result, Err(RegistryError::NotFound(_))));
    }

    #[tokio::test]
    async fn fetch_releases_returns_invalid_response_for_server_error() {
        let mut server = Server::new_async().await;

        let mock = server
            .mock("GET", "/v3/registration5-semver1/flaky/index.json")
            .with_status(503)
            .create_async()
            .await;

        let registry = NugetRegistry::new(&server.url());
        let result = registry.fetch_releases("flaky").await;

        mock.assert_async().await;
        assert!(matches!(result, Err(RegistryError::InvalidResponse(_))));
    }
}
