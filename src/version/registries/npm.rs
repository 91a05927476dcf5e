//! npm registry API implementation

use std::collections::HashMap;

use indexmap::IndexMap;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::version::error::RegistryError;
use crate::version::registries::{default_http_client, get_checked, make_record};
use crate::version::registry::Registry;
use crate::version::timestamp::parse_timestamp;
use crate::version::types::{RegistryType, ReleaseRecord};

/// Default base URL for npm registry
pub const DEFAULT_BASE_URL: &str = "https://registry.npmjs.org";

/// Keys of the `time` object that are not versions
const NON_VERSION_TIME_KEYS: &[&str] = &["created", "modified", "unpublished"];

/// Response from npm registry API
#[derive(Debug, Deserialize)]
struct NpmPackageResponse {
    /// Publish time per version, in publish order. Unpublished packages
    /// carry an `unpublished` object here, hence `Value`.
    #[serde(default)]
    time: IndexMap<String, serde_json::Value>,
    #[serde(default)]
    versions: HashMap<String, NpmVersionMeta>,
}

#[derive(Debug, Deserialize)]
struct NpmVersionMeta {
    #[serde(rename = "gitHead")]
    git_head: Option<String>,
}

/// Registry implementation for npm registry API
pub struct NpmRegistry {
    client: reqwest::Client,
    base_url: String,
}

impl NpmRegistry {
    /// Creates a new NpmRegistry with a custom base URL
    pub fn new(base_url: &str) -> Self {
        Self::with_client(default_http_client(), base_url)
    }

    pub fn with_client(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Encode package name for URL (handles scoped packages)
    fn encode_package_name(package_name: &str) -> String {
        if package_name.starts_with('@') {
            // Scoped package: @scope/name -> @scope%2Fname
            package_name.replace('/', "%2F")
        } else {
            package_name.to_string()
        }
    }
}

impl Default for NpmRegistry {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

#[async_trait::async_trait]
impl Registry for NpmRegistry {
    fn registry_type(&self) -> RegistryType {
        RegistryType::Npm
    }

    async fn fetch_releases(
        &self,
        package_name: &str,
    ) -> Result<Vec<ReleaseRecord>, RegistryError> {
        let encoded_name = Self::encode_package_name(package_name);
        let url = format!("{}/{}", self.base_url, encoded_name);

        let response =
            get_checked(&self.client, self.registry_type(), &url, package_name).await?;

        let mut package_info: NpmPackageResponse = response.json().await.map_err(|e| {
            warn!("Failed to parse npm registry response: {}", e);
            RegistryError::InvalidResponse(e.to_string())
        })?;

        let releases: Vec<ReleaseRecord> = package_info
            .time
            .into_iter()
            .filter(|(version, _)| !NON_VERSION_TIME_KEYS.contains(&version.as_str()))
            .filter_map(|(version, published)| {
                let released_at = published.as_str().and_then(parse_timestamp);
                let commit = package_info
                    .versions
                    .remove(&version)
                    .and_then(|meta| meta.git_head);
                make_record(RegistryType::Npm, version, released_at, commit)
            })
            .collect();

        debug!("Found {} releases for package {}", releases.len(), package_name);

        Ok(releases)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use mockito::Server;

    #[tokio::test]
    async fn fetch_releases_reads_time_map_and_git_head() {
        let mut server = Server::new_async().await;

        let mock = server
            .mock("GET", "/lodash")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{
                    "name": "lodash",
                    "time": {
                        "created": "2012-04-23T16:37:11.912Z",
                        "4.17.20": "2020-08-13T16:53:54.152Z",
                        "4.17.21": "2021-02-20T15:42:16.891Z",
                        "modified": "2023-06-01T00:00:00.000Z"
                    },
                    "versions": {
                        "4.17.20": {"gitHead": "ded9bc6"},
                        "4.17.21": {}
                    }
                }"#,
            )
            .create_async()
            .await;

        let registry = NpmRegistry::new(&server.url());
        let result = registry.fetch_releases("lodash").await.unwrap();

        mock.assert_async().await;
        let versions: Vec<&str> = result.iter().map(ReleaseRecord::version).collect();
        assert_eq!(versions, vec!["4.17.20", "4.17.21"]);
        assert_eq!(result[0].commit(), Some("ded9bc6"));
        assert_eq!(result[1].commit(), None);
        assert_eq!(
            result[1].released_at(),
            Some(
                Utc.with_ymd_and_hms(2021, 2, 20, 15, 42, 16).unwrap()
                    + chrono::TimeDelta::milliseconds(891)
            )
        );
    }

    #[tokio::test]
    async fn fetch_releases_returns_not_found_for_nonexistent_package() {
        let mut server = Server::new_async().await;

        let mock = server
            .mock("GET", "/nonexistent-package")
            .with_status(404)
            .with_header("content-type", "application/json")
            .with_body(r#"{"error": "Not found"}"#)
            .create_async()
            .await;

        let registry = NpmRegistry::new(&server.url());
        let result = registry.fetch_releases("nonexistent-package").await;

        mock.assert_async().await;
        assert!(matches!(result, Err(RegistryError::NotFound(_))));
    }

    #[tokio::test]
    async fn fetch_releases_handles_scoped_package() {
        let mut server = Server::new_async().await;

        // Scoped packages use URL encoding: @types/node -> @types%2Fnode
        let mock = server
            .mock("GET", "/@types%2Fnode")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{
                    "name": "@types/node",
                    "time": {
                        "18.0.0": "2022-04-19T00:00:00.000Z",
                        "20.0.0": "2023-04-21T00:00:00.000Z"
                    },
                    "versions": {"18.0.0": {}, "20.0.0": {}}
                }"#,
            )
            .create_async()
            .await;

        let registry = NpmRegistry::new(&server.url());
        let result = registry.fetch_releases("@types/node").await.unwrap();

        mock.assert_async().await;
        let versions: Vec<&str> = result.iter().map(ReleaseRecord::version).collect();
        assert_eq!(versions, vec!["18.0.0", "20.0.0"]);
    }

    #[tokio::test]
    async fn fetch_releases_returns_empty_for_unpublished_package() {
        let mut server = Server::new_async().await;

        let mock = server
            .mock("GET", "/empty-package")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{
                    "name": "empty-package",
                    "time": {
                        "created": "2020-01-01T00:00:00.000Z",
                        "unpublished": {"time": "2020-01-02T00:00:00.000Z", "versions": ["1.0.0"]}
                    }
                }"#,
            )
            .create_async()
            .await;

        let registry = NpmRegistry::new(&server.url());
        let result = registry.fetch_releases("empty-package").await.unwrap();

        mock.assert_async().await;
        assert!(result.is_empty());
    }
}
