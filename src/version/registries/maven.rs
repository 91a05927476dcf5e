//! Maven Central registry implementation
//!
//! Maven repositories only publish a version list (`maven-metadata.xml`).
//! The release date of each version is taken from the `Last-Modified` header
//! of a HEAD request on the version's main jar.

use chrono::{DateTime, Utc};
use futures::StreamExt;
use futures::stream;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::version::error::RegistryError;
use crate::version::registries::{default_http_client, get_checked, make_record};
use crate::version::registry::Registry;
use crate::version::timestamp::parse_timestamp;
use crate::version::types::{RegistryType, ReleaseRecord};

/// Default base URL for Maven Central
pub const DEFAULT_BASE_URL: &str = "https://repo1.maven.org";

/// Upper bound on HEAD requests in flight for one artifact
const MAX_CONCURRENT_HEAD_REQUESTS: usize = 8;

#[derive(Debug, Deserialize)]
struct MavenMetadata {
    versioning: Option<Versioning>,
}

#[derive(Debug, Deserialize)]
struct Versioning {
    #[serde(default)]
    versions: Versions,
}

#[derive(Debug, Default, Deserialize)]
struct Versions {
    #[serde(default, rename = "version")]
    version: Vec<String>,
}

/// Maven coordinate split into repository path parts
#[derive(Debug, Clone, PartialEq, Eq)]
struct Coordinate {
    /// Group id with dots replaced by slashes
    group_path: String,
    artifact: String,
}

impl Coordinate {
    /// Accepts `group:artifact`, or a dotted name whose last segment is the
    /// artifact (`org.slf4j.slf4j-api`)
    fn parse(package_name: &str) -> Option<Self> {
        let (group, artifact) = package_name
            .split_once(':')
            .or_else(|| package_name.rsplit_once('.'))?;

        if group.is_empty() || artifact.is_empty() || artifact.contains(':') {
            return None;
        }

        Some(Self {
            group_path: group.replace('.', "/"),
            artifact: artifact.to_string(),
        })
    }
}

/// Registry implementation for Maven repositories
pub struct MavenRegistry {
    client: reqwest::Client,
    base_url: String,
}

impl MavenRegistry {
    /// Creates a new MavenRegistry with a custom base URL
    pub fn new(base_url: &str) -> Self {
        Self::with_client(default_http_client(), base_url)
    }

    pub fn with_client(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn artifact_url(&self, coordinate: &Coordinate) -> String {
        format!(
            "{}/maven2/{}/{}",
            self.base_url, coordinate.group_path, coordinate.artifact
        )
    }

    /// Release date of one version, or None if the jar has no usable header
    async fn jar_last_modified(
        &self,
        coordinate: &Coordinate,
        version: &str,
    ) -> Option<DateTime<Utc>> {
        let url = format!(
            "{}/{version}/{}-{version}.jar",
            self.artifact_url(coordinate),
            coordinate.artifact
        );
        debug!("maven fetching release date of `{}` from: {}", version, url);

        let response = self
            .client
            .head(&url)
            .send()
            .await
            .inspect_err(|e| debug!("HEAD {} failed: {}", url, e))
            .ok()?;

        if !response.status().is_success() {
            debug!("HEAD {} returned status {}", url, response.status());
            return None;
        }

        response
            .headers()
            .get(reqwest::header::LAST_MODIFIED)
            .and_then(|v| v.to_str().ok())
            .and_then(parse_timestamp)
    }
}

impl Default for MavenRegistry {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

#[async_trait::async_trait]
impl Registry for MavenRegistry {
    fn registry_type(&self) -> RegistryType {
        RegistryType::Maven
    }

    async fn fetch_releases(
        &self,
        package_name: &str,
    ) -> Result<Vec<ReleaseRecord>, RegistryError> {
        let coordinate = Coordinate::parse(package_name)
            .ok_or_else(|| RegistryError::InvalidPackageName(package_name.to_string()))?;
        let url = format!("{}/maven-metadata.xml", self.artifact_url(&coordinate));

        let response =
            get_checked(&self.client, self.registry_type(), &url, package_name).await?;

        let body = response.text().await.map_err(|e| {
            warn!("Failed to read Maven metadata: {}", e);
            RegistryError::InvalidResponse(e.to_string())
        })?;

        let metadata: MavenMetadata = quick_xml::de::from_str(&body).map_err(|e| {
            warn!("Failed to parse Maven metadata: {}", e);
            RegistryError::InvalidResponse(e.to_string())
        })?;

        let versions = metadata
            .versioning
            .map(|v| v.versions.version)
            .unwrap_or_default();

        let dated: Vec<(String, Option<DateTime<Utc>>)> = stream::iter(versions)
            .map(|version| {
                let coordinate = &coordinate;
                async move {
                    let released_at = self.jar_last_modified(coordinate, &version).await;
                    (version, released_at)
                }
            })
            .buffered(MAX_CONCURRENT_HEAD_REQUESTS)
            .collect()
            .await;

        let releases: Vec<ReleaseRecord> = dated
            .into_iter()
            .filter_map(|(version, released_at)| {
                make_record(RegistryType::Maven, version, released_at, None)
            })
            .collect();

        debug!("Found {} releases for artifact {}", releases.len(), package_name);

        Ok(releases)
    }
}
