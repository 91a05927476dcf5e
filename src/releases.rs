//! Release fetching coordinator
//!
//! Holds one [`Registry`] per enabled registry type, fetches packages
//! concurrently and returns their releases ordered by the version comparator.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use tokio::time::sleep;
use tracing::{debug, error, info};

use crate::config::ReleaserConfig;
use crate::version::error::{ConfigError, RegistryError};
use crate::version::registries::{
    CratesIoRegistry, MavenRegistry, NpmRegistry, NugetRegistry, PypiRegistry, RubyGemsRegistry,
    crates_io, http_client, maven, npm, nuget, pypi, rubygems,
};
use crate::version::registry::Registry;
use crate::version::types::{RegistryType, ReleaseRecord, sort_releases};

/// Outcome of fetching one package
pub type PackageReleases = (String, Result<Vec<ReleaseRecord>, RegistryError>);

pub struct ReleaseFetcher {
    registries: HashMap<RegistryType, Arc<dyn Registry>>,
    stagger_delay: Duration,
}

impl ReleaseFetcher {
    pub fn new(registries: Vec<Arc<dyn Registry>>, stagger_delay: Duration) -> Self {
        Self {
            registries: registries
                .into_iter()
                .map(|registry| (registry.registry_type(), registry))
                .collect(),
            stagger_delay,
        }
    }

    /// Build registries for every type enabled in `config`
    pub fn from_config(config: &ReleaserConfig) -> Result<Self, ConfigError> {
        let client = http_client(
            &config.fetch.user_agent,
            Duration::from_millis(config.fetch.timeout_ms.max(0) as u64),
        )?;

        let registries = RegistryType::ALL
            .into_iter()
            .filter(|t| config.registries.get(*t).enabled)
            .map(|t| {
                let base_url = config.registries.get(t).base_url.as_deref();
                build_registry(t, client.clone(), base_url)
            })
            .collect();

        Ok(Self::new(
            registries,
            Duration::from_millis(config.fetch.stagger_delay_ms),
        ))
    }

    pub fn registry(
        &self,
        registry_type: RegistryType,
    ) -> Result<&Arc<dyn Registry>, RegistryError> {
        self.registries
            .get(&registry_type)
            .ok_or(RegistryError::Disabled(registry_type))
    }

    /// Fetch one package and sort its releases from oldest to newest
    pub async fn fetch_sorted(
        &self,
        registry_type: RegistryType,
        package_name: &str,
    ) -> Result<Vec<ReleaseRecord>, RegistryError> {
        let registry = self.registry(registry_type)?;
        let mut releases = registry.fetch_releases(package_name).await?;
        sort_releases(&mut releases);

        info!(
            "Fetched {} releases for {}/{}",
            releases.len(),
            registry_type,
            package_name
        );

        Ok(releases)
    }

    /// Fetch several packages in parallel with staggered start times
    ///
    /// Results keep the order of `package_names`. A failure is logged and
    /// returned for its package without affecting the others.
    pub async fn fetch_many(
        &self,
        registry_type: RegistryType,
        package_names: &[String],
    ) -> Vec<PackageReleases> {
        let futures = package_names.iter().enumerate().map(|(i, package_name)| {
            let delay = stagger_offset(self.stagger_delay, i);
            async move {
                sleep(delay).await;
                debug!("Starting fetch for {}/{}", registry_type, package_name);

                let result = self
                    .fetch_sorted(registry_type, package_name)
                    .await
                    .inspect_err(|e| {
                        error!(
                            "Failed to fetch releases for {}/{}: {}",
                            registry_type, package_name, e
                        )
                    });
                (package_name.clone(), result)
            }
        });

        join_all(futures).await
    }
}

/// Start delay of the `index`-th fetch, saturating at `Duration::MAX`
fn stagger_offset(delay: Duration, index: usize) -> Duration {
    delay.saturating_mul(u32::try_from(index).unwrap_or(u32::MAX))
}

fn build_registry(
    registry_type: RegistryType,
    client: reqwest::Client,
    base_url: Option<&str>,
) -> Arc<dyn Registry> {
    match registry_type {
        RegistryType::CratesIo => Arc::new(CratesIoRegistry::with_client(
            client,
            base_url.unwrap_or(crates_io::DEFAULT_BASE_URL),
        )),
        RegistryType::Maven => Arc::new(MavenRegistry::with_client(
            client,
            base_url.unwrap_or(maven::DEFAULT_BASE_URL),
        )),
        RegistryType::Npm => Arc::new(NpmRegistry::with_client(
            client,
            base_url.unwrap_or(npm::DEFAULT_BASE_URL),
        )),
        RegistryType::NuGet => Arc::new(NugetRegistry::with_client(
            client,
            base_url.unwrap_or(nuget::DEFAULT_BASE_URL),
        )),
        RegistryType::PyPI => Arc::new(PypiRegistry::with_client(
            client,
            base_url.unwrap_or(pypi::DEFAULT_BASE_URL),
        )),
        RegistryType::RubyGems => Arc::new(RubyGemsRegistry::with_client(
            client,
            base_url.unwrap_or(rubygems::DEFAULT_BASE_URL),
        )),
    }
}
