//! Registry trait for fetching release metadata from various sources

#[cfg(test)]
use mockall::automock;

use crate::version::error::RegistryError;
use crate::version::types::{RegistryType, ReleaseRecord};

/// Trait for fetching package releases from a registry
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait Registry: Send + Sync {
    /// Returns the type of registry this implementation handles
    fn registry_type(&self) -> RegistryType;

    /// Fetches every release of a package
    ///
    /// # Arguments
    /// * `package_name` - The package identifier as the registry names it
    ///   (e.g., "serde", "@types/node", "org.slf4j:slf4j-api")
    ///
    /// # Returns
    /// * `Ok(Vec<ReleaseRecord>)` - Releases in the order the registry lists them
    /// * `Err(RegistryError)` - If the fetch fails
    async fn fetch_releases(
        &self,
        package_name: &str,
    ) -> Result<Vec<ReleaseRecord>, RegistryError>;
}
