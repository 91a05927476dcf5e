//! Registry test utilities

use std::collections::HashMap;

use async_trait::async_trait;

use releaser::version::error::RegistryError;
use releaser::version::registry::Registry;
use releaser::version::types::{RegistryType, ReleaseRecord};

/// In-memory registry serving fixed versions
pub struct StaticRegistry {
    registry_type: RegistryType,
    versions: HashMap<String, Vec<String>>,
}

impl StaticRegistry {
    pub fn new(registry_type: RegistryType) -> Self {
        Self {
            registry_type,
            versions: HashMap::new(),
        }
    }

    pub fn with_versions(mut self, package: &str, versions: Vec<&str>) -> Self {
        self.versions.insert(
            package.to_string(),
            versions.into_iter().map(|v| v.to_string()).collect(),
        );
        self
    }
}

#[async_trait]
impl Registry for StaticRegistry {
    fn registry_type(&self) -> RegistryType {
        self.registry_type
    }

    async fn fetch_releases(
        &self,
        package_name: &str,
    ) -> Result<Vec<ReleaseRecord>, RegistryError> {
        match self.versions.get(package_name) {
            Some(versions) => Ok(versions
                .iter()
                .map(|v| ReleaseRecord::new(v.as_str(), None, None).unwrap())
                .collect()),
            None => Err(RegistryError::NotFound(package_name.to_string())),
        }
    }
}
