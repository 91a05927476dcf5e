//! Common types shared by the comparator, registries and CLI

use std::cmp::Ordering;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::version::compare::{VersionKey, compare_versions, version_lt};
use crate::version::error::RecordError;
use crate::version::timestamp::humanize;

/// Type of package registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegistryType {
    /// crates.io (Rust)
    CratesIo,
    /// Maven Central (Java)
    Maven,
    /// npm registry (JavaScript)
    Npm,
    /// NuGet (.NET)
    NuGet,
    /// PyPI (Python)
    PyPI,
    /// RubyGems (Ruby)
    RubyGems,
}

impl RegistryType {
    pub const ALL: [RegistryType; 6] = [
        RegistryType::CratesIo,
        RegistryType::Maven,
        RegistryType::Npm,
        RegistryType::NuGet,
        RegistryType::PyPI,
        RegistryType::RubyGems,
    ];

    /// Returns the string representation of the registry type
    pub fn as_str(&self) -> &'static str {
        match self {
            RegistryType::CratesIo => "crates_io",
            RegistryType::Maven => "maven",
            RegistryType::Npm => "npm",
            RegistryType::NuGet => "nuget",
            RegistryType::PyPI => "pypi",
            RegistryType::RubyGems => "rubygems",
        }
    }
}

impl std::str::FromStr for RegistryType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "crates_io" | "crates" | "cargo" => Ok(RegistryType::CratesIo),
            "maven" => Ok(RegistryType::Maven),
            "npm" => Ok(RegistryType::Npm),
            "nuget" => Ok(RegistryType::NuGet),
            "pypi" => Ok(RegistryType::PyPI),
            "rubygems" | "gem" => Ok(RegistryType::RubyGems),
            _ => Err(()),
        }
    }
}

impl fmt::Display for RegistryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Release information for one version of a package
///
/// Records order by `version` only, through the version comparator. They do
/// not implement `PartialEq`/`PartialOrd`: two records whose versions compare
/// equal may still differ in date or commit.
#[derive(Debug, Clone, Serialize)]
pub struct ReleaseRecord {
    version: String,
    released_at: Option<DateTime<Utc>>,
    commit: Option<String>,
}

impl ReleaseRecord {
    pub fn new(
        version: impl Into<String>,
        released_at: Option<DateTime<Utc>>,
        commit: Option<String>,
    ) -> Result<Self, RecordError> {
        let version = version.into();
        if version.is_empty() {
            return Err(RecordError::EmptyVersion);
        }
        Ok(Self {
            version,
            released_at,
            commit,
        })
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn released_at(&self) -> Option<DateTime<Utc>> {
        self.released_at
    }

    pub fn commit(&self) -> Option<&str> {
        self.commit.as_deref()
    }

    /// Strict less-than on versions
    pub fn is_older_than(&self, other: &ReleaseRecord) -> bool {
        version_lt(&self.version, &other.version)
    }

    pub fn cmp_version(&self, other: &ReleaseRecord) -> Ordering {
        compare_versions(&self.version, &other.version)
    }

    pub fn version_key(&self) -> VersionKey {
        VersionKey::new(&self.version)
    }

    /// Relative release date ("3 days ago"), or "unknown"
    pub fn humanized_release(&self, now: DateTime<Utc>) -> String {
        self.released_at
            .map(|at| humanize(at, now))
            .unwrap_or_else(|| "unknown".to_string())
    }
}

impl fmt::Display for ReleaseRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (released {}",
            self.version,
            self.humanized_release(Utc::now())
        )?;
        if let Some(commit) = &self.commit {
            write!(f, ", commit {commit}")?;
        }
        f.write_str(")")
    }
}

/// Sort releases from oldest to newest version. Stable for equal keys.
pub fn sort_releases(releases: &mut [ReleaseRecord]) {
    releases.sort_by_cached_key(ReleaseRecord::version_key);
}

/// Release with the highest version
pub fn latest_release(releases: &[ReleaseRecord]) -> Option<&ReleaseRecord> {
    releases.iter().max_by(|a, b| a.cmp_version(b))
}
