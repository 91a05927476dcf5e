//! Version string comparator
//!
//! Orders arbitrary version identifiers without assuming any versioning
//! scheme. Each version becomes a [`VersionKey`]: the classified fragments
//! followed by the character length of the original string. Two keys are
//! compared component by component, padding the shorter one with zeros, and
//! the length decides only when every padded component is equal. Padding to
//! the longer of the pair is the same as padding with zeros indefinitely, so
//! keys can be built once per version and compared with `Ord`.

use std::cmp::Ordering;

use crate::version::classifier::{ComponentKey, Natural, classify};
use crate::version::tokenizer::tokenize;

/// Derived sort key of one version string
///
/// Equality follows `Ord`: "1.0" and "1.." have different fragments but
/// the same padded key and length, so they are equal.
#[derive(Debug, Clone)]
pub struct VersionKey {
    components: Vec<ComponentKey>,
    length: Natural,
}

impl VersionKey {
    pub fn new(version: &str) -> Self {
        Self {
            components: tokenize(version).iter().map(classify).collect(),
            length: Natural::from(version.chars().count() as u64),
        }
    }
}

impl Ord for VersionKey {
    fn cmp(&self, other: &Self) -> Ordering {
        let width = self.components.len().max(other.components.len());
        let zero = ComponentKey::zero();

        (0..width)
            .map(|i| {
                let a = self.components.get(i).unwrap_or(&zero);
                let b = other.components.get(i).unwrap_or(&zero);
                a.cmp(b)
            })
            .find(|ordering| ordering.is_ne())
            .unwrap_or_else(|| self.length.cmp(&other.length))
    }
}

impl PartialEq for VersionKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other).is_eq()
    }
}

impl Eq for VersionKey {}

impl PartialOrd for VersionKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Apply `relation` to the sort keys of `a` and `b`
///
/// ```
/// use releaser::version::compare::compare_by;
///
/// assert!(compare_by("1.9.0", "1.10.0", |a, b| a < b));
/// assert!(compare_by("2.0.0", "2.0.0-rc1", |a, b| a >= b));
/// ```
pub fn compare_by<F>(a: &str, b: &str, relation: F) -> bool
where
    F: FnOnce(&VersionKey, &VersionKey) -> bool,
{
    relation(&VersionKey::new(a), &VersionKey::new(b))
}

/// Strictly-less-than, the default relation
pub fn version_lt(a: &str, b: &str) -> bool {
    compare_by(a, b, |a, b| a < b)
}

/// Total order over version strings
pub fn compare_versions(a: &str, b: &str) -> Ordering {
    VersionKey::new(a).cmp(&VersionKey::new(b))
}

/// Sort version strings ascending, oldest first
pub fn sort_versions<S: AsRef<str>>(versions: &mut [S]) {
    versions.sort_by_cached_key(|v| VersionKey::new(v.as_ref()));
}
