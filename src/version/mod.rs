//! Version ordering and release retrieval
//!
//! This module provides the version comparator and the registry adapters
//! that produce [`types::ReleaseRecord`] values to be ordered by it.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │  Tokenizer  │────▶│ Classifier  │────▶│  Comparator │
//! │ (fragments) │     │ (sort keys) │     │ (VersionKey)│
//! └─────────────┘     └─────────────┘     └─────────────┘
//!                                                ▲
//! ┌─────────────┐     ┌─────────────┐            │
//! │  Registries │────▶│ReleaseRecord│────────────┘
//! │(npm, pypi..)│     │  (sorting)  │
//! └─────────────┘     └─────────────┘
//! ```
//!
//! # Modules
//!
//! - [`tokenizer`]: splits version strings into fragments
//! - [`classifier`]: maps fragments to totally ordered keys
//! - [`compare`]: version comparator built on the two above
//! - [`types`]: `ReleaseRecord` and `RegistryType`
//! - [`timestamp`]: release date parsing and humanized rendering
//! - [`registry`]: Registry trait for fetching releases from remote sources
//! - [`registries`]: Concrete registry implementations (npm, crates.io, etc.)
//! - [`error`]: Error types for registry, record and config operations

pub mod classifier;
pub mod compare;
pub mod error;
pub mod registries;
pub mod registry;
pub mod timestamp;
pub mod tokenizer;
pub mod types;
