//! Release metadata fetcher with a scheme-agnostic version comparator
//!
//! - [`version`]: version comparator, release records and registry adapters
//! - [`releases`]: fetches and sorts releases across configured registries
//! - [`config`]: configuration file and paths
//! - [`cli`]: command-line interface
//! - [`logging`]: tracing subscriber setup

pub mod cli;
pub mod config;
pub mod logging;
pub mod releases;
pub mod version;
