//! Command-line interface

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, anyhow, bail};
use chrono::Utc;
use clap::{Parser, Subcommand};
use indexmap::IndexMap;
use tracing::debug;

use crate::config::{self, ReleaserConfig};
use crate::releases::{PackageReleases, ReleaseFetcher};
use crate::version::compare::{compare_versions, sort_versions};
use crate::version::types::{RegistryType, ReleaseRecord, latest_release};

#[derive(Parser)]
#[command(name = "releaser")]
#[command(version, about = "Fetch and order release metadata from package registries")]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbosity: u8,

    /// Output logs as JSON
    #[arg(long, global = true)]
    pub log_json: bool,

    /// Also write logs to the data directory
    #[arg(long, global = true)]
    pub log_file: bool,

    /// Config file [default: <config dir>/releaser/config.json]
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Fetch releases of one or more packages from a registry
    Fetch {
        /// crates_io, maven, npm, nuget, pypi or rubygems
        #[arg(value_name = "REGISTRY")]
        registry: String,

        /// Package names (Maven: group:artifact)
        #[arg(value_name = "PACKAGE", required = true)]
        packages: Vec<String>,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,

        /// List the newest version first
        #[arg(long)]
        newest_first: bool,

        /// Only print the highest version
        #[arg(long)]
        latest: bool,
    },

    /// Sort version strings (read from stdin, one per line, when none given)
    Sort {
        #[arg(value_name = "VERSION")]
        versions: Vec<String>,

        /// Highest version first
        #[arg(short, long)]
        reverse: bool,
    },

    /// Compare two version strings
    Compare {
        a: String,
        b: String,
    },
}

impl Cli {
    pub fn log_path(&self) -> Option<PathBuf> {
        self.log_file.then(config::log_path)
    }

    fn load_config(&self) -> anyhow::Result<ReleaserConfig> {
        let path = self.config.clone().unwrap_or_else(config::config_path);
        ReleaserConfig::load(&path).with_context(|| format!("loading {}", path.display()))
    }
}

/// Run the parsed command. Returns `false` if any package failed to fetch.
pub async fn run(cli: Cli) -> anyhow::Result<bool> {
    match &cli.command {
        Command::Fetch {
            registry,
            packages,
            json,
            newest_first,
            latest,
        } => {
            let registry_type: RegistryType = registry
                .parse()
                .map_err(|_| anyhow!("unknown registry: {registry}"))?;
            let config = cli.load_config()?;
            debug!("Using config: {:?}", config);

            let fetcher = ReleaseFetcher::from_config(&config)?;
            let results = fetcher.fetch_many(registry_type, packages).await;
            let options = FetchOutput {
                json: *json,
                newest_first: *newest_first,
                latest: *latest,
            };

            let mut stdout = io::stdout().lock();
            write_fetch_results(&mut stdout, results, &options)
        }
        Command::Sort { versions, reverse } => {
            let mut versions = if versions.is_empty() {
                read_versions(io::stdin().lock())?
            } else {
                versions.clone()
            };

            sort_versions(&mut versions);
            if *reverse {
                versions.reverse();
            }

            let mut stdout = io::stdout().lock();
            for version in versions {
                writeln!(stdout, "{version}")?;
            }
            Ok(true)
        }
        Command::Compare { a, b } => {
            println!("{}", describe_comparison(a, b));
            Ok(true)
        }
    }
}

pub struct FetchOutput {
    pub json: bool,
    pub newest_first: bool,
    pub latest: bool,
}

/// Print fetched releases. Returns `false` if any package failed.
pub fn write_fetch_results<W: Write>(
    out: &mut W,
    results: Vec<PackageReleases>,
    options: &FetchOutput,
) -> anyhow::Result<bool> {
    let mut all_ok = true;
    let mut fetched: IndexMap<String, Vec<ReleaseRecord>> = IndexMap::new();

    for (package, result) in results {
        match result {
            Ok(mut releases) => {
                if options.latest {
                    releases = latest_release(&releases).cloned().into_iter().collect();
                }
                if options.newest_first {
                    releases.reverse();
                }
                fetched.insert(package, releases);
            }
            Err(e) => {
                all_ok = false;
                eprintln!("{package}: {e}");
            }
        }
    }

    if options.json {
        serde_json::to_writer_pretty(&mut *out, &fetched)?;
        writeln!(out)?;
        return Ok(all_ok);
    }

    let now = Utc::now();
    let multiple = fetched.len() > 1;
    for (package, releases) in &fetched {
        if multiple {
            writeln!(out, "{package}:")?;
        }
        for release in releases {
            let released_at = release
                .released_at()
                .map(|at| at.to_rfc3339())
                .unwrap_or_else(|| "-".to_string());
            writeln!(
                out,
                "{}{}\t{}\t{}\t{}",
                if multiple { "  " } else { "" },
                release.version(),
                released_at,
                release.humanized_release(now),
                release.commit().unwrap_or("-"),
            )?;
        }
    }

    Ok(all_ok)
}

/// Non-empty trimmed lines
pub fn read_versions<R: BufRead>(reader: R) -> anyhow::Result<Vec<String>> {
    let mut versions = Vec::new();
    for line in reader.lines() {
        let line = line?;
        let line = line.trim();
        if !line.is_empty() {
            versions.push(line.to_string());
        }
    }
    if versions.is_empty() {
        bail!("no versions given");
    }
    Ok(versions)
}

pub fn describe_comparison(a: &str, b: &str) -> String {
    let symbol = match compare_versions(a, b) {
        std::cmp::Ordering::Less => "<",
        std::cmp::Ordering::Equal => "=",
        std::cmp::Ordering::Greater => ">",
    };
    format!("{a} {symbol} {b}")
}
