//! Tracing subscriber setup for the CLI

use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Map `-v` occurrences to a default filter directive
pub fn verbosity_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "releaser=info",
        2 => "releaser=debug",
        _ => "releaser=trace",
    }
}

/// Install the global subscriber
///
/// Logs go to stderr so stdout stays machine-readable. `RUST_LOG` overrides
/// the verbosity flag. With `log_file`, events are also appended to that file
/// through a non-blocking writer; keep the returned guard alive until exit so
/// buffered lines are flushed.
pub fn init(
    verbosity: u8,
    json: bool,
    log_file: Option<&Path>,
) -> anyhow::Result<Option<WorkerGuard>> {
    let filter = || {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(verbosity_directive(verbosity)))
    };

    let mut layers = Vec::new();
    if json {
        layers.push(
            fmt::layer()
                .json()
                .with_writer(std::io::stderr)
                .with_filter(filter())
                .boxed(),
        );
    } else {
        layers.push(
            fmt::layer()
                .compact()
                .with_writer(std::io::stderr)
                .with_filter(filter())
                .boxed(),
        );
    }

    let mut guard = None;
    if let Some(path) = log_file {
        let dir = path.parent().unwrap_or_else(|| Path::new("."));
        std::fs::create_dir_all(dir)?;
        let file_name = path
            .file_name()
            .map(|name| name.to_os_string())
            .unwrap_or_else(|| "releaser.log".into());

        let appender = tracing_appender::rolling::never(dir, file_name);
        let (writer, worker_guard) = tracing_appender::non_blocking(appender);
        layers.push(
            fmt::layer()
                .with_ansi(false)
                .with_writer(writer)
                .with_filter(filter())
                .boxed(),
        );
        guard = Some(worker_guard);
    }

    tracing_subscriber::registry().with(layers).try_init()?;

    Ok(guard)
}
