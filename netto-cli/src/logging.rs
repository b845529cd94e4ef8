use std::{
    fs::File,
    io::{self, IsTerminal},
    path::Path,
    sync::Mutex,
};

use anyhow::{Context, Result};
use tracing::Subscriber;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Filter used when neither a level nor `RUST_LOG` is given. Logs go to
/// stderr and stay out of the way of command output on stdout.
const DEFAULT_FILTER: &str = "warn";

fn filter(level: Option<&str>) -> Result<EnvFilter> {
    match level {
        Some(level) => {
            EnvFilter::try_new(level).with_context(|| format!("invalid log level '{level}'"))
        }
        None => Ok(EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))),
    }
}

/// Builds the subscriber: stderr always, plus `log_file` when given.
///
/// `level` accepts a bare level ("error" .. "trace") or any EnvFilter
/// directive and takes precedence over `RUST_LOG`.
fn subscriber(
    level: Option<&str>,
    log_file: Option<&Path>,
) -> Result<impl Subscriber + Send + Sync + use<>> {
    let file = log_file
        .map(|path| {
            File::options()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("cannot open log file '{}'", path.display()))
        })
        .transpose()?;

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_ansi(io::stderr().is_terminal())
        .with_writer(io::stderr);

    let file_layer = file.map(|file| {
        tracing_subscriber::fmt::layer()
            .with_ansi(false)
            .with_writer(Mutex::new(file))
    });

    Ok(tracing_subscriber::registry()
        .with(filter(level)?)
        .with(stderr_layer)
        .with(file_layer))
}

/// Installs the global subscriber. Call once at startup.
pub fn init(
    level: Option<&str>,
    log_file: Option<&Path>,
) -> Result<()> {
    subscriber(level, log_file)?
        .try_init()
        .context("logging already initialized")
}
