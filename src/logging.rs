//! Tracing subscriber setup
//!
//! The terminal belongs to the UI, so log lines go to a file.

use anyhow::{Context, Result};
use std::fs::{self, OpenOptions};
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::{fmt::time::ChronoLocal, EnvFilter};

use crate::config::LOG_FILTER_ENV_VAR;

/// Filter used when the environment does not provide one
pub fn default_directives(verbose: bool) -> String {
    let level = if verbose { "debug" } else { "info" };
    format!("{}={level},reqwest=warn,hyper=warn,rustls=warn", env!("CARGO_PKG_NAME"))
}

fn build_filter(verbose: bool) -> Result<EnvFilter> {
    match std::env::var(LOG_FILTER_ENV_VAR) {
        Ok(directives) if !directives.trim().is_empty() => EnvFilter::try_new(directives)
            .with_context(|| format!("invalid {LOG_FILTER_ENV_VAR} directives")),
        _ => EnvFilter::try_new(default_directives(verbose)).context("invalid default directives"),
    }
}

/// Install the global subscriber, appending to `log_path`
pub fn init_tracing_subscriber(log_path: &Path, verbose: bool) -> Result<()> {
    if let Some(parent) = log_path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create log directory {}", parent.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path)
        .with_context(|| format!("failed to open log file {}", log_path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(build_filter(verbose)?)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_timer(ChronoLocal::rfc_3339())
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to install tracing subscriber: {e}"))?;

    tracing::info!("Logging to {}", log_path.display());
    Ok(())
}
