//! Debug logging to a file.
//!
//! The terminal belongs to the TUI, so nothing is ever written to stdout or
//! stderr. Logging is enabled only when a log file is given (`GUT_LOG` or
//! `--log-file`); the level can be narrowed with `RUST_LOG` and defaults to
//! `debug`.

use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Installs a subscriber writing to `log_file`. With `None` no subscriber is
/// installed and all tracing calls stay silent.
pub fn init(log_file: Option<&Path>) -> Result<()> {
    let Some(path) = log_file else {
        return Ok(());
    };

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("cannot open log file {}", path.display()))?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .with_target(false),
        )
        .try_init()
        .context("cannot install log subscriber")?;

    tracing::debug!(log_file = %path.display(), "logging started");
    Ok(())
}
