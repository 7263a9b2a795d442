//! Logging initialization.
//!
//! Configures the `tracing` subscriber with level filtering via the
//! `CDASH_LOG` environment variable, falling back to the configured level.
//!
//! ```bash
//! CDASH_LOG=debug cdash add chart
//! CDASH_LOG=canvas_dashboard::interaction=trace,info cdash tui
//! ```

use std::fs::{File, OpenOptions};
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::{fmt, EnvFilter};

use crate::config::xdg;
use crate::config::LogLevel;

/// Environment variable holding filter directives.
pub const LOG_ENV: &str = "CDASH_LOG";

/// Filter from `CDASH_LOG`, or `level` when the variable is unset or invalid.
pub fn env_filter(level: LogLevel) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(level.as_directive()))
}

/// Initialize the global subscriber.
///
/// Logs go to `file` (appending, parent directories created) when given,
/// otherwise to stderr. Calling this more than once is a no-op.
pub fn init(level: LogLevel, file: Option<&Path>) -> std::io::Result<()> {
    let builder = fmt().with_env_filter(env_filter(level)).with_target(false);
    let result = match file {
        Some(path) => {
            let writer = open_log_file(path)?;
            builder.with_ansi(false).with_writer(Mutex::new(writer)).try_init()
        }
        None => builder.with_writer(std::io::stderr).try_init(),
    };
    if result.is_err() {
        tracing::debug!("global subscriber already set");
    }
    Ok(())
}

fn open_log_file(path: &Path) -> std::io::Result<File> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        xdg::ensure_dir(parent)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}
