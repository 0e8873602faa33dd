//! Run log for urlfix
//!
//! When logging is enabled in the settings, tracing events are written to
//! ~/.urlfix/urlfix.log. Console output is not affected.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, prelude::*, registry, EnvFilter};

use crate::config::LoggingSettings;

const LOG_FILE_NAME: &str = "urlfix.log";

/// Initialize the run log
///
/// Returns the path to the log file, or None if logging is disabled or the
/// log file could not be opened.
pub fn init_run_logging(settings: &LoggingSettings) -> Result<Option<PathBuf>> {
    if !settings.enabled {
        return Ok(None);
    }

    let filter = EnvFilter::try_new(&settings.filter)
        .with_context(|| format!("Invalid log filter: {}", settings.filter))?;

    let Some((log_dir, appender)) = open_log(get_log_dir()) else {
        return Ok(None);
    };

    let subscriber = registry()
        .with(
            fmt::layer()
                .with_writer(appender)
                .with_ansi(false)
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false),
        )
        .with(filter);

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow::anyhow!("Failed to set tracing subscriber: {}", e))?;

    Ok(Some(log_dir.join(LOG_FILE_NAME)))
}

/// Open the appender in `log_dir`, or warn and return None.
///
/// A missing log must not stop the rewrite, so neither an unknown home
/// directory nor an unwritable log location is an error here.
fn open_log(log_dir: Result<PathBuf>) -> Option<(PathBuf, RollingFileAppender)> {
    match log_dir.and_then(|dir| open_appender(&dir).map(|appender| (dir, appender))) {
        Ok(opened) => Some(opened),
        Err(e) => {
            eprintln!("Warning: Could not create log file: {:#}", e);
            None
        }
    }
}

fn open_appender(log_dir: &Path) -> Result<RollingFileAppender> {
    fs::create_dir_all(log_dir)
        .with_context(|| format!("Failed to create log directory: {}", log_dir.display()))?;

    RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(LOG_FILE_NAME)
        .build(log_dir)
        .with_context(|| format!("Failed to open log file in {}", log_dir.display()))
}

/// Directory holding the run log: ~/.urlfix
pub fn get_log_dir() -> Result<PathBuf> {
    let home_dir = dirs::home_dir()
        .ok_or_else(|| anyhow::anyhow!("Cannot determine home directory"))?;
    Ok(home_dir.join(".urlfix"))
}
