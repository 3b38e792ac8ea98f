//! Logging configuration using tracing
//!
//! The TUI owns the terminal, so it logs to `~/.encyclo/logs/encyclo.log`.
//! Headless runs log to stderr, leaving stdout for the article.
//!
//! The level is controlled by the `ENCYCLO_LOG` environment variable:
//!
//! ```bash
//! ENCYCLO_LOG=debug encyclo --topic "Photosynthesis"
//! ENCYCLO_LOG=encyclo::dispatch=trace encyclo --headless --topic Rust
//! ```

use std::path::PathBuf;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::error::{classify_io_error, EncycloResult, SystemError};

pub const LOG_ENV: &str = "ENCYCLO_LOG";
pub const DEFAULT_DIRECTIVE: &str = "encyclo=info,warn";
pub const LOG_FILE_NAME: &str = "encyclo.log";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTarget {
    File,
    Stderr,
}

/// Install the global subscriber. Returns the log file path when logging to
/// a file.
pub fn init(target: LogTarget) -> EncycloResult<Option<PathBuf>> {
    let filter = env_filter();

    match target {
        LogTarget::File => {
            let log_dir = log_directory()?;
            std::fs::create_dir_all(&log_dir).map_err(|e| SystemError::DirectoryCreationFailed {
                path: log_dir.clone(),
                message: e.to_string(),
            })?;
            let path = log_dir.join(LOG_FILE_NAME);
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)
                .map_err(|e| classify_io_error(e, Some(path.clone()), "open log file"))?;

            tracing_subscriber::registry()
                .with(filter)
                .with(
                    fmt::layer()
                        .with_writer(std::sync::Mutex::new(file))
                        .with_ansi(false)
                        .with_target(true)
                        .with_line_number(true),
                )
                .try_init()
                .map_err(|e| SystemError::Terminal {
                    message: e.to_string(),
                })?;

            tracing::info!("encyclo {} starting", env!("CARGO_PKG_VERSION"));
            tracing::info!("Log file: {}", path.display());
            Ok(Some(path))
        }
        LogTarget::Stderr => {
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
                .try_init()
                .map_err(|e| SystemError::Terminal {
                    message: e.to_string(),
                })?;
            Ok(None)
        }
    }
}

/// `ENCYCLO_LOG` if set and valid, otherwise [`DEFAULT_DIRECTIVE`].
pub fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE))
}

/// `~/.encyclo/logs`
pub fn log_directory() -> Result<PathBuf, SystemError> {
    let home = dirs::home_dir().ok_or(SystemError::NoHomeDirectory)?;
    Ok(home.join(".encyclo").join("logs"))
}
