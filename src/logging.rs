//! Tracing subscriber setup
//!
//! Filter comes from `LOTSIZE_LOG` (e.g. `LOTSIZE_LOG=debug`), default `warn`.
//! The interactive drawer owns the terminal, so it logs to
//! `~/.lotsize/lotsize.log`; other commands log to stderr.

use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;

use directories::BaseDirs;
use tracing_subscriber::EnvFilter;

use crate::types::{LotsizeError, Result};

/// Environment variable holding the log filter
pub const LOG_ENV: &str = "LOTSIZE_LOG";

/// Where log lines go
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    Stderr,
    File(PathBuf),
}

impl LogTarget {
    /// `~/.lotsize/lotsize.log`
    pub fn default_file() -> Result<Self> {
        let base_dirs = BaseDirs::new()
            .ok_or_else(|| LotsizeError::Config("Cannot determine home directory".into()))?;
        Ok(Self::File(
            base_dirs.home_dir().join(".lotsize").join("lotsize.log"),
        ))
    }
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"))
}

/// Install the global subscriber. Calling it twice keeps the first one.
pub fn init(target: LogTarget) -> Result<()> {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_target(false);

    // try_init fails only when a subscriber is already set
    match target {
        LogTarget::Stderr => {
            let _ = builder.with_writer(std::io::stderr).try_init();
        }
        LogTarget::File(path) => {
            if let Some(dir) = path.parent() {
                fs::create_dir_all(dir)?;
            }
            let file = OpenOptions::new().create(true).append(true).open(&path)?;
            let _ = builder
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init();
        }
    }
    Ok(())
}
