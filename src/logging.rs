//! Tracing subscriber setup for the `shelfnote` binary.
//!
//! Filter priority (highest to lowest):
//!
//! 1. `SHELFNOTE_LOG` env var (per-target directives, e.g. `shelfnote=debug`)
//! 2. `RUST_LOG` env var
//! 3. `--verbose` flag (debug) or the default (warn)
//!
//! Logs go to stderr, except while the TUI owns the terminal: then they are
//! appended to `shelfnote.log` in the data directory.

use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;

use crate::config::Config;
use crate::error::Result;

pub const LOG_ENV: &str = "SHELFNOTE_LOG";

/// Where log lines are written
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    Stderr,
    File(PathBuf),
}

impl LogTarget {
    /// Log file used while the TUI is running
    pub fn tui_log_file() -> Result<Self> {
        Ok(LogTarget::File(Config::data_dir()?.join("shelfnote.log")))
    }
}

/// Build the filter from `SHELFNOTE_LOG`, then `RUST_LOG`, then the flag
pub fn build_env_filter(verbose: bool) -> EnvFilter {
    if let Ok(directives) = std::env::var(LOG_ENV)
        && let Ok(filter) = EnvFilter::try_new(&directives)
    {
        return filter;
    }

    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return filter;
    }

    EnvFilter::new(if verbose { "shelfnote=debug,warn" } else { "warn" })
}

/// Install the global subscriber. A second call is a no-op.
pub fn init(target: LogTarget, verbose: bool) -> Result<()> {
    let filter = build_env_filter(verbose);

    let installed = match target {
        LogTarget::Stderr => fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .without_time()
            .compact()
            .try_init(),
        LogTarget::File(path) => {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            let file = OpenOptions::new().create(true).append(true).open(&path)?;
            fmt()
                .with_env_filter(filter)
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .try_init()
        }
    };

    if installed.is_err() {
        tracing::debug!("Tracing subscriber already installed");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear_env() {
        unsafe {
            std::env::remove_var(LOG_ENV);
            std::env::remove_var("RUST_LOG");
        }
    }

    #[test]
    #[serial]
    fn test_filter_defaults_to_warn() {
        clear_env();
        assert_eq!(build_env_filter(false).to_string(), "warn");
    }

    #[test]
    #[serial]
    fn test_verbose_enables_crate_debug() {
        clear_env();
        let filter = build_env_filter(true).to_string();
        assert!(filter.contains("shelfnote=debug"));
    }

    #[test]
    #[serial]
    fn test_project_env_wins() {
        clear_env();
        unsafe {
            std::env::set_var(LOG_ENV, "shelfnote=trace");
            std::env::set_var("RUST_LOG", "error");
        }
        let filter = build_env_filter(false).to_string();
        clear_env();
        assert_eq!(filter, "shelfnote=trace");
    }

    #[test]
    #[serial]
    fn test_invalid_project_env_falls_through() {
        clear_env();
        unsafe {
            std::env::set_var(LOG_ENV, "shelfnote=notalevel");
            std::env::set_var("RUST_LOG", "error");
        }
        let filter = build_env_filter(false).to_string();
        clear_env();
        assert_eq!(filter, "error");
    }
}
