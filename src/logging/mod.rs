//! Diagnostic logging to disk.
//!
//! The terminal belongs to the UI, so `tracing` output goes to a daily log
//! file named `bridgepay_<date>.log` in the configured log directory
//! (default: `~/.local/share/bridgepay/logs/`).

use crate::config::LoggingConfig;
use anyhow::{anyhow, Context, Result};
use chrono::NaiveDate;
use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;
use tracing::Level;

/// Path of the log file for `date`.
pub fn log_file_path(config: &LoggingConfig, date: NaiveDate) -> PathBuf {
    let log_dir = if let Ok(rest) = config.log_dir.strip_prefix("~") {
        match dirs::home_dir() {
            Some(home) => home.join(rest),
            None => config.log_dir.clone(),
        }
    } else {
        config.log_dir.clone()
    };
    log_dir.join(format!("bridgepay_{}.log", date.format("%Y-%m-%d")))
}

/// Unknown level names fall back to `info`.
pub fn parse_level(level: &str) -> Level {
    level.trim().parse().unwrap_or(Level::INFO)
}

/// Install the global subscriber. No-op when logging is disabled.
pub fn init(config: &LoggingConfig) -> Result<()> {
    if !config.enabled {
        return Ok(());
    }

    let path = log_file_path(config, chrono::Local::now().date_naive());
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create log directory {}", parent.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .with_max_level(parse_level(&config.level))
        .try_init()
        .map_err(|e| anyhow!("Failed to install log subscriber: {}", e))?;

    tracing::info!(path = %path.display(), "logging started");
    Ok(())
}
