use anyhow::{Context, Result};
use std::path::Path;
use std::str::FromStr;

use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;

/// Routes `tracing` output to a daily log file under `dir`. The terminal
/// belongs to the UI, so nothing goes to stdout/stderr.
///
/// Keep the returned guard alive until exit or buffered lines are lost.
pub fn init(dir: &Path, level: &str) -> Result<WorkerGuard> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create log directory {:?}", dir))?;

    let level = parse_level(level);
    let appender = tracing_appender::rolling::daily(dir, "audion.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::fmt()
        .with_writer(writer)
        .with_ansi(false)
        .with_max_level(level)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to install log subscriber: {}", e))?;

    tracing::info!(level = %level, "logging initialized");
    Ok(guard)
}

/// Unknown names fall back to INFO.
pub fn parse_level(level: &str) -> Level {
    Level::from_str(level.trim()).unwrap_or(Level::INFO)
}
