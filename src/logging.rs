use anyhow::{Context, Result};
use log::LevelFilter;
use simplelog::{Config, WriteLogger};
use std::fs::OpenOptions;
use std::path::Path;

/// Send log records to an append-only file. The TUI owns the terminal,
/// so nothing is logged to stdout/stderr.
pub fn init_file_logger(path: &Path, level: LevelFilter) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file: {}", path.display()))?;

    WriteLogger::init(level, Config::default(), file).context("Logger already initialised")?;
    Ok(())
}
