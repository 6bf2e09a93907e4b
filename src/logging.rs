//! File logging for the terminal binary.
//!
//! The terminal belongs to the renderer, so log lines only go to a file, and
//! only when a path is configured.

use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result};
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};

/// Install a file logger at `level`. Returns `false` when `path` is `None`.
pub fn init(path: Option<&Path>, level: LevelFilter) -> Result<bool> {
    let Some(path) = path else {
        return Ok(false);
    };
    let file = File::create(path)
        .with_context(|| format!("cannot create log file {}", path.display()))?;
    WriteLogger::init(
        level,
        ConfigBuilder::new()
            .set_target_level(LevelFilter::Error)
            .set_thread_level(LevelFilter::Off)
            .build(),
        file,
    )
    .context("logger already installed")?;
    log::info!("Logging to {} at {}", path.display(), level);
    Ok(true)
}
