//! File logging
//!
//! The terminal belongs to the UI, so events go to a plain-text log file.

use std::fs::{self, OpenOptions};
use std::path::Path;
use std::sync::Mutex;

use anyhow::Context;
use tracing::Level;

pub fn parse_level(value: &str) -> anyhow::Result<Level> {
    value
        .trim()
        .parse::<Level>()
        .map_err(|_| anyhow::anyhow!("unknown log level {value:?} (expected error, warn, info, debug or trace)"))
}

/// Install the global subscriber writing to `path`.
pub fn init(path: &Path, level: Level) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create log directory {}", parent.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("failed to open log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_ansi(false)
        .with_target(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .map_err(|err| anyhow::anyhow!("failed to install logger: {err}"))
}
