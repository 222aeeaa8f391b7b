//! Export Module
//!
//! Writes the current filtered list of a record page to disk.
//!
//! - `x` exports CSV: column labels as header, formatted cells as rows
//! - `X` exports JSON: the records themselves
//! - Files land in `<data_dir>/exports/<kind>-<timestamp>.<ext>`

mod csv_export;
mod json_export;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::Local;
use serde::Serialize;

use crate::core::ExportFormat;
use crate::domain::RecordKind;
use crate::listview::{Record, RecordListView};

pub use csv_export::write_view as write_csv;
pub use json_export::write_view as write_json;

/// A finished export
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exported {
    pub path: PathBuf,
    pub count: usize,
}

/// Generate a timestamped filename
fn generate_filename(prefix: &str, extension: &str) -> String {
    let timestamp = Local::now().format("%Y-%m-%d-%H%M%S");
    format!("{prefix}-{timestamp}.{extension}")
}

/// First free path for `filename` in `dir`. Exports within the same second
/// get a `-2`, `-3`, ... suffix instead of replacing the earlier file.
fn unique_path(dir: &Path, filename: &str) -> PathBuf {
    let path = dir.join(filename);
    if !path.exists() {
        return path;
    }
    let (stem, extension) = filename.rsplit_once('.').unwrap_or((filename, ""));
    (2..)
        .map(|n| dir.join(format!("{stem}-{n}.{extension}")))
        .find(|candidate| !candidate.exists())
        .unwrap_or(path)
}

/// Export the rows currently visible in `view` into `dir`.
pub fn export_view<T: Record + Serialize>(
    dir: &Path,
    kind: RecordKind,
    format: ExportFormat,
    view: &RecordListView<T>,
) -> anyhow::Result<Exported> {
    if view.filtered_len() == 0 {
        anyhow::bail!("no {} to export", kind.slug());
    }
    fs::create_dir_all(dir)
        .with_context(|| format!("failed to create export directory {}", dir.display()))?;

    let path = unique_path(dir, &generate_filename(kind.slug(), format.extension()));
    let count = match format {
        ExportFormat::Csv => write_csv(&path, view),
        ExportFormat::Json => write_json(&path, view),
    }
    .with_context(|| format!("failed to write {}", path.display()))?;

    tracing::info!(?kind, path = %path.display(), count, "exported records");
    Ok(Exported { path, count })
}
