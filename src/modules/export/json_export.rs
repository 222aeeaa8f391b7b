//! JSON Export
//!
//! Serializes the filtered records with their raw field values.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::Serialize;

use crate::listview::{Record, RecordListView};

pub fn write_view<T: Record + Serialize>(
    path: &Path,
    view: &RecordListView<T>,
) -> anyhow::Result<usize> {
    let records: Vec<&T> = view.visible().collect();
    let mut out = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut out, &records)?;
    out.write_all(b"\n")?;
    out.flush()?;
    Ok(records.len())
}
