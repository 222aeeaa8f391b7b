//! CSV Export
//!
//! Rows hold the same formatted values the table shows.

use std::path::Path;

use crate::listview::{Record, RecordListView};

pub fn write_view<T: Record>(path: &Path, view: &RecordListView<T>) -> anyhow::Result<usize> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record(view.columns().iter().map(|column| column.label()))?;

    let mut count = 0;
    for record in view.visible() {
        wtr.write_record(view.cells(record).into_iter().map(|cell| cell.text))?;
        count += 1;
    }

    wtr.flush()?;
    Ok(count)
}
