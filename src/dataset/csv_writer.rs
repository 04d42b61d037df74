//! CSV writer for the finished dataset.
//!
//! The table is written to a temporary file next to the destination and
//! renamed into place once complete, so a failed run leaves no file behind.

use std::io::{BufWriter, Write};
use std::path::Path;
use tempfile::NamedTempFile;

use super::builder::Dataset;
use crate::error::Result;
use crate::stats::{column_names, MatchFeatureRow};

/// CSV header row, no index column.
pub fn header_line() -> String {
    column_names().join(",")
}

/// Formats one row in column order.
pub fn format_row(row: &MatchFeatureRow) -> String {
    row.values()
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

/// Writes header and all rows to `path`, replacing any existing file.
pub fn write_csv(path: &Path, dataset: &Dataset) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let temp = NamedTempFile::new_in(dir)?;
    {
        let mut writer = BufWriter::new(temp.as_file());
        writeln!(writer, "{}", header_line())?;
        for row in dataset.rows() {
            writeln!(writer, "{}", format_row(row))?;
        }
        writer.flush()?;
    }
    temp.persist(path).map_err(|e| e.error)?;
    Ok(())
}
