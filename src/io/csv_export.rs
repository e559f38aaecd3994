use crate::error::IoError;
use crate::model::Record;
use std::path::Path;

/// Export records to a semicolon-delimited CSV file matching the import format.
///
/// Columns: Timestamp ; Note. Timestamps are written as `YYYY-MM-DD HH:MM:SS`.
/// Returns the number of records written.
pub fn export_csv<'a>(
    records: impl IntoIterator<Item = &'a Record>,
    path: &Path,
) -> Result<usize, IoError> {
    let mut wtr = csv::WriterBuilder::new().delimiter(b';').from_path(path)?;
    let count = write_records(&mut wtr, records)?;
    wtr.flush().map_err(|source| IoError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::info!(path = ?path, count, "CSV exported");
    Ok(count)
}

fn write_records<'a, W: std::io::Write>(
    wtr: &mut csv::Writer<W>,
    records: impl IntoIterator<Item = &'a Record>,
) -> Result<usize, IoError> {
    wtr.write_record(["Timestamp", "Note"])?;
    let mut count = 0;
    for record in records {
        wtr.write_record([
            record.timestamp.format("%Y-%m-%d %H:%M:%S").to_string().as_str(),
            record.note.as_str(),
        ])?;
        count += 1;
    }
    Ok(count)
}
