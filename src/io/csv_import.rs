use std::path::Path;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::error::IoError;
use crate::model::Record;

const DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%d/%m/%Y %H:%M",
    "%d.%m.%Y %H:%M",
];

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d", "%d/%m/%Y", "%m/%d/%Y", "%d-%m-%Y", "%d.%m.%Y", "%Y/%m/%d", "%m-%d-%Y",
];

/// Try parsing a timestamp with several common formats. Date-only values land
/// on midnight.
fn parse_timestamp(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    for fmt in DATE_TIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }
    for fmt in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Some(d.and_time(NaiveTime::MIN));
        }
    }
    None
}

fn parse_time(s: &str) -> Option<NaiveTime> {
    let s = s.trim();
    NaiveTime::parse_from_str(s, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M"))
        .ok()
}

/// Detect delimiter by checking the first line for common separators.
fn detect_delimiter(first_line: &str) -> u8 {
    let semicolons = first_line.matches(';').count();
    let commas = first_line.matches(',').count();
    let tabs = first_line.matches('\t').count();

    if semicolons >= commas && semicolons >= tabs {
        b';'
    } else if tabs >= commas {
        b'\t'
    } else {
        b','
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Column {
    Timestamp,
    Time,
    Note,
}

fn header_to_column(header: &str) -> Option<Column> {
    let normalized = header.trim().to_lowercase().replace([' ', '-', '_'], "");
    match normalized.as_str() {
        "timestamp" | "date" | "datetime" | "day" | "when" | "created" | "createdat" => {
            Some(Column::Timestamp)
        }
        "time" | "hour" => Some(Column::Time),
        "note" | "notes" | "description" | "comment" | "label" | "title" | "name" => {
            Some(Column::Note)
        }
        _ => None,
    }
}

/// Import records from a CSV file. Returns `(records, skipped_rows)`.
pub fn import_csv(path: &Path) -> Result<(Vec<Record>, usize), IoError> {
    let content = std::fs::read_to_string(path).map_err(|source| IoError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let (records, skipped) = parse_csv(&content)?;
    tracing::info!(path = ?path, imported = records.len(), skipped, "CSV imported");
    Ok((records, skipped))
}

/// Parse CSV text. The delimiter is auto-detected and headers are matched
/// loosely ("Date", "Created At", "Notes", ...).
pub fn parse_csv(content: &str) -> Result<(Vec<Record>, usize), IoError> {
    let first_line = content.lines().next().unwrap_or("");
    let delimiter = detect_delimiter(first_line);

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());

    let headers = reader.headers()?.clone();
    let columns: Vec<Option<Column>> = headers.iter().map(header_to_column).collect();
    if !columns.contains(&Some(Column::Timestamp)) {
        return Err(IoError::MissingColumns {
            found: headers.iter().map(str::to_string).collect(),
        });
    }

    let mut records = Vec::new();
    let mut skipped = 0usize;

    for (i, row) in reader.records().enumerate() {
        let row = match row {
            Ok(r) => r,
            Err(e) => {
                tracing::warn!(row = i + 2, error = %e, "skipping unreadable CSV row");
                skipped += 1;
                continue;
            }
        };

        let mut timestamp = None;
        let mut time = None;
        let mut note = String::new();
        for (field, column) in row.iter().zip(columns.iter()) {
            match column {
                Some(Column::Timestamp) => timestamp = parse_timestamp(field),
                Some(Column::Time) => time = parse_time(field),
                Some(Column::Note) => note = field.to_string(),
                None => {}
            }
        }

        let Some(mut timestamp) = timestamp else {
            tracing::warn!(row = i + 2, "skipping CSV row without a valid date");
            skipped += 1;
            continue;
        };
        if let Some(time) = time {
            timestamp = timestamp.date().and_time(time);
        }
        records.push(Record::new(timestamp, note));
    }

    Ok((records, skipped))
}
