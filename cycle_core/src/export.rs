//! CSV export of the cycle history.

use crate::{CycleProfile, Result};
use chrono::NaiveDate;
use std::fs::File;
use std::path::Path;

/// A row in the CSV output
#[derive(Debug, serde::Serialize)]
struct CsvRow {
    start: String,
    end: Option<String>,
    period_days: Option<i64>,
    /// Days since the previous recorded start
    gap_days: Option<i64>,
}

/// Write the profile's history to a CSV file, replacing any existing file
///
/// Returns the number of rows written.
pub fn export_csv(profile: &CycleProfile, path: &Path) -> Result<usize> {
    // Ensure parent directory exists
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let file = File::create(path)?;
    let mut writer = csv::WriterBuilder::new().has_headers(true).from_writer(file);

    let mut previous: Option<NaiveDate> = None;
    for record in &profile.history {
        writer.serialize(CsvRow {
            start: record.start.to_string(),
            end: record.end.map(|d| d.to_string()),
            period_days: record.period_days(),
            gap_days: previous.map(|p| (record.start - p).num_days()),
        })?;
        previous = Some(record.start);
    }

    // Flush and sync to disk
    writer.flush()?;
    let file = writer
        .into_inner()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
    file.sync_all()?;

    tracing::info!("Exported {} cycles to {:?}", profile.history.len(), path);
    Ok(profile.history.len())
}
