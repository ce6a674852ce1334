//! CSV export for the adjusted consumption series.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use tracing::info;

use crate::sim::types::AdjustedRecord;

/// Column header of the consumption export. Consumers rely on this exact order.
const HEADER: &str = "timestamp,total_kwh,is_waste,adjusted_kwh";

/// Default file name offered for downloads.
pub const DEFAULT_FILE_NAME: &str = "consumption.csv";

/// Exports the adjusted series to a CSV file at the given path.
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_csv(records: &[AdjustedRecord], path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    let buf = io::BufWriter::new(file);
    write_csv(records, buf)?;
    info!(path = %path.display(), rows = records.len(), "Exported consumption CSV");
    Ok(())
}

/// Writes the adjusted series as CSV to any writer.
///
/// One header row, then one row per record in series order. Produces
/// identical bytes for identical input.
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_csv(records: &[AdjustedRecord], writer: impl Write) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);

    wtr.write_record(HEADER.split(','))?;

    for r in records {
        wtr.write_record(&[
            r.time.to_string(),
            format!("{:.4}", r.total_kwh),
            r.is_waste.to_string(),
            format!("{:.4}", r.adjusted_kwh),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

/// Renders the adjusted series as an in-memory CSV string.
///
/// # Errors
///
/// Returns an `io::Error` if serialization fails.
pub fn to_csv_string(records: &[AdjustedRecord]) -> io::Result<String> {
    let mut buf = Vec::new();
    write_csv(records, &mut buf)?;
    String::from_utf8(buf).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}
