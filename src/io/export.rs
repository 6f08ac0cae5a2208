//! CSV export for yearly projection records.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use crate::plan::types::{KWH_PER_MILLION, Projection, YearRecord};

/// Column header for the CSV projection export.
const HEADER: &str = "year,bucket,budget,total_cost,scale,consumption_kwh,\
                      consumption_mkwh,saved_kwh,saved_budget,measures";

/// Exports a projection to a CSV file at the given path.
///
/// Writes a header row followed by one data row per simulated year.
/// Produces deterministic output for identical inputs.
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_csv(projection: &Projection, path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    let buf = io::BufWriter::new(file);
    write_csv(projection, buf)
}

/// Writes a projection as CSV to any writer.
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_csv(projection: &Projection, writer: impl Write) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);

    wtr.write_record(HEADER.split(',').map(str::trim))?;

    for r in &projection.years {
        wtr.write_record(&[
            r.year.to_string(),
            r.bucket.key().to_string(),
            format!("{:.4}", r.available_budget),
            format!("{:.4}", r.total_cost),
            format!("{:.6}", r.scale),
            format!("{:.2}", r.consumption_kwh),
            format!("{:.4}", r.consumption_kwh / KWH_PER_MILLION),
            format!("{:.2}", r.saved_kwh),
            format!("{:.6}", r.saved_budget),
            measures_field(r),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

/// `name:pct` pairs joined by `;`, e.g. `LED:8.0;Solar:20.0`.
fn measures_field(record: &YearRecord) -> String {
    record
        .measures
        .iter()
        .map(|m| format!("{}:{:.1}", m.name, m.percent()))
        .collect::<Vec<_>>()
        .join(";")
}
