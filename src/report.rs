//! Report output
//!
//! Renders the tracker's per-player statistics over a date range, either as
//! a comma-separated table or as JSON.

pub mod csv_report;
pub mod json_report;

use crate::configuration::types::{DateRange, ReportFormat};
use crate::error_handling::types::ReportError;
use crate::session_tracking::PlayerStats;
use log::info;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

pub use csv_report::write_csv;
pub use json_report::write_json;

/// Creates `path` and writes the report in `format`.
pub fn write_report(
    format: ReportFormat,
    path: &Path,
    players: &BTreeMap<String, PlayerStats>,
    range: &DateRange,
) -> Result<(), ReportError> {
    let out = BufWriter::new(File::create(path)?);
    match format {
        ReportFormat::Csv => write_csv(players, range, out)?,
        ReportFormat::Json => write_json(players, range, out)?,
    }
    info!(
        "Wrote {:?} report for {} player(s), {} to {}, to {}",
        format,
        players.len(),
        range.start,
        range.end,
        path.display()
    );
    Ok(())
}
