//! Rendering of scan results.
//!
//! Only reportable groups (two or more paths) are written; singleton groups
//! stay internal to the [`ResultSet`]. Rows follow the result set's iteration
//! order, so the output is stable for a fixed input ordering.

use std::io::Write;

use serde::Serialize;

use crate::error::Result;
use crate::types::{ErrorRecord, ResultSet};

/// A single row in the CSV output.
#[derive(Debug, Serialize)]
struct CsvRow {
    /// SHA-256 of the canonical raster (hex)
    sha256: String,
    /// Path to the image
    path: String,
}

/// Write duplicate groups as human-readable text
pub fn write_text<W: Write>(results: &ResultSet, mut out: W) -> Result<()> {
    for group in results.reportable() {
        writeln!(out, "Duplicate images with hash {}:", group.digest)?;
        for path in &group.paths {
            writeln!(out, "{}", path.display())?;
        }
        writeln!(out)?;
    }
    out.flush()?;
    Ok(())
}

/// Write duplicate groups as CSV with a `SHA256,Path` header.
///
/// The header is written even when there are no duplicates.
pub fn write_csv<W: Write>(results: &ResultSet, out: W) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(out);

    writer.write_record(["SHA256", "Path"])?;

    for group in results.reportable() {
        let sha256 = group.digest.to_string();
        for path in &group.paths {
            writer.serialize(CsvRow {
                sha256: sha256.clone(),
                path: path.to_string_lossy().into_owned(),
            })?;
        }
    }

    writer.flush()?;
    Ok(())
}

/// Write one line per error record
pub fn write_error_log<W: Write>(errors: &[ErrorRecord], mut out: W) -> Result<()> {
    for record in errors {
        writeln!(out, "{}", record)?;
    }
    out.flush()?;
    Ok(())
}
