//! # Duplicates lookup table loader
//!
//! Parses the optional coverage-dependent duplicate threshold table:
//! tab-separated rows of `cov_down`, `cov_up`, `threshold` defining a
//! threshold per half-open coverage interval `[cov_down, cov_up)`. The
//! table is accepted and validated for command-line compatibility only;
//! the counting path does not consult it, so nothing beyond the
//! validation outcome is returned.
use anyhow::{bail, Context, Result};
use csv::{ReaderBuilder, StringRecord};
use log::info;

#[derive(Debug, serde::Deserialize)]
struct DupRow {
    cov_down: u32,
    cov_up: u32,
    #[allow(dead_code)]
    threshold: u32,
}

/// Validate the duplicates table at `table_path`: every row must carry
/// three non-negative integers whose first two define a proper coverage
/// interval, and the table must not be empty.
pub fn read_lookup_table(table_path: &str) -> Result<()> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .delimiter(b'\t')
        .flexible(true)
        .comment(Some(b'#'))
        .from_path(table_path)
        .with_context(|| format!("Could not read duplicates table {table_path}"))?;

    let mut intervals = 0usize;
    for result in reader.records() {
        let record =
            result.with_context(|| format!("Failed to read record in {table_path}"))?;
        let line = record.position().map_or(0, csv::Position::line);

        if record.len() < 3 {
            bail!("At line {line} of {table_path}: at least 3 columns required");
        }
        let row: DupRow = StringRecord::from(record.iter().take(3).collect::<Vec<_>>())
            .deserialize(None)
            .with_context(|| format!("Values at line {line} of {table_path} are not valid"))?;

        if row.cov_down >= row.cov_up {
            bail!("Values at line {line} of {table_path} do not define a coverage interval");
        }
        intervals += 1;
    }

    if intervals == 0 {
        bail!("Duplicates table {table_path} is empty");
    }

    info!("Read duplicates lookup table with {intervals} coverage intervals from {table_path}");
    Ok(())
}
