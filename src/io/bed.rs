//! # BED loader
//!
//! Reads the capture regions. Only the first three columns are
//! interpreted (chromosome, 0-based start, end); extra columns and
//! `#`-prefixed lines are ignored. Coordinates are converted to the
//! 1-based inclusive representation used throughout the crate
//! (`from = start + 1`, `to = end`). Regions must be grouped by
//! chromosome and, within one chromosome, strictly ascending and
//! non-overlapping.
use anyhow::{bail, Context, Result};
use csv::{ReaderBuilder, StringRecord};
use log::info;

use crate::region::Region;

#[derive(Debug, serde::Deserialize)]
struct BedRow {
    chrom: String,
    start: u32,
    end: u32,
}

/// Load capture regions from `bed_path`. Returns the regions in file
/// order together with the chromosome names in order of first
/// appearance.
pub fn read_regions(bed_path: &str) -> Result<(Vec<Region>, Vec<String>)> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .delimiter(b'\t')
        .flexible(true)
        .comment(Some(b'#'))
        .from_path(bed_path)
        .with_context(|| format!("Could not read bed file {bed_path}"))?;

    let mut regions: Vec<Region> = Vec::new();
    let mut chroms: Vec<String> = Vec::new();
    let mut prev_to = 0u32;

    for result in reader.records() {
        let record =
            result.with_context(|| format!("Failed to read bed record in {bed_path}"))?;
        let line = record.position().map_or(0, csv::Position::line);

        if record.len() < 3 {
            bail!("At line {line} of {bed_path}: at least 3 columns required");
        }
        let row: BedRow = StringRecord::from(record.iter().take(3).collect::<Vec<_>>())
            .deserialize(None)
            .with_context(|| format!("Genomic coordinates at line {line} of {bed_path} are not valid"))?;

        let region = Region::new(row.chrom, row.start + 1, row.end);
        if region.from > region.to {
            bail!("Genomic region at line {line} of {bed_path} has inverted coordinates");
        }

        match chroms.last() {
            Some(last) if *last == region.chrom => {
                if region.from <= prev_to {
                    bail!(
                        "Genomic regions in {bed_path} are not positionally ordered or overlap (line {line})"
                    );
                }
            }
            _ => {
                if chroms.contains(&region.chrom) {
                    bail!("Chromosomes in {bed_path} are not ordered (line {line})");
                }
                chroms.push(region.chrom.clone());
            }
        }
        prev_to = region.to;
        regions.push(region);
    }

    if regions.is_empty() {
        bail!("BED file {bed_path} is empty");
    }

    info!("Read {} target regions from {bed_path}", regions.len());
    Ok((regions, chroms))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn bed_file(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn reads_regions_with_extra_columns_and_comments() {
        let file = bed_file("# capture design\nchr1\t99\t102\tamplicon1\nchr1\t199\t250\nchr2\t9\t20\tx\ty\n");
        let (regions, chroms) = read_regions(file.path().to_str().unwrap()).unwrap();

        assert_eq!(3, regions.len());
        assert_eq!(100, regions[0].from);
        assert_eq!(102, regions[0].to);
        assert_eq!(vec!["chr1", "chr2"], chroms);
    }

    #[test]
    fn rejects_overlapping_regions() {
        let file = bed_file("chr1\t99\t200\nchr1\t150\t300\n");
        assert!(read_regions(file.path().to_str().unwrap()).is_err());
    }

    #[test]
    fn rejects_unsorted_regions() {
        let file = bed_file("chr1\t500\t600\nchr1\t100\t200\n");
        assert!(read_regions(file.path().to_str().unwrap()).is_err());
    }

    #[test]
    fn rejects_reappearing_chromosome() {
        let file = bed_file("chr1\t99\t200\nchr2\t99\t200\nchr1\t300\t400\n");
        assert!(read_regions(file.path().to_str().unwrap()).is_err());
    }

    #[test]
    fn rejects_non_integer_coordinates() {
        let file = bed_file("chr1\tstart\t200\n");
        assert!(read_regions(file.path().to_str().unwrap()).is_err());
    }

    #[test]
    fn rejects_inverted_coordinates() {
        let file = bed_file("chr1\t300\t200\n");
        assert!(read_regions(file.path().to_str().unwrap()).is_err());
    }

    #[test]
    fn rejects_empty_bed() {
        let file = bed_file("# nothing but comments\n");
        assert!(read_regions(file.path().to_str().unwrap()).is_err());
    }

    #[test]
    fn single_base_bed_interval_is_valid() {
        // start 99, end 100 -> the single 1-based position 100
        let file = bed_file("chr1\t99\t100\n");
        let (regions, _) = read_regions(file.path().to_str().unwrap()).unwrap();
        assert_eq!(100, regions[0].from);
        assert_eq!(100, regions[0].to);
        assert_eq!(0, regions[0].span());
    }
}
