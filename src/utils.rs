//! # Root for utility functions in `pilecov`
//!
//! This top-level module contains miscellaneous utility functions,
//! the sub-modules contain functions related to specific functionality.
use anyhow::{Context, Result};
use std::path::Path;

pub mod cigar;

/// Derive the output file prefix from the path of an alignment file.
/// A literal `.bam` extension is stripped; any other name is kept whole,
/// so output files always sit next to a recognizable sample name.
///
/// # Examples
///
/// ```
/// let filepath = "./path/to/sample01.bam";
/// let prefix = pilecov::utils::output_prefix_from_bam(filepath).unwrap();
/// assert_eq!("sample01", prefix);
///
/// let prefix = pilecov::utils::output_prefix_from_bam("data/reads.sorted").unwrap();
/// assert_eq!("reads.sorted", prefix);
/// ```
pub fn output_prefix_from_bam(filepath: &str) -> Result<String> {
    let context = || format!("Could not derive an output prefix from path {filepath}");
    let name = Path::new(filepath)
        .file_name()
        .with_context(context)?
        .to_str()
        .with_context(context)?;

    let name = name.strip_suffix(".bam").unwrap_or(name);
    Ok(String::from(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefix_strips_bam_extension_only() {
        assert_eq!(
            "sample",
            output_prefix_from_bam("/data/runs/sample.bam").unwrap()
        );
        assert_eq!("sample.cram", output_prefix_from_bam("sample.cram").unwrap());
        assert_eq!("sample", output_prefix_from_bam("sample").unwrap());
    }
}
