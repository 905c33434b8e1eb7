//! # Input loaders
//!
//! Tab-separated loaders for the three text inputs: capture regions
//! (BED), known SNP sites (uncompressed VCF-like table) and the optional
//! duplicates lookup table. Every loader validates ordering and format
//! up front so the workers and the writer can rely on the invariants.
pub mod bed;
pub mod duptab;
pub mod vcf;
