//! # SNP sites
//!
//! A known single-nucleotide variant site as declared in the input SNP
//! table: chromosome, 1-based position, identifier, and the single-base
//! reference and alternative alleles (validated to be `A/C/G/T` on load).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snp {
    pub chrom: String,
    pub pos: u32,
    pub rsid: String,
    pub ref_base: u8,
    pub alt_base: u8,
}
