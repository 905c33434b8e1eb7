//! # SNP table loader
//!
//! Reads the known SNP sites from an uncompressed, tab-separated VCF-like
//! table: chromosome, 1-based position, identifier, reference and
//! alternative allele in the first five columns. Header (`#`) and blank
//! lines are skipped, trailing columns are ignored. Ref and alt must each
//! be a single `A/C/G/T`; entries must be grouped by chromosome and
//! strictly ascending within one.
use anyhow::{bail, Context, Result};
use csv::{ReaderBuilder, StringRecord};
use log::info;

use crate::snp::Snp;

#[derive(Debug, serde::Deserialize)]
struct SnpRow {
    chrom: String,
    pos: u32,
    rsid: String,
    ref_allele: String,
    alt_allele: String,
}

fn single_base(allele: &str) -> Option<u8> {
    match allele.as_bytes() {
        [base @ (b'A' | b'C' | b'G' | b'T')] => Some(*base),
        _ => None,
    }
}

/// Load SNP sites from `vcf_path`. Returns the sites in file order
/// together with the chromosome names in order of first appearance.
pub fn read_snps(vcf_path: &str) -> Result<(Vec<Snp>, Vec<String>)> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .delimiter(b'\t')
        .flexible(true)
        .comment(Some(b'#'))
        .from_path(vcf_path)
        .with_context(|| format!("Could not read VCF file {vcf_path}"))?;

    let mut snps: Vec<Snp> = Vec::new();
    let mut chroms: Vec<String> = Vec::new();
    let mut prev_pos = 0u32;

    for result in reader.records() {
        let record =
            result.with_context(|| format!("Failed to read VCF record in {vcf_path}"))?;
        let line = record.position().map_or(0, csv::Position::line);

        if record.len() < 5 {
            bail!("At line {line} of {vcf_path}: at least 5 columns required");
        }
        let row: SnpRow = StringRecord::from(record.iter().take(5).collect::<Vec<_>>())
            .deserialize(None)
            .with_context(|| format!("Genomic position at line {line} of {vcf_path} is not valid"))?;

        let Some(ref_base) = single_base(&row.ref_allele) else {
            bail!(
                "Reference allele at line {line} of {vcf_path} is not a single base equal to A, C, G or T"
            );
        };
        let Some(alt_base) = single_base(&row.alt_allele) else {
            bail!(
                "Alternative allele at line {line} of {vcf_path} is not a single base equal to A, C, G or T"
            );
        };

        match chroms.last() {
            Some(last) if *last == row.chrom => {
                if row.pos <= prev_pos {
                    bail!("Entries in {vcf_path} are not positionally ordered (line {line})");
                }
            }
            _ => {
                if chroms.contains(&row.chrom) {
                    bail!("Chromosomes in {vcf_path} are not ordered (line {line})");
                }
                chroms.push(row.chrom.clone());
            }
        }
        prev_pos = row.pos;

        snps.push(Snp {
            chrom: row.chrom,
            pos: row.pos,
            rsid: row.rsid,
            ref_base,
            alt_base,
        });
    }

    if snps.is_empty() {
        bail!("VCF file {vcf_path} is empty");
    }

    info!("Read {} snps from {vcf_path}", snps.len());
    Ok((snps, chroms))
}
