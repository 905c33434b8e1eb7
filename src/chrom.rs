//! # Unified chromosome order
//!
//! The writer walks regions and SNPs with one cursor, which requires a
//! single total order over every chromosome named in either input. The
//! order is computed once after loading: a merge walk over the VCF and
//! BED chromosome lists that preserves each file's relative order and
//! interleaves chromosomes private to one of them. Inputs whose shared
//! chromosomes disagree on relative order are rejected.
use anyhow::{bail, Context, Result};
use std::collections::HashMap;

#[derive(Debug)]
pub struct ChromOrder {
    order: Vec<String>,
    ranks: HashMap<String, usize>,
}

impl ChromOrder {
    /// Order for runs without a SNP file: the BED order stands alone.
    pub fn from_bed(bed_chroms: &[String]) -> Self {
        Self::from_order(bed_chroms.to_vec())
    }

    /// Merge the VCF and BED chromosome lists into one total order.
    /// Fails when any chromosome pair present in both files appears in a
    /// different relative order.
    pub fn merged(vcf_chroms: &[String], bed_chroms: &[String]) -> Result<Self> {
        let mut last_match = 0usize;
        for chrom in vcf_chroms {
            if let Some(idx) = bed_chroms.iter().position(|b| b == chrom) {
                if idx < last_match {
                    bail!("Chromosomes specified in BED and VCF files have not the same order");
                }
                last_match = idx;
            }
        }

        let mut order = Vec::with_capacity(vcf_chroms.len() + bed_chroms.len());
        let mut bed_cursor = 0usize;
        for chrom in vcf_chroms {
            match bed_chroms[bed_cursor..].iter().position(|b| b == chrom) {
                Some(offset) => {
                    let matched = bed_cursor + offset;
                    order.extend(bed_chroms[bed_cursor..=matched].iter().cloned());
                    bed_cursor = matched + 1;
                }
                None => order.push(chrom.clone()),
            }
        }
        order.extend(bed_chroms[bed_cursor..].iter().cloned());

        Ok(Self::from_order(order))
    }

    fn from_order(order: Vec<String>) -> Self {
        let ranks = order
            .iter()
            .enumerate()
            .map(|(idx, chrom)| (chrom.clone(), idx))
            .collect();
        ChromOrder { order, ranks }
    }

    /// Position of `chrom` in the unified order. Total over every
    /// chromosome appearing in either input by construction.
    pub fn rank(&self, chrom: &str) -> Result<usize> {
        self.ranks
            .get(chrom)
            .copied()
            .with_context(|| format!("Chromosome {chrom} is missing from the unified order"))
    }

    pub fn chroms(&self) -> &[String] {
        &self.order
    }
}
