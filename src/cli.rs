//! # Command line interface for `pilecov`
use anyhow::{bail, Context, Result};
use clap::Parser;
use std::path::Path;

use crate::{genotype::GenotypeModel, pileup::ReadFilters};

#[derive(Parser)]
#[command(
    name = "pilecov",
    version,
    about = "Per-base pileup and region coverage statistics for targeted sequencing data",
    long_about = None
)]
pub struct Cli {
    /// NGS data file in BAM format; the index is expected alongside
    #[arg(long)]
    pub bam: String,

    /// List of target captured regions in BED format
    #[arg(long)]
    pub bed: String,

    /// List of SNP positions as an uncompressed tab-separated VCF-like table.
    /// Required for modes 0, 1, 2 and 5
    #[arg(long)]
    pub vcf: Option<String>,

    /// Reference genome in FASTA format; the faidx index is expected alongside
    #[arg(long)]
    pub fasta: String,

    /// Execution mode [0=RC+SNPs+SNVs | 1=RC+SNPs+SNVs+pileup | 2=SNPs |
    /// 3=RC | 4=pileup | 5=pileup+SNVs with rsIDs | 6=extended per-base counts]
    #[arg(long, default_value_t = 4, value_parser = clap::value_parser!(u8).range(0..=6))]
    pub mode: u8,

    /// Number of threads used for the pileup computation
    #[arg(long, default_value_t = 1, value_parser = threads_in_range)]
    pub threads: usize,

    /// Min base quality
    #[arg(long, default_value_t = 20)]
    pub mbq: u8,

    /// Min read mapping quality
    #[arg(long, default_value_t = 1)]
    pub mrq: u8,

    /// Min depth of coverage for a position to be reported in the SNP and SNV tables
    #[arg(long, default_value_t = 0)]
    pub mdc: u32,

    /// Path of the output directory
    #[arg(long, default_value = "./")]
    pub out: String,

    /// Fraction of the captured region to consider for peak signal characterization
    #[arg(long = "region-perc", default_value_t = 0.5, value_parser = perc_in_range)]
    pub region_perc: f64,

    /// Print strand bias count information
    #[arg(long = "strand-bias")]
    pub strand_bias: bool,

    /// On-the-fly duplicate filtering
    #[arg(long)]
    pub dedup: bool,

    /// Flanking region around captured regions to consider in duplicate filtering
    #[arg(long = "dedup-window", default_value_t = 1000)]
    pub dedup_window: u32,

    /// Print genotype calls for input SNPs using an allelic fraction cutoff at 20%
    #[arg(long, conflicts_with = "genotype_bt")]
    pub genotype: bool,

    /// Print genotype calls for input SNPs using a binomial test with significance at 1%
    #[arg(long = "genotype-bt")]
    pub genotype_bt: bool,

    /// Coverage-dependent duplicate threshold table (reserved; parsed but
    /// not consulted by the counting path)
    #[arg(long)]
    pub duptab: Option<String>,
}

impl Cli {
    /// File-level checks the argument parser cannot do on its own.
    pub fn validate(&self) -> Result<()> {
        if !Path::new(&self.bam).is_file() {
            bail!("File BAM does not exist: {}", self.bam);
        }
        if !Path::new(&self.bed).is_file() {
            bail!("File BED does not exist: {}", self.bed);
        }
        if !self.bed.ends_with(".bed") {
            bail!("A file BED should be specified: {}", self.bed);
        }
        if !Path::new(&self.fasta).is_file() {
            bail!("File FASTA does not exist: {}", self.fasta);
        }
        match &self.vcf {
            Some(vcf) => {
                if !Path::new(vcf).is_file() {
                    bail!("File VCF does not exist: {vcf}");
                }
                if !vcf.ends_with(".vcf") {
                    bail!("A file VCF should be specified: {vcf}");
                }
            }
            None => {
                if matches!(self.mode, 0 | 1 | 2 | 5) {
                    bail!("Selected mode requires the specification of a VCF file");
                }
            }
        }
        if let Some(duptab) = &self.duptab {
            if !Path::new(duptab).is_file() {
                bail!("File duplicates table does not exist: {duptab}");
            }
        }
        Ok(())
    }

    pub fn config(&self) -> Config {
        Config {
            bam: self.bam.clone(),
            fasta: self.fasta.clone(),
            out: self.out.clone(),
            mode: self.mode,
            mbq: self.mbq,
            mrq: self.mrq,
            mdc: self.mdc,
            // mode 6 reports per-base forward-strand fractions and
            // needs the reverse-strand counters regardless of the flag
            strand_bias: self.strand_bias || self.mode == 6,
            dedup: self.dedup,
            dedup_window: self.dedup_window,
            region_perc: self.region_perc,
            genotype: if self.genotype {
                Some(GenotypeModel::Fraction)
            } else if self.genotype_bt {
                Some(GenotypeModel::BinomialTest)
            } else {
                None
            },
        }
    }
}

/// Read-only run parameters threaded through the workers and the writer.
#[derive(Debug, Clone)]
pub struct Config {
    pub bam: String,
    pub fasta: String,
    pub out: String,
    pub mode: u8,
    pub mbq: u8,
    pub mrq: u8,
    pub mdc: u32,
    pub strand_bias: bool,
    pub dedup: bool,
    pub dedup_window: u32,
    pub region_perc: f64,
    pub genotype: Option<GenotypeModel>,
}

impl Config {
    pub fn read_filters(&self) -> ReadFilters {
        ReadFilters {
            mbq: self.mbq,
            mrq: self.mrq,
            strand_bias: self.strand_bias,
        }
    }

    pub fn needs_vcf(&self) -> bool {
        matches!(self.mode, 0 | 1 | 2 | 5)
    }

    pub fn wants_snps(&self) -> bool {
        matches!(self.mode, 0 | 1 | 2)
    }

    pub fn wants_snvs(&self) -> bool {
        matches!(self.mode, 0 | 1 | 5)
    }

    pub fn wants_pileup(&self) -> bool {
        matches!(self.mode, 1 | 4 | 5 | 6)
    }

    pub fn wants_rc(&self) -> bool {
        matches!(self.mode, 0 | 1 | 3)
    }
}

fn threads_in_range(s: &str) -> Result<usize> {
    let threads = s
        .parse()
        .context("Could not parse value passed to --threads to integer")?;
    if threads < 1 {
        bail!("--threads must be at least 1");
    }
    Ok(threads)
}

fn perc_in_range(s: &str) -> Result<f64> {
    let perc: f64 = s
        .parse()
        .context("Could not parse value passed to --region-perc to float")?;
    if !(0. ..=1.).contains(&perc) {
        bail!("--region-perc should be in the range [0,1]");
    }
    Ok(perc)
}
