//! # pilecov
//!
//! Per-base pileup and region coverage statistics for targeted
//! sequencing data: for every position inside a set of capture regions,
//! counts of the four bases (optionally split by strand) and deletions;
//! per region, global and peak-window read-count means with GC content;
//! per known SNP site, allele counts, allelic fraction and an optional
//! genotype call.
pub mod chrom;
pub mod cli;
pub mod dedup;
pub mod genotype;
pub mod io;
pub mod output;
pub mod pileup;
pub mod region;
pub mod snp;
pub mod utils;

use anyhow::{bail, Context, Result};
use log::trace;
use rust_htslib::{bam, faidx};

use crate::{cli::Config, pileup::BaseCounts, region::Region};

/// The main work of `pilecov` happens in this `run` function.
/// It is meant to be called from inside a rayon parallel iterator, one
/// contiguous slice of the region list per thread. Each thread opens its
/// own alignment and reference readers (the underlying htslib handles are
/// not reentrant), then pileups its regions in order. Any failure is
/// fatal for the whole run and propagates to the driver.
pub fn run(regions: &mut [Region], config: &Config, tidx: usize) -> Result<()> {
    trace!("Launching thread {tidx}");

    let (mut bam, fasta) = thread_setup(config)
        .with_context(|| format!("Error during setup on thread {tidx}"))?;

    for region in regions.iter_mut() {
        process_region(region, &mut bam, &fasta, config)?;
    }

    trace!("Finished on thread {tidx}");
    Ok(())
}

fn thread_setup(config: &Config) -> Result<(bam::IndexedReader, faidx::Reader)> {
    let bam = bam::IndexedReader::from_path(&config.bam)
        .with_context(|| format!("Could not open alignment file {}", config.bam))?;
    let fasta = faidx::Reader::from_path(&config.fasta)
        .with_context(|| format!("Could not open reference file {}", config.fasta))?;
    Ok((bam, fasta))
}

/// Pileup one region: fetch and uppercase the reference slice, run the
/// duplicate collapser when requested, count bases, then attach the
/// region-level statistics. Mode 3 reads nothing back per position after
/// this point, so its slice and counter array are dropped right away.
fn process_region(
    region: &mut Region,
    bam: &mut bam::IndexedReader,
    fasta: &faidx::Reader,
    config: &Config,
) -> Result<()> {
    let tid = bam
        .header()
        .tid(region.chrom.as_bytes())
        .with_context(|| {
            format!(
                "Genomic region {} not compatible with BAM file",
                region.fetch_definition_s()
            )
        })? as i32;

    let begin = i64::from(region.from) - 1;
    let end = i64::from(region.to);

    let slice = fasta
        .fetch_seq(
            &region.chrom,
            begin as usize,
            (region.to - 1) as usize,
        )
        .with_context(|| {
            format!(
                "Genomic region {} not compatible with FASTA file",
                region.fetch_definition_s()
            )
        })?;
    if slice.len() < region.n_positions() {
        bail!(
            "Genomic region {} not compatible with FASTA file",
            region.fetch_definition_s()
        );
    }
    let sequence: Vec<u8> = slice.iter().map(u8::to_ascii_uppercase).collect();

    let keep = if config.dedup {
        Some(dedup::surviving_names(
            bam,
            tid,
            begin,
            end,
            i64::from(config.dedup_window),
        )?)
    } else {
        None
    };

    let mut counts = vec![BaseCounts::default(); region.n_positions()];
    pileup::pileup_region(
        bam,
        tid,
        begin,
        end,
        &mut counts,
        &config.read_filters(),
        keep.as_ref(),
    )
    .with_context(|| format!("Error running pileup for region {}", region.fetch_definition_s()))?;

    if config.wants_rc() {
        region.compute_read_counts(&counts, config.region_perc);
        region.compute_gc(&sequence);
    }

    if config.mode != 3 {
        region.sequence = Some(sequence);
        region.counts = Some(counts);
    }

    Ok(())
}
