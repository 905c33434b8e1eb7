use anyhow::{Context, Result};
use clap::Parser;
use log::{error, info};
use rayon::{prelude::*, ThreadPoolBuilder};
use rust_htslib::{bam, faidx};
use std::fs;

use pilecov::{
    chrom::ChromOrder,
    cli::Cli,
    io::{bed, duptab, vcf},
    output, run, utils,
};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // clap exits 2 on bad arguments by default; any failure here is a
    // configuration error and reports as exit code 1
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            std::process::exit(i32::from(err.use_stderr()));
        }
    };

    if let Err(e) = try_main(cli) {
        error!("{e:#}");
        std::process::exit(1);
    }
}

fn try_main(cli: Cli) -> Result<()> {
    cli.validate()?;
    let config = cli.config();

    info!(
        "BAM={} BED={} VCF={} FASTA={} MODE={} MBQ={} MRQ={} MDC={} THREADS={} OUT={} REGIONPERC={}",
        config.bam,
        cli.bed,
        cli.vcf.as_deref().unwrap_or("-"),
        config.fasta,
        config.mode,
        config.mbq,
        config.mrq,
        config.mdc,
        cli.threads,
        config.out,
        config.region_perc
    );

    fs::create_dir_all(&config.out)
        .with_context(|| format!("Could not create output directory {}", config.out))?;

    // fail on unreadable BAM, missing BAM index or unreadable FASTA
    // before any thread launches
    bam::IndexedReader::from_path(&config.bam)
        .with_context(|| format!("Fail to open BAM file {} or its index", config.bam))?;
    faidx::Reader::from_path(&config.fasta)
        .with_context(|| format!("Fail to open FASTA file {} or its index", config.fasta))?;

    let (mut regions, bed_chroms) = bed::read_regions(&cli.bed)?;
    info!("Loaded chromosomes: {}", bed_chroms.join(","));

    let (snps, order) = if config.needs_vcf() {
        // validate() has already established the path is present
        let vcf_path = cli
            .vcf
            .as_ref()
            .context("Selected mode requires the specification of a VCF file")?;
        let (snps, vcf_chroms) = vcf::read_snps(vcf_path)?;
        info!("Loaded chromosomes: {}", vcf_chroms.join(","));
        (snps, ChromOrder::merged(&vcf_chroms, &bed_chroms)?)
    } else {
        (Vec::new(), ChromOrder::from_bed(&bed_chroms))
    };

    if let Some(duptab_path) = &cli.duptab {
        // accepted for command-line compatibility; counting ignores it
        duptab::read_lookup_table(duptab_path)?;
    }

    info!("Computing pileup ({} thread(s))", cli.threads);
    ThreadPoolBuilder::new()
        .num_threads(cli.threads)
        .build_global()
        .context("Could not initialize the thread pool")?;
    let chunksize = regions.len() / cli.threads + 1;
    regions
        .par_chunks_mut(chunksize)
        .enumerate()
        .try_for_each(|(tidx, chunk)| run(chunk, &config, tidx))?;

    let prefix = utils::output_prefix_from_bam(&config.bam)?;
    info!("Writing output files to {}", config.out);
    output::write_output(&regions, &snps, &order, &config, &prefix)?;

    info!("Computation end");
    Ok(())
}
