//! # Output writer
//!
//! Emits the per-mode table set after all workers have joined: `.snps`
//! (pileup at known SNP sites), `.pabs` (SNV candidate positions),
//! `.pileup` (per-base rows) and `.rc` (per-region read counts). Regions
//! are walked in BED order with a single SNP cursor driven by the unified
//! chromosome order, so output is deterministic and thread-count
//! independent. Every file is buffered, tab-separated and carries exactly
//! one header line.
use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::{
    chrom::ChromOrder,
    cli::Config,
    genotype,
    pileup::BaseCounts,
    region::Region,
    snp::Snp,
};

struct OutputFiles {
    snps: Option<BufWriter<File>>,
    snvs: Option<BufWriter<File>>,
    pileup: Option<BufWriter<File>>,
    rc: Option<BufWriter<File>>,
}

fn open_table(dir: &Path, prefix: &str, ext: &str) -> Result<BufWriter<File>> {
    let path = dir.join(format!("{prefix}.{ext}"));
    let file = File::create(&path)
        .with_context(|| format!("Could not create output file {}", path.display()))?;
    Ok(BufWriter::new(file))
}

impl OutputFiles {
    fn create(dir: &Path, prefix: &str, config: &Config) -> Result<Self> {
        let mut files = OutputFiles {
            snps: None,
            snvs: None,
            pileup: None,
            rc: None,
        };

        if config.wants_snps() {
            let mut writer = open_table(dir, prefix, "snps")?;
            write!(writer, "chr\tpos\trsid\tref\talt\tA\tC\tG\tT\taf\tcov")?;
            if config.genotype.is_some() {
                write!(writer, "\tgenotype")?;
            }
            writeln!(writer)?;
            files.snps = Some(writer);
        }

        if config.wants_snvs() {
            let mut writer = open_table(dir, prefix, "pabs")?;
            write!(writer, "chr\tpos\tref\talt\tA\tC\tG\tT\taf\tcov")?;
            if config.strand_bias {
                write!(writer, "\tArs\tCrs\tGrs\tTrs")?;
            }
            if config.mode == 5 {
                write!(writer, "\trsid")?;
            }
            writeln!(writer)?;
            files.snvs = Some(writer);
        }

        if config.wants_pileup() {
            let mut writer = open_table(dir, prefix, "pileup")?;
            match config.mode {
                6 => {
                    writeln!(
                        writer,
                        "chr\tpos\tref\tcov\tCountA\tFracA\tStrandA\tCountC\tFracC\tStrandC\tCountG\tFracG\tStrandG\tCountT\tFracT\tStrandT"
                    )?;
                }
                5 => {
                    writeln!(writer, "chr\tpos\tref\tA\tC\tG\tT\taf\tcov\trsid")?;
                }
                _ => {
                    write!(writer, "chr\tpos\tref\tA\tC\tG\tT\taf\tcov")?;
                    if config.strand_bias {
                        write!(writer, "\tArs\tCrs\tGrs\tTrs")?;
                    }
                    writeln!(writer)?;
                }
            }
            files.pileup = Some(writer);
        }

        if config.wants_rc() {
            let mut writer = open_table(dir, prefix, "rc")?;
            writeln!(writer, "chr\tfrom\tto\tfromS\ttoS\trc\trcS\tgc")?;
            files.rc = Some(writer);
        }

        Ok(files)
    }

    fn flush(&mut self) -> Result<()> {
        for writer in [&mut self.snps, &mut self.snvs, &mut self.pileup, &mut self.rc]
            .into_iter()
            .flatten()
        {
            writer.flush().context("Error flushing output file")?;
        }
        Ok(())
    }
}

/// Write every table selected by the mode. Must run after all workers
/// have joined; consumes the counter arrays and reference slices the
/// workers attached to the regions.
pub fn write_output(
    regions: &[Region],
    snps: &[Snp],
    order: &ChromOrder,
    config: &Config,
    prefix: &str,
) -> Result<()> {
    let dir = Path::new(&config.out);
    let mut files = OutputFiles::create(dir, prefix, config)?;

    if config.mode != 3 {
        write_position_tables(&mut files, regions, snps, order, config)?;
    }
    if let Some(rc) = files.rc.as_mut() {
        for region in regions {
            write_region_counts_row(rc, region)?;
        }
    }

    files.flush()
}

fn allelic_fraction(alt: u32, cov: u32) -> f64 {
    if cov > 0 {
        f64::from(alt) / f64::from(cov)
    } else {
        0.
    }
}

/// `chr pos ref A C G T af cov` shared by the pileup tables, where `af`
/// is the non-reference fraction of the full base coverage.
fn write_pileup_base<W: Write>(
    writer: &mut W,
    region: &Region,
    pos: u32,
    ref_base: u8,
    counts: &BaseCounts,
) -> Result<()> {
    let cov = counts.total();
    let alt = counts.alt_sum(ref_base);
    write!(
        writer,
        "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{:.6}\t{}",
        region.chrom,
        pos,
        ref_base as char,
        counts.a,
        counts.c,
        counts.g,
        counts.t,
        allelic_fraction(alt, cov),
        cov
    )?;
    Ok(())
}

fn write_strand_columns<W: Write>(writer: &mut W, counts: &BaseCounts) -> Result<()> {
    write!(
        writer,
        "\t{}\t{}\t{}\t{}",
        counts.a_rev, counts.c_rev, counts.g_rev, counts.t_rev
    )?;
    Ok(())
}

/// `chr pos ref alt A C G T af cov` for an SNV candidate, where `af` and
/// `cov` are restricted to the reference and alternative alleles.
fn write_snv_base<W: Write>(
    writer: &mut W,
    region: &Region,
    pos: u32,
    ref_base: u8,
    alt_base: u8,
    alt_count: u32,
    counts: &BaseCounts,
) -> Result<()> {
    let cov = counts.base_count(ref_base) + alt_count;
    write!(
        writer,
        "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{:.6}\t{}",
        region.chrom,
        pos,
        ref_base as char,
        alt_base as char,
        counts.a,
        counts.c,
        counts.g,
        counts.t,
        allelic_fraction(alt_count, cov),
        cov
    )?;
    Ok(())
}

fn write_mode6_row<W: Write>(
    writer: &mut W,
    region: &Region,
    pos: u32,
    ref_base: u8,
    counts: &BaseCounts,
) -> Result<()> {
    let total = counts.total();
    write!(
        writer,
        "{}\t{}\t{}\t{}",
        region.chrom,
        pos,
        ref_base as char,
        total + counts.del
    )?;
    for base in [b'A', b'C', b'G', b'T'] {
        let count = counts.base_count(base);
        let frac = if total > 0 {
            f64::from(count) / f64::from(total)
        } else {
            0.
        };
        let forward = if count > 0 {
            f64::from(count - counts.rev_count(base)) / f64::from(count)
        } else {
            0.
        };
        write!(writer, "\t{count}\t{frac:.4}\t{forward:.2}")?;
    }
    writeln!(writer)?;
    Ok(())
}

fn write_region_counts_row<W: Write>(writer: &mut W, region: &Region) -> Result<()> {
    writeln!(
        writer,
        "{}\t{}\t{}\t{}\t{}\t{:.2}\t{:.2}\t{:.2}",
        region.chrom,
        region.from,
        region.to,
        region.from_sel,
        region.to_sel,
        region.read_count_global,
        region.read_count,
        region.gc
    )?;
    Ok(())
}

fn write_position_tables(
    files: &mut OutputFiles,
    regions: &[Region],
    snps: &[Snp],
    order: &ChromOrder,
    config: &Config,
) -> Result<()> {
    let mut cursor = 0usize;

    for region in regions {
        let counts = region.counts.as_ref().with_context(|| {
            format!("Missing counter array for region {}", region.fetch_definition_s())
        })?;
        let sequence = region.sequence.as_ref().with_context(|| {
            format!("Missing reference slice for region {}", region.fetch_definition_s())
        })?;
        let region_rank = order.rank(&region.chrom)?;

        for (offset, position_counts) in counts.iter().enumerate() {
            let pos = region.from + offset as u32;
            let ref_base = sequence[offset];

            // mode 5 prints a pileup row for every position and holds the
            // line open for the trailing rsid field
            let mut snv_open = false;
            if config.mode == 5 {
                let pileup = files.pileup.as_mut().context("Missing pileup writer")?;
                write_pileup_base(pileup, region, pos, ref_base, position_counts)?;

                if position_counts.alt_sum(ref_base) > 0 {
                    let (alt_base, alt_count) = position_counts.find_alternative(ref_base);
                    let cov = position_counts.base_count(ref_base) + alt_count;
                    if cov >= config.mdc {
                        let snvs = files.snvs.as_mut().context("Missing pabs writer")?;
                        write_snv_base(
                            snvs,
                            region,
                            pos,
                            ref_base,
                            alt_base,
                            alt_count,
                            position_counts,
                        )?;
                        if config.strand_bias {
                            write_strand_columns(snvs, position_counts)?;
                        }
                        snv_open = true;
                    }
                }
            }

            let mut at_snp = false;
            if !snps.is_empty() {
                while cursor + 1 < snps.len() {
                    let snp = &snps[cursor];
                    let behind = region_rank > order.rank(&snp.chrom)?
                        || (snp.chrom == region.chrom && pos > snp.pos);
                    if !behind {
                        break;
                    }
                    cursor += 1;
                }

                let snp = &snps[cursor];
                if snp.chrom == region.chrom && snp.pos == pos {
                    at_snp = true;

                    if config.mode == 5 {
                        let pileup = files.pileup.as_mut().context("Missing pileup writer")?;
                        writeln!(pileup, "\t{}", snp.rsid)?;
                        if snv_open {
                            let snvs = files.snvs.as_mut().context("Missing pabs writer")?;
                            writeln!(snvs, "\t{}", snp.rsid)?;
                        }
                    }

                    let alt = position_counts.base_count(snp.alt_base);
                    let reference = position_counts.base_count(snp.ref_base);
                    let cov = reference + alt;
                    if cov >= config.mdc && config.wants_snps() {
                        let writer = files.snps.as_mut().context("Missing snps writer")?;
                        write!(
                            writer,
                            "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{:.6}\t{}",
                            region.chrom,
                            pos,
                            snp.rsid,
                            snp.ref_base as char,
                            snp.alt_base as char,
                            position_counts.a,
                            position_counts.c,
                            position_counts.g,
                            position_counts.t,
                            allelic_fraction(alt, cov),
                            cov
                        )?;
                        if let Some(model) = config.genotype {
                            write!(writer, "\t{}", genotype::call(model, reference, alt))?;
                        }
                        writeln!(writer)?;
                    }
                    cursor = std::cmp::min(cursor + 1, snps.len() - 1);
                }
            }

            if !at_snp {
                if config.mode == 5 {
                    let pileup = files.pileup.as_mut().context("Missing pileup writer")?;
                    writeln!(pileup, "\t")?;
                    if snv_open {
                        let snvs = files.snvs.as_mut().context("Missing pabs writer")?;
                        writeln!(snvs, "\t")?;
                    }
                }

                if matches!(config.mode, 1 | 4) {
                    let pileup = files.pileup.as_mut().context("Missing pileup writer")?;
                    write_pileup_base(pileup, region, pos, ref_base, position_counts)?;
                    if config.strand_bias {
                        write_strand_columns(pileup, position_counts)?;
                    }
                    writeln!(pileup)?;
                }

                if config.mode == 6 {
                    let pileup = files.pileup.as_mut().context("Missing pileup writer")?;
                    write_mode6_row(pileup, region, pos, ref_base, position_counts)?;
                }

                if matches!(config.mode, 0 | 1) && position_counts.alt_sum(ref_base) > 0 {
                    let (alt_base, alt_count) = position_counts.find_alternative(ref_base);
                    let cov = position_counts.base_count(ref_base) + alt_count;
                    if cov >= config.mdc {
                        let snvs = files.snvs.as_mut().context("Missing pabs writer")?;
                        write_snv_base(
                            snvs,
                            region,
                            pos,
                            ref_base,
                            alt_base,
                            alt_count,
                            position_counts,
                        )?;
                        if config.strand_bias {
                            write_strand_columns(snvs, position_counts)?;
                        }
                        writeln!(snvs)?;
                    }
                }
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::genotype::GenotypeModel;
    use std::fs;

    fn config(mode: u8, out: &Path) -> Config {
        Config {
            bam: "sample.bam".into(),
            fasta: "ref.fa".into(),
            out: out.to_str().unwrap().into(),
            mode,
            mbq: 20,
            mrq: 1,
            mdc: 0,
            strand_bias: mode == 6,
            dedup: false,
            dedup_window: 1000,
            region_perc: 0.5,
            genotype: None,
        }
    }

    fn region_with(
        chrom: &str,
        from: u32,
        to: u32,
        sequence: &str,
        counts: Vec<BaseCounts>,
    ) -> Region {
        let mut region = Region::new(chrom.into(), from, to);
        assert_eq!(region.n_positions(), counts.len());
        assert_eq!(region.n_positions(), sequence.len());
        region.sequence = Some(sequence.as_bytes().to_vec());
        region.counts = Some(counts);
        region
    }

    fn base(base: u8, count: u32) -> BaseCounts {
        let mut counts = BaseCounts::default();
        match base {
            b'A' => counts.a = count,
            b'C' => counts.c = count,
            b'G' => counts.g = count,
            b'T' => counts.t = count,
            _ => panic!("unexpected base"),
        }
        counts
    }

    fn read(dir: &Path, name: &str) -> String {
        fs::read_to_string(dir.join(name)).unwrap()
    }

    #[test]
    fn mode4_pileup_rows_and_header() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = config(4, dir.path());
        // reference disagrees with the single read everywhere
        let regions = vec![region_with(
            "chr1",
            100,
            102,
            "TTT",
            vec![base(b'A', 1), base(b'C', 1), base(b'G', 1)],
        )];
        let order = ChromOrder::from_bed(&["chr1".to_string()]);

        write_output(&regions, &[], &order, &cfg, "sample").unwrap();

        let pileup = read(dir.path(), "sample.pileup");
        let expected = "chr\tpos\tref\tA\tC\tG\tT\taf\tcov\n\
                        chr1\t100\tT\t1\t0\t0\t0\t1.000000\t1\n\
                        chr1\t101\tT\t0\t1\t0\t0\t1.000000\t1\n\
                        chr1\t102\tT\t0\t0\t1\t0\t1.000000\t1\n";
        assert_eq!(expected, pileup);
    }

    #[test]
    fn mode4_reference_matching_read_has_zero_af() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = config(4, dir.path());
        let regions = vec![region_with("chr1", 100, 100, "A", vec![base(b'A', 5)])];
        let order = ChromOrder::from_bed(&["chr1".to_string()]);

        write_output(&regions, &[], &order, &cfg, "sample").unwrap();

        let pileup = read(dir.path(), "sample.pileup");
        assert!(pileup.ends_with("chr1\t100\tA\t5\t0\t0\t0\t0.000000\t5\n"));
    }

    #[test]
    fn mode6_strand_fractions() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = config(6, dir.path());
        let mut counts = base(b'A', 8);
        counts.a_rev = 2;
        counts.del = 1;
        let regions = vec![region_with("chr1", 100, 100, "A", vec![counts])];
        let order = ChromOrder::from_bed(&["chr1".to_string()]);

        write_output(&regions, &[], &order, &cfg, "sample").unwrap();

        let pileup = read(dir.path(), "sample.pileup");
        let mut lines = pileup.lines();
        assert_eq!(
            "chr\tpos\tref\tcov\tCountA\tFracA\tStrandA\tCountC\tFracC\tStrandC\tCountG\tFracG\tStrandG\tCountT\tFracT\tStrandT",
            lines.next().unwrap()
        );
        // cov includes the deletion, FracA excludes it, StrandA = (8-2)/8
        assert_eq!(
            "chr1\t100\tA\t9\t8\t1.0000\t0.75\t0\t0.0000\t0.00\t0\t0.0000\t0.00\t0\t0.0000\t0.00",
            lines.next().unwrap()
        );
    }

    #[test]
    fn mode0_snp_rows_and_candidate_suppression() {
        let dir = tempfile::tempdir().unwrap();
        let mut cfg = config(0, dir.path());
        cfg.genotype = Some(GenotypeModel::Fraction);

        // position 100 is a known SNP with A=8 G=2, position 101 is a
        // plain SNV candidate
        let mut snp_counts = base(b'A', 8);
        snp_counts.g = 2;
        let mut snv_counts = base(b'C', 6);
        snv_counts.t = 3;
        let mut regions = vec![region_with("chr1", 100, 101, "AC", vec![snp_counts, snv_counts])];
        regions[0].from_sel = 100;
        regions[0].to_sel = 101;
        let snps = vec![Snp {
            chrom: "chr1".into(),
            pos: 100,
            rsid: "rs1".into(),
            ref_base: b'A',
            alt_base: b'G',
        }];
        let order = ChromOrder::merged(&["chr1".to_string()], &["chr1".to_string()]).unwrap();

        write_output(&regions, &snps, &order, &cfg, "sample").unwrap();

        let snps_out = read(dir.path(), "sample.snps");
        assert_eq!(
            "chr\tpos\trsid\tref\talt\tA\tC\tG\tT\taf\tcov\tgenotype\n\
             chr1\t100\trs1\tA\tG\t8\t0\t2\t0\t0.200000\t10\t0/1\n",
            snps_out
        );

        // the SNP position must not leak into the candidate table
        let pabs = read(dir.path(), "sample.pabs");
        assert_eq!(
            "chr\tpos\tref\talt\tA\tC\tG\tT\taf\tcov\n\
             chr1\t101\tC\tT\t0\t6\t0\t3\t0.333333\t9\n",
            pabs
        );

        // mode 0 also writes the region read-count table
        let rc = read(dir.path(), "sample.rc");
        assert!(rc.starts_with("chr\tfrom\tto\tfromS\ttoS\trc\trcS\tgc\n"));
        assert!(rc.contains("chr1\t100\t101\t100\t101\t0.00\t0.00\t0.00"));
    }

    #[test]
    fn mdc_gates_snp_and_candidate_rows() {
        let dir = tempfile::tempdir().unwrap();
        let mut cfg = config(0, dir.path());
        cfg.mdc = 15;

        let mut snp_counts = base(b'A', 8);
        snp_counts.g = 2;
        let mut snv_counts = base(b'C', 6);
        snv_counts.t = 3;
        let regions = vec![region_with("chr1", 100, 101, "AC", vec![snp_counts, snv_counts])];
        let snps = vec![Snp {
            chrom: "chr1".into(),
            pos: 100,
            rsid: "rs1".into(),
            ref_base: b'A',
            alt_base: b'G',
        }];
        let order = ChromOrder::merged(&["chr1".to_string()], &["chr1".to_string()]).unwrap();

        write_output(&regions, &snps, &order, &cfg, "sample").unwrap();

        // both rows fall below the coverage threshold: headers only
        assert_eq!(1, read(dir.path(), "sample.snps").lines().count());
        assert_eq!(1, read(dir.path(), "sample.pabs").lines().count());
    }

    #[test]
    fn mode5_appends_rsid_column() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = config(5, dir.path());

        let mut snp_counts = base(b'A', 8);
        snp_counts.g = 2;
        let plain = base(b'C', 4);
        let regions = vec![region_with("chr1", 100, 101, "AC", vec![snp_counts, plain])];
        let snps = vec![Snp {
            chrom: "chr1".into(),
            pos: 100,
            rsid: "rs1".into(),
            ref_base: b'A',
            alt_base: b'G',
        }];
        let order = ChromOrder::merged(&["chr1".to_string()], &["chr1".to_string()]).unwrap();

        write_output(&regions, &snps, &order, &cfg, "sample").unwrap();

        let pileup = read(dir.path(), "sample.pileup");
        let expected = "chr\tpos\tref\tA\tC\tG\tT\taf\tcov\trsid\n\
                        chr1\t100\tA\t8\t0\t2\t0\t0.200000\t10\trs1\n\
                        chr1\t101\tC\t0\t4\t0\t0\t0.000000\t4\t\n";
        assert_eq!(expected, pileup);

        let pabs = read(dir.path(), "sample.pabs");
        assert_eq!(
            "chr\tpos\tref\talt\tA\tC\tG\tT\taf\tcov\trsid\n\
             chr1\t100\tA\tG\t8\t0\t2\t0\t0.200000\t10\trs1\n",
            pabs
        );
    }

    #[test]
    fn tied_alternatives_report_n() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = config(0, dir.path());

        let mut counts = base(b'A', 8);
        counts.c = 3;
        counts.g = 3;
        let regions = vec![region_with("chr1", 100, 100, "A", vec![counts])];
        let order = ChromOrder::from_bed(&["chr1".to_string()]);

        write_output(&regions, &[], &order, &cfg, "sample").unwrap();

        let pabs = read(dir.path(), "sample.pabs");
        // tied C and G: alt is N, candidate coverage collapses to ref
        assert!(pabs.contains("chr1\t100\tA\tN\t8\t3\t3\t0\t0.000000\t8\n"));
    }

    #[test]
    fn mode3_writes_rc_only() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = config(3, dir.path());

        let mut region = Region::new("chr1".into(), 100, 109);
        region.from_sel = 102;
        region.to_sel = 105;
        region.read_count = 12.5;
        region.read_count_global = 8.25;
        region.gc = 0.4;
        let order = ChromOrder::from_bed(&["chr1".to_string()]);

        write_output(&[region], &[], &order, &cfg, "sample").unwrap();

        let rc = read(dir.path(), "sample.rc");
        assert_eq!(
            "chr\tfrom\tto\tfromS\ttoS\trc\trcS\tgc\n\
             chr1\t100\t109\t102\t105\t8.25\t12.50\t0.40\n",
            rc
        );
        assert!(!dir.path().join("sample.pileup").exists());
        assert!(!dir.path().join("sample.snps").exists());
        assert!(!dir.path().join("sample.pabs").exists());
    }

    #[test]
    fn mode2_writes_snps_only() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = config(2, dir.path());

        let mut counts = base(b'A', 8);
        counts.g = 2;
        let regions = vec![region_with("chr1", 100, 100, "A", vec![counts])];
        let snps = vec![Snp {
            chrom: "chr1".into(),
            pos: 100,
            rsid: "rs1".into(),
            ref_base: b'A',
            alt_base: b'G',
        }];
        let order = ChromOrder::merged(&["chr1".to_string()], &["chr1".to_string()]).unwrap();

        write_output(&regions, &snps, &order, &cfg, "sample").unwrap();

        assert!(dir.path().join("sample.snps").exists());
        assert!(!dir.path().join("sample.pabs").exists());
        assert!(!dir.path().join("sample.pileup").exists());
        assert!(!dir.path().join("sample.rc").exists());
    }

    #[test]
    fn snp_cursor_spans_regions_and_chromosomes() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = config(2, dir.path());

        let regions = vec![
            region_with("chr1", 100, 101, "AA", vec![base(b'A', 4), base(b'A', 4)]),
            region_with("chr2", 50, 51, "CC", vec![base(b'C', 6), base(b'C', 6)]),
        ];
        let snps = vec![
            Snp {
                chrom: "chr1".into(),
                pos: 10,
                rsid: "rs_before".into(),
                ref_base: b'A',
                alt_base: b'G',
            },
            Snp {
                chrom: "chr1".into(),
                pos: 101,
                rsid: "rs_in1".into(),
                ref_base: b'A',
                alt_base: b'C',
            },
            Snp {
                chrom: "chr2".into(),
                pos: 51,
                rsid: "rs_in2".into(),
                ref_base: b'C',
                alt_base: b'T',
            },
        ];
        let order = ChromOrder::merged(
            &["chr1".to_string(), "chr2".to_string()],
            &["chr1".to_string(), "chr2".to_string()],
        )
        .unwrap();

        write_output(&regions, &snps, &order, &cfg, "sample").unwrap();

        let snps_out = read(dir.path(), "sample.snps");
        assert!(!snps_out.contains("rs_before"));
        assert!(snps_out.contains("chr1\t101\trs_in1\tA\tC\t4\t0\t0\t0\t0.000000\t4"));
        assert!(snps_out.contains("chr2\t51\trs_in2\tC\tT\t0\t6\t0\t0\t0.000000\t6"));
    }
}
