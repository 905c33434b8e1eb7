//! # Pileup engine
//!
//! Fetches every record overlapping a capture region and folds its aligned
//! bases into the region's per-position counter array. Base selection
//! follows the conventional pileup rules: a read base is tallied only when
//! the record is mapped, primary, not QC-failed, not flagged duplicate,
//! its mapping quality reaches `mrq` and the base quality reaches `mbq`.
//! Deletion spans are tallied unconditionally so deletion depth reflects
//! every fetched template.
use anyhow::{Context, Result};
use rust_htslib::bam::{self, record::Cigar, Read, Record};
use std::collections::HashSet;

/// Per-position tallies for one reference position: counts per base, the
/// reverse-strand share per base, and the number of deletions observed.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BaseCounts {
    pub a: u32,
    pub c: u32,
    pub g: u32,
    pub t: u32,
    pub a_rev: u32,
    pub c_rev: u32,
    pub g_rev: u32,
    pub t_rev: u32,
    pub del: u32,
}

impl BaseCounts {
    /// Total base coverage `A+C+G+T` (deletions excluded).
    pub fn total(&self) -> u32 {
        self.a + self.c + self.g + self.t
    }

    /// Count for a single base, 0 for anything outside `ACGT`.
    pub fn base_count(&self, base: u8) -> u32 {
        match base {
            b'A' => self.a,
            b'C' => self.c,
            b'G' => self.g,
            b'T' => self.t,
            _ => 0,
        }
    }

    /// Reverse-strand count for a single base.
    pub fn rev_count(&self, base: u8) -> u32 {
        match base {
            b'A' => self.a_rev,
            b'C' => self.c_rev,
            b'G' => self.g_rev,
            b'T' => self.t_rev,
            _ => 0,
        }
    }

    /// Sum of the three bases other than `ref_base`; 0 when `ref_base`
    /// is not one of `ACGT`.
    pub fn alt_sum(&self, ref_base: u8) -> u32 {
        match ref_base {
            b'A' | b'C' | b'G' | b'T' => self.total() - self.base_count(ref_base),
            _ => 0,
        }
    }

    /// The alternative allele at this position: the strict maximum among
    /// the three non-reference bases, or `(b'N', 0)` when two or more
    /// bases are tied for the maximum.
    pub fn find_alternative(&self, ref_base: u8) -> (u8, u32) {
        let candidates: Vec<(u8, u32)> = [b'A', b'C', b'G', b'T']
            .iter()
            .filter(|&&b| b != ref_base)
            .map(|&b| (b, self.base_count(b)))
            .collect();

        let (mut alt, mut max) = candidates[0];
        for &(base, count) in &candidates[1..] {
            if count > max {
                alt = base;
                max = count;
            }
        }
        if candidates.iter().filter(|&&(_, count)| count == max).count() > 1 {
            return (b'N', 0);
        }
        (alt, max)
    }

    fn add_base(&mut self, base: u8, reverse: bool) {
        match base {
            b'A' => self.a += 1,
            b'C' => self.c += 1,
            b'G' => self.g += 1,
            b'T' => self.t += 1,
            _ => return,
        }
        if reverse {
            match base {
                b'A' => self.a_rev += 1,
                b'C' => self.c_rev += 1,
                b'G' => self.g_rev += 1,
                b'T' => self.t_rev += 1,
                _ => (),
            }
        }
    }
}

/// Read- and base-level acceptance thresholds for the pileup.
#[derive(Debug, Clone, Copy)]
pub struct ReadFilters {
    pub mbq: u8,
    pub mrq: u8,
    pub strand_bias: bool,
}

/// Record-level screen: mapped, primary, QC-pass, not flagged duplicate,
/// mapping quality at least `mrq`.
fn record_passes(record: &Record, mrq: u8) -> bool {
    !(record.is_unmapped()
        || record.is_secondary()
        || record.is_quality_check_failed()
        || record.is_duplicate())
        && record.mapq() >= mrq
}

/// Walk the record's CIGAR and fold its bases into `counts`, which covers
/// reference positions `[begin, begin + counts.len())` (0-based).
/// Aligned bases outside the window are ignored; deletion spans increment
/// the deletion counter for every covered in-window position.
pub fn pile_record(counts: &mut [BaseCounts], begin: i64, record: &Record, filters: &ReadFilters) {
    let record_ok = record_passes(record, filters.mrq);
    let seq = record.seq().as_bytes();
    let quals = record.qual();
    let count_reverse = filters.strand_bias && record.is_reverse();

    let mut ref_pos = record.pos();
    let mut query_pos = 0usize;
    for op in record.cigar().iter() {
        let len = i64::from(op.len());
        match op {
            Cigar::Match(_) | Cigar::Equal(_) | Cigar::Diff(_) => {
                for offset in 0..len {
                    let slot = ref_pos + offset - begin;
                    if slot < 0 || slot as usize >= counts.len() {
                        continue;
                    }
                    let query = query_pos + offset as usize;
                    if record_ok && quals[query] >= filters.mbq {
                        counts[slot as usize].add_base(seq[query], count_reverse);
                    }
                }
                ref_pos += len;
                query_pos += len as usize;
            }
            Cigar::Del(_) => {
                for offset in 0..len {
                    let slot = ref_pos + offset - begin;
                    if slot >= 0 && (slot as usize) < counts.len() {
                        counts[slot as usize].del += 1;
                    }
                }
                ref_pos += len;
            }
            Cigar::RefSkip(_) => ref_pos += len,
            Cigar::Ins(_) | Cigar::SoftClip(_) => query_pos += len as usize,
            Cigar::HardClip(_) | Cigar::Pad(_) => (),
        }
    }
}

/// Fetch all records overlapping `[begin, end)` (0-based half-open) on
/// `tid` and pile them into `counts`. When `keep` is given only records
/// whose name is in the set contribute (the duplicate collapser's
/// surviving templates).
pub fn pileup_region(
    bam: &mut bam::IndexedReader,
    tid: i32,
    begin: i64,
    end: i64,
    counts: &mut [BaseCounts],
    filters: &ReadFilters,
    keep: Option<&HashSet<Vec<u8>>>,
) -> Result<()> {
    bam.fetch((tid, begin, end))
        .with_context(|| format!("Error fetching reads for target {tid}:{begin}-{end}"))?;

    let mut record = Record::new();
    while let Some(result) = bam.read(&mut record) {
        result.context("Encountered faulty read during pileup")?;
        if let Some(keep) = keep {
            if !keep.contains(record.qname()) {
                continue;
            }
        }
        pile_record(counts, begin, &record, filters);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_htslib::bam::{header::HeaderRecord, Header, HeaderView};

    fn header() -> HeaderView {
        let mut header = Header::new();
        let mut contig = HeaderRecord::new(b"SQ");
        contig.push_tag(b"SN", &"chr1");
        contig.push_tag(b"LN", &10000);
        header.push_record(&contig);
        HeaderView::from_header(&header)
    }

    fn record(sam: &str) -> Record {
        Record::from_sam(&header(), sam.as_bytes()).unwrap()
    }

    fn filters(mbq: u8) -> ReadFilters {
        ReadFilters {
            mbq,
            mrq: 1,
            strand_bias: false,
        }
    }

    #[test]
    fn counts_single_read_bases() {
        // region chr1:100-102, read of three matches starting at the
        // region start
        let mut counts = vec![BaseCounts::default(); 3];
        let rec = record("r1\t0\tchr1\t100\t60\t3M\t*\t0\t0\tACG\t???");
        pile_record(&mut counts, 99, &rec, &filters(20));

        assert_eq!(1, counts[0].a);
        assert_eq!(1, counts[1].c);
        assert_eq!(1, counts[2].g);
        assert_eq!(1, counts[0].total());
        assert_eq!(0, counts[0].del);
    }

    #[test]
    fn deletion_counts_del_only() {
        let mut counts = vec![BaseCounts::default(); 3];
        let rec = record("r1\t0\tchr1\t100\t60\t1M1D1M\t*\t0\t0\tAC\t??");
        pile_record(&mut counts, 99, &rec, &filters(20));

        assert_eq!(1, counts[0].a);
        assert_eq!(1, counts[1].del);
        assert_eq!(0, counts[1].total());
        assert_eq!(1, counts[2].c);
    }

    #[test]
    fn base_quality_drop_is_strict() {
        // '?' encodes quality 30: kept at mbq=30, dropped at mbq=31
        let mut counts = vec![BaseCounts::default(); 1];
        let rec = record("r1\t0\tchr1\t100\t60\t1M\t*\t0\t0\tA\t?");
        pile_record(&mut counts, 99, &rec, &filters(30));
        assert_eq!(1, counts[0].a);

        let mut counts = vec![BaseCounts::default(); 1];
        pile_record(&mut counts, 99, &rec, &filters(31));
        assert_eq!(0, counts[0].a);
    }

    #[test]
    fn low_mapq_read_is_rejected() {
        let mut counts = vec![BaseCounts::default(); 1];
        let rec = record("r1\t0\tchr1\t100\t0\t1M\t*\t0\t0\tA\t?");
        let filt = ReadFilters {
            mbq: 20,
            mrq: 1,
            strand_bias: false,
        };
        pile_record(&mut counts, 99, &rec, &filt);
        assert_eq!(0, counts[0].total());
    }

    #[test]
    fn flagged_duplicate_keeps_deletion_depth() {
        // flag 1024: marked duplicate. Bases are rejected but the
        // deletion span still contributes to deletion depth.
        let mut counts = vec![BaseCounts::default(); 3];
        let rec = record("r1\t1024\tchr1\t100\t60\t1M1D1M\t*\t0\t0\tAC\t??");
        pile_record(&mut counts, 99, &rec, &filters(20));

        assert_eq!(0, counts[0].total());
        assert_eq!(1, counts[1].del);
        assert_eq!(0, counts[2].total());
    }

    #[test]
    fn secondary_and_qcfail_are_rejected() {
        for flag in [256, 512, 4] {
            let mut counts = vec![BaseCounts::default(); 1];
            let rec = record(&format!("r1\t{flag}\tchr1\t100\t60\t1M\t*\t0\t0\tA\t?"));
            pile_record(&mut counts, 99, &rec, &filters(20));
            assert_eq!(0, counts[0].total(), "flag {flag} must reject bases");
        }
    }

    #[test]
    fn reverse_strand_counts_when_enabled() {
        let mut counts = vec![BaseCounts::default(); 1];
        let rec = record("r1\t16\tchr1\t100\t60\t1M\t*\t0\t0\tA\t?");
        let filt = ReadFilters {
            mbq: 20,
            mrq: 1,
            strand_bias: true,
        };
        pile_record(&mut counts, 99, &rec, &filt);
        assert_eq!(1, counts[0].a);
        assert_eq!(1, counts[0].a_rev);

        // with strand accounting off, only the plain counter moves
        let mut counts = vec![BaseCounts::default(); 1];
        pile_record(&mut counts, 99, &rec, &filters(20));
        assert_eq!(1, counts[0].a);
        assert_eq!(0, counts[0].a_rev);
    }

    #[test]
    fn soft_clips_and_insertions_consume_query_only() {
        // 2S2M1I1M: clipped and inserted bases must not shift the
        // reference walk
        let mut counts = vec![BaseCounts::default(); 3];
        let rec = record("r1\t0\tchr1\t100\t60\t2S2M1I1M\t*\t0\t0\tTTACGG\t??????");
        pile_record(&mut counts, 99, &rec, &filters(20));

        assert_eq!(1, counts[0].a);
        assert_eq!(1, counts[1].c);
        assert_eq!(1, counts[2].g);
    }

    #[test]
    fn out_of_window_positions_are_ignored() {
        // read spans 98..=103, window covers 100..=101
        let mut counts = vec![BaseCounts::default(); 2];
        let rec = record("r1\t0\tchr1\t98\t60\t6M\t*\t0\t0\tAAAAAA\t??????");
        pile_record(&mut counts, 99, &rec, &filters(20));

        assert_eq!(2, counts.iter().map(|c| c.a).sum::<u32>());
    }

    #[test]
    fn ambiguous_bases_are_ignored() {
        let mut counts = vec![BaseCounts::default(); 1];
        let rec = record("r1\t0\tchr1\t100\t60\t1M\t*\t0\t0\tN\t?");
        pile_record(&mut counts, 99, &rec, &filters(20));
        assert_eq!(0, counts[0].total());
    }

    #[test]
    fn alternative_is_strict_max_or_n() {
        let counts = BaseCounts {
            a: 10,
            c: 1,
            g: 4,
            t: 2,
            ..BaseCounts::default()
        };
        assert_eq!((b'G', 4), counts.find_alternative(b'A'));
        assert_eq!(7, counts.alt_sum(b'A'));

        let tied = BaseCounts {
            a: 10,
            c: 3,
            g: 3,
            t: 1,
            ..BaseCounts::default()
        };
        assert_eq!((b'N', 0), tied.find_alternative(b'A'));

        let empty = BaseCounts::default();
        assert_eq!((b'N', 0), empty.find_alternative(b'C'));
        assert_eq!(0, empty.alt_sum(b'X'));
    }
}
