//! # Region
//!
//! Module containing the struct representing one capture interval.
//! [`Region`] is built from a BED line and lives until process end; the
//! worker that owns it attaches the reference slice, the per-position
//! counter array, and the region-level read-count and GC statistics that
//! the writer reads back after the parallel phase has joined.
use crate::pileup::BaseCounts;

/// One capture interval. `from` and `to` are 1-based inclusive
/// (BED `start + 1` and `end`). The optional fields are populated by the
/// worker processing the region; modes that never read them back leave
/// them empty to keep the per-region footprint small.
#[derive(Debug)]
pub struct Region {
    pub chrom: String,
    pub from: u32,
    pub to: u32,
    /// Uppercased reference slice covering `[from, to]`.
    pub sequence: Option<Vec<u8>>,
    /// One counter record per position in `[from, to]`.
    pub counts: Option<Vec<BaseCounts>>,
    pub from_sel: u32,
    pub to_sel: u32,
    pub read_count: f64,
    pub read_count_global: f64,
    pub gc: f64,
}

impl Region {
    pub fn new(chrom: String, from: u32, to: u32) -> Self {
        Region {
            chrom,
            from,
            to,
            sequence: None,
            counts: None,
            from_sel: 0,
            to_sel: 0,
            read_count: 0.,
            read_count_global: 0.,
            gc: 0.,
        }
    }

    /// Region span `L = to - from`. The counter array holds `L + 1` slots.
    pub fn span(&self) -> u32 {
        self.to - self.from
    }

    pub fn n_positions(&self) -> usize {
        self.span() as usize + 1
    }

    pub fn fetch_definition_s(&self) -> String {
        format!("{}:{}-{}", self.chrom, self.from, self.to)
    }

    /// Slide a window of width `⌊L·perc⌋` over the region and record the
    /// leftmost window with the maximal `A+C+G+T` sum. Sets `from_sel`,
    /// `to_sel`, the peak per-base mean `read_count` and the global
    /// per-base mean `read_count_global` (both divided by `L`, matching
    /// the legacy read-count definition: no window ever ends on the last
    /// counter slot, but the global sum covers it).
    pub fn compute_read_counts(&mut self, counts: &[BaseCounts], perc: f64) {
        let span = self.span() as usize;
        let width = (span as f64 * perc).floor() as usize;

        if width == 0 {
            let sum = counts[0].total();
            self.read_count = f64::from(sum);
            self.read_count_global = f64::from(sum);
            self.from_sel = self.from;
            self.to_sel = self.to;
            return;
        }

        let mut window_sum: u64 = counts[..width].iter().map(|c| u64::from(c.total())).sum();
        let mut max_sum = 0u64;
        self.from_sel = self.from;
        self.to_sel = self.from + width as u32 - 1;

        for init in 0..=span - width {
            if init > 0 {
                window_sum -= u64::from(counts[init - 1].total());
                window_sum += u64::from(counts[init + width - 1].total());
            }
            if window_sum > max_sum {
                max_sum = window_sum;
                self.from_sel = self.from + init as u32;
                self.to_sel = self.from + (init + width) as u32 - 1;
            }
        }

        let total: u64 = counts.iter().map(|c| u64::from(c.total())).sum();
        self.read_count = max_sum as f64 / width as f64;
        self.read_count_global = total as f64 / span as f64;
    }

    /// Fraction of G/C bases over the first `max(1, L)` bases of the
    /// reference slice.
    pub fn compute_gc(&mut self, sequence: &[u8]) {
        let len = std::cmp::max(1, self.span() as usize);
        let count = sequence[..len]
            .iter()
            .filter(|&&base| base == b'G' || base == b'C')
            .count();
        self.gc = count as f64 / len as f64;
    }
}
