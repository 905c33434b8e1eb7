//! # On-the-fly duplicate collapsing
//!
//! Two-pass template collapser run per region before counting. Pass one
//! fetches every record in the region plus a flanking window and folds
//! mates into templates keyed by read name, recording each mate's outer
//! coordinate (5'-most reference position including soft clips). Pass two
//! groups templates by their endpoint key and keeps the template with the
//! widest aligned span per group. The surviving read names gate the
//! pileup's counting fetch.
//!
//! Templates iterate in fetch order (insertion-ordered map), so on equal
//! spans the first-encountered template wins and the outcome does not
//! depend on hashing.
use anyhow::{Context, Result};
use indexmap::IndexMap;
use rust_htslib::bam::{self, Read, Record};
use std::collections::{hash_map::Entry, HashMap, HashSet};

use crate::utils::cigar;

/// Mate endpoints gathered for one read name. Slots hold `(target id,
/// outer coordinate)` with `-1` marking an unfilled slot, so a template
/// whose mate falls outside the fetch window still forms a stable key.
#[derive(Debug)]
pub struct Template {
    chr1: i32,
    pos1: i64,
    chr2: i32,
    pos2: i64,
    paired: bool,
    pub insert_size: i64,
    pub bp: i64,
}

/// Endpoint identity of a template. Two templates with the same key are
/// duplicates of one another.
#[derive(Debug, Hash, PartialEq, Eq)]
pub enum GroupKey {
    Paired {
        chr1: i32,
        chr2: i32,
        pos1: i64,
        pos2: i64,
    },
    Single {
        chr: i32,
        pos: i64,
    },
}

impl Template {
    fn new(record: &Record) -> Self {
        Template {
            chr1: -1,
            pos1: -1,
            chr2: -1,
            pos2: -1,
            paired: record.is_paired() && !record.is_mate_unmapped(),
            insert_size: record.insert_size().abs(),
            bp: 0,
        }
    }

    /// Fold one mate into the template. Forward mates anchor at
    /// `pos - leading_softclips` and fill slot 1 first; reverse mates
    /// anchor at the reference end plus trailing soft clips and fill
    /// slot 2 first. The aligned span accumulates into `bp`, the
    /// survivor tie-breaker.
    fn observe(&mut self, record: &Record) {
        let cigar_view = record.cigar();
        if !record.is_reverse() {
            let outer = record.pos() - cigar_view.leading_softclips();
            if self.pos1 < 0 {
                self.pos1 = outer;
                self.chr1 = record.tid();
            } else {
                self.pos2 = outer;
                self.chr2 = record.tid();
            }
            self.bp = cigar::reference_span(&cigar_view);
        } else {
            let outer =
                record.pos() + cigar::reference_span(&cigar_view) + cigar_view.trailing_softclips();
            if self.pos2 < 0 {
                self.pos2 = outer;
                self.chr2 = record.tid();
            } else {
                self.pos1 = outer;
                self.chr1 = record.tid();
            }
            self.bp += outer - record.pos();
        }
    }

    fn group_key(&self) -> GroupKey {
        if self.paired {
            let (chr1, pos1, chr2, pos2) = if self.chr1 == self.chr2 {
                if self.pos1 <= self.pos2 {
                    (self.chr1, self.pos1, self.chr2, self.pos2)
                } else {
                    (self.chr2, self.pos2, self.chr1, self.pos1)
                }
            } else if self.chr1 < self.chr2 {
                (self.chr1, self.pos1, self.chr2, self.pos2)
            } else {
                (self.chr2, self.pos2, self.chr1, self.pos1)
            };
            GroupKey::Paired {
                chr1,
                chr2,
                pos1,
                pos2,
            }
        } else if self.pos1 < 0 {
            GroupKey::Single {
                chr: self.chr2,
                pos: self.pos2,
            }
        } else {
            GroupKey::Single {
                chr: self.chr1,
                pos: self.pos1,
            }
        }
    }
}

fn assemble_templates<'a, I>(records: I) -> IndexMap<Vec<u8>, Template>
where
    I: IntoIterator<Item = &'a Record>,
{
    let mut templates: IndexMap<Vec<u8>, Template> = IndexMap::new();
    for record in records {
        let template = templates
            .entry(record.qname().to_vec())
            .or_insert_with(|| Template::new(record));
        template.observe(record);
    }
    templates
}

/// Collapse a batch of records into the set of surviving read names:
/// template assembly followed by endpoint grouping.
pub fn collapse<'a, I>(records: I) -> HashSet<Vec<u8>>
where
    I: IntoIterator<Item = &'a Record>,
{
    select_survivors(&assemble_templates(records))
}

/// One surviving name per endpoint group: the template with the strictly
/// largest `bp`; ties keep the first template in fetch order.
fn select_survivors(templates: &IndexMap<Vec<u8>, Template>) -> HashSet<Vec<u8>> {
    let mut groups: HashMap<GroupKey, (&Vec<u8>, i64)> = HashMap::new();
    for (name, template) in templates {
        match groups.entry(template.group_key()) {
            Entry::Vacant(entry) => {
                entry.insert((name, template.bp));
            }
            Entry::Occupied(mut entry) => {
                if template.bp > entry.get().1 {
                    entry.insert((name, template.bp));
                }
            }
        }
    }
    groups.into_values().map(|(name, _)| name.clone()).collect()
}

/// Run both collapser passes over `[begin - window, end + window)` on
/// `tid` and return the read names whose template survived.
pub fn surviving_names(
    bam: &mut bam::IndexedReader,
    tid: i32,
    begin: i64,
    end: i64,
    window: i64,
) -> Result<HashSet<Vec<u8>>> {
    let fetch_begin = std::cmp::max(0, begin - window);
    let fetch_end = end + window;
    bam.fetch((tid, fetch_begin, fetch_end)).with_context(|| {
        format!("Error fetching duplicate-collapse window {tid}:{fetch_begin}-{fetch_end}")
    })?;

    let mut records = Vec::new();
    let mut record = Record::new();
    while let Some(result) = bam.read(&mut record) {
        result.context("Encountered faulty read during duplicate collapsing")?;
        records.push(record.clone());
    }

    Ok(collapse(records.iter()))
}
