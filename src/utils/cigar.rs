//! # CIGAR Utils
//!
//! Functions to check which category CIGAR operations fall into,
//! which informs how they are interpreted during pileup and
//! duplicate endpoint computation.
use rust_htslib::bam::record::{Cigar, CigarStringView};

/// Check if the provided cigar operation `cigar` advances the
/// position in the reference sequence.
pub fn consumes_ref(cigar: &Cigar) -> bool {
    matches!(
        cigar,
        Cigar::Match(_) | Cigar::Del(_) | Cigar::RefSkip(_) | Cigar::Equal(_) | Cigar::Diff(_)
    )
}

/// Number of reference bases spanned by the alignment: the sum of the
/// lengths of all reference-consuming operations.
pub fn reference_span(cigar: &CigarStringView) -> i64 {
    cigar
        .iter()
        .filter(|op| consumes_ref(op))
        .map(|op| i64::from(op.len()))
        .sum()
}
