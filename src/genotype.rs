//! # Genotype calling at known SNP sites
//!
//! Two callers over the reference/alternative allele counts of a site:
//! a plain allelic-fraction cutoff (heterozygous band between 0.2 and
//! 0.8) and a two-sided binomial test under a normal approximation with
//! a null reference fraction of 0.55, significant at 1%.
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Genotype {
    HomRef,
    Het,
    HomAlt,
}

impl fmt::Display for Genotype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Genotype::HomRef => "0/0",
            Genotype::Het => "0/1",
            Genotype::HomAlt => "1/1",
        };
        write!(f, "{name}")
    }
}

/// Which calling rule to apply at SNP sites.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenotypeModel {
    /// Allelic-fraction cutoff at 20% / 80%.
    Fraction,
    /// Two-sided binomial test, normal approximation, alpha 1%.
    BinomialTest,
}

pub fn call(model: GenotypeModel, ref_count: u32, alt_count: u32) -> Genotype {
    match model {
        GenotypeModel::Fraction => call_fraction(ref_count, alt_count),
        GenotypeModel::BinomialTest => call_binomial(ref_count, alt_count),
    }
}

fn call_fraction(ref_count: u32, alt_count: u32) -> Genotype {
    let cov = ref_count + alt_count;
    let af = if cov > 0 {
        f64::from(alt_count) / f64::from(cov)
    } else {
        0.
    };

    if af < 0.2 {
        Genotype::HomRef
    } else if af <= 0.8 {
        Genotype::Het
    } else {
        Genotype::HomAlt
    }
}

const P_NULL: f64 = 0.55;
const Q_NULL: f64 = 0.45;
const ALPHA: f64 = 0.01;

fn call_binomial(ref_count: u32, alt_count: u32) -> Genotype {
    let n = f64::from(ref_count + alt_count);
    if n == 0. {
        // no observations, the null cannot be rejected
        return Genotype::Het;
    }

    let z = ((f64::from(ref_count) / n - P_NULL) / (P_NULL * Q_NULL / n).sqrt()).abs();
    let pval = 2. * (1. - normal_cdf(z, 0., 1.));

    if pval <= ALPHA && ref_count > alt_count {
        Genotype::HomRef
    } else if pval <= ALPHA && ref_count < alt_count {
        Genotype::HomAlt
    } else {
        Genotype::Het
    }
}

/// Abramowitz & Stegun polynomial approximation of the error function
/// (formula 7.1.26, absolute error below 1.5e-7).
fn erf(x: f64) -> f64 {
    let y = 1.0 / (1.0 + 0.3275911 * x);
    1.0 - (((((1.061405429 * y - 1.453152027) * y + 1.421413741) * y - 0.284496736) * y
        + 0.254829592)
        * y)
        * (-x * x).exp()
}

fn normal_cdf(x: f64, mu: f64, sigma: f64) -> f64 {
    0.5 * (1.0 + erf((x - mu) / (sigma * std::f64::consts::SQRT_2)))
}
