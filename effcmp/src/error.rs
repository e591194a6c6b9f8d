//! Error types of this crate.

use thiserror::Error;

/// Error that is returned when a curve can not be used to compute a ratio.
#[derive(Debug, Error)]
pub enum MalformedCurveError {
    /// The curve has no points or bins.
    #[error("the {role} curve has no points")]
    Empty {
        /// Which side of the ratio the curve was on, `reference` or `test`.
        role: &'static str,
    },
    /// The declared domains of reference and test do not overlap, so no point can be matched.
    #[error(
        "the reference domain [{ref_min}, {ref_max}] and the test domain [{test_min}, {test_max}] do not overlap"
    )]
    DisjointDomains {
        /// Lower end of the reference domain.
        ref_min: f64,
        /// Upper end of the reference domain.
        ref_max: f64,
        /// Lower end of the test domain.
        test_min: f64,
        /// Upper end of the test domain.
        test_max: f64,
    },
    /// Reference and test histograms were filled with different binnings.
    #[error("the reference has {ref_bins} bins but the test has {test_bins} bins")]
    BinCountMismatch {
        /// Number of reference bins.
        ref_bins: usize,
        /// Number of test bins.
        test_bins: usize,
    },
    /// Reference and test histograms have the same number of bins, but different limits.
    #[error("the bin limits of reference and test differ")]
    BinLimitsMismatch,
    /// A histogram reference was paired with a profile test.
    #[error("a profile can only be divided by a histogram if the reference is a profile too")]
    MixedKinds,
    /// The contents and errors of a histogram have different lengths.
    #[error("expected {expected} values per bin vector, found {found}")]
    InconsistentBins {
        /// Number of bins given by the limits.
        expected: usize,
        /// Number of values actually found.
        found: usize,
    },
}

/// Catch-all error for this crate.
#[derive(Debug, Error)]
pub enum Error {
    /// A curve could not be used.
    #[error(transparent)]
    MalformedCurve(#[from] MalformedCurveError),
}

/// Result type used throughout this crate.
pub type Result<T> = std::result::Result<T, Error>;
