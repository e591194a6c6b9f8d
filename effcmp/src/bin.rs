//! Module that contains helpers for binned curves.

use super::convert::f64_from_usize;
use float_cmp::approx_eq;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq)]
enum Limits {
    Equal { left: f64, right: f64, bins: usize },
    Unequal { limits: Vec<f64> },
}

/// Structure representing bin limits. Equally-sized bins are stored by their outer limits only.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(from = "Vec<f64>", into = "Vec<f64>")]
pub struct BinLimits(Limits);

impl From<Vec<f64>> for BinLimits {
    fn from(limits: Vec<f64>) -> Self {
        Self::new(limits)
    }
}

impl From<BinLimits> for Vec<f64> {
    fn from(limits: BinLimits) -> Self {
        limits.limits()
    }
}

impl BinLimits {
    /// Constructor for `BinLimits`. The limits are sorted; fewer than two limits result in zero
    /// bins.
    #[must_use]
    pub fn new(mut limits: Vec<f64>) -> Self {
        limits.sort_by(f64::total_cmp);

        if limits.len() >= 2
            && limits
                .windows(2)
                .map(|pair| pair[1] - pair[0])
                .collect::<Vec<f64>>()
                .windows(2)
                .all(|val| approx_eq!(f64, val[0], val[1], ulps = 8))
        {
            Self(Limits::Equal {
                left: limits[0],
                right: limits[limits.len() - 1],
                bins: limits.len() - 1,
            })
        } else {
            Self(Limits::Unequal { limits })
        }
    }

    /// Returns the number of bins.
    #[must_use]
    pub fn bins(&self) -> usize {
        match &self.0 {
            Limits::Equal { bins, .. } => *bins,
            Limits::Unequal { limits } => limits.len().saturating_sub(1),
        }
    }

    /// Returns the left-most bin limit.
    #[must_use]
    pub fn left(&self) -> f64 {
        match &self.0 {
            Limits::Unequal { limits } => limits.first().copied().unwrap_or(0.0),
            Limits::Equal { left, .. } => *left,
        }
    }

    /// Returns the right-most bin limit.
    #[must_use]
    pub fn right(&self) -> f64 {
        match &self.0 {
            Limits::Unequal { limits } => limits.last().copied().unwrap_or(0.0),
            Limits::Equal { right, .. } => *right,
        }
    }

    /// Returns the limits in a `Vec`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use effcmp::bin::BinLimits;
    ///
    /// // example with equally sized bins
    /// let equal_bins = BinLimits::new(vec![0.25, 0.5, 0.75, 1.0]);
    /// assert_eq!(equal_bins.limits(), vec![0.25, 0.5, 0.75, 1.0]);
    ///
    /// // example with unequally sized bins
    /// let unequal_bins = BinLimits::new(vec![0.125, 0.25, 1.0, 1.5]);
    /// assert_eq!(unequal_bins.limits(), vec![0.125, 0.25, 1.0, 1.5]);
    /// ```
    #[must_use]
    pub fn limits(&self) -> Vec<f64> {
        match &self.0 {
            Limits::Equal { left, right, bins } => (0..=*bins)
                .map(|b| (*right - *left).mul_add(f64_from_usize(b) / f64_from_usize(*bins), *left))
                .collect(),
            Limits::Unequal { limits } => limits.clone(),
        }
    }

    /// Returns the size for each bin.
    #[must_use]
    pub fn bin_sizes(&self) -> Vec<f64> {
        match &self.0 {
            Limits::Equal { left, right, bins } => {
                vec![(*right - *left) / f64_from_usize(*bins); *bins]
            }
            Limits::Unequal { limits } => limits.windows(2).map(|x| x[1] - x[0]).collect(),
        }
    }

    /// Returns the center of each bin.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use effcmp::bin::BinLimits;
    ///
    /// let bins = BinLimits::new(vec![0.0, 1.0, 3.0]);
    /// assert_eq!(bins.centers(), vec![0.5, 2.0]);
    /// ```
    #[must_use]
    pub fn centers(&self) -> Vec<f64> {
        self.limits()
            .windows(2)
            .map(|pair| 0.5 * (pair[0] + pair[1]))
            .collect()
    }

    /// Returns `true` if `self` and `other` have the same number of bins and all limits agree
    /// within a few ulps.
    #[must_use]
    pub fn compatible(&self, other: &Self) -> bool {
        self.bins() == other.bins()
            && self
                .limits()
                .iter()
                .zip(other.limits())
                .all(|(&lhs, rhs)| approx_eq!(f64, lhs, rhs, ulps = 8))
    }
}
