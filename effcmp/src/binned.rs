//! Binned curves: histograms, profiles and their bin-wise ratio.

use super::bin::BinLimits;
use super::error::{MalformedCurveError, Result};
use ndarray::{Array2, Axis};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

#[derive(Deserialize)]
struct HistogramRepr {
    limits: BinLimits,
    contents: Vec<f64>,
    #[serde(default)]
    errors: Option<Vec<f64>>,
}

/// One-dimensional histogram with an uncertainty for every bin.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(try_from = "HistogramRepr")]
pub struct Histogram {
    limits: BinLimits,
    contents: Vec<f64>,
    errors: Vec<f64>,
}

impl TryFrom<HistogramRepr> for Histogram {
    type Error = MalformedCurveError;

    fn try_from(repr: HistogramRepr) -> std::result::Result<Self, Self::Error> {
        match repr.errors {
            Some(errors) => Self::new(repr.limits, repr.contents, errors),
            None => Self::with_counting_errors(repr.limits, repr.contents),
        }
    }
}

impl Histogram {
    /// Constructor.
    ///
    /// # Errors
    ///
    /// Returns an error if `contents` or `errors` do not have exactly one entry per bin.
    pub fn new(
        limits: BinLimits,
        contents: Vec<f64>,
        errors: Vec<f64>,
    ) -> std::result::Result<Self, MalformedCurveError> {
        for found in [contents.len(), errors.len()] {
            if found != limits.bins() {
                return Err(MalformedCurveError::InconsistentBins {
                    expected: limits.bins(),
                    found,
                });
            }
        }

        Ok(Self {
            limits,
            contents,
            errors,
        })
    }

    /// Creates a histogram of counts, whose uncertainties are the square roots of the contents.
    ///
    /// # Errors
    ///
    /// Returns an error if `contents` does not have exactly one entry per bin.
    pub fn with_counting_errors(
        limits: BinLimits,
        contents: Vec<f64>,
    ) -> std::result::Result<Self, MalformedCurveError> {
        let errors = contents.iter().map(|c| c.abs().sqrt()).collect();
        Self::new(limits, contents, errors)
    }

    /// Returns the bin limits.
    #[must_use]
    pub const fn limits(&self) -> &BinLimits {
        &self.limits
    }

    /// Returns the bin contents.
    #[must_use]
    pub fn contents(&self) -> &[f64] {
        &self.contents
    }

    /// Returns the bin uncertainties.
    #[must_use]
    pub fn errors(&self) -> &[f64] {
        &self.errors
    }

    /// Returns the sum of all bin contents.
    #[must_use]
    pub fn integral(&self) -> f64 {
        self.contents.iter().sum()
    }

    /// Returns a copy of this histogram scaled to unit integral. A histogram with a vanishing
    /// integral is returned unchanged.
    #[must_use]
    pub fn normalized(&self) -> Self {
        let integral = self.integral();

        if integral == 0.0 {
            log::debug!("histogram with vanishing integral is not normalized");
            return self.clone();
        }

        Self {
            limits: self.limits.clone(),
            contents: self.contents.iter().map(|c| c / integral).collect(),
            errors: self.errors.iter().map(|e| e / integral).collect(),
        }
    }

    /// Returns the smallest and largest bin content, or `None` if there are no bins.
    #[must_use]
    pub fn y_extent(&self) -> Option<(f64, f64)> {
        self.contents.iter().fold(None, |acc, &y| {
            Some(acc.map_or((y, y), |(min, max): (f64, f64)| (min.min(y), max.max(y))))
        })
    }

    /// Divides `self` by `denominator` bin by bin, adding the relative uncertainties of both in
    /// quadrature. Bins where the denominator vanishes have content and uncertainty zero.
    ///
    /// # Errors
    ///
    /// Returns an error if the binnings of both histograms differ.
    pub fn divide(&self, denominator: &Self) -> std::result::Result<Self, MalformedCurveError> {
        if self.limits.bins() != denominator.limits.bins() {
            return Err(MalformedCurveError::BinCountMismatch {
                ref_bins: denominator.limits.bins(),
                test_bins: self.limits.bins(),
            });
        }

        if !self.limits.compatible(&denominator.limits) {
            return Err(MalformedCurveError::BinLimitsMismatch);
        }

        let (contents, errors) = self
            .contents
            .iter()
            .zip(&self.errors)
            .zip(denominator.contents.iter().zip(&denominator.errors))
            .map(|((&a, &ea), (&b, &eb))| {
                if b == 0.0 {
                    (0.0, 0.0)
                } else {
                    let b2 = b * b;
                    (a / b, (ea * ea).mul_add(b2, eb * eb * a * a).sqrt() / b2)
                }
            })
            .unzip();

        Ok(Self {
            limits: self.limits.clone(),
            contents,
            errors,
        })
    }
}

/// Accumulated moments of a second variable in one bin of a [`Profile`].
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct ProfileBin {
    /// Number of entries.
    pub entries: f64,
    /// Sum of all values.
    pub sum_y: f64,
    /// Sum of all squared values.
    pub sum_y2: f64,
}

impl ProfileBin {
    /// Returns the mean and the uncertainty of the mean. Empty bins give zero for both.
    #[must_use]
    pub fn mean(&self) -> (f64, f64) {
        if self.entries <= 0.0 {
            return (0.0, 0.0);
        }

        let mean = self.sum_y / self.entries;
        let variance = (self.sum_y2 / self.entries - mean * mean).max(0.0);

        (mean, (variance / self.entries).sqrt())
    }
}

#[derive(Deserialize)]
struct ProfileRepr {
    limits: BinLimits,
    bins: Vec<ProfileBin>,
}

/// Mean of a second variable as a function of the binned variable.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(try_from = "ProfileRepr")]
pub struct Profile {
    limits: BinLimits,
    bins: Vec<ProfileBin>,
}

impl TryFrom<ProfileRepr> for Profile {
    type Error = MalformedCurveError;

    fn try_from(repr: ProfileRepr) -> std::result::Result<Self, Self::Error> {
        Self::new(repr.limits, repr.bins)
    }
}

impl Profile {
    /// Constructor.
    ///
    /// # Errors
    ///
    /// Returns an error if `bins` does not have exactly one entry per bin.
    pub fn new(
        limits: BinLimits,
        bins: Vec<ProfileBin>,
    ) -> std::result::Result<Self, MalformedCurveError> {
        if bins.len() != limits.bins() {
            return Err(MalformedCurveError::InconsistentBins {
                expected: limits.bins(),
                found: bins.len(),
            });
        }

        Ok(Self { limits, bins })
    }

    /// Returns the bin limits.
    #[must_use]
    pub const fn limits(&self) -> &BinLimits {
        &self.limits
    }

    /// Returns the accumulated moments of each bin.
    #[must_use]
    pub fn bins(&self) -> &[ProfileBin] {
        &self.bins
    }

    /// Collapses this profile onto its primary axis: every bin holds the mean and the uncertainty
    /// of the mean.
    #[must_use]
    pub fn projection_x(&self) -> Histogram {
        let (contents, errors) = self.bins.iter().map(ProfileBin::mean).unzip();

        Histogram {
            limits: self.limits.clone(),
            contents,
            errors,
        }
    }
}

#[derive(Deserialize)]
struct Histogram2Repr {
    x_limits: BinLimits,
    y_limits: BinLimits,
    contents: Vec<Vec<f64>>,
}

/// Two-dimensional histogram of counts. `contents[[i, j]]` is the count of x-bin `i` and y-bin
/// `j`.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(try_from = "Histogram2Repr")]
pub struct Histogram2 {
    x_limits: BinLimits,
    y_limits: BinLimits,
    contents: Array2<f64>,
}

impl TryFrom<Histogram2Repr> for Histogram2 {
    type Error = MalformedCurveError;

    fn try_from(repr: Histogram2Repr) -> std::result::Result<Self, Self::Error> {
        let nx = repr.x_limits.bins();
        let ny = repr.y_limits.bins();

        if repr.contents.len() != nx {
            return Err(MalformedCurveError::InconsistentBins {
                expected: nx,
                found: repr.contents.len(),
            });
        }

        if let Some(row) = repr.contents.iter().find(|row| row.len() != ny) {
            return Err(MalformedCurveError::InconsistentBins {
                expected: ny,
                found: row.len(),
            });
        }

        let flat = repr.contents.into_iter().flatten().collect();

        Self::new(repr.x_limits, repr.y_limits, flat)
    }
}

impl Histogram2 {
    /// Creates a histogram from row-major `contents`, one row per x-bin.
    ///
    /// # Errors
    ///
    /// Returns an error if the number of contents does not match the number of bins.
    pub fn new(
        x_limits: BinLimits,
        y_limits: BinLimits,
        contents: Vec<f64>,
    ) -> std::result::Result<Self, MalformedCurveError> {
        let expected = x_limits.bins() * y_limits.bins();
        let found = contents.len();
        let contents = Array2::from_shape_vec((x_limits.bins(), y_limits.bins()), contents)
            .map_err(|_| MalformedCurveError::InconsistentBins { expected, found })?;

        Ok(Self {
            x_limits,
            y_limits,
            contents,
        })
    }

    /// Returns the profile along x: for every x-bin the moments of the y-bin centers, weighted
    /// with the bin counts.
    #[must_use]
    pub fn profile_x(&self) -> Profile {
        let y_centers = self.y_limits.centers();
        let bins = self
            .contents
            .axis_iter(Axis(0))
            .map(|row| {
                row.iter()
                    .zip(&y_centers)
                    .fold(ProfileBin::default(), |acc, (&count, &y)| ProfileBin {
                        entries: acc.entries + count,
                        sum_y: count.mul_add(y, acc.sum_y),
                        sum_y2: (count * y).mul_add(y, acc.sum_y2),
                    })
            })
            .collect();

        Profile {
            limits: self.x_limits.clone(),
            bins,
        }
    }
}

/// A binned curve that can take part in a binned ratio.
#[derive(Clone, Debug, PartialEq)]
pub enum BinnedCurve {
    /// A histogram.
    Histogram(Histogram),
    /// A profile.
    Profile(Profile),
}

impl BinnedCurve {
    /// Returns the bin limits.
    #[must_use]
    pub const fn limits(&self) -> &BinLimits {
        match self {
            Self::Histogram(histogram) => histogram.limits(),
            Self::Profile(profile) => profile.limits(),
        }
    }

    /// Returns the curve as a histogram; profiles are collapsed onto their primary axis.
    #[must_use]
    pub fn projection_x(&self) -> Cow<'_, Histogram> {
        match self {
            Self::Histogram(histogram) => Cow::Borrowed(histogram),
            Self::Profile(profile) => Cow::Owned(profile.projection_x()),
        }
    }
}

/// Divides `test` by `reference` bin by bin.
///
/// If `reference` is a profile, `test` is projected onto its primary axis before the division,
/// and the reference enters with its own projection. A histogram reference requires a histogram
/// test. The division itself is done by [`Histogram::divide`].
///
/// # Errors
///
/// Returns an error if either curve has no bins, if their binnings are different or if a profile
/// test is divided by a histogram reference.
pub fn compute_binned_ratio(reference: &BinnedCurve, test: &BinnedCurve) -> Result<Histogram> {
    let (denominator, numerator) = match (reference, test) {
        (BinnedCurve::Profile(profile), _) => (Cow::Owned(profile.projection_x()), test.projection_x()),
        (BinnedCurve::Histogram(reference), BinnedCurve::Histogram(test)) => {
            (Cow::Borrowed(reference), Cow::Borrowed(test))
        }
        (BinnedCurve::Histogram(_), BinnedCurve::Profile(_)) => {
            return Err(MalformedCurveError::MixedKinds.into());
        }
    };

    if denominator.limits().bins() == 0 {
        return Err(MalformedCurveError::Empty { role: "reference" }.into());
    }

    if numerator.limits().bins() == 0 {
        return Err(MalformedCurveError::Empty { role: "test" }.into());
    }

    Ok(numerator.divide(&denominator)?)
}
