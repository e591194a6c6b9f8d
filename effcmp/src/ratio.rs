//! Point-wise ratio of two sampled curves.

use super::align::{self, AlignedPoint};
use super::curve::SampledCurve;
use super::error::Result;

/// Ratio assigned to points where the reference is zero but the test is not.
pub const OFF_SCALE_RATIO: f64 = 1000.0;

/// A single point of a [`RatioCurve`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RatioPoint {
    /// Position on the x axis.
    pub x: f64,
    /// Ratio test over reference.
    pub ratio: f64,
    /// Distance of the left edge of the point from `x`.
    pub x_err_low: f64,
    /// Distance of the right edge of the point from `x`.
    pub x_err_high: f64,
    /// Lower uncertainty of the ratio.
    pub y_err_low: f64,
    /// Upper uncertainty of the ratio.
    pub y_err_high: f64,
}

impl RatioPoint {
    /// Constructor for a point without any uncertainties.
    #[must_use]
    pub const fn new(x: f64, ratio: f64) -> Self {
        Self {
            x,
            ratio,
            x_err_low: 0.0,
            x_err_high: 0.0,
            y_err_low: 0.0,
            y_err_high: 0.0,
        }
    }

    fn from_aligned(point: &AlignedPoint) -> Self {
        let AlignedPoint {
            x,
            y_ref,
            y_test,
            err_ref_low,
            err_ref_high,
            err_test_low,
            err_test_high,
        } = *point;

        let ratio = if y_ref != 0.0 {
            y_test / y_ref
        } else if y_test == 0.0 {
            1.0
        } else {
            log::debug!("reference vanishes at x = {x}, ratio set to {OFF_SCALE_RATIO}");
            OFF_SCALE_RATIO
        };

        let (y_err_low, y_err_high) = if y_ref > 0.0 && y_test > 0.0 {
            (
                ratio * (err_ref_low / y_ref).hypot(err_test_low / y_test),
                ratio * (err_ref_high / y_ref).hypot(err_test_high / y_test),
            )
        } else {
            (0.0, 0.0)
        };

        Self {
            x,
            ratio,
            x_err_low: 0.0,
            x_err_high: 0.0,
            y_err_low,
            y_err_high,
        }
    }
}

/// Ratio of a test curve over a reference curve.
#[derive(Clone, Debug, PartialEq)]
pub struct RatioCurve {
    points: Vec<RatioPoint>,
    x_min: f64,
    x_max: f64,
}

impl RatioCurve {
    /// Creates a curve from already computed points. The x-uncertainties of `points` are kept as
    /// they are.
    #[must_use]
    pub const fn from_points(points: Vec<RatioPoint>, x_min: f64, x_max: f64) -> Self {
        Self {
            points,
            x_min,
            x_max,
        }
    }

    /// Returns the points of this curve.
    #[must_use]
    pub fn points(&self) -> &[RatioPoint] {
        &self.points
    }

    /// Returns the x-range this curve should be displayed on.
    #[must_use]
    pub const fn domain(&self) -> (f64, f64) {
        (self.x_min, self.x_max)
    }

    /// Gives every point a symmetric x-uncertainty of half the distance to its right neighbour,
    /// or to its left neighbour for the last point. Adjacent points then cover the axis without
    /// gaps. Curves with less than two points get zero width.
    fn assign_x_errors(&mut self) {
        let n = self.points.len();

        if n < 2 {
            for point in &mut self.points {
                point.x_err_low = 0.0;
                point.x_err_high = 0.0;
            }
            return;
        }

        let xs: Vec<_> = self.points.iter().map(|point| point.x).collect();

        for (i, point) in self.points.iter_mut().enumerate() {
            let width = if i < n - 1 {
                xs[i + 1] - xs[i]
            } else {
                xs[i] - xs[i - 1]
            };

            point.x_err_low = 0.5 * width;
            point.x_err_high = 0.5 * width;
        }
    }
}

/// Computes the ratio `test / reference` point by point.
///
/// The points of both curves are first aligned with [`align::align`]. For each aligned pair the
/// ratio is `y_test / y_ref`; if the reference vanishes, the ratio is `1` when the test vanishes as
/// well and [`OFF_SCALE_RATIO`] otherwise. Relative uncertainties of both curves are added in
/// quadrature, separately for the lower and upper uncertainties, but only if both central values
/// are positive; all other points have no y-uncertainty. The returned curve is displayed on the
/// domain of `reference`.
///
/// # Errors
///
/// Returns an error if either curve is empty or if their domains are disjoint.
pub fn compute_ratio(reference: &SampledCurve, test: &SampledCurve) -> Result<RatioCurve> {
    let aligned = align::align(reference, test)?;
    let (x_min, x_max) = reference.domain();

    let mut ratio = RatioCurve {
        points: aligned.iter().map(RatioPoint::from_aligned).collect(),
        x_min,
        x_max,
    };
    ratio.assign_x_errors();

    Ok(ratio)
}
