//! Point-sampled curves with asymmetric uncertainties.

use super::error::MalformedCurveError;
use serde::{Deserialize, Serialize};

/// A single point of a [`SampledCurve`].
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Serialize)]
#[serde(from = "(f64, f64, f64, f64)", into = "(f64, f64, f64, f64)")]
pub struct CurvePoint {
    /// Position on the x axis.
    pub x: f64,
    /// Central value.
    pub y: f64,
    /// Uncertainty towards smaller values, given as a non-negative distance from `y`.
    pub err_low: f64,
    /// Uncertainty towards larger values, given as a non-negative distance from `y`.
    pub err_high: f64,
}

impl CurvePoint {
    /// Constructor.
    #[must_use]
    pub const fn new(x: f64, y: f64, err_low: f64, err_high: f64) -> Self {
        Self {
            x,
            y,
            err_low,
            err_high,
        }
    }
}

impl From<(f64, f64, f64, f64)> for CurvePoint {
    fn from((x, y, err_low, err_high): (f64, f64, f64, f64)) -> Self {
        Self::new(x, y, err_low, err_high)
    }
}

impl From<CurvePoint> for (f64, f64, f64, f64) {
    fn from(point: CurvePoint) -> Self {
        (point.x, point.y, point.err_low, point.err_high)
    }
}

/// An ordered sequence of points together with the x-range the curve was declared on.
///
/// The points are expected to be ordered by non-decreasing `x`; they are never re-sorted. The
/// declared domain does not have to coincide with the first and last point, for efficiencies it
/// is usually the range of the histogram the efficiency was computed from.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct SampledCurve {
    points: Vec<CurvePoint>,
    x_min: f64,
    x_max: f64,
}

impl SampledCurve {
    /// Constructor.
    #[must_use]
    pub const fn new(points: Vec<CurvePoint>, x_min: f64, x_max: f64) -> Self {
        Self {
            points,
            x_min,
            x_max,
        }
    }

    /// Returns the points of this curve.
    #[must_use]
    pub fn points(&self) -> &[CurvePoint] {
        &self.points
    }

    /// Returns the declared domain `(x_min, x_max)`.
    #[must_use]
    pub const fn domain(&self) -> (f64, f64) {
        (self.x_min, self.x_max)
    }

    /// Returns the points and the domain of this curve for use on the `role` side of a ratio.
    ///
    /// # Errors
    ///
    /// Returns [`MalformedCurveError::Empty`] if the curve has no points.
    pub fn sample(
        &self,
        role: &'static str,
    ) -> Result<(&[CurvePoint], (f64, f64)), MalformedCurveError> {
        if self.points.is_empty() {
            return Err(MalformedCurveError::Empty { role });
        }

        Ok((&self.points, self.domain()))
    }

    /// Returns the smallest and largest central values, or `None` if the curve is empty.
    #[must_use]
    pub fn y_extent(&self) -> Option<(f64, f64)> {
        self.points.iter().map(|point| point.y).fold(None, |acc, y| {
            Some(acc.map_or((y, y), |(min, max): (f64, f64)| (min.min(y), max.max(y))))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_empty_curve() {
        let curve = SampledCurve::new(vec![], 0.0, 1.0);

        assert!(curve.points().is_empty());
        assert!(matches!(
            curve.sample("test"),
            Err(MalformedCurveError::Empty { role: "test" })
        ));
    }

    #[test]
    fn sample_keeps_order_and_domain() {
        let curve = SampledCurve::new(
            vec![
                CurvePoint::new(2.0, 0.5, 0.1, 0.1),
                CurvePoint::new(1.0, 0.7, 0.1, 0.2),
            ],
            -1.0,
            3.0,
        );

        let (points, domain) = curve.sample("reference").unwrap();

        assert_eq!(points[0].x, 2.0);
        assert_eq!(points[1].x, 1.0);
        assert_eq!(domain, (-1.0, 3.0));
        assert_eq!(curve.y_extent(), Some((0.5, 0.7)));
    }
}
