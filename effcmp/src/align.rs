//! Alignment of two point-sampled curves onto a common set of x-positions.

use super::curve::SampledCurve;
use super::error::MalformedCurveError;
use std::cmp::Ordering;

/// A reference and a test value at a common x-position.
///
/// If one of the curves has no point at `x`, its central value and uncertainties are zero.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AlignedPoint {
    /// Common position on the x axis.
    pub x: f64,
    /// Central value of the reference.
    pub y_ref: f64,
    /// Central value of the test.
    pub y_test: f64,
    /// Lower uncertainty of the reference.
    pub err_ref_low: f64,
    /// Upper uncertainty of the reference.
    pub err_ref_high: f64,
    /// Lower uncertainty of the test.
    pub err_test_low: f64,
    /// Upper uncertainty of the test.
    pub err_test_high: f64,
}

/// Merges the points of `reference` and `test` onto a common grid.
///
/// Both curves are walked with one cursor each, like merging two sorted sequences. In every step
/// the points under the cursors are compared: equal positions are paired and both cursors move,
/// otherwise the point with the smaller position is paired with an absent (zero) partner and only
/// its own cursor moves. A cursor that ran past the end of its curve stays on the last point. The
/// walk takes exactly `max(reference.len(), test.len())` steps and produces one point per step.
///
/// # Errors
///
/// Returns an error if either curve is empty or if the declared domains of both curves do not
/// overlap.
pub fn align(
    reference: &SampledCurve,
    test: &SampledCurve,
) -> Result<Vec<AlignedPoint>, MalformedCurveError> {
    let (ref_points, (ref_min, ref_max)) = reference.sample("reference")?;
    let (test_points, (test_min, test_max)) = test.sample("test")?;

    if ref_max < test_min || test_max < ref_min {
        return Err(MalformedCurveError::DisjointDomains {
            ref_min,
            ref_max,
            test_min,
            test_max,
        });
    }

    let steps = ref_points.len().max(test_points.len());
    let mut aligned = Vec::with_capacity(steps);
    let mut i_ref = 0;
    let mut i_test = 0;

    for _ in 0..steps {
        let r = ref_points[i_ref.min(ref_points.len() - 1)];
        let t = test_points[i_test.min(test_points.len() - 1)];

        let point = match r.x.partial_cmp(&t.x) {
            Some(Ordering::Equal) => {
                i_ref += 1;
                i_test += 1;

                AlignedPoint {
                    x: r.x,
                    y_ref: r.y,
                    y_test: t.y,
                    err_ref_low: r.err_low,
                    err_ref_high: r.err_high,
                    err_test_low: t.err_low,
                    err_test_high: t.err_high,
                }
            }
            Some(Ordering::Greater) => {
                i_test += 1;
                log::trace!("no reference point at x = {}", t.x);

                AlignedPoint {
                    x: t.x,
                    y_ref: 0.0,
                    y_test: t.y,
                    err_ref_low: 0.0,
                    err_ref_high: 0.0,
                    err_test_low: t.err_low,
                    err_test_high: t.err_high,
                }
            }
            _ => {
                i_ref += 1;
                log::trace!("no test point at x = {}", r.x);

                AlignedPoint {
                    x: r.x,
                    y_ref: r.y,
                    y_test: 0.0,
                    err_ref_low: r.err_low,
                    err_ref_high: r.err_high,
                    err_test_low: 0.0,
                    err_test_high: 0.0,
                }
            }
        };

        aligned.push(point);
    }

    Ok(aligned)
}
