//! Markers for ratio values that fall outside of the visible range.

use super::binned::Histogram;
use super::ratio::RatioCurve;

/// Fraction of the visible range by which markers are moved inside the frame.
const MARK_INSET: f64 = 0.05;

/// Side of the visible range a value lies on.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Direction {
    /// The value is larger than the upper end of the visible range.
    Above,
    /// The value is smaller than the lower end of the visible range.
    Below,
}

/// Position of a marker that indicates a value outside of the visible range.
#[derive(Clone, Debug, PartialEq)]
pub struct OutlierMark<C> {
    /// Position of the value on the x axis.
    pub x: f64,
    /// Height of the marker, just inside the visible range.
    pub y: f64,
    /// Where the value lies.
    pub direction: Direction,
    /// Color of the series the value belongs to.
    pub color: C,
}

/// A series of ratio values that can be scanned for outliers.
pub trait RatioSeries {
    /// Returns the position and the value of every point of the series.
    fn values(&self) -> impl Iterator<Item = (f64, f64)> + '_;
}

impl RatioSeries for RatioCurve {
    fn values(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.points().iter().map(|point| (point.x, point.ratio))
    }
}

impl RatioSeries for Histogram {
    fn values(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.limits()
            .centers()
            .into_iter()
            .zip(self.contents().iter().copied())
    }
}

/// Returns a marker for every value of `series` outside of `[y_view_min, y_view_max]`.
///
/// Values above the range are marked at 5% of the range below its upper end. Values below the
/// range are marked at 5% above its lower end, but only if they are positive, since zero marks
/// the absence of data.
#[must_use]
pub fn find_outliers<S: RatioSeries, C: Clone>(
    series: &S,
    y_view_min: f64,
    y_view_max: f64,
    color: &C,
) -> Vec<OutlierMark<C>> {
    let inset = MARK_INSET * (y_view_max - y_view_min);

    series
        .values()
        .filter_map(|(x, value)| {
            if value > y_view_max {
                Some((x, y_view_max - inset, Direction::Above))
            } else if value < y_view_min && value > 0.0 {
                Some((x, y_view_min + inset, Direction::Below))
            } else {
                None
            }
        })
        .map(|(x, y, direction)| OutlierMark {
            x,
            y,
            direction,
            color: color.clone(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bin::BinLimits;
    use crate::ratio::{OFF_SCALE_RATIO, RatioPoint};
    use float_cmp::assert_approx_eq;

    #[test]
    fn marks_above_and_below() {
        let curve = RatioCurve::from_points(
            vec![
                RatioPoint::new(1.0, 0.5),
                RatioPoint::new(2.0, 1.0),
                RatioPoint::new(3.0, 1.5),
            ],
            0.0,
            4.0,
        );

        let marks = find_outliers(&curve, 0.7, 1.3, &"red");

        assert_eq!(marks.len(), 2);
        assert_eq!(marks[0].x, 1.0);
        assert_eq!(marks[0].direction, Direction::Below);
        assert_approx_eq!(f64, marks[0].y, 0.73, epsilon = 1e-12);
        assert_eq!(marks[1].x, 3.0);
        assert_eq!(marks[1].direction, Direction::Above);
        assert_approx_eq!(f64, marks[1].y, 1.27, epsilon = 1e-12);
        assert_eq!(marks[1].color, "red");
    }

    #[test]
    fn absent_values_are_not_marked() {
        let curve = RatioCurve::from_points(
            vec![
                RatioPoint::new(1.0, 0.0),
                RatioPoint::new(2.0, -0.5),
                RatioPoint::new(3.0, OFF_SCALE_RATIO),
            ],
            0.0,
            4.0,
        );

        let marks = find_outliers(&curve, 0.7, 1.3, &0);

        assert_eq!(marks.len(), 1);
        assert_eq!(marks[0].x, 3.0);
        assert_eq!(marks[0].direction, Direction::Above);
    }

    #[test]
    fn values_on_the_boundary_are_visible() {
        let curve = RatioCurve::from_points(
            vec![RatioPoint::new(1.0, 0.7), RatioPoint::new(2.0, 1.3)],
            0.0,
            4.0,
        );

        assert!(find_outliers(&curve, 0.7, 1.3, &()).is_empty());
    }

    #[test]
    fn binned_ratio_uses_bin_centers() {
        let ratio = Histogram::new(
            BinLimits::new(vec![0.0, 1.0, 2.0, 4.0]),
            vec![2.5, 0.0, 0.1],
            vec![0.0; 3],
        )
        .unwrap();

        let marks = find_outliers(&ratio, 0.0, 2.0, &"blue");

        assert_eq!(marks.len(), 1);
        assert_eq!(marks[0].x, 0.5);
        assert_approx_eq!(f64, marks[0].y, 1.9, epsilon = 1e-12);

        let marks = find_outliers(&ratio, 0.5, 2.0, &"blue");

        assert_eq!(marks.len(), 2);
        assert_eq!(marks[1].x, 3.0);
        assert_eq!(marks[1].direction, Direction::Below);
    }
}
