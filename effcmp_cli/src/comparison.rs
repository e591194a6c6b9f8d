use super::input::Curve;
use super::script::RatioData;
use super::style::Style;
use anyhow::{Result, bail};
use effcmp::binned::{self, Histogram};
use effcmp::outlier::{self, OutlierMark};
use effcmp::ratio::{self, RatioCurve};

/// Ratio of a test curve with respect to the reference curve.
pub enum Ratio {
    Sampled(RatioCurve),
    Binned(Histogram),
}

impl Ratio {
    /// Computes `test / reference`. Both curves must be of the same family.
    pub fn between(reference: &Curve, test: &Curve) -> Result<Self> {
        Ok(match (reference, test) {
            (Curve::Sampled(reference), Curve::Sampled(test)) => {
                Self::Sampled(ratio::compute_ratio(reference, test)?)
            }
            (Curve::Binned(reference), Curve::Binned(test)) => {
                Self::Binned(binned::compute_binned_ratio(reference, test)?)
            }
            _ => bail!(
                "can not divide a {} curve by a {} curve",
                test.family(),
                reference.family()
            ),
        })
    }

    /// Returns all ratio values.
    pub fn values(&self) -> Vec<f64> {
        match self {
            Self::Sampled(curve) => curve.points().iter().map(|point| point.ratio).collect(),
            Self::Binned(histogram) => histogram.contents().to_vec(),
        }
    }

    /// Returns markers for all values outside of `[y_min, y_max]`.
    pub fn outliers<C: Clone>(&self, y_min: f64, y_max: f64, color: &C) -> Vec<OutlierMark<C>> {
        match self {
            Self::Sampled(curve) => outlier::find_outliers(curve, y_min, y_max, color),
            Self::Binned(histogram) => outlier::find_outliers(histogram, y_min, y_max, color),
        }
    }

    pub fn to_data(&self, style: Style) -> RatioData {
        match self {
            Self::Sampled(curve) => {
                let points = curve.points();

                RatioData {
                    style,
                    x: points.iter().map(|p| p.x).collect(),
                    x_low: points.iter().map(|p| p.x_err_low).collect(),
                    x_high: points.iter().map(|p| p.x_err_high).collect(),
                    y: points.iter().map(|p| p.ratio).collect(),
                    y_low: points.iter().map(|p| p.y_err_low).collect(),
                    y_high: points.iter().map(|p| p.y_err_high).collect(),
                }
            }
            Self::Binned(histogram) => {
                let half_widths: Vec<_> = histogram
                    .limits()
                    .bin_sizes()
                    .iter()
                    .map(|size| 0.5 * size)
                    .collect();

                RatioData {
                    style,
                    x: histogram.limits().centers(),
                    x_low: half_widths.clone(),
                    x_high: half_widths,
                    y: histogram.contents().to_vec(),
                    y_low: histogram.errors().to_vec(),
                    y_high: histogram.errors().to_vec(),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use effcmp::bin::BinLimits;
    use effcmp::binned::BinnedCurve;
    use effcmp::curve::{CurvePoint, SampledCurve};
    use effcmp::outlier::Direction;

    #[test]
    fn mixed_families() {
        let sampled = Curve::Sampled(SampledCurve::new(
            vec![CurvePoint::new(0.5, 1.0, 0.0, 0.0)],
            0.0,
            1.0,
        ));
        let binned = Curve::Binned(BinnedCurve::Histogram(Histogram::with_counting_errors(
            BinLimits::new(vec![0.0, 1.0]),
            vec![1.0],
        )
        .unwrap()));

        let err = Ratio::between(&sampled, &binned).err().unwrap();
        assert_eq!(err.to_string(), "can not divide a binned curve by a sampled curve");
    }

    #[test]
    fn binned_ratio_data() {
        let reference = Curve::Binned(BinnedCurve::Histogram(Histogram::with_counting_errors(
            BinLimits::new(vec![0.0, 1.0, 3.0]),
            vec![4.0, 4.0],
        )
        .unwrap()));
        let test = Curve::Binned(BinnedCurve::Histogram(Histogram::with_counting_errors(
            BinLimits::new(vec![0.0, 1.0, 3.0]),
            vec![4.0, 16.0],
        )
        .unwrap()));

        let ratio = Ratio::between(&reference, &test).unwrap();
        let data = ratio.to_data(Style::single_ratio());

        assert_eq!(data.x, [0.5, 2.0]);
        assert_eq!(data.x_low, [0.5, 1.0]);
        assert_eq!(data.y, [1.0, 4.0]);

        let marks = ratio.outliers(0.7, 1.3, &"#000000");
        assert_eq!(marks.len(), 1);
        assert_eq!(marks[0].x, 2.0);
        assert_eq!(marks[0].direction, Direction::Above);
    }
}
