//! Selection of the visible y-ranges of both panels.

use super::config::PlotConfig;
use effcmp::ratio::OFF_SCALE_RATIO;

/// Lower bound of the main panel for logarithmic y axes.
const LOG_FLOOR: f64 = 1e-10;

/// Kind of curves shown in the main panel, which determines the default range.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Family {
    Sampled,
    Binned,
}

/// Factor that widens logarithmic ranges for curves spanning several orders of magnitude.
fn decades(max: f64) -> f64 {
    if max > 0.0 {
        max.log10().abs().max(1.0)
    } else {
        1.0
    }
}

/// Returns the y-range of the main panel for curves whose contents lie within `extent`.
pub fn main_range(config: &PlotConfig, family: Family, extent: Option<(f64, f64)>) -> (f64, f64) {
    let (min, max) = extent.unwrap_or((0.0, 1.0));
    let log_y = config.log.y();

    let (auto_min, auto_max) = match family {
        Family::Sampled if config.histo_path.contains("efficiency") => (0.7, 1.2),
        Family::Sampled if log_y => (LOG_FLOOR.max(0.9 * min), 10.0 * decades(max) * max),
        Family::Sampled => (0.0, 1.5 * max),
        Family::Binned if config.normalize => (0.0, 1.5),
        Family::Binned if log_y => {
            let floor = if config.histo_path.contains("avgNum") {
                100.0
            } else {
                LOG_FLOOR.max(0.9 * min)
            };
            (floor, 1.5 * decades(max) * max)
        }
        Family::Binned => (0.0, 1.4 * max),
    };

    (
        config.y_min.unwrap_or(auto_min),
        config.y_max.unwrap_or(auto_max),
    )
}

/// Returns the y-range of the ratio panel.
///
/// An explicit range always wins. Otherwise the category selects a fixed range, and if it does
/// not, the range is derived from the ratio values themselves. Values that only signal a missing
/// reference are not considered, since they are marked separately.
pub fn ratio_range(config: &PlotConfig, values: impl IntoIterator<Item = f64>) -> (f64, f64) {
    if let Some([lo, hi]) = config.ratio_y_range {
        return (lo, hi);
    }

    if config.category.contains("Efficiencies") || config.histo_path.contains("avgNum") {
        return (0.7, 1.3);
    }

    if config.category.contains("Resolution") {
        return (0.0, 2.0);
    }

    let extent = values
        .into_iter()
        .filter(|value| value.is_finite() && *value < OFF_SCALE_RATIO)
        .fold(None, |acc, value| {
            Some(acc.map_or((value, value), |(min, max): (f64, f64)| {
                (min.min(value), max.max(value))
            }))
        });

    let Some((min, max)) = extent else {
        return (0.0, 2.0);
    };

    (
        (min - 0.1).min((1.9 - max).abs()).max(0.0),
        (max + 0.1).max((2.0 - min).abs()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LogScale;
    use float_cmp::assert_approx_eq;

    fn config(histo_path: &str) -> PlotConfig {
        PlotConfig {
            histo_path: histo_path.to_owned(),
            log: LogScale::None,
            y_min: None,
            y_max: None,
            ratio_y_range: None,
            normalize: false,
            category: String::new(),
            x_label: None,
            y_label: None,
        }
    }

    #[test]
    fn efficiency_defaults() {
        let mut cfg = config("tracks/efficiency_vs_eta");
        assert_eq!(
            main_range(&cfg, Family::Sampled, Some((0.5, 0.9))),
            (0.7, 1.2)
        );

        cfg.y_max = Some(1.05);
        assert_eq!(
            main_range(&cfg, Family::Sampled, Some((0.5, 0.9))),
            (0.7, 1.05)
        );
    }

    #[test]
    fn linear_and_logarithmic_ranges() {
        let mut cfg = config("tracks/fake_rate_vs_eta");
        assert_eq!(main_range(&cfg, Family::Sampled, Some((0.0, 2.0))), (0.0, 3.0));
        assert_eq!(main_range(&cfg, Family::Binned, Some((0.0, 10.0))), (0.0, 14.0));

        cfg.log = LogScale::Y;
        let (min, max) = main_range(&cfg, Family::Sampled, Some((0.1, 1000.0)));
        assert_approx_eq!(f64, min, 0.09, epsilon = 1e-12);
        assert_approx_eq!(f64, max, 30000.0, epsilon = 1e-8);

        let (min, max) = main_range(&cfg, Family::Binned, Some((0.0, 5.0)));
        assert_eq!(min, 1e-10);
        assert_approx_eq!(f64, max, 7.5, ulps = 4);

        cfg.histo_path = "tracks/avgNumHits_vs_eta".to_owned();
        assert_eq!(main_range(&cfg, Family::Binned, Some((0.0, 5.0))).0, 100.0);

        cfg.normalize = true;
        assert_eq!(main_range(&cfg, Family::Binned, Some((0.0, 5.0))), (0.0, 1.5));
    }

    #[test]
    fn ratio_range_by_category() {
        let mut cfg = config("tracks/eff_vs_eta");
        cfg.category = "Efficiencies".to_owned();
        assert_eq!(ratio_range(&cfg, [5.0]), (0.7, 1.3));

        cfg.category = "Resolution".to_owned();
        assert_eq!(ratio_range(&cfg, [5.0]), (0.0, 2.0));

        cfg.ratio_y_range = Some([0.9, 1.1]);
        assert_eq!(ratio_range(&cfg, [5.0]), (0.9, 1.1));

        let cfg = config("tracks/avgNumHits_vs_eta");
        assert_eq!(ratio_range(&cfg, Vec::<f64>::new()), (0.7, 1.3));
    }

    #[test]
    fn automatic_ratio_range() {
        let cfg = config("tracks/pt");

        let (lo, hi) = ratio_range(&cfg, [0.95, 1.05, OFF_SCALE_RATIO, f64::NAN]);
        assert_approx_eq!(f64, lo, 0.85, epsilon = 1e-12);
        assert_approx_eq!(f64, hi, 1.15, epsilon = 1e-12);

        let (lo, hi) = ratio_range(&cfg, [0.5, 3.0]);
        assert_approx_eq!(f64, lo, 0.4, epsilon = 1e-12);
        assert_approx_eq!(f64, hi, 3.1, epsilon = 1e-12);

        // the lower end never becomes negative
        let (lo, hi) = ratio_range(&cfg, [0.05, 1.0]);
        assert_eq!(lo, 0.0);
        assert_approx_eq!(f64, hi, 1.95, epsilon = 1e-12);

        assert_eq!(ratio_range(&cfg, Vec::<f64>::new()), (0.0, 2.0));
    }
}
