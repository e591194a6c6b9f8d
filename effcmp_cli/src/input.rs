use anyhow::{Context, Result};
use effcmp::binned::{BinnedCurve, Histogram, Histogram2, Profile};
use effcmp::curve::SampledCurve;
use serde::Deserialize;
use std::collections::BTreeMap;

/// Contents of an input file: curves indexed by their histogram path.
pub type CurveFile = BTreeMap<String, Entry>;

#[derive(Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
enum StoredCurve {
    Efficiency(SampledCurve),
    Histogram(Histogram),
    Histogram2(Histogram2),
    Profile(Profile),
}

#[derive(Deserialize)]
pub struct Entry {
    #[serde(default)]
    x_label: String,
    #[serde(default)]
    y_label: String,
    #[serde(flatten)]
    curve: StoredCurve,
}

/// A curve ready to be plotted.
#[derive(Clone, Debug)]
pub enum Curve {
    Sampled(SampledCurve),
    Binned(BinnedCurve),
}

impl Curve {
    pub const fn family(&self) -> &'static str {
        match self {
            Self::Sampled(_) => "sampled",
            Self::Binned(_) => "binned",
        }
    }
}

/// A curve together with the axis labels stored next to it.
#[derive(Clone, Debug)]
pub struct LabelledCurve {
    pub x_label: String,
    pub y_label: String,
    pub curve: Curve,
}

impl Entry {
    /// Converts the stored curve into a plottable one. Two-dimensional histograms are profiled
    /// along x.
    pub fn to_curve(&self) -> LabelledCurve {
        let curve = match &self.curve {
            StoredCurve::Efficiency(curve) => Curve::Sampled(curve.clone()),
            StoredCurve::Histogram(histogram) => {
                Curve::Binned(BinnedCurve::Histogram(histogram.clone()))
            }
            StoredCurve::Histogram2(histogram) => {
                Curve::Binned(BinnedCurve::Profile(histogram.profile_x()))
            }
            StoredCurve::Profile(profile) => Curve::Binned(BinnedCurve::Profile(profile.clone())),
        };

        LabelledCurve {
            x_label: self.x_label.clone(),
            y_label: self.y_label.clone(),
            curve,
        }
    }
}

pub fn find_curve(file: &CurveFile, histo_path: &str, filename: &str) -> Result<LabelledCurve> {
    file.get(histo_path)
        .map(Entry::to_curve)
        .with_context(|| format!("'{filename}' does not contain '{histo_path}'"))
}

#[cfg(test)]
mod tests {
    use super::*;

    const CURVES: &str = "
tracks/eff_vs_eta:
  kind: efficiency
  x_label: $\\eta$
  x_min: -4
  x_max: 4
  points:
    - [-3, 0.9, 0.05, 0.04]
    - [0, 0.95, 0.02, 0.01]
tracks/pt:
  kind: histogram
  limits: [0, 1, 2]
  contents: [4, 9]
tracks/ntracks_vs_mu:
  kind: histogram2
  x_limits: [0, 1, 2]
  y_limits: [0, 2, 4]
  contents: [[1, 1], [0, 3]]
";

    #[test]
    fn read_all_kinds() {
        let file: CurveFile = serde_yaml::from_str(CURVES).unwrap();

        let efficiency = find_curve(&file, "tracks/eff_vs_eta", "curves.yaml").unwrap();
        assert_eq!(efficiency.x_label, "$\\eta$");
        let Curve::Sampled(curve) = efficiency.curve else {
            panic!("efficiency must be a sampled curve");
        };
        assert_eq!(curve.domain(), (-4.0, 4.0));
        assert_eq!(curve.points()[1].err_high, 0.01);

        let Curve::Binned(BinnedCurve::Histogram(histogram)) =
            find_curve(&file, "tracks/pt", "curves.yaml").unwrap().curve
        else {
            panic!("histogram must stay a histogram");
        };
        assert_eq!(histogram.errors(), [2.0, 3.0]);

        let profiled = find_curve(&file, "tracks/ntracks_vs_mu", "curves.yaml").unwrap();
        assert_eq!(profiled.curve.family(), "binned");
        assert!(matches!(
            profiled.curve,
            Curve::Binned(BinnedCurve::Profile(_))
        ));
    }

    #[test]
    fn missing_curve() {
        let file: CurveFile = serde_yaml::from_str(CURVES).unwrap();

        let err = find_curve(&file, "tracks/missing", "curves.yaml").unwrap_err();
        assert_eq!(
            err.to_string(),
            "'curves.yaml' does not contain 'tracks/missing'"
        );
    }

    #[test]
    fn inconsistent_histogram_is_rejected() {
        let result = serde_yaml::from_str::<CurveFile>(
            "
h:
  kind: histogram
  limits: [0, 1, 2]
  contents: [1, 2]
  errors: [1]
",
        );

        assert!(result.is_err());
    }

    #[test]
    fn histogram_without_errors_must_match_bins() {
        let result = serde_yaml::from_str::<CurveFile>(
            "
h:
  kind: histogram
  limits: [0, 1, 2]
  contents: [1, 2, 3, 4]
",
        );

        let err = result.err().unwrap();
        assert!(err
            .to_string()
            .contains("expected 2 values per bin vector, found 4"));
    }
}
