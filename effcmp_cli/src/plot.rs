use super::comparison::Ratio;
use super::config::{Config, PlotConfig};
use super::helpers;
use super::input::{self, Curve, CurveFile, LabelledCurve};
use super::ranges::{self, Family};
use super::script::{Figure, Series, SeriesData};
use super::style::Style;
use super::{GlobalConfiguration, Subcommand};
use anyhow::{Context, Result, bail};
use clap::{Parser, ValueHint};
use effcmp::binned::BinnedCurve;
use rayon::{ThreadPoolBuilder, prelude::*};
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

/// Creates matplotlib scripts comparing curves of several files with the first one.
#[derive(Parser)]
pub struct Opts {
    /// Path to the YAML configuration.
    #[arg(value_hint = ValueHint::FilePath)]
    config: PathBuf,
    /// Directory the scripts are written to, overriding the configuration.
    #[arg(long, short, value_hint = ValueHint::DirPath)]
    output: Option<PathBuf>,
    /// Print the scripts instead of writing them to files.
    #[arg(long)]
    stdout: bool,
    /// Number of threads to utilize.
    #[arg(default_value_t = 1, long)]
    threads: usize,
}

fn combine(lhs: Option<(f64, f64)>, rhs: Option<(f64, f64)>) -> Option<(f64, f64)> {
    match (lhs, rhs) {
        (Some((min1, max1)), Some((min2, max2))) => Some((min1.min(min2), max1.max(max2))),
        (extent, None) | (None, extent) => extent,
    }
}

fn series_data(curve: &Curve) -> (SeriesData, Option<(f64, f64)>) {
    match curve {
        Curve::Sampled(curve) => {
            let points = curve.points();

            (
                SeriesData::Points {
                    x: points.iter().map(|p| p.x).collect(),
                    y: points.iter().map(|p| p.y).collect(),
                    y_low: points.iter().map(|p| p.err_low).collect(),
                    y_high: points.iter().map(|p| p.err_high).collect(),
                },
                curve.y_extent(),
            )
        }
        Curve::Binned(curve) => {
            let histogram = curve.projection_x();

            (
                SeriesData::Bins {
                    edges: histogram.limits().limits(),
                    contents: histogram.contents().to_vec(),
                    errors: histogram.errors().to_vec(),
                },
                histogram.y_extent(),
            )
        }
    }
}

fn build_figure(config: &Config, plot: &PlotConfig, files: &[CurveFile]) -> Result<Figure> {
    let mut curves: Vec<LabelledCurve> = config
        .files
        .iter()
        .zip(files)
        .map(|(description, file)| {
            input::find_curve(
                file,
                &plot.histo_path,
                &description.filename.display().to_string(),
            )
        })
        .collect::<Result<_>>()?;

    if plot.normalize {
        for labelled in &mut curves {
            if let Curve::Binned(BinnedCurve::Histogram(histogram)) = &mut labelled.curve {
                *histogram = histogram.normalized();
            }
        }
    }

    let Some(reference) = curves.first() else {
        bail!("no curves found");
    };

    let family = match reference.curve {
        Curve::Sampled(_) => Family::Sampled,
        Curve::Binned(_) => Family::Binned,
    };

    let domain = match &reference.curve {
        Curve::Sampled(curve) => curve.domain(),
        Curve::Binned(curve) => (curve.limits().left(), curve.limits().right()),
    };

    let mut extent = None;
    let mut series = Vec::with_capacity(curves.len());

    for (index, (labelled, description)) in curves.iter().zip(&config.files).enumerate() {
        let (data, curve_extent) = series_data(&labelled.curve);
        extent = combine(extent, curve_extent);

        series.push(Series {
            label: description.legend.clone(),
            style: Style::for_series(index),
            data,
        });
    }

    let ratios: Vec<Ratio> = curves
        .iter()
        .zip(&config.files)
        .skip(1)
        .map(|(test, description)| {
            Ratio::between(&reference.curve, &test.curve).with_context(|| {
                format!(
                    "could not compute the ratio of '{}'",
                    description.filename.display()
                )
            })
        })
        .collect::<Result<_>>()?;

    let ratio_range = ranges::ratio_range(plot, ratios.iter().flat_map(Ratio::values));
    let tests = ratios.len();
    let mut outliers = Vec::new();
    let mut ratio_data = Vec::with_capacity(tests);

    for (index, ratio) in ratios.iter().enumerate().map(|(i, ratio)| (i + 1, ratio)) {
        let series_color = Style::for_series(index).color;
        let marks = ratio.outliers(ratio_range.0, ratio_range.1, &series_color);

        if !marks.is_empty() {
            log::debug!(
                "{} values of '{}' are outside of the ratio range",
                marks.len(),
                config.files[index].legend
            );
        }

        outliers.extend(marks);
        ratio_data.push(ratio.to_data(Style::for_ratio(index, tests)));
    }

    let x_label = plot
        .x_label
        .clone()
        .unwrap_or_else(|| reference.x_label.clone());
    let y_label = plot
        .y_label
        .clone()
        .unwrap_or_else(|| reference.y_label.clone());

    Ok(Figure {
        name: plot.name().to_owned(),
        label: format!(
            "Simulation Internal\n$\\langle\\mu\\rangle = {}$, {}",
            config.common.mu, config.common.sample
        ),
        x_label,
        y_label,
        log: plot.log,
        domain,
        main_range: ranges::main_range(plot, family, extent),
        ratio_range,
        series,
        ratios: ratio_data,
        outliers,
    })
}

impl Subcommand for Opts {
    fn run(&self, _: &GlobalConfiguration) -> Result<ExitCode> {
        let config = Config::load(&self.config)?;
        let output = self
            .output
            .clone()
            .unwrap_or_else(|| config.common.output.clone());

        let files: Vec<CurveFile> = config
            .files
            .iter()
            .map(|description| {
                log::info!("reading '{}'", description.filename.display());
                helpers::read_curves(&description.filename)
            })
            .collect::<Result<_>>()?;

        if !self.stdout {
            fs::create_dir_all(&output)
                .with_context(|| format!("unable to create '{}'", output.display()))?;
        }

        let pool = ThreadPoolBuilder::new().num_threads(self.threads).build()?;
        let figures: Vec<_> = pool.install(|| {
            config
                .plots
                .par_iter()
                .map(|plot| build_figure(&config, plot, &files))
                .collect()
        });

        let mut failures = 0;

        for (plot, figure) in config.plots.iter().zip(figures) {
            let result = figure.and_then(|figure| {
                let script = figure.render();

                if self.stdout {
                    print!("{script}");
                    Ok(())
                } else {
                    let path = output.join(format!("{}.py", plot.name()));
                    log::info!("writing '{}'", path.display());
                    fs::write(&path, script)
                        .with_context(|| format!("unable to write '{}'", path.display()))
                }
            });

            if let Err(err) = result {
                log::error!("plot '{}' failed: {err:#}", plot.histo_path);
                failures += 1;
            }
        }

        if failures == 0 {
            Ok(ExitCode::SUCCESS)
        } else {
            log::error!("{failures} of {} plots failed", config.plots.len());
            Ok(ExitCode::FAILURE)
        }
    }
}
