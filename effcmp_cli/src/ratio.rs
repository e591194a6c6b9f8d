use super::comparison::Ratio;
use super::helpers;
use super::input;
use super::{GlobalConfiguration, Subcommand};
use anyhow::{Result, bail};
use clap::{Parser, ValueHint};
use effcmp::outlier::Direction;
use prettytable::{Row, cell};
use std::path::PathBuf;
use std::process::ExitCode;

/// Shows the ratio of a curve in the test file with respect to the same curve in the reference
/// file.
#[derive(Parser)]
pub struct Opts {
    /// Path to the file with the reference curve.
    #[arg(value_hint = ValueHint::FilePath)]
    reference: PathBuf,
    /// Path to the file with the test curve.
    #[arg(value_hint = ValueHint::FilePath)]
    test: PathBuf,
    /// Histogram path of the curve in both files.
    histo_path: String,
    /// List the ratios that are outside of the visible range LO,HI.
    #[arg(
        allow_hyphen_values = true,
        long,
        num_args = 2,
        value_delimiter = ',',
        value_names = ["LO", "HI"]
    )]
    range: Option<Vec<f64>>,
    /// Set the number of fractional digits shown for numbers.
    #[arg(default_value_t = 3, long)]
    digits: usize,
}

impl Subcommand for Opts {
    fn run(&self, _: &GlobalConfiguration) -> Result<ExitCode> {
        if let Some(&[lo, hi]) = self.range.as_deref() {
            if lo >= hi {
                bail!("range [{lo}, {hi}] is empty");
            }
        }

        let reference = input::find_curve(
            &helpers::read_curves(&self.reference)?,
            &self.histo_path,
            &self.reference.display().to_string(),
        )?;
        let test = input::find_curve(
            &helpers::read_curves(&self.test)?,
            &self.histo_path,
            &self.test.display().to_string(),
        )?;

        let ratio = Ratio::between(&reference.curve, &test.curve)?;
        let digits = self.digits;

        let mut table = helpers::create_table();

        match &ratio {
            Ratio::Sampled(curve) => {
                let mut title = Row::empty();
                for name in ["i", "x", "dx-", "dx+", "ratio", "err-", "err+"] {
                    title.add_cell(cell!(c->name));
                }
                table.set_titles(title);

                for (index, point) in curve.points().iter().enumerate() {
                    let row = table.add_empty_row();

                    row.add_cell(cell!(r->index));
                    row.add_cell(cell!(r->format!("{:.*e}", digits, point.x)));
                    row.add_cell(cell!(r->format!("{:.*e}", digits, point.x_err_low)));
                    row.add_cell(cell!(r->format!("{:.*e}", digits, point.x_err_high)));
                    row.add_cell(cell!(r->format!("{:.*e}", digits, point.ratio)));
                    row.add_cell(cell!(r->format!("{:.*e}", digits, point.y_err_low)));
                    row.add_cell(cell!(r->format!("{:.*e}", digits, point.y_err_high)));
                }
            }
            Ratio::Binned(histogram) => {
                let mut title = Row::empty();
                for name in ["b", "left", "right", "ratio", "err"] {
                    title.add_cell(cell!(c->name));
                }
                table.set_titles(title);

                let limits = histogram.limits().limits();

                for (bin, (&value, &error)) in histogram
                    .contents()
                    .iter()
                    .zip(histogram.errors())
                    .enumerate()
                {
                    let row = table.add_empty_row();

                    row.add_cell(cell!(r->bin));
                    row.add_cell(cell!(r->format!("{}", limits[bin])));
                    row.add_cell(cell!(r->format!("{}", limits[bin + 1])));
                    row.add_cell(cell!(r->format!("{:.*e}", digits, value)));
                    row.add_cell(cell!(r->format!("{:.*e}", digits, error)));
                }
            }
        }

        table.printstd();

        if let Some(&[lo, hi]) = self.range.as_deref() {
            let marks = ratio.outliers(lo, hi, &());

            if marks.is_empty() {
                log::info!("all ratios are inside of [{lo}, {hi}]");
            } else {
                let mut outliers = helpers::create_table();
                let mut title = Row::empty();
                title.add_cell(cell!(c->"x"));
                title.add_cell(cell!(c->"side"));
                outliers.set_titles(title);

                for mark in &marks {
                    let row = outliers.add_empty_row();
                    let side = match mark.direction {
                        Direction::Above => "above",
                        Direction::Below => "below",
                    };

                    row.add_cell(cell!(r->format!("{:.*e}", digits, mark.x)));
                    row.add_cell(cell!(l->side));
                }

                println!();
                outliers.printstd();
            }
        }

        Ok(ExitCode::SUCCESS)
    }
}
