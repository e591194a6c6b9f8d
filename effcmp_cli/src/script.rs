//! Generation of matplotlib scripts.

use super::config::LogScale;
use super::style::Style;
use effcmp::outlier::{Direction, OutlierMark};
use itertools::Itertools;

/// Data of a series in the main panel.
pub enum SeriesData {
    Points {
        x: Vec<f64>,
        y: Vec<f64>,
        y_low: Vec<f64>,
        y_high: Vec<f64>,
    },
    Bins {
        edges: Vec<f64>,
        contents: Vec<f64>,
        errors: Vec<f64>,
    },
}

pub struct Series {
    pub label: String,
    pub style: Style,
    pub data: SeriesData,
}

/// A ratio, always drawn as points with x- and y-uncertainties.
pub struct RatioData {
    pub style: Style,
    pub x: Vec<f64>,
    pub x_low: Vec<f64>,
    pub x_high: Vec<f64>,
    pub y: Vec<f64>,
    pub y_low: Vec<f64>,
    pub y_high: Vec<f64>,
}

/// Everything needed to draw one comparison plot.
pub struct Figure {
    pub name: String,
    pub label: String,
    pub x_label: String,
    pub y_label: String,
    pub log: LogScale,
    pub domain: (f64, f64),
    pub main_range: (f64, f64),
    pub ratio_range: (f64, f64),
    pub series: Vec<Series>,
    pub ratios: Vec<RatioData>,
    pub outliers: Vec<OutlierMark<&'static str>>,
}

fn py_float(x: f64) -> String {
    if x.is_nan() {
        "np.nan".to_owned()
    } else if x.is_infinite() {
        let inf = if x > 0.0 { "np.inf" } else { "-np.inf" };
        inf.to_owned()
    } else {
        format!("{x:e}")
    }
}

fn py_str(s: &str) -> String {
    format!(
        "\"{}\"",
        s.replace('\\', "\\\\")
            .replace('"', "\\\"")
            .replace('\n', "\\n")
    )
}

const fn py_bool(b: bool) -> &'static str {
    if b { "True" } else { "False" }
}

fn map_format_e_join(slice: &[f64]) -> String {
    slice.iter().map(|&x| py_float(x)).join(", ")
}

fn format_style(style: &Style) -> String {
    format!(
        "\"color\": {}, \"linestyle\": {}, \"marker\": {}, \"filled\": {}",
        py_str(style.color),
        style.line_style,
        py_str(style.marker),
        py_bool(style.filled)
    )
}

fn format_series_entry(Series { label, style, data }: &Series) -> String {
    let arrays = match data {
        SeriesData::Points {
            x,
            y,
            y_low,
            y_high,
        } => format!(
            "            \"x\": np.array([{}]),
            \"y\": np.array([{}]),
            \"ylow\": np.array([{}]),
            \"yhigh\": np.array([{}]),",
            map_format_e_join(x),
            map_format_e_join(y),
            map_format_e_join(y_low),
            map_format_e_join(y_high),
        ),
        SeriesData::Bins {
            edges,
            contents,
            errors,
        } => format!(
            "            \"edges\": np.array([{}]),
            \"contents\": np.array([{}]),
            \"errors\": np.array([{}]),",
            map_format_e_join(edges),
            map_format_e_join(contents),
            map_format_e_join(errors),
        ),
    };

    format!(
        "        {{
            \"label\": {},
            {},
{}
        }},\n",
        py_str(label),
        format_style(style),
        arrays
    )
}

fn format_ratio_entry(ratio: &RatioData) -> String {
    format!(
        "        {{
            {},
            \"x\": np.array([{}]),
            \"xlow\": np.array([{}]),
            \"xhigh\": np.array([{}]),
            \"y\": np.array([{}]),
            \"ylow\": np.array([{}]),
            \"yhigh\": np.array([{}]),
        }},\n",
        format_style(&ratio.style),
        map_format_e_join(&ratio.x),
        map_format_e_join(&ratio.x_low),
        map_format_e_join(&ratio.x_high),
        map_format_e_join(&ratio.y),
        map_format_e_join(&ratio.y_low),
        map_format_e_join(&ratio.y_high),
    )
}

fn format_outlier_entry(mark: &OutlierMark<&'static str>) -> String {
    let marker = match mark.direction {
        Direction::Above => "^",
        Direction::Below => "v",
    };

    format!(
        "        ({}, {}, {}, {}),\n",
        py_float(mark.x),
        py_float(mark.y),
        py_str(marker),
        py_str(mark.color)
    )
}

impl Figure {
    /// Returns a Python script that draws this figure with matplotlib and saves it as PDF next to
    /// the script.
    pub fn render(&self) -> String {
        format!(
            r#"#!/usr/bin/env python3

import matplotlib.pyplot as plt
import numpy as np
import os

# stylesheet for plot
stylesheet = {{
    "axes.labelsize": "small",
    "figure.figsize": (6.0, 6.0),
    "font.size": 12.0,
    "legend.fontsize": "small",
    "legend.frameon": False,
    "pdf.compression": 0,
    "xtick.direction": "in",
    "xtick.minor.visible": True,
    "xtick.top": True,
    "ytick.direction": "in",
    "ytick.minor.visible": True,
    "ytick.right": True,
}}

# global plot labels
label = {label}
xlabel = {x_label}
ylabel = {y_label}
ylabel_ratio = "Ratio wrt reference"

# axes
xlog = {x_log}
ylog = {y_log}
domain = ({x_min}, {x_max})
main_ylim = ({main_min}, {main_max})
ratio_ylim = ({ratio_min}, {ratio_max})

def face(series):
    return series["color"] if series["filled"] else "none"

def plot_main(axis, series):
    axis.set_xscale("log" if xlog else "linear")
    axis.set_yscale("log" if ylog else "linear")

    for s in series:
        if "edges" in s:
            centers = 0.5 * (s["edges"][1:] + s["edges"][:-1])
            axis.stairs(s["contents"], s["edges"], color=s["color"], linestyle=s["linestyle"], linewidth=2)
            axis.errorbar(centers, s["contents"], yerr=s["errors"], fmt=s["marker"], color=s["color"], markersize=4, markerfacecolor=face(s), elinewidth=1, label=s["label"])
        else:
            axis.errorbar(s["x"], s["y"], yerr=(s["ylow"], s["yhigh"]), color=s["color"], linestyle=s["linestyle"], linewidth=2, marker=s["marker"], markersize=4, markerfacecolor=face(s), label=s["label"])

    axis.set_xlim(domain)
    axis.set_ylim(main_ylim)
    axis.set_ylabel(ylabel)
    axis.text(0.05, 0.95, label, transform=axis.transAxes, verticalalignment="top")

    if len(series) > 1:
        axis.legend(loc="upper right")

def plot_ratio(axis, ratios, outliers):
    axis.set_xscale("log" if xlog else "linear")

    for r in ratios:
        axis.errorbar(r["x"], r["y"], xerr=(r["xlow"], r["xhigh"]), yerr=(r["ylow"], r["yhigh"]), fmt=r["marker"], color=r["color"], markersize=4, markerfacecolor=face(r), elinewidth=1)

    # values outside of the visible range
    for x, y, marker, color in outliers:
        axis.plot([x], [y], linestyle="none", marker=marker, markersize=7, fillstyle="none", color=color)

    axis.hlines(1.0, domain[0], domain[1], colors="black", linestyles="dashed", linewidth=1)
    axis.set_xlim(domain)
    axis.set_ylim(ratio_ylim)
    axis.set_xlabel(xlabel)
    axis.set_ylabel(ylabel_ratio)

def main():
    plt.rcParams.update(stylesheet)

    if len(ratio_data()) > 0:
        figure, (main_axis, ratio_axis) = plt.subplots(2, 1, sharex=True, gridspec_kw={{"height_ratios": [65, 35], "hspace": 0.08}})
        plot_main(main_axis, series_data())
        plot_ratio(ratio_axis, ratio_data(), outlier_data())
    else:
        figure, main_axis = plt.subplots(1, 1)
        plot_main(main_axis, series_data())
        main_axis.set_xlabel(xlabel)

    figure.savefig(os.path.join(os.path.dirname(os.path.abspath(__file__)), {pdf}), bbox_inches="tight")
    plt.close(figure)

def series_data():
    return [
{series}    ]

def ratio_data():
    return [
{ratios}    ]

def outlier_data():
    return [
{outliers}    ]

if __name__ == "__main__":
    main()
"#,
            label = py_str(&self.label),
            x_label = py_str(&self.x_label),
            y_label = py_str(&self.y_label),
            x_log = py_bool(self.log.x()),
            y_log = py_bool(self.log.y()),
            x_min = py_float(self.domain.0),
            x_max = py_float(self.domain.1),
            main_min = py_float(self.main_range.0),
            main_max = py_float(self.main_range.1),
            ratio_min = py_float(self.ratio_range.0),
            ratio_max = py_float(self.ratio_range.1),
            pdf = py_str(&format!("{}.pdf", self.name)),
            series = self.series.iter().map(format_series_entry).join(""),
            ratios = self.ratios.iter().map(format_ratio_entry).join(""),
            outliers = self.outliers.iter().map(format_outlier_entry).join(""),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn python_literals() {
        assert_eq!(py_float(0.5), "5e-1");
        assert_eq!(py_float(f64::NAN), "np.nan");
        assert_eq!(py_float(f64::NEG_INFINITY), "-np.inf");
        assert_eq!(py_str(r#"$p_\mathrm{T}$ "x""#), r#""$p_\\mathrm{T}$ \"x\"""#);
        assert_eq!(map_format_e_join(&[1.0, 250.0]), "1e0, 2.5e2");
    }

    #[test]
    fn render_outliers() {
        let figure = Figure {
            name: "eff_vs_eta".to_owned(),
            label: "Simulation".to_owned(),
            x_label: "eta".to_owned(),
            y_label: "efficiency".to_owned(),
            log: LogScale::X,
            domain: (-4.0, 4.0),
            main_range: (0.7, 1.2),
            ratio_range: (0.7, 1.3),
            series: vec![],
            ratios: vec![],
            outliers: vec![OutlierMark {
                x: 2.0,
                y: 1.27,
                direction: Direction::Above,
                color: "#ff0000",
            }],
        };

        let script = figure.render();

        assert!(script.contains("xlog = True\nylog = False\n"));
        assert!(script.contains("domain = (-4e0, 4e0)\n"));
        assert!(script.contains("        (2e0, 1.27e0, \"^\", \"#ff0000\"),\n"));
        assert!(script.contains("\"eff_vs_eta.pdf\""));
    }

    #[test]
    fn render_series_and_ratios() {
        let series = [
            Series {
                label: "Reference".to_owned(),
                style: Style::for_series(0),
                data: SeriesData::Bins {
                    edges: vec![0.0, 1.0],
                    contents: vec![4.0],
                    errors: vec![2.0],
                },
            },
            Series {
                label: "Test".to_owned(),
                style: Style::for_series(1),
                data: SeriesData::Bins {
                    edges: vec![0.0, 1.0],
                    contents: vec![8.0],
                    errors: vec![2.0],
                },
            },
        ];
        let ratio = RatioData {
            style: Style::single_ratio(),
            x: vec![0.5],
            x_low: vec![0.5],
            x_high: vec![0.5],
            y: vec![2.0],
            y_low: vec![0.25],
            y_high: vec![0.25],
        };

        let entries = series.iter().map(format_series_entry).join("");
        assert_eq!(entries.matches("\"label\": ").count(), 2);
        assert!(entries.contains("\"contents\": np.array([8e0]),\n"));
        assert!(entries.ends_with("        },\n"));

        let entry = format_ratio_entry(&ratio);
        assert!(entry.contains("\"color\": \"#000000\""));
        assert!(entry.contains("\"y\": np.array([2e0]),\n"));
    }
}
