//! Fixed palettes for the series of a plot.

const COLORS: [&str; 10] = [
    "#ff0000", "#0000ff", "#009900", "#ff6600", "#ff00ff", "#00bbbb", "#8800ff", "#009988",
    "#ff3388", "#3399ff",
];

// matplotlib line styles, written as Python literals
const LINE_STYLES: [&str; 10] = [
    "'-'",
    "'--'",
    "':'",
    "'-.'",
    "(0, (5, 1))",
    "(0, (3, 1, 1, 1))",
    "(0, (1, 1))",
    "(0, (5, 5))",
    "(0, (3, 5, 1, 5))",
    "(0, (3, 1, 1, 1, 1, 1))",
];

// filled markers first, then their open counterparts
const MARKERS: [(&str, bool); 10] = [
    ("o", true),
    ("s", true),
    ("^", true),
    ("v", true),
    ("o", false),
    ("s", false),
    ("^", false),
    ("D", false),
    ("X", false),
    ("*", false),
];

/// Drawing style of one series.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Style {
    pub color: &'static str,
    pub line_style: &'static str,
    pub marker: &'static str,
    pub filled: bool,
}

impl Style {
    /// Returns the style of the series at position `index`; the palettes repeat after ten series.
    pub const fn for_series(index: usize) -> Self {
        let i = index % COLORS.len();
        let (marker, filled) = MARKERS[i];

        Self {
            color: COLORS[i],
            line_style: LINE_STYLES[i],
            marker,
            filled,
        }
    }

    /// Style of the only ratio in a plot with a single test series.
    pub const fn single_ratio() -> Self {
        Self {
            color: "#000000",
            line_style: "'-'",
            marker: "o",
            filled: true,
        }
    }

    /// Returns the style of the ratio of the test series at position `index`, `1` being the
    /// first test series, in a plot with `tests` test series.
    pub const fn for_ratio(index: usize, tests: usize) -> Self {
        if tests == 1 {
            Self::single_ratio()
        } else {
            Self::for_series(index)
        }
    }
}
