use super::GlobalConfiguration;
use super::input::CurveFile;
use anyhow::{Context, Result};
use prettytable::format::{FormatBuilder, LinePosition, LineSeparator};
use prettytable::Table;
use simplelog::{ColorChoice, ConfigBuilder, LevelFilter, TermLogger, TerminalMode};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

pub fn init_logger(cfg: &GlobalConfiguration) -> Result<()> {
    let level = if cfg.debug {
        cfg.log_level.max(LevelFilter::Debug)
    } else {
        cfg.log_level
    };

    let mut builder = ConfigBuilder::new();

    if cfg.debug {
        builder.set_time_level(LevelFilter::Error);
        builder.set_time_format_rfc3339();
        builder.set_target_level(LevelFilter::Error);
    } else {
        builder.set_time_level(LevelFilter::Off);
        builder.set_target_level(LevelFilter::Off);
    }

    builder.set_thread_level(LevelFilter::Off);
    builder.set_location_level(LevelFilter::Off);

    let colors = if cfg.no_colors {
        ColorChoice::Never
    } else {
        ColorChoice::Auto
    };

    TermLogger::init(level, builder.build(), TerminalMode::Stderr, colors)
        .context("could not install the logger")
}

pub fn create_table() -> Table {
    let mut table = Table::new();
    table.set_format(
        FormatBuilder::new()
            .column_separator(' ')
            .separator(LinePosition::Title, LineSeparator::new('-', '+', ' ', ' '))
            .build(),
    );
    table
}

pub fn read_curves(path: &Path) -> Result<CurveFile> {
    let file = File::open(path).with_context(|| format!("unable to open '{}'", path.display()))?;

    serde_yaml::from_reader(BufReader::new(file))
        .with_context(|| format!("unable to read curves from '{}'", path.display()))
}
