#![allow(missing_docs)]

mod comparison;
mod config;
mod helpers;
mod input;
mod plot;
mod ranges;
mod ratio;
mod script;
mod style;

use anyhow::Result;
use clap::Parser;
use enum_dispatch::enum_dispatch;
use git_version::git_version;
use simplelog::LevelFilter;
use std::process::ExitCode;

#[derive(Parser)]
pub struct GlobalConfiguration {
    /// Set the log level.
    #[arg(default_value_t = LevelFilter::Info, global = true, long)]
    pub log_level: LevelFilter,
    /// Print debug messages and prefix every message with a timestamp.
    #[arg(global = true, long)]
    pub debug: bool,
    /// Disable colored log messages.
    #[arg(global = true, long)]
    pub no_colors: bool,
}

#[enum_dispatch]
pub trait Subcommand {
    fn run(&self, cfg: &GlobalConfiguration) -> Result<ExitCode>;
}

#[enum_dispatch(Subcommand)]
#[derive(Parser)]
pub enum SubcommandEnum {
    Plot(plot::Opts),
    Ratio(ratio::Opts),
}

#[derive(Parser)]
#[command(
    arg_required_else_help = true,
    author,
    about,
    disable_help_subcommand = true,
    name = "effcmp",
    version = git_version!(
        args = ["--always", "--dirty", "--long", "--tags"],
        cargo_prefix = "",
        fallback = "unknown"
    )
)]
pub struct Opts {
    #[command(flatten)]
    pub configuration: GlobalConfiguration,
    #[command(subcommand)]
    pub subcommand: SubcommandEnum,
}

impl Opts {
    /// Sets up logging and runs the selected subcommand.
    ///
    /// # Errors
    ///
    /// Returns an error if the logger can not be installed or if the subcommand fails.
    pub fn run(&self) -> Result<ExitCode> {
        helpers::init_logger(&self.configuration)?;
        self.subcommand.run(&self.configuration)
    }
}
