use clap::Parser;
use effcmp_cli::Opts;
use std::process::ExitCode;

fn main() -> ExitCode {
    let opts = Opts::parse();

    match opts.run() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {err:?}");
            ExitCode::FAILURE
        }
    }
}
