//! picon - Command-line tool for validating and rendering path icons

use std::process::ExitCode;

use pathicon::cli;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    cli::run()
}
