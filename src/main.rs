//! favicon-factory - Generates the minimal set of favicons from one SVG.

mod cli;
mod config;
mod error;
mod generate;
mod image;
mod logger;
mod render;
mod utils;

use std::process::ExitCode;

use clap::{ColorChoice, Parser};
use cli::Cli;

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            // --help and --version land here too
            let _ = err.print();
            return if err.use_stderr() {
                ExitCode::from(cli::EXIT_INVALID_INPUT)
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }
    logger::set_verbose(cli.verbose);

    ExitCode::from(cli::run(&cli))
}
