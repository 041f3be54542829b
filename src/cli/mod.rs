//! Command-line driver.
//!
//! Validates input, loads config, probes for a backend and runs the
//! generator, mapping every outcome to an exit status:
//!
//! | status | meaning                                            |
//! |--------|----------------------------------------------------|
//! | 0      | success, including when every artifact was skipped |
//! | 1      | invalid input (arguments, path, color, config)     |
//! | 2      | no rendering backend available                     |
//! | 3      | generation failed                                  |

mod args;

pub use args::Cli;

use std::path::Path;

use crate::config::FactoryConfig;
use crate::error::GenerateError;
use crate::generate::{GenerationRequest, HEAD_SNIPPET, generate_all};
use crate::image::parse_hex_color;
use crate::render::Probe;
use crate::{debug, log};

pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_INVALID_INPUT: u8 = 1;
pub const EXIT_NO_BACKEND: u8 = 2;
pub const EXIT_GENERATION_FAILED: u8 = 3;

/// Run the CLI against the current environment.
pub fn run(cli: &Cli) -> u8 {
    execute(cli, &Probe::from_env())
}

/// Run the CLI with an explicit backend probe.
pub fn execute(cli: &Cli, probe: &Probe) -> u8 {
    let source = cli.favicon_svg.as_path();
    if let Err(message) = check_source_path(source) {
        log!("error"; "{}", message);
        return EXIT_INVALID_INPUT;
    }

    let config = match FactoryConfig::load(cli) {
        Ok(config) => config,
        Err(err) => {
            log!("error"; "{:#}", anyhow::Error::from(err));
            return EXIT_INVALID_INPUT;
        }
    };

    let background = match parse_hex_color(&config.background) {
        Ok(color) => color,
        Err(err) => {
            log!("error"; "{}", err);
            return EXIT_INVALID_INPUT;
        }
    };

    let Some(backend) = probe.select(config.render.backend, &config.render_options()) else {
        log!("error"; "{}", GenerateError::NoBackendAvailable);
        return EXIT_NO_BACKEND;
    };
    debug!("render"; "using {} backend", backend.name());

    let request = GenerationRequest::new(source, background);
    let report = match generate_all(&request, &backend) {
        Ok(report) => report,
        Err(err) => {
            log!("error"; "{}", err);
            return EXIT_GENERATION_FAILED;
        }
    };

    report.print();
    if report.has_fatal() {
        return EXIT_GENERATION_FAILED;
    }

    log!("info"; "add the following to the `<head>`");
    for line in HEAD_SNIPPET.lines() {
        eprintln!("  {line}");
    }

    if report.is_success() {
        EXIT_SUCCESS
    } else {
        EXIT_GENERATION_FAILED
    }
}

/// The source must be an existing `.svg` file.
fn check_source_path(source: &Path) -> Result<(), String> {
    if source.extension().is_none_or(|ext| ext != "svg") {
        return Err(format!("{} does not end with .svg", source.display()));
    }
    if !source.exists() {
        return Err(format!("{} does not exist", source.display()));
    }
    Ok(())
}
