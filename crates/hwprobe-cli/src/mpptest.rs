// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Au-Zone Technologies

mod error;
mod logging;

use clap::Parser;
use error::{result_to_exit_code, CliError};
use hwprobe::mpp::{probe_codecs, MppLibrary};
use hwprobe::report::{OutputFormat, Report};
use std::io;
use std::process::ExitCode;

/// Rockchip MPP probe utility
///
/// Loads librockchip_mpp.so and reports which codecs it can decode.
#[derive(Parser)]
#[command(name = "mpptest")]
#[command(version)]
#[command(about = "Rockchip MPP hardware decode probe utility")]
struct Cli {
    /// Write the result as a JSON object
    #[arg(long)]
    json: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    logging::init_logging();

    let format = if cli.json {
        OutputFormat::Json
    } else {
        OutputFormat::Text
    };
    result_to_exit_code(execute(format))
}

fn execute(format: OutputFormat) -> Result<(), CliError> {
    log::debug!("Testing Mpp");

    let mut report = Report::new();
    let result = match MppLibrary::load() {
        Ok(library) => {
            log::debug!("Mpp Library Loaded");
            let supported = probe_codecs(library);
            report.supported(!supported.is_empty());
            report.hwcodecs(supported);
            Ok(())
        }
        Err(err) => {
            report.error(format!("MPP {}", err));
            Err(CliError::from(err))
        }
    };

    report
        .flush(&mut io::stdout().lock(), format)
        .map_err(CliError::Output)?;
    result
}
