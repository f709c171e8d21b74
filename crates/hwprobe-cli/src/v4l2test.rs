// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Au-Zone Technologies

mod error;
mod logging;

use clap::{CommandFactory, Parser};
use error::{result_to_exit_code, CliError};
use hwprobe::report::{OutputFormat, Report};
use hwprobe::{v4l2, Error};
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// V4L2-M2M probe utility
///
/// Checks whether a V4L2 device node is a usable stateful hardware decoder
/// and prints the result to stdout.
#[derive(Parser)]
#[command(name = "v4l2test")]
#[command(version)]
#[command(about = "V4L2-M2M hardware decode probe utility")]
struct Cli {
    /// Probe a V4L2 device (e.g. /dev/video10)
    #[arg(short, long, value_name = "DEVICE")]
    device: Option<PathBuf>,

    /// Write the result as a JSON object
    #[arg(long)]
    json: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let Some(device) = cli.device else {
        return result_to_exit_code(Cli::command().print_help().map_err(CliError::Output));
    };

    logging::init_logging();

    let format = if cli.json {
        OutputFormat::Json
    } else {
        OutputFormat::Text
    };
    result_to_exit_code(execute(&device, format))
}

fn execute(device: &Path, format: OutputFormat) -> Result<(), CliError> {
    log::debug!("v4l2test probing device '{}'", device.display());

    let mut report = Report::new();
    let result = match v4l2::probe_device(device) {
        Ok(hwcodecs) => {
            report.supported(true);
            report.hwcodecs(hwcodecs);
            Ok(())
        }
        Err(err) => {
            report.error(describe(device, &err));
            if err.is_fatal() {
                Err(CliError::from(err))
            } else {
                Ok(())
            }
        }
    };

    report
        .flush(&mut io::stdout().lock(), format)
        .map_err(CliError::Output)?;
    result
}

fn describe(device: &Path, err: &Error) -> String {
    match err {
        Error::Open { .. } => format!("V4L2 {}", err),
        _ => format!("V4L2 device {} {}", device.display(), err),
    }
}
