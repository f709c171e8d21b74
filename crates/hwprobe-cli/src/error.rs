// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Au-Zone Technologies

use std::fmt;
use std::io;
use std::process::ExitCode;

/// CLI-specific error type with exit code mapping
///
/// Only failures that stop a probe from running end up here. A device or
/// library that was probed and found unsuitable still exits successfully.
#[derive(Debug)]
pub enum CliError {
    /// Device node missing, inaccessible or not a V4L2 device
    DeviceUnavailable(String),
    /// Vendor library missing or incomplete
    LibraryUnavailable(String),
    /// The result could not be written
    Output(io::Error),
    /// Anything else
    General(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::DeviceUnavailable(msg) => write!(f, "Device unavailable: {}", msg),
            CliError::LibraryUnavailable(msg) => write!(f, "Library unavailable: {}", msg),
            CliError::Output(err) => write!(f, "Failed to write result: {}", err),
            CliError::General(msg) => write!(f, "Error: {}", msg),
        }
    }
}

impl std::error::Error for CliError {}

impl CliError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> ExitCode {
        match self {
            CliError::DeviceUnavailable(_) => ExitCode::from(3),
            CliError::LibraryUnavailable(_) => ExitCode::from(4),
            CliError::Output(_) | CliError::General(_) => ExitCode::from(1),
        }
    }
}

/// Map hwprobe::Error to CliError with appropriate exit codes
impl From<hwprobe::Error> for CliError {
    fn from(err: hwprobe::Error) -> Self {
        use hwprobe::Error;

        match err {
            Error::Open { .. } | Error::QueryCapabilities(_) => {
                CliError::DeviceUnavailable(err.to_string())
            }
            Error::LibraryNotLoaded(_) | Error::SymbolNotFound(_) => {
                CliError::LibraryUnavailable(err.to_string())
            }
            _ => CliError::General(err.to_string()),
        }
    }
}

/// Helper function to convert result to exit code
pub fn result_to_exit_code<T>(result: Result<T, CliError>) -> ExitCode {
    match result {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            // stdout already carries the ERROR entry; stderr only when logging
            log::error!("{}", e);
            e.exit_code()
        }
    }
}
