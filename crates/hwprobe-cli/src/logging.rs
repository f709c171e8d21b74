// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Au-Zone Technologies

use std::env;
use std::ffi::OsStr;
use std::os::unix::ffi::OsStrExt;

/// Set by the parent process to get diagnostics on stderr
pub const DEBUG_ENV: &str = "MOZ_GFX_DEBUG";

/// Logging is on when the variable's value starts with `1`.
pub fn debug_enabled(value: Option<&OsStr>) -> bool {
    value.map_or(false, |v| v.as_bytes().first() == Some(&b'1'))
}

/// Initialize env_logger on stderr, leaving stdout to the result
///
/// Silent unless [`DEBUG_ENV`] enables it; `RUST_LOG` still overrides.
pub fn init_logging() {
    let enabled = debug_enabled(env::var_os(DEBUG_ENV).as_deref());

    let env = env_logger::Env::default().default_filter_or(if enabled { "debug" } else { "off" });

    env_logger::Builder::from_env(env)
        .format_timestamp(None) // Disable timestamps for cleaner CLI output
        .format_target(false) // Disable target (module path) for cleaner output
        .init();

    log::debug!("Logging initialized");
}
