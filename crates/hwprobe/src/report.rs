// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Au-Zone Technologies

//! Probe result reporting.
//!
//! Results are accumulated as ordered key/value pairs and written once, when
//! the probe has finished. The default text format puts each key and each
//! value on its own line:
//!
//! ```text
//! SUPPORTED
//! TRUE
//! HWCODECS
//! 16
//! ```

use std::io::{self, Write};

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::codec::HwCodecs;

pub const KEY_SUPPORTED: &str = "SUPPORTED";
pub const KEY_HWCODECS: &str = "HWCODECS";
pub const KEY_ERROR: &str = "ERROR";

/// Rendering used by [`Report::flush`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// `KEY\nVALUE\n` per entry
    #[default]
    Text,
    /// One JSON object, keys in insertion order
    Json,
}

/// Ordered key/value result of a single probe
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    entries: Vec<(String, String)>,
}

impl Report {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.push((key.into(), value.into()));
    }

    pub fn error(&mut self, message: impl Into<String>) {
        let message = message.into();
        log::debug!("probe failed: {}", message);
        self.value(KEY_ERROR, message);
    }

    pub fn supported(&mut self, supported: bool) {
        self.value(KEY_SUPPORTED, if supported { "TRUE" } else { "FALSE" });
    }

    pub fn hwcodecs(&mut self, codecs: HwCodecs) {
        self.value(KEY_HWCODECS, codecs.to_string());
    }

    /// Write every entry and flush the writer. Consumes the report so the
    /// result is only ever emitted once.
    pub fn flush<W: Write>(self, out: &mut W, format: OutputFormat) -> io::Result<()> {
        match format {
            OutputFormat::Text => {
                for (key, value) in &self.entries {
                    write!(out, "{}\n{}\n", key, value)?;
                }
            }
            OutputFormat::Json => {
                serde_json::to_writer(&mut *out, &self)?;
                writeln!(out)?;
            }
        }
        out.flush()
    }
}

impl Serialize for Report {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}
