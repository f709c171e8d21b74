// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Au-Zone Technologies

//! Hardware Video Decode Probes for Rust
//!
//! Single-shot capability probes used to decide whether hardware video
//! decoding is usable on a Linux system. Two independent probes are provided:
//!
//! - [`v4l2`] opens a V4L2 memory-to-memory device node and inspects its
//!   capabilities and the pixel formats on its CAPTURE and OUTPUT queues.
//! - [`mpp`] loads the Rockchip MPP runtime and tries to open a decoder
//!   context for each candidate codec.
//!
//! Both produce a [`codec::HwCodecs`] bitmask which is written, together with
//! any error, through a [`report::Report`].
//!
//! # Quick Start
//!
//! ```no_run
//! use hwprobe::report::{OutputFormat, Report};
//!
//! let mut report = Report::new();
//! match hwprobe::v4l2::probe_device("/dev/video10") {
//!     Ok(codecs) => {
//!         report.supported(true);
//!         report.hwcodecs(codecs);
//!     }
//!     Err(err) => report.error(err.to_string()),
//! }
//! report.flush(&mut std::io::stdout(), OutputFormat::Text)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use std::{error, fmt, io, path::PathBuf};

use hwprobe_sys as ffi;

// Re-export nix for error handling
pub use nix;

/// Error type for probe operations
#[derive(Debug)]
pub enum Error {
    /// The device node could not be opened
    Open { path: PathBuf, source: io::Error },

    /// `VIDIOC_QUERYCAP` failed
    QueryCapabilities(nix::Error),

    /// The driver does not fill in `device_caps`
    NoDeviceCaps,

    /// The device does not support streaming I/O
    NotStreaming,

    /// The device is neither a single- nor a multi-planar M2M device
    NotM2m,

    /// No NV12 or YV12 format on the CAPTURE queue
    NoCaptureFormat,

    /// The vendor library could not be loaded at runtime
    LibraryNotLoaded(ffi::libloading::Error),

    /// A required entry point is missing from the vendor library
    SymbolNotFound(&'static str),
}

impl Error {
    /// Whether the probe could not run at all, as opposed to running and
    /// finding the hardware unsuitable.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Error::Open { .. }
                | Error::QueryCapabilities(_)
                | Error::LibraryNotLoaded(_)
                | Error::SymbolNotFound(_)
        )
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Open { path, source } => {
                write!(f, "failed to open device {}: {}", path.display(), source)
            }
            Error::QueryCapabilities(err) => write!(f, "failed to query capabilities: {}", err),
            Error::NoDeviceCaps => write!(f, "does not support DEVICE_CAPS"),
            Error::NotStreaming => write!(f, "does not support V4L2_CAP_STREAMING"),
            Error::NotM2m => write!(f, "does not support M2M modes"),
            Error::NoCaptureFormat => write!(f, "does not support NV12 or YV12 capture formats"),
            Error::LibraryNotLoaded(err) => write!(f, "cannot load library: {}", err),
            Error::SymbolNotFound(sym) => write!(f, "cannot bind {}", sym),
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Error::Open { source, .. } => Some(source),
            Error::QueryCapabilities(err) => Some(err),
            Error::LibraryNotLoaded(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ffi::libloading::Error> for Error {
    fn from(err: ffi::libloading::Error) -> Self {
        Error::LibraryNotLoaded(err)
    }
}

/// The codec module provides the hardware codec bitmask shared by both probes.
pub mod codec;

/// The fourcc module provides portable handling of V4L2 fourcc codes.
pub mod fourcc;

/// The mpp module probes the Rockchip MPP runtime library.
pub mod mpp;

/// The report module collects probe results for the parent process.
pub mod report;

/// The v4l2 module probes V4L2 memory-to-memory devices.
pub mod v4l2;
