// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Au-Zone Technologies

//! V4L2 device node access
//!
//! - [`Device`] - an open device node, closed when dropped
//! - [`Capabilities`] - the result of `VIDIOC_QUERYCAP`
//! - [`Format`] - one entry returned by `VIDIOC_ENUM_FMT`
//! - [`VideoNode`] - the two queries the probe needs, so it can run against
//!   something other than a real device

use std::fmt;
use std::fs::{File, OpenOptions};
use std::os::unix::fs::OpenOptionsExt;
use std::os::unix::io::AsRawFd;
use std::path::{Path, PathBuf};

use hwprobe_sys::v4l2 as ffi;
use nix::fcntl::OFlag;

use crate::fourcc::FourCC;
use crate::Error;

/// V4L2 buffer queue type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum BufType {
    VideoCapture = ffi::V4L2_BUF_TYPE_VIDEO_CAPTURE,
    VideoOutput = ffi::V4L2_BUF_TYPE_VIDEO_OUTPUT,
    VideoCaptureMplane = ffi::V4L2_BUF_TYPE_VIDEO_CAPTURE_MPLANE,
    VideoOutputMplane = ffi::V4L2_BUF_TYPE_VIDEO_OUTPUT_MPLANE,
}

impl BufType {
    /// Decoded frames
    pub fn capture(mplane: bool) -> Self {
        if mplane {
            BufType::VideoCaptureMplane
        } else {
            BufType::VideoCapture
        }
    }

    /// Compressed bitstream
    pub fn output(mplane: bool) -> Self {
        if mplane {
            BufType::VideoOutputMplane
        } else {
            BufType::VideoOutput
        }
    }

    pub fn is_capture(&self) -> bool {
        matches!(self, BufType::VideoCapture | BufType::VideoCaptureMplane)
    }
}

impl fmt::Display for BufType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BufType::VideoCapture => write!(f, "CAPTURE"),
            BufType::VideoOutput => write!(f, "OUTPUT"),
            BufType::VideoCaptureMplane => write!(f, "CAPTURE_MPLANE"),
            BufType::VideoOutputMplane => write!(f, "OUTPUT_MPLANE"),
        }
    }
}

/// Driver-reported device capabilities
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Capabilities {
    pub driver: String,
    pub card: String,
    pub bus_info: String,
    /// Kernel-style `KERNEL_VERSION(a, b, c)` value
    pub version: u32,
    /// Capabilities of the physical device as a whole
    pub capabilities: u32,
    /// Capabilities of this particular node, valid with `V4L2_CAP_DEVICE_CAPS`
    pub device_caps: u32,
}

impl Capabilities {
    pub(crate) fn from_ffi(cap: &ffi::v4l2_capability) -> Self {
        Capabilities {
            driver: parse_c_str(&cap.driver),
            card: parse_c_str(&cap.card),
            bus_info: parse_c_str(&cap.bus_info),
            version: cap.version,
            capabilities: cap.capabilities,
            device_caps: cap.device_caps,
        }
    }

    pub fn has_device_caps(&self) -> bool {
        self.capabilities & ffi::V4L2_CAP_DEVICE_CAPS != 0
    }

    pub fn is_streaming(&self) -> bool {
        self.device_caps & ffi::V4L2_CAP_STREAMING != 0
    }

    pub fn is_m2m(&self) -> bool {
        self.device_caps & ffi::V4L2_CAP_VIDEO_M2M != 0
    }

    pub fn is_m2m_mplane(&self) -> bool {
        self.device_caps & ffi::V4L2_CAP_VIDEO_M2M_MPLANE != 0
    }

    /// Version formatted as `major.minor.patch`
    pub fn version_string(&self) -> String {
        format!(
            "{}.{}.{}",
            self.version >> 16,
            (self.version >> 8) & 0xff,
            self.version & 0xff
        )
    }
}

fn parse_c_str(arr: &[u8]) -> String {
    let len = arr.iter().position(|&c| c == 0).unwrap_or(arr.len());
    String::from_utf8_lossy(&arr[..len]).trim().to_string()
}

/// Pixel format descriptor from `VIDIOC_ENUM_FMT`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Format {
    pub fourcc: FourCC,
    /// Human-readable description from driver
    pub description: String,
}

impl Format {
    pub fn new(fourcc: FourCC, description: impl Into<String>) -> Self {
        Format {
            fourcc,
            description: description.into(),
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.fourcc, self.description)
    }
}

/// The queries issued by the decoder probe
pub trait VideoNode {
    /// `VIDIOC_QUERYCAP`
    fn query_capabilities(&self) -> nix::Result<Capabilities>;

    /// `VIDIOC_ENUM_FMT` for one zero-based `index` on `queue`. Drivers
    /// return `EINVAL` past the last format.
    fn enum_format(&self, queue: BufType, index: u32) -> nix::Result<Format>;
}

/// An open V4L2 device node
///
/// Opened read-write and non-blocking; the descriptor is closed on drop.
#[derive(Debug)]
pub struct Device {
    file: File,
    path: PathBuf,
}

impl Device {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .custom_flags(OFlag::O_NONBLOCK.bits())
            .open(path)
            .map_err(|source| Error::Open {
                path: path.to_path_buf(),
                source,
            })?;
        log::debug!("opened {}", path.display());
        Ok(Device {
            file,
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl VideoNode for Device {
    fn query_capabilities(&self) -> nix::Result<Capabilities> {
        let mut cap = ffi::v4l2_capability::default();
        // SAFETY: the descriptor is open for the lifetime of `self` and `cap`
        // is a valid, writable v4l2_capability.
        unsafe { ffi::vidioc_querycap(self.file.as_raw_fd(), &mut cap) }?;
        Ok(Capabilities::from_ffi(&cap))
    }

    fn enum_format(&self, queue: BufType, index: u32) -> nix::Result<Format> {
        let mut desc = ffi::v4l2_fmtdesc {
            index,
            type_: queue as u32,
            ..Default::default()
        };
        // SAFETY: as above; the kernel only reads index/type and fills in the
        // remaining fields of `desc`.
        unsafe { ffi::vidioc_enum_fmt(self.file.as_raw_fd(), &mut desc) }?;
        Ok(Format::new(
            FourCC::from_u32(desc.pixelformat),
            parse_c_str(&desc.description),
        ))
    }
}
