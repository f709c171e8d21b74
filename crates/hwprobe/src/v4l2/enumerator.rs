// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Au-Zone Technologies

//! Format enumeration and the decoder capability check.

use std::path::Path;

use hwprobe_sys::v4l2 as ffi;
use nix::errno::Errno;

use super::device::{BufType, Device, VideoNode};
use crate::codec::{Codec, HwCodecs};
use crate::fourcc::FourCC;
use crate::Error;

/// Upper bound on `VIDIOC_ENUM_FMT` indices queried per queue
pub const MAX_FORMATS: u32 = 256;

/// Accumulator for the formats seen on one queue
///
/// A compressed format ORs its codec bit in. A recognised raw format replaces
/// the whole value with `1` and marks the scan as raw; only that flag decides
/// whether a CAPTURE queue is usable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FormatScan {
    bits: u32,
    raw: bool,
}

impl FormatScan {
    pub fn record(&mut self, fourcc: FourCC) {
        match fourcc.to_u32() {
            ffi::V4L2_PIX_FMT_H264 => self.bits |= Codec::H264.bit(),
            // VP8, VP9 and AV1 stay unreported until stateful decode of them
            // has been validated.
            ffi::V4L2_PIX_FMT_NV12 | ffi::V4L2_PIX_FMT_YVU420 => {
                self.bits = 1;
                self.raw = true;
            }
            _ => {}
        }
    }

    pub fn bits(&self) -> u32 {
        self.bits
    }

    /// NV12 or YV12 was seen
    pub fn is_raw(&self) -> bool {
        self.raw
    }
}

/// Enumerate the formats on `queue`, starting at index 0 and stopping at the
/// first failed query or after [`MAX_FORMATS`] entries.
pub fn supported_formats<N: VideoNode + ?Sized>(node: &N, queue: BufType) -> FormatScan {
    let mut scan = FormatScan::default();
    for index in 0..MAX_FORMATS {
        match node.enum_format(queue, index) {
            Ok(format) => {
                log::debug!("{} format {}: {}", queue, index, format);
                scan.record(format.fourcc);
            }
            Err(Errno::EINVAL) => return scan,
            Err(err) => {
                log::debug!("{} enumeration stopped at index {}: {}", queue, index, err);
                return scan;
            }
        }
    }
    log::debug!("{} enumeration capped at {} formats", queue, MAX_FORMATS);
    scan
}

/// Check that `node` is a streaming M2M decoder producing NV12 or YV12 and
/// return the codecs it accepts.
pub fn check_device<N: VideoNode + ?Sized>(node: &N) -> Result<HwCodecs, Error> {
    let caps = node
        .query_capabilities()
        .map_err(Error::QueryCapabilities)?;
    log::debug!(
        "driver {} card {} bus_info {} version {}",
        caps.driver,
        caps.card,
        caps.bus_info,
        caps.version_string()
    );

    if !caps.has_device_caps() {
        return Err(Error::NoDeviceCaps);
    }
    if !caps.is_streaming() {
        return Err(Error::NotStreaming);
    }

    let splane = caps.is_m2m();
    let mplane = caps.is_m2m_mplane();
    if !splane && !mplane {
        // Most likely a camera
        return Err(Error::NotM2m);
    }

    if !supported_formats(node, BufType::capture(mplane)).is_raw() {
        return Err(Error::NoCaptureFormat);
    }
    let hwcodecs = HwCodecs::from_bits(supported_formats(node, BufType::output(mplane)).bits());
    for codec in hwcodecs.codecs() {
        log::debug!("hardware decode {}", codec);
    }
    log::debug!("hardware codecs {:#x}", hwcodecs.bits());
    Ok(hwcodecs)
}

/// Open the device at `path` and run [`check_device`] on it.
pub fn probe_device(path: impl AsRef<Path>) -> Result<HwCodecs, Error> {
    let path = path.as_ref();
    log::debug!("probing device '{}'", path.display());
    let device = Device::open(path)?;
    check_device(&device)
}
