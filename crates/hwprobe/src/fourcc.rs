// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Au-Zone Technologies
//
// Adapted from https://docs.rs/crate/four-cc/latest. V4L2 packs the first
// character into the low byte on every host, so no endian switch is needed.
#![forbid(unsafe_code)]

use core::{fmt, result::Result};

use hwprobe_sys::v4l2 as ffi;

#[derive(Clone, Copy, PartialEq, Eq, Hash)]
#[repr(C, packed)]
pub struct FourCC(pub [u8; 4]);

impl FourCC {
    pub const NV12: FourCC = FourCC(*b"NV12");
    pub const YV12: FourCC = FourCC(*b"YV12");
    pub const H264: FourCC = FourCC(*b"H264");
    pub const VP8: FourCC = FourCC(*b"VP80");
    pub const VP9: FourCC = FourCC(*b"VP90");
    pub const AV1: FourCC = FourCC(*b"AV1F");

    pub const fn to_u32(self) -> u32 {
        ffi::v4l2_fourcc(&self.0)
    }

    pub const fn from_u32(val: u32) -> FourCC {
        FourCC([
            (val & 0xff) as u8,
            (val >> 8 & 0xff) as u8,
            (val >> 16 & 0xff) as u8,
            (val >> 24 & 0xff) as u8,
        ])
    }
}

impl From<&[u8; 4]> for FourCC {
    fn from(buf: &[u8; 4]) -> FourCC {
        FourCC(*buf)
    }
}

impl From<u32> for FourCC {
    fn from(val: u32) -> FourCC {
        FourCC::from_u32(val)
    }
}

impl From<FourCC> for u32 {
    fn from(val: FourCC) -> Self {
        val.to_u32()
    }
}

impl fmt::Display for FourCC {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        let b = self.0;
        match core::str::from_utf8(&b) {
            Ok(s) => f.write_str(s),
            // Keep Display infallible for driver-supplied garbage
            Err(_) => f.write_fmt(format_args!(
                "{}{}{}{}",
                core::ascii::escape_default(b[0]),
                core::ascii::escape_default(b[1]),
                core::ascii::escape_default(b[2]),
                core::ascii::escape_default(b[3])
            )),
        }
    }
}

impl fmt::Debug for FourCC {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        f.debug_tuple("FourCC").field(&format_args!("{}", self)).finish()
    }
}
