// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Au-Zone Technologies

//! The subset of `linux/videodev2.h` used to probe memory-to-memory devices.

pub const V4L2_CAP_VIDEO_CAPTURE: u32 = 0x0000_0001;
pub const V4L2_CAP_VIDEO_OUTPUT: u32 = 0x0000_0002;
pub const V4L2_CAP_VIDEO_CAPTURE_MPLANE: u32 = 0x0000_1000;
pub const V4L2_CAP_VIDEO_OUTPUT_MPLANE: u32 = 0x0000_2000;
pub const V4L2_CAP_VIDEO_M2M_MPLANE: u32 = 0x0000_4000;
pub const V4L2_CAP_VIDEO_M2M: u32 = 0x0000_8000;
pub const V4L2_CAP_STREAMING: u32 = 0x0400_0000;
pub const V4L2_CAP_DEVICE_CAPS: u32 = 0x8000_0000;

pub const V4L2_BUF_TYPE_VIDEO_CAPTURE: u32 = 1;
pub const V4L2_BUF_TYPE_VIDEO_OUTPUT: u32 = 2;
pub const V4L2_BUF_TYPE_VIDEO_CAPTURE_MPLANE: u32 = 9;
pub const V4L2_BUF_TYPE_VIDEO_OUTPUT_MPLANE: u32 = 10;

/// Equivalent of the `v4l2_fourcc()` macro: first character in the low byte.
pub const fn v4l2_fourcc(code: &[u8; 4]) -> u32 {
    (code[0] as u32) | ((code[1] as u32) << 8) | ((code[2] as u32) << 16) | ((code[3] as u32) << 24)
}

pub const V4L2_PIX_FMT_NV12: u32 = v4l2_fourcc(b"NV12");
pub const V4L2_PIX_FMT_YVU420: u32 = v4l2_fourcc(b"YV12");
pub const V4L2_PIX_FMT_H264: u32 = v4l2_fourcc(b"H264");
pub const V4L2_PIX_FMT_VP8: u32 = v4l2_fourcc(b"VP80");
pub const V4L2_PIX_FMT_VP9: u32 = v4l2_fourcc(b"VP90");
pub const V4L2_PIX_FMT_AV1: u32 = v4l2_fourcc(b"AV1F");

const VIDIOC_MAGIC: u8 = b'V';
const VIDIOC_QUERYCAP: u8 = 0;
const VIDIOC_ENUM_FMT: u8 = 2;

// https://www.kernel.org/doc/html/latest/userspace-api/media/v4l/vidioc-querycap.html

#[repr(C)]
#[derive(Debug, Clone, Copy, Default)]
pub struct v4l2_capability {
    pub driver: [u8; 16],
    pub card: [u8; 32],
    pub bus_info: [u8; 32],
    pub version: u32,
    pub capabilities: u32,
    pub device_caps: u32,
    pub reserved: [u32; 3],
}

nix::ioctl_read!(vidioc_querycap, VIDIOC_MAGIC, VIDIOC_QUERYCAP, v4l2_capability);

// https://www.kernel.org/doc/html/latest/userspace-api/media/v4l/vidioc-enum-fmt.html

#[repr(C)]
#[derive(Debug, Clone, Copy, Default)]
pub struct v4l2_fmtdesc {
    pub index: u32,
    pub type_: u32,
    pub flags: u32,
    pub description: [u8; 32],
    pub pixelformat: u32,
    pub mbus_code: u32,
    pub reserved: [u32; 3],
}

nix::ioctl_readwrite!(vidioc_enum_fmt, VIDIOC_MAGIC, VIDIOC_ENUM_FMT, v4l2_fmtdesc);

#[cfg(test)]
mod tests {
    use super::*;
    use std::mem::size_of;

    #[test]
    fn test_struct_layout() {
        assert_eq!(size_of::<v4l2_capability>(), 104);
        assert_eq!(size_of::<v4l2_fmtdesc>(), 64);
    }

    #[test]
    fn test_pixel_format_codes() {
        assert_eq!(V4L2_PIX_FMT_NV12, 0x3231_564e);
        assert_eq!(V4L2_PIX_FMT_YVU420, 0x3231_5659);
        assert_eq!(V4L2_PIX_FMT_H264, 0x3436_3248);
    }
}
