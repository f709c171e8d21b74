// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Au-Zone Technologies

//! V4L2 Memory-to-Memory Decoder Probe
//!
//! Decides whether a `/dev/videoN` node is a usable stateful hardware
//! decoder. For a V4L2 M2M decoder the OUTPUT queue takes the compressed
//! bitstream in and the CAPTURE queue hands decoded frames back, so the probe
//! requires:
//!
//! - `V4L2_CAP_DEVICE_CAPS` and `V4L2_CAP_STREAMING`
//! - `V4L2_CAP_VIDEO_M2M` or `V4L2_CAP_VIDEO_M2M_MPLANE`
//! - NV12 or YV12 on the CAPTURE queue
//!
//! and reports the compressed formats found on the OUTPUT queue as a
//! [`HwCodecs`](crate::codec::HwCodecs) bitmask.
//!
//! # Example
//!
//! ```no_run
//! use hwprobe::codec::Codec;
//!
//! let codecs = hwprobe::v4l2::probe_device("/dev/video10")?;
//! if codecs.contains(Codec::H264) {
//!     println!("H.264 decode available");
//! }
//! # Ok::<(), hwprobe::Error>(())
//! ```
//!
//! # Known Limitations
//!
//! Only H.264 is recognised on the OUTPUT queue. VP8, VP9 and AV1 have bits
//! in [`Codec`](crate::codec::Codec) but are never reported by this probe.

mod device;
mod enumerator;

pub use device::{BufType, Capabilities, Device, Format, VideoNode};
pub use enumerator::{check_device, probe_device, supported_formats, FormatScan, MAX_FORMATS};
