// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Au-Zone Technologies

use std::fmt;
use std::ops::{BitOr, BitOrAssign};

/// Candidate codec for hardware decode
///
/// The discriminant is the codec's bit in [`HwCodecs`]; bits 0-3 are left to
/// the parent process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum Codec {
    H264 = 1 << 4,
    Vp8 = 1 << 5,
    Vp9 = 1 << 6,
    Av1 = 1 << 7,
}

impl Codec {
    /// All candidates in probe order
    pub const ALL: [Codec; 4] = [Codec::H264, Codec::Vp8, Codec::Vp9, Codec::Av1];

    pub fn bit(self) -> u32 {
        self as u32
    }

    pub fn name(&self) -> &'static str {
        match self {
            Codec::H264 => "H264",
            Codec::Vp8 => "VP8",
            Codec::Vp9 => "VP9",
            Codec::Av1 => "AV1",
        }
    }
}

impl fmt::Display for Codec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Bitmask of hardware-accelerated codecs, reported as `HWCODECS`
///
/// The raw value is kept verbatim; the V4L2 prober can leave non-codec bits
/// set when a raw format follows a compressed one on the same queue.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct HwCodecs(u32);

impl HwCodecs {
    pub const fn empty() -> Self {
        HwCodecs(0)
    }

    pub const fn from_bits(bits: u32) -> Self {
        HwCodecs(bits)
    }

    pub const fn bits(&self) -> u32 {
        self.0
    }

    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn contains(&self, codec: Codec) -> bool {
        self.0 & codec.bit() != 0
    }

    pub fn insert(&mut self, codec: Codec) {
        self.0 |= codec.bit();
    }

    /// Codecs whose bit is set, in probe order
    pub fn codecs(&self) -> impl Iterator<Item = Codec> + '_ {
        Codec::ALL.into_iter().filter(|c| self.contains(*c))
    }
}

impl From<Codec> for HwCodecs {
    fn from(codec: Codec) -> Self {
        HwCodecs(codec.bit())
    }
}

impl BitOr<Codec> for HwCodecs {
    type Output = HwCodecs;

    fn bitor(mut self, rhs: Codec) -> HwCodecs {
        self.insert(rhs);
        self
    }
}

impl BitOrAssign<Codec> for HwCodecs {
    fn bitor_assign(&mut self, rhs: Codec) {
        self.insert(rhs);
    }
}

impl fmt::Display for HwCodecs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codec_bits() {
        assert_eq!(Codec::H264.bit(), 16);
        assert_eq!(Codec::Vp8.bit(), 32);
        assert_eq!(Codec::Vp9.bit(), 64);
        assert_eq!(Codec::Av1.bit(), 128);
    }

    #[test]
    fn test_hwcodecs_set() {
        let mut codecs = HwCodecs::empty();
        assert!(codecs.is_empty());
        codecs |= Codec::Vp9;
        codecs = codecs | Codec::H264;
        assert_eq!(codecs.bits(), 80);
        assert!(codecs.contains(Codec::H264));
        assert!(!codecs.contains(Codec::Av1));
        assert_eq!(codecs.codecs().collect::<Vec<_>>(), vec![Codec::H264, Codec::Vp9]);
        assert_eq!(codecs.to_string(), "80");
    }
}
