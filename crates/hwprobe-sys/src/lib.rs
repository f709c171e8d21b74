// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Au-Zone Technologies

#![allow(non_upper_case_globals)]
#![allow(non_camel_case_types)]
#![allow(clippy::missing_safety_doc)]

//! Raw ABI definitions consumed by the hwprobe utilities.
//!
//! Nothing in here is safe to use directly: the [`v4l2`] module mirrors
//! `linux/videodev2.h` and the [`mpp`] module mirrors the parts of
//! `rk_mpi.h` needed to open a decoder context.

pub mod mpp;
pub mod v4l2;

// Re-export libloading for error handling
pub use libloading;
