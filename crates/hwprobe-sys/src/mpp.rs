// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Au-Zone Technologies

//! The subset of the Rockchip Media Process Platform (MPP) ABI needed to
//! create, check, initialise and destroy a decoder context.

use std::ffi::{c_int, c_uint, c_void};

/// Shared object probed by `mpptest`.
pub const MPP_LIBRARY_NAME: &str = "librockchip_mpp.so";

/// `dlopen` mode: lazy binding, with the library's own symbols taking
/// precedence over the host process.
#[cfg(all(target_os = "linux", target_env = "gnu"))]
pub const MPP_OPEN_FLAGS: c_int = libc::RTLD_LAZY | libc::RTLD_DEEPBIND;
#[cfg(not(all(target_os = "linux", target_env = "gnu")))]
pub const MPP_OPEN_FLAGS: c_int = libc::RTLD_LAZY | libc::RTLD_LOCAL;

pub type MppCtx = *mut c_void;
pub type MPP_RET = c_int;
pub const MPP_OK: MPP_RET = 0;

pub type MppCtxType = c_uint;
pub const MPP_CTX_DEC: MppCtxType = 0;
pub const MPP_CTX_ENC: MppCtxType = 1;

pub type MppCodingType = c_uint;
pub const MPP_VIDEO_CodingAVC: MppCodingType = 0x7;
pub const MPP_VIDEO_CodingVP8: MppCodingType = 0x9;
pub const MPP_VIDEO_CodingVP9: MppCodingType = 0xa;
pub const MPP_VIDEO_CodingAV1: MppCodingType = 0x0100_0008;

/// Operation table handed out by `mpp_create`. Only `reset` is called;
/// the remaining entries are kept opaque to preserve the layout.
#[repr(C)]
pub struct MppApi {
    pub size: c_uint,
    pub version: c_uint,
    pub decode: *mut c_void,
    pub decode_put_packet: *mut c_void,
    pub decode_get_frame: *mut c_void,
    pub encode: *mut c_void,
    pub encode_put_frame: *mut c_void,
    pub encode_get_packet: *mut c_void,
    pub isp: *mut c_void,
    pub isp_put_frame: *mut c_void,
    pub isp_get_frame: *mut c_void,
    pub poll: *mut c_void,
    pub dequeue: *mut c_void,
    pub enqueue: *mut c_void,
    pub reset: Option<unsafe extern "C" fn(ctx: MppCtx) -> MPP_RET>,
    pub control: *mut c_void,
    pub reserv: [c_uint; 16],
}

pub type mpp_create_fn = unsafe extern "C" fn(ctx: *mut MppCtx, mpi: *mut *mut MppApi) -> MPP_RET;
pub type mpp_check_support_format_fn =
    unsafe extern "C" fn(type_: MppCtxType, coding: MppCodingType) -> MPP_RET;
pub type mpp_init_fn =
    unsafe extern "C" fn(ctx: MppCtx, type_: MppCtxType, coding: MppCodingType) -> MPP_RET;
pub type mpp_destroy_fn = unsafe extern "C" fn(ctx: MppCtx) -> MPP_RET;

pub const SYM_MPP_CREATE: &str = "mpp_create";
pub const SYM_MPP_CHECK_SUPPORT_FORMAT: &str = "mpp_check_support_format";
pub const SYM_MPP_INIT: &str = "mpp_init";
pub const SYM_MPP_DESTROY: &str = "mpp_destroy";

#[cfg(test)]
mod tests {
    use super::*;
    use std::mem::{offset_of, size_of};

    #[test]
    fn test_api_table_layout() {
        let ptr = size_of::<*mut c_void>();
        // size and version, then 12 opaque entries
        assert_eq!(offset_of!(MppApi, reset), 8 + ptr * 12);
        assert_eq!(offset_of!(MppApi, reserv), 8 + ptr * 14);
    }
}
