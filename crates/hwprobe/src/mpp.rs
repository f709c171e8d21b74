// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Au-Zone Technologies

//! Rockchip MPP decoder probe.
//!
//! The MPP runtime is loaded at runtime so the probe can run, and fail
//! cleanly, on systems without it. Four entry points are resolved by name
//! into an [`MppLibrary`], which implements [`CodecRuntime`]; the probe loop
//! in [`probe_codecs`] only talks to that trait.
//!
//! ```no_run
//! use hwprobe::mpp::{probe_codecs, MppLibrary};
//!
//! let library = MppLibrary::load()?;
//! let codecs = probe_codecs(library);
//! println!("HWCODECS {}", codecs);
//! # Ok::<(), hwprobe::Error>(())
//! ```

use std::ptr;

use hwprobe_sys::libloading::os::unix::Library;
use hwprobe_sys::mpp as ffi;

use crate::codec::{Codec, HwCodecs};
use crate::Error;

/// Decoder-side operations of a codec runtime, one per entry point
pub trait CodecRuntime {
    type Context;

    /// `mpp_create`
    fn create(&self) -> Result<Self::Context, i32>;

    /// `mpp_check_support_format` in decode mode
    fn check_support(&self, codec: Codec) -> Result<(), i32>;

    /// `mpp_init` in decode mode
    fn init(&self, ctx: &Self::Context, codec: Codec) -> Result<(), i32>;

    /// `reset` from the context's operation table
    fn reset(&self, ctx: &Self::Context);

    /// `mpp_destroy`
    fn destroy(&self, ctx: Self::Context);
}

/// MPP coding type for a candidate codec
pub fn coding_type(codec: Codec) -> ffi::MppCodingType {
    match codec {
        Codec::H264 => ffi::MPP_VIDEO_CodingAVC,
        Codec::Vp8 => ffi::MPP_VIDEO_CodingVP8,
        Codec::Vp9 => ffi::MPP_VIDEO_CodingVP9,
        Codec::Av1 => ffi::MPP_VIDEO_CodingAV1,
    }
}

/// Try to open a decoder for every candidate in [`Codec::ALL`] and return
/// those that initialised.
///
/// A failed candidate never stops the loop. When the support check or the
/// init fails the context is left as is; only fully initialised contexts
/// are reset and destroyed.
pub fn probe_codecs<R: CodecRuntime>(runtime: R) -> HwCodecs {
    let mut supported = HwCodecs::empty();

    for codec in Codec::ALL {
        let coding = coding_type(codec);

        let ctx = match runtime.create() {
            Ok(ctx) => ctx,
            Err(ret) => {
                log::debug!("can not create mpp context for codec id {:#x} ({})", coding, ret);
                continue;
            }
        };

        if let Err(ret) = runtime.check_support(codec) {
            log::debug!("mpp does not support codec id {:#x} ({})", coding, ret);
            continue;
        }

        if let Err(ret) = runtime.init(&ctx, codec) {
            log::debug!("mpp can not init codec id {:#x} ({})", coding, ret);
            continue;
        }

        log::debug!("mpp decodes {}", codec);
        supported |= codec;
        runtime.reset(&ctx);
        runtime.destroy(ctx);
    }

    supported
}

/// Context handed out by [`MppLibrary::create`](CodecRuntime::create)
///
/// Has no `Drop`: dropping it without calling
/// [`destroy`](CodecRuntime::destroy) leaks the MPP context.
#[derive(Debug)]
pub struct Context {
    ctx: ffi::MppCtx,
    api: *mut ffi::MppApi,
}

/// The loaded MPP runtime
///
/// The library is unloaded when this value is dropped, on every path.
pub struct MppLibrary {
    create: ffi::mpp_create_fn,
    check_support_format: ffi::mpp_check_support_format_fn,
    init: ffi::mpp_init_fn,
    destroy: ffi::mpp_destroy_fn,
    _library: Library,
}

impl MppLibrary {
    /// Load `librockchip_mpp.so` from the default search path.
    pub fn load() -> Result<Self, Error> {
        Self::open(ffi::MPP_LIBRARY_NAME)
    }

    pub fn open(name: &str) -> Result<Self, Error> {
        // SAFETY: loading runs the library's initialisers, which MPP does not
        // rely on the host for.
        let library = unsafe { Library::open(Some(name), ffi::MPP_OPEN_FLAGS) }?;
        log::debug!("loaded {}", name);

        // SAFETY: each type below is the C prototype of the named symbol.
        let runtime = unsafe {
            MppLibrary {
                create: symbol(&library, ffi::SYM_MPP_CREATE)?,
                check_support_format: symbol(&library, ffi::SYM_MPP_CHECK_SUPPORT_FORMAT)?,
                init: symbol(&library, ffi::SYM_MPP_INIT)?,
                destroy: symbol(&library, ffi::SYM_MPP_DESTROY)?,
                _library: library,
            }
        };
        Ok(runtime)
    }
}

/// Resolve `name` as a `T`.
///
/// # Safety
///
/// `T` must be the exact function pointer type of the symbol.
unsafe fn symbol<T: Copy>(library: &Library, name: &'static str) -> Result<T, Error> {
    // SAFETY: forwarded to the caller.
    match unsafe { library.get::<T>(name.as_bytes()) } {
        Ok(sym) => Ok(*sym),
        Err(err) => {
            log::debug!("{}", err);
            Err(Error::SymbolNotFound(name))
        }
    }
}

fn check(ret: ffi::MPP_RET) -> Result<(), i32> {
    if ret == ffi::MPP_OK {
        Ok(())
    } else {
        Err(ret)
    }
}

impl CodecRuntime for MppLibrary {
    type Context = Context;

    fn create(&self) -> Result<Context, i32> {
        let mut ctx: ffi::MppCtx = ptr::null_mut();
        let mut api: *mut ffi::MppApi = ptr::null_mut();
        // SAFETY: both out-pointers are valid for writes.
        check(unsafe { (self.create)(&mut ctx, &mut api) })?;
        Ok(Context { ctx, api })
    }

    fn check_support(&self, codec: Codec) -> Result<(), i32> {
        // SAFETY: plain integer arguments.
        check(unsafe { (self.check_support_format)(ffi::MPP_CTX_DEC, coding_type(codec)) })
    }

    fn init(&self, ctx: &Context, codec: Codec) -> Result<(), i32> {
        // SAFETY: `ctx` came from `mpp_create` of this library.
        check(unsafe { (self.init)(ctx.ctx, ffi::MPP_CTX_DEC, coding_type(codec)) })
    }

    fn reset(&self, ctx: &Context) {
        // SAFETY: `api` is either null or the table returned with `ctx`.
        let reset = unsafe { ctx.api.as_ref() }.and_then(|api| api.reset);
        match reset {
            Some(reset) => {
                // SAFETY: `ctx` is initialised and owned by this library.
                let ret = unsafe { reset(ctx.ctx) };
                if ret != ffi::MPP_OK {
                    log::debug!("mpp reset returned {}", ret);
                }
            }
            None => log::debug!("mpp context has no reset entry"),
        }
    }

    fn destroy(&self, ctx: Context) {
        // SAFETY: `ctx` came from `mpp_create` and is not used afterwards.
        let ret = unsafe { (self.destroy)(ctx.ctx) };
        if ret != ffi::MPP_OK {
            log::debug!("mpp destroy returned {}", ret);
        }
    }
}

impl Drop for MppLibrary {
    fn drop(&mut self) {
        log::debug!("unloading {}", ffi::MPP_LIBRARY_NAME);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Call {
        Create(Codec),
        Check(Codec),
        Init(Codec),
        Reset(Codec),
        Destroy(Codec),
    }

    /// Runtime where each stage succeeds only for the listed codecs.
    /// Contexts are identified by the codec they were created for.
    struct FakeRuntime {
        create_ok: Vec<Codec>,
        check_ok: Vec<Codec>,
        init_ok: Vec<Codec>,
        next: RefCell<usize>,
        calls: RefCell<Vec<Call>>,
    }

    impl FakeRuntime {
        fn new(create_ok: &[Codec], check_ok: &[Codec], init_ok: &[Codec]) -> Self {
            FakeRuntime {
                create_ok: create_ok.to_vec(),
                check_ok: check_ok.to_vec(),
                init_ok: init_ok.to_vec(),
                next: RefCell::new(0),
                calls: RefCell::new(Vec::new()),
            }
        }

        fn stage(&self, call: Call, ok: &[Codec], codec: Codec) -> Result<(), i32> {
            self.calls.borrow_mut().push(call);
            if ok.contains(&codec) {
                Ok(())
            } else {
                Err(-1)
            }
        }
    }

    impl CodecRuntime for &FakeRuntime {
        type Context = Codec;

        fn create(&self) -> Result<Codec, i32> {
            let codec = {
                let mut next = self.next.borrow_mut();
                let codec = Codec::ALL[*next];
                *next += 1;
                codec
            };
            self.stage(Call::Create(codec), &self.create_ok, codec)
                .map(|()| codec)
        }

        fn check_support(&self, codec: Codec) -> Result<(), i32> {
            self.stage(Call::Check(codec), &self.check_ok, codec)
        }

        fn init(&self, ctx: &Codec, codec: Codec) -> Result<(), i32> {
            assert_eq!(*ctx, codec);
            self.stage(Call::Init(codec), &self.init_ok, codec)
        }

        fn reset(&self, ctx: &Codec) {
            self.calls.borrow_mut().push(Call::Reset(*ctx));
        }

        fn destroy(&self, ctx: Codec) {
            self.calls.borrow_mut().push(Call::Destroy(ctx));
        }
    }

    #[test]
    fn test_coding_types() {
        assert_eq!(coding_type(Codec::H264), 0x7);
        assert_eq!(coding_type(Codec::Vp8), 0x9);
        assert_eq!(coding_type(Codec::Vp9), 0xa);
        assert_eq!(coding_type(Codec::Av1), 0x0100_0008);
    }

    #[test]
    fn test_all_candidates_fail() {
        let runtime = FakeRuntime::new(&[], &[], &[]);
        let codecs = probe_codecs(&runtime);
        assert!(codecs.is_empty());
        assert_eq!(
            *runtime.calls.borrow(),
            Codec::ALL.iter().map(|c| Call::Create(*c)).collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_every_stage_fails_somewhere() {
        let runtime = FakeRuntime::new(
            &[Codec::Vp8, Codec::Vp9, Codec::Av1],
            &[Codec::Vp9, Codec::Av1],
            &[],
        );
        assert!(probe_codecs(&runtime).is_empty());
        let calls = runtime.calls.borrow();
        assert!(!calls.iter().any(|c| matches!(c, Call::Reset(_) | Call::Destroy(_))));
        assert!(calls.contains(&Call::Init(Codec::Av1)));
    }

    #[test]
    fn test_only_vp9() {
        let all = Codec::ALL;
        let runtime = FakeRuntime::new(&all, &all, &[Codec::Vp9]);
        let codecs = probe_codecs(&runtime);
        assert_eq!(codecs, HwCodecs::from(Codec::Vp9));
        assert_eq!(codecs.bits(), 64);

        let calls = runtime.calls.borrow();
        let resets: Vec<_> = calls.iter().filter(|c| matches!(c, Call::Reset(_))).collect();
        let destroys: Vec<_> = calls.iter().filter(|c| matches!(c, Call::Destroy(_))).collect();
        assert_eq!(resets, vec![&Call::Reset(Codec::Vp9)]);
        assert_eq!(destroys, vec![&Call::Destroy(Codec::Vp9)]);
    }

    #[test]
    fn test_check_failure_skips_init() {
        let all = Codec::ALL;
        let runtime = FakeRuntime::new(&all, &[Codec::H264, Codec::Av1], &all);
        let codecs = probe_codecs(&runtime);
        assert_eq!(codecs.bits(), Codec::H264.bit() | Codec::Av1.bit());
        let calls = runtime.calls.borrow();
        assert!(!calls.contains(&Call::Init(Codec::Vp8)));
        assert!(!calls.contains(&Call::Destroy(Codec::Vp8)));
        assert_eq!(
            calls[..5],
            [
                Call::Create(Codec::H264),
                Call::Check(Codec::H264),
                Call::Init(Codec::H264),
                Call::Reset(Codec::H264),
                Call::Destroy(Codec::H264),
            ]
        );
    }

    #[test]
    fn test_missing_library() {
        let err = MppLibrary::open("libhwprobe-missing-runtime.so")
            .err()
            .expect("library should not load");
        assert!(matches!(err, Error::LibraryNotLoaded(_)));
        assert!(err.is_fatal());
    }

    #[cfg(all(target_os = "linux", target_env = "gnu"))]
    #[test]
    fn test_missing_symbol() {
        let err = MppLibrary::open("libc.so.6")
            .err()
            .expect("libc has no mpp entry points");
        assert!(matches!(err, Error::SymbolNotFound("mpp_create")));
    }
}
