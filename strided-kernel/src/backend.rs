//! Accelerated / portable kernel dispatch.
//!
//! Every hot loop in this workspace is written once, as plain scalar Rust.
//! A backend decides *how* that loop is compiled at the call site: the
//! portable backend just calls it, the SIMD backend (feature `simd`) runs it
//! under `pulp`'s runtime target-feature dispatch so LLVM can vectorize it for
//! the detected CPU. The arithmetic is identical, so both backends give
//! bit-identical results.
//!
//! The backend is chosen once per process by [`backend`].

use std::sync::OnceLock;

use crate::config::{BackendChoice, KernelConfig};

/// Loops shorter than this run directly, without dispatch overhead.
pub const DISPATCH_THRESHOLD: usize = 64;

/// A way of running a scalar loop body.
pub trait Accelerator {
    /// Short name used in logs.
    const NAME: &'static str;

    /// Run `f`, possibly with extra target features enabled.
    fn run<R>(&self, f: impl FnOnce() -> R) -> R;
}

/// Plain scalar execution.
#[derive(Debug, Clone, Copy, Default)]
pub struct Portable;

impl Accelerator for Portable {
    const NAME: &'static str = "portable";

    #[inline(always)]
    fn run<R>(&self, f: impl FnOnce() -> R) -> R {
        f()
    }
}

/// Runtime-detected SIMD execution via `pulp`.
#[cfg(feature = "simd")]
#[derive(Debug, Clone, Copy, Default)]
pub struct SimdAccelerated;

#[cfg(feature = "simd")]
impl Accelerator for SimdAccelerated {
    const NAME: &'static str = "simd";

    #[inline(always)]
    fn run<R>(&self, f: impl FnOnce() -> R) -> R {
        pulp::Arch::new().dispatch(f)
    }
}

/// The backend selected for this process.
#[derive(Debug, Clone, Copy)]
pub enum Backend {
    Portable(Portable),
    #[cfg(feature = "simd")]
    Simd(SimdAccelerated),
}

impl Backend {
    pub fn name(&self) -> &'static str {
        match self {
            Backend::Portable(_) => Portable::NAME,
            #[cfg(feature = "simd")]
            Backend::Simd(_) => SimdAccelerated::NAME,
        }
    }

    /// Whether this backend uses target-feature dispatch.
    pub fn is_accelerated(&self) -> bool {
        !matches!(self, Backend::Portable(_))
    }

    #[inline(always)]
    pub fn run<R>(&self, f: impl FnOnce() -> R) -> R {
        match self {
            Backend::Portable(b) => b.run(f),
            #[cfg(feature = "simd")]
            Backend::Simd(b) => b.run(f),
        }
    }

    /// Like [`Backend::run`], but loops of fewer than [`DISPATCH_THRESHOLD`]
    /// elements always run directly.
    #[inline(always)]
    pub fn run_if_large<R>(&self, len: usize, f: impl FnOnce() -> R) -> R {
        if len >= DISPATCH_THRESHOLD {
            self.run(f)
        } else {
            f()
        }
    }
}

/// Pick a backend for the given configuration.
pub fn detect(config: &KernelConfig) -> Backend {
    match config.backend {
        BackendChoice::Portable => Backend::Portable(Portable),
        BackendChoice::Auto => auto_backend(),
    }
}

#[cfg(feature = "simd")]
fn auto_backend() -> Backend {
    Backend::Simd(SimdAccelerated)
}

#[cfg(not(feature = "simd"))]
fn auto_backend() -> Backend {
    Backend::Portable(Portable)
}

/// Process-wide backend, detected on first use.
pub fn backend() -> &'static Backend {
    static BACKEND: OnceLock<Backend> = OnceLock::new();
    BACKEND.get_or_init(|| {
        let config = KernelConfig::global();
        let selected = detect(config);
        log::debug!(
            "strided kernels: selected {} backend (requested {:?})",
            selected.name(),
            config.backend
        );
        selected
    })
}

/// Run `f` on the process backend when `len` is large enough to benefit.
#[inline(always)]
pub fn dispatch_if_large<R>(len: usize, f: impl FnOnce() -> R) -> R {
    backend().run_if_large(len, f)
}
