//! Runtime configuration read from the environment.
//!
//! | variable          | values                        | default |
//! |-------------------|-------------------------------|---------|
//! | `STRIDED_BACKEND` | `auto`, `portable`            | `auto`  |
//! | `STRIDED_TRACE`   | `1` raises path logs to debug | unset   |
//!
//! The environment is read once per process. Tests and embedders that want a
//! fixed configuration build a [`KernelConfig`] directly and pass it to
//! [`crate::backend::detect`].

use std::fmt;
use std::sync::OnceLock;

use strided_traits::{DType, Element};

/// Which backend the caller asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BackendChoice {
    /// Use the accelerated backend when it is compiled in.
    #[default]
    Auto,
    /// Always use the portable scalar loops.
    Portable,
}

impl BackendChoice {
    /// Parse a `STRIDED_BACKEND` value. Matching is case-insensitive.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "" | "auto" => Some(BackendChoice::Auto),
            "portable" | "scalar" => Some(BackendChoice::Portable),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KernelConfig {
    pub backend: BackendChoice,
    /// Log kernel path selection at `debug` instead of `trace`.
    pub trace: bool,
}

impl KernelConfig {
    pub const BACKEND_VAR: &'static str = "STRIDED_BACKEND";
    pub const TRACE_VAR: &'static str = "STRIDED_TRACE";

    /// Build a configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a configuration from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let backend = match lookup(Self::BACKEND_VAR) {
            None => BackendChoice::Auto,
            Some(raw) => BackendChoice::parse(&raw).unwrap_or_else(|| {
                log::warn!(
                    "ignoring unknown {}={:?}, using auto",
                    Self::BACKEND_VAR,
                    raw
                );
                BackendChoice::Auto
            }),
        };
        let trace = matches!(lookup(Self::TRACE_VAR), Some(ref v) if v == "1");
        KernelConfig { backend, trace }
    }

    /// Process-wide configuration, read from the environment on first use.
    pub fn global() -> &'static KernelConfig {
        static CONFIG: OnceLock<KernelConfig> = OnceLock::new();
        CONFIG.get_or_init(KernelConfig::from_env)
    }
}

/// Log which code path a kernel took.
///
/// Both arguments are formatted only if the record is enabled.
#[inline]
pub fn log_path(kernel: impl fmt::Display, path: impl fmt::Display) {
    if KernelConfig::global().trace {
        log::debug!("{kernel}: {path}");
    } else {
        log::trace!("{kernel}: {path}");
    }
}

/// Name of a typed routine: the BLAS letter of `T` followed by the kernel
/// (`dsyr2`, `sgemv`, `zaxpy`), or `kernel<dtype>` for non-BLAS types.
#[derive(Debug, Clone, Copy)]
pub struct RoutineName<'a> {
    kernel: &'a str,
    dtype: DType,
}

impl fmt::Display for RoutineName<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.dtype.blas_prefix() {
            Some(prefix) => write!(f, "{prefix}{}", self.kernel),
            None => write!(f, "{}<{}>", self.kernel, self.dtype),
        }
    }
}

pub fn routine_name<T: Element>(kernel: &str) -> RoutineName<'_> {
    RoutineName {
        kernel,
        dtype: T::DTYPE,
    }
}

/// [`log_path`] under the routine name of `kernel` instantiated at `T`.
#[inline]
pub fn log_typed_path<T: Element>(kernel: &str, path: impl fmt::Display) {
    log_path(routine_name::<T>(kernel), path);
}
