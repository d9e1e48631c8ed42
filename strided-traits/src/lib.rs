//! Shared element-type bounds for the strided kernel crates.
//!
//! Kernels are written once against these traits and instantiated for the
//! fixed set of concrete numeric types listed in [`DType`].

pub mod dtype;
pub mod scalar;

pub use dtype::{DType, Element};
pub use scalar::{Real, ScalarBase};
