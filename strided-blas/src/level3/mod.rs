//! Level-3 routines: matrix-matrix operations on strided buffers.
//!
//! Argument conventions and validation follow [`crate::level2`]: a main form
//! taking a [`Layout`](crate::Layout) and leading dimensions, and an
//! `_ndarray` form taking explicit strides and offsets.

mod gemm;

pub use gemm::*;
