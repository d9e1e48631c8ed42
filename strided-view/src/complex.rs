//! Interleaved views of complex buffers.
//!
//! A `[Complex<T>]` of length `n` is laid out as `2n` values of `T`
//! (`re, im, re, im, …`). Complex kernels that only need real arithmetic
//! reinterpret the buffer and double their strides and offsets.

use bytemuck::Pod;
use num_complex::{Complex, Complex32, Complex64};

/// Reinterpret a complex slice as its interleaved real/imaginary parts.
#[inline]
pub fn reinterpret_complex<T>(x: &[Complex<T>]) -> &[T]
where
    T: Pod,
    Complex<T>: Pod,
{
    bytemuck::cast_slice(x)
}

/// Mutable counterpart of [`reinterpret_complex`].
#[inline]
pub fn reinterpret_complex_mut<T>(x: &mut [Complex<T>]) -> &mut [T]
where
    T: Pod,
    Complex<T>: Pod,
{
    bytemuck::cast_slice_mut(x)
}

/// Single-precision complex (64 bits per element) as interleaved `f32`.
#[inline]
pub fn reinterpret_complex64(x: &[Complex32]) -> &[f32] {
    reinterpret_complex(x)
}

#[inline]
pub fn reinterpret_complex64_mut(x: &mut [Complex32]) -> &mut [f32] {
    reinterpret_complex_mut(x)
}

/// Double-precision complex (128 bits per element) as interleaved `f64`.
#[inline]
pub fn reinterpret_complex128(x: &[Complex64]) -> &[f64] {
    reinterpret_complex(x)
}

#[inline]
pub fn reinterpret_complex128_mut(x: &mut [Complex64]) -> &mut [f64] {
    reinterpret_complex_mut(x)
}
