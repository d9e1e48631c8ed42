//! Complex level-1 routines.
//!
//! Rotations and norms reinterpret the complex buffer as interleaved real
//! values: element `k` of a complex view at `(stride, offset)` has its real
//! part at `2 * (offset + k * stride)` and its imaginary part one slot later.

use num_complex::{Complex32, Complex64};
use strided_traits::Real;
use strided_view::{
    reinterpret_complex128, reinterpret_complex128_mut, reinterpret_complex64,
    reinterpret_complex64_mut, stride_to_offset, StridedIndices,
};

use super::axpy::{gaxpy, gaxpy_ndarray};
use super::fill::gfill_ndarray;
use super::nrm2::Nrm2Accumulator;
use super::rot::grot_ndarray;

// ============================================================================
// Fill
// ============================================================================

/// Fill a complex double-precision strided vector with `alpha`.
pub fn zfill(n: usize, alpha: Complex64, x: &mut [Complex64], stride: isize) {
    zfill_ndarray(n, alpha, x, stride, stride_to_offset(n, stride))
}

pub fn zfill_ndarray(n: usize, alpha: Complex64, x: &mut [Complex64], stride: isize, offset: usize) {
    gfill_ndarray(n, alpha, x, stride, offset)
}

/// Fill a complex single-precision strided vector with `alpha`.
pub fn cfill(n: usize, alpha: Complex32, x: &mut [Complex32], stride: isize) {
    cfill_ndarray(n, alpha, x, stride, stride_to_offset(n, stride))
}

pub fn cfill_ndarray(n: usize, alpha: Complex32, x: &mut [Complex32], stride: isize, offset: usize) {
    gfill_ndarray(n, alpha, x, stride, offset)
}

// ============================================================================
// Scaled addition
// ============================================================================

// Complex arithmetic satisfies `ScalarBase`, so the generic loop applies
// unchanged: each update is `y + (alpha * x)` with the textbook complex
// product.
typed! {
    /// `y = alpha * x + y` over complex double-precision vectors.
    pub fn zaxpy(n: usize, alpha: Complex64, x: &[Complex64], stride_x: isize, y: &mut [Complex64], stride_y: isize) => gaxpy::<Complex64>;
    #[allow(clippy::too_many_arguments)]
    pub fn zaxpy_ndarray(
        n: usize, alpha: Complex64, x: &[Complex64], stride_x: isize, offset_x: usize,
        y: &mut [Complex64], stride_y: isize, offset_y: usize,
    ) => gaxpy_ndarray::<Complex64>;
    /// `y = alpha * x + y` over complex single-precision vectors.
    pub fn caxpy(n: usize, alpha: Complex32, x: &[Complex32], stride_x: isize, y: &mut [Complex32], stride_y: isize) => gaxpy::<Complex32>;
    #[allow(clippy::too_many_arguments)]
    pub fn caxpy_ndarray(
        n: usize, alpha: Complex32, x: &[Complex32], stride_x: isize, offset_x: usize,
        y: &mut [Complex32], stride_y: isize, offset_y: usize,
    ) => gaxpy_ndarray::<Complex32>;
}

// ============================================================================
// Real rotation of complex vectors
// ============================================================================

/// Apply a real plane rotation to complex vectors given as interleaved
/// real buffers: `x = c*x + s*y`, `y = c*y - s*x`.
///
/// Strides and offsets are in complex elements.
#[allow(clippy::too_many_arguments)]
fn interleaved_rot<T: Real>(
    n: usize,
    xr: &mut [T],
    stride_x: isize,
    offset_x: usize,
    yr: &mut [T],
    stride_y: isize,
    offset_y: usize,
    c: T,
    s: T,
) {
    if n == 0 {
        return;
    }
    let (sx, sy) = (2 * stride_x, 2 * stride_y);
    let (ox, oy) = (2 * offset_x, 2 * offset_y);
    // Real parts, then imaginary parts.
    grot_ndarray(n, &mut *xr, sx, ox, &mut *yr, sy, oy, c, s);
    grot_ndarray(n, xr, sx, ox + 1, yr, sy, oy + 1, c, s);
}

pub fn zdrot(
    n: usize,
    x: &mut [Complex64],
    stride_x: isize,
    y: &mut [Complex64],
    stride_y: isize,
    c: f64,
    s: f64,
) {
    let (ox, oy) = (stride_to_offset(n, stride_x), stride_to_offset(n, stride_y));
    zdrot_ndarray(n, x, stride_x, ox, y, stride_y, oy, c, s)
}

#[allow(clippy::too_many_arguments)]
pub fn zdrot_ndarray(
    n: usize,
    x: &mut [Complex64],
    stride_x: isize,
    offset_x: usize,
    y: &mut [Complex64],
    stride_y: isize,
    offset_y: usize,
    c: f64,
    s: f64,
) {
    let (xr, yr) = (reinterpret_complex128_mut(x), reinterpret_complex128_mut(y));
    interleaved_rot(n, xr, stride_x, offset_x, yr, stride_y, offset_y, c, s)
}

pub fn csrot(
    n: usize,
    x: &mut [Complex32],
    stride_x: isize,
    y: &mut [Complex32],
    stride_y: isize,
    c: f32,
    s: f32,
) {
    let (ox, oy) = (stride_to_offset(n, stride_x), stride_to_offset(n, stride_y));
    csrot_ndarray(n, x, stride_x, ox, y, stride_y, oy, c, s)
}

#[allow(clippy::too_many_arguments)]
pub fn csrot_ndarray(
    n: usize,
    x: &mut [Complex32],
    stride_x: isize,
    offset_x: usize,
    y: &mut [Complex32],
    stride_y: isize,
    offset_y: usize,
    c: f32,
    s: f32,
) {
    let (xr, yr) = (reinterpret_complex64_mut(x), reinterpret_complex64_mut(y));
    interleaved_rot(n, xr, stride_x, offset_x, yr, stride_y, offset_y, c, s)
}

// ============================================================================
// Euclidean norm
// ============================================================================

/// Euclidean norm of a complex vector, `sqrt(sum |x_k|^2)`, over its
/// interleaved real buffer. Stride and offset are in complex elements.
fn interleaved_nrm2<T: Real>(n: usize, xr: &[T], stride: isize, offset: usize) -> T {
    if n == 0 {
        return T::zero();
    }
    super::debug_check_view("nrm2", xr.len() / 2, n, stride, offset);
    let mut acc = Nrm2Accumulator::new();
    for ix in StridedIndices::new(n, 2 * stride, 2 * offset) {
        acc.push(xr[ix]);
        acc.push(xr[ix + 1]);
    }
    acc.finish()
}

pub fn dznrm2(n: usize, x: &[Complex64], stride: isize) -> f64 {
    dznrm2_ndarray(n, x, stride, stride_to_offset(n, stride))
}

pub fn dznrm2_ndarray(n: usize, x: &[Complex64], stride: isize, offset: usize) -> f64 {
    interleaved_nrm2(n, reinterpret_complex128(x), stride, offset)
}

pub fn scnrm2(n: usize, x: &[Complex32], stride: isize) -> f32 {
    scnrm2_ndarray(n, x, stride, stride_to_offset(n, stride))
}

pub fn scnrm2_ndarray(n: usize, x: &[Complex32], stride: isize, offset: usize) -> f32 {
    interleaved_nrm2(n, reinterpret_complex64(x), stride, offset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_zfill_cfill() {
        let mut z = vec![Complex64::new(0.0, 0.0); 4];
        zfill(2, Complex64::new(1.0, -1.0), &mut z, 2);
        assert_eq!(z[0], Complex64::new(1.0, -1.0));
        assert_eq!(z[1], Complex64::new(0.0, 0.0));
        assert_eq!(z[2], Complex64::new(1.0, -1.0));

        let mut c = vec![Complex32::new(0.0, 0.0); 3];
        cfill_ndarray(2, Complex32::new(2.0, 3.0), &mut c, -1, 2);
        assert_eq!(c[0], Complex32::new(0.0, 0.0));
        assert_eq!(c[1], Complex32::new(2.0, 3.0));
        assert_eq!(c[2], Complex32::new(2.0, 3.0));
    }

    #[test]
    fn test_zaxpy() {
        let alpha = Complex64::new(2.0, 1.0);
        let x = [Complex64::new(1.0, 1.0), Complex64::new(0.0, -3.0)];
        let mut y = [Complex64::new(1.0, 0.0), Complex64::new(0.0, 1.0)];
        zaxpy(2, alpha, &x, 1, &mut y, 1);
        // (2 + i)(1 + i) = 1 + 3i, (2 + i)(-3i) = 3 - 6i
        assert_eq!(y, [Complex64::new(2.0, 3.0), Complex64::new(3.0, -5.0)]);

        let before = y;
        zaxpy(2, Complex64::new(0.0, 0.0), &x, 1, &mut y, 1);
        assert_eq!(y, before);
    }

    #[test]
    fn test_caxpy_strided() {
        let alpha = Complex32::new(0.0, 1.0);
        let x = [Complex32::new(1.0, 2.0), Complex32::new(9.0, 9.0), Complex32::new(3.0, 4.0)];
        let mut y = [Complex32::new(0.0, 0.0); 2];
        // Main form with y reversed: x[0] -> y[1], x[2] -> y[0].
        caxpy(2, alpha, &x, 2, &mut y, -1);
        assert_eq!(y, [Complex32::new(-4.0, 3.0), Complex32::new(-2.0, 1.0)]);

        let mut y = [Complex32::new(1.0, 1.0); 3];
        caxpy_ndarray(1, alpha, &x, 1, 1, &mut y, 1, 2);
        assert_eq!(y[2], Complex32::new(-8.0, 10.0));
        assert_eq!(y[0], Complex32::new(1.0, 1.0));
    }

    #[test]
    fn test_zdrot() {
        let mut x = vec![Complex64::new(1.0, 2.0), Complex64::new(3.0, 4.0)];
        let mut y = vec![Complex64::new(5.0, 6.0), Complex64::new(7.0, 8.0)];
        let (c, s) = (0.6, 0.8);
        zdrot(2, &mut x, 1, &mut y, 1, c, s);
        assert_relative_eq!(x[0].re, 0.6 * 1.0 + 0.8 * 5.0, epsilon = 1e-12);
        assert_relative_eq!(x[0].im, 0.6 * 2.0 + 0.8 * 6.0, epsilon = 1e-12);
        assert_relative_eq!(y[1].re, 0.6 * 7.0 - 0.8 * 3.0, epsilon = 1e-12);
        assert_relative_eq!(y[1].im, 0.6 * 8.0 - 0.8 * 4.0, epsilon = 1e-12);
    }

    #[test]
    fn test_csrot_strided_leaves_gaps() {
        let mut x = vec![Complex32::new(1.0, 1.0); 3];
        let mut y = vec![Complex32::new(2.0, 2.0); 2];
        csrot(2, &mut x, 2, &mut y, -1, 0.0, 1.0);
        assert_eq!(x[0], Complex32::new(2.0, 2.0));
        assert_eq!(x[1], Complex32::new(1.0, 1.0));
        assert_eq!(x[2], Complex32::new(2.0, 2.0));
        assert_eq!(y[0], Complex32::new(-1.0, -1.0));
        assert_eq!(y[1], Complex32::new(-1.0, -1.0));
    }

    #[test]
    fn test_dznrm2() {
        let x = [Complex64::new(3.0, 4.0), Complex64::new(0.0, 0.0), Complex64::new(0.0, 12.0)];
        assert_relative_eq!(dznrm2(3, &x, 1), 13.0, epsilon = 1e-12);
        assert_relative_eq!(dznrm2_ndarray(2, &x, 2, 0), 13.0, epsilon = 1e-12);
        assert_relative_eq!(dznrm2(1, &x, 1), 5.0, epsilon = 1e-12);
        assert_eq!(scnrm2(0, &[Complex32::new(1.0, 1.0)], 1), 0.0);
        assert_relative_eq!(scnrm2(1, &[Complex32::new(1.0, 1.0)], 1), 2.0f32.sqrt());
    }
}
