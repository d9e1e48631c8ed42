use strided_kernel::log_typed_path;
use strided_traits::Real;
use strided_view::{stride_to_offset, Result};

use super::{
    at, check_lda, check_matrix_bounds, check_matrix_strides, check_stride, check_vector_bounds,
    scale_by_beta, symmetric_mv, TriangleLoop,
};
use crate::{Layout, Uplo};

/// Symmetric matrix-vector product: `y = alpha*A*x + beta*y`.
///
/// `A` is `n x n` and only its `uplo` triangle is read.
#[allow(clippy::too_many_arguments)]
pub fn gsymv<T: Real>(
    layout: Layout,
    uplo: Uplo,
    n: usize,
    alpha: T,
    a: &[T],
    lda: usize,
    x: &[T],
    stride_x: isize,
    beta: T,
    y: &mut [T],
    stride_y: isize,
) -> Result<()> {
    check_stride("x", stride_x)?;
    check_stride("y", stride_y)?;
    check_lda(lda, n)?;
    let (sa1, sa2) = layout.matrix_strides(lda);
    let (ox, oy) = (stride_to_offset(n, stride_x), stride_to_offset(n, stride_y));
    gsymv_ndarray(uplo, n, alpha, a, sa1, sa2, 0, x, stride_x, ox, beta, y, stride_y, oy)
}

#[allow(clippy::too_many_arguments)]
pub fn gsymv_ndarray<T: Real>(
    uplo: Uplo,
    n: usize,
    alpha: T,
    a: &[T],
    stride_a1: isize,
    stride_a2: isize,
    offset_a: usize,
    x: &[T],
    stride_x: isize,
    offset_x: usize,
    beta: T,
    y: &mut [T],
    stride_y: isize,
    offset_y: usize,
) -> Result<()> {
    check_stride("x", stride_x)?;
    check_stride("y", stride_y)?;
    check_matrix_strides("a", stride_a1, stride_a2)?;
    if n == 0 || (alpha == T::zero() && beta == T::one()) {
        return Ok(());
    }
    check_matrix_bounds(a.len(), n, n, stride_a1, stride_a2, offset_a)?;
    check_vector_bounds(x.len(), n, stride_x, offset_x)?;
    check_vector_bounds(y.len(), n, stride_y, offset_y)?;

    scale_by_beta(n, beta, y, stride_y, offset_y);
    if alpha == T::zero() {
        return Ok(());
    }

    let tri = TriangleLoop::new(uplo, stride_a1, stride_a2);
    log_typed_path::<T>("symv", tri.describe());
    let elem = |o: usize, i: usize| a[at(at(offset_a, o, tri.outer), i, tri.inner)];
    symmetric_mv(n, tri.inner_le_outer, alpha, elem, x, stride_x, offset_x, y, stride_y, offset_y);
    Ok(())
}

typed! {
    #[allow(clippy::too_many_arguments)]
    pub fn dsymv(layout: Layout, uplo: Uplo, n: usize, alpha: f64, a: &[f64], lda: usize, x: &[f64], stride_x: isize, beta: f64, y: &mut [f64], stride_y: isize) -> Result<()> => gsymv::<f64>;
    #[allow(clippy::too_many_arguments)]
    pub fn dsymv_ndarray(uplo: Uplo, n: usize, alpha: f64, a: &[f64], stride_a1: isize, stride_a2: isize, offset_a: usize, x: &[f64], stride_x: isize, offset_x: usize, beta: f64, y: &mut [f64], stride_y: isize, offset_y: usize) -> Result<()> => gsymv_ndarray::<f64>;
    #[allow(clippy::too_many_arguments)]
    pub fn ssymv(layout: Layout, uplo: Uplo, n: usize, alpha: f32, a: &[f32], lda: usize, x: &[f32], stride_x: isize, beta: f32, y: &mut [f32], stride_y: isize) -> Result<()> => gsymv::<f32>;
    #[allow(clippy::too_many_arguments)]
    pub fn ssymv_ndarray(uplo: Uplo, n: usize, alpha: f32, a: &[f32], stride_a1: isize, stride_a2: isize, offset_a: usize, x: &[f32], stride_x: isize, offset_x: usize, beta: f32, y: &mut [f32], stride_y: isize, offset_y: usize) -> Result<()> => gsymv_ndarray::<f32>;
}

#[cfg(test)]
mod tests {
    use super::*;

    // Full symmetric matrix [1 2 3; 2 4 5; 3 5 6], x = [1, -1, 2]
    // A*x = [5, 8, 10]
    const FULL: [f64; 9] = [1.0, 2.0, 3.0, 2.0, 4.0, 5.0, 3.0, 5.0, 6.0];

    fn keep_triangle(layout: Layout, uplo: Uplo) -> [f64; 9] {
        let mut a = FULL;
        for i in 0..3 {
            for j in 0..3 {
                let stored = match uplo {
                    Uplo::Upper => i <= j,
                    Uplo::Lower => i >= j,
                };
                if !stored {
                    let idx = match layout {
                        Layout::RowMajor => i * 3 + j,
                        Layout::ColumnMajor => i + j * 3,
                    };
                    a[idx] = f64::NAN;
                }
            }
        }
        a
    }

    #[test]
    fn test_dsymv_diagonal_last_rounds_once() {
        // Column-major upper: y_1 += (a11*x1 + a01*x0) as one partial sum.
        let a = [0.0, f64::NAN, 1.0, 1.0];
        let mut y = [0.0, 1e16];
        dsymv(Layout::ColumnMajor, Uplo::Upper, 2, 1.0, &a, 2, &[1.0, 1.0], 1, 1.0, &mut y, 1).unwrap();
        assert_eq!(y[0], 1.0);
        assert_eq!(y[1].to_bits(), 1.0000000000000002e16f64.to_bits());
    }

    #[test]
    fn test_dsymv_reads_only_stored_triangle() {
        let x = [1.0, -1.0, 2.0];
        for layout in [Layout::RowMajor, Layout::ColumnMajor] {
            for uplo in [Uplo::Upper, Uplo::Lower] {
                let a = keep_triangle(layout, uplo);
                let mut y = [1.0, 1.0, 1.0];
                dsymv(layout, uplo, 3, 2.0, &a, 3, &x, 1, 0.5, &mut y, 1).unwrap();
                assert_eq!(y, [10.5, 16.5, 20.5], "{layout:?} {uplo:?}");
            }
        }
    }

    #[test]
    fn test_dsymv_alpha_zero_scales_only() {
        let mut y = [1.0, 2.0, 3.0];
        dsymv(Layout::RowMajor, Uplo::Upper, 3, 0.0, &FULL, 3, &[1.0; 3], 1, 3.0, &mut y, 1).unwrap();
        assert_eq!(y, [3.0, 6.0, 9.0]);
    }

    #[test]
    fn test_ssymv_ndarray_negative_y_stride() {
        let a = [2.0f32, 1.0, 1.0, 3.0];
        let x = [1.0f32, 1.0];
        let mut y = [0.0f32; 3];
        ssymv_ndarray(Uplo::Lower, 2, 1.0, &a, 2, 1, 0, &x, 1, 0, 0.0, &mut y, -2, 2).unwrap();
        // A*x = [3, 4]; y walks 2, 0.
        assert_eq!(y, [4.0, 0.0, 3.0]);
    }
}
