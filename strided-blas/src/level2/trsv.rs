use strided_kernel::log_typed_path;
use strided_traits::Real;
use strided_view::{stride_to_offset, Result};

use super::{
    at, at2, check_lda, check_matrix_bounds, check_matrix_strides, check_stride,
    check_vector_bounds, op_triangle,
};
use crate::{Diag, Layout, Transpose, Uplo};

/// Solve the triangular system `op(A)*x = b` in place; `x` holds `b` on entry.
///
/// A zero on a non-unit diagonal is not detected and produces infinities or
/// NaNs, as in reference BLAS.
#[allow(clippy::too_many_arguments)]
pub fn gtrsv<T: Real>(
    layout: Layout,
    uplo: Uplo,
    trans: Transpose,
    diag: Diag,
    n: usize,
    a: &[T],
    lda: usize,
    x: &mut [T],
    stride_x: isize,
) -> Result<()> {
    check_stride("x", stride_x)?;
    check_lda(lda, n)?;
    let (sa1, sa2) = layout.matrix_strides(lda);
    let ox = stride_to_offset(n, stride_x);
    gtrsv_ndarray(uplo, trans, diag, n, a, sa1, sa2, 0, x, stride_x, ox)
}

#[allow(clippy::too_many_arguments)]
pub fn gtrsv_ndarray<T: Real>(
    uplo: Uplo,
    trans: Transpose,
    diag: Diag,
    n: usize,
    a: &[T],
    stride_a1: isize,
    stride_a2: isize,
    offset_a: usize,
    x: &mut [T],
    stride_x: isize,
    offset_x: usize,
) -> Result<()> {
    check_stride("x", stride_x)?;
    check_matrix_strides("a", stride_a1, stride_a2)?;
    if n == 0 {
        return Ok(());
    }
    check_matrix_bounds(a.len(), n, n, stride_a1, stride_a2, offset_a)?;
    check_vector_bounds(x.len(), n, stride_x, offset_x)?;

    let (uplo, s1, s2) = op_triangle(uplo, trans, stride_a1, stride_a2);
    let b = |i: usize, j: usize| a[at2(offset_a, i, j, s1, s2)];
    let xi = |k: usize| at(offset_x, k, stride_x);

    let solve = |i: usize, js: std::ops::Range<usize>, x: &mut [T]| {
        let mut temp = x[xi(i)];
        for j in js {
            temp = temp - b(i, j) * x[xi(j)];
        }
        if diag == Diag::NonUnit {
            temp = temp / b(i, i);
        }
        x[xi(i)] = temp;
    };
    match uplo {
        Uplo::Upper => {
            log_typed_path::<T>("trsv", "back substitution");
            for i in (0..n).rev() {
                solve(i, i + 1..n, x);
            }
        }
        Uplo::Lower => {
            log_typed_path::<T>("trsv", "forward substitution");
            for i in 0..n {
                solve(i, 0..i, x);
            }
        }
    }
    Ok(())
}

typed! {
    #[allow(clippy::too_many_arguments)]
    pub fn dtrsv(layout: Layout, uplo: Uplo, trans: Transpose, diag: Diag, n: usize, a: &[f64], lda: usize, x: &mut [f64], stride_x: isize) -> Result<()> => gtrsv::<f64>;
    #[allow(clippy::too_many_arguments)]
    pub fn dtrsv_ndarray(uplo: Uplo, trans: Transpose, diag: Diag, n: usize, a: &[f64], stride_a1: isize, stride_a2: isize, offset_a: usize, x: &mut [f64], stride_x: isize, offset_x: usize) -> Result<()> => gtrsv_ndarray::<f64>;
    #[allow(clippy::too_many_arguments)]
    pub fn strsv(layout: Layout, uplo: Uplo, trans: Transpose, diag: Diag, n: usize, a: &[f32], lda: usize, x: &mut [f32], stride_x: isize) -> Result<()> => gtrsv::<f32>;
    #[allow(clippy::too_many_arguments)]
    pub fn strsv_ndarray(uplo: Uplo, trans: Transpose, diag: Diag, n: usize, a: &[f32], stride_a1: isize, stride_a2: isize, offset_a: usize, x: &mut [f32], stride_x: isize, offset_x: usize) -> Result<()> => gtrsv_ndarray::<f32>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    // Row-major [2 1 1; 0 4 2; 0 0 8] stored with junk below the diagonal.
    const U: [f64; 9] = [2.0, 1.0, 1.0, 99.0, 4.0, 2.0, 99.0, 99.0, 8.0];

    #[test]
    fn test_dtrsv_upper() {
        // U * [1, 1, 1] = [4, 6, 8]
        let mut x = [4.0, 6.0, 8.0];
        dtrsv(Layout::RowMajor, Uplo::Upper, Transpose::NoTranspose, Diag::NonUnit, 3, &U, 3, &mut x, 1).unwrap();
        assert_eq!(x, [1.0, 1.0, 1.0]);
    }

    #[test]
    fn test_dtrsv_transpose() {
        // U' * [1, 1, 1] = [2, 5, 11]
        let mut x = [2.0, 5.0, 11.0];
        dtrsv(Layout::RowMajor, Uplo::Upper, Transpose::Transpose, Diag::NonUnit, 3, &U, 3, &mut x, 1).unwrap();
        assert_eq!(x, [1.0, 1.0, 1.0]);
    }

    #[test]
    fn test_dtrsv_inverts_dtrmv() {
        use crate::level2::dtrmv;
        let x0 = [0.5, -1.25, 3.0];
        for uplo in [Uplo::Upper, Uplo::Lower] {
            for trans in [Transpose::NoTranspose, Transpose::Transpose] {
                for diag in [Diag::Unit, Diag::NonUnit] {
                    let mut x = [0.0; 5];
                    // Stride -2 view over a padded buffer.
                    x[4] = x0[0];
                    x[2] = x0[1];
                    x[0] = x0[2];
                    let a: Vec<f64> = U.iter().map(|v| if *v == 99.0 { 3.0 } else { *v }).collect();
                    dtrmv(Layout::ColumnMajor, uplo, trans, diag, 3, &a, 3, &mut x, -2).unwrap();
                    dtrsv(Layout::ColumnMajor, uplo, trans, diag, 3, &a, 3, &mut x, -2).unwrap();
                    assert_relative_eq!(x[4], x0[0], epsilon = 1e-12);
                    assert_relative_eq!(x[2], x0[1], epsilon = 1e-12);
                    assert_relative_eq!(x[0], x0[2], epsilon = 1e-12);
                    assert_eq!(x[1], 0.0);
                }
            }
        }
    }

    #[test]
    fn test_strsv_unit_lower() {
        // L = [1 0; 3 1] (unit), L * [1, 2] = [1, 5]
        let a = [7.0f32, 0.0, 3.0, 7.0];
        let mut x = [1.0f32, 5.0];
        strsv_ndarray(Uplo::Lower, Transpose::NoTranspose, Diag::Unit, 2, &a, 2, 1, 0, &mut x, 1, 0).unwrap();
        assert_eq!(x, [1.0, 2.0]);
    }
}
