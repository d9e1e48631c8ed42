use strided_kernel::log_typed_path;
use strided_traits::Real;
use strided_view::{stride_to_offset, Result};

use super::{
    at, at2, check_lda, check_matrix_bounds, check_matrix_strides, check_stride,
    check_vector_bounds, op_triangle,
};
use crate::{Diag, Layout, Transpose, Uplo};

/// Triangular matrix-vector product in place: `x = op(A)*x`.
#[allow(clippy::too_many_arguments)]
pub fn gtrmv<T: Real>(
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
    gtrmv_ndarray(uplo, trans, diag, n, a, sa1, sa2, 0, x, stride_x, ox)
}

#[allow(clippy::too_many_arguments)]
pub fn gtrmv_ndarray<T: Real>(
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

    // Row i of the product only reads x_j on the stored side of the
    // diagonal, so walking towards that side overwrites nothing still needed.
    log_typed_path::<T>("trmv", uplo.as_str());
    let row = |i: usize, js: std::ops::Range<usize>, x: &mut [T]| {
        let mut temp = match diag {
            Diag::Unit => x[xi(i)],
            Diag::NonUnit => b(i, i) * x[xi(i)],
        };
        for j in js {
            temp = temp + b(i, j) * x[xi(j)];
        }
        x[xi(i)] = temp;
    };
    match uplo {
        Uplo::Upper => {
            for i in 0..n {
                row(i, i + 1..n, x);
            }
        }
        Uplo::Lower => {
            for i in (0..n).rev() {
                row(i, 0..i, x);
            }
        }
    }
    Ok(())
}

typed! {
    #[allow(clippy::too_many_arguments)]
    pub fn dtrmv(layout: Layout, uplo: Uplo, trans: Transpose, diag: Diag, n: usize, a: &[f64], lda: usize, x: &mut [f64], stride_x: isize) -> Result<()> => gtrmv::<f64>;
    #[allow(clippy::too_many_arguments)]
    pub fn dtrmv_ndarray(uplo: Uplo, trans: Transpose, diag: Diag, n: usize, a: &[f64], stride_a1: isize, stride_a2: isize, offset_a: usize, x: &mut [f64], stride_x: isize, offset_x: usize) -> Result<()> => gtrmv_ndarray::<f64>;
    #[allow(clippy::too_many_arguments)]
    pub fn strmv(layout: Layout, uplo: Uplo, trans: Transpose, diag: Diag, n: usize, a: &[f32], lda: usize, x: &mut [f32], stride_x: isize) -> Result<()> => gtrmv::<f32>;
    #[allow(clippy::too_many_arguments)]
    pub fn strmv_ndarray(uplo: Uplo, trans: Transpose, diag: Diag, n: usize, a: &[f32], stride_a1: isize, stride_a2: isize, offset_a: usize, x: &mut [f32], stride_x: isize, offset_x: usize) -> Result<()> => gtrmv_ndarray::<f32>;
}

#[cfg(test)]
mod tests {
    use super::*;

    // Row-major [1 2 3; 4 5 6; 7 8 9]
    const A: [f64; 9] = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0];

    #[test]
    fn test_dtrmv_upper_and_lower() {
        let mut x = [1.0, 1.0, 1.0];
        dtrmv(Layout::RowMajor, Uplo::Upper, Transpose::NoTranspose, Diag::NonUnit, 3, &A, 3, &mut x, 1).unwrap();
        assert_eq!(x, [6.0, 11.0, 9.0]);

        let mut x = [1.0, 1.0, 1.0];
        dtrmv(Layout::RowMajor, Uplo::Lower, Transpose::NoTranspose, Diag::NonUnit, 3, &A, 3, &mut x, 1).unwrap();
        assert_eq!(x, [1.0, 9.0, 24.0]);
    }

    #[test]
    fn test_dtrmv_transpose_and_unit() {
        // U' * [1 1 1] with U = upper(A): columns of U summed.
        let mut x = [1.0, 1.0, 1.0];
        dtrmv(Layout::RowMajor, Uplo::Upper, Transpose::Transpose, Diag::NonUnit, 3, &A, 3, &mut x, 1).unwrap();
        assert_eq!(x, [1.0, 7.0, 18.0]);

        let mut x = [1.0, 1.0, 1.0];
        dtrmv(Layout::RowMajor, Uplo::Upper, Transpose::NoTranspose, Diag::Unit, 3, &A, 3, &mut x, 1).unwrap();
        assert_eq!(x, [6.0, 7.0, 1.0]);
    }

    #[test]
    fn test_dtrmv_column_major_matches_transposed_row_major() {
        // Column-major reading of A is A'; its lower triangle is upper(A)'.
        let mut x = [1.0, 2.0, 3.0];
        dtrmv(Layout::ColumnMajor, Uplo::Lower, Transpose::NoTranspose, Diag::NonUnit, 3, &A, 3, &mut x, 1).unwrap();
        let mut y = [1.0, 2.0, 3.0];
        dtrmv(Layout::RowMajor, Uplo::Upper, Transpose::Transpose, Diag::NonUnit, 3, &A, 3, &mut y, 1).unwrap();
        assert_eq!(x, y);
    }

    #[test]
    fn test_strmv_ndarray_negative_x_stride() {
        let a = [2.0f32, 1.0, 0.0, 3.0];
        let mut x = [1.0f32, 1.0];
        // Logical x = [x1, x0] = [1, 1]; upper A*x = [3, 3].
        strmv_ndarray(Uplo::Upper, Transpose::NoTranspose, Diag::NonUnit, 2, &a, 2, 1, 0, &mut x, -1, 1).unwrap();
        assert_eq!(x, [3.0, 3.0]);
    }
}
