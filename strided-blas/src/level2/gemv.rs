use strided_kernel::log_typed_path;
use strided_traits::Real;
use strided_view::{stride_to_offset, Result};

use super::{
    at, at2, check_lda, check_matrix_bounds, check_matrix_strides, check_stride,
    check_vector_bounds, scale_by_beta,
};
use crate::{Layout, Transpose};

/// General matrix-vector product: `y = alpha*op(A)*x + beta*y`.
///
/// `A` is `m x n`; `op(A)` is `A` or its transpose. `x` has as many elements
/// as `op(A)` has columns and `y` as many as it has rows.
#[allow(clippy::too_many_arguments)]
pub fn ggemv<T: Real>(
    layout: Layout,
    trans: Transpose,
    m: usize,
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
    match layout {
        Layout::RowMajor => check_lda(lda, n)?,
        Layout::ColumnMajor => check_lda(lda, m)?,
    }
    let (sa1, sa2) = layout.matrix_strides(lda);
    let (len_x, len_y) = if trans.is_transposed() { (m, n) } else { (n, m) };
    let (ox, oy) = (stride_to_offset(len_x, stride_x), stride_to_offset(len_y, stride_y));
    ggemv_ndarray(trans, m, n, alpha, a, sa1, sa2, 0, x, stride_x, ox, beta, y, stride_y, oy)
}

#[allow(clippy::too_many_arguments)]
pub fn ggemv_ndarray<T: Real>(
    trans: Transpose,
    m: usize,
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

    // Work on op(A) directly by swapping strides.
    let (rows, cols, rs, cs) = if trans.is_transposed() {
        (n, m, stride_a2, stride_a1)
    } else {
        (m, n, stride_a1, stride_a2)
    };
    if rows == 0 || ((cols == 0 || alpha == T::zero()) && beta == T::one()) {
        return Ok(());
    }
    check_matrix_bounds(a.len(), m, n, stride_a1, stride_a2, offset_a)?;
    check_vector_bounds(x.len(), cols, stride_x, offset_x)?;
    check_vector_bounds(y.len(), rows, stride_y, offset_y)?;

    scale_by_beta(rows, beta, y, stride_y, offset_y);
    if alpha == T::zero() {
        return Ok(());
    }

    if rs.unsigned_abs() >= cs.unsigned_abs() {
        log_typed_path::<T>("gemv", "dot form");
        for i in 0..rows {
            let mut temp = T::zero();
            for j in 0..cols {
                temp = temp + a[at2(offset_a, i, j, rs, cs)] * x[at(offset_x, j, stride_x)];
            }
            let iy = at(offset_y, i, stride_y);
            y[iy] = y[iy] + alpha * temp;
        }
    } else {
        log_typed_path::<T>("gemv", "axpy form");
        for j in 0..cols {
            let temp = alpha * x[at(offset_x, j, stride_x)];
            if temp == T::zero() {
                continue;
            }
            for i in 0..rows {
                let iy = at(offset_y, i, stride_y);
                y[iy] = y[iy] + temp * a[at2(offset_a, i, j, rs, cs)];
            }
        }
    }
    Ok(())
}

typed! {
    #[allow(clippy::too_many_arguments)]
    pub fn dgemv(layout: Layout, trans: Transpose, m: usize, n: usize, alpha: f64, a: &[f64], lda: usize, x: &[f64], stride_x: isize, beta: f64, y: &mut [f64], stride_y: isize) -> Result<()> => ggemv::<f64>;
    #[allow(clippy::too_many_arguments)]
    pub fn dgemv_ndarray(trans: Transpose, m: usize, n: usize, alpha: f64, a: &[f64], stride_a1: isize, stride_a2: isize, offset_a: usize, x: &[f64], stride_x: isize, offset_x: usize, beta: f64, y: &mut [f64], stride_y: isize, offset_y: usize) -> Result<()> => ggemv_ndarray::<f64>;
    #[allow(clippy::too_many_arguments)]
    pub fn sgemv(layout: Layout, trans: Transpose, m: usize, n: usize, alpha: f32, a: &[f32], lda: usize, x: &[f32], stride_x: isize, beta: f32, y: &mut [f32], stride_y: isize) -> Result<()> => ggemv::<f32>;
    #[allow(clippy::too_many_arguments)]
    pub fn sgemv_ndarray(trans: Transpose, m: usize, n: usize, alpha: f32, a: &[f32], stride_a1: isize, stride_a2: isize, offset_a: usize, x: &[f32], stride_x: isize, offset_x: usize, beta: f32, y: &mut [f32], stride_y: isize, offset_y: usize) -> Result<()> => ggemv_ndarray::<f32>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use strided_view::StridedError;

    // A = [1 2 3; 4 5 6]
    const ROW: [f64; 6] = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
    const COL: [f64; 6] = [1.0, 4.0, 2.0, 5.0, 3.0, 6.0];

    #[test]
    fn test_dgemv_no_transpose() {
        let x = [1.0, 0.0, -1.0];
        let mut y = [0.0; 2];
        dgemv(Layout::RowMajor, Transpose::NoTranspose, 2, 3, 1.0, &ROW, 3, &x, 1, 0.0, &mut y, 1).unwrap();
        assert_eq!(y, [-2.0, -2.0]);

        let mut y = [1.0; 2];
        dgemv(Layout::ColumnMajor, Transpose::NoTranspose, 2, 3, 2.0, &COL, 2, &x, 1, 1.0, &mut y, 1).unwrap();
        assert_eq!(y, [-3.0, -3.0]);
    }

    #[test]
    fn test_dgemv_transpose() {
        let x = [1.0, 1.0];
        for (layout, a, lda) in [(Layout::RowMajor, ROW, 3), (Layout::ColumnMajor, COL, 2)] {
            let mut y = [0.0; 3];
            dgemv(layout, Transpose::Transpose, 2, 3, 1.0, &a, lda, &x, 1, 0.0, &mut y, 1).unwrap();
            assert_eq!(y, [5.0, 7.0, 9.0]);
        }
    }

    #[test]
    fn test_sgemv_ndarray_strided() {
        let a: Vec<f32> = ROW.iter().map(|&v| v as f32).collect();
        let x = [1.0f32, 9.0, 1.0, 9.0, 1.0];
        let mut y = [0.0f32; 2];
        // Reversed rows: op(A) = [4 5 6; 1 2 3].
        sgemv_ndarray(Transpose::NoTranspose, 2, 3, 1.0, &a, -3, 1, 3, &x, 2, 0, 0.0, &mut y, 1, 0).unwrap();
        assert_eq!(y, [15.0, 6.0]);
    }

    #[test]
    fn test_dgemv_invalid_lda() {
        let mut y = [0.0; 2];
        assert!(matches!(
            dgemv(Layout::ColumnMajor, Transpose::NoTranspose, 2, 3, 1.0, &COL, 1, &[0.0; 3], 1, 0.0, &mut y, 1),
            Err(StridedError::InvalidLeadingDimension { lda: 1, min: 2 })
        ));
    }
}
