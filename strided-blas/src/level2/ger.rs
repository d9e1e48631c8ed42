use strided_kernel::log_typed_path;
use strided_traits::Real;
use strided_view::{is_row_major, stride_to_offset, Result};

use super::{
    at, at2, check_lda, check_matrix_bounds, check_matrix_strides, check_stride,
    check_vector_bounds,
};
use crate::Layout;

/// Rank-1 update of a general `m x n` matrix: `A = alpha*x*y' + A`.
#[allow(clippy::too_many_arguments)]
pub fn gger<T: Real>(
    layout: Layout,
    m: usize,
    n: usize,
    alpha: T,
    x: &[T],
    stride_x: isize,
    y: &[T],
    stride_y: isize,
    a: &mut [T],
    lda: usize,
) -> Result<()> {
    check_stride("x", stride_x)?;
    check_stride("y", stride_y)?;
    match layout {
        Layout::RowMajor => check_lda(lda, n)?,
        Layout::ColumnMajor => check_lda(lda, m)?,
    }
    let (sa1, sa2) = layout.matrix_strides(lda);
    let (ox, oy) = (stride_to_offset(m, stride_x), stride_to_offset(n, stride_y));
    gger_ndarray(m, n, alpha, x, stride_x, ox, y, stride_y, oy, a, sa1, sa2, 0)
}

#[allow(clippy::too_many_arguments)]
pub fn gger_ndarray<T: Real>(
    m: usize,
    n: usize,
    alpha: T,
    x: &[T],
    stride_x: isize,
    offset_x: usize,
    y: &[T],
    stride_y: isize,
    offset_y: usize,
    a: &mut [T],
    stride_a1: isize,
    stride_a2: isize,
    offset_a: usize,
) -> Result<()> {
    check_stride("x", stride_x)?;
    check_stride("y", stride_y)?;
    check_matrix_strides("a", stride_a1, stride_a2)?;
    if m == 0 || n == 0 || alpha == T::zero() {
        return Ok(());
    }
    check_vector_bounds(x.len(), m, stride_x, offset_x)?;
    check_vector_bounds(y.len(), n, stride_y, offset_y)?;
    check_matrix_bounds(a.len(), m, n, stride_a1, stride_a2, offset_a)?;

    if is_row_major(&[stride_a1, stride_a2]) {
        log_typed_path::<T>("ger", "row-major");
        for i in 0..m {
            let temp = alpha * x[at(offset_x, i, stride_x)];
            for j in 0..n {
                let ia = at2(offset_a, i, j, stride_a1, stride_a2);
                a[ia] = a[ia] + temp * y[at(offset_y, j, stride_y)];
            }
        }
    } else {
        log_typed_path::<T>("ger", "column-major");
        for j in 0..n {
            let temp = alpha * y[at(offset_y, j, stride_y)];
            for i in 0..m {
                let ia = at2(offset_a, i, j, stride_a1, stride_a2);
                a[ia] = a[ia] + x[at(offset_x, i, stride_x)] * temp;
            }
        }
    }
    Ok(())
}

typed! {
    #[allow(clippy::too_many_arguments)]
    pub fn dger(layout: Layout, m: usize, n: usize, alpha: f64, x: &[f64], stride_x: isize, y: &[f64], stride_y: isize, a: &mut [f64], lda: usize) -> Result<()> => gger::<f64>;
    #[allow(clippy::too_many_arguments)]
    pub fn dger_ndarray(m: usize, n: usize, alpha: f64, x: &[f64], stride_x: isize, offset_x: usize, y: &[f64], stride_y: isize, offset_y: usize, a: &mut [f64], stride_a1: isize, stride_a2: isize, offset_a: usize) -> Result<()> => gger_ndarray::<f64>;
    #[allow(clippy::too_many_arguments)]
    pub fn sger(layout: Layout, m: usize, n: usize, alpha: f32, x: &[f32], stride_x: isize, y: &[f32], stride_y: isize, a: &mut [f32], lda: usize) -> Result<()> => gger::<f32>;
    #[allow(clippy::too_many_arguments)]
    pub fn sger_ndarray(m: usize, n: usize, alpha: f32, x: &[f32], stride_x: isize, offset_x: usize, y: &[f32], stride_y: isize, offset_y: usize, a: &mut [f32], stride_a1: isize, stride_a2: isize, offset_a: usize) -> Result<()> => gger_ndarray::<f32>;
}
