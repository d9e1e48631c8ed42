use strided_kernel::log_typed_path;
use strided_traits::Real;
use strided_view::{stride_to_offset, Result};

use super::{
    at, check_lda, check_matrix_bounds, check_matrix_strides, check_stride, check_vector_bounds,
    TriangleLoop,
};
use crate::{Layout, Uplo};

/// Symmetric rank-2 update: `A = alpha*x*y' + alpha*y*x' + A`.
///
/// Only the `uplo` triangle of the `n x n` matrix `A` is referenced and
/// updated.
#[allow(clippy::too_many_arguments)]
pub fn gsyr2<T: Real>(
    layout: Layout,
    uplo: Uplo,
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
    check_lda(lda, n)?;
    let (sa1, sa2) = layout.matrix_strides(lda);
    let (ox, oy) = (stride_to_offset(n, stride_x), stride_to_offset(n, stride_y));
    gsyr2_ndarray(uplo, n, alpha, x, stride_x, ox, y, stride_y, oy, a, sa1, sa2, 0)
}

/// [`gsyr2`] over explicit matrix strides and offsets.
#[allow(clippy::too_many_arguments)]
pub fn gsyr2_ndarray<T: Real>(
    uplo: Uplo,
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
    if n == 0 || alpha == T::zero() {
        return Ok(());
    }
    check_vector_bounds(x.len(), n, stride_x, offset_x)?;
    check_vector_bounds(y.len(), n, stride_y, offset_y)?;
    check_matrix_bounds(a.len(), n, n, stride_a1, stride_a2, offset_a)?;

    let tri = TriangleLoop::new(uplo, stride_a1, stride_a2);
    log_typed_path::<T>("syr2", tri.describe());
    for o in 0..n {
        let (xo, yo) = (x[at(offset_x, o, stride_x)], y[at(offset_y, o, stride_y)]);
        if xo == T::zero() && yo == T::zero() {
            continue;
        }
        let temp1 = alpha * yo;
        let temp2 = alpha * xo;
        let line = at(offset_a, o, tri.outer);
        for i in tri.inner_range(o, n) {
            let ia = at(line, i, tri.inner);
            let (xi, yi) = (x[at(offset_x, i, stride_x)], y[at(offset_y, i, stride_y)]);
            a[ia] = a[ia] + (xi * temp1 + yi * temp2);
        }
    }
    Ok(())
}

typed! {
    #[allow(clippy::too_many_arguments)]
    pub fn dsyr2(layout: Layout, uplo: Uplo, n: usize, alpha: f64, x: &[f64], stride_x: isize, y: &[f64], stride_y: isize, a: &mut [f64], lda: usize) -> Result<()> => gsyr2::<f64>;
    #[allow(clippy::too_many_arguments)]
    pub fn dsyr2_ndarray(uplo: Uplo, n: usize, alpha: f64, x: &[f64], stride_x: isize, offset_x: usize, y: &[f64], stride_y: isize, offset_y: usize, a: &mut [f64], stride_a1: isize, stride_a2: isize, offset_a: usize) -> Result<()> => gsyr2_ndarray::<f64>;
    #[allow(clippy::too_many_arguments)]
    pub fn ssyr2(layout: Layout, uplo: Uplo, n: usize, alpha: f32, x: &[f32], stride_x: isize, y: &[f32], stride_y: isize, a: &mut [f32], lda: usize) -> Result<()> => gsyr2::<f32>;
    #[allow(clippy::too_many_arguments)]
    pub fn ssyr2_ndarray(uplo: Uplo, n: usize, alpha: f32, x: &[f32], stride_x: isize, offset_x: usize, y: &[f32], stride_y: isize, offset_y: usize, a: &mut [f32], stride_a1: isize, stride_a2: isize, offset_a: usize) -> Result<()> => gsyr2_ndarray::<f32>;
}
