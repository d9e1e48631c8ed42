use strided_kernel::log_typed_path;
use strided_traits::Real;
use strided_view::{stride_to_offset, Result};

use super::{
    at, check_lda, check_matrix_bounds, check_matrix_strides, check_stride, check_vector_bounds,
    TriangleLoop,
};
use crate::{Layout, Uplo};

/// Symmetric rank-1 update: `A = alpha*x*x' + A` on the `uplo` triangle.
#[allow(clippy::too_many_arguments)]
pub fn gsyr<T: Real>(
    layout: Layout,
    uplo: Uplo,
    n: usize,
    alpha: T,
    x: &[T],
    stride_x: isize,
    a: &mut [T],
    lda: usize,
) -> Result<()> {
    check_stride("x", stride_x)?;
    check_lda(lda, n)?;
    let (sa1, sa2) = layout.matrix_strides(lda);
    gsyr_ndarray(uplo, n, alpha, x, stride_x, stride_to_offset(n, stride_x), a, sa1, sa2, 0)
}

#[allow(clippy::too_many_arguments)]
pub fn gsyr_ndarray<T: Real>(
    uplo: Uplo,
    n: usize,
    alpha: T,
    x: &[T],
    stride_x: isize,
    offset_x: usize,
    a: &mut [T],
    stride_a1: isize,
    stride_a2: isize,
    offset_a: usize,
) -> Result<()> {
    check_stride("x", stride_x)?;
    check_matrix_strides("a", stride_a1, stride_a2)?;
    if n == 0 || alpha == T::zero() {
        return Ok(());
    }
    check_vector_bounds(x.len(), n, stride_x, offset_x)?;
    check_matrix_bounds(a.len(), n, n, stride_a1, stride_a2, offset_a)?;

    let tri = TriangleLoop::new(uplo, stride_a1, stride_a2);
    log_typed_path::<T>("syr", tri.describe());
    for o in 0..n {
        let xo = x[at(offset_x, o, stride_x)];
        if xo == T::zero() {
            continue;
        }
        let temp = alpha * xo;
        let line = at(offset_a, o, tri.outer);
        for i in tri.inner_range(o, n) {
            let ia = at(line, i, tri.inner);
            a[ia] = a[ia] + x[at(offset_x, i, stride_x)] * temp;
        }
    }
    Ok(())
}

typed! {
    #[allow(clippy::too_many_arguments)]
    pub fn dsyr(layout: Layout, uplo: Uplo, n: usize, alpha: f64, x: &[f64], stride_x: isize, a: &mut [f64], lda: usize) -> Result<()> => gsyr::<f64>;
    #[allow(clippy::too_many_arguments)]
    pub fn dsyr_ndarray(uplo: Uplo, n: usize, alpha: f64, x: &[f64], stride_x: isize, offset_x: usize, a: &mut [f64], stride_a1: isize, stride_a2: isize, offset_a: usize) -> Result<()> => gsyr_ndarray::<f64>;
    #[allow(clippy::too_many_arguments)]
    pub fn ssyr(layout: Layout, uplo: Uplo, n: usize, alpha: f32, x: &[f32], stride_x: isize, a: &mut [f32], lda: usize) -> Result<()> => gsyr::<f32>;
    #[allow(clippy::too_many_arguments)]
    pub fn ssyr_ndarray(uplo: Uplo, n: usize, alpha: f32, x: &[f32], stride_x: isize, offset_x: usize, a: &mut [f32], stride_a1: isize, stride_a2: isize, offset_a: usize) -> Result<()> => gsyr_ndarray::<f32>;
}
