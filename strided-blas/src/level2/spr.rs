use strided_kernel::log_typed_path;
use strided_traits::Real;
use strided_view::{stride_to_offset, Result};

use super::{at, check_stride, check_vector_bounds, PackedTriangle};
use crate::{Layout, Uplo};

/// Symmetric packed rank-1 update: `A = alpha*x*x' + A`, with the `uplo`
/// triangle of `A` packed in `ap` in `layout` order.
#[allow(clippy::too_many_arguments)]
pub fn gspr<T: Real>(
    layout: Layout,
    uplo: Uplo,
    n: usize,
    alpha: T,
    x: &[T],
    stride_x: isize,
    ap: &mut [T],
) -> Result<()> {
    check_stride("x", stride_x)?;
    gspr_ndarray(layout, uplo, n, alpha, x, stride_x, stride_to_offset(n, stride_x), ap, 1, 0)
}

#[allow(clippy::too_many_arguments)]
pub fn gspr_ndarray<T: Real>(
    layout: Layout,
    uplo: Uplo,
    n: usize,
    alpha: T,
    x: &[T],
    stride_x: isize,
    offset_x: usize,
    ap: &mut [T],
    stride_ap: isize,
    offset_ap: usize,
) -> Result<()> {
    check_stride("x", stride_x)?;
    check_stride("ap", stride_ap)?;
    if n == 0 || alpha == T::zero() {
        return Ok(());
    }
    let packed = PackedTriangle::new(layout, uplo, n);
    check_vector_bounds(x.len(), n, stride_x, offset_x)?;
    check_vector_bounds(ap.len(), packed.len(), stride_ap, offset_ap)?;

    log_typed_path::<T>("spr", packed.describe());
    for o in 0..n {
        let xo = x[at(offset_x, o, stride_x)];
        if xo == T::zero() {
            continue;
        }
        let temp = alpha * xo;
        for i in packed.inner_range(o) {
            let k = at(offset_ap, packed.position(o, i), stride_ap);
            ap[k] = ap[k] + x[at(offset_x, i, stride_x)] * temp;
        }
    }
    Ok(())
}

typed! {
    #[allow(clippy::too_many_arguments)]
    pub fn dspr(layout: Layout, uplo: Uplo, n: usize, alpha: f64, x: &[f64], stride_x: isize, ap: &mut [f64]) -> Result<()> => gspr::<f64>;
    #[allow(clippy::too_many_arguments)]
    pub fn dspr_ndarray(layout: Layout, uplo: Uplo, n: usize, alpha: f64, x: &[f64], stride_x: isize, offset_x: usize, ap: &mut [f64], stride_ap: isize, offset_ap: usize) -> Result<()> => gspr_ndarray::<f64>;
    #[allow(clippy::too_many_arguments)]
    pub fn sspr(layout: Layout, uplo: Uplo, n: usize, alpha: f32, x: &[f32], stride_x: isize, ap: &mut [f32]) -> Result<()> => gspr::<f32>;
    #[allow(clippy::too_many_arguments)]
    pub fn sspr_ndarray(layout: Layout, uplo: Uplo, n: usize, alpha: f32, x: &[f32], stride_x: isize, offset_x: usize, ap: &mut [f32], stride_ap: isize, offset_ap: usize) -> Result<()> => gspr_ndarray::<f32>;
}
