use strided_kernel::backend;
use strided_traits::ScalarBase;
use strided_view::{stride_to_offset, StridedIndices};

use super::{debug_check_view, unit_run};

const UNROLL: usize = 4;

/// `y = alpha * x + y` over strided vectors.
///
/// Returns immediately when `alpha` is zero.
pub fn gaxpy<T: ScalarBase>(n: usize, alpha: T, x: &[T], stride_x: isize, y: &mut [T], stride_y: isize) {
    gaxpy_ndarray(
        n,
        alpha,
        x,
        stride_x,
        stride_to_offset(n, stride_x),
        y,
        stride_y,
        stride_to_offset(n, stride_y),
    )
}

#[allow(clippy::too_many_arguments)]
pub fn gaxpy_ndarray<T: ScalarBase>(
    n: usize,
    alpha: T,
    x: &[T],
    stride_x: isize,
    offset_x: usize,
    y: &mut [T],
    stride_y: isize,
    offset_y: usize,
) {
    if n == 0 || alpha.is_zero() {
        return;
    }
    debug_check_view("axpy", x.len(), n, stride_x, offset_x);
    debug_check_view("axpy", y.len(), n, stride_y, offset_y);
    if stride_x == 1 && stride_y == 1 {
        let xs = &x[unit_run(n, offset_x)];
        let ys = &mut y[unit_run(n, offset_y)];
        let m = n % UNROLL;
        let (xh, xb) = xs.split_at(m);
        let (yh, yb) = ys.split_at_mut(m);
        for (yv, &xv) in yh.iter_mut().zip(xh) {
            *yv = *yv + alpha * xv;
        }
        backend().run_if_large(n, || {
            for (yc, xc) in yb.chunks_exact_mut(UNROLL).zip(xb.chunks_exact(UNROLL)) {
                yc[0] = yc[0] + alpha * xc[0];
                yc[1] = yc[1] + alpha * xc[1];
                yc[2] = yc[2] + alpha * xc[2];
                yc[3] = yc[3] + alpha * xc[3];
            }
        });
        return;
    }
    let xi = StridedIndices::new(n, stride_x, offset_x);
    let yi = StridedIndices::new(n, stride_y, offset_y);
    for (ix, iy) in xi.zip(yi) {
        y[iy] = y[iy] + alpha * x[ix];
    }
}

typed! {
    pub fn daxpy(n: usize, alpha: f64, x: &[f64], stride_x: isize, y: &mut [f64], stride_y: isize) => gaxpy::<f64>;
    pub fn saxpy(n: usize, alpha: f32, x: &[f32], stride_x: isize, y: &mut [f32], stride_y: isize) => gaxpy::<f32>;
    #[allow(clippy::too_many_arguments)]
    pub fn daxpy_ndarray(
        n: usize, alpha: f64, x: &[f64], stride_x: isize, offset_x: usize,
        y: &mut [f64], stride_y: isize, offset_y: usize,
    ) => gaxpy_ndarray::<f64>;
    #[allow(clippy::too_many_arguments)]
    pub fn saxpy_ndarray(
        n: usize, alpha: f32, x: &[f32], stride_x: isize, offset_x: usize,
        y: &mut [f32], stride_y: isize, offset_y: usize,
    ) => gaxpy_ndarray::<f32>;
}
