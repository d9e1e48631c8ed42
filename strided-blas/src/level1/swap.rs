use strided_kernel::backend;
use strided_view::{stride_to_offset, StridedIndices};

use super::{debug_check_view, unit_run};

const UNROLL: usize = 3;

/// Interchange two strided vectors.
pub fn gswap<T: Copy>(n: usize, x: &mut [T], stride_x: isize, y: &mut [T], stride_y: isize) {
    gswap_ndarray(
        n,
        x,
        stride_x,
        stride_to_offset(n, stride_x),
        y,
        stride_y,
        stride_to_offset(n, stride_y),
    )
}

pub fn gswap_ndarray<T: Copy>(
    n: usize,
    x: &mut [T],
    stride_x: isize,
    offset_x: usize,
    y: &mut [T],
    stride_y: isize,
    offset_y: usize,
) {
    if n == 0 {
        return;
    }
    debug_check_view("swap", x.len(), n, stride_x, offset_x);
    debug_check_view("swap", y.len(), n, stride_y, offset_y);
    if stride_x == 1 && stride_y == 1 {
        let xs = &mut x[unit_run(n, offset_x)];
        let ys = &mut y[unit_run(n, offset_y)];
        let m = n % UNROLL;
        xs[..m].swap_with_slice(&mut ys[..m]);
        backend().run_if_large(n, || {
            for (xc, yc) in xs[m..]
                .chunks_exact_mut(UNROLL)
                .zip(ys[m..].chunks_exact_mut(UNROLL))
            {
                std::mem::swap(&mut xc[0], &mut yc[0]);
                std::mem::swap(&mut xc[1], &mut yc[1]);
                std::mem::swap(&mut xc[2], &mut yc[2]);
            }
        });
        return;
    }
    let xi = StridedIndices::new(n, stride_x, offset_x);
    let yi = StridedIndices::new(n, stride_y, offset_y);
    for (ix, iy) in xi.zip(yi) {
        std::mem::swap(&mut x[ix], &mut y[iy]);
    }
}

typed! {
    pub fn dswap(n: usize, x: &mut [f64], stride_x: isize, y: &mut [f64], stride_y: isize) => gswap::<f64>;
    pub fn dswap_ndarray(
        n: usize, x: &mut [f64], stride_x: isize, offset_x: usize,
        y: &mut [f64], stride_y: isize, offset_y: usize,
    ) => gswap_ndarray::<f64>;
    pub fn sswap(n: usize, x: &mut [f32], stride_x: isize, y: &mut [f32], stride_y: isize) => gswap::<f32>;
    pub fn sswap_ndarray(
        n: usize, x: &mut [f32], stride_x: isize, offset_x: usize,
        y: &mut [f32], stride_y: isize, offset_y: usize,
    ) => gswap_ndarray::<f32>;
}
