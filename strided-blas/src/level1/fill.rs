use strided_kernel::backend;
use strided_view::{stride_to_offset, StridedIndices};

use super::{debug_check_view, unit_run};

/// Set every element of a strided vector to `alpha`.
pub fn gfill<T: Copy>(n: usize, alpha: T, x: &mut [T], stride: isize) {
    gfill_ndarray(n, alpha, x, stride, stride_to_offset(n, stride))
}

pub fn gfill_ndarray<T: Copy>(n: usize, alpha: T, x: &mut [T], stride: isize, offset: usize) {
    if n == 0 {
        return;
    }
    debug_check_view("fill", x.len(), n, stride, offset);
    if stride == 1 {
        let xs = &mut x[unit_run(n, offset)];
        backend().run_if_large(n, || xs.fill(alpha));
        return;
    }
    for ix in StridedIndices::new(n, stride, offset) {
        x[ix] = alpha;
    }
}

typed! {
    pub fn dfill(n: usize, alpha: f64, x: &mut [f64], stride: isize) => gfill::<f64>;
    pub fn dfill_ndarray(n: usize, alpha: f64, x: &mut [f64], stride: isize, offset: usize) => gfill_ndarray::<f64>;
    pub fn sfill(n: usize, alpha: f32, x: &mut [f32], stride: isize) => gfill::<f32>;
    pub fn sfill_ndarray(n: usize, alpha: f32, x: &mut [f32], stride: isize, offset: usize) => gfill_ndarray::<f32>;
}
