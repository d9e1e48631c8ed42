use strided_kernel::backend;
use strided_traits::ScalarBase;
use strided_view::{stride_to_offset, StridedIndices};

use super::{debug_check_view, unit_run};

const UNROLL: usize = 5;

/// Multiply a strided vector by a scalar: `x = alpha * x`.
pub fn gscal<T: ScalarBase>(n: usize, alpha: T, x: &mut [T], stride: isize) {
    gscal_ndarray(n, alpha, x, stride, stride_to_offset(n, stride))
}

/// [`gscal`] with an explicit starting offset.
pub fn gscal_ndarray<T: ScalarBase>(n: usize, alpha: T, x: &mut [T], stride: isize, offset: usize) {
    if n == 0 {
        return;
    }
    debug_check_view("scal", x.len(), n, stride, offset);
    if stride == 1 {
        let xs = &mut x[unit_run(n, offset)];
        let (head, body) = xs.split_at_mut(n % UNROLL);
        for v in head.iter_mut() {
            *v = alpha * *v;
        }
        backend().run_if_large(n, || {
            for c in body.chunks_exact_mut(UNROLL) {
                c[0] = alpha * c[0];
                c[1] = alpha * c[1];
                c[2] = alpha * c[2];
                c[3] = alpha * c[3];
                c[4] = alpha * c[4];
            }
        });
        return;
    }
    for ix in StridedIndices::new(n, stride, offset) {
        x[ix] = alpha * x[ix];
    }
}

typed! {
    pub fn dscal(n: usize, alpha: f64, x: &mut [f64], stride: isize) => gscal::<f64>;
    pub fn dscal_ndarray(n: usize, alpha: f64, x: &mut [f64], stride: isize, offset: usize) => gscal_ndarray::<f64>;
    pub fn sscal(n: usize, alpha: f32, x: &mut [f32], stride: isize) => gscal::<f32>;
    pub fn sscal_ndarray(n: usize, alpha: f32, x: &mut [f32], stride: isize, offset: usize) => gscal_ndarray::<f32>;
}
