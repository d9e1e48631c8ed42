use strided_traits::Real;
use strided_view::{stride_to_offset, StridedIndices};

use super::debug_check_view;

/// Index (in elements, not buffer slots) of the first element with the
/// largest absolute value. `None` for an empty vector.
///
/// NaN elements never compare greater, so they are skipped unless the first
/// element is NaN.
pub fn giamax<T: Real>(n: usize, x: &[T], stride: isize) -> Option<usize> {
    giamax_ndarray(n, x, stride, stride_to_offset(n, stride))
}

pub fn giamax_ndarray<T: Real>(n: usize, x: &[T], stride: isize, offset: usize) -> Option<usize> {
    if n == 0 {
        return None;
    }
    debug_check_view("iamax", x.len(), n, stride, offset);
    let mut best = 0;
    let mut max = x[offset].abs();
    for (k, ix) in StridedIndices::new(n, stride, offset).enumerate().skip(1) {
        let v = x[ix].abs();
        if v > max {
            best = k;
            max = v;
        }
    }
    Some(best)
}

typed! {
    pub fn idamax(n: usize, x: &[f64], stride: isize) -> Option<usize> => giamax::<f64>;
    pub fn idamax_ndarray(n: usize, x: &[f64], stride: isize, offset: usize) -> Option<usize> => giamax_ndarray::<f64>;
    pub fn isamax(n: usize, x: &[f32], stride: isize) -> Option<usize> => giamax::<f32>;
    pub fn isamax_ndarray(n: usize, x: &[f32], stride: isize, offset: usize) -> Option<usize> => giamax_ndarray::<f32>;
}
