use strided_traits::Real;
use strided_view::{stride_to_offset, StridedIndices};

use super::debug_check_view;

/// Apply a modified Givens transformation `H` to a pair of strided vectors.
///
/// `param = [flag, h11, h21, h12, h22]`:
///
/// | flag | H                     |
/// |------|-----------------------|
/// | -1   | `[h11 h12; h21 h22]`  |
/// | 0    | `[1 h12; h21 1]`      |
/// | 1    | `[h11 1; -1 h22]`     |
/// | -2   | identity              |
pub fn grotm<T: Real>(
    n: usize,
    x: &mut [T],
    stride_x: isize,
    y: &mut [T],
    stride_y: isize,
    param: &[T; 5],
) {
    let (ox, oy) = (stride_to_offset(n, stride_x), stride_to_offset(n, stride_y));
    grotm_ndarray(n, x, stride_x, ox, y, stride_y, oy, param)
}

#[allow(clippy::too_many_arguments)]
pub fn grotm_ndarray<T: Real>(
    n: usize,
    x: &mut [T],
    stride_x: isize,
    offset_x: usize,
    y: &mut [T],
    stride_y: isize,
    offset_y: usize,
    param: &[T; 5],
) {
    let [flag, h11, h21, h12, h22] = *param;
    let two = T::one() + T::one();
    if n == 0 || flag == -two {
        return;
    }
    debug_check_view("rotm", x.len(), n, stride_x, offset_x);
    debug_check_view("rotm", y.len(), n, stride_y, offset_y);

    let (h11, h12, h21, h22) = if flag < T::zero() {
        (h11, h12, h21, h22)
    } else if flag == T::zero() {
        (T::one(), h12, h21, T::one())
    } else {
        (h11, T::one(), -T::one(), h22)
    };
    let xi = StridedIndices::new(n, stride_x, offset_x);
    let yi = StridedIndices::new(n, stride_y, offset_y);
    for (ix, iy) in xi.zip(yi) {
        let (w, z) = (x[ix], y[iy]);
        x[ix] = w * h11 + z * h12;
        y[iy] = w * h21 + z * h22;
    }
}

typed! {
    pub fn drotm(n: usize, x: &mut [f64], stride_x: isize, y: &mut [f64], stride_y: isize, param: &[f64; 5]) => grotm::<f64>;
    #[allow(clippy::too_many_arguments)]
    pub fn drotm_ndarray(n: usize, x: &mut [f64], stride_x: isize, offset_x: usize, y: &mut [f64], stride_y: isize, offset_y: usize, param: &[f64; 5]) => grotm_ndarray::<f64>;
    pub fn srotm(n: usize, x: &mut [f32], stride_x: isize, y: &mut [f32], stride_y: isize, param: &[f32; 5]) => grotm::<f32>;
    #[allow(clippy::too_many_arguments)]
    pub fn srotm_ndarray(n: usize, x: &mut [f32], stride_x: isize, offset_x: usize, y: &mut [f32], stride_y: isize, offset_y: usize, param: &[f32; 5]) => grotm_ndarray::<f32>;
}
