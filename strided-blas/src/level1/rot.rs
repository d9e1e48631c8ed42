use strided_traits::Real;
use strided_view::{stride_to_offset, StridedIndices};

use super::{debug_check_view, unit_run};

/// Apply a plane rotation to a pair of strided vectors:
///
/// ```text
/// x_k' = c * x_k + s * y_k
/// y_k' = c * y_k - s * x_k
/// ```
pub fn grot<T: Real>(
    n: usize,
    x: &mut [T],
    stride_x: isize,
    y: &mut [T],
    stride_y: isize,
    c: T,
    s: T,
) {
    let (ox, oy) = (stride_to_offset(n, stride_x), stride_to_offset(n, stride_y));
    grot_ndarray(n, x, stride_x, ox, y, stride_y, oy, c, s)
}

#[allow(clippy::too_many_arguments)]
pub fn grot_ndarray<T: Real>(
    n: usize,
    x: &mut [T],
    stride_x: isize,
    offset_x: usize,
    y: &mut [T],
    stride_y: isize,
    offset_y: usize,
    c: T,
    s: T,
) {
    if n == 0 {
        return;
    }
    debug_check_view("rot", x.len(), n, stride_x, offset_x);
    debug_check_view("rot", y.len(), n, stride_y, offset_y);
    if stride_x == 1 && stride_y == 1 {
        let xs = &mut x[unit_run(n, offset_x)];
        let ys = &mut y[unit_run(n, offset_y)];
        for (xv, yv) in xs.iter_mut().zip(ys.iter_mut()) {
            let (w, z) = (*xv, *yv);
            *xv = c * w + s * z;
            *yv = c * z - s * w;
        }
        return;
    }
    let xi = StridedIndices::new(n, stride_x, offset_x);
    let yi = StridedIndices::new(n, stride_y, offset_y);
    for (ix, iy) in xi.zip(yi) {
        let (w, z) = (x[ix], y[iy]);
        x[ix] = c * w + s * z;
        y[iy] = c * z - s * w;
    }
}

typed! {
    pub fn drot(n: usize, x: &mut [f64], stride_x: isize, y: &mut [f64], stride_y: isize, c: f64, s: f64) => grot::<f64>;
    #[allow(clippy::too_many_arguments)]
    pub fn drot_ndarray(n: usize, x: &mut [f64], stride_x: isize, offset_x: usize, y: &mut [f64], stride_y: isize, offset_y: usize, c: f64, s: f64) => grot_ndarray::<f64>;
    pub fn srot(n: usize, x: &mut [f32], stride_x: isize, y: &mut [f32], stride_y: isize, c: f32, s: f32) => grot::<f32>;
    #[allow(clippy::too_many_arguments)]
    pub fn srot_ndarray(n: usize, x: &mut [f32], stride_x: isize, offset_x: usize, y: &mut [f32], stride_y: isize, offset_y: usize, c: f32, s: f32) => grot_ndarray::<f32>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_drot_unit_stride() {
        let mut x = [1.0, 2.0, 3.0];
        let mut y = [4.0, 5.0, 6.0];
        drot(3, &mut x, 1, &mut y, 1, 0.6, 0.8);
        assert_relative_eq!(x[0], 0.6 + 3.2, epsilon = 1e-15);
        assert_relative_eq!(y[0], 2.4 - 0.8, epsilon = 1e-15);
        assert_relative_eq!(x[2], 1.8 + 4.8, epsilon = 1e-15);
        assert_relative_eq!(y[2], 3.6 - 2.4, epsilon = 1e-15);
    }

    #[test]
    fn test_drot_preserves_norm() {
        let theta = 0.3f64;
        let (c, s) = (theta.cos(), theta.sin());
        let mut x = [1.0, -2.0, 0.5, 7.0];
        let mut y = [3.0, 1.0, -4.0, 2.0];
        let before: Vec<f64> = x.iter().zip(&y).map(|(a, b)| a * a + b * b).collect();
        drot(2, &mut x, 2, &mut y, -2, c, s);
        let after: Vec<f64> = x.iter().zip(&y).map(|(a, b)| a * a + b * b).collect();
        // Pairs (x0, y2) and (x2, y0) were rotated; x1, x3, y1, y3 untouched.
        assert_eq!(x[1], -2.0);
        assert_eq!(y[3], 2.0);
        assert_relative_eq!(x[0] * x[0] + y[2] * y[2], 1.0 + 16.0, epsilon = 1e-12);
        assert_relative_eq!(before[1], after[1]);
    }

    #[test]
    fn test_srot_identity() {
        let mut x = [1.0f32, 2.0];
        let mut y = [3.0f32, 4.0];
        srot_ndarray(1, &mut x, 1, 1, &mut y, 1, 0, 1.0, 0.0);
        assert_eq!(x, [1.0, 2.0]);
        assert_eq!(y, [3.0, 4.0]);
    }
}
