use strided_kernel::backend;
use strided_view::{stride_to_offset, StridedIndices};

use super::{debug_check_view, unit_run};

const UNROLL: usize = 8;

/// Copy a strided vector `x` into `y`.
pub fn gcopy<T: Copy>(n: usize, x: &[T], stride_x: isize, y: &mut [T], stride_y: isize) {
    gcopy_ndarray(
        n,
        x,
        stride_x,
        stride_to_offset(n, stride_x),
        y,
        stride_y,
        stride_to_offset(n, stride_y),
    )
}

pub fn gcopy_ndarray<T: Copy>(
    n: usize,
    x: &[T],
    stride_x: isize,
    offset_x: usize,
    y: &mut [T],
    stride_y: isize,
    offset_y: usize,
) {
    if n == 0 {
        return;
    }
    debug_check_view("copy", x.len(), n, stride_x, offset_x);
    debug_check_view("copy", y.len(), n, stride_y, offset_y);
    if stride_x == 1 && stride_y == 1 {
        let xs = &x[unit_run(n, offset_x)];
        let ys = &mut y[unit_run(n, offset_y)];
        let m = n % UNROLL;
        ys[..m].copy_from_slice(&xs[..m]);
        backend().run_if_large(n, || {
            for (yc, xc) in ys[m..]
                .chunks_exact_mut(UNROLL)
                .zip(xs[m..].chunks_exact(UNROLL))
            {
                yc[0] = xc[0];
                yc[1] = xc[1];
                yc[2] = xc[2];
                yc[3] = xc[3];
                yc[4] = xc[4];
                yc[5] = xc[5];
                yc[6] = xc[6];
                yc[7] = xc[7];
            }
        });
        return;
    }
    let xi = StridedIndices::new(n, stride_x, offset_x);
    let yi = StridedIndices::new(n, stride_y, offset_y);
    for (ix, iy) in xi.zip(yi) {
        y[iy] = x[ix];
    }
}

typed! {
    pub fn dcopy(n: usize, x: &[f64], stride_x: isize, y: &mut [f64], stride_y: isize) => gcopy::<f64>;
    pub fn dcopy_ndarray(
        n: usize, x: &[f64], stride_x: isize, offset_x: usize,
        y: &mut [f64], stride_y: isize, offset_y: usize,
    ) => gcopy_ndarray::<f64>;
    pub fn scopy(n: usize, x: &[f32], stride_x: isize, y: &mut [f32], stride_y: isize) => gcopy::<f32>;
    pub fn scopy_ndarray(
        n: usize, x: &[f32], stride_x: isize, offset_x: usize,
        y: &mut [f32], stride_y: isize, offset_y: usize,
    ) => gcopy_ndarray::<f32>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dcopy_unit_all_remainders() {
        for n in 0..20 {
            let x: Vec<f64> = (0..n).map(|i| i as f64 + 0.5).collect();
            let mut y = vec![0.0; n];
            dcopy(n, &x, 1, &mut y, 1);
            assert_eq!(x, y);
        }
    }

    #[test]
    fn test_dcopy_reverse() {
        let x = [1.0, 2.0, 3.0, 4.0];
        let mut y = [0.0; 4];
        dcopy(4, &x, 1, &mut y, -1);
        assert_eq!(y, [4.0, 3.0, 2.0, 1.0]);
    }

    #[test]
    fn test_scopy_ndarray_gather() {
        let x = [1.0f32, 2.0, 3.0, 4.0, 5.0, 6.0];
        let mut y = [0.0f32; 4];
        scopy_ndarray(3, &x, 2, 1, &mut y, 1, 1);
        assert_eq!(y, [0.0, 2.0, 4.0, 6.0]);
    }
}
