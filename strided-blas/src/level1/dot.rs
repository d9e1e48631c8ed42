use strided_kernel::backend;
use strided_traits::ScalarBase;
use strided_view::{stride_to_offset, StridedIndices};

use super::{debug_check_view, unit_run};

const UNROLL: usize = 5;

/// Dot product of two strided vectors.
pub fn gdot<T: ScalarBase>(n: usize, x: &[T], stride_x: isize, y: &[T], stride_y: isize) -> T {
    gdot_ndarray(
        n,
        x,
        stride_x,
        stride_to_offset(n, stride_x),
        y,
        stride_y,
        stride_to_offset(n, stride_y),
    )
}

pub fn gdot_ndarray<T: ScalarBase>(
    n: usize,
    x: &[T],
    stride_x: isize,
    offset_x: usize,
    y: &[T],
    stride_y: isize,
    offset_y: usize,
) -> T {
    dot_with(n, x, stride_x, offset_x, y, stride_y, offset_y, T::zero(), |v| v)
}

/// Shared dot-product loop accumulating in `A` after widening with `widen`.
#[allow(clippy::too_many_arguments)]
#[inline(always)]
fn dot_with<T: Copy, A: ScalarBase>(
    n: usize,
    x: &[T],
    stride_x: isize,
    offset_x: usize,
    y: &[T],
    stride_y: isize,
    offset_y: usize,
    init: A,
    widen: impl Fn(T) -> A,
) -> A {
    if n == 0 {
        return init;
    }
    debug_check_view("dot", x.len(), n, stride_x, offset_x);
    debug_check_view("dot", y.len(), n, stride_y, offset_y);
    let mut dot = init;
    if stride_x == 1 && stride_y == 1 {
        let xs = &x[unit_run(n, offset_x)];
        let ys = &y[unit_run(n, offset_y)];
        let m = n % UNROLL;
        for (&a, &b) in xs[..m].iter().zip(&ys[..m]) {
            dot = dot + widen(a) * widen(b);
        }
        backend().run_if_large(n, || {
            for (xc, yc) in xs[m..].chunks_exact(UNROLL).zip(ys[m..].chunks_exact(UNROLL)) {
                // Each chunk is summed on its own before joining the total.
                dot = dot
                    + (widen(xc[0]) * widen(yc[0])
                        + widen(xc[1]) * widen(yc[1])
                        + widen(xc[2]) * widen(yc[2])
                        + widen(xc[3]) * widen(yc[3])
                        + widen(xc[4]) * widen(yc[4]));
            }
        });
        return dot;
    }
    let xi = StridedIndices::new(n, stride_x, offset_x);
    let yi = StridedIndices::new(n, stride_y, offset_y);
    for (ix, iy) in xi.zip(yi) {
        dot = dot + widen(x[ix]) * widen(y[iy]);
    }
    dot
}

/// Single-precision dot product accumulated in double precision.
pub fn dsdot(n: usize, x: &[f32], stride_x: isize, y: &[f32], stride_y: isize) -> f64 {
    dsdot_ndarray(
        n,
        x,
        stride_x,
        stride_to_offset(n, stride_x),
        y,
        stride_y,
        stride_to_offset(n, stride_y),
    )
}

pub fn dsdot_ndarray(
    n: usize,
    x: &[f32],
    stride_x: isize,
    offset_x: usize,
    y: &[f32],
    stride_y: isize,
    offset_y: usize,
) -> f64 {
    dot_with(n, x, stride_x, offset_x, y, stride_y, offset_y, 0.0f64, f64::from)
}

/// `scalar + x·y`, accumulated in double precision and rounded to single
/// precision once at the end.
pub fn sdsdot(n: usize, scalar: f32, x: &[f32], stride_x: isize, y: &[f32], stride_y: isize) -> f32 {
    sdsdot_ndarray(
        n,
        scalar,
        x,
        stride_x,
        stride_to_offset(n, stride_x),
        y,
        stride_y,
        stride_to_offset(n, stride_y),
    )
}

#[allow(clippy::too_many_arguments)]
pub fn sdsdot_ndarray(
    n: usize,
    scalar: f32,
    x: &[f32],
    stride_x: isize,
    offset_x: usize,
    y: &[f32],
    stride_y: isize,
    offset_y: usize,
) -> f32 {
    let init = f64::from(scalar);
    dot_with(n, x, stride_x, offset_x, y, stride_y, offset_y, init, f64::from) as f32
}

typed! {
    pub fn ddot(n: usize, x: &[f64], stride_x: isize, y: &[f64], stride_y: isize) -> f64 => gdot::<f64>;
    pub fn ddot_ndarray(
        n: usize, x: &[f64], stride_x: isize, offset_x: usize,
        y: &[f64], stride_y: isize, offset_y: usize,
    ) -> f64 => gdot_ndarray::<f64>;
    pub fn sdot(n: usize, x: &[f32], stride_x: isize, y: &[f32], stride_y: isize) -> f32 => gdot::<f32>;
    pub fn sdot_ndarray(
        n: usize, x: &[f32], stride_x: isize, offset_x: usize,
        y: &[f32], stride_y: isize, offset_y: usize,
    ) -> f32 => gdot_ndarray::<f32>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_ddot_unit_all_remainders() {
        for n in 0..12 {
            let x: Vec<f64> = (0..n).map(|i| i as f64).collect();
            let y: Vec<f64> = (0..n).map(|i| 2.0 * i as f64 + 1.0).collect();
            let expected: f64 = x.iter().zip(&y).map(|(a, b)| a * b).sum();
            assert_eq!(ddot(n, &x, 1, &y, 1), expected);
        }
    }

    #[test]
    fn test_ddot_unrolled_chunk_rounding() {
        // The five unit products meet the large leading term as one partial sum.
        let x = [1e16, 1.0, 1.0, 1.0, 1.0, 1.0];
        let y = [1.0; 6];
        assert_eq!(ddot(6, &x, 1, &y, 1).to_bits(), 1.0000000000000004e16f64.to_bits());
        // Strided traversal accumulates element by element.
        assert_eq!(ddot(6, &x, -1, &y, 1).to_bits(), 1.0000000000000004e16f64.to_bits());
    }

    #[test]
    fn test_sdot_strided() {
        let x = [4.0f32, 2.0, -3.0, 5.0, -1.0];
        let y = [2.0f32, 6.0, -1.0, -4.0, 8.0];
        // x[0], x[2], x[4] against y[4], y[2], y[0]
        assert_eq!(sdot(3, &x, 2, &y, -2), 4.0 * 8.0 + 3.0 + -2.0);
        assert_eq!(sdot_ndarray(2, &x, 1, 3, &y, 1, 3), -20.0 - 8.0);
    }

    #[test]
    fn test_dsdot_accumulates_in_double() {
        let x = [1.0e8f32, 1.0, -1.0e8];
        let y = [1.0f32; 3];
        assert_eq!(dsdot(3, &x, 1, &y, 1), 1.0);
        assert_eq!(sdot(3, &x, 1, &y, 1), 0.0);
    }

    #[test]
    fn test_sdsdot() {
        let x = [1.0f32, 2.0, 3.0];
        let y = [4.0f32, 5.0, 6.0];
        assert_relative_eq!(sdsdot(3, 0.5, &x, 1, &y, 1), 32.5);
        assert_eq!(sdsdot(0, 0.5, &x, 1, &y, 1), 0.5);
    }

    #[test]
    fn test_gdot_integers() {
        assert_eq!(gdot(3, &[1i32, 2, 3], 1, &[4, 5, 6], 1), 32);
    }
}
