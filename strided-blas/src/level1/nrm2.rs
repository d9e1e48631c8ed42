use strided_traits::Real;
use strided_view::{stride_to_offset, StridedIndices};

use super::debug_check_view;

/// Running `scale * sqrt(ssq)` state for overflow-safe Euclidean norms.
///
/// Each value is folded in relative to the largest magnitude seen so far, so
/// no intermediate square overflows or underflows for finite input.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Nrm2Accumulator<T> {
    scale: T,
    ssq: T,
}

impl<T: Real> Nrm2Accumulator<T> {
    #[inline]
    pub(crate) fn new() -> Self {
        Self {
            scale: T::zero(),
            ssq: T::one(),
        }
    }

    #[inline]
    pub(crate) fn push(&mut self, v: T) {
        if v == T::zero() {
            return;
        }
        let a = v.abs();
        if self.scale < a {
            let r = self.scale / a;
            self.ssq = T::one() + self.ssq * r * r;
            self.scale = a;
        } else {
            let r = a / self.scale;
            self.ssq = self.ssq + r * r;
        }
    }

    #[inline]
    pub(crate) fn finish(self) -> T {
        self.scale * self.ssq.sqrt()
    }
}

/// Euclidean norm of a strided vector.
pub fn gnrm2<T: Real>(n: usize, x: &[T], stride: isize) -> T {
    gnrm2_ndarray(n, x, stride, stride_to_offset(n, stride))
}

pub fn gnrm2_ndarray<T: Real>(n: usize, x: &[T], stride: isize, offset: usize) -> T {
    if n == 0 {
        return T::zero();
    }
    debug_check_view("nrm2", x.len(), n, stride, offset);
    let mut acc = Nrm2Accumulator::new();
    for ix in StridedIndices::new(n, stride, offset) {
        acc.push(x[ix]);
    }
    acc.finish()
}

typed! {
    pub fn dnrm2(n: usize, x: &[f64], stride: isize) -> f64 => gnrm2::<f64>;
    pub fn dnrm2_ndarray(n: usize, x: &[f64], stride: isize, offset: usize) -> f64 => gnrm2_ndarray::<f64>;
    pub fn snrm2(n: usize, x: &[f32], stride: isize) -> f32 => gnrm2::<f32>;
    pub fn snrm2_ndarray(n: usize, x: &[f32], stride: isize, offset: usize) -> f32 => gnrm2_ndarray::<f32>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_dnrm2() {
        assert_eq!(dnrm2(2, &[3.0, 4.0], 1), 5.0);
        assert_eq!(dnrm2(0, &[3.0, 4.0], 1), 0.0);
        assert_eq!(dnrm2(3, &[0.0, 0.0, 0.0], 1), 0.0);
        let x = [1.0, 9.0, -2.0, 9.0, 2.0];
        assert_relative_eq!(dnrm2(3, &x, 2), 3.0, epsilon = 1e-15);
        assert_relative_eq!(dnrm2_ndarray(2, &x, -2, 4), 8.0f64.sqrt(), epsilon = 1e-15);
    }

    #[test]
    fn test_nrm2_does_not_overflow() {
        let big = 1e200;
        let x = [3.0 * big, 4.0 * big];
        assert_relative_eq!(dnrm2(2, &x, 1), 5.0 * big, max_relative = 1e-14);

        let tiny = 1e-30f32;
        let y = [3.0 * tiny, 4.0 * tiny];
        assert_relative_eq!(snrm2(2, &y, 1), 5.0 * tiny, max_relative = 1e-6);
    }

    #[test]
    fn test_nrm2_propagates_nan() {
        assert!(dnrm2(3, &[1.0, f64::NAN, 2.0], 1).is_nan());
    }
}
