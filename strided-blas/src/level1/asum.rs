use strided_kernel::backend;
use strided_traits::Real;
use strided_view::{stride_to_offset, StridedIndices};

use super::{debug_check_view, unit_run};

const UNROLL: usize = 6;

/// Sum of absolute values of a strided vector.
///
/// Plain accumulation; see `strided_kernel::gasumpw` for the pairwise variant.
pub fn gasum<T: Real>(n: usize, x: &[T], stride: isize) -> T {
    gasum_ndarray(n, x, stride, stride_to_offset(n, stride))
}

pub fn gasum_ndarray<T: Real>(n: usize, x: &[T], stride: isize, offset: usize) -> T {
    if n == 0 {
        return T::zero();
    }
    debug_check_view("asum", x.len(), n, stride, offset);
    if stride == 1 {
        let xs = &x[unit_run(n, offset)];
        let (head, body) = xs.split_at(n % UNROLL);
        let mut sum = head.iter().fold(T::zero(), |acc, v| acc + v.abs());
        backend().run_if_large(n, || {
            for c in body.chunks_exact(UNROLL) {
                sum = sum
                    + (c[0].abs() + c[1].abs() + c[2].abs() + c[3].abs() + c[4].abs() + c[5].abs());
            }
        });
        return sum;
    }
    StridedIndices::new(n, stride, offset).fold(T::zero(), |acc, ix| acc + x[ix].abs())
}

typed! {
    pub fn dasum(n: usize, x: &[f64], stride: isize) -> f64 => gasum::<f64>;
    pub fn dasum_ndarray(n: usize, x: &[f64], stride: isize, offset: usize) -> f64 => gasum_ndarray::<f64>;
    pub fn sasum(n: usize, x: &[f32], stride: isize) -> f32 => gasum::<f32>;
    pub fn sasum_ndarray(n: usize, x: &[f32], stride: isize, offset: usize) -> f32 => gasum_ndarray::<f32>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dasum() {
        let x: Vec<f64> = (1..=13).map(|i| if i % 2 == 0 { -(i as f64) } else { i as f64 }).collect();
        assert_eq!(dasum(13, &x, 1), 91.0);
        assert_eq!(dasum(7, &x, 2), 1.0 + 3.0 + 5.0 + 7.0 + 9.0 + 11.0 + 13.0);
        assert_eq!(dasum(0, &x, 1), 0.0);
    }

    #[test]
    fn test_sasum_negative_stride_and_offset() {
        let x = [1.0f32, -2.0, 3.0, -4.0];
        assert_eq!(sasum(2, &x, -2), 4.0);
        assert_eq!(sasum_ndarray(3, &x, -1, 3), 9.0);
    }
}
