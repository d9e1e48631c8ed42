//! Pairwise-summation reductions over strided vectors.
//!
//! Pairwise summation bounds rounding-error growth to `O(log n)`:
//!
//! - `n < 8`: serial loop
//! - `n <= BLOCKSIZE`: eight accumulators advanced by `8 * stride`, combined
//!   as `((s0 + s1) + (s2 + s3)) + ((s4 + s5) + (s6 + s7))`, then a serial tail
//! - `n > BLOCKSIZE`: split at `n / 2` rounded down to a multiple of 8 and
//!   add the two halves
//!
//! All arithmetic is carried out in the element type, so `f32` kernels round
//! every addition to single precision.
//!
//! The cumulative sum (`cusumpw`) follows the same block and split rule:
//! each block is summed from zero and offset by the total carried in from the
//! blocks before it.
//!
//! Each reduction has a main form, whose offset is derived from the stride so
//! that a negative stride starts at the far end of the buffer, and an
//! `_ndarray` form taking an explicit offset.

use strided_traits::Real;
use strided_view::{stride_to_offset, view_range};

use crate::backend::backend;

/// Largest run summed with unrolled accumulators before splitting.
pub const BLOCKSIZE: usize = 128;

const UNROLL: usize = 8;

#[inline(always)]
fn debug_check_view(len: usize, n: usize, stride: isize, offset: usize) {
    debug_assert!(
        view_range(len, n, stride, offset).is_ok(),
        "strided view (n={n}, stride={stride}, offset={offset}) exceeds buffer of length {len}"
    );
}

/// Length of the first half when a run longer than `BLOCKSIZE` is split.
#[inline(always)]
fn split_point(n: usize) -> usize {
    let half = n / 2;
    half - half % UNROLL
}

fn pairwise<T: Real, F: Fn(T) -> T>(n: usize, x: &[T], stride: isize, offset: isize, map: &F) -> T {
    let mut ix = offset;
    if n < UNROLL {
        let mut s = T::zero();
        for _ in 0..n {
            s = s + map(x[ix as usize]);
            ix += stride;
        }
        return s;
    }
    if n <= BLOCKSIZE {
        let mut acc = [T::zero(); UNROLL];
        for a in acc.iter_mut() {
            *a = map(x[ix as usize]);
            ix += stride;
        }
        let rem = n % UNROLL;
        let mut i = UNROLL;
        while i < n - rem {
            for a in acc.iter_mut() {
                *a = *a + map(x[ix as usize]);
                ix += stride;
            }
            i += UNROLL;
        }
        let [s0, s1, s2, s3, s4, s5, s6, s7] = acc;
        let mut s = ((s0 + s1) + (s2 + s3)) + ((s4 + s5) + (s6 + s7));
        while i < n {
            s = s + map(x[ix as usize]);
            ix += stride;
            i += 1;
        }
        return s;
    }
    let half = split_point(n);
    pairwise(half, x, stride, ix, map) + pairwise(n - half, x, stride, ix + half as isize * stride, map)
}

/// Pairwise sum of `map(x[offset + k*stride])` for `k` in `0..n`.
///
/// `n == 0` returns zero and `stride == 0` returns `n * map(x[offset])`.
pub fn pairwise_sum_by<T: Real>(
    n: usize,
    x: &[T],
    stride: isize,
    offset: usize,
    map: impl Fn(T) -> T,
) -> T {
    if n == 0 {
        return T::zero();
    }
    debug_check_view(x.len(), n, stride, offset);
    if stride == 0 {
        return T::from_len(n) * map(x[offset]);
    }
    backend().run_if_large(n, || pairwise(n, x, stride, offset as isize, &map))
}

// ============================================================================
// Sum
// ============================================================================

/// Pairwise sum of a strided vector.
pub fn gsumpw<T: Real>(n: usize, x: &[T], stride: isize) -> T {
    gsumpw_ndarray(n, x, stride, stride_to_offset(n, stride))
}

/// Pairwise sum of a strided vector with an explicit starting offset.
pub fn gsumpw_ndarray<T: Real>(n: usize, x: &[T], stride: isize, offset: usize) -> T {
    pairwise_sum_by(n, x, stride, offset, |v| v)
}

pub fn dsumpw(n: usize, x: &[f64], stride: isize) -> f64 {
    gsumpw(n, x, stride)
}

pub fn dsumpw_ndarray(n: usize, x: &[f64], stride: isize, offset: usize) -> f64 {
    gsumpw_ndarray(n, x, stride, offset)
}

pub fn ssumpw(n: usize, x: &[f32], stride: isize) -> f32 {
    gsumpw(n, x, stride)
}

pub fn ssumpw_ndarray(n: usize, x: &[f32], stride: isize, offset: usize) -> f32 {
    gsumpw_ndarray(n, x, stride, offset)
}

// ============================================================================
// Sum of absolute values
// ============================================================================

/// Pairwise sum of absolute values of a strided vector.
pub fn gasumpw<T: Real>(n: usize, x: &[T], stride: isize) -> T {
    gasumpw_ndarray(n, x, stride, stride_to_offset(n, stride))
}

pub fn gasumpw_ndarray<T: Real>(n: usize, x: &[T], stride: isize, offset: usize) -> T {
    pairwise_sum_by(n, x, stride, offset, T::abs)
}

pub fn dasumpw(n: usize, x: &[f64], stride: isize) -> f64 {
    gasumpw(n, x, stride)
}

pub fn dasumpw_ndarray(n: usize, x: &[f64], stride: isize, offset: usize) -> f64 {
    gasumpw_ndarray(n, x, stride, offset)
}

pub fn sasumpw(n: usize, x: &[f32], stride: isize) -> f32 {
    gasumpw(n, x, stride)
}

pub fn sasumpw_ndarray(n: usize, x: &[f32], stride: isize, offset: usize) -> f32 {
    gasumpw_ndarray(n, x, stride, offset)
}

// ============================================================================
// NaN-skipping sum
// ============================================================================

fn nan_pairwise<T: Real>(n: usize, x: &[T], stride: isize, offset: isize) -> (T, usize) {
    let mut ix = offset;
    if n <= BLOCKSIZE {
        let mut acc = [T::zero(); UNROLL];
        let mut count = 0usize;
        let rem = n % UNROLL;
        let mut i = 0;
        while i < n - rem {
            for a in acc.iter_mut() {
                let v = x[ix as usize];
                if !v.is_nan() {
                    *a = *a + v;
                    count += 1;
                }
                ix += stride;
            }
            i += UNROLL;
        }
        let [s0, s1, s2, s3, s4, s5, s6, s7] = acc;
        let mut s = ((s0 + s1) + (s2 + s3)) + ((s4 + s5) + (s6 + s7));
        while i < n {
            let v = x[ix as usize];
            if !v.is_nan() {
                s = s + v;
                count += 1;
            }
            ix += stride;
            i += 1;
        }
        return (s, count);
    }
    let half = split_point(n);
    let (a, ca) = nan_pairwise(half, x, stride, ix);
    let (b, cb) = nan_pairwise(n - half, x, stride, ix + half as isize * stride);
    (a + b, ca + cb)
}

/// Pairwise sum ignoring NaN, with the number of elements summed.
pub fn gnansumpw_ndarray<T: Real>(n: usize, x: &[T], stride: isize, offset: usize) -> (T, usize) {
    if n == 0 {
        return (T::zero(), 0);
    }
    debug_check_view(x.len(), n, stride, offset);
    if stride == 0 {
        let v = x[offset];
        return if v.is_nan() {
            (T::zero(), 0)
        } else {
            (T::from_len(n) * v, n)
        };
    }
    backend().run_if_large(n, || nan_pairwise(n, x, stride, offset as isize))
}

pub fn gnansumpw<T: Real>(n: usize, x: &[T], stride: isize) -> (T, usize) {
    gnansumpw_ndarray(n, x, stride, stride_to_offset(n, stride))
}

pub fn dnansumpw(n: usize, x: &[f64], stride: isize) -> (f64, usize) {
    gnansumpw(n, x, stride)
}

pub fn dnansumpw_ndarray(n: usize, x: &[f64], stride: isize, offset: usize) -> (f64, usize) {
    gnansumpw_ndarray(n, x, stride, offset)
}

pub fn snansumpw(n: usize, x: &[f32], stride: isize) -> (f32, usize) {
    gnansumpw(n, x, stride)
}

pub fn snansumpw_ndarray(n: usize, x: &[f32], stride: isize, offset: usize) -> (f32, usize) {
    gnansumpw_ndarray(n, x, stride, offset)
}

// ============================================================================
// Cumulative sum
// ============================================================================

/// Runs of at most `BLOCKSIZE` are summed from zero and offset by the carried
/// total; longer runs split like [`pairwise`] and carry the last prefix of the
/// first half into the second.
#[allow(clippy::too_many_arguments)]
fn cumulative<T: Real>(
    n: usize,
    sum: T,
    x: &[T],
    stride_x: isize,
    offset_x: isize,
    y: &mut [T],
    stride_y: isize,
    offset_y: isize,
) {
    if n <= BLOCKSIZE {
        let (mut ix, mut iy) = (offset_x, offset_y);
        let mut s = T::zero();
        for _ in 0..n {
            s = s + x[ix as usize];
            y[iy as usize] = sum + s;
            ix += stride_x;
            iy += stride_y;
        }
        return;
    }
    let half = split_point(n);
    cumulative(half, sum, x, stride_x, offset_x, y, stride_y, offset_y);
    let last = offset_y + (half as isize - 1) * stride_y;
    let carried = y[last as usize];
    cumulative(
        n - half,
        carried,
        x,
        stride_x,
        offset_x + half as isize * stride_x,
        y,
        stride_y,
        last + stride_y,
    );
}

/// Cumulative pairwise sum: `y[k] = sum + x[0] + ... + x[k]`.
pub fn gcusumpw<T: Real>(n: usize, sum: T, x: &[T], stride_x: isize, y: &mut [T], stride_y: isize) {
    gcusumpw_ndarray(
        n,
        sum,
        x,
        stride_x,
        stride_to_offset(n, stride_x),
        y,
        stride_y,
        stride_to_offset(n, stride_y),
    )
}

#[allow(clippy::too_many_arguments)]
pub fn gcusumpw_ndarray<T: Real>(
    n: usize,
    sum: T,
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
    debug_check_view(x.len(), n, stride_x, offset_x);
    debug_check_view(y.len(), n, stride_y, offset_y);
    backend().run_if_large(n, || {
        cumulative(n, sum, x, stride_x, offset_x as isize, y, stride_y, offset_y as isize)
    })
}

pub fn dcusumpw(n: usize, sum: f64, x: &[f64], stride_x: isize, y: &mut [f64], stride_y: isize) {
    gcusumpw(n, sum, x, stride_x, y, stride_y)
}

#[allow(clippy::too_many_arguments)]
pub fn dcusumpw_ndarray(
    n: usize,
    sum: f64,
    x: &[f64],
    stride_x: isize,
    offset_x: usize,
    y: &mut [f64],
    stride_y: isize,
    offset_y: usize,
) {
    gcusumpw_ndarray(n, sum, x, stride_x, offset_x, y, stride_y, offset_y)
}

pub fn scusumpw(n: usize, sum: f32, x: &[f32], stride_x: isize, y: &mut [f32], stride_y: isize) {
    gcusumpw(n, sum, x, stride_x, y, stride_y)
}

#[allow(clippy::too_many_arguments)]
pub fn scusumpw_ndarray(
    n: usize,
    sum: f32,
    x: &[f32],
    stride_x: isize,
    offset_x: usize,
    y: &mut [f32],
    stride_y: isize,
    offset_y: usize,
) {
    gcusumpw_ndarray(n, sum, x, stride_x, offset_x, y, stride_y, offset_y)
}
