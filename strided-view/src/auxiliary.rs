//! Index arithmetic for strided views.
//!
//! A 1-D strided view is the triple `(n, stride, offset)`: element `k` lives at
//! buffer index `offset + k * stride`. The helpers here compute the extremal
//! indices a view dereferences so callers can validate or sub-slice a buffer
//! before handing it to a kernel.

use std::ops::Range;

use crate::{Result, StridedError};

/// Minimum buffer index touched by a 1-D view.
///
/// Returns `offset` unless `n > 0` and `stride < 0`, in which case the last
/// logical element sits lowest in memory.
#[inline]
pub fn min_view_buffer_index(n: usize, stride: isize, offset: usize) -> isize {
    let offset = offset as isize;
    if n > 0 && stride < 0 {
        return offset + (n as isize - 1) * stride;
    }
    offset
}

/// Maximum buffer index touched by a 1-D view.
///
/// Returns `offset` unless `n > 0` and `stride > 0`.
#[inline]
pub fn max_view_buffer_index(n: usize, stride: isize, offset: usize) -> isize {
    let offset = offset as isize;
    if n > 0 && stride > 0 {
        return offset + (n as isize - 1) * stride;
    }
    offset
}

/// Both extremal buffer indices of a 1-D view, `(min, max)`.
#[inline]
pub fn minmax_view_buffer_index(n: usize, stride: isize, offset: usize) -> (isize, isize) {
    (
        min_view_buffer_index(n, stride, offset),
        max_view_buffer_index(n, stride, offset),
    )
}

/// Minimum buffer index touched by an N-D view.
pub fn min_view_buffer_index_nd(shape: &[usize], strides: &[isize], offset: usize) -> isize {
    minmax_view_buffer_index_nd(shape, strides, offset).0
}

/// Maximum buffer index touched by an N-D view.
pub fn max_view_buffer_index_nd(shape: &[usize], strides: &[isize], offset: usize) -> isize {
    minmax_view_buffer_index_nd(shape, strides, offset).1
}

/// Both extremal buffer indices of an N-D view.
///
/// Each dimension contributes `(dim - 1) * stride` to the maximum when the
/// stride is positive and to the minimum when it is negative. Zero-sized
/// dimensions are not special-cased; callers that care check for them first.
pub fn minmax_view_buffer_index_nd(
    shape: &[usize],
    strides: &[isize],
    offset: usize,
) -> (isize, isize) {
    debug_assert_eq!(shape.len(), strides.len());
    let mut min = offset as isize;
    let mut max = offset as isize;
    for (&dim, &stride) in shape.iter().zip(strides.iter()) {
        if dim == 0 {
            continue;
        }
        let extent = (dim as isize - 1) * stride;
        if stride > 0 {
            max += extent;
        } else if stride < 0 {
            min += extent;
        }
    }
    (min, max)
}

/// Starting offset for a buffer traversed `n` times with `stride`.
///
/// Positive strides start at index `0`; non-positive strides start at the far
/// end so that the last logical element lands on index `0`.
#[inline]
pub fn stride_to_offset(n: usize, stride: isize) -> usize {
    if stride > 0 || n == 0 {
        return 0;
    }
    (n - 1) * stride.unsigned_abs()
}

/// Tight buffer range touched by a 1-D view over a buffer of length `len`.
///
/// Returns an empty range for `n == 0`.
pub fn view_range(len: usize, n: usize, stride: isize, offset: usize) -> Result<Range<usize>> {
    if n == 0 {
        return Ok(0..0);
    }
    let extent = (n as isize - 1)
        .checked_mul(stride)
        .ok_or(StridedError::OffsetOverflow)?;
    let start = offset as isize;
    let end = start
        .checked_add(extent)
        .ok_or(StridedError::OffsetOverflow)?;
    let (min, max) = if extent < 0 { (end, start) } else { (start, end) };
    if min < 0 || max as usize >= len {
        return Err(StridedError::OutOfBounds { min, max, len });
    }
    Ok(min as usize..max as usize + 1)
}

/// Compute the relative order of strides.
///
/// Returns a vector where `result[i]` is the rank of `|strides[i]|` among all
/// non-zero strides, starting at 1. Zero strides have order 1.
pub fn index_order(strides: &[isize]) -> Vec<usize> {
    let mut result = vec![1usize; strides.len()];

    for (i, &s) in strides.iter().enumerate() {
        let si = s.unsigned_abs();
        if si == 0 {
            continue;
        }
        result[i] = 1 + strides
            .iter()
            .filter(|&&t| t != 0 && t.unsigned_abs() < si)
            .count();
    }

    result
}
