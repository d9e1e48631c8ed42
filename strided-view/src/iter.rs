//! Buffer-index iterator for 1-D strided views.

use std::iter::FusedIterator;

/// Iterator over the buffer indices `offset, offset + stride, …` of a 1-D view.
///
/// This is the one traversal primitive the 1-D kernels compose, so the sign of
/// the stride never needs special handling at call sites: a negative stride
/// simply walks downwards from `offset`, and a zero stride yields `offset`
/// `n` times.
///
/// Indices are produced as `usize`; an index that would be negative wraps to a
/// huge value and is caught by slice indexing at the use site.
#[derive(Debug, Clone)]
pub struct StridedIndices {
    next: isize,
    stride: isize,
    remaining: usize,
}

impl StridedIndices {
    #[inline]
    pub fn new(n: usize, stride: isize, offset: usize) -> Self {
        Self {
            next: offset as isize,
            stride,
            remaining: n,
        }
    }

    /// Stride between consecutive indices.
    #[inline]
    pub fn stride(&self) -> isize {
        self.stride
    }
}

/// Shorthand for [`StridedIndices::new`].
#[inline]
pub fn strided_indices(n: usize, stride: isize, offset: usize) -> StridedIndices {
    StridedIndices::new(n, stride, offset)
}

impl Iterator for StridedIndices {
    type Item = usize;

    #[inline]
    fn next(&mut self) -> Option<usize> {
        if self.remaining == 0 {
            return None;
        }
        let idx = self.next;
        self.next = self.next.wrapping_add(self.stride);
        self.remaining -= 1;
        Some(idx as usize)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }

    #[inline]
    fn nth(&mut self, n: usize) -> Option<usize> {
        if n >= self.remaining {
            self.remaining = 0;
            return None;
        }
        self.next = self
            .next
            .wrapping_add((n as isize).wrapping_mul(self.stride));
        self.remaining -= n;
        self.next()
    }
}

impl DoubleEndedIterator for StridedIndices {
    #[inline]
    fn next_back(&mut self) -> Option<usize> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        let idx = self
            .next
            .wrapping_add((self.remaining as isize).wrapping_mul(self.stride));
        Some(idx as usize)
    }
}

impl ExactSizeIterator for StridedIndices {}

impl FusedIterator for StridedIndices {}
