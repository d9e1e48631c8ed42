//! Level-2 routines: matrix-vector operations on strided buffers.
//!
//! Every routine has two forms. The main form takes a [`Layout`] and a
//! leading dimension, like classic BLAS. The `_ndarray` form takes the two
//! matrix strides and an offset directly; its storage order is inferred from
//! the relative magnitude of the strides, and either stride may be negative.
//!
//! Arguments are validated once at entry. After that, every buffer index the
//! loops compute is known to be in range.
//!
//! [`Layout`]: crate::Layout

mod gemv;
mod ger;
mod spmv;
mod spr;
mod symv;
mod syr;
mod syr2;
mod trmv;
mod trsv;

pub use gemv::*;
pub use ger::*;
pub use spmv::*;
pub use spr::*;
pub use symv::*;
pub use syr::*;
pub use syr2::*;
pub use trmv::*;
pub use trsv::*;

use strided_traits::Real;
use strided_view::{
    is_row_major, minmax_view_buffer_index_nd, view_range, Result, StridedError,
};

use crate::{Layout, Transpose, Uplo};

fn reject(err: StridedError) -> Result<()> {
    log::debug!("level-2 argument rejected: {err}");
    Err(err)
}

/// Reject a zero vector stride.
pub(crate) fn check_stride(arg: &'static str, stride: isize) -> Result<()> {
    if stride == 0 {
        return reject(StridedError::ZeroStride { arg });
    }
    Ok(())
}

/// Reject zero matrix strides.
pub(crate) fn check_matrix_strides(arg: &'static str, stride1: isize, stride2: isize) -> Result<()> {
    check_stride(arg, stride1)?;
    check_stride(arg, stride2)
}

/// Leading dimension must cover a full row (row-major) or column (column-major).
pub(crate) fn check_lda(lda: usize, extent: usize) -> Result<()> {
    let min = extent.max(1);
    if lda < min {
        return reject(StridedError::InvalidLeadingDimension { lda, min });
    }
    Ok(())
}

/// The `n`-element vector view must lie inside its buffer.
pub(crate) fn check_vector_bounds(len: usize, n: usize, stride: isize, offset: usize) -> Result<()> {
    match view_range(len, n, stride, offset) {
        Ok(_) => Ok(()),
        Err(err) => reject(err),
    }
}

/// The `rows x cols` matrix view must lie inside its buffer.
pub(crate) fn check_matrix_bounds(
    len: usize,
    rows: usize,
    cols: usize,
    stride1: isize,
    stride2: isize,
    offset: usize,
) -> Result<()> {
    if rows == 0 || cols == 0 {
        return Ok(());
    }
    let (min, max) = minmax_view_buffer_index_nd(&[rows, cols], &[stride1, stride2], offset);
    if min < 0 || max as usize >= len {
        return reject(StridedError::OutOfBounds { min, max, len });
    }
    Ok(())
}

/// Buffer index of logical element `k` of a validated view.
#[inline(always)]
pub(crate) fn at(offset: usize, k: usize, stride: isize) -> usize {
    (offset as isize + k as isize * stride) as usize
}

/// Buffer index of element `(i, j)` of a validated matrix view.
#[inline(always)]
pub(crate) fn at2(offset: usize, i: usize, j: usize, stride1: isize, stride2: isize) -> usize {
    (offset as isize + i as isize * stride1 + j as isize * stride2) as usize
}

/// Loop structure of a square matrix view for triangle traversal.
///
/// The outer loop runs over rows for row-major storage and over columns
/// otherwise, so the inner loop follows the smaller stride.
#[derive(Debug, Clone, Copy)]
pub(crate) struct TriangleLoop {
    pub(crate) row_major: bool,
    /// Stride between consecutive inner-loop elements.
    pub(crate) inner: isize,
    /// Stride between consecutive outer-loop elements.
    pub(crate) outer: isize,
    /// The stored triangle has `inner <= outer`.
    pub(crate) inner_le_outer: bool,
}

impl TriangleLoop {
    pub(crate) fn new(uplo: Uplo, stride1: isize, stride2: isize) -> Self {
        let row_major = is_row_major(&[stride1, stride2]);
        let (inner, outer) = if row_major {
            (stride2, stride1)
        } else {
            (stride1, stride2)
        };
        let inner_le_outer = matches!(
            (row_major, uplo),
            (false, Uplo::Upper) | (true, Uplo::Lower)
        );
        TriangleLoop {
            row_major,
            inner,
            outer,
            inner_le_outer,
        }
    }

    /// Inner indices of the stored triangle in outer line `o`, diagonal included.
    #[inline]
    pub(crate) fn inner_range(&self, o: usize, n: usize) -> std::ops::Range<usize> {
        if self.inner_le_outer {
            0..o + 1
        } else {
            o..n
        }
    }

    pub(crate) fn describe(&self) -> &'static str {
        match (self.row_major, self.inner_le_outer) {
            (false, true) => "column-major upper",
            (false, false) => "column-major lower",
            (true, true) => "row-major lower",
            (true, false) => "row-major upper",
        }
    }
}

/// Strides and referenced triangle of `op(A)` for a triangular operand.
///
/// Transposing swaps the strides and turns the upper triangle into the lower.
pub(crate) fn op_triangle(
    uplo: Uplo,
    trans: Transpose,
    stride1: isize,
    stride2: isize,
) -> (Uplo, isize, isize) {
    if trans.is_transposed() {
        (uplo.flip(), stride2, stride1)
    } else {
        (uplo, stride1, stride2)
    }
}

/// One triangle of a symmetric `n x n` matrix stored line after line with no
/// gaps: rows for row-major, columns for column-major.
#[derive(Debug, Clone, Copy)]
pub(crate) struct PackedTriangle {
    layout: Layout,
    n: usize,
    /// Line `o` holds inner indices `0..=o` (otherwise `o..n`).
    pub(crate) inner_le_outer: bool,
}

impl PackedTriangle {
    pub(crate) fn new(layout: Layout, uplo: Uplo, n: usize) -> Self {
        let inner_le_outer = matches!(
            (layout, uplo),
            (Layout::ColumnMajor, Uplo::Upper) | (Layout::RowMajor, Uplo::Lower)
        );
        PackedTriangle {
            layout,
            n,
            inner_le_outer,
        }
    }

    /// Number of stored elements, `n * (n + 1) / 2`.
    pub(crate) fn len(&self) -> usize {
        self.n * (self.n + 1) / 2
    }

    /// Packed position of inner index `i` on stored line `o`.
    #[inline(always)]
    pub(crate) fn position(&self, o: usize, i: usize) -> usize {
        if self.inner_le_outer {
            o * (o + 1) / 2 + i
        } else {
            o * (2 * self.n - o + 1) / 2 + (i - o)
        }
    }

    #[inline]
    pub(crate) fn inner_range(&self, o: usize) -> std::ops::Range<usize> {
        if self.inner_le_outer {
            0..o + 1
        } else {
            o..self.n
        }
    }

    pub(crate) fn describe(&self) -> &'static str {
        match (self.layout, self.inner_le_outer) {
            (Layout::ColumnMajor, true) => "packed column-major upper",
            (Layout::ColumnMajor, false) => "packed column-major lower",
            (Layout::RowMajor, true) => "packed row-major lower",
            (Layout::RowMajor, false) => "packed row-major upper",
        }
    }
}

/// `y += alpha * A * x` for a symmetric `A` of which only one triangle is
/// stored; `elem(o, i)` reads inner index `i` of stored line `o`.
///
/// Each off-diagonal element contributes to both `y_i` and `y_o`. When a line
/// reaches its diagonal last, both terms for `y_o` are folded into a single
/// update.
#[allow(clippy::too_many_arguments)]
pub(crate) fn symmetric_mv<T: Real>(
    n: usize,
    inner_le_outer: bool,
    alpha: T,
    elem: impl Fn(usize, usize) -> T,
    x: &[T],
    stride_x: isize,
    offset_x: usize,
    y: &mut [T],
    stride_y: isize,
    offset_y: usize,
) {
    for o in 0..n {
        let temp1 = alpha * x[at(offset_x, o, stride_x)];
        let mut temp2 = T::zero();
        let diag = elem(o, o);
        let yo = at(offset_y, o, stride_y);
        let off_diagonal = if inner_le_outer { 0..o } else { o + 1..n };
        if !inner_le_outer {
            y[yo] = y[yo] + temp1 * diag;
        }
        for i in off_diagonal {
            let aio = elem(o, i);
            let iy = at(offset_y, i, stride_y);
            y[iy] = y[iy] + temp1 * aio;
            temp2 = temp2 + aio * x[at(offset_x, i, stride_x)];
        }
        y[yo] = if inner_le_outer {
            y[yo] + (temp1 * diag + alpha * temp2)
        } else {
            y[yo] + alpha * temp2
        };
    }
}

/// `y = beta * y` over a validated vector view.
pub(crate) fn scale_by_beta<T: Real>(n: usize, beta: T, y: &mut [T], stride: isize, offset: usize) {
    if beta == T::one() {
        return;
    }
    for k in 0..n {
        let iy = at(offset, k, stride);
        y[iy] = if beta == T::zero() {
            T::zero()
        } else {
            beta * y[iy]
        };
    }
}
