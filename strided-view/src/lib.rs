//! Strided view types and the index arithmetic shared by every kernel.
//!
//! # Core pieces
//!
//! - [`auxiliary`]: view-bound helpers ([`min_view_buffer_index`],
//!   [`max_view_buffer_index`], [`stride_to_offset`], [`view_range`]) and the
//!   stride ranking used for loop ordering
//! - [`layout`]: row-/column-major classification and contiguity checks
//! - [`StridedIndices`]: the single traversal primitive for 1-D strided views
//! - [`StridedView`] / [`StridedViewMut`] / [`StridedArray`]: N-dimensional views
//!   over flat buffers
//!
//! # Example
//!
//! ```rust
//! use strided_view::{is_row_major_contiguous, min_view_buffer_index, StridedView};
//!
//! // Three elements walked backwards from index 10: 10, 8, 6.
//! assert_eq!(min_view_buffer_index(3, -2, 10), 6);
//!
//! assert!(is_row_major_contiguous(&[3, 2], &[2, 1], 0));
//!
//! let data = vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
//! let view = StridedView::new(&data, &[2, 3], &[3, 1], 0).unwrap();
//! assert_eq!(view.get(&[1, 2]), 6.0);
//! ```

pub mod auxiliary;
pub mod complex;
pub mod iter;
pub mod layout;
pub mod strided_view;

pub use auxiliary::{
    max_view_buffer_index, max_view_buffer_index_nd, min_view_buffer_index,
    min_view_buffer_index_nd, minmax_view_buffer_index, minmax_view_buffer_index_nd,
    stride_to_offset, view_range,
};
pub use complex::{
    reinterpret_complex, reinterpret_complex128, reinterpret_complex128_mut, reinterpret_complex64,
    reinterpret_complex64_mut, reinterpret_complex_mut,
};
pub use iter::{strided_indices, StridedIndices};
pub use layout::{
    col_major_strides, is_column_major, is_column_major_contiguous, is_contiguous, is_row_major,
    is_row_major_contiguous, is_single_segment_compatible, iteration_order, numel,
    row_major_strides, shape_to_strides, strides_to_offset, strides_to_order, Order, StrideOrder,
};
pub use strided_view::{StridedArray, StridedView, StridedViewMut};

// ============================================================================
// Error types
// ============================================================================

/// Errors that can occur while building views or validating kernel arguments.
#[derive(Debug, thiserror::Error)]
pub enum StridedError {
    /// Array ranks do not match.
    #[error("rank mismatch: {0} vs {1}")]
    RankMismatch(usize, usize),

    /// Array shapes are incompatible for the operation.
    #[error("shape mismatch: {0:?} vs {1:?}")]
    ShapeMismatch(Vec<usize>, Vec<usize>),

    /// Invalid axis index for the given array rank.
    #[error("invalid axis {axis} for rank {rank}")]
    InvalidAxis { axis: usize, rank: usize },

    /// A stride of zero was passed where the routine requires a non-zero stride.
    #[error("invalid stride 0 for {arg}")]
    ZeroStride { arg: &'static str },

    /// Stride array length doesn't match dimensions.
    #[error("stride and dims length mismatch")]
    StrideLengthMismatch,

    /// Integer overflow while computing a buffer index.
    #[error("offset overflow while computing buffer index")]
    OffsetOverflow,

    /// The view touches buffer indices outside `[0, len)`.
    #[error("view spans buffer indices {min}..={max} but buffer length is {len}")]
    OutOfBounds { min: isize, max: isize, len: usize },

    /// Leading dimension of a matrix is smaller than `max(1, n)`.
    #[error("invalid leading dimension {lda}: must be at least {min}")]
    InvalidLeadingDimension { lda: usize, min: usize },

    /// A routine parameter is outside its documented domain.
    #[error("invalid parameter: {0}")]
    InvalidParameter(&'static str),
}

/// Result type for strided operations.
pub type Result<T> = std::result::Result<T, StridedError>;
