//! Kernels over strided one- and N-dimensional views of flat buffers.
//!
//! A strided view is a buffer plus a shape, one signed stride per dimension
//! and a starting offset. Every kernel in this workspace accepts that
//! description directly, so reversed, transposed, broadcast and sub-sampled
//! operands need no copies.
//!
//! The facade re-exports the member crates:
//!
//! - [`traits`] (`strided-traits`): scalar bounds and the [`DType`] table
//! - [`view`] (`strided-view`): bounds helpers, layout classification,
//!   [`StridedView`] and friends, [`StridedError`]
//! - [`kernel`] (`strided-kernel`): N-ary elementwise kernels, nested-array
//!   kernels, pairwise reductions, backend selection
//! - [`blas`] (`strided-blas`): level-1 and level-2 routines
//!
//! # Example
//!
//! ```rust
//! use stridedlib::{dasumpw, ddot, max_view_buffer_index, min_view_buffer_index, unary};
//! use stridedlib::{StridedArray, StridedView};
//!
//! // A 3-element view walking backwards from index 10.
//! assert_eq!(min_view_buffer_index(3, -2, 10), 6);
//! assert_eq!(max_view_buffer_index(3, -2, 10), 10);
//!
//! let x = [1.0, -2.0, 3.0, -4.0];
//! assert_eq!(dasumpw(4, &x, 1), 10.0);
//! assert_eq!(ddot(2, &x, 2, &x, 2), 10.0);
//!
//! let src = StridedView::new(&x, &[2, 2], &[2, 1], 0).unwrap();
//! let mut out = StridedArray::<f64>::col_major(&[2, 2]);
//! unary(&src, &mut out.view_mut(), |v: f64| v.abs()).unwrap();
//! assert_eq!(out.get(&[1, 0]), 3.0);
//! ```

pub use strided_blas as blas;
pub use strided_kernel as kernel;
pub use strided_traits as traits;
pub use strided_view as view;

pub use strided_blas::*;
pub use strided_kernel::{
    assign, assign1d, assign2d, assign3d, assignnd, backend, binary, binary1d, binary2d,
    binary3d, binarynd, dasumpw, dasumpw_ndarray, dcusumpw, dcusumpw_ndarray, dnansumpw,
    dnansumpw_ndarray, dsumpw, dsumpw_ndarray, gasumpw, gasumpw_ndarray, gcusumpw,
    gcusumpw_ndarray, gnansumpw, gnansumpw_ndarray, gsumpw, gsumpw_ndarray, quaternary,
    quaternary1d, quaternary2d, quaternary3d, quaternarynd, sasumpw, sasumpw_ndarray, scusumpw,
    scusumpw_ndarray, snansumpw, snansumpw_ndarray, ssumpw, ssumpw_ndarray, ternary, ternary1d,
    ternary2d, ternary3d, ternarynd, unary, unary1d, unary2d, unary3d, unarynd, Backend,
    BackendChoice, KernelConfig, Nested,
};
pub use strided_traits::{DType, Element, Real, ScalarBase};
pub use strided_view::{
    is_column_major, is_column_major_contiguous, is_contiguous, is_row_major,
    is_row_major_contiguous, max_view_buffer_index, max_view_buffer_index_nd,
    min_view_buffer_index, min_view_buffer_index_nd, minmax_view_buffer_index,
    minmax_view_buffer_index_nd, stride_to_offset, strides_to_order, view_range, StridedArray,
    StridedIndices, StridedView, StridedViewMut, StrideOrder,
};
