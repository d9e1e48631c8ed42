//! Elementwise and reduction kernels over strided buffers.
//!
//! # Kernel families
//!
//! - [`map_view`]: [`assign`], [`unary`], [`binary`], [`ternary`],
//!   [`quaternary`] over [`StridedView`] / [`StridedViewMut`] of any rank
//! - [`nested`]: the same arities over nested `Vec`s and [`Nested`] arrays
//!   (`unary1d` … `quaternarynd`, `assign1d` … `assignnd`)
//! - [`reduce`]: pairwise summation (`gsumpw`, `gasumpw`, `gnansumpw`,
//!   the cumulative `gcusumpw` and their `d*` / `s*` instantiations)
//!
//! # Backends
//!
//! Hot loops run through the process [`backend::Backend`], chosen once from
//! the `simd` Cargo feature and the `STRIDED_BACKEND` environment variable
//! (see [`config`]). Selection and path choices are reported through the
//! `log` facade.
//!
//! # Example
//!
//! ```rust
//! use strided_kernel::{binary, sasumpw, StridedArray, StridedView};
//!
//! let a = StridedArray::<f64>::from_fn_row_major(&[2, 2], |i| (i[0] * 2 + i[1]) as f64);
//! let col = [10.0, 20.0];
//! let b = StridedView::new(&col, &[2, 1], &[1, 1], 0)
//!     .unwrap()
//!     .broadcast(&[2, 2])
//!     .unwrap();
//! let mut c = StridedArray::<f64>::row_major(&[2, 2]);
//! binary(&a.view(), &b, &mut c.view_mut(), |x, y| x + y).unwrap();
//! assert_eq!(c.data(), &[10.0, 11.0, 22.0, 23.0]);
//!
//! assert_eq!(sasumpw(3, &[1.0, -2.0, 3.0], 1), 6.0);
//! ```

pub mod backend;
pub mod config;
mod kernel;
pub mod map_view;
pub mod nested;
mod order;
pub mod reduce;

pub use backend::{backend, Accelerator, Backend, Portable};
#[cfg(feature = "simd")]
pub use backend::SimdAccelerated;
pub use config::{log_path, log_typed_path, routine_name, BackendChoice, KernelConfig, RoutineName};
pub use map_view::{assign, binary, quaternary, ternary, unary};
pub use nested::{
    assign1d, assign2d, assign3d, assignnd, binary1d, binary2d, binary3d, binarynd,
    quaternary1d, quaternary2d, quaternary3d, quaternarynd, ternary1d, ternary2d, ternary3d,
    ternarynd, unary1d, unary2d, unary3d, unarynd, Nested,
};
pub use reduce::{
    dasumpw, dasumpw_ndarray, dcusumpw, dcusumpw_ndarray, dnansumpw, dnansumpw_ndarray, dsumpw,
    dsumpw_ndarray, gasumpw, gasumpw_ndarray, gcusumpw, gcusumpw_ndarray, gnansumpw,
    gnansumpw_ndarray, gsumpw, gsumpw_ndarray, pairwise_sum_by, sasumpw, sasumpw_ndarray,
    scusumpw, scusumpw_ndarray, snansumpw, snansumpw_ndarray, ssumpw, ssumpw_ndarray,
};
pub use strided_view::{Result, StridedArray, StridedError, StridedView, StridedViewMut};
