//! BLAS-style kernels over strided buffers.
//!
//! Every routine comes in three flavours:
//!
//! - a generic `g*` function over the element type (`T: Real` or
//!   `T: ScalarBase`)
//! - typed `d*` (`f64`) and `s*` (`f32`) instantiations
//! - an `_ndarray` variant of each, taking explicit buffer offsets
//!
//! The main (non-`_ndarray`) form derives each vector offset from its stride
//! with [`strided_view::stride_to_offset`], so a negative stride walks the
//! buffer from its far end.
//!
//! Level-1 routines are infallible: a view running off its buffer is a caller
//! error, reported by a debug assertion at entry and, in release builds, by a
//! slice-index panic. Level-2 and level-3 routines validate their arguments
//! and return [`Result`].
//!
//! # Example
//!
//! ```rust
//! use strided_blas::{daxpy, ddot, dnrm2, idamax};
//!
//! let x = [1.0, -4.0, 2.0];
//! let mut y = [1.0, 1.0, 1.0];
//! daxpy(3, 2.0, &x, 1, &mut y, 1);
//! assert_eq!(y, [3.0, -7.0, 5.0]);
//! assert_eq!(ddot(3, &x, 1, &y, 1), 41.0);
//! assert_eq!(idamax(3, &x, 1), Some(1));
//! assert_eq!(dnrm2(2, &[3.0, 4.0], 1), 5.0);
//! ```

#[macro_use]
mod macros;

pub mod layout;
pub mod level1;
pub mod level2;
pub mod level3;

pub use layout::{Diag, Layout, Transpose, Uplo};
pub use level1::*;
pub use level2::*;
pub use level3::*;
pub use strided_view::{Result, StridedError};
