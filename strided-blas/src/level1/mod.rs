//! Level-1 routines: vector-vector operations on strided buffers.

mod asum;
mod axpy;
mod complex;
mod copy;
mod dot;
mod fill;
mod iamax;
mod nrm2;
mod rot;
mod rotg;
mod rotm;
mod scal;
mod swap;

pub use asum::*;
pub use axpy::*;
pub use complex::*;
pub use copy::*;
pub use dot::*;
pub use fill::*;
pub use iamax::*;
pub use nrm2::*;
pub use rot::*;
pub use rotg::*;
pub use rotm::*;
pub use scal::*;
pub use swap::*;

use strided_view::view_range;

/// Debug-build check that a 1-D view stays inside its buffer.
#[inline(always)]
pub(crate) fn debug_check_view(name: &str, len: usize, n: usize, stride: isize, offset: usize) {
    debug_assert!(
        view_range(len, n, stride, offset).is_ok(),
        "{name}: strided view (n={n}, stride={stride}, offset={offset}) exceeds buffer of length {len}"
    );
}

/// Buffer range of a unit-stride run, used by the unrolled fast paths.
#[inline(always)]
pub(crate) fn unit_run(n: usize, offset: usize) -> std::ops::Range<usize> {
    offset..offset + n
}
