//! Scalar type bounds for strided kernels.

use std::fmt::Debug;

use crate::dtype::Element;

/// Arithmetic bounds shared by every kernel that combines elements.
///
/// Integer, real and complex element types all satisfy this bound, so
/// `scal`, `axpy`, `dot` and the elementwise kernels accept any of them.
pub trait ScalarBase:
    Copy
    + Send
    + Sync
    + std::ops::Mul<Output = Self>
    + std::ops::Add<Output = Self>
    + num_traits::Zero
    + num_traits::One
    + PartialEq
{
}

impl<T> ScalarBase for T where
    T: Copy
        + Send
        + Sync
        + std::ops::Mul<Output = T>
        + std::ops::Add<Output = T>
        + num_traits::Zero
        + num_traits::One
        + PartialEq
{
}

/// Real floating-point element types (`f32`, `f64`).
///
/// Reductions and norms need `abs`, `sqrt` and a conversion from the element
/// count, which `num_traits::Float` provides. Arithmetic is always carried out
/// in `Self`, so single-precision kernels round every intermediate result to
/// single precision.
pub trait Real: ScalarBase + num_traits::Float + Element + Default + Debug {
    /// Convert an element count into `Self`.
    fn from_len(n: usize) -> Self;
}

impl Real for f32 {
    #[inline(always)]
    fn from_len(n: usize) -> Self {
        n as f32
    }
}

impl Real for f64 {
    #[inline(always)]
    fn from_len(n: usize) -> Self {
        n as f64
    }
}
