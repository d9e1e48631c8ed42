//! Matrix layout and operation selectors.

use std::fmt;
use std::str::FromStr;

use strided_view::{is_row_major, StridedError};

/// Storage order of a dense matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Layout {
    /// Rows are contiguous: element `(i, j)` lives at `i * lda + j`.
    RowMajor,
    /// Columns are contiguous: element `(i, j)` lives at `i + j * lda`.
    ColumnMajor,
}

impl Layout {
    /// `(row stride, column stride)` of a matrix with leading dimension `ld`.
    pub fn matrix_strides(self, ld: usize) -> (isize, isize) {
        match self {
            Layout::RowMajor => (ld as isize, 1),
            Layout::ColumnMajor => (1, ld as isize),
        }
    }

    /// Classify explicit matrix strides.
    ///
    /// Equal stride magnitudes count as row-major.
    pub fn from_strides(stride1: isize, stride2: isize) -> Self {
        if is_row_major(&[stride1, stride2]) {
            Layout::RowMajor
        } else {
            Layout::ColumnMajor
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Layout::RowMajor => "row-major",
            Layout::ColumnMajor => "column-major",
        }
    }
}

/// Which triangle of a symmetric or triangular matrix is referenced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Uplo {
    Upper,
    Lower,
}

impl Uplo {
    /// The triangle that `self` becomes after transposition.
    pub fn flip(self) -> Self {
        match self {
            Uplo::Upper => Uplo::Lower,
            Uplo::Lower => Uplo::Upper,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Uplo::Upper => "upper",
            Uplo::Lower => "lower",
        }
    }
}

/// Operation applied to a matrix operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Transpose {
    NoTranspose,
    Transpose,
    /// Same as [`Transpose::Transpose`] for real element types.
    ConjugateTranspose,
}

impl Transpose {
    #[inline]
    pub fn is_transposed(self) -> bool {
        !matches!(self, Transpose::NoTranspose)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Transpose::NoTranspose => "no-transpose",
            Transpose::Transpose => "transpose",
            Transpose::ConjugateTranspose => "conjugate-transpose",
        }
    }
}

/// Whether a triangular matrix has an implicit unit diagonal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Diag {
    Unit,
    NonUnit,
}

impl Diag {
    pub fn as_str(self) -> &'static str {
        match self {
            Diag::Unit => "unit",
            Diag::NonUnit => "non-unit",
        }
    }
}

macro_rules! impl_str_conversions {
    ($ty:ty, $what:literal, [$($s:literal => $v:expr),+ $(,)?]) => {
        impl FromStr for $ty {
            type Err = StridedError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($s => Ok($v),)+
                    _ => Err(StridedError::InvalidParameter($what)),
                }
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

impl_str_conversions!(Layout, "unrecognized matrix layout", [
    "row-major" => Layout::RowMajor,
    "column-major" => Layout::ColumnMajor,
]);
impl_str_conversions!(Uplo, "unrecognized triangle", [
    "upper" => Uplo::Upper,
    "lower" => Uplo::Lower,
]);
impl_str_conversions!(Transpose, "unrecognized transpose operation", [
    "no-transpose" => Transpose::NoTranspose,
    "transpose" => Transpose::Transpose,
    "conjugate-transpose" => Transpose::ConjugateTranspose,
]);
impl_str_conversions!(Diag, "unrecognized diagonal type", [
    "unit" => Diag::Unit,
    "non-unit" => Diag::NonUnit,
]);
