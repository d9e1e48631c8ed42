//! Data-type table for the supported element types.

use num_complex::{Complex32, Complex64};
use std::fmt;

/// Numeric data types understood by the kernels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DType {
    Int8,
    Int16,
    Int32,
    Int64,
    Uint8,
    Uint16,
    Uint32,
    Uint64,
    Float32,
    Float64,
    Complex64,
    Complex128,
}

impl DType {
    /// All data types, integers first.
    pub const ALL: [DType; 12] = [
        DType::Int8,
        DType::Int16,
        DType::Int32,
        DType::Int64,
        DType::Uint8,
        DType::Uint16,
        DType::Uint32,
        DType::Uint64,
        DType::Float32,
        DType::Float64,
        DType::Complex64,
        DType::Complex128,
    ];

    /// Size of one element in bytes.
    pub const fn byte_size(self) -> usize {
        match self {
            DType::Int8 | DType::Uint8 => 1,
            DType::Int16 | DType::Uint16 => 2,
            DType::Int32 | DType::Uint32 | DType::Float32 => 4,
            DType::Int64 | DType::Uint64 | DType::Float64 | DType::Complex64 => 8,
            DType::Complex128 => 16,
        }
    }

    pub const fn is_floating_point(self) -> bool {
        matches!(
            self,
            DType::Float32 | DType::Float64 | DType::Complex64 | DType::Complex128
        )
    }

    pub const fn is_complex(self) -> bool {
        matches!(self, DType::Complex64 | DType::Complex128)
    }

    pub const fn is_signed(self) -> bool {
        !matches!(
            self,
            DType::Uint8 | DType::Uint16 | DType::Uint32 | DType::Uint64
        )
    }

    /// BLAS-style single-letter prefix (`s`, `d`, `c`, `z`) for floating-point types.
    pub const fn blas_prefix(self) -> Option<char> {
        match self {
            DType::Float32 => Some('s'),
            DType::Float64 => Some('d'),
            DType::Complex64 => Some('c'),
            DType::Complex128 => Some('z'),
            _ => None,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            DType::Int8 => "int8",
            DType::Int16 => "int16",
            DType::Int32 => "int32",
            DType::Int64 => "int64",
            DType::Uint8 => "uint8",
            DType::Uint16 => "uint16",
            DType::Uint32 => "uint32",
            DType::Uint64 => "uint64",
            DType::Float32 => "float32",
            DType::Float64 => "float64",
            DType::Complex64 => "complex64",
            DType::Complex128 => "complex128",
        }
    }
}

impl fmt::Display for DType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Concrete Rust types that map onto a [`DType`].
pub trait Element: Copy + Send + Sync + 'static {
    const DTYPE: DType;
}

macro_rules! impl_element {
    ($($t:ty => $d:ident),* $(,)?) => {
        $(impl Element for $t {
            const DTYPE: DType = DType::$d;
        })*
    };
}

impl_element!(
    i8 => Int8,
    i16 => Int16,
    i32 => Int32,
    i64 => Int64,
    u8 => Uint8,
    u16 => Uint16,
    u32 => Uint32,
    u64 => Uint64,
    f32 => Float32,
    f64 => Float64,
    Complex32 => Complex64,
    Complex64 => Complex128,
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_byte_size_matches_rust_types() {
        fn check<T: Element>() {
            assert_eq!(T::DTYPE.byte_size(), std::mem::size_of::<T>(), "{}", T::DTYPE);
        }
        check::<i8>();
        check::<i16>();
        check::<i32>();
        check::<i64>();
        check::<u8>();
        check::<u16>();
        check::<u32>();
        check::<u64>();
        check::<f32>();
        check::<f64>();
        check::<Complex32>();
        check::<Complex64>();
    }

    #[test]
    fn test_blas_prefix() {
        assert_eq!(f32::DTYPE.blas_prefix(), Some('s'));
        assert_eq!(f64::DTYPE.blas_prefix(), Some('d'));
        assert_eq!(Complex32::DTYPE.blas_prefix(), Some('c'));
        assert_eq!(Complex64::DTYPE.blas_prefix(), Some('z'));
        assert_eq!(i32::DTYPE.blas_prefix(), None);
    }

    #[test]
    fn test_classification() {
        assert!(DType::Complex128.is_complex());
        assert!(DType::Complex128.is_floating_point());
        assert!(!DType::Int64.is_floating_point());
        assert!(DType::Int8.is_signed());
        assert!(!DType::Uint32.is_signed());
        assert_eq!(DType::ALL.len(), 12);
        assert_eq!(DType::Float64.to_string(), "float64");
    }
}
