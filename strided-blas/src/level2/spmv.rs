use strided_kernel::log_typed_path;
use strided_traits::Real;
use strided_view::{stride_to_offset, Result};

use super::{at, check_stride, check_vector_bounds, scale_by_beta, symmetric_mv, PackedTriangle};
use crate::{Layout, Uplo};

/// Symmetric packed matrix-vector product: `y = alpha*A*x + beta*y`.
///
/// `ap` holds the `uplo` triangle of the `n x n` matrix `A`, packed line by
/// line in `layout` order (`n * (n + 1) / 2` elements).
#[allow(clippy::too_many_arguments)]
pub fn gspmv<T: Real>(
    layout: Layout,
    uplo: Uplo,
    n: usize,
    alpha: T,
    ap: &[T],
    x: &[T],
    stride_x: isize,
    beta: T,
    y: &mut [T],
    stride_y: isize,
) -> Result<()> {
    check_stride("x", stride_x)?;
    check_stride("y", stride_y)?;
    let (ox, oy) = (stride_to_offset(n, stride_x), stride_to_offset(n, stride_y));
    gspmv_ndarray(layout, uplo, n, alpha, ap, 1, 0, x, stride_x, ox, beta, y, stride_y, oy)
}

/// [`gspmv`] with the packed array itself read at a stride and offset.
#[allow(clippy::too_many_arguments)]
pub fn gspmv_ndarray<T: Real>(
    layout: Layout,
    uplo: Uplo,
    n: usize,
    alpha: T,
    ap: &[T],
    stride_ap: isize,
    offset_ap: usize,
    x: &[T],
    stride_x: isize,
    offset_x: usize,
    beta: T,
    y: &mut [T],
    stride_y: isize,
    offset_y: usize,
) -> Result<()> {
    check_stride("x", stride_x)?;
    check_stride("y", stride_y)?;
    check_stride("ap", stride_ap)?;
    if n == 0 || (alpha == T::zero() && beta == T::one()) {
        return Ok(());
    }
    let packed = PackedTriangle::new(layout, uplo, n);
    check_vector_bounds(ap.len(), packed.len(), stride_ap, offset_ap)?;
    check_vector_bounds(x.len(), n, stride_x, offset_x)?;
    check_vector_bounds(y.len(), n, stride_y, offset_y)?;

    scale_by_beta(n, beta, y, stride_y, offset_y);
    if alpha == T::zero() {
        return Ok(());
    }

    log_typed_path::<T>("spmv", packed.describe());
    let elem = |o: usize, i: usize| ap[at(offset_ap, packed.position(o, i), stride_ap)];
    symmetric_mv(n, packed.inner_le_outer, alpha, elem, x, stride_x, offset_x, y, stride_y, offset_y);
    Ok(())
}

typed! {
    #[allow(clippy::too_many_arguments)]
    pub fn dspmv(layout: Layout, uplo: Uplo, n: usize, alpha: f64, ap: &[f64], x: &[f64], stride_x: isize, beta: f64, y: &mut [f64], stride_y: isize) -> Result<()> => gspmv::<f64>;
    #[allow(clippy::too_many_arguments)]
    pub fn dspmv_ndarray(layout: Layout, uplo: Uplo, n: usize, alpha: f64, ap: &[f64], stride_ap: isize, offset_ap: usize, x: &[f64], stride_x: isize, offset_x: usize, beta: f64, y: &mut [f64], stride_y: isize, offset_y: usize) -> Result<()> => gspmv_ndarray::<f64>;
    #[allow(clippy::too_many_arguments)]
    pub fn sspmv(layout: Layout, uplo: Uplo, n: usize, alpha: f32, ap: &[f32], x: &[f32], stride_x: isize, beta: f32, y: &mut [f32], stride_y: isize) -> Result<()> => gspmv::<f32>;
    #[allow(clippy::too_many_arguments)]
    pub fn sspmv_ndarray(layout: Layout, uplo: Uplo, n: usize, alpha: f32, ap: &[f32], stride_ap: isize, offset_ap: usize, x: &[f32], stride_x: isize, offset_x: usize, beta: f32, y: &mut [f32], stride_y: isize, offset_y: usize) -> Result<()> => gspmv_ndarray::<f32>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use strided_view::StridedError;

    // [1 2 3; 2 4 5; 3 5 6] packed two ways; A*x = [5, 8, 10] for x = [1, -1, 2].
    const COLUMN_UPPER: [f64; 6] = [1.0, 2.0, 4.0, 3.0, 5.0, 6.0];
    const COLUMN_LOWER: [f64; 6] = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];

    fn packed(layout: Layout, uplo: Uplo) -> [f64; 6] {
        // Row-major upper packs like column-major lower, and vice versa.
        match (layout, uplo) {
            (Layout::ColumnMajor, Uplo::Upper) | (Layout::RowMajor, Uplo::Lower) => COLUMN_UPPER,
            _ => COLUMN_LOWER,
        }
    }

    #[test]
    fn test_dspmv_all_layouts() {
        let x = [1.0, -1.0, 2.0];
        for layout in [Layout::RowMajor, Layout::ColumnMajor] {
            for uplo in [Uplo::Upper, Uplo::Lower] {
                let ap = packed(layout, uplo);
                let mut y = [1.0, 1.0, 1.0];
                dspmv(layout, uplo, 3, 2.0, &ap, &x, 1, 0.5, &mut y, 1).unwrap();
                assert_eq!(y, [10.5, 16.5, 20.5], "{layout:?} {uplo:?}");
            }
        }
    }

    #[test]
    fn test_sspmv_negative_strides() {
        let ap: Vec<f32> = COLUMN_LOWER.iter().map(|&v| v as f32).collect();
        // x reversed in memory, y written back to front.
        let x = [2.0f32, -1.0, 1.0];
        let mut y = [0.0f32; 3];
        sspmv(Layout::ColumnMajor, Uplo::Lower, 3, 1.0, &ap, &x, -1, 0.0, &mut y, -1).unwrap();
        assert_eq!(y, [10.0, 8.0, 5.0]);
    }

    #[test]
    fn test_dspmv_ndarray_reversed_packed_array() {
        let mut ap = COLUMN_UPPER;
        ap.reverse();
        let mut y = [0.0; 4];
        dspmv_ndarray(
            Layout::ColumnMajor,
            Uplo::Upper,
            3,
            1.0,
            &ap,
            -1,
            5,
            &[1.0, -1.0, 2.0],
            1,
            0,
            0.0,
            &mut y,
            1,
            1,
        )
        .unwrap();
        assert_eq!(y, [0.0, 5.0, 8.0, 10.0]);
    }

    #[test]
    fn test_dspmv_beta_only() {
        let ap = COLUMN_UPPER;
        let mut y = [2.0, f64::NAN, 4.0];
        dspmv(Layout::RowMajor, Uplo::Lower, 3, 0.0, &ap, &[1.0; 3], 1, 0.0, &mut y, 1).unwrap();
        assert_eq!(y, [0.0; 3]);
        let mut y = [2.0, 3.0, 4.0];
        dspmv(Layout::RowMajor, Uplo::Lower, 3, 0.0, &ap, &[1.0; 3], 1, 0.5, &mut y, 1).unwrap();
        assert_eq!(y, [1.0, 1.5, 2.0]);
    }

    #[test]
    fn test_dspmv_errors() {
        let ap = COLUMN_UPPER;
        let x = [1.0; 3];
        let mut y = [0.0; 3];
        assert!(matches!(
            dspmv(Layout::RowMajor, Uplo::Upper, 3, 1.0, &ap, &x, 0, 1.0, &mut y, 1),
            Err(StridedError::ZeroStride { arg: "x" })
        ));
        assert!(matches!(
            dspmv(Layout::RowMajor, Uplo::Upper, 3, 1.0, &ap, &x, 1, 1.0, &mut y, 0),
            Err(StridedError::ZeroStride { arg: "y" })
        ));
        assert!(matches!(
            dspmv_ndarray(Layout::RowMajor, Uplo::Upper, 3, 1.0, &ap, 0, 0, &x, 1, 0, 1.0, &mut y, 1, 0),
            Err(StridedError::ZeroStride { arg: "ap" })
        ));
        assert!(matches!(
            dspmv(Layout::RowMajor, Uplo::Upper, 3, 1.0, &ap[..5], &x, 1, 1.0, &mut y, 1),
            Err(StridedError::OutOfBounds { .. })
        ));
        dspmv(Layout::RowMajor, Uplo::Upper, 0, 1.0, &[], &[], 1, 1.0, &mut [], 1).unwrap();
    }
}
