use strided_kernel::log_typed_path;
use strided_traits::Real;
use strided_view::{is_row_major, Result};

use crate::level2::{at2, check_lda, check_matrix_bounds, check_matrix_strides};
use crate::{Layout, Transpose};

/// A logical matrix read at `offset + i*rs + j*cs`.
#[derive(Debug, Clone, Copy)]
struct Operand {
    offset: usize,
    rs: isize,
    cs: isize,
}

impl Operand {
    /// `op(M)` of a matrix stored with strides `(stride1, stride2)`.
    fn op(trans: Transpose, stride1: isize, stride2: isize, offset: usize) -> Self {
        let (rs, cs) = if trans.is_transposed() {
            (stride2, stride1)
        } else {
            (stride1, stride2)
        };
        Operand { offset, rs, cs }
    }

    fn transposed(self) -> Self {
        Operand {
            offset: self.offset,
            rs: self.cs,
            cs: self.rs,
        }
    }

    #[inline(always)]
    fn at(&self, i: usize, j: usize) -> usize {
        at2(self.offset, i, j, self.rs, self.cs)
    }
}

/// Stored `(rows, cols)` of an operand whose `op()` is `rows x cols`.
fn stored_shape(trans: Transpose, rows: usize, cols: usize) -> (usize, usize) {
    if trans.is_transposed() {
        (cols, rows)
    } else {
        (rows, cols)
    }
}

/// General matrix-matrix product: `C = alpha*op(A)*op(B) + beta*C`, where
/// `op(A)` is `m x k`, `op(B)` is `k x n` and `C` is `m x n`.
#[allow(clippy::too_many_arguments)]
pub fn ggemm<T: Real>(
    layout: Layout,
    trans_a: Transpose,
    trans_b: Transpose,
    m: usize,
    n: usize,
    k: usize,
    alpha: T,
    a: &[T],
    lda: usize,
    b: &[T],
    ldb: usize,
    beta: T,
    c: &mut [T],
    ldc: usize,
) -> Result<()> {
    // The leading dimension spans a stored row (row-major) or column.
    let ld_extent = |(rows, cols): (usize, usize)| match layout {
        Layout::RowMajor => cols,
        Layout::ColumnMajor => rows,
    };
    check_lda(lda, ld_extent(stored_shape(trans_a, m, k)))?;
    check_lda(ldb, ld_extent(stored_shape(trans_b, k, n)))?;
    check_lda(ldc, ld_extent((m, n)))?;
    let (sa1, sa2) = layout.matrix_strides(lda);
    let (sb1, sb2) = layout.matrix_strides(ldb);
    let (sc1, sc2) = layout.matrix_strides(ldc);
    ggemm_ndarray(
        trans_a, trans_b, m, n, k, alpha, a, sa1, sa2, 0, b, sb1, sb2, 0, beta, c, sc1, sc2, 0,
    )
}

/// [`ggemm`] over explicit matrix strides and offsets.
#[allow(clippy::too_many_arguments)]
pub fn ggemm_ndarray<T: Real>(
    trans_a: Transpose,
    trans_b: Transpose,
    m: usize,
    n: usize,
    k: usize,
    alpha: T,
    a: &[T],
    stride_a1: isize,
    stride_a2: isize,
    offset_a: usize,
    b: &[T],
    stride_b1: isize,
    stride_b2: isize,
    offset_b: usize,
    beta: T,
    c: &mut [T],
    stride_c1: isize,
    stride_c2: isize,
    offset_c: usize,
) -> Result<()> {
    check_matrix_strides("a", stride_a1, stride_a2)?;
    check_matrix_strides("b", stride_b1, stride_b2)?;
    check_matrix_strides("c", stride_c1, stride_c2)?;
    if m == 0 || n == 0 || ((alpha == T::zero() || k == 0) && beta == T::one()) {
        return Ok(());
    }
    let (ra, ca) = stored_shape(trans_a, m, k);
    let (rb, cb) = stored_shape(trans_b, k, n);
    check_matrix_bounds(a.len(), ra, ca, stride_a1, stride_a2, offset_a)?;
    check_matrix_bounds(b.len(), rb, cb, stride_b1, stride_b2, offset_b)?;
    check_matrix_bounds(c.len(), m, n, stride_c1, stride_c2, offset_c)?;

    let op_a = Operand::op(trans_a, stride_a1, stride_a2, offset_a);
    let op_b = Operand::op(trans_b, stride_b1, stride_b2, offset_b);
    let op_c = Operand {
        offset: offset_c,
        rs: stride_c1,
        cs: stride_c2,
    };

    if alpha == T::zero() || k == 0 {
        scale_matrix(m, n, beta, c, op_c);
        return Ok(());
    }

    // Walk C by columns; a row-major C is handled as C' = op(B)' * op(A)'.
    if is_row_major(&[stride_c1, stride_c2]) {
        let product = Product {
            m: n,
            n: m,
            k,
            a: b,
            op_a: op_b.transposed(),
            b: a,
            op_b: op_a.transposed(),
        };
        product.run(alpha, beta, c, op_c.transposed());
    } else {
        let product = Product { m, n, k, a, op_a, b, op_b };
        product.run(alpha, beta, c, op_c);
    }
    Ok(())
}

fn scale_matrix<T: Real>(m: usize, n: usize, beta: T, c: &mut [T], op_c: Operand) {
    if beta == T::one() {
        return;
    }
    for j in 0..n {
        for i in 0..m {
            let ic = op_c.at(i, j);
            c[ic] = if beta == T::zero() { T::zero() } else { beta * c[ic] };
        }
    }
}

/// `op(A) * op(B)` with its operands resolved to logical strides.
struct Product<'a, T> {
    m: usize,
    n: usize,
    k: usize,
    a: &'a [T],
    op_a: Operand,
    b: &'a [T],
    op_b: Operand,
}

impl<T: Real> Product<'_, T> {
    /// Accumulate into a column-walked `C`.
    ///
    /// When columns of `op(A)` are the short walk, each column of `C` gains
    /// `alpha*op(B)[l, j]` times column `l` of `op(A)`; otherwise every
    /// element of `C` is one dot product of a row of `op(A)` and a column of
    /// `op(B)`.
    fn run(&self, alpha: T, beta: T, c: &mut [T], op_c: Operand) {
        let Product { m, n, k, a, op_a, b, op_b } = *self;
        if op_a.rs.unsigned_abs() <= op_a.cs.unsigned_abs() {
            log_typed_path::<T>("gemm", "axpy form");
            scale_matrix(m, n, beta, c, op_c);
            for j in 0..n {
                for l in 0..k {
                    let temp = alpha * b[op_b.at(l, j)];
                    for i in 0..m {
                        let ic = op_c.at(i, j);
                        c[ic] = c[ic] + temp * a[op_a.at(i, l)];
                    }
                }
            }
        } else {
            log_typed_path::<T>("gemm", "dot form");
            for j in 0..n {
                for i in 0..m {
                    let mut temp = T::zero();
                    for l in 0..k {
                        temp = temp + a[op_a.at(i, l)] * b[op_b.at(l, j)];
                    }
                    let ic = op_c.at(i, j);
                    c[ic] = if beta == T::zero() {
                        alpha * temp
                    } else {
                        alpha * temp + beta * c[ic]
                    };
                }
            }
        }
    }
}

typed! {
    #[allow(clippy::too_many_arguments)]
    pub fn dgemm(layout: Layout, trans_a: Transpose, trans_b: Transpose, m: usize, n: usize, k: usize, alpha: f64, a: &[f64], lda: usize, b: &[f64], ldb: usize, beta: f64, c: &mut [f64], ldc: usize) -> Result<()> => ggemm::<f64>;
    #[allow(clippy::too_many_arguments)]
    pub fn dgemm_ndarray(trans_a: Transpose, trans_b: Transpose, m: usize, n: usize, k: usize, alpha: f64, a: &[f64], stride_a1: isize, stride_a2: isize, offset_a: usize, b: &[f64], stride_b1: isize, stride_b2: isize, offset_b: usize, beta: f64, c: &mut [f64], stride_c1: isize, stride_c2: isize, offset_c: usize) -> Result<()> => ggemm_ndarray::<f64>;
    #[allow(clippy::too_many_arguments)]
    pub fn sgemm(layout: Layout, trans_a: Transpose, trans_b: Transpose, m: usize, n: usize, k: usize, alpha: f32, a: &[f32], lda: usize, b: &[f32], ldb: usize, beta: f32, c: &mut [f32], ldc: usize) -> Result<()> => ggemm::<f32>;
    #[allow(clippy::too_many_arguments)]
    pub fn sgemm_ndarray(trans_a: Transpose, trans_b: Transpose, m: usize, n: usize, k: usize, alpha: f32, a: &[f32], stride_a1: isize, stride_a2: isize, offset_a: usize, b: &[f32], stride_b1: isize, stride_b2: isize, offset_b: usize, beta: f32, c: &mut [f32], stride_c1: isize, stride_c2: isize, offset_c: usize) -> Result<()> => ggemm_ndarray::<f32>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use strided_view::StridedError;

    use crate::Transpose::{NoTranspose as N, Transpose as T};

    // A = [1 2 3; 4 5 6], B = [7 8; 9 10; 11 12], A*B = [58 64; 139 154]
    const A_ROWS: [f64; 6] = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
    const B_ROWS: [f64; 6] = [7.0, 8.0, 9.0, 10.0, 11.0, 12.0];

    #[test]
    fn test_dgemm_row_major() {
        let mut c = [1.0; 4];
        dgemm(Layout::RowMajor, N, N, 2, 2, 3, 1.0, &A_ROWS, 3, &B_ROWS, 2, 2.0, &mut c, 2).unwrap();
        assert_eq!(c, [60.0, 66.0, 141.0, 156.0]);
    }

    #[test]
    fn test_dgemm_column_major_transposes() {
        // Row-major A read column-major with lda 3 is A' (3 x 2).
        let mut c = [0.0; 4];
        dgemm(Layout::ColumnMajor, T, T, 2, 2, 3, 1.0, &A_ROWS, 3, &B_ROWS, 2, 0.0, &mut c, 2).unwrap();
        // C = (A' )' (B')' = A*B, stored column-major.
        assert_eq!(c, [58.0, 139.0, 64.0, 154.0]);

        // A' * A (3 x 3) via the transposed first operand.
        let mut c = [f64::NAN; 9];
        dgemm(Layout::RowMajor, T, N, 3, 3, 2, 1.0, &A_ROWS, 3, &A_ROWS, 3, 0.0, &mut c, 3).unwrap();
        assert_eq!(c, [17.0, 22.0, 27.0, 22.0, 29.0, 36.0, 27.0, 36.0, 45.0]);
    }

    #[test]
    fn test_sgemm_ndarray_negative_strides() {
        // A stored with both strides negated: element (i, j) at 5 - 3i - j.
        let a: Vec<f32> = A_ROWS.iter().rev().map(|&v| v as f32).collect();
        let b: Vec<f32> = B_ROWS.iter().map(|&v| v as f32).collect();
        let mut c = [0.0f32; 6];
        sgemm_ndarray(N, N, 2, 2, 3, 0.5, &a, -3, -1, 5, &b, 2, 1, 0, 0.0, &mut c, 1, 3, 1).unwrap();
        assert_eq!(c, [0.0, 29.0, 69.5, 0.0, 32.0, 77.0]);
    }

    #[test]
    fn test_gemm_scaling_only() {
        let mut c = [2.0, f64::NAN, 4.0, 8.0];
        dgemm(Layout::RowMajor, N, N, 2, 2, 0, 1.0, &[], 1, &[], 2, 0.0, &mut c, 2).unwrap();
        assert_eq!(c, [0.0; 4]);
        let mut c = [2.0, 6.0, 4.0, 8.0];
        dgemm(Layout::RowMajor, N, N, 2, 2, 3, 0.0, &A_ROWS, 3, &B_ROWS, 2, 0.5, &mut c, 2).unwrap();
        assert_eq!(c, [1.0, 3.0, 2.0, 4.0]);
    }

    #[test]
    fn test_gemm_errors() {
        let mut c = [0.0; 4];
        assert!(matches!(
            dgemm(Layout::RowMajor, N, N, 2, 2, 3, 1.0, &A_ROWS, 2, &B_ROWS, 2, 0.0, &mut c, 2),
            Err(StridedError::InvalidLeadingDimension { lda: 2, min: 3 })
        ));
        assert!(matches!(
            dgemm(Layout::ColumnMajor, N, T, 2, 2, 3, 1.0, &A_ROWS, 2, &B_ROWS, 1, 0.0, &mut c, 2),
            Err(StridedError::InvalidLeadingDimension { lda: 1, min: 2 })
        ));
        assert!(matches!(
            dgemm_ndarray(N, N, 2, 2, 3, 1.0, &A_ROWS, 3, 1, 0, &B_ROWS, 0, 1, 0, 0.0, &mut c, 2, 1, 0),
            Err(StridedError::ZeroStride { arg: "b" })
        ));
        assert!(matches!(
            dgemm(Layout::RowMajor, N, N, 2, 2, 4, 1.0, &A_ROWS, 4, &B_ROWS, 2, 0.0, &mut c, 2),
            Err(StridedError::OutOfBounds { .. })
        ));
    }
}
