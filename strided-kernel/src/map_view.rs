//! N-ary elementwise kernels over flat strided views.
//!
//! `y[idx] = f(x1[idx], …, xK[idx])` for every multi-index of the shared
//! shape. Operand shapes are validated once; the loop order follows the
//! destination layout (see [`crate::order`]).

use strided_view::{StridedView, StridedViewMut};

use crate::backend::dispatch_if_large;
use crate::config::log_path;
use crate::kernel::{ensure_same_shape, for_each_inner_run, plan, LoopPlan};
use crate::Result;

// ============================================================================
// Inner loops
//
// When every inner stride is 1 the run is a pair of plain slices, which is
// the shape LLVM vectorizes. Otherwise offsets advance by their stride.
// ============================================================================

#[inline(always)]
fn run<const K: usize>(offsets: &[isize], strides: &[isize]) -> ([usize; K], bool) {
    let mut idx = [0usize; K];
    let mut unit = true;
    for k in 0..K {
        idx[k] = offsets[k + 1] as usize;
        unit &= strides[k + 1] == 1;
    }
    (idx, unit && strides[0] == 1)
}

#[inline(always)]
fn inner_map1<A: Copy, D>(
    dst: &mut [D],
    (d0, ds): (isize, isize),
    a: &[A],
    (a0, a_s): (isize, isize),
    len: usize,
    f: &impl Fn(A) -> D,
) {
    if ds == 1 && a_s == 1 {
        let d = &mut dst[d0 as usize..d0 as usize + len];
        let a = &a[a0 as usize..a0 as usize + len];
        dispatch_if_large(len, || {
            for (o, &x) in d.iter_mut().zip(a) {
                *o = f(x);
            }
        });
    } else {
        let (mut di, mut ai) = (d0, a0);
        for _ in 0..len {
            dst[di as usize] = f(a[ai as usize]);
            di += ds;
            ai += a_s;
        }
    }
}

fn for_each_run(
    kernel: &str,
    dims: &[usize],
    strides_list: &[&[isize]],
    base: &[isize],
    f: impl FnMut(&[isize], usize, &[isize]),
) {
    let p: LoopPlan = plan(dims, strides_list, Some(0));
    log_path(kernel, format_args!("planned rank {} -> {:?}", dims.len(), p.dims));
    for_each_inner_run(&p, base, f);
}

// ============================================================================
// Public kernels
// ============================================================================

/// Copy `src` into `dst` element by element.
///
/// Bit patterns are preserved, including NaN payloads and signed zeros.
pub fn assign<T: Copy>(src: &StridedView<'_, T>, dst: &mut StridedViewMut<'_, T>) -> Result<()> {
    unary(src, dst, |x| x)
}

/// Unary elementwise kernel: `y[i] = f(x[i])`.
pub fn unary<A: Copy, D>(
    x: &StridedView<'_, A>,
    y: &mut StridedViewMut<'_, D>,
    f: impl Fn(A) -> D,
) -> Result<()> {
    ensure_same_shape(y.dims(), x.dims())?;
    if y.is_empty() {
        return Ok(());
    }
    let dims = y.dims().to_vec();
    let y_strides = y.strides().to_vec();
    let base = [y.offset() as isize, x.offset() as isize];
    let src = x.data();
    let dst = y.data_mut();

    for_each_run("unary", &dims, &[&y_strides[..], x.strides()], &base, |offs, len, st| {
        inner_map1(dst, (offs[0], st[0]), src, (offs[1], st[1]), len, &f);
    });
    Ok(())
}

/// Binary elementwise kernel: `z[i] = f(x[i], y[i])`.
pub fn binary<A: Copy, B: Copy, D>(
    x: &StridedView<'_, A>,
    y: &StridedView<'_, B>,
    z: &mut StridedViewMut<'_, D>,
    f: impl Fn(A, B) -> D,
) -> Result<()> {
    ensure_same_shape(z.dims(), x.dims())?;
    ensure_same_shape(z.dims(), y.dims())?;
    if z.is_empty() {
        return Ok(());
    }
    let dims = z.dims().to_vec();
    let z_strides = z.strides().to_vec();
    let base = [z.offset() as isize, x.offset() as isize, y.offset() as isize];
    let (xa, ya) = (x.data(), y.data());
    let dst = z.data_mut();

    for_each_run(
        "binary",
        &dims,
        &[&z_strides[..], x.strides(), y.strides()],
        &base,
        |offs, len, st| {
            let ([xi, yi], unit) = run::<2>(offs, st);
            let d0 = offs[0] as usize;
            if unit {
                let out = &mut dst[d0..d0 + len];
                let (xs, ys) = (&xa[xi..xi + len], &ya[yi..yi + len]);
                dispatch_if_large(len, || {
                    for i in 0..len {
                        out[i] = f(xs[i], ys[i]);
                    }
                });
            } else {
                let (mut di, mut xo, mut yo) = (offs[0], offs[1], offs[2]);
                for _ in 0..len {
                    dst[di as usize] = f(xa[xo as usize], ya[yo as usize]);
                    di += st[0];
                    xo += st[1];
                    yo += st[2];
                }
            }
        },
    );
    Ok(())
}

/// Ternary elementwise kernel: `out[i] = f(x[i], y[i], z[i])`.
pub fn ternary<A: Copy, B: Copy, C: Copy, D>(
    x: &StridedView<'_, A>,
    y: &StridedView<'_, B>,
    z: &StridedView<'_, C>,
    out: &mut StridedViewMut<'_, D>,
    f: impl Fn(A, B, C) -> D,
) -> Result<()> {
    for input in [x.dims(), y.dims(), z.dims()] {
        ensure_same_shape(out.dims(), input)?;
    }
    if out.is_empty() {
        return Ok(());
    }
    let dims = out.dims().to_vec();
    let o_strides = out.strides().to_vec();
    let base = [
        out.offset() as isize,
        x.offset() as isize,
        y.offset() as isize,
        z.offset() as isize,
    ];
    let (xa, ya, za) = (x.data(), y.data(), z.data());
    let dst = out.data_mut();

    for_each_run(
        "ternary",
        &dims,
        &[&o_strides[..], x.strides(), y.strides(), z.strides()],
        &base,
        |offs, len, st| {
            let ([xi, yi, zi], unit) = run::<3>(offs, st);
            let d0 = offs[0] as usize;
            if unit {
                let o = &mut dst[d0..d0 + len];
                let (xs, ys, zs) = (&xa[xi..xi + len], &ya[yi..yi + len], &za[zi..zi + len]);
                dispatch_if_large(len, || {
                    for i in 0..len {
                        o[i] = f(xs[i], ys[i], zs[i]);
                    }
                });
            } else {
                let mut p = [offs[0], offs[1], offs[2], offs[3]];
                for _ in 0..len {
                    dst[p[0] as usize] = f(xa[p[1] as usize], ya[p[2] as usize], za[p[3] as usize]);
                    for (pk, &sk) in p.iter_mut().zip(st) {
                        *pk += sk;
                    }
                }
            }
        },
    );
    Ok(())
}

/// Quaternary elementwise kernel: `out[i] = f(w[i], x[i], y[i], z[i])`.
pub fn quaternary<A: Copy, B: Copy, C: Copy, E: Copy, D>(
    w: &StridedView<'_, A>,
    x: &StridedView<'_, B>,
    y: &StridedView<'_, C>,
    z: &StridedView<'_, E>,
    out: &mut StridedViewMut<'_, D>,
    f: impl Fn(A, B, C, E) -> D,
) -> Result<()> {
    for input in [w.dims(), x.dims(), y.dims(), z.dims()] {
        ensure_same_shape(out.dims(), input)?;
    }
    if out.is_empty() {
        return Ok(());
    }
    let dims = out.dims().to_vec();
    let o_strides = out.strides().to_vec();
    let base = [
        out.offset() as isize,
        w.offset() as isize,
        x.offset() as isize,
        y.offset() as isize,
        z.offset() as isize,
    ];
    let (wa, xa, ya, za) = (w.data(), x.data(), y.data(), z.data());
    let dst = out.data_mut();

    for_each_run(
        "quaternary",
        &dims,
        &[&o_strides[..], w.strides(), x.strides(), y.strides(), z.strides()],
        &base,
        |offs, len, st| {
            let ([wi, xi, yi, zi], unit) = run::<4>(offs, st);
            let d0 = offs[0] as usize;
            if unit {
                let o = &mut dst[d0..d0 + len];
                let (ws, xs) = (&wa[wi..wi + len], &xa[xi..xi + len]);
                let (ys, zs) = (&ya[yi..yi + len], &za[zi..zi + len]);
                dispatch_if_large(len, || {
                    for i in 0..len {
                        o[i] = f(ws[i], xs[i], ys[i], zs[i]);
                    }
                });
            } else {
                let mut p = [offs[0], offs[1], offs[2], offs[3], offs[4]];
                for _ in 0..len {
                    dst[p[0] as usize] = f(
                        wa[p[1] as usize],
                        xa[p[2] as usize],
                        ya[p[3] as usize],
                        za[p[4] as usize],
                    );
                    for (pk, &sk) in p.iter_mut().zip(st) {
                        *pk += sk;
                    }
                }
            }
        },
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use strided_view::{StridedArray, StridedError};

    #[test]
    fn test_unary_row_to_col_major() {
        let src = StridedArray::<f64>::from_fn_row_major(&[2, 3], |i| (i[0] * 10 + i[1]) as f64);
        let mut dst = StridedArray::<f64>::col_major(&[2, 3]);
        unary(&src.view(), &mut dst.view_mut(), |x| 2.0 * x).unwrap();
        for i in 0..2 {
            for j in 0..3 {
                assert_eq!(dst.get(&[i, j]), 2.0 * (i * 10 + j) as f64);
            }
        }
        assert_eq!(dst.data(), &[0.0, 20.0, 2.0, 22.0, 4.0, 24.0]);
    }

    #[test]
    fn test_unary_type_change() {
        let src = StridedArray::<i32>::from_fn_row_major(&[4], |i| i[0] as i32 - 2);
        let mut dst = StridedArray::<bool>::row_major(&[4]);
        unary(&src.view(), &mut dst.view_mut(), |x| x >= 0).unwrap();
        assert_eq!(dst.data(), &[false, false, true, true]);
    }

    #[test]
    fn test_assign_reversed() {
        let data = [1.0, 2.0, 3.0, 4.0];
        let src = StridedView::vector(&data, 4, -1, 3).unwrap();
        let mut out = [0.0; 4];
        let mut dst = StridedViewMut::vector(&mut out, 4, 1, 0).unwrap();
        assign(&src, &mut dst).unwrap();
        assert_eq!(out, [4.0, 3.0, 2.0, 1.0]);
    }

    #[test]
    fn test_binary_broadcast_row() {
        let a = StridedArray::<f64>::from_fn_row_major(&[3, 2], |i| (i[0] * 2 + i[1]) as f64);
        let row = [10.0, 20.0];
        let b = StridedView::new(&row, &[1, 2], &[2, 1], 0)
            .unwrap()
            .broadcast(&[3, 2])
            .unwrap();
        let mut c = StridedArray::<f64>::row_major(&[3, 2]);
        binary(&a.view(), &b, &mut c.view_mut(), |x, y| x + y).unwrap();
        assert_eq!(c.data(), &[10.0, 21.0, 12.0, 23.0, 14.0, 25.0]);
    }

    #[test]
    fn test_ternary_and_quaternary() {
        let x = [1.0, 2.0, 3.0];
        let y = [4.0, 5.0, 6.0];
        let z = [7.0, 8.0, 9.0];
        let w = [0.5, 0.5, 0.5];
        let vx = StridedView::vector(&x, 3, 1, 0).unwrap();
        let vy = StridedView::vector(&y, 3, -1, 2).unwrap();
        let vz = StridedView::vector(&z, 3, 1, 0).unwrap();
        let vw = StridedView::vector(&w, 3, 0, 1).unwrap();

        let mut out = [0.0; 3];
        ternary(
            &vx,
            &vy,
            &vz,
            &mut StridedViewMut::vector(&mut out, 3, 1, 0).unwrap(),
            |a, b, c| a * b + c,
        )
        .unwrap();
        assert_eq!(out, [1.0 * 6.0 + 7.0, 2.0 * 5.0 + 8.0, 3.0 * 4.0 + 9.0]);

        let mut out = [0.0; 6];
        quaternary(
            &vw,
            &vx,
            &vy,
            &vz,
            &mut StridedViewMut::vector(&mut out, 3, 2, 1).unwrap(),
            |a, b, c, d| a * (b + c + d),
        )
        .unwrap();
        assert_eq!(out, [0.0, 7.0, 0.0, 7.5, 0.0, 8.0]);
    }

    #[test]
    fn test_shape_mismatch() {
        let a = StridedArray::<f64>::row_major(&[2, 3]);
        let mut b = StridedArray::<f64>::row_major(&[3, 2]);
        assert!(matches!(
            assign(&a.view(), &mut b.view_mut()),
            Err(StridedError::ShapeMismatch(_, _))
        ));
        let mut c = StridedArray::<f64>::row_major(&[6]);
        assert!(matches!(
            assign(&a.view(), &mut c.view_mut()),
            Err(StridedError::RankMismatch(1, 2))
        ));
    }

    #[test]
    fn test_zero_size_is_noop() {
        let a: StridedArray<f64> = StridedArray::row_major(&[0, 3]);
        let mut b: StridedArray<f64> = StridedArray::row_major(&[0, 3]);
        assign(&a.view(), &mut b.view_mut()).unwrap();
        assert!(b.data().is_empty());
    }

    #[test]
    fn test_rank_zero() {
        let src = [3.5];
        let mut dst = [0.0];
        unary(
            &StridedView::new(&src, &[], &[], 0).unwrap(),
            &mut StridedViewMut::new(&mut dst, &[], &[], 0).unwrap(),
            |x: f64| -x,
        )
        .unwrap();
        assert_eq!(dst, [-3.5]);
    }
}
