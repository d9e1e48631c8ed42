//! Offset-iteration engine shared by the N-ary strided kernels.
//!
//! A kernel call is planned once: dimensions are ordered so the smallest
//! stride runs innermost, size-1 dimensions are dropped, and neighbouring
//! dimensions that are contiguous in every operand are fused. The engine then
//! walks the planned shape, keeping one running buffer offset per operand.
//! Advancing a dimension adds its stride; a carry subtracts `dim * stride`.
//! The innermost dimension is handed to the caller as one run.

use crate::order::compute_order;
use crate::{Result, StridedError};

/// Dimensions and per-operand strides in iteration order (innermost first).
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct LoopPlan {
    pub(crate) dims: Vec<usize>,
    /// `strides[k][i]`: stride of operand `k` along planned dimension `i`.
    pub(crate) strides: Vec<Vec<isize>>,
}

impl LoopPlan {
    #[inline]
    pub(crate) fn rank(&self) -> usize {
        self.dims.len()
    }

    fn inner_strides(&self) -> Vec<isize> {
        self.strides
            .iter()
            .map(|s| s.first().copied().unwrap_or(0))
            .collect()
    }
}

pub(crate) fn ensure_same_shape(a: &[usize], b: &[usize]) -> Result<()> {
    if a.len() != b.len() {
        return Err(StridedError::RankMismatch(a.len(), b.len()));
    }
    if a != b {
        return Err(StridedError::ShapeMismatch(a.to_vec(), b.to_vec()));
    }
    Ok(())
}

/// Build the iteration plan for operands sharing `dims`.
///
/// `dest_index` names the operand whose layout dominates the loop order.
pub(crate) fn plan(
    dims: &[usize],
    strides_list: &[&[isize]],
    dest_index: Option<usize>,
) -> LoopPlan {
    let order = compute_order(dims, strides_list, dest_index);

    let mut planned_dims = Vec::with_capacity(order.len());
    let mut planned_strides: Vec<Vec<isize>> = vec![Vec::with_capacity(order.len()); strides_list.len()];
    for &d in &order {
        if dims[d] == 1 {
            continue;
        }
        planned_dims.push(dims[d]);
        for (out, strides) in planned_strides.iter_mut().zip(strides_list) {
            out.push(strides[d]);
        }
    }

    let mut plan = LoopPlan {
        dims: planned_dims,
        strides: planned_strides,
    };
    fuse_contiguous(&mut plan);
    plan
}

/// Merge dimension `i + 1` into `i` wherever every operand steps through
/// `i + 1` exactly one full run of `i` at a time.
fn fuse_contiguous(plan: &mut LoopPlan) {
    let mut i = 0;
    while i + 1 < plan.dims.len() {
        let d = plan.dims[i] as isize;
        let fusable = plan.strides.iter().all(|s| s[i + 1] == s[i] * d);
        if fusable {
            plan.dims[i] *= plan.dims[i + 1];
            plan.dims.remove(i + 1);
            for s in plan.strides.iter_mut() {
                s.remove(i + 1);
            }
        } else {
            i += 1;
        }
    }
}

/// Walk every innermost run of `plan`.
///
/// `f(offsets, len, inner_strides)` is called once per run, with the buffer
/// offset of each operand at the start of the run.
pub(crate) fn for_each_inner_run<F>(plan: &LoopPlan, base: &[isize], mut f: F)
where
    F: FnMut(&[isize], usize, &[isize]),
{
    debug_assert_eq!(base.len(), plan.strides.len());
    if plan.dims.iter().any(|&d| d == 0) {
        return;
    }
    let inner = plan.inner_strides();
    let mut offsets = base.to_vec();
    match plan.rank() {
        0 => f(&offsets, 1, &inner),
        1 => f(&offsets, plan.dims[0], &inner),
        2 => kernel_2d(plan, &inner, &mut offsets, &mut f),
        3 => kernel_3d(plan, &inner, &mut offsets, &mut f),
        _ => kernel_nd(plan, &inner, &mut offsets, &mut f),
    }
}

#[inline]
fn step(offsets: &mut [isize], strides: &[Vec<isize>], axis: usize) {
    for (o, s) in offsets.iter_mut().zip(strides) {
        *o += s[axis];
    }
}

#[inline]
fn rewind(offsets: &mut [isize], strides: &[Vec<isize>], axis: usize, dim: usize) {
    for (o, s) in offsets.iter_mut().zip(strides) {
        *o -= dim as isize * s[axis];
    }
}

fn kernel_2d<F>(plan: &LoopPlan, inner: &[isize], offsets: &mut [isize], f: &mut F)
where
    F: FnMut(&[isize], usize, &[isize]),
{
    let d0 = plan.dims[0];
    let d1 = plan.dims[1];
    for _ in 0..d1 {
        f(offsets, d0, inner);
        step(offsets, &plan.strides, 1);
    }
}

fn kernel_3d<F>(plan: &LoopPlan, inner: &[isize], offsets: &mut [isize], f: &mut F)
where
    F: FnMut(&[isize], usize, &[isize]),
{
    let d0 = plan.dims[0];
    let d1 = plan.dims[1];
    let d2 = plan.dims[2];
    for _ in 0..d2 {
        for _ in 0..d1 {
            f(offsets, d0, inner);
            step(offsets, &plan.strides, 1);
        }
        rewind(offsets, &plan.strides, 1, d1);
        step(offsets, &plan.strides, 2);
    }
}

/// Odometer over dimensions `1..rank`; dimension 0 is the inner run.
fn kernel_nd<F>(plan: &LoopPlan, inner: &[isize], offsets: &mut [isize], f: &mut F)
where
    F: FnMut(&[isize], usize, &[isize]),
{
    let rank = plan.rank();
    let d0 = plan.dims[0];
    let mut idx = vec![0usize; rank];
    loop {
        f(offsets, d0, inner);
        let mut axis = 1;
        loop {
            if axis == rank {
                return;
            }
            idx[axis] += 1;
            step(offsets, &plan.strides, axis);
            if idx[axis] < plan.dims[axis] {
                break;
            }
            rewind(offsets, &plan.strides, axis, plan.dims[axis]);
            idx[axis] = 0;
            axis += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn visited(dims: &[usize], strides: &[isize], offset: isize) -> Vec<isize> {
        let p = plan(dims, &[strides], Some(0));
        let mut out = Vec::new();
        for_each_inner_run(&p, &[offset], |offs, len, inner| {
            for k in 0..len as isize {
                out.push(offs[0] + k * inner[0]);
            }
        });
        out.sort_unstable();
        out
    }

    #[test]
    fn test_ensure_same_shape() {
        assert!(ensure_same_shape(&[2, 3], &[2, 3]).is_ok());
        assert!(matches!(
            ensure_same_shape(&[2, 3], &[3, 2]),
            Err(StridedError::ShapeMismatch(_, _))
        ));
        assert!(matches!(
            ensure_same_shape(&[2, 3], &[6]),
            Err(StridedError::RankMismatch(2, 1))
        ));
    }

    #[test]
    fn test_dense_layouts_fuse_to_one_run() {
        let p = plan(&[3, 4, 5], &[&[20, 5, 1]], Some(0));
        assert_eq!(p.dims, vec![60]);
        assert_eq!(p.strides, vec![vec![1]]);

        let p = plan(&[3, 4], &[&[1, 3], &[4, 1]], Some(0));
        assert_eq!(p.dims, vec![3, 4]);
        assert_eq!(p.strides, vec![vec![1, 3], vec![4, 1]]);
    }

    #[test]
    fn test_size_one_dims_dropped() {
        let p = plan(&[1, 4, 1], &[&[9, 2, 7]], Some(0));
        assert_eq!(p.dims, vec![4]);
        assert_eq!(p.strides, vec![vec![2]]);

        let p = plan(&[1, 1], &[&[1, 1]], Some(0));
        assert_eq!(p.rank(), 0);
    }

    #[test]
    fn test_visits_every_offset_once() {
        // Row-major 2x3x4 buffer seen with permuted axes.
        let all: Vec<isize> = (0..24).collect();
        assert_eq!(visited(&[4, 2, 3], &[1, 12, 4], 0), all);
        assert_eq!(visited(&[2, 3, 4], &[12, 4, 1], 0), all);
        // All strides negated, offset at the far end.
        assert_eq!(visited(&[2, 3, 4], &[-12, -4, -1], 23), all);
    }

    #[test]
    fn test_nd_odometer() {
        // Every other element in each of five dimensions: no fusion possible.
        let dims = [2usize, 2, 2, 2, 2];
        let strides = [2isize, 8, 32, 128, 512];
        let got = visited(&dims, &strides, 0);
        assert_eq!(got.len(), 32);
        let mut expected = Vec::new();
        for a in 0..2 {
            for b in 0..2 {
                for c in 0..2 {
                    for d in 0..2 {
                        for e in 0..2 {
                            expected.push(2 * a + 8 * b + 32 * c + 128 * d + 512 * e);
                        }
                    }
                }
            }
        }
        expected.sort_unstable();
        assert_eq!(got, expected);
    }

    #[test]
    fn test_empty_and_scalar() {
        assert!(visited(&[3, 0, 2], &[1, 3, 0], 0).is_empty());
        assert_eq!(visited(&[], &[], 5), vec![5]);
    }
}
