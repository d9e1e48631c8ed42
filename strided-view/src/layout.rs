//! Memory-layout classification for N-dimensional strided views.

use crate::auxiliary::minmax_view_buffer_index_nd;

/// Memory order of a dense array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Order {
    /// C-style: the last axis varies fastest.
    RowMajor,
    /// Fortran-style: the first axis varies fastest.
    ColumnMajor,
}

/// Classification of a stride array by the ordering of its magnitudes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StrideOrder {
    /// Magnitudes are neither non-increasing nor non-decreasing.
    None,
    /// Magnitudes are non-increasing (last axis fastest).
    RowMajor,
    /// Magnitudes are non-decreasing (first axis fastest).
    ColumnMajor,
    /// Magnitudes are both, e.g. rank 0/1 or all equal.
    Both,
}

/// Classify strides by comparing the magnitudes of neighbouring dimensions.
pub fn strides_to_order(strides: &[isize]) -> StrideOrder {
    let mut row = true;
    let mut column = true;
    for pair in strides.windows(2) {
        let s1 = pair[0].unsigned_abs();
        let s2 = pair[1].unsigned_abs();
        if s2 > s1 {
            row = false;
        } else if s2 < s1 {
            column = false;
        }
        if !row && !column {
            return StrideOrder::None;
        }
    }
    match (row, column) {
        (true, true) => StrideOrder::Both,
        (true, false) => StrideOrder::RowMajor,
        _ => StrideOrder::ColumnMajor,
    }
}

/// Whether the strides describe a row-major traversal.
///
/// Only the relative ordering of stride magnitudes is inspected; contiguity is
/// not required.
#[inline]
pub fn is_row_major(strides: &[isize]) -> bool {
    matches!(
        strides_to_order(strides),
        StrideOrder::RowMajor | StrideOrder::Both
    )
}

/// Whether the strides describe a column-major traversal.
#[inline]
pub fn is_column_major(strides: &[isize]) -> bool {
    matches!(
        strides_to_order(strides),
        StrideOrder::ColumnMajor | StrideOrder::Both
    )
}

/// Sign class of the strides: `1` when none is negative, `-1` when all are
/// negative, `0` for mixed signs.
pub fn iteration_order(strides: &[isize]) -> i8 {
    let negative = strides.iter().filter(|&&s| s < 0).count();
    if negative == 0 {
        1
    } else if negative == strides.len() {
        -1
    } else {
        0
    }
}

/// Number of elements described by `shape` (1 for rank 0).
#[inline]
pub fn numel(shape: &[usize]) -> usize {
    shape.iter().product()
}

/// Whether the view addresses exactly one gap-free buffer segment.
///
/// Views with zero elements never qualify.
pub fn is_single_segment_compatible(shape: &[usize], strides: &[isize], offset: usize) -> bool {
    if shape.len() != strides.len() {
        return false;
    }
    let len = numel(shape);
    if len == 0 {
        return false;
    }
    let (min, max) = minmax_view_buffer_index_nd(shape, strides, offset);
    (max - min + 1) as usize == len
}

/// Whether the view is contiguous in memory, in either order.
///
/// Strides must not mix signs: a uniformly negated layout whose offset points
/// at the far end is contiguous, a partially flipped one is not.
#[inline]
pub fn is_contiguous(shape: &[usize], strides: &[isize], offset: usize) -> bool {
    iteration_order(strides) != 0 && is_single_segment_compatible(shape, strides, offset)
}

/// Whether the view is contiguous and row-major.
///
/// Any zero-sized dimension yields `false`.
#[inline]
pub fn is_row_major_contiguous(shape: &[usize], strides: &[isize], offset: usize) -> bool {
    is_contiguous(shape, strides, offset) && is_row_major(strides)
}

/// Whether the view is contiguous and column-major.
#[inline]
pub fn is_column_major_contiguous(shape: &[usize], strides: &[isize], offset: usize) -> bool {
    is_contiguous(shape, strides, offset) && is_column_major(strides)
}

/// Compute column-major strides (first index varies fastest).
pub fn col_major_strides(dims: &[usize]) -> Vec<isize> {
    let rank = dims.len();
    if rank == 0 {
        return vec![];
    }
    let mut strides = vec![1isize; rank];
    for i in 1..rank {
        strides[i] = strides[i - 1] * dims[i - 1] as isize;
    }
    strides
}

/// Compute row-major strides (last index varies fastest).
pub fn row_major_strides(dims: &[usize]) -> Vec<isize> {
    let rank = dims.len();
    if rank == 0 {
        return vec![];
    }
    let mut strides = vec![1isize; rank];
    for i in (0..rank - 1).rev() {
        strides[i] = strides[i + 1] * dims[i + 1] as isize;
    }
    strides
}

/// Canonical dense strides for `shape` in the given order.
pub fn shape_to_strides(shape: &[usize], order: Order) -> Vec<isize> {
    match order {
        Order::RowMajor => row_major_strides(shape),
        Order::ColumnMajor => col_major_strides(shape),
    }
}

/// Buffer index of the first indexed element of a dense view with the given
/// (possibly negative) strides.
pub fn strides_to_offset(shape: &[usize], strides: &[isize]) -> usize {
    shape
        .iter()
        .zip(strides.iter())
        .filter(|&(&dim, &stride)| dim > 0 && stride < 0)
        .map(|(&dim, &stride)| (dim - 1) * stride.unsigned_abs())
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strides_to_order() {
        assert_eq!(strides_to_order(&[4, 1]), StrideOrder::RowMajor);
        assert_eq!(strides_to_order(&[1, 3]), StrideOrder::ColumnMajor);
        assert_eq!(strides_to_order(&[-6, 2, -1]), StrideOrder::RowMajor);
        assert_eq!(strides_to_order(&[2, 1, 4]), StrideOrder::None);
        assert_eq!(strides_to_order(&[3]), StrideOrder::Both);
        assert_eq!(strides_to_order(&[]), StrideOrder::Both);
        assert_eq!(strides_to_order(&[2, 2]), StrideOrder::Both);
    }

    #[test]
    fn test_is_row_major_compares_relative_order_only() {
        // Non-contiguous but still row-major ordered.
        assert!(is_row_major(&[10, 2]));
        assert!(!is_row_major(&[2, 10]));
        assert!(is_column_major(&[2, 10]));
    }

    #[test]
    fn test_is_row_major_contiguous_examples() {
        assert!(is_row_major_contiguous(&[3, 2], &[2, 1], 0));
        assert!(!is_row_major_contiguous(&[2, 0], &[2, 0], 0));
        assert!(!is_row_major_contiguous(&[3, 2], &[1, 3], 0));
        assert!(!is_row_major_contiguous(&[3, 2], &[4, 1], 0));
    }

    #[test]
    fn test_negative_strides_contiguous_only_when_uniform() {
        // All strides negated, offset at the last element.
        assert!(is_row_major_contiguous(&[3, 2], &[-2, -1], 5));
        // Mixed signs are never contiguous.
        assert!(!is_row_major_contiguous(&[3, 2], &[-2, 1], 4));
        assert!(!is_contiguous(&[3, 2], &[-2, 1], 4));
    }

    #[test]
    fn test_zero_dimension_is_never_contiguous() {
        for strides in [[0isize, 0], [1, 1], [3, 1], [-3, -1], [1, 3]] {
            for offset in [0usize, 3, 10] {
                assert!(!is_row_major_contiguous(&[0, 3], &strides, offset));
                assert!(!is_column_major_contiguous(&[3, 0], &strides, offset));
            }
        }
    }

    #[test]
    fn test_zero_rank_is_contiguous() {
        assert!(is_contiguous(&[], &[], 4));
        assert!(is_row_major_contiguous(&[], &[], 4));
    }

    #[test]
    fn test_column_major_contiguous() {
        assert!(is_column_major_contiguous(&[3, 2], &[1, 3], 0));
        assert!(!is_column_major_contiguous(&[3, 2], &[2, 1], 0));
    }

    #[test]
    fn test_iteration_order() {
        assert_eq!(iteration_order(&[2, 1]), 1);
        assert_eq!(iteration_order(&[0, 1]), 1);
        assert_eq!(iteration_order(&[-2, -1]), -1);
        assert_eq!(iteration_order(&[-2, 1]), 0);
    }

    #[test]
    fn test_shape_to_strides() {
        assert_eq!(shape_to_strides(&[2, 3, 4], Order::RowMajor), vec![12, 4, 1]);
        assert_eq!(shape_to_strides(&[2, 3, 4], Order::ColumnMajor), vec![1, 2, 6]);
        assert_eq!(col_major_strides(&[3, 4]), vec![1, 3]);
        assert_eq!(row_major_strides(&[3, 4]), vec![4, 1]);
    }

    #[test]
    fn test_strides_to_offset() {
        assert_eq!(strides_to_offset(&[3, 2], &[2, 1]), 0);
        assert_eq!(strides_to_offset(&[3, 2], &[-2, -1]), 5);
        assert_eq!(strides_to_offset(&[3, 2], &[-2, 1]), 4);
    }
}
