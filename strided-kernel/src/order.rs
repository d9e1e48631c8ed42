//! Loop ordering for N-ary strided kernels.
//!
//! Each dimension receives an importance score built from the stride rank it
//! has in every operand. The destination operand counts twice. Dimensions are
//! then sorted by descending importance, so the first entry of the result is
//! the dimension to iterate innermost.

use strided_view::auxiliary::index_order;

/// Bit-packed importance of each dimension.
///
/// A dimension with stride rank `r` (1 = smallest) in operand `k` contributes
/// `1 << (g * (rank - r))`, doubled for the first operand. `g` is wide enough
/// that summing over all operands never carries into the next rank bucket.
/// Size-1 dimensions get zero importance.
fn importance(dims: &[usize], index_orders: &[Vec<usize>]) -> Vec<u64> {
    let rank = dims.len();
    let m = index_orders.len();
    if rank == 0 || m == 0 {
        return vec![];
    }

    let g = (64 - (m as u64 + 1).leading_zeros()) as u64;
    let mut score = vec![0u64; rank];
    for (k, orders) in index_orders.iter().enumerate() {
        let weight = if k == 0 { 2 } else { 1 };
        for (i, s) in score.iter_mut().enumerate() {
            let shift = g * (rank - orders[i]) as u64;
            *s = s.saturating_add(weight * (1u64 << shift.min(62)));
        }
    }
    for (s, &d) in score.iter_mut().zip(dims) {
        if d <= 1 {
            *s = 0;
        }
    }
    score
}

/// Compute the iteration order for dimensions, innermost first.
///
/// # Arguments
/// * `dims` - The shared shape of all operands
/// * `strides_list` - One stride array per operand
/// * `dest_index` - Operand weighted 2x (the destination), if any
pub(crate) fn compute_order(
    dims: &[usize],
    strides_list: &[&[isize]],
    dest_index: Option<usize>,
) -> Vec<usize> {
    let rank = dims.len();
    if rank == 0 {
        return Vec::new();
    }
    if strides_list.is_empty() {
        return (0..rank).collect();
    }

    let mut index_orders: Vec<Vec<usize>> = strides_list.iter().map(|s| index_order(s)).collect();
    if let Some(dest) = dest_index {
        if dest < index_orders.len() && dest != 0 {
            let d = index_orders.remove(dest);
            index_orders.insert(0, d);
        }
    }

    let score = importance(dims, &index_orders);
    let mut order: Vec<usize> = (0..rank).collect();
    // Stable sort keeps the original axis order among ties.
    order.sort_by(|&a, &b| score[b].cmp(&score[a]));
    order
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compute_order_column_major() {
        let dims = [4usize, 5];
        let strides = [1isize, 4];
        let order = compute_order(&dims, &[&strides], Some(0));
        assert_eq!(order, vec![0, 1]);
    }

    #[test]
    fn test_compute_order_row_major() {
        let dims = [4usize, 5];
        let strides = [5isize, 1];
        let order = compute_order(&dims, &[&strides], Some(0));
        assert_eq!(order, vec![1, 0]);
    }

    #[test]
    fn test_compute_order_destination_dominates() {
        // Column-major output, row-major input: the output wins.
        let dims = [4usize, 5];
        let out_strides = [1isize, 4];
        let in_strides = [5isize, 1];
        let order = compute_order(&dims, &[&out_strides, &in_strides], Some(0));
        assert_eq!(order, vec![0, 1]);

        // Same operands, destination listed second.
        let order = compute_order(&dims, &[&in_strides, &out_strides], Some(1));
        assert_eq!(order, vec![0, 1]);
    }

    #[test]
    fn test_compute_order_size_one_dims_last() {
        let dims = [4usize, 1, 5];
        let strides = [1isize, 4, 4];
        let order = compute_order(&dims, &[&strides], Some(0));
        assert_eq!(order[2], 1);
    }

    #[test]
    fn test_compute_order_negative_strides() {
        let dims = [4usize, 5];
        let strides = [-1isize, -4];
        let order = compute_order(&dims, &[&strides], Some(0));
        assert_eq!(order, vec![0, 1]);
    }

    #[test]
    fn test_compute_order_3d_and_empty() {
        let dims = [3usize, 4, 5];
        let strides = [20isize, 5, 1];
        assert_eq!(compute_order(&dims, &[&strides], Some(0)), vec![2, 1, 0]);

        let empty: [isize; 0] = [];
        assert!(compute_order(&[], &[&empty], Some(0)).is_empty());
    }
}
