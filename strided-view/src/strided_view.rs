//! Dynamic-rank strided views over flat buffers.
//!
//! - [`StridedView`]: immutable view `(data, dims, strides, offset)`
//! - [`StridedViewMut`]: mutable view with the same metadata
//! - [`StridedArray`]: owned dense buffer plus layout metadata
//!
//! Construction validates, once, that every reachable index lies inside the
//! buffer. Kernels may then walk the view with plain offset arithmetic.

use std::fmt;
use std::sync::Arc;

use crate::auxiliary::minmax_view_buffer_index_nd;
use crate::layout::{numel, shape_to_strides, Order};
use crate::{Result, StridedError};

/// Shape, strides and base offset; shared by every view kind.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Geometry {
    dims: Arc<[usize]>,
    strides: Arc<[isize]>,
    offset: usize,
}

impl Geometry {
    /// Geometry over a buffer of `len` elements, rejected if any reachable
    /// index falls outside `[0, len)`.
    fn checked(len: usize, dims: &[usize], strides: &[isize], offset: usize) -> Result<Self> {
        if dims.len() != strides.len() {
            return Err(StridedError::StrideLengthMismatch);
        }
        let geometry = Self {
            dims: Arc::from(dims),
            strides: Arc::from(strides),
            offset,
        };
        if geometry.is_empty() {
            return Ok(geometry);
        }
        for (&dim, &stride) in dims.iter().zip(strides) {
            isize::try_from(dim - 1)
                .ok()
                .and_then(|span| span.checked_mul(stride))
                .ok_or(StridedError::OffsetOverflow)?;
        }
        let (min, max) = minmax_view_buffer_index_nd(dims, strides, offset);
        if min < 0 || max as usize >= len {
            return Err(StridedError::OutOfBounds { min, max, len });
        }
        Ok(geometry)
    }

    fn dense(dims: &[usize], order: Order) -> Self {
        Self {
            dims: Arc::from(dims),
            strides: shape_to_strides(dims, order).into(),
            offset: 0,
        }
    }

    fn is_empty(&self) -> bool {
        self.dims.contains(&0)
    }

    /// Buffer index of a multi-index. Panics on a rank mismatch or an
    /// out-of-range coordinate.
    fn locate(&self, index: &[usize]) -> usize {
        assert_eq!(
            index.len(),
            self.dims.len(),
            "expected {} indices, got {}",
            self.dims.len(),
            index.len()
        );
        let pos = index
            .iter()
            .zip(self.dims.iter().zip(self.strides.iter()))
            .fold(self.offset as isize, |acc, (&i, (&dim, &stride))| {
                assert!(i < dim, "index {i} out of range for dimension of size {dim}");
                acc + i as isize * stride
            });
        pos as usize
    }

    fn permuted(&self, perm: &[usize]) -> Result<Self> {
        let rank = self.dims.len();
        if perm.len() != rank {
            return Err(StridedError::RankMismatch(perm.len(), rank));
        }
        let mut seen = vec![false; rank];
        for &axis in perm {
            if axis >= rank || std::mem::replace(&mut seen[axis], true) {
                return Err(StridedError::InvalidAxis { axis, rank });
            }
        }
        Ok(Self {
            dims: perm.iter().map(|&p| self.dims[p]).collect(),
            strides: perm.iter().map(|&p| self.strides[p]).collect(),
            offset: self.offset,
        })
    }

    fn flipped(&self, axis: usize) -> Result<Self> {
        let rank = self.dims.len();
        if axis >= rank {
            return Err(StridedError::InvalidAxis { axis, rank });
        }
        let mut strides = self.strides.to_vec();
        let offset = match self.dims[axis] {
            0 => self.offset,
            dim => (self.offset as isize + (dim as isize - 1) * strides[axis]) as usize,
        };
        strides[axis] = -strides[axis];
        Ok(Self {
            dims: self.dims.clone(),
            strides: strides.into(),
            offset,
        })
    }

    /// Size-1 axes stretch to the target extent with stride 0.
    fn broadcast_to(&self, target: &[usize]) -> Result<Self> {
        if self.dims.len() != target.len() {
            return Err(StridedError::RankMismatch(self.dims.len(), target.len()));
        }
        let strides = self
            .dims
            .iter()
            .zip(self.strides.iter())
            .zip(target)
            .map(|((&dim, &stride), &want)| match dim {
                d if d == want => Ok(stride),
                1 => Ok(0),
                _ => Err(StridedError::ShapeMismatch(self.dims.to_vec(), target.to_vec())),
            })
            .collect::<Result<Arc<[isize]>>>()?;
        Ok(Self {
            dims: Arc::from(target),
            strides,
            offset: self.offset,
        })
    }

    fn debug(&self, name: &str, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct(name)
            .field("dims", &self.dims)
            .field("strides", &self.strides)
            .field("offset", &self.offset)
            .finish()
    }
}

/// Dynamic-rank immutable strided view.
pub struct StridedView<'a, T> {
    data: &'a [T],
    geometry: Geometry,
}

impl<T> Clone for StridedView<'_, T> {
    fn clone(&self) -> Self {
        Self {
            data: self.data,
            geometry: self.geometry.clone(),
        }
    }
}

impl<T> fmt::Debug for StridedView<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.geometry.debug("StridedView", f)
    }
}

impl<'a, T> StridedView<'a, T> {
    /// Borrow `data` as a view, validating the layout against its length.
    pub fn new(data: &'a [T], dims: &[usize], strides: &[isize], offset: usize) -> Result<Self> {
        let geometry = Geometry::checked(data.len(), dims, strides, offset)?;
        Ok(Self { data, geometry })
    }

    /// 1-D view over `n` elements of `data` starting at `offset`.
    pub fn vector(data: &'a [T], n: usize, stride: isize, offset: usize) -> Result<Self> {
        Self::new(data, &[n], &[stride], offset)
    }

    #[inline]
    pub fn dims(&self) -> &[usize] {
        &self.geometry.dims
    }

    #[inline]
    pub fn strides(&self) -> &[isize] {
        &self.geometry.strides
    }

    #[inline]
    pub fn offset(&self) -> usize {
        self.geometry.offset
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.geometry.is_empty()
    }

    /// The whole underlying buffer (not just the viewed elements).
    #[inline]
    pub fn data(&self) -> &'a [T] {
        self.data
    }

    /// Reorder axes: axis `k` of the result is axis `perm[k]` of `self`.
    pub fn permute(&self, perm: &[usize]) -> Result<Self> {
        Ok(Self {
            data: self.data,
            geometry: self.geometry.permuted(perm)?,
        })
    }

    /// Reverse one axis without copying: the stride is negated and the offset
    /// moved to the far end of the axis.
    pub fn flip(&self, axis: usize) -> Result<Self> {
        Ok(Self {
            data: self.data,
            geometry: self.geometry.flipped(axis)?,
        })
    }

    /// Broadcast to `target_dims`; only size-1 axes may grow.
    pub fn broadcast(&self, target_dims: &[usize]) -> Result<Self> {
        Ok(Self {
            data: self.data,
            geometry: self.geometry.broadcast_to(target_dims)?,
        })
    }
}

impl<T: Copy> StridedView<'_, T> {
    pub fn get(&self, index: &[usize]) -> T {
        self.data[self.geometry.locate(index)]
    }
}

/// Dynamic-rank mutable strided view.
pub struct StridedViewMut<'a, T> {
    data: &'a mut [T],
    geometry: Geometry,
}

impl<T> fmt::Debug for StridedViewMut<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.geometry.debug("StridedViewMut", f)
    }
}

impl<'a, T> StridedViewMut<'a, T> {
    pub fn new(
        data: &'a mut [T],
        dims: &[usize],
        strides: &[isize],
        offset: usize,
    ) -> Result<Self> {
        let geometry = Geometry::checked(data.len(), dims, strides, offset)?;
        Ok(Self { data, geometry })
    }

    pub fn vector(data: &'a mut [T], n: usize, stride: isize, offset: usize) -> Result<Self> {
        Self::new(data, &[n], &[stride], offset)
    }

    #[inline]
    pub fn dims(&self) -> &[usize] {
        &self.geometry.dims
    }

    #[inline]
    pub fn strides(&self) -> &[isize] {
        &self.geometry.strides
    }

    #[inline]
    pub fn offset(&self) -> usize {
        self.geometry.offset
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.geometry.is_empty()
    }

    /// The whole underlying buffer, mutably.
    #[inline]
    pub fn data_mut(&mut self) -> &mut [T] {
        self.data
    }

    /// Reborrow as an immutable view with the same geometry.
    pub fn as_view(&self) -> StridedView<'_, T> {
        StridedView {
            data: self.data,
            geometry: self.geometry.clone(),
        }
    }
}

impl<T: Copy> StridedViewMut<'_, T> {
    pub fn set(&mut self, index: &[usize], value: T) {
        let pos = self.geometry.locate(index);
        self.data[pos] = value;
    }
}

/// Owned dense array in row- or column-major order.
#[derive(Clone)]
pub struct StridedArray<T> {
    data: Vec<T>,
    geometry: Geometry,
}

impl<T> fmt::Debug for StridedArray<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.geometry.debug("StridedArray", f)
    }
}

impl<T: Clone + Default> StridedArray<T> {
    /// Column-major array of `T::default()`.
    pub fn col_major(dims: &[usize]) -> Self {
        Self::filled(dims, Order::ColumnMajor)
    }

    /// Row-major array of `T::default()`.
    pub fn row_major(dims: &[usize]) -> Self {
        Self::filled(dims, Order::RowMajor)
    }

    fn filled(dims: &[usize], order: Order) -> Self {
        Self {
            data: vec![T::default(); numel(dims)],
            geometry: Geometry::dense(dims, order),
        }
    }
}

impl<T> StridedArray<T> {
    /// Column-major array whose element at `idx` is `f(idx)`; `f` is called
    /// in storage order.
    pub fn from_fn_col_major(dims: &[usize], f: impl FnMut(&[usize]) -> T) -> Self {
        Self::generate(dims, Order::ColumnMajor, f)
    }

    /// Row-major counterpart of [`StridedArray::from_fn_col_major`].
    pub fn from_fn_row_major(dims: &[usize], f: impl FnMut(&[usize]) -> T) -> Self {
        Self::generate(dims, Order::RowMajor, f)
    }

    fn generate(dims: &[usize], order: Order, mut f: impl FnMut(&[usize]) -> T) -> Self {
        let total = numel(dims);
        let rank = dims.len();
        // Fastest-varying axis first.
        let axes: Vec<usize> = match order {
            Order::RowMajor => (0..rank).rev().collect(),
            Order::ColumnMajor => (0..rank).collect(),
        };
        let mut data = Vec::with_capacity(total);
        let mut index = vec![0usize; rank];
        for _ in 0..total {
            data.push(f(&index));
            for &axis in &axes {
                index[axis] += 1;
                if index[axis] < dims[axis] {
                    break;
                }
                index[axis] = 0;
            }
        }
        Self {
            data,
            geometry: Geometry::dense(dims, order),
        }
    }

    /// Adopt an existing buffer with an arbitrary validated layout.
    pub fn from_parts(data: Vec<T>, dims: &[usize], strides: &[isize], offset: usize) -> Result<Self> {
        let geometry = Geometry::checked(data.len(), dims, strides, offset)?;
        Ok(Self { data, geometry })
    }

    #[inline]
    pub fn data(&self) -> &[T] {
        &self.data
    }

    pub fn view(&self) -> StridedView<'_, T> {
        StridedView {
            data: &self.data,
            geometry: self.geometry.clone(),
        }
    }

    pub fn view_mut(&mut self) -> StridedViewMut<'_, T> {
        StridedViewMut {
            data: &mut self.data,
            geometry: self.geometry.clone(),
        }
    }
}

impl<T: Copy> StridedArray<T> {
    pub fn get(&self, index: &[usize]) -> T {
        self.data[self.geometry.locate(index)]
    }
}
