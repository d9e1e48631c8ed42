//! Elementwise kernels over nested (array-of-arrays) inputs.
//!
//! Every kernel writes `y[i0][i1]… = f(x1[i0][i1]…, …)` for each multi-index
//! of `shape`, in row-major order: the outermost index varies slowest. The
//! recursion goes one dimension at a time and ends in a tight loop over the
//! innermost dimension.
//!
//! Inputs are assumed to match `shape`. A nested array that is too short
//! panics on indexing; the `*nd` variants additionally report an error when
//! the nesting depth of an operand differs from `shape.len()`.

use crate::{Result, StridedError};

/// A nested array of arbitrary depth.
#[derive(Debug, Clone, PartialEq)]
pub enum Nested<T> {
    /// Innermost dimension.
    Leaf(Vec<T>),
    /// One level of nesting.
    Node(Vec<Nested<T>>),
}

impl<T> Nested<T> {
    /// Nesting depth: 1 for a leaf.
    pub fn depth(&self) -> usize {
        match self {
            Nested::Leaf(_) => 1,
            Nested::Node(children) => 1 + children.first().map_or(1, |c| c.depth()),
        }
    }

    /// Shape read along the first child of every level.
    pub fn shape(&self) -> Vec<usize> {
        let mut shape = Vec::new();
        let mut cur = self;
        loop {
            match cur {
                Nested::Leaf(v) => {
                    shape.push(v.len());
                    return shape;
                }
                Nested::Node(children) => {
                    shape.push(children.len());
                    match children.first() {
                        Some(c) => cur = c,
                        None => return shape,
                    }
                }
            }
        }
    }

    /// Build a nested array of `shape` from a row-major index function.
    ///
    /// `shape` must have at least one dimension.
    pub fn from_shape_fn(shape: &[usize], mut f: impl FnMut(&[usize]) -> T) -> Result<Self> {
        if shape.is_empty() {
            return Err(StridedError::InvalidParameter(
                "nested arrays have at least one dimension",
            ));
        }
        let mut idx = vec![0usize; shape.len()];
        Ok(Self::build(shape, 0, &mut idx, &mut f))
    }

    fn build(
        shape: &[usize],
        level: usize,
        idx: &mut [usize],
        f: &mut impl FnMut(&[usize]) -> T,
    ) -> Self {
        let n = shape[level];
        if level + 1 == shape.len() {
            let mut leaf = Vec::with_capacity(n);
            for i in 0..n {
                idx[level] = i;
                leaf.push(f(idx));
            }
            Nested::Leaf(leaf)
        } else {
            let mut children = Vec::with_capacity(n);
            for i in 0..n {
                idx[level] = i;
                children.push(Self::build(shape, level + 1, idx, f));
            }
            Nested::Node(children)
        }
    }

    /// Elements in row-major order.
    pub fn flatten(&self) -> Vec<T>
    where
        T: Clone,
    {
        let mut out = Vec::new();
        self.flatten_into(&mut out);
        out
    }

    fn flatten_into(&self, out: &mut Vec<T>)
    where
        T: Clone,
    {
        match self {
            Nested::Leaf(v) => out.extend_from_slice(v),
            Nested::Node(children) => children.iter().for_each(|c| c.flatten_into(out)),
        }
    }

    fn leaf(&self) -> Result<&[T]> {
        match self {
            Nested::Leaf(v) => Ok(v),
            Nested::Node(_) => Err(StridedError::InvalidParameter(
                "nested array is deeper than shape",
            )),
        }
    }

    fn leaf_mut(&mut self) -> Result<&mut [T]> {
        match self {
            Nested::Leaf(v) => Ok(v),
            Nested::Node(_) => Err(StridedError::InvalidParameter(
                "nested array is deeper than shape",
            )),
        }
    }

    fn node(&self) -> Result<&[Nested<T>]> {
        match self {
            Nested::Node(c) => Ok(c),
            Nested::Leaf(_) => Err(StridedError::InvalidParameter(
                "nested array is shallower than shape",
            )),
        }
    }

    fn node_mut(&mut self) -> Result<&mut [Nested<T>]> {
        match self {
            Nested::Node(c) => Ok(c),
            Nested::Leaf(_) => Err(StridedError::InvalidParameter(
                "nested array is shallower than shape",
            )),
        }
    }
}

impl<T> From<Vec<T>> for Nested<T> {
    fn from(v: Vec<T>) -> Self {
        Nested::Leaf(v)
    }
}

impl<T> From<Vec<Vec<T>>> for Nested<T> {
    fn from(v: Vec<Vec<T>>) -> Self {
        Nested::Node(v.into_iter().map(Nested::Leaf).collect())
    }
}

impl<T> From<Vec<Vec<Vec<T>>>> for Nested<T> {
    fn from(v: Vec<Vec<Vec<T>>>) -> Self {
        Nested::Node(v.into_iter().map(Nested::from).collect())
    }
}

macro_rules! nested_family {
    (
        $kind:literal,
        $name1:ident, $name2:ident, $name3:ident, $namend:ident;
        $($x:ident: $t:ident),+
    ) => {
        #[doc = concat!("1-D ", $kind, " kernel over plain slices.")]
        pub fn $name1<$($t: Copy,)+ D>(
            $($x: &[$t],)+
            y: &mut [D],
            shape: [usize; 1],
            f: impl Fn($($t),+) -> D,
        ) {
            for i0 in 0..shape[0] {
                y[i0] = f($($x[i0]),+);
            }
        }

        #[doc = concat!("2-D ", $kind, " kernel over `Vec<Vec<_>>`-style inputs.")]
        pub fn $name2<$($t: Copy,)+ D>(
            $($x: &[Vec<$t>],)+
            y: &mut [Vec<D>],
            shape: [usize; 2],
            f: impl Fn($($t),+) -> D,
        ) {
            let [s0, s1] = shape;
            if s0 == 0 || s1 == 0 {
                return;
            }
            for i0 in 0..s0 {
                $(let $x = &$x[i0];)+
                let y0 = &mut y[i0];
                for i1 in 0..s1 {
                    y0[i1] = f($($x[i1]),+);
                }
            }
        }

        #[doc = concat!("3-D ", $kind, " kernel over triply nested inputs.")]
        pub fn $name3<$($t: Copy,)+ D>(
            $($x: &[Vec<Vec<$t>>],)+
            y: &mut [Vec<Vec<D>>],
            shape: [usize; 3],
            f: impl Fn($($t),+) -> D,
        ) {
            let [s0, s1, s2] = shape;
            if s0 == 0 || s1 == 0 || s2 == 0 {
                return;
            }
            for i0 in 0..s0 {
                $(let $x = &$x[i0];)+
                let y0 = &mut y[i0];
                for i1 in 0..s1 {
                    $(let $x = &$x[i1];)+
                    let y1 = &mut y0[i1];
                    for i2 in 0..s2 {
                        y1[i2] = f($($x[i2]),+);
                    }
                }
            }
        }

        #[doc = concat!("N-D ", $kind, " kernel over [`Nested`] inputs of any depth.")]
        ///
        /// A zero anywhere in `shape` is a no-op. Returns an error when an
        /// operand's nesting does not follow `shape`.
        pub fn $namend<$($t: Copy,)+ D>(
            $($x: &Nested<$t>,)+
            y: &mut Nested<D>,
            shape: &[usize],
            f: impl Fn($($t),+) -> D,
        ) -> Result<()> {
            fn recurse<$($t: Copy,)+ D, F: Fn($($t),+) -> D>(
                $($x: &Nested<$t>,)+
                y: &mut Nested<D>,
                shape: &[usize],
                f: &F,
            ) -> Result<()> {
                match shape {
                    [] => Err(StridedError::InvalidParameter(
                        "nested arrays have at least one dimension",
                    )),
                    [n] => {
                        $(let $x = $x.leaf()?;)+
                        let y = y.leaf_mut()?;
                        for i in 0..*n {
                            y[i] = f($($x[i]),+);
                        }
                        Ok(())
                    }
                    [n, rest @ ..] => {
                        $(let $x = $x.node()?;)+
                        let y = y.node_mut()?;
                        for i in 0..*n {
                            recurse($(&$x[i],)+ &mut y[i], rest, f)?;
                        }
                        Ok(())
                    }
                }
            }

            if shape.iter().any(|&d| d == 0) {
                return Ok(());
            }
            recurse($($x,)+ y, shape, &f)
        }
    };
}

nested_family!("unary", unary1d, unary2d, unary3d, unarynd; x: A);
nested_family!("binary", binary1d, binary2d, binary3d, binarynd; x: A, y_in: B);
nested_family!(
    "ternary", ternary1d, ternary2d, ternary3d, ternarynd;
    x: A, y_in: B, z: C
);
nested_family!(
    "quaternary", quaternary1d, quaternary2d, quaternary3d, quaternarynd;
    w: A, x: B, y_in: C, z: E
);

/// Copy a 1-D nested array.
pub fn assign1d<T: Copy>(x: &[T], y: &mut [T], shape: [usize; 1]) {
    unary1d(x, y, shape, |v| v)
}

/// Copy a 2-D nested array.
pub fn assign2d<T: Copy>(x: &[Vec<T>], y: &mut [Vec<T>], shape: [usize; 2]) {
    unary2d(x, y, shape, |v| v)
}

/// Copy a 3-D nested array.
pub fn assign3d<T: Copy>(x: &[Vec<Vec<T>>], y: &mut [Vec<Vec<T>>], shape: [usize; 3]) {
    unary3d(x, y, shape, |v| v)
}

/// Copy an N-D nested array.
pub fn assignnd<T: Copy>(x: &Nested<T>, y: &mut Nested<T>, shape: &[usize]) -> Result<()> {
    unarynd(x, y, shape, |v| v)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nested_shape_and_flatten() {
        let n = Nested::from_shape_fn(&[2, 3, 4], |i| i[0] * 100 + i[1] * 10 + i[2]).unwrap();
        assert_eq!(n.depth(), 3);
        assert_eq!(n.shape(), vec![2, 3, 4]);
        let flat = n.flatten();
        assert_eq!(flat.len(), 24);
        assert_eq!(flat[0], 0);
        assert_eq!(flat[5], 11);
        assert_eq!(flat[23], 123);
        assert!(Nested::<u8>::from_shape_fn(&[], |_| 0).is_err());
    }

    #[test]
    fn test_unary1d_partial_shape() {
        let x = [1.0, -2.0, 3.0, 4.0];
        let mut y = [0.0; 4];
        unary1d(&x, &mut y, [3], |v: f64| v.abs());
        assert_eq!(y, [1.0, 2.0, 3.0, 0.0]);
    }

    #[test]
    fn test_binary2d() {
        let x = vec![vec![1, 2, 3], vec![4, 5, 6]];
        let y = vec![vec![10, 20, 30], vec![40, 50, 60]];
        let mut z = vec![vec![0; 3]; 2];
        binary2d(&x, &y, &mut z, [2, 3], |a, b| a + b);
        assert_eq!(z, vec![vec![11, 22, 33], vec![44, 55, 66]]);
    }

    #[test]
    fn test_quaternary3d() {
        let shape = [2, 2, 2];
        let mk = |k: i64| {
            (0..2)
                .map(|i| {
                    (0..2)
                        .map(|j| (0..2).map(|l| k * (4 * i + 2 * j + l)).collect())
                        .collect()
                })
                .collect::<Vec<Vec<Vec<i64>>>>()
        };
        let (w, x, y, z) = (mk(1), mk(2), mk(3), mk(4));
        let mut out = vec![vec![vec![0i64; 2]; 2]; 2];
        quaternary3d(&w, &x, &y, &z, &mut out, shape, |a, b, c, d| a + b + c + d);
        assert_eq!(out[1][1][1], 70);
        assert_eq!(out[0][1][0], 20);
    }

    #[test]
    fn test_zero_shape_is_noop() {
        let x = vec![vec![1.0; 3]; 2];
        let mut y = vec![vec![-1.0; 3]; 2];
        assign2d(&x, &mut y, [2, 0]);
        assert_eq!(y, vec![vec![-1.0; 3]; 2]);
    }

    #[test]
    fn test_ternarynd_matches_3d() {
        let shape = [2usize, 3, 2];
        let gen = |k: f64| Nested::from_shape_fn(&shape, |i| k + (i[0] * 6 + i[1] * 2 + i[2]) as f64);
        let (a, b, c) = (gen(0.0).unwrap(), gen(1.0).unwrap(), gen(2.0).unwrap());
        let mut out = Nested::from_shape_fn(&shape, |_| 0.0).unwrap();
        ternarynd(&a, &b, &c, &mut out, &shape, |p, q, r| p * q - r).unwrap();
        let flat = out.flatten();
        for (k, v) in flat.iter().enumerate() {
            let p = k as f64;
            assert_eq!(*v, p * (p + 1.0) - (p + 2.0));
        }
    }

    #[test]
    fn test_assignnd_from_vecs() {
        let x: Nested<i32> = vec![vec![1, 2], vec![3, 4]].into();
        let mut y: Nested<i32> = vec![vec![0, 0], vec![0, 0]].into();
        assignnd(&x, &mut y, &[2, 2]).unwrap();
        assert_eq!(x, y);
        assert!(assignnd(&x, &mut y, &[2, 2, 1]).is_err());
        assert!(assignnd(&x, &mut y, &[]).is_err());
        assignnd(&x, &mut y, &[0, 2]).unwrap();
    }

    #[test]
    fn test_unarynd_depth_four() {
        let shape = [2usize, 1, 3, 2];
        let x = Nested::from_shape_fn(&shape, |i| (i[0] + i[2] + i[3]) as i32).unwrap();
        let mut y = Nested::from_shape_fn(&shape, |_| 0i64).unwrap();
        unarynd(&x, &mut y, &shape, |v| i64::from(v) * 2).unwrap();
        let expected: Vec<i64> = x.flatten().into_iter().map(|v| i64::from(v) * 2).collect();
        assert_eq!(y.flatten(), expected);
    }
}
