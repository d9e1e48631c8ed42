use strided_traits::Real;

/// Plane rotation produced by [`grotg`].
///
/// `[c s; -s c] * [a; b] = [r; 0]`; `z` encodes the rotation in a single
/// value so that it can later be reconstructed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Givens<T> {
    pub r: T,
    pub z: T,
    pub c: T,
    pub s: T,
}

/// Construct the Givens rotation that zeroes `b` against `a`.
pub fn grotg<T: Real>(a: T, b: T) -> Givens<T> {
    let (abs_a, abs_b) = (a.abs(), b.abs());
    let scale = abs_a + abs_b;
    if scale == T::zero() {
        return Givens {
            r: T::zero(),
            z: T::zero(),
            c: T::one(),
            s: T::zero(),
        };
    }
    let roe = if abs_a > abs_b { a } else { b };
    let (sa, sb) = (a / scale, b / scale);
    let r = scale * (sa * sa + sb * sb).sqrt() * roe.signum();
    let c = a / r;
    let s = b / r;
    let z = if abs_a > abs_b {
        s
    } else if c != T::zero() {
        T::one() / c
    } else {
        T::one()
    };
    Givens { r, z, c, s }
}

typed! {
    pub fn drotg(a: f64, b: f64) -> Givens<f64> => grotg::<f64>;
    pub fn srotg(a: f32, b: f32) -> Givens<f32> => grotg::<f32>;
}
