/// Define a concrete-type wrapper around a generic kernel.
///
/// ```ignore
/// typed! {
///     /// Scales a double-precision vector.
///     pub fn dscal(n: usize, alpha: f64, x: &mut [f64], stride: isize) => gscal::<f64>;
/// }
/// ```
macro_rules! typed {
    ($(
        $(#[$meta:meta])*
        pub fn $name:ident($($arg:ident: $ty:ty),* $(,)?) $(-> $ret:ty)? => $generic:ident::<$t:ty>;
    )+) => {
        $(
            $(#[$meta])*
            #[inline]
            pub fn $name($($arg: $ty),*) $(-> $ret)? {
                $generic::<$t>($($arg),*)
            }
        )+
    };
}
