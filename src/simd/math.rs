//! Math function library.
//!
//! Every function here is the scalar routine of the same name applied to each
//! lane through the [`transform`](crate::simd::transform) engine. Results match
//! the scalar library lane by lane, including its rounding and its handling of
//! NaN, infinities and signed zeros.
//!
//! ```
//! use lanewise::simd::Simd;
//!
//! let x = Simd::<f64, 4>::from_array([0.0, 1.0, 4.0, 9.0]);
//! assert_eq!(x.sqrt().to_array(), [0.0, 1.0, 2.0, 3.0]);
//!
//! let (mantissa, exponent) = Simd::<f32, 2>::from_array([8.0, 0.75]).frexp();
//! assert_eq!(mantissa.to_array(), [0.5, 0.75]);
//! assert_eq!(exponent.to_array(), [4, 0]);
//! ```

use core::num::FpCategory;

use num::traits::AsPrimitive;
use num::Complex;

use crate::simd::cmp::MaskFor;
use crate::simd::complex::ComplexSimd;
use crate::simd::storage::{LaneCount, SupportedShape, W4};
use crate::simd::traits::{Element, Float, Integer};
use crate::simd::transform::{transform, transform2, transform3};
use crate::simd::vector::Simd;

/// [`Simd::fpclassify`] code for NaN lanes.
pub const FP_NAN: i32 = 0;
/// [`Simd::fpclassify`] code for infinite lanes.
pub const FP_INFINITE: i32 = 1;
/// [`Simd::fpclassify`] code for zero lanes of either sign.
pub const FP_ZERO: i32 = 2;
/// [`Simd::fpclassify`] code for subnormal lanes.
pub const FP_SUBNORMAL: i32 = 3;
/// [`Simd::fpclassify`] code for normal lanes.
pub const FP_NORMAL: i32 = 4;

#[inline(always)]
fn copy_sign<F: Float>(magnitude: F, sign: F) -> F {
    let magnitude = magnitude.abs();
    if sign.is_sign_negative() {
        -magnitude
    } else {
        magnitude
    }
}

impl<T: Element, const N: usize> Simd<T, N>
where
    LaneCount<N>: SupportedShape<T::Width>,
{
    /// Absolute value of every lane.
    ///
    /// Signed integers wrap, so the most negative value maps to itself.
    #[inline(always)]
    pub fn abs(self) -> Self {
        self.map(T::lane_abs)
    }

    /// `-1`, `0` or `1` per lane for integers. Floats return `±1.0` by sign
    /// bit and propagate NaN.
    #[inline(always)]
    pub fn signum(self) -> Self {
        self.map(T::lane_signum)
    }

    /// Lanewise minimum. For floats a NaN lane yields the other operand.
    #[inline(always)]
    pub fn min(self, other: Self) -> Self {
        self.zip_map(other, T::lane_min)
    }

    /// Lanewise maximum. For floats a NaN lane yields the other operand.
    #[inline(always)]
    pub fn max(self, other: Self) -> Self {
        self.zip_map(other, T::lane_max)
    }

    /// Restricts every lane to `[lo, hi]`, lane by lane.
    #[inline(always)]
    pub fn clamp(self, lo: Self, hi: Self) -> Self {
        self.max(lo).min(hi)
    }
}

macro_rules! float_unary {
    ($($(#[$doc:meta])* $name:ident($x:ident) => $body:expr;)*) => {
        $(
            $(#[$doc])*
            #[inline(always)]
            pub fn $name(self) -> Self {
                transform(self, |$x: F| $body)
            }
        )*
    };
}

macro_rules! float_binary {
    ($($(#[$doc:meta])* $name:ident($x:ident, $y:ident) => $body:expr;)*) => {
        $(
            $(#[$doc])*
            #[inline(always)]
            pub fn $name(self, other: Self) -> Self {
                transform2(self, other, |$x: F, $y: F| $body)
            }
        )*
    };
}

macro_rules! float_predicate {
    ($($(#[$doc:meta])* $name:ident($x:ident) => $body:expr;)*) => {
        $(
            $(#[$doc])*
            #[inline(always)]
            pub fn $name(self) -> MaskFor<F, N> {
                transform(self, |$x: F| $body)
            }
        )*
    };
}

impl<F: Float, const N: usize> Simd<F, N>
where
    LaneCount<N>: SupportedShape<F::Width>,
{
    float_unary! {
        sqrt(x) => x.sqrt();
        cbrt(x) => x.cbrt();
        /// `1 / x` per lane.
        recip(x) => x.recip();

        exp(x) => x.exp();
        exp2(x) => x.exp2();
        /// `e^x - 1`, accurate near zero.
        exp_m1(x) => x.exp_m1();
        ln(x) => x.ln();
        /// `ln(1 + x)`, accurate near zero.
        ln_1p(x) => x.ln_1p();
        log2(x) => x.log2();
        log10(x) => x.log10();

        sin(x) => x.sin();
        cos(x) => x.cos();
        tan(x) => x.tan();
        asin(x) => x.asin();
        acos(x) => x.acos();
        atan(x) => x.atan();
        sinh(x) => x.sinh();
        cosh(x) => x.cosh();
        tanh(x) => x.tanh();
        asinh(x) => x.asinh();
        acosh(x) => x.acosh();
        atanh(x) => x.atanh();

        floor(x) => x.floor();
        ceil(x) => x.ceil();
        /// Rounds half-way cases away from zero.
        round(x) => x.round();
        /// Rounds half-way cases to the nearest even integer.
        round_ties_even(x) => x.round_half_even();
        trunc(x) => x.trunc();
        /// `x - trunc(x)`.
        fract(x) => x.fract();

        /// Error function.
        erf(x) => x.erf();
        /// Complementary error function `1 - erf(x)`.
        erfc(x) => x.erfc();
        /// Gamma function.
        tgamma(x) => x.gamma();
        /// Natural logarithm of `|gamma(x)|`.
        lgamma(x) => x.ln_gamma();

        to_degrees(x) => x.to_degrees();
        to_radians(x) => x.to_radians();
    }

    float_binary! {
        /// Magnitude of `self` with the sign bit of `other`.
        copysign(x, y) => copy_sign(x, y);
        /// `sqrt(x² + y²)` without intermediate overflow.
        hypot(x, y) => x.hypot(y);
        powf(x, y) => x.powf(y);
        /// Four-quadrant arctangent of `self / other`.
        atan2(y, x) => y.atan2(x);
        /// Next representable value after each lane in the direction of `other`.
        next_after(x, y) => x.next_after(y);
        /// Truncated remainder, with the sign of `self`.
        fmod(x, y) => x % y;
        /// IEEE remainder: `self - n * other` with `n` rounded half to even.
        remainder(x, y) => x.ieee_remainder(y);
        /// Positive difference: `self - other` where `self > other`, else `+0`.
        /// NaN if either lane is NaN.
        fdim(x, y) => {
            if x.is_nan() || y.is_nan() {
                F::nan()
            } else if x > y {
                x - y
            } else {
                F::ZERO
            }
        };
    }

    float_predicate! {
        is_nan(x) => x.is_nan();
        is_infinite(x) => x.is_infinite();
        is_finite(x) => x.is_finite();
        is_normal(x) => x.is_normal();
        is_subnormal(x) => x.classify() == FpCategory::Subnormal;
        /// Sign bit set, including `-0.0` and negative NaN.
        is_sign_negative(x) => x.is_sign_negative();
        is_sign_positive(x) => x.is_sign_positive();
    }

    /// Logarithm of every lane in the matching lane of `base`.
    #[inline(always)]
    pub fn log(self, base: Self) -> Self {
        transform2(self, base, |x: F, b: F| x.log(b))
    }

    /// Raises every lane to an integer power.
    #[inline(always)]
    pub fn powi(self, exp: Simd<i32, N>) -> Self
    where
        LaneCount<N>: SupportedShape<W4>,
    {
        transform2(self, exp, |x: F, n: i32| x.powi(n))
    }

    /// Sine and cosine of every lane.
    #[inline(always)]
    pub fn sin_cos(self) -> (Self, Self) {
        (self.sin(), self.cos())
    }

    /// `self * a + b` with a single rounding.
    #[inline(always)]
    pub fn mul_add(self, a: Self, b: Self) -> Self {
        transform3(self, a, b, |x: F, y: F, z: F| x.mul_add(y, z))
    }

    /// Splits every lane into a fractional and an integral part, both with
    /// the sign of the input.
    ///
    /// Infinite lanes return a signed zero fraction, NaN lanes return NaN in
    /// both parts.
    #[inline(always)]
    pub fn modf(self) -> (Self, Self) {
        let integral = self.trunc();
        let fractional = transform2(self, integral, |x: F, t: F| {
            if x.is_infinite() {
                copy_sign(F::ZERO, x)
            } else {
                copy_sign(x - t, x)
            }
        });
        (fractional, integral)
    }

    /// Splits every lane into a mantissa in `[0.5, 1)` and a power of two.
    ///
    /// Zero, infinite and NaN lanes are returned unchanged with exponent 0.
    #[inline(always)]
    pub fn frexp(self) -> (Self, Simd<i32, N>)
    where
        LaneCount<N>: SupportedShape<W4>,
    {
        let mantissa = transform(self, |x: F| x.frexp().0);
        let exponent = transform(self, |x: F| x.frexp().1);
        (mantissa, exponent)
    }

    /// Multiplies every lane by `2^exp`.
    #[inline(always)]
    pub fn ldexp(self, exp: Simd<i32, N>) -> Self
    where
        LaneCount<N>: SupportedShape<W4>,
    {
        transform2(self, exp, |x: F, e: i32| x.ldexp(e))
    }

    /// Same as [`Self::ldexp`]; the radix is always 2.
    #[inline(always)]
    pub fn scalbn(self, exp: Simd<i32, N>) -> Self
    where
        LaneCount<N>: SupportedShape<W4>,
    {
        self.ldexp(exp)
    }

    /// Unbiased binary exponent of every lane.
    ///
    /// Zero and NaN lanes yield [`FP_ILOGB0`](crate::simd::traits::FP_ILOGB0)
    /// and [`FP_ILOGBNAN`](crate::simd::traits::FP_ILOGBNAN), infinities
    /// `i32::MAX`.
    #[inline(always)]
    pub fn ilogb(self) -> Simd<i32, N>
    where
        LaneCount<N>: SupportedShape<W4>,
    {
        transform(self, |x: F| x.ilogb())
    }

    /// Unbiased binary exponent of every lane as a float.
    ///
    /// Zero lanes yield `-inf`, infinite lanes `+inf` and NaN lanes NaN.
    #[inline(always)]
    pub fn logb(self) -> Self
    where
        i32: AsPrimitive<F>,
    {
        transform(self, |x: F| {
            if x.is_nan() {
                x
            } else if x == F::ZERO {
                F::neg_infinity()
            } else if x.is_infinite() {
                F::infinity()
            } else {
                (x.frexp().1 - 1).as_()
            }
        })
    }

    /// Lanes where either operand is NaN.
    #[inline(always)]
    pub fn is_unordered(self, other: Self) -> MaskFor<F, N> {
        transform2(self, other, |x: F, y: F| x.is_nan() || y.is_nan())
    }

    /// Classification code of every lane, one of [`FP_NAN`], [`FP_INFINITE`],
    /// [`FP_ZERO`], [`FP_SUBNORMAL`] or [`FP_NORMAL`].
    #[inline(always)]
    pub fn fpclassify(self) -> Simd<i32, N>
    where
        LaneCount<N>: SupportedShape<W4>,
    {
        transform(self, |x: F| match x.classify() {
            FpCategory::Nan => FP_NAN,
            FpCategory::Infinite => FP_INFINITE,
            FpCategory::Zero => FP_ZERO,
            FpCategory::Subnormal => FP_SUBNORMAL,
            FpCategory::Normal => FP_NORMAL,
        })
    }
}

impl<T: Integer, const N: usize> Simd<T, N>
where
    LaneCount<N>: SupportedShape<T::Width>,
{
    /// Raises every lane to `exp`, wrapping on overflow.
    #[inline(always)]
    pub fn pow(self, exp: u32) -> Self {
        self.map(|lane| lane.lane_pow(exp))
    }

    #[inline(always)]
    pub fn count_ones(self) -> Simd<u32, N>
    where
        LaneCount<N>: SupportedShape<W4>,
    {
        transform(self, |x: T| x.count_ones())
    }

    #[inline(always)]
    pub fn leading_zeros(self) -> Simd<u32, N>
    where
        LaneCount<N>: SupportedShape<W4>,
    {
        transform(self, |x: T| x.leading_zeros())
    }

    #[inline(always)]
    pub fn trailing_zeros(self) -> Simd<u32, N>
    where
        LaneCount<N>: SupportedShape<W4>,
    {
        transform(self, |x: T| x.trailing_zeros())
    }

    /// Rotates the bits of every lane left by `n`, modulo the lane width.
    #[inline(always)]
    pub fn rotate_left(self, n: u32) -> Self {
        self.map(|lane| lane.rotate_left(n % T::BITS))
    }

    /// Rotates the bits of every lane right by `n`, modulo the lane width.
    #[inline(always)]
    pub fn rotate_right(self, n: u32) -> Self {
        self.map(|lane| lane.rotate_right(n % T::BITS))
    }

    /// Reverses the byte order of every lane.
    #[inline(always)]
    pub fn swap_bytes(self) -> Self {
        self.map(|lane| lane.swap_bytes())
    }
}

impl<F: Float, const N: usize> ComplexSimd<F, N>
where
    LaneCount<N>: SupportedShape<F::Width>,
{
    /// Builds `r * (cos θ + i sin θ)` lane by lane.
    #[inline(always)]
    pub fn from_polar(r: Simd<F, N>, theta: Simd<F, N>) -> Self {
        transform2(r, theta, |r: F, t: F| Complex::from_polar(r, t))
    }

    #[inline(always)]
    pub fn exp(self) -> Self {
        transform(self, |z: Complex<F>| z.exp())
    }

    /// Principal natural logarithm.
    #[inline(always)]
    pub fn ln(self) -> Self {
        transform(self, |z: Complex<F>| z.ln())
    }

    /// Principal square root, with the branch cut along the negative real axis.
    #[inline(always)]
    pub fn sqrt(self) -> Self {
        transform(self, |z: Complex<F>| z.sqrt())
    }

    /// Raises every lane to a real power.
    #[inline(always)]
    pub fn powf(self, exp: Simd<F, N>) -> Self {
        transform2(self, exp, |z: Complex<F>, e: F| z.powf(e))
    }

    #[inline(always)]
    pub fn sin(self) -> Self {
        transform(self, |z: Complex<F>| z.sin())
    }

    #[inline(always)]
    pub fn cos(self) -> Self {
        transform(self, |z: Complex<F>| z.cos())
    }

    #[inline(always)]
    pub fn tan(self) -> Self {
        transform(self, |z: Complex<F>| z.tan())
    }

    #[inline(always)]
    pub fn sinh(self) -> Self {
        transform(self, |z: Complex<F>| z.sinh())
    }

    #[inline(always)]
    pub fn cosh(self) -> Self {
        transform(self, |z: Complex<F>| z.cosh())
    }

    #[inline(always)]
    pub fn tanh(self) -> Self {
        transform(self, |z: Complex<F>| z.tanh())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn assert_close<const N: usize>(actual: Simd<f64, N>, expected: [f64; N], tolerance: f64)
    where
        LaneCount<N>: SupportedShape<<f64 as Element>::Width>,
    {
        for (lane, (a, e)) in actual.to_array().iter().zip(expected.iter()).enumerate() {
            assert!(
                (a - e).abs() <= tolerance,
                "lane {}: expected {}, got {}",
                lane,
                e,
                a
            );
        }
    }

    mod generic_tests {
        use super::*;

        #[test]
        fn test_abs_signum_min_max() {
            let v = Simd::<i32, 4>::from_array([-3, 0, 7, i32::MIN]);
            assert_eq!(v.abs().to_array(), [3, 0, 7, i32::MIN]);
            assert_eq!(v.signum().to_array(), [-1, 0, 1, -1]);

            let w = Simd::<i32, 4>::splat(1);
            assert_eq!(v.min(w).to_array(), [-3, 0, 1, i32::MIN]);
            assert_eq!(v.max(w).to_array(), [1, 1, 7, 1]);
        }

        #[test]
        fn test_clamp() {
            let v = Simd::<f32, 4>::from_array([-5.0, 0.5, 2.0, f32::NAN]);
            let clamped = v.clamp(Simd::splat(0.0), Simd::splat(1.0));
            assert_eq!(clamped.to_array(), [0.0, 0.5, 1.0, 0.0]);

            let u = Simd::<u8, 2>::from_array([3, 250]);
            assert_eq!(u.clamp(Simd::splat(10), Simd::splat(200)).to_array(), [10, 200]);
        }

        #[test]
        fn test_float_signum_and_abs() {
            let v = Simd::<f64, 4>::from_array([-0.0, 2.5, -7.0, f64::NAN]);
            let abs = v.abs().to_array();
            assert!(abs[0].is_sign_positive());
            assert_eq!(&abs[1..3], &[2.5, 7.0]);
            let signum = v.signum().to_array();
            assert_eq!(&signum[..3], &[-1.0, 1.0, -1.0]);
            assert!(signum[3].is_nan());
        }
    }

    mod float_tests {
        use super::*;

        #[test]
        fn test_matches_scalar_library() {
            let mut rng = StdRng::seed_from_u64(42);
            for _ in 0..32 {
                let lanes: [f64; 8] = core::array::from_fn(|_| rng.random_range(0.01..10.0));
                let v = Simd::from_array(lanes);
                assert_eq!(v.sqrt().to_array(), lanes.map(f64::sqrt));
                assert_eq!(v.ln().to_array(), lanes.map(f64::ln));
                assert_eq!(v.sin().to_array(), lanes.map(f64::sin));
                assert_eq!(v.tanh().to_array(), lanes.map(f64::tanh));
                assert_eq!(v.exp_m1().to_array(), lanes.map(f64::exp_m1));
                assert_eq!(v.cbrt().to_array(), lanes.map(f64::cbrt));
            }
        }

        #[test]
        fn test_binary_functions() {
            let x = Simd::<f64, 4>::from_array([3.0, 2.0, -1.0, 8.0]);
            let y = Simd::<f64, 4>::from_array([4.0, 10.0, 1.0, 2.0]);
            assert_eq!(x.hypot(y).to_array()[0], 5.0);
            assert_eq!(x.powf(y).to_array(), [81.0, 1024.0, -1.0, 64.0]);
            assert!((x.log(y).to_array()[3] - 3.0).abs() < 1e-15);
            assert_eq!(x.copysign(-y).to_array(), [-3.0, -2.0, -1.0, -8.0]);
            assert_eq!(y.atan2(Simd::splat(0.0)).to_array()[0], core::f64::consts::FRAC_PI_2);
        }

        #[test]
        fn test_powi() {
            let x = Simd::<f32, 4>::splat(2.0);
            let n = Simd::<i32, 4>::from_array([0, 3, -1, 10]);
            assert_eq!(x.powi(n).to_array(), [1.0, 8.0, 0.5, 1024.0]);
        }

        #[test]
        fn test_sin_cos_and_mul_add() {
            let x = Simd::<f64, 2>::from_array([0.0, core::f64::consts::PI]);
            let (s, c) = x.sin_cos();
            assert_close(s, [0.0, 0.0], 1e-15);
            assert_close(c, [1.0, -1.0], 1e-15);

            let fused = x.mul_add(Simd::splat(2.0), Simd::splat(1.0));
            assert_eq!(fused.to_array(), [1.0, 2.0 * core::f64::consts::PI + 1.0]);
        }

        #[test]
        fn test_rounding_family() {
            let v = Simd::<f64, 4>::from_array([2.5, -2.5, 3.5, -0.4]);
            assert_eq!(v.round().to_array(), [3.0, -3.0, 4.0, -0.0]);
            assert_eq!(v.round_ties_even().to_array(), [2.0, -2.0, 4.0, -0.0]);
            assert_eq!(v.floor().to_array(), [2.0, -3.0, 3.0, -1.0]);
            assert_eq!(v.ceil().to_array(), [3.0, -2.0, 4.0, -0.0]);
            assert_eq!(v.trunc().to_array(), [2.0, -2.0, 3.0, -0.0]);
            assert_eq!(v.fract().to_array(), [0.5, -0.5, 0.5, -0.4]);
        }

        #[test]
        fn test_modf_signs() {
            let v = Simd::<f64, 4>::from_array([3.25, -2.0, f64::NEG_INFINITY, f64::NAN]);
            let (fractional, integral) = v.modf();
            let fractional = fractional.to_array();
            let integral = integral.to_array();

            assert_eq!(fractional[0], 0.25);
            assert_eq!(integral[0], 3.0);
            assert_eq!(fractional[1], 0.0);
            assert!(fractional[1].is_sign_negative());
            assert_eq!(fractional[2], 0.0);
            assert!(fractional[2].is_sign_negative());
            assert_eq!(integral[2], f64::NEG_INFINITY);
            assert!(fractional[3].is_nan() && integral[3].is_nan());
        }

        #[test]
        fn test_frexp_ldexp_roundtrip() {
            let mut rng = StdRng::seed_from_u64(42);
            for _ in 0..32 {
                let lanes: [f32; 8] = core::array::from_fn(|_| rng.random_range(-1e6..1e6));
                let v = Simd::from_array(lanes);
                let (mantissa, exponent) = v.frexp();
                assert_eq!(mantissa.ldexp(exponent), v);
                assert_eq!(mantissa.scalbn(exponent), v);
                assert!(mantissa.abs().simd_lt(Simd::splat(1.0)).all());
            }
        }

        #[test]
        fn test_exponent_queries() {
            let v = Simd::<f64, 4>::from_array([8.0, 0.0, f64::INFINITY, f64::NAN]);
            assert_eq!(v.ilogb().to_array(), [3, i32::MIN, i32::MAX, i32::MIN]);

            let logb = v.logb().to_array();
            assert_eq!(&logb[..3], &[3.0, f64::NEG_INFINITY, f64::INFINITY]);
            assert!(logb[3].is_nan());
        }

        #[test]
        fn test_remainders_and_fdim() {
            let x = Simd::<f64, 4>::from_array([5.0, -7.0, 7.0, 1.0]);
            let y = Simd::<f64, 4>::from_array([2.0, 2.0, 2.0, 3.0]);
            assert_eq!(x.fmod(y).to_array(), [1.0, -1.0, 1.0, 1.0]);
            assert_eq!(x.remainder(y).to_array(), [1.0, 1.0, -1.0, 1.0]);

            let d = x.fdim(y).to_array();
            assert_eq!(d, [3.0, 0.0, 5.0, 0.0]);
            assert!(Simd::<f32, 1>::splat(f32::NAN).fdim(Simd::splat(0.0)).is_nan().all());
        }

        #[test]
        fn test_next_after() {
            let one = Simd::<f32, 2>::splat(1.0);
            let toward = Simd::<f32, 2>::from_array([2.0, 0.0]);
            assert_eq!(
                one.next_after(toward).to_array(),
                [1.0 + f32::EPSILON, 1.0 - f32::EPSILON / 2.0]
            );
        }

        #[test]
        fn test_special_functions() {
            let v = Simd::<f64, 2>::from_array([1.0, 5.0]);
            assert_close(v.tgamma(), [1.0, 24.0], 1e-9);
            assert_close(v.lgamma(), [0.0, 24.0f64.ln()], 1e-9);
            assert_close(Simd::<f64, 2>::splat(0.0).erf(), [0.0, 0.0], 1e-15);
            assert_close(Simd::<f64, 2>::splat(0.0).erfc(), [1.0, 1.0], 1e-15);
        }

        #[test]
        fn test_angle_conversion() {
            let deg = Simd::<f64, 2>::from_array([180.0, 90.0]);
            assert_close(deg.to_radians(), [core::f64::consts::PI, core::f64::consts::FRAC_PI_2], 1e-15);
            assert_close(deg.to_radians().to_degrees(), [180.0, 90.0], 1e-12);
        }
    }

    mod classification_tests {
        use super::*;

        #[test]
        fn test_predicates() {
            let tiny = f32::from_bits(1);
            let v = Simd::<f32, 4>::from_array([1.0, f32::NAN, f32::NEG_INFINITY, tiny]);
            assert_eq!(v.is_nan().to_array(), [false, true, false, false]);
            assert_eq!(v.is_infinite().to_array(), [false, false, true, false]);
            assert_eq!(v.is_finite().to_array(), [true, false, false, true]);
            assert_eq!(v.is_normal().to_array(), [true, false, false, false]);
            assert_eq!(v.is_subnormal().to_array(), [false, false, false, true]);
            assert_eq!(v.is_sign_negative().to_array(), [false, false, true, false]);
            assert_eq!(v.is_sign_positive().to_array(), [true, true, false, true]);
        }

        #[test]
        fn test_is_unordered() {
            let a = Simd::<f64, 2>::from_array([f64::NAN, 1.0]);
            let b = Simd::<f64, 2>::from_array([0.0, 2.0]);
            assert_eq!(a.is_unordered(b).to_array(), [true, false]);
            assert_eq!(b.is_unordered(b).to_array(), [false, false]);
        }

        #[test]
        fn test_fpclassify_codes() {
            let v = Simd::<f64, 8>::from_array([
                f64::NAN,
                f64::INFINITY,
                0.0,
                -0.0,
                f64::from_bits(3),
                1.0,
                -f64::MAX,
                f64::MIN_POSITIVE,
            ]);
            assert_eq!(
                v.fpclassify().to_array(),
                [FP_NAN, FP_INFINITE, FP_ZERO, FP_ZERO, FP_SUBNORMAL, FP_NORMAL, FP_NORMAL, FP_NORMAL]
            );
        }
    }

    mod integer_tests {
        use super::*;

        #[test]
        fn test_pow_wraps() {
            let v = Simd::<u8, 4>::from_array([2, 3, 16, 0]);
            assert_eq!(v.pow(2).to_array(), [4, 9, 0, 0]);
            assert_eq!(v.pow(0).to_array(), [1, 1, 1, 1]);
        }

        #[test]
        fn test_bit_counts() {
            let v = Simd::<u16, 4>::from_array([0, 1, 0xFF00, u16::MAX]);
            assert_eq!(v.count_ones().to_array(), [0, 1, 8, 16]);
            assert_eq!(v.leading_zeros().to_array(), [16, 15, 0, 0]);
            assert_eq!(v.trailing_zeros().to_array(), [16, 0, 8, 0]);
        }

        #[test]
        fn test_rotations_and_swap() {
            let v = Simd::<u32, 2>::from_array([0x8000_0001, 0x1234_5678]);
            assert_eq!(v.rotate_left(1).to_array(), [0x0000_0003, 0x2468_ACF0]);
            assert_eq!(v.rotate_right(4).to_array(), [0x1800_0000, 0x8123_4567]);
            assert_eq!(v.rotate_left(36), v.rotate_left(4));
            assert_eq!(v.swap_bytes().to_array(), [0x0100_0080, 0x7856_3412]);
        }

        #[test]
        fn test_signed_bit_counts() {
            let v = Simd::<i8, 2>::from_array([-1, 4]);
            assert_eq!(v.count_ones().to_array(), [8, 1]);
            assert_eq!(v.leading_zeros().to_array(), [0, 5]);
        }
    }

    mod complex_tests {
        use super::*;

        fn lanes_close(actual: ComplexSimd<f64, 2>, expected: [Complex<f64>; 2]) {
            for (a, e) in actual.to_array().iter().zip(expected.iter()) {
                assert!((a - e).norm() < 1e-12, "expected {}, got {}", e, a);
            }
        }

        #[test]
        fn test_matches_num_complex() {
            let lanes = [Complex::new(0.5, -1.25), Complex::new(-2.0, 0.75)];
            let z = ComplexSimd::<f64, 2>::from_array(lanes);
            lanes_close(z.exp(), lanes.map(|c| c.exp()));
            lanes_close(z.ln(), lanes.map(|c| c.ln()));
            lanes_close(z.sqrt(), lanes.map(|c| c.sqrt()));
            lanes_close(z.sin(), lanes.map(|c| c.sin()));
            lanes_close(z.cos(), lanes.map(|c| c.cos()));
            lanes_close(z.tan(), lanes.map(|c| c.tan()));
            lanes_close(z.sinh(), lanes.map(|c| c.sinh()));
            lanes_close(z.cosh(), lanes.map(|c| c.cosh()));
            lanes_close(z.tanh(), lanes.map(|c| c.tanh()));
            lanes_close(z.powf(Simd::splat(2.0)), lanes.map(|c| c * c));
        }

        #[test]
        fn test_sqrt_of_negative_real() {
            let z = ComplexSimd::<f64, 2>::from_real(Simd::splat(-4.0));
            lanes_close(z.sqrt(), [Complex::new(0.0, 2.0); 2]);
        }

        #[test]
        fn test_from_polar_inverts_norm_and_arg() {
            let z = ComplexSimd::<f64, 2>::from_array([Complex::new(3.0, 4.0), Complex::new(-1.0, -1.0)]);
            let rebuilt = ComplexSimd::from_polar(z.norm(), z.arg());
            lanes_close(rebuilt, z.to_array());
        }
    }
}
