//! Lane element traits and category tags.
//!
//! Every vector in this crate is generic over an element type implementing
//! [`Element`]. The element decides the vector's category:
//!
//! - [`Integer`] elements (`i8`..`i128`, `u8`..`u128`) get wrapping arithmetic,
//!   remainder, shifts and bitwise negation.
//! - [`Float`] elements (`f32`, `f64`) get IEEE 754 arithmetic and the math
//!   function library.
//! - [`MaskElement`] is the signed integer used as storage by boolean vectors.
//!
//! The traits are sealed: the storage table only knows the widths of the
//! primitive numeric types.

use core::fmt::{Binary, Debug, Display, LowerHex, Octal, UpperHex};
use core::hash::{Hash, Hasher};
use core::str::FromStr;

use num::{Float as NumFloat, PrimInt};
use zerocopy::{FromBytes, Immutable, IntoBytes};

use crate::simd::storage::{Width, W1, W16, W2, W4, W8};

pub(crate) mod sealed {
    pub trait Sealed {}
}

/// Type-level category marker.
pub trait CategoryTag: sealed::Sealed + Copy + Debug + Default + Send + Sync + 'static {
    /// Human-readable category name.
    const NAME: &'static str;
}

/// Category of signed and unsigned integer vectors.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct IntegralTag;

/// Category of IEEE floating-point vectors.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct FloatingTag;

/// Category of complex vectors (paired floating-point vectors).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct ComplexTag;

/// Category of boolean vectors.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct BooleanTag;

macro_rules! category_tags {
    ($($tag:ty => $name:literal),* $(,)?) => {
        $(
            impl sealed::Sealed for $tag {}
            impl CategoryTag for $tag {
                const NAME: &'static str = $name;
            }
        )*
    };
}

category_tags! {
    IntegralTag => "integral",
    FloatingTag => "floating",
    ComplexTag => "complex",
    BooleanTag => "boolean",
}

/// A scalar that can occupy one lane of a [`Simd`](crate::simd::Simd) vector.
///
/// The `lane_*` methods carry the category's scalar semantics: integers wrap
/// on overflow, floats follow IEEE 754. The bitwise methods always operate on
/// the raw bit pattern, for floats as well.
pub trait Element:
    sealed::Sealed
    + Copy
    + Default
    + PartialEq
    + PartialOrd
    + Debug
    + Display
    + FromStr
    + Send
    + Sync
    + 'static
    + FromBytes
    + IntoBytes
    + Immutable
{
    /// Byte width class used by the storage table.
    type Width: Width;
    /// Arithmetic category of vectors of this element.
    type Category: CategoryTag;

    const ZERO: Self;
    const ONE: Self;

    fn lane_add(self, rhs: Self) -> Self;
    fn lane_sub(self, rhs: Self) -> Self;
    fn lane_mul(self, rhs: Self) -> Self;
    fn lane_div(self, rhs: Self) -> Self;
    fn lane_neg(self) -> Self;

    fn lane_and(self, rhs: Self) -> Self;
    fn lane_or(self, rhs: Self) -> Self;
    fn lane_xor(self, rhs: Self) -> Self;

    fn lane_min(self, rhs: Self) -> Self;
    fn lane_max(self, rhs: Self) -> Self;

    /// Absolute value. Wraps for the most negative signed integer.
    #[inline(always)]
    fn lane_abs(self) -> Self {
        if self < Self::ZERO {
            self.lane_neg()
        } else {
            self
        }
    }

    #[inline(always)]
    fn lane_signum(self) -> Self {
        if self > Self::ZERO {
            Self::ONE
        } else if self < Self::ZERO {
            Self::ONE.lane_neg()
        } else {
            Self::ZERO
        }
    }

    /// Scalar truthiness: any value other than zero.
    #[inline(always)]
    fn is_truthy(self) -> bool {
        self != Self::ZERO
    }

    /// Feeds the lane into a hasher. Floats hash their bit pattern, with
    /// `-0.0` folded into `0.0` so lanes that compare equal hash equal.
    fn hash_lane<H: Hasher>(self, state: &mut H);
}

/// Integer lane elements.
pub trait Integer:
    Element<Category = IntegralTag> + Eq + Ord + Hash + PrimInt + LowerHex + UpperHex + Octal + Binary
{
    const BITS: u32;

    /// Wrapping remainder. Panics on a zero divisor like the scalar operator.
    fn lane_rem(self, rhs: Self) -> Self;
    fn lane_not(self) -> Self;
    /// Shift left by `amount` masked to the bit width.
    fn lane_shl(self, amount: Self) -> Self;
    /// Shift right by `amount` masked to the bit width (arithmetic for signed types).
    fn lane_shr(self, amount: Self) -> Self;
    fn lane_pow(self, exp: u32) -> Self;
}

/// Signed integers used as boolean lane storage.
///
/// A mask lane holds [`MaskElement::TRUE`] or zero. [`MaskElement::SATURATED`]
/// is the all-ones encoding produced by hardware comparisons.
pub trait MaskElement: Integer {
    const TRUE: Self;
    const SATURATED: Self;
}

/// Floating-point lane elements.
pub trait Float: Element<Category = FloatingTag> + NumFloat {
    /// Explicitly stored mantissa bits.
    const MANTISSA_BITS: u32;
    /// Exponent bias.
    const EXPONENT_BIAS: i32;

    /// Splits into a mantissa in `[0.5, 1)` and a power of two.
    fn frexp(self) -> (Self, i32);
    /// Multiplies by `2^exp` without intermediate overflow.
    fn ldexp(self, exp: i32) -> Self;
    /// Unbiased exponent as an integer, `FP_ILOGB0` for zero, `FP_ILOGBNAN` for NaN.
    fn ilogb(self) -> i32;
    /// Next representable value from `self` in the direction of `toward`.
    fn next_after(self, toward: Self) -> Self;
    /// IEEE remainder: `self - n * rhs` with `n` the quotient rounded half to even.
    fn ieee_remainder(self, rhs: Self) -> Self;
    fn round_half_even(self) -> Self;
    fn erf(self) -> Self;
    fn erfc(self) -> Self;
    fn gamma(self) -> Self;
    /// Natural logarithm of the absolute value of the gamma function.
    fn ln_gamma(self) -> Self;
}

/// Value returned by [`Float::ilogb`] for zero.
pub const FP_ILOGB0: i32 = i32::MIN;
/// Value returned by [`Float::ilogb`] for NaN.
pub const FP_ILOGBNAN: i32 = i32::MIN;

macro_rules! impl_integer {
    ($($t:ty => $width:ty),* $(,)?) => {
        $(
            impl sealed::Sealed for $t {}

            impl Element for $t {
                type Width = $width;
                type Category = IntegralTag;

                const ZERO: Self = 0;
                const ONE: Self = 1;

                #[inline(always)]
                fn lane_add(self, rhs: Self) -> Self {
                    self.wrapping_add(rhs)
                }

                #[inline(always)]
                fn lane_sub(self, rhs: Self) -> Self {
                    self.wrapping_sub(rhs)
                }

                #[inline(always)]
                fn lane_mul(self, rhs: Self) -> Self {
                    self.wrapping_mul(rhs)
                }

                #[inline(always)]
                fn lane_div(self, rhs: Self) -> Self {
                    self.wrapping_div(rhs)
                }

                #[inline(always)]
                fn lane_neg(self) -> Self {
                    self.wrapping_neg()
                }

                #[inline(always)]
                fn lane_and(self, rhs: Self) -> Self {
                    self & rhs
                }

                #[inline(always)]
                fn lane_or(self, rhs: Self) -> Self {
                    self | rhs
                }

                #[inline(always)]
                fn lane_xor(self, rhs: Self) -> Self {
                    self ^ rhs
                }

                #[inline(always)]
                fn lane_min(self, rhs: Self) -> Self {
                    Ord::min(self, rhs)
                }

                #[inline(always)]
                fn lane_max(self, rhs: Self) -> Self {
                    Ord::max(self, rhs)
                }

                #[inline(always)]
                fn hash_lane<H: Hasher>(self, state: &mut H) {
                    Hash::hash(&self, state)
                }
            }

            impl Integer for $t {
                const BITS: u32 = <$t>::BITS;

                #[inline(always)]
                fn lane_rem(self, rhs: Self) -> Self {
                    self.wrapping_rem(rhs)
                }

                #[inline(always)]
                fn lane_not(self) -> Self {
                    !self
                }

                #[inline(always)]
                fn lane_shl(self, amount: Self) -> Self {
                    self.wrapping_shl(amount as u32)
                }

                #[inline(always)]
                fn lane_shr(self, amount: Self) -> Self {
                    self.wrapping_shr(amount as u32)
                }

                #[inline(always)]
                fn lane_pow(self, exp: u32) -> Self {
                    self.wrapping_pow(exp)
                }
            }
        )*
    };
}

impl_integer! {
    i8 => W1,
    i16 => W2,
    i32 => W4,
    i64 => W8,
    i128 => W16,
    u8 => W1,
    u16 => W2,
    u32 => W4,
    u64 => W8,
    u128 => W16,
}

macro_rules! impl_mask_element {
    ($($t:ty),*) => {
        $(
            impl MaskElement for $t {
                const TRUE: Self = 1;
                const SATURATED: Self = -1;
            }
        )*
    };
}

impl_mask_element!(i8, i16, i32, i64, i128);

macro_rules! impl_float {
    ($($t:ty => $width:ty, $bits:ty, $mantissa:literal, $bias:literal, $scale:literal);* $(;)?) => {
        $(
            impl sealed::Sealed for $t {}

            impl Element for $t {
                type Width = $width;
                type Category = FloatingTag;

                const ZERO: Self = 0.0;
                const ONE: Self = 1.0;

                #[inline(always)]
                fn lane_add(self, rhs: Self) -> Self {
                    self + rhs
                }

                #[inline(always)]
                fn lane_sub(self, rhs: Self) -> Self {
                    self - rhs
                }

                #[inline(always)]
                fn lane_mul(self, rhs: Self) -> Self {
                    self * rhs
                }

                #[inline(always)]
                fn lane_div(self, rhs: Self) -> Self {
                    self / rhs
                }

                #[inline(always)]
                fn lane_neg(self) -> Self {
                    -self
                }

                #[inline(always)]
                fn lane_and(self, rhs: Self) -> Self {
                    <$t>::from_bits(self.to_bits() & rhs.to_bits())
                }

                #[inline(always)]
                fn lane_or(self, rhs: Self) -> Self {
                    <$t>::from_bits(self.to_bits() | rhs.to_bits())
                }

                #[inline(always)]
                fn lane_xor(self, rhs: Self) -> Self {
                    <$t>::from_bits(self.to_bits() ^ rhs.to_bits())
                }

                #[inline(always)]
                fn lane_min(self, rhs: Self) -> Self {
                    <$t>::min(self, rhs)
                }

                #[inline(always)]
                fn lane_max(self, rhs: Self) -> Self {
                    <$t>::max(self, rhs)
                }

                #[inline(always)]
                fn lane_abs(self) -> Self {
                    <$t>::abs(self)
                }

                #[inline(always)]
                fn lane_signum(self) -> Self {
                    <$t>::signum(self)
                }

                #[inline(always)]
                fn hash_lane<H: Hasher>(self, state: &mut H) {
                    let canonical = if self == 0.0 { 0.0 } else { self };
                    Hash::hash(&canonical.to_bits(), state)
                }
            }

            impl Float for $t {
                const MANTISSA_BITS: u32 = $mantissa;
                const EXPONENT_BIAS: i32 = $bias;

                fn frexp(self) -> (Self, i32) {
                    if self == 0.0 || !self.is_finite() {
                        return (self, 0);
                    }

                    let bits = self.to_bits();
                    let exponent_mask: $bits = ((1 as $bits) << (<$bits>::BITS - 1 - $mantissa)) - 1;
                    let biased = ((bits >> $mantissa) & exponent_mask) as i32;

                    if biased == 0 {
                        // Subnormal: scale into the normal range first
                        let scaled = self * pow2::<$t>($scale);
                        let (mantissa, exponent) = scaled.frexp();
                        return (mantissa, exponent - $scale);
                    }

                    let cleared = bits & !(exponent_mask << $mantissa);
                    let mantissa = <$t>::from_bits(cleared | (((($bias - 1) as $bits)) << $mantissa));
                    (mantissa, biased - ($bias - 1))
                }

                fn ldexp(self, exp: i32) -> Self {
                    let max_exp = $bias;
                    let min_exp = 1 - $bias;
                    let precision = $mantissa + 1;

                    let mut y = self;
                    let mut n = exp;
                    if n > max_exp {
                        y *= pow2::<$t>(max_exp);
                        n -= max_exp;
                        if n > max_exp {
                            y *= pow2::<$t>(max_exp);
                            n -= max_exp;
                            n = n.min(max_exp);
                        }
                    } else if n < min_exp {
                        // Step through the normal range keeping the mantissa exact
                        let step = pow2::<$t>(min_exp) * pow2::<$t>(precision);
                        y *= step;
                        n += -min_exp - precision;
                        if n < min_exp {
                            y *= step;
                            n += -min_exp - precision;
                            n = n.max(min_exp);
                        }
                    }
                    y * pow2::<$t>(n)
                }

                fn ilogb(self) -> i32 {
                    if self.is_nan() {
                        FP_ILOGBNAN
                    } else if self == 0.0 {
                        FP_ILOGB0
                    } else if self.is_infinite() {
                        i32::MAX
                    } else {
                        self.frexp().1 - 1
                    }
                }

                fn next_after(self, toward: Self) -> Self {
                    if self.is_nan() || toward.is_nan() {
                        return <$t>::NAN;
                    }
                    if self == toward {
                        return toward;
                    }
                    if self == 0.0 {
                        let tiny = <$t>::from_bits(1);
                        return if toward > 0.0 { tiny } else { -tiny };
                    }

                    let bits = self.to_bits();
                    let away_from_zero = (toward > self) == (self > 0.0);
                    <$t>::from_bits(if away_from_zero { bits + 1 } else { bits - 1 })
                }

                fn ieee_remainder(self, rhs: Self) -> Self {
                    if self.is_nan() || rhs.is_nan() || self.is_infinite() || rhs == 0.0 {
                        return <$t>::NAN;
                    }
                    if rhs.is_infinite() {
                        return self;
                    }

                    let divisor = rhs.abs();
                    let mut x = self.abs();
                    if divisor <= <$t>::MAX / 2.0 {
                        // x now lies in [0, 2 * divisor)
                        x %= divisor + divisor;
                    }

                    if divisor < <$t>::MIN_POSITIVE * 2.0 {
                        if x + x > divisor {
                            x -= divisor;
                            if x + x >= divisor {
                                x -= divisor;
                            }
                        }
                    } else {
                        let half = 0.5 * divisor;
                        if x > half {
                            x -= divisor;
                            if x >= half {
                                x -= divisor;
                            }
                        }
                    }

                    if self.is_sign_negative() {
                        -x
                    } else {
                        x
                    }
                }

                #[inline(always)]
                fn round_half_even(self) -> Self {
                    <$t>::round_ties_even(self)
                }

                fn erf(self) -> Self {
                    statrs::function::erf::erf(self as f64) as $t
                }

                fn erfc(self) -> Self {
                    statrs::function::erf::erfc(self as f64) as $t
                }

                fn gamma(self) -> Self {
                    statrs::function::gamma::gamma(self as f64) as $t
                }

                fn ln_gamma(self) -> Self {
                    let x = self as f64;
                    if x < 0.5 {
                        // Reflection keeps the sign of sin(pi x) out of the logarithm
                        let pi = std::f64::consts::PI;
                        let sine = (pi * x).sin().abs();
                        (pi.ln() - sine.ln() - statrs::function::gamma::ln_gamma(1.0 - x)) as $t
                    } else {
                        statrs::function::gamma::ln_gamma(x) as $t
                    }
                }
            }
        )*
    };
}

/// Exact power of two for exponents within the normal range.
#[inline(always)]
fn pow2<F: Float>(exp: i32) -> F {
    // Avoids powi, whose accuracy is unspecified
    let mut value = F::ONE;
    let base = if exp >= 0 { F::ONE + F::ONE } else { F::ONE / (F::ONE + F::ONE) };
    let mut remaining = exp.unsigned_abs();
    let mut factor = base;
    while remaining > 0 {
        if remaining & 1 == 1 {
            value = value * factor;
        }
        factor = factor * factor;
        remaining >>= 1;
    }
    value
}

impl_float! {
    f32 => W4, u32, 23, 127, 32;
    f64 => W8, u64, 52, 1023, 64;
}

#[cfg(test)]
mod tests {
    use super::*;

    mod integer_tests {
        use super::*;

        #[test]
        fn test_wrapping_arithmetic() {
            assert_eq!(i8::MAX.lane_add(1), i8::MIN);
            assert_eq!(0u16.lane_sub(1), u16::MAX);
            assert_eq!(i32::MIN.lane_div(-1), i32::MIN);
            assert_eq!(i64::MIN.lane_neg(), i64::MIN);
            assert_eq!(200u8.lane_mul(2), 144);
        }

        #[test]
        fn test_shift_amount_is_masked() {
            assert_eq!(1i32.lane_shl(33), 2);
            assert_eq!(0x80u8.lane_shr(7), 1);
            assert_eq!((-8i16).lane_shr(1), -4);
        }

        #[test]
        fn test_abs_and_signum() {
            assert_eq!((-5i32).lane_abs(), 5);
            assert_eq!(i8::MIN.lane_abs(), i8::MIN);
            assert_eq!(7u32.lane_abs(), 7);
            assert_eq!((-3i64).lane_signum(), -1);
            assert_eq!(0u8.lane_signum(), 0);
        }

        #[test]
        fn test_mask_constants() {
            assert_eq!(<i32 as MaskElement>::TRUE, 1);
            assert_eq!(<i8 as MaskElement>::SATURATED as u8, 0xFF);
            assert_eq!(<i128 as MaskElement>::SATURATED, -1);
        }
    }

    mod float_tests {
        use super::*;

        #[test]
        fn test_abs_clears_negative_zero() {
            assert!((-0.0f64).lane_abs().is_sign_positive());
            assert_eq!((-2.0f32).lane_signum(), -1.0);
        }

        #[test]
        fn test_raw_bitwise_on_floats() {
            let sign_mask = f32::from_bits(0x7FFF_FFFF);
            assert_eq!((-2.5f32).lane_and(sign_mask), 2.5);
            assert_eq!(1.0f64.lane_xor(-0.0), -1.0);
        }

        #[test]
        fn test_frexp_normal_values() {
            assert_eq!(8.0f64.frexp(), (0.5, 4));
            assert_eq!(1.0f32.frexp(), (0.5, 1));
            assert_eq!((-3.0f32).frexp(), (-0.75, 2));
            assert_eq!(0.0f64.frexp(), (0.0, 0));
        }

        #[test]
        fn test_frexp_subnormal() {
            let tiny = f64::from_bits(1);
            let (mantissa, exponent) = tiny.frexp();
            assert_eq!(mantissa, 0.5);
            assert_eq!(exponent, -1073);
            assert_eq!(mantissa.ldexp(exponent), tiny);
        }

        #[test]
        fn test_ldexp_extremes() {
            assert_eq!(1.0f32.ldexp(10), 1024.0);
            assert_eq!(1.0f32.ldexp(-149), f32::from_bits(1));
            assert!(1.0f64.ldexp(5000).is_infinite());
            assert_eq!(1.0f64.ldexp(-5000), 0.0);
            assert_eq!(f32::MAX.ldexp(-128).ldexp(128), f32::MAX);
        }

        #[test]
        fn test_ilogb() {
            assert_eq!(1.0f64.ilogb(), 0);
            assert_eq!(10.0f32.ilogb(), 3);
            assert_eq!(0.0f32.ilogb(), FP_ILOGB0);
            assert_eq!(f64::INFINITY.ilogb(), i32::MAX);
        }

        #[test]
        fn test_next_after() {
            assert_eq!(1.0f32.next_after(2.0), 1.0 + f32::EPSILON);
            assert_eq!(0.0f64.next_after(-1.0), -f64::from_bits(1));
            assert!(1.0f32.next_after(f32::NAN).is_nan());
            assert_eq!((-1.0f64).next_after(0.0), -1.0 + f64::EPSILON / 2.0);
        }

        #[test]
        fn test_ieee_remainder() {
            assert_eq!(5.0f64.ieee_remainder(2.0), 1.0);
            assert_eq!(7.0f64.ieee_remainder(2.0), -1.0);
            assert_eq!((-7.0f32).ieee_remainder(2.0), 1.0);
            assert_eq!(3.0f32.ieee_remainder(f32::INFINITY), 3.0);
            assert!(1.0f64.ieee_remainder(0.0).is_nan());
        }

        #[test]
        fn test_special_functions() {
            assert!((1.0f64.erf() - 0.842_700_792_949_714_9).abs() < 1e-12);
            assert!((0.0f32.erfc() - 1.0).abs() < 1e-6);
            assert!((5.0f64.gamma() - 24.0).abs() < 1e-9);
            assert!((3.0f64.ln_gamma() - 2.0f64.ln()).abs() < 1e-12);
            assert!(((-0.5f64).ln_gamma() - (2.0 * std::f64::consts::PI.sqrt()).ln()).abs() < 1e-10);
        }

        #[test]
        fn test_float_hash_folds_signed_zero() {
            use std::collections::hash_map::DefaultHasher;

            let hash = |value: f32| {
                let mut hasher = DefaultHasher::new();
                value.hash_lane(&mut hasher);
                hasher.finish()
            };
            assert_eq!(hash(1.5), hash(1.5));
            assert_eq!(hash(0.0), hash(-0.0));
            assert_ne!(hash(0.0), hash(f32::MIN_POSITIVE));
        }
    }

    #[test]
    fn test_category_names() {
        assert_eq!(<i32 as Element>::Category::NAME, "integral");
        assert_eq!(<f64 as Element>::Category::NAME, "floating");
        assert_eq!(BooleanTag::NAME, "boolean");
        assert_eq!(ComplexTag::NAME, "complex");
    }
}
