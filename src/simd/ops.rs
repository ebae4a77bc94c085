//! Elementwise operators for [`Simd`].
//!
//! Every binary operator has three forms: vector with vector, vector with a
//! broadcast scalar on the right, and the compound assignment of both. The
//! lane semantics come from the element:
//!
//! | operator | integral | floating |
//! |---|---|---|
//! | `+ - * /` | wrapping (`/` panics on zero) | IEEE 754 |
//! | `& \| ^` | bitwise | bitwise on the raw bits |
//! | `%`, `<<`, `>>`, `!` | wrapping, shift amount masked | not provided |
//! | unary `-` | wrapping | sign flip |
//!
//! Primitive scalars on the left of `+ - * /` are also supported, so
//! `2 * v` and `v * 2` both broadcast.

use core::ops::{
    Add, AddAssign, BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Div,
    DivAssign, Mul, MulAssign, Neg, Not, Rem, RemAssign, Shl, ShlAssign, Shr, ShrAssign, Sub,
    SubAssign,
};

use crate::simd::storage::{LaneCount, SupportedShape};
use crate::simd::traits::{Element, Integer};
use crate::simd::vector::Simd;

macro_rules! impl_binary_op {
    ($bound:ident, $op:ident, $method:ident, $assign:ident, $assign_method:ident, $lane:ident) => {
        impl<T: $bound, const N: usize> $op for Simd<T, N>
        where
            LaneCount<N>: SupportedShape<T::Width>,
        {
            type Output = Self;

            #[inline(always)]
            fn $method(self, rhs: Self) -> Self {
                self.zip_map(rhs, T::$lane)
            }
        }

        impl<T: $bound, const N: usize> $op<T> for Simd<T, N>
        where
            LaneCount<N>: SupportedShape<T::Width>,
        {
            type Output = Self;

            #[inline(always)]
            fn $method(self, rhs: T) -> Self {
                self.map(|lane| lane.$lane(rhs))
            }
        }

        impl<T: $bound, const N: usize> $assign for Simd<T, N>
        where
            LaneCount<N>: SupportedShape<T::Width>,
        {
            #[inline(always)]
            fn $assign_method(&mut self, rhs: Self) {
                *self = $op::$method(*self, rhs);
            }
        }

        impl<T: $bound, const N: usize> $assign<T> for Simd<T, N>
        where
            LaneCount<N>: SupportedShape<T::Width>,
        {
            #[inline(always)]
            fn $assign_method(&mut self, rhs: T) {
                *self = $op::$method(*self, rhs);
            }
        }
    };
}

impl_binary_op!(Element, Add, add, AddAssign, add_assign, lane_add);
impl_binary_op!(Element, Sub, sub, SubAssign, sub_assign, lane_sub);
impl_binary_op!(Element, Mul, mul, MulAssign, mul_assign, lane_mul);
impl_binary_op!(Element, Div, div, DivAssign, div_assign, lane_div);
impl_binary_op!(Element, BitAnd, bitand, BitAndAssign, bitand_assign, lane_and);
impl_binary_op!(Element, BitOr, bitor, BitOrAssign, bitor_assign, lane_or);
impl_binary_op!(Element, BitXor, bitxor, BitXorAssign, bitxor_assign, lane_xor);
impl_binary_op!(Integer, Rem, rem, RemAssign, rem_assign, lane_rem);
impl_binary_op!(Integer, Shl, shl, ShlAssign, shl_assign, lane_shl);
impl_binary_op!(Integer, Shr, shr, ShrAssign, shr_assign, lane_shr);

impl<T: Element, const N: usize> Neg for Simd<T, N>
where
    LaneCount<N>: SupportedShape<T::Width>,
{
    type Output = Self;

    #[inline(always)]
    fn neg(self) -> Self {
        self.map(T::lane_neg)
    }
}

impl<T: Integer, const N: usize> Not for Simd<T, N>
where
    LaneCount<N>: SupportedShape<T::Width>,
{
    type Output = Self;

    #[inline(always)]
    fn not(self) -> Self {
        self.map(T::lane_not)
    }
}

// Scalar on the left: `s op v` broadcasts `s` and keeps the operand order.
macro_rules! impl_scalar_lhs {
    ($($t:ty),* $(,)?) => {
        $(
            impl_scalar_lhs!(@op $t, Add, add, lane_add);
            impl_scalar_lhs!(@op $t, Sub, sub, lane_sub);
            impl_scalar_lhs!(@op $t, Mul, mul, lane_mul);
            impl_scalar_lhs!(@op $t, Div, div, lane_div);
        )*
    };
    (@op $t:ty, $op:ident, $method:ident, $lane:ident) => {
        impl<const N: usize> $op<Simd<$t, N>> for $t
        where
            LaneCount<N>: SupportedShape<<$t as Element>::Width>,
        {
            type Output = Simd<$t, N>;

            #[inline(always)]
            fn $method(self, rhs: Simd<$t, N>) -> Simd<$t, N> {
                rhs.map(|lane| self.$lane(lane))
            }
        }
    };
}

impl_scalar_lhs!(i8, i16, i32, i64, i128, u8, u16, u32, u64, u128, f32, f64);

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    mod integral_tests {
        use super::*;

        #[test]
        fn test_division_and_broadcast_multiplication() {
            let v = Simd::<i32, 8>::from_array([1, 2, 3, 4, 5, 6, 7, 8]);
            let ones = Simd::<i32, 8>::splat(1);
            assert_eq!((v / ones).to_array(), [1, 2, 3, 4, 5, 6, 7, 8]);
            assert_eq!((v * 2).to_array(), [2, 4, 6, 8, 10, 12, 14, 16]);
            assert_eq!((2 * v).to_array(), [2, 4, 6, 8, 10, 12, 14, 16]);
        }

        #[test]
        fn test_wrapping_arithmetic() {
            let v = Simd::<u8, 4>::from_array([250, 1, 128, 0]);
            assert_eq!((v + 10).to_array(), [4, 11, 138, 10]);
            assert_eq!((v - 1).to_array(), [249, 0, 127, 255]);
            assert_eq!((-Simd::<i8, 2>::from_array([i8::MIN, 5])).to_array(), [i8::MIN, -5]);
        }

        #[test]
        fn test_bitwise_and_shifts() {
            let v = Simd::<u16, 4>::from_array([0b1100, 0b1010, 0xFFFF, 1]);
            let m = Simd::<u16, 4>::splat(0b0110);
            assert_eq!((v & m).to_array(), [0b0100, 0b0010, 0b0110, 0]);
            assert_eq!((v | m).to_array(), [0b1110, 0b1110, 0xFFFF, 0b0111]);
            assert_eq!((v ^ m).to_array(), [0b1010, 0b1100, 0xFFF9, 0b0111]);
            assert_eq!((!v).to_array(), [!0b1100, !0b1010, 0, 0xFFFE]);
            assert_eq!((v << 1).to_array(), [0b11000, 0b10100, 0xFFFE, 2]);
            assert_eq!((v >> Simd::from_array([2, 1, 8, 17])).to_array(), [0b11, 0b101, 0xFF, 0]);
        }

        #[test]
        fn test_remainder() {
            let v = Simd::<i32, 4>::from_array([7, -7, 9, i32::MIN]);
            assert_eq!((v % 3).to_array(), [1, -1, 0, -2]);
            assert_eq!((v % Simd::from_array([2, 2, 4, -1])).to_array(), [1, -1, 1, 0]);
        }

        #[test]
        #[should_panic]
        fn test_integer_division_by_zero_panics() {
            let v = Simd::<i32, 4>::splat(1);
            let _ = v / Simd::from_array([1, 1, 0, 1]);
        }

        #[test]
        fn test_compound_assignment() {
            let mut v = Simd::<i64, 2>::from_array([5, 6]);
            v += 1;
            v *= Simd::from_array([2, 3]);
            v -= 4;
            v <<= 1;
            v %= 7;
            assert_eq!(v.to_array(), [2, 6]);
        }

        #[test]
        fn test_add_sub_roundtrip_random() {
            let mut rng = StdRng::seed_from_u64(42);
            for _ in 0..256 {
                let u = Simd::<i32, 16>::from_array(core::array::from_fn(|_| rng.random()));
                let v = Simd::<i32, 16>::from_array(core::array::from_fn(|_| rng.random()));
                assert_eq!((u + v) - v, u);
            }
        }
    }

    mod floating_tests {
        use super::*;

        #[test]
        fn test_ieee_arithmetic() {
            let a = Simd::<f32, 4>::from_array([1.0, -2.0, 0.0, f32::INFINITY]);
            let b = Simd::<f32, 4>::from_array([0.5, 4.0, 0.0, 1.0]);
            let quotient = (a / b).to_array();
            assert_eq!(quotient[0], 2.0);
            assert_eq!(quotient[1], -0.5);
            assert!(quotient[2].is_nan());
            assert!(quotient[3].is_infinite());
            assert_eq!((1.0 - a).to_array()[1], 3.0);
            assert_eq!(&(a * 2.0 + b).to_array()[..2], &[2.5, 0.0]);
        }

        #[test]
        fn test_bitwise_on_raw_bits() {
            let v = Simd::<f64, 2>::from_array([-3.5, 2.0]);
            let sign = Simd::<f64, 2>::splat(-0.0);
            assert_eq!((v ^ sign).to_array(), [3.5, -2.0]);
            assert_eq!((v | sign).to_array(), [-3.5, -2.0]);
        }

        #[test]
        fn test_neg_flips_sign_of_zero() {
            let v = -Simd::<f32, 2>::from_array([0.0, -1.0]);
            assert!(v[0].is_sign_negative());
            assert_eq!(v[1], 1.0);
        }

        #[test]
        fn test_add_sub_roundtrip_within_rounding() {
            let mut rng = StdRng::seed_from_u64(7);
            for _ in 0..256 {
                let u = Simd::<f64, 8>::from_array(core::array::from_fn(|_| rng.random_range(-1e3..1e3)));
                let v = Simd::<f64, 8>::from_array(core::array::from_fn(|_| rng.random_range(-1e3..1e3)));
                let back = (u + v) - v;
                for (x, y) in back.iter().zip(u.iter()) {
                    assert!((x - y).abs() <= 1e-9 * (1.0 + y.abs()));
                }
            }
        }
    }
}
