//! Boolean vectors.
//!
//! A `Mask<M, N>` stores one signed integer `M` per lane and every lane is
//! always exactly `0` (false) or `1` (true). Comparison instructions on x86
//! produce all-ones for true while other backends produce `1`; every
//! constructor that accepts raw integer lanes goes through
//! [`Mask::normalize`], so the encoding seen by callers never depends on the
//! host.
//!
//! The saturated encoding is only ever produced by [`Mask::to_hardware`], for
//! code that hands the lanes to a blend or select instruction.

use core::fmt;
use core::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Not};

use crate::error::Result;
use crate::simd::storage::{tree_reduce, LaneCount, SupportedShape};
use crate::simd::traits::{Element, MaskElement};
use crate::simd::vector::Simd;

/// A vector of `N` boolean lanes stored as `M`.
#[repr(transparent)]
pub struct Mask<M: MaskElement, const N: usize>
where
    LaneCount<N>: SupportedShape<M::Width>,
{
    bits: Simd<M, N>,
}

#[inline(always)]
fn encode<M: MaskElement>(value: bool) -> M {
    if value {
        M::TRUE
    } else {
        M::ZERO
    }
}

impl<M: MaskElement, const N: usize> Mask<M, N>
where
    LaneCount<N>: SupportedShape<M::Width>,
{
    /// Number of lanes.
    pub const LANES: usize = N;

    #[inline(always)]
    pub fn splat(value: bool) -> Self {
        Self {
            bits: Simd::splat(encode(value)),
        }
    }

    #[inline(always)]
    pub fn from_array(lanes: [bool; N]) -> Self {
        Self {
            bits: Simd::from_array(lanes.map(encode)),
        }
    }

    /// Builds a mask from raw integer lanes: any non-zero lane is true.
    #[inline(always)]
    pub fn from_raw(raw: Simd<M, N>) -> Self {
        Self {
            bits: Self::normalize(raw),
        }
    }

    /// Re-clamps arbitrary lane bit patterns to `0` or `1`.
    #[inline(always)]
    pub fn normalize(raw: Simd<M, N>) -> Simd<M, N> {
        raw.map(|lane| encode(lane != M::ZERO))
    }

    #[inline(always)]
    pub fn to_array(self) -> [bool; N] {
        self.bits.to_array().map(|lane| lane != M::ZERO)
    }

    /// Lanes as integers, `1` for true and `0` for false.
    #[inline(always)]
    pub fn to_int(self) -> Simd<M, N> {
        self.bits
    }

    /// Lanes in the saturated encoding: all bits set for true.
    #[inline(always)]
    pub fn to_hardware(self) -> Simd<M, N> {
        self.bits.map(M::lane_neg)
    }

    /// Checked lane read.
    #[inline(always)]
    pub fn get(&self, index: usize) -> Result<bool> {
        self.bits.get(index).map(|lane| lane != M::ZERO)
    }

    /// Checked lane write.
    #[inline(always)]
    pub fn set(&mut self, index: usize, value: bool) -> Result<()> {
        self.bits.set(index, encode(value))
    }

    /// Reads a lane without checking the index.
    ///
    /// # Safety
    ///
    /// `index` must be less than `N`.
    #[inline(always)]
    pub unsafe fn get_unchecked(&self, index: usize) -> bool {
        // SAFETY: forwarded from the caller.
        unsafe { self.bits.get_unchecked(index) != M::ZERO }
    }

    /// Writes a lane without checking the index.
    ///
    /// # Safety
    ///
    /// `index` must be less than `N`.
    #[inline(always)]
    pub unsafe fn set_unchecked(&mut self, index: usize, value: bool) {
        // SAFETY: forwarded from the caller.
        unsafe { self.bits.set_unchecked(index, encode(value)) }
    }

    /// Reads a lane, panicking if `index >= N`.
    #[inline(always)]
    pub fn test(&self, index: usize) -> bool {
        self.bits[index] != M::ZERO
    }

    #[inline(always)]
    pub fn iter(&self) -> core::array::IntoIter<bool, N> {
        self.to_array().into_iter()
    }

    /// `true` if at least one lane is set.
    #[inline(always)]
    pub fn any(self) -> bool {
        tree_reduce(self.to_array(), |a, b| a | b)
    }

    /// `true` if every lane is set.
    #[inline(always)]
    pub fn all(self) -> bool {
        tree_reduce(self.to_array(), |a, b| a & b)
    }

    /// `true` if no lane is set.
    #[inline(always)]
    pub fn none(self) -> bool {
        !self.any()
    }

    /// Number of set lanes.
    #[inline(always)]
    pub fn count(self) -> usize {
        self.iter().filter(|&lane| lane).count()
    }

    /// Index of the first set lane.
    #[inline(always)]
    pub fn first_set(self) -> Option<usize> {
        self.iter().position(|lane| lane)
    }

    /// Picks each lane from `if_true` where the mask is set and from
    /// `if_false` elsewhere.
    #[inline(always)]
    pub fn select<T>(self, if_true: Simd<T, N>, if_false: Simd<T, N>) -> Simd<T, N>
    where
        T: Element<Width = M::Width>,
    {
        let lanes = self.to_array();
        let yes = if_true.to_array();
        let no = if_false.to_array();
        Simd::from_array(core::array::from_fn(|i| if lanes[i] { yes[i] } else { no[i] }))
    }

    /// Converts to a mask with a different lane storage width.
    #[inline(always)]
    pub fn cast<M2: MaskElement>(self) -> Mask<M2, N>
    where
        LaneCount<N>: SupportedShape<M2::Width>,
    {
        Mask::from_array(self.to_array())
    }

    #[inline(always)]
    pub fn logical_not(self) -> Self {
        !self
    }

    #[inline(always)]
    pub fn logical_and(self, other: Self) -> Self {
        self & other
    }

    #[inline(always)]
    pub fn logical_or(self, other: Self) -> Self {
        self | other
    }

    #[inline(always)]
    pub fn simd_eq(self, other: Self) -> Self {
        Self {
            bits: self.bits.zip_map(other.bits, |a, b| encode(a == b)),
        }
    }

    #[inline(always)]
    pub fn simd_ne(self, other: Self) -> Self {
        self ^ other
    }
}

impl<M: MaskElement, const N: usize> Clone for Mask<M, N>
where
    LaneCount<N>: SupportedShape<M::Width>,
{
    #[inline(always)]
    fn clone(&self) -> Self {
        *self
    }
}

impl<M: MaskElement, const N: usize> Copy for Mask<M, N> where LaneCount<N>: SupportedShape<M::Width> {}

impl<M: MaskElement, const N: usize> Default for Mask<M, N>
where
    LaneCount<N>: SupportedShape<M::Width>,
{
    #[inline(always)]
    fn default() -> Self {
        Self::splat(false)
    }
}

impl<M: MaskElement, const N: usize> PartialEq for Mask<M, N>
where
    LaneCount<N>: SupportedShape<M::Width>,
{
    #[inline(always)]
    fn eq(&self, other: &Self) -> bool {
        self.bits == other.bits
    }
}

impl<M: MaskElement, const N: usize> Eq for Mask<M, N> where LaneCount<N>: SupportedShape<M::Width> {}

impl<M: MaskElement, const N: usize> fmt::Debug for Mask<M, N>
where
    LaneCount<N>: SupportedShape<M::Width>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Mask").field(&self.to_array()).finish()
    }
}

impl<M: MaskElement, const N: usize> From<[bool; N]> for Mask<M, N>
where
    LaneCount<N>: SupportedShape<M::Width>,
{
    #[inline(always)]
    fn from(lanes: [bool; N]) -> Self {
        Self::from_array(lanes)
    }
}

impl<M: MaskElement, const N: usize> From<Mask<M, N>> for [bool; N]
where
    LaneCount<N>: SupportedShape<M::Width>,
{
    #[inline(always)]
    fn from(mask: Mask<M, N>) -> Self {
        mask.to_array()
    }
}

impl<M: MaskElement, const N: usize> IntoIterator for Mask<M, N>
where
    LaneCount<N>: SupportedShape<M::Width>,
{
    type Item = bool;
    type IntoIter = core::array::IntoIter<bool, N>;

    #[inline(always)]
    fn into_iter(self) -> Self::IntoIter {
        self.to_array().into_iter()
    }
}

// 0/1 lanes are closed under and, or and xor, so the raw bit operations keep
// the encoding.
macro_rules! impl_mask_bitop {
    ($op:ident, $method:ident, $assign:ident, $assign_method:ident) => {
        impl<M: MaskElement, const N: usize> $op for Mask<M, N>
        where
            LaneCount<N>: SupportedShape<M::Width>,
        {
            type Output = Self;

            #[inline(always)]
            fn $method(self, rhs: Self) -> Self {
                Self {
                    bits: $op::$method(self.bits, rhs.bits),
                }
            }
        }

        impl<M: MaskElement, const N: usize> $op<bool> for Mask<M, N>
        where
            LaneCount<N>: SupportedShape<M::Width>,
        {
            type Output = Self;

            #[inline(always)]
            fn $method(self, rhs: bool) -> Self {
                $op::$method(self, Self::splat(rhs))
            }
        }

        impl<M: MaskElement, const N: usize> $assign for Mask<M, N>
        where
            LaneCount<N>: SupportedShape<M::Width>,
        {
            #[inline(always)]
            fn $assign_method(&mut self, rhs: Self) {
                *self = $op::$method(*self, rhs);
            }
        }

        impl<M: MaskElement, const N: usize> $assign<bool> for Mask<M, N>
        where
            LaneCount<N>: SupportedShape<M::Width>,
        {
            #[inline(always)]
            fn $assign_method(&mut self, rhs: bool) {
                *self = $op::$method(*self, rhs);
            }
        }
    };
}

impl_mask_bitop!(BitAnd, bitand, BitAndAssign, bitand_assign);
impl_mask_bitop!(BitOr, bitor, BitOrAssign, bitor_assign);
impl_mask_bitop!(BitXor, bitxor, BitXorAssign, bitxor_assign);

impl<M: MaskElement, const N: usize> Not for Mask<M, N>
where
    LaneCount<N>: SupportedShape<M::Width>,
{
    type Output = Self;

    #[inline(always)]
    fn not(self) -> Self {
        Self {
            bits: self.bits ^ M::TRUE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    mod normalization_tests {
        use super::*;

        #[test]
        fn test_from_raw_normalizes_saturated_lanes() {
            let raw = Simd::<i32, 4>::from_array([-1, 0, 7, i32::MIN]);
            let mask = Mask::from_raw(raw);
            assert_eq!(mask.to_int().to_array(), [1, 0, 1, 1]);
            assert_eq!(mask.to_array(), [true, false, true, true]);
        }

        #[test]
        fn test_to_hardware_is_saturated() {
            let mask = Mask::<i8, 4>::from_array([true, false, false, true]);
            assert_eq!(mask.to_hardware().to_array(), [-1, 0, 0, -1]);
            assert_eq!(Mask::from_raw(mask.to_hardware()), mask);
        }

        #[test]
        fn test_normalize_is_idempotent() {
            let raw = Simd::<i64, 2>::from_array([42, 0]);
            let once = Mask::<i64, 2>::normalize(raw);
            assert_eq!(Mask::<i64, 2>::normalize(once), once);
            assert_eq!(once.to_array(), [1, 0]);
        }

        #[test]
        fn test_not_keeps_zero_one_encoding() {
            let mask = !Mask::<i16, 2>::from_array([true, false]);
            assert_eq!(mask.to_int().to_array(), [0, 1]);
        }
    }

    mod reduction_tests {
        use super::*;

        fn check_reductions<const N: usize>(rng: &mut StdRng)
        where
            LaneCount<N>: SupportedShape<crate::simd::storage::W4>,
        {
            for _ in 0..64 {
                let density: f64 = rng.random();
                let lanes: [bool; N] = core::array::from_fn(|_| rng.random_bool(density));
                let mask = Mask::<i32, N>::from_array(lanes);

                let or = lanes.iter().fold(false, |acc, &lane| acc || lane);
                let and = lanes.iter().fold(true, |acc, &lane| acc && lane);
                assert_eq!(mask.any(), or, "any_of over {} lanes", N);
                assert_eq!(mask.all(), and, "all_of over {} lanes", N);
                assert_eq!(mask.none(), !or, "none_of over {} lanes", N);
                assert_eq!(mask.count(), lanes.iter().filter(|&&lane| lane).count());
            }
            assert!(Mask::<i32, N>::splat(true).all());
            assert!(Mask::<i32, N>::splat(false).none());
        }

        #[test]
        fn test_reductions_agree_with_fold_for_every_lane_count() {
            let mut rng = StdRng::seed_from_u64(42);
            check_reductions::<1>(&mut rng);
            check_reductions::<2>(&mut rng);
            check_reductions::<4>(&mut rng);
            check_reductions::<8>(&mut rng);
            check_reductions::<16>(&mut rng);
            check_reductions::<32>(&mut rng);
            check_reductions::<64>(&mut rng);
        }

        #[test]
        fn test_first_set() {
            let mask = Mask::<i8, 8>::from_array([false, false, true, false, true, false, false, false]);
            assert_eq!(mask.first_set(), Some(2));
            assert_eq!(Mask::<i8, 8>::splat(false).first_set(), None);
        }
    }

    mod operator_tests {
        use super::*;

        #[test]
        fn test_bitwise_ops() {
            let a = Mask::<i32, 4>::from_array([true, true, false, false]);
            let b = Mask::<i32, 4>::from_array([true, false, true, false]);
            assert_eq!((a & b).to_array(), [true, false, false, false]);
            assert_eq!((a | b).to_array(), [true, true, true, false]);
            assert_eq!((a ^ b).to_array(), [false, true, true, false]);
            assert_eq!(a.simd_eq(b).to_array(), [true, false, false, true]);
            assert_eq!(a.simd_ne(b), a ^ b);
            assert_eq!(a & true, a);
            assert_eq!(a | true, Mask::splat(true));

            let mut c = a;
            c ^= b;
            c |= false;
            assert_eq!(c, a ^ b);
        }

        #[test]
        fn test_checked_access() {
            let mut mask = Mask::<i64, 2>::default();
            mask.set(1, true).unwrap();
            assert_eq!(mask.get(1), Ok(true));
            assert!(mask.get(2).is_err());
            assert!(mask.set(5, true).is_err());
            assert!(mask.test(1));
            unsafe {
                mask.set_unchecked(0, true);
                assert!(mask.get_unchecked(0));
            }
        }

        #[test]
        fn test_select_and_cast() {
            let mask = Mask::<i32, 4>::from_array([true, false, true, false]);
            let a = Simd::<f32, 4>::splat(1.0);
            let b = Simd::<f32, 4>::splat(-1.0);
            assert_eq!(mask.select(a, b).to_array(), [1.0, -1.0, 1.0, -1.0]);

            let wide: Mask<i64, 4> = mask.cast();
            assert_eq!(wide.to_array(), mask.to_array());
            assert_eq!(wide.to_int().to_array(), [1, 0, 1, 0]);
        }
    }
}
