//! Lanewise comparisons, logical operators and horizontal reductions.
//!
//! Comparisons return a [`Mask`] whose lane storage has the same width as the
//! compared elements, so a comparison of `Simd<f32, 4>` yields `Mask<i32, 4>`.
//! Floating-point comparisons follow IEEE 754 per lane: any comparison with a
//! NaN lane is false except `simd_ne`.

use crate::simd::mask::Mask;
use crate::simd::storage::{tree_reduce, LaneCount, SupportedShape, Width};
use crate::simd::traits::{Element, Integer};
use crate::simd::vector::Simd;

/// The mask type produced by comparing two `Simd<T, N>`.
pub type MaskFor<T, const N: usize> = Mask<<<T as Element>::Width as Width>::Mask, N>;

impl<T: Element, const N: usize> Simd<T, N>
where
    LaneCount<N>: SupportedShape<T::Width>,
{
    #[inline(always)]
    fn compare(self, other: Self, predicate: impl Fn(T, T) -> bool) -> MaskFor<T, N> {
        let lhs = self.to_array();
        let rhs = other.to_array();
        Mask::from_array(core::array::from_fn(|i| predicate(lhs[i], rhs[i])))
    }

    #[inline(always)]
    pub fn simd_eq(self, other: Self) -> MaskFor<T, N> {
        self.compare(other, |a, b| a == b)
    }

    #[inline(always)]
    pub fn simd_ne(self, other: Self) -> MaskFor<T, N> {
        self.compare(other, |a, b| a != b)
    }

    #[inline(always)]
    pub fn simd_lt(self, other: Self) -> MaskFor<T, N> {
        self.compare(other, |a, b| a < b)
    }

    #[inline(always)]
    pub fn simd_le(self, other: Self) -> MaskFor<T, N> {
        self.compare(other, |a, b| a <= b)
    }

    #[inline(always)]
    pub fn simd_gt(self, other: Self) -> MaskFor<T, N> {
        self.compare(other, |a, b| a > b)
    }

    #[inline(always)]
    pub fn simd_ge(self, other: Self) -> MaskFor<T, N> {
        self.compare(other, |a, b| a >= b)
    }

    /// Lanes that are zero.
    #[inline(always)]
    pub fn logical_not(self) -> MaskFor<T, N> {
        Mask::from_array(self.to_array().map(|lane| !lane.is_truthy()))
    }

    /// Lanes where both operands are non-zero. Both sides are always evaluated.
    #[inline(always)]
    pub fn logical_and(self, other: Self) -> MaskFor<T, N> {
        self.compare(other, |a, b| a.is_truthy() & b.is_truthy())
    }

    /// Lanes where either operand is non-zero. Both sides are always evaluated.
    #[inline(always)]
    pub fn logical_or(self, other: Self) -> MaskFor<T, N> {
        self.compare(other, |a, b| a.is_truthy() | b.is_truthy())
    }

    /// Lanes that are non-zero.
    #[inline(always)]
    pub fn truthy(self) -> MaskFor<T, N> {
        Mask::from_array(self.to_array().map(T::is_truthy))
    }

    /// Sum of all lanes. Integers wrap; floats are added pairwise.
    #[inline(always)]
    pub fn reduce_sum(self) -> T {
        tree_reduce(self.to_array(), T::lane_add)
    }

    /// Product of all lanes. Integers wrap.
    #[inline(always)]
    pub fn reduce_product(self) -> T {
        tree_reduce(self.to_array(), T::lane_mul)
    }

    /// Smallest lane. For floats a NaN lane is skipped unless every lane is NaN.
    #[inline(always)]
    pub fn reduce_min(self) -> T {
        tree_reduce(self.to_array(), T::lane_min)
    }

    /// Largest lane. For floats a NaN lane is skipped unless every lane is NaN.
    #[inline(always)]
    pub fn reduce_max(self) -> T {
        tree_reduce(self.to_array(), T::lane_max)
    }
}

impl<T: Integer, const N: usize> Simd<T, N>
where
    LaneCount<N>: SupportedShape<T::Width>,
{
    #[inline(always)]
    pub fn reduce_and(self) -> T {
        tree_reduce(self.to_array(), T::lane_and)
    }

    #[inline(always)]
    pub fn reduce_or(self) -> T {
        tree_reduce(self.to_array(), T::lane_or)
    }

    #[inline(always)]
    pub fn reduce_xor(self) -> T {
        tree_reduce(self.to_array(), T::lane_xor)
    }
}
