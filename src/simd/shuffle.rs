//! Lane permutations.
//!
//! Two flavours:
//!
//! - Compile-time: a [`Swizzle`] implementation carries a constant index
//!   array. Indices are checked when the swizzle is instantiated, so an
//!   out-of-range index is a build error. [`simd_swizzle!`](crate::simd_swizzle)
//!   writes the implementation for you.
//! - Runtime: [`Simd::shuffle`] and [`Simd::shuffle2`] take an integer index
//!   vector and report bad indices as
//!   [`VectorError::ShuffleIndex`]. The `_unchecked` variants skip the check.
//!
//! With two sources, indices `0..N` select from the first vector and `N..2N`
//! from the second.
//!
//! ```
//! use lanewise::simd::Simd;
//! use lanewise::simd_swizzle;
//!
//! let a = Simd::<i32, 4>::from_array([10, 11, 12, 13]);
//! let b = Simd::<i32, 4>::from_array([20, 21, 22, 23]);
//!
//! let pairs: Simd<i32, 2> = simd_swizzle!(a, [3, 0]);
//! assert_eq!(pairs.to_array(), [13, 10]);
//!
//! let interleaved: Simd<i32, 4> = simd_swizzle!(a, b, [0, 4, 1, 5]);
//! assert_eq!(interleaved.to_array(), [10, 20, 11, 21]);
//! ```

use num::traits::AsPrimitive;
use num::ToPrimitive;

use crate::error::{Result, VectorError};
use crate::simd::storage::{LaneCount, SupportedShape};
use crate::simd::traits::{Element, Integer};
use crate::simd::vector::Simd;

/// A constant lane permutation producing `M` lanes.
pub trait Swizzle<const M: usize> {
    /// Source lane for each output lane.
    const INDEX: [usize; M];

    /// Picks lanes of `vector`. Every index must be below `N`.
    #[inline(always)]
    fn swizzle<T: Element, const N: usize>(vector: Simd<T, N>) -> Simd<T, M>
    where
        LaneCount<N>: SupportedShape<T::Width>,
        LaneCount<M>: SupportedShape<T::Width>,
    {
        const {
            let mut i = 0;
            while i < M {
                assert!(Self::INDEX[i] < N, "swizzle index out of range");
                i += 1;
            }
        };

        let lanes = vector.to_array();
        Simd::from_array(core::array::from_fn(|i| lanes[Self::INDEX[i]]))
    }

    /// Picks lanes of `first` (indices below `N`) and `second` (indices
    /// `N..2N`).
    #[inline(always)]
    fn swizzle2<T: Element, const N: usize>(first: Simd<T, N>, second: Simd<T, N>) -> Simd<T, M>
    where
        LaneCount<N>: SupportedShape<T::Width>,
        LaneCount<M>: SupportedShape<T::Width>,
    {
        const {
            let mut i = 0;
            while i < M {
                assert!(Self::INDEX[i] < 2 * N, "swizzle index out of range");
                i += 1;
            }
        };

        let first = first.to_array();
        let second = second.to_array();
        Simd::from_array(core::array::from_fn(|i| {
            let index = Self::INDEX[i];
            if index < N {
                first[index]
            } else {
                second[index - N]
            }
        }))
    }
}

/// Builds a swizzle from literal indices.
///
/// `simd_swizzle!(v, [i0, i1, ...])` picks lanes of one vector,
/// `simd_swizzle!(a, b, [i0, i1, ...])` picks from the concatenation of two.
/// The output lane count is the number of indices.
#[macro_export]
macro_rules! simd_swizzle {
    ($vector:expr, [$($index:expr),* $(,)?] $(,)?) => {{
        use $crate::simd::Swizzle;

        struct Impl;

        impl Swizzle<{ let index: &[usize] = &[$($index),*]; index.len() }> for Impl {
            const INDEX: [usize; { let index: &[usize] = &[$($index),*]; index.len() }] = [$($index),*];
        }

        Impl::swizzle($vector)
    }};
    ($first:expr, $second:expr, [$($index:expr),* $(,)?] $(,)?) => {{
        use $crate::simd::Swizzle;

        struct Impl;

        impl Swizzle<{ let index: &[usize] = &[$($index),*]; index.len() }> for Impl {
            const INDEX: [usize; { let index: &[usize] = &[$($index),*]; index.len() }] = [$($index),*];
        }

        Impl::swizzle2($first, $second)
    }};
}

impl<T: Element, const N: usize> Simd<T, N>
where
    LaneCount<N>: SupportedShape<T::Width>,
{
    /// Lane `i` of the result is lane `indices[i]` of `self`.
    ///
    /// # Errors
    ///
    /// Returns [`VectorError::ShuffleIndex`] for the first index outside
    /// `0..N`. Negative indices are out of range.
    pub fn shuffle<I>(self, indices: Simd<I, N>) -> Result<Self>
    where
        I: Integer + AsPrimitive<usize>,
        LaneCount<N>: SupportedShape<I::Width>,
    {
        check_indices(&indices, N)?;
        // SAFETY: every index was checked against N
        Ok(unsafe { self.shuffle_unchecked(indices) })
    }

    /// Like [`Self::shuffle`], selecting from `self` for indices below `N`
    /// and from `other` for indices in `N..2N`.
    ///
    /// # Errors
    ///
    /// Returns [`VectorError::ShuffleIndex`] for the first index outside
    /// `0..2N`.
    pub fn shuffle2<I>(self, other: Self, indices: Simd<I, N>) -> Result<Self>
    where
        I: Integer + AsPrimitive<usize>,
        LaneCount<N>: SupportedShape<I::Width>,
    {
        check_indices(&indices, 2 * N)?;
        // SAFETY: every index was checked against 2N
        Ok(unsafe { self.shuffle2_unchecked(other, indices) })
    }

    /// Runtime shuffle without index checks.
    ///
    /// # Safety
    ///
    /// Every lane of `indices` must be in `0..N`.
    #[inline(always)]
    pub unsafe fn shuffle_unchecked<I>(self, indices: Simd<I, N>) -> Self
    where
        I: Integer + AsPrimitive<usize>,
        LaneCount<N>: SupportedShape<I::Width>,
    {
        let lanes = self.to_array();
        let indices = indices.to_array();
        // SAFETY: the caller guarantees every index is below N
        Self::from_array(core::array::from_fn(|i| unsafe { *lanes.get_unchecked(indices[i].as_()) }))
    }

    /// Two-source runtime shuffle without index checks.
    ///
    /// # Safety
    ///
    /// Every lane of `indices` must be in `0..2N`.
    #[inline(always)]
    pub unsafe fn shuffle2_unchecked<I>(self, other: Self, indices: Simd<I, N>) -> Self
    where
        I: Integer + AsPrimitive<usize>,
        LaneCount<N>: SupportedShape<I::Width>,
    {
        let first = self.to_array();
        let second = other.to_array();
        let indices = indices.to_array();
        Self::from_array(core::array::from_fn(|i| {
            let index: usize = indices[i].as_();
            // SAFETY: the caller guarantees index < 2N, so each branch stays below N
            unsafe {
                if index < N {
                    *first.get_unchecked(index)
                } else {
                    *second.get_unchecked(index - N)
                }
            }
        }))
    }

    /// Lanes in reverse order.
    #[inline(always)]
    pub fn reverse(self) -> Self {
        let lanes = self.to_array();
        Self::from_array(core::array::from_fn(|i| lanes[N - 1 - i]))
    }

    /// Moves every lane `n` positions towards index zero, wrapping around.
    #[inline(always)]
    pub fn rotate_lanes_left(self, n: usize) -> Self {
        let mut lanes = self.to_array();
        lanes.rotate_left(n % N);
        Self::from_array(lanes)
    }

    /// Moves every lane `n` positions away from index zero, wrapping around.
    #[inline(always)]
    pub fn rotate_lanes_right(self, n: usize) -> Self {
        let mut lanes = self.to_array();
        lanes.rotate_right(n % N);
        Self::from_array(lanes)
    }
}

fn check_indices<I, const N: usize>(indices: &Simd<I, N>, limit: usize) -> Result<()>
where
    I: Integer,
    LaneCount<N>: SupportedShape<I::Width>,
{
    for (position, lane) in indices.iter().enumerate() {
        // negative or wider than usize reports as usize::MAX
        match lane.to_usize() {
            Some(index) if index < limit => {}
            index => {
                return Err(VectorError::ShuffleIndex {
                    position,
                    index: index.unwrap_or(usize::MAX),
                    limit,
                })
            }
        }
    }
    Ok(())
}
