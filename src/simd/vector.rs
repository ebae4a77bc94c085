//! The integral and floating-point vector type.
//!
//! `Simd<T, N>` is a value of `N` lanes of element `T`, stored in the shape's
//! [`Storage`] so that its size and alignment both equal `N * size_of::<T>()`.
//! It is `Copy` and owns no heap memory.
//!
//! # Lane access
//!
//! Lanes are read by copy and written through explicit setters:
//!
//! - [`Simd::get`] / [`Simd::set`] check the index and return
//!   [`VectorError::LaneOutOfRange`](crate::error::VectorError::LaneOutOfRange).
//! - [`Simd::get_unchecked`] / [`Simd::set_unchecked`] skip the check and are
//!   `unsafe`.
//! - `Index`/`IndexMut` panic on a bad index, like slices.
//! - [`Simd::iter`] yields copies, [`Simd::iter_mut`] yields `&mut T` into the
//!   vector's own lanes.
//!
//! # Mapping
//!
//! Every operator is expressed through [`Simd::map`] (unary) or
//! [`Simd::zip_map`] (binary), which apply a scalar function index by index.

use core::fmt;
use core::ops::{Index, IndexMut};

use crate::error::{lane_error, length_error, Result};
use crate::simd::storage::{native_registers, LaneCount, Storage, SupportedShape};
use crate::simd::traits::{Element, Integer};

/// A vector of `N` lanes of `T`.
#[repr(transparent)]
pub struct Simd<T: Element, const N: usize>
where
    LaneCount<N>: SupportedShape<T::Width>,
{
    storage: Storage<T, N>,
}

impl<T: Element, const N: usize> Simd<T, N>
where
    LaneCount<N>: SupportedShape<T::Width>,
{
    /// Number of lanes.
    pub const LANES: usize = N;
    /// Size of the vector in bytes.
    pub const BYTES: usize = Storage::<T, N>::BYTES;
    /// Required alignment in bytes (equal to [`Self::BYTES`]).
    pub const ALIGN: usize = Storage::<T, N>::ALIGN;

    /// Builds a vector with every lane set to `value`.
    #[inline(always)]
    pub const fn splat(value: T) -> Self {
        Self::from_array([value; N])
    }

    #[inline(always)]
    pub const fn from_array(lanes: [T; N]) -> Self {
        Self {
            storage: Storage::new(lanes),
        }
    }

    #[inline(always)]
    pub fn to_array(self) -> [T; N] {
        self.storage.into_lanes()
    }

    #[inline(always)]
    pub const fn as_array(&self) -> &[T; N] {
        self.storage.lanes()
    }

    #[inline(always)]
    pub fn as_mut_array(&mut self) -> &mut [T; N] {
        self.storage.lanes_mut()
    }

    /// Loads the first `N` elements of `slice`.
    ///
    /// # Errors
    ///
    /// Returns [`VectorError::ByteLength`](crate::error::VectorError::ByteLength)
    /// if the slice holds fewer than `N` elements.
    #[inline(always)]
    pub fn from_slice(slice: &[T]) -> Result<Self> {
        match slice.get(..N) {
            Some(head) => {
                let mut lanes = [T::ZERO; N];
                lanes.copy_from_slice(head);
                Ok(Self::from_array(lanes))
            }
            None => Err(length_error(N, slice.len())),
        }
    }

    /// Loads up to `N` elements of `slice`, filling missing lanes with zero.
    #[inline(always)]
    pub fn from_slice_partial(slice: &[T]) -> Self {
        let count = slice.len().min(N);
        let mut lanes = [T::ZERO; N];
        lanes[..count].copy_from_slice(&slice[..count]);
        Self::from_array(lanes)
    }

    /// Stores all lanes into the first `N` elements of `slice`.
    ///
    /// # Errors
    ///
    /// Returns [`VectorError::ByteLength`](crate::error::VectorError::ByteLength)
    /// if the slice is shorter than `N`.
    #[inline(always)]
    pub fn write_to_slice(&self, slice: &mut [T]) -> Result<()> {
        let found = slice.len();
        match slice.get_mut(..N) {
            Some(head) => {
                head.copy_from_slice(self.as_array());
                Ok(())
            }
            None => Err(length_error(N, found)),
        }
    }

    /// Checked lane read.
    #[inline(always)]
    pub fn get(&self, index: usize) -> Result<T> {
        self.as_array()
            .get(index)
            .copied()
            .ok_or_else(|| lane_error(index, N))
    }

    /// Checked lane write.
    #[inline(always)]
    pub fn set(&mut self, index: usize, value: T) -> Result<()> {
        match self.as_mut_array().get_mut(index) {
            Some(lane) => {
                *lane = value;
                Ok(())
            }
            None => Err(lane_error(index, N)),
        }
    }

    /// Reads a lane without checking the index.
    ///
    /// # Safety
    ///
    /// `index` must be less than `N`.
    #[inline(always)]
    pub unsafe fn get_unchecked(&self, index: usize) -> T {
        // SAFETY: the caller guarantees index < N.
        unsafe { *self.as_array().get_unchecked(index) }
    }

    /// Writes a lane without checking the index.
    ///
    /// # Safety
    ///
    /// `index` must be less than `N`.
    #[inline(always)]
    pub unsafe fn set_unchecked(&mut self, index: usize, value: T) {
        // SAFETY: the caller guarantees index < N.
        unsafe { *self.as_mut_array().get_unchecked_mut(index) = value }
    }

    /// Iterates over copies of the lanes.
    #[inline(always)]
    pub fn iter(&self) -> core::array::IntoIter<T, N> {
        self.to_array().into_iter()
    }

    #[inline(always)]
    pub fn iter_mut(&mut self) -> core::slice::IterMut<'_, T> {
        self.as_mut_array().iter_mut()
    }

    /// Applies `f` to every lane.
    #[inline(always)]
    pub fn map(self, mut f: impl FnMut(T) -> T) -> Self {
        let lanes = self.to_array();
        Self::from_array(core::array::from_fn(|i| f(lanes[i])))
    }

    /// Applies `f` to every pair of lanes with the same index.
    #[inline(always)]
    pub fn zip_map(self, other: Self, mut f: impl FnMut(T, T) -> T) -> Self {
        let lhs = self.to_array();
        let rhs = other.to_array();
        Self::from_array(core::array::from_fn(|i| f(lhs[i], rhs[i])))
    }

    /// Adds one to every lane in place and returns the new value.
    #[inline(always)]
    pub fn increment(&mut self) -> Self {
        *self = self.map(|lane| lane.lane_add(T::ONE));
        *self
    }

    /// Subtracts one from every lane in place and returns the new value.
    #[inline(always)]
    pub fn decrement(&mut self) -> Self {
        *self = self.map(|lane| lane.lane_sub(T::ONE));
        *self
    }

    /// Number of native registers of the build host this shape spans.
    ///
    /// Zero when the host has no known vector unit.
    #[inline(always)]
    pub const fn native_registers() -> usize {
        native_registers(Self::BYTES)
    }

    /// Returns `true` if `ptr` satisfies the shape's alignment.
    #[inline(always)]
    pub fn is_aligned(ptr: *const u8) -> bool {
        (ptr as usize) % Self::ALIGN == 0
    }
}

impl<T: Element, const N: usize> Clone for Simd<T, N>
where
    LaneCount<N>: SupportedShape<T::Width>,
{
    #[inline(always)]
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: Element, const N: usize> Copy for Simd<T, N> where LaneCount<N>: SupportedShape<T::Width> {}

impl<T: Element, const N: usize> Default for Simd<T, N>
where
    LaneCount<N>: SupportedShape<T::Width>,
{
    #[inline(always)]
    fn default() -> Self {
        Self::splat(T::ZERO)
    }
}

impl<T: Element, const N: usize> fmt::Debug for Simd<T, N>
where
    LaneCount<N>: SupportedShape<T::Width>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Simd").field(self.as_array()).finish()
    }
}

/// Two vectors are equal when every lane is equal.
impl<T: Element, const N: usize> PartialEq for Simd<T, N>
where
    LaneCount<N>: SupportedShape<T::Width>,
{
    #[inline(always)]
    fn eq(&self, other: &Self) -> bool {
        self.as_array() == other.as_array()
    }
}

impl<T: Integer, const N: usize> Eq for Simd<T, N> where LaneCount<N>: SupportedShape<T::Width> {}

impl<T: Element, const N: usize> From<[T; N]> for Simd<T, N>
where
    LaneCount<N>: SupportedShape<T::Width>,
{
    #[inline(always)]
    fn from(lanes: [T; N]) -> Self {
        Self::from_array(lanes)
    }
}

impl<T: Element, const N: usize> From<Simd<T, N>> for [T; N]
where
    LaneCount<N>: SupportedShape<T::Width>,
{
    #[inline(always)]
    fn from(vector: Simd<T, N>) -> Self {
        vector.to_array()
    }
}

impl<T: Element, const N: usize> Index<usize> for Simd<T, N>
where
    LaneCount<N>: SupportedShape<T::Width>,
{
    type Output = T;

    #[inline(always)]
    fn index(&self, index: usize) -> &T {
        &self.as_array()[index]
    }
}

impl<T: Element, const N: usize> IndexMut<usize> for Simd<T, N>
where
    LaneCount<N>: SupportedShape<T::Width>,
{
    #[inline(always)]
    fn index_mut(&mut self, index: usize) -> &mut T {
        &mut self.as_mut_array()[index]
    }
}

impl<T: Element, const N: usize> AsRef<[T]> for Simd<T, N>
where
    LaneCount<N>: SupportedShape<T::Width>,
{
    #[inline(always)]
    fn as_ref(&self) -> &[T] {
        self.as_array()
    }
}

impl<T: Element, const N: usize> AsMut<[T]> for Simd<T, N>
where
    LaneCount<N>: SupportedShape<T::Width>,
{
    #[inline(always)]
    fn as_mut(&mut self) -> &mut [T] {
        self.as_mut_array()
    }
}

impl<T: Element, const N: usize> IntoIterator for Simd<T, N>
where
    LaneCount<N>: SupportedShape<T::Width>,
{
    type Item = T;
    type IntoIter = core::array::IntoIter<T, N>;

    #[inline(always)]
    fn into_iter(self) -> Self::IntoIter {
        self.to_array().into_iter()
    }
}

impl<'a, T: Element, const N: usize> IntoIterator for &'a Simd<T, N>
where
    LaneCount<N>: SupportedShape<T::Width>,
{
    type Item = &'a T;
    type IntoIter = core::slice::Iter<'a, T>;

    #[inline(always)]
    fn into_iter(self) -> Self::IntoIter {
        self.as_array().iter()
    }
}

impl<'a, T: Element, const N: usize> IntoIterator for &'a mut Simd<T, N>
where
    LaneCount<N>: SupportedShape<T::Width>,
{
    type Item = &'a mut T;
    type IntoIter = core::slice::IterMut<'a, T>;

    #[inline(always)]
    fn into_iter(self) -> Self::IntoIter {
        self.as_mut_array().iter_mut()
    }
}
