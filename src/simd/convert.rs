//! Value conversion and bit reinterpretation.
//!
//! The two are never mixed up:
//!
//! - [`Simd::cast`] keeps the lane count and converts every lane numerically
//!   with Rust `as` semantics (float to integer saturates, NaN becomes zero).
//! - [`Simd::bitcast`] keeps the byte size and reinterprets the bits, so
//!   `Simd<u32, 4>` can be viewed as `Simd<u64, 2>` or `Simd<u8, 16>`. A
//!   bitcast between shapes of different byte size does not compile.
//!
//! Byte views go through `zerocopy`, so no conversion in this module needs
//! `unsafe`.

use num::traits::AsPrimitive;
use zerocopy::{FromBytes, IntoBytes};

use crate::error::{length_error, Result, VectorError};
use crate::simd::storage::{LaneCount, SupportedShape};
use crate::simd::traits::Element;
use crate::simd::vector::Simd;

impl<T: Element, const N: usize> Simd<T, N>
where
    LaneCount<N>: SupportedShape<T::Width>,
{
    /// Converts every lane to `U` as the scalar `as` operator would.
    #[inline(always)]
    pub fn cast<U: Element>(self) -> Simd<U, N>
    where
        T: AsPrimitive<U>,
        LaneCount<N>: SupportedShape<U::Width>,
    {
        Simd::from_array(self.to_array().map(|lane| lane.as_()))
    }

    /// Reinterprets the bits as a vector of `M` lanes of `U`.
    ///
    /// `N * size_of::<T>()` must equal `M * size_of::<U>()`; anything else
    /// fails to compile.
    #[inline(always)]
    pub fn bitcast<U: Element, const M: usize>(self) -> Simd<U, M>
    where
        LaneCount<M>: SupportedShape<U::Width>,
    {
        const {
            assert!(
                N * core::mem::size_of::<T>() == M * core::mem::size_of::<U>(),
                "bitcast requires shapes of equal byte size"
            )
        };

        match <[U; M]>::read_from_bytes(self.as_bytes()) {
            Ok(lanes) => Simd::from_array(lanes),
            // the const assertion above makes the byte lengths equal
            Err(_) => unreachable!("byte sizes are checked at compile time"),
        }
    }

    /// The lanes as raw bytes in memory order.
    #[inline(always)]
    pub fn as_bytes(&self) -> &[u8] {
        self.as_array().as_bytes()
    }

    /// Loads a vector from the first `BYTES` bytes of `bytes`, at any alignment.
    ///
    /// # Errors
    ///
    /// Returns [`VectorError::ByteLength`] if fewer than `BYTES` bytes are given.
    #[inline(always)]
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        match <[T; N]>::read_from_prefix(bytes) {
            Ok((lanes, _)) => Ok(Self::from_array(lanes)),
            Err(_) => Err(length_error(Self::BYTES, bytes.len())),
        }
    }

    /// Loads a vector from `bytes`, which must start at an address aligned to
    /// the shape.
    ///
    /// # Errors
    ///
    /// - [`VectorError::ByteLength`] if fewer than `BYTES` bytes are given.
    /// - [`VectorError::Misaligned`] if `bytes` does not start on a multiple
    ///   of `ALIGN`.
    #[inline(always)]
    pub fn from_bytes_aligned(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < Self::BYTES {
            return Err(length_error(Self::BYTES, bytes.len()));
        }
        if !Self::is_aligned(bytes.as_ptr()) {
            return Err(VectorError::Misaligned {
                address: bytes.as_ptr() as usize,
                alignment: Self::ALIGN,
            });
        }
        Self::from_bytes(bytes)
    }

    /// Stores the lanes into the first `BYTES` bytes of `out`.
    ///
    /// # Errors
    ///
    /// Returns [`VectorError::ByteLength`] if `out` is too short.
    #[inline(always)]
    pub fn write_to_bytes(&self, out: &mut [u8]) -> Result<()> {
        let found = out.len();
        self.as_array()
            .write_to_prefix(out)
            .map_err(|_| length_error(Self::BYTES, found))
    }
}
