//! Heap buffers of vector values.
//!
//! `Vec<Simd<T, N>>` only guarantees the alignment the global allocator gives
//! the element type, and cannot report allocation failure. [`VectorBuf`]
//! allocates through an [`AlignedAllocator`], so every element sits on its
//! shape alignment and a failed allocation comes back as an error.
//!
//! A `VectorBuf` dereferences to a slice, so indexing, `iter`, `iter_mut`,
//! `chunks` and every other slice method are available directly.

use std::alloc::Layout;
use std::fmt;
use std::ops::{Deref, DerefMut};
use std::ptr::NonNull;

use crate::error::{layout_error, Result};
use crate::simd::storage::{LaneCount, SupportedShape};
use crate::simd::traits::Element;
use crate::simd::vector::Simd;
use crate::utils::{AlignedAllocator, Global, RawAlloc};

/// Fixed-length, heap-allocated run of vector values.
pub struct VectorBuf<V: Copy, A: RawAlloc = Global> {
    ptr: NonNull<V>,
    len: usize,
    layout: Layout,
    allocator: AlignedAllocator<A>,
}

// SAFETY: the buffer owns its elements; sharing follows V and the backend
unsafe impl<V: Copy + Send, A: RawAlloc + Send> Send for VectorBuf<V, A> {}
unsafe impl<V: Copy + Sync, A: RawAlloc + Sync> Sync for VectorBuf<V, A> {}

impl<V: Copy> VectorBuf<V, Global> {
    /// `len` copies of `V::default()`.
    pub fn new(len: usize) -> Result<Self>
    where
        V: Default,
    {
        Self::new_in(len, AlignedAllocator::new())
    }

    /// Buffer whose element `i` is `f(i)`.
    pub fn from_fn(len: usize, f: impl FnMut(usize) -> V) -> Result<Self> {
        Self::from_fn_in(len, AlignedAllocator::new(), f)
    }
}

/// Frees a block whose elements are still being written if the writer panics.
struct FreeOnUnwind<'a, A: RawAlloc> {
    ptr: NonNull<u8>,
    layout: Layout,
    allocator: &'a AlignedAllocator<A>,
}

impl<A: RawAlloc> Drop for FreeOnUnwind<'_, A> {
    fn drop(&mut self) {
        // SAFETY: the block came from `allocate_layout(self.layout)` and is not yet owned by a buffer
        unsafe { self.allocator.deallocate_layout(self.ptr, self.layout) };
    }
}

impl<V: Copy, A: RawAlloc> VectorBuf<V, A> {
    /// `len` copies of `V::default()`, allocated by `allocator`.
    ///
    /// # Arguments
    ///
    /// * `len` - Number of vector values in the buffer
    /// * `allocator` - Allocator that owns the block and frees it on drop
    ///
    /// # Errors
    ///
    /// Same as [`Self::from_fn_in`].
    ///
    /// # Panics
    ///
    /// Does not panic. Allocation failure is returned as an error.
    pub fn new_in(len: usize, allocator: AlignedAllocator<A>) -> Result<Self>
    where
        V: Default,
    {
        Self::from_fn_in(len, allocator, |_| V::default())
    }

    /// Copies `values` into a new buffer.
    pub fn from_slice_in(values: &[V], allocator: AlignedAllocator<A>) -> Result<Self> {
        Self::from_fn_in(values.len(), allocator, |i| values[i])
    }

    /// Buffer whose element `i` is `f(i)`, allocated by `allocator`.
    ///
    /// If `f` panics the block is freed before the panic propagates.
    ///
    /// # Errors
    ///
    /// - [`VectorError::LayoutError`](crate::error::VectorError::LayoutError)
    ///   if `len` elements overflow `isize`.
    /// - [`VectorError::AllocationError`](crate::error::VectorError::AllocationError)
    ///   if the allocator fails.
    pub fn from_fn_in(len: usize, allocator: AlignedAllocator<A>, mut f: impl FnMut(usize) -> V) -> Result<Self> {
        let element = Layout::new::<V>();
        let layout = Layout::array::<V>(len)
            .map_err(|_| layout_error(len.saturating_mul(element.size()), element.align(), "buffer too large"))?;
        let block = allocator.allocate_layout(layout)?;
        let guard = FreeOnUnwind {
            ptr: block,
            layout,
            allocator: &allocator,
        };
        let ptr = block.cast::<V>();

        for i in 0..len {
            // SAFETY: the block holds `len` elements of V
            unsafe { ptr.as_ptr().add(i).write(f(i)) };
        }
        core::mem::forget(guard);

        Ok(Self {
            ptr,
            len,
            layout,
            allocator,
        })
    }

    pub fn allocator(&self) -> &AlignedAllocator<A> {
        &self.allocator
    }

    pub fn as_ptr(&self) -> *const V {
        self.ptr.as_ptr()
    }

    pub fn as_mut_ptr(&mut self) -> *mut V {
        self.ptr.as_ptr()
    }
}

impl<T: Element, const N: usize, A: RawAlloc> VectorBuf<Simd<T, N>, A>
where
    LaneCount<N>: SupportedShape<T::Width>,
{
    /// Packs `values` into vectors of `N` lanes. The last vector is padded
    /// with zeros when `values.len()` is not a multiple of `N`.
    pub fn from_scalars_in(values: &[T], allocator: AlignedAllocator<A>) -> Result<Self> {
        let len = values.len().div_ceil(N);
        Self::from_fn_in(len, allocator, |i| {
            let start = i * N;
            let end = (start + N).min(values.len());
            Simd::from_slice_partial(&values[start..end])
        })
    }

    /// Every lane of every vector, padding included.
    pub fn to_scalars(&self) -> Vec<T> {
        self.lanes().collect()
    }

    /// Iterates over the lanes of every vector in order.
    pub fn lanes(&self) -> impl Iterator<Item = T> + '_ {
        self.iter().flat_map(|vector| vector.to_array())
    }

    /// Total number of lanes held.
    pub fn lane_count(&self) -> usize {
        self.len * N
    }
}

impl<T: Element, const N: usize> VectorBuf<Simd<T, N>, Global>
where
    LaneCount<N>: SupportedShape<T::Width>,
{
    pub fn from_scalars(values: &[T]) -> Result<Self> {
        Self::from_scalars_in(values, AlignedAllocator::new())
    }
}

impl<V: Copy, A: RawAlloc> Deref for VectorBuf<V, A> {
    type Target = [V];

    fn deref(&self) -> &[V] {
        // SAFETY: `len` initialized elements start at `ptr`
        unsafe { std::slice::from_raw_parts(self.ptr.as_ptr(), self.len) }
    }
}

impl<V: Copy, A: RawAlloc> DerefMut for VectorBuf<V, A> {
    fn deref_mut(&mut self) -> &mut [V] {
        // SAFETY: `len` initialized elements start at `ptr`, uniquely borrowed
        unsafe { std::slice::from_raw_parts_mut(self.ptr.as_ptr(), self.len) }
    }
}

impl<V: Copy, A: RawAlloc> Drop for VectorBuf<V, A> {
    fn drop(&mut self) {
        // SAFETY: the block came from `allocate_layout(self.layout)`
        unsafe {
            self.allocator
                .deallocate_layout(self.ptr.cast::<u8>(), self.layout);
        }
    }
}

impl<V: Copy + fmt::Debug, A: RawAlloc> fmt::Debug for VectorBuf<V, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<V: Copy + PartialEq, A: RawAlloc> PartialEq for VectorBuf<V, A> {
    fn eq(&self, other: &Self) -> bool {
        **self == **other
    }
}

impl<'a, V: Copy, A: RawAlloc> IntoIterator for &'a VectorBuf<V, A> {
    type Item = &'a V;
    type IntoIter = std::slice::Iter<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, V: Copy, A: RawAlloc> IntoIterator for &'a mut VectorBuf<V, A> {
    type Item = &'a mut V;
    type IntoIter = std::slice::IterMut<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}
