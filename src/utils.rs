//! Alignment-aware allocation.
//!
//! Vector shapes must live at addresses that are a multiple of their byte
//! size. [`AlignedAllocator`] picks that alignment from the requested size and
//! reports failure as a [`VectorError::AllocationError`] instead of aborting.
//!
//! # Failure handling
//!
//! An allocator may carry a failure handler, typically a closure that frees a
//! cache. When the backend cannot satisfy a request:
//!
//! 1. the handler is invoked once, serialized with every other handler call
//!    made through clones of the same allocator,
//! 2. the allocation is retried once,
//! 3. if it still fails, the error is returned to the caller.
//!
//! Without a handler the first failure is returned directly. There is no
//! process-wide handler: each allocator value owns its own.
//!
//! ```
//! use lanewise::utils::AlignedAllocator;
//!
//! let allocator = AlignedAllocator::new();
//! let ptr = allocator.allocate(32).unwrap();
//! assert_eq!(ptr.as_ptr() as usize % 32, 0);
//! unsafe { allocator.deallocate(ptr, 32) };
//! ```

use std::alloc::Layout;
use std::fmt;
use std::ptr::NonNull;
use std::sync::Arc;

use log::{debug, error, warn};
use parking_lot::Mutex;

use crate::error::{allocation_error, layout_error, Result};
use crate::simd::storage::MAX_SHAPE_BYTES;

/// Alignment used for sizes that do not match a vector shape.
pub const DEFAULT_ALIGN: usize = core::mem::align_of::<usize>();

/// Raw memory source behind an [`AlignedAllocator`].
///
/// Mirrors [`std::alloc::GlobalAlloc`]: `alloc` returns null on failure.
pub trait RawAlloc {
    /// Allocates a block for `layout`.
    ///
    /// # Safety
    ///
    /// `layout` must have a non-zero size.
    unsafe fn alloc(&self, layout: Layout) -> *mut u8;

    /// Releases a block.
    ///
    /// # Safety
    ///
    /// `ptr` must come from `alloc` on this backend with the same `layout`.
    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout);
}

/// The global Rust allocator.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Global;

impl RawAlloc for Global {
    #[inline(always)]
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        std::alloc::alloc(layout)
    }

    #[inline(always)]
    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        std::alloc::dealloc(ptr, layout)
    }
}

/// Callback run once before an allocation is retried.
pub type FailureHandler = Arc<dyn Fn() + Send + Sync>;

/// Allocator aligning blocks to their vector shape.
///
/// Clones share the failure handler and its lock.
#[derive(Clone)]
pub struct AlignedAllocator<A: RawAlloc = Global> {
    backend: A,
    on_failure: Option<FailureHandler>,
    handler_lock: Arc<Mutex<()>>,
}

impl AlignedAllocator<Global> {
    /// Allocator over the global allocator, without a failure handler.
    pub fn new() -> Self {
        Self::with_backend(Global)
    }
}

impl Default for AlignedAllocator<Global> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: RawAlloc> fmt::Debug for AlignedAllocator<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AlignedAllocator")
            .field("has_failure_handler", &self.on_failure.is_some())
            .finish()
    }
}

impl<A: RawAlloc> AlignedAllocator<A> {
    pub fn with_backend(backend: A) -> Self {
        Self {
            backend,
            on_failure: None,
            handler_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Installs the handler consulted when the backend runs out of memory.
    pub fn with_failure_handler(mut self, handler: impl Fn() + Send + Sync + 'static) -> Self {
        self.on_failure = Some(Arc::new(handler));
        self
    }

    pub fn backend(&self) -> &A {
        &self.backend
    }

    /// Alignment used for a block of `size` bytes.
    ///
    /// Sizes that are a power of two up to the largest shape (1024 bytes) are
    /// aligned to themselves; anything else gets [`DEFAULT_ALIGN`].
    #[inline]
    pub fn alignment_for(size: usize) -> usize {
        if size.is_power_of_two() && size <= MAX_SHAPE_BYTES {
            size.max(DEFAULT_ALIGN)
        } else {
            DEFAULT_ALIGN
        }
    }

    /// Layout of a block of `size` bytes as chosen by [`Self::alignment_for`].
    ///
    /// # Errors
    ///
    /// Returns [`VectorError::LayoutError`](crate::error::VectorError::LayoutError)
    /// if `size` overflows when rounded up to the alignment.
    pub fn layout_for(size: usize) -> Result<Layout> {
        let alignment = Self::alignment_for(size);
        Layout::from_size_align(size, alignment)
            .map_err(|_| layout_error(size, alignment, "size overflows when rounded to alignment"))
    }

    /// Allocates `size` bytes aligned by [`Self::alignment_for`].
    ///
    /// # Errors
    ///
    /// - [`VectorError::LayoutError`](crate::error::VectorError::LayoutError)
    ///   for an invalid size.
    /// - [`VectorError::AllocationError`](crate::error::VectorError::AllocationError)
    ///   when the backend fails and the retry protocol is exhausted.
    pub fn allocate(&self, size: usize) -> Result<NonNull<u8>> {
        let layout = Self::layout_for(size)?;
        self.allocate_layout(layout)
    }

    /// Frees a block returned by [`Self::allocate`].
    ///
    /// # Safety
    ///
    /// `ptr` must come from `allocate(size)` on this allocator (or a clone)
    /// and must not be used afterwards.
    pub unsafe fn deallocate(&self, ptr: NonNull<u8>, size: usize) {
        if let Ok(layout) = Self::layout_for(size) {
            self.deallocate_layout(ptr, layout);
        }
    }

    /// Allocates a block for an explicit layout.
    ///
    /// Zero-size layouts return a dangling pointer aligned to the layout
    /// without touching the backend.
    ///
    /// # Arguments
    ///
    /// * `layout` - Size and alignment of the block; the alignment is used as given
    ///
    /// # Errors
    ///
    /// Returns [`VectorError::AllocationError`](crate::error::VectorError::AllocationError)
    /// when the backend fails and the retry protocol is exhausted.
    ///
    /// # Panics
    ///
    /// Only if the failure handler itself panics.
    ///
    /// # Safety
    ///
    /// This function is safe to call. The returned block is uninitialized and
    /// must be released with [`Self::deallocate_layout`] using the same `layout`.
    pub fn allocate_layout(&self, layout: Layout) -> Result<NonNull<u8>> {
        if layout.size() == 0 {
            // SAFETY: alignments are never zero
            return Ok(unsafe { NonNull::new_unchecked(layout.align() as *mut u8) });
        }

        debug!(
            "[AlignedAllocator] allocating {} bytes aligned to {}",
            layout.size(),
            layout.align()
        );

        // SAFETY: the layout has a non-zero size
        if let Some(ptr) = NonNull::new(unsafe { self.backend.alloc(layout) }) {
            return Ok(ptr);
        }

        let Some(handler) = &self.on_failure else {
            error!(
                "[AlignedAllocator] FAILED: {} bytes, no failure handler installed",
                layout.size()
            );
            return Err(allocation_error(
                layout.size(),
                layout.align(),
                "backend returned null and no failure handler is installed",
            ));
        };

        warn!(
            "[AlignedAllocator] backend failed for {} bytes, running failure handler",
            layout.size()
        );
        {
            let _guard = self.handler_lock.lock();
            handler();
        }

        // SAFETY: the layout has a non-zero size
        match NonNull::new(unsafe { self.backend.alloc(layout) }) {
            Some(ptr) => Ok(ptr),
            None => {
                error!(
                    "[AlignedAllocator] FAILED: {} bytes after running failure handler",
                    layout.size()
                );
                Err(allocation_error(
                    layout.size(),
                    layout.align(),
                    "out of memory after failure handler retry",
                ))
            }
        }
    }

    /// Frees a block returned by [`Self::allocate_layout`].
    ///
    /// # Safety
    ///
    /// `ptr` must come from `allocate_layout(layout)` on this allocator (or a
    /// clone) and must not be used afterwards.
    pub unsafe fn deallocate_layout(&self, ptr: NonNull<u8>, layout: Layout) {
        if layout.size() > 0 {
            self.backend.dealloc(ptr.as_ptr(), layout);
        }
    }
}

#[cfg(test)]
pub(crate) mod test_backends {
    use super::*;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    /// Fails the first `failures` calls, then forwards to the global allocator.
    #[derive(Default)]
    pub struct Flaky {
        pub failures: AtomicUsize,
        pub calls: AtomicUsize,
        /// Shared so a caller can read it after the allocator is gone.
        pub frees: Arc<AtomicUsize>,
    }

    impl Flaky {
        pub fn failing(failures: usize) -> Self {
            Self {
                failures: AtomicUsize::new(failures),
                calls: AtomicUsize::new(0),
                frees: Arc::new(AtomicUsize::new(0)),
            }
        }
    }

    impl RawAlloc for Flaky {
        unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let remaining = self.failures.load(Ordering::SeqCst);
            if remaining > 0 {
                self.failures.store(remaining - 1, Ordering::SeqCst);
                return std::ptr::null_mut();
            }
            std::alloc::alloc(layout)
        }

        unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
            self.frees.fetch_add(1, Ordering::SeqCst);
            std::alloc::dealloc(ptr, layout)
        }
    }

    /// Fails every call while under pressure.
    pub struct Pressured {
        pub under_pressure: Arc<AtomicBool>,
    }

    impl RawAlloc for Pressured {
        unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
            if self.under_pressure.load(Ordering::SeqCst) {
                return std::ptr::null_mut();
            }
            std::alloc::alloc(layout)
        }

        unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
            std::alloc::dealloc(ptr, layout)
        }
    }
}
