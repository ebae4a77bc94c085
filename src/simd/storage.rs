//! Shape to storage specialization table.
//!
//! A vector shape is the pair (element type, lane count). Every supported
//! shape resolves to exactly one backing representation whose byte size and
//! alignment both equal `lanes * size_of::<element>()`, so a 4 x f32 vector is
//! 16-byte aligned and an 8 x f32 vector 32-byte aligned, matching what the
//! SSE/NEON and AVX load instructions want.
//!
//! Rather than one hand-written type per shape, [`Storage`] is a single generic
//! `#[repr(C)]` array wrapper. The alignment comes from a zero-length array of
//! a zero-sized `#[repr(align(K))]` marker chosen by the table below, keyed on
//! the element's byte [`Width`] and the [`LaneCount`]. Asking for a lane count
//! outside `{1, 2, 4, 8, 16, 32, 64}` fails to compile because the
//! [`SupportedShape`] impl is missing.
//!
//! Shapes wider than the host's registers are legal: the compiler lowers them
//! to a sequence of narrower instructions.

use core::fmt::Debug;
use core::hash::Hash;

use crate::simd::traits::{sealed::Sealed, Element, MaskElement};

/// Type-level lane count.
pub struct LaneCount<const N: usize>;

impl<const N: usize> Sealed for LaneCount<N> {}

/// Byte width class of a lane element.
pub trait Width: Sealed + Copy + Debug + Default + Send + Sync + 'static {
    /// Size of one lane in bytes.
    const BYTES: usize;
    /// Signed integer of this width used as boolean lane storage.
    type Mask: MaskElement<Width = Self>;
}

macro_rules! widths {
    ($($name:ident => $bytes:literal, $mask:ty);* $(;)?) => {
        $(
            #[doc = concat!("Lane width of ", stringify!($bytes), " byte(s).")]
            #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
            pub struct $name;

            impl Sealed for $name {}

            impl Width for $name {
                const BYTES: usize = $bytes;
                type Mask = $mask;
            }
        )*
    };
}

widths! {
    W1 => 1, i8;
    W2 => 2, i16;
    W4 => 4, i32;
    W8 => 8, i64;
    W16 => 16, i128;
}

macro_rules! align_markers {
    ($($name:ident => $bytes:literal),* $(,)?) => {
        $(
            #[doc = concat!("Zero-sized marker forcing ", stringify!($bytes), "-byte alignment.")]
            #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
            #[repr(align($bytes))]
            pub struct $name;
        )*
    };
}

align_markers! {
    Align1 => 1,
    Align2 => 2,
    Align4 => 4,
    Align8 => 8,
    Align16 => 16,
    Align32 => 32,
    Align64 => 64,
    Align128 => 128,
    Align256 => 256,
    Align512 => 512,
    Align1024 => 1024,
}

/// Implemented by `LaneCount<N>` for every lane count the table knows for
/// width `W`.
pub trait SupportedShape<W: Width>: Sealed {
    /// Zero-sized alignment marker for this shape.
    type Align: Copy + Debug + Default + Eq + Hash + Send + Sync + Unpin + 'static;
}

macro_rules! shape_table {
    ($($width:ty => { $($lanes:literal => $align:ty),* $(,)? }),* $(,)?) => {
        $(
            $(
                impl SupportedShape<$width> for LaneCount<$lanes> {
                    type Align = $align;
                }

                const _: () = assert!(
                    core::mem::align_of::<$align>() == $lanes * <$width as Width>::BYTES,
                    "shape alignment must equal its byte size"
                );
            )*
        )*
    };
}

shape_table! {
    W1 => {
        1 => Align1,
        2 => Align2,
        4 => Align4,
        8 => Align8,
        16 => Align16,
        32 => Align32,
        64 => Align64,
    },
    W2 => {
        1 => Align2,
        2 => Align4,
        4 => Align8,
        8 => Align16,
        16 => Align32,
        32 => Align64,
        64 => Align128,
    },
    W4 => {
        1 => Align4,
        2 => Align8,
        4 => Align16,
        8 => Align32,
        16 => Align64,
        32 => Align128,
        64 => Align256,
    },
    W8 => {
        1 => Align8,
        2 => Align16,
        4 => Align32,
        8 => Align64,
        16 => Align128,
        32 => Align256,
        64 => Align512,
    },
    W16 => {
        1 => Align16,
        2 => Align32,
        4 => Align64,
        8 => Align128,
        16 => Align256,
        32 => Align512,
        64 => Align1024,
    },
}

/// Largest byte size of any shape in the table (64 lanes of 16 bytes).
pub const MAX_SHAPE_BYTES: usize = 1024;

/// Width in bytes of the widest native vector register on the build host.
///
/// Derived from the cfg flag emitted by the build script. Zero means no
/// vector unit is known and every shape is emulated lane by lane.
pub const NATIVE_REGISTER_BYTES: usize = if cfg!(avx512) {
    64
} else if cfg!(avx2) {
    32
} else if cfg!(any(
    sse,
    neon,
    target_arch = "x86_64",
    target_arch = "aarch64"
)) {
    16
} else {
    0
};

/// Number of native registers a shape of `bytes` bytes spans.
#[inline(always)]
pub const fn native_registers(bytes: usize) -> usize {
    if NATIVE_REGISTER_BYTES == 0 {
        0
    } else {
        bytes.div_ceil(NATIVE_REGISTER_BYTES)
    }
}

/// Backing storage of one vector shape.
///
/// Size and alignment are both `N * size_of::<T>()`.
#[repr(C)]
pub struct Storage<T: Element, const N: usize>
where
    LaneCount<N>: SupportedShape<T::Width>,
{
    _align: [<LaneCount<N> as SupportedShape<T::Width>>::Align; 0],
    lanes: [T; N],
}

impl<T: Element, const N: usize> Storage<T, N>
where
    LaneCount<N>: SupportedShape<T::Width>,
{
    /// Size of the shape in bytes.
    pub const BYTES: usize = core::mem::size_of::<Self>();
    /// Alignment of the shape in bytes.
    pub const ALIGN: usize = core::mem::align_of::<Self>();

    #[inline(always)]
    pub const fn new(lanes: [T; N]) -> Self {
        Self { _align: [], lanes }
    }

    #[inline(always)]
    pub const fn lanes(&self) -> &[T; N] {
        &self.lanes
    }

    #[inline(always)]
    pub fn lanes_mut(&mut self) -> &mut [T; N] {
        &mut self.lanes
    }

    #[inline(always)]
    pub fn into_lanes(self) -> [T; N] {
        self.lanes
    }
}

impl<T: Element, const N: usize> Clone for Storage<T, N>
where
    LaneCount<N>: SupportedShape<T::Width>,
{
    #[inline(always)]
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: Element, const N: usize> Copy for Storage<T, N> where LaneCount<N>: SupportedShape<T::Width> {}

/// Applies `combine` as a fixed halving tree over a power-of-two lane array.
///
/// The trip counts depend only on `N`, so the loops unroll into a
/// branch-free reduction.
#[inline(always)]
pub(crate) fn tree_reduce<T: Copy, const N: usize>(mut lanes: [T; N], combine: impl Fn(T, T) -> T) -> T {
    let mut width = N;
    while width > 1 {
        width /= 2;
        for i in 0..width {
            lanes[i] = combine(lanes[i], lanes[i + width]);
        }
    }
    lanes[0]
}
