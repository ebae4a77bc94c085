pub mod aliases;
pub mod buffer;
pub mod cmp;
pub mod complex;
pub mod convert;
pub mod mask;
pub mod math;
pub mod native;
pub mod ops;
pub mod shuffle;
pub mod storage;
pub mod text;
pub mod traits;
pub mod transform;
pub mod vector;

pub use buffer::VectorBuf;
pub use cmp::MaskFor;
pub use complex::ComplexSimd;
pub use mask::Mask;
pub use shuffle::Swizzle;
pub use storage::{LaneCount, SupportedShape, NATIVE_REGISTER_BYTES};
pub use traits::{Element, Float, Integer, MaskElement};
pub use transform::{transform, transform2, transform3, transform4};
pub use vector::Simd;
