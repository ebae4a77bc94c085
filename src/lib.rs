//! Portable fixed-width SIMD vectors.
//!
//! `lanewise` provides one generic vector type, [`Simd<T, N>`](simd::Simd),
//! for every primitive integer and float element and every lane count from 1
//! to 64, plus boolean vectors ([`Mask`](simd::Mask)) and complex vectors
//! ([`ComplexSimd`](simd::ComplexSimd)). Every shape is stored with an
//! alignment equal to its byte size, so a `Simd<f32, 8>` can be handed to
//! AVX code and a `Simd<f32, 4>` to SSE or NEON code without copying.
//!
//! ```
//! use lanewise::simd::Simd;
//!
//! let a = Simd::<i32, 8>::from_array([1, 2, 3, 4, 5, 6, 7, 8]);
//! assert_eq!((a * 2).to_array(), [2, 4, 6, 8, 10, 12, 14, 16]);
//! assert_eq!((a / Simd::splat(1)), a);
//!
//! let above = Simd::<f32, 4>::from_array([1.0, 2.0, 3.0, 4.0]).simd_gt(Simd::splat(2.0));
//! assert!(above.any() && !above.all());
//! ```
//!
//! Operations are written once as scalar code and applied lane by lane; the
//! optimizer turns the fixed-size loops into vector instructions for the
//! build target. `build.rs` detects the widest vector unit of a native build
//! and exposes it as [`NATIVE_REGISTER_BYTES`], which
//! [`Simd::native_registers`](simd::Simd::native_registers) uses to report how
//! many hardware registers a shape spans.

pub mod error;
pub mod simd;
pub mod utils;

pub use error::{Result, VectorError};
pub use simd::storage::NATIVE_REGISTER_BYTES;
