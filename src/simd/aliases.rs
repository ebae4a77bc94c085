//! Named shapes.
//!
//! `f32x4` is `Simd<f32, 4>`, `mask32x4` is `Mask<i32, 4>` and so on. The
//! register-family modules ([`sse`], [`avx`], [`avx512`], [`neon`]) rename the
//! shapes that fill one register of that family. They are plain aliases and
//! exist on every target.

use crate::simd::complex::ComplexSimd;
use crate::simd::mask::Mask;
use crate::simd::vector::Simd;

macro_rules! shape_aliases {
    ($($container:ident<$t:ty> => $($name:ident = $n:literal),+;)+) => {
        $($(
            #[allow(non_camel_case_types)]
            pub type $name = $container<$t, $n>;
        )+)+
    };
}

shape_aliases! {
    Simd<i8> => i8x1 = 1, i8x2 = 2, i8x4 = 4, i8x8 = 8, i8x16 = 16, i8x32 = 32, i8x64 = 64;
    Simd<u8> => u8x1 = 1, u8x2 = 2, u8x4 = 4, u8x8 = 8, u8x16 = 16, u8x32 = 32, u8x64 = 64;
    Simd<i16> => i16x1 = 1, i16x2 = 2, i16x4 = 4, i16x8 = 8, i16x16 = 16, i16x32 = 32, i16x64 = 64;
    Simd<u16> => u16x1 = 1, u16x2 = 2, u16x4 = 4, u16x8 = 8, u16x16 = 16, u16x32 = 32, u16x64 = 64;
    Simd<i32> => i32x1 = 1, i32x2 = 2, i32x4 = 4, i32x8 = 8, i32x16 = 16, i32x32 = 32, i32x64 = 64;
    Simd<u32> => u32x1 = 1, u32x2 = 2, u32x4 = 4, u32x8 = 8, u32x16 = 16, u32x32 = 32, u32x64 = 64;
    Simd<i64> => i64x1 = 1, i64x2 = 2, i64x4 = 4, i64x8 = 8, i64x16 = 16, i64x32 = 32, i64x64 = 64;
    Simd<u64> => u64x1 = 1, u64x2 = 2, u64x4 = 4, u64x8 = 8, u64x16 = 16, u64x32 = 32, u64x64 = 64;
    Simd<i128> => i128x1 = 1, i128x2 = 2, i128x4 = 4, i128x8 = 8;
    Simd<u128> => u128x1 = 1, u128x2 = 2, u128x4 = 4, u128x8 = 8;
    Simd<f32> => f32x1 = 1, f32x2 = 2, f32x4 = 4, f32x8 = 8, f32x16 = 16, f32x32 = 32, f32x64 = 64;
    Simd<f64> => f64x1 = 1, f64x2 = 2, f64x4 = 4, f64x8 = 8, f64x16 = 16, f64x32 = 32, f64x64 = 64;

    Mask<i8> => mask8x1 = 1, mask8x2 = 2, mask8x4 = 4, mask8x8 = 8, mask8x16 = 16, mask8x32 = 32, mask8x64 = 64;
    Mask<i16> => mask16x1 = 1, mask16x2 = 2, mask16x4 = 4, mask16x8 = 8, mask16x16 = 16, mask16x32 = 32, mask16x64 = 64;
    Mask<i32> => mask32x1 = 1, mask32x2 = 2, mask32x4 = 4, mask32x8 = 8, mask32x16 = 16, mask32x32 = 32, mask32x64 = 64;
    Mask<i64> => mask64x1 = 1, mask64x2 = 2, mask64x4 = 4, mask64x8 = 8, mask64x16 = 16, mask64x32 = 32, mask64x64 = 64;

    ComplexSimd<f32> => c32x1 = 1, c32x2 = 2, c32x4 = 4, c32x8 = 8, c32x16 = 16;
    ComplexSimd<f64> => c64x1 = 1, c64x2 = 2, c64x4 = 4, c64x8 = 8;
}

/// 128-bit register family (SSE on x86).
pub mod sse {
    pub use super::{
        f32x4, f64x2, i16x8, i32x4, i64x2, i8x16, mask16x8, mask32x4, mask64x2, mask8x16, u16x8, u32x4,
        u64x2, u8x16,
    };
}

/// 256-bit register family (AVX and AVX2 on x86).
pub mod avx {
    pub use super::{
        f32x8, f64x4, i16x16, i32x8, i64x4, i8x32, mask16x16, mask32x8, mask64x4, mask8x32, u16x16,
        u32x8, u64x4, u8x32,
    };
}

/// 512-bit register family (AVX-512 on x86).
pub mod avx512 {
    pub use super::{
        f32x16, f64x8, i16x32, i32x16, i64x8, i8x64, mask16x32, mask32x16, mask64x8, mask8x64, u16x32,
        u32x16, u64x8, u8x64,
    };
}

/// 128-bit and 64-bit register families of Advanced SIMD on aarch64.
pub mod neon {
    pub use super::{
        f32x2, f32x4, f64x2, i16x4, i16x8, i32x2, i32x4, i64x2, i8x16, i8x8, mask16x8, mask32x4,
        mask64x2, mask8x16, u16x4, u16x8, u32x2, u32x4, u64x2, u8x16, u8x8,
    };
}
