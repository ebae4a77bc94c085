//! Conversions between vectors and hardware register types.
//!
//! Each 16-byte shape converts to and from the matching SSE register on x86
//! (`__m128`, `__m128d`, `__m128i`) and NEON register on aarch64. 32-byte
//! shapes convert to AVX registers when the build enables `avx`. Conversions
//! are unaligned loads and stores, so any vector value can be moved into a
//! register.
//!
//! Hardware comparisons produce all-ones lanes for true. Converting such a
//! register into a [`Mask`] normalizes every lane to 0 or 1; converting a mask
//! back yields the all-ones encoding via [`Mask::to_hardware`].
//!
//! Everything here is selected with `cfg(target_arch)` and
//! `cfg(target_feature)`; there is no runtime dispatch.

#[allow(unused_imports)]
use crate::simd::mask::Mask;
#[allow(unused_imports)]
use crate::simd::vector::Simd;

#[cfg(all(any(target_arch = "x86", target_arch = "x86_64"), target_feature = "sse2"))]
mod x86 {
    #[cfg(target_arch = "x86")]
    use core::arch::x86::*;
    #[cfg(target_arch = "x86_64")]
    use core::arch::x86_64::*;

    use super::{Mask, Simd};

    macro_rules! register_conversions {
        ($register:ty, $load:ident, $store:ident, $ptr:ty => $($vector:ty),+ $(,)?) => {
            $(
                impl From<$vector> for $register {
                    #[inline(always)]
                    fn from(vector: $vector) -> Self {
                        // SAFETY: the vector holds exactly one register of bytes
                        unsafe { $load(vector.as_array().as_ptr() as *const $ptr) }
                    }
                }

                impl From<$register> for $vector {
                    #[inline(always)]
                    fn from(register: $register) -> Self {
                        let mut vector = <$vector>::default();
                        // SAFETY: the vector holds exactly one register of bytes
                        unsafe { $store(vector.as_mut_array().as_mut_ptr() as *mut $ptr, register) };
                        vector
                    }
                }
            )+
        };
    }

    macro_rules! mask_conversions {
        ($register:ty, $int:ty, $to_int:ident, $from_int:ident => $($m:ty, $n:literal);+ $(;)?) => {
            $(
                impl From<$register> for Mask<$m, $n> {
                    /// Any non-zero lane becomes `true`.
                    #[inline(always)]
                    #[allow(unused_unsafe)]
                    fn from(register: $register) -> Self {
                        // SAFETY: register casts only reinterpret bits
                        let bits: $int = unsafe { $to_int(register) };
                        Self::from_raw(Simd::<$m, $n>::from(bits))
                    }
                }

                impl From<Mask<$m, $n>> for $register {
                    /// True lanes become all ones.
                    #[inline(always)]
                    #[allow(unused_unsafe)]
                    fn from(mask: Mask<$m, $n>) -> Self {
                        let bits: $int = mask.to_hardware().into();
                        // SAFETY: register casts only reinterpret bits
                        unsafe { $from_int(bits) }
                    }
                }
            )+
        };
    }

    #[inline(always)]
    fn same_m128i(register: __m128i) -> __m128i {
        register
    }

    register_conversions!(__m128, _mm_loadu_ps, _mm_storeu_ps, f32 => Simd<f32, 4>);
    register_conversions!(__m128d, _mm_loadu_pd, _mm_storeu_pd, f64 => Simd<f64, 2>);
    register_conversions!(
        __m128i, _mm_loadu_si128, _mm_storeu_si128, __m128i =>
        Simd<i8, 16>, Simd<u8, 16>,
        Simd<i16, 8>, Simd<u16, 8>,
        Simd<i32, 4>, Simd<u32, 4>,
        Simd<i64, 2>, Simd<u64, 2>,
        Simd<i128, 1>, Simd<u128, 1>,
    );

    mask_conversions!(__m128, __m128i, _mm_castps_si128, _mm_castsi128_ps => i32, 4);
    mask_conversions!(__m128d, __m128i, _mm_castpd_si128, _mm_castsi128_pd => i64, 2);
    mask_conversions!(
        __m128i, __m128i, same_m128i, same_m128i =>
        i8, 16;
        i16, 8;
        i32, 4;
        i64, 2;
    );

    #[cfg(target_feature = "avx")]
    mod avx {
        #[cfg(target_arch = "x86")]
        use core::arch::x86::*;
        #[cfg(target_arch = "x86_64")]
        use core::arch::x86_64::*;

        use super::super::{Mask, Simd};

        #[inline(always)]
        fn same_m256i(register: __m256i) -> __m256i {
            register
        }

        register_conversions!(__m256, _mm256_loadu_ps, _mm256_storeu_ps, f32 => Simd<f32, 8>);
        register_conversions!(__m256d, _mm256_loadu_pd, _mm256_storeu_pd, f64 => Simd<f64, 4>);
        register_conversions!(
            __m256i, _mm256_loadu_si256, _mm256_storeu_si256, __m256i =>
            Simd<i8, 32>, Simd<u8, 32>,
            Simd<i16, 16>, Simd<u16, 16>,
            Simd<i32, 8>, Simd<u32, 8>,
            Simd<i64, 4>, Simd<u64, 4>,
            Simd<i128, 2>, Simd<u128, 2>,
        );

        mask_conversions!(__m256, __m256i, _mm256_castps_si256, _mm256_castsi256_ps => i32, 8);
        mask_conversions!(__m256d, __m256i, _mm256_castpd_si256, _mm256_castsi256_pd => i64, 4);
        mask_conversions!(
            __m256i, __m256i, same_m256i, same_m256i =>
            i8, 32;
            i16, 16;
            i32, 8;
            i64, 4;
        );

    }

}

#[cfg(all(target_arch = "aarch64", target_feature = "neon"))]
mod aarch64 {
    use core::arch::aarch64::*;

    use super::{Mask, Simd};

    macro_rules! register_conversions {
        ($($register:ty, $load:ident, $store:ident => $t:ty, $n:literal;)+) => {
            $(
                impl From<Simd<$t, $n>> for $register {
                    #[inline(always)]
                    fn from(vector: Simd<$t, $n>) -> Self {
                        // SAFETY: the vector holds exactly one register of lanes
                        unsafe { $load(vector.as_array().as_ptr()) }
                    }
                }

                impl From<$register> for Simd<$t, $n> {
                    #[inline(always)]
                    fn from(register: $register) -> Self {
                        let mut vector = Self::default();
                        // SAFETY: the vector holds exactly one register of lanes
                        unsafe { $store(vector.as_mut_array().as_mut_ptr(), register) };
                        vector
                    }
                }
            )+
        };
    }

    macro_rules! mask_conversions {
        ($($register:ty => $m:ty, $u:ty, $n:literal;)+) => {
            $(
                impl From<$register> for Mask<$m, $n> {
                    /// Any non-zero lane becomes `true`.
                    #[inline(always)]
                    fn from(register: $register) -> Self {
                        Self::from_raw(Simd::<$u, $n>::from(register).cast::<$m>())
                    }
                }

                impl From<Mask<$m, $n>> for $register {
                    /// True lanes become all ones.
                    #[inline(always)]
                    fn from(mask: Mask<$m, $n>) -> Self {
                        mask.to_hardware().cast::<$u>().into()
                    }
                }
            )+
        };
    }

    register_conversions! {
        float32x4_t, vld1q_f32, vst1q_f32 => f32, 4;
        float64x2_t, vld1q_f64, vst1q_f64 => f64, 2;
        int8x16_t, vld1q_s8, vst1q_s8 => i8, 16;
        uint8x16_t, vld1q_u8, vst1q_u8 => u8, 16;
        int16x8_t, vld1q_s16, vst1q_s16 => i16, 8;
        uint16x8_t, vld1q_u16, vst1q_u16 => u16, 8;
        int32x4_t, vld1q_s32, vst1q_s32 => i32, 4;
        uint32x4_t, vld1q_u32, vst1q_u32 => u32, 4;
        int64x2_t, vld1q_s64, vst1q_s64 => i64, 2;
        uint64x2_t, vld1q_u64, vst1q_u64 => u64, 2;
        float32x2_t, vld1_f32, vst1_f32 => f32, 2;
        int8x8_t, vld1_s8, vst1_s8 => i8, 8;
        uint8x8_t, vld1_u8, vst1_u8 => u8, 8;
        int16x4_t, vld1_s16, vst1_s16 => i16, 4;
        uint16x4_t, vld1_u16, vst1_u16 => u16, 4;
        int32x2_t, vld1_s32, vst1_s32 => i32, 2;
        uint32x2_t, vld1_u32, vst1_u32 => u32, 2;
    }

    mask_conversions! {
        uint8x16_t => i8, u8, 16;
        uint16x8_t => i16, u16, 8;
        uint32x4_t => i32, u32, 4;
        uint64x2_t => i64, u64, 2;
        uint32x2_t => i32, u32, 2;
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_float_roundtrip() {
            let v = Simd::<f32, 4>::from_array([1.5, -2.0, 0.0, f32::MAX]);
            let register: float32x4_t = v.into();
            assert_eq!(Simd::<f32, 4>::from(register), v);
        }

        #[test]
        fn test_comparison_is_normalized() {
            let a: float32x4_t = Simd::<f32, 4>::from_array([1.0, 2.0, 3.0, 4.0]).into();
            let b: float32x4_t = Simd::<f32, 4>::splat(2.0).into();
            let raw = unsafe { vcgtq_f32(a, b) };

            let mask = Mask::<i32, 4>::from(raw);
            assert_eq!(mask.to_int().to_array(), [0, 0, 1, 1]);

            let back: uint32x4_t = mask.into();
            assert_eq!(Simd::<u32, 4>::from(back).to_array(), [0, 0, u32::MAX, u32::MAX]);
        }
    }
}
