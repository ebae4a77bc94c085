//! Generic elementwise application of scalar functions.
//!
//! [`transform`] (and its 2, 3 and 4 input forms) runs a scalar closure on
//! every lane index of its inputs and collects the results into a vector
//! whose type is inferred from the closure's return type:
//!
//! | closure returns | result |
//! |---|---|
//! | an [`Element`] `T` | `Simd<T, N>` |
//! | `bool` | `Mask<W::Mask, N>`, `W` the first input's lane width |
//! | `Complex<F>` | `ComplexSimd<F, N>` |
//!
//! Inputs may be any mix of [`Simd`], [`Mask`] (lanes read as `bool`) and
//! [`ComplexSimd`] (lanes read as `Complex<F>`) with the same lane count. The
//! whole math library is written this way, one scalar function per
//! vector function.
//!
//! ```
//! use lanewise::simd::{transform, transform2, Simd};
//!
//! let x = Simd::<f32, 4>::from_array([1.0, 4.0, 9.0, 16.0]);
//! let roots = transform(x, f32::sqrt);
//! assert_eq!(roots.to_array(), [1.0, 2.0, 3.0, 4.0]);
//!
//! let above = transform2(x, roots, |a: f32, b: f32| a > b);
//! assert_eq!(above.to_array(), [false, true, true, true]);
//! ```

use num::Complex;

use crate::simd::complex::ComplexSimd;
use crate::simd::mask::Mask;
use crate::simd::storage::{LaneCount, SupportedShape, Width};
use crate::simd::traits::{Element, Float, MaskElement};
use crate::simd::vector::Simd;

/// A vector whose lanes can be fed to a scalar function.
pub trait LaneSource<const N: usize>: Copy {
    /// Scalar type of one lane.
    type Lane: Copy;
    /// Lane width used to pick the storage of boolean results.
    type Width: Width;

    fn lane_array(self) -> [Self::Lane; N];
}

impl<T: Element, const N: usize> LaneSource<N> for Simd<T, N>
where
    LaneCount<N>: SupportedShape<T::Width>,
{
    type Lane = T;
    type Width = T::Width;

    #[inline(always)]
    fn lane_array(self) -> [T; N] {
        self.to_array()
    }
}

impl<M: MaskElement, const N: usize> LaneSource<N> for Mask<M, N>
where
    LaneCount<N>: SupportedShape<M::Width>,
{
    type Lane = bool;
    type Width = M::Width;

    #[inline(always)]
    fn lane_array(self) -> [bool; N] {
        self.to_array()
    }
}

impl<F: Float, const N: usize> LaneSource<N> for ComplexSimd<F, N>
where
    LaneCount<N>: SupportedShape<F::Width>,
{
    type Lane = Complex<F>;
    type Width = F::Width;

    #[inline(always)]
    fn lane_array(self) -> [Complex<F>; N] {
        self.to_array()
    }
}

/// A scalar type that can be collected into a vector of `N` lanes.
///
/// `W` is the lane width of the transform's first input.
pub trait TransformOutput<W: Width, const N: usize>: Sized {
    type Vector;

    fn collect_lanes(lanes: [Self; N]) -> Self::Vector;
}

impl<T: Element, W: Width, const N: usize> TransformOutput<W, N> for T
where
    LaneCount<N>: SupportedShape<T::Width>,
{
    type Vector = Simd<T, N>;

    #[inline(always)]
    fn collect_lanes(lanes: [T; N]) -> Simd<T, N> {
        Simd::from_array(lanes)
    }
}

impl<W: Width, const N: usize> TransformOutput<W, N> for bool
where
    LaneCount<N>: SupportedShape<W>,
{
    type Vector = Mask<W::Mask, N>;

    #[inline(always)]
    fn collect_lanes(lanes: [bool; N]) -> Mask<W::Mask, N> {
        Mask::from_array(lanes)
    }
}

impl<F: Float, W: Width, const N: usize> TransformOutput<W, N> for Complex<F>
where
    LaneCount<N>: SupportedShape<F::Width>,
{
    type Vector = ComplexSimd<F, N>;

    #[inline(always)]
    fn collect_lanes(lanes: [Complex<F>; N]) -> ComplexSimd<F, N> {
        ComplexSimd::from_array(lanes)
    }
}

/// Applies a unary scalar function to every lane.
#[inline(always)]
pub fn transform<A, R, const N: usize>(a: A, mut f: impl FnMut(A::Lane) -> R) -> R::Vector
where
    A: LaneSource<N>,
    R: TransformOutput<A::Width, N>,
{
    let a = a.lane_array();
    R::collect_lanes(core::array::from_fn(|i| f(a[i])))
}

/// Applies a binary scalar function to every pair of lanes with the same index.
#[inline(always)]
pub fn transform2<A, B, R, const N: usize>(
    a: A,
    b: B,
    mut f: impl FnMut(A::Lane, B::Lane) -> R,
) -> R::Vector
where
    A: LaneSource<N>,
    B: LaneSource<N>,
    R: TransformOutput<A::Width, N>,
{
    let a = a.lane_array();
    let b = b.lane_array();
    R::collect_lanes(core::array::from_fn(|i| f(a[i], b[i])))
}

#[inline(always)]
pub fn transform3<A, B, C, R, const N: usize>(
    a: A,
    b: B,
    c: C,
    mut f: impl FnMut(A::Lane, B::Lane, C::Lane) -> R,
) -> R::Vector
where
    A: LaneSource<N>,
    B: LaneSource<N>,
    C: LaneSource<N>,
    R: TransformOutput<A::Width, N>,
{
    let a = a.lane_array();
    let b = b.lane_array();
    let c = c.lane_array();
    R::collect_lanes(core::array::from_fn(|i| f(a[i], b[i], c[i])))
}

#[inline(always)]
pub fn transform4<A, B, C, D, R, const N: usize>(
    a: A,
    b: B,
    c: C,
    d: D,
    mut f: impl FnMut(A::Lane, B::Lane, C::Lane, D::Lane) -> R,
) -> R::Vector
where
    A: LaneSource<N>,
    B: LaneSource<N>,
    C: LaneSource<N>,
    D: LaneSource<N>,
    R: TransformOutput<A::Width, N>,
{
    let a = a.lane_array();
    let b = b.lane_array();
    let c = c.lane_array();
    let d = d.lane_array();
    R::collect_lanes(core::array::from_fn(|i| f(a[i], b[i], c[i], d[i])))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_result_keeps_lane_count() {
        let v = Simd::<i32, 8>::from_array([1, 2, 3, 4, 5, 6, 7, 8]);
        let squares: Simd<i64, 8> = transform(v, |x: i32| (x as i64) * (x as i64));
        assert_eq!(squares.to_array(), [1, 4, 9, 16, 25, 36, 49, 64]);
    }

    #[test]
    fn test_bool_result_uses_first_input_width() {
        let v = Simd::<f64, 2>::from_array([0.5, -0.5]);
        let positive: Mask<i64, 2> = transform(v, |x: f64| x > 0.0);
        assert_eq!(positive.to_array(), [true, false]);
        assert_eq!(positive.to_int().to_array(), [1, 0]);
    }

    #[test]
    fn test_complex_result() {
        let re = Simd::<f32, 2>::from_array([1.0, 0.0]);
        let im = Simd::<f32, 2>::from_array([0.0, 2.0]);
        let z = transform2(re, im, |r: f32, i: f32| Complex::new(r, i));
        assert_eq!(z.to_array(), [Complex::new(1.0, 0.0), Complex::new(0.0, 2.0)]);

        let magnitudes = transform(z, |lane: Complex<f32>| lane.norm());
        assert_eq!(magnitudes.to_array(), [1.0, 2.0]);
    }

    #[test]
    fn test_mask_inputs_are_read_as_bool() {
        let mask = Mask::<i8, 4>::from_array([true, false, true, false]);
        let values = Simd::<u8, 4>::from_array([10, 20, 30, 40]);
        let picked = transform2(mask, values, |keep: bool, x: u8| if keep { x } else { 0 });
        assert_eq!(picked.to_array(), [10, 0, 30, 0]);
    }

    #[test]
    fn test_three_and_four_inputs() {
        let a = Simd::<f32, 4>::splat(2.0);
        let b = Simd::<f32, 4>::from_array([1.0, 2.0, 3.0, 4.0]);
        let c = Simd::<f32, 4>::splat(0.5);
        let fused = transform3(a, b, c, |x: f32, y: f32, z: f32| x * y + z);
        assert_eq!(fused.to_array(), [2.5, 4.5, 6.5, 8.5]);

        let d = Simd::<i32, 4>::from_array([0, 1, 0, 1]);
        let chosen = transform4(a, b, c, d, |x: f32, y: f32, z: f32, w: i32| if w == 1 { x } else { y - z });
        assert_eq!(chosen.to_array(), [0.5, 2.0, 2.5, 2.0]);
    }
}
