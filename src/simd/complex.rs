//! Complex vectors.
//!
//! A `ComplexSimd<F, N>` is two floating-point vectors of `N` lanes: the real
//! parts and the imaginary parts. Lanes are not interleaved, so addition and
//! subtraction are two independent vector operations, and multiplication and
//! division are a short fixed sequence of them:
//!
//! ```text
//! (a + bi)(c + di) = (ac - bd) + (ad + bc)i
//! (a + bi)/(c + di) = ((ac + bd) + (bc - ad)i) / (c^2 + d^2)
//! ```
//!
//! Single lanes are read and written as [`num::Complex`].

use core::fmt;
use core::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use num::Complex;

use crate::error::Result;
use crate::simd::cmp::MaskFor;
use crate::simd::storage::{LaneCount, SupportedShape};
use crate::simd::traits::Float;
use crate::simd::vector::Simd;

/// A vector of `N` complex lanes with components of type `F`.
pub struct ComplexSimd<F: Float, const N: usize>
where
    LaneCount<N>: SupportedShape<F::Width>,
{
    /// Real parts.
    pub re: Simd<F, N>,
    /// Imaginary parts.
    pub im: Simd<F, N>,
}

impl<F: Float, const N: usize> ComplexSimd<F, N>
where
    LaneCount<N>: SupportedShape<F::Width>,
{
    /// Number of lanes.
    pub const LANES: usize = N;

    #[inline(always)]
    pub const fn new(re: Simd<F, N>, im: Simd<F, N>) -> Self {
        Self { re, im }
    }

    /// Real vector with zero imaginary parts.
    #[inline(always)]
    pub fn from_real(re: Simd<F, N>) -> Self {
        Self::new(re, Simd::splat(F::ZERO))
    }

    #[inline(always)]
    pub fn splat(value: Complex<F>) -> Self {
        Self::new(Simd::splat(value.re), Simd::splat(value.im))
    }

    /// Decomposes per-lane complex values into the real and imaginary vectors.
    #[inline(always)]
    pub fn from_array(lanes: [Complex<F>; N]) -> Self {
        Self::new(
            Simd::from_array(lanes.map(|lane| lane.re)),
            Simd::from_array(lanes.map(|lane| lane.im)),
        )
    }

    #[inline(always)]
    pub fn to_array(self) -> [Complex<F>; N] {
        let re = self.re.to_array();
        let im = self.im.to_array();
        core::array::from_fn(|i| Complex::new(re[i], im[i]))
    }

    /// Checked lane read.
    #[inline(always)]
    pub fn get(&self, index: usize) -> Result<Complex<F>> {
        Ok(Complex::new(self.re.get(index)?, self.im.get(index)?))
    }

    /// Checked lane write.
    #[inline(always)]
    pub fn set(&mut self, index: usize, value: Complex<F>) -> Result<()> {
        self.re.set(index, value.re)?;
        self.im.set(index, value.im)
    }

    #[inline(always)]
    pub fn iter(&self) -> core::array::IntoIter<Complex<F>, N> {
        self.to_array().into_iter()
    }

    /// Complex conjugate.
    #[inline(always)]
    pub fn conj(self) -> Self {
        Self::new(self.re, -self.im)
    }

    /// Squared magnitude `re^2 + im^2`.
    #[inline(always)]
    pub fn norm_sqr(self) -> Simd<F, N> {
        self.re * self.re + self.im * self.im
    }

    /// Magnitude, computed without intermediate overflow.
    #[inline(always)]
    pub fn norm(self) -> Simd<F, N> {
        self.re.zip_map(self.im, F::hypot)
    }

    /// Phase angle in `(-pi, pi]`.
    #[inline(always)]
    pub fn arg(self) -> Simd<F, N> {
        self.im.zip_map(self.re, F::atan2)
    }

    /// Lanes where both components are equal.
    #[inline(always)]
    pub fn simd_eq(self, other: Self) -> MaskFor<F, N> {
        self.re.simd_eq(other.re) & self.im.simd_eq(other.im)
    }

    /// Lanes where either component differs.
    #[inline(always)]
    pub fn simd_ne(self, other: Self) -> MaskFor<F, N> {
        self.re.simd_ne(other.re) | self.im.simd_ne(other.im)
    }

    /// Converts both components to another float width.
    #[inline(always)]
    pub fn cast<G: Float>(self) -> ComplexSimd<G, N>
    where
        F: num::traits::AsPrimitive<G>,
        LaneCount<N>: SupportedShape<G::Width>,
    {
        ComplexSimd::new(self.re.cast(), self.im.cast())
    }
}

impl<F: Float, const N: usize> Clone for ComplexSimd<F, N>
where
    LaneCount<N>: SupportedShape<F::Width>,
{
    #[inline(always)]
    fn clone(&self) -> Self {
        *self
    }
}

impl<F: Float, const N: usize> Copy for ComplexSimd<F, N> where LaneCount<N>: SupportedShape<F::Width> {}

impl<F: Float, const N: usize> Default for ComplexSimd<F, N>
where
    LaneCount<N>: SupportedShape<F::Width>,
{
    #[inline(always)]
    fn default() -> Self {
        Self::new(Simd::default(), Simd::default())
    }
}

impl<F: Float, const N: usize> PartialEq for ComplexSimd<F, N>
where
    LaneCount<N>: SupportedShape<F::Width>,
{
    #[inline(always)]
    fn eq(&self, other: &Self) -> bool {
        self.re == other.re && self.im == other.im
    }
}

impl<F: Float, const N: usize> fmt::Debug for ComplexSimd<F, N>
where
    LaneCount<N>: SupportedShape<F::Width>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComplexSimd")
            .field("re", self.re.as_array())
            .field("im", self.im.as_array())
            .finish()
    }
}

impl<F: Float, const N: usize> From<[Complex<F>; N]> for ComplexSimd<F, N>
where
    LaneCount<N>: SupportedShape<F::Width>,
{
    #[inline(always)]
    fn from(lanes: [Complex<F>; N]) -> Self {
        Self::from_array(lanes)
    }
}

impl<F: Float, const N: usize> Neg for ComplexSimd<F, N>
where
    LaneCount<N>: SupportedShape<F::Width>,
{
    type Output = Self;

    #[inline(always)]
    fn neg(self) -> Self {
        Self::new(-self.re, -self.im)
    }
}

impl<F: Float, const N: usize> Add for ComplexSimd<F, N>
where
    LaneCount<N>: SupportedShape<F::Width>,
{
    type Output = Self;

    #[inline(always)]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.re + rhs.re, self.im + rhs.im)
    }
}

impl<F: Float, const N: usize> Sub for ComplexSimd<F, N>
where
    LaneCount<N>: SupportedShape<F::Width>,
{
    type Output = Self;

    #[inline(always)]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.re - rhs.re, self.im - rhs.im)
    }
}

impl<F: Float, const N: usize> Mul for ComplexSimd<F, N>
where
    LaneCount<N>: SupportedShape<F::Width>,
{
    type Output = Self;

    #[inline(always)]
    fn mul(self, rhs: Self) -> Self {
        let (a, b, c, d) = (self.re, self.im, rhs.re, rhs.im);
        Self::new(a * c - b * d, a * d + b * c)
    }
}

impl<F: Float, const N: usize> Div for ComplexSimd<F, N>
where
    LaneCount<N>: SupportedShape<F::Width>,
{
    type Output = Self;

    #[inline(always)]
    fn div(self, rhs: Self) -> Self {
        let (a, b, c, d) = (self.re, self.im, rhs.re, rhs.im);
        let denominator = c * c + d * d;
        Self::new((a * c + b * d) / denominator, (b * c - a * d) / denominator)
    }
}

macro_rules! impl_complex_scalar_and_assign {
    ($($op:ident, $method:ident, $assign:ident, $assign_method:ident);* $(;)?) => {
        $(
            impl<F: Float, const N: usize> $op<Complex<F>> for ComplexSimd<F, N>
            where
                LaneCount<N>: SupportedShape<F::Width>,
            {
                type Output = Self;

                #[inline(always)]
                fn $method(self, rhs: Complex<F>) -> Self {
                    $op::$method(self, Self::splat(rhs))
                }
            }

            impl<F: Float, const N: usize> $assign for ComplexSimd<F, N>
            where
                LaneCount<N>: SupportedShape<F::Width>,
            {
                #[inline(always)]
                fn $assign_method(&mut self, rhs: Self) {
                    *self = $op::$method(*self, rhs);
                }
            }

            impl<F: Float, const N: usize> $assign<Complex<F>> for ComplexSimd<F, N>
            where
                LaneCount<N>: SupportedShape<F::Width>,
            {
                #[inline(always)]
                fn $assign_method(&mut self, rhs: Complex<F>) {
                    *self = $op::$method(*self, rhs);
                }
            }
        )*
    };
}

impl_complex_scalar_and_assign! {
    Add, add, AddAssign, add_assign;
    Sub, sub, SubAssign, sub_assign;
    Mul, mul, MulAssign, mul_assign;
    Div, div, DivAssign, div_assign;
}
