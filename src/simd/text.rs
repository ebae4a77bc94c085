//! Text rendering, parsing and hashing.
//!
//! Vectors print as `(v0;v1;...;vn-1)`. Formatter flags apply to every lane,
//! so `{:.2}` rounds each float and `{:x}` prints each integer in hex.
//! Parsing is lenient about punctuation: any run of characters that cannot be
//! part of a number separates two values, so `(1;2;3;4)`, `[1, 2, 3, 4]` and
//! `1 2 3 4` all parse to the same `Simd<i32, 4>`.
//!
//! ```
//! use lanewise::simd::Simd;
//!
//! let v = Simd::<f32, 4>::from_array([1.0, 2.5, -3.0, 0.125]);
//! assert_eq!(format!("{}", v), "(1;2.5;-3;0.125)");
//! assert_eq!(format!("{:.1}", v), "(1.0;2.5;-3.0;0.1)");
//!
//! let parsed: Simd<f32, 4> = "[1, 2.5, -3, 0.125]".parse().unwrap();
//! assert_eq!(parsed, v);
//! ```

use core::fmt;
use core::hash::{Hash, Hasher};
use core::str::FromStr;

use num::Complex;

use crate::error::{Result, VectorError};
use crate::simd::complex::ComplexSimd;
use crate::simd::mask::Mask;
use crate::simd::storage::{LaneCount, SupportedShape};
use crate::simd::traits::{Element, Float, Integer, MaskElement};
use crate::simd::vector::Simd;

fn write_lanes<L>(f: &mut fmt::Formatter<'_>, lanes: &[L], mut write: impl FnMut(&L, &mut fmt::Formatter<'_>) -> fmt::Result) -> fmt::Result {
    f.write_str("(")?;
    for (i, lane) in lanes.iter().enumerate() {
        if i > 0 {
            f.write_str(";")?;
        }
        write(lane, f)?;
    }
    f.write_str(")")
}

/// Reads `N` values from `s`, each token parsed by `parse`.
///
/// Tokens are maximal runs of characters accepted by `numeric`. Values past
/// the `N`th are ignored.
fn parse_lanes<L, const N: usize>(
    s: &str,
    numeric: impl Fn(char) -> bool,
    parse: impl Fn(&str) -> Option<L>,
) -> Result<[L; N]>
where
    L: Copy + Default,
{
    let mut lanes = [L::default(); N];
    let mut found = 0;
    for token in s.split(|c: char| !numeric(c)).filter(|token| !token.is_empty()) {
        if found == N {
            break;
        }
        match parse(token) {
            Some(value) => {
                lanes[found] = value;
                found += 1;
            }
            None => break,
        }
    }

    if found < N {
        return Err(VectorError::Parse { expected: N, found });
    }
    Ok(lanes)
}

#[inline]
fn is_real_char(c: char) -> bool {
    c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E')
}

#[inline]
fn is_complex_char(c: char) -> bool {
    is_real_char(c) || c == 'i'
}

impl<T: Element, const N: usize> fmt::Display for Simd<T, N>
where
    LaneCount<N>: SupportedShape<T::Width>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_lanes(f, self.as_array(), fmt::Display::fmt)
    }
}

macro_rules! impl_radix_fmt {
    ($($fmt:ident),*) => {
        $(
            impl<T: Integer, const N: usize> fmt::$fmt for Simd<T, N>
            where
                LaneCount<N>: SupportedShape<T::Width>,
            {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    write_lanes(f, self.as_array(), fmt::$fmt::fmt)
                }
            }
        )*
    };
}

impl_radix_fmt!(LowerHex, UpperHex, Octal, Binary);

impl<T: Element, const N: usize> FromStr for Simd<T, N>
where
    LaneCount<N>: SupportedShape<T::Width>,
{
    type Err = VectorError;

    fn from_str(s: &str) -> Result<Self> {
        parse_lanes(s, is_real_char, |token| token.parse::<T>().ok()).map(Self::from_array)
    }
}

/// Float lanes hash their bits with `-0.0` folded into `0.0`. NaN lanes
/// never compare equal, so their hashes are unconstrained.
impl<T: Element, const N: usize> Hash for Simd<T, N>
where
    LaneCount<N>: SupportedShape<T::Width>,
{
    fn hash<H: Hasher>(&self, state: &mut H) {
        for lane in self.iter() {
            lane.hash_lane(state);
        }
    }
}

impl<M: MaskElement, const N: usize> fmt::Display for Mask<M, N>
where
    LaneCount<N>: SupportedShape<M::Width>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_lanes(f, &self.to_array(), |lane, f| fmt::Display::fmt(&u8::from(*lane), f))
    }
}

/// Non-zero values read as `true`.
impl<M: MaskElement, const N: usize> FromStr for Mask<M, N>
where
    LaneCount<N>: SupportedShape<M::Width>,
{
    type Err = VectorError;

    fn from_str(s: &str) -> Result<Self> {
        parse_lanes(s, is_real_char, |token| token.parse::<M>().ok().map(|value| value != M::ZERO))
            .map(Self::from_array)
    }
}

impl<M: MaskElement, const N: usize> Hash for Mask<M, N>
where
    LaneCount<N>: SupportedShape<M::Width>,
{
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.to_array().hash(state);
    }
}

impl<F: Float, const N: usize> fmt::Display for ComplexSimd<F, N>
where
    LaneCount<N>: SupportedShape<F::Width>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_lanes(f, &self.to_array(), fmt::Display::fmt)
    }
}

/// Lanes use `num::Complex` syntax: `1+2i`, `-0.5i`, `3`.
impl<F: Float, const N: usize> FromStr for ComplexSimd<F, N>
where
    LaneCount<N>: SupportedShape<F::Width>,
{
    type Err = VectorError;

    fn from_str(s: &str) -> Result<Self> {
        parse_lanes(s, is_complex_char, |token| token.parse::<Complex<F>>().ok()).map(Self::from_array)
    }
}

impl<F: Float, const N: usize> Hash for ComplexSimd<F, N>
where
    LaneCount<N>: SupportedShape<F::Width>,
{
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.re.hash(state);
        self.im.hash(state);
    }
}
