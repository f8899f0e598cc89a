//! Dynamically typed leaf values.
//!
//! A [`Scalar`] is what a caller hands in before a dtype has been chosen:
//! an integer of arbitrary sign and width up to 128 bits, a double, or a
//! double-precision complex number. Dtype inference works on the
//! [`ScalarKind`] ordering `Int < Float < Complex`.

use core::fmt;

use half::f16;
use num_complex::{Complex32, Complex64};

use crate::dtype::{Dtype, Element, with_element};

/// A single numeric value not yet bound to a dtype.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Scalar {
    Int(i128),
    Float(f64),
    Complex(Complex64),
}

/// The promotion lattice used for dtype inference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ScalarKind {
    Int,
    Float,
    Complex,
}

impl Scalar {
    #[inline]
    pub fn kind(&self) -> ScalarKind {
        match self {
            Self::Int(_) => ScalarKind::Int,
            Self::Float(_) => ScalarKind::Float,
            Self::Complex(_) => ScalarKind::Complex,
        }
    }

    /// Integer view used by every integer cast.
    ///
    /// Floats truncate toward zero and saturate at the `i128` range, NaN maps
    /// to zero. Complex values contribute their real part.
    ///
    /// NumPy leaves NaN, infinities and out-of-range floats to the C cast,
    /// which on x86 yields the `INT_MIN` bit pattern of the target type, so
    /// results for those inputs differ from NumPy's.
    #[inline]
    #[allow(clippy::cast_possible_truncation)]
    pub fn to_wrapping_int(self) -> i128 {
        match self {
            Self::Int(v) => v,
            Self::Float(v) => v as i128,
            Self::Complex(c) => c.re as i128,
        }
    }

    /// Encode this value as `dtype` into `out[..dtype.itemsize()]`.
    #[inline]
    pub fn write_as(self, dtype: Dtype, out: &mut [u8]) {
        with_element!(dtype, T => T::from_scalar(self).write_ne(out));
    }

    /// Decode one element of `dtype` from the front of `bytes`.
    #[inline]
    pub fn read_as(dtype: Dtype, bytes: &[u8]) -> Scalar {
        with_element!(dtype, T => T::read_ne(bytes).into_scalar())
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v:?}"),
            Self::Complex(c) => {
                if c.im.is_sign_negative() {
                    write!(f, "({:?}-{:?}j)", c.re, -c.im)
                } else {
                    write!(f, "({:?}+{:?}j)", c.re, c.im)
                }
            }
        }
    }
}

macro_rules! impl_from_int {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Scalar {
                #[inline]
                fn from(v: $ty) -> Self {
                    Self::Int(i128::from(v))
                }
            }
        )*
    };
}

impl_from_int!(i8, i16, i32, i64, i128, u8, u16, u32, u64);

impl From<bool> for Scalar {
    fn from(v: bool) -> Self {
        Self::Int(i128::from(v))
    }
}

impl From<f32> for Scalar {
    fn from(v: f32) -> Self {
        Self::Float(f64::from(v))
    }
}

impl From<f64> for Scalar {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<f16> for Scalar {
    fn from(v: f16) -> Self {
        Self::Float(v.to_f64())
    }
}

impl From<Complex32> for Scalar {
    fn from(v: Complex32) -> Self {
        Self::Complex(Complex64::new(f64::from(v.re), f64::from(v.im)))
    }
}

impl From<Complex64> for Scalar {
    fn from(v: Complex64) -> Self {
        Self::Complex(v)
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_ordering() {
        assert!(ScalarKind::Int < ScalarKind::Float);
        assert!(ScalarKind::Float < ScalarKind::Complex);
        assert_eq!(
            [ScalarKind::Float, ScalarKind::Int, ScalarKind::Complex]
                .into_iter()
                .max(),
            Some(ScalarKind::Complex)
        );
    }

    #[test]
    fn test_from_primitives() {
        assert_eq!(Scalar::from(25_u8), Scalar::Int(25));
        assert_eq!(Scalar::from(u64::MAX), Scalar::Int(i128::from(u64::MAX)));
        assert_eq!(Scalar::from(true), Scalar::Int(1));
        assert_eq!(Scalar::from(0.5_f32), Scalar::Float(0.5));
        assert_eq!(Scalar::from(Complex32::new(1.0, 2.0)).kind(), ScalarKind::Complex);
    }

    #[test]
    fn test_write_as_wraps() {
        let mut out = [0u8; 1];
        Scalar::Int(300).write_as(Dtype::Int8, &mut out);
        assert_eq!(out, [0x2C]);
        Scalar::Int(-1).write_as(Dtype::Uint8, &mut out);
        assert_eq!(out, [0xFF]);
    }

    #[test]
    fn test_non_finite_floats_to_int() {
        assert_eq!(Scalar::Float(f64::NAN).to_wrapping_int(), 0);
        assert_eq!(Scalar::Float(-2.9).to_wrapping_int(), -2);
        assert_eq!(Scalar::Float(f64::INFINITY).to_wrapping_int(), i128::MAX);
        assert_eq!(Scalar::Float(f64::NEG_INFINITY).to_wrapping_int(), i128::MIN);

        let mut out = [0u8; 4];
        Scalar::Float(f64::INFINITY).write_as(Dtype::Int32, &mut out);
        assert_eq!(i32::from_ne_bytes(out), -1);
        Scalar::Float(f64::NAN).write_as(Dtype::Uint32, &mut out);
        assert_eq!(u32::from_ne_bytes(out), 0);
    }

    #[test]
    fn test_read_as_round_trip() {
        let mut out = [0u8; 8];
        Scalar::Int(-7).write_as(Dtype::Int64, &mut out);
        assert_eq!(Scalar::read_as(Dtype::Int64, &out), Scalar::Int(-7));
        Scalar::Float(0.25).write_as(Dtype::Float32, &mut out);
        assert_eq!(Scalar::read_as(Dtype::Float32, &out), Scalar::Float(0.25));
    }

    #[test]
    fn test_complex_to_real_drops_imaginary() {
        let mut out = [0u8; 8];
        Scalar::Complex(Complex64::new(3.0, 4.0)).write_as(Dtype::Float64, &mut out);
        assert_eq!(f64::from_ne_bytes(out), 3.0);
    }

    #[test]
    fn test_display() {
        assert_eq!(Scalar::Int(25).to_string(), "25");
        assert_eq!(Scalar::Float(1.0).to_string(), "1.0");
        assert_eq!(Scalar::Complex(Complex64::new(1.0, -2.0)).to_string(), "(1.0-2.0j)");
        assert_eq!(Scalar::Complex(Complex64::new(0.0, 0.5)).to_string(), "(0.0+0.5j)");
    }
}
