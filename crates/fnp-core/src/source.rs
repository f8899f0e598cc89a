//! Nested construction input for [`array`](crate::array::array).
//!
//! A [`Source`] is a tree whose leaves are scalars or existing arrays and
//! whose interior nodes are ordered sequences. Conversions exist from the
//! primitive numeric types, from `Vec`s, slices and fixed-size arrays of
//! anything convertible, and from [`Array`].
//!
//! ```
//! # use fnp_core::source::Source;
//! let grid = Source::from(vec![vec![1, 2, 3], vec![4, 5, 6]]);
//! assert!(grid.is_sequence());
//! ```

use half::f16;
use num_complex::{Complex32, Complex64};

use crate::array::Array;
use crate::scalar::Scalar;

/// Input to array construction: a scalar, a sequence, or an existing array.
#[derive(Debug, Clone)]
pub enum Source {
    Scalar(Scalar),
    Sequence(Vec<Source>),
    Array(Array),
}

impl Source {
    /// Build a sequence node from any iterator of convertible items.
    pub fn sequence<I>(items: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Source>,
    {
        Self::Sequence(items.into_iter().map(Into::into).collect())
    }

    #[inline]
    pub fn is_sequence(&self) -> bool {
        matches!(self, Self::Sequence(_))
    }
}

impl From<Scalar> for Source {
    fn from(v: Scalar) -> Self {
        Self::Scalar(v)
    }
}

macro_rules! impl_from_scalar_like {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Source {
                #[inline]
                fn from(v: $ty) -> Self {
                    Self::Scalar(Scalar::from(v))
                }
            }
        )*
    };
}

impl_from_scalar_like!(
    bool, i8, i16, i32, i64, i128, u8, u16, u32, u64, f16, f32, f64, Complex32, Complex64
);

impl From<Array> for Source {
    fn from(v: Array) -> Self {
        Self::Array(v)
    }
}

impl From<&Array> for Source {
    fn from(v: &Array) -> Self {
        Self::Array(v.clone())
    }
}

impl<S: Into<Source>> From<Vec<S>> for Source {
    fn from(items: Vec<S>) -> Self {
        Self::sequence(items)
    }
}

impl<S: Into<Source>, const N: usize> From<[S; N]> for Source {
    fn from(items: [S; N]) -> Self {
        Self::sequence(items)
    }
}

impl<S: Clone + Into<Source>> From<&[S]> for Source {
    fn from(items: &[S]) -> Self {
        Self::sequence(items.iter().cloned())
    }
}
