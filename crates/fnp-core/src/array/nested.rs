//! Construction from nested input: shape discovery, dtype inference and
//! C-order serialization of every leaf.

use tracing::{debug, trace, warn};

use crate::dtype::Dtype;
use crate::error::{CoreError, Result};
use crate::options::{ArrayOptions, DEFAULT_FLOAT_DTYPE};
use crate::scalar::ScalarKind;
use crate::source::Source;

use super::{Array, Layout};

/// Build an array from a scalar, a nested sequence, or another array.
///
/// The shape has one entry per nesting level. Without an explicit dtype, an
/// input made only of arrays sharing one dtype keeps that dtype; otherwise
/// the widest leaf kind decides: integers give `int64`, floats `float64`,
/// complex values `complex128`. Values that do not fit the target dtype wrap
/// around rather than fail.
///
/// ```
/// # use fnp_core::{array, ArrayOptions, Dtype};
/// let a = array(vec![vec![1, 2, 3], vec![4, 5, 6]], Dtype::Int32).unwrap();
/// assert_eq!(a.shape(), &[2, 3]);
/// assert_eq!(a.strides(), &[12, 4]);
///
/// let wrapped = array(300, Dtype::Int8).unwrap();
/// assert_eq!(wrapped.to_bytes(), vec![0x2C]);
///
/// assert!(array(vec![vec![1, 2], vec![3]], ArrayOptions::default()).is_err());
/// ```
pub fn array(source: impl Into<Source>, options: impl Into<ArrayOptions>) -> Result<Array> {
    let options = options.into();
    match source.into() {
        Source::Array(existing) => from_array(existing, options),
        source => from_nested(&source, options.dtype),
    }
}

/// Create a zero-filled `float64` array of the given shape.
///
/// `ndarray(&[])` is zero-dimensional: its shape and strides are empty.
pub fn ndarray(shape: &[usize]) -> Result<Array> {
    Array::zeros(shape, DEFAULT_FLOAT_DTYPE)
}

fn from_array(existing: Array, options: ArrayOptions) -> Result<Array> {
    let dtype = options.dtype.unwrap_or(existing.dtype);
    if dtype == existing.dtype {
        if options.copy {
            debug!(shape = ?existing.shape(), %dtype, "copying array");
            Ok(existing.copy())
        } else {
            debug!(shape = ?existing.shape(), %dtype, "aliasing array buffer");
            Ok(existing)
        }
    } else {
        existing.astype(dtype)
    }
}

fn from_nested(source: &Source, requested: Option<Dtype>) -> Result<Array> {
    let discovered = discover(source, 0)?;

    let dtype = requested.unwrap_or_else(|| {
        let inferred = discovered.leaves.dtype();
        trace!(leaves = ?discovered.leaves, %inferred, "inferred dtype");
        inferred
    });
    if discovered.leaves.kind() == Some(ScalarKind::Complex) && !dtype.is_complex() {
        warn!(%dtype, "casting complex values to a real dtype discards the imaginary part");
    }

    let layout = Layout::new(&discovered.shape, dtype.itemsize())?;
    let mut buffer = vec![0u8; layout.nbytes];
    let mut offset = 0;
    write_leaves(source, dtype, &mut buffer, &mut offset);

    debug!(shape = ?discovered.shape, %dtype, nbytes = layout.nbytes, "built array");
    Array::from_parts(buffer.into(), &discovered.shape, dtype)
}

/// Shape and leaf summary of a (sub-)tree.
#[derive(Debug)]
struct Discovered {
    shape: Vec<usize>,
    leaves: Leaves,
}

/// What the leaves of a (sub-)tree agree on, for dtype inference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Leaves {
    /// No leaves at all.
    Empty,
    /// Every leaf comes from nested arrays of this one dtype.
    Arrays(Dtype),
    /// Scalar or mixed leaves; only the widest kind survives.
    Kind(ScalarKind),
}

impl Leaves {
    fn kind(self) -> Option<ScalarKind> {
        match self {
            Self::Empty => None,
            Self::Arrays(dtype) => Some(dtype.kind().scalar_kind()),
            Self::Kind(kind) => Some(kind),
        }
    }

    fn merge(self, other: Self) -> Self {
        match (self, other) {
            (Self::Empty, leaves) | (leaves, Self::Empty) => leaves,
            (Self::Arrays(a), Self::Arrays(b)) if a == b => self,
            _ => self.kind().max(other.kind()).map_or(Self::Empty, Self::Kind),
        }
    }

    /// Dtype used when none is requested: a shared array dtype is kept,
    /// anything else falls back to the default for the widest kind.
    fn dtype(self) -> Dtype {
        match self {
            Self::Empty => DEFAULT_FLOAT_DTYPE,
            Self::Arrays(dtype) => dtype,
            Self::Kind(kind) => Dtype::default_for(kind),
        }
    }
}

fn discover(source: &Source, depth: usize) -> Result<Discovered> {
    match source {
        Source::Scalar(value) => Ok(Discovered {
            shape: Vec::new(),
            leaves: Leaves::Kind(value.kind()),
        }),
        Source::Array(nested) => Ok(Discovered {
            shape: nested.shape().to_vec(),
            leaves: Leaves::Arrays(nested.dtype()),
        }),
        Source::Sequence(items) => {
            let Some((first, rest)) = items.split_first() else {
                return Ok(Discovered {
                    shape: vec![0],
                    leaves: Leaves::Empty,
                });
            };
            let mut found = discover(first, depth + 1)?;
            for item in rest {
                let sibling = discover(item, depth + 1)?;
                if sibling.shape != found.shape {
                    return Err(CoreError::InhomogeneousShape {
                        dim: depth + 1,
                        expected: found.shape,
                        got: sibling.shape,
                    });
                }
                found.leaves = found.leaves.merge(sibling.leaves);
            }
            found.shape.insert(0, items.len());
            Ok(found)
        }
    }
}

/// Serialize leaves in C order. The tree must already have passed
/// [`discover`], so every write lands inside `out`.
fn write_leaves(source: &Source, dtype: Dtype, out: &mut [u8], offset: &mut usize) {
    let itemsize = dtype.itemsize();
    match source {
        Source::Scalar(value) => {
            value.write_as(dtype, &mut out[*offset..*offset + itemsize]);
            *offset += itemsize;
        }
        Source::Sequence(items) => {
            for item in items {
                write_leaves(item, dtype, out, offset);
            }
        }
        Source::Array(nested) if nested.dtype == dtype => {
            let bytes = nested.as_bytes();
            out[*offset..*offset + bytes.len()].copy_from_slice(bytes);
            *offset += bytes.len();
        }
        Source::Array(nested) => {
            for value in nested.iter() {
                value.write_as(dtype, &mut out[*offset..*offset + itemsize]);
                *offset += itemsize;
            }
        }
    }
}
