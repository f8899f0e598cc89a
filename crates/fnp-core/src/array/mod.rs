//! N-dimensional array with a fixed dtype and contiguous byte storage.
//!
//! The [`Array`] type is the single data structure of `fnp`, mirroring
//! NumPy's `ndarray` for construction and introspection. Elements are stored
//! in row-major (C) order as native-endian bytes; [`strides`](Array::strides)
//! are measured in bytes.

mod cast;
mod create;
mod display;
mod nested;

pub use nested::{array, ndarray};

use std::sync::Arc;

use smallvec::SmallVec;

use crate::dtype::{Dtype, Element};
use crate::error::{CoreError, Result};
use crate::scalar::Scalar;

/// Shape storage: inline for up to four dimensions.
pub type Shape = SmallVec<[usize; 4]>;

/// Byte strides, one per dimension.
pub type Strides = SmallVec<[isize; 4]>;

/// An immutable-shape, fixed-dtype, C-contiguous array.
///
/// The buffer is reference counted and never mutated, so [`Clone`] shares it.
/// Use [`copy`](Array::copy) to obtain an array with its own buffer.
#[derive(Debug, Clone)]
pub struct Array {
    buffer: Arc<[u8]>,
    shape: Shape,
    strides: Strides,
    dtype: Dtype,
}

impl Array {
    /// Assemble an array, rejecting buffers whose length disagrees with
    /// `shape` and `dtype`.
    fn from_parts(buffer: Arc<[u8]>, shape: &[usize], dtype: Dtype) -> Result<Self> {
        let layout = Layout::new(shape, dtype.itemsize())?;
        if buffer.len() != layout.nbytes {
            return Err(CoreError::InvalidShape {
                shape: shape.to_vec(),
                reason: "buffer length does not match shape and itemsize",
            });
        }
        Ok(Self {
            buffer,
            shape: Shape::from_slice(shape),
            strides: layout.strides,
            dtype,
        })
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    /// Per-dimension lengths; empty for a zero-dimensional array.
    #[inline]
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// Per-dimension byte steps; empty for a zero-dimensional array.
    #[inline]
    pub fn strides(&self) -> &[isize] {
        &self.strides
    }

    #[inline]
    pub fn dtype(&self) -> Dtype {
        self.dtype
    }

    /// The number of dimensions.
    #[inline]
    pub fn ndim(&self) -> usize {
        self.shape.len()
    }

    /// The total number of elements (1 for a zero-dimensional array).
    #[inline]
    pub fn size(&self) -> usize {
        self.shape.iter().product()
    }

    /// Bytes per element.
    #[inline]
    pub fn itemsize(&self) -> usize {
        self.dtype.itemsize()
    }

    /// Total bytes in the buffer, `size * itemsize`.
    #[inline]
    pub fn nbytes(&self) -> usize {
        self.buffer.len()
    }

    /// Whether the array has zero elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Length of the first dimension.
    pub fn len(&self) -> Result<usize> {
        self.shape.first().copied().ok_or(CoreError::InvalidArgument {
            reason: "len() of unsized object",
        })
    }

    /// The backing buffer.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer
    }

    /// A copy of the backing buffer, element after element in C order.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.buffer.to_vec()
    }

    /// Whether both arrays read from the same buffer.
    pub fn shares_memory(&self, other: &Array) -> bool {
        Arc::ptr_eq(&self.buffer, &other.buffer)
    }

    // ------------------------------------------------------------------
    // Element access
    // ------------------------------------------------------------------

    /// Decode the element at a C-order flat index.
    pub fn get(&self, flat: usize) -> Result<Scalar> {
        if flat >= self.size() {
            return Err(CoreError::IndexOutOfBounds {
                index: vec![flat],
                shape: self.shape.to_vec(),
            });
        }
        let offset = flat * self.itemsize();
        Ok(Scalar::read_as(self.dtype, &self.buffer[offset..]))
    }

    /// Compute the byte offset for a multi-dimensional index.
    fn byte_offset(&self, index: &[usize]) -> Result<usize> {
        let out_of_bounds = || CoreError::IndexOutOfBounds {
            index: index.to_vec(),
            shape: self.shape.to_vec(),
        };
        if index.len() != self.ndim() {
            return Err(out_of_bounds());
        }
        let mut offset = 0;
        for ((&idx, &dim), &stride) in index.iter().zip(&self.shape).zip(&self.strides) {
            if idx >= dim {
                return Err(out_of_bounds());
            }
            offset += idx * stride.unsigned_abs();
        }
        Ok(offset)
    }

    /// Decode the element at a multi-dimensional index.
    pub fn get_at(&self, index: &[usize]) -> Result<Scalar> {
        let offset = self.byte_offset(index)?;
        Ok(Scalar::read_as(self.dtype, &self.buffer[offset..]))
    }

    /// The single element of a size-1 array.
    pub fn item(&self) -> Result<Scalar> {
        if self.size() != 1 {
            return Err(CoreError::InvalidArgument {
                reason: "can only convert an array of size 1 to a scalar",
            });
        }
        Ok(Scalar::read_as(self.dtype, &self.buffer))
    }

    /// Iterate over all elements in storage order.
    pub fn iter(&self) -> impl Iterator<Item = Scalar> + '_ {
        self.buffer
            .chunks_exact(self.itemsize())
            .map(|chunk| Scalar::read_as(self.dtype, chunk))
    }

    /// Decode every element as `T`, which must be the array's element type.
    pub fn to_vec<T: Element>(&self) -> Result<Vec<T>> {
        if T::DTYPE != self.dtype {
            return Err(CoreError::DtypeMismatch {
                expected: T::DTYPE,
                got: self.dtype,
            });
        }
        Ok(self
            .buffer
            .chunks_exact(self.itemsize())
            .map(T::read_ne)
            .collect())
    }
}

impl PartialEq for Array {
    fn eq(&self, other: &Self) -> bool {
        self.dtype == other.dtype && self.shape == other.shape && self.buffer == other.buffer
    }
}

// ======================================================================
// Layout
// ======================================================================

/// Byte strides and buffer length derived from a shape and an itemsize.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Layout {
    pub(crate) strides: Strides,
    pub(crate) nbytes: usize,
}

impl Layout {
    /// Compute C-order byte strides for `shape`.
    ///
    /// The last stride is `itemsize` and each earlier stride is the next
    /// one times the next dimension, where a zero-length dimension counts
    /// as one so that strides stay meaningful for empty arrays.
    pub(crate) fn new(shape: &[usize], itemsize: usize) -> Result<Self> {
        let too_big = || CoreError::InvalidShape {
            shape: shape.to_vec(),
            reason: "array is too big",
        };

        let mut strides: Strides = SmallVec::from_elem(0, shape.len());
        let mut step = itemsize;
        for (stride, &dim) in strides.iter_mut().zip(shape).rev() {
            *stride = isize::try_from(step).map_err(|_| too_big())?;
            step = step.checked_mul(dim.max(1)).ok_or_else(too_big)?;
        }

        let nbytes = shape
            .iter()
            .try_fold(itemsize, |acc, &dim| acc.checked_mul(dim))
            .filter(|&n| isize::try_from(n).is_ok())
            .ok_or_else(too_big)?;

        Ok(Self { strides, nbytes })
    }
}
