//! Array creation functions analogous to `np.zeros`, `np.ones`, etc.

use std::sync::Arc;

use crate::dtype::{Dtype, Element};
use crate::error::{CoreError, Result};
use crate::scalar::Scalar;

use super::{Array, Layout};

impl Array {
    /// Create an array filled with zeros.
    ///
    /// ```
    /// # use fnp_core::{Array, Dtype};
    /// let a = Array::zeros(&[2, 3], Dtype::Int16).unwrap();
    /// assert_eq!(a.strides(), &[6, 2]);
    /// assert!(a.as_bytes().iter().all(|&b| b == 0));
    /// ```
    pub fn zeros(shape: &[usize], dtype: Dtype) -> Result<Self> {
        let layout = Layout::new(shape, dtype.itemsize())?;
        Self::from_parts(vec![0u8; layout.nbytes].into(), shape, dtype)
    }

    /// Create an array filled with ones.
    pub fn ones(shape: &[usize], dtype: Dtype) -> Result<Self> {
        Self::full(shape, Scalar::Int(1), Some(dtype))
    }

    /// Create an array without meaningful contents.
    ///
    /// The buffer is zero-filled; callers must not rely on that.
    pub fn empty(shape: &[usize], dtype: Dtype) -> Result<Self> {
        Self::zeros(shape, dtype)
    }

    /// Create an array filled with a constant value.
    ///
    /// Without an explicit dtype the default dtype for the value's kind is
    /// used.
    pub fn full(shape: &[usize], value: impl Into<Scalar>, dtype: Option<Dtype>) -> Result<Self> {
        let value = value.into();
        let dtype = dtype.unwrap_or_else(|| Dtype::default_for(value.kind()));
        let layout = Layout::new(shape, dtype.itemsize())?;

        let mut item = [0u8; 16];
        value.write_as(dtype, &mut item);
        let buffer = item[..dtype.itemsize()].repeat(layout.nbytes / dtype.itemsize());

        Self::from_parts(buffer.into(), shape, dtype)
    }

    /// Create a zero-dimensional array holding `value`.
    pub fn scalar<T: Element>(value: T) -> Self {
        let mut buffer = vec![0u8; T::DTYPE.itemsize()];
        value.write_ne(&mut buffer);
        Self {
            buffer: buffer.into(),
            shape: super::Shape::new(),
            strides: super::Strides::new(),
            dtype: T::DTYPE,
        }
    }

    /// Create an array from a flat data vector and a shape.
    ///
    /// Returns an error if the product of `shape` does not equal `data.len()`.
    ///
    /// ```
    /// # use fnp_core::Array;
    /// let a = Array::from_vec(vec![1.0_f32, 2.0, 3.0, 4.0], &[2, 2]).unwrap();
    /// assert_eq!(a.strides(), &[8, 4]);
    /// ```
    pub fn from_vec<T: Element>(data: Vec<T>, shape: &[usize]) -> Result<Self> {
        let itemsize = T::DTYPE.itemsize();
        let layout = Layout::new(shape, itemsize)?;
        if layout.nbytes / itemsize != data.len() {
            return Err(CoreError::InvalidShape {
                shape: shape.to_vec(),
                reason: "shape product does not match data length",
            });
        }
        let mut buffer = vec![0u8; layout.nbytes];
        for (value, out) in data.into_iter().zip(buffer.chunks_exact_mut(itemsize)) {
            value.write_ne(out);
        }
        Self::from_parts(buffer.into(), shape, T::DTYPE)
    }

    /// Reinterpret native-endian bytes as an array, the inverse of
    /// [`to_bytes`](Array::to_bytes).
    pub fn from_bytes(bytes: impl Into<Arc<[u8]>>, shape: &[usize], dtype: Dtype) -> Result<Self> {
        Self::from_parts(bytes.into(), shape, dtype)
    }
}
