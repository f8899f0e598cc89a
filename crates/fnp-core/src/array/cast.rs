//! Fresh-buffer conversions: `copy` and `astype`.

use tracing::{debug, warn};

use crate::dtype::Dtype;
use crate::error::Result;
use crate::scalar::Scalar;

use super::{Array, Layout};

impl Array {
    /// An identical array in a newly allocated buffer.
    pub fn copy(&self) -> Array {
        Array {
            buffer: self.buffer.to_vec().into(),
            shape: self.shape.clone(),
            strides: self.strides.clone(),
            dtype: self.dtype,
        }
    }

    /// Cast every element to `dtype` in a newly allocated buffer.
    ///
    /// Integers wrap to the target width, floats truncate toward zero when
    /// cast to an integer dtype, and complex values lose their imaginary part
    /// when cast to a real dtype.
    ///
    /// ```
    /// # use fnp_core::{Array, Dtype};
    /// let a = Array::from_vec(vec![255_i64, 256, -1], &[3]).unwrap();
    /// let b = a.astype(Dtype::Uint8).unwrap();
    /// assert_eq!(b.to_bytes(), vec![255, 0, 255]);
    /// assert_eq!(b.strides(), &[1]);
    /// ```
    pub fn astype(&self, dtype: Dtype) -> Result<Array> {
        if dtype == self.dtype {
            return Ok(self.copy());
        }
        if self.dtype.is_complex() && !dtype.is_complex() && !self.is_empty() {
            warn!(from = %self.dtype, to = %dtype, "casting complex values to a real dtype discards the imaginary part");
        }

        let layout = Layout::new(&self.shape, dtype.itemsize())?;
        let mut buffer = vec![0u8; layout.nbytes];
        let source = self.buffer.chunks_exact(self.itemsize());
        for (chunk, out) in source.zip(buffer.chunks_exact_mut(dtype.itemsize())) {
            Scalar::read_as(self.dtype, chunk).write_as(dtype, out);
        }

        debug!(shape = ?self.shape(), from = %self.dtype, to = %dtype, "cast array");
        Ok(Array {
            buffer: buffer.into(),
            shape: self.shape.clone(),
            strides: layout.strides,
            dtype,
        })
    }
}
