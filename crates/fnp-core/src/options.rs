//! Per-call construction options and crate-wide default dtypes.

use crate::dtype::Dtype;
use crate::error::Result;

/// Dtype inferred for all-integer input.
pub const DEFAULT_INT_DTYPE: Dtype = Dtype::Int64;

/// Dtype inferred for input containing a float, and used by `ndarray(shape)`.
pub const DEFAULT_FLOAT_DTYPE: Dtype = Dtype::Float64;

/// Dtype inferred for input containing a complex value.
pub const DEFAULT_COMPLEX_DTYPE: Dtype = Dtype::Complex128;

/// Options accepted by [`array`](crate::array::array).
///
/// The default infers the dtype from the input and always copies.
///
/// ```
/// # use fnp_core::{Dtype, options::ArrayOptions};
/// let opts = ArrayOptions::new().dtype(Dtype::Int32).copy(false);
/// assert_eq!(opts.dtype, Some(Dtype::Int32));
/// assert!(!opts.copy);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArrayOptions {
    /// Target dtype; `None` infers it from the input.
    pub dtype: Option<Dtype>,
    /// When `false`, an [`Array`](crate::array::Array) input whose dtype
    /// already matches is aliased instead of copied.
    pub copy: bool,
}

impl Default for ArrayOptions {
    fn default() -> Self {
        Self {
            dtype: None,
            copy: true,
        }
    }
}

impl ArrayOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn dtype(mut self, dtype: Dtype) -> Self {
        self.dtype = Some(dtype);
        self
    }

    #[must_use]
    pub fn copy(mut self, copy: bool) -> Self {
        self.copy = copy;
        self
    }

    /// Set the dtype from a textual token such as `"int32"` or `"<f8"`.
    ///
    /// Fails with [`CoreError::UnknownDtype`](crate::CoreError::UnknownDtype)
    /// when the token names no catalog entry.
    pub fn with_dtype_name(mut self, token: &str) -> Result<Self> {
        self.dtype = Some(token.parse()?);
        Ok(self)
    }
}

impl From<Dtype> for ArrayOptions {
    fn from(dtype: Dtype) -> Self {
        Self::new().dtype(dtype)
    }
}

impl From<Option<Dtype>> for ArrayOptions {
    fn from(dtype: Option<Dtype>) -> Self {
        Self {
            dtype,
            ..Self::default()
        }
    }
}
