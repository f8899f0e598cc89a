use crate::dtype::Dtype;

/// All errors returned by `fnp-core`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoreError {
    /// Sibling sequences at one nesting level differ in length or depth.
    ///
    /// `dim` is the nesting level of the offending siblings; `expected` and
    /// `got` are the sub-shapes found below that level.
    #[error(
        "inhomogeneous shape after {dim} dimensions: expected sub-shape {expected:?}, got {got:?}"
    )]
    InhomogeneousShape {
        dim: usize,
        expected: Vec<usize>,
        got: Vec<usize>,
    },

    /// A dtype token did not name any entry of the catalog.
    #[error("data type {token:?} not understood")]
    UnknownDtype { token: String },

    /// Typed access requested an element type that does not match the array.
    #[error("dtype mismatch: array holds {got}, requested {expected}")]
    DtypeMismatch { expected: Dtype, got: Dtype },

    /// A shape specification is invalid for the requested buffer.
    #[error("invalid shape {shape:?}: {reason}")]
    InvalidShape {
        shape: Vec<usize>,
        reason: &'static str,
    },

    /// A flat or multi-dimensional index is out of bounds.
    #[error("index {index:?} out of bounds for shape {shape:?}")]
    IndexOutOfBounds {
        index: Vec<usize>,
        shape: Vec<usize>,
    },

    /// The operation is not supported for the given input.
    #[error("invalid argument: {reason}")]
    InvalidArgument { reason: &'static str },
}

impl CoreError {
    /// Whether this error reports a ragged or inconsistently nested input.
    pub fn is_shape_error(&self) -> bool {
        matches!(self, Self::InhomogeneousShape { .. })
    }

    /// Whether this error reports an unrecognised dtype token.
    pub fn is_dtype_error(&self) -> bool {
        matches!(self, Self::UnknownDtype { .. })
    }
}

/// Convenience alias used throughout `fnp-core`.
pub type Result<T> = std::result::Result<T, CoreError>;
