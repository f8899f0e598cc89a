//! `fnp-core`: the array core of the fnp workspace.
//!
//! Builds NumPy-compatible N-dimensional arrays from scalars and nested
//! sequences: dtype inference and wraparound casting, C-order shape and
//! stride derivation, and byte-exact serialization of the backing buffer.
//!
//! # Design
//!
//! - A closed [`Dtype`] catalog backed by a static `(name, itemsize, kind)`
//!   table; string tokens are parsed once at the boundary.
//! - Arrays own an immutable, reference-counted byte buffer, so the only
//!   sharing is the explicit zero-copy path of [`array`].
//! - No `unsafe`.

pub mod array;
pub mod dtype;
pub mod error;
pub mod options;
pub mod scalar;
pub mod source;

// Re-export key types at crate root for convenience.
pub use array::{Array, array, ndarray};
pub use dtype::{Dtype, DtypeKind, Element};
pub use error::{CoreError, Result};
pub use options::ArrayOptions;
pub use scalar::{Scalar, ScalarKind};
pub use source::Source;

/// Items intended for glob-import: `use fnp_core::prelude::*;`
pub mod prelude {
    pub use crate::array::{Array, array, ndarray};
    pub use crate::dtype::{Dtype, DtypeKind, Element};
    pub use crate::error::{CoreError, Result};
    pub use crate::options::ArrayOptions;
    pub use crate::scalar::{Scalar, ScalarKind};
    pub use crate::source::Source;
}
