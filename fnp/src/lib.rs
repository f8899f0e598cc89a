//! # fnp
//!
//! NumPy-compatible array construction in pure Rust.
//!
//! One `use fnp::prelude::*;` gives you the array type, the dtype catalog
//! and the construction functions.
//!
//! ```
//! # #[cfg(feature = "core")] {
//! use fnp::prelude::*;
//!
//! let a = array(vec![vec![1, 2, 3], vec![4, 5, 6]], Dtype::Int32).unwrap();
//! assert_eq!(a.shape(), &[2, 3]);
//! assert_eq!(a.strides(), &[12, 4]);
//! assert_eq!(ndarray(&[]).unwrap().ndim(), 0);
//! # }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Enables |
//! |---------|---------|
//! | `core` *(default)* | Arrays, dtypes, construction and introspection |

#[cfg(feature = "core")]
pub use fnp_core as core;

/// Glob-import convenience: `use fnp::prelude::*;`
pub mod prelude {
    #[cfg(feature = "core")]
    pub use fnp_core::prelude::*;
}
