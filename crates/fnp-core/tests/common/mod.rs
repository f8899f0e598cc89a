//! Interchangeable array backends for the integration tests.
//!
//! [`Fnp`] builds arrays with `fnp-core`; [`Reference`] builds the same
//! arrays with the `ndarray` crate, casting with Rust `as` conversions
//! (two's-complement truncation for integers, IEEE rounding for floats).
//! Test bodies are written once against [`Backend`] and run on both.
//!
//! Because the reference casts the same way `fnp-core` does, the overflow
//! parity cases only check that both agree; the NumPy results themselves are
//! pinned as literals in `construction.rs`.
#![allow(dead_code)]

use fnp_core::{Array, ArrayOptions, Dtype, Source};
use half::f16;
use ndarray::{ArrayD, IxDyn};
use num_complex::{Complex32, Complex64};

/// The attributes the reference library exposes after construction.
pub trait ArrayLike {
    fn shape(&self) -> Vec<usize>;
    fn strides(&self) -> Vec<isize>;
    fn size(&self) -> usize;
    fn ndim(&self) -> usize;
    fn itemsize(&self) -> usize;
    fn tobytes(&self) -> Vec<u8>;
}

/// Everything observable about one array, for whole-value comparison.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub shape: Vec<usize>,
    pub strides: Vec<isize>,
    pub size: usize,
    pub ndim: usize,
    pub itemsize: usize,
    pub bytes: Vec<u8>,
}

impl Snapshot {
    pub fn of<A: ArrayLike>(a: &A) -> Self {
        Self {
            shape: a.shape(),
            strides: a.strides(),
            size: a.size(),
            ndim: a.ndim(),
            itemsize: a.itemsize(),
            bytes: a.tobytes(),
        }
    }
}

/// A construction API under test.
pub trait Backend {
    type Array: ArrayLike;

    /// Zero-filled float64 array of `shape`.
    fn ndarray(shape: &[usize]) -> Self::Array;

    /// Integer `values` laid out row-major in `shape` (`&[]` for a scalar),
    /// stored as `dtype`, or as the inferred int64 when `None`.
    fn array(values: &[i64], shape: &[usize], dtype: Option<Dtype>) -> Self::Array;
}

// ---------------------------------------------------------------------------
// fnp
// ---------------------------------------------------------------------------

pub struct Fnp;

impl ArrayLike for Array {
    fn shape(&self) -> Vec<usize> {
        Array::shape(self).to_vec()
    }

    fn strides(&self) -> Vec<isize> {
        Array::strides(self).to_vec()
    }

    fn size(&self) -> usize {
        Array::size(self)
    }

    fn ndim(&self) -> usize {
        Array::ndim(self)
    }

    fn itemsize(&self) -> usize {
        Array::itemsize(self)
    }

    fn tobytes(&self) -> Vec<u8> {
        self.to_bytes()
    }
}

/// Nest `values` into sequences following `shape`.
pub fn nest(values: &[i64], shape: &[usize]) -> Source {
    match shape.split_first() {
        None => Source::from(values[0]),
        Some((&len, rest)) => {
            let chunk: usize = rest.iter().product();
            Source::sequence((0..len).map(|i| nest(&values[i * chunk..(i + 1) * chunk], rest)))
        }
    }
}

impl Backend for Fnp {
    type Array = Array;

    fn ndarray(shape: &[usize]) -> Array {
        fnp_core::ndarray(shape).unwrap()
    }

    fn array(values: &[i64], shape: &[usize], dtype: Option<Dtype>) -> Array {
        let options = ArrayOptions {
            dtype,
            ..ArrayOptions::default()
        };
        fnp_core::array(nest(values, shape), options).unwrap()
    }
}

// ---------------------------------------------------------------------------
// ndarray reference
// ---------------------------------------------------------------------------

pub struct Reference;

/// Native-endian bytes of one element.
trait NativeBytes {
    fn extend_bytes(&self, out: &mut Vec<u8>);
}

/// The reference cast from a Python-sized integer.
trait CastFromI64 {
    fn cast_from(v: i64) -> Self;
}

macro_rules! impl_primitive {
    ($($ty:ty),*) => {
        $(
            impl NativeBytes for $ty {
                fn extend_bytes(&self, out: &mut Vec<u8>) {
                    out.extend_from_slice(&self.to_ne_bytes());
                }
            }

            impl CastFromI64 for $ty {
                #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
                fn cast_from(v: i64) -> Self {
                    v as $ty
                }
            }
        )*
    };
}

impl_primitive!(i8, i16, i32, i64, u8, u16, u32, u64, f32, f64);

impl NativeBytes for f16 {
    fn extend_bytes(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.to_ne_bytes());
    }
}

impl CastFromI64 for f16 {
    #[allow(clippy::cast_precision_loss)]
    fn cast_from(v: i64) -> Self {
        f16::from_f64(v as f64)
    }
}

impl NativeBytes for Complex32 {
    fn extend_bytes(&self, out: &mut Vec<u8>) {
        self.re.extend_bytes(out);
        self.im.extend_bytes(out);
    }
}

impl CastFromI64 for Complex32 {
    #[allow(clippy::cast_precision_loss)]
    fn cast_from(v: i64) -> Self {
        Complex32::new(v as f32, 0.0)
    }
}

impl NativeBytes for Complex64 {
    fn extend_bytes(&self, out: &mut Vec<u8>) {
        self.re.extend_bytes(out);
        self.im.extend_bytes(out);
    }
}

impl CastFromI64 for Complex64 {
    #[allow(clippy::cast_precision_loss)]
    fn cast_from(v: i64) -> Self {
        Complex64::new(v as f64, 0.0)
    }
}

macro_rules! reference_arrays {
    ($($variant:ident($ty:ty) = $dtype:ident),* $(,)?) => {
        /// An `ndarray` array of any catalog element type.
        pub enum RefArray {
            $($variant(ArrayD<$ty>),)*
        }

        impl RefArray {
            fn build(values: &[i64], shape: &[usize], dtype: Dtype) -> Self {
                match dtype {
                    $(
                        Dtype::$dtype => {
                            let data: Vec<$ty> = values.iter().map(|&v| <$ty>::cast_from(v)).collect();
                            RefArray::$variant(ArrayD::from_shape_vec(IxDyn(shape), data).unwrap())
                        }
                    )*
                }
            }
        }

        impl ArrayLike for RefArray {
            fn shape(&self) -> Vec<usize> {
                match self {
                    $(RefArray::$variant(a) => a.shape().to_vec(),)*
                }
            }

            fn strides(&self) -> Vec<isize> {
                let itemsize = isize::try_from(self.itemsize()).unwrap();
                match self {
                    $(RefArray::$variant(a) => a.strides().iter().map(|s| s * itemsize).collect(),)*
                }
            }

            fn size(&self) -> usize {
                match self {
                    $(RefArray::$variant(a) => a.len(),)*
                }
            }

            fn ndim(&self) -> usize {
                match self {
                    $(RefArray::$variant(a) => a.ndim(),)*
                }
            }

            fn itemsize(&self) -> usize {
                match self {
                    $(RefArray::$variant(_) => size_of::<$ty>(),)*
                }
            }

            fn tobytes(&self) -> Vec<u8> {
                let mut out = Vec::new();
                match self {
                    $(RefArray::$variant(a) => a.iter().for_each(|v| v.extend_bytes(&mut out)),)*
                }
                out
            }
        }
    };
}

reference_arrays! {
    I8(i8) = Int8,
    I16(i16) = Int16,
    I32(i32) = Int32,
    I64(i64) = Int64,
    U8(u8) = Uint8,
    U16(u16) = Uint16,
    U32(u32) = Uint32,
    U64(u64) = Uint64,
    F16(f16) = Float16,
    F32(f32) = Float32,
    F64(f64) = Float64,
    C64(Complex32) = Complex64,
    C128(Complex64) = Complex128,
}

impl Backend for Reference {
    type Array = RefArray;

    fn ndarray(shape: &[usize]) -> RefArray {
        RefArray::F64(ArrayD::zeros(IxDyn(shape)))
    }

    fn array(values: &[i64], shape: &[usize], dtype: Option<Dtype>) -> RefArray {
        RefArray::build(values, shape, dtype.unwrap_or(Dtype::Int64))
    }
}
