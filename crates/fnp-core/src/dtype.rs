//! The closed dtype catalog and the element types that back it.
//!
//! Every [`Dtype`] variant indexes a static table of `(name, itemsize, kind)`
//! entries, so the catalog is exhaustive at compile time and string tokens
//! are only looked at once, when parsed.
//!
//! ```text
//! kind            dtypes
//! signed int      int8  int16  int32  int64
//! unsigned int    uint8 uint16 uint32 uint64
//! float           float16 float32 float64
//! complex         complex64 complex128
//! ```
//!
//! The [`Element`] trait links a Rust type to its dtype and to the native
//! byte encoding used in array buffers.

use core::fmt;
use core::str::FromStr;

use half::f16;
use num_complex::{Complex32, Complex64};

use crate::error::CoreError;
use crate::scalar::{Scalar, ScalarKind};

// ---------------------------------------------------------------------------
// Dtype
// ---------------------------------------------------------------------------

/// Element encoding of an array: kind, byte width and native byte order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Dtype {
    Int8,
    Int16,
    Int32,
    Int64,
    Uint8,
    Uint16,
    Uint32,
    Uint64,
    Float16,
    Float32,
    Float64,
    Complex64,
    Complex128,
}

/// The broad family a [`Dtype`] belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DtypeKind {
    SignedInt,
    UnsignedInt,
    Float,
    Complex,
}

impl DtypeKind {
    /// NumPy's one-character kind code.
    pub fn code(self) -> char {
        match self {
            Self::SignedInt => 'i',
            Self::UnsignedInt => 'u',
            Self::Float => 'f',
            Self::Complex => 'c',
        }
    }

    /// The scalar kind whose values this dtype family stores.
    pub fn scalar_kind(self) -> ScalarKind {
        match self {
            Self::SignedInt | Self::UnsignedInt => ScalarKind::Int,
            Self::Float => ScalarKind::Float,
            Self::Complex => ScalarKind::Complex,
        }
    }
}

/// Static description of one catalog entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DtypeInfo {
    pub dtype: Dtype,
    pub name: &'static str,
    pub itemsize: usize,
    pub kind: DtypeKind,
}

const fn info(dtype: Dtype, name: &'static str, itemsize: usize, kind: DtypeKind) -> DtypeInfo {
    DtypeInfo {
        dtype,
        name,
        itemsize,
        kind,
    }
}

/// Indexed by `Dtype as usize`.
static CATALOG: [DtypeInfo; 13] = [
    info(Dtype::Int8, "int8", 1, DtypeKind::SignedInt),
    info(Dtype::Int16, "int16", 2, DtypeKind::SignedInt),
    info(Dtype::Int32, "int32", 4, DtypeKind::SignedInt),
    info(Dtype::Int64, "int64", 8, DtypeKind::SignedInt),
    info(Dtype::Uint8, "uint8", 1, DtypeKind::UnsignedInt),
    info(Dtype::Uint16, "uint16", 2, DtypeKind::UnsignedInt),
    info(Dtype::Uint32, "uint32", 4, DtypeKind::UnsignedInt),
    info(Dtype::Uint64, "uint64", 8, DtypeKind::UnsignedInt),
    info(Dtype::Float16, "float16", 2, DtypeKind::Float),
    info(Dtype::Float32, "float32", 4, DtypeKind::Float),
    info(Dtype::Float64, "float64", 8, DtypeKind::Float),
    info(Dtype::Complex64, "complex64", 8, DtypeKind::Complex),
    info(Dtype::Complex128, "complex128", 16, DtypeKind::Complex),
];

#[cfg(target_endian = "little")]
const NATIVE_ORDER: char = '<';
#[cfg(target_endian = "big")]
const NATIVE_ORDER: char = '>';

impl Dtype {
    /// Every dtype in catalog order.
    pub const ALL: [Dtype; 13] = [
        Dtype::Int8,
        Dtype::Int16,
        Dtype::Int32,
        Dtype::Int64,
        Dtype::Uint8,
        Dtype::Uint16,
        Dtype::Uint32,
        Dtype::Uint64,
        Dtype::Float16,
        Dtype::Float32,
        Dtype::Float64,
        Dtype::Complex64,
        Dtype::Complex128,
    ];

    /// The catalog entry for this dtype.
    #[inline]
    pub fn info(self) -> &'static DtypeInfo {
        &CATALOG[self as usize]
    }

    /// Canonical name, e.g. `"int32"`.
    #[inline]
    pub fn name(self) -> &'static str {
        self.info().name
    }

    /// Bytes per element.
    #[inline]
    pub fn itemsize(self) -> usize {
        self.info().itemsize
    }

    #[inline]
    pub fn kind(self) -> DtypeKind {
        self.info().kind
    }

    /// NumPy type string with explicit byte order, e.g. `"<i4"` or `"|u1"`.
    pub fn type_str(self) -> String {
        let order = if self.itemsize() == 1 {
            '|'
        } else {
            NATIVE_ORDER
        };
        format!("{order}{}{}", self.kind().code(), self.itemsize())
    }

    /// The dtype inferred for leaves of the given kind when none is requested.
    pub fn default_for(kind: ScalarKind) -> Dtype {
        match kind {
            ScalarKind::Int => Dtype::Int64,
            ScalarKind::Float => Dtype::Float64,
            ScalarKind::Complex => Dtype::Complex128,
        }
    }

    /// Whether values of this dtype carry an imaginary lane.
    #[inline]
    pub fn is_complex(self) -> bool {
        self.kind() == DtypeKind::Complex
    }
}

impl fmt::Display for Dtype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Dtype {
    type Err = CoreError;

    /// Parse a canonical name (`"float32"`), a type string (`"<f4"`, `"f4"`)
    /// or a common alias (`"double"`).
    fn from_str(token: &str) -> Result<Self, Self::Err> {
        let unknown = || CoreError::UnknownDtype {
            token: token.to_owned(),
        };

        let body = match token.chars().next() {
            Some(c) if c == '=' || c == '|' || c == NATIVE_ORDER => &token[1..],
            Some('<' | '>') => return Err(unknown()),
            _ => token,
        };

        if let Some(found) = CATALOG.iter().find(|e| e.name == body) {
            return Ok(found.dtype);
        }

        let dtype = match body {
            "i1" | "byte" => Dtype::Int8,
            "i2" | "short" => Dtype::Int16,
            "i4" => Dtype::Int32,
            "i8" | "int" => Dtype::Int64,
            "u1" | "ubyte" => Dtype::Uint8,
            "u2" | "ushort" => Dtype::Uint16,
            "u4" => Dtype::Uint32,
            "u8" => Dtype::Uint64,
            "f2" | "half" => Dtype::Float16,
            "f4" | "single" => Dtype::Float32,
            "f8" | "float" | "double" => Dtype::Float64,
            "c8" => Dtype::Complex64,
            "c16" | "complex" => Dtype::Complex128,
            _ => return Err(unknown()),
        };
        Ok(dtype)
    }
}

impl TryFrom<&str> for Dtype {
    type Error = CoreError;

    fn try_from(token: &str) -> Result<Self, Self::Error> {
        token.parse()
    }
}

// ---------------------------------------------------------------------------
// Element: Rust types storable in an array buffer
// ---------------------------------------------------------------------------

/// A Rust type with a fixed dtype and native byte encoding.
///
/// Conversions from [`Scalar`] never fail: out-of-range integers wrap to
/// the target width and floats truncate toward zero first.
pub trait Element: Copy + fmt::Debug + PartialEq + Send + Sync + 'static {
    /// The dtype whose buffers hold values of this type.
    const DTYPE: Dtype;

    /// Write the native-endian encoding into `out[..itemsize]`.
    fn write_ne(self, out: &mut [u8]);

    /// Decode from the first `itemsize` bytes of `bytes`.
    fn read_ne(bytes: &[u8]) -> Self;

    /// Widen into a dynamically typed leaf value.
    fn into_scalar(self) -> Scalar;

    /// Cast a leaf value into this type with wraparound semantics.
    fn from_scalar(value: Scalar) -> Self;
}

macro_rules! impl_element_int {
    ($ty:ty, $dtype:expr) => {
        impl Element for $ty {
            const DTYPE: Dtype = $dtype;

            #[inline]
            fn write_ne(self, out: &mut [u8]) {
                out[..size_of::<$ty>()].copy_from_slice(&self.to_ne_bytes());
            }

            #[inline]
            fn read_ne(bytes: &[u8]) -> Self {
                let mut raw = [0u8; size_of::<$ty>()];
                raw.copy_from_slice(&bytes[..size_of::<$ty>()]);
                <$ty>::from_ne_bytes(raw)
            }

            #[inline]
            fn into_scalar(self) -> Scalar {
                Scalar::Int(i128::from(self))
            }

            #[inline]
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            fn from_scalar(value: Scalar) -> Self {
                value.to_wrapping_int() as $ty
            }
        }
    };
}

impl_element_int!(i8, Dtype::Int8);
impl_element_int!(i16, Dtype::Int16);
impl_element_int!(i32, Dtype::Int32);
impl_element_int!(i64, Dtype::Int64);
impl_element_int!(u8, Dtype::Uint8);
impl_element_int!(u16, Dtype::Uint16);
impl_element_int!(u32, Dtype::Uint32);
impl_element_int!(u64, Dtype::Uint64);

macro_rules! impl_element_float {
    ($ty:ty, $dtype:expr) => {
        impl Element for $ty {
            const DTYPE: Dtype = $dtype;

            #[inline]
            fn write_ne(self, out: &mut [u8]) {
                out[..size_of::<$ty>()].copy_from_slice(&self.to_ne_bytes());
            }

            #[inline]
            fn read_ne(bytes: &[u8]) -> Self {
                let mut raw = [0u8; size_of::<$ty>()];
                raw.copy_from_slice(&bytes[..size_of::<$ty>()]);
                <$ty>::from_ne_bytes(raw)
            }

            #[inline]
            fn into_scalar(self) -> Scalar {
                Scalar::Float(f64::from(self))
            }

            #[inline]
            #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
            fn from_scalar(value: Scalar) -> Self {
                match value {
                    Scalar::Int(v) => v as $ty,
                    Scalar::Float(v) => v as $ty,
                    Scalar::Complex(c) => c.re as $ty,
                }
            }
        }
    };
}

impl_element_float!(f32, Dtype::Float32);
impl_element_float!(f64, Dtype::Float64);

impl Element for f16 {
    const DTYPE: Dtype = Dtype::Float16;

    #[inline]
    fn write_ne(self, out: &mut [u8]) {
        out[..2].copy_from_slice(&self.to_ne_bytes());
    }

    #[inline]
    fn read_ne(bytes: &[u8]) -> Self {
        f16::from_ne_bytes([bytes[0], bytes[1]])
    }

    #[inline]
    fn into_scalar(self) -> Scalar {
        Scalar::Float(self.to_f64())
    }

    #[inline]
    #[allow(clippy::cast_precision_loss)]
    fn from_scalar(value: Scalar) -> Self {
        match value {
            Scalar::Int(v) => f16::from_f64(v as f64),
            Scalar::Float(v) => f16::from_f64(v),
            Scalar::Complex(c) => f16::from_f64(c.re),
        }
    }
}

macro_rules! impl_element_complex {
    ($ty:ty, $lane:ty, $dtype:expr) => {
        impl Element for $ty {
            const DTYPE: Dtype = $dtype;

            #[inline]
            fn write_ne(self, out: &mut [u8]) {
                let lane = size_of::<$lane>();
                self.re.write_ne(&mut out[..lane]);
                self.im.write_ne(&mut out[lane..2 * lane]);
            }

            #[inline]
            fn read_ne(bytes: &[u8]) -> Self {
                let lane = size_of::<$lane>();
                <$ty>::new(
                    <$lane>::read_ne(&bytes[..lane]),
                    <$lane>::read_ne(&bytes[lane..2 * lane]),
                )
            }

            #[inline]
            fn into_scalar(self) -> Scalar {
                Scalar::Complex(Complex64::new(f64::from(self.re), f64::from(self.im)))
            }

            #[inline]
            #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
            fn from_scalar(value: Scalar) -> Self {
                match value {
                    Scalar::Int(v) => <$ty>::new(v as $lane, 0.0),
                    Scalar::Float(v) => <$ty>::new(v as $lane, 0.0),
                    Scalar::Complex(c) => <$ty>::new(c.re as $lane, c.im as $lane),
                }
            }
        }
    };
}

impl_element_complex!(Complex32, f32, Dtype::Complex64);
impl_element_complex!(Complex64, f64, Dtype::Complex128);

/// Run `$body` with `$T` bound to the [`Element`] type backing `$dtype`.
macro_rules! with_element {
    ($dtype:expr, $T:ident => $body:expr) => {
        match $dtype {
            $crate::dtype::Dtype::Int8 => {
                type $T = i8;
                $body
            }
            $crate::dtype::Dtype::Int16 => {
                type $T = i16;
                $body
            }
            $crate::dtype::Dtype::Int32 => {
                type $T = i32;
                $body
            }
            $crate::dtype::Dtype::Int64 => {
                type $T = i64;
                $body
            }
            $crate::dtype::Dtype::Uint8 => {
                type $T = u8;
                $body
            }
            $crate::dtype::Dtype::Uint16 => {
                type $T = u16;
                $body
            }
            $crate::dtype::Dtype::Uint32 => {
                type $T = u32;
                $body
            }
            $crate::dtype::Dtype::Uint64 => {
                type $T = u64;
                $body
            }
            $crate::dtype::Dtype::Float16 => {
                type $T = ::half::f16;
                $body
            }
            $crate::dtype::Dtype::Float32 => {
                type $T = f32;
                $body
            }
            $crate::dtype::Dtype::Float64 => {
                type $T = f64;
                $body
            }
            $crate::dtype::Dtype::Complex64 => {
                type $T = ::num_complex::Complex32;
                $body
            }
            $crate::dtype::Dtype::Complex128 => {
                type $T = ::num_complex::Complex64;
                $body
            }
        }
    };
}

pub(crate) use with_element;
