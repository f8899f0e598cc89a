//! `Display` formatting for [`Array`].

use core::fmt;

use half::f16;

use crate::dtype::Dtype;
use crate::scalar::Scalar;

use super::Array;

/// Dtypes NumPy leaves out of an array's repr.
fn is_implied(dtype: Dtype) -> bool {
    matches!(dtype, Dtype::Int64 | Dtype::Float64 | Dtype::Complex128)
}

/// Shortest decimal that reads back as the same `f16`.
fn shortest_f16(v: f16) -> String {
    let wide = f32::from(v);
    if !wide.is_finite() {
        return format!("{wide:?}");
    }
    // 17 decimal places resolve the smallest f16 subnormal
    (1..=17)
        .map(|precision| format!("{wide:.precision$}"))
        .find(|s| s.parse::<f32>().is_ok_and(|back| f16::from_f32(back) == v))
        .unwrap_or_else(|| format!("{wide:?}"))
}

/// A float lane printed at the dtype's own precision.
#[allow(clippy::cast_possible_truncation)]
fn lane(dtype: Dtype, v: f64) -> String {
    match dtype {
        Dtype::Float16 => shortest_f16(f16::from_f64(v)),
        Dtype::Float32 | Dtype::Complex64 => format!("{:?}", v as f32),
        _ => format!("{v:?}"),
    }
}

/// One element as NumPy's repr shows it for `dtype`.
struct Repr {
    dtype: Dtype,
    value: Scalar,
}

impl fmt::Display for Repr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.value {
            Scalar::Int(_) => write!(f, "{}", self.value),
            Scalar::Float(v) => f.write_str(&lane(self.dtype, v)),
            Scalar::Complex(c) => {
                let sign = if c.im.is_sign_negative() { '-' } else { '+' };
                write!(f, "({}{sign}{}j)", lane(self.dtype, c.re), lane(self.dtype, c.im.abs()))
            }
        }
    }
}

impl Array {
    fn elements(&self) -> impl Iterator<Item = Repr> + '_ {
        self.iter().map(|value| Repr {
            dtype: self.dtype,
            value,
        })
    }
}

impl fmt::Display for Array {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "array([], shape={:?}, dtype={})", self.shape(), self.dtype);
        }

        write!(f, "array(")?;
        match self.ndim() {
            0 => {
                for v in self.elements() {
                    write!(f, "{v}")?;
                }
            }
            1 => {
                write!(f, "[")?;
                for (i, v) in self.elements().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{v}")?;
                }
                write!(f, "]")?;
            }
            2 => {
                let cols = self.shape[1];
                write!(f, "[")?;
                for (i, v) in self.elements().enumerate() {
                    let (r, c) = (i / cols, i % cols);
                    if c == 0 {
                        if r > 0 {
                            write!(f, ",\n       ")?;
                        }
                        write!(f, "[")?;
                    } else {
                        write!(f, ", ")?;
                    }
                    write!(f, "{v}")?;
                    if c == cols - 1 {
                        write!(f, "]")?;
                    }
                }
                write!(f, "]")?;
            }
            _ => {
                // 3-D and above: shape plus a flat summary
                let mut values = self.elements();
                let first = values.next();
                let last = values.last();
                write!(f, "shape={:?}, data=[", self.shape())?;
                if let Some(v) = first {
                    write!(f, "{v}")?;
                }
                if let Some(v) = last {
                    write!(f, ", ..., {v}")?;
                }
                write!(f, "]")?;
            }
        }
        if !is_implied(self.dtype) {
            write!(f, ", dtype={}", self.dtype)?;
        }
        write!(f, ")")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::array::array;

    #[test]
    fn test_display_scalar() {
        let a = array(25, Dtype::Int8).unwrap();
        assert_eq!(format!("{a}"), "array(25, dtype=int8)");
        let b = array(25, Dtype::Int64).unwrap();
        assert_eq!(format!("{b}"), "array(25)");
    }

    #[test]
    fn test_display_1d() {
        let a = Array::from_vec(vec![1.0_f64, 2.5, 3.0], &[3]).unwrap();
        assert_eq!(format!("{a}"), "array([1.0, 2.5, 3.0])");
    }

    #[test]
    fn test_display_2d() {
        let a = Array::from_vec(vec![1_i32, 2, 3, 4], &[2, 2]).unwrap();
        assert_eq!(format!("{a}"), "array([[1, 2],\n       [3, 4]], dtype=int32)");
    }

    #[test]
    fn test_display_narrow_floats() {
        let halves = Array::from_vec(vec![f16::from_f32(0.1), f16::from_f32(2.5)], &[2]).unwrap();
        assert_eq!(format!("{halves}"), "array([0.1, 2.5], dtype=float16)");
        let singles = Array::from_vec(vec![0.1_f32], &[1]).unwrap();
        assert_eq!(format!("{singles}"), "array([0.1], dtype=float32)");
        let c = array(num_complex::Complex64::new(0.1, -0.2), Dtype::Complex64).unwrap();
        assert_eq!(format!("{c}"), "array((0.1-0.2j), dtype=complex64)");
        let inf = array(70_000, Dtype::Float16).unwrap();
        assert_eq!(format!("{inf}"), "array(inf, dtype=float16)");
    }

    #[test]
    fn test_display_empty() {
        let a = Array::zeros(&[0], Dtype::Uint8).unwrap();
        assert_eq!(format!("{a}"), "array([], shape=[0], dtype=uint8)");
    }

    #[test]
    fn test_display_3d() {
        let a = Array::zeros(&[2, 3, 4], Dtype::Float64).unwrap();
        let s = format!("{a}");
        assert!(s.contains("shape=[2, 3, 4]"));
        assert!(s.ends_with("0.0])"));
    }
}
