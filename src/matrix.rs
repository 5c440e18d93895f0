//! 4x4 homogeneous transform matrix and CSS serialization
//!
//! Row-major layout matching the CSS `matrix3d()` argument order:
//! `m11..m14` is the first row, `m41..m43` carries the translation.

use serde::Serialize;

/// A 4x4 homogeneous transformation matrix with CSS field naming.
///
/// Fields are named `m<row><col>`, row-major. This is a plain value type:
/// every operation returns a fresh matrix, nothing is shared or mutated in
/// place.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Matrix3d {
    pub m11: f64,
    pub m12: f64,
    pub m13: f64,
    pub m14: f64,
    pub m21: f64,
    pub m22: f64,
    pub m23: f64,
    pub m24: f64,
    pub m31: f64,
    pub m32: f64,
    pub m33: f64,
    pub m34: f64,
    pub m41: f64,
    pub m42: f64,
    pub m43: f64,
    pub m44: f64,
}

impl Default for Matrix3d {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Matrix3d {
    /// The identity matrix: ones on the diagonal, zeros elsewhere.
    pub const IDENTITY: Matrix3d = Matrix3d {
        m11: 1.0,
        m12: 0.0,
        m13: 0.0,
        m14: 0.0,
        m21: 0.0,
        m22: 1.0,
        m23: 0.0,
        m24: 0.0,
        m31: 0.0,
        m32: 0.0,
        m33: 1.0,
        m34: 0.0,
        m41: 0.0,
        m42: 0.0,
        m43: 0.0,
        m44: 1.0,
    };

    /// Create an identity matrix.
    pub fn identity() -> Self {
        Self::IDENTITY
    }

    /// Build a matrix from 16 values in row-major order.
    pub fn from_array(values: [f64; 16]) -> Self {
        Matrix3d {
            m11: values[0],
            m12: values[1],
            m13: values[2],
            m14: values[3],
            m21: values[4],
            m22: values[5],
            m23: values[6],
            m24: values[7],
            m31: values[8],
            m32: values[9],
            m33: values[10],
            m34: values[11],
            m41: values[12],
            m42: values[13],
            m43: values[14],
            m44: values[15],
        }
    }

    /// Return the 16 values in row-major order (the `matrix3d()` order).
    pub fn to_array(&self) -> [f64; 16] {
        [
            self.m11, self.m12, self.m13, self.m14, self.m21, self.m22, self.m23, self.m24,
            self.m31, self.m32, self.m33, self.m34, self.m41, self.m42, self.m43, self.m44,
        ]
    }

    /// Standard 4x4 matrix product with `self` as the left operand.
    ///
    /// Composition is associative but not commutative: folding transform
    /// functions as `result = result.multiply(&next)` reproduces CSS's
    /// left-to-right post-multiplication order, so earlier functions act on
    /// the local coordinate system before later ones.
    pub fn multiply(&self, other: &Matrix3d) -> Matrix3d {
        let a = self;
        let b = other;
        Matrix3d {
            m11: a.m11 * b.m11 + a.m12 * b.m21 + a.m13 * b.m31 + a.m14 * b.m41,
            m12: a.m11 * b.m12 + a.m12 * b.m22 + a.m13 * b.m32 + a.m14 * b.m42,
            m13: a.m11 * b.m13 + a.m12 * b.m23 + a.m13 * b.m33 + a.m14 * b.m43,
            m14: a.m11 * b.m14 + a.m12 * b.m24 + a.m13 * b.m34 + a.m14 * b.m44,

            m21: a.m21 * b.m11 + a.m22 * b.m21 + a.m23 * b.m31 + a.m24 * b.m41,
            m22: a.m21 * b.m12 + a.m22 * b.m22 + a.m23 * b.m32 + a.m24 * b.m42,
            m23: a.m21 * b.m13 + a.m22 * b.m23 + a.m23 * b.m33 + a.m24 * b.m43,
            m24: a.m21 * b.m14 + a.m22 * b.m24 + a.m23 * b.m34 + a.m24 * b.m44,

            m31: a.m31 * b.m11 + a.m32 * b.m21 + a.m33 * b.m31 + a.m34 * b.m41,
            m32: a.m31 * b.m12 + a.m32 * b.m22 + a.m33 * b.m32 + a.m34 * b.m42,
            m33: a.m31 * b.m13 + a.m32 * b.m23 + a.m33 * b.m33 + a.m34 * b.m43,
            m34: a.m31 * b.m14 + a.m32 * b.m24 + a.m33 * b.m34 + a.m34 * b.m44,

            m41: a.m41 * b.m11 + a.m42 * b.m21 + a.m43 * b.m31 + a.m44 * b.m41,
            m42: a.m41 * b.m12 + a.m42 * b.m22 + a.m43 * b.m32 + a.m44 * b.m42,
            m43: a.m41 * b.m13 + a.m42 * b.m23 + a.m43 * b.m33 + a.m44 * b.m43,
            m44: a.m41 * b.m14 + a.m42 * b.m24 + a.m43 * b.m34 + a.m44 * b.m44,
        }
    }

    /// Compare two matrices field by field within `tolerance`.
    pub fn approx_eq(&self, other: &Matrix3d, tolerance: f64) -> bool {
        self.to_array()
            .iter()
            .zip(other.to_array().iter())
            .all(|(a, b)| (a - b).abs() <= tolerance)
    }

    /// Serialize to a CSS `matrix3d(...)` value.
    ///
    /// Values appear in row-major order, comma-space separated, each rounded
    /// to 6 decimal digits and printed without trailing zeros (`2` rather
    /// than `2.000000`). This exact format is relied on by snapshot tests
    /// downstream, so treat it as a contract.
    pub fn to_css(&self) -> String {
        let values: Vec<String> = self.to_array().iter().map(|v| format_value(*v)).collect();
        format!("matrix3d({})", values.join(", "))
    }
}

/// Round to 6 decimal digits and print the shortest representation.
///
/// Negative zero is normalized to `0` so rounding artifacts from rotation
/// near multiples of 90 degrees don't leak into the output.
fn format_value(value: f64) -> String {
    let mut rounded = (value * 1e6).round() / 1e6;
    if rounded == 0.0 {
        rounded = 0.0; // collapse -0.0
    }
    format!("{}", rounded)
}
