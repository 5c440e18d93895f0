//! Composition of transform functions into a single matrix
//!
//! Maps each parsed function to its canonical 4x4 matrix and folds the
//! sequence left to right. Unknown functions and malformed fixed-arity
//! functions contribute the identity matrix and a warning, never an error:
//! invalid pieces of a declaration are ignored, the rest still composes.

use serde::Serialize;

use crate::matrix::Matrix3d;
use crate::parser::TransformFunction;

/// A warning generated while composing transform functions.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Warning {
    pub message: String,
}

impl Warning {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

/// Compose an ordered list of transform functions into one matrix.
///
/// Starts from the identity and folds `result = result * next`, which
/// reproduces CSS's left-to-right application order: `translateX(10px)
/// scale(2)` scales the translation, `scale(2) translateX(10px)` does not.
///
/// An empty list yields the identity matrix. Diagnostics for unsupported or
/// malformed functions are returned alongside the result.
pub fn compose(functions: &[TransformFunction]) -> (Matrix3d, Vec<Warning>) {
    let mut result = Matrix3d::identity();
    let mut warnings = Vec::new();

    for function in functions {
        let matrix = matrix_for_function(function, &mut warnings);
        result = result.multiply(&matrix);
    }

    (result, warnings)
}

/// Build the single-operation matrix for one transform function.
///
/// Missing arguments take their CSS defaults: 0 for translations, rotations
/// and skews, 1 for scales, and `scale(sx)` uses `sx` for both axes.
fn matrix_for_function(function: &TransformFunction, warnings: &mut Vec<Warning>) -> Matrix3d {
    let args = &function.args;

    match function.name.as_str() {
        "translateX" => translate(nth(args, 0, 0.0), 0.0, 0.0),
        "translateY" => translate(0.0, nth(args, 0, 0.0), 0.0),
        "translateZ" => translate(0.0, 0.0, nth(args, 0, 0.0)),
        "translate" => translate(nth(args, 0, 0.0), nth(args, 1, 0.0), 0.0),
        "translate3d" => translate(nth(args, 0, 0.0), nth(args, 1, 0.0), nth(args, 2, 0.0)),

        "scaleX" => scale(nth(args, 0, 1.0), 1.0, 1.0),
        "scaleY" => scale(1.0, nth(args, 0, 1.0), 1.0),
        "scaleZ" => scale(1.0, 1.0, nth(args, 0, 1.0)),
        "scale" => {
            let sx = nth(args, 0, 1.0);
            // sy defaults to sx when omitted
            let sy = args.get(1).copied().unwrap_or(sx);
            scale(sx, sy, 1.0)
        }
        "scale3d" => scale(nth(args, 0, 1.0), nth(args, 1, 1.0), nth(args, 2, 1.0)),

        "rotate" | "rotateZ" => rotate_z(nth(args, 0, 0.0)),
        "rotateX" => rotate_x(nth(args, 0, 0.0)),
        "rotateY" => rotate_y(nth(args, 0, 0.0)),

        "skewX" => skew(nth(args, 0, 0.0), 0.0),
        "skewY" => skew(0.0, nth(args, 0, 0.0)),
        "skew" => skew(nth(args, 0, 0.0), nth(args, 1, 0.0)),

        "matrix3d" => {
            if args.len() >= 16 {
                let mut values = [0.0; 16];
                values.copy_from_slice(&args[..16]);
                Matrix3d::from_array(values)
            } else {
                warnings.push(Warning::new(format!(
                    "matrix3d requires 16 arguments, got {}",
                    args.len()
                )));
                Matrix3d::identity()
            }
        }
        "matrix" => {
            if args.len() >= 6 {
                matrix_2d(args[0], args[1], args[2], args[3], args[4], args[5])
            } else {
                warnings.push(Warning::new(format!(
                    "matrix requires 6 arguments, got {}",
                    args.len()
                )));
                Matrix3d::identity()
            }
        }

        name => {
            warnings.push(Warning::new(format!("unsupported transform function: {}", name)));
            Matrix3d::identity()
        }
    }
}

fn nth(args: &[f64], index: usize, default: f64) -> f64 {
    args.get(index).copied().unwrap_or(default)
}

fn translate(x: f64, y: f64, z: f64) -> Matrix3d {
    Matrix3d { m41: x, m42: y, m43: z, ..Matrix3d::IDENTITY }
}

fn scale(sx: f64, sy: f64, sz: f64) -> Matrix3d {
    Matrix3d { m11: sx, m22: sy, m33: sz, ..Matrix3d::IDENTITY }
}

fn rotate_x(angle: f64) -> Matrix3d {
    let (sin, cos) = angle.sin_cos();
    Matrix3d { m22: cos, m23: -sin, m32: sin, m33: cos, ..Matrix3d::IDENTITY }
}

fn rotate_y(angle: f64) -> Matrix3d {
    let (sin, cos) = angle.sin_cos();
    Matrix3d { m11: cos, m13: sin, m31: -sin, m33: cos, ..Matrix3d::IDENTITY }
}

fn rotate_z(angle: f64) -> Matrix3d {
    let (sin, cos) = angle.sin_cos();
    Matrix3d { m11: cos, m12: -sin, m21: sin, m22: cos, ..Matrix3d::IDENTITY }
}

fn skew(angle_x: f64, angle_y: f64) -> Matrix3d {
    Matrix3d { m21: angle_x.tan(), m12: angle_y.tan(), ..Matrix3d::IDENTITY }
}

/// Embed the 6 values of a 2D `matrix()` into a 4x4 matrix.
fn matrix_2d(a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) -> Matrix3d {
    Matrix3d {
        m11: a,
        m12: b,
        m21: c,
        m22: d,
        m41: e,
        m42: f,
        m13: 0.0,
        m14: 0.0,
        m23: 0.0,
        m24: 0.0,
        m31: 0.0,
        m32: 0.0,
        m33: 1.0,
        m34: 0.0,
        m43: 0.0,
        m44: 1.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    fn func(name: &str, args: &[f64]) -> TransformFunction {
        TransformFunction { name: name.to_string(), args: args.to_vec() }
    }

    #[test]
    fn test_compose_empty_is_identity() {
        let (matrix, warnings) = compose(&[]);
        assert_eq!(matrix, Matrix3d::identity());
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_translate_family() {
        let (m, _) = compose(&[func("translateX", &[10.0])]);
        assert_eq!(m.m41, 10.0);

        let (m, _) = compose(&[func("translateY", &[5.0])]);
        assert_eq!(m.m42, 5.0);

        let (m, _) = compose(&[func("translateZ", &[-2.0])]);
        assert_eq!(m.m43, -2.0);

        let (m, _) = compose(&[func("translate", &[3.0, 4.0])]);
        assert_eq!((m.m41, m.m42), (3.0, 4.0));

        let (m, _) = compose(&[func("translate3d", &[1.0, 2.0, 3.0])]);
        assert_eq!((m.m41, m.m42, m.m43), (1.0, 2.0, 3.0));
    }

    #[test]
    fn test_translate_missing_args_default_zero() {
        let (m, warnings) = compose(&[func("translate", &[])]);
        assert_eq!(m, Matrix3d::identity());
        assert!(warnings.is_empty());

        let (m, _) = compose(&[func("translate", &[7.0])]);
        assert_eq!((m.m41, m.m42), (7.0, 0.0));
    }

    #[test]
    fn test_scale_family() {
        let (m, _) = compose(&[func("scaleX", &[2.0])]);
        assert_eq!((m.m11, m.m22, m.m33), (2.0, 1.0, 1.0));

        let (m, _) = compose(&[func("scale3d", &[2.0, 3.0, 4.0])]);
        assert_eq!((m.m11, m.m22, m.m33), (2.0, 3.0, 4.0));
    }

    #[test]
    fn test_scale_sy_defaults_to_sx() {
        let (m, _) = compose(&[func("scale", &[1.5])]);
        assert_eq!((m.m11, m.m22), (1.5, 1.5));

        let (m, _) = compose(&[func("scale", &[2.0, 0.5])]);
        assert_eq!((m.m11, m.m22), (2.0, 0.5));
    }

    #[test]
    fn test_scale_zero_stays_zero() {
        // An explicit 0 argument is not treated as missing
        let (m, _) = compose(&[func("scale", &[0.0])]);
        assert_eq!((m.m11, m.m22), (0.0, 0.0));
    }

    #[test]
    fn test_rotate_z_ninety_degrees() {
        let (m, _) = compose(&[func("rotate", &[PI / 2.0])]);
        assert!(m.m11.abs() < 1e-5);
        assert!((m.m12 + 1.0).abs() < 1e-5);
        assert!((m.m21 - 1.0).abs() < 1e-5);
        assert!(m.m22.abs() < 1e-5);
    }

    #[test]
    fn test_rotate_z_alias() {
        let (a, _) = compose(&[func("rotate", &[0.3])]);
        let (b, _) = compose(&[func("rotateZ", &[0.3])]);
        assert_eq!(a, b);
    }

    #[test]
    fn test_rotate_x_and_y_axes() {
        let angle = PI / 6.0;
        let (m, _) = compose(&[func("rotateX", &[angle])]);
        assert!((m.m22 - angle.cos()).abs() < 1e-12);
        assert!((m.m23 + angle.sin()).abs() < 1e-12);
        assert!((m.m32 - angle.sin()).abs() < 1e-12);
        assert_eq!(m.m11, 1.0);

        let (m, _) = compose(&[func("rotateY", &[angle])]);
        assert!((m.m11 - angle.cos()).abs() < 1e-12);
        assert!((m.m13 - angle.sin()).abs() < 1e-12);
        assert!((m.m31 + angle.sin()).abs() < 1e-12);
        assert_eq!(m.m22, 1.0);
    }

    #[test]
    fn test_skew_functions() {
        let angle = PI / 4.0;
        let (m, _) = compose(&[func("skewX", &[angle])]);
        assert!((m.m21 - 1.0).abs() < 1e-12);
        assert_eq!(m.m12, 0.0);

        let (m, _) = compose(&[func("skewY", &[angle])]);
        assert!((m.m12 - 1.0).abs() < 1e-12);
        assert_eq!(m.m21, 0.0);

        let (m, _) = compose(&[func("skew", &[angle, angle / 2.0])]);
        assert!((m.m21 - angle.tan()).abs() < 1e-12);
        assert!((m.m12 - (angle / 2.0).tan()).abs() < 1e-12);
    }

    #[test]
    fn test_matrix3d_passthrough() {
        let mut args = [0.0; 16];
        args[0] = 1.0;
        args[5] = 1.0;
        args[10] = 1.0;
        args[15] = 1.0;
        args[12] = 10.0;
        args[13] = 20.0;
        let (m, warnings) = compose(&[func("matrix3d", &args)]);
        assert!(warnings.is_empty());
        assert_eq!((m.m41, m.m42), (10.0, 20.0));
    }

    #[test]
    fn test_matrix3d_arity_guard() {
        let (m, warnings) = compose(&[func("matrix3d", &[1.0; 15])]);
        assert_eq!(m, Matrix3d::identity());
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].message.contains("16 arguments"));
        assert!(warnings[0].message.contains("15"));
    }

    #[test]
    fn test_matrix_2d_embedding() {
        let (m, warnings) = compose(&[func("matrix", &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0])]);
        assert!(warnings.is_empty());
        assert_eq!(m.m11, 1.0);
        assert_eq!(m.m12, 2.0);
        assert_eq!(m.m21, 3.0);
        assert_eq!(m.m22, 4.0);
        assert_eq!(m.m41, 5.0);
        assert_eq!(m.m42, 6.0);
        assert_eq!(m.m33, 1.0);
        assert_eq!(m.m44, 1.0);
        assert_eq!(m.m13, 0.0);
    }

    #[test]
    fn test_matrix_arity_guard() {
        let (m, warnings) = compose(&[func("matrix", &[1.0, 2.0])]);
        assert_eq!(m, Matrix3d::identity());
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].message.contains("6 arguments"));
    }

    #[test]
    fn test_unknown_function_is_identity_with_warning() {
        let (m, warnings) = compose(&[func("perspective", &[500.0])]);
        assert_eq!(m, Matrix3d::identity());
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].message.contains("perspective"));
    }

    #[test]
    fn test_unknown_function_does_not_poison_chain() {
        let (m, warnings) =
            compose(&[func("wobble", &[1.0]), func("translateX", &[10.0])]);
        assert_eq!(m.m41, 10.0);
        assert_eq!(warnings.len(), 1);
    }

    #[test]
    fn test_order_matters() {
        let chain_a = [func("translateX", &[10.0]), func("scale", &[2.0, 2.0])];
        let chain_b = [func("scale", &[2.0, 2.0]), func("translateX", &[10.0])];

        let (a, _) = compose(&chain_a);
        let (b, _) = compose(&chain_b);

        // translate before scale: the offset is scaled
        assert_eq!(a.m41, 20.0);
        // scale before translate: the offset is untouched
        assert_eq!(b.m41, 10.0);
        assert_eq!(a.m11, 2.0);
        assert_eq!(b.m22, 2.0);
    }

    #[test]
    fn test_translate_then_rotate_matches_css() {
        // translateX(10) rotate(90deg): the offset ends up rotated
        let (m, _) = compose(&[func("translateX", &[10.0]), func("rotate", &[PI / 2.0])]);
        assert!(m.m41.abs() < 1e-5);
        assert!((m.m42 + 10.0).abs() < 1e-5);
    }
}
