//! Rewriting transform values inside CSS text and style objects
//!
//! The entry points here wrap the parse/compose pipeline with the
//! pass-through policy: values that are empty, `none`, or already a
//! `matrix3d(...)` are returned untouched, and anything the parser cannot
//! extract functions from falls back to the original text. Failure never
//! propagates out of this module; the worst case is "value left unchanged"
//! plus a warning.

use regex::{Captures, Regex};
use serde::Serialize;
use std::sync::LazyLock;

use crate::matrix::Matrix3d;
use crate::parser::{parse, TransformFunction};
use crate::transformer::{compose, Warning};

/// A `transform` declaration inside a rule body. The leading character keeps
/// `text-transform` and vendor-prefixed properties from matching.
static TRANSFORM_DECL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)(?P<lead>^|[;{}\s])transform(?P<ws1>\s*):(?P<ws2>\s*)(?P<value>[^;}]+)")
        .expect("valid regex")
});

/// Options for stylesheet rewriting.
#[derive(Debug, Clone, Default)]
pub struct RewriteOptions {
    /// Keep the source value in a comment next to the rewritten declaration.
    pub keep_original: bool,
}

/// Result of rewriting a stylesheet string.
#[derive(Debug, Clone)]
pub struct RewriteResult {
    /// The rewritten CSS text.
    pub css: String,
    /// Number of `transform` declarations that were rewritten.
    pub rewritten: usize,
    /// Diagnostics from the matrix engine, in declaration order.
    pub warnings: Vec<Warning>,
}

/// Convert a single transform value to its `matrix3d(...)` form.
///
/// Pass-through cases return the input unchanged: empty values, `none`, and
/// values that already contain `matrix3d(`. A value that yields no parseable
/// functions also comes back unchanged, so repeated processing is idempotent.
///
/// # Examples
///
/// ```
/// use csstm::rewrite::process_value;
///
/// assert_eq!(
///     process_value("translateX(10px)"),
///     "matrix3d(1, 0, 0, 0, 0, 1, 0, 0, 0, 0, 1, 0, 10, 0, 0, 1)"
/// );
/// assert_eq!(process_value("none"), "none");
/// ```
pub fn process_value(value: &str) -> String {
    process_value_with_warnings(value).0
}

/// Like [`process_value`], also returning the engine diagnostics.
pub fn process_value_with_warnings(value: &str) -> (String, Vec<Warning>) {
    if value.is_empty() || value == "none" || value.contains("matrix3d(") {
        return (value.to_string(), Vec::new());
    }

    let functions = parse(value);
    if functions.is_empty() {
        return (value.to_string(), Vec::new());
    }

    let (matrix, warnings) = compose(&functions);
    (matrix.to_css(), warnings)
}

/// Full analysis of one transform value, serializable for tooling.
#[derive(Debug, Clone, Serialize)]
pub struct ValueReport {
    /// The input value as given.
    pub original: String,
    /// The parsed function calls, in order.
    pub functions: Vec<TransformFunction>,
    /// The composed matrix.
    pub matrix: Matrix3d,
    /// The output value after the pass-through policy is applied.
    pub css: String,
    /// Engine diagnostics.
    pub warnings: Vec<Warning>,
}

/// Analyze a transform value: parsed functions, composed matrix, and the
/// final output under the pass-through policy.
pub fn explain_value(value: &str) -> ValueReport {
    let functions = parse(value);
    let (matrix, warnings) = compose(&functions);
    let (css, _) = process_value_with_warnings(value);

    ValueReport { original: value.to_string(), functions, matrix, css, warnings }
}

/// Rewrite every `transform` declaration in a stylesheet string.
///
/// Only the `transform` property is touched; `text-transform` and
/// vendor-prefixed variants pass through. Declarations that hit a
/// pass-through case keep their original text. With
/// [`RewriteOptions::keep_original`] the source value is preserved in a
/// comment after the colon.
pub fn process_css(css: &str, options: &RewriteOptions) -> RewriteResult {
    let mut rewritten = 0;
    let mut warnings = Vec::new();

    let output = TRANSFORM_DECL.replace_all(css, |caps: &Captures| {
        let raw = &caps["value"];
        let value = raw.trim_end();
        let trailing = &raw[value.len()..];

        let (converted, mut value_warnings) = process_value_with_warnings(value);
        warnings.append(&mut value_warnings);

        if converted == value {
            return caps[0].to_string();
        }
        rewritten += 1;

        let original = if options.keep_original {
            format!("/* was: {} */ ", value)
        } else {
            String::new()
        };

        format!(
            "{}transform{}:{}{}{}{}",
            &caps["lead"], &caps["ws1"], &caps["ws2"], original, converted, trailing
        )
    });

    RewriteResult { css: output.into_owned(), rewritten, warnings }
}

/// Rewrite the `transform` member of a JSON style object in place.
///
/// Non-object values and objects without a string `transform` member are
/// left untouched.
pub fn process_style_object(style: &mut serde_json::Value) -> Vec<Warning> {
    let Some(object) = style.as_object_mut() else {
        return Vec::new();
    };

    let Some(serde_json::Value::String(value)) = object.get("transform") else {
        return Vec::new();
    };

    let (converted, warnings) = process_value_with_warnings(value);
    object.insert("transform".to_string(), serde_json::Value::String(converted));
    warnings
}

/// Convert a batch of transform values in parallel.
///
/// Each value is independent, so the batch fans out across the rayon pool.
pub fn process_values(values: &[String]) -> Vec<String> {
    use rayon::prelude::*;

    values.par_iter().map(|value| process_value(value)).collect()
}
