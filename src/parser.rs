//! Lenient parsing of CSS `transform` property values
//!
//! Splits a value like `translateX(20px) rotate(30deg) scale(1.1)` into an
//! ordered list of function calls with numeric arguments. Parsing never
//! fails: malformed pieces degrade to fewer extracted functions, and
//! argument tokens that aren't numbers are dropped. This mirrors CSS's
//! "ignore what you don't understand" philosophy.

use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

/// A signed decimal number with an optional unit suffix.
static NUMERIC_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(-?\d*\.?\d+)(px|deg|%|em|rem)?$").expect("valid regex"));

/// One parsed CSS transform function call.
///
/// `translateX(10px)` parses to `{ name: "translateX", args: [10.0] }`.
/// Angle arguments are already converted to radians; all other units are
/// informational and the bare magnitude is kept (CSS pixels are the working
/// unit of the matrix engine).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransformFunction {
    pub name: String,
    pub args: Vec<f64>,
}

/// Parse a CSS transform value into its ordered function calls.
///
/// Returns an empty Vec for empty or unparseable input. Unclosed calls and
/// stray characters are skipped rather than reported.
///
/// # Examples
///
/// ```
/// use csstm::parser::parse;
///
/// let functions = parse("translateX(10px) scale(2)");
/// assert_eq!(functions.len(), 2);
/// assert_eq!(functions[0].name, "translateX");
/// assert_eq!(functions[0].args, vec![10.0]);
/// ```
pub fn parse(value: &str) -> Vec<TransformFunction> {
    let mut functions = Vec::new();
    let mut name = String::new();
    let mut chars = value.chars();

    while let Some(c) = chars.next() {
        if c == '(' {
            let mut body = String::new();
            let mut closed = false;

            for inner in chars.by_ref() {
                if inner == ')' {
                    closed = true;
                    break;
                }
                body.push(inner);
            }

            if closed && !name.is_empty() {
                functions.push(TransformFunction {
                    name: std::mem::take(&mut name),
                    args: parse_args(&body),
                });
            } else {
                // Unclosed call or stray paren: drop and keep scanning
                name.clear();
            }
        } else if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
            name.push(c);
        } else {
            name.clear();
        }
    }

    functions
}

/// Split an argument body on commas and whitespace, keeping only tokens that
/// parse as numbers.
fn parse_args(body: &str) -> Vec<f64> {
    body.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|token| !token.is_empty())
        .filter_map(parse_numeric)
        .collect()
}

/// Parse a single argument token, normalizing `deg` to radians.
fn parse_numeric(token: &str) -> Option<f64> {
    let caps = NUMERIC_TOKEN.captures(token)?;
    let number: f64 = caps.get(1)?.as_str().parse().ok()?;

    match caps.get(2).map(|m| m.as_str()) {
        Some("deg") => Some(number * std::f64::consts::PI / 180.0),
        _ => Some(number),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_parse_single_function() {
        let functions = parse("translateX(10px)");
        assert_eq!(
            functions,
            vec![TransformFunction { name: "translateX".to_string(), args: vec![10.0] }]
        );
    }

    #[test]
    fn test_parse_degrees_to_radians() {
        let functions = parse("rotate(45deg)");
        assert_eq!(functions.len(), 1);
        assert_eq!(functions[0].name, "rotate");
        assert_eq!(functions[0].args, vec![45.0 * PI / 180.0]);
        assert!((functions[0].args[0] - PI / 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_parse_chain_preserves_order() {
        let functions = parse("translateX(20px) rotate(30deg) scale(1.1)");
        let names: Vec<&str> = functions.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["translateX", "rotate", "scale"]);
    }

    #[test]
    fn test_parse_comma_and_space_args() {
        let functions = parse("translate(10px, 20px)");
        assert_eq!(functions[0].args, vec![10.0, 20.0]);

        let functions = parse("translate3d(1px 2px 3px)");
        assert_eq!(functions[0].args, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_parse_units_kept_as_magnitude() {
        let functions = parse("translate(50%, 2em) translateY(1.5rem)");
        assert_eq!(functions[0].args, vec![50.0, 2.0]);
        assert_eq!(functions[1].args, vec![1.5]);
    }

    #[test]
    fn test_parse_negative_and_bare_decimal() {
        let functions = parse("translate(-10px, .5px) scale(-0.5)");
        assert_eq!(functions[0].args, vec![-10.0, 0.5]);
        assert_eq!(functions[1].args, vec![-0.5]);
    }

    #[test]
    fn test_parse_drops_non_numeric_tokens() {
        let functions = parse("translate(left, 20px)");
        assert_eq!(functions[0].name, "translate");
        assert_eq!(functions[0].args, vec![20.0]);
    }

    #[test]
    fn test_parse_unknown_unit_dropped() {
        // "10vw" isn't in the unit grammar, so the whole token is dropped
        let functions = parse("translateX(10vw)");
        assert_eq!(functions[0].args, Vec::<f64>::new());
    }

    #[test]
    fn test_parse_empty_input() {
        assert!(parse("").is_empty());
        assert!(parse("   ").is_empty());
    }

    #[test]
    fn test_parse_keyword_without_call() {
        assert!(parse("none").is_empty());
        assert!(parse("inherit").is_empty());
    }

    #[test]
    fn test_parse_unclosed_call_degrades() {
        assert!(parse("translateX(10px").is_empty());

        // A valid call before the broken one still comes through
        let functions = parse("scale(2) translateX(10px");
        assert_eq!(functions.len(), 1);
        assert_eq!(functions[0].name, "scale");
    }

    #[test]
    fn test_parse_matrix3d_sixteen_args() {
        let functions = parse("matrix3d(1, 0, 0, 0, 0, 1, 0, 0, 0, 0, 1, 0, 10, 20, 0, 1)");
        assert_eq!(functions[0].name, "matrix3d");
        assert_eq!(functions[0].args.len(), 16);
        assert_eq!(functions[0].args[12], 10.0);
    }

    #[test]
    fn test_parse_empty_call() {
        let functions = parse("translateX()");
        assert_eq!(functions.len(), 1);
        assert!(functions[0].args.is_empty());
    }
}
