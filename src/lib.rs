//! csstm - rewrite chained CSS transforms into a single matrix3d()
//!
//! This library provides functionality to:
//! - Parse a CSS `transform` value into its ordered function calls
//! - Compose those functions into one 4x4 homogeneous matrix
//! - Serialize the result back to a `matrix3d(...)` declaration
//! - Rewrite whole stylesheets and JSON style objects in place

pub mod cli;
pub mod matrix;
pub mod parser;
pub mod rewrite;
pub mod transformer;
