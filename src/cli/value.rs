//! Value command implementation

use std::process::ExitCode;

use super::{EXIT_ERROR, EXIT_SUCCESS};
use crate::rewrite::{explain_value, process_value_with_warnings};

/// Convert one transform value and print it to stdout.
///
/// Pass-through values print unchanged, so this only fails if the JSON
/// report cannot be serialized: warnings are diagnostics, not errors.
pub fn run_value(value: &str, json: bool, verbose: bool) -> ExitCode {
    if json {
        let report = explain_value(value);
        return match serde_json::to_string_pretty(&report) {
            Ok(text) => {
                println!("{}", text);
                ExitCode::from(EXIT_SUCCESS)
            }
            Err(e) => {
                eprintln!("Error: failed to serialize report: {}", e);
                ExitCode::from(EXIT_ERROR)
            }
        };
    }

    let (converted, warnings) = process_value_with_warnings(value);

    if verbose {
        for warning in &warnings {
            eprintln!("Warning: {}", warning.message);
        }
    }

    println!("{}", converted);
    ExitCode::from(EXIT_SUCCESS)
}
