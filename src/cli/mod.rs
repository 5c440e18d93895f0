//! Command-line interface implementation
//!
//! This module provides the CLI entry point and dispatches to submodules
//! for specific command implementations.

mod process;
mod value;

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use glob::glob;

/// Exit codes
pub(crate) const EXIT_SUCCESS: u8 = 0;
pub(crate) const EXIT_ERROR: u8 = 1;
pub(crate) const EXIT_INVALID_ARGS: u8 = 2;

/// Check if a path has a `.css` extension.
pub fn is_css_file(path: &Path) -> bool {
    matches!(path.extension().and_then(|e| e.to_str()), Some("css"))
}

/// Find all `.css` files in a directory (recursively).
pub fn find_css_files(dir: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();
    let dir_str = dir.display().to_string();

    if let Ok(paths) = glob(&format!("{}/**/*.css", dir_str)) {
        files.extend(paths.filter_map(Result::ok));
    }

    // Stable order so batch output is deterministic
    files.sort();
    files
}

/// csstm - Rewrite CSS transform chains into composited matrix3d() declarations
#[derive(Parser)]
#[command(name = "csstm")]
#[command(about = "Rewrite chained CSS transform functions into a single matrix3d() declaration")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Convert a single transform value and print the result
    Value {
        /// A CSS transform value, e.g. "translateX(10px) rotate(45deg)"
        value: String,

        /// Emit a JSON report with the parsed functions and composed matrix
        #[arg(long)]
        json: bool,

        /// Print engine warnings to stderr
        #[arg(short, long)]
        verbose: bool,
    },
    /// Rewrite transform declarations in CSS files
    Process {
        /// Input .css file or a directory searched recursively for .css files
        input: PathBuf,

        /// Output file (single input) or directory.
        /// If omitted: {input}.matrix.css next to each source file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Overwrite the input files instead of writing copies
        #[arg(long)]
        in_place: bool,

        /// Keep each source value in a comment next to the rewritten declaration
        #[arg(long)]
        keep_original: bool,

        /// Print per-file rewrite counts and engine warnings to stderr
        #[arg(short, long)]
        verbose: bool,
    },
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();

    match cli.command {
        Commands::Value { value, json, verbose } => value::run_value(&value, json, verbose),
        Commands::Process { input, output, in_place, keep_original, verbose } => {
            process::run_process(&input, output.as_deref(), in_place, keep_original, verbose)
        }
    }
}
