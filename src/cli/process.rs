//! Process command implementation
//!
//! Rewrites transform declarations across one file or a directory tree.
//! Files are independent, so the batch fans out across the rayon pool.

use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use thiserror::Error;

use super::{find_css_files, is_css_file, EXIT_ERROR, EXIT_INVALID_ARGS, EXIT_SUCCESS};
use crate::rewrite::{process_css, RewriteOptions};

/// Error type for file processing failures.
#[derive(Debug, Error)]
pub enum ProcessError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("no .css files found under {0}")]
    NoInputs(PathBuf),
}

/// Outcome of rewriting one file.
struct FileReport {
    source: PathBuf,
    destination: PathBuf,
    rewritten: usize,
    warnings: Vec<crate::transformer::Warning>,
}

pub fn run_process(
    input: &Path,
    output: Option<&Path>,
    in_place: bool,
    keep_original: bool,
    verbose: bool,
) -> ExitCode {
    if in_place && output.is_some() {
        eprintln!("Error: --in-place and --output are mutually exclusive");
        return ExitCode::from(EXIT_INVALID_ARGS);
    }

    let files = match collect_inputs(input) {
        Ok(files) => files,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    if files.len() > 1 {
        if let Some(out) = output {
            if is_css_file(out) {
                eprintln!("Error: --output must be a directory when processing multiple files");
                return ExitCode::from(EXIT_INVALID_ARGS);
            }
        }
    }

    let options = RewriteOptions { keep_original };
    let results: Vec<Result<FileReport, ProcessError>> = files
        .par_iter()
        .map(|file| process_file(file, input, output, in_place, &options))
        .collect();

    let mut failed = false;
    let mut total_rewritten = 0;

    for result in results {
        match result {
            Ok(report) => {
                total_rewritten += report.rewritten;
                if verbose {
                    eprintln!(
                        "{} -> {}: {} declaration(s) rewritten",
                        report.source.display(),
                        report.destination.display(),
                        report.rewritten
                    );
                    for warning in &report.warnings {
                        eprintln!("Warning: {}: {}", report.source.display(), warning.message);
                    }
                }
            }
            Err(e) => {
                eprintln!("Error: {}", e);
                failed = true;
            }
        }
    }

    if verbose {
        eprintln!("{} declaration(s) rewritten total", total_rewritten);
    }

    if failed {
        ExitCode::from(EXIT_ERROR)
    } else {
        ExitCode::from(EXIT_SUCCESS)
    }
}

/// Resolve the input path to the list of CSS files to process.
fn collect_inputs(input: &Path) -> Result<Vec<PathBuf>, ProcessError> {
    if input.is_dir() {
        let files = find_css_files(input);
        if files.is_empty() {
            return Err(ProcessError::NoInputs(input.to_path_buf()));
        }
        Ok(files)
    } else {
        Ok(vec![input.to_path_buf()])
    }
}

/// Rewrite one file and write the result to its destination.
fn process_file(
    file: &Path,
    input_root: &Path,
    output: Option<&Path>,
    in_place: bool,
    options: &RewriteOptions,
) -> Result<FileReport, ProcessError> {
    let css = fs::read_to_string(file)
        .map_err(|source| ProcessError::Read { path: file.to_path_buf(), source })?;

    let result = process_css(&css, options);
    let destination = destination_for(file, input_root, output, in_place);

    if let Some(parent) = destination.parent() {
        fs::create_dir_all(parent)
            .map_err(|source| ProcessError::Write { path: destination.clone(), source })?;
    }
    fs::write(&destination, &result.css)
        .map_err(|source| ProcessError::Write { path: destination.clone(), source })?;

    Ok(FileReport {
        source: file.to_path_buf(),
        destination,
        rewritten: result.rewritten,
        warnings: result.warnings,
    })
}

/// Pick the destination path for a processed file.
///
/// In order: the file itself for `--in-place`; the named output file for a
/// single input; a mirrored path under the output directory for directory
/// inputs; otherwise `{stem}.matrix.css` next to the source.
fn destination_for(
    file: &Path,
    input_root: &Path,
    output: Option<&Path>,
    in_place: bool,
) -> PathBuf {
    if in_place {
        return file.to_path_buf();
    }

    match output {
        Some(out) if is_css_file(out) => out.to_path_buf(),
        Some(out) => {
            let relative = file
                .strip_prefix(input_root)
                .ok()
                .filter(|rel| !rel.as_os_str().is_empty());
            match (relative, file.file_name()) {
                (Some(rel), _) => out.join(rel),
                (None, Some(name)) => out.join(name),
                (None, None) => out.to_path_buf(),
            }
        }
        None => {
            let stem = file.file_stem().and_then(|s| s.to_str()).unwrap_or("output");
            file.with_file_name(format!("{}.matrix.css", stem))
        }
    }
}
