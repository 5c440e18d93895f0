//! csstm - Command-line tool for rewriting CSS transforms into matrix3d()

use std::process::ExitCode;

use csstm::cli;

fn main() -> ExitCode {
    cli::run()
}
