//! Asepng - Command-line tool for converting Aseprite files to PNG

use std::process::ExitCode;

use asepng::cli;

fn main() -> ExitCode {
    cli::run()
}
