//! Styleforge - command-line tool for inspecting a style system's build context

use std::process::ExitCode;

use styleforge::cli;

fn main() -> ExitCode {
    cli::run()
}
