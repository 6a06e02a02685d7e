//! Shape - draw shapes from the command line

use std::process::ExitCode;

fn main() -> ExitCode {
    if let Err(e) = shape_palette::cli::run() {
        eprintln!("Error: {:#}", e);
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
