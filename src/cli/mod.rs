//! # Command-Line Interface
//!
//! The `shape` binary. Global options are parsed by clap; everything after
//! them is handed to the command palette.
//!
//! ## Commands
//!
//! | Command | Purpose |
//! |---------|---------|
//! | `demo <shape> [--verbose]` | Draw one catalog shape |
//! | `shapes` | List the catalog |
//!
//! Anything else, including `help` or an empty command line, prints the
//! command list.
//!
//! ## Output Formats
//!
//! `--format text` (default) or `--format json`.
//!
//! ## Verbose Mode
//!
//! Use `--verbose` (or `-v`) before the command for debug output:
//! ```bash
//! shape --verbose demo circle
//! ```

mod app;
mod demo;
mod output;

pub use app::{run, Cli};
pub use demo::{DemoCommand, ShapesCommand, SHAPES};
pub use output::{Output, OutputFormat};
