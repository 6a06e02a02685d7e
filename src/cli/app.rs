//! Main CLI application structure

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use super::demo;
use super::output::{Output, OutputFormat};
use crate::command::{parser, Dispatcher, ParseError, Request};
use crate::config::Config;

#[derive(Parser)]
#[command(name = "shape")]
#[command(author, version, about = "Draw shapes from the command line")]
pub struct Cli {
    /// Output format (defaults to the configured format)
    #[arg(long, short = 'f')]
    pub format: Option<OutputFormat>,

    /// Enable verbose output for debugging
    #[arg(long, short = 'v')]
    pub verbose: bool,

    /// Read project configuration from this file
    #[arg(long, env = "SHAPE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Command line routed through the command palette
    #[arg(trailing_var_arg = true, allow_hyphen_values = true, value_name = "COMMAND")]
    pub tokens: Vec<String>,
}

/// Installs the stderr log subscriber; `RUST_LOG` overrides the default level
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Main entry point for the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::load()?,
    };
    let output = Output::new(cli.format.unwrap_or(config.default_format), cli.verbose);

    output.verbose("Shape CLI starting");
    output.verbose_ctx("config", &format!("{:?}", config));

    let dispatcher =
        Dispatcher::new(demo::palette(&config, output)?).with_help_stream(config.help_stream);

    let request = match parser::parse(cli.tokens) {
        Ok(request) => Some(request),
        Err(ParseError::InvalidArguments) => None,
        Err(e) => return Err(e.into()),
    };

    dispatch(&dispatcher, request, &output)?;

    output.verbose("Command completed successfully");
    Ok(())
}

/// Routes the request, printing help for an empty or unroutable command line
fn dispatch(dispatcher: &Dispatcher, request: Option<Request>, output: &Output) -> Result<()> {
    let routable = request
        .as_ref()
        .is_some_and(|request| dispatcher.route(request).is_some());

    match request {
        Some(request) if routable => {
            output.verbose_ctx("dispatch", &format!("Running '{}'", request));
            dispatcher.dispatch(request)
        }
        _ if output.is_json() => {
            output.data(&dispatcher.palette().help_entries());
            Ok(())
        }
        Some(request) => {
            output.verbose_ctx("dispatch", &format!("No command accepts '{}'", request));
            dispatcher.dispatch(request)
        }
        None => {
            output.verbose_ctx("dispatch", "No command given");
            dispatcher.help()
        }
    }
}
