//! Request routing
//!
//! A request is routable when its action names a registered command and that
//! command's signature accepts it. Anything else, unknown action or wrong
//! call shape alike, is answered with the palette help and a clean return.

use std::io::{self, Write};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use super::handler::Handler;
use super::palette::Palette;
use super::request::Request;

/// Where the help listing is written
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HelpStream {
    #[default]
    Stderr,
    Stdout,
}

/// Routes requests to the handlers of a palette
#[derive(Debug)]
pub struct Dispatcher {
    palette: Palette,
    help_stream: HelpStream,
}

impl Dispatcher {
    pub fn new(palette: Palette) -> Self {
        Self {
            palette,
            help_stream: HelpStream::default(),
        }
    }

    pub fn with_help_stream(mut self, help_stream: HelpStream) -> Self {
        self.help_stream = help_stream;
        self
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Returns the handler that would run for `request`, if any
    pub fn route(&self, request: &Request) -> Option<&dyn Handler> {
        // Request actions are never blank, so the lookup itself cannot fail
        if !self.palette.has_command(request.action()).unwrap_or(false) {
            tracing::debug!(action = request.action(), "unknown command");
            return None;
        }

        let handler = self.palette.find(request.action()).ok()?;
        let accepted = handler
            .signature()
            .map_or(true, |signature| signature.can_handle(request));

        if !accepted {
            tracing::debug!(%request, "request does not match command signature");
            return None;
        }
        Some(handler)
    }

    /// Runs the matching handler, or writes help when nothing matches
    pub fn dispatch(&self, request: Request) -> Result<()> {
        match self.help_stream {
            HelpStream::Stderr => self.dispatch_to(request, &mut io::stderr()),
            HelpStream::Stdout => self.dispatch_to(request, &mut io::stdout()),
        }
    }

    /// Writes the palette help to the configured stream
    pub fn help(&self) -> Result<()> {
        let written = match self.help_stream {
            HelpStream::Stderr => self.palette.help(),
            HelpStream::Stdout => self.palette.write_help(&mut io::stdout().lock()),
        };
        written.context("Failed to write help")
    }

    /// Like [`dispatch`](Self::dispatch), writing any help to `help_out`
    pub fn dispatch_to(&self, request: Request, help_out: &mut dyn Write) -> Result<()> {
        match self.route(&request) {
            Some(handler) => {
                tracing::debug!(%request, "dispatching");
                handler.execute(request)
            }
            None => self
                .palette
                .write_help(help_out)
                .context("Failed to write help"),
        }
    }
}
