//! Registry of routable commands
//!
//! Entries keep insertion order, which is also the help listing order.
//! A palette is built once with [`Palette::add`] and then only read.

use std::fmt;
use std::io::{self, Write};

use serde::Serialize;
use thiserror::Error;

use super::handler::Handler;
use super::validate::{self, Violations};

/// Notice written by [`Palette::write_help`] when nothing is registered
pub const NO_COMMANDS: &str = "No commands registered.";

#[derive(Debug, Error)]
pub enum PaletteError {
    #[error("Command not found: {0}")]
    CommandNotFound(String),

    #[error(transparent)]
    Invalid(#[from] Violations),
}

struct Entry {
    name: String,
    handler: Box<dyn Handler>,
}

/// One line of the help listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HelpEntry {
    pub name: String,
    pub help: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage: Option<String>,
}

/// Name-keyed, insertion-ordered set of handlers
#[derive(Default)]
pub struct Palette {
    usage: Option<String>,
    entries: Vec<Entry>,
}

impl Palette {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the usage line printed above the command list
    pub fn with_usage(mut self, usage: impl Into<String>) -> Self {
        self.usage = Some(usage.into());
        self
    }

    pub fn usage(&self) -> Option<&str> {
        self.usage.as_deref()
    }

    /// Registers `handler` under `name`
    ///
    /// Fails when the name or the handler's help message is blank. Re-adding
    /// a name replaces the earlier handler in its original slot.
    pub fn add(
        mut self,
        name: impl Into<String>,
        handler: impl Handler + 'static,
    ) -> Result<Self, PaletteError> {
        let name = name.into();
        validate::all([
            validate::non_blank("command name", &name),
            validate::non_blank("help message", &handler.help_message()),
        ])?;

        let handler: Box<dyn Handler> = Box::new(handler);
        match self.position(&name) {
            Some(index) => {
                tracing::debug!(command = %name, "replacing registered command");
                self.entries[index].handler = handler;
            }
            None => {
                tracing::debug!(command = %name, "registering command");
                self.entries.push(Entry { name, handler });
            }
        }

        Ok(self)
    }

    /// Returns true if a handler is registered under `name`
    pub fn has_command(&self, name: &str) -> Result<bool, PaletteError> {
        validate::non_blank("command name", name)?;
        Ok(self.position(name).is_some())
    }

    /// Looks up the handler registered under `name`
    pub fn find(&self, name: &str) -> Result<&dyn Handler, PaletteError> {
        self.position(name)
            .map(|index| self.entries[index].handler.as_ref())
            .ok_or_else(|| PaletteError::CommandNotFound(name.to_string()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Registered names in insertion order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.name.as_str())
    }

    /// Help listing as data, for JSON output
    pub fn help_entries(&self) -> Vec<HelpEntry> {
        self.entries
            .iter()
            .map(|entry| HelpEntry {
                name: entry.name.clone(),
                help: entry.handler.help_message(),
                usage: entry.handler.signature().map(|sig| sig.render()),
            })
            .collect()
    }

    /// Writes the usage line and one `    name: help` line per command
    pub fn write_help(&self, out: &mut dyn Write) -> io::Result<()> {
        if let Some(usage) = &self.usage {
            writeln!(out, "{}", usage)?;
        }

        if self.entries.is_empty() {
            return writeln!(out, "{}", NO_COMMANDS);
        }

        for entry in &self.entries {
            writeln!(out, "    {}: {}", entry.name, entry.handler.help_message())?;
        }
        Ok(())
    }

    /// Writes the help listing to stderr
    pub fn help(&self) -> io::Result<()> {
        self.write_help(&mut io::stderr().lock())
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.entries.iter().position(|entry| entry.name == name)
    }
}

impl fmt::Debug for Palette {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Palette")
            .field("usage", &self.usage)
            .field("commands", &self.names().collect::<Vec<_>>())
            .finish()
    }
}
