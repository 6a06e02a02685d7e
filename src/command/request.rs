//! Parsed command request
//!
//! A [`Request`] is the immutable result of parsing a command line: the
//! action, its positional parameters in order, and the set of flags present.

use std::collections::BTreeSet;
use std::fmt;

use super::validate::{self, Violations};

/// A parsed command line, ready to be routed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    action: String,
    params: Vec<String>,
    flags: BTreeSet<String>,
}

impl Request {
    /// Creates a request, lower-casing flag names
    ///
    /// Fails when `action` is blank.
    pub fn new<P, F>(action: impl Into<String>, params: P, flags: F) -> Result<Self, Violations>
    where
        P: IntoIterator,
        P::Item: Into<String>,
        F: IntoIterator,
        F::Item: AsRef<str>,
    {
        let action = action.into();
        validate::non_blank("action", &action)?;

        Ok(Self {
            action,
            params: params.into_iter().map(Into::into).collect(),
            flags: flags
                .into_iter()
                .map(|flag| flag.as_ref().to_lowercase())
                .collect(),
        })
    }

    pub fn action(&self) -> &str {
        &self.action
    }

    /// Positional parameters in the order they were given
    pub fn params(&self) -> &[String] {
        &self.params
    }

    /// Flag names, lower-cased and de-duplicated
    pub fn flags(&self) -> &BTreeSet<String> {
        &self.flags
    }

    /// Returns true if the flag is present (case-insensitive)
    pub fn has_flag(&self, name: &str) -> bool {
        self.flags.contains(&name.to_lowercase())
    }
}

impl fmt::Display for Request {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.action)?;
        for param in &self.params {
            write!(f, " {}", param)?;
        }
        for flag in &self.flags {
            write!(f, " --{}", flag)?;
        }
        Ok(())
    }
}
