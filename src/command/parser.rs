//! Command-line token parser
//!
//! The first token is the action. Every later token starting with `--` is a
//! presence-only flag; everything else is a positional parameter.

use thiserror::Error;

use super::request::Request;
use super::validate::Violations;

/// Prefix marking a flag token
pub const FLAG_PREFIX: &str = "--";

#[derive(Debug, Error, PartialEq)]
pub enum ParseError {
    #[error("Invalid arguments: no action given")]
    InvalidArguments,

    #[error(transparent)]
    Invalid(#[from] Violations),
}

/// Parses raw argument tokens into a [`Request`]
///
/// Tokens equal to the action are still positional parameters. Flag values
/// (`--name=value`) are not split; the whole remainder is the flag name.
pub fn parse<I, S>(tokens: I) -> Result<Request, ParseError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut tokens = tokens.into_iter().map(Into::into);
    let action = tokens.next().ok_or(ParseError::InvalidArguments)?;

    let mut params = Vec::new();
    let mut flags = Vec::new();

    for token in tokens {
        if token.starts_with(FLAG_PREFIX) {
            flags.push(token[FLAG_PREFIX.len()..].to_string());
        } else {
            params.push(token);
        }
    }

    tracing::trace!(%action, ?params, ?flags, "parsed command line");

    Ok(Request::new(action, params, flags)?)
}
