//! # Command Core
//!
//! Turns a raw command line into a routed call.
//!
//! ```text
//! tokens ──parser──▶ Request ──Dispatcher──▶ Handler::execute
//!                                  │
//!                                  ├── Palette (lookup by action)
//!                                  └── Signature (call shape check)
//! ```
//!
//! ## Key Types
//!
//! - [`Request`] - Parsed action, positional params, and flags
//! - [`Signature`] - Compiled `action <param>... [--flag]...` grammar
//! - [`Palette`] - Insertion-ordered registry of [`Handler`]s
//! - [`Dispatcher`] - Routes a request or falls back to help output
//!
//! ## Failure Policy
//!
//! Malformed signatures and blank names fail when the palette is built.
//! An unroutable request is not an error: it prints the palette help and
//! returns `Ok(())`. Handler errors propagate unchanged.

mod dispatcher;
mod handler;
mod palette;
pub mod parser;
mod request;
mod signature;
pub mod validate;

pub use dispatcher::{Dispatcher, HelpStream};
pub use handler::Handler;
pub use palette::{HelpEntry, Palette, PaletteError, NO_COMMANDS};
pub use parser::ParseError;
pub use request::Request;
pub use signature::{Signature, SignatureError};
pub use validate::Violations;
