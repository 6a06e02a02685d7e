//! Shape - a teaching shape-drawing app
//!
//! The interesting part is the command core: a command line is parsed into a
//! [`Request`], checked against the [`Signature`] of the matching command in
//! a [`Palette`], and routed by the [`Dispatcher`] to its [`Handler`] or to
//! the help listing.

pub mod cli;
pub mod command;
pub mod config;

pub use command::{Dispatcher, Handler, Palette, Request, Signature};
