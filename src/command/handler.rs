//! Handler interface for routable commands

use super::request::Request;
use super::signature::Signature;

/// A command the palette can route requests to
pub trait Handler {
    /// Runs the command. Errors propagate to the dispatcher's caller untouched.
    fn execute(&self, request: Request) -> anyhow::Result<()>;

    /// One-line description shown in the help listing
    fn help_message(&self) -> String;

    /// Call shape this handler accepts
    ///
    /// Handlers without a signature accept any request for their name.
    fn signature(&self) -> Option<&Signature> {
        None
    }
}
