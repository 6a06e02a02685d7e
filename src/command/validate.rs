//! Precondition checks that collect every violation before failing
//!
//! Checks return `Result<(), Violations>` and are combined with [`all`],
//! which concatenates the messages of every failed check instead of stopping
//! at the first one.

use thiserror::Error;

/// One or more violated preconditions
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Validation failed: {}", .messages.join("; "))]
pub struct Violations {
    messages: Vec<String>,
}

impl Violations {
    /// Creates a violation list holding a single message
    pub fn single(message: impl Into<String>) -> Self {
        Self {
            messages: vec![message.into()],
        }
    }

    /// Returns the violation messages in the order they were found
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    /// Appends the messages of `other` after our own
    pub fn merge(mut self, other: Violations) -> Self {
        self.messages.extend(other.messages);
        self
    }
}

/// Fails when `value` is empty or whitespace only
pub fn non_blank(field: &str, value: &str) -> Result<(), Violations> {
    if value.trim().is_empty() {
        Err(Violations::single(format!("{} must not be blank", field)))
    } else {
        Ok(())
    }
}

/// Combines independent checks, keeping the messages of all that failed
pub fn all<I>(checks: I) -> Result<(), Violations>
where
    I: IntoIterator<Item = Result<(), Violations>>,
{
    checks
        .into_iter()
        .fold(Ok(()), |acc, next| match (acc, next) {
            (Ok(()), next) => next,
            (Err(found), Ok(())) => Err(found),
            (Err(found), Err(more)) => Err(found.merge(more)),
        })
}
