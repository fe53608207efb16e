use sqltree_core::{Location, Token};
use thiserror::Error;

/// A recursive-descent parse failure.
#[derive(Debug, Error)]
#[error("{}", .location.render(message))]
pub struct ParseError {
    message: String,
    location: Location,
}

impl ParseError {
    pub fn new(message: impl Into<String>, location: Location) -> Self {
        ParseError { message: message.into(), location }
    }

    /// The parser expected one of a small set of tokens and found
    /// something else.
    pub fn from_unexpected_token(expected: &str, found: &Token) -> Self {
        ParseError::new(
            format!("expected {expected}, found {:?}", found.text),
            found.location.clone(),
        )
    }

    /// A token was syntactically plausible but the current dialect
    /// doesn't support the construct it introduces.
    pub fn from_disallowed(feature: &str, found: &Token) -> Self {
        ParseError::new(
            format!("{feature} is not supported by this dialect"),
            found.location.clone(),
        )
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn location(&self) -> &Location {
        &self.location
    }
}
