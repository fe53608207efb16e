use thiserror::Error;

use crate::location::Location;

/// A malformed-input error raised by the tokenizer: unexpected character,
/// unterminated string/comment, or an unrecognized punctuation sequence.
#[derive(Debug, Error)]
#[error("{}", .location.render(message))]
pub struct TokenizeError {
    message: String,
    location: Location,
}

impl TokenizeError {
    pub fn new(message: impl Into<String>, location: Location) -> Self {
        TokenizeError { message: message.into(), location }
    }

    pub fn location(&self) -> &Location {
        &self.location
    }
}

// `#[error("{}", ...)]` above captures `message` only through the format
// call; keep a plain accessor too since callers compare messages in tests.
impl TokenizeError {
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// An attempt to read past the synthetic `eof` token. This is always an
/// internal bug in a `parse_*` method, never a user-visible condition.
#[derive(Debug, Error)]
#[error("internal error: read past end of token stream")]
pub struct EOFError;
