use smol_str::SmolStr;

use crate::location::Location;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Keyword,
    Punctuation,
    String,
    Number,
    Identifier,
    Placeholder,
    Comment,
    Eof,
}

/// A lossless lexical token: its kind, exact source text, location, and any
/// comments that lexically trail it (attached during mangling).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: SmolStr,
    pub location: Location,
    pub trailing_comments: Vec<Token>,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<SmolStr>, location: Location) -> Self {
        Token { kind, text: text.into(), location, trailing_comments: Vec::new() }
    }

    pub fn is_eof(&self) -> bool {
        self.kind == TokenKind::Eof
    }

    /// Case-insensitive comparison against an upper-cased keyword literal,
    /// used throughout the parser's dispatch tables.
    pub fn is_keyword(&self, upper: &str) -> bool {
        self.kind == TokenKind::Keyword && self.text.eq_ignore_ascii_case(upper)
    }

    pub fn is_punctuation(&self, text: &str) -> bool {
        self.kind == TokenKind::Punctuation && self.text == text
    }
}
