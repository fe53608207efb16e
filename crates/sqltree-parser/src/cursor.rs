use sqltree_core::{Dialect, PeekingIterator, Token, TokenKind};
use sqltree_tree::{Keyword, KeywordSequence, Punctuation};

use crate::ParseError;

/// The single mutable cursor threaded through every parse function.
/// Wraps the lexical-layer `PeekingIterator` with SQL-shaped combinators.
/// Checkpoint/restore for speculative parsing is just
/// `position()`/`set_position()` on the underlying iterator.
pub struct Cursor<'a> {
    tokens: PeekingIterator<Token>,
    dialect: &'a Dialect,
}

impl<'a> Cursor<'a> {
    pub fn new(tokens: Vec<Token>, dialect: &'a Dialect) -> Self {
        Cursor { tokens: PeekingIterator::new(tokens), dialect }
    }

    pub fn dialect(&self) -> &'a Dialect {
        self.dialect
    }

    /// The next unconsumed token. Always `Some` — the token stream ends
    /// in a synthetic EOF token that is never advanced past by a
    /// well-formed grammar rule.
    pub fn peek(&self) -> &Token {
        self.tokens.peek().expect("token stream is missing its EOF sentinel")
    }

    pub fn at_eof(&self) -> bool {
        self.peek().kind == TokenKind::Eof
    }

    pub fn checkpoint(&self) -> usize {
        self.tokens.position()
    }

    pub fn restore(&mut self, checkpoint: usize) {
        self.tokens.set_position(checkpoint);
    }

    fn advance(&mut self) -> Token {
        PeekingIterator::next(&mut self.tokens).clone()
    }

    /// A token counts as "keyword `text`" if its upper-cased text matches,
    /// regardless of whether the distinguishing pass actually reclassified
    /// it to `Keyword` kind. Several structural words (`BY` in Redshift,
    /// `TRUNCATE`/`FLUSH` in Presto, …) are not in every dialect's
    /// reserved-word set, so gating on `TokenKind::Keyword` would make the
    /// grammar dialect-dependent in ways the grammar itself never intends;
    /// the mangler's distinguishing pass exists so callers can match soft
    /// keywords case-insensitively regardless of classification (see
    /// `sqltree_core::mangler`).
    pub fn peek_is_keyword(&self, text: &str) -> bool {
        let tok = self.peek();
        matches!(tok.kind, TokenKind::Keyword | TokenKind::Identifier) && tok.text.eq_ignore_ascii_case(text)
    }

    pub fn peek_is_punctuation(&self, text: &str) -> bool {
        self.peek().is_punctuation(text)
    }

    /// Consumes the next token regardless of kind; used only for detaching
    /// leading comments.
    pub fn advance_any(&mut self) -> Token {
        self.advance()
    }

    pub fn expect_keyword(&mut self, text: &str) -> Result<Keyword, ParseError> {
        if self.peek_is_keyword(text) {
            Ok(Keyword(self.advance()))
        } else {
            Err(ParseError::from_unexpected_token(&format!("keyword {text}"), self.peek()))
        }
    }

    pub fn expect_punctuation(&mut self, text: &str) -> Result<Punctuation, ParseError> {
        if self.peek_is_punctuation(text) {
            Ok(Punctuation(self.advance()))
        } else {
            Err(ParseError::from_unexpected_token(&format!("{text:?}"), self.peek()))
        }
    }

    pub fn maybe_consume_keyword(&mut self, text: &str) -> Option<Keyword> {
        if self.peek_is_keyword(text) {
            Some(Keyword(self.advance()))
        } else {
            None
        }
    }

    pub fn maybe_consume_punctuation(&mut self, text: &str) -> Option<Punctuation> {
        if self.peek_is_punctuation(text) {
            Some(Punctuation(self.advance()))
        } else {
            None
        }
    }

    /// Consumes as many of `keywords` in order as are present, stopping at
    /// the first miss. Used for optional modifier runs like `NOT NULL` or
    /// `IF NOT EXISTS` where every prefix is itself valid to have matched
    /// nothing.
    pub fn maybe_consume_keyword_sequence(&mut self, keywords: &[&str]) -> Option<KeywordSequence> {
        let checkpoint = self.checkpoint();
        let mut matched = Vec::with_capacity(keywords.len());
        for &kw in keywords {
            match self.maybe_consume_keyword(kw) {
                Some(k) => matched.push(k),
                None => {
                    self.restore(checkpoint);
                    return None;
                }
            }
        }
        Some(KeywordSequence::new(matched))
    }

    /// Consumes `keywords` in order, erroring on the first miss — for
    /// mandatory fixed phrases (`GROUP BY`, `ORDER BY`).
    pub fn expect_keyword_sequence(&mut self, keywords: &[&str]) -> Result<KeywordSequence, ParseError> {
        let mut matched = Vec::with_capacity(keywords.len());
        for &kw in keywords {
            matched.push(self.expect_keyword(kw)?);
        }
        Ok(KeywordSequence::new(matched))
    }

    /// Tries each candidate keyword in turn, returning the first matched
    /// keyword's text alongside the consumed token, or an error naming
    /// every candidate.
    pub fn expect_one_of_keywords(&mut self, candidates: &[&str]) -> Result<Keyword, ParseError> {
        for &c in candidates {
            if let Some(k) = self.maybe_consume_keyword(c) {
                return Ok(k);
            }
        }
        Err(ParseError::from_unexpected_token(&format!("one of {candidates:?}"), self.peek()))
    }

    /// Accepts a plain identifier, a (possibly soft) keyword used where the
    /// grammar requires a name, or a string literal whose quote character
    /// matches the dialect's identifier quote.
    pub fn identifier(&mut self) -> Result<Token, ParseError> {
        let tok = self.peek();
        let is_quoted_identifier =
            tok.kind == TokenKind::String && tok.text.starts_with(self.dialect.identifier_quote());
        if tok.kind == TokenKind::Identifier || tok.kind == TokenKind::Keyword || is_quoted_identifier {
            Ok(self.advance())
        } else {
            Err(ParseError::from_unexpected_token("an identifier", self.peek()))
        }
    }

    /// `(item (, item)* ,?)` — parses a comma-separated run and records
    /// whether each element had a trailing comma, as the lossless CST
    /// requires.
    pub fn parse_comma_separated<T>(
        &mut self,
        mut parse_one: impl FnMut(&mut Self) -> Result<T, ParseError>,
    ) -> Result<Vec<sqltree_tree::WithTrailingComma<T>>, ParseError> {
        let mut items = Vec::new();
        loop {
            let node = parse_one(self)?;
            let comma = self.maybe_consume_punctuation(",");
            let has_comma = comma.is_some();
            items.push(sqltree_tree::WithTrailingComma::new(node, comma));
            if !has_comma {
                break;
            }
        }
        Ok(items)
    }
}
