use std::rc::Rc;

use smol_str::SmolStr;

use crate::errors::TokenizeError;
use crate::location::Location;
use crate::token::{Token, TokenKind};

/// Two-character punctuation sequences; every other listed punctuation
/// character is valid standalone. `%%` is not real SQL but is bundled so
/// that `%s`-style host-language substitution survives a round trip; `--`
/// and `/*` are comment starters, handled specially once matched.
const TWO_CHAR_PUNCTUATION: &[&str] =
    &[">=", "<=", "<>", "!=", ">>", "<<", "&&", "||", "%%", "--", "/*"];
const ONE_CHAR_PUNCTUATION: &[char] =
    &['.', '(', ')', ',', '+', '*', '=', '/', '-', '~', '&', '^', '|', '>', '<', '!'];

/// Tokenizes `sql` into a lossless stream of tokens terminated by a
/// synthetic `eof` token. Comments and every byte of whitespace-separated
/// source are fully accounted for via each token's `Location`; see
/// `crate::mangler` for the pass that attaches comments and merges
/// multi-word operators. The dialect parameter is accepted for symmetry
/// with later stages (distinguishing keywords) even though the lexical
/// rules themselves are dialect-independent.
pub fn tokenize(sql: &str) -> Result<Vec<Token>, TokenizeError> {
    let source: Rc<str> = Rc::from(sql);
    let chars: Vec<char> = sql.chars().collect();
    let byte_offsets = char_byte_offsets(sql, &chars);
    let mut cursor = Cursor { chars: &chars, byte_offsets: &byte_offsets, pos: 0, source: &source };
    let mut tokens = Vec::new();

    while let Some(&c) = cursor.peek() {
        let start = cursor.pos;
        if c.is_whitespace() {
            cursor.advance();
            continue;
        }
        if c.is_ascii_alphabetic() {
            let text = cursor.consume_identifier();
            tokens.push(cursor.make_token(TokenKind::Identifier, text, start));
            continue;
        }
        if c == '%' {
            tokens.push(cursor.consume_percent(start)?);
            continue;
        }
        if c == '?' {
            cursor.advance();
            tokens.push(cursor.make_token(TokenKind::Placeholder, "?".to_string(), start));
            continue;
        }
        if c == '#' {
            cursor.advance();
            let mut text = String::from("#");
            text.push_str(&cursor.consume_until('\n', true)?);
            tokens.push(cursor.make_token(TokenKind::Comment, text, start));
            continue;
        }
        if let Some(two) = cursor.peek_two() {
            if two == "--" {
                cursor.advance();
                cursor.advance();
                let mut text = String::from("--");
                text.push_str(&cursor.consume_until('\n', true));
                tokens.push(cursor.make_token(TokenKind::Comment, text, start));
                continue;
            }
            if two == "/*" {
                cursor.advance();
                cursor.advance();
                let body = cursor.consume_block_comment()?;
                let mut text = String::from("/*");
                text.push_str(&body);
                tokens.push(cursor.make_token(TokenKind::Comment, text, start));
                continue;
            }
            if TWO_CHAR_PUNCTUATION.contains(&two.as_str()) {
                cursor.advance();
                cursor.advance();
                tokens.push(cursor.make_token(TokenKind::Punctuation, two, start));
                continue;
            }
        }
        if ONE_CHAR_PUNCTUATION.contains(&c) {
            cursor.advance();
            tokens.push(cursor.make_token(TokenKind::Punctuation, c.to_string(), start));
            continue;
        }
        if c.is_ascii_digit() {
            let text = cursor.consume_number();
            tokens.push(cursor.make_token(TokenKind::Number, text, start));
            continue;
        }
        if c == '`' || c == '\'' || c == '"' {
            let text = cursor.consume_string(c)?;
            tokens.push(cursor.make_token(TokenKind::String, text, start));
            continue;
        }
        if c == '{' {
            cursor.advance();
            let mut text = String::from("{");
            let body = cursor.consume_until('}', false)?;
            text.push_str(&body);
            tokens.push(cursor.make_token(TokenKind::Placeholder, text, start));
            continue;
        }
        return Err(TokenizeError::new(
            format!("unexpected character {c:?}"),
            cursor.location_for(start, start),
        ));
    }

    let eof_location = Location::eof(Rc::clone(&source));
    tokens.push(Token::new(TokenKind::Eof, "", eof_location));
    Ok(tokens)
}

fn char_byte_offsets(sql: &str, chars: &[char]) -> Vec<usize> {
    let mut offsets = Vec::with_capacity(chars.len() + 1);
    let mut byte = 0usize;
    for c in chars {
        offsets.push(byte);
        byte += c.len_utf8();
    }
    offsets.push(sql.len());
    offsets
}

struct Cursor<'a> {
    chars: &'a [char],
    byte_offsets: &'a [usize],
    pos: usize,
    source: &'a Rc<str>,
}

impl<'a> Cursor<'a> {
    fn peek(&self) -> Option<&char> {
        self.chars.get(self.pos)
    }

    fn peek_two(&self) -> Option<String> {
        let a = self.chars.get(self.pos)?;
        let b = self.chars.get(self.pos + 1)?;
        Some([*a, *b].iter().collect())
    }

    fn advance(&mut self) {
        self.pos += 1;
    }

    fn location_for(&self, start_char: usize, end_char_inclusive: usize) -> Location {
        let start = self.byte_offsets[start_char];
        let end = self.byte_offsets[end_char_inclusive + 1] - 1;
        Location::new(Rc::clone(self.source), start, end)
    }

    fn make_token(&self, kind: TokenKind, text: String, start_char: usize) -> Token {
        let end_char_inclusive = self.pos - 1;
        let location = self.location_for(start_char, end_char_inclusive);
        Token::new(kind, SmolStr::new(text), location)
    }

    fn consume_identifier(&mut self) -> String {
        let mut text = String::new();
        while let Some(&c) = self.peek() {
            if c.is_alphanumeric() || c == '_' {
                text.push(c);
                self.advance();
            } else {
                break;
            }
        }
        text
    }

    fn consume_integer(&mut self) -> String {
        let mut text = String::new();
        while let Some(&c) = self.peek() {
            if c.is_ascii_digit() {
                text.push(c);
                self.advance();
            } else {
                break;
            }
        }
        text
    }

    fn consume_number(&mut self) -> String {
        let mut text = self.consume_integer();
        if self.peek() == Some(&'.') {
            self.advance();
            text.push('.');
            text.push_str(&self.consume_integer());
        }
        if matches!(self.peek(), Some(&'e') | Some(&'E')) {
            let e = *self.peek().unwrap();
            self.advance();
            text.push(e);
            if self.peek() == Some(&'-') {
                self.advance();
                text.push('-');
            }
            text.push_str(&self.consume_integer());
        }
        text
    }

    /// Consume up to and including `end`. With `eof_okay`, EOF also
    /// terminates successfully (used for line comments).
    fn consume_until(&mut self, end: char, eof_okay: bool) -> Result<String, TokenizeError> {
        let start = self.pos;
        let mut text = String::new();
        while let Some(&c) = self.peek() {
            text.push(c);
            self.advance();
            if c == end {
                return Ok(text);
            }
        }
        if eof_okay {
            Ok(text)
        } else {
            Err(TokenizeError::new(
                format!("unexpected EOF (expected {end:?})"),
                self.location_for(start.saturating_sub(1), self.pos.saturating_sub(1)),
            ))
        }
    }

    fn consume_block_comment(&mut self) -> Result<String, TokenizeError> {
        let start = self.pos;
        let mut text = String::new();
        let mut seen_star = false;
        while let Some(&c) = self.peek() {
            text.push(c);
            self.advance();
            if seen_star && c == '/' {
                return Ok(text);
            }
            seen_star = c == '*';
        }
        Err(TokenizeError::new(
            "unexpected EOF (expected '*/')".to_string(),
            self.location_for(start.saturating_sub(1), self.pos.saturating_sub(1)),
        ))
    }

    /// Consume a quoted literal, including the closing quote, supporting
    /// `<quote><quote>` as an escaped literal quote character.
    fn consume_string(&mut self, quote: char) -> Result<String, TokenizeError> {
        let start = self.pos;
        self.advance(); // opening quote
        let mut text = String::from(quote);
        loop {
            match self.peek() {
                None => {
                    return Err(TokenizeError::new(
                        format!("unexpected EOF (expected {quote:?})"),
                        self.location_for(start, self.pos.saturating_sub(1)),
                    ));
                }
                Some(&c) => {
                    text.push(c);
                    self.advance();
                    if c == quote {
                        if self.peek() == Some(&quote) {
                            text.push(quote);
                            self.advance();
                            continue;
                        }
                        return Ok(text);
                    }
                }
            }
        }
    }

    fn consume_percent(&mut self, start: usize) -> Result<Token, TokenizeError> {
        self.advance(); // consume '%'
        match self.peek().copied() {
            Some(c) if c.is_ascii_alphabetic() => {
                let mut text = String::from("%");
                text.push_str(&self.consume_identifier());
                Ok(self.make_token(TokenKind::Placeholder, text, start))
            }
            Some('(') => {
                self.advance();
                let mut text = String::from("%(");
                text.push_str(&self.consume_identifier());
                match self.peek().copied() {
                    Some(')') => {
                        self.advance();
                        text.push(')');
                    }
                    other => {
                        return Err(TokenizeError::new(
                            format!("expected ')', got {other:?}"),
                            self.location_for(start, self.pos.saturating_sub(1)),
                        ));
                    }
                }
                text.push_str(&self.consume_identifier());
                Ok(self.make_token(TokenKind::Placeholder, text, start))
            }
            Some('%') => {
                self.advance();
                Ok(self.make_token(TokenKind::Punctuation, "%%".to_string(), start))
            }
            _ => Ok(self.make_token(TokenKind::Punctuation, "%".to_string(), start)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(sql: &str) -> Vec<TokenKind> {
        tokenize(sql).unwrap().into_iter().map(|t| t.kind).collect()
    }

    fn texts(sql: &str) -> Vec<String> {
        tokenize(sql).unwrap().into_iter().map(|t| t.text.to_string()).collect()
    }

    #[test]
    fn tokenizes_simple_select() {
        assert_eq!(
            kinds("select 1"),
            vec![TokenKind::Identifier, TokenKind::Number, TokenKind::Eof]
        );
    }

    #[test]
    fn punctuation_prefers_two_char_form() {
        assert_eq!(texts("a <= b"), vec!["a", "<=", "b", ""]);
        assert_eq!(texts("a < b"), vec!["a", "<", "b", ""]);
    }

    #[test]
    fn line_comment_runs_to_newline() {
        let tokens = tokenize("a -- hi\nb").unwrap();
        assert_eq!(tokens[1].kind, TokenKind::Comment);
        assert_eq!(tokens[1].text, "-- hi\n");
    }

    #[test]
    fn hash_comment_runs_to_eof() {
        let tokens = tokenize("a # trailing").unwrap();
        assert_eq!(tokens[1].kind, TokenKind::Comment);
        assert_eq!(tokens[1].text, "# trailing");
    }

    #[test]
    fn block_comment_requires_terminator() {
        assert!(tokenize("/* unterminated").is_err());
        let tokens = tokenize("/* done */ x").unwrap();
        assert_eq!(tokens[0].text, "/* done */");
    }

    #[test]
    fn string_literal_with_doubled_quote_escape() {
        let tokens = tokenize("'it''s'").unwrap();
        assert_eq!(tokens[0].kind, TokenKind::String);
        assert_eq!(tokens[0].text, "'it''s'");
    }

    #[test]
    fn placeholder_forms() {
        assert_eq!(texts("%s %(name)s ? {foo}"), vec!["%s", "%(name)s", "?", "{foo}", ""]);
    }

    #[test]
    fn number_with_exponent_and_fraction() {
        assert_eq!(texts("1.5e-10"), vec!["1.5e-10", ""]);
    }

    #[test]
    fn unterminated_string_is_fatal() {
        assert!(tokenize("'abc").is_err());
    }

    #[test]
    fn unknown_character_is_fatal() {
        assert!(tokenize("a $ b").is_err());
    }

    #[test]
    fn totality_round_trip_preserves_bytes() {
        let sql = "SELECT  a.b , 'x''y' -- c\nFROM t WHERE n = 1.5e2";
        let tokens = tokenize(sql).unwrap();
        let mut reconstructed = String::new();
        let mut last_end: Option<usize> = None;
        for t in &tokens {
            if t.kind == TokenKind::Eof {
                break;
            }
            if let Some(prev_end) = last_end {
                reconstructed.push_str(&sql[prev_end + 1..t.location.start]);
            } else {
                reconstructed.push_str(&sql[0..t.location.start]);
            }
            reconstructed.push_str(t.location.text());
            last_end = Some(t.location.end);
        }
        if let Some(prev_end) = last_end {
            reconstructed.push_str(&sql[prev_end + 1..]);
        }
        assert_eq!(reconstructed, sql);
    }
}
