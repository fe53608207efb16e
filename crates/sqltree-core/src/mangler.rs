//! The two passes that run between tokenizing and parsing.
//!
//! `distinguish_keywords` reclassifies any `identifier` token whose
//! upper-cased text is in the dialect's reserved-word set as a `keyword`
//! token. `mangle` then walks the (possibly reclassified) stream, merging
//! `IS NOT`/`NOT IN`/`NOT LIKE`/`NOT REGEXP` into single keyword tokens and
//! attaching comments to the token they trail.

use smol_str::SmolStr;

use crate::dialect::Dialect;
use crate::token::{Token, TokenKind};

/// `(first, second)` pairs that mangle into a single keyword token, in the
/// order they're checked.
const KEYWORD_PAIRS: &[(&str, &str)] = &[("IS", "NOT"), ("NOT", "IN"), ("NOT", "LIKE"), ("NOT", "REGEXP")];

pub fn distinguish_keywords(tokens: Vec<Token>, dialect: &Dialect) -> Vec<Token> {
    tokens
        .into_iter()
        .map(|token| {
            if token.kind == TokenKind::Identifier {
                let upper = token.text.to_ascii_uppercase();
                if dialect.is_reserved_keyword(&upper) {
                    return Token::new(TokenKind::Keyword, upper, token.location);
                }
            }
            token
        })
        .collect()
}

pub fn mangle(tokens: Vec<Token>) -> Vec<Token> {
    let mut out: Vec<Token> = Vec::with_capacity(tokens.len());
    for (i, token) in tokens.into_iter().enumerate() {
        if i == 0 {
            out.push(token);
            continue;
        }
        if token.kind == TokenKind::Comment {
            let tail = out.last_mut().expect("first token already pushed");
            tail.trailing_comments.push(token);
            continue;
        }
        if token.kind == TokenKind::Keyword {
            if let Some(tail) = out.last() {
                if tail.kind == TokenKind::Keyword {
                    let merged = KEYWORD_PAIRS
                        .iter()
                        .find(|(left, right)| tail.text.eq_ignore_ascii_case(left) && token.text.eq_ignore_ascii_case(right));
                    if merged.is_some() {
                        let tail = out.pop().unwrap();
                        out.push(merge_tokens(tail, token));
                        continue;
                    }
                }
            }
        }
        out.push(token);
    }
    out
}

fn merge_tokens(left: Token, right: Token) -> Token {
    let location = left.location.join(&right.location);
    let text = SmolStr::new(format!("{} {}", left.text, right.text));
    let mut trailing_comments = left.trailing_comments;
    trailing_comments.extend(right.trailing_comments);
    Token { kind: TokenKind::Keyword, text, location, trailing_comments }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::Dialect;
    use crate::tokenizer::tokenize;

    fn mangled(sql: &str, dialect: &Dialect) -> Vec<Token> {
        let tokens = tokenize(sql).unwrap();
        let tokens = distinguish_keywords(tokens, dialect);
        mangle(tokens)
    }

    #[test]
    fn distinguishes_reserved_identifiers() {
        let tokens = mangled("select x", &Dialect::mysql());
        assert_eq!(tokens[0].kind, TokenKind::Keyword);
        assert_eq!(tokens[0].text, "SELECT");
        assert_eq!(tokens[1].kind, TokenKind::Identifier);
    }

    #[test]
    fn merges_is_not() {
        let tokens = mangled("x is not null", &Dialect::mysql());
        let kw: Vec<&str> = tokens.iter().filter(|t| t.kind == TokenKind::Keyword).map(|t| t.text.as_str()).collect();
        assert_eq!(kw, vec!["IS NOT", "NULL"]);
    }

    #[test]
    fn merges_not_in_not_like_not_regexp() {
        assert_eq!(
            mangled("x not in (1)", &Dialect::mysql())[1].text,
            "NOT IN"
        );
        assert_eq!(
            mangled("x not like '%y'", &Dialect::mysql())[1].text,
            "NOT LIKE"
        );
        assert_eq!(
            mangled("x not regexp 'y'", &Dialect::mysql())[1].text,
            "NOT REGEXP"
        );
    }

    #[test]
    fn attaches_trailing_comment_to_host_token() {
        let tokens = mangled("select x -- trailing\nfrom y", &Dialect::mysql());
        let x = tokens.iter().find(|t| t.text == "x").unwrap();
        assert_eq!(x.trailing_comments.len(), 1);
        assert_eq!(x.trailing_comments[0].text, "-- trailing\n");
        assert!(!tokens.iter().any(|t| t.kind == TokenKind::Comment));
    }

    #[test]
    fn first_token_never_attaches_a_comment() {
        // A leading comment is never mangled away; the parser detaches it
        // as a statement's leading comment instead.
        let tokens = mangled("-- lead\nselect x", &Dialect::mysql());
        assert_eq!(tokens[0].kind, TokenKind::Comment);
    }
}
