//! Lexical front end shared by every downstream crate: source locations,
//! the one-token-lookahead peeking iterator, the dialect registry, the
//! tokenizer, and the two keyword-handling passes (distinguishing and
//! mangling) that run between tokenizing and parsing.

pub mod dialect;
pub mod errors;
pub mod keywords;
pub mod location;
pub mod mangler;
pub mod peeking_iterator;
pub mod token;
pub mod tokenizer;

pub use dialect::{vendor_names, Dialect, Feature, Vendor};
pub use errors::{EOFError, TokenizeError};
pub use location::Location;
pub use peeking_iterator::PeekingIterator;
pub use token::{Token, TokenKind};

/// Runs the full lexical pipeline: tokenize, distinguish keywords against
/// the dialect's reserved-word set, then mangle (merge two-word operators,
/// attach trailing comments). The result is ready for `sqltree_parser::parse`.
pub fn lex(sql: &str, dialect: &Dialect) -> Result<Vec<Token>, TokenizeError> {
    log::trace!("tokenizing {} bytes for dialect {dialect}", sql.len());
    let tokens = tokenizer::tokenize(sql)?;
    let tokens = mangler::distinguish_keywords(tokens, dialect);
    let tokens = mangler::mangle(tokens);
    Ok(tokens)
}
