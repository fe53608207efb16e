//! The sqltree CST: a sealed hierarchy of `Leaf`, `Composite`, and
//! `Statement` node kinds, realized in Rust as a closed set of
//! enums/structs rather than a dynamically-dispatched class hierarchy —
//! see `sqltree_format` for the exhaustive-match traversal that replaces
//! a reflection-based visitor.
//!
//! Every node is built once by `sqltree_parser` and never mutated; parent
//! nodes own their children outright (`Box`/`Vec`, no `Rc`, no cycles).

mod clauses;
mod expr;
mod statements;
mod tables;
mod visitor;

pub use clauses::*;
pub use expr::*;
pub use statements::*;
pub use tables::*;
pub use visitor::{walk, walk_expr, walk_statement, walk_table_ref, Transformer, Visitor};

use sqltree_core::Token;

/// A keyword leaf: an upper-cased reserved word, carrying its token so the
/// formatter can still recover trailing comments attached to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keyword(pub Token);

/// A punctuation leaf (e.g. `,`, `(`, `=`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Punctuation(pub Token);

/// A run of keywords that always appear together (`GROUP BY`, `ORDER BY`,
/// `IS NOT`). Trailing comments on each keyword are buffered by the
/// formatter and re-emitted once the whole sequence has been written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordSequence(pub Vec<Keyword>);

impl KeywordSequence {
    pub fn new(keywords: Vec<Keyword>) -> Self {
        KeywordSequence(keywords)
    }
}

/// Wraps any list element with whether a trailing comma followed it in the
/// source — losslessness requires this to be explicit rather than inferred.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WithTrailingComma<T> {
    pub node: T,
    pub trailing_comma: Option<Punctuation>,
}

impl<T> WithTrailingComma<T> {
    pub fn new(node: T, trailing_comma: Option<Punctuation>) -> Self {
        WithTrailingComma { node, trailing_comma }
    }

    pub fn has_trailing_comma(&self) -> bool {
        self.trailing_comma.is_some()
    }
}

/// A bare placeholder token standing in for an entire optional clause:
/// before every optional clause the parser checks for one. Lets
/// templating hosts splice a placeholder into any optional slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceholderClause {
    pub placeholder: Token,
}

/// An optional clause slot that may instead hold a bare placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MaybePlaceholder<T> {
    Clause(T),
    Placeholder(PlaceholderClause),
}

impl<T> MaybePlaceholder<T> {
    pub fn as_clause(&self) -> Option<&T> {
        match self {
            MaybePlaceholder::Clause(c) => Some(c),
            MaybePlaceholder::Placeholder(_) => None,
        }
    }
}

pub type OptClause<T> = Option<MaybePlaceholder<T>>;

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use sqltree_core::{Location, Token, TokenKind};

    fn token(text: &str) -> Token {
        Token::new(TokenKind::Identifier, text, Location::eof(std::rc::Rc::from("")))
    }

    #[test]
    fn with_trailing_comma_reports_presence() {
        let bare = WithTrailingComma::new(token("a"), None);
        let trailed = WithTrailingComma::new(token("b"), Some(Punctuation(token(","))));
        assert!(!bare.has_trailing_comma());
        assert!(trailed.has_trailing_comma());
    }

    #[test]
    fn maybe_placeholder_as_clause_distinguishes_variants() {
        let clause: MaybePlaceholder<Token> = MaybePlaceholder::Clause(token("x"));
        let placeholder: MaybePlaceholder<Token> = MaybePlaceholder::Placeholder(PlaceholderClause { placeholder: token("%s") });
        assert_eq!(clause.as_clause(), Some(&token("x")));
        assert_eq!(placeholder.as_clause(), None);
    }
}
