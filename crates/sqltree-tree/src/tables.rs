use sqltree_core::Token;

use crate::{Expr, Keyword, KeywordSequence, Punctuation, WithTrailingComma};

/// A bare or dotted table name (`t`, `db.t`). Shared between `FROM`/`JOIN`
/// table factors and `INTO` targets so `get_tables` can pattern-match one
/// type regardless of where the name appeared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableName {
    Simple(Token),
    Dotted { left: Token, dot: Punctuation, right: Token },
}

impl TableName {
    /// The dotted-or-bare display form used by `get_tables`.
    pub fn dotted_text(&self) -> String {
        match self {
            TableName::Simple(t) => t.text.to_string(),
            TableName::Dotted { left, right, .. } => format!("{left}.{right}", left = left.text, right = right.text),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexHint {
    /// `USE` / `IGNORE` / `FORCE`.
    pub intro_kw: Keyword,
    /// `INDEX` / `KEY`.
    pub kind_kw: Keyword,
    pub for_kw: Option<Keyword>,
    /// `JOIN` / `ORDER BY` / `GROUP BY`.
    pub for_what: Option<KeywordSequence>,
    pub left_paren: Punctuation,
    pub index_list: Vec<WithTrailingComma<Token>>,
    pub right_paren: Punctuation,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimpleTableFactor {
    pub table_name: TableName,
    pub as_kw: Option<Keyword>,
    pub alias: Option<Token>,
    pub index_hint_list: Vec<WithTrailingComma<IndexHint>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubqueryFactor {
    pub lateral_kw: Option<Keyword>,
    pub table_subquery: crate::Subselect,
    pub as_kw: Option<Keyword>,
    pub alias: Token,
    pub left_paren: Option<Punctuation>,
    pub col_list: Vec<WithTrailingComma<Token>>,
    pub right_paren: Option<Punctuation>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableReferenceList {
    pub left_paren: Punctuation,
    pub references: Vec<WithTrailingComma<TableRef>>,
    pub right_paren: Punctuation,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JoinSpec {
    On(JoinOn),
    Using(UsingSpec),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinOn {
    pub kw: Keyword,
    pub search_condition: Expr,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UsingSpec {
    pub kw: Keyword,
    pub left_paren: Punctuation,
    pub columns: Vec<WithTrailingComma<Token>>,
    pub right_paren: Punctuation,
}

/// `[INNER|CROSS] JOIN` or the single-keyword `STRAIGHT_JOIN` (in which
/// case `inner_cross` is `None` and `join_kw`'s text is `STRAIGHT_JOIN`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimpleJoinedTable {
    pub left: Box<TableRef>,
    pub inner_cross: Option<Keyword>,
    pub join_kw: Keyword,
    pub right: Box<TableRef>,
    pub join_spec: Option<JoinSpec>,
}

/// `(LEFT|RIGHT) OUTER? JOIN`; `join_specification` is mandatory per spec
/// §4.4 ("`LEFT/RIGHT JOIN` requires a `join_spec`").
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeftRightJoinedTable {
    pub left: Box<TableRef>,
    pub left_right: Keyword,
    pub outer_kw: Option<Keyword>,
    pub join_kw: Keyword,
    pub right: Box<TableRef>,
    pub join_specification: JoinSpec,
}

/// `NATURAL (INNER|LEFT|RIGHT)? OUTER? JOIN`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NaturalJoinedTable {
    pub left: Box<TableRef>,
    pub natural_kw: Keyword,
    pub left_right: Option<Keyword>,
    pub inner_outer: Option<Keyword>,
    pub join_kw: Keyword,
    pub right: Box<TableRef>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JoinedTable {
    Simple(SimpleJoinedTable),
    LeftRight(LeftRightJoinedTable),
    Natural(NaturalJoinedTable),
}

/// `table_ref := table_factor (join_op table_factor join_spec?)*`,
/// left-associative: a `Join` variant's `left` is itself a `TableRef`,
/// recursing down to the first `table_factor`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableRef {
    Simple(SimpleTableFactor),
    Subquery(SubqueryFactor),
    ParenList(TableReferenceList),
    Join(Box<JoinedTable>),
}
