use sqltree_core::Token;

use crate::{Expr, Keyword, KeywordSequence, Punctuation, TableName, TableRef, WithTrailingComma};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColNameList {
    pub open_paren: Punctuation,
    pub col_names: Vec<WithTrailingComma<Token>>,
    pub close_paren: Punctuation,
}

/// Target of any of the three `SELECT ... INTO` slots or of
/// `INSERT INTO`/`REPLACE INTO`; `kw` is `None` only for a synthetically
/// rebuilt node (the parser always sets it).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntoClause {
    pub kw: Option<Keyword>,
    pub table: TableName,
    pub col_names: Option<ColNameList>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FromClause {
    pub kw: Option<Keyword>,
    pub tables: Vec<WithTrailingComma<TableRef>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UsingClause {
    pub kw: Keyword,
    pub tables: Vec<WithTrailingComma<TableRef>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WhereClause {
    pub kw: Keyword,
    pub condition: Expr,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HavingClause {
    pub kw: Keyword,
    pub condition: Expr,
}

/// Shared by `GROUP BY` and `ORDER BY`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderByExpr {
    pub expr: Expr,
    pub direction_kw: Option<Keyword>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupByClause {
    pub kwseq: KeywordSequence,
    pub exprs: Vec<WithTrailingComma<OrderByExpr>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderByClause {
    pub kwseq: KeywordSequence,
    pub exprs: Vec<WithTrailingComma<OrderByExpr>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LimitValue {
    Number(Token),
    Placeholder(Token),
    All(Keyword),
}

/// `LIMIT row_count [OFFSET offset]`. When the source used MySQL's
/// `LIMIT offset, row_count` comma form, `offset_kw` is `None` — the
/// canonical rendering always uses the `OFFSET` keyword spelling (spec
/// §8 concrete scenario 2).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LimitClause {
    pub kw: Keyword,
    pub row_count: LimitValue,
    pub offset: Option<LimitValue>,
    pub offset_kw: Option<Keyword>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectExpr {
    pub expr: Expr,
    pub as_kw: Option<Keyword>,
    pub alias: Option<Token>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WaitOption {
    NoWait(Keyword),
    SkipLocked(KeywordSequence),
}

/// `FOR UPDATE|SHARE [NOWAIT | SKIP LOCKED]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LockMode {
    pub for_kw: Keyword,
    pub mode_kw: Keyword,
    pub wait_option: Option<WaitOption>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommonTableExpression {
    pub table_name: Token,
    pub col_names: Option<ColNameList>,
    pub as_kw: Keyword,
    pub subquery: crate::Subselect,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WithClause {
    pub kw: Keyword,
    pub recursive_kw: Option<Keyword>,
    pub ctes: Vec<WithTrailingComma<CommonTableExpression>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssignmentValue {
    Expr(Expr),
    Default(Keyword),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    pub col_name: Expr,
    pub eq_punc: Punctuation,
    pub value: AssignmentValue,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetClause {
    pub kw: Keyword,
    pub assignments: Vec<WithTrailingComma<Assignment>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueList {
    pub open_paren: Punctuation,
    pub values: Vec<WithTrailingComma<AssignmentValue>>,
    pub close_paren: Punctuation,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefaultValues {
    pub kwseq: KeywordSequence,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OnDuplicateKeyUpdate {
    pub kwseq: KeywordSequence,
    pub assignments: Vec<WithTrailingComma<Assignment>>,
}
