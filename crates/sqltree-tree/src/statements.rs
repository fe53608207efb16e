use sqltree_core::Token;

use crate::{
    Assignment, DefaultValues, Expr, FromClause, GroupByClause, HavingClause, IntoClause, Keyword,
    KeywordSequence, LimitClause, LockMode, OnDuplicateKeyUpdate, OrderByClause, Punctuation,
    SelectExpr, SetClause, TableName, TableRef, UsingClause, ValueList, WhereClause,
    WithTrailingComma, WithClause,
};

/// `SELECT` with every clause optional after the expression list. Every
/// `Option<MaybePlaceholder<T>>` slot is realized via `crate::OptClause<T>`
/// so any clause can be replaced by a bare placeholder for templating.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Select {
    pub with: Option<WithClause>,
    pub select_kw: Keyword,
    /// Modifier keywords like `DISTINCT`, `ALL`, `SQL_CACHE`, in source
    /// order — the group order dialects declare is advisory only: the
    /// parser accepts any order the tokenizer produced here and the
    /// formatter re-emits verbatim.
    pub modifiers: Vec<Keyword>,
    pub select_exprs: Vec<WithTrailingComma<SelectExpr>>,
    pub into: crate::OptClause<IntoClause>,
    pub from: crate::OptClause<FromClause>,
    pub where_clause: crate::OptClause<WhereClause>,
    pub group_by: crate::OptClause<GroupByClause>,
    pub having: crate::OptClause<HavingClause>,
    pub order_by: crate::OptClause<OrderByClause>,
    pub limit: crate::OptClause<LimitClause>,
    pub into2: crate::OptClause<IntoClause>,
    pub lock_mode: crate::OptClause<LockMode>,
    pub into3: crate::OptClause<IntoClause>,
}

/// `SELECT ... UNION [ALL|DISTINCT] SELECT ...` chain; each subsequent
/// member carries the connective keyword(s) that preceded it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnionEntry {
    pub union_kw: Keyword,
    pub modifier_kw: Option<Keyword>,
    pub select: Subselect,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnionStatement {
    pub first: Subselect,
    pub rest: Vec<UnionEntry>,
    pub order_by: crate::OptClause<OrderByClause>,
    pub limit: crate::OptClause<LimitClause>,
}

/// A `SELECT` appearing where parentheses are optional (top-level
/// statement position) or mandatory (subquery position). `Plain` only
/// appears as the top-level statement or as a `UnionStatement` member;
/// every other use site requires `Parenthesized`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Subselect {
    Plain(Box<Select>),
    Union(Box<UnionStatement>),
    Parenthesized { left_paren: Punctuation, inner: Box<Subselect>, right_paren: Punctuation },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delete {
    pub with: Option<WithClause>,
    pub delete_kw: Keyword,
    /// Table aliases named before `FROM` in MySQL's multi-table delete
    /// form (`DELETE t1 FROM t1 JOIN t2 ...`); empty in the single-table
    /// form.
    pub using_table_names: Vec<WithTrailingComma<Token>>,
    pub from: FromClause,
    pub using: Option<UsingClause>,
    pub where_clause: crate::OptClause<WhereClause>,
    pub order_by: crate::OptClause<OrderByClause>,
    pub limit: crate::OptClause<LimitClause>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Update {
    pub with: Option<WithClause>,
    pub update_kw: Keyword,
    pub ignore_kw: Option<Keyword>,
    pub tables: Vec<WithTrailingComma<TableRef>>,
    pub set: SetClause,
    pub where_clause: crate::OptClause<WhereClause>,
    pub order_by: crate::OptClause<OrderByClause>,
    pub limit: crate::OptClause<LimitClause>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InsertValues {
    Values { kw: Keyword, rows: Vec<WithTrailingComma<ValueList>> },
    Select(Subselect),
    Default(DefaultValues),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Insert {
    pub insert_kw: Keyword,
    pub ignore_kw: Option<Keyword>,
    pub into: IntoClause,
    pub values: InsertValues,
    pub on_duplicate_key_update: Option<OnDuplicateKeyUpdate>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Replace {
    pub replace_kw: Keyword,
    pub into: IntoClause,
    pub values: InsertValues,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDef {
    pub name: Token,
    pub type_name: Expr,
    pub rest: Vec<Token>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTable {
    pub kwseq: KeywordSequence,
    pub if_not_exists: Option<KeywordSequence>,
    pub table_name: TableName,
    pub left_paren: Punctuation,
    pub columns: Vec<WithTrailingComma<ColumnDef>>,
    pub right_paren: Punctuation,
    pub table_options: Vec<Token>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateView {
    pub kwseq: KeywordSequence,
    pub or_replace: Option<KeywordSequence>,
    pub view_name: TableName,
    pub col_names: Option<crate::ColNameList>,
    pub as_kw: Keyword,
    pub query: Subselect,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateIndex {
    pub kwseq: KeywordSequence,
    pub index_name: Token,
    pub on_kw: Keyword,
    pub table_name: TableName,
    pub left_paren: Punctuation,
    pub columns: Vec<WithTrailingComma<Token>>,
    pub right_paren: Punctuation,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreateStatement {
    Table(CreateTable),
    View(CreateView),
    Index(CreateIndex),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropStatement {
    pub kwseq: KeywordSequence,
    pub if_exists: Option<KeywordSequence>,
    pub names: Vec<WithTrailingComma<TableName>>,
    pub cascade_restrict: Option<Keyword>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TruncateStatement {
    pub kwseq: KeywordSequence,
    pub table_name: TableName,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenamePair {
    pub from: TableName,
    pub to_kw: Keyword,
    pub to: TableName,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenameTable {
    pub kwseq: KeywordSequence,
    pub pairs: Vec<WithTrailingComma<RenamePair>>,
}

/// `SET` session/global variable assignment. Distinct from `SetClause`
/// (used by `UPDATE ... SET`): this is a standalone statement, whose
/// right-hand sides may themselves be arbitrary literals, identifiers,
/// or `ON`/`OFF`-style keywords, not just column assignments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetStatement {
    pub set_kw: Keyword,
    pub assignments: Vec<WithTrailingComma<Assignment>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShowFilter {
    pub kw: Keyword,
    pub condition: Expr,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShowStatement {
    pub show_kw: Keyword,
    pub kwseq: KeywordSequence,
    pub from_table: Option<TableName>,
    pub filter: Option<ShowFilter>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExplainTarget {
    Select(Subselect),
    Delete(Box<Delete>),
    Update(Box<Update>),
    Insert(Box<Insert>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExplainStatement {
    pub explain_kw: Keyword,
    pub format_clause: Option<KeywordSequence>,
    pub target: ExplainTarget,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlushOption {
    Tables { kwseq: KeywordSequence, names: Vec<WithTrailingComma<TableName>> },
    Other(KeywordSequence),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flush {
    pub flush_kw: Keyword,
    pub options: Vec<WithTrailingComma<FlushOption>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartTransaction {
    pub kwseq: KeywordSequence,
}

/// Shell statements whose body is fully captured by their keyword
/// sequence (`COMMIT`, `ROLLBACK`, `BEGIN`, …) — grounded in how the
/// original formats `StartTransaction`/`Flush`, generalized to the
/// remaining no-argument statements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimpleStatement {
    pub kwseq: KeywordSequence,
}

/// A parsed statement together with any comments that preceded its
/// first token. The mangler never attaches a comment ahead of the
/// stream's first real token (it has nothing to trail), so the parser
/// peels those off itself before dispatching on the statement kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedStatement {
    pub leading_comments: Vec<Token>,
    pub statement: Statement,
}

/// The closed sum of every statement kind sqltree can parse or print.
/// Matched exhaustively everywhere instead of dispatched through a
/// visitor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    Select(Subselect),
    Delete(Delete),
    Update(Update),
    Insert(Insert),
    Replace(Replace),
    Create(CreateStatement),
    Drop(DropStatement),
    Truncate(TruncateStatement),
    RenameTable(RenameTable),
    Set(SetStatement),
    Show(ShowStatement),
    Explain(ExplainStatement),
    Flush(Flush),
    StartTransaction(StartTransaction),
    Simple(SimpleStatement),
}
