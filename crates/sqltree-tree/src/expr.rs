use sqltree_core::Token;

use crate::{Keyword, KeywordSequence, Punctuation, WithTrailingComma};

/// Precedence classes, tightest-binding first. `parse_binop` recurses from
/// `Or` (loosest, outermost) down to `Exp` (tightest) down to primaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum Precedence {
    Exp = 1,
    MulDivMod = 2,
    AddSub = 3,
    Shift = 4,
    BitAnd = 5,
    BitOr = 6,
    Comparison = 7,
    And = 8,
    Xor = 9,
    Or = 10,
}

impl Precedence {
    /// Lowest level a `parse_binop` call is ever invoked with; `Exp`'s
    /// right-hand side bottoms out directly at `parse_simple_expression`.
    pub const MIN: Precedence = Precedence::Exp;
    pub const MAX: Precedence = Precedence::Or;

    /// `AND`/`XOR`/`OR` always render across multiple lines, as does
    /// every binary operator at or below `AND`'s precedence.
    pub const MIN_BOOLEAN: Precedence = Precedence::And;

    pub fn is_boolean(self) -> bool {
        self >= Precedence::MIN_BOOLEAN
    }

    pub fn tighter(self) -> Option<Precedence> {
        match self {
            Precedence::Exp => None,
            Precedence::MulDivMod => Some(Precedence::Exp),
            Precedence::AddSub => Some(Precedence::MulDivMod),
            Precedence::Shift => Some(Precedence::AddSub),
            Precedence::BitAnd => Some(Precedence::Shift),
            Precedence::BitOr => Some(Precedence::BitAnd),
            Precedence::Comparison => Some(Precedence::BitOr),
            Precedence::And => Some(Precedence::Comparison),
            Precedence::Xor => Some(Precedence::And),
            Precedence::Or => Some(Precedence::Xor),
        }
    }
}

/// A binary operator token: either punctuation (`+`, `=`, …) or a keyword
/// (`AND`, `IS NOT`, …).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OpToken {
    Keyword(Keyword),
    Punctuation(Punctuation),
}

impl OpToken {
    pub fn text(&self) -> &str {
        match self {
            OpToken::Keyword(k) => k.0.text.as_str(),
            OpToken::Punctuation(p) => p.0.text.as_str(),
        }
    }

    pub fn token(&self) -> &Token {
        match self {
            OpToken::Keyword(k) => &k.0,
            OpToken::Punctuation(p) => &p.0,
        }
    }
}

/// Matches an operator token's exact text (keywords are already
/// upper-cased and multi-word pairs already merged by the mangler) to its
/// precedence class.
pub fn precedence_of(op: &OpToken) -> Precedence {
    match op.text() {
        "OR" | "||" => Precedence::Or,
        "XOR" => Precedence::Xor,
        "AND" | "&&" => Precedence::And,
        "=" | "<=>" | ">=" | ">" | "<=" | "<" | "<>" | "!=" | "IS" | "IS NOT" | "LIKE"
        | "NOT LIKE" | "REGEXP" | "NOT REGEXP" | "IN" | "NOT IN" => Precedence::Comparison,
        "|" => Precedence::BitOr,
        "&" => Precedence::BitAnd,
        "<<" | ">>" => Precedence::Shift,
        "+" | "-" => Precedence::AddSub,
        "*" | "/" | "DIV" | "%" | "%%" | "MOD" => Precedence::MulDivMod,
        "^" => Precedence::Exp,
        other => unreachable!("operator token {other:?} has no assigned precedence"),
    }
}

/// The sealed expression hierarchy. `Box` breaks the
/// `Expr -> Subselect -> Select -> Expr` cycle: no back-edges exist, so
/// ownership alone suffices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    Identifier(Token),
    /// A soft keyword used where an identifier is grammatically required
    /// (e.g. `REPLACE` as a column name in a dialect where it isn't
    /// reserved enough to force quoting).
    KeywordIdentifier(Keyword),
    StringLiteral(Token),
    /// Exact numeric precision is preserved as the source lexeme rather
    /// than a parsed numeric value.
    NumericLiteral(Token),
    Placeholder(Token),
    Star(Token),
    Null(Keyword),
    Dotted(Dotted),
    Parenthesized(Box<Parenthesized>),
    BinOp(Box<BinOp>),
    UnaryOp(Box<UnaryOp>),
    FunctionCall(Box<FunctionCall>),
    ExprList(ExprList),
    Distinct(Box<Distinct>),
    Cast(Box<Cast>),
    GroupConcat(Box<GroupConcat>),
    Case(Box<CaseExpression>),
    Subselect(Box<crate::Subselect>),
}

/// `a.b`, `a.*`, or a qualified function-less dotted path of any depth
/// (`a.b.c`); `right` may itself be `Star` for `a.*`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dotted {
    pub left: Box<Expr>,
    pub dot: Punctuation,
    pub right: Box<Expr>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parenthesized {
    pub left_punc: Punctuation,
    pub inner: Expr,
    pub right_punc: Punctuation,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinOp {
    pub left: Expr,
    pub op: OpToken,
    pub right: Expr,
}

impl BinOp {
    pub fn precedence(&self) -> Precedence {
        precedence_of(&self.op)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnaryOp {
    pub op: OpToken,
    pub expr: Expr,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionCall {
    pub callee: Expr,
    pub left_paren: Punctuation,
    pub distinct_kw: Option<Keyword>,
    pub args: Vec<WithTrailingComma<Expr>>,
    pub right_paren: Punctuation,
    pub over: Option<WindowSpec>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExprList {
    pub left_paren: Punctuation,
    pub exprs: Vec<WithTrailingComma<Expr>>,
    pub right_paren: Punctuation,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Distinct {
    pub distinct_kw: Keyword,
    pub expr: Expr,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeName {
    pub name: Expr,
    pub size: Option<TypeSize>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeSize {
    pub left_paren: Punctuation,
    pub args: Vec<WithTrailingComma<Token>>,
    pub right_paren: Punctuation,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cast {
    pub cast_kw: Keyword,
    pub left_paren: Punctuation,
    pub expr: Expr,
    pub as_kw: Keyword,
    pub type_name: TypeName,
    pub right_paren: Punctuation,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GroupConcatOrderBy {
    OrderBy(crate::OrderByClause),
    Placeholder(Token),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeparatorClause {
    pub separator_kw: Keyword,
    pub value: Expr,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupConcat {
    pub group_concat_kw: Keyword,
    pub left_paren: Punctuation,
    pub distinct_kw: Option<Keyword>,
    pub exprs: Vec<WithTrailingComma<Expr>>,
    pub order_by: Option<GroupConcatOrderBy>,
    pub separator: Option<SeparatorClause>,
    pub right_paren: Punctuation,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WhenThen {
    pub when_kw: Keyword,
    pub condition: Expr,
    pub then_kw: Keyword,
    pub result: Expr,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElseClause {
    pub else_kw: Keyword,
    pub expr: Expr,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaseExpression {
    pub case_kw: Keyword,
    pub value: Option<Expr>,
    pub when_thens: Vec<WhenThen>,
    pub else_clause: Option<ElseClause>,
    pub end_kw: Keyword,
}

/// Window-function support: `<call> OVER ( [PARTITION BY ...]
/// [ORDER BY ...] [frame] )`, gated by `Feature::WindowFunctions`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowSpec {
    pub over_kw: Keyword,
    pub left_paren: Punctuation,
    pub partition_by: Option<PartitionByClause>,
    pub order_by: Option<crate::OrderByClause>,
    pub frame: Option<WindowFrame>,
    pub right_paren: Punctuation,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartitionByClause {
    pub kwseq: KeywordSequence,
    pub exprs: Vec<WithTrailingComma<Expr>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrameBound {
    UnboundedPreceding(KeywordSequence),
    UnboundedFollowing(KeywordSequence),
    CurrentRow(KeywordSequence),
    Preceding { expr: Expr, kw: Keyword },
    Following { expr: Expr, kw: Keyword },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrameExtent {
    Single(FrameBound),
    Between { between_kw: Keyword, start: FrameBound, and_kw: Keyword, end: FrameBound },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowFrame {
    pub units_kw: Keyword,
    pub extent: FrameExtent,
}
