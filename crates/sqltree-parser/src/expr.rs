//! Pratt-style precedence ladder. `parse_binop` recurses from `Precedence::MAX`
//! (loosest, `OR`) down to `Precedence::MIN` (`^`) down to
//! `parse_simple_expression` for primaries.

use sqltree_core::TokenKind;
use sqltree_tree::{
    Cast, CaseExpression, Distinct, Dotted, ElseClause, Expr, ExprList, FrameBound, FrameExtent,
    FunctionCall, GroupConcat, GroupConcatOrderBy, Keyword, OpToken, PartitionByClause,
    Parenthesized, Precedence, Punctuation, SeparatorClause, Subselect, TypeName, TypeSize,
    UnaryOp, WhenThen, WindowFrame, WindowSpec,
};

use crate::cursor::Cursor;
use crate::errors::ParseError;

/// Every operator recognized by the grammar, keyed by its (already
/// mangled/upper-cased) text. `DIV`/`MOD`/`REGEXP`/`XOR` are MySQL
/// synonyms; dialects that don't reserve them simply never produce a
/// `Keyword` token with that text; as a word-text match it's harmless to
/// recognize them everywhere.
fn operator_precedence(text: &str) -> Option<Precedence> {
    use Precedence::*;
    Some(match text {
        "OR" | "||" => Or,
        "XOR" => Xor,
        "AND" | "&&" => And,
        "=" | "<=>" | ">=" | ">" | "<=" | "<" | "<>" | "!=" | "IS" | "IS NOT" | "LIKE"
        | "NOT LIKE" | "REGEXP" | "NOT REGEXP" | "IN" | "NOT IN" => Comparison,
        "|" => BitOr,
        "&" => BitAnd,
        "<<" | ">>" => Shift,
        "+" | "-" => AddSub,
        "*" | "/" | "DIV" | "%" | "%%" | "MOD" => MulDivMod,
        "^" => Exp,
        _ => return None,
    })
}

fn peek_operator(cursor: &Cursor) -> Option<OpToken> {
    let tok = cursor.peek();
    if !matches!(tok.kind, TokenKind::Keyword | TokenKind::Punctuation) {
        return None;
    }
    operator_precedence(tok.text.as_str())?;
    Some(match tok.kind {
        TokenKind::Keyword => OpToken::Keyword(Keyword(tok.clone())),
        _ => OpToken::Punctuation(Punctuation(tok.clone())),
    })
}

fn is_in_operator(op: &OpToken) -> bool {
    matches!(op.text(), "IN" | "NOT IN")
}

/// `parse_binop(MAX)` is the expression grammar's top-level entry point.
pub fn parse_expression(cursor: &mut Cursor) -> Result<Expr, ParseError> {
    parse_binop(cursor, Precedence::MAX)
}

fn parse_binop(cursor: &mut Cursor, p: Precedence) -> Result<Expr, ParseError> {
    let mut left = parse_operand(cursor, p)?;
    loop {
        let Some(op) = peek_operator(cursor) else { break };
        if operator_precedence(op.text()) != Some(p) {
            break;
        }
        cursor.advance_any();
        let right = if is_in_operator(&op) { parse_in_rhs(cursor)? } else { parse_operand(cursor, p)? };
        left = Expr::BinOp(Box::new(sqltree_tree::BinOp { left, op, right }));
    }
    Ok(left)
}

fn parse_operand(cursor: &mut Cursor, p: Precedence) -> Result<Expr, ParseError> {
    match p.tighter() {
        Some(tighter) => parse_binop(cursor, tighter),
        None => parse_simple_expression(cursor),
    }
}

/// The right-hand side of `IN`/`NOT IN`: a placeholder, a parenthesized
/// subselect, or a parenthesized comma-separated expression list (spec
/// §4.4 "For IN / NOT IN, the right-hand side has its own grammar").
fn parse_in_rhs(cursor: &mut Cursor) -> Result<Expr, ParseError> {
    if cursor.peek().kind == TokenKind::Placeholder {
        return Ok(Expr::Placeholder(cursor.advance_any()));
    }
    let left_paren = cursor.expect_punctuation("(")?;
    if cursor.peek_is_keyword("SELECT") || cursor.peek_is_keyword("WITH") {
        let inner = crate::select::parse_subselect_body(cursor)?;
        let right_paren = cursor.expect_punctuation(")")?;
        return Ok(Expr::Subselect(Box::new(Subselect::Parenthesized {
            left_paren,
            inner: Box::new(inner),
            right_paren,
        })));
    }
    let exprs = cursor.parse_comma_separated(parse_expression)?;
    let right_paren = cursor.expect_punctuation(")")?;
    Ok(Expr::ExprList(ExprList { left_paren, exprs, right_paren }))
}

/// Primaries: literals, identifiers, parenthesized expressions/subselects,
/// function calls, `CAST`, `GROUP_CONCAT`, `CASE`, `NULL`, unary prefix
/// operators, dotted names, placeholders.
pub fn parse_simple_expression(cursor: &mut Cursor) -> Result<Expr, ParseError> {
    let base = parse_unary_or_primary(cursor)?;
    parse_dotted_and_call_suffix(cursor, base)
}

fn parse_unary_or_primary(cursor: &mut Cursor) -> Result<Expr, ParseError> {
    let tok = cursor.peek().clone();
    match tok.kind {
        TokenKind::Number => {
            cursor.advance_any();
            Ok(Expr::NumericLiteral(tok))
        }
        TokenKind::Placeholder => {
            cursor.advance_any();
            Ok(Expr::Placeholder(tok))
        }
        TokenKind::String => {
            cursor.advance_any();
            if tok.text.starts_with(cursor.dialect().identifier_quote()) {
                Ok(Expr::Identifier(tok))
            } else {
                Ok(Expr::StringLiteral(tok))
            }
        }
        TokenKind::Punctuation if tok.text == "*" => {
            cursor.advance_any();
            Ok(Expr::Star(tok))
        }
        TokenKind::Punctuation if tok.text == "-" || tok.text == "~" => {
            let op = OpToken::Punctuation(Punctuation(cursor.advance_any()));
            let expr = parse_binop(cursor, Precedence::MulDivMod)?;
            Ok(Expr::UnaryOp(Box::new(UnaryOp { op, expr })))
        }
        TokenKind::Punctuation if tok.text == "(" => parse_parenthesized_or_subselect(cursor),
        TokenKind::Keyword if tok.text.eq_ignore_ascii_case("NULL") => {
            Ok(Expr::Null(cursor.expect_keyword("NULL")?))
        }
        TokenKind::Keyword | TokenKind::Identifier if tok.text.eq_ignore_ascii_case("NOT") => {
            let op = OpToken::Keyword(cursor.expect_keyword("NOT")?);
            let expr = parse_binop(cursor, Precedence::Comparison)?;
            Ok(Expr::UnaryOp(Box::new(UnaryOp { op, expr })))
        }
        TokenKind::Keyword | TokenKind::Identifier if tok.text.eq_ignore_ascii_case("BINARY") => {
            let op = OpToken::Keyword(cursor.expect_keyword("BINARY")?);
            let expr = parse_binop(cursor, Precedence::MulDivMod)?;
            Ok(Expr::UnaryOp(Box::new(UnaryOp { op, expr })))
        }
        TokenKind::Keyword | TokenKind::Identifier if tok.text.eq_ignore_ascii_case("DISTINCT") => {
            let distinct_kw = cursor.expect_keyword("DISTINCT")?;
            let expr = parse_binop(cursor, Precedence::Comparison)?;
            Ok(Expr::Distinct(Box::new(Distinct { distinct_kw, expr })))
        }
        TokenKind::Keyword | TokenKind::Identifier if tok.text.eq_ignore_ascii_case("CAST") => {
            parse_cast(cursor)
        }
        TokenKind::Keyword | TokenKind::Identifier if tok.text.eq_ignore_ascii_case("GROUP_CONCAT") => {
            parse_group_concat(cursor)
        }
        TokenKind::Keyword | TokenKind::Identifier if tok.text.eq_ignore_ascii_case("CASE") => {
            parse_case(cursor)
        }
        TokenKind::Identifier => {
            cursor.advance_any();
            Ok(Expr::Identifier(tok))
        }
        TokenKind::Keyword => {
            cursor.advance_any();
            Ok(Expr::KeywordIdentifier(Keyword(tok)))
        }
        _ => Err(ParseError::from_unexpected_token("an expression", &tok)),
    }
}

/// `(` either re-enters subselect parsing (when immediately followed by
/// `SELECT`/`WITH`) or parses a parenthesized expression.
fn parse_parenthesized_or_subselect(cursor: &mut Cursor) -> Result<Expr, ParseError> {
    let left_paren = cursor.expect_punctuation("(")?;
    if cursor.peek_is_keyword("SELECT") || cursor.peek_is_keyword("WITH") {
        let inner = crate::select::parse_subselect_body(cursor)?;
        let right_paren = cursor.expect_punctuation(")")?;
        return Ok(Expr::Subselect(Box::new(Subselect::Parenthesized {
            left_paren,
            inner: Box::new(inner),
            right_paren,
        })));
    }
    let inner = parse_expression(cursor)?;
    let right_paren = cursor.expect_punctuation(")")?;
    Ok(Expr::Parenthesized(Box::new(Parenthesized { left_paren, inner, right_paren })))
}

/// `a.b`, `a.*`, function calls (`ident (`), and `OVER (...)` window
/// specs all attach as left-recursive suffixes on a primary.
fn parse_dotted_and_call_suffix(cursor: &mut Cursor, mut base: Expr) -> Result<Expr, ParseError> {
    loop {
        if cursor.peek_is_punctuation(".") {
            let dot = cursor.expect_punctuation(".")?;
            let right = if cursor.peek_is_punctuation("*") {
                let star = cursor.advance_any();
                Expr::Star(star)
            } else {
                parse_unary_or_primary(cursor)?
            };
            base = Expr::Dotted(Dotted { left: Box::new(base), dot, right: Box::new(right) });
            continue;
        }
        if cursor.peek_is_punctuation("(")
            && matches!(base, Expr::Identifier(_) | Expr::KeywordIdentifier(_) | Expr::Dotted(_))
        {
            base = parse_function_call(cursor, base)?;
            continue;
        }
        break;
    }
    Ok(base)
}

fn parse_function_call(cursor: &mut Cursor, callee: Expr) -> Result<Expr, ParseError> {
    let left_paren = cursor.expect_punctuation("(")?;
    let distinct_kw = cursor.maybe_consume_keyword("DISTINCT");
    let args = if cursor.peek_is_punctuation(")") {
        Vec::new()
    } else {
        cursor.parse_comma_separated(parse_expression)?
    };
    let right_paren = cursor.expect_punctuation(")")?;
    let over = if cursor.dialect().supports(sqltree_core::Feature::WindowFunctions) && cursor.peek_is_keyword("OVER")
    {
        Some(parse_window_spec(cursor)?)
    } else {
        None
    };
    Ok(Expr::FunctionCall(Box::new(FunctionCall { callee, left_paren, distinct_kw, args, right_paren, over })))
}

fn parse_window_spec(cursor: &mut Cursor) -> Result<WindowSpec, ParseError> {
    let over_kw = cursor.expect_keyword("OVER")?;
    let left_paren = cursor.expect_punctuation("(")?;
    let partition_by = if cursor.peek_is_keyword("PARTITION") {
        let kwseq = cursor.expect_keyword_sequence(&["PARTITION", "BY"])?;
        let exprs = cursor.parse_comma_separated(parse_expression)?;
        Some(PartitionByClause { kwseq, exprs })
    } else {
        None
    };
    let order_by = if cursor.peek_is_keyword("ORDER") { Some(crate::select::parse_order_by(cursor)?) } else { None };
    let frame = if cursor.peek_is_keyword("ROWS") || cursor.peek_is_keyword("RANGE") {
        Some(parse_window_frame(cursor)?)
    } else {
        None
    };
    let right_paren = cursor.expect_punctuation(")")?;
    Ok(WindowSpec { over_kw, left_paren, partition_by, order_by, frame, right_paren })
}

fn parse_window_frame(cursor: &mut Cursor) -> Result<WindowFrame, ParseError> {
    let units_kw = cursor.expect_one_of_keywords(&["ROWS", "RANGE"])?;
    let extent = if cursor.peek_is_keyword("BETWEEN") {
        let between_kw = cursor.expect_keyword("BETWEEN")?;
        let start = parse_frame_bound(cursor)?;
        let and_kw = cursor.expect_keyword("AND")?;
        let end = parse_frame_bound(cursor)?;
        FrameExtent::Between { between_kw, start, and_kw, end }
    } else {
        FrameExtent::Single(parse_frame_bound(cursor)?)
    };
    Ok(WindowFrame { units_kw, extent })
}

fn parse_frame_bound(cursor: &mut Cursor) -> Result<FrameBound, ParseError> {
    if let Some(kwseq) = cursor.maybe_consume_keyword_sequence(&["UNBOUNDED", "PRECEDING"]) {
        return Ok(FrameBound::UnboundedPreceding(kwseq));
    }
    if let Some(kwseq) = cursor.maybe_consume_keyword_sequence(&["UNBOUNDED", "FOLLOWING"]) {
        return Ok(FrameBound::UnboundedFollowing(kwseq));
    }
    if let Some(kwseq) = cursor.maybe_consume_keyword_sequence(&["CURRENT", "ROW"]) {
        return Ok(FrameBound::CurrentRow(kwseq));
    }
    let expr = parse_expression(cursor)?;
    let kw = cursor.expect_one_of_keywords(&["PRECEDING", "FOLLOWING"])?;
    if kw.0.text.eq_ignore_ascii_case("PRECEDING") {
        Ok(FrameBound::Preceding { expr, kw })
    } else {
        Ok(FrameBound::Following { expr, kw })
    }
}

fn parse_type_name(cursor: &mut Cursor) -> Result<TypeName, ParseError> {
    let name = parse_unary_or_primary(cursor)?;
    let size = if cursor.peek_is_punctuation("(") {
        let left_paren = cursor.expect_punctuation("(")?;
        let args = cursor.parse_comma_separated(|c| {
            if c.peek().kind == TokenKind::Number {
                Ok(c.advance_any())
            } else {
                Err(ParseError::from_unexpected_token("a number", c.peek()))
            }
        })?;
        let right_paren = cursor.expect_punctuation(")")?;
        Some(TypeSize { left_paren, args, right_paren })
    } else {
        None
    };
    Ok(TypeName { name, size })
}

fn parse_cast(cursor: &mut Cursor) -> Result<Expr, ParseError> {
    let cast_kw = cursor.expect_keyword("CAST")?;
    let left_paren = cursor.expect_punctuation("(")?;
    let expr = parse_expression(cursor)?;
    let as_kw = cursor.expect_keyword("AS")?;
    let type_name = parse_type_name(cursor)?;
    let right_paren = cursor.expect_punctuation(")")?;
    Ok(Expr::Cast(Box::new(Cast { cast_kw, left_paren, expr, as_kw, type_name, right_paren })))
}

fn parse_group_concat(cursor: &mut Cursor) -> Result<Expr, ParseError> {
    let group_concat_kw = cursor.expect_keyword("GROUP_CONCAT")?;
    let left_paren = cursor.expect_punctuation("(")?;
    let distinct_kw = cursor.maybe_consume_keyword("DISTINCT");
    let exprs = cursor.parse_comma_separated(parse_expression)?;
    let order_by = if cursor.peek_is_keyword("ORDER") {
        Some(GroupConcatOrderBy::OrderBy(crate::select::parse_order_by(cursor)?))
    } else if cursor.peek().kind == TokenKind::Placeholder {
        Some(GroupConcatOrderBy::Placeholder(cursor.advance_any()))
    } else {
        None
    };
    let separator = if cursor.peek_is_keyword("SEPARATOR") {
        let separator_kw = cursor.expect_keyword("SEPARATOR")?;
        let value = parse_expression(cursor)?;
        Some(SeparatorClause { separator_kw, value })
    } else {
        None
    };
    let right_paren = cursor.expect_punctuation(")")?;
    Ok(Expr::GroupConcat(Box::new(GroupConcat {
        group_concat_kw,
        left_paren,
        distinct_kw,
        exprs,
        order_by,
        separator,
        right_paren,
    })))
}

fn parse_case(cursor: &mut Cursor) -> Result<Expr, ParseError> {
    let case_kw = cursor.expect_keyword("CASE")?;
    let value = if cursor.peek_is_keyword("WHEN") { None } else { Some(parse_expression(cursor)?) };
    let mut when_thens = Vec::new();
    while cursor.peek_is_keyword("WHEN") {
        let when_kw = cursor.expect_keyword("WHEN")?;
        let condition = parse_expression(cursor)?;
        let then_kw = cursor.expect_keyword("THEN")?;
        let result = parse_expression(cursor)?;
        when_thens.push(WhenThen { when_kw, condition, then_kw, result });
    }
    let else_clause = if cursor.peek_is_keyword("ELSE") {
        let else_kw = cursor.expect_keyword("ELSE")?;
        let expr = parse_expression(cursor)?;
        Some(ElseClause { else_kw, expr })
    } else {
        None
    };
    let end_kw = cursor.expect_keyword("END")?;
    Ok(Expr::Case(Box::new(CaseExpression { case_kw, value, when_thens, else_clause, end_kw })))
}

