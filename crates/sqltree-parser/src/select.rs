//! `SELECT`, `UNION`, and every SELECT-only clause.

use sqltree_core::{Feature, TokenKind};
use sqltree_tree::{
    ColNameList, CommonTableExpression, FromClause, GroupByClause, HavingClause, IntoClause,
    LimitClause, LimitValue, LockMode, MaybePlaceholder, OrderByClause, OrderByExpr, Select,
    SelectExpr, UnionEntry, UnionStatement, WaitOption, WhereClause, WithClause,
};

use crate::cursor::Cursor;
use crate::errors::ParseError;
use crate::expr::parse_expression;

/// `Subselect`: a top-level/UNION-member `SELECT`, or a parenthesized one.
/// A leading `(` re-enters this function.
pub fn parse_subselect(cursor: &mut Cursor) -> Result<sqltree_tree::Subselect, ParseError> {
    parse_subselect_body(cursor)
}

/// Shared by the statement-level entry point and by every position the
/// grammar re-enters subselect parsing from inside an expression (`(`
/// immediately followed by `SELECT`/`WITH`).
pub fn parse_subselect_body(cursor: &mut Cursor) -> Result<sqltree_tree::Subselect, ParseError> {
    if cursor.peek_is_punctuation("(") {
        let left_paren = cursor.expect_punctuation("(")?;
        let inner = parse_subselect_body(cursor)?;
        let right_paren = cursor.expect_punctuation(")")?;
        return Ok(sqltree_tree::Subselect::Parenthesized {
            left_paren,
            inner: Box::new(inner),
            right_paren,
        });
    }
    let first_select = parse_select(cursor)?;
    if !cursor.peek_is_keyword("UNION") {
        return Ok(sqltree_tree::Subselect::Plain(Box::new(first_select)));
    }
    let first = sqltree_tree::Subselect::Plain(Box::new(first_select));
    let mut rest = Vec::new();
    while cursor.peek_is_keyword("UNION") {
        let union_kw = cursor.expect_keyword("UNION")?;
        let modifier_kw = cursor.maybe_consume_keyword("ALL").or_else(|| cursor.maybe_consume_keyword("DISTINCT"));
        let select = parse_union_member(cursor)?;
        rest.push(UnionEntry { union_kw, modifier_kw, select });
    }
    let order_by = parse_opt_order_by(cursor)?;
    let limit = parse_opt_limit(cursor)?;
    Ok(sqltree_tree::Subselect::Union(Box::new(UnionStatement { first, rest, order_by, limit })))
}

/// A `UNION` member is a `SELECT` or a parenthesized subselect, but never
/// itself a further bare `UNION` chain (that chain is flattened into
/// `rest` at the caller).
fn parse_union_member(cursor: &mut Cursor) -> Result<sqltree_tree::Subselect, ParseError> {
    if cursor.peek_is_punctuation("(") {
        let left_paren = cursor.expect_punctuation("(")?;
        let inner = parse_subselect_body(cursor)?;
        let right_paren = cursor.expect_punctuation(")")?;
        Ok(sqltree_tree::Subselect::Parenthesized { left_paren, inner: Box::new(inner), right_paren })
    } else {
        Ok(sqltree_tree::Subselect::Plain(Box::new(parse_select(cursor)?)))
    }
}

fn parse_placeholder_clause<T>(cursor: &mut Cursor) -> Option<MaybePlaceholder<T>> {
    if cursor.peek().kind == TokenKind::Placeholder {
        let placeholder = cursor.advance_any();
        Some(MaybePlaceholder::Placeholder(sqltree_tree::PlaceholderClause { placeholder }))
    } else {
        None
    }
}

pub fn parse_select(cursor: &mut Cursor) -> Result<Select, ParseError> {
    let with = if cursor.peek_is_keyword("WITH") { Some(parse_with_clause(cursor)?) } else { None };
    let select_kw = cursor.expect_keyword("SELECT")?;
    let modifiers = parse_select_modifiers(cursor);
    let select_exprs = cursor.parse_comma_separated(parse_select_expr)?;
    let into = parse_opt_into(cursor)?;
    let from = parse_opt_from(cursor)?;
    let where_clause = parse_opt_where(cursor)?;
    let group_by = parse_opt_group_by(cursor)?;
    let having = parse_opt_having(cursor)?;
    let order_by = parse_opt_order_by(cursor)?;
    let limit = parse_opt_limit(cursor)?;
    let into2 = parse_opt_into(cursor)?;
    let lock_mode = parse_opt_lock_mode(cursor)?;
    let into3 = parse_opt_into(cursor)?;
    Ok(Select {
        with,
        select_kw,
        modifiers,
        select_exprs,
        into,
        from,
        where_clause,
        group_by,
        having,
        order_by,
        limit,
        into2,
        lock_mode,
        into3,
    })
}

/// Every modifier group is mutually exclusive; at most one keyword is
/// consumed per group, in dialect-declared group order.
fn parse_select_modifiers(cursor: &mut Cursor) -> Vec<sqltree_tree::Keyword> {
    let groups = cursor.dialect().select_modifiers();
    let mut modifiers = Vec::new();
    // Modifiers may appear in any order the tokenizer produced (Select's
    // doc comment); scan repeatedly until a full pass matches nothing.
    loop {
        let mut matched_any = false;
        for group in &groups {
            for candidate in group {
                if let Some(kw) = cursor.maybe_consume_keyword(candidate) {
                    modifiers.push(kw);
                    matched_any = true;
                    break;
                }
            }
        }
        if !matched_any {
            break;
        }
    }
    modifiers
}

fn parse_select_expr(cursor: &mut Cursor) -> Result<SelectExpr, ParseError> {
    let expr = parse_expression(cursor)?;
    let as_kw = cursor.maybe_consume_keyword("AS");
    let alias = if as_kw.is_some() {
        Some(cursor.identifier()?)
    } else if cursor.peek().kind == TokenKind::Identifier && !is_clause_introducer(cursor) {
        Some(cursor.advance_any())
    } else {
        None
    };
    Ok(SelectExpr { expr, as_kw, alias })
}

/// Whether the current token, despite being a bare `Identifier`, is
/// actually the introducer of the next clause rather than an implicit
/// alias — needed because clause keywords are not reserved in every
/// dialect (e.g. `FROM`'s introducer is always a real keyword, but some
/// soft introducers like `LIMIT` in Presto are not).
fn is_clause_introducer(cursor: &Cursor) -> bool {
    const INTRODUCERS: &[&str] = &[
        "FROM", "WHERE", "GROUP", "HAVING", "ORDER", "LIMIT", "INTO", "FOR", "UNION", "ON",
        "USING",
    ];
    let tok = cursor.peek();
    INTRODUCERS.iter().any(|kw| tok.text.eq_ignore_ascii_case(kw))
}

fn parse_col_name_list(cursor: &mut Cursor) -> Result<ColNameList, ParseError> {
    let open_paren = cursor.expect_punctuation("(")?;
    let col_names = cursor.parse_comma_separated(|c| c.identifier())?;
    let close_paren = cursor.expect_punctuation(")")?;
    Ok(ColNameList { open_paren, col_names, close_paren })
}

pub fn parse_with_clause(cursor: &mut Cursor) -> Result<WithClause, ParseError> {
    let kw = cursor.expect_keyword("WITH")?;
    if !cursor.dialect().supports(Feature::WithClause) {
        return Err(ParseError::from_disallowed("with_clause", cursor.peek()));
    }
    let recursive_kw = cursor.maybe_consume_keyword("RECURSIVE");
    let ctes = cursor.parse_comma_separated(parse_cte)?;
    Ok(WithClause { kw, recursive_kw, ctes })
}

fn parse_cte(cursor: &mut Cursor) -> Result<CommonTableExpression, ParseError> {
    let table_name = cursor.identifier()?;
    let col_names = if cursor.peek_is_punctuation("(") { Some(parse_col_name_list(cursor)?) } else { None };
    let as_kw = cursor.expect_keyword("AS")?;
    let left_paren = cursor.expect_punctuation("(")?;
    let inner = parse_subselect_body(cursor)?;
    let right_paren = cursor.expect_punctuation(")")?;
    let subquery = sqltree_tree::Subselect::Parenthesized { left_paren, inner: Box::new(inner), right_paren };
    Ok(CommonTableExpression { table_name, col_names, as_kw, subquery })
}

fn parse_into_target(cursor: &mut Cursor, kw: Option<sqltree_tree::Keyword>) -> Result<IntoClause, ParseError> {
    let table = crate::tables::parse_table_name(cursor)?;
    let col_names = if cursor.peek_is_punctuation("(") { Some(parse_col_name_list(cursor)?) } else { None };
    Ok(IntoClause { kw, table, col_names })
}

pub fn parse_opt_into(
    cursor: &mut Cursor,
) -> Result<sqltree_tree::OptClause<IntoClause>, ParseError> {
    if let Some(p) = parse_placeholder_clause(cursor) {
        return Ok(Some(p));
    }
    if cursor.peek_is_keyword("INTO") {
        let kw = cursor.expect_keyword("INTO")?;
        return Ok(Some(MaybePlaceholder::Clause(parse_into_target(cursor, Some(kw))?)));
    }
    Ok(None)
}

pub fn parse_opt_from(cursor: &mut Cursor) -> Result<sqltree_tree::OptClause<FromClause>, ParseError> {
    if let Some(p) = parse_placeholder_clause(cursor) {
        return Ok(Some(p));
    }
    if !cursor.peek_is_keyword("FROM") {
        return Ok(None);
    }
    let kw = cursor.expect_keyword("FROM")?;
    let tables = cursor.parse_comma_separated(crate::tables::parse_table_ref)?;
    Ok(Some(MaybePlaceholder::Clause(FromClause { kw: Some(kw), tables })))
}

pub fn parse_opt_where(cursor: &mut Cursor) -> Result<sqltree_tree::OptClause<WhereClause>, ParseError> {
    if let Some(p) = parse_placeholder_clause(cursor) {
        return Ok(Some(p));
    }
    if !cursor.peek_is_keyword("WHERE") {
        return Ok(None);
    }
    let kw = cursor.expect_keyword("WHERE")?;
    let condition = parse_expression(cursor)?;
    Ok(Some(MaybePlaceholder::Clause(WhereClause { kw, condition })))
}

pub fn parse_opt_having(cursor: &mut Cursor) -> Result<sqltree_tree::OptClause<HavingClause>, ParseError> {
    if let Some(p) = parse_placeholder_clause(cursor) {
        return Ok(Some(p));
    }
    if !cursor.peek_is_keyword("HAVING") {
        return Ok(None);
    }
    let kw = cursor.expect_keyword("HAVING")?;
    let condition = parse_expression(cursor)?;
    Ok(Some(MaybePlaceholder::Clause(HavingClause { kw, condition })))
}

fn parse_order_by_expr(cursor: &mut Cursor) -> Result<OrderByExpr, ParseError> {
    let expr = parse_expression(cursor)?;
    let direction_kw = cursor.maybe_consume_keyword("ASC").or_else(|| cursor.maybe_consume_keyword("DESC"));
    Ok(OrderByExpr { expr, direction_kw })
}

pub fn parse_opt_group_by(cursor: &mut Cursor) -> Result<sqltree_tree::OptClause<GroupByClause>, ParseError> {
    if let Some(p) = parse_placeholder_clause(cursor) {
        return Ok(Some(p));
    }
    if !cursor.peek_is_keyword("GROUP") {
        return Ok(None);
    }
    let kwseq = cursor.expect_keyword_sequence(&["GROUP", "BY"])?;
    let exprs = cursor.parse_comma_separated(parse_order_by_expr)?;
    Ok(Some(MaybePlaceholder::Clause(GroupByClause { kwseq, exprs })))
}

/// Also used wherever `ORDER BY` appears outside a full `SELECT` (window
/// specs, `GROUP_CONCAT(... ORDER BY ...)`, the `UNION` tail).
pub fn parse_order_by(cursor: &mut Cursor) -> Result<OrderByClause, ParseError> {
    let kwseq = cursor.expect_keyword_sequence(&["ORDER", "BY"])?;
    let exprs = cursor.parse_comma_separated(parse_order_by_expr)?;
    Ok(OrderByClause { kwseq, exprs })
}

pub fn parse_opt_order_by(cursor: &mut Cursor) -> Result<sqltree_tree::OptClause<OrderByClause>, ParseError> {
    if let Some(p) = parse_placeholder_clause(cursor) {
        return Ok(Some(p));
    }
    if !cursor.peek_is_keyword("ORDER") {
        return Ok(None);
    }
    Ok(Some(MaybePlaceholder::Clause(parse_order_by(cursor)?)))
}

fn parse_limit_value(cursor: &mut Cursor) -> Result<LimitValue, ParseError> {
    if cursor.peek().kind == TokenKind::Number {
        Ok(LimitValue::Number(cursor.advance_any()))
    } else if cursor.peek().kind == TokenKind::Placeholder {
        Ok(LimitValue::Placeholder(cursor.advance_any()))
    } else if cursor.peek_is_keyword("ALL") {
        if !cursor.dialect().supports(Feature::LimitAll) {
            return Err(ParseError::from_disallowed("limit_all", cursor.peek()));
        }
        Ok(LimitValue::All(cursor.expect_keyword("ALL")?))
    } else {
        Err(ParseError::from_unexpected_token("a row count", cursor.peek()))
    }
}

/// `LIMIT row_count [OFFSET offset]` or MySQL's `LIMIT offset, row_count`
/// comma form (gated by `Feature::CommaOffset`).
pub fn parse_limit(cursor: &mut Cursor) -> Result<LimitClause, ParseError> {
    let kw = cursor.expect_keyword("LIMIT")?;
    let first = parse_limit_value(cursor)?;
    if cursor.peek_is_punctuation(",") {
        if !cursor.dialect().supports(Feature::CommaOffset) {
            return Err(ParseError::from_disallowed("comma_offset", cursor.peek()));
        }
        cursor.expect_punctuation(",")?;
        let row_count = parse_limit_value(cursor)?;
        return Ok(LimitClause { kw, row_count, offset: Some(first), offset_kw: None });
    }
    if cursor.peek_is_keyword("OFFSET") {
        let offset_kw = cursor.expect_keyword("OFFSET")?;
        let offset = parse_limit_value(cursor)?;
        return Ok(LimitClause { kw, row_count: first, offset: Some(offset), offset_kw: Some(offset_kw) });
    }
    Ok(LimitClause { kw, row_count: first, offset: None, offset_kw: None })
}

pub fn parse_opt_limit(cursor: &mut Cursor) -> Result<sqltree_tree::OptClause<LimitClause>, ParseError> {
    if let Some(p) = parse_placeholder_clause(cursor) {
        return Ok(Some(p));
    }
    if !cursor.peek_is_keyword("LIMIT") {
        return Ok(None);
    }
    Ok(Some(MaybePlaceholder::Clause(parse_limit(cursor)?)))
}

fn parse_opt_lock_mode(cursor: &mut Cursor) -> Result<sqltree_tree::OptClause<LockMode>, ParseError> {
    if let Some(p) = parse_placeholder_clause(cursor) {
        return Ok(Some(p));
    }
    if !cursor.peek_is_keyword("FOR") {
        return Ok(None);
    }
    let for_kw = cursor.expect_keyword("FOR")?;
    let mode_kw = cursor.expect_one_of_keywords(&["UPDATE", "SHARE"])?;
    let wait_option = if let Some(kw) = cursor.maybe_consume_keyword("NOWAIT") {
        Some(WaitOption::NoWait(kw))
    } else if cursor.peek_is_keyword("SKIP") {
        Some(WaitOption::SkipLocked(cursor.expect_keyword_sequence(&["SKIP", "LOCKED"])?))
    } else {
        None
    };
    Ok(Some(MaybePlaceholder::Clause(LockMode { for_kw, mode_kw, wait_option })))
}
