//! Table references: `table_ref := table_factor (join_op table_factor
//! join_spec?)*`, a left-associative grammar.

use sqltree_tree::{
    IndexHint, JoinOn, JoinSpec, JoinedTable, LeftRightJoinedTable, NaturalJoinedTable,
    SimpleJoinedTable, SimpleTableFactor, SubqueryFactor, TableName, TableReferenceList, TableRef,
    UsingSpec,
};

use crate::cursor::Cursor;
use crate::errors::ParseError;

pub fn parse_table_name(cursor: &mut Cursor) -> Result<TableName, ParseError> {
    let left = cursor.identifier()?;
    if cursor.peek_is_punctuation(".") {
        let dot = cursor.expect_punctuation(".")?;
        let right = cursor.identifier()?;
        Ok(TableName::Dotted { left, dot, right })
    } else {
        Ok(TableName::Simple(left))
    }
}

fn parse_index_hint(cursor: &mut Cursor) -> Result<IndexHint, ParseError> {
    let intro_kw = cursor.expect_one_of_keywords(&["USE", "IGNORE", "FORCE"])?;
    let kind_kw = cursor.expect_one_of_keywords(&["INDEX", "KEY"])?;
    let (for_kw, for_what) = if cursor.peek_is_keyword("FOR") {
        let for_kw = cursor.expect_keyword("FOR")?;
        let for_what = if cursor.peek_is_keyword("JOIN") {
            cursor.expect_keyword_sequence(&["JOIN"])?
        } else if cursor.peek_is_keyword("ORDER") {
            cursor.expect_keyword_sequence(&["ORDER", "BY"])?
        } else {
            cursor.expect_keyword_sequence(&["GROUP", "BY"])?
        };
        (Some(for_kw), Some(for_what))
    } else {
        (None, None)
    };
    let left_paren = cursor.expect_punctuation("(")?;
    let index_list = cursor.parse_comma_separated(|c| c.identifier())?;
    let right_paren = cursor.expect_punctuation(")")?;
    Ok(IndexHint { intro_kw, kind_kw, for_kw, for_what, left_paren, index_list, right_paren })
}

fn parse_table_factor(cursor: &mut Cursor) -> Result<TableRef, ParseError> {
    if cursor.peek_is_punctuation("(") {
        return parse_paren_table_factor(cursor);
    }
    let lateral_kw = cursor.maybe_consume_keyword("LATERAL");
    if lateral_kw.is_some() {
        return parse_subquery_factor(cursor, lateral_kw);
    }
    let table_name = parse_table_name(cursor)?;
    let as_kw = cursor.maybe_consume_keyword("AS");
    let alias = if as_kw.is_some() || is_bare_alias(cursor) { Some(cursor.identifier()?) } else { None };
    let mut index_hint_list = Vec::new();
    while cursor.peek_is_keyword("USE") || cursor.peek_is_keyword("IGNORE") || cursor.peek_is_keyword("FORCE") {
        let hint = parse_index_hint(cursor)?;
        let comma = cursor.maybe_consume_punctuation(",");
        let has_comma = comma.is_some();
        index_hint_list.push(sqltree_tree::WithTrailingComma::new(hint, comma));
        if !has_comma {
            break;
        }
    }
    Ok(TableRef::Simple(SimpleTableFactor { table_name, as_kw, alias, index_hint_list }))
}

/// A bare identifier following a table name is its alias unless it's
/// actually the next clause's introducer (`JOIN`, `ON`, `USING`, …).
fn is_bare_alias(cursor: &Cursor) -> bool {
    use sqltree_core::TokenKind;
    const NON_ALIAS: &[&str] = &[
        "JOIN", "ON", "USING", "WHERE", "GROUP", "HAVING", "ORDER", "LIMIT", "INTO", "FOR",
        "UNION", "INNER", "CROSS", "LEFT", "RIGHT", "NATURAL", "STRAIGHT_JOIN", "USE", "IGNORE",
        "FORCE", ",",
    ];
    let tok = cursor.peek();
    matches!(tok.kind, TokenKind::Identifier | TokenKind::Keyword)
        && !NON_ALIAS.iter().any(|kw| tok.text.eq_ignore_ascii_case(kw))
}

fn parse_subquery_factor(
    cursor: &mut Cursor,
    lateral_kw: Option<sqltree_tree::Keyword>,
) -> Result<TableRef, ParseError> {
    let left_paren = cursor.expect_punctuation("(")?;
    let inner = crate::select::parse_subselect_body(cursor)?;
    let right_paren = cursor.expect_punctuation(")")?;
    let table_subquery =
        sqltree_tree::Subselect::Parenthesized { left_paren, inner: Box::new(inner), right_paren };
    let as_kw = cursor.maybe_consume_keyword("AS");
    let alias = cursor.identifier()?;
    let (left_paren, col_list, right_paren) = if cursor.peek_is_punctuation("(") {
        let lp = cursor.expect_punctuation("(")?;
        let cols = cursor.parse_comma_separated(|c| c.identifier())?;
        let rp = cursor.expect_punctuation(")")?;
        (Some(lp), cols, Some(rp))
    } else {
        (None, Vec::new(), None)
    };
    Ok(TableRef::Subquery(SubqueryFactor {
        lateral_kw,
        table_subquery,
        as_kw,
        alias,
        left_paren,
        col_list,
        right_paren,
    }))
}

/// A leading `(` is either a parenthesized subquery factor (`(SELECT
/// ...) alias`) or a parenthesized table-reference list
/// (`(t1 JOIN t2 ...)`); disambiguated by whether `SELECT`/`WITH` follows.
fn parse_paren_table_factor(cursor: &mut Cursor) -> Result<TableRef, ParseError> {
    let checkpoint = cursor.checkpoint();
    let left_paren = cursor.expect_punctuation("(")?;
    if cursor.peek_is_keyword("SELECT") || cursor.peek_is_keyword("WITH") {
        cursor.restore(checkpoint);
        return parse_subquery_factor(cursor, None);
    }
    let references = cursor.parse_comma_separated(parse_table_ref)?;
    let right_paren = cursor.expect_punctuation(")")?;
    Ok(TableRef::ParenList(TableReferenceList { left_paren, references, right_paren }))
}

/// `table_ref := table_factor (join_op table_factor join_spec?)*`,
/// left-associative.
pub fn parse_table_ref(cursor: &mut Cursor) -> Result<TableRef, ParseError> {
    let mut left = parse_table_factor(cursor)?;
    loop {
        if cursor.peek_is_keyword("STRAIGHT_JOIN") {
            let join_kw = cursor.expect_keyword("STRAIGHT_JOIN")?;
            let right = parse_table_factor(cursor)?;
            let join_spec = parse_opt_join_spec(cursor)?;
            left = TableRef::Join(Box::new(JoinedTable::Simple(SimpleJoinedTable {
                left: Box::new(left),
                inner_cross: None,
                join_kw,
                right: Box::new(right),
                join_spec,
            })));
            continue;
        }
        if cursor.peek_is_keyword("INNER") || cursor.peek_is_keyword("CROSS") || cursor.peek_is_keyword("JOIN") {
            let inner_cross = cursor.maybe_consume_keyword("INNER").or_else(|| cursor.maybe_consume_keyword("CROSS"));
            let join_kw = cursor.expect_keyword("JOIN")?;
            let right = parse_table_factor(cursor)?;
            let join_spec = parse_opt_join_spec(cursor)?;
            left = TableRef::Join(Box::new(JoinedTable::Simple(SimpleJoinedTable {
                left: Box::new(left),
                inner_cross,
                join_kw,
                right: Box::new(right),
                join_spec,
            })));
            continue;
        }
        if cursor.peek_is_keyword("LEFT") || cursor.peek_is_keyword("RIGHT") {
            let left_right = cursor.expect_one_of_keywords(&["LEFT", "RIGHT"])?;
            let outer_kw = cursor.maybe_consume_keyword("OUTER");
            let join_kw = cursor.expect_keyword("JOIN")?;
            let right = parse_table_factor(cursor)?;
            let join_specification = parse_join_spec(cursor)?;
            left = TableRef::Join(Box::new(JoinedTable::LeftRight(LeftRightJoinedTable {
                left: Box::new(left),
                left_right,
                outer_kw,
                join_kw,
                right: Box::new(right),
                join_specification,
            })));
            continue;
        }
        if cursor.peek_is_keyword("NATURAL") {
            let natural_kw = cursor.expect_keyword("NATURAL")?;
            let left_right = cursor.maybe_consume_keyword("LEFT").or_else(|| cursor.maybe_consume_keyword("RIGHT"));
            let inner_outer = cursor.maybe_consume_keyword("INNER").or_else(|| cursor.maybe_consume_keyword("OUTER"));
            let join_kw = cursor.expect_keyword("JOIN")?;
            let right = parse_table_factor(cursor)?;
            left = TableRef::Join(Box::new(JoinedTable::Natural(NaturalJoinedTable {
                left: Box::new(left),
                natural_kw,
                left_right,
                inner_outer,
                join_kw,
                right: Box::new(right),
            })));
            continue;
        }
        break;
    }
    Ok(left)
}

fn parse_opt_join_spec(cursor: &mut Cursor) -> Result<Option<JoinSpec>, ParseError> {
    if cursor.peek_is_keyword("ON") || cursor.peek_is_keyword("USING") {
        Ok(Some(parse_join_spec(cursor)?))
    } else {
        Ok(None)
    }
}

/// Mandatory for `LEFT`/`RIGHT JOIN`: it always requires a `join_spec`.
fn parse_join_spec(cursor: &mut Cursor) -> Result<JoinSpec, ParseError> {
    if cursor.peek_is_keyword("ON") {
        let kw = cursor.expect_keyword("ON")?;
        let search_condition = crate::expr::parse_expression(cursor)?;
        Ok(JoinSpec::On(JoinOn { kw, search_condition }))
    } else if cursor.peek_is_keyword("USING") {
        let kw = cursor.expect_keyword("USING")?;
        let left_paren = cursor.expect_punctuation("(")?;
        let columns = cursor.parse_comma_separated(|c| c.identifier())?;
        let right_paren = cursor.expect_punctuation(")")?;
        Ok(JoinSpec::Using(UsingSpec { kw, left_paren, columns, right_paren }))
    } else {
        Err(ParseError::from_unexpected_token("ON or USING", cursor.peek()))
    }
}
