//! `INSERT`, `REPLACE`, `UPDATE`, `DELETE` statement grammars.

use sqltree_core::Feature;
use sqltree_tree::{
    Assignment, AssignmentValue, DefaultValues, Delete, FromClause, Insert, InsertValues,
    IntoClause, OnDuplicateKeyUpdate, Replace, SetClause, Update, UsingClause, ValueList,
};

use crate::cursor::Cursor;
use crate::errors::ParseError;
use crate::expr::parse_expression;
use crate::select::{parse_opt_limit, parse_opt_order_by, parse_opt_where};

fn parse_into_clause(cursor: &mut Cursor) -> Result<IntoClause, ParseError> {
    let kw = if cursor.peek_is_keyword("INTO") {
        Some(cursor.expect_keyword("INTO")?)
    } else if cursor.dialect().supports(Feature::RequireIntoForIgnore) {
        return Err(ParseError::from_unexpected_token("keyword INTO", cursor.peek()));
    } else {
        None
    };
    let table = crate::tables::parse_table_name(cursor)?;
    let col_names = if cursor.peek_is_punctuation("(") {
        let open_paren = cursor.expect_punctuation("(")?;
        let col_names = cursor.parse_comma_separated(|c| c.identifier())?;
        let close_paren = cursor.expect_punctuation(")")?;
        Some(sqltree_tree::ColNameList { open_paren, col_names, close_paren })
    } else {
        None
    };
    Ok(IntoClause { kw, table, col_names })
}

pub(crate) fn parse_assignment_value(cursor: &mut Cursor) -> Result<AssignmentValue, ParseError> {
    if cursor.peek_is_keyword("DEFAULT") {
        Ok(AssignmentValue::Default(cursor.expect_keyword("DEFAULT")?))
    } else {
        Ok(AssignmentValue::Expr(parse_expression(cursor)?))
    }
}

fn parse_value_list(cursor: &mut Cursor) -> Result<ValueList, ParseError> {
    let open_paren = cursor.expect_punctuation("(")?;
    let values = cursor.parse_comma_separated(parse_assignment_value)?;
    let close_paren = cursor.expect_punctuation(")")?;
    Ok(ValueList { open_paren, values, close_paren })
}

pub(crate) fn parse_assignment(cursor: &mut Cursor) -> Result<Assignment, ParseError> {
    let col_name = crate::expr::parse_simple_expression(cursor)?;
    let eq_punc = cursor.expect_punctuation("=")?;
    let value = parse_assignment_value(cursor)?;
    Ok(Assignment { col_name, eq_punc, value })
}

fn parse_set_clause(cursor: &mut Cursor) -> Result<SetClause, ParseError> {
    let kw = cursor.expect_keyword("SET")?;
    let assignments = cursor.parse_comma_separated(parse_assignment)?;
    Ok(SetClause { kw, assignments })
}

/// `VALUES (...) [, (...)]*` / `VALUE (...)` (the latter MySQL-only
/// singular spelling, gated by `Feature::SupportValueForInsert`) /
/// `SELECT ...` / `DEFAULT VALUES`.
fn parse_insert_values(cursor: &mut Cursor) -> Result<InsertValues, ParseError> {
    if cursor.peek_is_keyword("VALUES") || (cursor.peek_is_keyword("VALUE") && cursor.dialect().supports(Feature::SupportValueForInsert)) {
        let kw = cursor.expect_one_of_keywords(&["VALUES", "VALUE"])?;
        let rows = cursor.parse_comma_separated(parse_value_list)?;
        return Ok(InsertValues::Values { kw, rows });
    }
    if cursor.peek_is_keyword("DEFAULT") {
        if !cursor.dialect().supports(Feature::DefaultValuesOnInsert) {
            return Err(ParseError::from_disallowed("default_values_on_insert", cursor.peek()));
        }
        let kwseq = cursor.expect_keyword_sequence(&["DEFAULT", "VALUES"])?;
        return Ok(InsertValues::Default(DefaultValues { kwseq }));
    }
    let needs_parens = cursor.dialect().supports(Feature::InsertSelectRequireParens);
    if needs_parens {
        let left_paren = cursor.expect_punctuation("(")?;
        let inner = crate::select::parse_subselect_body(cursor)?;
        let right_paren = cursor.expect_punctuation(")")?;
        return Ok(InsertValues::Select(sqltree_tree::Subselect::Parenthesized {
            left_paren,
            inner: Box::new(inner),
            right_paren,
        }));
    }
    Ok(InsertValues::Select(crate::select::parse_subselect(cursor)?))
}

fn parse_on_duplicate_key_update(cursor: &mut Cursor) -> Result<Option<OnDuplicateKeyUpdate>, ParseError> {
    if !cursor.peek_is_keyword("ON") {
        return Ok(None);
    }
    let kwseq = cursor.expect_keyword_sequence(&["ON", "DUPLICATE", "KEY", "UPDATE"])?;
    let assignments = cursor.parse_comma_separated(parse_assignment)?;
    Ok(Some(OnDuplicateKeyUpdate { kwseq, assignments }))
}

pub fn parse_insert(cursor: &mut Cursor) -> Result<Insert, ParseError> {
    let insert_kw = cursor.expect_keyword("INSERT")?;
    let ignore_kw = if cursor.dialect().supports(Feature::InsertIgnore) {
        cursor.maybe_consume_keyword("IGNORE")
    } else {
        None
    };
    let into = parse_into_clause(cursor)?;
    let values = parse_insert_values(cursor)?;
    let on_duplicate_key_update = parse_on_duplicate_key_update(cursor)?;
    Ok(Insert { insert_kw, ignore_kw, into, values, on_duplicate_key_update })
}

pub fn parse_replace(cursor: &mut Cursor) -> Result<Replace, ParseError> {
    if !cursor.dialect().supports(Feature::Replace) {
        return Err(ParseError::from_disallowed("replace", cursor.peek()));
    }
    let replace_kw = cursor.expect_keyword("REPLACE")?;
    let into = parse_into_clause(cursor)?;
    let values = parse_insert_values(cursor)?;
    Ok(Replace { replace_kw, into, values })
}

pub fn parse_update(cursor: &mut Cursor) -> Result<Update, ParseError> {
    let with = if cursor.peek_is_keyword("WITH") { Some(crate::select::parse_with_clause(cursor)?) } else { None };
    let update_kw = cursor.expect_keyword("UPDATE")?;
    let ignore_kw = cursor.maybe_consume_keyword("IGNORE");
    let tables = cursor.parse_comma_separated(crate::tables::parse_table_ref)?;
    let set = parse_set_clause(cursor)?;
    let where_clause = parse_opt_where(cursor)?;
    let order_by = parse_opt_order_by(cursor)?;
    let limit = if cursor.peek_is_keyword("LIMIT") {
        if !cursor.dialect().supports(Feature::UpdateLimit) {
            return Err(ParseError::from_disallowed("update_limit", cursor.peek()));
        }
        parse_opt_limit(cursor)?
    } else {
        None
    };
    Ok(Update { with, update_kw, ignore_kw, tables, set, where_clause, order_by, limit })
}

/// The MySQL multi-table form (`DELETE t1, t2 FROM t1 JOIN t2 ...`) names
/// its target aliases ahead of `FROM`; the single-table form goes straight
/// to `FROM` (or, where `Feature::RequireFromForDelete` is false, straight
/// to a bare table name).
fn parse_using_table_names(cursor: &mut Cursor) -> Result<Vec<sqltree_tree::WithTrailingComma<sqltree_core::Token>>, ParseError> {
    if cursor.peek_is_keyword("FROM") {
        return Ok(Vec::new());
    }
    cursor.parse_comma_separated(|c| c.identifier())
}

fn parse_delete_from_clause(cursor: &mut Cursor) -> Result<FromClause, ParseError> {
    if cursor.peek_is_keyword("FROM") {
        let kw = cursor.expect_keyword("FROM")?;
        let tables = cursor.parse_comma_separated(crate::tables::parse_table_ref)?;
        return Ok(FromClause { kw: Some(kw), tables });
    }
    if cursor.dialect().supports(Feature::RequireFromForDelete) {
        return Err(ParseError::from_unexpected_token("keyword FROM", cursor.peek()));
    }
    let tables = cursor.parse_comma_separated(crate::tables::parse_table_ref)?;
    Ok(FromClause { kw: None, tables })
}

fn parse_opt_using_clause(cursor: &mut Cursor) -> Result<Option<UsingClause>, ParseError> {
    if !cursor.peek_is_keyword("USING") {
        return Ok(None);
    }
    if !cursor.dialect().supports(Feature::DeleteUsing) {
        return Err(ParseError::from_disallowed("delete_using", cursor.peek()));
    }
    let kw = cursor.expect_keyword("USING")?;
    let tables = cursor.parse_comma_separated(crate::tables::parse_table_ref)?;
    Ok(Some(UsingClause { kw, tables }))
}

pub fn parse_delete(cursor: &mut Cursor) -> Result<Delete, ParseError> {
    let with = if cursor.peek_is_keyword("WITH") { Some(crate::select::parse_with_clause(cursor)?) } else { None };
    let delete_kw = cursor.expect_keyword("DELETE")?;
    let using_table_names = parse_using_table_names(cursor)?;
    let from = parse_delete_from_clause(cursor)?;
    let using = parse_opt_using_clause(cursor)?;
    let where_clause = parse_opt_where(cursor)?;
    let order_by = if cursor.peek_is_keyword("ORDER") {
        if !cursor.dialect().supports(Feature::UpdateLimit) {
            return Err(ParseError::from_disallowed("update_limit", cursor.peek()));
        }
        parse_opt_order_by(cursor)?
    } else {
        None
    };
    let limit = if cursor.peek_is_keyword("LIMIT") {
        if !cursor.dialect().supports(Feature::UpdateLimit) {
            return Err(ParseError::from_disallowed("update_limit", cursor.peek()));
        }
        parse_opt_limit(cursor)?
    } else {
        None
    };
    Ok(Delete { with, delete_kw, using_table_names, from, using, where_clause, order_by, limit })
}
