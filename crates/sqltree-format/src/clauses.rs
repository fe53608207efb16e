//! Clause-level re-emission: everything that hangs off a `Select`,
//! `Delete`, `Update`, `Insert`, or `Replace` — one writer per
//! `FromClause`/`WhereClause`/`GroupByClause`/etc.

use sqltree_tree::{
    Assignment, AssignmentValue, ColNameList, CommonTableExpression, DefaultValues, FromClause,
    GroupByClause, HavingClause, IntoClause, LimitClause, LimitValue, LockMode, OnDuplicateKeyUpdate,
    OrderByClause, OrderByExpr, SelectExpr, SetClause, UsingClause, ValueList, WaitOption,
    WhereClause, WithClause,
};

use crate::expr::{
    write_expr, write_keyword, write_keyword_sequence, write_punctuation, write_punctuation_leaf,
    write_with_trailing_comma,
};
use crate::tables::write_table_ref;
use crate::writer::{WriteResult, Writer};

fn write_token(w: &mut Writer, tok: &sqltree_core::Token) -> WriteResult {
    w.write(tok.text.to_string())?;
    w.add_comments(&tok.trailing_comments)
}

pub fn write_col_name_list(w: &mut Writer, list: &ColNameList) -> WriteResult {
    write_punctuation(w, &list.open_paren)?;
    w.write_comma_list(&list.col_names, false, |w, e| write_with_trailing_comma(w, e, write_token))?;
    write_punctuation(w, &list.close_paren)
}

/// `from_starts_new_line` distinguishes `DELETE`'s own `FROM`, written
/// inline right after the `DELETE` keyword, from every other `FROM`
/// clause, which starts its own line.
pub fn write_from_clause(w: &mut Writer, from: &FromClause, starts_new_line: bool) -> WriteResult {
    if starts_new_line {
        w.start_new_line();
    }
    match &from.kw {
        Some(kw) => write_keyword(w, kw)?,
        None => w.write("FROM")?,
    }
    w.write_comma_list(&from.tables, true, |w, e| write_with_trailing_comma(w, e, write_table_ref))
}

pub fn write_using_clause(w: &mut Writer, using: &UsingClause) -> WriteResult {
    w.start_new_line();
    write_keyword(w, &using.kw)?;
    w.write_comma_list(&using.tables, true, |w, e| write_with_trailing_comma(w, e, write_table_ref))
}

pub fn write_where_clause(w: &mut Writer, where_clause: &WhereClause) -> WriteResult {
    w.start_new_line();
    write_keyword(w, &where_clause.kw)?;
    w.add_space()?;
    write_expr(w, &where_clause.condition)
}

pub fn write_having_clause(w: &mut Writer, having: &HavingClause) -> WriteResult {
    w.start_new_line();
    write_keyword(w, &having.kw)?;
    w.add_space()?;
    write_expr(w, &having.condition)
}

pub fn write_order_by_expr(w: &mut Writer, expr: &OrderByExpr) -> WriteResult {
    write_expr(w, &expr.expr)?;
    if let Some(dir) = &expr.direction_kw {
        w.add_space()?;
        write_keyword(w, dir)?;
    }
    Ok(())
}

pub fn write_group_by_clause(w: &mut Writer, group_by: &GroupByClause) -> WriteResult {
    w.start_new_line();
    write_keyword_sequence(w, &group_by.kwseq)?;
    w.write_comma_list(&group_by.exprs, true, |w, e| write_with_trailing_comma(w, e, write_order_by_expr))
}

pub fn write_order_by_clause(w: &mut Writer, order_by: &OrderByClause) -> WriteResult {
    w.start_new_line();
    write_keyword_sequence(w, &order_by.kwseq)?;
    w.write_comma_list(&order_by.exprs, true, |w, e| write_with_trailing_comma(w, e, write_order_by_expr))
}

fn write_limit_value(w: &mut Writer, value: &LimitValue) -> WriteResult {
    match value {
        LimitValue::Number(tok) => {
            w.write(tok.text.to_string())?;
            w.add_comments(&tok.trailing_comments)
        }
        LimitValue::Placeholder(tok) => {
            w.write(tok.text.to_string())?;
            w.add_comments(&tok.trailing_comments)
        }
        LimitValue::All(kw) => write_keyword(w, kw),
    }
}

/// Canonicalizes MySQL's `LIMIT offset, row_count` comma form into
/// `LIMIT row_count OFFSET offset`: the `OFFSET` keyword is always
/// emitted, regardless of which spelling the source used.
pub fn write_limit_clause(w: &mut Writer, limit: &LimitClause) -> WriteResult {
    w.start_new_line();
    write_keyword(w, &limit.kw)?;
    w.add_space()?;
    write_limit_value(w, &limit.row_count)?;
    if let Some(offset) = &limit.offset {
        w.add_space()?;
        match &limit.offset_kw {
            Some(kw) => write_keyword(w, kw)?,
            None => w.write("OFFSET")?,
        }
        w.add_space()?;
        write_limit_value(w, offset)?;
    }
    Ok(())
}

pub fn write_select_expr(w: &mut Writer, expr: &SelectExpr) -> WriteResult {
    write_expr(w, &expr.expr)?;
    if let Some(alias) = &expr.alias {
        w.add_space()?;
        match &expr.as_kw {
            Some(kw) => write_keyword(w, kw)?,
            None => w.write("AS")?,
        }
        w.add_space()?;
        w.write(alias.text.to_string())?;
        w.add_comments(&alias.trailing_comments)?;
    }
    Ok(())
}

pub fn write_into_clause(w: &mut Writer, into: &IntoClause) -> WriteResult {
    match &into.kw {
        Some(kw) => write_keyword(w, kw)?,
        None => w.write("INTO")?,
    }
    w.add_space()?;
    crate::tables::write_table_name(w, &into.table)?;
    if let Some(cols) = &into.col_names {
        write_col_name_list(w, cols)?;
    }
    Ok(())
}

pub fn write_lock_mode(w: &mut Writer, lock_mode: &LockMode) -> WriteResult {
    w.start_new_line();
    write_keyword(w, &lock_mode.for_kw)?;
    w.add_space()?;
    write_keyword(w, &lock_mode.mode_kw)?;
    if let Some(wait) = &lock_mode.wait_option {
        w.add_space()?;
        match wait {
            WaitOption::NoWait(kw) => write_keyword(w, kw)?,
            WaitOption::SkipLocked(seq) => write_keyword_sequence(w, seq)?,
        }
    }
    Ok(())
}

pub fn write_cte(w: &mut Writer, cte: &CommonTableExpression) -> WriteResult {
    w.write(cte.table_name.text.to_string())?;
    w.add_comments(&cte.table_name.trailing_comments)?;
    w.add_space()?;
    if let Some(cols) = &cte.col_names {
        write_col_name_list(w, cols)?;
        w.add_space()?;
    }
    write_keyword(w, &cte.as_kw)?;
    w.add_space()?;
    crate::statements::write_subselect(w, &cte.subquery)
}

pub fn write_with_clause(w: &mut Writer, with: &WithClause) -> WriteResult {
    w.start_new_line();
    write_keyword(w, &with.kw)?;
    if let Some(recursive) = &with.recursive_kw {
        w.add_space()?;
        write_keyword(w, recursive)?;
    }
    w.write_comma_list(&with.ctes, true, |w, e| write_with_trailing_comma(w, e, write_cte))
}

fn write_assignment_value(w: &mut Writer, value: &AssignmentValue) -> WriteResult {
    match value {
        AssignmentValue::Expr(e) => write_expr(w, e),
        AssignmentValue::Default(kw) => write_keyword(w, kw),
    }
}

pub fn write_assignment(w: &mut Writer, assignment: &Assignment) -> WriteResult {
    write_expr(w, &assignment.col_name)?;
    w.add_space()?;
    write_punctuation_leaf(w, &assignment.eq_punc)?;
    w.add_space()?;
    write_assignment_value(w, &assignment.value)
}

pub fn write_set_clause(w: &mut Writer, set: &SetClause) -> WriteResult {
    w.start_new_line();
    write_keyword(w, &set.kw)?;
    w.write_comma_list(&set.assignments, true, |w, e| write_with_trailing_comma(w, e, write_assignment))
}

pub fn write_value_list(w: &mut Writer, values: &ValueList) -> WriteResult {
    write_punctuation(w, &values.open_paren)?;
    w.write_comma_list(&values.values, false, |w, e| write_with_trailing_comma(w, e, write_assignment_value))?;
    write_punctuation(w, &values.close_paren)
}

pub fn write_default_values(w: &mut Writer, default: &DefaultValues) -> WriteResult {
    w.start_new_line();
    write_keyword_sequence(w, &default.kwseq)
}

pub fn write_on_duplicate_key_update(w: &mut Writer, odku: &OnDuplicateKeyUpdate) -> WriteResult {
    w.start_new_line();
    write_keyword_sequence(w, &odku.kwseq)?;
    w.write_comma_list(&odku.assignments, true, |w, e| write_with_trailing_comma(w, e, write_assignment))
}
