//! Statement-level re-emission: the top-level shape of every statement
//! kind sqltree can parse — `Select`, `Delete`, `Update`, `Insert`,
//! `Replace`, the DDL family, and the shell statements.

use sqltree_tree::{
    ColumnDef, CreateIndex, CreateStatement, CreateTable, CreateView, Delete, DropStatement,
    ExplainStatement, ExplainTarget, Flush, FlushOption, Insert, InsertValues, ParsedStatement,
    RenamePair, RenameTable, Replace, Select, SetStatement, ShowStatement, Statement, Subselect,
    StartTransaction, SimpleStatement, TruncateStatement, Update, UnionStatement,
};

use crate::expr::{write_keyword, write_keyword_sequence, write_punctuation_leaf, write_with_trailing_comma};
use crate::literal::render_identifier;
use crate::tables::write_table_name;
use crate::writer::{WriteResult, Writer};

pub fn write_parsed_statement(w: &mut Writer, parsed: &ParsedStatement) -> WriteResult {
    for comment in &parsed.leading_comments {
        w.write(comment.text.trim_end_matches('\n').to_string())?;
        w.start_new_line();
    }
    write_statement(w, &parsed.statement)
}

pub fn write_statement(w: &mut Writer, statement: &Statement) -> WriteResult {
    match statement {
        Statement::Select(s) => write_subselect(w, s),
        Statement::Delete(d) => write_delete(w, d),
        Statement::Update(u) => write_update(w, u),
        Statement::Insert(i) => write_insert(w, i),
        Statement::Replace(r) => write_replace(w, r),
        Statement::Create(c) => write_create(w, c),
        Statement::Drop(d) => write_drop(w, d),
        Statement::Truncate(t) => write_truncate(w, t),
        Statement::RenameTable(r) => write_rename_table(w, r),
        Statement::Set(s) => write_set_statement(w, s),
        Statement::Show(s) => write_show(w, s),
        Statement::Explain(e) => write_explain(w, e),
        Statement::Flush(f) => write_flush(w, f),
        Statement::StartTransaction(s) => write_start_transaction(w, s),
        Statement::Simple(s) => write_simple_statement(w, s),
    }
}

fn write_select(w: &mut Writer, select: &Select) -> WriteResult {
    if let Some(with) = &select.with {
        crate::clauses::write_with_clause(w, with)?;
    }
    w.start_new_line();
    write_keyword(w, &select.select_kw)?;
    for kw in &select.modifiers {
        w.add_space()?;
        write_keyword(w, kw)?;
    }
    w.write_comma_list(&select.select_exprs, true, |w, e| {
        write_with_trailing_comma(w, e, crate::clauses::write_select_expr)
    })?;
    if let Some(into) = select.into.as_ref().and_then(|c| c.as_clause()) {
        w.start_new_line();
        crate::clauses::write_into_clause(w, into)?;
    }
    if let Some(from) = select.from.as_ref().and_then(|c| c.as_clause()) {
        crate::clauses::write_from_clause(w, from, true)?;
    }
    if let Some(where_clause) = select.where_clause.as_ref().and_then(|c| c.as_clause()) {
        crate::clauses::write_where_clause(w, where_clause)?;
    }
    if let Some(group_by) = select.group_by.as_ref().and_then(|c| c.as_clause()) {
        crate::clauses::write_group_by_clause(w, group_by)?;
    }
    if let Some(having) = select.having.as_ref().and_then(|c| c.as_clause()) {
        crate::clauses::write_having_clause(w, having)?;
    }
    if let Some(order_by) = select.order_by.as_ref().and_then(|c| c.as_clause()) {
        crate::clauses::write_order_by_clause(w, order_by)?;
    }
    if let Some(limit) = select.limit.as_ref().and_then(|c| c.as_clause()) {
        crate::clauses::write_limit_clause(w, limit)?;
    }
    if let Some(into2) = select.into2.as_ref().and_then(|c| c.as_clause()) {
        w.start_new_line();
        crate::clauses::write_into_clause(w, into2)?;
    }
    if let Some(lock_mode) = select.lock_mode.as_ref().and_then(|c| c.as_clause()) {
        crate::clauses::write_lock_mode(w, lock_mode)?;
    }
    if let Some(into3) = select.into3.as_ref().and_then(|c| c.as_clause()) {
        w.start_new_line();
        crate::clauses::write_into_clause(w, into3)?;
    }
    Ok(())
}

fn write_union_statement(w: &mut Writer, union: &UnionStatement) -> WriteResult {
    let always_parens = union.order_by.is_some() || union.limit.is_some();
    write_subselect_inner(w, &union.first, always_parens)?;
    for entry in &union.rest {
        w.start_new_line();
        write_keyword(w, &entry.union_kw)?;
        if let Some(modifier) = &entry.modifier_kw {
            w.add_space()?;
            write_keyword(w, modifier)?;
        }
        w.start_new_line();
        write_subselect_inner(w, &entry.select, always_parens)?;
    }
    if let Some(order_by) = union.order_by.as_ref().and_then(|c| c.as_clause()) {
        crate::clauses::write_order_by_clause(w, order_by)?;
    }
    if let Some(limit) = union.limit.as_ref().and_then(|c| c.as_clause()) {
        crate::clauses::write_limit_clause(w, limit)?;
    }
    Ok(())
}

pub fn write_subselect(w: &mut Writer, subselect: &Subselect) -> WriteResult {
    write_subselect_inner(w, subselect, false)
}

fn write_subselect_inner(w: &mut Writer, subselect: &Subselect, always_parenthesize: bool) -> WriteResult {
    match subselect {
        Subselect::Plain(select) => {
            if always_parenthesize {
                w.write("(")?;
                w.with_indent(|w| write_select(w, select))?;
                w.write(")")
            } else {
                write_select(w, select)
            }
        }
        Subselect::Union(union) => {
            if always_parenthesize {
                w.write("(")?;
                w.with_indent(|w| write_union_statement(w, union))?;
                w.write(")")
            } else {
                write_union_statement(w, union)
            }
        }
        Subselect::Parenthesized { left_paren, inner, right_paren } => {
            write_punctuation_leaf(w, left_paren)?;
            w.with_indent(|w| write_subselect_inner(w, inner, false))?;
            write_punctuation_leaf(w, right_paren)
        }
    }
}

fn write_delete(w: &mut Writer, delete: &Delete) -> WriteResult {
    if let Some(with) = &delete.with {
        crate::clauses::write_with_clause(w, with)?;
    }
    w.start_new_line();
    write_keyword(w, &delete.delete_kw)?;
    for name in &delete.using_table_names {
        w.add_space()?;
        write_with_trailing_comma(w, name, |w, tok| {
            w.write(render_identifier(tok.text.as_str(), w.dialect))?;
            w.add_comments(&tok.trailing_comments)
        })?;
    }
    w.add_space()?;
    crate::clauses::write_from_clause(w, &delete.from, false)?;
    if let Some(using) = &delete.using {
        crate::clauses::write_using_clause(w, using)?;
    }
    if let Some(where_clause) = delete.where_clause.as_ref().and_then(|c| c.as_clause()) {
        crate::clauses::write_where_clause(w, where_clause)?;
    }
    if let Some(order_by) = delete.order_by.as_ref().and_then(|c| c.as_clause()) {
        crate::clauses::write_order_by_clause(w, order_by)?;
    }
    if let Some(limit) = delete.limit.as_ref().and_then(|c| c.as_clause()) {
        crate::clauses::write_limit_clause(w, limit)?;
    }
    Ok(())
}

fn write_update(w: &mut Writer, update: &Update) -> WriteResult {
    if let Some(with) = &update.with {
        crate::clauses::write_with_clause(w, with)?;
    }
    w.start_new_line();
    write_keyword(w, &update.update_kw)?;
    if let Some(ignore) = &update.ignore_kw {
        w.add_space()?;
        write_keyword(w, ignore)?;
    }
    w.add_space()?;
    w.write_comma_list(&update.tables, false, |w, e| write_with_trailing_comma(w, e, crate::tables::write_table_ref))?;
    crate::clauses::write_set_clause(w, &update.set)?;
    if let Some(where_clause) = update.where_clause.as_ref().and_then(|c| c.as_clause()) {
        crate::clauses::write_where_clause(w, where_clause)?;
    }
    if let Some(order_by) = update.order_by.as_ref().and_then(|c| c.as_clause()) {
        crate::clauses::write_order_by_clause(w, order_by)?;
    }
    if let Some(limit) = update.limit.as_ref().and_then(|c| c.as_clause()) {
        crate::clauses::write_limit_clause(w, limit)?;
    }
    Ok(())
}

fn write_insert_values(w: &mut Writer, values: &InsertValues) -> WriteResult {
    match values {
        InsertValues::Values { kw, rows } => {
            w.start_new_line();
            // MySQL accepts the singular `VALUE` as a synonym; canonicalize to
            // the plural spelling regardless of which one the source used.
            w.write("VALUES")?;
            w.add_comments(&kw.0.trailing_comments)?;
            w.write_comma_list(rows, true, |w, e| write_with_trailing_comma(w, e, crate::clauses::write_value_list))
        }
        InsertValues::Select(subselect) => {
            if matches!(subselect, Subselect::Parenthesized { .. }) {
                w.add_space()?;
            }
            write_subselect(w, subselect)
        }
        InsertValues::Default(default) => crate::clauses::write_default_values(w, default),
    }
}

fn write_insert(w: &mut Writer, insert: &Insert) -> WriteResult {
    w.start_new_line();
    write_keyword(w, &insert.insert_kw)?;
    w.add_space()?;
    if let Some(ignore) = &insert.ignore_kw {
        write_keyword(w, ignore)?;
        w.add_space()?;
    }
    crate::clauses::write_into_clause(w, &insert.into)?;
    write_insert_values(w, &insert.values)?;
    if let Some(odku) = &insert.on_duplicate_key_update {
        crate::clauses::write_on_duplicate_key_update(w, odku)?;
    }
    Ok(())
}

fn write_replace(w: &mut Writer, replace: &Replace) -> WriteResult {
    w.start_new_line();
    write_keyword(w, &replace.replace_kw)?;
    w.add_space()?;
    crate::clauses::write_into_clause(w, &replace.into)?;
    write_insert_values(w, &replace.values)
}

fn write_column_def(w: &mut Writer, col: &ColumnDef) -> WriteResult {
    w.write(render_identifier(col.name.text.as_str(), w.dialect))?;
    w.add_comments(&col.name.trailing_comments)?;
    w.add_space()?;
    crate::expr::write_expr(w, &col.type_name)?;
    for tok in &col.rest {
        w.add_space()?;
        w.write(tok.text.to_ascii_uppercase())?;
        w.add_comments(&tok.trailing_comments)?;
    }
    Ok(())
}

fn write_create(w: &mut Writer, create: &CreateStatement) -> WriteResult {
    w.start_new_line();
    match create {
        CreateStatement::Table(t) => write_create_table(w, t),
        CreateStatement::View(v) => write_create_view(w, v),
        CreateStatement::Index(i) => write_create_index(w, i),
    }
}

fn write_create_table(w: &mut Writer, t: &CreateTable) -> WriteResult {
    write_keyword_sequence(w, &t.kwseq)?;
    if let Some(if_not_exists) = &t.if_not_exists {
        w.add_space()?;
        write_keyword_sequence(w, if_not_exists)?;
    }
    w.add_space()?;
    write_table_name(w, &t.table_name)?;
    w.add_space()?;
    write_punctuation_leaf(w, &t.left_paren)?;
    w.write_comma_list(&t.columns, false, |w, e| write_with_trailing_comma(w, e, write_column_def))?;
    write_punctuation_leaf(w, &t.right_paren)?;
    for tok in &t.table_options {
        w.add_space()?;
        w.write(tok.text.to_string())?;
        w.add_comments(&tok.trailing_comments)?;
    }
    Ok(())
}

fn write_create_view(w: &mut Writer, v: &CreateView) -> WriteResult {
    write_keyword_sequence(w, &v.kwseq)?;
    if let Some(or_replace) = &v.or_replace {
        w.add_space()?;
        write_keyword_sequence(w, or_replace)?;
    }
    w.add_space()?;
    write_table_name(w, &v.view_name)?;
    if let Some(cols) = &v.col_names {
        crate::clauses::write_col_name_list(w, cols)?;
    }
    w.add_space()?;
    write_keyword(w, &v.as_kw)?;
    w.add_space()?;
    write_subselect(w, &v.query)
}

fn write_create_index(w: &mut Writer, i: &CreateIndex) -> WriteResult {
    write_keyword_sequence(w, &i.kwseq)?;
    w.add_space()?;
    w.write(render_identifier(i.index_name.text.as_str(), w.dialect))?;
    w.add_comments(&i.index_name.trailing_comments)?;
    w.add_space()?;
    write_keyword(w, &i.on_kw)?;
    w.add_space()?;
    write_table_name(w, &i.table_name)?;
    w.add_space()?;
    write_punctuation_leaf(w, &i.left_paren)?;
    w.write_comma_list(&i.columns, false, |w, e| {
        write_with_trailing_comma(w, e, |w, tok: &sqltree_core::Token| {
            w.write(render_identifier(tok.text.as_str(), w.dialect))?;
            w.add_comments(&tok.trailing_comments)
        })
    })?;
    write_punctuation_leaf(w, &i.right_paren)
}

fn write_drop(w: &mut Writer, drop: &DropStatement) -> WriteResult {
    w.start_new_line();
    write_keyword_sequence(w, &drop.kwseq)?;
    if let Some(if_exists) = &drop.if_exists {
        w.add_space()?;
        write_keyword_sequence(w, if_exists)?;
    }
    w.add_space()?;
    w.write_comma_list(&drop.names, false, |w, e| write_with_trailing_comma(w, e, write_table_name))?;
    if let Some(cascade_restrict) = &drop.cascade_restrict {
        w.add_space()?;
        write_keyword(w, cascade_restrict)?;
    }
    Ok(())
}

fn write_truncate(w: &mut Writer, truncate: &TruncateStatement) -> WriteResult {
    w.start_new_line();
    write_keyword_sequence(w, &truncate.kwseq)?;
    w.add_space()?;
    write_table_name(w, &truncate.table_name)
}

fn write_rename_pair(w: &mut Writer, pair: &RenamePair) -> WriteResult {
    write_table_name(w, &pair.from)?;
    w.add_space()?;
    write_keyword(w, &pair.to_kw)?;
    w.add_space()?;
    write_table_name(w, &pair.to)
}

fn write_rename_table(w: &mut Writer, rename: &RenameTable) -> WriteResult {
    w.start_new_line();
    write_keyword_sequence(w, &rename.kwseq)?;
    w.add_space()?;
    w.write_comma_list(&rename.pairs, false, |w, e| write_with_trailing_comma(w, e, write_rename_pair))
}

fn write_set_statement(w: &mut Writer, set: &SetStatement) -> WriteResult {
    w.start_new_line();
    write_keyword(w, &set.set_kw)?;
    w.write_comma_list(&set.assignments, true, |w, e| {
        write_with_trailing_comma(w, e, crate::clauses::write_assignment)
    })
}

fn write_show(w: &mut Writer, show: &ShowStatement) -> WriteResult {
    w.start_new_line();
    write_keyword(w, &show.show_kw)?;
    w.add_space()?;
    write_keyword_sequence(w, &show.kwseq)?;
    if let Some(from_table) = &show.from_table {
        w.add_space()?;
        w.write("FROM")?;
        w.add_space()?;
        write_table_name(w, from_table)?;
    }
    if let Some(filter) = &show.filter {
        w.add_space()?;
        write_keyword(w, &filter.kw)?;
        w.add_space()?;
        crate::expr::write_expr(w, &filter.condition)?;
    }
    Ok(())
}

fn write_explain(w: &mut Writer, explain: &ExplainStatement) -> WriteResult {
    w.start_new_line();
    write_keyword(w, &explain.explain_kw)?;
    if let Some(format_clause) = &explain.format_clause {
        w.add_space()?;
        write_keyword_sequence(w, format_clause)?;
    }
    w.add_space()?;
    match &explain.target {
        ExplainTarget::Select(s) => write_subselect(w, s),
        ExplainTarget::Delete(d) => write_delete(w, d),
        ExplainTarget::Update(u) => write_update(w, u),
        ExplainTarget::Insert(i) => write_insert(w, i),
    }
}

fn write_flush(w: &mut Writer, flush: &Flush) -> WriteResult {
    w.start_new_line();
    write_keyword(w, &flush.flush_kw)?;
    w.write_comma_list(&flush.options, true, |w, e| write_with_trailing_comma(w, e, write_flush_option))
}

fn write_flush_option(w: &mut Writer, option: &FlushOption) -> WriteResult {
    match option {
        FlushOption::Tables { kwseq, names } => {
            write_keyword_sequence(w, kwseq)?;
            if !names.is_empty() {
                w.add_space()?;
                w.write_comma_list(names, false, |w, e| write_with_trailing_comma(w, e, write_table_name))?;
            }
            Ok(())
        }
        FlushOption::Other(kwseq) => write_keyword_sequence(w, kwseq),
    }
}

fn write_start_transaction(w: &mut Writer, start: &StartTransaction) -> WriteResult {
    w.start_new_line();
    write_keyword_sequence(w, &start.kwseq)
}

fn write_simple_statement(w: &mut Writer, simple: &SimpleStatement) -> WriteResult {
    w.start_new_line();
    write_keyword_sequence(w, &simple.kwseq)
}
