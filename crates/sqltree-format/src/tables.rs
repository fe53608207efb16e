//! Table references, joins, and index hints.

use sqltree_tree::{
    IndexHint, JoinOn, JoinSpec, JoinedTable, LeftRightJoinedTable, NaturalJoinedTable,
    SimpleJoinedTable, SimpleTableFactor, SubqueryFactor, TableName, TableReferenceList, TableRef,
    UsingSpec,
};

use crate::expr::{write_keyword, write_keyword_sequence, write_punctuation};
use crate::literal::render_identifier;
use crate::writer::{WriteResult, Writer};

fn write_token_name(w: &mut Writer, tok: &sqltree_core::Token) -> WriteResult {
    w.write(render_identifier(tok.text.as_str(), w.dialect))?;
    w.add_comments(&tok.trailing_comments)
}

pub fn write_table_name(w: &mut Writer, name: &TableName) -> WriteResult {
    match name {
        TableName::Simple(tok) => write_token_name(w, tok),
        TableName::Dotted { left, dot, right } => {
            write_token_name(w, left)?;
            w.write(dot.0.text.to_string())?;
            w.add_comments(&dot.0.trailing_comments)?;
            write_token_name(w, right)
        }
    }
}

fn write_index_hint(w: &mut Writer, hint: &IndexHint) -> WriteResult {
    w.start_new_line();
    write_keyword(w, &hint.intro_kw)?;
    w.add_space()?;
    write_keyword(w, &hint.kind_kw)?;
    if let Some(for_what) = &hint.for_what {
        w.add_space()?;
        match &hint.for_kw {
            Some(kw) => write_keyword(w, kw)?,
            None => w.write("FOR")?,
        }
        w.add_space()?;
        write_keyword_sequence(w, for_what)?;
    }
    write_punctuation(w, &hint.left_paren)?;
    w.write_comma_list(&hint.index_list, false, |w, e| {
        crate::expr::write_with_trailing_comma(w, e, write_token_name)
    })?;
    write_punctuation(w, &hint.right_paren)
}

fn write_simple_table_factor(w: &mut Writer, factor: &SimpleTableFactor) -> WriteResult {
    write_table_name(w, &factor.table_name)?;
    if let Some(alias) = &factor.alias {
        w.add_space()?;
        match &factor.as_kw {
            Some(kw) => write_keyword(w, kw)?,
            None => w.write("AS")?,
        }
        w.add_space()?;
        write_token_name(w, alias)?;
    }
    for hint in &factor.index_hint_list {
        write_index_hint(w, &hint.node)?;
        if let Some(comma) = &hint.trailing_comma {
            w.write(comma.0.text.to_string())?;
            w.add_comments(&comma.0.trailing_comments)?;
        }
    }
    Ok(())
}

fn write_subquery_factor(w: &mut Writer, factor: &SubqueryFactor) -> WriteResult {
    if let Some(lateral) = &factor.lateral_kw {
        write_keyword(w, lateral)?;
        w.add_space()?;
    }
    crate::statements::write_subselect(w, &factor.table_subquery)?;
    w.add_space()?;
    match &factor.as_kw {
        Some(kw) => write_keyword(w, kw)?,
        None => w.write("AS")?,
    }
    w.add_space()?;
    write_token_name(w, &factor.alias)?;
    if !factor.col_list.is_empty() {
        match &factor.left_paren {
            Some(p) => w.write(p.0.text.to_string())?,
            None => w.write("(")?,
        }
        w.write_comma_list(&factor.col_list, true, |w, e| {
            crate::expr::write_with_trailing_comma(w, e, write_token_name)
        })?;
        match &factor.right_paren {
            Some(p) => w.write(p.0.text.to_string())?,
            None => w.write(")")?,
        }
    }
    Ok(())
}

fn write_table_reference_list(w: &mut Writer, list: &TableReferenceList) -> WriteResult {
    write_punctuation(w, &list.left_paren)?;
    w.write_comma_list(&list.references, false, |w, e| {
        crate::expr::write_with_trailing_comma(w, e, write_table_ref)
    })?;
    write_punctuation(w, &list.right_paren)
}

fn write_join_on(w: &mut Writer, on: &JoinOn) -> WriteResult {
    w.start_new_line();
    write_keyword(w, &on.kw)?;
    w.add_space()?;
    crate::expr::write_expr(w, &on.search_condition)
}

fn write_using_spec(w: &mut Writer, using: &UsingSpec) -> WriteResult {
    w.start_new_line();
    write_keyword(w, &using.kw)?;
    write_punctuation(w, &using.left_paren)?;
    w.write_comma_list(&using.columns, false, |w, e| {
        crate::expr::write_with_trailing_comma(w, e, write_token_name)
    })?;
    write_punctuation(w, &using.right_paren)
}

fn write_join_spec(w: &mut Writer, spec: &JoinSpec) -> WriteResult {
    match spec {
        JoinSpec::On(on) => write_join_on(w, on),
        JoinSpec::Using(using) => write_using_spec(w, using),
    }
}

fn is_join(table_ref: &TableRef) -> bool {
    matches!(table_ref, TableRef::Join(_))
}

/// Every join always renders multi-line: the left relation on its own
/// (indented) line, the join keyword sequence flush with the
/// introducing clause, the right relation on its own indented line, and
/// the `ON`/`USING` condition on the following line.
fn write_join(w: &mut Writer, joined: &JoinedTable) -> WriteResult {
    let (left, kws, join_spec): (&TableRef, Vec<&sqltree_tree::Keyword>, Option<&JoinSpec>) = match joined {
        JoinedTable::Simple(j) => {
            let mut kws = Vec::new();
            if let Some(ic) = &j.inner_cross {
                kws.push(ic);
            }
            kws.push(&j.join_kw);
            (&j.left, kws, j.join_spec.as_ref())
        }
        JoinedTable::LeftRight(j) => {
            let mut kws = vec![&j.left_right];
            if let Some(outer) = &j.outer_kw {
                kws.push(outer);
            }
            kws.push(&j.join_kw);
            (&j.left, kws, Some(&j.join_specification))
        }
        JoinedTable::Natural(j) => {
            let mut kws = vec![&j.natural_kw];
            if let Some(lr) = &j.left_right {
                kws.push(lr);
            }
            if let Some(io) = &j.inner_outer {
                kws.push(io);
            }
            kws.push(&j.join_kw);
            (&j.left, kws, None)
        }
    };

    if is_join(left) {
        write_table_ref(w, left)?;
    } else {
        w.clear_trailing_space();
        w.with_indent(|w| -> WriteResult {
            w.start_new_line();
            write_table_ref(w, left)
        })?;
    }
    w.start_new_line();
    w.with_skip_comments(|w| -> WriteResult {
        for (i, kw) in kws.iter().enumerate() {
            if i > 0 {
                w.add_space()?;
            }
            w.write(kw.0.text.to_ascii_uppercase())?;
        }
        Ok(())
    })?;
    for kw in &kws {
        w.add_comments(&kw.0.trailing_comments)?;
    }
    let right = match joined {
        JoinedTable::Simple(j) => &j.right,
        JoinedTable::LeftRight(j) => &j.right,
        JoinedTable::Natural(j) => &j.right,
    };
    w.with_indent(|w| -> WriteResult {
        w.start_new_line();
        write_table_ref(w, right)
    })?;
    if let Some(spec) = join_spec {
        write_join_spec(w, spec)?;
    }
    Ok(())
}

pub fn write_table_ref(w: &mut Writer, table_ref: &TableRef) -> WriteResult {
    match table_ref {
        TableRef::Simple(factor) => write_simple_table_factor(w, factor),
        TableRef::Subquery(factor) => write_subquery_factor(w, factor),
        TableRef::ParenList(list) => write_table_reference_list(w, list),
        TableRef::Join(joined) => write_join(w, joined),
    }
}

