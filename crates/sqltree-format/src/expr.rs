//! Expression re-emission: the multi-line boolean operator layout plus
//! the generic leaf/composite output rules.

use sqltree_tree::{
    CaseExpression, Cast, Distinct, Dotted, Expr, ExprList, FrameBound, FrameExtent, FunctionCall,
    GroupConcat, GroupConcatOrderBy, Keyword, KeywordSequence, OpToken, Parenthesized, Precedence,
    Punctuation, TypeName, UnaryOp, WindowFrame, WindowSpec,
};

use crate::literal::{render_identifier, render_numeric_literal, render_string_literal};
use crate::writer::{WriteResult, Writer};

pub fn write_keyword(w: &mut Writer, kw: &Keyword) -> WriteResult {
    w.write(kw.0.text.to_ascii_uppercase())?;
    w.add_comments(&kw.0.trailing_comments)
}

pub fn write_keyword_sequence(w: &mut Writer, seq: &KeywordSequence) -> WriteResult {
    w.with_skip_comments(|w| -> WriteResult {
        for (i, kw) in seq.0.iter().enumerate() {
            if i > 0 {
                w.add_space()?;
            }
            w.write(kw.0.text.to_ascii_uppercase())?;
        }
        Ok(())
    })?;
    if !w.should_skip_comments() {
        for kw in &seq.0 {
            w.add_comments(&kw.0.trailing_comments)?;
        }
    }
    Ok(())
}

/// Emits a punctuation leaf, preceding it with a space unless it is one
/// of the "tight" punctuation marks.
pub fn write_punctuation(w: &mut Writer, punc: &Punctuation) -> WriteResult {
    if !matches!(punc.0.text.as_str(), "(" | ")" | "," | "*") {
        w.add_space()?;
    }
    write_punctuation_leaf(w, punc)
}

pub fn write_punctuation_leaf(w: &mut Writer, punc: &Punctuation) -> WriteResult {
    w.write(punc.0.text.to_string())?;
    w.add_comments(&punc.0.trailing_comments)
}

fn write_token_leaf(w: &mut Writer, token: &sqltree_core::Token, text: String) -> WriteResult {
    w.write(text)?;
    w.add_comments(&token.trailing_comments)
}

pub fn write_expr(w: &mut Writer, expr: &Expr) -> WriteResult {
    match expr {
        Expr::Identifier(tok) => write_token_leaf(w, tok, render_identifier(tok.text.as_str(), w.dialect)),
        Expr::KeywordIdentifier(kw) => write_keyword(w, kw),
        Expr::StringLiteral(tok) => write_token_leaf(w, tok, render_string_literal(tok.text.as_str())),
        Expr::NumericLiteral(tok) => write_token_leaf(w, tok, render_numeric_literal(tok.text.as_str())),
        Expr::Placeholder(tok) => write_token_leaf(w, tok, tok.text.to_string()),
        Expr::Star(tok) => write_token_leaf(w, tok, "*".to_string()),
        Expr::Null(kw) => write_keyword(w, kw),
        Expr::Dotted(dotted) => write_dotted(w, dotted),
        Expr::Parenthesized(p) => write_parenthesized(w, p),
        Expr::BinOp(b) => write_binop(w, b, false),
        Expr::UnaryOp(u) => write_unary_op(w, u),
        Expr::FunctionCall(f) => write_function_call(w, f),
        Expr::ExprList(l) => write_expr_list(w, l),
        Expr::Distinct(d) => write_distinct(w, d),
        Expr::Cast(c) => write_cast(w, c),
        Expr::GroupConcat(g) => write_group_concat(w, g),
        Expr::Case(c) => write_case(w, c),
        Expr::Subselect(s) => crate::statements::write_subselect(w, s),
    }
}

fn write_dotted(w: &mut Writer, dotted: &Dotted) -> WriteResult {
    write_expr(w, &dotted.left)?;
    write_punctuation_leaf(w, &dotted.dot)?;
    write_expr(w, &dotted.right)
}

fn write_parenthesized(w: &mut Writer, p: &Parenthesized) -> WriteResult {
    write_punctuation(w, &p.left_punc)?;
    if let Expr::BinOp(b) = &p.inner {
        write_binop(w, b, true)?;
    } else {
        write_expr(w, &p.inner)?;
    }
    write_punctuation(w, &p.right_punc)
}

fn is_primary(expr: &Expr) -> bool {
    matches!(
        expr,
        Expr::Identifier(_)
            | Expr::KeywordIdentifier(_)
            | Expr::StringLiteral(_)
            | Expr::NumericLiteral(_)
            | Expr::Placeholder(_)
            | Expr::Star(_)
            | Expr::Null(_)
            | Expr::Dotted(_)
            | Expr::Parenthesized(_)
            | Expr::Subselect(_)
            | Expr::FunctionCall(_)
    )
}

fn write_unary_op(w: &mut Writer, u: &UnaryOp) -> WriteResult {
    match &u.op {
        OpToken::Keyword(kw) => write_keyword(w, kw)?,
        OpToken::Punctuation(p) => write_punctuation_leaf(w, p)?,
    }
    if is_primary(&u.expr) {
        write_expr(w, &u.expr)
    } else {
        w.write("(")?;
        write_expr(w, &u.expr)?;
        w.write(")")
    }
}

fn write_op_token(w: &mut Writer, op: &OpToken) -> WriteResult {
    match op {
        OpToken::Keyword(kw) => write_keyword(w, kw),
        OpToken::Punctuation(p) => write_punctuation_leaf(w, p),
    }
}

/// `in_parens` tracks whether this operator is nested directly inside a
/// parenthesized expression: if so, a multi-line operator gets a
/// trailing newline before its close paren so the closing `)` lands at
/// base indent.
fn write_binop(w: &mut Writer, b: &sqltree_tree::BinOp, in_parens: bool) -> WriteResult {
    let precedence = b.precedence();
    if precedence.is_boolean() {
        w.clear_trailing_space();
        w.with_indent(|w| write_binop_multiline(w, b, precedence))?;
        if in_parens {
            w.start_new_line();
        }
        Ok(())
    } else {
        write_expr(w, &b.left)?;
        w.add_space()?;
        write_op_token(w, &b.op)?;
        w.add_space()?;
        write_expr(w, &b.right)
    }
}

fn write_binop_multiline(w: &mut Writer, b: &sqltree_tree::BinOp, precedence: Precedence) -> WriteResult {
    w.force_indentation();
    write_maybe_multiline(w, &b.left, precedence)?;
    w.start_new_line();
    write_op_token(w, &b.op)?;
    w.add_space()?;
    write_maybe_multiline(w, &b.right, precedence)
}

fn write_maybe_multiline(w: &mut Writer, expr: &Expr, precedence: Precedence) -> WriteResult {
    if let Expr::BinOp(inner) = expr {
        if inner.precedence() == precedence {
            return write_binop_multiline(w, inner, precedence);
        }
    }
    write_expr(w, expr)
}

fn write_function_call(w: &mut Writer, f: &FunctionCall) -> WriteResult {
    write_expr(w, &f.callee)?;
    write_punctuation(w, &f.left_paren)?;
    if let Some(kw) = &f.distinct_kw {
        write_keyword(w, kw)?;
        w.add_space()?;
    }
    w.write_comma_list(&f.args, false, |w, arg| write_with_trailing_comma(w, arg, write_expr))?;
    write_punctuation(w, &f.right_paren)?;
    if let Some(over) = &f.over {
        w.add_space()?;
        write_window_spec(w, over)?;
    }
    Ok(())
}

fn write_expr_list(w: &mut Writer, l: &ExprList) -> WriteResult {
    write_punctuation(w, &l.left_paren)?;
    w.write_comma_list(&l.exprs, false, |w, e| write_with_trailing_comma(w, e, write_expr))?;
    write_punctuation(w, &l.right_paren)
}

fn write_distinct(w: &mut Writer, d: &Distinct) -> WriteResult {
    write_keyword(w, &d.distinct_kw)?;
    w.add_space()?;
    write_expr(w, &d.expr)
}

pub fn write_type_name(w: &mut Writer, t: &TypeName) -> WriteResult {
    write_expr(w, &t.name)?;
    if let Some(size) = &t.size {
        write_punctuation(w, &size.left_paren)?;
        w.write_comma_list(&size.args, false, |w, e| {
            write_with_trailing_comma(w, e, |w, tok| write_token_leaf(w, tok, tok.text.to_string()))
        })?;
        write_punctuation(w, &size.right_paren)?;
    }
    Ok(())
}

fn write_cast(w: &mut Writer, c: &Cast) -> WriteResult {
    write_keyword(w, &c.cast_kw)?;
    write_punctuation(w, &c.left_paren)?;
    write_expr(w, &c.expr)?;
    w.add_space()?;
    write_keyword(w, &c.as_kw)?;
    w.add_space()?;
    write_type_name(w, &c.type_name)?;
    write_punctuation(w, &c.right_paren)
}

fn write_group_concat(w: &mut Writer, g: &GroupConcat) -> WriteResult {
    write_keyword(w, &g.group_concat_kw)?;
    write_punctuation(w, &g.left_paren)?;
    if let Some(kw) = &g.distinct_kw {
        write_keyword(w, kw)?;
        w.add_space()?;
    }
    w.write_comma_list(&g.exprs, false, |w, e| write_with_trailing_comma(w, e, write_expr))?;
    if let Some(order_by) = &g.order_by {
        w.add_space()?;
        match order_by {
            GroupConcatOrderBy::OrderBy(ob) => {
                write_keyword_sequence(w, &ob.kwseq)?;
                w.write_comma_list(&ob.exprs, true, |w, e| {
                    write_with_trailing_comma(w, e, crate::clauses::write_order_by_expr)
                })?;
            }
            GroupConcatOrderBy::Placeholder(tok) => write_token_leaf(w, tok, tok.text.to_string())?,
        }
    }
    if let Some(sep) = &g.separator {
        w.add_space()?;
        write_keyword(w, &sep.separator_kw)?;
        w.add_space()?;
        write_expr(w, &sep.value)?;
    }
    write_punctuation(w, &g.right_paren)
}

fn write_case(w: &mut Writer, c: &CaseExpression) -> WriteResult {
    write_keyword(w, &c.case_kw)?;
    w.add_space()?;
    if let Some(value) = &c.value {
        write_expr(w, value)?;
        w.add_space()?;
    }
    for wt in &c.when_thens {
        write_keyword(w, &wt.when_kw)?;
        w.add_space()?;
        write_expr(w, &wt.condition)?;
        w.add_space()?;
        write_keyword(w, &wt.then_kw)?;
        w.add_space()?;
        write_expr(w, &wt.result)?;
        w.add_space()?;
    }
    if let Some(else_clause) = &c.else_clause {
        write_keyword(w, &else_clause.else_kw)?;
        w.add_space()?;
        write_expr(w, &else_clause.expr)?;
        w.add_space()?;
    }
    write_keyword(w, &c.end_kw)
}

fn write_window_spec(w: &mut Writer, spec: &WindowSpec) -> WriteResult {
    write_keyword(w, &spec.over_kw)?;
    write_punctuation(w, &spec.left_paren)?;
    if let Some(pb) = &spec.partition_by {
        write_keyword_sequence(w, &pb.kwseq)?;
        w.write_comma_list(&pb.exprs, true, |w, e| write_with_trailing_comma(w, e, write_expr))?;
    }
    if let Some(ob) = &spec.order_by {
        w.add_space()?;
        write_keyword_sequence(w, &ob.kwseq)?;
        w.write_comma_list(&ob.exprs, true, |w, e| {
            write_with_trailing_comma(w, e, crate::clauses::write_order_by_expr)
        })?;
    }
    if let Some(frame) = &spec.frame {
        w.add_space()?;
        write_window_frame(w, frame)?;
    }
    write_punctuation(w, &spec.right_paren)
}

fn write_window_frame(w: &mut Writer, frame: &WindowFrame) -> WriteResult {
    write_keyword(w, &frame.units_kw)?;
    w.add_space()?;
    match &frame.extent {
        FrameExtent::Single(bound) => write_frame_bound(w, bound),
        FrameExtent::Between { between_kw, start, and_kw, end } => {
            write_keyword(w, between_kw)?;
            w.add_space()?;
            write_frame_bound(w, start)?;
            w.add_space()?;
            write_keyword(w, and_kw)?;
            w.add_space()?;
            write_frame_bound(w, end)
        }
    }
}

fn write_frame_bound(w: &mut Writer, bound: &FrameBound) -> WriteResult {
    match bound {
        FrameBound::UnboundedPreceding(seq) | FrameBound::UnboundedFollowing(seq) | FrameBound::CurrentRow(seq) => {
            write_keyword_sequence(w, seq)
        }
        FrameBound::Preceding { expr, kw } | FrameBound::Following { expr, kw } => {
            write_expr(w, expr)?;
            w.add_space()?;
            write_keyword(w, kw)
        }
    }
}

/// Shared by every `Vec<WithTrailingComma<T>>` list: visits the element,
/// then the trailing comma plus a following space.
pub fn write_with_trailing_comma<T>(
    w: &mut Writer,
    item: &sqltree_tree::WithTrailingComma<T>,
    mut write_node: impl FnMut(&mut Writer, &T) -> WriteResult,
) -> WriteResult {
    write_node(w, &item.node)?;
    if let Some(comma) = &item.trailing_comma {
        write_punctuation_leaf(w, comma)?;
        w.add_space()?;
    }
    Ok(())
}
