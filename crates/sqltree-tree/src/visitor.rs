//! Pre-order traversal scaffolding. Unlike a reflection-based
//! `generic_visit` that walks whatever fields a node happens to have,
//! `walk` is an exhaustive match over the closed `Statement`/`Expr`/
//! `TableRef` hierarchies: adding a node variant without adding its arm
//! here is a compile error, not a silently-skipped node.

use crate::{
    CaseExpression, Expr, FrameBound, FrameExtent, JoinedTable, Select, Statement, Subselect,
    TableRef, WindowSpec,
};

/// Read-only visitor over a parsed tree. Every method has a default no-op
/// body; override only the node kinds a particular pass cares about.
pub trait Visitor {
    fn visit_statement(&mut self, statement: &Statement) {
        walk_statement(self, statement);
    }

    fn visit_expr(&mut self, expr: &Expr) {
        walk_expr(self, expr);
    }

    fn visit_table_ref(&mut self, table_ref: &TableRef) {
        walk_table_ref(self, table_ref);
    }
}

/// Mutating counterpart of `Visitor`, for passes that rebuild nodes in
/// place (e.g. a future rewriter). Kept separate so read-only passes never
/// need `&mut` access.
pub trait Transformer {
    fn transform_expr(&mut self, expr: Expr) -> Expr {
        expr
    }
}

fn walk_select<V: Visitor + ?Sized>(visitor: &mut V, select: &Select) {
    for item in &select.select_exprs {
        visitor.visit_expr(&item.node.expr);
    }
    if let Some(from) = select.from.as_ref().and_then(|c| c.as_clause()) {
        for t in &from.tables {
            visitor.visit_table_ref(&t.node);
        }
    }
    if let Some(w) = select.where_clause.as_ref().and_then(|c| c.as_clause()) {
        visitor.visit_expr(&w.condition);
    }
    if let Some(h) = select.having.as_ref().and_then(|c| c.as_clause()) {
        visitor.visit_expr(&h.condition);
    }
}

fn walk_subselect<V: Visitor + ?Sized>(visitor: &mut V, subselect: &Subselect) {
    match subselect {
        Subselect::Plain(select) => walk_select(visitor, select),
        Subselect::Union(union) => {
            walk_subselect(visitor, &union.first);
            for entry in &union.rest {
                walk_subselect(visitor, &entry.select);
            }
        }
        Subselect::Parenthesized { inner, .. } => walk_subselect(visitor, inner),
    }
}

pub fn walk_statement<V: Visitor + ?Sized>(visitor: &mut V, statement: &Statement) {
    match statement {
        Statement::Select(subselect) => walk_subselect(visitor, subselect),
        Statement::Delete(delete) => {
            for t in &delete.from.tables {
                visitor.visit_table_ref(&t.node);
            }
            if let Some(w) = delete.where_clause.as_ref().and_then(|c| c.as_clause()) {
                visitor.visit_expr(&w.condition);
            }
        }
        Statement::Update(update) => {
            for t in &update.tables {
                visitor.visit_table_ref(&t.node);
            }
            for a in &update.set.assignments {
                visitor.visit_expr(&a.node.col_name);
            }
            if let Some(w) = update.where_clause.as_ref().and_then(|c| c.as_clause()) {
                visitor.visit_expr(&w.condition);
            }
        }
        Statement::Insert(insert) => {
            if let crate::InsertValues::Select(subselect) = &insert.values {
                walk_subselect(visitor, subselect);
            }
        }
        Statement::Replace(replace) => {
            if let crate::InsertValues::Select(subselect) = &replace.values {
                walk_subselect(visitor, subselect);
            }
        }
        Statement::Explain(explain) => match &explain.target {
            crate::ExplainTarget::Select(s) => walk_subselect(visitor, s),
            crate::ExplainTarget::Delete(d) => visitor.visit_statement(&Statement::Delete((**d).clone())),
            crate::ExplainTarget::Update(u) => visitor.visit_statement(&Statement::Update((**u).clone())),
            crate::ExplainTarget::Insert(i) => visitor.visit_statement(&Statement::Insert((**i).clone())),
        },
        Statement::Create(_)
        | Statement::Drop(_)
        | Statement::Truncate(_)
        | Statement::RenameTable(_)
        | Statement::Set(_)
        | Statement::Show(_)
        | Statement::Flush(_)
        | Statement::StartTransaction(_)
        | Statement::Simple(_) => {}
    }
}

pub fn walk_expr<V: Visitor + ?Sized>(visitor: &mut V, expr: &Expr) {
    match expr {
        Expr::Identifier(_)
        | Expr::KeywordIdentifier(_)
        | Expr::StringLiteral(_)
        | Expr::NumericLiteral(_)
        | Expr::Placeholder(_)
        | Expr::Star(_)
        | Expr::Null(_) => {}
        Expr::Dotted(dotted) => {
            visitor.visit_expr(&dotted.left);
            visitor.visit_expr(&dotted.right);
        }
        Expr::Parenthesized(p) => visitor.visit_expr(&p.inner),
        Expr::BinOp(b) => {
            visitor.visit_expr(&b.left);
            visitor.visit_expr(&b.right);
        }
        Expr::UnaryOp(u) => visitor.visit_expr(&u.expr),
        Expr::FunctionCall(f) => {
            visitor.visit_expr(&f.callee);
            for a in &f.args {
                visitor.visit_expr(&a.node);
            }
            if let Some(over) = &f.over {
                walk_window_spec(visitor, over);
            }
        }
        Expr::ExprList(list) => {
            for e in &list.exprs {
                visitor.visit_expr(&e.node);
            }
        }
        Expr::Distinct(d) => visitor.visit_expr(&d.expr),
        Expr::Cast(c) => {
            visitor.visit_expr(&c.expr);
            visitor.visit_expr(&c.type_name.name);
        }
        Expr::GroupConcat(g) => {
            for e in &g.exprs {
                visitor.visit_expr(&e.node);
            }
            if let Some(sep) = &g.separator {
                visitor.visit_expr(&sep.value);
            }
        }
        Expr::Case(c) => walk_case(visitor, c),
        Expr::Subselect(s) => walk_subselect(visitor, s),
    }
}

fn walk_case<V: Visitor + ?Sized>(visitor: &mut V, case: &CaseExpression) {
    if let Some(value) = &case.value {
        visitor.visit_expr(value);
    }
    for wt in &case.when_thens {
        visitor.visit_expr(&wt.condition);
        visitor.visit_expr(&wt.result);
    }
    if let Some(else_clause) = &case.else_clause {
        visitor.visit_expr(&else_clause.expr);
    }
}

fn walk_window_spec<V: Visitor + ?Sized>(visitor: &mut V, spec: &WindowSpec) {
    if let Some(partition_by) = &spec.partition_by {
        for e in &partition_by.exprs {
            visitor.visit_expr(&e.node);
        }
    }
    if let Some(frame) = &spec.frame {
        walk_frame_extent(visitor, &frame.extent);
    }
}

fn walk_frame_extent<V: Visitor + ?Sized>(visitor: &mut V, extent: &FrameExtent) {
    match extent {
        FrameExtent::Single(bound) => walk_frame_bound(visitor, bound),
        FrameExtent::Between { start, end, .. } => {
            walk_frame_bound(visitor, start);
            walk_frame_bound(visitor, end);
        }
    }
}

fn walk_frame_bound<V: Visitor + ?Sized>(visitor: &mut V, bound: &FrameBound) {
    match bound {
        FrameBound::Preceding { expr, .. } | FrameBound::Following { expr, .. } => {
            visitor.visit_expr(expr);
        }
        FrameBound::UnboundedPreceding(_) | FrameBound::UnboundedFollowing(_) | FrameBound::CurrentRow(_) => {}
    }
}

pub fn walk_table_ref<V: Visitor + ?Sized>(visitor: &mut V, table_ref: &TableRef) {
    match table_ref {
        TableRef::Simple(_) => {}
        TableRef::Subquery(sub) => walk_subselect(visitor, &sub.table_subquery),
        TableRef::ParenList(list) => {
            for t in &list.references {
                visitor.visit_table_ref(&t.node);
            }
        }
        TableRef::Join(joined) => match &**joined {
            JoinedTable::Simple(j) => {
                visitor.visit_table_ref(&j.left);
                visitor.visit_table_ref(&j.right);
                if let Some(crate::JoinSpec::On(on)) = &j.join_spec {
                    visitor.visit_expr(&on.search_condition);
                }
            }
            JoinedTable::LeftRight(j) => {
                visitor.visit_table_ref(&j.left);
                visitor.visit_table_ref(&j.right);
                if let crate::JoinSpec::On(on) = &j.join_specification {
                    visitor.visit_expr(&on.search_condition);
                }
            }
            JoinedTable::Natural(j) => {
                visitor.visit_table_ref(&j.left);
                visitor.visit_table_ref(&j.right);
            }
        },
    }
}

/// Convenience entry point: visit an entire statement with a fresh
/// default-constructed visitor state held by the caller.
pub fn walk<V: Visitor + ?Sized>(visitor: &mut V, statement: &Statement) {
    visitor.visit_statement(statement);
}
