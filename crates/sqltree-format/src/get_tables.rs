//! Table-name extraction: walks a parsed statement collecting every
//! `SimpleTableFactor` table name and every `IntoClause` target, in the
//! order they are written.

use sqltree_tree::{
    walk_expr, walk_table_ref, Delete, ExplainStatement, ExplainTarget, Insert, InsertValues,
    ParsedStatement, Replace, Select, Statement, Subselect, TableRef, Update, Visitor,
};

struct TableCollector {
    tables: Vec<String>,
}

impl Visitor for TableCollector {
    fn visit_expr(&mut self, expr: &sqltree_tree::Expr) {
        walk_expr(self, expr);
    }

    fn visit_table_ref(&mut self, table_ref: &TableRef) {
        if let TableRef::Simple(factor) = table_ref {
            self.tables.push(factor.table_name.dotted_text());
        }
        walk_table_ref(self, table_ref);
    }
}

fn collect_select(v: &mut TableCollector, select: &Select) {
    if let Some(with) = &select.with {
        for cte in &with.ctes {
            collect_subselect(v, &cte.node.subquery);
        }
    }
    for item in &select.select_exprs {
        v.visit_expr(&item.node.expr);
    }
    if let Some(into) = select.into.as_ref().and_then(|c| c.as_clause()) {
        v.tables.push(into.table.dotted_text());
    }
    if let Some(from) = select.from.as_ref().and_then(|c| c.as_clause()) {
        for t in &from.tables {
            v.visit_table_ref(&t.node);
        }
    }
    if let Some(where_clause) = select.where_clause.as_ref().and_then(|c| c.as_clause()) {
        v.visit_expr(&where_clause.condition);
    }
    if let Some(group_by) = select.group_by.as_ref().and_then(|c| c.as_clause()) {
        for e in &group_by.exprs {
            v.visit_expr(&e.node.expr);
        }
    }
    if let Some(having) = select.having.as_ref().and_then(|c| c.as_clause()) {
        v.visit_expr(&having.condition);
    }
    if let Some(order_by) = select.order_by.as_ref().and_then(|c| c.as_clause()) {
        for e in &order_by.exprs {
            v.visit_expr(&e.node.expr);
        }
    }
    if let Some(into2) = select.into2.as_ref().and_then(|c| c.as_clause()) {
        v.tables.push(into2.table.dotted_text());
    }
    if let Some(into3) = select.into3.as_ref().and_then(|c| c.as_clause()) {
        v.tables.push(into3.table.dotted_text());
    }
}

fn collect_subselect(v: &mut TableCollector, subselect: &Subselect) {
    match subselect {
        Subselect::Plain(select) => collect_select(v, select),
        Subselect::Union(union) => {
            collect_subselect(v, &union.first);
            for entry in &union.rest {
                collect_subselect(v, &entry.select);
            }
            if let Some(order_by) = union.order_by.as_ref().and_then(|c| c.as_clause()) {
                for e in &order_by.exprs {
                    v.visit_expr(&e.node.expr);
                }
            }
        }
        Subselect::Parenthesized { inner, .. } => collect_subselect(v, inner),
    }
}

fn collect_delete(v: &mut TableCollector, delete: &Delete) {
    for t in &delete.from.tables {
        v.visit_table_ref(&t.node);
    }
    if let Some(using) = &delete.using {
        for t in &using.tables {
            v.visit_table_ref(&t.node);
        }
    }
    if let Some(where_clause) = delete.where_clause.as_ref().and_then(|c| c.as_clause()) {
        v.visit_expr(&where_clause.condition);
    }
}

fn collect_update(v: &mut TableCollector, update: &Update) {
    for t in &update.tables {
        v.visit_table_ref(&t.node);
    }
    for a in &update.set.assignments {
        v.visit_expr(&a.node.col_name);
        if let sqltree_tree::AssignmentValue::Expr(e) = &a.node.value {
            v.visit_expr(e);
        }
    }
    if let Some(where_clause) = update.where_clause.as_ref().and_then(|c| c.as_clause()) {
        v.visit_expr(&where_clause.condition);
    }
}

fn collect_insert_values(v: &mut TableCollector, values: &InsertValues) {
    match values {
        InsertValues::Values { rows, .. } => {
            for row in rows {
                for value in &row.node.values {
                    if let sqltree_tree::AssignmentValue::Expr(e) = &value.node {
                        v.visit_expr(e);
                    }
                }
            }
        }
        InsertValues::Select(subselect) => collect_subselect(v, subselect),
        InsertValues::Default(_) => {}
    }
}

fn collect_insert(v: &mut TableCollector, insert: &Insert) {
    v.tables.push(insert.into.table.dotted_text());
    collect_insert_values(v, &insert.values);
}

fn collect_replace(v: &mut TableCollector, replace: &Replace) {
    v.tables.push(replace.into.table.dotted_text());
    collect_insert_values(v, &replace.values);
}

fn collect_explain(v: &mut TableCollector, explain: &ExplainStatement) {
    match &explain.target {
        ExplainTarget::Select(s) => collect_subselect(v, s),
        ExplainTarget::Delete(d) => collect_delete(v, d),
        ExplainTarget::Update(u) => collect_update(v, u),
        ExplainTarget::Insert(i) => collect_insert(v, i),
    }
}

fn collect_statement(v: &mut TableCollector, statement: &Statement) {
    match statement {
        Statement::Select(s) => collect_subselect(v, s),
        Statement::Delete(d) => collect_delete(v, d),
        Statement::Update(u) => collect_update(v, u),
        Statement::Insert(i) => collect_insert(v, i),
        Statement::Replace(r) => collect_replace(v, r),
        Statement::Explain(e) => collect_explain(v, e),
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

/// Ordered, duplicate-preserving list of every table name a statement
/// references: `FROM`/`JOIN` relations and `INTO` targets, in source order.
pub fn get_tables(parsed: &ParsedStatement) -> Vec<String> {
    let mut collector = TableCollector { tables: Vec::new() };
    collect_statement(&mut collector, &parsed.statement);
    collector.tables
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqltree_core::Dialect;

    fn tables_for(sql: &str) -> Vec<String> {
        let dialect = Dialect::mysql();
        let parsed = sqltree_parser::parse(sql, &dialect).expect("valid sql");
        get_tables(&parsed)
    }

    #[test]
    fn insert_select_collects_both_targets_in_order() {
        assert_eq!(tables_for("INSERT INTO x(a,b) SELECT * FROM y"), vec!["x", "y"]);
    }

    #[test]
    fn dotted_table_name_is_preserved() {
        assert_eq!(tables_for("SELECT * FROM db.t"), vec!["db.t"]);
    }

    #[test]
    fn join_collects_both_sides() {
        let tables = tables_for("SELECT * FROM a JOIN b ON a.id = b.id");
        assert_eq!(tables, vec!["a", "b"]);
    }

    #[test]
    fn nested_subquery_in_where_is_collected() {
        let tables = tables_for("SELECT * FROM a WHERE id IN (SELECT id FROM b)");
        assert_eq!(tables, vec!["a", "b"]);
    }
}
