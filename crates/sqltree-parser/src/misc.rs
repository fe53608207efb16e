//! The "shell" statements: `SET`, `SHOW`, `EXPLAIN`/`DESCRIBE`/`DESC`,
//! `FLUSH`, and the transaction-control no-argument statements
//! (`START TRANSACTION`, `BEGIN`, `COMMIT`, `ROLLBACK`) — syntactically
//! terminal, so each is a keyword sequence plus a small number of
//! optional trailing clauses.

use sqltree_tree::{
    ExplainStatement, ExplainTarget, Flush, FlushOption, KeywordSequence, SetStatement,
    ShowFilter, ShowStatement, SimpleStatement, StartTransaction,
};

use crate::cursor::Cursor;
use crate::errors::ParseError;
use crate::expr::parse_expression;

pub fn parse_set(cursor: &mut Cursor) -> Result<SetStatement, ParseError> {
    let set_kw = cursor.expect_keyword("SET")?;
    let assignments = cursor.parse_comma_separated(crate::dml::parse_assignment)?;
    Ok(SetStatement { set_kw, assignments })
}

const SHOW_THING_KEYWORDS: &[&str] = &[
    "TABLES", "DATABASES", "SCHEMAS", "COLUMNS", "FIELDS", "INDEX", "INDEXES", "KEYS",
    "VARIABLES", "STATUS", "CREATE", "GRANTS", "WARNINGS", "ERRORS", "ENGINES", "PROCESSLIST",
];

pub fn parse_show(cursor: &mut Cursor) -> Result<ShowStatement, ParseError> {
    let show_kw = cursor.expect_keyword("SHOW")?;
    let kwseq = KeywordSequence::new(vec![cursor.expect_one_of_keywords(SHOW_THING_KEYWORDS)?]);
    let from_table = if cursor.peek_is_keyword("FROM") || cursor.peek_is_keyword("IN") {
        cursor.expect_one_of_keywords(&["FROM", "IN"])?;
        Some(crate::tables::parse_table_name(cursor)?)
    } else {
        None
    };
    let filter = if cursor.peek_is_keyword("LIKE") || cursor.peek_is_keyword("WHERE") {
        let kw = cursor.expect_one_of_keywords(&["LIKE", "WHERE"])?;
        let condition = parse_expression(cursor)?;
        Some(ShowFilter { kw, condition })
    } else {
        None
    };
    Ok(ShowStatement { show_kw, kwseq, from_table, filter })
}

/// `EXPLAIN`/`DESCRIBE`/`DESC`, dispatched on what follows: a query
/// (`ExplainStatement`) or a bare table name. The latter form
/// (`DESCRIBE t`, MySQL's column-listing shorthand) has no query to
/// explain, so it's modeled as a `ShowStatement` with an empty `kwseq`
/// and the table in `from_table` — `ExplainTarget` has no bare-table
/// variant, and inventing one just for this shorthand isn't worth a
/// dedicated node (spec's Open Question (c) analogue).
pub fn parse_explain_or_describe(cursor: &mut Cursor) -> Result<super::ExplainOrDescribe, ParseError> {
    let explain_kw = cursor.expect_one_of_keywords(&["EXPLAIN", "DESCRIBE", "DESC"])?;
    if !explain_kw.0.text.eq_ignore_ascii_case("EXPLAIN") && !looks_like_statement_start(cursor) {
        let from_table = Some(crate::tables::parse_table_name(cursor)?);
        return Ok(super::ExplainOrDescribe::Show(ShowStatement {
            show_kw: explain_kw,
            kwseq: KeywordSequence::new(Vec::new()),
            from_table,
            filter: None,
        }));
    }
    let format_clause = if cursor.peek_is_keyword("FORMAT") {
        let format_kw = cursor.expect_keyword("FORMAT")?;
        let eq = cursor.expect_punctuation("=")?;
        let _ = eq;
        let value_kw = sqltree_tree::Keyword(cursor.identifier()?);
        Some(KeywordSequence::new(vec![format_kw, value_kw]))
    } else {
        None
    };
    let target = match () {
        _ if cursor.peek_is_keyword("DELETE") => ExplainTarget::Delete(Box::new(crate::dml::parse_delete(cursor)?)),
        _ if cursor.peek_is_keyword("UPDATE") => ExplainTarget::Update(Box::new(crate::dml::parse_update(cursor)?)),
        _ if cursor.peek_is_keyword("INSERT") => ExplainTarget::Insert(Box::new(crate::dml::parse_insert(cursor)?)),
        _ => ExplainTarget::Select(crate::select::parse_subselect(cursor)?),
    };
    Ok(super::ExplainOrDescribe::Explain(ExplainStatement { explain_kw, format_clause, target }))
}

fn looks_like_statement_start(cursor: &Cursor) -> bool {
    cursor.peek_is_keyword("SELECT")
        || cursor.peek_is_keyword("WITH")
        || cursor.peek_is_keyword("DELETE")
        || cursor.peek_is_keyword("UPDATE")
        || cursor.peek_is_keyword("INSERT")
}

fn parse_flush_option(cursor: &mut Cursor) -> Result<FlushOption, ParseError> {
    if cursor.peek_is_keyword("TABLES") {
        let tables_kw = cursor.expect_keyword("TABLES")?;
        let mut keywords = vec![tables_kw];
        let names = if cursor.peek().kind == sqltree_core::TokenKind::Identifier
            || cursor.peek().kind == sqltree_core::TokenKind::Keyword && !cursor.peek_is_keyword("WITH")
        {
            cursor.parse_comma_separated(crate::tables::parse_table_name)?
        } else {
            Vec::new()
        };
        if let Some(seq) = cursor.maybe_consume_keyword_sequence(&["WITH", "READ", "LOCK"]) {
            keywords.extend(seq.0);
        }
        return Ok(FlushOption::Tables { kwseq: KeywordSequence::new(keywords), names });
    }
    let kw = cursor.expect_one_of_keywords(&["HOSTS", "LOGS", "PRIVILEGES", "STATUS", "USER_RESOURCES"])?;
    Ok(FlushOption::Other(KeywordSequence::new(vec![kw])))
}

pub fn parse_flush(cursor: &mut Cursor) -> Result<Flush, ParseError> {
    let flush_kw = cursor.expect_keyword("FLUSH")?;
    let options = cursor.parse_comma_separated(parse_flush_option)?;
    Ok(Flush { flush_kw, options })
}

pub fn parse_start_transaction(cursor: &mut Cursor) -> Result<StartTransaction, ParseError> {
    let kwseq = cursor.expect_keyword_sequence(&["START", "TRANSACTION"])?;
    Ok(StartTransaction { kwseq })
}

/// `BEGIN`, `COMMIT [WORK]`, `ROLLBACK [WORK]` — fully captured by their
/// keyword sequence.
pub fn parse_simple_statement(cursor: &mut Cursor, lead: &str) -> Result<SimpleStatement, ParseError> {
    let lead_kw = cursor.expect_keyword(lead)?;
    let mut keywords = vec![lead_kw];
    if let Some(work) = cursor.maybe_consume_keyword("WORK") {
        keywords.push(work);
    }
    Ok(SimpleStatement { kwseq: KeywordSequence::new(keywords) })
}
