//! Recursive-descent/Pratt parser building the sqltree CST from a mangled
//! token stream. `parse` is the sole public entry point; everything else
//! is reached through the statement dispatch table below.

mod cursor;
mod ddl;
mod dml;
mod errors;
mod expr;
mod misc;
mod select;
mod tables;

pub use cursor::Cursor;
pub use errors::ParseError;

use sqltree_core::{Dialect, TokenKind};
use sqltree_tree::{ParsedStatement, ShowStatement, Statement};

/// `DESCRIBE`/`DESC` with a bare table name dispatches to `ShowStatement`
/// (no query follows); with a statement following, it dispatches to
/// `ExplainStatement`. `EXPLAIN` always takes the latter path. See
/// `misc::parse_explain_or_describe`'s doc comment.
enum ExplainOrDescribe {
    Show(ShowStatement),
    Explain(sqltree_tree::ExplainStatement),
}

/// Tokenize, distinguish keywords, mangle, then parse one statement. The
/// first non-comment token selects a statement parser by upper-cased
/// text; after the statement body the parser requires `eof`.
pub fn parse(sql: &str, dialect: &Dialect) -> Result<ParsedStatement, ParseError> {
    let tokens = sqltree_core::lex(sql, dialect).map_err(|e| ParseError::new(e.message().to_string(), e.location().clone()))?;
    let mut cursor = Cursor::new(tokens, dialect);
    parse_statement(&mut cursor)
}

fn parse_statement(cursor: &mut Cursor) -> Result<ParsedStatement, ParseError> {
    let mut leading_comments = Vec::new();
    while cursor.peek().kind == TokenKind::Comment {
        leading_comments.push(cursor.advance_any());
    }
    let statement = dispatch_statement(cursor)?;
    if !cursor.at_eof() {
        return Err(ParseError::from_unexpected_token("end of statement", cursor.peek()));
    }
    Ok(ParsedStatement { leading_comments, statement })
}

/// Selects a statement parser by the first token's upper-cased text, or by
/// a leading `(` (parenthesized subselect / UNION).
fn dispatch_statement(cursor: &mut Cursor) -> Result<Statement, ParseError> {
    if cursor.peek_is_punctuation("(") {
        return Ok(Statement::Select(select::parse_subselect(cursor)?));
    }
    let tok = cursor.peek();
    if !matches!(tok.kind, TokenKind::Keyword | TokenKind::Identifier) {
        return Err(ParseError::from_unexpected_token("a statement", tok));
    }
    let upper = tok.text.to_ascii_uppercase();
    match upper.as_str() {
        "SELECT" | "WITH" => Ok(Statement::Select(select::parse_subselect(cursor)?)),
        "UPDATE" => Ok(Statement::Update(dml::parse_update(cursor)?)),
        "DELETE" => Ok(Statement::Delete(dml::parse_delete(cursor)?)),
        "INSERT" => Ok(Statement::Insert(dml::parse_insert(cursor)?)),
        "REPLACE" => Ok(Statement::Replace(dml::parse_replace(cursor)?)),
        "START" => Ok(Statement::StartTransaction(misc::parse_start_transaction(cursor)?)),
        "BEGIN" => Ok(Statement::Simple(misc::parse_simple_statement(cursor, "BEGIN")?)),
        "COMMIT" => Ok(Statement::Simple(misc::parse_simple_statement(cursor, "COMMIT")?)),
        "ROLLBACK" => Ok(Statement::Simple(misc::parse_simple_statement(cursor, "ROLLBACK")?)),
        "DROP" => Ok(Statement::Drop(ddl::parse_drop(cursor)?)),
        "SHOW" => Ok(Statement::Show(misc::parse_show(cursor)?)),
        "EXPLAIN" | "DESCRIBE" | "DESC" => match misc::parse_explain_or_describe(cursor)? {
            ExplainOrDescribe::Show(show) => Ok(Statement::Show(show)),
            ExplainOrDescribe::Explain(explain) => Ok(Statement::Explain(explain)),
        },
        "FLUSH" => Ok(Statement::Flush(misc::parse_flush(cursor)?)),
        "TRUNCATE" => Ok(Statement::Truncate(ddl::parse_truncate(cursor)?)),
        "CREATE" => Ok(Statement::Create(ddl::parse_create(cursor)?)),
        "RENAME" => Ok(Statement::RenameTable(ddl::parse_rename_table(cursor)?)),
        "SET" => Ok(Statement::Set(misc::parse_set(cursor)?)),
        _ => Err(ParseError::from_unexpected_token("a statement keyword", tok)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqltree_tree::Statement;

    fn mysql() -> Dialect {
        Dialect::mysql()
    }

    #[test]
    fn parses_simple_select() {
        let parsed = parse("SELECT 1", &mysql()).unwrap();
        assert!(matches!(parsed.statement, Statement::Select(_)));
    }

    #[test]
    fn parses_parenthesized_select_statement() {
        let parsed = parse("(SELECT 1)", &mysql()).unwrap();
        assert!(matches!(parsed.statement, Statement::Select(_)));
    }

    #[test]
    fn trailing_garbage_is_a_parse_error() {
        let err = parse("SELECT 1 garbage", &mysql()).unwrap_err();
        assert!(err.message().contains("end of statement"));
    }

    #[test]
    fn leading_comment_is_detached() {
        let parsed = parse("-- hello\nSELECT 1", &mysql()).unwrap();
        assert_eq!(parsed.leading_comments.len(), 1);
        assert!(matches!(parsed.statement, Statement::Select(_)));
    }

    #[test]
    fn dispatches_every_statement_keyword() {
        let cases: &[(&str, fn(&Statement) -> bool)] = &[
            ("SELECT 1", |s| matches!(s, Statement::Select(_))),
            ("DELETE FROM t", |s| matches!(s, Statement::Delete(_))),
            ("UPDATE t SET x = 1", |s| matches!(s, Statement::Update(_))),
            ("INSERT INTO t VALUES (1)", |s| matches!(s, Statement::Insert(_))),
            ("REPLACE INTO t VALUES (1)", |s| matches!(s, Statement::Replace(_))),
            ("START TRANSACTION", |s| matches!(s, Statement::StartTransaction(_))),
            ("COMMIT", |s| matches!(s, Statement::Simple(_))),
            ("ROLLBACK", |s| matches!(s, Statement::Simple(_))),
            ("DROP TABLE t", |s| matches!(s, Statement::Drop(_))),
            ("TRUNCATE TABLE t", |s| matches!(s, Statement::Truncate(_))),
            ("RENAME TABLE a TO b", |s| matches!(s, Statement::RenameTable(_))),
            ("SET x = 1", |s| matches!(s, Statement::Set(_))),
            ("SHOW TABLES", |s| matches!(s, Statement::Show(_))),
            ("EXPLAIN SELECT 1", |s| matches!(s, Statement::Explain(_))),
            ("DESCRIBE t", |s| matches!(s, Statement::Show(_))),
            ("FLUSH TABLES", |s| matches!(s, Statement::Flush(_))),
            ("CREATE TABLE t (a int)", |s| matches!(s, Statement::Create(_))),
        ];
        for (sql, check) in cases {
            let parsed = parse(sql, &mysql()).unwrap_or_else(|e| panic!("{sql}: {e}"));
            assert!(check(&parsed.statement), "unexpected shape for {sql}");
        }
    }
}
