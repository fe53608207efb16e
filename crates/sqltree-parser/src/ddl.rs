//! `CREATE TABLE`/`CREATE VIEW`/`CREATE INDEX`, `DROP`, `TRUNCATE`,
//! `RENAME TABLE` statement grammars.

use sqltree_core::TokenKind;
use sqltree_tree::{
    ColumnDef, CreateIndex, CreateStatement, CreateTable, CreateView, DropStatement, RenamePair,
    RenameTable, TruncateStatement,
};

use crate::cursor::Cursor;
use crate::errors::ParseError;
use crate::expr::parse_simple_expression;
use crate::tables::parse_table_name;

/// Column and table-option grammars vary enormously across dialects and
/// MySQL storage engines; rather than model every clause, a column
/// definition keeps its name and type typed and stores the remaining
/// modifiers (`NOT NULL`, `DEFAULT ...`, `AUTO_INCREMENT`, …) as the raw
/// token run up to the next comma or closing paren, still individually
/// reconstructible.
fn parse_raw_token_run(cursor: &mut Cursor) -> Vec<sqltree_core::Token> {
    let mut tokens = Vec::new();
    let mut depth = 0i32;
    loop {
        let tok = cursor.peek();
        if depth == 0 && (tok.is_punctuation(",") || tok.is_punctuation(")") || tok.kind == TokenKind::Eof) {
            break;
        }
        if tok.is_punctuation("(") {
            depth += 1;
        } else if tok.is_punctuation(")") {
            depth -= 1;
        }
        tokens.push(cursor.advance_any());
    }
    tokens
}

fn parse_column_def(cursor: &mut Cursor) -> Result<ColumnDef, ParseError> {
    let name = cursor.identifier()?;
    let type_name = parse_simple_expression(cursor)?;
    let rest = parse_raw_token_run(cursor);
    Ok(ColumnDef { name, type_name, rest })
}

fn parse_create_table(cursor: &mut Cursor, kwseq: sqltree_tree::KeywordSequence) -> Result<CreateTable, ParseError> {
    let if_not_exists = cursor.maybe_consume_keyword_sequence(&["IF", "NOT", "EXISTS"]);
    let table_name = parse_table_name(cursor)?;
    let left_paren = cursor.expect_punctuation("(")?;
    let columns = cursor.parse_comma_separated(parse_column_def)?;
    let right_paren = cursor.expect_punctuation(")")?;
    let table_options = parse_raw_token_run_to_eof(cursor);
    Ok(CreateTable { kwseq, if_not_exists, table_name, left_paren, columns, right_paren, table_options })
}

/// Trailing `ENGINE=...`/`WITH (...)`-style table options run to the end
/// of the statement; no closing delimiter bounds them.
fn parse_raw_token_run_to_eof(cursor: &mut Cursor) -> Vec<sqltree_core::Token> {
    let mut tokens = Vec::new();
    while cursor.peek().kind != TokenKind::Eof {
        tokens.push(cursor.advance_any());
    }
    tokens
}

fn parse_create_view(
    cursor: &mut Cursor,
    kwseq: sqltree_tree::KeywordSequence,
    or_replace: Option<sqltree_tree::KeywordSequence>,
) -> Result<CreateView, ParseError> {
    let view_name = parse_table_name(cursor)?;
    let col_names = if cursor.peek_is_punctuation("(") {
        let open_paren = cursor.expect_punctuation("(")?;
        let col_names = cursor.parse_comma_separated(|c| c.identifier())?;
        let close_paren = cursor.expect_punctuation(")")?;
        Some(sqltree_tree::ColNameList { open_paren, col_names, close_paren })
    } else {
        None
    };
    let as_kw = cursor.expect_keyword("AS")?;
    let query = crate::select::parse_subselect(cursor)?;
    Ok(CreateView { kwseq, or_replace, view_name, col_names, as_kw, query })
}

fn parse_create_index(cursor: &mut Cursor, kwseq: sqltree_tree::KeywordSequence) -> Result<CreateIndex, ParseError> {
    let index_name = cursor.identifier()?;
    let on_kw = cursor.expect_keyword("ON")?;
    let table_name = parse_table_name(cursor)?;
    let left_paren = cursor.expect_punctuation("(")?;
    let columns = cursor.parse_comma_separated(|c| c.identifier())?;
    let right_paren = cursor.expect_punctuation(")")?;
    Ok(CreateIndex { kwseq, index_name, on_kw, table_name, left_paren, columns, right_paren })
}

pub fn parse_create(cursor: &mut Cursor) -> Result<CreateStatement, ParseError> {
    let create_kw = cursor.expect_keyword("CREATE")?;
    if cursor.peek_is_keyword("INDEX") || cursor.peek_is_keyword("UNIQUE") {
        let mut keywords = vec![create_kw];
        if let Some(unique) = cursor.maybe_consume_keyword("UNIQUE") {
            keywords.push(unique);
        }
        keywords.push(cursor.expect_keyword("INDEX")?);
        return Ok(CreateStatement::Index(parse_create_index(cursor, sqltree_tree::KeywordSequence::new(keywords))?));
    }
    if cursor.peek_is_keyword("VIEW") || cursor.peek_is_keyword("OR") {
        let or_replace = cursor.maybe_consume_keyword_sequence(&["OR", "REPLACE"]);
        let view_kw = cursor.expect_keyword("VIEW")?;
        let kwseq = sqltree_tree::KeywordSequence::new(vec![create_kw, view_kw]);
        return Ok(CreateStatement::View(parse_create_view(cursor, kwseq, or_replace)?));
    }
    let mut keywords = vec![create_kw];
    if let Some(temp) = cursor.maybe_consume_keyword("TEMPORARY") {
        keywords.push(temp);
    }
    keywords.push(cursor.expect_keyword("TABLE")?);
    Ok(CreateStatement::Table(parse_create_table(cursor, sqltree_tree::KeywordSequence::new(keywords))?))
}

pub fn parse_drop(cursor: &mut Cursor) -> Result<DropStatement, ParseError> {
    let drop_kw = cursor.expect_keyword("DROP")?;
    let table_kw = cursor.expect_keyword("TABLE")?;
    let if_exists = cursor.maybe_consume_keyword_sequence(&["IF", "EXISTS"]);
    let names = cursor.parse_comma_separated(parse_table_name)?;
    let cascade_restrict = cursor
        .maybe_consume_keyword("CASCADE")
        .or_else(|| cursor.maybe_consume_keyword("RESTRICT"));
    Ok(DropStatement {
        kwseq: sqltree_tree::KeywordSequence::new(vec![drop_kw, table_kw]),
        if_exists,
        names,
        cascade_restrict,
    })
}

pub fn parse_truncate(cursor: &mut Cursor) -> Result<TruncateStatement, ParseError> {
    let truncate_kw = cursor.expect_keyword("TRUNCATE")?;
    let mut keywords = vec![truncate_kw];
    if let Some(table) = cursor.maybe_consume_keyword("TABLE") {
        keywords.push(table);
    }
    let table_name = parse_table_name(cursor)?;
    Ok(TruncateStatement { kwseq: sqltree_tree::KeywordSequence::new(keywords), table_name })
}

fn parse_rename_pair(cursor: &mut Cursor) -> Result<RenamePair, ParseError> {
    let from = parse_table_name(cursor)?;
    let to_kw = cursor.expect_keyword("TO")?;
    let to = parse_table_name(cursor)?;
    Ok(RenamePair { from, to_kw, to })
}

pub fn parse_rename_table(cursor: &mut Cursor) -> Result<RenameTable, ParseError> {
    let rename_kw = cursor.expect_keyword("RENAME")?;
    let table_kw = cursor.expect_keyword("TABLE")?;
    let pairs = cursor.parse_comma_separated(parse_rename_pair)?;
    Ok(RenameTable { kwseq: sqltree_tree::KeywordSequence::new(vec![rename_kw, table_kw]), pairs })
}
