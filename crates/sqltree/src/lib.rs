//! Facade crate unifying the tokenizer/parser/formatter stack behind four
//! entry points: `sqltree`, `format`, `format_tree`, and `get_tables`.

use thiserror::Error;

pub use sqltree_core::Dialect;
pub use sqltree_format::DEFAULT_LINE_LENGTH;
pub use sqltree_parser::ParseError;
pub use sqltree_tree::Statement;

/// Unifies every error kind the stack can raise: the tokenizer's own
/// error is already folded into `ParseError` by `sqltree_parser::parse`,
/// so there is a single variant today; the enum shape leaves room for a
/// future independent tokenizer entry point without breaking callers.
#[derive(Debug, Error)]
pub enum SqlTreeError {
    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// Parses `sql` under `dialect` and returns its statement tree, discarding
/// any comments that precede the first token (callers who need those use
/// `sqltree_parser::parse` directly for the full `ParsedStatement`).
pub fn sqltree(sql: &str, dialect: &Dialect) -> Result<Statement, SqlTreeError> {
    Ok(sqltree_parser::parse(sql, dialect)?.statement)
}

/// Parses and re-emits `sql` as canonical SQL.
pub fn format(sql: &str, dialect: &Dialect, line_length: usize, indent: usize) -> Result<String, SqlTreeError> {
    let parsed = sqltree_parser::parse(sql, dialect)?;
    Ok(sqltree_format::format_tree(&parsed, dialect, line_length, indent))
}

/// Re-emits an already-parsed statement as canonical SQL, for callers
/// that built or transformed a tree with `sqltree` first.
pub fn format_tree(statement: &Statement, dialect: &Dialect, line_length: usize, indent: usize) -> String {
    let parsed = sqltree_tree::ParsedStatement { leading_comments: Vec::new(), statement: statement.clone() };
    sqltree_format::format_tree(&parsed, dialect, line_length, indent)
}

/// Finds every table `sql` references, in source order.
pub fn get_tables(sql: &str, dialect: &Dialect) -> Result<Vec<String>, SqlTreeError> {
    let parsed = sqltree_parser::parse(sql, dialect)?;
    Ok(sqltree_format::get_tables(&parsed))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn select_star_normalizes_from_keyword_case_and_star_spacing() {
        let dialect = Dialect::mysql();
        assert_eq!(format("SELECT * from x", &dialect, 88, 0).unwrap(), "SELECT *\nFROM x\n");
    }

    #[test]
    fn insert_select_collects_tables_in_source_order() {
        let dialect = Dialect::mysql();
        assert_eq!(get_tables("INSERT INTO x(a,b) SELECT * FROM y", &dialect).unwrap(), vec!["x", "y"]);
    }

    #[test]
    fn malformed_sql_surfaces_as_sqltree_error() {
        let dialect = Dialect::mysql();
        assert!(format("SELECT FROM", &dialect, 88, 0).is_err());
    }
}
