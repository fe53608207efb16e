//! Constraint-driven pretty-printer and table-extraction helper
//! (`get_tables`) over the `sqltree-tree` CST.
//!
//! This crate depends only on the CST, not on `sqltree-parser`: it knows
//! how to re-emit a tree that already exists, not how to build one.

mod clauses;
mod expr;
mod get_tables;
mod literal;
mod statements;
mod tables;
mod writer;

pub use get_tables::get_tables;
pub use writer::{LineTooLong, Writer, WriteResult, INDENT_STEP};

use sqltree_core::Dialect;
use sqltree_tree::ParsedStatement;

/// Default target line width.
pub const DEFAULT_LINE_LENGTH: usize = 88;

/// Re-emits a parsed statement as canonical SQL.
///
/// `indent` is the base indentation, in spaces, applied to every emitted
/// line; nonzero values are used when splicing the result into an
/// already-indented host document.
pub fn format_tree(parsed: &ParsedStatement, dialect: &Dialect, line_length: usize, indent: usize) -> String {
    let mut writer = Writer::new(dialect, line_length, indent);
    statements::write_parsed_statement(&mut writer, parsed)
        .expect("top-level write is never run under can_split, so it cannot raise LineTooLong");
    writer.finish()
}
