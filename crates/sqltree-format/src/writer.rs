//! The speculative line-buffer writer underlying every `write_*` call in
//! this crate.
//!
//! `lines` is an append-only stack of line buffers, each a stack of text
//! pieces; `write_comma_list`'s checkpoint/restore is an O(1) truncation
//! of both stacks rather than a recomputation of already-emitted siblings.

use sqltree_core::{Dialect, Token};

pub const INDENT_STEP: usize = 4;

/// The non-fatal control-flow signal a `write` raises when, under
/// `can_split`, the current line has grown past `line_length`. Caught only
/// by the nearest enclosing `write_comma_list`.
#[derive(Debug, Clone, Copy)]
pub struct LineTooLong;

pub type WriteResult = Result<(), LineTooLong>;

/// Opaque checkpoint captured before a speculative single-line attempt;
/// `restore` truncates back to exactly this point in O(1).
struct Checkpoint {
    num_lines: usize,
    num_pieces: usize,
    current_line_length: usize,
}

pub struct Writer<'a> {
    pub dialect: &'a Dialect,
    line_length: usize,
    base_indent: usize,
    lines: Vec<Vec<String>>,
    current_indent: usize,
    current_line_length: usize,
    can_split: bool,
    line_has_content: bool,
    should_skip_comments: bool,
}

impl<'a> Writer<'a> {
    pub fn new(dialect: &'a Dialect, line_length: usize, base_indent: usize) -> Self {
        Writer {
            dialect,
            line_length,
            base_indent,
            lines: Vec::new(),
            current_indent: base_indent,
            current_line_length: 0,
            can_split: false,
            line_has_content: false,
            should_skip_comments: false,
        }
    }

    /// Joins every buffered piece into the final string: `indent` wraps
    /// the whole result in a leading newline / trailing indent block
    /// when nonzero.
    pub fn finish(self) -> String {
        let sql: String = self.lines.into_iter().flatten().collect();
        if self.base_indent > 0 {
            format!("\n{sql}\n{}", " ".repeat(self.base_indent.saturating_sub(INDENT_STEP)))
        } else {
            format!("{sql}\n")
        }
    }

    fn checkpoint(&self) -> Checkpoint {
        let num_pieces = self.lines.last().map_or(0, Vec::len);
        Checkpoint { num_lines: self.lines.len(), num_pieces, current_line_length: self.current_line_length }
    }

    fn restore(&mut self, cp: Checkpoint) {
        self.lines.truncate(cp.num_lines);
        if let Some(last) = self.lines.last_mut() {
            last.truncate(cp.num_pieces);
        }
        self.current_line_length = cp.current_line_length;
    }

    pub fn write(&mut self, text: impl Into<String>) -> WriteResult {
        if self.lines.is_empty() {
            self.start_new_line();
        }
        let text = text.into();
        self.current_line_length += text.len();
        self.lines.last_mut().expect("start_new_line always pushes a line").push(text);
        self.line_has_content = true;
        if self.can_split && self.current_line_length > self.line_length {
            return Err(LineTooLong);
        }
        Ok(())
    }

    pub fn add_space(&mut self) -> WriteResult {
        if let Some(last_piece) = self.lines.last().and_then(|l| l.last()) {
            if !last_piece.ends_with(' ') {
                return self.write(" ");
            }
        }
        Ok(())
    }

    pub fn start_new_line(&mut self) {
        if !self.lines.is_empty() && !self.line_has_content {
            return;
        }
        if let Some(last) = self.lines.last_mut() {
            if last.iter().any(|piece| !piece.chars().all(char::is_whitespace)) {
                last.push("\n".to_string());
            }
        }
        self.current_line_length = self.current_indent;
        self.line_has_content = false;
        let mut line = Vec::new();
        if self.current_indent > 0 {
            line.push(" ".repeat(self.current_indent));
        }
        self.lines.push(line);
    }

    /// Indents in place on the current (empty) line rather than starting a
    /// fresh one, used by the multi-line boolean-operator layout to align
    /// the first operand under the already-written introducer keyword.
    pub fn force_indentation(&mut self) {
        if self.line_has_content {
            self.start_new_line();
        } else {
            let needed = self.current_indent.saturating_sub(self.current_line_length);
            if let Some(last) = self.lines.last_mut() {
                last.push(" ".repeat(needed));
            }
            self.current_line_length = self.current_indent;
        }
    }

    pub fn clear_trailing_space(&mut self) {
        if let Some(last) = self.lines.last_mut() {
            if let Some(piece) = last.last_mut() {
                if piece.ends_with(' ') {
                    piece.pop();
                    self.current_line_length -= 1;
                }
            }
        }
    }

    /// Runs `f` with the indent bumped by one step, a scope-guarded
    /// closure standing in for a context-manager-style indent block.
    pub fn with_indent<T>(&mut self, f: impl FnOnce(&mut Self) -> T) -> T {
        self.current_indent += INDENT_STEP;
        let result = f(self);
        self.current_indent -= INDENT_STEP;
        result
    }

    pub fn with_skip_comments<T>(&mut self, f: impl FnOnce(&mut Self) -> T) -> T {
        let previous = self.should_skip_comments;
        self.should_skip_comments = true;
        let result = f(self);
        self.should_skip_comments = previous;
        result
    }

    pub fn should_skip_comments(&self) -> bool {
        self.should_skip_comments
    }

    pub fn add_comments(&mut self, comments: &[Token]) -> WriteResult {
        if self.should_skip_comments {
            return Ok(());
        }
        if !comments.is_empty() {
            self.add_space()?;
        }
        for comment in comments {
            self.write(comment.text.trim_end_matches('\n').to_string())?;
            self.start_new_line();
        }
        Ok(())
    }

    /// The core split decision for comma-separated lists. Attempts the
    /// whole list on one line first; if
    /// that overflows and an enclosing list hasn't already committed to
    /// splitting, falls back to one element per line at `indent + 4`.
    pub fn write_comma_list<T>(
        &mut self,
        items: &[T],
        with_space: bool,
        mut visit_item: impl FnMut(&mut Self, &T) -> WriteResult,
    ) -> WriteResult {
        let checkpoint = self.checkpoint();
        let previous_can_split = self.can_split;
        self.can_split = true;
        let attempt: WriteResult = (|| {
            if with_space && !items.is_empty() {
                self.add_space()?;
            }
            for item in items {
                visit_item(self, item)?;
            }
            Ok(())
        })();
        self.can_split = previous_can_split;
        if attempt.is_ok() {
            return Ok(());
        }
        if previous_can_split {
            // An enclosing list is still speculating; let it split first.
            return Err(LineTooLong);
        }
        self.restore(checkpoint);
        self.with_indent(|w| -> WriteResult {
            for item in items {
                w.start_new_line();
                visit_item(w, item)?;
                w.clear_trailing_space();
            }
            Ok(())
        })?;
        self.start_new_line();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqltree_core::Dialect;

    fn write_items(line_length: usize, items: &[&str]) -> String {
        let dialect = Dialect::mysql();
        let mut w = Writer::new(&dialect, line_length, 0);
        w.write("SELECT").unwrap();
        w.write_comma_list(items, true, |w, item| {
            w.write(item.to_string())?;
            w.write(",").map(|_| ()).or(Ok(()))
        })
        .unwrap();
        w.finish()
    }

    #[test]
    fn short_list_stays_on_one_line() {
        let out = write_items(88, &["a", "b", "c"]);
        assert_eq!(out, "SELECT a,b,c,\n");
    }

    #[test]
    fn overlong_list_falls_back_to_one_item_per_line() {
        let dialect = Dialect::mysql();
        let mut w = Writer::new(&dialect, 10, 0);
        w.write("SELECT").unwrap();
        w.write_comma_list(&["aaaaaaaaaa", "bbbbbbbbbb"], true, |w, item: &&str| w.write(item.to_string())).unwrap();
        w.write(")").unwrap();
        let out = w.finish();
        assert_eq!(out, "SELECT\n    aaaaaaaaaa\n    bbbbbbbbbb\n)\n");
    }

    #[test]
    fn restore_after_failed_attempt_does_not_duplicate_already_emitted_pieces() {
        let dialect = Dialect::mysql();
        let mut w = Writer::new(&dialect, 1, 0);
        w.write_comma_list(&["x", "y"], false, |w, item: &&str| w.write(item.to_string())).unwrap();
        w.write(")").unwrap();
        let out = w.finish();
        assert_eq!(out, "    x\n    y\n)\n");
    }

    #[test]
    fn list_that_fits_never_invokes_the_split_fallback() {
        let dialect = Dialect::mysql();
        let mut w = Writer::new(&dialect, 88, 0);
        w.write_comma_list(&[1, 2], false, |w, _| w.write("z")).unwrap();
        assert_eq!(w.finish(), "zz\n");
    }
}
