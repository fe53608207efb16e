use std::rc::Rc;

/// A byte-exact span into a source string: `(source, start, end)` with `end`
/// inclusive. The synthetic end-of-file token is the one exception — its
/// span is a single virtual position at `source.len()`, pointing past the
/// last real byte, so that `end >= start` always holds.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Location {
    source: Rc<str>,
    pub start: usize,
    pub end: usize,
}

impl Location {
    pub fn new(source: Rc<str>, start: usize, end: usize) -> Self {
        debug_assert!(start <= end, "Location span must not be inverted");
        debug_assert!(end < source.len() || (start == source.len() && end == source.len()));
        Location { source, start, end }
    }

    pub fn eof(source: Rc<str>) -> Self {
        let len = source.len();
        Location { source, start: len, end: len }
    }

    /// Merge two locations into the span that covers both, inclusive.
    pub fn join(&self, other: &Location) -> Location {
        debug_assert!(Rc::ptr_eq(&self.source, &other.source) || *self.source == *other.source);
        Location {
            source: Rc::clone(&self.source),
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn text(&self) -> &str {
        if self.start == self.source.len() {
            return "";
        }
        &self.source[self.start..=self.end]
    }

    /// Render `"<message>\n<source excerpt underlined with carets>"`, the
    /// canonical shape every `ParseError`/`TokenizeError` uses for display.
    /// Handles spans that cross newlines by underlining the covered portion
    /// of every line the span touches.
    pub fn render(&self, message: &str) -> String {
        let mut out = String::new();
        out.push_str(message);
        out.push('\n');

        let text = &*self.source;
        let mut line_start = 0usize;
        let mut first = true;
        for line in text.split_inclusive('\n') {
            let line_end = line_start + line.len();
            let trimmed = line.trim_end_matches(['\n', '\r']);
            let covers = self.start < line_end && self.end >= line_start;
            if covers {
                if !first {
                    out.push('\n');
                }
                first = false;
                out.push_str(trimmed);
                out.push('\n');
                let caret_start = self.start.max(line_start) - line_start;
                let caret_end_excl = (self.end + 1).min(line_start + trimmed.len()) - line_start;
                let width = caret_end_excl.saturating_sub(caret_start).max(1);
                out.push_str(&" ".repeat(caret_start));
                out.push_str(&"^".repeat(width));
            }
            line_start = line_end;
        }
        if first {
            // Empty source / EOF pointing past everything.
            out.push('^');
        }
        out
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loc(source: &str, start: usize, end: usize) -> Location {
        Location::new(Rc::from(source), start, end)
    }

    #[test]
    fn text_is_inclusive_of_end() {
        let l = loc("select 1", 0, 5);
        assert_eq!(l.text(), "select");
    }

    #[test]
    fn join_spans_min_max() {
        let source: Rc<str> = Rc::from("a b c");
        let a = Location::new(Rc::clone(&source), 0, 0);
        let b = Location::new(Rc::clone(&source), 4, 4);
        let joined = a.join(&b);
        assert_eq!((joined.start, joined.end), (0, 4));
    }

    #[test]
    fn render_underlines_single_line() {
        let l = loc("select x from y", 7, 7);
        let rendered = l.render("unexpected identifier");
        let mut lines = rendered.lines();
        assert_eq!(lines.next(), Some("unexpected identifier"));
        assert_eq!(lines.next(), Some("select x from y"));
        let caret_line = lines.next().unwrap();
        assert_eq!(caret_line.trim_start().len(), 1);
        assert_eq!(caret_line.len() - caret_line.trim_start().len(), 7);
    }

    #[test]
    fn render_crosses_newline() {
        let l = loc("select x\nfrom y", 6, 11);
        let rendered = l.render("bad span");
        assert!(rendered.contains("select x\n"));
        assert!(rendered.contains("from y\n"));
    }
}
