//! Output-discipline rules for leaf text: keyword case, string-literal
//! re-quoting, and identifier quoting.

use sqltree_core::Dialect;

/// Re-quotes a string-literal token's exact source text (which still
/// carries its original opening/closing quote character and any
/// doubled-quote escapes, per `sqltree_core::tokenizer::consume_string`)
/// into the canonical single-quoted form with `'` doubled internally.
pub fn render_string_literal(token_text: &str) -> String {
    let mut chars = token_text.chars();
    let quote = chars.next().expect("string literal token is never empty");
    let inner = &token_text[quote.len_utf8()..token_text.len() - quote.len_utf8()];
    let doubled = quote.to_string().repeat(2);
    let value = inner.replace(&doubled, &quote.to_string());
    let escaped = value.replace('\'', "''");
    format!("'{escaped}'")
}

/// Exact numeric precision is preserved as the original lexeme: no
/// case-folding or reformatting of the digits.
pub fn render_numeric_literal(token_text: &str) -> String {
    token_text.to_string()
}

/// An identifier is quoted when it collides with a reserved keyword or
/// contains any character outside `[A-Za-z0-9_]`.
pub fn render_identifier(text: &str, dialect: &Dialect) -> String {
    let needs_quoting = dialect.reserved_keywords().contains(text.to_ascii_uppercase().as_str())
        || text.chars().any(|c| !c.is_alphanumeric() && c != '_');
    if needs_quoting {
        let q = dialect.identifier_quote();
        format!("{q}{text}{q}")
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn doubles_internal_single_quotes() {
        assert_eq!(render_string_literal("'it''s'"), "'it''s'");
    }

    #[test]
    fn reescapes_double_quoted_source_to_single_quotes() {
        assert_eq!(render_string_literal("\"say \"\"hi\"\"\""), "'say \"hi\"'");
    }

    #[test]
    fn plain_identifier_is_unquoted() {
        let dialect = Dialect::mysql();
        assert_eq!(render_identifier("my_col", &dialect), "my_col");
    }

    #[test]
    fn reserved_word_identifier_is_quoted() {
        let dialect = Dialect::mysql();
        assert_eq!(render_identifier("select", &dialect), "`select`");
    }

    #[test]
    fn identifier_with_punctuation_is_quoted() {
        let dialect = Dialect::mysql();
        assert_eq!(render_identifier("weird-name", &dialect), "`weird-name`");
    }
}
