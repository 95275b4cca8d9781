//! Gettext PO catalogs.
//!
//! - [`parse_template`]: reads a translated catalog to merge from (via `polib`)
//! - [`write_catalog`] / [`render_catalog`]: serializes a conversion result

mod reader;
mod writer;

pub use reader::parse_template;
pub use writer::{render_catalog, write_catalog};

/// Escapes text for use inside a PO string literal.
pub(crate) fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\t' => escaped.push_str("\\t"),
            other => escaped.push(other),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_special_characters() {
        assert_eq!(escape("say \"hi\""), "say \\\"hi\\\"");
        assert_eq!(escape("a\\b"), "a\\\\b");
        assert_eq!(escape("line\nnext\ttab"), "line\\nnext\\ttab");
    }
}
