//! Runic Code Generator
//!
//! Renders Runic source into two outputs: HTML for the document itself and
//! highlight markup for an editor overlay.
//!
//! ```text
//! source → Parser::parse() → html::generate()      → HTML
//! source → Lexer            → highlight::highlight() → highlight spans
//! ```

pub mod highlight;
pub mod html;

pub use highlight::HighlightConfig;

use runic_parser::Parser;
use serde::Serialize;

/// Both renderings of a document, as consumed by the browser editor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorData {
    pub html: String,
    pub highlight_text: String,
}

/// Parse `source` and render it as HTML.
pub fn to_html(source: &str) -> String {
    let tree = Parser::parse(source);
    if tree.has_errors() {
        log::debug!("rendering document with {} markup errors", tree.errors().len());
    }
    html::generate(&tree)
}

/// Highlight `source` with the default `runic__` classes.
pub fn highlight_text(source: &str) -> String {
    highlight::highlight(source, &HighlightConfig::default())
}

pub fn editor_data(source: &str) -> EditorData {
    EditorData {
        html: to_html(source),
        highlight_text: highlight_text(source),
    }
}

/// Escape the five HTML-significant characters.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("plain"), "plain");
        assert_eq!(
            escape_html("<a href=\"x\">Tom & 'Jerry'</a>"),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#39;Jerry&#39;&lt;/a&gt;"
        );
    }

    #[test]
    fn test_to_html() {
        assert_eq!(
            to_html(". Title\n\nSome bold[text]"),
            "<h1>Title</h1><p>Some <b>text</b></p>"
        );
    }

    #[test]
    fn test_editor_data() {
        let data = editor_data("bold[fox]");
        assert_eq!(data.html, "<p><b>fox</b></p>");
        assert_eq!(
            data.highlight_text,
            concat!(
                "<span class=\"runic__tag\">bold</span>",
                "<span class=\"runic__osq\">[</span>",
                "<span class=\"runic__text\">fox</span>",
                "<span class=\"runic__csq\">]</span>",
            )
        );
    }

    #[test]
    fn test_editor_data_json_keys() {
        let json = serde_json::to_value(editor_data("a")).unwrap();
        assert_eq!(json["html"], "<p>a</p>");
        assert_eq!(json["highlightText"], "<span class=\"runic__text\">a</span>");
    }
}
