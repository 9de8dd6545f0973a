//! Syntax highlighting for editors.
//!
//! Re-lexes the source and wraps the stretch of input between each token
//! and the next in a `<span>` classed by the token kind. Spans cover the
//! lexer's canonicalized buffer, so the output reproduces every character
//! of the document and can be laid over a plain `<textarea>`.

use std::sync::LazyLock;

use regex::{Captures, Regex};
use runic_lexer::{Lexer, Token, TokenKind};

/// A leading or trailing blank, or a run of two or more.
static SIGNIFICANT_SPACE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[ \t\x0C\r]|[ \t\x0C\r]{2,}|[ \t\x0C\r]$").expect("whitespace pattern is valid")
});

/// Markup produced around and inside highlight spans.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighlightConfig {
    /// Prepended to the token class, e.g. `runic__` gives `runic__text`.
    pub class_prefix: String,
    /// Emitted once per significant whitespace character.
    pub space_marker: String,
    /// Emitted for every newline.
    pub line_break_marker: String,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            class_prefix: "runic__".into(),
            space_marker: "&nbsp;".into(),
            line_break_marker: "<br>".into(),
        }
    }
}

/// Highlight `source`, producing one span per token.
///
/// Terminators are emitted without a wrapping span. The first token's span
/// always starts at offset 0 so leading whitespace is kept.
pub fn highlight(source: &str, config: &HighlightConfig) -> String {
    let mut lexer = Lexer::new(source);
    let tokens: Vec<Token> = lexer.by_ref().collect();
    let buffer = lexer.buffer();

    let mut out = String::new();
    let mut start = 0;
    for pair in tokens.windows(2) {
        let (token, next) = (&pair[0], &pair[1]);
        let end = next.span.offset;
        let body = sanitize(buffer.get(start..end).unwrap_or_default(), config);

        match class_name(&token.kind) {
            Some(class) => out.push_str(&format!(
                "<span class=\"{}{class}\">{body}</span>",
                config.class_prefix
            )),
            None => out.push_str(&body),
        }
        start = end;
    }

    log::trace!("highlighted {} tokens", tokens.len());
    out
}

fn class_name(kind: &TokenKind) -> Option<&'static str> {
    match kind {
        TokenKind::Text(_) => Some("text"),
        TokenKind::Heading(_) => Some("heading"),
        TokenKind::Tag(_) => Some("tag"),
        TokenKind::OpeningSquare => Some("osq"),
        TokenKind::ClosingSquare => Some("csq"),
        TokenKind::Bulletpoint { .. } => Some("bulletpoint"),
        TokenKind::Terminator | TokenKind::Eof => None,
    }
}

/// Escape a slice of source and make its line breaks and significant
/// whitespace visible in HTML.
fn sanitize(slice: &str, config: &HighlightConfig) -> String {
    let escaped = crate::escape_html(slice).replace('\n', &config.line_break_marker);
    SIGNIFICANT_SPACE
        .replace_all(&escaped, |caps: &Captures| {
            config.space_marker.repeat(caps[0].chars().count())
        })
        .into_owned()
}
