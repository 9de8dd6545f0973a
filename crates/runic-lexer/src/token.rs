use serde::Serialize;

/// A position in the lexer's canonicalized buffer.
///
/// `offset` is a byte offset into [`Lexer::buffer`](crate::Lexer::buffer),
/// not into the string originally handed to the lexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Span {
    pub offset: usize,
    pub line: usize,
}

impl Span {
    pub fn new(offset: usize, line: usize) -> Self {
        Self { offset, line }
    }
}

/// Token classification for Runic source.
///
/// Data-carrying variants embed their value directly (no separate `value` field on Token).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "value")]
pub enum TokenKind {
    /// A run of plain text, whitespace-normalized.
    Text(String),
    /// Heading punctuation (`.`, `:`, `:.` ...), at most three characters.
    Heading(String),
    /// The name written before an inline `[`, e.g. `bold`.
    Tag(String),
    OpeningSquare,
    ClosingSquare,
    /// A list bullet; `indent` is the number of spaces in front of it.
    Bulletpoint { indent: usize },
    /// End of a paragraph, heading or list.
    Terminator,
    Eof,
}

/// A token produced by the Runic lexer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// The literal characters this token stands for.
    pub fn value(&self) -> &str {
        match &self.kind {
            TokenKind::Text(value) | TokenKind::Heading(value) | TokenKind::Tag(value) => value,
            TokenKind::OpeningSquare => "[",
            TokenKind::ClosingSquare => "]",
            TokenKind::Bulletpoint { .. } => "-",
            TokenKind::Terminator => "\n",
            TokenKind::Eof => "",
        }
    }

    /// Leading spaces counted in front of a bullet, 0 for every other token.
    pub fn indent(&self) -> usize {
        match self.kind {
            TokenKind::Bulletpoint { indent } => indent,
            _ => 0,
        }
    }

    pub fn is_eof(&self) -> bool {
        self.kind == TokenKind::Eof
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_value_of_data_tokens() {
        let token = Token::new(TokenKind::Heading(":.".into()), Span::new(0, 1));
        assert_eq!(token.value(), ":.");
        let token = Token::new(TokenKind::Tag("bold".into()), Span::new(4, 1));
        assert_eq!(token.value(), "bold");
    }

    #[test]
    fn test_value_of_punctuation_tokens() {
        let span = Span::new(0, 1);
        assert_eq!(Token::new(TokenKind::OpeningSquare, span).value(), "[");
        assert_eq!(Token::new(TokenKind::ClosingSquare, span).value(), "]");
        assert_eq!(Token::new(TokenKind::Terminator, span).value(), "\n");
        assert_eq!(Token::new(TokenKind::Eof, span).value(), "");
        assert_eq!(
            Token::new(TokenKind::Bulletpoint { indent: 4 }, span).value(),
            "-"
        );
    }

    #[test]
    fn test_indent_only_for_bullets() {
        let span = Span::new(0, 1);
        assert_eq!(Token::new(TokenKind::Bulletpoint { indent: 6 }, span).indent(), 6);
        assert_eq!(Token::new(TokenKind::Text("a".into()), span).indent(), 0);
    }

    #[test]
    fn test_serialize_token() {
        let token = Token::new(TokenKind::Bulletpoint { indent: 2 }, Span::new(3, 2));
        let json = serde_json::to_string(&token).unwrap();
        assert_eq!(
            json,
            r#"{"kind":{"type":"Bulletpoint","value":{"indent":2}},"span":{"offset":3,"line":2}}"#
        );
    }
}
