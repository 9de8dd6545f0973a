use crate::token::{Span, Token, TokenKind};

const NEWLINE: char = '\n';
const DOT: char = '.';
const COLON: char = ':';
const OPENING_SQUARE: char = '[';
const CLOSING_SQUARE: char = ']';
const BACKSLASH: char = '\\';
const HYPHEN: char = '-';

/// Longest heading marker; a fourth punctuation character is plain text.
const MAX_HEADING_LEN: usize = 3;

/// What the lexer is looking at after the last `bump` or `backup`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Cursor {
    Char(char),
    /// Past the last character of the buffer.
    End,
    /// Backed up in front of the first character.
    Start,
}

impl Cursor {
    fn is(self, c: char) -> bool {
        self == Cursor::Char(c)
    }

    fn is_space(self) -> bool {
        matches!(self, Cursor::Char(c) if c.is_whitespace())
    }

    fn is_heading_char(self) -> bool {
        self.is(DOT) || self.is(COLON)
    }
}

/// Lexer states. Each state has exactly one handler; `advance` dispatches on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LexState {
    Global,
    Text,
    Heading,
    Terminator,
    Tag,
    OpeningSquare,
    ClosingSquare,
    Bullet,
    Done,
}

/// Kind of the token under construction. `None` means the handler produced nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DraftKind {
    None,
    Text,
    Heading,
    Tag,
    OpeningSquare,
    ClosingSquare,
    Bulletpoint,
    Terminator,
    Eof,
}

#[derive(Debug, Clone)]
struct Draft {
    kind: DraftKind,
    value: String,
    span: Span,
    indent: usize,
}

impl Draft {
    fn empty() -> Self {
        Self {
            kind: DraftKind::None,
            value: String::new(),
            span: Span::new(0, 0),
            indent: 0,
        }
    }

    fn into_token(self) -> Option<Token> {
        let kind = match self.kind {
            DraftKind::None => return None,
            DraftKind::Text if self.value.is_empty() => return None,
            DraftKind::Text => TokenKind::Text(self.value),
            DraftKind::Heading => TokenKind::Heading(self.value),
            DraftKind::Tag => TokenKind::Tag(self.value),
            DraftKind::OpeningSquare => TokenKind::OpeningSquare,
            DraftKind::ClosingSquare => TokenKind::ClosingSquare,
            DraftKind::Bulletpoint => TokenKind::Bulletpoint {
                indent: self.indent,
            },
            DraftKind::Terminator => TokenKind::Terminator,
            DraftKind::Eof => TokenKind::Eof,
        };
        Some(Token::new(kind, self.span))
    }
}

/// Runic source lexer.
///
/// A pull-driven, character-level state machine. Every call to
/// [`advance`](Lexer::advance) runs state handlers until one of them
/// produces a token.
///
/// The lexer owns a private copy of the input and canonicalizes whitespace
/// in it while reading: in a whitespace run that contains a newline, the
/// last character of the run is rewritten to `\n`. Token offsets point into
/// this canonicalized copy, available through [`buffer`](Lexer::buffer).
pub struct Lexer {
    buffer: String,
    pos: usize,
    line: usize,
    current: Cursor,
    state: LexState,
    draft: Draft,
    /// Newlines seen in the whitespace run being skipped.
    skipped_newlines: usize,
    /// Offset just past the last newline read. A bullet's indent is measured from here.
    line_start: usize,
    /// Candidate tag name: the letters read right before the cursor.
    tag: String,
    /// A single newline continues the current paragraph instead of ending it.
    continuous_newline: bool,
    in_list: bool,
    eof: Option<Token>,
    exhausted: bool,
}

impl Lexer {
    /// Create a new lexer over a private copy of `source`.
    pub fn new(source: &str) -> Self {
        Self {
            buffer: source.to_owned(),
            pos: 0,
            line: 1,
            current: Cursor::Start,
            state: LexState::Global,
            draft: Draft::empty(),
            skipped_newlines: 0,
            line_start: 0,
            tag: String::new(),
            continuous_newline: false,
            in_list: false,
            eof: None,
            exhausted: false,
        }
    }

    /// Tokenize the entire source, up to and including the `Eof` token.
    pub fn tokenize(source: &str) -> Vec<Token> {
        Lexer::new(source).collect()
    }

    /// The canonicalized input. Token offsets index into this string.
    ///
    /// Only the part up to the last produced token is final; callers that
    /// slice it should drain the lexer first.
    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    /// Produce the next token. Once the input is exhausted, every call
    /// returns the same `Eof` token.
    pub fn advance(&mut self) -> Token {
        loop {
            if let Some(eof) = &self.eof {
                return eof.clone();
            }

            match self.state {
                LexState::Global => self.lex_global(),
                LexState::Text => self.lex_text(),
                LexState::Heading => self.lex_heading(),
                LexState::Terminator => self.lex_terminator(),
                LexState::Tag => self.lex_tag(),
                LexState::OpeningSquare => self.lex_opening_square(),
                LexState::ClosingSquare => self.lex_closing_square(),
                LexState::Bullet => self.lex_bullet(),
                LexState::Done => {}
            }

            let draft = std::mem::replace(&mut self.draft, Draft::empty());
            if let Some(token) = draft.into_token() {
                log::trace!(
                    "token {:?} at {}:{}",
                    token.kind,
                    token.span.line,
                    token.span.offset
                );
                if token.is_eof() {
                    self.eof = Some(token.clone());
                }
                return token;
            }
        }
    }

    // --- State handlers ---

    /// Start of a block: skip whitespace and decide what kind of run follows.
    fn lex_global(&mut self) {
        self.draft = Draft::empty();
        self.continuous_newline = false;
        self.in_list = false;

        self.bump();
        match self.current {
            Cursor::Char(c) if c.is_whitespace() => {}
            Cursor::Char(BACKSLASH) => {
                self.backup();
                self.continuous_newline = true;
                self.state = LexState::Text;
            }
            Cursor::Char(DOT | COLON) => {
                self.backup();
                self.state = LexState::Heading;
            }
            Cursor::Char(HYPHEN) => {
                self.backup();
                self.state = LexState::Bullet;
            }
            Cursor::Char(_) => {
                self.backup();
                self.continuous_newline = true;
                self.state = LexState::Text;
            }
            Cursor::End | Cursor::Start => {
                self.start_draft(DraftKind::Eof);
                self.state = LexState::Done;
            }
        }
    }

    /// Running text, up to a bracket, a terminating newline or the end of input.
    fn lex_text(&mut self) {
        self.start_draft(DraftKind::Text);

        loop {
            self.bump();
            let Cursor::Char(c) = self.current else {
                self.trim_trailing_space();
                self.state = LexState::Global;
                return;
            };

            if c == BACKSLASH && !self.peek().is(BACKSLASH) {
                self.tag.clear();
                continue;
            }
            if self.peek_behind().is(BACKSLASH) {
                self.draft.value.push(c);
                continue;
            }

            if c == NEWLINE && self.in_list {
                self.state = if self.peek_next_non_space() == Some(HYPHEN) {
                    LexState::Bullet
                } else {
                    LexState::Terminator
                };
                return;
            }
            if c == NEWLINE && (!self.continuous_newline || self.skipped_newlines >= 2) {
                self.state = LexState::Terminator;
                return;
            }
            if c == NEWLINE {
                if self.draft.value.is_empty() {
                    self.start_draft(DraftKind::Text);
                } else {
                    self.draft.value.push(' ');
                }
                continue;
            }

            if c == OPENING_SQUARE {
                if self.tag.is_empty() {
                    self.trim_trailing_space();
                    self.backup();
                    self.state = LexState::OpeningSquare;
                    return;
                }
                // Step back over the tag name so it becomes its own token.
                let name_len = self.tag.chars().count();
                self.backup_n(name_len);
                self.truncate_draft(name_len);
                self.trim_trailing_space();
                self.backup();
                self.state = LexState::Tag;
                return;
            }
            if c == CLOSING_SQUARE {
                self.trim_trailing_space();
                self.backup();
                self.state = LexState::ClosingSquare;
                return;
            }

            if self.draft.value.is_empty() && c.is_whitespace() {
                self.start_draft(DraftKind::Text);
                continue;
            }
            self.draft.value.push(c);
        }
    }

    fn lex_heading(&mut self) {
        self.start_draft(DraftKind::Heading);

        loop {
            self.bump();
            match self.current {
                Cursor::Char(c)
                    if self.current.is_heading_char()
                        && self.draft.value.len() < MAX_HEADING_LEN =>
                {
                    self.draft.value.push(c);
                }
                Cursor::Char(_) => {
                    self.backup();
                    self.state = LexState::Text;
                    return;
                }
                Cursor::End | Cursor::Start => {
                    self.state = LexState::Global;
                    return;
                }
            }
        }
    }

    fn lex_terminator(&mut self) {
        self.backup();
        self.start_draft(DraftKind::Terminator);
        self.bump();
        self.state = LexState::Global;
    }

    fn lex_tag(&mut self) {
        let name = std::mem::take(&mut self.tag);
        self.start_draft(DraftKind::Tag);
        for _ in name.chars() {
            self.bump();
        }
        self.draft.value = name;
        self.state = LexState::OpeningSquare;
    }

    fn lex_opening_square(&mut self) {
        self.start_draft(DraftKind::OpeningSquare);
        self.bump();
        self.state = LexState::Text;
    }

    fn lex_closing_square(&mut self) {
        self.start_draft(DraftKind::ClosingSquare);
        self.bump();
        self.state = LexState::Text;
    }

    fn lex_bullet(&mut self) {
        self.start_draft(DraftKind::Bulletpoint);
        self.draft.indent = self.leading_space();
        self.bump();
        if self.current.is_space() {
            self.bump();
        }
        self.in_list = true;
        self.state = LexState::Text;
    }

    // --- Cursor movement ---

    /// Read one character, then collapse any whitespace run it starts.
    fn bump(&mut self) {
        loop {
            let Some(c) = self.buffer[self.pos..].chars().next() else {
                self.current = Cursor::End;
                return;
            };
            self.pos += c.len_utf8();
            if c == NEWLINE {
                self.line += 1;
                self.line_start = self.pos;
            }
            self.current = Cursor::Char(c);
            self.add_to_tag(c);

            if c.is_whitespace() && self.peek().is_space() {
                if c == NEWLINE {
                    self.skipped_newlines += 1;
                }
                continue;
            }
            if self.skipped_newlines > 0 && c.is_whitespace() {
                if c == NEWLINE {
                    self.skipped_newlines += 1;
                }
                self.rewrite_as_newline(c);
                return;
            }
            self.skipped_newlines = 0;
            return;
        }
    }

    /// Undo one `bump`, leaving the cursor on the character that will be read next.
    fn backup(&mut self) {
        if self.pos == 0 {
            self.current = Cursor::Start;
            return;
        }
        if self.current.is(NEWLINE) {
            self.line = self.line.saturating_sub(1);
        }
        if let Some(c) = self.buffer[..self.pos].chars().next_back() {
            self.pos -= c.len_utf8();
            self.current = Cursor::Char(c);
        }
    }

    fn backup_n(&mut self, n: usize) {
        for _ in 0..n {
            self.backup();
        }
    }

    /// Replace the whitespace character just read with a single `\n`.
    fn rewrite_as_newline(&mut self, c: char) {
        let start = self.pos - c.len_utf8();
        if c != NEWLINE {
            self.buffer.replace_range(start..self.pos, "\n");
            self.pos = start + 1;
        }
        self.current = Cursor::Char(NEWLINE);
    }

    fn peek(&self) -> Cursor {
        self.buffer[self.pos..]
            .chars()
            .next()
            .map_or(Cursor::End, Cursor::Char)
    }

    /// The character in front of the one under the cursor. At the end of
    /// input this is the last character of the buffer.
    fn peek_behind(&self) -> Cursor {
        if self.pos == 0 {
            return Cursor::Start;
        }
        let mut before = self.buffer[..self.pos].chars();
        if self.current != Cursor::End {
            before.next_back();
        }
        before.next_back().map_or(Cursor::Start, Cursor::Char)
    }

    /// Whitespace characters between the start of the line and the cursor.
    fn leading_space(&self) -> usize {
        self.buffer
            .get(self.line_start..self.pos)
            .map_or(0, |run| run.chars().filter(|c| c.is_whitespace()).count())
    }

    fn peek_next_non_space(&self) -> Option<char> {
        self.buffer[self.pos..].trim_start().chars().next()
    }

    // --- Token building ---

    fn start_draft(&mut self, kind: DraftKind) {
        self.draft = Draft {
            kind,
            value: String::new(),
            span: Span::new(self.pos, self.line),
            indent: 0,
        };
    }

    fn add_to_tag(&mut self, c: char) {
        if self.draft.kind != DraftKind::Text {
            return;
        }
        if c.is_alphabetic() {
            self.tag.push(c);
        } else if c != OPENING_SQUARE {
            self.tag.clear();
        }
    }

    fn truncate_draft(&mut self, chars: usize) {
        for _ in 0..chars {
            self.draft.value.pop();
        }
    }

    fn trim_trailing_space(&mut self) {
        if self.draft.value.ends_with(char::is_whitespace) {
            self.draft.value.pop();
        }
    }
}

impl Iterator for Lexer {
    type Item = Token;

    /// Yields every token up to and including the first `Eof`, then `None`.
    fn next(&mut self) -> Option<Token> {
        if self.exhausted {
            return None;
        }
        let token = self.advance();
        if token.is_eof() {
            self.exhausted = true;
        }
        Some(token)
    }
}
