//! Document parser for Runic.
//!
//! Pulls tokens from `runic-lexer` one at a time and builds the document
//! tree by recursive descent. Two pieces of state cross production
//! boundaries: the inline-tag nesting depth, and the list indentation depth
//! of the list being filled.
//!
//! Parsing never fails. Invalid headings and unknown tag names become
//! `Error` nodes that still own the content written under them.

use crate::node::{Node, NodeKind};
use crate::tree::TreeBuilder;
use crate::MarkupError;
use runic_lexer::{Lexer, Token, TokenKind};

/// Spaces per list nesting level.
pub const INDENT_WIDTH: usize = 2;

/// Runic document parser.
pub struct Parser {
    lexer: Lexer,
    token: Token,
    tree: TreeBuilder,
    /// Inline tags opened and not yet closed by `]`.
    tag_depth: usize,
}

impl Parser {
    /// Create a parser positioned on the first token of `source`.
    pub fn new(source: &str) -> Self {
        let mut lexer = Lexer::new(source);
        let token = lexer.advance();
        Self {
            lexer,
            token,
            tree: TreeBuilder::new(),
            tag_depth: 0,
        }
    }

    /// Parse source text into a `Root` node.
    pub fn parse(source: &str) -> Node {
        Parser::new(source).parse_document()
    }

    /// Parse every block up to the end of input.
    pub fn parse_document(mut self) -> Node {
        while !self.token.is_eof() {
            self.tag_depth = 0;
            log::trace!("block at line {}: {:?}", self.token.span.line, self.token.kind);

            match self.token.kind {
                TokenKind::Heading(_) => self.parse_heading(),
                TokenKind::Bulletpoint { .. } => self.parse_list(),
                TokenKind::Terminator => {}
                _ => self.parse_paragraph(),
            }

            // A list handing back a shallower bullet starts the next list.
            if self.bullet_depth().is_none() {
                self.advance();
            }
        }
        self.tree.finish()
    }

    // =========================================================================
    // Blocks
    // =========================================================================

    fn parse_heading(&mut self) {
        let marker = self.token.value().to_owned();
        match NodeKind::from_heading_marker(&marker) {
            Some(kind) => self.tree.open(kind, marker),
            None => {
                log::debug!(
                    "line {}: {}: {marker}",
                    self.token.span.line,
                    MarkupError::InvalidHeading
                );
                self.tree
                    .open(NodeKind::Error(MarkupError::InvalidHeading), marker);
            }
        }

        self.advance();
        self.parse_rich_text();
        self.tree.close();
    }

    fn parse_paragraph(&mut self) {
        self.tree.open(NodeKind::Paragraph, "");
        self.parse_rich_text();
        self.tree.close();
    }

    /// Parse consecutive bullets into a `List`.
    ///
    /// A deeper bullet opens a nested list after the current item; a
    /// shallower one closes this list and is left for the caller.
    fn parse_list(&mut self) {
        self.tree.open(NodeKind::List, "");

        while let Some(depth) = self.bullet_depth() {
            self.advance();
            self.parse_list_item();
            self.tag_depth = 0;

            if self.bullet_depth().is_some_and(|next| next > depth) {
                log::debug!("nested list below depth {depth}");
                self.parse_list();
            }
            if self.bullet_depth().is_some_and(|next| next < depth) {
                break;
            }
        }

        self.tree.close();
    }

    fn parse_list_item(&mut self) {
        self.tree.open(NodeKind::ListItem, "");
        self.parse_rich_text();
        self.tree.close();
    }

    // =========================================================================
    // Inline content
    // =========================================================================

    /// Parse text and inline tags up to the end of the enclosing block.
    ///
    /// Returns early on the `]` matching the innermost open tag, or when a
    /// block boundary is reached while a tag is still open.
    fn parse_rich_text(&mut self) {
        while !self.at_block_end() {
            match self.token.kind {
                TokenKind::Text(ref text) => self.tree.append_text(text),
                TokenKind::Tag(_) => {
                    self.parse_tag();
                    if self.tag_depth > 0 && self.at_item_end() {
                        return;
                    }
                }
                TokenKind::ClosingSquare if self.tag_depth > 0 => {
                    self.tag_depth -= 1;
                    return;
                }
                // Stray brackets carry no content.
                _ => {}
            }
            self.advance();
        }
    }

    fn parse_tag(&mut self) {
        let name = self.token.value().to_owned();
        match NodeKind::from_tag_name(&name) {
            Some(kind) => self.tree.open(kind, ""),
            None => {
                log::debug!(
                    "line {}: {}: {name}",
                    self.token.span.line,
                    MarkupError::InvalidTag
                );
                self.tree.open(NodeKind::Error(MarkupError::InvalidTag), name);
            }
        }

        // skip `[`
        self.advance();
        self.tag_depth += 1;

        self.parse_rich_text();
        self.tree.close();
    }

    // =========================================================================
    // Token helpers
    // =========================================================================

    fn advance(&mut self) {
        self.token = self.lexer.advance();
    }

    /// Nesting depth of the current token if it is a bullet.
    fn bullet_depth(&self) -> Option<usize> {
        match self.token.kind {
            TokenKind::Bulletpoint { indent } => Some(indent / INDENT_WIDTH),
            _ => None,
        }
    }

    fn at_item_end(&self) -> bool {
        matches!(
            self.token.kind,
            TokenKind::Bulletpoint { .. } | TokenKind::Terminator
        )
    }

    fn at_block_end(&self) -> bool {
        self.at_item_end() || self.token.is_eof()
    }
}
