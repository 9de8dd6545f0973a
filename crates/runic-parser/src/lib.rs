//! Runic Parser
//!
//! Parses Runic markup into a document tree. Pulls tokens from the lexer
//! and builds headings, paragraphs, nested lists and inline `bold`/`italic`
//! tags by recursive descent.
//!
//! Parsing is total: malformed input still yields a complete tree, with
//! `Error` nodes standing in for invalid headings and tag names.
//!
//! # Example
//!
//! ```
//! use runic_parser::{NodeKind, Parser};
//!
//! let tree = Parser::parse("bold[hello]");
//! assert_eq!(tree.kind, NodeKind::Root);
//! assert_eq!(tree.text_content(), "hello");
//! ```

pub mod node;
pub mod parser;
mod tree;

pub use node::{Node, NodeKind};
pub use parser::Parser;

/// Recoverable markup errors, recorded as `Error` nodes in the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, thiserror::Error)]
pub enum MarkupError {
    /// Heading punctuation that is not one of `.` `:` `:.` `::` `::.` `:::`.
    #[error("Invalid heading value")]
    InvalidHeading,
    /// An inline tag other than `bold` or `italic`.
    #[error("Invalid tag name")]
    InvalidTag,
}
