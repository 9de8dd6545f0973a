//! Runic Lexer
//!
//! Tokenizes Runic markup into a stream of tokens.
//! Handles heading markers (`.` `:` `:.` ...), list bullets with their
//! indentation, inline tags (`bold[...]`), backslash escapes, and
//! whitespace/newline normalization.
//!
//! The lexer never fails: any input produces a token stream ending in `Eof`.
//!
//! # Example
//!
//! ```
//! use runic_lexer::Lexer;
//!
//! let tokens = Lexer::tokenize("");
//! assert_eq!(tokens.len(), 1); // Just EOF
//! ```

pub mod lexer;
pub mod token;

pub use lexer::Lexer;
pub use token::{Span, Token, TokenKind};
