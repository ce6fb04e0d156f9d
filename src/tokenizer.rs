//! # Tokenizer/ Lexer
//!
//! Scans the text of a JSON-like document into a position-annotated token
//! stream.
pub mod lexer;
pub mod token;

// Re-exports
pub use lexer::{Lexer, tokenize};
pub use token::{Token, TokenKind, lookup_identifier};
