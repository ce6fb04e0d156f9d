/*!
# `jtree` Library

Turns JSON-like source text into a typed value tree, reporting the line and
character offset of every token and error.

```rust
let program = jtree::parse(r#"{"a": {"b": [1, 2, 3]}}"#).expect("valid JSON");
let b = program.root_value.get("a").and_then(|a| a.get("b"));
assert_eq!(b.and_then(|b| b.index(2)).and_then(|n| n.as_f64()), Some(3.0));
```
*/

pub mod commands;
pub mod parser;
pub mod tokenizer;
pub mod utils;
pub mod value;

pub use parser::{ParseError, Parser};
pub use tokenizer::{Lexer, Token, TokenKind, tokenize};
pub use value::{Number, Program, Value};

/// Parse a whole document with the default nesting limit.
///
/// # Errors
///
/// Returns the first [`ParseError`] encountered.
pub fn parse(input: &str) -> Result<Program, ParseError> {
    Parser::new(Lexer::new(input)).parse_program()
}
