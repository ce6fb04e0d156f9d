/*!
# Tree Builder

Recursive-descent parser that pulls [`Token`]s from a [`Lexer`] one at a time
and assembles a [`Program`].

## Examples

```rust
use jtree::parser::Parser;
use jtree::tokenizer::Lexer;

let program = Parser::new(Lexer::new(r#"{"a": [1, 2]}"#))
    .parse_program()
    .expect("valid document");
assert_eq!(program.root_value.to_string(), r#"{"a":[1,2]}"#);
```

## Errors

Parsing stops at the first error, reported as a [`ParseError`] carrying the
line and character offset of the offending token:

```rust
use jtree::parser::{Expected, ParseError};

let err = jtree::parse(r#"{"a": }"#).unwrap_err();
assert!(matches!(err, ParseError::UnexpectedToken { expected: Expected::Value, .. }));
assert_eq!(err.to_string(), "expected value, found '}' at line 1, offset 6");
```

## Grammar

```text
program := value EOF
value   := object | array | string | number | true | false | null
object  := '{' (pair (',' pair)*)? '}'
pair    := string ':' value
array   := '[' (value (',' value)*)? ']'
```
*/

use log::debug;
use std::error::Error;
use std::fmt;
use std::str::{Chars, FromStr};

use crate::tokenizer::{Lexer, Token, TokenKind};
use crate::value::{Number, Program, Value};

/// Default limit on how deeply objects and arrays may nest.
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// What the parser was looking for when it failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expected {
    /// The start of any value
    Value,
    /// A string key inside an object
    Key,
    /// One specific token
    Token(TokenKind),
    /// A comma or the given closing token
    CommaOr(TokenKind),
    /// Nothing more after the root value
    EndOfInput,
}

impl fmt::Display for Expected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value => write!(f, "value"),
            Self::Key => write!(f, "string key"),
            Self::Token(kind) => write!(f, "{kind}"),
            Self::CommaOr(kind) => write!(f, "',' or {kind}"),
            Self::EndOfInput => write!(f, "end of input"),
        }
    }
}

/// Represents errors that can occur while parsing a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// A token of the wrong kind for the current grammar position.
    UnexpectedToken {
        /// What the grammar allowed here
        expected: Expected,
        /// The offending token
        found: Token,
    },
    /// The input ended while a value or closing bracket was still expected.
    UnexpectedEndOfInput {
        /// What the grammar allowed here
        expected: Expected,
        /// Line of the end of input
        line: usize,
        /// Character offset of the end of input
        offset: usize,
    },
    /// A number token whose text is not a valid JSON number, e.g. `1-2`.
    InvalidNumber {
        /// The offending number token
        token: Token,
    },
    /// A string token with a malformed escape sequence.
    InvalidEscape {
        /// The offending string token
        token: Token,
        /// The escape sequence as written
        sequence: String,
    },
    /// Objects and arrays nested deeper than the configured limit.
    DepthLimitExceeded {
        /// The configured limit
        limit: usize,
        /// Line of the bracket that crossed the limit
        line: usize,
        /// Character offset of the bracket that crossed the limit
        offset: usize,
    },
}

impl ParseError {
    /// Line the error was detected on.
    #[must_use]
    pub const fn line(&self) -> usize {
        match self {
            Self::UnexpectedToken { found: token, .. }
            | Self::InvalidNumber { token }
            | Self::InvalidEscape { token, .. } => token.line,
            Self::UnexpectedEndOfInput { line, .. }
            | Self::DepthLimitExceeded { line, .. } => *line,
        }
    }

    /// Character offset the error was detected at.
    #[must_use]
    pub const fn offset(&self) -> usize {
        match self {
            Self::UnexpectedToken { found: token, .. }
            | Self::InvalidNumber { token }
            | Self::InvalidEscape { token, .. } => token.start,
            Self::UnexpectedEndOfInput { offset, .. }
            | Self::DepthLimitExceeded { offset, .. } => *offset,
        }
    }
}

impl Error for ParseError {}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnexpectedToken { expected, found } => {
                write!(f, "expected {expected}, found {found}")?;
            }
            Self::UnexpectedEndOfInput { expected, .. } => {
                write!(f, "expected {expected}, found end of input")?;
            }
            Self::InvalidNumber { token } => {
                write!(f, "invalid number literal {:?}", token.literal)?;
            }
            Self::InvalidEscape { sequence, .. } => {
                write!(f, "invalid escape sequence {sequence:?} in string")?;
            }
            Self::DepthLimitExceeded { limit, .. } => {
                write!(f, "nesting depth limit of {limit} exceeded")?;
            }
        }
        write!(f, " at line {}, offset {}", self.line(), self.offset())
    }
}

/// Recursive-descent parser holding exactly one token of lookahead.
#[derive(Debug)]
pub struct Parser {
    lexer: Lexer,
    /// The next unconsumed token
    current: Token,
    max_depth: usize,
    depth: usize,
}

impl Parser {
    /// Create a parser reading tokens from `lexer`.
    #[must_use]
    pub fn new(mut lexer: Lexer) -> Self {
        let current = lexer.next_token();
        Self {
            lexer,
            current,
            max_depth: DEFAULT_MAX_DEPTH,
            depth: 0,
        }
    }

    /// Set how deeply objects and arrays may nest before parsing fails.
    #[must_use]
    pub const fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Parse the whole input into a [`Program`].
    ///
    /// # Errors
    ///
    /// Returns the first [`ParseError`] encountered; no partial tree is
    /// returned.
    pub fn parse_program(mut self) -> Result<Program, ParseError> {
        debug!("parsing program (max depth {})", self.max_depth);
        let root_value = self.parse_value()?;
        if !self.current.is_eof() {
            return Err(self.unexpected(Expected::EndOfInput));
        }
        debug!("parsed {} root value", root_value.kind_name());
        Ok(Program { root_value })
    }

    /// Consume the current token and pull the next one from the lexer.
    fn advance(&mut self) -> Token {
        let next = self.lexer.next_token();
        std::mem::replace(&mut self.current, next)
    }

    /// Consume the current token if it is of `kind`.
    fn expect(
        &mut self,
        kind: TokenKind,
        expected: Expected,
    ) -> Result<Token, ParseError> {
        if self.current.kind == kind {
            Ok(self.advance())
        } else {
            Err(self.unexpected(expected))
        }
    }

    /// Build the error for the current token not matching `expected`.
    fn unexpected(&self, expected: Expected) -> ParseError {
        if self.current.is_eof() {
            ParseError::UnexpectedEndOfInput {
                expected,
                line: self.current.line,
                offset: self.current.start,
            }
        } else {
            ParseError::UnexpectedToken {
                expected,
                found: self.current.clone(),
            }
        }
    }

    fn parse_value(&mut self) -> Result<Value, ParseError> {
        match self.current.kind {
            TokenKind::LeftBrace => self.parse_object(),
            TokenKind::LeftBracket => self.parse_array(),
            TokenKind::String => {
                let token = self.advance();
                decode_string(&token).map(Value::String)
            }
            TokenKind::Number => {
                let token = self.advance();
                parse_number(token).map(Value::Number)
            }
            TokenKind::True => {
                self.advance();
                Ok(Value::Boolean(true))
            }
            TokenKind::False => {
                self.advance();
                Ok(Value::Boolean(false))
            }
            TokenKind::Null => {
                self.advance();
                Ok(Value::Null)
            }
            _ => Err(self.unexpected(Expected::Value)),
        }
    }

    /// Consume an opening bracket, enforcing the nesting limit.
    fn enter(&mut self) -> Result<(), ParseError> {
        if self.depth >= self.max_depth {
            return Err(ParseError::DepthLimitExceeded {
                limit: self.max_depth,
                line: self.current.line,
                offset: self.current.start,
            });
        }
        self.depth += 1;
        self.advance();
        Ok(())
    }

    fn parse_object(&mut self) -> Result<Value, ParseError> {
        self.enter()?;
        let mut entries = vec![];

        if self.current.kind == TokenKind::RightBrace {
            self.advance();
        } else {
            loop {
                entries.push(self.parse_pair()?);
                match self.current.kind {
                    TokenKind::Comma => {
                        self.advance();
                    }
                    TokenKind::RightBrace => {
                        self.advance();
                        break;
                    }
                    _ => {
                        return Err(self.unexpected(Expected::CommaOr(
                            TokenKind::RightBrace,
                        )));
                    }
                }
            }
        }

        self.depth -= 1;
        Ok(Value::Object(entries))
    }

    fn parse_pair(&mut self) -> Result<(String, Value), ParseError> {
        let key_token = self.expect(TokenKind::String, Expected::Key)?;
        let key = decode_string(&key_token)?;
        self.expect(TokenKind::Colon, Expected::Token(TokenKind::Colon))?;
        let value = self.parse_value()?;
        Ok((key, value))
    }

    fn parse_array(&mut self) -> Result<Value, ParseError> {
        self.enter()?;
        let mut items = vec![];

        if self.current.kind == TokenKind::RightBracket {
            self.advance();
        } else {
            loop {
                items.push(self.parse_value()?);
                match self.current.kind {
                    TokenKind::Comma => {
                        self.advance();
                    }
                    TokenKind::RightBracket => {
                        self.advance();
                        break;
                    }
                    _ => {
                        return Err(self.unexpected(Expected::CommaOr(
                            TokenKind::RightBracket,
                        )));
                    }
                }
            }
        }

        self.depth -= 1;
        Ok(Value::Array(items))
    }
}

impl FromStr for Value {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Parser::new(Lexer::new(s))
            .parse_program()
            .map(Program::into_value)
    }
}

/// Validate a number token against the JSON number grammar and convert it.
fn parse_number(token: Token) -> Result<Number, ParseError> {
    if !is_json_number(&token.literal) {
        return Err(ParseError::InvalidNumber { token });
    }
    match token.literal.parse::<f64>() {
        Ok(value) => Ok(Number::new(token.literal, value)),
        Err(_) => Err(ParseError::InvalidNumber { token }),
    }
}

/// `-?(0|[1-9][0-9]*)(\.[0-9]+)?([eE][+-]?[0-9]+)?`
fn is_json_number(text: &str) -> bool {
    let bytes = text.as_bytes();
    let mut i = 0;
    let digits_from = |mut i: usize| {
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        i
    };

    if bytes.get(i) == Some(&b'-') {
        i += 1;
    }
    match bytes.get(i) {
        Some(b'0') => i += 1,
        Some(b'1'..=b'9') => i = digits_from(i),
        _ => return false,
    }
    if bytes.get(i) == Some(&b'.') {
        let end = digits_from(i + 1);
        if end == i + 1 {
            return false;
        }
        i = end;
    }
    if matches!(bytes.get(i), Some(b'e' | b'E')) {
        i += 1;
        if matches!(bytes.get(i), Some(b'+' | b'-')) {
            i += 1;
        }
        let end = digits_from(i);
        if end == i {
            return false;
        }
        i = end;
    }
    i == bytes.len()
}

/// Resolve the escape sequences in the raw literal of a string token.
fn decode_string(token: &Token) -> Result<String, ParseError> {
    let raw = &token.literal;
    if !raw.contains('\\') {
        return Ok(raw.clone());
    }

    let invalid = |sequence: String| ParseError::InvalidEscape {
        token: token.clone(),
        sequence,
    };

    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('"') => out.push('"'),
            Some('\\') => out.push('\\'),
            Some('/') => out.push('/'),
            Some('b') => out.push('\u{8}'),
            Some('f') => out.push('\u{c}'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('t') => out.push('\t'),
            Some('u') => out.push(decode_unicode(&mut chars).map_err(invalid)?),
            Some(other) => return Err(invalid(format!("\\{other}"))),
            None => return Err(invalid("\\".to_string())),
        }
    }
    Ok(out)
}

/// Decode the code point of a `\u` escape whose `\u` has already been
/// consumed, pairing UTF-16 surrogates. On failure returns the offending
/// sequence text.
fn decode_unicode(chars: &mut Chars<'_>) -> Result<char, String> {
    let high = read_hex4(chars)?;
    let code = match high {
        0xD800..=0xDBFF => {
            let rest = chars.as_str();
            if !rest.starts_with("\\u") {
                return Err(format!("\\u{high:04X}"));
            }
            chars.nth(1);
            let low = read_hex4(chars)?;
            if !(0xDC00..=0xDFFF).contains(&low) {
                return Err(format!("\\u{high:04X}\\u{low:04X}"));
            }
            0x10000 + ((high - 0xD800) << 10) + (low - 0xDC00)
        }
        0xDC00..=0xDFFF => return Err(format!("\\u{high:04X}")),
        _ => high,
    };
    char::from_u32(code).ok_or_else(|| format!("\\u{code:04X}"))
}

fn read_hex4(chars: &mut Chars<'_>) -> Result<u32, String> {
    let hex: String = chars.by_ref().take(4).collect();
    if hex.len() != 4 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(format!("\\u{hex}"));
    }
    u32::from_str_radix(&hex, 16).map_err(|_| format!("\\u{hex}"))
}
