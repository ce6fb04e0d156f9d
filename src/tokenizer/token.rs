//! # Token
//!
//! Defines the token vocabulary produced when scanning a JSON-like document,
//! along with the reserved-word table used to classify identifiers.
use std::{collections::HashMap, fmt::Display, sync::LazyLock};

/// The kind of a [`Token`].
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    /* Delimiters */
    /// Opening curly brace
    LeftBrace,

    /// Closing curly brace
    RightBrace,

    /// Opening square bracket
    LeftBracket,

    /// Closing square bracket
    RightBracket,

    /// Comma character
    Comma,

    /// Colon character
    Colon,

    /* Literals */
    /// String literal, raw text between the quotes
    String,

    /// Numeric literal, any run of number characters
    Number,

    /* Values */
    /// `true`
    True,

    /// `false`
    False,

    /// `null`
    Null,

    /* Commands */
    /// `POST`
    Post,

    /// `GET`
    Get,

    /// `header`
    Header,

    /// `HTTP`
    Http,

    /* Comments */
    // NOTE: reserved in the vocabulary, the lexer never emits these.
    /// `//`
    LineComment,

    /// `/*`
    BlockComment,

    /* Reserved */
    /// Unrecognized character or word
    Illegal,

    /// End of input
    Eof,
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::LeftBrace => write!(f, "'{{'"),
            Self::RightBrace => write!(f, "'}}'"),
            Self::LeftBracket => write!(f, "'['"),
            Self::RightBracket => write!(f, "']'"),
            Self::Comma => write!(f, "','"),
            Self::Colon => write!(f, "':'"),
            Self::String => write!(f, "string"),
            Self::Number => write!(f, "number"),
            Self::True => write!(f, "true"),
            Self::False => write!(f, "false"),
            Self::Null => write!(f, "null"),
            Self::Post => write!(f, "POST"),
            Self::Get => write!(f, "GET"),
            Self::Header => write!(f, "header"),
            Self::Http => write!(f, "HTTP"),
            Self::LineComment => write!(f, "line comment"),
            Self::BlockComment => write!(f, "block comment"),
            Self::Illegal => write!(f, "illegal token"),
            Self::Eof => write!(f, "end of input"),
        }
    }
}

/// A single token scanned from the input along with its source position.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Token {
    /// What kind of token this is
    pub kind: TokenKind,
    /// Literal text of the token. For strings this is the raw text between
    /// the quotes, escapes untouched.
    pub literal: String,
    /// 1-based line the token starts on
    pub line: usize,
    /// Character offset of the first character of the token
    pub start: usize,
    /// Character offset one past the last character of the token
    pub end: usize,
}

impl Token {
    /// Construct a new token.
    pub fn new<T: Into<String>>(
        kind: TokenKind,
        literal: T,
        line: usize,
        start: usize,
        end: usize,
    ) -> Self {
        Self {
            kind,
            literal: literal.into(),
            line,
            start,
            end,
        }
    }

    /// Whether this token marks the end of the input.
    #[must_use]
    pub fn is_eof(&self) -> bool {
        self.kind == TokenKind::Eof
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            TokenKind::String => write!(f, "string \"{}\"", self.literal),
            TokenKind::Number => write!(f, "number {}", self.literal),
            TokenKind::Illegal => {
                write!(f, "illegal token {:?}", self.literal)
            }
            kind => write!(f, "{kind}"),
        }
    }
}

/// Words recognized by the identifier scanner. Matching is case-sensitive.
static KEYWORDS: LazyLock<HashMap<&'static str, TokenKind>> =
    LazyLock::new(|| {
        HashMap::from([
            ("true", TokenKind::True),
            ("false", TokenKind::False),
            ("null", TokenKind::Null),
            ("POST", TokenKind::Post),
            ("GET", TokenKind::Get),
            ("header", TokenKind::Header),
            ("HTTP", TokenKind::Http),
        ])
    });

/// Resolve an identifier against the reserved-word table, returning `None`
/// when the word is not part of the vocabulary.
#[must_use]
pub fn lookup_identifier(ident: &str) -> Option<TokenKind> {
    KEYWORDS.get(ident).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_is_case_sensitive() {
        assert_eq!(lookup_identifier("GET"), Some(TokenKind::Get));
        assert_eq!(lookup_identifier("get"), None);
        assert_eq!(lookup_identifier("header"), Some(TokenKind::Header));
        assert_eq!(lookup_identifier("HEADER"), None);
    }

    #[test]
    fn lookup_value_keywords() {
        assert_eq!(lookup_identifier("true"), Some(TokenKind::True));
        assert_eq!(lookup_identifier("false"), Some(TokenKind::False));
        assert_eq!(lookup_identifier("null"), Some(TokenKind::Null));
        assert_eq!(lookup_identifier("True"), None);
    }

    #[test]
    fn token_display() {
        let tok = Token::new(TokenKind::String, "hi", 1, 0, 4);
        assert_eq!(tok.to_string(), "string \"hi\"");
        let tok = Token::new(TokenKind::RightBrace, "}", 1, 4, 5);
        assert_eq!(tok.to_string(), "'}'");
        let tok = Token::new(TokenKind::Illegal, "@", 2, 9, 10);
        assert_eq!(tok.to_string(), "illegal token \"@\"");
    }
}
