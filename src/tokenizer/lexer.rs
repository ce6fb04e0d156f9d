//! # Lexer
//!
//! Scans the characters of a JSON-like document into a sequence of
//! [`Token`]s, tracking the line number and character offsets of each one.
//!
//! The lexer is total: it never fails. Characters it does not understand are
//! returned as [`TokenKind::Illegal`] tokens so that the parser can report
//! them with the grammar context in which they appeared.
use log::trace;

use crate::tokenizer::{Token, TokenKind, lookup_identifier};

/// A lexer over a single input document.
///
/// Offsets are counted in characters, not bytes. A lexer is forward-only;
/// scanning the same input again requires a new instance.
#[derive(Debug, Clone)]
pub struct Lexer {
    /// The input sequence of characters to tokenize
    input: Vec<char>,
    /// Current position (current character)
    position: usize,
    /// Current reading position (after current character)
    read_position: usize,
    /// Current character under examination, `None` once the input is
    /// exhausted
    ch: Option<char>,
    /// 1-based line of the current character
    line: usize,
    /// Set once the end-of-input token has been handed out by the iterator
    finished: bool,
}

impl Lexer {
    /// Create a new lexer over `input`.
    #[must_use]
    pub fn new(input: &str) -> Self {
        let mut lexer = Self {
            input: input.chars().collect(),
            position: 0,
            read_position: 0,
            ch: None,
            line: 1,
            finished: false,
        };
        // put the lexer in an initial working state
        lexer.read_char();
        lexer
    }

    /// Reads and consumes the next character in the input sequence.
    fn read_char(&mut self) {
        self.ch = self.input.get(self.read_position).copied();
        self.position = self.read_position.min(self.input.len());
        if self.read_position < self.input.len() {
            self.read_position += 1;
        }
    }

    /// Consume whitespace starting from the current position, counting
    /// newlines.
    fn skip_whitespace(&mut self) {
        while let Some(c @ (' ' | '\t' | '\n' | '\r')) = self.ch {
            if c == '\n' {
                self.line += 1;
            }
            self.read_char();
        }
    }

    /// Returns the next token in the input sequence from the current
    /// position. Once the input is exhausted every call returns an
    /// [`TokenKind::Eof`] token.
    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace();

        let token = match self.ch {
            None => Token::new(
                TokenKind::Eof,
                "",
                self.line,
                self.position,
                self.position,
            ),
            Some('{') => self.single(TokenKind::LeftBrace),
            Some('}') => self.single(TokenKind::RightBrace),
            Some('[') => self.single(TokenKind::LeftBracket),
            Some(']') => self.single(TokenKind::RightBracket),
            Some(':') => self.single(TokenKind::Colon),
            Some(',') => self.single(TokenKind::Comma),
            Some('"') => self.read_string(),
            Some(c) if c.is_ascii_alphabetic() => self.read_identifier(),
            Some(c) if is_number_start(c) => self.read_number(),
            Some(_) => self.single(TokenKind::Illegal),
        };

        trace!(
            "token {:?} {:?} at line {} [{}..{})",
            token.kind, token.literal, token.line, token.start, token.end
        );
        token
    }

    /// Consume the current character as a one-character token.
    fn single(&mut self, kind: TokenKind) -> Token {
        let start = self.position;
        let literal: String = self.ch.into_iter().collect();
        self.read_char();
        Token::new(kind, literal, self.line, start, start + 1)
    }

    /// Reads a string literal. The returned literal is the raw text between
    /// the quotes; a backslash always escapes the character after it so that
    /// `\"` does not end the string.
    ///
    /// A string still open at the end of the input is returned as an
    /// [`TokenKind::Illegal`] token holding everything from the opening quote.
    fn read_string(&mut self) -> Token {
        let line = self.line;
        let start = self.position;
        // skip opening quote
        self.read_char();
        while let Some(c) = self.ch {
            if c == '"' {
                break;
            }
            if c == '\\' {
                self.read_char();
            }
            if self.ch == Some('\n') {
                self.line += 1;
            }
            self.read_char();
        }

        if self.ch.is_none() {
            let literal: String = self.input[start..].iter().collect();
            return Token::new(
                TokenKind::Illegal,
                literal,
                line,
                start,
                self.input.len(),
            );
        }

        let literal: String = self.input[start + 1..self.position].iter().collect();
        // skip closing quote
        self.read_char();
        Token::new(TokenKind::String, literal, line, start, self.position)
    }

    /// Reads a run of ASCII letters and resolves it against the reserved-word
    /// table.
    fn read_identifier(&mut self) -> Token {
        let start = self.position;
        while self.ch.is_some_and(|c| c.is_ascii_alphabetic()) {
            self.read_char();
        }
        let literal: String = self.input[start..self.position].iter().collect();
        let kind = lookup_identifier(&literal).unwrap_or(TokenKind::Illegal);
        Token::new(kind, literal, self.line, start, self.position)
    }

    /// Reads a run of number characters. No validation happens here: `1-2`
    /// or `1..e` are scanned as a single number token and rejected by the
    /// parser.
    fn read_number(&mut self) -> Token {
        let start = self.position;
        while self.ch.is_some_and(is_number_continue) {
            self.read_char();
        }
        let literal: String = self.input[start..self.position].iter().collect();
        Token::new(TokenKind::Number, literal, self.line, start, self.position)
    }
}

impl Iterator for Lexer {
    type Item = Token;

    /// Yields every token up to and including the end-of-input token, then
    /// `None`.
    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        let token = self.next_token();
        self.finished = token.is_eof();
        Some(token)
    }
}

const fn is_number_start(c: char) -> bool {
    matches!(c, '0'..='9' | '.' | '-')
}

const fn is_number_continue(c: char) -> bool {
    matches!(c, '0'..='9' | '.' | '-' | '+' | 'e' | 'E')
}

/// Tokenize a whole document, returning every token including the final
/// end-of-input token.
#[must_use]
pub fn tokenize(text: &str) -> Vec<Token> {
    Lexer::new(text).collect()
}
