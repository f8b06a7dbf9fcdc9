//! Tokenizer for configuration files.
//!
//! The whole file is tokenized eagerly; parsing then walks the token list
//! with a cursor. Lexical classes, highest priority first:
//!
//! 1. `#` comment to end of line (discarded)
//! 2. newline (advances the line counter)
//! 3. other whitespace (discarded)
//! 4. string literal: `"` up to the next `"` or end of line, quotes kept
//! 5. single-character delimiter: `. , = ! & | ( ) ;`
//! 6. general token: a maximal run of anything else

use std::fs;
use std::path::Path;

use formcfg_foundation::{DiagnosticLog, Error};

use crate::span::Span;
use crate::token::{Token, is_delimiter};

/// Converts source text into a flat token list.
///
/// Unterminated string literals still yield one token; whether that is an
/// error is decided by the grammar.
#[must_use]
pub fn tokenize(source: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut chars = source.char_indices().peekable();
    let mut line = 1u32;
    let mut column = 1u32;

    while let Some(&(start, c)) = chars.peek() {
        match c {
            '#' => {
                while let Some(&(_, c)) = chars.peek() {
                    if c == '\n' {
                        break;
                    }
                    chars.next();
                    column += 1;
                }
            }
            '\n' => {
                chars.next();
                line += 1;
                column = 1;
            }
            c if c.is_whitespace() => {
                chars.next();
                column += 1;
            }
            '"' => {
                let (token_line, token_column) = (line, column);
                chars.next();
                column += 1;
                let mut end = start + 1;
                while let Some(&(i, c)) = chars.peek() {
                    if c == '\n' || c == '\r' {
                        break;
                    }
                    chars.next();
                    column += 1;
                    end = i + c.len_utf8();
                    if c == '"' {
                        break;
                    }
                }
                let span = Span::new(start, end, token_line, token_column);
                tokens.push(Token::new(span.text(source), span));
            }
            c if is_delimiter(c) => {
                chars.next();
                let span = Span::new(start, start + c.len_utf8(), line, column);
                tokens.push(Token::new(span.text(source), span));
                column += 1;
            }
            _ => {
                let token_column = column;
                let mut end = start;
                while let Some(&(i, c)) = chars.peek() {
                    if c.is_whitespace() || c == '#' || is_delimiter(c) {
                        break;
                    }
                    chars.next();
                    column += 1;
                    end = i + c.len_utf8();
                }
                let span = Span::new(start, end, line, token_column);
                tokens.push(Token::new(span.text(source), span));
            }
        }
    }

    tokens
}

/// A cursor over the tokens of one configuration file.
///
/// `get_token` and `peek` return an empty string past the end of the file.
/// No real token is ever empty, so the empty string is an unambiguous
/// end-of-input marker.
#[derive(Clone, Debug, Default)]
pub struct ConfigReader {
    tokens: Vec<Token>,
    current: usize,
    /// Index of the token most recently returned by `get_token` or `peek`.
    last: Option<usize>,
}

impl ConfigReader {
    /// Creates a reader over in-memory text.
    #[must_use]
    pub fn from_text(source: &str) -> Self {
        Self::from_tokens(tokenize(source))
    }

    /// Creates a reader over an already tokenized file.
    #[must_use]
    pub fn from_tokens(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            current: 0,
            last: None,
        }
    }

    /// Reads and tokenizes a file.
    ///
    /// A file that cannot be read is logged as a warning and yields a reader
    /// that is already at end of file.
    #[must_use]
    pub fn from_path(path: &Path, log: &mut DiagnosticLog) -> Self {
        match fs::read_to_string(path) {
            Ok(source) => Self::from_text(&source),
            Err(e) => {
                log.warn(format!("failed to read {}: {e}", path.display()));
                Self::default()
            }
        }
    }

    /// Returns true once every token has been consumed.
    #[must_use]
    pub fn end_of_file(&self) -> bool {
        self.current >= self.tokens.len()
    }

    /// Consumes and returns the next token's text.
    pub fn get_token(&mut self) -> String {
        self.next_token().map(|token| token.text).unwrap_or_default()
    }

    /// Consumes and returns the next token, or `None` at end of file.
    pub fn next_token(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.current)?.clone();
        self.last = Some(self.current);
        self.current += 1;
        Some(token)
    }

    /// Returns the next token's text without consuming it.
    pub fn peek(&mut self) -> String {
        match self.tokens.get(self.current) {
            Some(token) => {
                self.last = Some(self.current);
                token.text.clone()
            }
            None => String::new(),
        }
    }

    /// Line of the most recently returned token.
    #[must_use]
    pub fn last_line(&self) -> u32 {
        self.last_token().map_or(1, |t| t.span.line)
    }

    /// Column of the most recently returned token.
    #[must_use]
    pub fn last_column(&self) -> u32 {
        self.last_token().map_or(1, |t| t.span.column)
    }

    /// Returns the full token list.
    #[must_use]
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Creates a syntax error at the most recently returned token.
    #[must_use]
    pub fn error(&self, message: impl Into<String>) -> Error {
        Error::parse(message, self.last_line(), self.last_column())
    }

    fn last_token(&self) -> Option<&Token> {
        self.last.and_then(|i| self.tokens.get(i))
    }
}
