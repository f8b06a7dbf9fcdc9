//! Tokens produced by the configuration reader.
//!
//! Tokens carry no kind: the grammar layer classifies them by comparing
//! their text.

use crate::span::Span;

/// Characters that always form a token on their own.
pub const DELIMITERS: [char; 9] = ['.', ',', '=', '!', '&', '|', '(', ')', ';'];

/// Returns true if `c` is a single-character delimiter.
#[must_use]
pub fn is_delimiter(c: char) -> bool {
    DELIMITERS.contains(&c)
}

/// A positioned token.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token {
    /// The token's source text. String literals keep their quotes.
    pub text: String,
    /// Source location of this token.
    pub span: Span,
}

impl Token {
    /// Creates a new token.
    #[must_use]
    pub fn new(text: impl Into<String>, span: Span) -> Self {
        Self {
            text: text.into(),
            span,
        }
    }

    /// Returns true if this token opens a string literal.
    #[must_use]
    pub fn is_string_literal(&self) -> bool {
        self.text.starts_with('"')
    }

    /// Returns true if this token is a string literal with both quotes.
    #[must_use]
    pub fn is_terminated_string(&self) -> bool {
        self.text.len() >= 2 && self.is_string_literal() && self.text.ends_with('"')
    }
}
