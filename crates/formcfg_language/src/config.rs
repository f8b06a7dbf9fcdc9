//! Parser configuration.

/// Deepest allowed nesting of `if` blocks, and separately of parenthesized
/// guard groups. Deeper input is a syntax error.
pub const MAX_NESTING_DEPTH: usize = 64;

/// What the parser does after a statement fails to parse.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Recovery {
    /// Stop; keep only the statements parsed before the error.
    #[default]
    Abort,
    /// Discard tokens through the next `;` and resume with the next statement.
    ///
    /// Inside a block, recovery stays in that block: it stops before the
    /// block's closing `}` and skips whole `{ ... }` chains it runs into.
    SkipToSemicolon,
}

/// Configuration for [`Parser`](crate::Parser).
#[derive(Clone, Debug, Default)]
pub struct ParserConfig {
    /// Error recovery strategy.
    pub recovery: Recovery,
}

impl ParserConfig {
    /// Creates the default configuration (abort on first error).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates the line-by-line recovering configuration.
    #[must_use]
    pub fn recovering() -> Self {
        Self::new().with_recovery(Recovery::SkipToSemicolon)
    }

    /// Builder method to set the recovery strategy.
    #[must_use]
    pub fn with_recovery(mut self, recovery: Recovery) -> Self {
        self.recovery = recovery;
        self
    }
}
