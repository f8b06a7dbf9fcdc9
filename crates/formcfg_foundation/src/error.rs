//! Error types for formcfg.
//!
//! Uses `thiserror` for ergonomic error definition with rich context.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// The main error type for formcfg operations.
#[derive(Debug, Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional context about where the error occurred.
    pub context: Option<ErrorContext>,
}

/// Result alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Creates a new error with the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: None,
        }
    }

    /// Adds context to this error.
    #[must_use]
    pub fn with_context(mut self, context: ErrorContext) -> Self {
        self.context = Some(context);
        self
    }

    /// Creates a syntax error at a source position.
    #[must_use]
    pub fn parse(message: impl Into<String>, line: u32, column: u32) -> Self {
        Self::new(ErrorKind::ParseError {
            message: message.into(),
            line,
            column,
        })
    }

    /// Creates an error for a form reference that resolves to nothing.
    #[must_use]
    pub fn unknown_form(form: impl Into<String>) -> Self {
        Self::new(ErrorKind::UnknownForm(form.into()))
    }

    /// Creates an error for a form of the wrong record type.
    #[must_use]
    pub fn wrong_form_type(form: impl Into<String>, expected: &'static str, actual: &'static str) -> Self {
        Self::new(ErrorKind::WrongFormType {
            form: form.into(),
            expected,
            actual,
        })
    }

    /// Creates a value-out-of-range error.
    #[must_use]
    pub fn out_of_range(what: &'static str, value: impl Into<String>, min: i64, max: i64) -> Self {
        Self::new(ErrorKind::OutOfRange {
            what,
            value: value.into(),
            min,
            max,
        })
    }

    /// Creates an internal consistency error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal(message.into()))
    }

    /// Returns the source position of a parse error, if this is one.
    #[must_use]
    pub fn position(&self) -> Option<(u32, u32)> {
        match &self.kind {
            ErrorKind::ParseError { line, column, .. } => Some((*line, *column)),
            _ => None,
        }
    }
}

/// Categorized error kinds for pattern matching.
#[derive(Debug, Error)]
pub enum ErrorKind {
    /// Syntax error in a configuration file.
    #[error("Line {line}, Col {column}: {message}")]
    ParseError {
        /// Description of the syntax error.
        message: String,
        /// Line number (1-indexed).
        line: u32,
        /// Column number (1-indexed).
        column: u32,
    },

    /// A form reference did not resolve to a live form.
    #[error("form not found: {0}")]
    UnknownForm(String),

    /// A form resolved, but to a record of another type.
    #[error("form {form} is a {actual}, expected {expected}")]
    WrongFormType {
        /// The form reference.
        form: String,
        /// The record type the operation needs.
        expected: &'static str,
        /// The record type actually found.
        actual: &'static str,
    },

    /// A value fell outside its declared numeric range.
    #[error("{what} {value} out of range [{min}, {max}]")]
    OutOfRange {
        /// What was being set.
        what: &'static str,
        /// The offending value as written.
        value: String,
        /// Inclusive lower bound.
        min: i64,
        /// Inclusive upper bound.
        max: i64,
    },

    /// File system failure.
    #[error("I/O error: {0}")]
    IoError(String),

    /// Snapshot encoding or decoding failure.
    #[error("serialization error: {0}")]
    SerializationError(String),

    /// Internal error (should not happen).
    #[error("internal error: {0}")]
    Internal(String),
}

/// Context about where an error occurred.
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// Configuration file being processed.
    pub file: Option<PathBuf>,
    /// Record type whose grammar was active.
    pub record_type: Option<String>,
}

impl ErrorContext {
    /// Creates a new empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the source file.
    #[must_use]
    pub fn with_file(mut self, file: impl Into<PathBuf>) -> Self {
        self.file = Some(file.into());
        self
    }

    /// Sets the record type.
    #[must_use]
    pub fn with_record_type(mut self, record_type: impl Into<String>) -> Self {
        self.record_type = Some(record_type.into());
        self
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(record_type) = &self.record_type {
            write!(f, "[{record_type}]")?;
        }
        if let Some(file) = &self.file {
            if self.record_type.is_some() {
                write!(f, " ")?;
            }
            write!(f, "{}", file.display())?;
        }
        Ok(())
    }
}
