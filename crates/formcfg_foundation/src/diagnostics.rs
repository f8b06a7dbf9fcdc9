//! Diagnostic log for configuration processing.
//!
//! Every syntax error, semantic apply error, and internal invariant violation
//! is recorded here. The log is a bounded buffer that keeps the most recent
//! entries and can echo each entry to stderr as it arrives.

use std::collections::VecDeque;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::{Error, ErrorKind};

// =============================================================================
// Severity
// =============================================================================

/// How serious a diagnostic is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    /// A recoverable problem; processing continues.
    Warning,
    /// A failure that skipped a whole file or operation.
    Error,
    /// An internal consistency violation.
    Critical,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Warning => write!(f, "warning"),
            Self::Error => write!(f, "error"),
            Self::Critical => write!(f, "critical"),
        }
    }
}

// =============================================================================
// Diagnostic
// =============================================================================

/// A single logged message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Diagnostic {
    /// How serious the message is.
    pub severity: Severity,
    /// File being processed when the message was logged.
    pub file: Option<PathBuf>,
    /// Source position, when the message refers to one.
    pub position: Option<(u32, u32)>,
    /// Message text.
    pub message: String,
}

impl Diagnostic {
    /// Creates a diagnostic without a source position.
    #[must_use]
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            file: None,
            position: None,
            message: message.into(),
        }
    }

    /// Creates a diagnostic at a source position.
    #[must_use]
    pub fn at(severity: Severity, line: u32, column: u32, message: impl Into<String>) -> Self {
        Self {
            position: Some((line, column)),
            ..Self::new(severity, message)
        }
    }

    /// Builds a diagnostic from an error, keeping its position if it has one.
    ///
    /// A record type in the error's context prefixes the message; a file in
    /// the context becomes the diagnostic's file.
    #[must_use]
    pub fn from_error(severity: Severity, error: &Error) -> Self {
        let mut diagnostic = match &error.kind {
            ErrorKind::ParseError {
                message,
                line,
                column,
            } => Self::at(severity, *line, *column, message.clone()),
            _ => Self::new(severity, error.to_string()),
        };
        if let Some(context) = &error.context {
            if let Some(record_type) = &context.record_type {
                diagnostic.message = format!("[{record_type}] {}", diagnostic.message);
            }
            diagnostic.file.clone_from(&context.file);
        }
        diagnostic
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: ", self.severity)?;
        if let Some(file) = &self.file {
            write!(f, "{}: ", file.display())?;
        }
        if let Some((line, column)) = self.position {
            write!(f, "Line {line}, Col {column}: ")?;
        }
        write!(f, "{}", self.message)
    }
}

// =============================================================================
// Output
// =============================================================================

/// Where diagnostics are echoed as they are logged.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DiagnosticOutput {
    /// Keep diagnostics in the buffer only.
    #[default]
    None,
    /// Also write each diagnostic to stderr.
    Stderr,
}

// =============================================================================
// Diagnostic Log
// =============================================================================

/// A bounded log of diagnostics, oldest first.
#[derive(Clone, Debug)]
pub struct DiagnosticLog {
    entries: VecDeque<Diagnostic>,
    max_size: usize,
    output: DiagnosticOutput,
    current_file: Option<PathBuf>,
    /// Counts by severity, including evicted entries.
    counts: [usize; 3],
}

impl Default for DiagnosticLog {
    fn default() -> Self {
        Self::new(10_000)
    }
}

impl DiagnosticLog {
    /// Creates a log that keeps at most `max_size` entries.
    #[must_use]
    pub fn new(max_size: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(max_size.min(256)),
            max_size,
            output: DiagnosticOutput::None,
            current_file: None,
            counts: [0; 3],
        }
    }

    /// Builder method to echo diagnostics somewhere.
    #[must_use]
    pub fn with_output(mut self, output: DiagnosticOutput) -> Self {
        self.output = output;
        self
    }

    /// Tags subsequent diagnostics with the given file.
    pub fn set_current_file(&mut self, file: Option<&Path>) {
        self.current_file = file.map(Path::to_path_buf);
    }

    /// Records a diagnostic, tagging it with the current file if it has none.
    pub fn push(&mut self, mut diagnostic: Diagnostic) {
        if diagnostic.file.is_none() {
            diagnostic.file.clone_from(&self.current_file);
        }
        if self.output == DiagnosticOutput::Stderr {
            eprintln!("{diagnostic}");
        }
        self.counts[diagnostic.severity as usize] += 1;
        self.entries.push_back(diagnostic);
        while self.entries.len() > self.max_size {
            self.entries.pop_front();
        }
    }

    /// Logs a warning without a position.
    pub fn warn(&mut self, message: impl Into<String>) {
        self.push(Diagnostic::new(Severity::Warning, message));
    }

    /// Logs an error value at the given severity.
    pub fn report(&mut self, severity: Severity, error: &Error) {
        self.push(Diagnostic::from_error(severity, error));
    }

    /// Returns the number of retained entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing has been retained.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns how many diagnostics of a severity were ever logged.
    #[must_use]
    pub fn count(&self, severity: Severity) -> usize {
        self.counts[severity as usize]
    }

    /// Returns an iterator over retained entries, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.entries.iter()
    }

    /// Returns retained entries logged for one file.
    #[must_use]
    pub fn for_file(&self, file: &Path) -> Vec<&Diagnostic> {
        self.entries
            .iter()
            .filter(|d| d.file.as_deref() == Some(file))
            .collect()
    }
}
