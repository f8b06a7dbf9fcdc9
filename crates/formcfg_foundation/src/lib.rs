//! Core types shared by every formcfg layer.
//!
//! This crate provides:
//! - [`Error`] - Rich error types with context
//! - [`DiagnosticLog`] - Bounded log of warnings and internal errors
//! - [`FormRef`] - Plugin-qualified form identifiers
//! - [`HostEnvironment`] - The host state condition guards query

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod diagnostics;
pub mod environment;
pub mod error;
pub mod form;

pub use diagnostics::{Diagnostic, DiagnosticLog, DiagnosticOutput, Severity};
pub use environment::HostEnvironment;
pub use error::{Error, ErrorContext, ErrorKind, Result};
pub use form::{FormRef, is_hex_string, strip_hex_prefix};
