//! The seam between the generic statement parser and a record type's vocabulary.

use formcfg_foundation::Result;

use crate::reader::ConfigReader;

/// A record type's expression-statement grammar.
///
/// The generic [`Parser`](crate::Parser) handles `if` / `else` blocks and
/// hands every other statement to the grammar.
pub trait Grammar {
    /// Parsed data for one expression statement.
    type Payload;

    /// Parses one statement, including its terminating `;`.
    ///
    /// # Errors
    ///
    /// Returns a syntax error positioned at the offending token.
    fn parse_expression_statement(&mut self, reader: &mut ConfigReader) -> Result<Self::Payload>;

    /// Renders a payload back to configuration syntax at the given nesting level.
    fn print_expression_statement(&self, payload: &Self::Payload, indent: usize) -> String;
}

/// Indentation for a nesting level.
#[must_use]
pub fn indent(level: usize) -> String {
    "    ".repeat(level)
}
