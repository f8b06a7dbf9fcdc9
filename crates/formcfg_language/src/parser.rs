//! Generic statement parser.
//!
//! Recognizes `if` / `else if` / `else` blocks (nesting freely) and hands
//! every other statement to a [`Grammar`].
//!
//! ```text
//! if ( <conditions> ) { <statements> }
//! [else if ( <conditions> ) { <statements> }]*
//! [else { <statements> }]
//! ```

use std::path::Path;

use formcfg_foundation::{DiagnosticLog, Result, Severity};

use crate::condition::parse_conditions;
use crate::config::{MAX_NESTING_DEPTH, ParserConfig, Recovery};
use crate::grammar::Grammar;
use crate::reader::ConfigReader;
use crate::statement::{Branch, ConditionalStatement, Statement};

/// Parser for one configuration file.
pub struct Parser<G: Grammar> {
    reader: ConfigReader,
    grammar: G,
    config: ParserConfig,
    depth: usize,
}

impl<G: Grammar> Parser<G> {
    /// Creates a parser over a reader.
    #[must_use]
    pub fn new(reader: ConfigReader, grammar: G) -> Self {
        Self {
            reader,
            grammar,
            config: ParserConfig::default(),
            depth: 0,
        }
    }

    /// Creates a parser over in-memory text.
    #[must_use]
    pub fn from_text(source: &str, grammar: G) -> Self {
        Self::new(ConfigReader::from_text(source), grammar)
    }

    /// Creates a parser over a file. An unreadable file is logged and parses
    /// to nothing.
    #[must_use]
    pub fn from_path(path: &Path, grammar: G, log: &mut DiagnosticLog) -> Self {
        Self::new(ConfigReader::from_path(path, log), grammar)
    }

    /// Builder method to set the configuration.
    #[must_use]
    pub fn with_config(mut self, config: ParserConfig) -> Self {
        self.config = config;
        self
    }

    /// Returns the grammar.
    #[must_use]
    pub fn grammar(&self) -> &G {
        &self.grammar
    }

    /// Parses every statement in the file.
    ///
    /// Syntax errors are logged as warnings. With [`Recovery::Abort`] the
    /// first error ends the pass and only statements completed before it are
    /// returned; with [`Recovery::SkipToSemicolon`] parsing resumes after the
    /// failed statement, in the same block.
    pub fn parse(&mut self, log: &mut DiagnosticLog) -> Vec<Statement<G::Payload>> {
        let mut statements = Vec::new();

        while !self.reader.end_of_file() {
            match self.parse_statement(log) {
                Ok(statement) => statements.push(statement),
                Err(e) => {
                    log.report(Severity::Warning, &e);
                    match self.config.recovery {
                        Recovery::Abort => break,
                        Recovery::SkipToSemicolon => self.recover_from_error(false),
                    }
                }
            }
        }

        statements
    }

    fn parse_statement(&mut self, log: &mut DiagnosticLog) -> Result<Statement<G::Payload>> {
        if self.reader.peek() == "if" {
            if self.depth >= MAX_NESTING_DEPTH {
                self.reader.get_token();
                return Err(self.reader.error("nesting too deep"));
            }
            self.depth += 1;
            let conditional = self.parse_conditional_statement(log);
            self.depth -= 1;
            conditional.map(Statement::Conditional)
        } else {
            self.grammar
                .parse_expression_statement(&mut self.reader)
                .map(Statement::Expression)
        }
    }

    fn parse_conditional_statement(
        &mut self,
        log: &mut DiagnosticLog,
    ) -> Result<ConditionalStatement<G::Payload>> {
        self.reader.expect("if")?;
        let if_branch = self.parse_branch(log)?;
        let mut else_if_branches = Vec::new();
        let mut else_body = None;

        while self.reader.peek() == "else" {
            self.reader.get_token();
            if self.reader.accept("if") {
                else_if_branches.push(self.parse_branch(log)?);
            } else {
                // A bare else ends the chain.
                else_body = Some(self.parse_block(log)?);
                break;
            }
        }

        Ok(ConditionalStatement {
            if_branch,
            else_if_branches,
            else_body,
        })
    }

    /// Parses `( <conditions> ) { <statements> }`.
    fn parse_branch(&mut self, log: &mut DiagnosticLog) -> Result<Branch<G::Payload>> {
        self.reader.expect("(")?;
        let conditions = parse_conditions(&mut self.reader)?;
        self.reader.expect(")")?;
        let body = self.parse_block(log)?;
        Ok(Branch { conditions, body })
    }

    /// Parses `{ <statements> }`.
    fn parse_block(&mut self, log: &mut DiagnosticLog) -> Result<Vec<Statement<G::Payload>>> {
        self.reader.expect("{")?;
        let mut body = Vec::new();
        loop {
            let next = self.reader.peek();
            if next == "}" {
                self.reader.get_token();
                return Ok(body);
            }
            if next.is_empty() {
                return Err(self.reader.error("expected '}', found end of file"));
            }
            match self.parse_statement(log) {
                Ok(statement) => body.push(statement),
                Err(e) if self.config.recovery == Recovery::SkipToSemicolon => {
                    log.report(Severity::Warning, &e);
                    self.recover_from_error(true);
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// Discards the rest of a failed statement: tokens through the next `;`.
    ///
    /// A `{ ... }` run into on the way is skipped whole, together with any
    /// `else` blocks that follow it. Inside a block, skipping stops before the
    /// `}` that closes it.
    fn recover_from_error(&mut self, in_block: bool) {
        let mut depth = 0usize;
        loop {
            let token = self.reader.peek();
            match token.as_str() {
                "" => break,
                "}" if depth == 0 && in_block => break,
                "}" if depth > 0 => {
                    self.reader.get_token();
                    depth -= 1;
                    if depth == 0 && self.reader.peek() != "else" {
                        break;
                    }
                }
                "{" => {
                    self.reader.get_token();
                    depth += 1;
                }
                ";" if depth == 0 => {
                    self.reader.get_token();
                    break;
                }
                _ => {
                    self.reader.get_token();
                }
            }
        }
    }
}

/// Parses text with a grammar, aborting at the first syntax error.
pub fn parse_text<G: Grammar>(
    source: &str,
    grammar: G,
    log: &mut DiagnosticLog,
) -> Vec<Statement<G::Payload>> {
    Parser::from_text(source, grammar).parse(log)
}
