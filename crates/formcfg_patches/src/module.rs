//! Dispatch over the registered record types.
//!
//! Each record type has its own grammar, parser configuration, and payload
//! type. [`PatchFile`] hides that behind one value per parsed file so the
//! session can hold every file's statements in a single list.

use std::path::Path;

use formcfg_foundation::DiagnosticLog;
use formcfg_language::{ConfigReader, Parser, ParserConfig, Statement, pretty_print};
use formcfg_storage::{FormStore, RecordType};

use crate::armor::{ArmorGrammar, ArmorPatch};
use crate::keyword::{KeywordGrammar, KeywordPatch};
use crate::patch::apply_statements;

/// Record types in the order their files are read and applied.
pub const PATCH_ORDER: [RecordType; 2] = [RecordType::Keyword, RecordType::Armor];

/// The parsed statements of one configuration file.
#[derive(Clone, Debug, PartialEq)]
pub enum PatchFile {
    /// Armor statements.
    Armor(Vec<Statement<ArmorPatch>>),
    /// Keyword statements.
    Keyword(Vec<Statement<KeywordPatch>>),
}

impl PatchFile {
    /// Parses a file with the record type's grammar.
    #[must_use]
    pub fn read(record_type: RecordType, path: &Path, log: &mut DiagnosticLog) -> Self {
        Self::parse(record_type, ConfigReader::from_path(path, log), log)
    }

    /// Parses in-memory text with the record type's grammar.
    #[must_use]
    pub fn from_text(record_type: RecordType, source: &str, log: &mut DiagnosticLog) -> Self {
        Self::parse(record_type, ConfigReader::from_text(source), log)
    }

    fn parse(record_type: RecordType, reader: ConfigReader, log: &mut DiagnosticLog) -> Self {
        match record_type {
            RecordType::Armor => Self::Armor(
                Parser::new(reader, ArmorGrammar)
                    .with_config(ParserConfig::default())
                    .parse(log),
            ),
            RecordType::Keyword => Self::Keyword(
                Parser::new(reader, KeywordGrammar)
                    .with_config(KeywordGrammar::parser_config())
                    .parse(log),
            ),
        }
    }

    /// Returns the record type the file was parsed as.
    #[must_use]
    pub const fn record_type(&self) -> RecordType {
        match self {
            Self::Armor(_) => RecordType::Armor,
            Self::Keyword(_) => RecordType::Keyword,
        }
    }

    /// Returns the number of top-level statements.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Armor(statements) => statements.len(),
            Self::Keyword(statements) => statements.len(),
        }
    }

    /// Returns true if nothing parsed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Applies the statements to the store.
    pub fn apply(&self, store: &mut FormStore, log: &mut DiagnosticLog) {
        match self {
            Self::Armor(statements) => apply_statements(statements, store, log),
            Self::Keyword(statements) => apply_statements(statements, store, log),
        }
    }

    /// Renders the statements back to configuration syntax.
    #[must_use]
    pub fn pretty(&self) -> String {
        match self {
            Self::Armor(statements) => pretty_print(&ArmorGrammar, statements),
            Self::Keyword(statements) => pretty_print(&KeywordGrammar, statements),
        }
    }
}
