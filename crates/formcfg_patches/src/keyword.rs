//! Keyword patches.
//!
//! Keyword files are parsed line by line: a malformed statement is skipped
//! through its `;` and parsing resumes with the next one.
//!
//! ```text
//! FilterByFormID("Skyrim.esm"|6BBD3).EditorID = "ArmorHeavy";
//! FilterByEditorID("ArmorHeavy").EditorID = "ArmorPlate";
//! ```

use formcfg_foundation::{DiagnosticLog, Error, FormRef, Result};
use formcfg_language::{ConfigReader, Grammar, ParserConfig, format_form, indent};
use formcfg_storage::{FormStore, RecordType};

use crate::patch::{Patch, warn_on_error};

/// Which keyword a patch targets.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum KeywordFilter {
    /// By form reference.
    FormId(String),
    /// By current editor ID.
    EditorId(String),
}

/// One parsed keyword statement: a new editor ID.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeywordPatch {
    /// Which keyword to rename.
    pub filter: KeywordFilter,
    /// The editor ID to give it.
    pub editor_id: String,
}

/// The keyword statement grammar.
#[derive(Clone, Copy, Debug, Default)]
pub struct KeywordGrammar;

impl KeywordGrammar {
    /// Keyword files recover after each bad statement.
    #[must_use]
    pub fn parser_config() -> ParserConfig {
        ParserConfig::recovering()
    }
}

impl Grammar for KeywordGrammar {
    type Payload = KeywordPatch;

    fn parse_expression_statement(&mut self, reader: &mut ConfigReader) -> Result<KeywordPatch> {
        let keyword = reader.get_token();
        reader.expect("(")?;
        let filter = match keyword.as_str() {
            "FilterByFormID" => KeywordFilter::FormId(reader.parse_form()?),
            "FilterByEditorID" => KeywordFilter::EditorId(reader.parse_string()?),
            _ => return Err(reader.error(format!("invalid filter '{keyword}'"))),
        };
        reader.expect(")")?;
        reader.expect(".")?;
        reader.expect("EditorID")?;
        reader.expect("=")?;
        let editor_id = reader.parse_string()?;
        if editor_id.is_empty() || editor_id.chars().any(char::is_whitespace) {
            return Err(reader.error(format!("invalid editor ID \"{editor_id}\"")));
        }
        reader.expect(";")?;
        Ok(KeywordPatch { filter, editor_id })
    }

    fn print_expression_statement(&self, payload: &KeywordPatch, level: usize) -> String {
        let filter = match &payload.filter {
            KeywordFilter::FormId(form) => format!("FilterByFormID({})", format_form(form)),
            KeywordFilter::EditorId(id) => format!("FilterByEditorID(\"{id}\")"),
        };
        format!("{}{filter}.EditorID = \"{}\";", indent(level), payload.editor_id)
    }
}

impl KeywordPatch {
    /// Resolves the filter to a live keyword.
    ///
    /// # Errors
    ///
    /// Returns an error if nothing matches or the match is not a keyword.
    /// Editor IDs are only looked up among keywords.
    pub fn target(&self, store: &FormStore) -> Result<FormRef> {
        match &self.filter {
            KeywordFilter::FormId(form) => store.resolve_typed(form, RecordType::Keyword),
            KeywordFilter::EditorId(id) => {
                let form = store
                    .forms_of_type(RecordType::Keyword)
                    .find(|(_, form)| {
                        form.editor_id
                            .as_deref()
                            .is_some_and(|editor_id| editor_id.eq_ignore_ascii_case(id))
                    })
                    .map(|(form_ref, _)| form_ref.to_string())
                    .ok_or_else(|| Error::unknown_form(format!("keyword editor ID {id}")))?;
                store.resolve_typed(&form, RecordType::Keyword)
            }
        }
    }
}

impl Patch for KeywordPatch {
    const RECORD_TYPE: RecordType = RecordType::Keyword;

    fn apply(&self, store: &mut FormStore, log: &mut DiagnosticLog) {
        let Some(target) = warn_on_error(Self::RECORD_TYPE, self.target(store), log) else {
            return;
        };
        if let Some(form) = store.get_mut(&target) {
            form.editor_id = Some(self.editor_id.clone());
        }
    }
}
