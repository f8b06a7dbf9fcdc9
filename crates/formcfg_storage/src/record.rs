//! Record data stored per form.

use std::fmt;

use formcfg_foundation::FormRef;

/// The record types the store knows about.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RecordType {
    /// `ARMO`
    Armor,
    /// `KYWD`
    Keyword,
}

impl RecordType {
    /// Returns the human-readable record type name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Armor => "Armor",
            Self::Keyword => "Keyword",
        }
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An armor record.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ArmorRecord {
    /// Display name.
    pub full_name: String,
    /// Occupied biped slots; bit `n` is slot `30 + n`.
    pub biped_slots: u32,
    /// Base armor rating.
    pub armor_rating: f32,
    /// Weight.
    pub weight: f32,
    /// Gold value.
    pub value: u32,
    /// Attached keywords, in insertion order.
    pub keywords: Vec<FormRef>,
}

impl ArmorRecord {
    /// Returns true if the armor carries the keyword.
    #[must_use]
    pub fn has_keyword(&self, keyword: &FormRef) -> bool {
        self.keywords.contains(keyword)
    }
}

/// A keyword record.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct KeywordRecord {}

/// Typed record payload.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Record {
    /// Armor data.
    Armor(ArmorRecord),
    /// Keyword data.
    Keyword(KeywordRecord),
}

impl Record {
    /// Returns the record's type.
    #[must_use]
    pub const fn record_type(&self) -> RecordType {
        match self {
            Self::Armor(_) => RecordType::Armor,
            Self::Keyword(_) => RecordType::Keyword,
        }
    }
}

/// A live form: an editor ID plus typed record data.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Form {
    /// Editor ID, if the form has one.
    pub editor_id: Option<String>,
    /// Record data.
    pub record: Record,
}

impl Form {
    /// Creates a form without an editor ID.
    #[must_use]
    pub fn new(record: Record) -> Self {
        Self {
            editor_id: None,
            record,
        }
    }

    /// Builder method to set the editor ID.
    #[must_use]
    pub fn with_editor_id(mut self, editor_id: impl Into<String>) -> Self {
        self.editor_id = Some(editor_id.into());
        self
    }

    /// Returns the armor data, if this is an armor form.
    #[must_use]
    pub fn as_armor(&self) -> Option<&ArmorRecord> {
        match &self.record {
            Record::Armor(armor) => Some(armor),
            Record::Keyword(_) => None,
        }
    }

    /// Returns mutable armor data, if this is an armor form.
    pub fn as_armor_mut(&mut self) -> Option<&mut ArmorRecord> {
        match &mut self.record {
            Record::Armor(armor) => Some(armor),
            Record::Keyword(_) => None,
        }
    }
}
