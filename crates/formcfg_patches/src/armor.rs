//! Armor patches.
//!
//! ```text
//! FilterByFormID("Plugin.esp"|800).BipedObjectSlots = 32 | 33;
//! FilterByKeyword("Skyrim.esm"|6BBD3).BipedObjectSlots.Add(45).Remove(32);
//! FilterByFormID("Plugin.esp"|800).FullName = "Iron Helmet";
//! FilterByFormID("Plugin.esp"|800).ArmorRating = 15.5;
//! FilterByFormID("Plugin.esp"|800).Weight = 4;
//! FilterByFormID("Plugin.esp"|800).Value = 60;
//! FilterByFormID("Plugin.esp"|800).Keywords.Clear().Add("Skyrim.esm"|6BBD3);
//! ```

use std::fmt::Write;

use formcfg_foundation::{DiagnosticLog, Error, FormRef, Result};
use formcfg_language::{
    ConfigReader, FIRST_BIPED_SLOT, Grammar, LAST_BIPED_SLOT, biped_slot_flag, format_form,
    get_biped_slots, indent,
};
use formcfg_storage::{ArmorRecord, FormStore, RecordType};

use crate::patch::{Patch, warn_on_error};

/// Largest armor rating or weight a patch may set.
pub const MAX_ARMOR_STAT: i64 = 100_000;

// =============================================================================
// Payload
// =============================================================================

/// Which armors a patch targets.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ArmorFilter {
    /// One armor, by form reference.
    FormId(String),
    /// Every armor carrying a keyword.
    Keyword(String),
}

/// The armor field a patch edits.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArmorElement {
    /// Occupied biped slots.
    BipedObjectSlots,
    /// Display name.
    FullName,
    /// Base armor rating.
    ArmorRating,
    /// Weight.
    Weight,
    /// Gold value.
    Value,
    /// Attached keywords.
    Keywords,
}

impl ArmorElement {
    /// Looks up an element by its keyword.
    #[must_use]
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "BipedObjectSlots" => Some(Self::BipedObjectSlots),
            "FullName" => Some(Self::FullName),
            "ArmorRating" => Some(Self::ArmorRating),
            "Weight" => Some(Self::Weight),
            "Value" => Some(Self::Value),
            "Keywords" => Some(Self::Keywords),
            _ => None,
        }
    }

    /// Returns the element's keyword.
    #[must_use]
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::BipedObjectSlots => "BipedObjectSlots",
            Self::FullName => "FullName",
            Self::ArmorRating => "ArmorRating",
            Self::Weight => "Weight",
            Self::Value => "Value",
            Self::Keywords => "Keywords",
        }
    }
}

/// One edit to an armor field.
#[derive(Clone, Debug, PartialEq)]
pub enum ArmorOperation {
    /// Replace the slot flags.
    SetSlots(u32),
    /// Set the given slot flags.
    AddSlots(u32),
    /// Clear the given slot flags.
    RemoveSlots(u32),
    /// Clear every slot.
    ClearSlots,
    /// Replace the display name.
    SetFullName(String),
    /// Replace the armor rating.
    SetArmorRating(f64),
    /// Replace the weight.
    SetWeight(f64),
    /// Replace the gold value.
    SetValue(i64),
    /// Attach keywords, by form reference.
    AddKeywords(Vec<String>),
    /// Detach keywords, by form reference.
    RemoveKeywords(Vec<String>),
    /// Detach every keyword.
    ClearKeywords,
}

/// One parsed armor statement.
#[derive(Clone, Debug, PartialEq)]
pub struct ArmorPatch {
    /// Which armors to edit.
    pub filter: ArmorFilter,
    /// Which field to edit.
    pub element: ArmorElement,
    /// Edits in source order.
    pub operations: Vec<ArmorOperation>,
}

// =============================================================================
// Grammar
// =============================================================================

/// The armor statement grammar.
#[derive(Clone, Copy, Debug, Default)]
pub struct ArmorGrammar;

impl Grammar for ArmorGrammar {
    type Payload = ArmorPatch;

    fn parse_expression_statement(&mut self, reader: &mut ConfigReader) -> Result<ArmorPatch> {
        let filter = parse_filter(reader)?;
        reader.expect(".")?;

        let keyword = reader.get_token();
        let element = ArmorElement::from_keyword(&keyword)
            .ok_or_else(|| reader.error(format!("invalid element '{keyword}'")))?;

        let operations = match element {
            ArmorElement::BipedObjectSlots => {
                if reader.accept("=") {
                    vec![ArmorOperation::SetSlots(parse_slot_set(reader)?)]
                } else {
                    parse_list_operations(reader, element)?
                }
            }
            ArmorElement::Keywords => parse_list_operations(reader, element)?,
            ArmorElement::FullName => {
                reader.expect("=")?;
                vec![ArmorOperation::SetFullName(reader.parse_string()?)]
            }
            ArmorElement::ArmorRating => {
                reader.expect("=")?;
                vec![ArmorOperation::SetArmorRating(reader.parse_number()?)]
            }
            ArmorElement::Weight => {
                reader.expect("=")?;
                vec![ArmorOperation::SetWeight(reader.parse_number()?)]
            }
            ArmorElement::Value => {
                reader.expect("=")?;
                vec![ArmorOperation::SetValue(reader.parse_integer()?)]
            }
        };

        reader.expect(";")?;
        Ok(ArmorPatch {
            filter,
            element,
            operations,
        })
    }

    fn print_expression_statement(&self, payload: &ArmorPatch, level: usize) -> String {
        let mut out = indent(level);
        match &payload.filter {
            ArmorFilter::FormId(form) => {
                let _ = write!(out, "FilterByFormID({})", format_form(form));
            }
            ArmorFilter::Keyword(form) => {
                let _ = write!(out, "FilterByKeyword({})", format_form(form));
            }
        }
        out.push('.');
        out.push_str(payload.element.keyword());

        for operation in &payload.operations {
            let _ = match operation {
                ArmorOperation::SetSlots(flags) => write!(out, " = {}", get_biped_slots(*flags)),
                ArmorOperation::AddSlots(flags) => write!(out, ".Add({})", slot_arguments(*flags)),
                ArmorOperation::RemoveSlots(flags) => {
                    write!(out, ".Remove({})", slot_arguments(*flags))
                }
                ArmorOperation::ClearSlots | ArmorOperation::ClearKeywords => {
                    write!(out, ".Clear()")
                }
                ArmorOperation::SetFullName(name) => write!(out, " = \"{name}\""),
                ArmorOperation::SetArmorRating(value) | ArmorOperation::SetWeight(value) => {
                    write!(out, " = {value}")
                }
                ArmorOperation::SetValue(value) => write!(out, " = {value}"),
                ArmorOperation::AddKeywords(forms) => {
                    write!(out, ".Add({})", form_arguments(forms))
                }
                ArmorOperation::RemoveKeywords(forms) => {
                    write!(out, ".Remove({})", form_arguments(forms))
                }
            };
        }

        out.push(';');
        out
    }
}

fn parse_filter(reader: &mut ConfigReader) -> Result<ArmorFilter> {
    let keyword = reader.get_token();
    let filter: fn(String) -> ArmorFilter = match keyword.as_str() {
        "FilterByFormID" => ArmorFilter::FormId,
        "FilterByKeyword" => ArmorFilter::Keyword,
        _ => return Err(reader.error(format!("invalid filter '{keyword}'"))),
    };
    reader.expect("(")?;
    let form = reader.parse_form()?;
    reader.expect(")")?;
    Ok(filter(form))
}

/// `slot | slot | ...`
fn parse_slot_set(reader: &mut ConfigReader) -> Result<u32> {
    let mut flags = 0;
    loop {
        flags |= biped_slot_flag(reader.parse_biped_slot()?);
        if !reader.accept("|") {
            return Ok(flags);
        }
    }
}

/// `.Add(args).Remove(args).Clear()...`, at least one.
fn parse_list_operations(
    reader: &mut ConfigReader,
    element: ArmorElement,
) -> Result<Vec<ArmorOperation>> {
    let mut operations = Vec::new();

    while reader.accept(".") {
        let name = reader.get_token();
        reader.expect("(")?;
        let operation = match (name.as_str(), element) {
            ("Clear", ArmorElement::BipedObjectSlots) => {
                reader.expect(")")?;
                ArmorOperation::ClearSlots
            }
            ("Clear", _) => {
                reader.expect(")")?;
                ArmorOperation::ClearKeywords
            }
            ("Add", ArmorElement::BipedObjectSlots) => {
                ArmorOperation::AddSlots(parse_slot_arguments(reader)?)
            }
            ("Remove", ArmorElement::BipedObjectSlots) => {
                ArmorOperation::RemoveSlots(parse_slot_arguments(reader)?)
            }
            ("Add", _) => {
                ArmorOperation::AddKeywords(parse_arguments(reader, ConfigReader::parse_form)?)
            }
            ("Remove", _) => {
                ArmorOperation::RemoveKeywords(parse_arguments(reader, ConfigReader::parse_form)?)
            }
            _ => return Err(reader.error(format!("invalid operation '{name}'"))),
        };
        operations.push(operation);
    }

    if operations.is_empty() {
        let found = reader.peek();
        return Err(reader.error(format!(
            "expected an operation on {}, found '{found}'",
            element.keyword()
        )));
    }
    Ok(operations)
}

/// `slot, slot, ... )`, folded into one flag set.
fn parse_slot_arguments(reader: &mut ConfigReader) -> Result<u32> {
    let slots = parse_arguments(reader, ConfigReader::parse_biped_slot)?;
    Ok(slots.into_iter().fold(0, |flags, slot| flags | biped_slot_flag(slot)))
}

/// `arg, arg, ... )` with the opening `(` already consumed.
fn parse_arguments<T>(
    reader: &mut ConfigReader,
    mut parse: impl FnMut(&mut ConfigReader) -> Result<T>,
) -> Result<Vec<T>> {
    let mut arguments = vec![parse(reader)?];
    while reader.accept(",") {
        arguments.push(parse(reader)?);
    }
    reader.expect(")")?;
    Ok(arguments)
}

fn slot_arguments(flags: u32) -> String {
    let slots: Vec<String> = (FIRST_BIPED_SLOT..=LAST_BIPED_SLOT)
        .filter(|&slot| flags & biped_slot_flag(slot) != 0)
        .map(|slot| slot.to_string())
        .collect();
    if slots.is_empty() {
        "0".to_string()
    } else {
        slots.join(", ")
    }
}

fn form_arguments(forms: &[String]) -> String {
    forms
        .iter()
        .map(|form| format_form(form))
        .collect::<Vec<_>>()
        .join(", ")
}

// =============================================================================
// Apply
// =============================================================================

impl Patch for ArmorPatch {
    const RECORD_TYPE: RecordType = RecordType::Armor;

    fn apply(&self, store: &mut FormStore, log: &mut DiagnosticLog) {
        let Some(targets) = warn_on_error(Self::RECORD_TYPE, self.targets(store), log) else {
            return;
        };

        for target in &targets {
            for operation in &self.operations {
                let result = apply_operation(store, target, operation);
                warn_on_error(Self::RECORD_TYPE, result, log);
            }
        }
    }
}

impl ArmorPatch {
    /// Resolves the filter to the armors it selects.
    ///
    /// # Errors
    ///
    /// Returns an error if the filter's form does not resolve, or resolves to
    /// the wrong record type.
    pub fn targets(&self, store: &FormStore) -> Result<Vec<FormRef>> {
        match &self.filter {
            ArmorFilter::FormId(form) => Ok(vec![store.resolve_typed(form, RecordType::Armor)?]),
            ArmorFilter::Keyword(form) => {
                let keyword = store.resolve_typed(form, RecordType::Keyword)?;
                Ok(store.armors_with_keyword(&keyword))
            }
        }
    }
}

fn apply_operation(
    store: &mut FormStore,
    target: &FormRef,
    operation: &ArmorOperation,
) -> Result<()> {
    // Keyword references resolve against the store before the armor is borrowed.
    let keywords = match operation {
        ArmorOperation::AddKeywords(forms) | ArmorOperation::RemoveKeywords(forms) => forms
            .iter()
            .map(|form| store.resolve_typed(form, RecordType::Keyword))
            .collect::<Result<Vec<_>>>()?,
        _ => Vec::new(),
    };

    let armor = armor_mut(store, target)?;
    match operation {
        ArmorOperation::SetSlots(flags) => armor.biped_slots = *flags,
        ArmorOperation::AddSlots(flags) => armor.biped_slots |= flags,
        ArmorOperation::RemoveSlots(flags) => armor.biped_slots &= !flags,
        ArmorOperation::ClearSlots => armor.biped_slots = 0,
        ArmorOperation::SetFullName(name) => armor.full_name.clone_from(name),
        ArmorOperation::SetArmorRating(value) => {
            armor.armor_rating = checked_stat("armor rating", *value)?;
        }
        ArmorOperation::SetWeight(value) => armor.weight = checked_stat("weight", *value)?,
        ArmorOperation::SetValue(value) => {
            armor.value = u32::try_from(*value).map_err(|_| {
                Error::out_of_range("value", value.to_string(), 0, i64::from(u32::MAX))
            })?;
        }
        ArmorOperation::AddKeywords(_) => {
            for keyword in keywords {
                if !armor.has_keyword(&keyword) {
                    armor.keywords.push(keyword);
                }
            }
        }
        ArmorOperation::RemoveKeywords(_) => {
            armor.keywords.retain(|k| !keywords.contains(k));
        }
        ArmorOperation::ClearKeywords => armor.keywords.clear(),
    }
    Ok(())
}

fn armor_mut<'a>(store: &'a mut FormStore, target: &FormRef) -> Result<&'a mut ArmorRecord> {
    let form = store
        .get_mut(target)
        .ok_or_else(|| Error::unknown_form(target.to_string()))?;
    let actual = form.record.record_type();
    form.as_armor_mut().ok_or_else(|| {
        Error::wrong_form_type(target.to_string(), RecordType::Armor.name(), actual.name())
    })
}

#[allow(clippy::cast_possible_truncation)]
fn checked_stat(what: &'static str, value: f64) -> Result<f32> {
    #[allow(clippy::cast_precision_loss)]
    let max = MAX_ARMOR_STAT as f64;
    if (0.0..=max).contains(&value) {
        Ok(value as f32)
    } else {
        Err(Error::out_of_range(what, value.to_string(), 0, MAX_ARMOR_STAT))
    }
}
