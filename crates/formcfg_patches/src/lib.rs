//! Record-type grammars and apply logic for formcfg.
//!
//! This crate provides:
//! - [`ArmorGrammar`] - Armor statements (generic parser, abort on error)
//! - [`KeywordGrammar`] - Keyword statements (line-by-line recovery)
//! - [`Patch`] and [`apply_statements`] - The apply phase
//! - [`PatchFile`] - One parsed file of any registered record type

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod armor;
pub mod keyword;
pub mod module;
pub mod patch;

pub use armor::{ArmorElement, ArmorFilter, ArmorGrammar, ArmorOperation, ArmorPatch, MAX_ARMOR_STAT};
pub use keyword::{KeywordFilter, KeywordGrammar, KeywordPatch};
pub use module::{PATCH_ORDER, PatchFile};
pub use patch::{Patch, apply_statements};
