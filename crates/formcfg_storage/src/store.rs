//! The form store.
//!
//! `FormStore` holds the active plugin load order and every live form. It
//! uses persistent collections, so cloning a store to keep a pre-patch
//! snapshot is O(1) and shares structure with the patched copy.

use formcfg_foundation::{Error, FormRef, HostEnvironment, Result};
use im::{OrdMap, Vector};

use crate::record::{Form, RecordType};

/// Active plugins plus live forms.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FormStore {
    plugins: Vector<String>,
    forms: OrdMap<FormRef, Form>,
}

impl FormStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to activate a plugin.
    #[must_use]
    pub fn with_plugin(mut self, plugin: impl Into<String>) -> Self {
        self.activate_plugin(plugin);
        self
    }

    /// Builder method to add a form.
    #[must_use]
    pub fn with_form(mut self, form_ref: FormRef, form: Form) -> Self {
        self.insert(form_ref, form);
        self
    }

    /// Appends a plugin to the active load order. Already-active plugins are ignored.
    pub fn activate_plugin(&mut self, plugin: impl Into<String>) {
        let plugin = plugin.into();
        if !self.is_plugin_active(&plugin) {
            self.plugins.push_back(plugin);
        }
    }

    /// Removes a plugin from the active load order.
    pub fn deactivate_plugin(&mut self, plugin: &str) {
        self.plugins.retain(|p| !p.eq_ignore_ascii_case(plugin));
    }

    /// Returns the active plugins in load order.
    pub fn plugins(&self) -> impl Iterator<Item = &str> {
        self.plugins.iter().map(String::as_str)
    }

    /// Inserts or replaces a form.
    pub fn insert(&mut self, form_ref: FormRef, form: Form) {
        self.forms.insert(form_ref, form);
    }

    /// Removes a form, returning it if it existed.
    pub fn remove(&mut self, form_ref: &FormRef) -> Option<Form> {
        self.forms.remove(form_ref)
    }

    /// Looks up a form.
    #[must_use]
    pub fn get(&self, form_ref: &FormRef) -> Option<&Form> {
        self.forms.get(form_ref)
    }

    /// Looks up a form for modification.
    pub fn get_mut(&mut self, form_ref: &FormRef) -> Option<&mut Form> {
        self.forms.get_mut(form_ref)
    }

    /// Resolves a form reference string (`Plugin|hex`) to a live form.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is malformed, or the form is not live.
    pub fn resolve(&self, reference: &str) -> Result<FormRef> {
        let form_ref: FormRef = reference.parse()?;
        if self.is_form_live(&form_ref) {
            Ok(form_ref)
        } else {
            Err(Error::unknown_form(reference))
        }
    }

    /// Resolves a form reference and checks its record type.
    ///
    /// # Errors
    ///
    /// Returns an error if the form does not resolve or has another type.
    pub fn resolve_typed(&self, reference: &str, expected: RecordType) -> Result<FormRef> {
        let form_ref = self.resolve(reference)?;
        let actual = self
            .get(&form_ref)
            .map(|form| form.record.record_type())
            .ok_or_else(|| Error::unknown_form(reference))?;
        if actual == expected {
            Ok(form_ref)
        } else {
            Err(Error::wrong_form_type(reference, expected.name(), actual.name()))
        }
    }

    /// Finds a form by editor ID (case-insensitive).
    #[must_use]
    pub fn find_by_editor_id(&self, editor_id: &str) -> Option<&FormRef> {
        self.forms.iter().find_map(|(form_ref, form)| {
            form.editor_id
                .as_deref()
                .filter(|id| id.eq_ignore_ascii_case(editor_id))
                .map(|_| form_ref)
        })
    }

    /// Returns every form of a record type, in key order.
    pub fn forms_of_type(&self, record_type: RecordType) -> impl Iterator<Item = (&FormRef, &Form)> {
        self.forms
            .iter()
            .filter(move |(_, form)| form.record.record_type() == record_type)
    }

    /// Returns every armor form carrying the keyword.
    #[must_use]
    pub fn armors_with_keyword(&self, keyword: &FormRef) -> Vec<FormRef> {
        self.forms_of_type(RecordType::Armor)
            .filter(|(_, form)| form.as_armor().is_some_and(|armor| armor.has_keyword(keyword)))
            .map(|(form_ref, _)| form_ref.clone())
            .collect()
    }

    /// Returns the number of forms.
    #[must_use]
    pub fn len(&self) -> usize {
        self.forms.len()
    }

    /// Returns true if the store holds no forms.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.forms.is_empty()
    }

    /// Returns an iterator over all forms, in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&FormRef, &Form)> {
        self.forms.iter()
    }
}

impl HostEnvironment for FormStore {
    fn is_plugin_active(&self, plugin: &str) -> bool {
        self.plugins.iter().any(|p| p.eq_ignore_ascii_case(plugin))
    }

    fn is_form_live(&self, form: &FormRef) -> bool {
        self.is_plugin_active(form.plugin()) && self.forms.contains_key(form)
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::record::{KeywordRecord, Record};
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn inserted_forms_resolve_by_display(ids in prop::collection::btree_set(any::<u32>(), 1..50)) {
            let mut store = FormStore::new().with_plugin("Mod.esp");
            for id in &ids {
                store.insert(FormRef::new("Mod.esp", *id), Form::new(Record::Keyword(KeywordRecord::default())));
            }

            prop_assert_eq!(store.len(), ids.len());
            for id in &ids {
                let form_ref = FormRef::new("MOD.ESP", *id);
                prop_assert_eq!(store.resolve(&form_ref.to_string()).unwrap(), form_ref.clone());
                prop_assert!(store.resolve_typed(&form_ref.to_string(), RecordType::Keyword).is_ok());
            }
        }

        #[test]
        fn load_order_has_no_case_duplicates(plugins in prop::collection::vec("[a-cA-C]{1,2}\\.esp", 0..20)) {
            let mut store = FormStore::new();
            for plugin in &plugins {
                store.activate_plugin(plugin.clone());
            }

            let active: Vec<_> = store.plugins().map(str::to_ascii_lowercase).collect();
            let mut unique = active.clone();
            unique.sort();
            unique.dedup();
            prop_assert_eq!(active.len(), unique.len());
            for plugin in &plugins {
                prop_assert!(store.is_plugin_active(&plugin.to_ascii_uppercase()));
            }
        }

        #[test]
        fn deactivated_plugins_hide_their_forms(id: u32) {
            let form_ref = FormRef::new("Mod.esp", id);
            let mut store = FormStore::new()
                .with_plugin("Mod.esp")
                .with_form(form_ref.clone(), Form::new(Record::Keyword(KeywordRecord::default())));
            prop_assert!(store.resolve(&form_ref.to_string()).is_ok());

            store.deactivate_plugin("mod.esp");
            prop_assert!(store.resolve(&form_ref.to_string()).is_err());
            prop_assert!(store.get(&form_ref).is_some());
        }
    }
}
