//! Armor patch integration tests

use formcfg_foundation::{DiagnosticLog, FormRef, Severity};
use formcfg_language::{Statement, parse_text};
use formcfg_patches::{
    ArmorElement, ArmorFilter, ArmorGrammar, ArmorOperation, ArmorPatch, apply_statements,
};
use formcfg_storage::{ArmorRecord, Form, FormStore, Record};

const SCENARIO: &str = r#"if (IsPluginExists("Mod.esp")) {
  FilterByFormID("Mod.esp"|800) . BipedObjectSlots = 32 | 33;
} else {
  FilterByFormID("Mod.esp"|801) . BipedObjectSlots = 0;
}
"#;

fn armor(slots: u32) -> Form {
    Form::new(Record::Armor(ArmorRecord {
        biped_slots: slots,
        ..ArmorRecord::default()
    }))
}

fn store(active: bool) -> FormStore {
    let store = FormStore::new()
        .with_plugin("Mod.esp")
        .with_form(FormRef::new("Mod.esp", 0x800), armor(0b1))
        .with_form(FormRef::new("Mod.esp", 0x801), armor(0b1));
    if active {
        store
    } else {
        let mut store = store;
        store.deactivate_plugin("Mod.esp");
        store
    }
}

fn slots(store: &FormStore, id: u32) -> Option<u32> {
    store
        .get(&FormRef::new("Mod.esp", id))
        .and_then(Form::as_armor)
        .map(|a| a.biped_slots)
}

fn parse_scenario() -> Vec<Statement<ArmorPatch>> {
    let mut log = DiagnosticLog::default();
    let statements = parse_text(SCENARIO, ArmorGrammar, &mut log);
    assert!(log.is_empty());
    statements
}

// =============================================================================
// Conditional Scenario
// =============================================================================

#[test]
fn scenario_parses_to_one_conditional() {
    let statements = parse_scenario();
    assert_eq!(statements.len(), 1);
    let chain = statements[0].as_conditional().expect("conditional");
    assert!(chain.else_if_branches.is_empty());

    let active_store = store(true);
    let mut log = DiagnosticLog::default();
    let body = chain.evaluates(&active_store, &mut log);
    assert_eq!(body.len(), 1);
    assert_eq!(
        body[0].as_expression(),
        Some(&ArmorPatch {
            filter: ArmorFilter::FormId("Mod.esp|800".into()),
            element: ArmorElement::BipedObjectSlots,
            operations: vec![ArmorOperation::SetSlots(0b1100)],
        })
    );

    let inactive_store = store(false);
    let body = chain.evaluates(&inactive_store, &mut log);
    assert_eq!(body.len(), 1);
    let patch = body[0].as_expression().expect("expression");
    assert_eq!(patch.filter, ArmorFilter::FormId("Mod.esp|801".into()));
    assert_eq!(patch.operations, vec![ArmorOperation::SetSlots(0)]);
    assert!(log.is_empty());
}

#[test]
fn scenario_applies_if_branch_when_active() {
    let statements = parse_scenario();
    let mut store = store(true);
    let mut log = DiagnosticLog::default();
    apply_statements(&statements, &mut store, &mut log);
    assert!(log.is_empty());
    assert_eq!(slots(&store, 0x800), Some(0b1100));
    assert_eq!(slots(&store, 0x801), Some(0b1));
}

#[test]
fn scenario_else_branch_targets_inactive_plugin() {
    let statements = parse_scenario();
    let mut store = store(false);
    let mut log = DiagnosticLog::default();
    apply_statements(&statements, &mut store, &mut log);
    assert_eq!(slots(&store, 0x800), Some(0b1));
    assert_eq!(slots(&store, 0x801), Some(0b1));
    assert_eq!(log.count(Severity::Warning), 1);
}

// =============================================================================
// Semantic Errors
// =============================================================================

#[test]
fn semantic_errors_skip_only_their_operation() {
    let source = r#"
FilterByFormID("Mod.esp"|800).Value = -1;
FilterByFormID("Mod.esp"|999).FullName = "Ghost";
FilterByFormID("Mod.esp"|800).FullName = "Plate";
"#;
    let mut log = DiagnosticLog::default();
    let statements = parse_text(source, ArmorGrammar, &mut log);
    assert_eq!(statements.len(), 3);

    let mut store = store(true);
    apply_statements(&statements, &mut store, &mut log);
    assert_eq!(log.count(Severity::Warning), 2);
    assert!(log.iter().all(|d| d.message.starts_with("[Armor]")));

    let plate = store
        .get(&FormRef::new("Mod.esp", 0x800))
        .and_then(Form::as_armor)
        .expect("armor");
    assert_eq!(plate.full_name, "Plate");
    assert_eq!(plate.value, 0);
}
