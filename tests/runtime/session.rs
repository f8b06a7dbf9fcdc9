//! Session integration tests

use std::fs;
use std::path::{Path, PathBuf};

use formcfg_foundation::FormRef;
use formcfg_runtime::{LoaderConfig, Session, SessionSummary, discover_files};
use formcfg_storage::{ArmorRecord, Form, FormStore, Record, RecordType};

fn data_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("formcfg_it_{name}_{}", std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    dir
}

fn config(dir: &Path) -> LoaderConfig {
    LoaderConfig::new(dir).with_diagnostics_to_stderr(false)
}

fn mod_store() -> FormStore {
    FormStore::new()
        .with_plugin("Mod.esp")
        .with_form(
            FormRef::new("Mod.esp", 0x800),
            Form::new(Record::Armor(ArmorRecord::default())),
        )
        .with_form(
            FormRef::new("Mod.esp", 0x801),
            Form::new(Record::Armor(ArmorRecord::default())),
        )
}

// =============================================================================
// Directory Tolerance
// =============================================================================

#[test]
fn missing_directories_are_not_errors() {
    let dir = data_dir("missing");
    let mut log = config(&dir).diagnostic_log();
    for record_type in [RecordType::Armor, RecordType::Keyword] {
        assert!(discover_files(&config(&dir), record_type, &mut log).is_empty());
    }
    assert!(log.is_empty());

    let mut session = Session::new(config(&dir));
    let summary = session.run(&mut mod_store());
    assert_eq!(summary, SessionSummary::default());
}

// =============================================================================
// End-to-End
// =============================================================================

#[test]
fn conditional_file_end_to_end() {
    let dir = data_dir("e2e");
    let cfg = config(&dir);
    let armor_dir = cfg.record_dir(RecordType::Armor).join("mods");
    fs::create_dir_all(&armor_dir).unwrap();
    fs::write(
        armor_dir.join("slots.cfg"),
        r#"# Biped slots for Mod.esp
if (IsPluginExists("Mod.esp")) {
  FilterByFormID("Mod.esp"|800) . BipedObjectSlots = 32 | 33;
} else {
  FilterByFormID("Mod.esp"|801) . BipedObjectSlots = 0;
}
"#,
    )
    .unwrap();
    fs::write(armor_dir.join("notes.txt"), "not a configuration file").unwrap();

    let mut store = mod_store();
    let mut session = Session::new(cfg);
    let summary = session.run(&mut store);
    assert_eq!(summary.files, 1);
    assert_eq!(summary.statements, 1);
    assert_eq!(summary.warnings, 0);

    let slots = store
        .get(&FormRef::new("Mod.esp", 0x800))
        .and_then(Form::as_armor)
        .map(|a| a.biped_slots);
    assert_eq!(slots, Some(0b1100));

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn syntax_error_loses_rest_of_file_only() {
    let dir = data_dir("abort");
    let cfg = config(&dir);
    let armor_dir = cfg.record_dir(RecordType::Armor);
    fs::create_dir_all(&armor_dir).unwrap();
    let broken = armor_dir.join("a.cfg");
    fs::write(
        &broken,
        r#"FilterByFormID("Mod.esp"|800).Value = 10;
FilterByFormID("Mod.esp"|800).Value 11;
FilterByFormID("Mod.esp"|800).Value = 12;
"#,
    )
    .unwrap();
    fs::write(
        armor_dir.join("b.cfg"),
        r#"FilterByFormID("Mod.esp"|801).Value = 20;"#,
    )
    .unwrap();

    let mut store = mod_store();
    let mut session = Session::new(cfg);
    let summary = session.run(&mut store);
    assert_eq!(summary.files, 2);
    assert_eq!(summary.statements, 2);
    assert_eq!(summary.warnings, 1);
    assert_eq!(session.log().for_file(&broken).len(), 1);

    let value = |id| {
        store
            .get(&FormRef::new("Mod.esp", id))
            .and_then(Form::as_armor)
            .map(|a| a.value)
    };
    assert_eq!(value(0x800), Some(10));
    assert_eq!(value(0x801), Some(20));

    let _ = fs::remove_dir_all(&dir);
}
