//! Patch file integration tests

use formcfg_foundation::{DiagnosticLog, FormRef, Severity};
use formcfg_patches::{PATCH_ORDER, PatchFile};
use formcfg_storage::{ArmorRecord, Form, FormStore, KeywordRecord, Record, RecordType};

fn store() -> FormStore {
    FormStore::new()
        .with_plugin("Skyrim.esm")
        .with_form(
            FormRef::new("Skyrim.esm", 0x6BBD3),
            Form::new(Record::Keyword(KeywordRecord::default())).with_editor_id("ArmorHeavy"),
        )
        .with_form(
            FormRef::new("Skyrim.esm", 0x12E49),
            Form::new(Record::Armor(ArmorRecord::default())),
        )
}

#[test]
fn keywords_are_applied_before_armor() {
    assert_eq!(PATCH_ORDER, [RecordType::Keyword, RecordType::Armor]);
}

#[test]
fn keyword_then_armor_by_keyword() {
    let mut log = DiagnosticLog::default();
    let keywords = PatchFile::from_text(
        RecordType::Keyword,
        r#"FilterByEditorID("ArmorHeavy").EditorID = "ArmorPlate";"#,
        &mut log,
    );
    let armors = PatchFile::from_text(
        RecordType::Armor,
        r#"
FilterByFormID("Skyrim.esm"|12E49).Keywords.Add("Skyrim.esm"|0x6BBD3);
FilterByKeyword("Skyrim.esm"|6BBD3).BipedObjectSlots.Add(32, 45).FullName;
"#,
        &mut log,
    );
    // The second armor line is malformed, so only the first survives.
    assert_eq!(armors.len(), 1);
    assert_eq!(log.count(Severity::Warning), 1);

    let mut store = store();
    keywords.apply(&mut store, &mut log);
    armors.apply(&mut store, &mut log);

    assert!(store.find_by_editor_id("ArmorPlate").is_some());
    let armor = store
        .get(&FormRef::new("Skyrim.esm", 0x12E49))
        .and_then(Form::as_armor)
        .expect("armor");
    assert_eq!(armor.keywords, vec![FormRef::new("Skyrim.esm", 0x6BBD3)]);
}

#[test]
fn missing_file_is_empty() {
    let mut log = DiagnosticLog::default();
    let file = PatchFile::read(
        RecordType::Armor,
        std::path::Path::new("/nonexistent/formcfg/Armor/a.cfg"),
        &mut log,
    );
    assert!(file.is_empty());
    assert_eq!(log.count(Severity::Warning), 1);
}

#[test]
fn pretty_output_reparses() {
    let source = r#"if (IsPluginExists("Skyrim.esm") && !IsFormExists("Mod.esp"|0x800)) {
FilterByFormID("Skyrim.esm"|12E49).Keywords.Clear().Add("Skyrim.esm"|6BBD3);
} else if (IsPluginExists("Mod.esp")) {
FilterByFormID("Skyrim.esm"|12E49).ArmorRating = 12.5;
}
"#;
    let mut log = DiagnosticLog::default();
    let file = PatchFile::from_text(RecordType::Armor, source, &mut log);
    let reparsed = PatchFile::from_text(RecordType::Armor, &file.pretty(), &mut log);
    assert!(log.is_empty());
    assert_eq!(reparsed, file);
}
