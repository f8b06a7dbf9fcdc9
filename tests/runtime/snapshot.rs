//! Snapshot integration tests

use std::fs;

use formcfg_foundation::FormRef;
use formcfg_runtime::{LoaderConfig, Session, load_from_file, save_to_file};
use formcfg_storage::{ArmorRecord, Form, FormStore, Record, RecordType};

#[test]
fn patched_store_survives_snapshot() {
    let dir = std::env::temp_dir().join(format!("formcfg_it_snapshot_{}", std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    let config = LoaderConfig::new(&dir).with_diagnostics_to_stderr(false);
    let armor_dir = config.record_dir(RecordType::Armor);
    fs::create_dir_all(&armor_dir).unwrap();
    fs::write(
        armor_dir.join("a.cfg"),
        r#"FilterByFormID("Mod.esp"|800).FullName = "Patched";"#,
    )
    .unwrap();

    let world = dir.join("world.msgpack");
    let original = FormStore::new().with_plugin("Mod.esp").with_form(
        FormRef::new("Mod.esp", 0x800),
        Form::new(Record::Armor(ArmorRecord::default())),
    );
    save_to_file(&original, &world).unwrap();

    let mut store = load_from_file(&world).unwrap();
    Session::new(config).run(&mut store);
    save_to_file(&store, &world).unwrap();

    let restored = load_from_file(&world).unwrap();
    assert_eq!(restored, store);
    let name = restored
        .get(&FormRef::new("Mod.esp", 0x800))
        .and_then(Form::as_armor)
        .map(|a| a.full_name.clone());
    assert_eq!(name.as_deref(), Some("Patched"));

    let _ = fs::remove_dir_all(&dir);
}
