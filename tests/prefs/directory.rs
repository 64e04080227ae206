//! Opening a settings directory through `prefstore.toml`

use std::fs;

use crate::common::*;

#[test]
fn open_creates_default_config() {
    let dir = TestDir::new();
    let prefs = dir.open();

    let config = PrefsConfig::from_file(&dir.path().join(CONFIG_FILE_NAME)).unwrap();
    assert_eq!(config, PrefsConfig::default());
    assert_eq!(prefs.store().durability(), Durability::Standard);
    assert_eq!(prefs.read_int(APP_VERSION_KEY).unwrap(), 1);
}

#[test]
fn settings_survive_reopen() {
    let dir = TestDir::new();
    {
        let prefs = dir.open();
        prefs
            .write_all([
                ("flag", WriteValue::Bool(true)),
                ("ratio", WriteValue::Float(0.75)),
                ("big", WriteValue::Long(i64::MAX)),
            ])
            .unwrap();
        prefs.write_enum("setup", &Setup::Done).unwrap();
        prefs
            .write_object("owner", &Person::new("Ada", 36))
            .unwrap();
    }

    let prefs = dir.open();
    assert!(prefs.read_bool("flag").unwrap());
    assert_eq!(prefs.read_float("ratio").unwrap(), 0.75);
    assert_eq!(prefs.read_long("big").unwrap(), i64::MAX);
    assert_eq!(prefs.read_enum("setup", Setup::None).unwrap(), Setup::Done);
    assert_eq!(
        prefs.read::<Person>("owner").unwrap(),
        Some(Person::new("Ada", 36))
    );
}

#[test]
fn config_selects_file_and_durability() {
    let dir = TestDir::new();
    let config = PrefsConfig {
        durability: "always".to_string(),
        file_name: "settings.json".to_string(),
        app_version: 4,
    };
    config
        .write_to_file(&dir.path().join(CONFIG_FILE_NAME))
        .unwrap();

    let prefs = dir.open();
    prefs.write("k", 1i32).unwrap();

    assert_eq!(prefs.store().durability(), Durability::Always);
    assert!(dir.path().join("settings.json").exists());
    assert!(!dir.path().join("prefs.json").exists());
    assert_eq!(prefs.check_update(), Versions::new(4, 4));
}

#[test]
fn invalid_config_fails_open() {
    let dir = TestDir::new();
    fs::write(dir.path().join(CONFIG_FILE_NAME), "durability = \"turbo\"\n").unwrap();
    assert!(matches!(
        prefstore::open(dir.path()).unwrap_err(),
        Error::InvalidArgument(_)
    ));
}

#[test]
fn corrupt_settings_file_fails_open() {
    let dir = TestDir::new();
    fs::write(dir.path().join("prefs.json"), "{ not json").unwrap();
    assert!(matches!(
        prefstore::open(dir.path()).unwrap_err(),
        Error::Storage(_)
    ));
}

#[test]
fn settings_file_is_readable_json() {
    let dir = TestDir::new();
    {
        let prefs = dir.open();
        prefs.write("count", 3i32).unwrap();
    }

    let text = fs::read_to_string(dir.path().join("prefs.json")).unwrap();
    let json: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(json["count"]["type"], "int");
    assert_eq!(json["count"]["value"], 3);
}
