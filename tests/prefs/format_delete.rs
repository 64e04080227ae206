//! Delete and format

use crate::common::*;

#[test]
fn delete_removes_only_named_entries() {
    let prefs = memory_prefs(1);
    prefs.write_all([("a", 1i32), ("b", 2i32), ("c", 3i32)]).unwrap();

    prefs.delete(&["a"]).unwrap();
    assert!(!prefs.contains(&["a"]).unwrap());
    assert!(prefs.contains(&["b", "c"]).unwrap());
}

#[test]
fn delete_many_and_absent() {
    let prefs = memory_prefs(1);
    prefs.write_all([("a", 1i32), ("b", 2i32)]).unwrap();

    prefs.delete(&["a", "b", "never"]).unwrap();
    assert_eq!(prefs.names().unwrap(), vec![APP_VERSION_KEY.to_string()]);
}

#[test]
fn format_wipes_user_entries() {
    let prefs = memory_prefs(3);
    prefs
        .write_all([
            ("flag", WriteValue::Bool(true)),
            ("name", WriteValue::Str("ada".into())),
        ])
        .unwrap();
    prefs.write_object("person", &Person::new("Ada", 36)).unwrap();

    prefs.format().unwrap();

    assert!(!prefs.contains(&["flag"]).unwrap());
    assert!(!prefs.contains(&["person"]).unwrap());
    assert_eq!(prefs.read_int(APP_VERSION_KEY).unwrap(), 3);
}

#[test]
fn format_keeps_version_report_quiet_next_run() {
    let store = shared_store();
    {
        let prefs = reopen(&store, 2);
        prefs.drive_upgrade(1, |_, _, _| Ok(())).unwrap();
        prefs.write("x", 1i32).unwrap();
        prefs.format().unwrap();
    }

    let prefs = reopen(&store, 2);
    assert!(!prefs.check_update().is_updated());
    assert_eq!(store.names().unwrap().len(), 2);
    assert_eq!(prefs.read_int(DRIVE_VERSION_KEY).unwrap(), 1);
}

#[test]
fn format_persists_through_file_store() {
    let dir = TestDir::new();
    {
        let prefs = dir.open();
        prefs.write("x", 1i32).unwrap();
        prefs.format().unwrap();
    }
    let prefs = dir.open();
    assert_eq!(prefs.names().unwrap(), vec![APP_VERSION_KEY.to_string()]);
}
