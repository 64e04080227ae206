//! Typed reads: defaults, kind checks, structured values and blank entries

use std::collections::{HashMap, HashSet};

use crate::common::*;
use serde::{Deserialize, Serialize};

// ============================================================================
// Primitives
// ============================================================================

#[test]
fn primitives_round_trip() {
    let prefs = memory_prefs(1);
    prefs
        .write_all([
            ("flag", WriteValue::Bool(true)),
            ("count", WriteValue::Int(-12)),
            ("ratio", WriteValue::Float(1.5)),
            ("big", WriteValue::Long(1 << 40)),
            ("greeting", WriteValue::Str("Hello world!".into())),
        ])
        .unwrap();

    assert!(prefs.read_bool("flag").unwrap());
    assert_eq!(prefs.read_int("count").unwrap(), -12);
    assert_eq!(prefs.read_float("ratio").unwrap(), 1.5);
    assert_eq!(prefs.read_long("big").unwrap(), 1 << 40);
    assert_eq!(
        prefs.read_string("greeting").unwrap().as_deref(),
        Some("Hello world!")
    );
}

#[test]
fn absent_names_read_as_defaults() {
    let prefs = memory_prefs(1);
    assert!(!prefs.read_bool("missing").unwrap());
    assert!(prefs.read_bool_or("missing", true).unwrap());
    assert_eq!(prefs.read_int("missing").unwrap(), 0);
    assert_eq!(prefs.read_int_or("missing", 7).unwrap(), 7);
    assert_eq!(prefs.read_float_or("missing", 2.5).unwrap(), 2.5);
    assert_eq!(prefs.read_long_or("missing", -1).unwrap(), -1);
    assert_eq!(prefs.read_string("missing").unwrap(), None);
    assert_eq!(prefs.read_string_or("missing", "fallback").unwrap(), "fallback");
}

#[test]
fn present_value_wins_over_default() {
    let prefs = memory_prefs(1);
    prefs.write("count", 3i32).unwrap();
    assert_eq!(prefs.read_int_or("count", 7).unwrap(), 3);
}

#[test]
fn string_read_as_int_is_type_mismatch() {
    let prefs = memory_prefs(1);
    prefs.write("name", "ada").unwrap();
    let err = prefs.read_int("name").unwrap_err();
    assert!(err.is_type_mismatch());
    // the default does not mask a mismatch
    assert!(prefs.read_int_or("name", 7).unwrap_err().is_type_mismatch());
}

#[test]
fn int_is_not_readable_as_long_or_float() {
    let prefs = memory_prefs(1);
    prefs.write("n", 1i32).unwrap();
    assert!(prefs.read_long("n").unwrap_err().is_type_mismatch());
    assert!(prefs.read_float("n").unwrap_err().is_type_mismatch());
    assert!(prefs.read_bool("n").unwrap_err().is_type_mismatch());
}

// ============================================================================
// Structured values
// ============================================================================

#[test]
fn nested_generic_shape_round_trips() {
    let prefs = memory_prefs(1);
    let mut people = HashMap::new();
    people.insert("ada".to_string(), Person::new("Ada", 36));
    people.insert("alan".to_string(), Person::new("Alan", 41));

    prefs.write_object("people", &people).unwrap();
    let back: Option<HashMap<String, Person>> = prefs.read("people").unwrap();
    assert_eq!(back, Some(people));
}

#[test]
fn collection_shortcuts() {
    let prefs = memory_prefs(1);
    let tags: HashSet<String> = ["a", "b"].iter().map(|s| s.to_string()).collect();
    let ids: HashSet<i32> = [1, 2, 3].into_iter().collect();
    let mut limits = HashMap::new();
    limits.insert("daily".to_string(), 10);

    prefs
        .batch()
        .write_object("tags", &tags)
        .unwrap()
        .write_object("ids", &ids)
        .unwrap()
        .write_object("order", &vec!["x", "y"])
        .unwrap()
        .write_object("limits", &limits)
        .unwrap()
        .commit()
        .unwrap();

    assert_eq!(prefs.read_string_set("tags").unwrap(), Some(tags));
    assert_eq!(prefs.read_int_set("ids").unwrap(), Some(ids));
    assert_eq!(
        prefs.read_string_list("order").unwrap(),
        Some(vec!["x".to_string(), "y".to_string()])
    );
    assert_eq!(prefs.read_int_map("limits").unwrap(), Some(limits));
}

#[test]
fn absent_object_is_none_not_error() {
    let prefs = memory_prefs(1);
    assert_eq!(prefs.read::<Person>("nobody").unwrap(), None);
    assert_eq!(prefs.read_string_map("nothing").unwrap(), None);
}

#[test]
fn undecodable_object_is_decode_error() {
    let prefs = memory_prefs(1);
    prefs.write_object("person", &vec![1, 2]).unwrap();
    assert!(prefs.read::<Person>("person").unwrap_err().is_decode());
}

// ============================================================================
// Empty vs absent
// ============================================================================

#[test]
fn empty_collection_is_some_empty() {
    let prefs = memory_prefs(1);
    prefs
        .write_object("tags", &HashSet::<String>::new())
        .unwrap();
    assert_eq!(prefs.read_string_set("tags").unwrap(), Some(HashSet::new()));
    assert_eq!(prefs.read_string_set("never").unwrap(), None);
}

#[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
struct Layout {
    columns: u8,
    dense: bool,
}

#[test]
fn empty_string_entry_builds_blank_values() {
    let prefs = memory_prefs(1);
    prefs.write("blank", "").unwrap();

    assert_eq!(prefs.read_int_list("blank").unwrap(), Some(vec![]));
    assert_eq!(prefs.read_int_map("blank").unwrap(), Some(HashMap::new()));
    assert_eq!(prefs.read::<Layout>("blank").unwrap(), Some(Layout::default()));
    // no blank Person exists: tolerated as None
    assert_eq!(prefs.read::<Person>("blank").unwrap(), None);
}

// ============================================================================
// Enums and presence
// ============================================================================

#[test]
fn enum_stored_by_name() {
    let prefs = memory_prefs(1);
    assert_eq!(prefs.read_enum("setup", Setup::None).unwrap(), Setup::None);

    prefs.write_enum("setup", &Setup::Profile).unwrap();
    assert_eq!(prefs.read_string("setup").unwrap().as_deref(), Some("Profile"));
    assert_eq!(prefs.read_enum("setup", Setup::None).unwrap(), Setup::Profile);
}

#[test]
fn unknown_enum_name_is_decode_error() {
    let prefs = memory_prefs(1);
    prefs.write("setup", "Abandoned").unwrap();
    assert!(prefs.read_enum("setup", Setup::None).unwrap_err().is_decode());
}

#[test]
fn contains_and_names() {
    let prefs = memory_prefs(1);
    prefs.write_all([("b", 2i32), ("a", 1i32)]).unwrap();

    assert!(prefs.contains(&["a", "b"]).unwrap());
    assert!(!prefs.contains(&["a", "z"]).unwrap());
    assert_eq!(
        prefs.names().unwrap(),
        vec![APP_VERSION_KEY.to_string(), "a".to_string(), "b".to_string()]
    );
}
