//! Write lowering, multi-pair writes and counters

use crate::common::*;

#[test]
fn primitives_never_go_through_the_codec() {
    let prefs = memory_prefs(1);
    prefs
        .write_flat(vec![
            "b".into(),
            true.into(),
            "i".into(),
            42i32.into(),
            "f".into(),
            0.5f32.into(),
            "l".into(),
            42i64.into(),
            "s".into(),
            "42".into(),
        ])
        .unwrap();

    let store = prefs.store();
    assert_eq!(store.get("b").unwrap(), Some(Value::Bool(true)));
    assert_eq!(store.get("i").unwrap(), Some(Value::Int(42)));
    assert_eq!(store.get("f").unwrap(), Some(Value::Float(0.5)));
    assert_eq!(store.get("l").unwrap(), Some(Value::Long(42)));
    assert_eq!(store.get("s").unwrap(), Some(Value::String("42".into())));
}

#[test]
fn structured_values_are_stored_as_text() {
    let prefs = memory_prefs(1);
    let encoded = prefs.encode(&Person::new("Ada", 36)).unwrap();
    assert!(matches!(encoded, WriteValue::Encoded(_)));

    prefs.write("person", encoded).unwrap();
    match prefs.store().get("person").unwrap() {
        Some(Value::String(text)) => assert!(text.contains("\"Ada\"")),
        other => panic!("expected encoded text, got {:?}", other),
    }
    assert_eq!(
        prefs.read::<Person>("person").unwrap(),
        Some(Person::new("Ada", 36))
    );
}

#[test]
fn remove_and_none_delete_entries() {
    let prefs = memory_prefs(1);
    prefs.write_all([("a", 1i32), ("b", 2i32)]).unwrap();

    prefs
        .write_all([("a", WriteValue::Remove), ("b", None::<i32>.into())])
        .unwrap();
    assert!(!prefs.contains(&["a"]).unwrap());
    assert!(!prefs.contains(&["b"]).unwrap());
}

#[test]
fn odd_flat_list_writes_nothing() {
    let prefs = memory_prefs(1);
    let err = prefs
        .write_flat(vec!["a".into(), 1i32.into(), "b".into(), 2i32.into(), "c".into()])
        .unwrap_err();
    assert!(matches!(err, Error::InvalidArgument(_)));
    assert!(!prefs.contains(&["a"]).unwrap());
    assert!(!prefs.contains(&["b"]).unwrap());
}

#[test]
fn name_position_must_be_a_string() {
    let prefs = memory_prefs(1);
    let err = prefs
        .write_flat(vec!["a".into(), 1i32.into(), true.into(), 2i32.into()])
        .unwrap_err();
    assert!(matches!(err, Error::InvalidArgument(_)));
    assert!(!prefs.contains(&["a"]).unwrap());
}

#[test]
fn empty_writes_are_noops() {
    let prefs = Prefs::open(FaultyStore::new(), 1).unwrap();
    let before = prefs.store().applied_batches();

    prefs.write_flat(Vec::new()).unwrap();
    prefs.write_all(Vec::<(String, WriteValue)>::new()).unwrap();
    prefs.delete(&[]).unwrap();

    assert_eq!(prefs.store().applied_batches(), before);
}

#[test]
fn later_pair_wins_within_one_write() {
    let prefs = memory_prefs(1);
    prefs
        .write_all([
            ("x", WriteValue::Int(1)),
            ("x", WriteValue::Remove),
            ("x", WriteValue::Str("last".into())),
        ])
        .unwrap();
    assert_eq!(prefs.read_string("x").unwrap().as_deref(), Some("last"));
}

#[test]
fn rewrite_with_other_kind_changes_kind() {
    let prefs = memory_prefs(1);
    prefs.write("v", 1i32).unwrap();
    prefs.write("v", "one").unwrap();
    assert!(prefs.read_int("v").unwrap_err().is_type_mismatch());
    assert_eq!(prefs.read_string("v").unwrap().as_deref(), Some("one"));
}

// ============================================================================
// Counters
// ============================================================================

#[test]
fn increment_starts_from_default() {
    let prefs = memory_prefs(1);
    assert_eq!(prefs.increment("launches", 10).unwrap(), 11);
    assert_eq!(prefs.increment("launches", 10).unwrap(), 12);
    assert_eq!(prefs.read_int("launches").unwrap(), 12);
}

#[test]
fn decrement_starts_from_default() {
    let prefs = memory_prefs(1);
    assert_eq!(prefs.decrement("credits", 0).unwrap(), -1);
    assert_eq!(prefs.read_int("credits").unwrap(), -1);
}

#[test]
fn counters_saturate() {
    let prefs = memory_prefs(1);
    assert_eq!(prefs.increment("hi", i32::MAX).unwrap(), i32::MAX);
    assert_eq!(prefs.decrement("lo", i32::MIN).unwrap(), i32::MIN);
}

#[test]
fn counter_on_non_int_is_type_mismatch() {
    let prefs = memory_prefs(1);
    prefs.write("n", 1i64).unwrap();
    assert!(prefs.increment("n", 0).unwrap_err().is_type_mismatch());
    assert_eq!(prefs.read_long("n").unwrap(), 1);
}
