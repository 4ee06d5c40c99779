// tests/store_tests.rs

use pcs_lang::ast::{Comment, Record, ValueRecord};
use pcs_lang::store::{Id, Store, StoreError};

fn value(text: &str) -> Record {
    Record::Value(ValueRecord {
        text: text.to_string(),
    })
}

// ============================================================================
// Ids
// ============================================================================

#[test]
fn test_id_display_and_parse() {
    let mut store = Store::new();
    let first = store.insert(value("a"));
    let second = store.insert(value("b"));

    assert_ne!(first, second);
    assert!(first.to_string().starts_with("@#"));
    assert_eq!(Id::parse(&second.to_string()), Some(second));
}

#[test]
fn test_id_parse_rejects_other_text() {
    assert_eq!(Id::parse("KICKS"), None);
    assert_eq!(Id::parse("@#"), None);
    assert_eq!(Id::parse("@#12a"), None);
    assert_eq!(Id::parse("#12"), None);
}

#[test]
fn test_ids_are_per_store() {
    let mut a = Store::new();
    let mut b = Store::new();

    assert_eq!(a.insert(value("x")), b.insert(value("y")));
}

// ============================================================================
// Slots
// ============================================================================

#[test]
fn test_allocate_then_put() {
    let mut store = Store::new();
    let id = store.allocate();

    assert!(!store.contains(id));
    assert_eq!(store.get(id), Err(StoreError::UnknownId(id)));

    store.put(id, value("late")).unwrap();
    assert!(store.contains(id));
    assert_eq!(store.value(id).unwrap().text, "late");
}

#[test]
fn test_put_requires_allocation() {
    let mut store = Store::new();
    let stray = Id::parse("@#42").unwrap();

    assert_eq!(store.put(stray, value("x")), Err(StoreError::UnknownId(stray)));
}

#[test]
fn test_typed_accessors() {
    let mut store = Store::new();
    let id = store.insert(value("NO"));

    assert!(store.value(id).is_some());
    assert!(store.parameter(id).is_none());
    assert!(store.clause(id).is_none());
}

#[test]
fn test_get_mut() {
    let mut store = Store::new();
    let id = store.insert(value("old"));

    if let Record::Value(v) = store.get_mut(id).unwrap() {
        v.text = "new".to_string();
    }
    assert_eq!(store.value(id).unwrap().text, "new");
}

#[test]
fn test_records_skip_empty_slots() {
    let mut store = Store::new();
    let a = store.insert(value("a"));
    let _reserved = store.allocate();
    let c = store.insert(value("c"));

    let ids: Vec<Id> = store.records().map(|(id, _)| id).collect();
    assert_eq!(ids, vec![a, c]);
    assert_eq!(store.len(), 3);
    assert!(!store.is_empty());
}

// ============================================================================
// Comments
// ============================================================================

#[test]
fn test_attach_comment() {
    let mut store = Store::new();
    let id = store.insert(value("a"));
    let note = store.insert(Record::Comment(Comment {
        text: " note".to_string(),
    }));

    assert_eq!(store.comment_of(id), None);
    store.attach_comment(id, note).unwrap();
    assert_eq!(store.comment_of(id), Some(note));
}
