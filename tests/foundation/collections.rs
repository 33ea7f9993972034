//! Integration tests for the collection capability layers
//!
//! Tests Iterable, Collection, and List defaults through Array.

use ceres_foundation::{
    Array, Collection, Iterable, List, Object, Structure, TextBuffer, TypeTag, Value,
};
use ceres_support::capture;

fn ints(values: &[i64]) -> Array<i64> {
    values.iter().copied().collect()
}

/// Works with any collection of integers.
fn total<C: Collection<Item = i64>>(collection: &C) -> i64 {
    collection.iterator().sum()
}

// =============================================================================
// Collection
// =============================================================================

#[test]
fn contains_all_counts_multiplicity() {
    let haystack = ints(&[1, 1, 2]);
    assert!(haystack.contains_all(&ints(&[1, 1])));
    assert!(!haystack.contains_all(&ints(&[1, 1, 1])));
}

#[test]
fn count_all_reports_matches() {
    let haystack = ints(&[3, 1, 3, 2]);
    assert_eq!(haystack.count_all(&ints(&[3, 3, 3])), 2);
    assert_eq!(haystack.count_all(&ints(&[9])), 0);
}

#[test]
fn generic_over_collections() {
    assert_eq!(total(&ints(&[1, 2, 3])), 6);
    assert!(Iterable::is_empty(&ints(&[])));
}

#[test]
fn add_all_ensures_capacity_once() {
    let mut target = Array::<i64>::new();
    target.add_all(&ints(&(0..50).collect::<Vec<_>>())).unwrap();
    assert_eq!(target.len(), 50);
    assert_eq!(target.capacity(), 50);
    assert_eq!(target.reallocations(), 1);
}

#[test]
fn add_value_unwraps_wrappers() {
    let mut strings = Array::<TextBuffer>::new();
    strings.add_value(&Value::from("plain")).unwrap();
    strings
        .add_structure(Structure::new(Value::from("wrapped")))
        .unwrap();
    strings
        .add_value(&Value::from(Object::from(Value::from("object"))))
        .unwrap();
    assert_eq!(strings.to_string(), "(plain, wrapped, object)");
}

#[test]
fn add_value_mismatch_leaves_collection_unchanged() {
    let mut strings = Array::<TextBuffer>::new();
    let (result, diagnostics) = capture(|| strings.add_value(&Value::Integer(1)));
    assert!(result.is_err());
    assert_eq!(diagnostics.len(), 1);
    assert!(strings.is_empty());
}

#[test]
fn remove_all_consumes_one_match_per_element() {
    let mut array = ints(&[5, 5, 6, 5]);
    assert_eq!(array.remove_all(&ints(&[5, 5])), 2);
    assert_eq!(array.as_slice(), &[6, 5]);
}

#[test]
fn ensure_capacity_never_shrinks() {
    let mut array = ints(&[1, 2, 3]);
    array.ensure_capacity(1).unwrap();
    assert_eq!(array.capacity(), 3);
    array.ensure_capacity(10).unwrap();
    assert_eq!(array.capacity(), 10);
}

// =============================================================================
// List
// =============================================================================

#[test]
fn list_get_structure() {
    let list = ints(&[10, 20]);
    let s = list.get_structure(1);
    assert_eq!(s.tag(), TypeTag::Integer);
    assert_eq!(s.value(), &Value::Integer(20));
    let (missing, diagnostics) = capture(|| list.get_structure(2));
    assert!(missing.is_nil());
    assert_eq!(missing.size(), 0);
    assert_eq!(diagnostics.len(), 1);
}

#[test]
fn list_positions() {
    let list = ints(&[4, 5, 4]);
    assert_eq!(List::index_of(&list, &4), Some(0));
    assert_eq!(List::index_of(&list, &6), None);
    assert_eq!(List::get(&list, 2).ok(), Some(&4));
}

#[test]
fn split_text_builds_string_array() {
    let text = TextBuffer::from("one two  three");
    let words = Array::<TextBuffer>::split_text(&text, " ");
    assert_eq!(words.len(), 3);
    assert!(words.contains(&TextBuffer::from("two")));
}
