//! Integration tests for type-tag dispatch
//!
//! Tests cross-kind comparison, equality, hashing, and rendering.

use std::cmp::Ordering;

use ceres_foundation::dispatch::{self, Functions};
use ceres_foundation::{
    Digit, EPSILON, NOT_COMPARABLE, NullHash, Number, Object, Structure, TextBuffer, Time,
    TypeTag, Value, compare_to, equals, hash, try_compare,
};
use ceres_support::{Severity, capture};

// =============================================================================
// Comparison
// =============================================================================

#[test]
fn digit_equals_real_within_epsilon() {
    assert_eq!(compare_to(&Value::Digit(Digit(5)), &Value::Real(5.000_000_000_1)), 0);
}

#[test]
fn digit_below_larger_real() {
    assert!(compare_to(&Value::Digit(Digit(5)), &Value::Real(6.0)) < 0);
}

#[test]
fn reals_just_outside_epsilon_differ() {
    let a = Value::Real(1.0);
    let b = Value::Real(1.0 + EPSILON * 10.0);
    assert_eq!(try_compare(&a, &b), Some(Ordering::Less));
    assert!(!equals(&a, &b));
}

#[test]
fn integers_against_numbers_decode_first() {
    let n = Value::Number(Number::parse("ff", 16).unwrap());
    assert_eq!(compare_to(&Value::Integer(255), &n), 0);
    assert_eq!(compare_to(&Value::Natural(256), &n), 1);
}

#[test]
fn times_compare_by_timestamp() {
    let early = Value::Time(Time::date(1999, 12, 31));
    let late = Value::Time(Time::date(2000, 1, 1));
    assert_eq!(try_compare(&early, &late), Some(Ordering::Less));
}

#[test]
fn distant_times_compare_without_overflow() {
    let far = Value::Time(Time::new(i64::MAX, 12, 31, 23, 59, 59));
    let near = Value::Time(Time::date(1970, 1, 1));
    assert_eq!(try_compare(&near, &far), Some(Ordering::Less));
}

#[test]
fn numbers_beyond_machine_range_keep_their_order() {
    let small = Number::parse(&"z".repeat(39), 36).unwrap();
    let large = Number::parse(&"z".repeat(40), 36).unwrap();
    let mut digits = vec![1; 40];
    digits[1] = 2;
    let between = Number::from_digits(&digits, 36, false).unwrap();
    assert_eq!(
        try_compare(&Value::Number(small.clone()), &Value::Number(between.clone())),
        Some(Ordering::Less)
    );
    assert_eq!(
        try_compare(&Value::Number(large), &Value::Number(between)),
        Some(Ordering::Greater)
    );
    assert!(compare_to(&Value::Number(small), &Value::Integer(i64::MAX)) > 0);
}

#[test]
fn structures_unwrap_before_comparing() {
    let wrapped = Value::from(Structure::new(Value::Real(2.0)));
    assert_eq!(try_compare(&wrapped, &Value::Integer(2)), Some(Ordering::Equal));
}

#[test]
fn nil_is_not_comparable() {
    assert_eq!(compare_to(&Value::Nil, &Value::Integer(0)), NOT_COMPARABLE);
    assert_eq!(try_compare(&Value::Integer(0), &Value::Nil), None);
}

#[test]
fn text_against_number_warns() {
    let (ordering, diagnostics) =
        capture(|| try_compare(&Value::Real(1.0), &Value::from(TextBuffer::from("1"))));
    assert_eq!(ordering, None);
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].severity, Severity::Warning);
    assert!(diagnostics[0].message.contains("cannot compare real with string"));
}

#[test]
fn strings_order_lexically() {
    assert_eq!(
        try_compare(&Value::from("abc"), &Value::from("abd")),
        Some(Ordering::Less)
    );
}

// =============================================================================
// Equality and Hashing
// =============================================================================

#[test]
fn equal_values_hash_alike() {
    let pairs = [
        (Value::Integer(3), Value::Natural(3)),
        (Value::Integer(3), Value::Real(3.0)),
        (Value::Character('a'), Value::Integer(97)),
        (Value::from(Object::from(Value::Integer(3))), Value::Integer(3)),
    ];
    for (a, b) in &pairs {
        assert!(equals(a, b), "{a:?} != {b:?}");
        assert_eq!(hash(a), hash(b), "hash({a:?}) != hash({b:?})");
    }
}

#[test]
fn null_hash_is_random_unless_fixed() {
    let first = hash(&Value::Nil);
    let second = hash(&Value::Nil);
    assert_ne!(first, second);
    assert_eq!(dispatch::hash_with(&Value::Nil, NullHash::Fixed(1)), 1);
}

#[test]
fn render_into_budget() {
    let mut out = TextBuffer::new(4);
    assert!(dispatch::render(&Value::from("overflow"), &mut out).is_truncated());
    assert_eq!(out.as_str(), "over");
}

#[test]
fn function_table_lookup() {
    let Functions {
        compare,
        hash: hash_fn,
        ..
    } = dispatch::functions(TypeTag::Real).unwrap();
    assert_eq!(compare(&Value::Real(1.0), &Value::Real(2.0)), Some(Ordering::Less));
    assert_eq!(hash_fn(&Value::Real(2.0)), hash(&Value::Integer(2)));
    assert!(dispatch::functions(TypeTag::Basic).is_none());
}
