//! Integration tests for TextBuffer
//!
//! Tests budgets, truncation, searching, and splitting.

use std::fmt::Write as _;

use ceres_support::{Appended, DEFAULT_CAPACITY, TextBuffer};

// =============================================================================
// Budget and Truncation
// =============================================================================

#[test]
fn append_within_budget() {
    let mut buf = TextBuffer::new(16);
    assert_eq!(buf.append("hello"), Appended::Complete);
    assert_eq!(buf.append(", world"), Appended::Complete);
    assert_eq!(buf.as_str(), "hello, world");
    assert_eq!(buf.remaining(), 4);
    assert!(!buf.is_truncated());
}

#[test]
fn append_past_budget_truncates() {
    let mut buf = TextBuffer::new(8);
    assert_eq!(buf.append("truncate me"), Appended::Truncated);
    assert_eq!(buf.as_str(), "truncate");
    assert!(buf.is_truncated());
    assert_eq!(buf.append("x"), Appended::Truncated);
}

#[test]
fn truncation_respects_char_boundaries() {
    let mut buf = TextBuffer::new(4);
    // 'é' is two bytes; "aéé" is five.
    assert!(buf.append("aéé").is_truncated());
    assert_eq!(buf.as_str(), "aé");
    assert_eq!(buf.len(), 3);
}

#[test]
fn reset_clears_flag_and_keeps_budget() {
    let mut buf = TextBuffer::new(2);
    let _ = buf.append("abc");
    buf.reset();
    assert!(buf.is_empty());
    assert!(!buf.is_truncated());
    assert_eq!(buf.capacity(), 2);
    assert_eq!(buf.set("ok"), Appended::Complete);
}

#[test]
fn push_single_chars() {
    let mut buf = TextBuffer::new(1);
    assert_eq!(buf.push('a'), Appended::Complete);
    assert_eq!(buf.push('b'), Appended::Truncated);
    assert_eq!(buf.as_str(), "a");
}

#[test]
fn fmt_write_fails_on_truncation() {
    let mut buf = TextBuffer::new(3);
    assert!(write!(buf, "{}", 12).is_ok());
    assert!(write!(buf, "{}", 345).is_err());
    assert_eq!(buf.as_str(), "123");
}

#[test]
fn from_text_never_truncates() {
    let long = "x".repeat(DEFAULT_CAPACITY * 2);
    let buf = TextBuffer::from(long.as_str());
    assert_eq!(buf.len(), long.len());
    assert!(!buf.is_truncated());
    assert_eq!(TextBuffer::from("short").capacity(), DEFAULT_CAPACITY);
}

// =============================================================================
// Search and Split
// =============================================================================

#[test]
fn find_any_of_set() {
    let buf = TextBuffer::from("key=value;next=1");
    assert_eq!(buf.find("=;"), Some(3));
    assert_eq!(buf.find_last("=;"), Some(14));
    assert_eq!(buf.find_from("=;", 4), Some(9));
    assert_eq!(buf.find("#"), None);
    assert_eq!(buf.find_from("=", 100), None);
}

#[test]
fn split_drops_empty_pieces() {
    let buf = TextBuffer::from(",,a,b;;c,");
    let pieces: Vec<String> = buf
        .split(",;")
        .iter()
        .map(|p| p.as_str().to_owned())
        .collect();
    assert_eq!(pieces, vec!["a", "b", "c"]);
}

#[test]
fn split_pieces_share_budget() {
    let mut buf = TextBuffer::new(10);
    let _ = buf.set("ab cd");
    for piece in buf.split(" ") {
        assert_eq!(piece.capacity(), 10);
    }
}

// =============================================================================
// Comparison
// =============================================================================

#[test]
fn equality_and_order_by_contents() {
    let a = TextBuffer::from("apple");
    let mut b = TextBuffer::new(5);
    let _ = b.set("apple");
    assert_eq!(a, b);
    assert!(TextBuffer::from("apple") < TextBuffer::from("banana"));
    assert_eq!(a.to_string(), "apple");
}
