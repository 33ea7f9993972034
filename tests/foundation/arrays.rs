//! Integration tests for Array
//!
//! Tests growth, removal, release, rendering, ordering, and hashing.

use std::cell::Cell;
use std::cmp::Ordering;
use std::fmt;
use std::rc::Rc;

use ceres_foundation::{
    Array, ArrayConfig, Basic, Comparable, CursorState, Element, ErrorKind, Number, Object,
    Structure, TypeTag, Value,
};
use ceres_support::capture;

fn ints(values: &[i64]) -> Array<i64> {
    Array::from_values(TypeTag::Integer, values.iter().copied()).unwrap()
}

/// A capability-bearing element that counts its releases.
#[derive(Clone)]
struct Handle {
    id: u32,
    releases: Rc<Cell<u32>>,
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "handle{}", self.id)
    }
}

impl Basic for Handle {
    fn release(&mut self) {
        self.releases.set(self.releases.get() + 1);
    }

    fn is_basic(&self) -> bool {
        true
    }

    fn equals(&self, other: &Self) -> bool {
        self.id == other.id
    }

    fn hash_code(&self) -> u64 {
        u64::from(self.id)
    }
}

impl Comparable for Handle {
    fn compare_to(&self, other: &Self) -> Option<Ordering> {
        Some(self.id.cmp(&other.id))
    }
}

impl Element for Handle {
    const KIND: TypeTag = TypeTag::Object;

    fn from_value(_: &Value) -> Option<Self> {
        None
    }

    fn to_value(&self) -> Value {
        Value::Natural(u64::from(self.id))
    }
}

fn handles(count: u32, releases: &Rc<Cell<u32>>) -> Array<Handle> {
    (0..count)
        .map(|id| Handle {
            id,
            releases: Rc::clone(releases),
        })
        .collect()
}

// =============================================================================
// Growth
// =============================================================================

#[test]
fn length_never_exceeds_capacity() {
    let mut array = Array::<i64>::new();
    for n in 0..500 {
        array.add(n).unwrap();
        assert!(array.len() <= array.capacity());
    }
    assert!(array.as_slice().iter().copied().eq(0..500));
}

#[test]
fn appends_reallocate_logarithmically() {
    let mut array = Array::<i64>::new();
    for n in 0..100_000 {
        array.add(n).unwrap();
    }
    // 0 -> 8 -> 72 -> 584 -> 4680 -> 37448 -> 299592
    assert_eq!(array.reallocations(), 6);
}

#[test]
fn growth_factor_is_configurable() {
    let config = ArrayConfig::default().with_resize_factor(1);
    let mut array = Array::<i64>::with_config(TypeTag::Integer, config).unwrap();
    for n in 0..7 {
        array.add(n).unwrap();
    }
    // 0 -> 2 -> 6 -> 14
    assert_eq!(array.capacity(), 14);
}

// =============================================================================
// Removal and Release
// =============================================================================

#[test]
fn remove_shifts_following_elements() {
    let mut array = ints(&[1, 2, 3, 4, 5]);
    assert!(array.remove(&3));
    assert_eq!(array.as_slice(), &[1, 2, 4, 5]);
    assert_eq!(array.len(), 4);
}

#[test]
fn remove_missing_is_a_no_op() {
    let mut array = ints(&[1, 2, 3]);
    let capacity = array.capacity();
    assert!(!array.remove(&7));
    assert_eq!(array.as_slice(), &[1, 2, 3]);
    assert_eq!(array.capacity(), capacity);
}

#[test]
fn remove_value_coerces() {
    let mut array = ints(&[1, 2, 3]);
    assert!(array.remove_value(&Value::from(Structure::new(Value::Integer(2)))));
    assert!(!array.remove_value(&Value::Real(1.0)));
    assert_eq!(array.as_slice(), &[1, 3]);
}

#[test]
fn clear_releases_every_object_once() {
    let releases = Rc::new(Cell::new(0));
    let mut array = handles(5, &releases);
    array.clear();
    assert_eq!(releases.get(), 5);
    assert_eq!(array.len(), 0);
    drop(array);
    assert_eq!(releases.get(), 5);
}

#[test]
fn clear_releases_real_objects() {
    let mut array = Array::<Value>::of(TypeTag::Object);
    array.add(Value::from(Object::from(Value::Integer(1)))).unwrap();
    let mut snapshot = array.clone();
    snapshot.clear();
    assert!(snapshot.is_empty());
    assert_eq!(array.len(), 1);
}

#[test]
fn shrinking_releases_only_the_tail() {
    let releases = Rc::new(Cell::new(0));
    let mut array = handles(6, &releases);
    array.resize(4).unwrap();
    assert_eq!(releases.get(), 2);
    assert_eq!(array.to_string(), "(handle0, handle1, handle2, handle3)");
}

#[test]
fn growing_resize_keeps_elements() {
    let mut array = ints(&[1, 2]);
    array.resize(100).unwrap();
    assert_eq!(array.capacity(), 100);
    assert_eq!(array.as_slice(), &[1, 2]);
}

// =============================================================================
// Access
// =============================================================================

#[test]
fn get_out_of_range_reports_and_reads_nothing() {
    let array = ints(&[1]);
    let (result, diagnostics) = capture(|| array.get(5).map(|v| *v));
    assert!(matches!(
        result.unwrap_err().kind,
        ErrorKind::IndexOutOfBounds { index: 5, length: 1 }
    ));
    assert_eq!(diagnostics.len(), 1);
}

#[test]
fn cursor_exhaustion_is_idempotent() {
    let array = ints(&[7, 8, 9]);
    let mut cursor = array.iter();
    assert_eq!(cursor.state(), CursorState::Unstarted);
    for expected in [7, 8, 9] {
        assert_eq!(cursor.next(), Some(&expected));
    }
    for _ in 0..3 {
        assert_eq!(cursor.next(), None);
    }
    assert_eq!(cursor.state(), CursorState::Exhausted);
}

#[test]
fn borrowing_iteration() {
    let array = ints(&[1, 2, 3]);
    let total: i64 = (&array).into_iter().sum();
    assert_eq!(total, 6);
}

// =============================================================================
// Rendering
// =============================================================================

#[test]
fn renders_integers() {
    assert_eq!(ints(&[1, 2, 3]).to_string(), "(1, 2, 3)");
}

#[test]
fn renders_empty() {
    assert_eq!(ints(&[]).to_string(), "()");
    assert_eq!(ints(&[]).to_text().as_str(), "()");
}

#[test]
fn renders_numbers_in_their_base() {
    let numbers: Array<Number> = [Number::from_i64(255, 16).unwrap(), Number::from_i64(5, 2).unwrap()]
        .into_iter()
        .collect();
    assert_eq!(numbers.to_string(), "(ff, 101)");
}

#[test]
fn truncated_rendering_warns() {
    let config = ArrayConfig::default().with_render_budget(4);
    let mut array = Array::<i64>::with_config(TypeTag::Integer, config).unwrap();
    for n in [10, 20, 30] {
        array.add(n).unwrap();
    }
    let (text, diagnostics) = capture(|| array.to_text());
    assert_eq!(text.as_str(), "(10,");
    assert_eq!(diagnostics.len(), 1);
}

// =============================================================================
// Equality, Ordering, Hashing
// =============================================================================

#[test]
fn equality_is_sequence_equality() {
    assert_eq!(ints(&[1, 2, 3]), ints(&[1, 2, 3]));
    assert_ne!(ints(&[1, 2, 3]), ints(&[3, 2, 1]));
}

#[test]
fn shorter_prefix_sorts_first() {
    assert_eq!(ints(&[1, 2]).compare_to(&ints(&[1, 2, 3])), Some(Ordering::Less));
    assert_eq!(ints(&[1, 2, 3]).compare_to(&ints(&[1, 2])), Some(Ordering::Greater));
    assert_eq!(ints(&[2]).compare_to(&ints(&[1, 9, 9])), Some(Ordering::Greater));
}

#[test]
fn hash_depends_on_order() {
    assert_eq!(ints(&[4, 5, 6]).hash_code(), ints(&[4, 5, 6]).hash_code());
    assert_ne!(ints(&[1, 2]).hash_code(), ints(&[2, 1]).hash_code());
}

#[test]
fn erased_arrays_compare_across_numeric_kinds() {
    let mut naturals = Array::<Value>::of(TypeTag::Natural);
    naturals.add(Value::Natural(1)).unwrap();
    let mut integers = Array::<Value>::of(TypeTag::Integer);
    integers.add(Value::Integer(1)).unwrap();
    assert_eq!(naturals, integers);
    assert_eq!(naturals.hash_code(), integers.hash_code());
    assert_eq!(
        Value::from(naturals).to_string(),
        Value::from(integers).to_string()
    );
}
