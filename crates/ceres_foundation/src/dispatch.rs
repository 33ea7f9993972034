//! Type-tag dispatch.
//!
//! Routes compare, equals, hash, and render for type-erased [`Value`]s to the
//! implementation for their kind. Ordinal kinds (booleans, characters,
//! digits, integers, naturals) compare by raw ordinal, reals compare with an
//! [`EPSILON`] tolerance, and numeric kinds may be mixed freely, going
//! through reals only when one side is a real. Wrappers on the left are unwrapped
//! and the comparison repeated; wrappers on the right are peeled to their
//! payload before conversion.
//!
//! Mixing a numeric kind with a non-numeric one is not an error. It reports a
//! [`NotComparable`](crate::ErrorKind::NotComparable) warning to the
//! diagnostic sink and yields "incomparable".

use std::cmp::Ordering;
use std::collections::hash_map::DefaultHasher;
use std::fmt::Write as _;
use std::hash::{Hash, Hasher};
use std::ptr;

use ceres_support::{Appended, Severity, TextBuffer};

use crate::config::NullHash;
use crate::error::Error;
use crate::types::TypeTag;
use crate::value::Value;

/// Returned by [`compare_to`] when the operands have no ordering.
///
/// Shares its value with "less than"; use [`try_compare`] to tell them apart.
pub const NOT_COMPARABLE: i32 = -1;

/// Two reals closer than this are equal.
pub const EPSILON: f64 = 1e-9;

// =============================================================================
// Compare / Equals
// =============================================================================

/// Orders two reals, treating values within [`EPSILON`] as equal.
#[must_use]
pub fn compare_reals(a: f64, b: f64) -> Option<Ordering> {
    if (a - b).abs() <= EPSILON {
        Some(Ordering::Equal)
    } else {
        a.partial_cmp(&b)
    }
}

/// Orders two values, or `None` if they are incomparable.
///
/// Identical references are equal without inspection. Nil on either side is
/// incomparable.
#[must_use]
pub fn try_compare(a: &Value, b: &Value) -> Option<Ordering> {
    compare(a, b, true)
}

/// Orders two values as `-1`, `0`, or `1`, or [`NOT_COMPARABLE`].
#[must_use]
pub fn compare_to(a: &Value, b: &Value) -> i32 {
    match try_compare(a, b) {
        Some(ordering) => ordering as i32,
        None => NOT_COMPARABLE,
    }
}

/// Structural equality. Nil is never equal to anything but itself by identity.
///
/// Unlike [`try_compare`], a kind mismatch is silently unequal.
#[must_use]
pub fn equals(a: &Value, b: &Value) -> bool {
    if ptr::eq(a, b) {
        return true;
    }
    match (a.payload(), b.payload()) {
        (Value::Nil, _) | (_, Value::Nil) => false,
        (Value::Array(x), Value::Array(y)) => x.equals(y),
        (x, y) => compare(x, y, false) == Some(Ordering::Equal),
    }
}

fn compare(a: &Value, b: &Value, report: bool) -> Option<Ordering> {
    if ptr::eq(a, b) {
        return Some(Ordering::Equal);
    }
    match a {
        Value::Nil => None,
        Value::Structure(s) => compare(s.value(), b, report),
        Value::Object(o) => match b {
            Value::Object(p) => compare(o.value(), p.value(), report),
            _ => compare(o.value(), b, report),
        },
        _ => {
            let b = b.payload();
            if a.type_tag().is_numeric() && b.type_tag().is_numeric() {
                return compare_numbers(a, b);
            }
            match (a, b) {
                (Value::Time(t), Value::Time(u)) => Some(t.seconds().cmp(&u.seconds())),
                (Value::Array(x), Value::Array(y)) => x.compare_to(y),
                (Value::String(s), Value::String(t)) => Some(s.cmp(t)),
                _ => mismatch(a, b, report),
            }
        }
    }
}

/// Orders two numeric payloads, converting through reals only when one side
/// is a real.
fn compare_numbers(a: &Value, b: &Value) -> Option<Ordering> {
    match (a, b) {
        (Value::Number(n), Value::Number(m)) => Some(n.cmp(m)),
        (Value::Real(_), _) | (_, Value::Real(_)) => compare_reals(a.as_real()?, b.as_real()?),
        (Value::Number(n), _) => Some(n.to_decimal().cmp(&b.ordinal()?)),
        (_, Value::Number(m)) => Some(a.ordinal()?.cmp(&m.to_decimal())),
        _ => Some(a.ordinal()?.cmp(&b.ordinal()?)),
    }
}

fn mismatch(a: &Value, b: &Value, report: bool) -> Option<Ordering> {
    if report && !b.is_nil() {
        // Reported only; callers see `None`.
        let _ = Error::not_comparable(a.type_tag(), b.type_tag()).reported(Severity::Warning);
    }
    None
}

// =============================================================================
// Hash
// =============================================================================

/// Hashes a value. Nil hashes to a fresh random number on every call.
#[must_use]
pub fn hash(value: &Value) -> u64 {
    hash_with(value, NullHash::Random)
}

/// Hashes a value, using `null_hash` for nil.
///
/// Values that compare equal across ordinal and numeric kinds hash alike.
#[must_use]
#[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
pub fn hash_with(value: &Value, null_hash: NullHash) -> u64 {
    match value {
        Value::Nil => null_hash.resolve(),
        Value::Real(r) => hash_real(*r),
        Value::Time(t) => t.seconds() as u64,
        Value::Number(n) => n.to_decimal() as u64,
        Value::Object(o) => hash_with(o.value(), null_hash),
        Value::Structure(s) => hash_with(s.value(), null_hash),
        Value::Array(a) => a.hash_code_with(null_hash),
        Value::String(s) => hash_text(s.as_str()),
        ordinal => ordinal.ordinal().map_or(0, |n| n as u64),
    }
}

/// Hashes a real. Whole reals hash like the equal integer.
#[must_use]
#[allow(
    clippy::float_cmp,
    clippy::cast_sign_loss,
    clippy::cast_possible_truncation
)]
pub fn hash_real(r: f64) -> u64 {
    if r.fract() == 0.0 && r.abs() < 9.0e18 {
        (r as i64) as u64
    } else {
        r.to_bits()
    }
}

/// Hashes text with the standard library's default hasher.
#[must_use]
pub fn hash_text(text: &str) -> u64 {
    let mut hasher = DefaultHasher::new();
    text.hash(&mut hasher);
    hasher.finish()
}

// =============================================================================
// Render
// =============================================================================

/// Renders a value into a bounded buffer.
pub fn render(value: &Value, out: &mut TextBuffer) -> Appended {
    match write!(out, "{value}") {
        Ok(()) => Appended::Complete,
        Err(_) => Appended::Truncated,
    }
}

/// Renders a value without a budget.
#[must_use]
pub fn to_string(value: &Value) -> String {
    value.to_string()
}

// =============================================================================
// Function Tables
// =============================================================================

/// The erased capability functions for one kind.
#[derive(Clone, Copy, Debug)]
pub struct Functions {
    /// Ordering, `None` when incomparable.
    pub compare: fn(&Value, &Value) -> Option<Ordering>,
    /// Structural equality.
    pub equals: fn(&Value, &Value) -> bool,
    /// Hash code.
    pub hash: fn(&Value) -> u64,
    /// Unbounded rendering.
    pub to_string: fn(&Value) -> String,
}

/// Looks up the capability functions for `tag`.
///
/// Returns `None` for kinds without an ordering, such as iterators.
#[must_use]
pub fn functions(tag: TypeTag) -> Option<Functions> {
    if !tag.is_comparable() {
        return None;
    }
    Some(Functions {
        compare: try_compare,
        equals,
        hash,
        to_string,
    })
}
