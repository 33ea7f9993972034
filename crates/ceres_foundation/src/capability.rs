//! Capability traits for container elements.
//!
//! [`Basic`] is the release/clone/equals/hash/render bundle every element
//! carries, [`Comparable`] adds an ordering, and [`Element`] ties a Rust type
//! to its [`TypeTag`] and to the type-erased [`Value`] model. Containers are
//! generic over `T: Element` and never switch on tags themselves.

use std::cmp::Ordering;
use std::fmt::{self, Write as _};

use ceres_support::{Appended, TextBuffer};

use crate::config::NullHash;
use crate::dispatch;
use crate::number::{Digit, Number};
use crate::object::Object;
use crate::structure::Structure;
use crate::time::Time;
use crate::types::TypeTag;
use crate::value::Value;

/// Release, clone, equality, hashing, and rendering.
pub trait Basic: Clone + fmt::Display {
    /// Drops owned sub-structure. Plain kinds have nothing to release.
    fn release(&mut self) {}

    /// Returns true if containers must call [`Basic::release`] on this value
    /// before overwriting, removing, or clearing it.
    fn is_basic(&self) -> bool {
        false
    }

    /// Structural equality.
    fn equals(&self, other: &Self) -> bool;

    /// Hash code consistent with [`Basic::equals`].
    fn hash_code(&self) -> u64;

    /// Renders into a bounded buffer.
    fn render(&self, out: &mut TextBuffer) -> Appended {
        match write!(out, "{self}") {
            Ok(()) => Appended::Complete,
            Err(_) => Appended::Truncated,
        }
    }
}

/// An ordering on top of [`Basic`].
pub trait Comparable: Basic {
    /// Orders two values, or `None` if they are incomparable.
    fn compare_to(&self, other: &Self) -> Option<Ordering>;
}

/// A type that can live in an [`Array`](crate::Array).
pub trait Element: Comparable + 'static {
    /// The kind every value of this type has, or the widest kind for
    /// type-erased elements.
    const KIND: TypeTag;

    /// The kind of this particular value.
    fn type_tag(&self) -> TypeTag {
        Self::KIND
    }

    /// Converts from the type-erased model if `value` holds this kind.
    fn from_value(value: &Value) -> Option<Self>;

    /// Converts into the type-erased model.
    fn to_value(&self) -> Value;

    /// Hash code, using `null_hash` for any nil payload.
    fn hash_with(&self, null_hash: NullHash) -> u64 {
        let _ = null_hash;
        self.hash_code()
    }
}

// =============================================================================
// Ordinal kinds
// =============================================================================

macro_rules! ordinal_element {
    ($($ty:ty => $kind:ident),* $(,)?) => {
        $(
            impl Basic for $ty {
                fn equals(&self, other: &Self) -> bool {
                    self == other
                }

                fn hash_code(&self) -> u64 {
                    dispatch::hash(&Value::$kind(*self))
                }
            }

            impl Comparable for $ty {
                fn compare_to(&self, other: &Self) -> Option<Ordering> {
                    Some(self.cmp(other))
                }
            }

            impl Element for $ty {
                const KIND: TypeTag = TypeTag::$kind;

                fn from_value(value: &Value) -> Option<Self> {
                    match value {
                        Value::$kind(v) => Some(*v),
                        _ => None,
                    }
                }

                fn to_value(&self) -> Value {
                    Value::$kind(*self)
                }
            }
        )*
    };
}

ordinal_element! {
    bool => Boolean,
    char => Character,
    Digit => Digit,
    i64 => Integer,
    u64 => Natural,
}

// =============================================================================
// Reals, times, numbers, text
// =============================================================================

impl Basic for f64 {
    fn equals(&self, other: &Self) -> bool {
        dispatch::compare_reals(*self, *other) == Some(Ordering::Equal)
    }

    fn hash_code(&self) -> u64 {
        dispatch::hash_real(*self)
    }
}

impl Comparable for f64 {
    fn compare_to(&self, other: &Self) -> Option<Ordering> {
        dispatch::compare_reals(*self, *other)
    }
}

impl Element for f64 {
    const KIND: TypeTag = TypeTag::Real;

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Real(r) => Some(*r),
            _ => None,
        }
    }

    fn to_value(&self) -> Value {
        Value::Real(*self)
    }
}

impl Basic for Time {
    fn equals(&self, other: &Self) -> bool {
        self.seconds() == other.seconds()
    }

    #[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
    fn hash_code(&self) -> u64 {
        self.seconds() as u64
    }
}

impl Comparable for Time {
    fn compare_to(&self, other: &Self) -> Option<Ordering> {
        Some(self.seconds().cmp(&other.seconds()))
    }
}

impl Element for Time {
    const KIND: TypeTag = TypeTag::Time;

    fn from_value(value: &Value) -> Option<Self> {
        value.as_time().copied()
    }

    fn to_value(&self) -> Value {
        Value::Time(*self)
    }
}

impl Basic for Number {
    fn release(&mut self) {
        self.clear();
    }

    fn is_basic(&self) -> bool {
        true
    }

    fn equals(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }

    fn hash_code(&self) -> u64 {
        dispatch::hash(&Value::Number(self.clone()))
    }
}

impl Comparable for Number {
    fn compare_to(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Element for Number {
    const KIND: TypeTag = TypeTag::Number;

    fn from_value(value: &Value) -> Option<Self> {
        value.as_number().cloned()
    }

    fn to_value(&self) -> Value {
        Value::Number(self.clone())
    }
}

impl Basic for TextBuffer {
    fn equals(&self, other: &Self) -> bool {
        self == other
    }

    fn hash_code(&self) -> u64 {
        dispatch::hash_text(self.as_str())
    }
}

impl Comparable for TextBuffer {
    fn compare_to(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Element for TextBuffer {
    const KIND: TypeTag = TypeTag::String;

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(s.clone()),
            _ => None,
        }
    }

    fn to_value(&self) -> Value {
        Value::String(self.clone())
    }
}

// =============================================================================
// Wrappers
// =============================================================================

impl Basic for Object {
    fn release(&mut self) {
        Object::release(self);
    }

    fn is_basic(&self) -> bool {
        true
    }

    fn equals(&self, other: &Self) -> bool {
        dispatch::equals(self.value(), other.value())
    }

    fn hash_code(&self) -> u64 {
        dispatch::hash(self.value())
    }
}

impl Comparable for Object {
    fn compare_to(&self, other: &Self) -> Option<Ordering> {
        dispatch::try_compare(self.value(), other.value())
    }
}

impl Element for Object {
    const KIND: TypeTag = TypeTag::Object;

    fn from_value(value: &Value) -> Option<Self> {
        value.as_object().cloned()
    }

    fn to_value(&self) -> Value {
        Value::Object(Box::new(self.clone()))
    }

    fn hash_with(&self, null_hash: NullHash) -> u64 {
        dispatch::hash_with(self.value(), null_hash)
    }
}

impl Basic for Structure {
    fn release(&mut self) {
        self.reset();
    }

    fn is_basic(&self) -> bool {
        true
    }

    fn equals(&self, other: &Self) -> bool {
        dispatch::equals(self.value(), other.value())
    }

    fn hash_code(&self) -> u64 {
        dispatch::hash(self.value())
    }
}

impl Comparable for Structure {
    fn compare_to(&self, other: &Self) -> Option<Ordering> {
        dispatch::try_compare(self.value(), other.value())
    }
}

impl Element for Structure {
    const KIND: TypeTag = TypeTag::Structure;

    fn type_tag(&self) -> TypeTag {
        self.tag()
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Structure(s) => Some((**s).clone()),
            other => Some(Structure::new(other.clone())),
        }
    }

    fn to_value(&self) -> Value {
        Value::Structure(Box::new(self.clone()))
    }

    fn hash_with(&self, null_hash: NullHash) -> u64 {
        dispatch::hash_with(self.value(), null_hash)
    }
}

// =============================================================================
// Type-erased values
// =============================================================================

impl Basic for Value {
    fn release(&mut self) {
        match self {
            Value::Number(n) => n.clear(),
            Value::Object(o) => o.release(),
            Value::Array(a) => a.clear(),
            Value::Structure(s) => s.reset(),
            _ => {}
        }
    }

    fn is_basic(&self) -> bool {
        Value::is_basic(self)
    }

    fn equals(&self, other: &Self) -> bool {
        dispatch::equals(self, other)
    }

    fn hash_code(&self) -> u64 {
        dispatch::hash(self)
    }

    fn render(&self, out: &mut TextBuffer) -> Appended {
        dispatch::render(self, out)
    }
}

impl Comparable for Value {
    fn compare_to(&self, other: &Self) -> Option<Ordering> {
        dispatch::try_compare(self, other)
    }
}

impl Element for Value {
    const KIND: TypeTag = TypeTag::Structure;

    fn type_tag(&self) -> TypeTag {
        Value::type_tag(self)
    }

    fn from_value(value: &Value) -> Option<Self> {
        Some(value.clone())
    }

    fn to_value(&self) -> Value {
        self.clone()
    }

    fn hash_with(&self, null_hash: NullHash) -> u64 {
        dispatch::hash_with(self, null_hash)
    }
}
