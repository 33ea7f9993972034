//! Core value type for all Ceres data.

use std::cmp::Ordering;
use std::fmt;

use ceres_support::TextBuffer;

use crate::array::Array;
use crate::dispatch;
use crate::number::{Digit, Number};
use crate::object::Object;
use crate::structure::Structure;
use crate::time::Time;
use crate::types::TypeTag;

/// A value of any registered element kind.
///
/// Equality, ordering, hashing, and rendering all route through
/// [`dispatch`](crate::dispatch), so mixed numeric kinds compare by value and
/// reals compare with a tolerance.
#[derive(Clone, Default)]
pub enum Value {
    /// Absence of a value.
    #[default]
    Nil,
    /// Boolean value.
    Boolean(bool),
    /// Single character.
    Character(char),
    /// Small unsigned ordinal.
    Digit(Digit),
    /// Signed 64-bit integer.
    Integer(i64),
    /// Unsigned 64-bit integer.
    Natural(u64),
    /// Floating point number.
    Real(f64),
    /// Calendar time.
    Time(Time),
    /// Arbitrary-base number.
    Number(Number),
    /// Capability-bearing wrapper.
    Object(Box<Object>),
    /// Homogeneous array.
    Array(Array<Value>),
    /// Bounded text.
    String(TextBuffer),
    /// Nested descriptor.
    Structure(Box<Structure>),
}

impl Value {
    /// Returns the kind of this value. `Nil` reports `Structure`; arrays
    /// report the "array of" tag for their element kind.
    #[must_use]
    pub fn type_tag(&self) -> TypeTag {
        match self {
            Self::Nil | Self::Structure(_) => TypeTag::Structure,
            Self::Boolean(_) => TypeTag::Boolean,
            Self::Character(_) => TypeTag::Character,
            Self::Digit(_) => TypeTag::Digit,
            Self::Integer(_) => TypeTag::Integer,
            Self::Natural(_) => TypeTag::Natural,
            Self::Real(_) => TypeTag::Real,
            Self::Time(_) => TypeTag::Time,
            Self::Number(_) => TypeTag::Number,
            Self::Object(_) => TypeTag::Object,
            Self::Array(a) => a.element_type().array_of().unwrap_or(TypeTag::Array),
            Self::String(_) => TypeTag::String,
        }
    }

    /// Returns true if this value is nil.
    #[must_use]
    pub const fn is_nil(&self) -> bool {
        matches!(self, Self::Nil)
    }

    /// Returns true if this value carries capabilities and must be released.
    #[must_use]
    pub fn is_basic(&self) -> bool {
        !self.is_nil() && self.type_tag().is_basic()
    }

    /// The payload of a `Structure` or `Object`, one level down.
    #[must_use]
    pub fn unwrap_once(&self) -> Option<&Value> {
        match self {
            Self::Structure(s) => Some(s.value()),
            Self::Object(o) => Some(o.value()),
            _ => None,
        }
    }

    /// The innermost payload beneath any `Structure`/`Object` wrappers.
    #[must_use]
    pub fn payload(&self) -> &Value {
        let mut current = self;
        while let Some(inner) = current.unwrap_once() {
            current = inner;
        }
        current
    }

    /// Ordinal value of booleans, characters, digits, integers, and naturals.
    #[must_use]
    pub fn ordinal(&self) -> Option<i128> {
        match self {
            Self::Boolean(b) => Some(i128::from(*b)),
            Self::Character(c) => Some(i128::from(u32::from(*c))),
            Self::Digit(d) => Some(i128::from(d.value())),
            Self::Integer(n) => Some(i128::from(*n)),
            Self::Natural(n) => Some(i128::from(*n)),
            _ => None,
        }
    }

    /// Numeric value as a float, for ordinal, real, and number kinds.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn as_real(&self) -> Option<f64> {
        match self {
            Self::Real(r) => Some(*r),
            Self::Number(n) => Some(n.to_real()),
            other => other.ordinal().map(|n| n as f64),
        }
    }

    /// Attempts to extract a boolean value.
    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Attempts to extract a character.
    #[must_use]
    pub const fn as_char(&self) -> Option<char> {
        match self {
            Self::Character(c) => Some(*c),
            _ => None,
        }
    }

    /// Attempts to extract an integer value.
    #[must_use]
    pub const fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Integer(n) => Some(*n),
            _ => None,
        }
    }

    /// Attempts to extract a natural value.
    #[must_use]
    pub const fn as_natural(&self) -> Option<u64> {
        match self {
            Self::Natural(n) => Some(*n),
            _ => None,
        }
    }

    /// Attempts to extract a time.
    #[must_use]
    pub const fn as_time(&self) -> Option<&Time> {
        match self {
            Self::Time(t) => Some(t),
            _ => None,
        }
    }

    /// Attempts to extract a number.
    #[must_use]
    pub const fn as_number(&self) -> Option<&Number> {
        match self {
            Self::Number(n) => Some(n),
            _ => None,
        }
    }

    /// Attempts to extract an object.
    #[must_use]
    pub fn as_object(&self) -> Option<&Object> {
        match self {
            Self::Object(o) => Some(o),
            _ => None,
        }
    }

    /// Attempts to extract an array.
    #[must_use]
    pub const fn as_array(&self) -> Option<&Array<Value>> {
        match self {
            Self::Array(a) => Some(a),
            _ => None,
        }
    }

    /// Attempts to extract text.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Attempts to extract a nested structure.
    #[must_use]
    pub fn as_structure(&self) -> Option<&Structure> {
        match self {
            Self::Structure(s) => Some(s),
            _ => None,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        dispatch::equals(self, other)
    }
}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        dispatch::try_compare(self, other)
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Nil => write!(f, "nil"),
            Self::Boolean(b) => write!(f, "{b}"),
            Self::Character(c) => write!(f, "{c:?}"),
            Self::Digit(d) => write!(f, "Digit({d})"),
            Self::Integer(n) => write!(f, "{n}"),
            Self::Natural(n) => write!(f, "{n}u"),
            Self::Real(r) => write!(f, "{r:?}"),
            Self::Time(t) => write!(f, "Time({t})"),
            Self::Number(n) => write!(f, "Number({n}, base {})", n.base()),
            Self::Object(o) => write!(f, "{o:?}"),
            Self::Array(a) => write!(f, "{a:?}"),
            Self::String(s) => write!(f, "{s:?}"),
            Self::Structure(s) => write!(f, "{s:?}"),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Nil => write!(f, "null"),
            Self::Boolean(b) => write!(f, "{b}"),
            Self::Character(c) => write!(f, "{c}"),
            Self::Digit(d) => write!(f, "{d}"),
            Self::Integer(n) => write!(f, "{n}"),
            Self::Natural(n) => write!(f, "{n}"),
            Self::Real(r) => write!(f, "{r}"),
            Self::Time(t) => write!(f, "{t}"),
            Self::Number(n) => write!(f, "{n}"),
            Self::Object(o) => write!(f, "{o}"),
            Self::Array(a) => write!(f, "{a}"),
            Self::String(s) => write!(f, "{s}"),
            Self::Structure(s) => write!(f, "{s}"),
        }
    }
}

// Convenience From implementations

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Boolean(b)
    }
}

impl From<char> for Value {
    fn from(c: char) -> Self {
        Self::Character(c)
    }
}

impl From<Digit> for Value {
    fn from(d: Digit) -> Self {
        Self::Digit(d)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Self::Integer(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Self::Integer(i64::from(n))
    }
}

impl From<u64> for Value {
    fn from(n: u64) -> Self {
        Self::Natural(n)
    }
}

impl From<f64> for Value {
    fn from(r: f64) -> Self {
        Self::Real(r)
    }
}

impl From<Time> for Value {
    fn from(t: Time) -> Self {
        Self::Time(t)
    }
}

impl From<Number> for Value {
    fn from(n: Number) -> Self {
        Self::Number(n)
    }
}

impl From<Object> for Value {
    fn from(o: Object) -> Self {
        Self::Object(Box::new(o))
    }
}

impl From<Array<Value>> for Value {
    fn from(a: Array<Value>) -> Self {
        Self::Array(a)
    }
}

impl From<TextBuffer> for Value {
    fn from(s: TextBuffer) -> Self {
        Self::String(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(TextBuffer::from_text(s))
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::String(TextBuffer::from_text(&s))
    }
}

impl From<Structure> for Value {
    fn from(s: Structure) -> Self {
        Self::Structure(Box::new(s))
    }
}
