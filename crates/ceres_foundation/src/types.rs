//! The closed registry of element kinds.
//!
//! A [`TypeTag`] names what a [`Value`](crate::Value) holds and what an
//! [`Array`](crate::Array) accepts. Arrays advertise themselves with the
//! matching "array of" tag, and the capability markers name the layers of the
//! container protocol.

use std::fmt;
use std::mem::size_of;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use ceres_support::TextBuffer;

use crate::array::Array;
use crate::number::{Digit, Number};
use crate::object::Object;
use crate::structure::Structure;
use crate::time::Time;
use crate::value::Value;

/// Element kind identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TypeTag {
    /// `true` or `false`.
    Boolean,
    /// A single character.
    Character,
    /// A small unsigned ordinal.
    Digit,
    /// Signed 64-bit integer.
    Integer,
    /// Unsigned 64-bit integer.
    Natural,
    /// Floating point, compared with a tolerance.
    Real,
    /// Calendar time.
    Time,
    /// Arbitrary-base digit string.
    Number,
    /// Capability-bearing wrapper around a structure.
    Object,
    /// Homogeneous array of any kind.
    Array,
    /// Bounded text.
    String,
    /// Type-erased descriptor; as an element kind it accepts anything.
    Structure,

    /// Array of booleans.
    BooleanArray,
    /// Array of characters.
    CharacterArray,
    /// Array of digits.
    DigitArray,
    /// Array of integers.
    IntegerArray,
    /// Array of naturals.
    NaturalArray,
    /// Array of reals.
    RealArray,
    /// Array of times.
    TimeArray,
    /// Array of numbers.
    NumberArray,
    /// Array of objects.
    ObjectArray,
    /// Array of arrays.
    ArrayArray,
    /// Array of strings.
    StringArray,
    /// Array of structures.
    StructureArray,

    /// Cursor over an iterable.
    Iterator,
    /// Marker: release, clone, equals, hash, and render.
    Basic,
    /// Marker: ordering.
    Comparable,
    /// Marker: `is_empty` and `iterator`.
    Iterable,
    /// Marker: add, remove, contains, count, and resize.
    Collection,
    /// Marker: positional access.
    List,
}

impl TypeTag {
    /// Returns the "array of" tag for an element kind.
    #[must_use]
    pub const fn array_of(self) -> Option<Self> {
        match self {
            Self::Boolean => Some(Self::BooleanArray),
            Self::Character => Some(Self::CharacterArray),
            Self::Digit => Some(Self::DigitArray),
            Self::Integer => Some(Self::IntegerArray),
            Self::Natural => Some(Self::NaturalArray),
            Self::Real => Some(Self::RealArray),
            Self::Time => Some(Self::TimeArray),
            Self::Number => Some(Self::NumberArray),
            Self::Object => Some(Self::ObjectArray),
            Self::Array => Some(Self::ArrayArray),
            Self::String => Some(Self::StringArray),
            Self::Structure => Some(Self::StructureArray),
            _ => None,
        }
    }

    /// Returns the element kind of an "array of" tag.
    #[must_use]
    pub const fn element(self) -> Option<Self> {
        match self {
            Self::BooleanArray => Some(Self::Boolean),
            Self::CharacterArray => Some(Self::Character),
            Self::DigitArray => Some(Self::Digit),
            Self::IntegerArray => Some(Self::Integer),
            Self::NaturalArray => Some(Self::Natural),
            Self::RealArray => Some(Self::Real),
            Self::TimeArray => Some(Self::Time),
            Self::NumberArray => Some(Self::Number),
            Self::ObjectArray => Some(Self::Object),
            Self::ArrayArray => Some(Self::Array),
            Self::StringArray => Some(Self::String),
            Self::StructureArray => Some(Self::Structure),
            _ => None,
        }
    }

    /// Returns true for `Array` and every "array of" tag.
    #[must_use]
    pub const fn is_array(self) -> bool {
        matches!(self, Self::Array) || self.element().is_some()
    }

    /// Returns true for kinds that take part in cross-type numeric comparison.
    #[must_use]
    pub const fn is_numeric(self) -> bool {
        matches!(
            self,
            Self::Boolean
                | Self::Character
                | Self::Digit
                | Self::Integer
                | Self::Natural
                | Self::Real
                | Self::Number
        )
    }

    /// Returns true for capability-bearing kinds.
    ///
    /// Elements of these kinds are released before they are overwritten,
    /// removed, truncated, or cleared.
    #[must_use]
    pub const fn is_basic(self) -> bool {
        matches!(
            self,
            Self::Number
                | Self::Object
                | Self::Array
                | Self::Structure
                | Self::Iterator
                | Self::Basic
                | Self::Comparable
                | Self::Iterable
                | Self::Collection
                | Self::List
        ) || self.element().is_some()
    }

    /// Returns true for kinds that have an ordering.
    #[must_use]
    pub const fn is_comparable(self) -> bool {
        !matches!(self, Self::Iterator | Self::Basic)
    }

    /// Returns true if a container of this kind accepts a value of `other`.
    ///
    /// `Structure` accepts everything and `Array` accepts any array kind.
    #[must_use]
    pub const fn accepts(self, other: Self) -> bool {
        matches!(self, Self::Structure)
            || (matches!(self, Self::Array) && other.is_array())
            || self as u8 == other as u8
    }

    /// Size in bytes of one slot of this kind.
    #[must_use]
    pub const fn size(self) -> usize {
        match self {
            Self::Boolean => size_of::<bool>(),
            Self::Character => size_of::<char>(),
            Self::Digit => size_of::<Digit>(),
            Self::Integer => size_of::<i64>(),
            Self::Natural => size_of::<u64>(),
            Self::Real => size_of::<f64>(),
            Self::Time => size_of::<Time>(),
            Self::Number => size_of::<Number>(),
            Self::Object => size_of::<Object>(),
            Self::String => size_of::<TextBuffer>(),
            Self::Structure => size_of::<Structure>(),
            Self::Basic | Self::Comparable => 0,
            _ => size_of::<Array<Value>>(),
        }
    }

    /// Lowercase name of this kind.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Boolean => "boolean",
            Self::Character => "character",
            Self::Digit => "digit",
            Self::Integer => "integer",
            Self::Natural => "natural",
            Self::Real => "real",
            Self::Time => "time",
            Self::Number => "number",
            Self::Object => "object",
            Self::Array => "array",
            Self::String => "string",
            Self::Structure => "structure",
            Self::BooleanArray => "array<boolean>",
            Self::CharacterArray => "array<character>",
            Self::DigitArray => "array<digit>",
            Self::IntegerArray => "array<integer>",
            Self::NaturalArray => "array<natural>",
            Self::RealArray => "array<real>",
            Self::TimeArray => "array<time>",
            Self::NumberArray => "array<number>",
            Self::ObjectArray => "array<object>",
            Self::ArrayArray => "array<array>",
            Self::StringArray => "array<string>",
            Self::StructureArray => "array<structure>",
            Self::Iterator => "iterator",
            Self::Basic => "basic",
            Self::Comparable => "comparable",
            Self::Iterable => "iterable",
            Self::Collection => "collection",
            Self::List => "list",
        }
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
