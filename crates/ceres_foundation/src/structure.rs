//! Type-erased value descriptors.

use std::fmt;

use crate::core::Core;
use crate::error::{Error, Result};
use crate::types::TypeTag;
use crate::value::Value;

/// A tagged handle to any value.
///
/// The tag says how to read the payload. A structure with no payload has
/// size zero; a non-zero size always comes with a payload.
#[derive(Clone, Default)]
pub struct Structure {
    core: Core,
    tag: Option<TypeTag>,
    value: Value,
}

impl Structure {
    /// Wraps `value`, deriving the tag from it.
    #[must_use]
    pub fn new(value: Value) -> Self {
        let tag = value.type_tag();
        Self {
            core: Core::element(tag),
            tag: Some(tag),
            value,
        }
    }

    /// Wraps `value` under a declared tag.
    ///
    /// Fails if the declared tag does not accept the payload.
    pub fn with_tag(tag: TypeTag, value: Value) -> Result<Self> {
        let actual = value.type_tag();
        if !tag.accepts(actual) {
            return Err(Error::type_mismatch(tag, actual));
        }
        Ok(Self {
            core: Core::element(tag),
            tag: Some(tag),
            value,
        })
    }

    /// The absent structure.
    #[must_use]
    pub fn nil() -> Self {
        Self::default()
    }

    /// Capability flags.
    #[must_use]
    pub const fn core(&self) -> &Core {
        &self.core
    }

    /// Declared kind. The absent structure reports `Structure`.
    #[must_use]
    pub fn tag(&self) -> TypeTag {
        self.tag.unwrap_or(TypeTag::Structure)
    }

    /// The payload.
    #[must_use]
    pub const fn value(&self) -> &Value {
        &self.value
    }

    /// Mutable access to the payload.
    pub fn value_mut(&mut self) -> &mut Value {
        &mut self.value
    }

    /// Consumes the structure and returns its payload.
    #[must_use]
    pub fn into_value(self) -> Value {
        self.value
    }

    /// Size of the payload slot in bytes; zero when there is no payload.
    #[must_use]
    pub fn size(&self) -> usize {
        if self.value.is_nil() {
            0
        } else {
            self.tag().size()
        }
    }

    /// Returns true if there is no payload.
    #[must_use]
    pub fn is_nil(&self) -> bool {
        self.value.is_nil()
    }

    /// Drops the payload and clears the flags.
    pub fn reset(&mut self) {
        self.core.reset();
        self.tag = None;
        self.value = Value::Nil;
    }
}

impl From<Value> for Structure {
    fn from(value: Value) -> Self {
        Self::new(value)
    }
}

impl PartialEq for Structure {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl fmt::Debug for Structure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Structure<{}>({:?})", self.tag(), self.value)
    }
}

impl fmt::Display for Structure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.value, f)
    }
}
