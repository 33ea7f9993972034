//! Capability-bearing wrapper around one structure.

use std::fmt;

use crate::structure::Structure;
use crate::value::Value;

/// A structure with the full capability set.
///
/// Releasing an object drops its payload; containers release the objects
/// they hold before overwriting, removing, or clearing them.
#[derive(Clone, Default)]
pub struct Object {
    structure: Structure,
    released: bool,
}

impl Object {
    /// Wraps a structure.
    #[must_use]
    pub fn new(structure: Structure) -> Self {
        Self {
            structure,
            released: false,
        }
    }

    /// The wrapped structure.
    #[must_use]
    pub const fn structure(&self) -> &Structure {
        &self.structure
    }

    /// Mutable access to the wrapped structure.
    pub fn structure_mut(&mut self) -> &mut Structure {
        &mut self.structure
    }

    /// The wrapped payload.
    #[must_use]
    pub const fn value(&self) -> &Value {
        self.structure.value()
    }

    /// Consumes the object and returns its structure.
    #[must_use]
    pub fn into_structure(self) -> Structure {
        self.structure
    }

    /// Returns true once [`Object::release`] has run.
    #[must_use]
    pub const fn is_released(&self) -> bool {
        self.released
    }

    /// Drops the payload.
    pub fn release(&mut self) {
        self.structure.reset();
        self.released = true;
    }
}

impl From<Value> for Object {
    fn from(value: Value) -> Self {
        Self::new(Structure::new(value))
    }
}

impl From<Structure> for Object {
    fn from(structure: Structure) -> Self {
        Self::new(structure)
    }
}

impl PartialEq for Object {
    fn eq(&self, other: &Self) -> bool {
        self.structure == other.structure
    }
}

impl fmt::Debug for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.released {
            write!(f, "Object(released)")
        } else {
            write!(f, "Object({:?})", self.structure.value())
        }
    }
}

impl fmt::Display for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.structure, f)
    }
}
