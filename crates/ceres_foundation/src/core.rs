//! Capability flags attached to every structure.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::types::TypeTag;

/// Capability flags for a value.
///
/// Set at construction and left alone afterwards, except by [`Core::reset`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Core {
    /// The payload owns heap storage.
    pub is_dynamic: bool,
    /// The payload is a bare element rather than a wrapper.
    pub is_element: bool,
    /// The payload carries the release/clone/equals/hash/render capabilities.
    pub is_basic: bool,
    /// The payload has an ordering.
    pub is_comparable: bool,
}

impl Core {
    /// Creates flags from their parts.
    #[must_use]
    pub const fn new(is_dynamic: bool, is_element: bool, is_basic: bool, is_comparable: bool) -> Self {
        Self {
            is_dynamic,
            is_element,
            is_basic,
            is_comparable,
        }
    }

    /// Flags for a bare element of kind `tag`.
    #[must_use]
    pub const fn element(tag: TypeTag) -> Self {
        Self::new(tag.is_basic(), true, tag.is_basic(), tag.is_comparable())
    }

    /// Clears every flag.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
