//! Cursor over a homogeneous buffer.

use std::iter::FusedIterator;

use crate::types::TypeTag;

/// Lifecycle of a [`Cursor`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CursorState {
    /// `next` has not been called.
    Unstarted,
    /// Some elements have been yielded and more remain.
    Active,
    /// Every element has been yielded. Terminal.
    Exhausted,
}

/// A single-pass cursor over the elements of a container.
///
/// Once exhausted, `next` keeps returning `None`. A cursor cannot be rewound;
/// ask the container for a new one. The cursor borrows the container, so the
/// container cannot be mutated while a traversal is live.
#[derive(Debug)]
pub struct Cursor<'a, T> {
    element: TypeTag,
    elements: &'a [T],
    index: usize,
    started: bool,
}

impl<'a, T> Cursor<'a, T> {
    /// Creates a cursor over `elements` of kind `element`.
    #[must_use]
    pub const fn new(element: TypeTag, elements: &'a [T]) -> Self {
        Self {
            element,
            elements,
            index: 0,
            started: false,
        }
    }

    /// Number of elements in the traversal.
    #[must_use]
    pub const fn length(&self) -> usize {
        self.elements.len()
    }

    /// Number of elements yielded so far.
    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    /// Kind of the elements.
    #[must_use]
    pub const fn element_type(&self) -> TypeTag {
        self.element
    }

    /// Where the cursor is in its lifecycle.
    #[must_use]
    pub const fn state(&self) -> CursorState {
        if !self.started {
            CursorState::Unstarted
        } else if self.index >= self.elements.len() {
            CursorState::Exhausted
        } else {
            CursorState::Active
        }
    }

    /// Elements not yet yielded.
    #[must_use]
    pub const fn remaining(&self) -> usize {
        self.elements.len() - self.index
    }

    /// The element most recently yielded.
    #[must_use]
    pub fn current(&self) -> Option<&'a T> {
        let elements = self.elements;
        self.index.checked_sub(1).and_then(|i| elements.get(i))
    }
}

impl<'a, T> Iterator for Cursor<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.started = true;
        let elements = self.elements;
        let item = elements.get(self.index)?;
        self.index += 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.remaining();
        (remaining, Some(remaining))
    }
}

impl<T> ExactSizeIterator for Cursor<'_, T> {}

impl<T> FusedIterator for Cursor<'_, T> {}
