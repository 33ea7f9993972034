//! Iterable, Collection, and List capability layers.
//!
//! Each layer adds default methods on top of a handful of primitives the
//! concrete container supplies. [`Array`](crate::Array) is the only
//! implementation in this crate, but the defaults work for any container that
//! can hand out a [`Cursor`].

use ceres_support::Severity;

use crate::capability::{Basic, Element};
use crate::error::{Error, ErrorContext, Result};
use crate::iterator::Cursor;
use crate::structure::Structure;
use crate::types::TypeTag;
use crate::value::Value;

/// Result of a search.
///
/// A miss is not an error: it has no item and its index equals the length of
/// the container searched.
#[derive(Debug, PartialEq)]
pub struct Found<'a, T> {
    /// Position of the match, or the container length on a miss.
    pub index: usize,
    /// The matching element.
    pub item: Option<&'a T>,
}

impl<'a, T> Found<'a, T> {
    /// A hit at `index`.
    #[must_use]
    pub const fn at(index: usize, item: &'a T) -> Self {
        Self {
            index,
            item: Some(item),
        }
    }

    /// A miss in a container of `length` elements.
    #[must_use]
    pub const fn not_found(length: usize) -> Self {
        Self {
            index: length,
            item: None,
        }
    }

    /// Returns true on a hit.
    #[must_use]
    pub const fn is_found(&self) -> bool {
        self.item.is_some()
    }
}

// Manual impls: derives would require `T: Clone`/`T: Copy`.
impl<T> Clone for Found<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Found<'_, T> {}

// =============================================================================
// Iterable
// =============================================================================

/// Something that can be traversed.
pub trait Iterable {
    /// Element type.
    type Item: Element;

    /// A fresh cursor positioned before the first element.
    fn iterator(&self) -> Cursor<'_, Self::Item>;

    /// Returns true if there is nothing to traverse.
    fn is_empty(&self) -> bool {
        self.iterator().length() == 0
    }
}

// =============================================================================
// Collection
// =============================================================================

/// A resizable bag of elements.
pub trait Collection: Iterable {
    /// Number of elements held.
    fn length(&self) -> usize;

    /// Kind of element accepted.
    fn element_type(&self) -> TypeTag;

    /// Number of elements that fit without reallocating.
    fn capacity(&self) -> usize;

    /// Appends one element.
    ///
    /// # Errors
    ///
    /// Fails if the element's kind is not accepted or storage cannot grow.
    fn add(&mut self, item: Self::Item) -> Result<()>;

    /// Removes the first element equal to `item`. Returns false on a miss.
    fn remove(&mut self, item: &Self::Item) -> bool;

    /// Sets the capacity to exactly `capacity`, releasing any elements that
    /// no longer fit.
    ///
    /// # Errors
    ///
    /// Fails if storage cannot be reallocated; the collection is unchanged.
    fn resize(&mut self, capacity: usize) -> Result<()>;

    /// Releases every element and empties the collection, keeping capacity.
    fn clear(&mut self);

    /// Returns true if some element equals `item`.
    fn contains(&self, item: &Self::Item) -> bool {
        self.iterator().any(|e| e.equals(item))
    }

    /// Number of elements equal to `item`.
    fn count(&self, item: &Self::Item) -> usize {
        self.iterator().filter(|e| e.equals(item)).count()
    }

    /// Adds a type-erased value.
    ///
    /// The value is taken as-is if its kind is accepted, otherwise a
    /// `Structure` or `Object` is unwrapped one level and its payload tried.
    ///
    /// # Errors
    ///
    /// Fails with a type mismatch if neither fits.
    fn add_value(&mut self, value: &Value) -> Result<()> {
        let element = self.element_type();
        let coerce = |v: &Value| {
            <Self::Item as Element>::from_value(v).filter(|item| element.accepts(item.type_tag()))
        };
        match coerce(value).or_else(|| value.unwrap_once().and_then(coerce)) {
            Some(item) => self.add(item),
            None => Err(Error::type_mismatch(element, value.type_tag())
                .with_context(
                    ErrorContext::new()
                        .with_operation("add_value")
                        .with_element(element),
                )
                .reported(Severity::Warning)),
        }
    }

    /// Adds the payload of a structure. See [`Collection::add_value`].
    ///
    /// # Errors
    ///
    /// Fails with a type mismatch if the payload is not accepted.
    fn add_structure(&mut self, structure: Structure) -> Result<()> {
        self.add_value(&Value::from(structure))
    }

    /// Grows capacity to at least `needed`. Never shrinks.
    ///
    /// # Errors
    ///
    /// Fails if storage cannot be reallocated.
    fn ensure_capacity(&mut self, needed: usize) -> Result<()> {
        if needed > self.capacity() {
            self.resize(needed)
        } else {
            Ok(())
        }
    }

    /// Appends every element of `other`, reallocating at most once up front.
    ///
    /// # Errors
    ///
    /// Fails if storage cannot grow or an element is rejected; elements added
    /// before the failure stay.
    fn add_all<C>(&mut self, other: &C) -> Result<()>
    where
        C: Iterable<Item = Self::Item> + ?Sized,
    {
        let cursor = other.iterator();
        self.ensure_capacity(self.length() + cursor.length())?;
        for item in cursor {
            self.add(item.clone())?;
        }
        Ok(())
    }

    /// Multiset containment: every element of `other` is matched by a
    /// distinct equal element here.
    fn contains_all<C>(&self, other: &C) -> bool
    where
        C: Collection<Item = Self::Item> + Clone,
    {
        self.count_all(other) == other.length()
    }

    /// Number of elements of `other` matched by distinct equal elements here.
    ///
    /// Scans this collection once, consuming a clone of `other` as matches
    /// are found.
    fn count_all<C>(&self, other: &C) -> usize
    where
        C: Collection<Item = Self::Item> + Clone,
    {
        let mut pending = other.clone();
        for item in self.iterator() {
            if pending.length() == 0 {
                break;
            }
            pending.remove(item);
        }
        other.length() - pending.length()
    }

    /// Removes one occurrence per element of `other`. Returns how many were
    /// removed.
    fn remove_all<C>(&mut self, other: &C) -> usize
    where
        C: Iterable<Item = Self::Item> + ?Sized,
    {
        other.iterator().filter(|item| self.remove(item)).count()
    }
}

// =============================================================================
// List
// =============================================================================

/// A collection with positional access.
pub trait List: Collection {
    /// The element at `index`.
    ///
    /// # Errors
    ///
    /// Fails with an index error when `index` is out of range.
    fn get(&self, index: usize) -> Result<&Self::Item>;

    /// The element at `index` as a structure, or the absent structure when
    /// `index` is out of range.
    fn get_structure(&self, index: usize) -> Structure {
        self.get(index)
            .map(|item| Structure::new(item.to_value()))
            .unwrap_or_default()
    }

    /// Position of the first element equal to `item`.
    fn index_of(&self, item: &Self::Item) -> Option<usize> {
        self.iterator().position(|e| e.equals(item))
    }

    /// The first element.
    fn first(&self) -> Option<&Self::Item> {
        self.iterator().next()
    }

    /// The last element.
    fn last(&self) -> Option<&Self::Item> {
        self.iterator().last()
    }
}
