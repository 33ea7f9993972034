//! The homogeneous, resizable container.
//!
//! An [`Array`] holds elements of one kind in a contiguous buffer. Appends
//! grow the buffer geometrically, so `N` appends cost `O(log N)`
//! reallocations. Capability-bearing elements are released before they are
//! overwritten, removed, truncated, or cleared.
//!
//! `Array<T>` is generic over any [`Element`]. `Array<Value>` is the
//! type-erased form: its element kind is chosen at construction and every
//! added value is checked against it.

use std::any::Any;
use std::cmp::Ordering;
use std::fmt;
use std::mem::{self, size_of};

use ceres_support::{Appended, Severity, TextBuffer, diagnostic};

use crate::capability::{Basic, Comparable, Element};
use crate::collection::{Collection, Found, Iterable, List};
use crate::config::{ArrayConfig, NullHash};
use crate::error::{Error, ErrorContext, Result};
use crate::iterator::Cursor;
use crate::types::TypeTag;
use crate::value::Value;

/// Starting value of [`Array::hash_code`].
const HASH_SEED: u64 = 0x9E37_79B9_7F4A_7C15;

/// A resizable array of one element kind.
///
/// `len() <= capacity()` always holds, including after a failed operation.
pub struct Array<T: Element> {
    element: TypeTag,
    elements: Vec<T>,
    size: usize,
    config: ArrayConfig,
    reallocations: usize,
}

fn discard<T: Element>(mut item: T) {
    if item.is_basic() {
        item.release();
    }
}

impl<T: Element> Array<T> {
    // =========================================================================
    // Construction
    // =========================================================================

    /// Creates an empty array of `T`'s kind with no capacity.
    #[must_use]
    pub fn new() -> Self {
        Self::bare(T::KIND, ArrayConfig::default())
    }

    /// Creates an empty array of kind `element` with room for `capacity`
    /// elements.
    ///
    /// # Errors
    ///
    /// Fails if `T` cannot hold `element` or the buffer cannot be allocated.
    pub fn with_capacity(element: TypeTag, capacity: usize) -> Result<Self> {
        Self::with_config(
            element,
            ArrayConfig::default().with_initial_capacity(capacity),
        )
    }

    /// Creates an empty array of kind `element` configured by `config`.
    ///
    /// # Errors
    ///
    /// Fails if `T` cannot hold `element` or the initial buffer cannot be
    /// allocated.
    pub fn with_config(element: TypeTag, config: ArrayConfig) -> Result<Self> {
        if !T::KIND.accepts(element) {
            return Err(Error::type_mismatch(T::KIND, element)
                .with_context(
                    ErrorContext::new()
                        .with_operation("new")
                        .with_element(element),
                )
                .reported(Severity::Warning));
        }
        let mut array = Self::bare(element, config);
        if config.initial_capacity > 0 {
            array.reallocate(config.initial_capacity)?;
            array.reallocations = 0;
        }
        Ok(array)
    }

    /// Creates an array of kind `element` holding `values` in order.
    ///
    /// # Errors
    ///
    /// Fails on the first value whose kind `element` does not accept.
    pub fn from_values<I>(element: TypeTag, values: I) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
    {
        let values = values.into_iter();
        let mut array = Self::with_capacity(element, values.size_hint().0)?;
        for value in values {
            array.add(value)?;
        }
        Ok(array)
    }

    fn bare(element: TypeTag, config: ArrayConfig) -> Self {
        Self {
            element,
            elements: Vec::new(),
            size: 0,
            config,
            reallocations: 0,
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Number of elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Returns true if there are no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Number of elements that fit before the next reallocation.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.size
    }

    /// Kind of element this array holds.
    #[must_use]
    pub const fn element_type(&self) -> TypeTag {
        self.element
    }

    /// The configuration in effect.
    #[must_use]
    pub const fn config(&self) -> &ArrayConfig {
        &self.config
    }

    /// How many times the buffer has been reallocated since construction.
    #[must_use]
    pub const fn reallocations(&self) -> usize {
        self.reallocations
    }

    /// The elements as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.elements
    }

    /// A fresh cursor over the elements.
    #[must_use]
    pub fn iter(&self) -> Cursor<'_, T> {
        Cursor::new(self.element, &self.elements)
    }

    /// The element at `index`.
    ///
    /// # Errors
    ///
    /// Reports and returns an index error when `index >= len()`.
    pub fn get(&self, index: usize) -> Result<&T> {
        match self.elements.get(index) {
            Some(item) => Ok(item),
            None => Err(self.fail(
                Error::index_out_of_bounds(index, self.len()),
                "get",
                Severity::Warning,
            )),
        }
    }

    /// The first element.
    #[must_use]
    pub fn first(&self) -> Option<&T> {
        self.elements.first()
    }

    /// The last element.
    #[must_use]
    pub fn last(&self) -> Option<&T> {
        self.elements.last()
    }

    // =========================================================================
    // Search
    // =========================================================================

    /// The first element equal to `item`, or a miss at `len()`.
    #[must_use]
    pub fn find(&self, item: &T) -> Found<'_, T> {
        match self.index_of(item) {
            Some(index) => Found::at(index, &self.elements[index]),
            None => Found::not_found(self.len()),
        }
    }

    /// Position of the first element equal to `item`.
    #[must_use]
    pub fn index_of(&self, item: &T) -> Option<usize> {
        self.elements.iter().position(|e| e.equals(item))
    }

    /// Returns true if some element equals `item`.
    #[must_use]
    pub fn contains(&self, item: &T) -> bool {
        self.index_of(item).is_some()
    }

    /// Number of elements equal to `item`.
    #[must_use]
    pub fn count(&self, item: &T) -> usize {
        self.elements.iter().filter(|e| e.equals(item)).count()
    }

    // =========================================================================
    // Mutation
    // =========================================================================

    /// Appends `item`, growing the buffer if it is full.
    ///
    /// # Errors
    ///
    /// Fails if this array does not accept the item's kind or the buffer
    /// cannot grow. The array is unchanged on failure.
    pub fn add(&mut self, item: T) -> Result<()> {
        self.check_kind(&item, "add")?;
        if self.elements.len() == self.size {
            self.reallocate(self.config.grown(self.size))?;
        }
        self.elements.push(item);
        Ok(())
    }

    /// Adds a type-erased value, unwrapping one `Structure` or `Object` level
    /// if needed.
    ///
    /// # Errors
    ///
    /// Fails with a type mismatch if the value does not fit.
    pub fn add_value(&mut self, value: &Value) -> Result<()> {
        match self.coerce(value) {
            Some(item) => self.add(item),
            None => Err(self.fail(
                Error::type_mismatch(self.element, value.type_tag()),
                "add_value",
                Severity::Warning,
            )),
        }
    }

    /// Replaces the element at `index`, releasing the old one.
    ///
    /// # Errors
    ///
    /// Fails on a kind mismatch or an out-of-range index.
    pub fn set(&mut self, index: usize, item: T) -> Result<()> {
        self.check_kind(&item, "set")?;
        let length = self.len();
        match self.elements.get_mut(index) {
            Some(slot) => {
                discard(mem::replace(slot, item));
                Ok(())
            }
            None => Err(self.fail(
                Error::index_out_of_bounds(index, length),
                "set",
                Severity::Warning,
            )),
        }
    }

    /// Inserts `item` at `index`, shifting later elements right.
    ///
    /// # Errors
    ///
    /// Fails on a kind mismatch, when `index > len()`, or if the buffer
    /// cannot grow.
    pub fn insert(&mut self, index: usize, item: T) -> Result<()> {
        self.check_kind(&item, "insert")?;
        if index > self.len() {
            return Err(self.fail(
                Error::index_out_of_bounds(index, self.len()),
                "insert",
                Severity::Warning,
            ));
        }
        if self.elements.len() == self.size {
            self.reallocate(self.config.grown(self.size))?;
        }
        self.elements.insert(index, item);
        Ok(())
    }

    /// Removes and returns the element at `index`, shifting later elements
    /// left. The caller takes ownership, so nothing is released.
    ///
    /// # Errors
    ///
    /// Fails when `index >= len()`.
    pub fn remove_at(&mut self, index: usize) -> Result<T> {
        if index >= self.len() {
            return Err(self.fail(
                Error::index_out_of_bounds(index, self.len()),
                "remove_at",
                Severity::Warning,
            ));
        }
        Ok(self.elements.remove(index))
    }

    /// Removes the first element equal to `item`, releasing it and shifting
    /// later elements left. A miss leaves the array untouched.
    pub fn remove(&mut self, item: &T) -> bool {
        match self.index_of(item) {
            Some(index) => {
                discard(self.elements.remove(index));
                true
            }
            None => false,
        }
    }

    /// Removes the first element equal to a type-erased value.
    pub fn remove_value(&mut self, value: &Value) -> bool {
        match self.coerce(value) {
            Some(item) => self.remove(&item),
            None => false,
        }
    }

    /// Releases every element and empties the array. Capacity is kept.
    pub fn clear(&mut self) {
        self.release_from(0);
        self.elements.clear();
    }

    /// Sets the capacity to exactly `capacity`.
    ///
    /// Elements past the new capacity are released, then dropped, before the
    /// buffer is reallocated.
    ///
    /// # Errors
    ///
    /// Fails if a larger buffer cannot be allocated; the array is unchanged.
    pub fn resize(&mut self, capacity: usize) -> Result<()> {
        if capacity < self.elements.len() {
            self.release_from(capacity);
            self.elements.truncate(capacity);
        }
        self.reallocate(capacity)
    }

    /// Makes room for at least `additional` more elements in one
    /// reallocation.
    ///
    /// # Errors
    ///
    /// Fails if the buffer cannot grow.
    pub fn reserve(&mut self, additional: usize) -> Result<()> {
        let Some(needed) = self.len().checked_add(additional) else {
            return Err(self.fail(
                Error::allocation_failed(usize::MAX),
                "reserve",
                Severity::Error,
            ));
        };
        if needed > self.size {
            self.reallocate(needed)?;
        }
        Ok(())
    }

    /// Drops spare capacity.
    pub fn shrink_to_fit(&mut self) {
        self.shrink_storage(self.len());
    }

    /// Appends every element of `other`.
    ///
    /// Arrays of an accepted kind are copied in bulk after one reservation.
    /// Arrays of structures or objects contribute each payload whose kind
    /// this array accepts and skip the rest.
    ///
    /// # Errors
    ///
    /// Any other kind is rejected with a warning and nothing is added.
    pub fn add_all_from<U: Element>(&mut self, other: &Array<U>) -> Result<()> {
        if self.element.accepts(other.element) {
            self.reserve(other.len())?;
            if let Some(same) = (other as &dyn Any).downcast_ref::<Self>() {
                self.elements.extend(same.elements.iter().cloned());
            } else {
                for item in &other.elements {
                    if let Some(converted) = self.coerce(&item.to_value()) {
                        self.add(converted)?;
                    }
                }
            }
            return Ok(());
        }
        match other.element {
            TypeTag::Structure | TypeTag::Object => {
                self.reserve(other.len())?;
                for item in &other.elements {
                    let value = item.to_value();
                    let payload = value.unwrap_once().unwrap_or(&value);
                    if let Some(converted) = self.accepted(payload) {
                        self.add(converted)?;
                    }
                }
                Ok(())
            }
            _ => Err(self.fail(
                Error::type_mismatch(self.element, other.element),
                "add_all",
                Severity::Warning,
            )),
        }
    }

    // =========================================================================
    // Equality, ordering, hashing
    // =========================================================================

    /// Element-wise equality. Order matters.
    #[must_use]
    pub fn equals(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .elements
                .iter()
                .zip(&other.elements)
                .all(|(a, b)| a.equals(b))
    }

    /// Lexicographic order, with a shorter matching prefix sorting first.
    ///
    /// `None` as soon as a pair of elements is incomparable.
    #[must_use]
    pub fn compare_to(&self, other: &Self) -> Option<Ordering> {
        for (a, b) in self.elements.iter().zip(&other.elements) {
            match a.compare_to(b)? {
                Ordering::Equal => {}
                unequal => return Some(unequal),
            }
        }
        Some(self.len().cmp(&other.len()))
    }

    /// Order-sensitive rolling hash using the configured nil policy.
    #[must_use]
    pub fn hash_code(&self) -> u64 {
        self.hash_code_with(self.config.null_hash)
    }

    /// Order-sensitive rolling hash.
    ///
    /// Starts from a fixed seed, so equal arrays of different element kinds
    /// hash alike, and per element rotates the code alternately left and
    /// right before mixing in the element's hash.
    #[must_use]
    pub fn hash_code_with(&self, null_hash: NullHash) -> u64 {
        self.elements
            .iter()
            .enumerate()
            .fold(HASH_SEED, |code, (i, item)| {
                let rotated = if i % 2 == 0 {
                    code.rotate_left(5)
                } else {
                    code.rotate_right(3)
                };
                rotated ^ item.hash_with(null_hash)
            })
    }

    // =========================================================================
    // Rendering
    // =========================================================================

    /// Renders as `(e1, e2, ...)` into a bounded buffer.
    pub fn render_into(&self, out: &mut TextBuffer) -> Appended {
        let mut status = out.append("(");
        for (i, item) in self.elements.iter().enumerate() {
            if status.is_truncated() {
                return status;
            }
            if i > 0 {
                status = status.and(out.append(", "));
            }
            status = status.and(item.render(out));
        }
        status.and(out.append(")"))
    }

    /// Renders within the configured budget, warning if the output was cut.
    #[must_use]
    pub fn to_text(&self) -> TextBuffer {
        let mut out = TextBuffer::new(self.config.render_budget);
        if self.render_into(&mut out).is_truncated() {
            diagnostic!(
                Severity::Warning,
                "rendering of array<{}> truncated at {} bytes",
                self.element,
                self.config.render_budget
            );
        }
        out
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn reallocate(&mut self, capacity: usize) -> Result<()> {
        if capacity == self.size {
            return Ok(());
        }
        if capacity > self.elements.capacity() {
            let additional = capacity - self.elements.len();
            if self.elements.try_reserve_exact(additional).is_err() {
                return Err(self.fail(
                    Error::allocation_failed(capacity.saturating_mul(size_of::<T>())),
                    "resize",
                    Severity::Error,
                ));
            }
        } else {
            self.shrink_storage(capacity);
            return Ok(());
        }
        self.size = capacity;
        self.reallocations += 1;
        Ok(())
    }

    /// Sets the capacity within the current allocation. Never fails.
    fn shrink_storage(&mut self, capacity: usize) {
        debug_assert!(capacity >= self.elements.len());
        if capacity == self.size {
            return;
        }
        self.elements.shrink_to(capacity);
        self.size = capacity;
        self.reallocations += 1;
    }

    fn release_from(&mut self, start: usize) {
        for item in &mut self.elements[start..] {
            if item.is_basic() {
                item.release();
            }
        }
    }

    fn check_kind(&self, item: &T, operation: &'static str) -> Result<()> {
        let actual = item.type_tag();
        if self.element.accepts(actual) {
            Ok(())
        } else {
            Err(self.fail(
                Error::type_mismatch(self.element, actual),
                operation,
                Severity::Warning,
            ))
        }
    }

    fn accepted(&self, value: &Value) -> Option<T> {
        T::from_value(value).filter(|item| self.element.accepts(item.type_tag()))
    }

    fn coerce(&self, value: &Value) -> Option<T> {
        self.accepted(value)
            .or_else(|| value.unwrap_once().and_then(|inner| self.accepted(inner)))
    }

    #[track_caller]
    fn fail(&self, error: Error, operation: &'static str, severity: Severity) -> Error {
        error
            .with_context(
                ErrorContext::new()
                    .with_operation(operation)
                    .with_element(self.element),
            )
            .reported(severity)
    }
}

impl Array<Value> {
    /// Creates an empty type-erased array holding values of kind `element`.
    #[must_use]
    pub fn of(element: TypeTag) -> Self {
        Self::bare(element, ArrayConfig::default())
    }
}

impl Array<TextBuffer> {
    /// Splits `text` at any of the `delimiters`, keeping non-empty pieces.
    #[must_use]
    pub fn split_text(text: &TextBuffer, delimiters: &str) -> Self {
        text.split(delimiters).into_iter().collect()
    }
}

// =============================================================================
// Trait implementations
// =============================================================================

impl<T: Element> Default for Array<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Element> Clone for Array<T> {
    fn clone(&self) -> Self {
        let mut elements = Vec::with_capacity(self.size);
        elements.extend(self.elements.iter().cloned());
        Self {
            element: self.element,
            elements,
            size: self.size,
            config: self.config,
            reallocations: 0,
        }
    }
}

impl<T: Element> Drop for Array<T> {
    fn drop(&mut self) {
        self.release_from(0);
    }
}

impl<T: Element> PartialEq for Array<T> {
    fn eq(&self, other: &Self) -> bool {
        self.equals(other)
    }
}

impl<T: Element> PartialOrd for Array<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.compare_to(other)
    }
}

impl<T: Element + fmt::Debug> fmt::Debug for Array<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Array")
            .field("element", &self.element)
            .field("elements", &self.elements)
            .field("capacity", &self.size)
            .finish()
    }
}

impl<T: Element> fmt::Display for Array<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("(")?;
        for (i, item) in self.elements.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{item}")?;
        }
        f.write_str(")")
    }
}

impl<T: Element> FromIterator<T> for Array<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut array = Self::new();
        array.extend(iter);
        array
    }
}

impl<T: Element> Extend<T> for Array<T> {
    /// Appends items until one is rejected; rejections are reported.
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        if self.reserve(iter.size_hint().0).is_err() {
            return;
        }
        for item in iter {
            if self.add(item).is_err() {
                return;
            }
        }
    }
}

impl<'a, T: Element> IntoIterator for &'a Array<T> {
    type Item = &'a T;
    type IntoIter = Cursor<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: Element> Iterable for Array<T> {
    type Item = T;

    fn iterator(&self) -> Cursor<'_, T> {
        self.iter()
    }

    fn is_empty(&self) -> bool {
        Array::is_empty(self)
    }
}

impl<T: Element> Collection for Array<T> {
    fn length(&self) -> usize {
        self.len()
    }

    fn element_type(&self) -> TypeTag {
        self.element
    }

    fn capacity(&self) -> usize {
        self.size
    }

    fn add(&mut self, item: T) -> Result<()> {
        Array::add(self, item)
    }

    fn remove(&mut self, item: &T) -> bool {
        Array::remove(self, item)
    }

    fn resize(&mut self, capacity: usize) -> Result<()> {
        Array::resize(self, capacity)
    }

    fn clear(&mut self) {
        Array::clear(self);
    }

    fn contains(&self, item: &T) -> bool {
        Array::contains(self, item)
    }

    fn count(&self, item: &T) -> usize {
        Array::count(self, item)
    }

    fn add_value(&mut self, value: &Value) -> Result<()> {
        Array::add_value(self, value)
    }
}

impl<T: Element> List for Array<T> {
    fn get(&self, index: usize) -> Result<&T> {
        Array::get(self, index)
    }

    fn index_of(&self, item: &T) -> Option<usize> {
        Array::index_of(self, item)
    }

    fn first(&self) -> Option<&T> {
        Array::first(self)
    }

    fn last(&self) -> Option<&T> {
        Array::last(self)
    }
}

impl<T: Element> Basic for Array<T> {
    fn release(&mut self) {
        Array::clear(self);
    }

    fn is_basic(&self) -> bool {
        true
    }

    fn equals(&self, other: &Self) -> bool {
        Array::equals(self, other)
    }

    fn hash_code(&self) -> u64 {
        Array::hash_code(self)
    }

    fn render(&self, out: &mut TextBuffer) -> Appended {
        self.render_into(out)
    }
}

impl<T: Element> Comparable for Array<T> {
    fn compare_to(&self, other: &Self) -> Option<Ordering> {
        Array::compare_to(self, other)
    }
}

impl<T: Element> Element for Array<T> {
    const KIND: TypeTag = TypeTag::Array;

    fn type_tag(&self) -> TypeTag {
        self.element.array_of().unwrap_or(TypeTag::Array)
    }

    fn from_value(value: &Value) -> Option<Self> {
        let source = value.as_array()?;
        if !T::KIND.accepts(source.element) {
            return None;
        }
        let mut array = Self::bare(source.element, source.config);
        array.elements.reserve_exact(source.size);
        array.size = source.size;
        for item in &source.elements {
            array.elements.push(T::from_value(item)?);
        }
        Some(array)
    }

    fn to_value(&self) -> Value {
        let mut array = Array::<Value>::bare(self.element, self.config);
        array.elements.reserve_exact(self.size);
        array.size = self.size;
        array
            .elements
            .extend(self.elements.iter().map(Element::to_value));
        Value::Array(array)
    }

    fn hash_with(&self, null_hash: NullHash) -> u64 {
        self.hash_code_with(null_hash)
    }
}
