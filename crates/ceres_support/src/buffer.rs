//! Bounded mutable text buffers.
//!
//! A [`TextBuffer`] holds at most `capacity` bytes of UTF-8 text. Writes that
//! would overflow the budget are cut on a character boundary, the buffer
//! remembers that it was truncated, and the write reports
//! [`Appended::Truncated`] instead of failing.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Default byte budget for buffers created from plain strings.
pub const DEFAULT_CAPACITY: usize = 256;

/// Outcome of a write into a [`TextBuffer`].
#[must_use]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Appended {
    /// All of the text fit.
    Complete,
    /// The text was cut to fit the budget.
    Truncated,
}

impl Appended {
    /// Returns true if the write was cut short.
    #[must_use]
    pub const fn is_truncated(self) -> bool {
        matches!(self, Self::Truncated)
    }

    /// Combines two outcomes; truncation is sticky.
    pub const fn and(self, other: Self) -> Self {
        match (self, other) {
            (Self::Complete, Self::Complete) => Self::Complete,
            _ => Self::Truncated,
        }
    }
}

/// Mutable text with a fixed byte budget.
#[derive(Clone)]
pub struct TextBuffer {
    text: String,
    capacity: usize,
    truncated: bool,
}

impl TextBuffer {
    /// Creates an empty buffer holding at most `capacity` bytes.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            text: String::with_capacity(capacity.min(4096)),
            capacity,
            truncated: false,
        }
    }

    /// Creates a buffer containing `text`.
    ///
    /// The budget is [`DEFAULT_CAPACITY`] or the length of `text`, whichever
    /// is larger, so the initial contents are never truncated.
    #[must_use]
    pub fn from_text(text: &str) -> Self {
        Self {
            text: text.to_owned(),
            capacity: text.len().max(DEFAULT_CAPACITY),
            truncated: false,
        }
    }

    /// Clears the contents and the truncation flag. The budget is kept.
    pub fn reset(&mut self) {
        self.text.clear();
        self.truncated = false;
    }

    /// Replaces the contents with `text`.
    pub fn set(&mut self, text: &str) -> Appended {
        self.reset();
        self.append(text)
    }

    /// Appends `text`, cutting it at the budget.
    pub fn append(&mut self, text: &str) -> Appended {
        let remaining = self.remaining();
        if text.len() <= remaining {
            self.text.push_str(text);
            return Appended::Complete;
        }

        let mut end = remaining;
        while !text.is_char_boundary(end) {
            end -= 1;
        }
        self.text.push_str(&text[..end]);
        self.truncated = true;
        Appended::Truncated
    }

    /// Appends a single character if it fits.
    pub fn push(&mut self, c: char) -> Appended {
        if c.len_utf8() > self.remaining() {
            self.truncated = true;
            return Appended::Truncated;
        }
        self.text.push(c);
        Appended::Complete
    }

    /// Returns the contents.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Returns the length of the contents in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Returns true if the buffer holds no text.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Returns the byte budget.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the number of bytes that can still be written.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.capacity.saturating_sub(self.text.len())
    }

    /// Returns true if any write since the last reset was cut short.
    #[must_use]
    pub const fn is_truncated(&self) -> bool {
        self.truncated
    }

    /// Byte offset of the first character that belongs to `set`.
    #[must_use]
    pub fn find(&self, set: &str) -> Option<usize> {
        self.text.find(|c| set.contains(c))
    }

    /// Byte offset of the first character at or after `start` that belongs to `set`.
    ///
    /// Returns `None` when `start` is past the end or not on a character boundary.
    #[must_use]
    pub fn find_from(&self, set: &str, start: usize) -> Option<usize> {
        if start > self.text.len() || !self.text.is_char_boundary(start) {
            return None;
        }
        self.text[start..]
            .find(|c| set.contains(c))
            .map(|offset| offset + start)
    }

    /// Byte offset of the last character that belongs to `set`.
    #[must_use]
    pub fn find_last(&self, set: &str) -> Option<usize> {
        self.text.rfind(|c| set.contains(c))
    }

    /// Splits on any character in `delimiters`, dropping empty pieces.
    ///
    /// Each piece is a new buffer with the same budget as `self`.
    #[must_use]
    pub fn split(&self, delimiters: &str) -> Vec<TextBuffer> {
        self.text
            .split(|c| delimiters.contains(c))
            .filter(|piece| !piece.is_empty())
            .map(|piece| Self {
                text: piece.to_owned(),
                capacity: self.capacity,
                truncated: false,
            })
            .collect()
    }
}

impl Default for TextBuffer {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl From<&str> for TextBuffer {
    fn from(text: &str) -> Self {
        Self::from_text(text)
    }
}

impl fmt::Write for TextBuffer {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        match self.append(s) {
            Appended::Complete => Ok(()),
            Appended::Truncated => Err(fmt::Error),
        }
    }
}

impl PartialEq for TextBuffer {
    fn eq(&self, other: &Self) -> bool {
        self.text == other.text
    }
}

impl Eq for TextBuffer {}

impl PartialOrd for TextBuffer {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TextBuffer {
    fn cmp(&self, other: &Self) -> Ordering {
        self.text.cmp(&other.text)
    }
}

impl Hash for TextBuffer {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.text.hash(state);
    }
}

impl fmt::Debug for TextBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.text)?;
        if self.truncated {
            write!(f, "...")?;
        }
        Ok(())
    }
}

impl fmt::Display for TextBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}
