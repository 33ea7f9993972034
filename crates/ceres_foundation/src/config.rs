//! Container configuration.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Default growth exponent: capacity becomes `(capacity + 1) << 3`.
pub const RESIZE_FACTOR: u32 = 3;

/// Largest accepted growth exponent.
pub const MAX_RESIZE_FACTOR: u32 = 16;

/// Default byte budget for rendering a container to text.
pub const DEFAULT_RENDER_BUDGET: usize = 1024;

/// Hash produced for a nil value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum NullHash {
    /// A fresh random number on every call.
    #[default]
    Random,
    /// A fixed sentinel.
    Fixed(u64),
}

impl NullHash {
    /// Produces the hash for nil under this policy.
    #[must_use]
    pub fn resolve(self) -> u64 {
        match self {
            Self::Random => rand::random(),
            Self::Fixed(hash) => hash,
        }
    }
}

/// Configuration for an [`Array`](crate::Array).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ArrayConfig {
    /// Capacity allocated at construction.
    pub initial_capacity: usize,

    /// Growth exponent applied when an append finds the array full.
    pub resize_factor: u32,

    /// Byte budget for [`Array::to_text`](crate::Array::to_text).
    pub render_budget: usize,

    /// Hash used for nil elements.
    pub null_hash: NullHash,
}

impl Default for ArrayConfig {
    fn default() -> Self {
        Self {
            initial_capacity: 0,
            resize_factor: RESIZE_FACTOR,
            render_budget: DEFAULT_RENDER_BUDGET,
            null_hash: NullHash::Random,
        }
    }
}

impl ArrayConfig {
    /// Doubling growth instead of the default eightfold.
    #[must_use]
    pub fn compact() -> Self {
        Self {
            resize_factor: 1,
            ..Self::default()
        }
    }

    /// Hashes nil to zero so array hashes are reproducible.
    #[must_use]
    pub fn deterministic() -> Self {
        Self {
            null_hash: NullHash::Fixed(0),
            ..Self::default()
        }
    }

    /// Builder method to set the initial capacity.
    #[must_use]
    pub fn with_initial_capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = capacity;
        self
    }

    /// Builder method to set the growth exponent, clamped to 1 through 16.
    #[must_use]
    pub fn with_resize_factor(mut self, factor: u32) -> Self {
        self.resize_factor = factor.clamp(1, MAX_RESIZE_FACTOR);
        self
    }

    /// Builder method to set the render budget.
    #[must_use]
    pub fn with_render_budget(mut self, budget: usize) -> Self {
        self.render_budget = budget;
        self
    }

    /// Builder method to set the nil hash policy.
    #[must_use]
    pub fn with_null_hash(mut self, null_hash: NullHash) -> Self {
        self.null_hash = null_hash;
        self
    }

    /// Capacity after growing from `capacity`.
    #[must_use]
    pub fn grown(&self, capacity: usize) -> usize {
        let factor = self.resize_factor.min(MAX_RESIZE_FACTOR);
        capacity.saturating_add(1).saturating_mul(1 << factor)
    }
}
