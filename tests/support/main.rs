//! Integration tests for Layer 0: Support
//!
//! Tests for the bounded text buffer and the diagnostic side channel.

mod diagnostics;
mod text;
