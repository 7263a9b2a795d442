//! Cross-module tests for the canvas model.
//!
//! Tests are organized by domain:
//! - `properties` - invariants over sequences of layout and pointer operations
//! - `serialization` - persisted layout format and store round trips
