//! Tests for the cdash CLI binary.
//!
//! - `cli` - CLI argument parsing tests

mod cli;
