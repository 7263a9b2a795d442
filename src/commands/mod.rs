//! Command implementations for the cdash CLI.
//!
//! This module contains all command handler functions, organized by domain:
//! - `config` - Configuration file management
//! - `layout` - Headless layout edits (list, add, remove, reset)
//! - `tui` - Interactive terminal canvas

pub(crate) mod config;
pub(crate) mod layout;
pub(crate) mod tui;

pub(crate) use config::*;
pub(crate) use layout::*;
pub(crate) use tui::*;
