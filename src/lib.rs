//! Canvas dashboard library
//!
//! A dashboard of typed widgets on a bounded canvas. New widgets are placed
//! at the first free spot of a coarse grid; existing ones are moved by their
//! header and resized from their bottom-right corner, always staying inside
//! the container and above a minimum size. The layout survives restarts
//! through a small key-value store.
//!
//! The [`layout`] and [`interaction`] modules hold the model and know
//! nothing about terminals. [`tui`] is one host for them.

/// Points, sizes and rectangles in canvas units.
pub mod geometry;

/// Widget list, first-fit placement and the default seed.
pub mod layout;

/// Move/resize state machine driven by pointer events.
pub mod interaction;

/// Layout persistence.
pub mod storage;

/// Configuration file, XDG paths and defaults.
pub mod config;

/// Tracing subscriber setup.
pub mod logging;

/// Content shown inside each widget kind.
pub mod widgets;

/// Terminal user interface.
pub mod tui;

pub use geometry::{Point, Rect, Size};
pub use interaction::{HitRegion, InteractionController, Outcome, PointerEvent, SizeLimits};
pub use layout::{Canvas, Widget, WidgetKind};
pub use storage::{KeyValueStore, LayoutStore};

#[cfg(test)]
mod tests;
