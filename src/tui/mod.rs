//! Terminal host for the canvas.
//!
//! Draws widgets with ratatui and turns crossterm mouse input into pointer
//! events for the interaction controller.

pub mod app;
pub mod event;
pub mod scale;
pub mod ui;

#[cfg(test)]
pub(crate) mod test_utils;

pub use app::App;
pub use scale::Scale;
