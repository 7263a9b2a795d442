//! Live state passed to views while rendering.

use super::chart::Forecast;

/// Shared context handed to [`WidgetView::render`](super::WidgetView::render).
///
/// Borrowed from the host for a single render pass.
#[derive(Debug, Clone, Copy)]
pub struct WidgetContext<'a> {
    /// Current chart values.
    pub forecast: &'a Forecast,

    /// Chart point being dragged, if any.
    pub active_point: Option<usize>,
}

impl<'a> WidgetContext<'a> {
    /// Context with no point drag in progress.
    pub fn new(forecast: &'a Forecast) -> Self {
        Self {
            forecast,
            active_point: None,
        }
    }
}
