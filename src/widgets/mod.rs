//! Widget content, keyed by [`WidgetKind`].
//!
//! The layout engine only knows a widget's kind and rectangle. What a widget
//! shows comes from a [`WidgetView`] looked up in the [`ViewRegistry`], so
//! hosts can swap content without touching layout or interaction code.
//!
//! ```
//! use canvas_dashboard::layout::WidgetKind;
//! use canvas_dashboard::widgets::chart::Forecast;
//! use canvas_dashboard::widgets::{ViewRegistry, WidgetContext};
//!
//! let registry = ViewRegistry::new();
//! let view = registry.create(WidgetKind::Summary).expect("summary is built in");
//! assert_eq!(view.title(), "Summary");
//! let forecast = Forecast::default();
//! let lines = view.render(30, 10, &WidgetContext::new(&forecast));
//! assert!(!lines.is_empty());
//! ```

pub mod chart;
pub mod context;
pub mod summary;
pub mod text;

pub use context::WidgetContext;

use crate::layout::WidgetKind;
use ratatui::text::Line;
use std::collections::HashMap;

/// Content of one widget kind.
pub trait WidgetView: Send + Sync {
    fn kind(&self) -> WidgetKind;

    /// Header title.
    fn title(&self) -> &'static str;

    /// Optional one-line subtitle shown above the content.
    fn description(&self) -> Option<&'static str> {
        None
    }

    /// Content lines for an inner area of `width` columns by `height` rows.
    ///
    /// Views may return fewer lines than `height`; extra lines are clipped
    /// by the host.
    fn render(&self, width: u16, height: u16, context: &WidgetContext<'_>) -> Vec<Line<'static>>;
}

/// Factory function type for creating views.
pub type ViewFactory = fn() -> Box<dyn WidgetView>;

/// Maps widget kinds to view factories.
pub struct ViewRegistry {
    factories: HashMap<WidgetKind, ViewFactory>,
}

impl ViewRegistry {
    /// Registry with the built-in view for every kind.
    pub fn new() -> Self {
        let mut reg = Self {
            factories: HashMap::new(),
        };
        reg.register(WidgetKind::Chart, chart::RevenueChart::create);
        reg.register(WidgetKind::Summary, summary::SummaryView::create);
        reg.register(WidgetKind::Instructions, text::InstructionsView::create);
        reg.register(WidgetKind::Notes, text::NotesView::create);
        reg.register(WidgetKind::Todo, text::TodoView::create);
        reg
    }

    /// Register a factory for `kind`, replacing any existing one.
    pub fn register(&mut self, kind: WidgetKind, factory: ViewFactory) {
        self.factories.insert(kind, factory);
    }

    pub fn create(&self, kind: WidgetKind) -> Option<Box<dyn WidgetView>> {
        self.factories.get(&kind).map(|f| f())
    }

    /// Title for `kind`, falling back to a generic one for unregistered kinds.
    pub fn title(&self, kind: WidgetKind) -> &'static str {
        self.create(kind).map(|v| v.title()).unwrap_or(FALLBACK_TITLE)
    }
}

impl Default for ViewRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Title used for kinds without a registered view.
pub const FALLBACK_TITLE: &str = "New Widget";

/// Description used for kinds without a registered view.
pub const FALLBACK_DESCRIPTION: &str = "This is a new customizable widget";

/// Truncates `s` to at most `width` characters, ending in `…` when cut.
pub(crate) fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        return s.to_string();
    }
    if width == 0 {
        return String::new();
    }
    let mut out: String = s.chars().take(width - 1).collect();
    out.push('…');
    out
}
