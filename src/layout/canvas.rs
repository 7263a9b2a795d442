//! Widget descriptors and the canvas that owns them.

use super::placement::{find_free_origin, Placement, PlacementConfig};
use crate::geometry::{Point, Rect, Size};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// The kind of content a widget shows. At most one widget of each kind
/// exists on a canvas at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WidgetKind {
    /// Monthly revenue chart.
    Chart,
    /// Key metrics summary.
    Summary,
    /// Usage instructions.
    Instructions,
    /// Free-form notes.
    Notes,
    /// To-do list.
    Todo,
}

impl WidgetKind {
    /// Every kind, in the order hosts offer them.
    pub const ALL: [WidgetKind; 5] = [
        WidgetKind::Chart,
        WidgetKind::Summary,
        WidgetKind::Instructions,
        WidgetKind::Notes,
        WidgetKind::Todo,
    ];

    /// Lowercase identifier, identical to the serialized form.
    pub fn as_str(self) -> &'static str {
        match self {
            WidgetKind::Chart => "chart",
            WidgetKind::Summary => "summary",
            WidgetKind::Instructions => "instructions",
            WidgetKind::Notes => "notes",
            WidgetKind::Todo => "todo",
        }
    }
}

impl fmt::Display for WidgetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown widget kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseWidgetKindError(String);

impl fmt::Display for ParseWidgetKindError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let known: Vec<&str> = WidgetKind::ALL.iter().map(|k| k.as_str()).collect();
        write!(
            f,
            "unknown widget kind '{}', expected one of: {}",
            self.0,
            known.join(", ")
        )
    }
}

impl std::error::Error for ParseWidgetKindError {}

impl FromStr for WidgetKind {
    type Err = ParseWidgetKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        WidgetKind::ALL
            .into_iter()
            .find(|k| k.as_str() == lower)
            .ok_or_else(|| ParseWidgetKindError(s.to_string()))
    }
}

/// A positioned, sized, typed panel on the canvas.
///
/// Serialized as `{ "id", "type", "position": {x, y}, "size": {width, height} }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "StoredWidget", into = "StoredWidget")]
pub struct Widget {
    /// Unique for the lifetime of the widget.
    pub id: String,
    pub kind: WidgetKind,
    pub rect: Rect,
}

#[derive(Serialize, Deserialize)]
struct StoredWidget {
    id: String,
    #[serde(rename = "type")]
    kind: WidgetKind,
    position: Point,
    size: Size,
}

impl From<StoredWidget> for Widget {
    fn from(stored: StoredWidget) -> Self {
        Widget::new(stored.id, stored.kind, Rect::from_parts(stored.position, stored.size))
    }
}

impl From<Widget> for StoredWidget {
    fn from(widget: Widget) -> Self {
        StoredWidget {
            position: widget.rect.origin(),
            size: widget.rect.size(),
            id: widget.id,
            kind: widget.kind,
        }
    }
}

impl Widget {
    pub fn new(id: impl Into<String>, kind: WidgetKind, rect: Rect) -> Self {
        Self {
            id: id.into(),
            kind,
            rect,
        }
    }
}

/// Starter layout used when nothing usable has been persisted.
pub fn default_seed() -> Vec<Widget> {
    vec![
        Widget::new("chart", WidgetKind::Chart, Rect::new(20.0, 20.0, 600.0, 400.0)),
        Widget::new("summary", WidgetKind::Summary, Rect::new(640.0, 20.0, 300.0, 200.0)),
        Widget::new(
            "instructions",
            WidgetKind::Instructions,
            Rect::new(640.0, 240.0, 300.0, 180.0),
        ),
    ]
}

/// Generates a fresh id of the form `<kind>-<unix millis>`.
///
/// A numeric suffix is appended if the id is already taken in `existing`.
pub fn generate_id(kind: WidgetKind, existing: &[Widget]) -> String {
    let base = format!("{}-{}", kind, chrono::Utc::now().timestamp_millis());
    let taken = |candidate: &str| existing.iter().any(|w| w.id == candidate);
    if !taken(&base) {
        return base;
    }
    (1u32..)
        .map(|n| format!("{base}-{n}"))
        .find(|candidate| !taken(candidate))
        .unwrap_or(base)
}

/// Default size per widget kind.
#[derive(Debug, Clone, PartialEq)]
pub struct WidgetSizes {
    default: Size,
    overrides: BTreeMap<WidgetKind, Size>,
}

impl WidgetSizes {
    /// Reference default widget size.
    pub const DEFAULT: Size = Size::new(300.0, 200.0);

    pub fn new(default: Size) -> Self {
        Self {
            default,
            overrides: BTreeMap::new(),
        }
    }

    /// Overrides the size for one kind.
    pub fn with_override(mut self, kind: WidgetKind, size: Size) -> Self {
        self.overrides.insert(kind, size);
        self
    }

    pub fn size_for(&self, kind: WidgetKind) -> Size {
        self.overrides.get(&kind).copied().unwrap_or(self.default)
    }
}

impl Default for WidgetSizes {
    fn default() -> Self {
        Self::new(Self::DEFAULT)
    }
}

/// The layout engine: owns the widget list and the container bounds.
///
/// Widget order is insertion order and only matters for drawing (later
/// widgets are drawn on top) and hit testing.
#[derive(Debug, Clone)]
pub struct Canvas {
    widgets: Vec<Widget>,
    container: Size,
    placement: PlacementConfig,
    sizes: WidgetSizes,
}

impl Canvas {
    /// Creates an empty canvas with default placement settings.
    pub fn new(container: Size) -> Self {
        Self::with_widgets(Vec::new(), container)
    }

    /// Creates a canvas from an existing widget list, e.g. one loaded from storage.
    pub fn with_widgets(widgets: Vec<Widget>, container: Size) -> Self {
        Self {
            widgets,
            container,
            placement: PlacementConfig::default(),
            sizes: WidgetSizes::default(),
        }
    }

    pub fn with_placement(mut self, placement: PlacementConfig) -> Self {
        self.placement = placement;
        self
    }

    pub fn with_sizes(mut self, sizes: WidgetSizes) -> Self {
        self.sizes = sizes;
        self
    }

    pub fn widgets(&self) -> &[Widget] {
        &self.widgets
    }

    pub fn into_widgets(self) -> Vec<Widget> {
        self.widgets
    }

    pub fn len(&self) -> usize {
        self.widgets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.widgets.is_empty()
    }

    pub fn container(&self) -> Size {
        self.container
    }

    /// Pushes new container bounds (e.g. after a viewport resize).
    ///
    /// Existing rectangles are left as they are; the next drag or resize of
    /// a widget clamps it to the new bounds.
    pub fn set_container(&mut self, container: Size) {
        if self.container != container {
            tracing::debug!("container resized {} -> {}", self.container, container);
            self.container = container;
        }
    }

    pub fn get(&self, id: &str) -> Option<&Widget> {
        self.widgets.iter().find(|w| w.id == id)
    }

    pub fn contains_kind(&self, kind: WidgetKind) -> bool {
        self.widgets.iter().any(|w| w.kind == kind)
    }

    /// Returns the top-most widget whose rectangle contains `point`.
    pub fn widget_at(&self, point: Point) -> Option<&Widget> {
        self.widgets.iter().rev().find(|w| w.rect.contains(point))
    }

    /// Adds a widget of `kind` at the first free position.
    ///
    /// Returns `None`, leaving the canvas unchanged, if a widget of that kind
    /// already exists. When the container has no free space the widget is
    /// placed at the fallback origin and may overlap others.
    pub fn add(&mut self, kind: WidgetKind) -> Option<&Widget> {
        if self.contains_kind(kind) {
            tracing::debug!("add {kind}: already present, ignoring");
            return None;
        }

        let size = self.sizes.size_for(kind);
        let occupied: Vec<Rect> = self.widgets.iter().map(|w| w.rect).collect();
        let placement = find_free_origin(size, self.container, &occupied, &self.placement);
        if let Placement::Fallback(origin) = placement {
            tracing::warn!("no free space for {kind}, placing at fallback origin {origin}");
        }

        let widget = Widget::new(
            generate_id(kind, &self.widgets),
            kind,
            Rect::from_parts(placement.origin(), size),
        );
        tracing::info!("added widget {} at {}", widget.id, widget.rect);
        self.widgets.push(widget);
        self.widgets.last()
    }

    /// Removes the widget with `id`, returning it. Unknown ids are a no-op.
    pub fn remove(&mut self, id: &str) -> Option<Widget> {
        let index = self.widgets.iter().position(|w| w.id == id)?;
        let removed = self.widgets.remove(index);
        tracing::info!("removed widget {}", removed.id);
        Some(removed)
    }

    /// Replaces the widget list with the default seed.
    pub fn reset(&mut self) {
        self.widgets = default_seed();
        tracing::info!("canvas reset to default layout");
    }

    /// Replaces one widget's rectangle. Returns `false` if `id` is unknown.
    pub(crate) fn set_rect(&mut self, id: &str, rect: Rect) -> bool {
        match self.widgets.iter_mut().find(|w| w.id == id) {
            Some(widget) => {
                widget.rect = rect;
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn canvas() -> Canvas {
        Canvas::new(Size::new(800.0, 600.0))
    }

    #[test]
    fn test_widget_kind_round_trips_through_str() {
        for kind in WidgetKind::ALL {
            assert_eq!(kind.as_str().parse::<WidgetKind>(), Ok(kind));
        }
        assert_eq!("Chart".parse::<WidgetKind>(), Ok(WidgetKind::Chart));
    }

    #[test]
    fn test_widget_kind_parse_error_lists_known_kinds() {
        let err = "gauge".parse::<WidgetKind>().expect_err("unknown kind");
        let msg = err.to_string();
        assert!(msg.contains("gauge"));
        assert!(msg.contains("instructions"));
    }

    #[test]
    fn test_widget_serializes_kind_as_type() {
        let widget = Widget::new("w1", WidgetKind::Todo, Rect::new(1.0, 2.0, 3.0, 4.0));
        let json = serde_json::to_string(&widget).expect("serialize widget");
        assert!(json.contains("\"type\":\"todo\""), "got {json}");
        assert!(json.contains("\"position\":{\"x\":1.0,\"y\":2.0}"), "got {json}");
        assert!(json.contains("\"size\":{\"width\":3.0,\"height\":4.0}"), "got {json}");
    }

    #[test]
    fn test_add_to_empty_canvas() {
        let mut canvas = canvas();
        let widget = canvas.add(WidgetKind::Chart).expect("chart added").clone();
        assert_eq!(widget.kind, WidgetKind::Chart);
        assert_eq!(widget.rect, Rect::new(0.0, 0.0, 300.0, 200.0));
        assert!(widget.id.starts_with("chart-"));
        assert_eq!(canvas.len(), 1);
    }

    #[test]
    fn test_add_duplicate_kind_is_noop() {
        let mut canvas = canvas();
        canvas.add(WidgetKind::Summary);
        let before = canvas.widgets().to_vec();
        assert!(canvas.add(WidgetKind::Summary).is_none());
        assert_eq!(canvas.widgets(), before.as_slice());
    }

    #[test]
    fn test_add_places_next_to_existing() {
        let mut canvas = canvas();
        canvas.add(WidgetKind::Chart);
        let second = canvas.add(WidgetKind::Summary).expect("summary added");
        assert_eq!(second.rect.origin(), Point::new(300.0, 0.0));
    }

    #[test]
    fn test_add_uses_per_kind_size() {
        let sizes = WidgetSizes::default().with_override(WidgetKind::Notes, Size::new(200.0, 150.0));
        let mut canvas = canvas().with_sizes(sizes);
        let notes = canvas.add(WidgetKind::Notes).expect("notes added");
        assert_eq!(notes.rect.size(), Size::new(200.0, 150.0));
        let todo = canvas.add(WidgetKind::Todo).expect("todo added");
        assert_eq!(todo.rect.size(), WidgetSizes::DEFAULT);
    }

    #[test]
    fn test_add_falls_back_when_full() {
        let full = vec![Widget::new("big", WidgetKind::Chart, Rect::new(0.0, 0.0, 800.0, 600.0))];
        let mut canvas = Canvas::with_widgets(full, Size::new(800.0, 600.0));
        let added = canvas.add(WidgetKind::Summary).expect("summary added");
        assert_eq!(added.rect.origin(), Point::new(20.0, 20.0));
    }

    #[test]
    fn test_remove_existing_and_unknown() {
        let mut canvas = Canvas::with_widgets(default_seed(), Size::new(1000.0, 600.0));
        let removed = canvas.remove("summary").expect("summary removed");
        assert_eq!(removed.kind, WidgetKind::Summary);
        assert_eq!(canvas.len(), 2);
        let before = canvas.widgets().to_vec();
        assert!(canvas.remove("summary").is_none());
        assert!(canvas.remove("nope").is_none());
        assert_eq!(canvas.widgets(), before.as_slice());
    }

    #[test]
    fn test_remove_preserves_order() {
        let mut canvas = Canvas::with_widgets(default_seed(), Size::new(1000.0, 600.0));
        canvas.remove("chart");
        let ids: Vec<&str> = canvas.widgets().iter().map(|w| w.id.as_str()).collect();
        assert_eq!(ids, vec!["summary", "instructions"]);
    }

    #[test]
    fn test_readd_after_remove() {
        let mut canvas = canvas();
        let id = canvas.add(WidgetKind::Chart).expect("added").id.clone();
        canvas.remove(&id);
        assert!(canvas.add(WidgetKind::Chart).is_some());
        assert_eq!(canvas.len(), 1);
    }

    #[test]
    fn test_generate_id_avoids_collisions() {
        let first = generate_id(WidgetKind::Chart, &[]);
        let existing = vec![Widget::new(first.clone(), WidgetKind::Chart, Rect::default())];
        let second = generate_id(WidgetKind::Chart, &existing);
        assert_ne!(first, second);
        assert!(second.starts_with("chart-"));
    }

    #[test]
    fn test_default_seed_is_unique() {
        let seed = default_seed();
        let ids: HashSet<&str> = seed.iter().map(|w| w.id.as_str()).collect();
        let kinds: HashSet<WidgetKind> = seed.iter().map(|w| w.kind).collect();
        assert_eq!(ids.len(), seed.len());
        assert_eq!(kinds.len(), seed.len());
    }

    #[test]
    fn test_reset_restores_seed() {
        let mut canvas = canvas();
        canvas.add(WidgetKind::Todo);
        canvas.reset();
        assert_eq!(canvas.widgets(), default_seed().as_slice());
    }

    #[test]
    fn test_widget_at_prefers_topmost() {
        let widgets = vec![
            Widget::new("below", WidgetKind::Chart, Rect::new(0.0, 0.0, 300.0, 300.0)),
            Widget::new("above", WidgetKind::Notes, Rect::new(100.0, 100.0, 300.0, 300.0)),
        ];
        let canvas = Canvas::with_widgets(widgets, Size::new(800.0, 600.0));
        assert_eq!(canvas.widget_at(Point::new(150.0, 150.0)).map(|w| w.id.as_str()), Some("above"));
        assert_eq!(canvas.widget_at(Point::new(50.0, 50.0)).map(|w| w.id.as_str()), Some("below"));
        assert!(canvas.widget_at(Point::new(700.0, 500.0)).is_none());
    }

    #[test]
    fn test_set_container_does_not_move_widgets() {
        let mut canvas = Canvas::with_widgets(default_seed(), Size::new(1000.0, 600.0));
        canvas.set_container(Size::new(400.0, 300.0));
        assert_eq!(canvas.container(), Size::new(400.0, 300.0));
        assert_eq!(canvas.widgets(), default_seed().as_slice());
    }

    #[test]
    fn test_set_rect_unknown_id() {
        let mut canvas = canvas();
        assert!(!canvas.set_rect("ghost", Rect::default()));
    }
}
