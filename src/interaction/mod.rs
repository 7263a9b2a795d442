//! Pointer-driven move and resize of a single widget.
//!
//! The [`InteractionController`] is a three-state machine:
//!
//! ```text
//! Idle     --press on header-------> Dragging
//! Idle     --press on resize handle-> Resizing
//! Dragging --move-------------------> Dragging   (origin follows pointer)
//! Resizing --move-------------------> Resizing   (size follows pointer)
//! Dragging --release----------------> Idle
//! Resizing --release----------------> Idle
//! ```
//!
//! While a session is active only the session's widget is touched; presses
//! on other widgets are ignored until release. Moves and releases seen while
//! idle are ignored as well. Every move is applied immediately and in order.

mod hit;

pub use hit::{hit_test, Chrome, HitRegion};

use crate::geometry::{clamp_floor_wins, Point, Rect, Size};
use crate::layout::Canvas;

/// Smallest size a resize can produce.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SizeLimits {
    pub min_width: f64,
    pub min_height: f64,
}

impl Default for SizeLimits {
    fn default() -> Self {
        Self {
            min_width: 200.0,
            min_height: 150.0,
        }
    }
}

/// Kind of an active session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Move,
    Resize,
}

/// Controller state.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Session {
    #[default]
    Idle,
    /// Moving `widget_id`; `offset` is the pointer position relative to the
    /// widget's top-left corner, captured once at press time.
    Dragging { widget_id: String, offset: Point },
    /// Resizing `widget_id` from its fixed top-left corner.
    Resizing { widget_id: String },
}

impl Session {
    /// Id of the widget under interaction, if any.
    pub fn widget_id(&self) -> Option<&str> {
        match self {
            Session::Idle => None,
            Session::Dragging { widget_id, .. } | Session::Resizing { widget_id } => Some(widget_id),
        }
    }

    pub fn mode(&self) -> Option<Mode> {
        match self {
            Session::Idle => None,
            Session::Dragging { .. } => Some(Mode::Move),
            Session::Resizing { .. } => Some(Mode::Resize),
        }
    }

    pub fn is_active(&self) -> bool {
        !matches!(self, Session::Idle)
    }
}

/// Pointer input in canvas coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum PointerEvent {
    /// Press on `region` of `widget_id`.
    Down {
        widget_id: String,
        region: HitRegion,
        position: Point,
    },
    Move { position: Point },
    Up { position: Point },
}

/// What handling one event did.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// The event was not a trigger in the current state.
    Ignored,
    /// A session started.
    Started { widget_id: String, mode: Mode },
    /// The session's widget got a new rectangle.
    Updated { widget_id: String, rect: Rect },
    /// The session ended; `rect` is the widget's final rectangle.
    Finished { widget_id: String, rect: Rect },
}

/// New rectangle for a move: pointer minus press offset, clamped so the
/// widget stays inside the container. Size is unchanged.
pub fn drag_rect(rect: Rect, pointer: Point, offset: Point, container: Size) -> Rect {
    let x = clamp_floor_wins(pointer.x - offset.x, 0.0, container.width - rect.width);
    let y = clamp_floor_wins(pointer.y - offset.y, 0.0, container.height - rect.height);
    Rect::new(x, y, rect.width, rect.height)
}

/// New rectangle for a resize: the far corner follows the pointer, bounded
/// below by `limits` and above by the container edge. The minimum wins when
/// the two conflict. Origin is unchanged.
pub fn resize_rect(rect: Rect, pointer: Point, container: Size, limits: &SizeLimits) -> Rect {
    let width = clamp_floor_wins(pointer.x - rect.x, limits.min_width, container.width - rect.x);
    let height = clamp_floor_wins(pointer.y - rect.y, limits.min_height, container.height - rect.y);
    Rect::new(rect.x, rect.y, width, height)
}

/// Converts pointer events into rectangle updates on a [`Canvas`].
///
/// The canvas is borrowed per event rather than held, so the layout engine
/// stays the single owner of the widget list.
#[derive(Debug, Clone, Default)]
pub struct InteractionController {
    session: Session,
    limits: SizeLimits,
}

impl InteractionController {
    pub fn new(limits: SizeLimits) -> Self {
        Self {
            session: Session::Idle,
            limits,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn is_active(&self) -> bool {
        self.session.is_active()
    }

    pub fn limits(&self) -> SizeLimits {
        self.limits
    }

    /// Feeds one pointer event through the state machine.
    pub fn handle(&mut self, event: PointerEvent, canvas: &mut Canvas) -> Outcome {
        match event {
            PointerEvent::Down {
                widget_id,
                region,
                position,
            } => self.press(widget_id, region, position, canvas),
            PointerEvent::Move { position } => self.pointer_move(position, canvas),
            PointerEvent::Up { .. } => self.release(canvas),
        }
    }

    fn press(&mut self, widget_id: String, region: HitRegion, position: Point, canvas: &Canvas) -> Outcome {
        if let Some(active) = self.session.widget_id() {
            tracing::trace!("press on {widget_id} ignored, session active on {active}");
            return Outcome::Ignored;
        }
        let Some(widget) = canvas.get(&widget_id) else {
            tracing::debug!("press on unknown widget {widget_id}");
            return Outcome::Ignored;
        };

        let mode = match region {
            HitRegion::Header => {
                let offset = Point::new(position.x - widget.rect.x, position.y - widget.rect.y);
                self.session = Session::Dragging {
                    widget_id: widget_id.clone(),
                    offset,
                };
                Mode::Move
            }
            HitRegion::ResizeHandle => {
                self.session = Session::Resizing {
                    widget_id: widget_id.clone(),
                };
                Mode::Resize
            }
            HitRegion::Action | HitRegion::Body => return Outcome::Ignored,
        };
        tracing::debug!("session started: {mode:?} {widget_id}");
        Outcome::Started { widget_id, mode }
    }

    fn pointer_move(&mut self, position: Point, canvas: &mut Canvas) -> Outcome {
        let Some(widget_id) = self.session.widget_id().map(str::to_owned) else {
            return Outcome::Ignored;
        };
        let Some(current) = canvas.get(&widget_id).map(|w| w.rect) else {
            tracing::warn!("widget {widget_id} vanished during interaction, ending session");
            self.session = Session::Idle;
            return Outcome::Ignored;
        };

        let container = canvas.container();
        let rect = match &self.session {
            Session::Dragging { offset, .. } => drag_rect(current, position, *offset, container),
            Session::Resizing { .. } => resize_rect(current, position, container, &self.limits),
            Session::Idle => return Outcome::Ignored,
        };
        canvas.set_rect(&widget_id, rect);
        Outcome::Updated { widget_id, rect }
    }

    fn release(&mut self, canvas: &Canvas) -> Outcome {
        let session = std::mem::take(&mut self.session);
        let Some(widget_id) = session.widget_id() else {
            return Outcome::Ignored;
        };
        match canvas.get(widget_id) {
            Some(widget) => {
                tracing::debug!("session finished: {} at {}", widget_id, widget.rect);
                Outcome::Finished {
                    widget_id: widget_id.to_owned(),
                    rect: widget.rect,
                }
            }
            None => Outcome::Ignored,
        }
    }
}
