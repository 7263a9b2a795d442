//! Layout engine for the widget canvas.
//!
//! The [`Canvas`] owns the ordered list of widgets and the container bounds.
//! Adding a widget runs a first-fit search over a coarse occupancy grid (see
//! [`placement`]) to find space that no existing widget covers; removing one
//! is a plain filter. Neither operation can fail: adding a kind that already
//! exists, or removing an unknown id, leaves the canvas untouched.
//!
//! The canvas does not persist itself. Callers hand the updated widget list
//! to a [`LayoutStore`](crate::storage::LayoutStore) after each mutation.

mod canvas;
pub mod placement;

pub use canvas::{default_seed, generate_id, Canvas, ParseWidgetKindError, Widget, WidgetKind, WidgetSizes};
pub use placement::{find_free_origin, OccupancyGrid, Placement, PlacementConfig};
