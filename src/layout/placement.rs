//! First-fit free-space search over a coarse occupancy grid.
//!
//! The grid is derived fresh from the widget list on every search and thrown
//! away afterwards. Cells are `cell_size` units square; a widget marks a cell
//! by stepping from its own origin in `cell_size` increments and flooring each
//! step onto the grid. Unaligned widgets therefore mark the cells their steps
//! land in, which can leave a partially covered trailing cell unmarked.

use crate::geometry::{Point, Rect, Size};
use std::collections::HashSet;

/// Grid cell size used when nothing else is configured.
pub const DEFAULT_CELL_SIZE: f64 = 50.0;

/// Origin returned when the scan finds no free space.
pub const DEFAULT_FALLBACK_ORIGIN: Point = Point::new(20.0, 20.0);

/// Grid coordinate `(column, row)`.
pub type Cell = (i64, i64);

/// Tunables for [`find_free_origin`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacementConfig {
    /// Side length of one grid cell in canvas units.
    pub cell_size: f64,
    /// Deterministic origin used when the container has no free space.
    pub fallback_origin: Point,
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            cell_size: DEFAULT_CELL_SIZE,
            fallback_origin: DEFAULT_FALLBACK_ORIGIN,
        }
    }
}

/// Result of a placement search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Placement {
    /// A candidate origin whose footprint overlaps no occupied cell.
    Free(Point),
    /// The scan was exhausted; the widget may overlap others.
    Fallback(Point),
}

impl Placement {
    pub fn origin(&self) -> Point {
        match *self {
            Placement::Free(p) | Placement::Fallback(p) => p,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Placement::Fallback(_))
    }
}

fn cell_of(x: f64, y: f64, cell_size: f64) -> Cell {
    ((x / cell_size).floor() as i64, (y / cell_size).floor() as i64)
}

/// Cells marked by an existing widget's rectangle.
///
/// Steps `x` and `y` from the rectangle's origin while strictly below its
/// far edge, flooring each step onto the grid.
pub fn rect_cells(rect: &Rect, cell_size: f64) -> Vec<Cell> {
    let mut cells = Vec::new();
    if cell_size <= 0.0 {
        return cells;
    }
    let mut x = rect.x;
    while x < rect.right() {
        let mut y = rect.y;
        while y < rect.bottom() {
            cells.push(cell_of(x, y, cell_size));
            y += cell_size;
        }
        x += cell_size;
    }
    cells
}

/// Cells a new widget of `size` would cover with its origin at `origin`.
///
/// Covers `ceil(width / cell_size)` columns by `ceil(height / cell_size)` rows.
pub fn footprint_cells(origin: Point, size: Size, cell_size: f64) -> Vec<Cell> {
    if cell_size <= 0.0 {
        return Vec::new();
    }
    let columns = (size.width / cell_size).ceil().max(0.0) as i64;
    let rows = (size.height / cell_size).ceil().max(0.0) as i64;
    let mut cells = Vec::with_capacity((columns * rows).max(0) as usize);
    for i in 0..columns {
        for j in 0..rows {
            cells.push(cell_of(
                origin.x + i as f64 * cell_size,
                origin.y + j as f64 * cell_size,
                cell_size,
            ));
        }
    }
    cells
}

/// Set of grid cells covered by existing widgets.
#[derive(Debug, Clone, Default)]
pub struct OccupancyGrid {
    cells: HashSet<Cell>,
}

impl OccupancyGrid {
    /// Marks every cell covered by `rects`.
    pub fn from_rects<'a>(rects: impl IntoIterator<Item = &'a Rect>, cell_size: f64) -> Self {
        let cells = rects
            .into_iter()
            .flat_map(|rect| rect_cells(rect, cell_size))
            .collect();
        Self { cells }
    }

    pub fn is_occupied(&self, cell: Cell) -> bool {
        self.cells.contains(&cell)
    }

    /// Returns `true` if any of `cells` is already occupied.
    pub fn intersects(&self, cells: &[Cell]) -> bool {
        cells.iter().any(|c| self.cells.contains(c))
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// Finds the first origin, in row-major scan order, whose footprint for a
/// widget of `size` touches no occupied cell.
///
/// Candidates step by `cell_size` from `(0, 0)` while strictly inside
/// `container`: `y` in the outer loop, `x` in the inner one. Only the origin
/// is bounded; the footprint may extend past the right or bottom edge. This
/// is first-fit, not best-fit. When every candidate is blocked the configured
/// fallback origin is returned instead.
pub fn find_free_origin(
    size: Size,
    container: Size,
    existing: &[Rect],
    config: &PlacementConfig,
) -> Placement {
    let step = config.cell_size;
    if step <= 0.0 || !step.is_finite() {
        tracing::warn!("invalid cell size {step}, using fallback origin");
        return Placement::Fallback(config.fallback_origin);
    }

    let grid = OccupancyGrid::from_rects(existing, step);

    let mut y = 0.0;
    while y < container.height {
        let mut x = 0.0;
        while x < container.width {
            let origin = Point::new(x, y);
            if !grid.intersects(&footprint_cells(origin, size, step)) {
                tracing::debug!("placement found free origin {origin} for {size}");
                return Placement::Free(origin);
            }
            x += step;
        }
        y += step;
    }

    tracing::debug!(
        "no free space for {size} in {container}, falling back to {}",
        config.fallback_origin
    );
    Placement::Fallback(config.fallback_origin)
}
