//! Mapping between terminal cells and canvas units.
//!
//! A cell `(col, row)` stands for the canvas point at its top-left corner.
//! A widget covers exactly the cells whose point lies inside its rectangle,
//! which keeps what is drawn and what [`hit_test`](crate::interaction::hit_test)
//! reports in agreement for any rectangle, aligned or not.

use crate::geometry::{Point, Rect, Size};
use crate::interaction::Chrome;
use ratatui::layout::Rect as CellRect;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scale {
    /// Canvas units per column.
    pub column_width: f64,
    /// Canvas units per row.
    pub row_height: f64,
}

impl Default for Scale {
    fn default() -> Self {
        Self {
            column_width: 10.0,
            row_height: 25.0,
        }
    }
}

impl Scale {
    pub fn new(column_width: f64, row_height: f64) -> Self {
        Self {
            column_width,
            row_height,
        }
    }

    /// Canvas point for a cell offset from the canvas origin. Offsets may be
    /// negative when the pointer leaves the canvas during a drag.
    pub fn to_point(&self, dx: i32, dy: i32) -> Point {
        Point::new(dx as f64 * self.column_width, dy as f64 * self.row_height)
    }

    /// Container size for a canvas area of `width` by `height` cells.
    pub fn container(&self, width: u16, height: u16) -> Size {
        Size::new(width as f64 * self.column_width, height as f64 * self.row_height)
    }

    /// Cells covered by `rect`, relative to the canvas origin, as
    /// `(col, row, width, height)`. Columns `c` with
    /// `rect.x <= c * column_width < rect.right()` are covered.
    pub fn to_cells(&self, rect: &Rect) -> (i32, i32, i32, i32) {
        let x0 = (rect.x / self.column_width).ceil() as i32;
        let x1 = (rect.right() / self.column_width).ceil() as i32;
        let y0 = (rect.y / self.row_height).ceil() as i32;
        let y1 = (rect.bottom() / self.row_height).ceil() as i32;
        (x0, y0, (x1 - x0).max(0), (y1 - y0).max(0))
    }

    /// Cells covered by `rect` inside `area`, or `None` if nothing is visible.
    /// The second value is `true` when the widget is fully visible.
    pub fn visible_cells(&self, rect: &Rect, area: CellRect) -> Option<(CellRect, bool)> {
        let (x, y, w, h) = self.to_cells(rect);
        let left = (area.x as i32 + x).max(area.x as i32);
        let top = (area.y as i32 + y).max(area.y as i32);
        let right = (area.x as i32 + x + w).min(area.right() as i32);
        let bottom = (area.y as i32 + y + h).min(area.bottom() as i32);
        if right <= left || bottom <= top {
            return None;
        }
        let full = x >= 0 && y >= 0 && x + w <= area.width as i32 && y + h <= area.height as i32;
        let cells = CellRect::new(
            left as u16,
            top as u16,
            (right - left) as u16,
            (bottom - top) as u16,
        );
        Some((cells, full))
    }

    /// Widget chrome matching how the terminal draws a widget: the header is
    /// the top border row, the `[x]` control plus the corner take four
    /// columns, the resize handle is the bottom-right corner cell.
    pub fn chrome(&self) -> Chrome {
        Chrome {
            header_height: self.row_height,
            action_width: 4.0 * self.column_width,
            resize_handle: Size::new(self.column_width, self.row_height),
        }
    }
}
