//! Hit testing against a widget's chrome.

use crate::geometry::{Point, Rect, Size};

/// The part of a widget a pointer press landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitRegion {
    /// Header strip; pressing here starts a move.
    Header,
    /// Action control inside the header (the remove button).
    Action,
    /// Bottom-right resize handle.
    ResizeHandle,
    /// Content area; no interaction.
    Body,
}

/// Widget chrome geometry in canvas units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Chrome {
    /// Height of the header strip at the top of the widget.
    pub header_height: f64,
    /// Width of the action control at the right end of the header.
    pub action_width: f64,
    /// Size of the resize handle in the bottom-right corner.
    pub resize_handle: Size,
}

impl Default for Chrome {
    fn default() -> Self {
        Self {
            header_height: 80.0,
            action_width: 48.0,
            resize_handle: Size::new(24.0, 24.0),
        }
    }
}

/// Classifies `point` against a widget at `rect`.
///
/// Returns `None` when the point is outside the widget. The resize handle is
/// checked first so a press on it can never also start a move.
pub fn hit_test(rect: &Rect, point: Point, chrome: &Chrome) -> Option<HitRegion> {
    if !rect.contains(point) {
        return None;
    }
    if point.x >= rect.right() - chrome.resize_handle.width
        && point.y >= rect.bottom() - chrome.resize_handle.height
    {
        return Some(HitRegion::ResizeHandle);
    }
    if point.y < rect.y + chrome.header_height {
        if point.x >= rect.right() - chrome.action_width {
            return Some(HitRegion::Action);
        }
        return Some(HitRegion::Header);
    }
    Some(HitRegion::Body)
}

#[cfg(test)]
mod tests {
    use super::*;

    const RECT: Rect = Rect::new(100.0, 100.0, 300.0, 200.0);

    #[test]
    fn test_outside_is_none() {
        let chrome = Chrome::default();
        assert_eq!(hit_test(&RECT, Point::new(99.0, 150.0), &chrome), None);
        assert_eq!(hit_test(&RECT, Point::new(400.0, 150.0), &chrome), None);
    }

    #[test]
    fn test_header_and_action() {
        let chrome = Chrome::default();
        assert_eq!(hit_test(&RECT, Point::new(120.0, 110.0), &chrome), Some(HitRegion::Header));
        assert_eq!(hit_test(&RECT, Point::new(390.0, 110.0), &chrome), Some(HitRegion::Action));
    }

    #[test]
    fn test_body() {
        let chrome = Chrome::default();
        assert_eq!(hit_test(&RECT, Point::new(200.0, 200.0), &chrome), Some(HitRegion::Body));
    }

    #[test]
    fn test_resize_handle_wins_over_header() {
        // A widget so short that its header covers the handle.
        let short = Rect::new(0.0, 0.0, 300.0, 50.0);
        let chrome = Chrome::default();
        assert_eq!(hit_test(&short, Point::new(290.0, 40.0), &chrome), Some(HitRegion::ResizeHandle));
    }
}
