//! Canvas geometry in abstract canvas units.
//!
//! Every coordinate the layout engine and interaction controller work with is
//! an `f64` measured from the container's top-left corner. Hosts convert their
//! own units (terminal cells, pixels) into canvas units before calling in.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A position on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.x, self.y)
    }
}

/// Width and height, used both for widget sizes and the container.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Error returned when a `WxH` or `X,Y` string cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseGeometryError(String);

impl fmt::Display for ParseGeometryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for ParseGeometryError {}

fn parse_pair(s: &str, sep: char, what: &str) -> Result<(f64, f64), ParseGeometryError> {
    let (a, b) = s
        .split_once(sep)
        .ok_or_else(|| ParseGeometryError(format!("invalid {what} '{s}', expected two numbers separated by '{sep}'")))?;
    let parse = |part: &str| {
        part.trim()
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite() && *v >= 0.0)
            .ok_or_else(|| ParseGeometryError(format!("invalid {what} component '{part}'")))
    };
    Ok((parse(a)?, parse(b)?))
}

impl FromStr for Size {
    type Err = ParseGeometryError;

    /// Parses `"800x600"` (case-insensitive separator).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.to_ascii_lowercase();
        let (width, height) = parse_pair(&normalized, 'x', "size")?;
        Ok(Self { width, height })
    }
}

impl FromStr for Point {
    type Err = ParseGeometryError;

    /// Parses `"120,40"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (x, y) = parse_pair(s, ',', "point")?;
        Ok(Self { x, y })
    }
}

/// Axis-aligned rectangle: top-left origin plus size.
///
/// `Rect` itself does not know about the container; keeping
/// `x + width <= container.width` is the interaction controller's job.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Builds a rectangle from an origin and a size.
    pub const fn from_parts(origin: Point, size: Size) -> Self {
        Self::new(origin.x, origin.y, size.width, size.height)
    }

    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Half-open containment: the right and bottom edges are outside.
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x && point.x < self.right() && point.y >= self.y && point.y < self.bottom()
    }

    /// Returns `true` if the rectangle lies fully inside a container of `size`.
    pub fn fits_within(&self, size: Size) -> bool {
        self.x >= 0.0 && self.y >= 0.0 && self.right() <= size.width && self.bottom() <= size.height
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {}x{})", self.x, self.y, self.width, self.height)
    }
}

/// Clamps `value` into `[min, max]`, letting `min` win when `max < min`.
///
/// `f64::clamp` panics on an inverted range; drag and resize math hits that
/// case whenever the container is smaller than the widget.
pub fn clamp_floor_wins(value: f64, min: f64, max: f64) -> f64 {
    value.min(max).max(min)
}
