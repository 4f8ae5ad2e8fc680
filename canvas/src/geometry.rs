//! Geometry primitives: points and the per-shape dimension records.
//!
//! A dimension is the single source of truth for where a shape is drawn.
//! Every record here is plain data; the only derived value is the direction
//! of a line, which is recomputed from its endpoints on each call.

#[cfg(test)]
#[path = "geometry_test.rs"]
mod geometry_test;

use serde::{Deserialize, Serialize};

use crate::consts::MIN_SHAPE_SIZE;

/// A point on the drawing surface.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Shift this point by `other`.
    pub fn add(&mut self, other: Point) {
        self.x += other.x;
        self.y += other.y;
    }

    /// A copy of this point shifted by `(dx, dy)`.
    #[must_use]
    pub fn offset(self, dx: f64, dy: f64) -> Self {
        Self { x: self.x + dx, y: self.y + dy }
    }
}

/// Extent of an axis-aligned rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RectDimension {
    pub left: f64,
    pub top: f64,
    pub height: f64,
    pub width: f64,
}

impl RectDimension {
    #[must_use]
    pub fn new(left: f64, top: f64, height: f64, width: f64) -> Self {
        Self { left, top, height, width }
    }

    /// Build a rectangle from a start corner and signed extents, normalizing
    /// so that width and height are never negative.
    #[must_use]
    pub fn from_extents(start: Point, dx: f64, dy: f64) -> Self {
        Self {
            left: start.x.min(start.x + dx),
            top: start.y.min(start.y + dy),
            height: dy.abs(),
            width: dx.abs(),
        }
    }

    #[must_use]
    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// Whether `pt` lies inside the rectangle (edges inclusive).
    #[must_use]
    pub fn contains(&self, pt: Point) -> bool {
        pt.x >= self.left && pt.x <= self.right() && pt.y >= self.top && pt.y <= self.bottom()
    }
}

/// Dominant direction of a line, from start to end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    /// Left to right.
    LeftRight,
    /// Right to left.
    RightLeft,
    /// Top to bottom.
    TopBottom,
    /// Bottom to top.
    BottomTop,
}

impl Direction {
    /// Two-letter code used in rendered attributes.
    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Self::LeftRight => "LR",
            Self::RightLeft => "RL",
            Self::TopBottom => "TB",
            Self::BottomTop => "BT",
        }
    }
}

/// Arrowhead placement on a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ArrowType {
    /// Arrowhead at the end point.
    #[default]
    Right,
    /// Arrowhead at the start point.
    Left,
    /// Arrowheads at both ends.
    Both,
}

/// Extent of a straight line.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineDimension {
    pub start: Point,
    pub end: Point,
    pub has_arrow: bool,
    pub arrow_type: ArrowType,
}

impl Default for LineDimension {
    fn default() -> Self {
        Self { start: Point::default(), end: Point::default(), has_arrow: true, arrow_type: ArrowType::Right }
    }
}

impl LineDimension {
    #[must_use]
    pub fn new(start: Point, end: Point) -> Self {
        Self { start, end, ..Self::default() }
    }

    /// Infer the dominant direction. Ties between axes go to the x axis.
    #[must_use]
    pub fn direction(&self) -> Direction {
        let dx = self.end.x - self.start.x;
        let dy = self.end.y - self.start.y;
        if dy.abs() <= dx.abs() {
            if dx >= 0.0 { Direction::LeftRight } else { Direction::RightLeft }
        } else if dy >= 0.0 {
            Direction::TopBottom
        } else {
            Direction::BottomTop
        }
    }
}

/// Extent of a circle.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CircleDimension {
    pub cx: f64,
    pub cy: f64,
    pub r: f64,
}

impl CircleDimension {
    #[must_use]
    pub fn new(cx: f64, cy: f64, r: f64) -> Self {
        Self { cx, cy, r }
    }

    #[must_use]
    pub fn bounds(&self) -> RectDimension {
        RectDimension::new(self.cx - self.r, self.cy - self.r, self.r * 2.0, self.r * 2.0)
    }
}

/// Extent of an axis-aligned ellipse.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct EllipseDimension {
    pub cx: f64,
    pub cy: f64,
    pub rx: f64,
    pub ry: f64,
}

impl EllipseDimension {
    #[must_use]
    pub fn new(cx: f64, cy: f64, rx: f64, ry: f64) -> Self {
        Self { cx, cy, rx, ry }
    }

    #[must_use]
    pub fn bounds(&self) -> RectDimension {
        RectDimension::new(self.cx - self.rx, self.cy - self.ry, self.ry * 2.0, self.rx * 2.0)
    }
}

/// Apply the minimum-size floor to a signed drag extent.
///
/// Extents whose magnitude is below [`MIN_SHAPE_SIZE`] become exactly
/// `+MIN_SHAPE_SIZE`; larger extents keep their sign.
#[must_use]
pub fn floor_extent(delta: f64) -> f64 {
    if delta.abs() < MIN_SHAPE_SIZE { MIN_SHAPE_SIZE } else { delta }
}

/// Smallest rectangle containing every point. `None` for an empty slice.
#[must_use]
pub fn bounds_of(points: &[Point]) -> Option<RectDimension> {
    let first = points.first()?;
    let (mut min_x, mut min_y, mut max_x, mut max_y) = (first.x, first.y, first.x, first.y);
    for p in &points[1..] {
        min_x = min_x.min(p.x);
        min_y = min_y.min(p.y);
        max_x = max_x.max(p.x);
        max_y = max_y.max(p.y);
    }
    Some(RectDimension::new(min_x, min_y, max_y - min_y, max_x - min_x))
}

/// Format points as an SVG `points` attribute: `"x1,y1 x2,y2 ..."`.
#[must_use]
pub fn points_attr(points: &[Point]) -> String {
    points
        .iter()
        .map(|p| format!("{},{}", p.x, p.y))
        .collect::<Vec<_>>()
        .join(" ")
}
