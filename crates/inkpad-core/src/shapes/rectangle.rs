//! Rectangle shape.

use super::{Geometry, ShapeKind, ShapeStyle, ShapeTrait};
use crate::color::Color;
use kurbo::{Point, Rect};

/// An axis-aligned rectangle spanned by two opposite corners.
///
/// The corners may be given in any order; the drawn rectangle is always
/// normalized.
#[derive(Debug, Clone, PartialEq)]
pub struct Rectangle {
    /// Corner where the gesture started.
    pub start: Point,
    /// Opposite corner.
    pub end: Point,
    /// Style properties.
    pub style: ShapeStyle,
}

impl Rectangle {
    /// Create a new rectangle from two corner points.
    pub fn new(start: Point, end: Point, color: Color) -> Self {
        Self {
            start,
            end,
            style: ShapeStyle::new(color),
        }
    }

    /// Reconstruct a rectangle with a stored style (for file loading).
    pub(crate) fn reconstruct(start: Point, end: Point, style: ShapeStyle) -> Self {
        Self { start, end, style }
    }

    /// Get the rectangle as a normalized kurbo Rect.
    pub fn as_rect(&self) -> Rect {
        Rect::new(
            self.start.x.min(self.end.x),
            self.start.y.min(self.end.y),
            self.start.x.max(self.end.x),
            self.start.y.max(self.end.y),
        )
    }

    pub fn width(&self) -> f64 {
        (self.end.x - self.start.x).abs()
    }

    pub fn height(&self) -> f64 {
        (self.end.y - self.start.y).abs()
    }
}

impl ShapeTrait for Rectangle {
    fn kind(&self) -> ShapeKind {
        ShapeKind::Rectangle
    }

    fn start(&self) -> Point {
        self.start
    }

    fn end(&self) -> Point {
        self.end
    }

    fn style(&self) -> &ShapeStyle {
        &self.style
    }

    fn geometry(&self) -> Geometry {
        Geometry::Rect(self.as_rect())
    }

    fn bounds(&self) -> Rect {
        self.as_rect()
    }
}
