//! Straight line shape.

use super::{Geometry, ShapeKind, ShapeStyle, ShapeTrait};
use crate::color::Color;
use kurbo::{Point, Rect};

/// A straight segment between the gesture's start and end points.
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    /// First endpoint.
    pub start: Point,
    /// Second endpoint.
    pub end: Point,
    /// Style properties.
    pub style: ShapeStyle,
}

impl Line {
    /// Create a new line.
    pub fn new(start: Point, end: Point, color: Color) -> Self {
        Self {
            start,
            end,
            style: ShapeStyle::new(color),
        }
    }

    /// Reconstruct a line with a stored style (for file loading).
    pub(crate) fn reconstruct(start: Point, end: Point, style: ShapeStyle) -> Self {
        Self { start, end, style }
    }

    /// Get as a kurbo Line.
    pub fn as_kurbo(&self) -> kurbo::Line {
        kurbo::Line::new(self.start, self.end)
    }
}

impl ShapeTrait for Line {
    fn kind(&self) -> ShapeKind {
        ShapeKind::Line
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
        Geometry::Segment(self.as_kurbo())
    }

    fn bounds(&self) -> Rect {
        Rect::from_points(self.start, self.end)
    }
}
