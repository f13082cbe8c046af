//! Circle shape.

use super::{Geometry, ShapeKind, ShapeStyle, ShapeTrait};
use crate::color::Color;
use kurbo::{Point, Rect};

/// A circle centred between the two gesture points.
///
/// The radius comes from the horizontal span only: dragging from `(0, 0)` to
/// `(4, 10)` draws a circle of radius 2, not an ellipse. Saved drawings rely
/// on this, so it must not be "fixed".
#[derive(Debug, Clone, PartialEq)]
pub struct Circle {
    /// Corner where the gesture started.
    pub start: Point,
    /// Opposite corner.
    pub end: Point,
    /// Style properties.
    pub style: ShapeStyle,
}

impl Circle {
    /// Create a new circle from two corner points.
    pub fn new(start: Point, end: Point, color: Color) -> Self {
        Self {
            start,
            end,
            style: ShapeStyle::new(color),
        }
    }

    /// Reconstruct a circle with a stored style (for file loading).
    pub(crate) fn reconstruct(start: Point, end: Point, style: ShapeStyle) -> Self {
        Self { start, end, style }
    }

    pub fn center(&self) -> Point {
        self.start.midpoint(self.end)
    }

    pub fn radius(&self) -> f64 {
        (self.end.x - self.start.x).abs() / 2.0
    }

    /// Get as a kurbo Circle.
    pub fn as_kurbo(&self) -> kurbo::Circle {
        kurbo::Circle::new(self.center(), self.radius())
    }
}

impl ShapeTrait for Circle {
    fn kind(&self) -> ShapeKind {
        ShapeKind::Circle
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
        Geometry::Circle(self.as_kurbo())
    }

    fn bounds(&self) -> Rect {
        let center = self.center();
        let radius = self.radius();
        Rect::new(
            center.x - radius,
            center.y - radius,
            center.x + radius,
            center.y + radius,
        )
    }
}
